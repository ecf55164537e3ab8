use serde::{Deserialize, Serialize};

use crate::User;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub name: String,
}

/// Team with its members, sorted by user id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamWithMembers {
    pub team: Team,
    pub members: Vec<User>,
}
