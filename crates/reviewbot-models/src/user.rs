use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub team_name: Option<String>,
    pub is_active: bool,
}

impl User {
    pub fn with_team(mut self, team_name: &str) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn belongs_to(&self, team_name: &str) -> bool {
        self.team_name.as_deref() == Some(team_name)
    }
}
