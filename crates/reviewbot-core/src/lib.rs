//! Logic module.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
pub mod random;
mod transaction;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{ConflictKind, DomainError, Result};
pub use random::{RandomService, SeededRandomService};
use shaku::module;
use use_cases::{
    pulls::{
        create_pull_request::CreatePullRequest, merge_pull_request::MergePullRequest,
        reassign_reviewer::ReassignReviewer,
    },
    reviews::{
        select_replacement_reviewer::SelectReplacementReviewer, select_reviewers::SelectReviewers,
    },
    teams::deactivate_team_members::DeactivateTeamMembers,
};

module! {
    pub CoreModule {
        components = [
            SelectReviewers,
            SelectReplacementReviewer,
            CreatePullRequest,
            MergePullRequest,
            ReassignReviewer,
            DeactivateTeamMembers,
        ],
        providers = []
    }
}
