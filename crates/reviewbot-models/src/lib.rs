mod deactivation_result;
mod open_review_assignment;
mod pull_request;
mod pull_request_reviewer;
mod pull_request_status;
mod statistics;
mod team;
mod user;

pub use deactivation_result::DeactivationResult;
pub use open_review_assignment::OpenReviewAssignment;
pub use pull_request::PullRequest;
pub use pull_request_reviewer::PullRequestReviewer;
pub use pull_request_status::{PullRequestStatus, PullRequestStatusError};
pub use statistics::{PullRequestAssignmentCount, Statistics, UserAssignmentCount};
pub use team::{Team, TeamWithMembers};
pub use user::User;
