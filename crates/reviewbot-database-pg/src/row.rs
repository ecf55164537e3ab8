use reviewbot_models::{OpenReviewAssignment, PullRequest, PullRequestReviewer, Team, User};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::fields::PullRequestStatusDecode;

pub(crate) struct TeamRow(Team);
pub(crate) struct UserRow(User);
pub(crate) struct PullRequestRow(PullRequest);
pub(crate) struct PullRequestReviewerRow(PullRequestReviewer);
pub(crate) struct OpenReviewAssignmentRow(OpenReviewAssignment);

impl From<TeamRow> for Team {
    fn from(r: TeamRow) -> Self {
        r.0
    }
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        r.0
    }
}

impl From<PullRequestRow> for PullRequest {
    fn from(r: PullRequestRow) -> Self {
        r.0
    }
}

impl From<PullRequestReviewerRow> for PullRequestReviewer {
    fn from(r: PullRequestReviewerRow) -> Self {
        r.0
    }
}

impl From<OpenReviewAssignmentRow> for OpenReviewAssignment {
    fn from(r: OpenReviewAssignmentRow) -> Self {
        r.0
    }
}

impl<'r> FromRow<'r, PgRow> for TeamRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(Team {
            name: row.try_get("name")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for UserRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            team_name: row.try_get("team_name")?,
            is_active: row.try_get("is_active")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for PullRequestRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(PullRequest {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            author_id: row.try_get("author_id")?,
            status: row
                .try_get::<PullRequestStatusDecode, _>("status")
                .map(Into::into)?,
            assigned_reviewers: row.try_get("assigned_reviewers")?,
            created_at: row.try_get("created_at")?,
            merged_at: row.try_get("merged_at")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for PullRequestReviewerRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(PullRequestReviewer {
            pull_request_id: row.try_get("pull_request_id")?,
            reviewer_id: row.try_get("reviewer_id")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for OpenReviewAssignmentRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(OpenReviewAssignment {
            pull_request_id: row.try_get("pull_request_id")?,
            author_id: row.try_get("author_id")?,
            reviewer_id: row.try_get("reviewer_id")?,
        }))
    }
}
