use reviewbot_database_interface::{DatabaseError, DbService};
use reviewbot_models::{PullRequest, Team, User};
use time::macros::datetime;

/// Team "payments" with active members u1, u2, u3 and u4.
pub(crate) async fn seed(db: &dyn DbService) -> Result<(), DatabaseError> {
    db.teams_create(Team {
        name: "payments".into(),
    })
    .await?;

    for id in ["u1", "u2", "u3", "u4"] {
        db.users_create(User {
            id: id.into(),
            username: id.into(),
            team_name: Some("payments".into()),
            is_active: true,
        })
        .await?;
    }

    Ok(())
}

/// Open pull request authored by u1.
pub(crate) fn pull_request(id: &str, reviewers: &[&str]) -> PullRequest {
    PullRequest {
        id: id.into(),
        name: format!("Pull request {id}"),
        author_id: "u1".into(),
        assigned_reviewers: reviewers.iter().map(|&r| r.into()).collect(),
        created_at: datetime!(2024-01-01 10:00 UTC),
        ..Default::default()
    }
}
