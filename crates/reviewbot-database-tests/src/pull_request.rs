use pretty_assertions::assert_eq;
use reviewbot_database_interface::{DatabaseError, DbOperations};
use reviewbot_models::PullRequestStatus;
use time::macros::datetime;

use crate::{
    fixtures::{pull_request, seed},
    testcase::db_test_case,
};

#[tokio::test]
async fn create() {
    db_test_case("pull_request_create", |db| async move {
        assert!(matches!(
            db.pull_requests_create(pull_request("pr-1", &[])).await,
            Err(DatabaseError::UnknownUser(_))
        ));

        seed(db.as_ref()).await?;

        let pr = db
            .pull_requests_create(pull_request("pr-1", &["u3", "u2"]))
            .await?;
        assert_eq!(pr, pull_request("pr-1", &["u3", "u2"]));
        assert_eq!(db.pull_requests_get_expect("pr-1").await?, pr);

        assert!(matches!(
            db.pull_requests_create(pull_request("pr-1", &[])).await,
            Err(DatabaseError::PullRequestAlreadyExists(id)) if id == "pr-1"
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get() {
    db_test_case("pull_request_get", |db| async move {
        assert_eq!(db.pull_requests_get("pr-1").await?, None);
        assert!(matches!(
            db.pull_requests_get_expect("pr-1").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_for_reviewer() {
    db_test_case("pull_request_list_for_reviewer", |db| async move {
        seed(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-2", &["u2"])).await?;
        db.pull_requests_create(pull_request("pr-1", &["u2", "u3"]))
            .await?;
        db.pull_requests_create(pull_request("pr-3", &["u3"])).await?;

        let ids: Vec<_> = db
            .pull_requests_list_for_reviewer("u2")
            .await?
            .into_iter()
            .map(|pr| pr.id)
            .collect();
        assert_eq!(ids, vec!["pr-1", "pr-2"]);
        assert_eq!(db.pull_requests_all().await?.len(), 3);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_merged() {
    db_test_case("pull_request_set_merged", |db| async move {
        assert!(matches!(
            db.pull_requests_set_merged("pr-1", datetime!(2024-01-02 10:00 UTC))
                .await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        seed(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", &["u2"])).await?;

        let pr = db
            .pull_requests_set_merged("pr-1", datetime!(2024-01-02 10:00 UTC))
            .await?;
        assert_eq!(pr.status, PullRequestStatus::Merged);
        assert_eq!(pr.merged_at, Some(datetime!(2024-01-02 10:00 UTC)));
        assert_eq!(pr.assigned_reviewers, vec!["u2"]);

        Ok(())
    })
    .await;
}
