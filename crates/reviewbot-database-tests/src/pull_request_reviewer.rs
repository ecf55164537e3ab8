use pretty_assertions::assert_eq;
use reviewbot_database_interface::{DatabaseError, DbOperations};
use reviewbot_models::{OpenReviewAssignment, PullRequestReviewer};
use time::macros::datetime;

use crate::{
    fixtures::{pull_request, seed},
    testcase::db_test_case,
};

fn link(pull_request_id: &str, reviewer_id: &str) -> PullRequestReviewer {
    PullRequestReviewer {
        pull_request_id: pull_request_id.into(),
        reviewer_id: reviewer_id.into(),
    }
}

#[tokio::test]
async fn create() {
    db_test_case("pull_request_reviewer_create", |db| async move {
        seed(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", &["u2"])).await?;

        assert!(matches!(
            db.pull_request_reviewers_create(link("pr-2", "u3")).await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));
        assert!(matches!(
            db.pull_request_reviewers_create(link("pr-1", "u2")).await,
            Err(DatabaseError::DuplicatePullRequestReviewer(_, _))
        ));

        db.pull_request_reviewers_create(link("pr-1", "u3")).await?;
        assert_eq!(
            db.pull_request_reviewers_list("pr-1").await?,
            vec![link("pr-1", "u2"), link("pr-1", "u3")]
        );
        assert_eq!(db.pull_request_reviewers_all().await?.len(), 2);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace_keeps_position() {
    db_test_case("pull_request_reviewer_replace", |db| async move {
        seed(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", &["u2", "u3"]))
            .await?;

        assert!(db.pull_request_reviewers_replace("pr-1", "u2", "u4").await?);
        assert!(!db.pull_request_reviewers_replace("pr-1", "u2", "u4").await?);
        assert!(matches!(
            db.pull_request_reviewers_replace("pr-1", "u4", "u3").await,
            Err(DatabaseError::DuplicatePullRequestReviewer(_, _))
        ));

        assert_eq!(
            db.pull_requests_get_expect("pr-1").await?.assigned_reviewers,
            vec!["u4", "u3"]
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn delete() {
    db_test_case("pull_request_reviewer_delete", |db| async move {
        seed(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", &["u2", "u3"]))
            .await?;

        assert!(db.pull_request_reviewers_delete("pr-1", "u2").await?);
        assert!(!db.pull_request_reviewers_delete("pr-1", "u2").await?);
        assert_eq!(
            db.pull_request_reviewers_list("pr-1").await?,
            vec![link("pr-1", "u3")]
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_open_for_reviewers() {
    db_test_case("pull_request_reviewer_list_open", |db| async move {
        seed(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-2", &["u3", "u2"]))
            .await?;
        db.pull_requests_create(pull_request("pr-1", &["u2", "u4"]))
            .await?;
        db.pull_requests_create(pull_request("pr-3", &["u2"])).await?;
        db.pull_requests_set_merged("pr-3", datetime!(2024-01-02 10:00 UTC))
            .await?;

        let assignment = |pull_request_id: &str, reviewer_id: &str| OpenReviewAssignment {
            pull_request_id: pull_request_id.into(),
            author_id: "u1".into(),
            reviewer_id: reviewer_id.into(),
        };

        assert_eq!(
            db.pull_request_reviewers_list_open_for_reviewers(&["u2".into(), "u3".into()])
                .await?,
            vec![
                assignment("pr-1", "u2"),
                assignment("pr-2", "u3"),
                assignment("pr-2", "u2"),
            ]
        );

        Ok(())
    })
    .await;
}
