use pretty_assertions::assert_eq;
use reviewbot_database_interface::DbOperations;
use reviewbot_models::Team;

use crate::{fixtures::seed, testcase::db_test_case};

#[tokio::test]
async fn commit() {
    db_test_case("transaction_commit", |db| async move {
        let tx = db.begin().await?;
        tx.teams_create(Team {
            name: "payments".into(),
        })
        .await?;
        assert!(tx.teams_get("payments").await?.is_some());
        tx.commit().await?;

        assert!(db.teams_get("payments").await?.is_some());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn rollback() {
    db_test_case("transaction_rollback", |db| async move {
        seed(db.as_ref()).await?;

        let tx = db.begin().await?;
        tx.users_deactivate_team_members("payments", &["u2".into()])
            .await?;
        tx.teams_create(Team {
            name: "search".into(),
        })
        .await?;
        tx.rollback().await?;

        assert!(db.users_get_expect("u2").await?.is_active);
        assert_eq!(db.teams_all().await?.len(), 1);

        Ok(())
    })
    .await;
}
