use pretty_assertions::assert_eq;
use reviewbot_database_interface::{DatabaseError, DbOperations};
use reviewbot_models::Team;

use crate::testcase::db_test_case;

#[tokio::test]
async fn create() {
    db_test_case("team_create", |db| async move {
        let team = db
            .teams_create(Team {
                name: "payments".into(),
            })
            .await?;
        assert_eq!(team.name, "payments");

        assert!(matches!(
            db.teams_create(Team {
                name: "payments".into(),
            })
            .await,
            Err(DatabaseError::TeamAlreadyExists(name)) if name == "payments"
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get() {
    db_test_case("team_get", |db| async move {
        assert_eq!(db.teams_get("payments").await?, None);
        assert!(matches!(
            db.teams_get_expect("payments").await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        db.teams_create(Team {
            name: "payments".into(),
        })
        .await?;

        assert_eq!(
            db.teams_get_expect("payments").await?,
            Team {
                name: "payments".into()
            }
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn all() {
    db_test_case("team_all", |db| async move {
        db.teams_create(Team {
            name: "search".into(),
        })
        .await?;
        db.teams_create(Team {
            name: "backend".into(),
        })
        .await?;

        let names: Vec<_> = db.teams_all().await?.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["backend".to_string(), "search".to_string()]);

        Ok(())
    })
    .await;
}
