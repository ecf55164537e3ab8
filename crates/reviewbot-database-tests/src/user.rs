use pretty_assertions::assert_eq;
use reviewbot_database_interface::{DatabaseError, DbOperations};
use reviewbot_models::{Team, User};

use crate::testcase::db_test_case;

fn user(id: &str, team_name: &str, is_active: bool) -> User {
    User {
        id: id.into(),
        username: format!("user-{id}"),
        team_name: Some(team_name.into()),
        is_active,
    }
}

#[tokio::test]
async fn create_or_update() {
    db_test_case("user_create_or_update", |db| async move {
        assert!(matches!(
            db.users_create(user("u1", "payments", true)).await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        db.teams_create(Team {
            name: "payments".into(),
        })
        .await?;
        db.teams_create(Team {
            name: "search".into(),
        })
        .await?;

        db.users_create(user("u1", "payments", true)).await?;
        let updated = db
            .users_create(User {
                username: "renamed".into(),
                ..user("u1", "search", false)
            })
            .await?;

        assert_eq!(db.users_get_expect("u1").await?, updated);
        assert_eq!(db.users_all().await?.len(), 1);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn team_members() {
    db_test_case("user_team_members", |db| async move {
        db.teams_create(Team {
            name: "payments".into(),
        })
        .await?;
        db.teams_create(Team {
            name: "search".into(),
        })
        .await?;

        db.users_create(user("u3", "payments", true)).await?;
        db.users_create(user("u1", "payments", true)).await?;
        db.users_create(user("u2", "payments", false)).await?;
        db.users_create(user("u4", "search", true)).await?;

        let ids = |users: Vec<User>| users.into_iter().map(|u| u.id).collect::<Vec<_>>();
        assert_eq!(
            ids(db.users_list_team_members("payments").await?),
            vec!["u1", "u2", "u3"]
        );
        assert_eq!(
            ids(db.users_list_active_team_members("payments").await?),
            vec!["u1", "u3"]
        );
        assert!(db.users_list_team_members("unknown").await?.is_empty());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_is_active() {
    db_test_case("user_set_is_active", |db| async move {
        assert!(matches!(
            db.users_set_is_active("u1", false).await,
            Err(DatabaseError::UnknownUser(_))
        ));

        db.teams_create(Team {
            name: "payments".into(),
        })
        .await?;
        db.users_create(user("u1", "payments", true)).await?;

        let u1 = db.users_set_is_active("u1", false).await?;
        assert!(!u1.is_active);
        assert!(!db.users_get_expect("u1").await?.is_active);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn deactivate_team_members() {
    db_test_case("user_deactivate_team_members", |db| async move {
        db.teams_create(Team {
            name: "payments".into(),
        })
        .await?;
        db.teams_create(Team {
            name: "search".into(),
        })
        .await?;
        db.users_create(user("u1", "payments", true)).await?;
        db.users_create(user("u2", "payments", true)).await?;
        db.users_create(user("u3", "search", true)).await?;

        let matched = db
            .users_deactivate_team_members(
                "payments",
                &["u2".into(), "u3".into(), "unknown".into()],
            )
            .await?;
        assert_eq!(matched, vec!["u2".to_string()]);

        assert!(db.users_get_expect("u1").await?.is_active);
        assert!(!db.users_get_expect("u2").await?.is_active);
        assert!(db.users_get_expect("u3").await?.is_active);

        Ok(())
    })
    .await;
}
