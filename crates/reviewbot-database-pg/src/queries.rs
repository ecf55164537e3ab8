use reviewbot_database_interface::{DatabaseError, Result};
use reviewbot_models::{OpenReviewAssignment, PullRequest, PullRequestReviewer, Team, User};
use sqlx::{PgConnection, Row};
use time::OffsetDateTime;

use crate::row::{
    OpenReviewAssignmentRow, PullRequestReviewerRow, PullRequestRow, TeamRow, UserRow,
};

const PULL_REQUEST_SELECT: &str = r#"
    SELECT
        pr.id,
        pr.name,
        pr.author_id,
        pr.status,
        pr.created_at,
        pr.merged_at,
        COALESCE(
            array_agg(r.reviewer_id ORDER BY r.id) FILTER (WHERE r.reviewer_id IS NOT NULL),
            ARRAY[]::VARCHAR[]
        )::TEXT[] AS assigned_reviewers
    FROM pull_request pr
    LEFT JOIN pull_request_reviewer r ON r.pull_request_id = pr.id
"#;

pub(crate) fn wrap_error(e: sqlx::Error) -> DatabaseError {
    let serialization_failure = e
        .as_database_error()
        .and_then(|e| e.code())
        .map(|code| code == "40001")
        .unwrap_or(false);

    if serialization_failure {
        DatabaseError::SerializationFailure
    } else {
        DatabaseError::ImplementationError { source: e.into() }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|e| e.is_foreign_key_violation())
        .unwrap_or(false)
}

pub(crate) async fn health_check(conn: &mut PgConnection) -> Result<()> {
    sqlx::query("SELECT 1;")
        .execute(conn)
        .await
        .map_err(wrap_error)?;

    Ok(())
}

pub(crate) async fn teams_create(conn: &mut PgConnection, instance: Team) -> Result<Team> {
    sqlx::query(
        r#"
        INSERT INTO team (name)
        VALUES ($1);
    "#,
    )
    .bind(&instance.name)
    .execute(conn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            DatabaseError::TeamAlreadyExists(instance.name.clone())
        } else {
            wrap_error(e)
        }
    })?;

    Ok(instance)
}

pub(crate) async fn teams_get(conn: &mut PgConnection, name: &str) -> Result<Option<Team>> {
    let row = sqlx::query_as::<_, TeamRow>(
        r#"
        SELECT *
        FROM team
        WHERE name = $1
    "#,
    )
    .bind(name)
    .fetch_optional(conn)
    .await
    .map_err(wrap_error)?;

    Ok(row.map(Into::into))
}

pub(crate) async fn teams_all(conn: &mut PgConnection) -> Result<Vec<Team>> {
    let rows = sqlx::query_as::<_, TeamRow>(
        r#"
        SELECT *
        FROM team
        ORDER BY name
    "#,
    )
    .fetch_all(conn)
    .await
    .map_err(wrap_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub(crate) async fn users_create(conn: &mut PgConnection, instance: User) -> Result<User> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO app_user
        (
            id,
            username,
            team_name,
            is_active
        )
        VALUES
        (
            $1,
            $2,
            $3,
            $4
        )
        ON CONFLICT (id) DO UPDATE
        SET username = EXCLUDED.username,
            team_name = EXCLUDED.team_name,
            is_active = EXCLUDED.is_active
        RETURNING *;
    "#,
    )
    .bind(&instance.id)
    .bind(&instance.username)
    .bind(&instance.team_name)
    .bind(instance.is_active)
    .fetch_one(conn)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            DatabaseError::UnknownTeam(instance.team_name.clone().unwrap_or_default())
        } else {
            wrap_error(e)
        }
    })?;

    Ok(row.into())
}

pub(crate) async fn users_get(conn: &mut PgConnection, id: &str) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT *
        FROM app_user
        WHERE id = $1
    "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(wrap_error)?;

    Ok(row.map(Into::into))
}

pub(crate) async fn users_all(conn: &mut PgConnection) -> Result<Vec<User>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT *
        FROM app_user
        ORDER BY id
    "#,
    )
    .fetch_all(conn)
    .await
    .map_err(wrap_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub(crate) async fn users_list_team_members(
    conn: &mut PgConnection,
    team_name: &str,
    active_only: bool,
) -> Result<Vec<User>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT *
        FROM app_user
        WHERE team_name = $1
        AND (is_active OR NOT $2)
        ORDER BY id
    "#,
    )
    .bind(team_name)
    .bind(active_only)
    .fetch_all(conn)
    .await
    .map_err(wrap_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub(crate) async fn users_set_is_active(
    conn: &mut PgConnection,
    id: &str,
    value: bool,
) -> Result<User> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE app_user
        SET is_active = $1
        WHERE id = $2
        RETURNING *;
    "#,
    )
    .bind(value)
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(wrap_error)?;

    row.map(Into::into)
        .ok_or_else(|| DatabaseError::UnknownUser(id.into()))
}

pub(crate) async fn users_deactivate_team_members(
    conn: &mut PgConnection,
    team_name: &str,
    ids: &[String],
) -> Result<Vec<String>> {
    let rows = sqlx::query(
        r#"
        UPDATE app_user
        SET is_active = FALSE
        WHERE team_name = $1
        AND id = ANY($2)
        RETURNING id;
    "#,
    )
    .bind(team_name)
    .bind(ids.to_vec())
    .fetch_all(conn)
    .await
    .map_err(wrap_error)?;

    let mut ids = rows
        .into_iter()
        .map(|r| r.try_get::<String, _>(0))
        .collect::<core::result::Result<Vec<_>, _>>()
        .map_err(wrap_error)?;
    ids.sort();
    Ok(ids)
}

pub(crate) async fn pull_requests_create(
    conn: &mut PgConnection,
    instance: PullRequest,
) -> Result<PullRequest> {
    sqlx::query(
        r#"
        INSERT INTO pull_request
        (
            id,
            name,
            author_id,
            status,
            created_at,
            merged_at
        )
        VALUES
        (
            $1,
            $2,
            $3,
            $4,
            $5,
            $6
        );
    "#,
    )
    .bind(&instance.id)
    .bind(&instance.name)
    .bind(&instance.author_id)
    .bind(instance.status.to_str())
    .bind(instance.created_at)
    .bind(instance.merged_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            DatabaseError::PullRequestAlreadyExists(instance.id.clone())
        } else if is_foreign_key_violation(&e) {
            DatabaseError::UnknownUser(instance.author_id.clone())
        } else {
            wrap_error(e)
        }
    })?;

    for reviewer_id in &instance.assigned_reviewers {
        pull_request_reviewers_create(
            &mut *conn,
            PullRequestReviewer {
                pull_request_id: instance.id.clone(),
                reviewer_id: reviewer_id.clone(),
            },
        )
        .await?;
    }

    pull_requests_get(conn, &instance.id)
        .await?
        .ok_or_else(|| DatabaseError::UnknownPullRequest(instance.id.clone()))
}

pub(crate) async fn pull_requests_get(
    conn: &mut PgConnection,
    id: &str,
) -> Result<Option<PullRequest>> {
    let query = format!("{PULL_REQUEST_SELECT} WHERE pr.id = $1 GROUP BY pr.id");
    let row = sqlx::query_as::<_, PullRequestRow>(&query)
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(wrap_error)?;

    Ok(row.map(Into::into))
}

pub(crate) async fn pull_requests_all(conn: &mut PgConnection) -> Result<Vec<PullRequest>> {
    let query = format!("{PULL_REQUEST_SELECT} GROUP BY pr.id ORDER BY pr.id");
    let rows = sqlx::query_as::<_, PullRequestRow>(&query)
        .fetch_all(conn)
        .await
        .map_err(wrap_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub(crate) async fn pull_requests_list_for_reviewer(
    conn: &mut PgConnection,
    reviewer_id: &str,
) -> Result<Vec<PullRequest>> {
    let query = format!(
        r#"
        {PULL_REQUEST_SELECT}
        WHERE pr.id IN (
            SELECT pull_request_id
            FROM pull_request_reviewer
            WHERE reviewer_id = $1
        )
        GROUP BY pr.id
        ORDER BY pr.id
    "#
    );
    let rows = sqlx::query_as::<_, PullRequestRow>(&query)
        .bind(reviewer_id)
        .fetch_all(conn)
        .await
        .map_err(wrap_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub(crate) async fn pull_requests_set_merged(
    conn: &mut PgConnection,
    id: &str,
    merged_at: OffsetDateTime,
) -> Result<PullRequest> {
    let updated = sqlx::query(
        r#"
        UPDATE pull_request
        SET status = 'MERGED',
            merged_at = $1
        WHERE id = $2
        RETURNING id;
    "#,
    )
    .bind(merged_at)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(wrap_error)?;

    if updated.is_none() {
        return Err(DatabaseError::UnknownPullRequest(id.into()));
    }

    pull_requests_get(conn, id)
        .await?
        .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))
}

pub(crate) async fn pull_request_reviewers_create(
    conn: &mut PgConnection,
    instance: PullRequestReviewer,
) -> Result<PullRequestReviewer> {
    sqlx::query(
        r#"
        INSERT INTO pull_request_reviewer
        (
            pull_request_id,
            reviewer_id
        )
        VALUES
        (
            $1,
            $2
        );
    "#,
    )
    .bind(&instance.pull_request_id)
    .bind(&instance.reviewer_id)
    .execute(conn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            DatabaseError::DuplicatePullRequestReviewer(
                instance.pull_request_id.clone(),
                instance.reviewer_id.clone(),
            )
        } else if is_foreign_key_violation(&e) {
            DatabaseError::UnknownUser(instance.reviewer_id.clone())
        } else {
            wrap_error(e)
        }
    })?;

    Ok(instance)
}

pub(crate) async fn pull_request_reviewers_list(
    conn: &mut PgConnection,
    pull_request_id: &str,
) -> Result<Vec<PullRequestReviewer>> {
    let rows = sqlx::query_as::<_, PullRequestReviewerRow>(
        r#"
        SELECT *
        FROM pull_request_reviewer
        WHERE pull_request_id = $1
        ORDER BY id
    "#,
    )
    .bind(pull_request_id)
    .fetch_all(conn)
    .await
    .map_err(wrap_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub(crate) async fn pull_request_reviewers_all(
    conn: &mut PgConnection,
) -> Result<Vec<PullRequestReviewer>> {
    let rows = sqlx::query_as::<_, PullRequestReviewerRow>(
        r#"
        SELECT *
        FROM pull_request_reviewer
        ORDER BY id
    "#,
    )
    .fetch_all(conn)
    .await
    .map_err(wrap_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub(crate) async fn pull_request_reviewers_list_open_for_reviewers(
    conn: &mut PgConnection,
    reviewer_ids: &[String],
) -> Result<Vec<OpenReviewAssignment>> {
    let rows = sqlx::query_as::<_, OpenReviewAssignmentRow>(
        r#"
        SELECT r.pull_request_id, pr.author_id, r.reviewer_id
        FROM pull_request_reviewer r
        INNER JOIN pull_request pr ON pr.id = r.pull_request_id
        WHERE pr.status = 'OPEN'
        AND r.reviewer_id = ANY($1)
        ORDER BY r.pull_request_id, r.id
    "#,
    )
    .bind(reviewer_ids.to_vec())
    .fetch_all(conn)
    .await
    .map_err(wrap_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub(crate) async fn pull_request_reviewers_replace(
    conn: &mut PgConnection,
    pull_request_id: &str,
    old_reviewer_id: &str,
    new_reviewer_id: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE pull_request_reviewer
        SET reviewer_id = $1
        WHERE pull_request_id = $2
        AND reviewer_id = $3;
    "#,
    )
    .bind(new_reviewer_id)
    .bind(pull_request_id)
    .bind(old_reviewer_id)
    .execute(conn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            DatabaseError::DuplicatePullRequestReviewer(
                pull_request_id.into(),
                new_reviewer_id.into(),
            )
        } else if is_foreign_key_violation(&e) {
            DatabaseError::UnknownUser(new_reviewer_id.into())
        } else {
            wrap_error(e)
        }
    })?;

    Ok(result.rows_affected() > 0)
}

pub(crate) async fn pull_request_reviewers_delete(
    conn: &mut PgConnection,
    pull_request_id: &str,
    reviewer_id: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM pull_request_reviewer
        WHERE pull_request_id = $1
        AND reviewer_id = $2;
    "#,
    )
    .bind(pull_request_id)
    .bind(reviewer_id)
    .execute(conn)
    .await
    .map_err(wrap_error)?;

    Ok(result.rows_affected() > 0)
}
