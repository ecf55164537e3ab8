//! User handlers.

use actix_web::{web, HttpResponse};
use reviewbot_core::{
    use_cases::users::{ListUserReviews, SetUserIsActive},
    DomainError,
};
use reviewbot_models::{PullRequest, PullRequestStatus, User};
use serde::{Deserialize, Serialize};

use crate::{server::AppContext, Result};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct UserJson {
    user_id: String,
    username: String,
    team_name: Option<String>,
    is_active: bool,
}

impl From<User> for UserJson {
    fn from(value: User) -> Self {
        Self {
            user_id: value.id,
            username: value.username,
            team_name: value.team_name,
            is_active: value.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SetIsActiveJson {
    user_id: String,
    is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserQuery {
    user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PullRequestShortJson {
    pull_request_id: String,
    pull_request_name: String,
    author_id: String,
    status: PullRequestStatus,
}

impl From<PullRequest> for PullRequestShortJson {
    fn from(value: PullRequest) -> Self {
        Self {
            pull_request_id: value.id,
            pull_request_name: value.name,
            author_id: value.author_id,
            status: value.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct UserReviewsJson {
    user_id: String,
    pull_requests: Vec<PullRequestShortJson>,
}

pub(crate) fn configure_user_handlers(cfg: &mut web::ServiceConfig) {
    cfg.route("/setIsActive", web::post().to(set_is_active))
        .route("/getReview", web::get().to(get_review));
}

#[tracing::instrument(skip_all, fields(user_id = data.user_id, is_active = data.is_active))]
async fn set_is_active(
    ctx: web::Data<AppContext>,
    data: web::Json<SetIsActiveJson>,
) -> Result<HttpResponse> {
    let user = SetUserIsActive
        .run(&ctx.as_core_context(), &data.user_id, data.is_active)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": UserJson::from(user) })))
}

#[tracing::instrument(skip_all, fields(user_id = query.user_id))]
async fn get_review(
    ctx: web::Data<AppContext>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse> {
    let pull_requests = match ListUserReviews
        .run(&ctx.as_core_context(), &query.user_id)
        .await
    {
        Ok(pull_requests) => pull_requests,
        // Unknown users simply have nothing to review.
        Err(DomainError::UserNotFound { .. }) => vec![],
        Err(e) => return Err(e.into()),
    };

    Ok(HttpResponse::Ok().json(UserReviewsJson {
        user_id: query.into_inner().user_id,
        pull_requests: pull_requests.into_iter().map(Into::into).collect(),
    }))
}
