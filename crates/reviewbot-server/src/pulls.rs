//! Pull request handlers.

use actix_web::{web, HttpResponse};
use reviewbot_core::use_cases::pulls::{
    CreatePullRequestInterface, MergePullRequestInterface, ReassignReviewerInterface,
};
use reviewbot_models::{PullRequest, PullRequestStatus};
use serde::{Deserialize, Serialize};
use shaku::HasComponent;
use time::OffsetDateTime;

use crate::{server::AppContext, Result};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PullRequestJson {
    pull_request_id: String,
    pull_request_name: String,
    author_id: String,
    status: PullRequestStatus,
    assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(rename = "mergedAt", with = "time::serde::rfc3339::option")]
    merged_at: Option<OffsetDateTime>,
}

impl From<PullRequest> for PullRequestJson {
    fn from(value: PullRequest) -> Self {
        Self {
            pull_request_id: value.id,
            pull_request_name: value.name,
            author_id: value.author_id,
            status: value.status,
            assigned_reviewers: value.assigned_reviewers,
            created_at: value.created_at,
            merged_at: value.merged_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CreatePullRequestJson {
    pull_request_id: String,
    pull_request_name: String,
    author_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct MergePullRequestJson {
    pull_request_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReassignReviewerJson {
    pull_request_id: String,
    old_user_id: String,
}

pub(crate) fn configure_pull_request_handlers(cfg: &mut web::ServiceConfig) {
    cfg.route("/create", web::post().to(create_pull_request))
        .route("/merge", web::post().to(merge_pull_request))
        .route("/reassign", web::post().to(reassign_reviewer));
}

#[tracing::instrument(skip_all, fields(
    pull_request_id = data.pull_request_id,
    author_id = data.author_id
))]
async fn create_pull_request(
    ctx: web::Data<AppContext>,
    data: web::Json<CreatePullRequestJson>,
) -> Result<HttpResponse> {
    let create_pull_request: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
    let pull_request = create_pull_request
        .run(
            &ctx.as_core_context(),
            &data.pull_request_id,
            &data.pull_request_name,
            &data.author_id,
        )
        .await?;

    Ok(HttpResponse::Created()
        .json(serde_json::json!({ "pr": PullRequestJson::from(pull_request) })))
}

#[tracing::instrument(skip_all, fields(pull_request_id = data.pull_request_id))]
async fn merge_pull_request(
    ctx: web::Data<AppContext>,
    data: web::Json<MergePullRequestJson>,
) -> Result<HttpResponse> {
    let merge_pull_request: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
    let pull_request = merge_pull_request
        .run(&ctx.as_core_context(), &data.pull_request_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "pr": PullRequestJson::from(pull_request) })))
}

#[tracing::instrument(skip_all, fields(
    pull_request_id = data.pull_request_id,
    old_user_id = data.old_user_id
))]
async fn reassign_reviewer(
    ctx: web::Data<AppContext>,
    data: web::Json<ReassignReviewerJson>,
) -> Result<HttpResponse> {
    let reassign_reviewer: &dyn ReassignReviewerInterface = ctx.core_module.resolve_ref();
    let (pull_request, replaced_by) = reassign_reviewer
        .run(
            &ctx.as_core_context(),
            &data.pull_request_id,
            &data.old_user_id,
        )
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "pr": PullRequestJson::from(pull_request),
        "replaced_by": replaced_by,
    })))
}
