//! Statistics handlers.

use actix_web::{web, HttpResponse};
use reviewbot_core::use_cases::stats::GetStatistics;
use reviewbot_models::{PullRequestAssignmentCount, Statistics, UserAssignmentCount};
use serde::{Deserialize, Serialize};

use crate::{server::AppContext, Result};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StatisticsJson {
    assignments_by_user: Vec<UserAssignmentCount>,
    assignments_by_pr: Vec<PullRequestAssignmentCount>,
    open_prs_count: usize,
    merged_prs_count: usize,
}

impl From<Statistics> for StatisticsJson {
    fn from(value: Statistics) -> Self {
        Self {
            assignments_by_user: value.assignments_by_user,
            assignments_by_pr: value.assignments_by_pull_request,
            open_prs_count: value.open_pull_requests_count,
            merged_prs_count: value.merged_pull_requests_count,
        }
    }
}

pub(crate) fn configure_stats_handlers(cfg: &mut web::ServiceConfig) {
    cfg.route("/stats", web::get().to(get_stats));
}

#[tracing::instrument(skip_all)]
async fn get_stats(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let statistics = GetStatistics.run(&ctx.as_core_context()).await?;

    Ok(HttpResponse::Ok().json(StatisticsJson::from(statistics)))
}
