//! Team handlers.

use actix_web::{web, HttpResponse};
use reviewbot_core::use_cases::teams::{AddTeam, DeactivateTeamMembersInterface, GetTeam};
use reviewbot_models::{TeamWithMembers, User};
use serde::{Deserialize, Serialize};
use shaku::HasComponent;

use crate::{server::AppContext, Result};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TeamMemberJson {
    user_id: String,
    username: String,
    is_active: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TeamJson {
    team_name: String,
    members: Vec<TeamMemberJson>,
}

impl From<TeamWithMembers> for TeamJson {
    fn from(value: TeamWithMembers) -> Self {
        Self {
            team_name: value.team.name,
            members: value
                .members
                .into_iter()
                .map(|m| TeamMemberJson {
                    user_id: m.id,
                    username: m.username,
                    is_active: m.is_active,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamQuery {
    team_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DeactivateUsersJson {
    team_name: String,
    user_ids: Vec<String>,
}

pub(crate) fn configure_team_handlers(cfg: &mut web::ServiceConfig) {
    cfg.route("/add", web::post().to(add_team))
        .route("/get", web::get().to(get_team))
        .route("/deactivateUsers", web::post().to(deactivate_users));
}

#[tracing::instrument(skip_all, fields(team_name = data.team_name))]
async fn add_team(ctx: web::Data<AppContext>, data: web::Json<TeamJson>) -> Result<HttpResponse> {
    let TeamJson { team_name, members } = data.into_inner();
    let members = members
        .into_iter()
        .map(|m| User {
            id: m.user_id,
            username: m.username,
            team_name: None,
            is_active: m.is_active,
        })
        .collect();

    let team = AddTeam
        .run(&ctx.as_core_context(), &team_name, members)
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "team": TeamJson::from(team) })))
}

#[tracing::instrument(skip_all, fields(team_name = query.team_name))]
async fn get_team(
    ctx: web::Data<AppContext>,
    query: web::Query<TeamQuery>,
) -> Result<HttpResponse> {
    let team = GetTeam
        .run(&ctx.as_core_context(), &query.team_name)
        .await?;

    Ok(HttpResponse::Ok().json(TeamJson::from(team)))
}

#[tracing::instrument(skip_all, fields(team_name = data.team_name, user_ids = ?data.user_ids))]
async fn deactivate_users(
    ctx: web::Data<AppContext>,
    data: web::Json<DeactivateUsersJson>,
) -> Result<HttpResponse> {
    let deactivate_team_members: &dyn DeactivateTeamMembersInterface =
        ctx.core_module.resolve_ref();
    let result = deactivate_team_members
        .run(&ctx.as_core_context(), &data.team_name, &data.user_ids)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}
