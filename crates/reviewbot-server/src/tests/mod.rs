//! Handler tests, run against the memory backend.

mod users;

use actix_http::{Request, StatusCode};
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    test::{self, TestRequest},
    web::Data,
};
use reviewbot_config::Config;
use reviewbot_core::{CoreModule, SeededRandomService};
use reviewbot_database_memory::MemoryDb;
use serde_json::{json, Value};

use crate::server::AppContext;

pub(crate) fn test_context(core_module: CoreModule) -> Data<AppContext> {
    let mut config = Config::from_env_no_version();
    config.max_reviewers = 2;
    config.random_seed = 1;

    Data::new(AppContext::new_with_adapters(
        config,
        core_module,
        Box::new(MemoryDb::new()),
        Box::new(SeededRandomService::new(1)),
    ))
}

pub(crate) async fn call<S, B>(app: &S, req: TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;

    (status, body)
}

pub(crate) fn post(path: &str, body: Value) -> TestRequest {
    TestRequest::post().uri(path).set_json(body)
}

pub(crate) fn get(path: &str) -> TestRequest {
    TestRequest::get().uri(path)
}

/// Team `payments` with `(id, is_active)` members.
pub(crate) fn add_team_request(members: &[(&str, bool)]) -> TestRequest {
    post(
        "/team/add",
        json!({
            "team_name": "payments",
            "members": members
                .iter()
                .map(|(id, is_active)| json!({
                    "user_id": id,
                    "username": format!("user-{id}"),
                    "is_active": is_active,
                }))
                .collect::<Vec<_>>(),
        }),
    )
}

pub(crate) fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

#[actix_web::test]
async fn health() {
    let app = test::init_service(crate::server::build_actix_app(test_context(
        CoreModule::builder().build(),
    )))
    .await;

    let (status, body) = call(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "database": true }));
}

#[actix_web::test]
async fn invalid_json() {
    let app = test::init_service(crate::server::build_actix_app(test_context(
        CoreModule::builder().build(),
    )))
    .await;

    let req = TestRequest::post()
        .uri("/pullRequest/create")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json");
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");

    let (status, body) = call(&app, post("/pullRequest/merge", json!({ "id": "pr-1" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[actix_web::test]
async fn stats() {
    let app = test::init_service(crate::server::build_actix_app(test_context(
        CoreModule::builder().build(),
    )))
    .await;

    call(&app, add_team_request(&[("u1", true), ("u2", true)])).await;
    call(
        &app,
        post(
            "/pullRequest/create",
            json!({ "pull_request_id": "pr-1", "pull_request_name": "Fix checkout", "author_id": "u1" }),
        ),
    )
    .await;

    let (status, body) = call(&app, get("/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "assignments_by_user": [{ "user_id": "u2", "count": 1 }],
            "assignments_by_pr": [{ "pull_request_id": "pr-1", "count": 1 }],
            "open_prs_count": 1,
            "merged_prs_count": 0,
        })
    );
}
