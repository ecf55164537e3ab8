use actix_http::StatusCode;
use actix_web::test;
use pretty_assertions::assert_eq;
use reviewbot_core::CoreModule;
use serde_json::json;

use super::{add_team_request, call, error_code, get, post, test_context};
use crate::server::build_actix_app;

#[actix_web::test]
async fn set_is_active() {
    let app = test::init_service(build_actix_app(test_context(CoreModule::builder().build()))).await;
    call(&app, add_team_request(&[("u1", true)])).await;

    let (status, body) = call(
        &app,
        post("/users/setIsActive", json!({ "user_id": "u1", "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "user": {
                "user_id": "u1",
                "username": "user-u1",
                "team_name": "payments",
                "is_active": false,
            }
        })
    );
}

#[actix_web::test]
async fn set_is_active_unknown_user() {
    let app = test::init_service(build_actix_app(test_context(CoreModule::builder().build()))).await;

    let (status, body) = call(
        &app,
        post("/users/setIsActive", json!({ "user_id": "ghost", "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[actix_web::test]
async fn get_review() {
    let app = test::init_service(build_actix_app(test_context(CoreModule::builder().build()))).await;
    call(&app, add_team_request(&[("u1", true), ("u2", true)])).await;
    call(
        &app,
        post(
            "/pullRequest/create",
            json!({ "pull_request_id": "pr-1", "pull_request_name": "Fix checkout", "author_id": "u1" }),
        ),
    )
    .await;

    let (status, body) = call(&app, get("/users/getReview?user_id=u2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "user_id": "u2",
            "pull_requests": [{
                "pull_request_id": "pr-1",
                "pull_request_name": "Fix checkout",
                "author_id": "u1",
                "status": "OPEN",
            }]
        })
    );
}

#[actix_web::test]
async fn get_review_unknown_user() {
    let app = test::init_service(build_actix_app(test_context(CoreModule::builder().build()))).await;

    let (status, body) = call(&app, get("/users/getReview?user_id=ghost")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "user_id": "ghost", "pull_requests": [] }));
}
