mod common;

use axum::{Router, middleware, routing::delete, routing::get};
use axum_test::TestServer;
use fractal_link::api::handlers::{current_user_handler, delete_link_handler, user_links_handler};
use fractal_link::api::middleware::auth;
use fractal_link::domain::entities::SafetyVerdict;
use fractal_link::state::AppState;

fn app(state: AppState) -> TestServer {
    let protected = Router::new()
        .route("/user", get(current_user_handler))
        .route("/user/links", get(user_links_handler))
        .route("/user/links/{id}", delete(delete_link_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let app = Router::new().nest("/api", protected).with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn first_sign_in_creates_the_account() {
    let (state, _ctx) = common::create_test_state();
    let server = app(state);

    let response = server
        .get("/api/user")
        .authorization_bearer(common::VALID_TOKEN)
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["id"], common::TEST_USER_ID);
    assert_eq!(body["email"], "user@example.com");
}

#[tokio::test]
async fn links_list_reports_verification_state_and_clicks() {
    let (state, ctx) = common::create_test_state();
    let server = app(state);

    let id = ctx
        .store
        .seed("f00dcafe", "https://example.com/a", Some(common::TEST_USER_ID), false);
    ctx.store.set_safety("f00dcafe", SafetyVerdict::safe());
    ctx.store.set_qr("f00dcafe", "<svg></svg>");
    ctx.store.add_click(id);
    ctx.store.add_click(id);

    ctx.store
        .seed("my-brand", "https://example.com/b", Some(common::TEST_USER_ID), true);

    // Someone else's link must not show up.
    ctx.store.seed("other123", "https://example.com/c", Some("someone-else"), false);

    let response = server
        .get("/api/user/links")
        .authorization_bearer(common::VALID_TOKEN)
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    let links = body["links"].as_array().unwrap();
    assert_eq!(links.len(), 2);

    let hashed = links.iter().find(|l| l["key"] == "f00dcafe").unwrap();
    assert_eq!(hashed["safe"], true);
    assert_eq!(hashed["total_clicks"], 2);
    assert_eq!(hashed["has_qr"], true);
    assert_eq!(
        hashed["short_url"],
        format!("{}/f00dcafe", common::BASE_URL)
    );

    let branded = links.iter().find(|l| l["key"] == "my-brand").unwrap();
    assert_eq!(branded["branded"], true);
    assert!(branded["branded_valid"].is_null());
    assert!(branded["safe"].is_null());
}

#[tokio::test]
async fn user_deletes_own_link() {
    let (state, ctx) = common::create_test_state();
    let server = app(state);

    let id = ctx
        .store
        .seed("f00dcafe", "https://example.com/", Some(common::TEST_USER_ID), false);

    let response = server
        .delete(&format!("/api/user/links/{id}"))
        .authorization_bearer(common::VALID_TOKEN)
        .await;

    response.assert_status(axum::http::StatusCode::NO_CONTENT);
    assert!(ctx.store.get("f00dcafe").is_none());
}

#[tokio::test]
async fn deleting_someone_elses_link_is_not_found() {
    let (state, ctx) = common::create_test_state();
    let server = app(state);

    let id = ctx
        .store
        .seed("other123", "https://example.com/", Some("someone-else"), false);

    let response = server
        .delete(&format!("/api/user/links/{id}"))
        .authorization_bearer(common::VALID_TOKEN)
        .await;

    response.assert_status_not_found();
    assert!(ctx.store.get("other123").is_some());
}

#[tokio::test]
async fn profile_requires_a_valid_token() {
    let (state, _ctx) = common::create_test_state();
    let server = app(state);

    server.get("/api/user").await.assert_status_unauthorized();

    server
        .get("/api/user")
        .authorization_bearer("forged-token")
        .await
        .assert_status_unauthorized();
}
