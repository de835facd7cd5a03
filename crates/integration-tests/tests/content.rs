//! Contacts, pricing plans, and social links over HTTP.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};
use site_integration_tests::TestContext;

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_contact_lifecycle() {
    let ctx = TestContext::new().await;
    let token = ctx.login().await;

    let (status, body) = ctx
        .post(
            "/api/contacts",
            None,
            json!({ "name": "Grace", "email": "grace@example.com", "message": "Hello there" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["contact"]["id"].as_i64().unwrap();
    assert!(body["contact"]["createdAt"].is_string());

    let (status, list) = ctx.get("/api/contacts", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&list), [id]);
    assert_eq!(list[0]["message"], "Hello there");

    let (status, body) = ctx.delete(&format!("/api/contacts/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "deleted": true }));

    let (_, list) = ctx.get("/api/contacts", Some(&token)).await;
    assert_eq!(list, json!([]));

    let (status, body) = ctx.delete(&format!("/api/contacts/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "deleted": false }));
}

#[tokio::test]
async fn test_contact_list_is_admin_only() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/api/contacts", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "No token provided" }));

    let (status, _) = ctx.delete("/api/contacts/1", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_contact_blank_or_missing_field_writes_nothing() {
    let ctx = TestContext::new().await;
    let token = ctx.login().await;

    let (status, body) = ctx
        .post(
            "/api/contacts",
            None,
            json!({ "name": "Grace", "email": "  ", "message": "Hi" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "All fields are required" }));

    let (status, _) = ctx
        .post(
            "/api/contacts",
            None,
            json!({ "name": "Grace", "email": "grace@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, list) = ctx.get("/api/contacts", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_pricing_ordering_and_partial_update() {
    let ctx = TestContext::new().await;
    let token = ctx.login().await;

    let plan = |name: &str, order: i32| {
        json!({
            "name": name,
            "price": "$10",
            "description": format!("{name} plan"),
            "features": ["One", "Two"],
            "displayOrder": order,
        })
    };

    let (status, second) = ctx.post("/api/pricing", Some(&token), plan("Second", 2)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["success"], true);
    let second_id = second["pricing"]["id"].as_i64().unwrap();
    assert_eq!(second["pricing"]["popular"], false);

    let (_, first) = ctx.post("/api/pricing", Some(&token), plan("First", 1)).await;
    let first_id = first["pricing"]["id"].as_i64().unwrap();

    let (status, list) = ctx.get("/api/pricing", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&list), [first_id, second_id]);
    assert_eq!(list[0]["features"], json!(["One", "Two"]));

    let (status, body) = ctx
        .put(
            &format!("/api/pricing/{second_id}"),
            Some(&token),
            json!({ "popular": true, "displayOrder": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pricing"]["popular"], true);
    assert_eq!(body["pricing"]["name"], "Second");
    assert_eq!(body["pricing"]["price"], "$10");

    let (_, list) = ctx.get("/api/pricing", None).await;
    assert_eq!(ids(&list), [second_id, first_id]);
}

#[tokio::test]
async fn test_pricing_validation_and_missing_plan() {
    let ctx = TestContext::new().await;
    let token = ctx.login().await;

    let (status, body) = ctx
        .post(
            "/api/pricing",
            Some(&token),
            json!({ "name": "No features", "price": "$1", "description": "x" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "All fields are required" }));

    let (status, body) = ctx
        .put("/api/pricing/999", Some(&token), json!({ "name": "Ghost" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Pricing plan not found" }));

    let (status, _) = ctx.post("/api/pricing", None, json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_social_link_lifecycle() {
    let ctx = TestContext::new().await;
    let token = ctx.login().await;

    let (status, link) = ctx
        .post(
            "/api/social-links",
            Some(&token),
            json!({ "name": "GitHub", "icon": "github", "url": "https://github.com/example" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(link["icon"], "github");
    assert_eq!(link["resolvedIcon"], "Github");
    let id = link["id"].as_i64().unwrap();

    let (status, link) = ctx
        .put(
            &format!("/api/social-links/{id}"),
            Some(&token),
            json!({ "icon": "mastodon" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(link["icon"], "mastodon");
    assert_eq!(link["resolvedIcon"], "Link");
    assert_eq!(link["url"], "https://github.com/example");

    let (status, list) = ctx.get("/api/social-links", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&list), [id]);

    let (status, body) = ctx
        .delete(&format!("/api/social-links/{id}"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "deleted": true }));
}

#[tokio::test]
async fn test_social_link_errors() {
    let ctx = TestContext::new().await;
    let token = ctx.login().await;

    let (status, body) = ctx
        .post("/api/social-links", Some(&token), json!({ "name": "X", "icon": "twitter" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Name, icon, and url are required" }));

    let (status, body) = ctx
        .put("/api/social-links/77", Some(&token), json!({ "name": "Nope" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Link not found" }));

    let (status, body) = ctx.delete("/api/social-links/77", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], false);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let ctx = TestContext::new().await;
    let token = ctx.login().await;

    let (status, body) = ctx.delete("/api/pricing/abc", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_stats_count_every_table() {
    let ctx = TestContext::new().await;
    let token = ctx.login().await;

    ctx.post(
        "/api/contacts",
        None,
        json!({ "name": "A", "email": "a@example.com", "message": "m" }),
    )
    .await;
    ctx.post(
        "/api/social-links",
        Some(&token),
        json!({ "name": "Mail", "icon": "mail", "url": "mailto:a@example.com" }),
    )
    .await;

    let (status, body) = ctx.get("/api/admin/stats", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "contacts": 1, "pricing": 0, "projects": 0, "socialLinks": 1 })
    );

    let (status, _) = ctx.get("/api/admin/stats", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_and_request_id_echo() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let response = ctx
        .client
        .get(ctx.url("/health/ready"))
        .header("x-request-id", "trace-me-123")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["x-request-id"].to_str().unwrap(),
        "trace-me-123"
    );
}
