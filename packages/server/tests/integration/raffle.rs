use chrono::{Duration, Utc};
use serde_json::json;

use crate::common::{TestApp, routes, token};
use raffle_server::extractors::auth::CAMPAIGN_PREVIEW;

#[tokio::test]
async fn create_and_fetch_raffle() {
    let app = TestApp::spawn().await;
    let id = app.create_active_raffle().await;

    let res = app
        .get_with_token(&routes::raffle(id), &app.admin_token)
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["title"], "A Year of Coffee");
    assert_eq!(
        res.body["prize_images"],
        json!(["/media/prize-1.png", "/media/prize-2.png"])
    );
    assert_eq!(res.body["main_image_index"], 0);
}

#[tokio::test]
async fn create_rejects_inverted_window() {
    let app = TestApp::spawn().await;
    let now = Utc::now();

    let res = app
        .post_with_token(
            routes::RAFFLES,
            &json!({
                "title": "Backwards",
                "description": "",
                "start_date": now + Duration::days(2),
                "end_date": now + Duration::days(1),
            }),
            &app.admin_token,
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_rejects_blank_title_and_negative_main_image() {
    let app = TestApp::spawn().await;
    let now = Utc::now();
    let window = |body: serde_json::Value| {
        let mut body = body;
        body["start_date"] = json!(now);
        body["end_date"] = json!(now + Duration::days(1));
        body["description"] = json!("");
        body
    };

    let res = app
        .post_with_token(routes::RAFFLES, &window(json!({ "title": "  " })), &app.admin_token)
        .await;
    assert_eq!(res.status, 400);

    let res = app
        .post_with_token(
            routes::RAFFLES,
            &window(json!({
                "title": "Prizes",
                "prize_images": ["/media/a.png"],
                "main_image_index": -1,
            })),
            &app.admin_token,
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_validates_against_current_window() {
    let app = TestApp::spawn().await;
    let id = app.create_active_raffle().await;

    let res = app
        .patch_with_token(
            &routes::raffle(id),
            &json!({ "end_date": Utc::now() - Duration::days(5) }),
            &app.admin_token,
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);

    let res = app
        .patch_with_token(
            &routes::raffle(id),
            &json!({ "title": "Renamed", "cover_image": null }),
            &app.admin_token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["title"], "Renamed");
    assert!(res.body["cover_image"].is_null());
}

#[tokio::test]
async fn missing_raffle_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .get_with_token(&routes::raffle(424242), &app.admin_token)
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "RAFFLE_NOT_FOUND");
}

#[tokio::test]
async fn list_raffles_paginates() {
    let app = TestApp::spawn().await;
    for _ in 0..3 {
        app.create_active_raffle().await;
    }

    let res = app
        .get_with_token(&format!("{}?page=1&per_page=2", routes::RAFFLES), &app.admin_token)
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["data"].as_array().unwrap().len(), 2);
    assert_eq!(res.body["pagination"]["total"], 3);
    assert_eq!(res.body["pagination"]["total_pages"], 2);
}

#[tokio::test]
async fn raffle_management_requires_permission() {
    let app = TestApp::spawn().await;
    let viewer = token(&[CAMPAIGN_PREVIEW], None);

    let res = app.get_with_token(routes::RAFFLES, &viewer).await;
    assert_eq!(res.status, 403);
    assert_eq!(res.code(), "PERMISSION_DENIED");

    let res = app.get_without_token(routes::RAFFLES).await;
    assert_eq!(res.status, 401);
}

#[tokio::test]
async fn assignment_is_idempotent_and_reactivates() {
    let app = TestApp::spawn().await;
    app.create_tenant("shop-a", None, "a@shop.example").await;
    let id = app.create_active_raffle().await;
    let body = json!({ "tenant": "a@shop.example" });

    let res = app
        .post_with_token(&routes::assignments(id), &body, &app.admin_token)
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["tenant_id"], "shop-a");
    assert_eq!(res.body["is_active"], true);
    let assignment_id = res.id();

    let res = app
        .post_with_token(&routes::assignments(id), &body, &app.admin_token)
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.id(), assignment_id);

    app.put_customizations("shop-a", id, &json!({ "primary_color": "#123456" }))
        .await;

    let res = app
        .delete_with_token(&routes::assignment(id, "shop-a"), &app.admin_token)
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["is_active"], false);

    let res = app
        .post_with_token(&routes::assignments(id), &body, &app.admin_token)
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.id(), assignment_id);
    assert_eq!(res.body["is_active"], true);
    assert_eq!(res.body["customizations"]["primary_color"], "#123456");
}

#[tokio::test]
async fn assignment_requires_known_tenant() {
    let app = TestApp::spawn().await;
    let id = app.create_active_raffle().await;

    let res = app
        .post_with_token(
            &routes::assignments(id),
            &json!({ "tenant": "ghost" }),
            &app.admin_token,
        )
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "TENANT_NOT_FOUND");
}
