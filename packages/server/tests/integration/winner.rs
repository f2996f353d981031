use std::collections::HashSet;

use raffle_server::config::CampaignConfig;

use crate::common::{Sent, TestApp, routes, token};
use raffle_server::extractors::auth::{CAMPAIGN_VIEW_ENTRIES, WINNER_SELECT};

/// Tenant with an ended raffle holding `entries` entries.
async fn ended_campaign(app: &TestApp, entries: usize) -> i32 {
    app.create_tenant("shop-a", None, "a@shop.example").await;
    let raffle_id = app.create_active_raffle().await;
    app.assign(raffle_id, "shop-a").await;
    for i in 0..entries {
        app.enter("shop-a", raffle_id, &format!("entrant{i}@example.com"))
            .await;
    }
    app.end_raffle(raffle_id).await;
    raffle_id
}

async fn entry_ids(app: &TestApp, raffle_id: i32) -> Vec<i64> {
    let res = app
        .get_with_token(&routes::campaign_entries("shop-a", raffle_id), &app.admin_token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    res.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn random_selection_shrinks_the_pool() {
    let app = TestApp::spawn().await;
    let raffle_id = ended_campaign(&app, 3).await;

    let res = app.select_random("shop-a", raffle_id).await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["selection_method"], "random");
    let winner_entry = res.body["entry_id"].as_i64().unwrap();
    assert!(entry_ids(&app, raffle_id).await.contains(&winner_entry));

    let pool = app
        .get_with_token(&routes::pool("shop-a", raffle_id), &app.admin_token)
        .await;
    assert_eq!(pool.body["phase"], "ended");
    assert_eq!(pool.body["eligible_entries"], 2);
    assert_eq!(pool.body["total_entries"], 3);
    assert_eq!(pool.body["winners"], 1);
}

#[tokio::test]
async fn winner_is_notified() {
    let app = TestApp::spawn().await;
    let raffle_id = ended_campaign(&app, 1).await;
    app.wait_for_notifications(1).await;

    let res = app.select_random("shop-a", raffle_id).await;
    assert_eq!(res.status, 201, "{}", res.text);
    let ticket = res.body["ticket_number"].as_str().unwrap().to_string();

    let sent = app.wait_for_notifications(2).await;
    assert!(sent.contains(&Sent::WinnerNotification {
        email: "entrant0@example.com".into(),
        ticket_number: ticket,
    }));
}

#[tokio::test]
async fn manual_selection_of_existing_winner_is_rejected() {
    let app = TestApp::spawn().await;
    let raffle_id = ended_campaign(&app, 2).await;
    let ids = entry_ids(&app, raffle_id).await;
    let url = routes::winners("shop-a", raffle_id);

    let body = serde_json::json!({
        "method": "manual",
        "entry_id": ids[0],
        "prize_description": "Grand prize",
        "notes": "Picked at the store event",
    });
    let res = app.post_with_token(&url, &body, &app.admin_token).await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["selection_method"], "manual");
    assert_eq!(res.body["prize_description"], "Grand prize");

    let res = app.post_with_token(&url, &body, &app.admin_token).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "ENTRY_NOT_ELIGIBLE");
}

#[tokio::test]
async fn manual_selection_requires_an_entry_of_this_campaign() {
    let app = TestApp::spawn().await;
    let raffle_id = ended_campaign(&app, 1).await;
    let url = routes::winners("shop-a", raffle_id);

    let res = app
        .post_with_token(&url, &serde_json::json!({ "method": "manual" }), &app.admin_token)
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "INVALID_FIELD");

    let res = app
        .post_with_token(
            &url,
            &serde_json::json!({ "method": "manual", "entry_id": 999999 }),
            &app.admin_token,
        )
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "ENTRY_NOT_ELIGIBLE");
}

#[tokio::test]
async fn random_selection_rejects_entry_id() {
    let app = TestApp::spawn().await;
    let raffle_id = ended_campaign(&app, 1).await;
    let ids = entry_ids(&app, raffle_id).await;

    let res = app
        .post_with_token(
            &routes::winners("shop-a", raffle_id),
            &serde_json::json!({ "method": "random", "entry_id": ids[0] }),
            &app.admin_token,
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "INVALID_FIELD");
}

#[tokio::test]
async fn selection_waits_for_raffle_to_end() {
    let app = TestApp::spawn().await;
    app.create_tenant("shop-a", None, "a@shop.example").await;
    let raffle_id = app.create_active_raffle().await;
    app.assign(raffle_id, "shop-a").await;
    app.enter("shop-a", raffle_id, "ada@example.com").await;

    let res = app.select_random("shop-a", raffle_id).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "RAFFLE_STILL_ACTIVE");
    assert!(res.body["boundary"].is_string());
}

#[tokio::test]
async fn empty_pool_has_no_winner() {
    let app = TestApp::spawn().await;
    let raffle_id = ended_campaign(&app, 0).await;

    let res = app.select_random("shop-a", raffle_id).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "NO_ELIGIBLE_ENTRIES");
}

#[tokio::test]
async fn pool_exhausts_after_every_entry_wins() {
    let app = TestApp::spawn().await;
    let raffle_id = ended_campaign(&app, 3).await;

    let mut winners = HashSet::new();
    for _ in 0..3 {
        let res = app.select_random("shop-a", raffle_id).await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert!(winners.insert(res.body["entry_id"].as_i64().unwrap()));
    }

    let res = app.select_random("shop-a", raffle_id).await;
    assert_eq!(res.code(), "NO_ELIGIBLE_ENTRIES");

    let res = app
        .get_with_token(&routes::winners("shop-a", raffle_id), &app.admin_token)
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn concurrent_random_selections_pick_distinct_entries() {
    const N: usize = 12;
    let app = TestApp::spawn_with(CampaignConfig::default(), false).await;
    let raffle_id = ended_campaign(&app, N).await;

    let results = futures::future::join_all((0..N).map(|_| app.select_random("shop-a", raffle_id))).await;

    let mut winners = HashSet::new();
    for res in &results {
        assert_eq!(res.status, 201, "{}", res.text);
        assert!(
            winners.insert(res.body["entry_id"].as_i64().unwrap()),
            "entry selected twice"
        );
    }
    assert_eq!(winners.len(), N);

    let res = app.select_random("shop-a", raffle_id).await;
    assert_eq!(res.code(), "NO_ELIGIBLE_ENTRIES");
}

#[tokio::test]
async fn selection_requires_permission() {
    let app = TestApp::spawn().await;
    let raffle_id = ended_campaign(&app, 1).await;
    let url = routes::winners("shop-a", raffle_id);
    let body = serde_json::json!({ "method": "random" });

    let res = app.post_without_token(&url, &body).await;
    assert_eq!(res.status, 401);
    assert_eq!(res.code(), "TOKEN_MISSING");

    let viewer = token(&[CAMPAIGN_VIEW_ENTRIES], None);
    let res = app.post_with_token(&url, &body, &viewer).await;
    assert_eq!(res.status, 403);
    assert_eq!(res.code(), "PERMISSION_DENIED");

    let res = app.post_with_token(&url, &body, "not-a-token").await;
    assert_eq!(res.status, 401);
    assert_eq!(res.code(), "TOKEN_INVALID");
}

#[tokio::test]
async fn tenant_scoped_operator_cannot_reach_other_tenants() {
    let app = TestApp::spawn().await;
    let raffle_id = ended_campaign(&app, 1).await;
    app.create_tenant("shop-b", None, "b@shop.example").await;

    let other = token(&[WINNER_SELECT], Some("shop-b"));
    let res = app
        .post_with_token(
            &routes::winners("shop-a", raffle_id),
            &serde_json::json!({ "method": "random" }),
            &other,
        )
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "TENANT_NOT_FOUND");

    let own = token(&[WINNER_SELECT], Some("shop-a"));
    let res = app
        .post_with_token(
            &routes::winners("shop-a", raffle_id),
            &serde_json::json!({ "method": "random" }),
            &own,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
}

#[tokio::test]
async fn preview_request_cannot_select_winners() {
    let app = TestApp::spawn().await;
    let raffle_id = ended_campaign(&app, 1).await;

    let res = app
        .post_as_preview(
            &routes::winners("shop-a", raffle_id),
            &serde_json::json!({ "method": "random" }),
            Some(&app.admin_token),
        )
        .await;
    assert_eq!(res.status, 403);
    assert_eq!(res.code(), "PREVIEW_READ_ONLY");
}
