use crate::common::{TestApp, routes, token};
use raffle_server::extractors::auth::CAMPAIGN_VIEW_ENTRIES;

const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52,
];

#[tokio::test]
async fn upload_stores_and_serves_media() {
    let app = TestApp::spawn().await;

    let res = app
        .upload_with_token(routes::MEDIA, "logo.png", "image/png", PNG.to_vec(), &app.admin_token)
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["kind"], "image");
    assert_eq!(res.body["size"], PNG.len());
    let url = res.body["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/media/"), "{url}");

    let served = app
        .client
        .get(app.url(&url))
        .send()
        .await
        .expect("Failed to fetch media");
    assert_eq!(served.status(), 200);
    assert_eq!(served.bytes().await.unwrap().as_ref(), PNG);
}

#[tokio::test]
async fn identical_uploads_share_a_url() {
    let app = TestApp::spawn().await;

    let first = app
        .upload_with_token(routes::MEDIA, "a.png", "image/png", PNG.to_vec(), &app.admin_token)
        .await;
    let second = app
        .upload_with_token(routes::MEDIA, "b.png", "image/png", PNG.to_vec(), &app.admin_token)
        .await;
    assert_eq!(first.status, 201);
    assert_eq!(second.status, 201);
    assert_eq!(first.body["hash"], second.body["hash"]);
    assert_eq!(first.body["url"], second.body["url"]);
}

#[tokio::test]
async fn upload_rejects_unsupported_types() {
    let app = TestApp::spawn().await;

    let res = app
        .upload_with_token(
            routes::MEDIA,
            "notes.txt",
            "text/plain",
            b"hello".to_vec(),
            &app.admin_token,
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn upload_rejects_oversized_files() {
    let app = TestApp::spawn().await;

    let res = app
        .upload_with_token(
            routes::MEDIA,
            "huge.png",
            "image/png",
            vec![0u8; 1024 * 1024 + 1024],
            &app.admin_token,
        )
        .await;
    assert_eq!(res.status, 413, "{}", res.text);
}

#[tokio::test]
async fn upload_requires_permission() {
    let app = TestApp::spawn().await;

    let res = app
        .upload_with_token(
            routes::MEDIA,
            "logo.png",
            "image/png",
            PNG.to_vec(),
            &token(&[CAMPAIGN_VIEW_ENTRIES], None),
        )
        .await;
    assert_eq!(res.status, 403);
}
