use serde_json::json;

use crate::common::{TestApp, routes};

async fn enable_draft(app: &TestApp, project_id: &str, token: &str) {
    let res = app
        .patch_with_token(
            &routes::property_settings(project_id),
            &json!({"domains": [], "isDraft": true, "isPublic": true}),
            token,
        )
        .await;
    assert_eq!(res.status, 200, "enable_draft failed: {}", res.text);
}

fn snapshot_of(blocks: &serde_json::Value) -> String {
    serde_json::to_string(blocks).unwrap()
}

#[tokio::test]
async fn deploy_freezes_the_submitted_snapshot() {
    let app = TestApp::spawn().await;
    let owner = app.create_project_with_owner("oak-hills", "owner-password").await;
    enable_draft(&app, "oak-hills", &owner).await;
    app.create_block(
        "oak-hills",
        &owner,
        &json!({"type": "caption", "isPublic": true, "contents": "居住用"}),
    )
    .await;

    let property = app.get_with_token(&routes::property("oak-hills"), &owner).await;
    let data = snapshot_of(&property.body["blocks"]);

    let res = app
        .post_with_token(&routes::property_deploy("oak-hills"), &json!({"data": data}), &owner)
        .await;

    assert_eq!(res.status, 200);
    assert!(res.body["fixedAt"].is_string());

    let after = app.get_with_token(&routes::property("oak-hills"), &owner).await;
    assert!(after.body["fixedData"].as_str().unwrap().contains("居住用"));
    assert!(after.body["fixedAt"].is_string());
}

#[tokio::test]
async fn deploy_outside_draft_mode_conflicts() {
    let app = TestApp::spawn().await;
    let owner = app.create_project_with_owner("oak-hills", "owner-password").await;

    let res = app
        .post_with_token(
            &routes::property_deploy("oak-hills"),
            &json!({"data": "[]"}),
            &owner,
        )
        .await;

    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "CONFLICT");
}

#[tokio::test]
async fn malformed_snapshots_are_rejected_before_freezing() {
    let app = TestApp::spawn().await;
    let owner = app.create_project_with_owner("oak-hills", "owner-password").await;
    enable_draft(&app, "oak-hills", &owner).await;

    for data in ["not json", "{\"id\": 1}", "[{\"type\": \"banner\"}]"] {
        let res = app
            .post_with_token(
                &routes::property_deploy("oak-hills"),
                &json!({"data": data}),
                &owner,
            )
            .await;
        assert_eq!(res.status, 400, "'{data}' should be rejected");
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    let property = app.get_with_token(&routes::property("oak-hills"), &owner).await;
    assert!(property.body.get("fixedData").is_none());
}

#[tokio::test]
async fn the_public_endpoint_serves_the_frozen_snapshot_until_the_next_deploy() {
    let app = TestApp::spawn().await;
    let owner = app.create_project_with_owner("oak-hills", "owner-password").await;
    enable_draft(&app, "oak-hills", &owner).await;
    app.create_block(
        "oak-hills",
        &owner,
        &json!({"type": "caption", "isPublic": true, "contents": "first floor"}),
    )
    .await;
    let second = app
        .create_block(
            "oak-hills",
            &owner,
            &json!({"type": "caption", "isPublic": true, "contents": "second floor"}),
        )
        .await;

    let property = app.get_with_token(&routes::property("oak-hills"), &owner).await;
    let data = snapshot_of(&property.body["blocks"]);
    let res = app
        .post_with_token(&routes::property_deploy("oak-hills"), &json!({"data": data}), &owner)
        .await;
    assert_eq!(res.status, 200);

    // Delete a block after the deploy; embedders keep seeing the frozen copy.
    let deleted = app.delete_with_token(&routes::block("oak-hills", &second), &owner).await;
    assert_eq!(deleted.status, 204);

    let access_token = app.access_token("oak-hills", &owner).await;
    let public = app.get_public("oak-hills", None, Some(&access_token), None).await;
    assert_eq!(public.status(), 200);
    let body = public.text().await.unwrap();
    assert!(body.contains("first floor"));
    assert!(body.contains("second floor"));

    // The next deploy publishes the live list, without the deleted block.
    let property = app.get_with_token(&routes::property("oak-hills"), &owner).await;
    let data = snapshot_of(&property.body["blocks"]);
    let res = app
        .post_with_token(&routes::property_deploy("oak-hills"), &json!({"data": data}), &owner)
        .await;
    assert_eq!(res.status, 200);

    let public = app.get_public("oak-hills", None, Some(&access_token), None).await;
    let body = public.text().await.unwrap();
    assert!(body.contains("first floor"));
    assert!(!body.contains("second floor"));
}

#[tokio::test]
async fn production_keeps_serving_the_old_snapshot_while_drafting() {
    let app = TestApp::spawn().await;
    let owner = app.create_project_with_owner("oak-hills", "owner-password").await;
    enable_draft(&app, "oak-hills", &owner).await;
    app.create_block(
        "oak-hills",
        &owner,
        &json!({"type": "caption", "isPublic": true, "contents": "version one"}),
    )
    .await;

    let property = app.get_with_token(&routes::property("oak-hills"), &owner).await;
    let data = snapshot_of(&property.body["blocks"]);
    let res = app
        .post_with_token(&routes::property_deploy("oak-hills"), &json!({"data": data}), &owner)
        .await;
    assert_eq!(res.status, 200);

    // Keep editing after the deploy.
    app.create_block(
        "oak-hills",
        &owner,
        &json!({"type": "caption", "isPublic": true, "contents": "version two"}),
    )
    .await;

    let production = app.get_with_token(&routes::property_preview("oak-hills"), &owner).await;
    assert!(production.text.contains("version one"));
    assert!(!production.text.contains("version two"));

    let draft_path = format!("{}?draft=true", routes::property_preview("oak-hills"));
    let draft = app.get_with_token(&draft_path, &owner).await;
    assert!(draft.text.contains("version two"));
}
