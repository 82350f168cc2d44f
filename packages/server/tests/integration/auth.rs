use serde_json::json;

use crate::common::{ADMIN_PASSWORD, ADMIN_USERNAME, TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn admin_can_log_in_with_configured_credentials() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["role"], "admin");
        assert_eq!(res.body["username"], ADMIN_USERNAME);
        assert!(res.body["token"].is_string());
    }

    #[tokio::test]
    async fn admin_login_with_wrong_password_fails() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": ADMIN_USERNAME, "password": "wrong"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn project_owner_can_log_in_with_its_password() {
        let app = TestApp::spawn().await;
        app.create_project_with_owner("oak-hills", "owner-password").await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "oak-hills", "password": "owner-password"}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["role"], "owner");
        assert_eq!(res.body["username"], "oak-hills");
    }

    #[tokio::test]
    async fn owner_login_with_wrong_password_fails() {
        let app = TestApp::spawn().await;
        app.create_project_with_owner("oak-hills", "owner-password").await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "oak-hills", "password": "not-it"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn unknown_usernames_get_the_same_error_as_bad_passwords() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "no-such-project", "password": "whatever"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn empty_credentials_are_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"username": "", "password": ""}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unparseable_bodies_get_the_json_error_envelope() {
        let app = TestApp::spawn().await;

        for body in ["{\"username\": \"admin\"", "{\"username\": 1, \"password\": \"x\"}"] {
            let res = app.post_raw(routes::LOGIN, body).await;

            assert_eq!(res.status, 400, "body {body:?}: {}", res.text);
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }
    }
}

mod me {
    use super::*;

    #[tokio::test]
    async fn me_reflects_the_session_identity() {
        let app = TestApp::spawn().await;
        let token = app.create_project_with_owner("oak-hills", "owner-password").await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["username"], "oak-hills");
        assert_eq!(res.body["role"], "owner");
    }

    #[tokio::test]
    async fn me_without_a_token_is_unauthorized() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn me_with_a_garbage_token_is_unauthorized() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not-a-jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}
