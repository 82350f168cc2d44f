use std::net::SocketAddr;

use reqwest::Client;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tempfile::TempDir;

use server::cache::PropertyCache;
use server::config::{AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ServerConfig};
use server::state::AppState;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password-for-tests";

pub mod routes {
    pub const LOGIN: &str = "/api/v1/auth/login";
    pub const ME: &str = "/api/v1/auth/me";
    pub const PROJECTS: &str = "/api/v1/projects";

    pub fn project(id: &str) -> String {
        format!("/api/v1/projects/{id}")
    }

    pub fn property(id: &str) -> String {
        format!("/api/v1/projects/{id}/property")
    }

    pub fn property_settings(id: &str) -> String {
        format!("/api/v1/projects/{id}/property/settings")
    }

    pub fn property_style(id: &str) -> String {
        format!("/api/v1/projects/{id}/property/style")
    }

    pub fn property_preview(id: &str) -> String {
        format!("/api/v1/projects/{id}/property/preview")
    }

    pub fn property_embed(id: &str) -> String {
        format!("/api/v1/projects/{id}/property/embed")
    }

    pub fn property_deploy(id: &str) -> String {
        format!("/api/v1/projects/{id}/property/deploy")
    }

    pub fn blocks(id: &str) -> String {
        format!("/api/v1/projects/{id}/property/blocks")
    }

    pub fn blocks_reorder(id: &str) -> String {
        format!("/api/v1/projects/{id}/property/blocks/reorder")
    }

    pub fn block(id: &str, block_id: &str) -> String {
        format!("/api/v1/projects/{id}/property/blocks/{block_id}")
    }

    pub fn public_property(username: &str) -> String {
        format!("/{username}/property")
    }
}

/// A running test server backed by a throwaway SQLite database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    _data_dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let data_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = data_dir.path().join("test.sqlite");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let db = server::database::init_db(&db_url)
            .await
            .expect("Failed to initialize test database");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                public_url: "http://public.test".to_string(),
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: db_url.clone(),
            },
            auth: AuthConfig {
                jwt_secret: "test-secret-for-integration-tests".to_string(),
                admin_username: ADMIN_USERNAME.to_string(),
                admin_password: ADMIN_PASSWORD.to_string(),
            },
        };

        let state = AppState {
            db: db.clone(),
            config: app_config,
            cache: PropertyCache::new(),
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            _data_dir: data_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    /// POST a raw string body with a JSON content type, bypassing
    /// serialization so tests can send bodies that are not valid JSON.
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn patch_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request");

        TestResponse::from_response(res).await
    }

    pub async fn put_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Raw request against the public delivery endpoint, with optional
    /// bearer token and Origin header. Returns the unparsed response so
    /// tests can assert on headers.
    pub async fn get_public(
        &self,
        username: &str,
        query: Option<&str>,
        token: Option<&str>,
        origin: Option<&str>,
    ) -> reqwest::Response {
        let mut path = routes::public_property(username);
        if let Some(query) = query {
            path.push('?');
            path.push_str(query);
        }
        let mut req = self.client.get(self.url(&path));
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(origin) = origin {
            req = req.header("Origin", origin);
        }
        req.send().await.expect("Failed to send public GET request")
    }

    pub async fn options_public(&self, username: &str, origin: Option<&str>) -> reqwest::Response {
        let mut req = self
            .client
            .request(reqwest::Method::OPTIONS, self.url(&routes::public_property(username)));
        if let Some(origin) = origin {
            req = req.header("Origin", origin);
        }
        req.send()
            .await
            .expect("Failed to send public OPTIONS request")
    }

    /// Log in with the configured admin credentials and return the token.
    pub async fn admin_token(&self) -> String {
        let res = self
            .post_without_token(
                routes::LOGIN,
                &serde_json::json!({
                    "username": ADMIN_USERNAME,
                    "password": ADMIN_PASSWORD,
                }),
            )
            .await;
        assert_eq!(res.status, 200, "Admin login failed: {}", res.text);
        res.token()
    }

    /// Create a project as admin and return the owner's session token.
    pub async fn create_project_with_owner(&self, username: &str, password: &str) -> String {
        let admin = self.admin_token().await;
        let res = self
            .post_with_token(
                routes::PROJECTS,
                &serde_json::json!({
                    "username": username,
                    "name": "Oak Hills Residence",
                    "password": password,
                }),
                &admin,
            )
            .await;
        assert_eq!(res.status, 201, "create_project failed: {}", res.text);

        let res = self
            .post_without_token(
                routes::LOGIN,
                &serde_json::json!({"username": username, "password": password}),
            )
            .await;
        assert_eq!(res.status, 200, "Owner login failed: {}", res.text);
        res.token()
    }

    /// Create a block via the API and return its `id`.
    pub async fn create_block(&self, project_id: &str, token: &str, body: &Value) -> String {
        let res = self.post_with_token(&routes::blocks(project_id), body, token).await;
        assert_eq!(res.status, 201, "create_block failed: {}", res.text);
        res.body["id"]
            .as_str()
            .expect("block response should contain 'id'")
            .to_string()
    }

    /// Read the tenant's access token through the admin property endpoint.
    pub async fn access_token(&self, project_id: &str, token: &str) -> String {
        let res = self.get_with_token(&routes::property(project_id), token).await;
        assert_eq!(res.status, 200, "get_property failed: {}", res.text);
        res.body["accessToken"]
            .as_str()
            .expect("property response should contain 'accessToken'")
            .to_string()
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn token(&self) -> String {
        self.body["token"]
            .as_str()
            .expect("response body should contain 'token'")
            .to_string()
    }
}
