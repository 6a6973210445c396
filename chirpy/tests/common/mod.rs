use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use chirpy::chirp::errors::ChirpError;
use chirpy::chirp::models::Chirp;
use chirpy::chirp::models::ChirpId;
use chirpy::chirp::ports::ChirpRepository;
use chirpy::config::Platform;
use chirpy::domain::chirp::service::ChirpService;
use chirpy::domain::user::service::UserService;
use chirpy::inbound::http::metrics::ApiMetrics;
use chirpy::inbound::http::router::create_router;
use chirpy::inbound::http::router::AppState;
use chirpy::user::errors::UserError;
use chirpy::user::models::EmailAddress;
use chirpy::user::models::User;
use chirpy::user::ports::UserRepository;
use chrono::Duration;

pub const TOKEN_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory stand-in for Postgres, mirroring its constraints
/// (unique email, chirp author must exist, cascading user delete).
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    chirps: Mutex<Vec<Chirp>>,
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn delete_all(&self) -> Result<(), UserError> {
        self.users.lock().unwrap().clear();
        self.chirps.lock().unwrap().clear();
        Ok(())
    }
}

#[async_trait]
impl ChirpRepository for InMemoryStore {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        if !self.users.lock().unwrap().iter().any(|u| u.id == chirp.user_id) {
            return Err(ChirpError::AuthorNotFound(chirp.user_id));
        }
        self.chirps.lock().unwrap().push(chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        Ok(self.chirps.lock().unwrap().iter().find(|c| c.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps = self.chirps.lock().unwrap().clone();
        chirps.sort_by_key(|c| c.created_at);
        Ok(chirps)
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub metrics: Arc<ApiMetrics>,
}

impl TestApp {
    /// Spawn the application on the dev platform
    pub async fn spawn() -> Self {
        Self::spawn_on(Platform::Dev).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_on(platform: Platform) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::default());

        // Cheap Argon2 parameters keep the suite fast
        let hasher = PasswordHasher::with_params(8 * 1024, 1, 1).expect("Invalid Argon2 params");
        let authenticator = Arc::new(Authenticator::with_hasher(
            hasher,
            TOKEN_SECRET,
            Duration::hours(1),
        ));
        let metrics = Arc::new(ApiMetrics::new());

        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::clone(&store),
                Arc::clone(&authenticator),
            )),
            chirp_service: Arc::new(ChirpService::new(store)),
            authenticator: Arc::clone(&authenticator),
            metrics: Arc::clone(&metrics),
            platform,
        };

        let file_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/static");
        let router = create_router(state, file_root);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            metrics,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user and return the response body's `data` object
    pub async fn register(&self, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/users")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return the issued token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("token missing")
            .to_string()
    }
}
