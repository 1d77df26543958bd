//! Common test utilities for service integration tests

use std::sync::{Arc, RwLock};

use axum_test::TestServer;
use idcard_server::{
    routes, AppState, ContactMessage, EmailSender, InMemoryRequestStore, StaticSigner,
};
use serde_json::{json, Value};

/// Bearer credential the test servers are configured with
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Mock mailer that captures contact messages
#[derive(Default, Clone)]
pub struct MockMailer {
    /// Captured messages
    pub sent: Arc<RwLock<Vec<ContactMessage>>>,
    /// When set, every send fails
    pub failing: Arc<RwLock<bool>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.write().unwrap() = failing;
    }
}

impl EmailSender for MockMailer {
    fn send_contact(&self, message: &ContactMessage) -> Result<(), String> {
        if *self.failing.read().unwrap() {
            return Err("mock mailer down".to_string());
        }
        self.sent.write().unwrap().push(message.clone());
        Ok(())
    }
}

fn test_signer() -> StaticSigner {
    StaticSigner::new("https://storage.test", "https://public.test", "photos")
}

/// Create a test server with mock mailer, memory store and static signer
pub fn create_test_server() -> (TestServer, MockMailer) {
    create_test_server_with(Some(ADMIN_TOKEN.to_string()), false)
}

/// Create a test server that refuses duplicate identifiers
pub fn create_test_server_rejecting_duplicates() -> (TestServer, MockMailer) {
    create_test_server_with(Some(ADMIN_TOKEN.to_string()), true)
}

/// Create a test server with no admin credential configured
pub fn create_test_server_without_admin_token() -> (TestServer, MockMailer) {
    create_test_server_with(None, false)
}

fn create_test_server_with(
    admin_token: Option<String>,
    reject_duplicate_identifiers: bool,
) -> (TestServer, MockMailer) {
    let mailer = MockMailer::new();

    let state = Arc::new(AppState::new(
        InMemoryRequestStore::new(),
        test_signer(),
        mailer.clone(),
        admin_token,
        reject_duplicate_identifiers,
    ));

    let app = routes::create_router(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, mailer)
}

/// A complete, valid ID-card request body
pub fn valid_request_body(identifier: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "department": "CS",
        "identifier": identifier,
        "role": "staff",
        "passportPhotoLink": "https://storage.example/uploads/Ada_Lovelace_20250101000000.jpg",
    })
}

/// Number of rows visible through the admin read path
pub async fn stored_row_count(server: &TestServer) -> usize {
    let response = server
        .get("/admin/data")
        .authorization_bearer(ADMIN_TOKEN)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    body["data"].as_array().expect("data array").len()
}
