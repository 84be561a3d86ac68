//! Shared helpers for client integration tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use shared::{MemorySessionStore, SessionKey, SessionStore};
use wiremock::MockServer;
use workshop_admin_client::{config::ApiConfig, ApiClient};

pub const API: &str = "/api/v1";

pub struct TestContext {
    pub server: MockServer,
    pub client: ApiClient,
    pub session: Arc<MemorySessionStore>,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let session = Arc::new(MemorySessionStore::new());
        let config = ApiConfig {
            base_url: format!("{}{}/", server.uri(), API),
            timeout_secs: 5,
        };
        let client = ApiClient::new(&config, session.clone()).expect("client");
        Self {
            server,
            client,
            session,
        }
    }

    /// Context with both tokens already stored
    pub async fn signed_in(access: &str) -> Self {
        let ctx = Self::new().await;
        ctx.session.set(SessionKey::Access, access).unwrap();
        ctx.session.set(SessionKey::Refresh, "refresh-token").unwrap();
        ctx
    }
}

pub fn path(suffix: &str) -> String {
    format!("{}/{}", API, suffix)
}

/// JWT expiring `minutes` from now, signed with a key the client never sees
pub fn jwt(minutes: i64) -> String {
    let exp = (Utc::now() + Duration::minutes(minutes)).timestamp();
    encode(
        &Header::default(),
        &json!({"exp": exp, "user_id": 1, "token_type": "access"}),
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .unwrap()
}

/// JWT like [`jwt`] but without a `user_id` claim
pub fn jwt_without_user(minutes: i64) -> String {
    let exp = (Utc::now() + Duration::minutes(minutes)).timestamp();
    encode(
        &Header::default(),
        &json!({"exp": exp, "token_type": "access"}),
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .unwrap()
}

pub const STAMP: &str = "2024-03-01T10:00:00Z";

pub fn organization_json(id: i64, name: &str, kind: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": kind,
        "created_at": STAMP,
        "updated_at": STAMP
    })
}

pub fn material_json(id: i64, name: &str, unit: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "unit": unit,
        "created_at": STAMP,
        "updated_at": STAMP
    })
}

pub fn inventory_json(id: i64, owner: Value, material: Value, quantity: &str) -> Value {
    json!({
        "id": id,
        "quantity": quantity,
        "organization": owner,
        "material": material,
        "created_at": STAMP,
        "updated_at": STAMP
    })
}

pub fn user_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "first_name": "",
        "last_name": "",
        "organization": organization_json(1, "Central Bank", "bank"),
        "is_active": true,
        "is_staff": true
    })
}

pub fn transaction_json(id: i64, status: &str) -> Value {
    let gold = material_json(100, "Gold", "g");
    json!({
        "id": id,
        "items": [{
            "id": 1,
            "quantity": "3",
            "inventory": inventory_json(5, organization_json(1, "Central Bank", "bank"), gold, "100.5"),
            "transaction": id
        }],
        "sender": organization_json(1, "Central Bank", "bank"),
        "receiver": organization_json(2, "North Workshop", "gold_processing"),
        "status": status,
        "created_at": STAMP,
        "updated_at": STAMP
    })
}

pub fn paginated(results: Vec<Value>) -> Value {
    json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results
    })
}
