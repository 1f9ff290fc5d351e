//! Cloud function behaviour against the in-memory stores.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use gv_platform::cloud::functions::CheckUserCredentials;
use gv_platform::store::{MemoryIdentityStore, MemorySessionStore};
use gv_platform::{
    Argon2Config, FunctionRegistry, GameSession, IdentityStore, PasswordService, PlatformError,
    Principal, SessionStore, Stores, TriggerRegistry,
};

const PASSWORD: &str = "correct horse";

fn passwords() -> Arc<PasswordService> {
    Arc::new(PasswordService::new(Argon2Config::testing()).unwrap())
}

async fn identity_with_alice(passwords: Arc<PasswordService>) -> Arc<MemoryIdentityStore> {
    let identity = Arc::new(MemoryIdentityStore::new(passwords.clone()));
    let alice = Principal::new("alice")
        .with_id("U1")
        .with_email("alice@example.com")
        .with_balance(1000.0)
        .with_password_hash(passwords.hash_password(PASSWORD).unwrap());
    identity.insert(&alice).await.unwrap();
    identity
}

/// Session store that counts lookups and can be told to fail.
struct ProbeSessions {
    inner: MemorySessionStore,
    lookups: AtomicUsize,
    fail: bool,
}

impl ProbeSessions {
    fn new(fail: bool) -> Self {
        Self {
            inner: MemorySessionStore::new(),
            lookups: AtomicUsize::new(0),
            fail,
        }
    }
}

#[async_trait]
impl SessionStore for ProbeSessions {
    async fn find_by_owner(&self, owner_id: &str) -> gv_platform::Result<Vec<GameSession>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PlatformError::internal("connection reset by peer"));
        }
        self.inner.find_by_owner(owner_id).await
    }

    async fn insert(&self, session: &GameSession) -> gv_platform::Result<()> {
        self.inner.insert(session).await
    }
}

#[tokio::test]
async fn test_login_returns_profile_and_sessions() {
    let passwords = passwords();
    let identity = identity_with_alice(passwords).await;
    let sessions = Arc::new(MemorySessionStore::new());
    let first = GameSession::new("U1")
        .with_catalogue_id("starburst")
        .with_balances(1000.0, 1040.0)
        .with_totals(200.0, 240.0);
    let second = GameSession::new("U1").with_catalogue_id("book-of-ra");
    for s in [&first, &GameSession::new("U2"), &second] {
        sessions.insert(s).await.unwrap();
    }

    let function = CheckUserCredentials::new(identity, sessions);
    let envelope = function.authenticate_and_aggregate("alice", PASSWORD).await;
    let value = serde_json::to_value(&envelope).unwrap();

    assert_eq!(value["status"], "success");
    assert_eq!(value["userData"]["id"], "U1");
    assert_eq!(value["userData"]["username"], "alice");
    assert_eq!(value["userData"]["email"], "alice@example.com");
    assert_eq!(value["userData"]["balance"], 1000.0);

    let game_data = value["gameData"].as_array().unwrap();
    assert_eq!(game_data.len(), 2);
    assert_eq!(
        game_data[0],
        json!({
            "sessionId": first.id,
            "gameCatalogId": "starburst",
            "balanceOnEnter": 1000.0,
            "balanceOnExit": 1040.0,
            "totalPlayed": 200.0,
            "totalWin": 240.0
        })
    );
    assert_eq!(game_data[1]["sessionId"], second.id.as_str());
    assert!(game_data[1].get("totalWin").is_none());
}

#[tokio::test]
async fn test_wrong_password_skips_session_lookup() {
    let identity = identity_with_alice(passwords()).await;
    let sessions = Arc::new(ProbeSessions::new(false));
    let function = CheckUserCredentials::new(identity, sessions.clone());

    let value = serde_json::to_value(function.authenticate_and_aggregate("alice", "wrong").await).unwrap();

    assert_eq!(
        value,
        json!({"status": "error", "code": 101, "message": "Invalid username/password."})
    );
    assert_eq!(sessions.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_user_matches_wrong_password() {
    let identity = identity_with_alice(passwords()).await;
    let function = CheckUserCredentials::new(identity, Arc::new(MemorySessionStore::new()));

    let envelope = function.authenticate_and_aggregate("mallory", PASSWORD).await;
    let error = envelope.error_body().unwrap();
    assert_eq!(error.code, Some(101));
    assert_eq!(error.message, "Invalid username/password.");
}

#[tokio::test]
async fn test_no_sessions_is_success() {
    let identity = identity_with_alice(passwords()).await;
    let function = CheckUserCredentials::new(identity, Arc::new(MemorySessionStore::new()));

    let value = serde_json::to_value(function.authenticate_and_aggregate("alice", PASSWORD).await).unwrap();
    assert_eq!(value["status"], "success");
    assert_eq!(value["gameData"], json!([]));
}

#[tokio::test]
async fn test_session_fault_hides_cause() {
    let identity = identity_with_alice(passwords()).await;
    let sessions = Arc::new(ProbeSessions::new(true));
    let function = CheckUserCredentials::new(identity, sessions.clone());

    let value = serde_json::to_value(function.authenticate_and_aggregate("alice", PASSWORD).await).unwrap();

    assert_eq!(
        value,
        json!({"status": "error", "code": 500, "message": "An unexpected error occurred."})
    );
    assert_eq!(sessions.lookups.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_registry_login_input_errors() {
    let passwords = passwords();
    let stores = Stores::memory(passwords);
    let registry = FunctionRegistry::with_defaults(&stores, Arc::new(TriggerRegistry::with_defaults()));

    let cases = [
        (json!({"username": "", "password": "x"}), 200, "username/email is required."),
        (json!({"username": "alice", "password": ""}), 201, "password is required."),
        (json!({}), -1, "Username must be a string."),
        (json!({"password": "x"}), -1, "Username must be a string."),
        (json!({"username": 0, "password": "x"}), -1, "Username must be a string."),
        (json!({"username": null, "password": "x"}), -1, "Username must be a string."),
        (json!({"username": 42, "password": "x"}), -1, "Username must be a string."),
        (json!({"username": "alice"}), -1, "Password must be a string."),
        (json!({"username": "alice", "password": false}), -1, "Password must be a string."),
        (json!({"username": "alice", "password": true}), -1, "Password must be a string."),
    ];

    for (params, code, message) in cases {
        let result = registry
            .run("checkUserCredentials", params.as_object().unwrap())
            .await
            .unwrap();
        assert_eq!(result["status"], "error");
        assert_eq!(result["code"], code);
        assert_eq!(result["message"], message);
    }
}

#[tokio::test]
async fn test_registry_round_trip_through_rtp_functions() {
    let stores = Stores::memory(passwords());
    let registry = FunctionRegistry::with_defaults(&stores, Arc::new(TriggerRegistry::with_defaults()));

    let created = registry
        .run(
            "createGameRtpData",
            json!({"gameName": "Gonzo's Quest", "rtp": 95.97, "scatter": 3}).as_object().unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(created["status"], "success");

    let found = registry
        .run(
            "fetchGameRtpData",
            json!({"gameName": "Gonzo's Quest", "rtp": 95.97}).as_object().unwrap(),
        )
        .await
        .unwrap();
    let rows = found["gameRtpData"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], created["data"]["id"]);
    assert_eq!(rows[0]["scatter"], 3);

    let missing = registry
        .run(
            "fetchGameRtpData",
            json!({"gameName": "Gonzo's Quest", "rtp": 96}).as_object().unwrap(),
        )
        .await
        .unwrap();
    assert!(missing.get("code").is_none());
    assert_eq!(
        missing["message"],
        "No records found for gameName 'Gonzo's Quest' with rtp '96'."
    );
}

#[tokio::test]
async fn test_login_stamps_last_login() {
    let identity = identity_with_alice(passwords()).await;
    assert!(identity.find_by_id("U1").unwrap().last_login_at.is_none());

    let function = CheckUserCredentials::new(identity.clone(), Arc::new(MemorySessionStore::new()));
    assert!(function.authenticate_and_aggregate("alice", PASSWORD).await.is_success());
    assert!(identity.find_by_id("U1").unwrap().last_login_at.is_some());
}
