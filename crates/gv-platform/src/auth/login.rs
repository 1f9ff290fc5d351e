//! Login rules shared by every identity store implementation.

use serde_json::Value;
use tracing::warn;

use super::password_service::PasswordService;
use crate::principal::Principal;
use crate::shared::{codes, PlatformError, Result};

/// Pull a credential out of untyped params.
///
/// Anything but a JSON string, an absent key included, is rejected with
/// `-1 "<label> must be a string."`. An empty string passes through so the
/// store reports it as missing (200/201).
pub fn credential_param(params: &serde_json::Map<String, Value>, key: &str, label: &str) -> Result<String> {
    match params.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(PlatformError::auth(
            codes::OTHER_CAUSE,
            format!("{} must be a string.", label),
        )),
    }
}

pub fn require_credentials(username: &str, password: &str) -> Result<()> {
    if username.is_empty() {
        return Err(PlatformError::auth(codes::USERNAME_MISSING, "username/email is required."));
    }
    if password.is_empty() {
        return Err(PlatformError::auth(codes::PASSWORD_MISSING, "password is required."));
    }
    Ok(())
}

/// Accept `candidate` only if it exists and its stored hash matches.
///
/// Unknown user, missing hash, unreadable hash and wrong password are all
/// reported as the same invalid-login error.
pub fn verify_candidate(
    candidate: Option<Principal>,
    password: &str,
    passwords: &PasswordService,
) -> Result<Principal> {
    let principal = candidate.ok_or_else(PlatformError::invalid_login)?;

    let valid = match principal.password_hash.as_deref() {
        Some(hash) => passwords.verify_password(password, hash).unwrap_or_else(|e| {
            warn!(principal_id = %principal.id, error = %e, "Stored password hash unusable");
            false
        }),
        None => false,
    };

    if valid {
        Ok(principal)
    } else {
        Err(PlatformError::invalid_login())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password_service::Argon2Config;
    use serde_json::json;

    fn params(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_credential_param() {
        let p = params(json!({
            "username": "alice",
            "empty": "",
            "password": 1234,
            "zero": 0,
            "off": false,
            "nothing": null
        }));
        assert_eq!(credential_param(&p, "username", "Username").unwrap(), "alice");
        assert_eq!(credential_param(&p, "empty", "Username").unwrap(), "");

        let err = credential_param(&p, "password", "Password").unwrap_err();
        assert_eq!(err.classified(), Some((-1, "Password must be a string.")));

        for key in ["missing", "zero", "off", "nothing"] {
            let err = credential_param(&p, key, "Username").unwrap_err();
            assert_eq!(err.classified(), Some((-1, "Username must be a string.")), "{}", key);
        }
    }

    #[test]
    fn test_require_credentials() {
        assert_eq!(require_credentials("", "pw").unwrap_err().classified().unwrap().0, 200);
        assert_eq!(require_credentials("alice", "").unwrap_err().classified().unwrap().0, 201);
        assert!(require_credentials("alice", "pw").is_ok());
    }

    #[test]
    fn test_verify_candidate() {
        let passwords = PasswordService::new(Argon2Config::testing()).unwrap();
        let hash = passwords.hash_password("correct").unwrap();
        let alice = Principal::new("alice").with_password_hash(hash);

        assert!(verify_candidate(Some(alice.clone()), "correct", &passwords).is_ok());

        let wrong = verify_candidate(Some(alice), "wrong", &passwords).unwrap_err();
        assert_eq!(wrong.classified().unwrap().0, 101);

        let unknown = verify_candidate(None, "correct", &passwords).unwrap_err();
        assert_eq!(unknown.classified().unwrap().0, 101);

        let no_hash = verify_candidate(Some(Principal::new("bob")), "x", &passwords).unwrap_err();
        assert_eq!(no_hash.classified().unwrap().0, 101);

        let garbage = Principal::new("carol").with_password_hash("garbage");
        let err = verify_candidate(Some(garbage), "x", &passwords).unwrap_err();
        assert_eq!(err.classified().unwrap().0, 101);
    }
}
