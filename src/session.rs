//! Durable session state: access token, refresh token and display name kept
//! in localStorage so a reload keeps the user signed in. No expiry is tracked
//! here; an expired token is discovered through a failed request.

use web_sys::Storage;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USERNAME_KEY: &str = "username";

#[derive(Clone, PartialEq, Debug, Default)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub username: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn read(key: &str) -> Option<String> {
    local_storage()?
        .get_item(key)
        .ok()?
        .filter(|value| !value.is_empty())
}

pub fn load() -> Session {
    Session {
        access_token: read(ACCESS_TOKEN_KEY),
        refresh_token: read(REFRESH_TOKEN_KEY),
        username: read(USERNAME_KEY),
    }
}

pub fn save(access: &str, refresh: &str, username: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, access);
        let _ = storage.set_item(REFRESH_TOKEN_KEY, refresh);
        let _ = storage.set_item(USERNAME_KEY, username);
    }
}

/// Replaces only the access token, after a successful refresh.
pub fn store_access(access: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, access);
    }
}

pub fn clear() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
        let _ = storage.remove_item(USERNAME_KEY);
    }
}

pub fn access_token() -> Option<String> {
    read(ACCESS_TOKEN_KEY)
}

pub fn refresh_token() -> Option<String> {
    read(REFRESH_TOKEN_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_iff_access_token_present() {
        assert!(!Session::default().is_authenticated());

        let session = Session {
            access_token: Some("abc".into()),
            refresh_token: None,
            username: None,
        };
        assert!(session.is_authenticated());

        // A lone refresh token does not count as a login.
        let session = Session {
            access_token: None,
            refresh_token: Some("def".into()),
            username: Some("user@example.com".into()),
        };
        assert!(!session.is_authenticated());
    }
}
