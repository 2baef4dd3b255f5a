//! In-memory session store keyed by an opaque cookie
//!
//! One `SessionContext` per signed-in browser session: created at sign-in,
//! removed at sign-out, rebuilt in place on tenant switch. No cross-process
//! or cross-tab synchronization; restarting the server signs everyone out.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use wcrm_common::context::{AuthSession, TenantSession};

/// Session cookie name
pub const SESSION_COOKIE: &str = "wcrm_session";

/// Everything a page handler needs about the caller
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub auth: AuthSession,
    /// `None` for a user with no tenant memberships
    pub tenant: Option<TenantSession>,
}

/// Shared map of live sessions
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
}

impl SessionStore {
    /// Store a new context and return its cookie value
    pub async fn insert(&self, context: SessionContext) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(id, context);
        id
    }

    /// Snapshot of the context for a cookie, if the session is live
    pub async fn get(&self, id: Uuid) -> Option<SessionContext> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Drop a session (sign-out or backend-side token invalidation)
    pub async fn remove(&self, id: Uuid) -> Option<SessionContext> {
        self.inner.write().await.remove(&id)
    }

    /// Mutate a live context in place (tenant switch, tenant refetch)
    pub async fn update<F>(&self, id: Uuid, f: F) -> bool
    where
        F: FnOnce(&mut SessionContext),
    {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(&id) {
            Some(context) => {
                f(context);
                true
            }
            None => false,
        }
    }
}

/// Session id from the request's cookie header, if present
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            value.parse().ok()
        } else {
            None
        }
    })
}

/// `Set-Cookie` value establishing the session
pub fn session_cookie(id: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

/// `Set-Cookie` value clearing the session
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn extracts_session_id_among_other_cookies() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            format!("theme=dark; {}={}; lang=en", SESSION_COOKIE, id).parse().unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn missing_or_malformed_cookie_is_none() {
        let headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, format!("{}=not-a-uuid", SESSION_COOKIE).parse().unwrap());
        assert_eq!(session_id_from_headers(&headers), None);
    }
}
