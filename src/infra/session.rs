//! Process-wide session store.
//!
//! Holds at most one end-user session and one admin session at a time,
//! each with an independent lifecycle. Explicitly constructed and
//! injected wherever sessions are needed; created at process start and
//! dropped at process end, never a hidden global.

use std::sync::RwLock;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::User;

/// Snapshot of the logged-in end user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSession {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub points: i64,
    pub level: i64,
    pub duoc_eligible: bool,
    pub referral_code: String,
}

impl From<&User> for UserSession {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            points: user.points,
            level: user.level,
            duoc_eligible: user.duoc_eligible,
            referral_code: user.referral_code.clone(),
        }
    }
}

/// Snapshot of the logged-in admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSession {
    pub username: String,
}

/// In-process key-value session store for the two roles.
#[derive(Debug, Default)]
pub struct SessionStore {
    user: RwLock<Option<UserSession>>,
    admin: RwLock<Option<AdminSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- end-user session ----

    pub fn save_user_session(&self, session: UserSession) {
        *self.user.write().unwrap() = Some(session);
    }

    pub fn user_session(&self) -> Option<UserSession> {
        self.user.read().unwrap().clone()
    }

    pub fn is_user_logged_in(&self) -> bool {
        self.user.read().unwrap().is_some()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user.read().unwrap().as_ref().map(|s| s.id)
    }

    /// Refresh the cached loyalty fields after a points change
    pub fn update_points(&self, points: i64, level: i64) {
        if let Some(session) = self.user.write().unwrap().as_mut() {
            session.points = points;
            session.level = level;
        }
    }

    pub fn clear_user_session(&self) {
        *self.user.write().unwrap() = None;
    }

    // ---- admin session ----

    pub fn save_admin_session(&self, username: String) {
        *self.admin.write().unwrap() = Some(AdminSession { username });
    }

    pub fn is_admin_logged_in(&self) -> bool {
        self.admin.read().unwrap().is_some()
    }

    pub fn admin_username(&self) -> Option<String> {
        self.admin.read().unwrap().as_ref().map(|s| s.username.clone())
    }

    pub fn clear_admin_session(&self) {
        *self.admin.write().unwrap() = None;
    }

    /// Tear down both sessions
    pub fn clear_all(&self) {
        self.clear_user_session();
        self.clear_admin_session();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> UserSession {
        UserSession {
            id: Uuid::new_v4(),
            name: "Gamer".to_string(),
            email: "gamer@example.com".to_string(),
            points: 120,
            level: 1,
            duoc_eligible: false,
            referral_code: "LUGABC123".to_string(),
        }
    }

    #[test]
    fn test_user_and_admin_sessions_are_independent() {
        let store = SessionStore::new();
        store.save_user_session(session());
        store.save_admin_session("admin".to_string());

        store.clear_user_session();
        assert!(!store.is_user_logged_in());
        assert!(store.is_admin_logged_in());

        store.clear_admin_session();
        assert!(!store.is_admin_logged_in());
    }

    #[test]
    fn test_update_points_refreshes_snapshot() {
        let store = SessionStore::new();
        store.save_user_session(session());

        store.update_points(700, 2);
        let refreshed = store.user_session().unwrap();
        assert_eq!(refreshed.points, 700);
        assert_eq!(refreshed.level, 2);
    }

    #[test]
    fn test_update_points_without_session_is_noop() {
        let store = SessionStore::new();
        store.update_points(700, 2);
        assert!(store.user_session().is_none());
    }

    #[test]
    fn test_clear_all() {
        let store = SessionStore::new();
        store.save_user_session(session());
        store.save_admin_session("admin".to_string());

        store.clear_all();
        assert!(!store.is_user_logged_in());
        assert!(!store.is_admin_logged_in());
    }
}
