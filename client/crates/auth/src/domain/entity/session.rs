//! Session Entity
//!
//! The authenticated identity as far as this application cares: a stable
//! record identifier plus the email address, when the service exposes it.
//! Token custody stays inside the BaaS client; the session entity is what
//! the UI layers render and scope queries by.

use kernel::id::UserId;

/// Authenticated user session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Stable record identifier of the signed-in user
    pub user_id: UserId,
    /// Email address (the service may withhold it)
    pub email: Option<String>,
}

impl Session {
    pub fn new(user_id: UserId, email: Option<String>) -> Self {
        Self { user_id, email }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_compare_by_content() {
        let a = Session::new(UserId::from_raw("u1"), Some("a@example.com".into()));
        let b = Session::new(UserId::from_raw("u1"), Some("a@example.com".into()));
        let c = Session::new(UserId::from_raw("u2"), Some("a@example.com".into()));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
