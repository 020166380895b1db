use bowl_picks_app::ports::authentication::{AuthenticationPort, CallerRole};

/// Bearer tokens are the configured pool and admin passwords.
pub struct SharedSecretAuth {
    admin_password: Option<String>,
    pool_password: Option<String>,
}

impl SharedSecretAuth {
    pub fn new(admin_password: Option<String>, pool_password: Option<String>) -> Self {
        if admin_password.is_none() {
            log::warn!("No admin password configured, admin routes are unreachable");
        }
        if pool_password.is_none() {
            log::warn!("No pool password configured, picks cannot be submitted");
        }
        Self {
            admin_password,
            pool_password,
        }
    }
}

fn matches(secret: Option<&str>, token: &str) -> bool {
    secret.is_some_and(|s| s == token)
}

impl AuthenticationPort for SharedSecretAuth {
    fn resolve_role(&self, token: &str) -> Option<CallerRole> {
        if matches(self.admin_password.as_deref(), token) {
            Some(CallerRole::Admin)
        } else if matches(self.pool_password.as_deref(), token) {
            Some(CallerRole::Participant)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passwords_map_to_roles() {
        let auth = SharedSecretAuth::new(Some("rose".to_string()), Some("sugar".to_string()));
        assert_eq!(auth.resolve_role("rose"), Some(CallerRole::Admin));
        assert_eq!(auth.resolve_role("sugar"), Some(CallerRole::Participant));
        assert_eq!(auth.resolve_role("orange"), None);
        assert_eq!(auth.resolve_role(""), None);
    }

    #[test]
    fn test_missing_password_matches_nothing() {
        let auth = SharedSecretAuth::new(None, Some("sugar".to_string()));
        assert_eq!(auth.resolve_role(""), None);
        assert_eq!(auth.resolve_role("sugar"), Some(CallerRole::Participant));
    }
}
