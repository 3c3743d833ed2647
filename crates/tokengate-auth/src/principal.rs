use crate::claims::{IdentityClaims, normalize_authorities};

/// Authenticated caller reconstructed from a validated token.
///
/// Carries no password and no token; it exists only for the lifetime of
/// the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: String,
    roles: Vec<String>,
}

impl Principal {
    pub fn new<I, S>(username: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            username: username.into(),
            roles: normalize_authorities(roles),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|r| self.has_role(r))
    }
}

impl From<IdentityClaims> for Principal {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            username: claims.subject,
            roles: claims.authorities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{ROLE_ADMIN, ROLE_USER};

    #[test]
    fn test_has_role() {
        let principal = Principal::new("alice", [ROLE_USER]);

        assert!(principal.has_role(ROLE_USER));
        assert!(!principal.has_role(ROLE_ADMIN));
    }

    #[test]
    fn test_has_any_role() {
        let principal = Principal::new("alice", [ROLE_USER]);

        assert!(principal.has_any_role(&[ROLE_USER, ROLE_ADMIN]));
        assert!(!principal.has_any_role(&[ROLE_ADMIN]));
        assert!(!principal.has_any_role(&[]));
    }

    #[test]
    fn test_from_claims() {
        let principal = Principal::from(IdentityClaims {
            subject: "admin".to_string(),
            authorities: vec![ROLE_USER.to_string(), ROLE_ADMIN.to_string()],
            issued_at: 0,
            expires_at: 60,
        });

        assert_eq!(principal.username(), "admin");
        assert_eq!(principal.roles(), &[ROLE_USER.to_string(), ROLE_ADMIN.to_string()]);
    }
}
