use crate::config::ExtensionSettings;
use crate::guard::{Guard, GuardError, GuardResult};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, header},
};
use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::Arc;

/// The caller a credential resolved to.
///
/// Inserted into the request extensions once a [`SecuredGuard`] admits the
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
    pub permissions: HashSet<String>,
}

impl Principal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: HashSet::new(),
        }
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Resolves bearer credentials to principals. Supplied by the host.
pub trait TokenAuthority: Send + Sync + 'static {
    fn authenticate(&self, token: &str) -> Option<Principal>;
}

fn token_digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

#[derive(Debug, Clone)]
struct TokenEntry {
    digest: [u8; 32],
    principal: Principal,
}

/// A fixed token table.
///
/// Only SHA-256 digests of the tokens are kept. A presented token is hashed
/// and compared in constant time against every entry.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuthority {
    tokens: Vec<TokenEntry>,
}

impl StaticTokenAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, principal: Principal) -> Self {
        let digest = token_digest(&token.into());
        self.tokens.retain(|entry| entry.digest != digest);
        self.tokens.push(TokenEntry { digest, principal });
        self
    }

    /// Every configured API token maps to an `api-client` principal holding
    /// the configured token permissions.
    pub fn from_settings(settings: &ExtensionSettings) -> Self {
        let principal = settings
            .token_permissions
            .iter()
            .fold(Principal::new("api-client"), |p, perm| p.with_permission(perm.clone()));

        settings
            .api_tokens
            .iter()
            .fold(Self::new(), |authority, token| {
                authority.with_token(token.clone(), principal.clone())
            })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenAuthority for StaticTokenAuthority {
    fn authenticate(&self, token: &str) -> Option<Principal> {
        let presented = token_digest(token);
        let mut matched = None;
        for entry in &self.tokens {
            if constant_time_eq(&entry.digest, &presented) && matched.is_none() {
                matched = Some(&entry.principal);
            }
        }
        matched.cloned()
    }
}

/// Admits a request only when it carries a bearer token the authority
/// recognises and, if a permission is required, the resolved principal
/// holds it.
#[derive(Clone)]
pub struct SecuredGuard {
    authority: Arc<dyn TokenAuthority>,
    required_permission: Option<String>,
}

impl SecuredGuard {
    pub fn new(authority: Arc<dyn TokenAuthority>) -> Self {
        Self {
            authority,
            required_permission: None,
        }
    }

    pub fn require_permission(mut self, permission: impl Into<String>) -> Self {
        self.required_permission = Some(permission.into());
        self
    }

    pub fn from_settings(settings: &ExtensionSettings) -> Self {
        let guard = Self::new(Arc::new(StaticTokenAuthority::from_settings(settings)));
        match &settings.required_permission {
            Some(permission) => guard.require_permission(permission.clone()),
            None => guard,
        }
    }
}

fn bearer_token(request: &Request<Body>) -> Option<&str> {
    let value = request.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl Guard for SecuredGuard {
    async fn can_activate(&self, request: &mut Request<Body>) -> GuardResult {
        let token = bearer_token(request)
            .ok_or_else(|| GuardError::Unauthorized("missing bearer token".to_string()))?;

        let principal = self
            .authority
            .authenticate(token)
            .ok_or_else(|| GuardError::Unauthorized("invalid bearer token".to_string()))?;

        if let Some(permission) = &self.required_permission {
            if !principal.has_permission(permission) {
                return Err(GuardError::Forbidden(format!(
                    "'{}' lacks permission '{permission}'",
                    principal.name
                )));
            }
        }

        tracing::debug!(principal = %principal.name, "secured request admitted");
        request.extensions_mut().insert(principal);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> SecuredGuard {
        let authority = StaticTokenAuthority::new()
            .with_token("reader", Principal::new("alice"))
            .with_token("admin", Principal::new("bob").with_permission("rest-api"));
        SecuredGuard::new(Arc::new(authority))
    }

    fn request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/hello");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let err = guard().can_activate(&mut request(None)).await.unwrap_err();
        assert!(matches!(err, GuardError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let err = guard()
            .can_activate(&mut request(Some("Basic cmVhZGVy")))
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let err = guard()
            .can_activate(&mut request(Some("Bearer nope")))
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Unauthorized(ref msg) if msg.contains("invalid")));
    }

    #[tokio::test]
    async fn known_token_attaches_principal() {
        let mut req = request(Some("bearer reader"));
        guard().can_activate(&mut req).await.unwrap();
        assert_eq!(req.extensions().get::<Principal>().unwrap().name, "alice");
    }

    #[tokio::test]
    async fn required_permission_is_enforced() {
        let guard = guard().require_permission("rest-api");

        let err = guard
            .can_activate(&mut request(Some("Bearer reader")))
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Forbidden(_)));

        guard
            .can_activate(&mut request(Some("Bearer admin")))
            .await
            .unwrap();
    }

    #[test]
    fn authority_from_settings_grants_configured_permissions() {
        let settings = ExtensionSettings {
            api_tokens: vec!["t1".into(), "t2".into()],
            token_permissions: vec!["rest-api".into()],
            ..ExtensionSettings::default()
        };
        let authority = StaticTokenAuthority::from_settings(&settings);
        assert_eq!(authority.len(), 2);
        assert!(authority.authenticate("t2").unwrap().has_permission("rest-api"));
        assert!(authority.authenticate("t3").is_none());
    }

    #[test]
    fn token_differing_in_last_byte_is_rejected() {
        let authority = StaticTokenAuthority::new().with_token("s3cr3t-token", Principal::new("alice"));

        assert!(authority.authenticate("s3cr3t-token").is_some());
        assert!(authority.authenticate("s3cr3t-tokem").is_none());
        assert!(authority.authenticate("s3cr3t-toke").is_none());
        assert!(authority.authenticate("s3cr3t-token ").is_none());
    }

    #[test]
    fn re_adding_a_token_replaces_its_principal() {
        let authority = StaticTokenAuthority::new()
            .with_token("t", Principal::new("alice"))
            .with_token("t", Principal::new("bob"));

        assert_eq!(authority.len(), 1);
        assert_eq!(authority.authenticate("t").unwrap().name, "bob");
    }
}
