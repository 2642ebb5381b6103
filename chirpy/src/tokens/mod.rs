//! Session tokens.
//!
//! Two classes of token share one format and differ only by issuer: a
//! short-lived access token and a long-lived refresh token. A refresh token
//! stays usable until it expires or is revoked, and is never rotated.
//!
//! Access tokens are not checked against the revocation set. Revoking a
//! refresh token stops further exchanges with it, but access tokens already
//! minted from it remain valid until they expire.

mod signer;

pub use signer::{HmacSigner, TokenSigner};

use crate::{
    database::Db,
    errors::{AuthError, Error},
};
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub const ACCESS_ISSUER: &str = "chirpy-access";
pub const REFRESH_ISSUER: &str = "chirpy-refresh";

pub const ACCESS_TTL_SECS: i64 = 60 * 60;
pub const REFRESH_TTL_SECS: i64 = 60 * 24 * 60 * 60;

/// Decoded token payload. Timestamps have whole-second precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub issuer: String,
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub token_id: String,
}

impl Claims {
    pub fn validate(&self, expected_issuer: &str) -> Result<(), AuthError> {
        self.validate_at(expected_issuer, Utc::now())
    }

    pub fn validate_at(&self, expected_issuer: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
        if self.issuer != expected_issuer {
            return Err(AuthError::WrongIssuer {
                expected: expected_issuer.to_string(),
                found: self.issuer.clone(),
            });
        }
        if now > self.expires_at {
            return Err(AuthError::Expired);
        }
        Ok(())
    }

    /// The subject as a user id.
    pub fn subject_id(&self) -> Result<u64, AuthError> {
        self.subject.parse().map_err(|_| AuthError::Malformed)
    }
}

pub struct TokenService {
    signer: Box<dyn TokenSigner>,
    db: Arc<Db>,
}

impl TokenService {
    pub fn new(signer: impl TokenSigner + 'static, db: Arc<Db>) -> Self {
        Self {
            signer: Box::new(signer),
            db,
        }
    }

    pub fn with_secret(secret: &str, db: Arc<Db>) -> Self {
        Self::new(HmacSigner::new(secret.as_bytes()), db)
    }

    pub fn mint(
        &self,
        subject_id: u64,
        issuer: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let issued_at = Utc::now().trunc_subsecs(0);
        let expires_at = expires_at.trunc_subsecs(0);
        if expires_at <= issued_at {
            return Err(AuthError::InvalidExpiry);
        }

        self.signer.sign(&Claims {
            issuer: issuer.to_string(),
            subject: subject_id.to_string(),
            issued_at,
            expires_at,
            token_id: Uuid::new_v4().to_string(),
        })
    }

    pub fn mint_access(&self, subject_id: u64) -> Result<String, AuthError> {
        let expires_at = Utc::now() + TimeDelta::seconds(ACCESS_TTL_SECS);
        self.mint(subject_id, ACCESS_ISSUER, expires_at)
    }

    pub fn mint_refresh(&self, subject_id: u64) -> Result<String, AuthError> {
        let expires_at = Utc::now() + TimeDelta::seconds(REFRESH_TTL_SECS);
        self.mint(subject_id, REFRESH_ISSUER, expires_at)
    }

    pub fn parse(&self, token: &str) -> Result<Claims, AuthError> {
        self.signer.verify(token)
    }

    pub fn validate(&self, claims: &Claims, expected_issuer: &str) -> Result<(), AuthError> {
        claims.validate(expected_issuer)
    }

    /// Parse and validate in one step.
    pub fn authenticate(&self, token: &str, expected_issuer: &str) -> Result<Claims, AuthError> {
        let claims = self.parse(token)?;
        claims.validate(expected_issuer)?;
        Ok(claims)
    }

    pub fn revoke(&self, token: &str) -> Result<(), Error> {
        self.db.revoke_token(token)
    }

    pub fn is_revoked(&self, token: &str) -> Result<bool, Error> {
        self.db.is_token_revoked(token)
    }

    /// Exchange a refresh token for a new access token bound to the same
    /// subject. The refresh token itself is left untouched.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, Error> {
        let claims = self.authenticate(refresh_token, REFRESH_ISSUER)?;
        if self.is_revoked(refresh_token)? {
            return Err(AuthError::Revoked.into());
        }
        let subject_id = claims.subject_id()?;
        debug!(subject_id, "refreshing access token");
        Ok(self.mint_access(subject_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_db;

    fn service(tmp: &tempfile::TempDir) -> TokenService {
        TokenService::with_secret("test-secret", Arc::new(test_db(tmp)))
    }

    #[test]
    fn mint_then_parse_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let tokens = service(&tmp);

        let token = tokens
            .mint(7, ACCESS_ISSUER, Utc::now() + TimeDelta::hours(1))
            .unwrap();
        let claims = tokens.parse(&token).unwrap();

        assert_eq!(claims.subject, "7");
        assert_eq!(claims.subject_id().unwrap(), 7);
        assert_eq!(claims.issuer, ACCESS_ISSUER);
        assert!(claims.expires_at > claims.issued_at);
        assert!(tokens.validate(&claims, ACCESS_ISSUER).is_ok());
    }

    #[test]
    fn every_mint_is_a_distinct_token() {
        let tmp = tempfile::tempdir().unwrap();
        let tokens = service(&tmp);

        assert_ne!(tokens.mint_refresh(1).unwrap(), tokens.mint_refresh(1).unwrap());
    }

    #[test]
    fn expiry_must_follow_issue_time() {
        let tmp = tempfile::tempdir().unwrap();
        let tokens = service(&tmp);

        let err = tokens
            .mint(1, ACCESS_ISSUER, Utc::now() - TimeDelta::seconds(5))
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidExpiry);
    }

    #[test]
    fn ttl_depends_on_token_class() {
        let tmp = tempfile::tempdir().unwrap();
        let tokens = service(&tmp);

        let access = tokens.parse(&tokens.mint_access(1).unwrap()).unwrap();
        let refresh = tokens.parse(&tokens.mint_refresh(1).unwrap()).unwrap();

        assert_eq!(access.issuer, ACCESS_ISSUER);
        assert_eq!(refresh.issuer, REFRESH_ISSUER);
        let access_ttl = (access.expires_at - access.issued_at).num_seconds();
        let refresh_ttl = (refresh.expires_at - refresh.issued_at).num_seconds();
        assert!((ACCESS_TTL_SECS - 1..=ACCESS_TTL_SECS).contains(&access_ttl));
        assert!((REFRESH_TTL_SECS - 1..=REFRESH_TTL_SECS).contains(&refresh_ttl));
    }

    #[test]
    fn validate_rejects_wrong_issuer() {
        let tmp = tempfile::tempdir().unwrap();
        let tokens = service(&tmp);
        let claims = tokens.parse(&tokens.mint_access(1).unwrap()).unwrap();

        let err = tokens.validate(&claims, REFRESH_ISSUER).unwrap_err();
        assert!(matches!(err, AuthError::WrongIssuer { .. }));
    }

    #[test]
    fn validate_rejects_expired() {
        let tmp = tempfile::tempdir().unwrap();
        let tokens = service(&tmp);
        let claims = tokens.parse(&tokens.mint_access(1).unwrap()).unwrap();

        let later = claims.expires_at + TimeDelta::seconds(1);
        assert_eq!(claims.validate_at(ACCESS_ISSUER, later), Err(AuthError::Expired));
        assert!(claims.validate_at(ACCESS_ISSUER, claims.expires_at).is_ok());
    }

    #[test]
    fn tampered_token_fails_parse() {
        let tmp = tempfile::tempdir().unwrap();
        let tokens = service(&tmp);
        let token = tokens.mint_access(1).unwrap();

        let other = TokenService::with_secret("other-secret", Arc::new(test_db(&tmp)));
        assert_eq!(other.parse(&token).unwrap_err(), AuthError::InvalidSignature);
    }

    #[test]
    fn revoke_then_is_revoked() {
        let tmp = tempfile::tempdir().unwrap();
        let tokens = service(&tmp);
        let token = tokens.mint_refresh(1).unwrap();

        assert!(!tokens.is_revoked(&token).unwrap());
        tokens.revoke(&token).unwrap();
        assert!(tokens.is_revoked(&token).unwrap());
        tokens.revoke(&token).unwrap();
        assert!(tokens.is_revoked(&token).unwrap());
    }

    #[test]
    fn refresh_mints_access_for_same_subject() {
        let tmp = tempfile::tempdir().unwrap();
        let tokens = service(&tmp);
        let refresh = tokens.mint_refresh(3).unwrap();

        let access = tokens.refresh(&refresh).unwrap();
        let claims = tokens.authenticate(&access, ACCESS_ISSUER).unwrap();
        assert_eq!(claims.subject, "3");

        // not consumed by use
        assert!(tokens.refresh(&refresh).is_ok());
    }

    #[test]
    fn refresh_requires_refresh_class() {
        let tmp = tempfile::tempdir().unwrap();
        let tokens = service(&tmp);
        let access = tokens.mint_access(3).unwrap();

        let err = tokens.refresh(&access).unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::WrongIssuer { .. })));
    }

    #[test]
    fn revoked_refresh_is_refused_but_minted_access_survives() {
        let tmp = tempfile::tempdir().unwrap();
        let tokens = service(&tmp);
        let refresh = tokens.mint_refresh(3).unwrap();
        let access = tokens.refresh(&refresh).unwrap();

        tokens.revoke(&refresh).unwrap();

        let err = tokens.refresh(&refresh).unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::Revoked)));
        assert!(tokens.authenticate(&access, ACCESS_ISSUER).is_ok());
    }
}
