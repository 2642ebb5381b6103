use super::Claims;
use crate::errors::AuthError;
use chrono::DateTime;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

/// Turns [`Claims`] into a compact signed string and back.
///
/// `verify` only checks the signature and the shape of the payload. Expiry
/// and issuer are the caller's business.
pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: &Claims) -> Result<String, AuthError>;
    fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

/// HS256 JWTs keyed by the server secret.
pub struct HmacSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl HmacSigner {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RegisteredClaims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
    #[serde(default)]
    jti: String,
}

impl TokenSigner for HmacSigner {
    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let registered = RegisteredClaims {
            iss: claims.issuer.clone(),
            sub: claims.subject.clone(),
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
            jti: claims.token_id.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &registered, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<RegisteredClaims>(token, &self.decoding, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthError::InvalidSignature
                }
                _ => AuthError::Malformed,
            },
        )?;
        let registered = data.claims;

        Ok(Claims {
            issuer: registered.iss,
            subject: registered.sub,
            issued_at: DateTime::from_timestamp(registered.iat, 0).ok_or(AuthError::Malformed)?,
            expires_at: DateTime::from_timestamp(registered.exp, 0).ok_or(AuthError::Malformed)?,
            token_id: registered.jti,
        })
    }
}
