use super::Db;
use crate::errors::Error;
use chrono::Utc;
use tracing::debug;

impl Db {
    /// Add `token` to the revocation set. Revoking an already revoked token
    /// keeps the original timestamp.
    pub fn revoke_token(&self, token: &str) -> Result<(), Error> {
        self.update(|doc| {
            if doc.revokes.contains_key(token) {
                return Ok(());
            }
            doc.revokes.insert(token.to_string(), Utc::now());
            debug!(revoked = doc.revokes.len(), "token revoked");
            Ok(())
        })
    }

    pub fn is_token_revoked(&self, token: &str) -> Result<bool, Error> {
        self.read(|doc| Ok(doc.revokes.contains_key(token)))
    }
}
