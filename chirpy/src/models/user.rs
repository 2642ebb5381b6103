use super::Identified;
use serde::{Deserialize, Serialize};

/// A stored account.
///
/// `password_hash` holds a bcrypt hash once persisted. The one exception is
/// the value handed to `Db::update_user`, which must carry the new
/// plaintext: the store re-hashes it unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl Identified for User {
    fn id(&self) -> u64 {
        self.id
    }
}
