use super::Identified;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: u64,
    pub body: String,
    pub author_id: u64,
}

impl Identified for Chirp {
    fn id(&self) -> u64 {
        self.id
    }
}
