use super::Db;
use crate::{
    errors::Error,
    models::{Chirp, next_id},
};

impl Db {
    pub fn create_chirp(&self, body: &str, author_id: u64) -> Result<Chirp, Error> {
        self.update(|doc| {
            let chirp = Chirp {
                id: next_id(&doc.chirps),
                body: body.to_string(),
                author_id,
            };
            doc.chirps.push(chirp.clone());
            Ok(chirp)
        })
    }

    pub fn get_chirp(&self, id: u64) -> Result<Chirp, Error> {
        self.read(|doc| {
            doc.chirps
                .iter()
                .find(|chirp| chirp.id == id)
                .cloned()
                .ok_or(Error::NotFound)
        })
    }

    /// All chirps in insertion order.
    pub fn list_chirps(&self) -> Result<Vec<Chirp>, Error> {
        self.read(|doc| Ok(doc.chirps.clone()))
    }
}
