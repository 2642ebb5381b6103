mod chirp;
mod document;
mod user;

pub use chirp::Chirp;
pub use document::Document;
pub use user::User;

/// Records that carry a numeric primary key.
pub trait Identified {
    fn id(&self) -> u64;
}

/// Next free id for a collection: one past the largest id, or 1 when empty.
pub fn next_id<T: Identified>(items: &[T]) -> u64 {
    items.iter().map(Identified::id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_starts_at_one() {
        let chirps: Vec<Chirp> = Vec::new();
        assert_eq!(next_id(&chirps), 1);
    }

    #[test]
    fn next_id_follows_max_not_len() {
        let chirps = vec![
            Chirp {
                id: 7,
                body: "a".into(),
                author_id: 1,
            },
            Chirp {
                id: 3,
                body: "b".into(),
                author_id: 1,
            },
        ];
        assert_eq!(next_id(&chirps), 8);
    }
}
