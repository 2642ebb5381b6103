//! The core without HTTP: store, credentials and tokens together.

use chirpy::{
    credentials::PasswordHasher,
    database::Db,
    errors::Error,
    tokens::{ACCESS_ISSUER, TokenService},
};
use chrono::{TimeDelta, Utc};
use std::{sync::Arc, thread};

fn open(dir: &tempfile::TempDir) -> Arc<Db> {
    Arc::new(
        Db::open(dir.path().join("database.json"))
            .unwrap()
            .with_hasher(PasswordHasher::new(4)),
    )
}

#[test]
fn empty_store_to_revoked_token() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir);
    let tokens = TokenService::with_secret("secret", Arc::clone(&db));

    let user = db.create_user("a@x.com", "pw1").unwrap();
    assert_eq!(user.id, 1);

    let chirp = db.create_chirp("hi", user.id).unwrap();
    assert_eq!((chirp.id, chirp.author_id), (1, 1));

    let token = tokens
        .mint(user.id, ACCESS_ISSUER, Utc::now() + TimeDelta::hours(1))
        .unwrap();
    let claims = tokens.parse(&token).unwrap();
    assert_eq!(claims.subject, "1");

    tokens.revoke(&token).unwrap();
    assert!(tokens.is_revoked(&token).unwrap());
}

#[test]
fn state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let db = open(&dir);
        db.create_user("a@x.com", "pw1").unwrap();
        db.create_chirp("persisted", 1).unwrap();
        db.revoke_token("old-token").unwrap();
    }

    let db = open(&dir);
    assert_eq!(db.get_user_by_email("a@x.com").unwrap().id, 1);
    assert_eq!(db.get_chirp(1).unwrap().body, "persisted");
    assert!(db.is_token_revoked("old-token").unwrap());
    assert_eq!(db.create_chirp("next", 1).unwrap().id, 2);
}

#[test]
fn concurrent_signups_with_same_email_admit_one() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir);

    let results: Vec<Result<u64, Error>> = (0..6)
        .map(|_| {
            let db = Arc::clone(&db);
            thread::spawn(move || db.create_user("same@x.com", "pw").map(|u| u.id))
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    let created = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(Error::Conflict)))
        .count();
    assert_eq!((created, conflicts), (1, 5));
    assert_eq!(db.list_users().unwrap().len(), 1);
}

#[test]
fn concurrent_mixed_writes_are_all_kept() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir);

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                for i in 0..5 {
                    db.create_chirp(&format!("{t}/{i}"), t).unwrap();
                    db.revoke_token(&format!("token-{t}-{i}")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let doc = db.load().unwrap();
    assert_eq!(doc.chirps.len(), 20);
    assert_eq!(doc.revokes.len(), 20);
}
