use super::Db;
use crate::{
    errors::{AuthError, Error},
    models::{User, next_id},
};

impl Db {
    /// Email uniqueness is exact and case-sensitive, and only checked here.
    pub fn create_user(&self, email: &str, password: &str) -> Result<User, Error> {
        let password_hash = self.hasher().hash(password)?;
        self.update(|doc| {
            if doc.users.iter().any(|user| user.email == email) {
                return Err(Error::Conflict);
            }
            let user = User {
                id: next_id(&doc.users),
                email: email.to_string(),
                password_hash,
            };
            doc.users.push(user.clone());
            Ok(user)
        })
    }

    pub fn get_user(&self, id: u64) -> Result<User, Error> {
        self.read(|doc| {
            doc.users
                .iter()
                .find(|user| user.id == id)
                .cloned()
                .ok_or(Error::NotFound)
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<User, Error> {
        self.read(|doc| {
            doc.users
                .iter()
                .find(|user| user.email == email)
                .cloned()
                .ok_or(Error::NotFound)
        })
    }

    /// The user with `email`, if `password` matches its hash. Unknown
    /// emails and wrong passwords fail the same way.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, Error> {
        let user = match self.get_user_by_email(email) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(AuthError::InvalidCredentials.into()),
            Err(e) => return Err(e),
        };
        if !self.hasher().verify(&user.password_hash, password)? {
            return Err(AuthError::InvalidCredentials.into());
        }
        Ok(user)
    }

    pub fn list_users(&self) -> Result<Vec<User>, Error> {
        self.read(|doc| Ok(doc.users.clone()))
    }

    /// Replace the record with `user.id`. `user.password_hash` must hold the
    /// new plaintext; it is hashed before storing, whatever it contains.
    pub fn update_user(&self, user: User) -> Result<User, Error> {
        let password_hash = self.hasher().hash(&user.password_hash)?;
        let user = User {
            password_hash,
            ..user
        };
        self.update(|doc| {
            let slot = doc
                .users
                .iter_mut()
                .find(|existing| existing.id == user.id)
                .ok_or(Error::NotFound)?;
            *slot = user.clone();
            Ok(user)
        })
    }
}
