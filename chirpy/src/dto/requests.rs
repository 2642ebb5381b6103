use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Longest accepted chirp, in bytes of UTF-8.
pub const MAX_CHIRP_BYTES: usize = 140;

/// Body of `POST /api/users`, `PUT /api/users` and `POST /api/login`.
#[derive(Debug, Validate, Deserialize)]
pub struct UserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Validate, Deserialize)]
pub struct CreateChirpRequest {
    #[validate(custom(function = "chirp_fits"))]
    pub body: String,
}

fn chirp_fits(body: &str) -> Result<(), ValidationError> {
    if body.len() > MAX_CHIRP_BYTES {
        let mut err = ValidationError::new("chirp_length");
        err.message = Some("Chirp is too long".into());
        return Err(err);
    }
    Ok(())
}
