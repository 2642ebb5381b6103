mod requests;
mod responses;

pub use requests::{CreateChirpRequest, UserRequest};
pub use responses::{LoginResponse, TokenResponse, UserResponse};
