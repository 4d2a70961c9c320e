//! # Authentication
//!
//! JWT issue/verify ([`TokenService`]), a logout denylist ([`TokenDenylist`]) and
//! bcrypt password hashing. The request extractor that ties these to axum lives
//! in [`crate::http::extract`].

mod denylist;
mod error;
mod password;
mod token;

pub use denylist::TokenDenylist;
pub use error::AuthError;
pub use password::{hash_password, verify_password, BCRYPT_COST};
pub use token::{Claims, TokenService};
