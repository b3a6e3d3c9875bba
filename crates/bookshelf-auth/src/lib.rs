//! Bookshelf Authentication
//!
//! This crate provides cookie-carried JWT authentication for
//! Bookshelf: token issue/verify, argon2 password hashing, and the
//! middleware gating the book routes.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use error::AuthError;
pub use jwt::{Claims, JwtManager};
pub use middleware::{AuthUser, TOKEN_COOKIE, require_auth, token_from_cookie_header};
pub use password::{hash_password, verify_password};
