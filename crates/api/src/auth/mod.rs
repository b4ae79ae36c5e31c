//! Admin authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token generation and validation.
//! - [`session`] -- the session cookie that carries the token.

pub mod jwt;
pub mod password;
pub mod session;
