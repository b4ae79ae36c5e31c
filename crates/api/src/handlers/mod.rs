//! Request handlers.
//!
//! - [`content`] -- admin form submissions and public lists, generic over [`crate::workflow::FormKind`]
//! - [`session`] -- admin login, logout and session status

pub mod content;
pub mod session;
