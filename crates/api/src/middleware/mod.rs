//! Admin session extractor and the admin page gate.
//!
//! - [`session::AdminSession`] -- requires a valid session on admin API calls.
//! - [`gate::admin_gate`] -- redirects admin page requests without a session.

pub mod gate;
pub mod session;
