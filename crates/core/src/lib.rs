//! Domain types and pure logic for the outreach content service.
//!
//! Nothing in this crate performs I/O. Persistence lives in `outreach-db`,
//! blob storage in `outreach-cloud`, and HTTP in `outreach-api`.

pub mod content;
pub mod error;
pub mod gate;
pub mod types;
pub mod upload;
