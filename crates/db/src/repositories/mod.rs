//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Nothing is ever deleted.

pub mod impact_repo;
pub mod resource_repo;
pub mod service_repo;
pub mod support_repo;

pub use impact_repo::ImpactRepo;
pub use resource_repo::ResourceRepo;
pub use service_repo::ServiceRepo;
pub use support_repo::SupportRepo;
