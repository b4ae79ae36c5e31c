//! Domain model structs and insert payloads.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `New*` payload carrying validated, trimmed field values
//!
//! Entities serialize with camelCase keys, the shape the public pages read.

pub mod impact;
pub mod resource;
pub mod service;
pub mod support;

use outreach_core::content::Collection;
use outreach_core::types::DbId;
use serde::Serialize;

pub use impact::{ImpactRow, ImpactStory, NewImpact};
pub use resource::{NewResource, Resource};
pub use service::{NewService, Service};
pub use support::{NewSupport, SupportCase};

/// A persisted record from any collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Service(Service),
    Impact(ImpactStory),
    Support(SupportCase),
    Resource(Resource),
}

impl Record {
    pub fn id(&self) -> DbId {
        match self {
            Self::Service(r) => r.id,
            Self::Impact(r) => r.id,
            Self::Support(r) => r.id,
            Self::Resource(r) => r.id,
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            Self::Service(_) => Collection::Services,
            Self::Impact(_) => Collection::Impact,
            Self::Support(_) => Collection::Support,
            Self::Resource(_) => Collection::Resources,
        }
    }
}

/// Field values for a create or update mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum NewRecord {
    Service(NewService),
    Impact(NewImpact),
    Support(NewSupport),
    Resource(NewResource),
}

impl NewRecord {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Service(_) => Collection::Services,
            Self::Impact(_) => Collection::Impact,
            Self::Support(_) => Collection::Support,
            Self::Resource(_) => Collection::Resources,
        }
    }
}
