//! # Metadata Module
//!
//! Read-only view of the platform metadata the generator works from: modules,
//! endpoints, services and entity types.
//!
//! ## Overview
//!
//! - **[`types`]** - plain descriptors for modules, endpoints, services and entities
//! - **[`MetadataProvider`]** - the lookup interface the generator consumes
//! - **[`resolve`]** - turns a module code into the entity and endpoint set to generate
//! - **[`store`]** - an in-memory provider loaded from YAML or JSON
//!
//! Lookups that miss return `Ok(None)`. Whether a miss is an error is decided
//! by the caller: a missing module is a no-op, a missing endpoint referenced by
//! a module is [`GenerationError::EndpointNotFound`](crate::error::GenerationError).

mod resolve;
mod store;
pub mod types;

pub use resolve::{ItemKind, MetadataResolver, ResolvedEndpoint, ResolvedModule};
pub use store::{load_metadata, MetadataStore};
pub use types::*;

use crate::error::Result;

/// Lookup interface over the metadata store.
///
/// Implementations may block on I/O; the generator calls them sequentially.
pub trait MetadataProvider {
    fn find_module(&self, code: &str) -> Result<Option<ModuleDescriptor>>;

    fn find_endpoint(&self, code: &str) -> Result<Option<EndpointDescriptor>>;

    fn find_service(&self, code: &str) -> Result<Option<ServiceDescriptor>>;

    /// Absence means "not an eligible entity", never an error.
    fn find_entity_type(&self, name: &str) -> Result<Option<EntityDescriptor>>;
}
