//! In-memory [`MetadataProvider`] loaded from YAML or JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::types::{EndpointDescriptor, EntityDescriptor, ModuleDescriptor, ServiceDescriptor};
use super::MetadataProvider;
use crate::error::{GenerationError, Result};

/// In-memory metadata, loadable from a YAML or JSON document.
///
/// ```yaml
/// modules:
///   - code: shop
///     items:
///       - item_class: org.meveo.model.customEntities.CustomEntityTemplate
///         item_code: Product
/// endpoints:
///   - code: createProduct
///     method: POST
///     base_path: product
///     service: org.meveo.script.CreateMyProduct
/// services:
///   - code: org.meveo.script.CreateMyProduct
///     inputs:
///       - { name: product, type: Product }
/// entities:
///   - { name: Product, custom_entity: true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataStore {
    pub modules: Vec<ModuleDescriptor>,
    pub endpoints: Vec<EndpointDescriptor>,
    pub services: Vec<ServiceDescriptor>,
    pub entities: Vec<EntityDescriptor>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module: ModuleDescriptor) -> Self {
        self.modules.push(module);
        self
    }

    pub fn with_endpoint(mut self, endpoint: EndpointDescriptor) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn with_service(mut self, service: ServiceDescriptor) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_entity(mut self, entity: EntityDescriptor) -> Self {
        self.entities.push(entity);
        self
    }
}

impl MetadataProvider for MetadataStore {
    fn find_module(&self, code: &str) -> Result<Option<ModuleDescriptor>> {
        Ok(self.modules.iter().find(|m| m.code == code).cloned())
    }

    fn find_endpoint(&self, code: &str) -> Result<Option<EndpointDescriptor>> {
        Ok(self.endpoints.iter().find(|e| e.code == code).cloned())
    }

    fn find_service(&self, code: &str) -> Result<Option<ServiceDescriptor>> {
        Ok(self.services.iter().find(|s| s.code == code).cloned())
    }

    fn find_entity_type(&self, name: &str) -> Result<Option<EntityDescriptor>> {
        Ok(self.entities.iter().find(|e| e.name == name).cloned())
    }
}

/// Load a [`MetadataStore`] from disk.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else as JSON.
pub fn load_metadata(path: &Path) -> Result<MetadataStore> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| GenerationError::Metadata(format!("{}: {e}", path.display())))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yaml" || ext == "yml");
    let store = if is_yaml {
        serde_yaml::from_str(&content)
            .map_err(|e| GenerationError::Metadata(format!("{}: {e}", path.display())))?
    } else {
        serde_json::from_str(&content)
            .map_err(|e| GenerationError::Metadata(format!("{}: {e}", path.display())))?
    };
    Ok(store)
}
