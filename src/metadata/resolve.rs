//! Turns a module code into the entities and endpoints to generate.
//!
//! Items are classified by their declared class, entities are filtered down to
//! custom entities, and every endpoint is paired with its service and payload
//! entity.

use tracing::{debug, info};

use super::types::{EndpointDescriptor, ModuleItem, ServiceDescriptor};
use super::MetadataProvider;
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, Result};

/// Classification of a module item by its declared class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    EntityTemplate,
    Endpoint,
    /// Any other item class; ignored by the generator
    Other,
}

/// An endpoint with its service and payload entity looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub endpoint: EndpointDescriptor,
    pub service: ServiceDescriptor,
    /// Entity type flowing through the service inputs, if any
    pub payload_entity: Option<String>,
}

/// Everything the synthesizers need for one module, in item order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub module_code: String,
    /// Codes of all entity-template items
    pub entity_codes: Vec<String>,
    /// Entity-template codes that are eligible custom entities
    pub eligible_entities: Vec<String>,
    pub endpoints: Vec<ResolvedEndpoint>,
}

impl ResolvedModule {
    /// True when nothing in the module can produce an artifact.
    pub fn is_empty(&self) -> bool {
        self.eligible_entities.is_empty() && self.endpoints.is_empty()
    }
}

/// Resolves a module code against a [`MetadataProvider`].
pub struct MetadataResolver<'a> {
    provider: &'a dyn MetadataProvider,
    config: &'a GeneratorConfig,
}

impl<'a> MetadataResolver<'a> {
    pub fn new(provider: &'a dyn MetadataProvider, config: &'a GeneratorConfig) -> Self {
        Self { provider, config }
    }

    /// Resolve a module.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::ModuleCodeNotSet`] when `module_code` is absent or blank
    /// - [`GenerationError::EndpointNotFound`] / [`GenerationError::ServiceNotFound`]
    ///   when an endpoint item references missing metadata
    ///
    /// A module code that does not resolve returns `Ok(None)`.
    pub fn resolve(&self, module_code: Option<&str>) -> Result<Option<ResolvedModule>> {
        let module_code = match module_code.map(str::trim) {
            Some(code) if !code.is_empty() => code,
            _ => return Err(GenerationError::ModuleCodeNotSet),
        };

        let Some(module) = self.provider.find_module(module_code)? else {
            info!(module = module_code, "module not found, nothing to generate");
            return Ok(None);
        };

        let entity_codes: Vec<String> = module
            .items
            .iter()
            .filter(|item| self.classify(item) == ItemKind::EntityTemplate)
            .map(|item| item.item_code.clone())
            .collect();
        debug!(module = module_code, ?entity_codes, "entity-template items");

        let mut eligible_entities = Vec::new();
        for code in &entity_codes {
            if self.is_eligible_entity(code)? {
                eligible_entities.push(code.clone());
            } else {
                debug!(entity = %code, "skipping entity that is not a custom entity");
            }
        }

        let mut endpoints = Vec::new();
        for item in &module.items {
            if self.classify(item) != ItemKind::Endpoint {
                continue;
            }
            endpoints.push(self.resolve_endpoint(&item.item_code)?);
        }
        debug!(
            module = module_code,
            entities = eligible_entities.len(),
            endpoints = endpoints.len(),
            "module resolved"
        );

        Ok(Some(ResolvedModule {
            module_code: module.code,
            entity_codes,
            eligible_entities,
            endpoints,
        }))
    }

    /// Match an item's declared class against the two marker classes.
    pub fn classify(&self, item: &ModuleItem) -> ItemKind {
        if item.item_class == self.config.entity_item_class {
            ItemKind::EntityTemplate
        } else if item.item_class == self.config.endpoint_item_class {
            ItemKind::Endpoint
        } else {
            ItemKind::Other
        }
    }

    /// Whether `type_name` names a known entity implementing the custom-entity capability.
    pub fn is_eligible_entity(&self, type_name: &str) -> Result<bool> {
        Ok(self
            .provider
            .find_entity_type(type_name)?
            .is_some_and(|entity| entity.is_custom_entity()))
    }

    /// Scan the service inputs for an eligible entity type.
    ///
    /// Every input is visited and the last eligible one wins.
    pub fn payload_entity(&self, service: &ServiceDescriptor) -> Result<Option<String>> {
        let mut payload = None;
        for input in &service.inputs {
            if self.is_eligible_entity(&input.type_name)? {
                payload = Some(input.type_name.clone());
            }
        }
        Ok(payload)
    }

    fn resolve_endpoint(&self, code: &str) -> Result<ResolvedEndpoint> {
        let endpoint = self
            .provider
            .find_endpoint(code)?
            .ok_or_else(|| GenerationError::EndpointNotFound(code.to_string()))?;
        let service = self
            .provider
            .find_service(&endpoint.service)?
            .ok_or_else(|| GenerationError::ServiceNotFound(endpoint.service.clone()))?;
        let payload_entity = self.payload_entity(&service)?;
        Ok(ResolvedEndpoint {
            endpoint,
            service,
            payload_entity,
        })
    }
}
