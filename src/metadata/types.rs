//! Metadata descriptors as read from the platform.

use serde::{Deserialize, Serialize};

/// One entry of a module: its declared class and code.
///
/// Used only as a filter key by the resolver; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleItem {
    pub item_class: String,
    pub item_code: String,
}

impl ModuleItem {
    pub fn new(item_class: impl Into<String>, item_code: impl Into<String>) -> Self {
        Self {
            item_class: item_class.into(),
            item_code: item_code.into(),
        }
    }
}

/// A deployable unit and its ordered items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub code: String,
    #[serde(default)]
    pub items: Vec<ModuleItem>,
}

/// A named custom entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub name: String,
    /// Whether the type implements the custom-entity capability
    #[serde(default)]
    pub custom_entity: bool,
}

impl EntityDescriptor {
    /// Only custom entities may be wrapped in a DTO.
    pub fn is_custom_entity(&self) -> bool {
        self.custom_entity
    }
}

/// An HTTP operation bound to a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub code: String,
    /// Method label as declared (validated at synthesis time)
    pub method: String,
    pub base_path: String,
    /// Sub-path, e.g. `/{uuid}`
    #[serde(default)]
    pub path: String,
    /// Fully-qualified service identifier
    pub service: String,
}

/// A declared input parameter of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInput {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A business-logic unit invoked by generated handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Fully-qualified service identifier, e.g. `org.meveo.script.CreateMyProduct`
    pub code: String,
    #[serde(default)]
    pub inputs: Vec<FunctionInput>,
}
