//! # Generator Configuration
//!
//! Everything that used to be a fixed constant of the generation run (template
//! repository, branch names, package roots, marker classes, asset names) lives
//! in [`GeneratorConfig`] and is passed to the entry point explicitly.
//!
//! ## Sources
//!
//! 1. Built-in defaults ([`GeneratorConfig::default`])
//! 2. An optional TOML file ([`GeneratorConfig::load`]); missing keys keep their defaults
//! 3. Environment overrides ([`GeneratorConfig::apply_env_overrides`])
//!
//! ## Environment Variables
//!
//! - `ENTGEN_TEMPLATE_REMOTE` - remote URL of the template repository
//! - `ENTGEN_MODULE_BRANCH` - branch the module repository is generated on
//!
//! ## Example
//!
//! ```toml
//! base_package = "com.acme"
//! module_branch = "generated"
//! template_assets = ["CustomEndpointResource.java", "beans.xml", "web.xml"]
//! ```

use crate::error::{GenerationError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Name of the repository holding the auxiliary template files
    pub template_repository: String,
    /// Remote the template repository is cloned from when absent
    pub template_remote: String,
    /// Branch of the module repository that receives generated files
    pub module_branch: String,
    /// Directory, relative to the module working tree, holding Java sources
    pub facet_root: String,
    /// Package prefix; module packages are `<base_package>.<module>.<facet>`
    pub base_package: String,
    /// Package the custom entity classes are imported from
    pub entity_package: String,
    /// Fully-qualified base class every generated resource extends
    pub base_resource_class: String,
    /// Fully-qualified exception caught by generated handlers
    pub business_exception_class: String,
    /// Value of `@ApplicationPath` on the REST configuration class
    pub application_path: String,
    /// Module item class marking entity-template items
    pub entity_item_class: String,
    /// Module item class marking endpoint items
    pub endpoint_item_class: String,
    /// File names copied verbatim from the template working tree
    pub template_assets: Vec<String>,
    /// Message of the single commit issued per run
    pub commit_message: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_repository: "JavaEnterpriseApp".to_string(),
            template_remote: "https://github.com/masumcse1/mv-template.git".to_string(),
            module_branch: "meveo".to_string(),
            facet_root: "facets/java".to_string(),
            base_package: "org.meveo".to_string(),
            entity_package: "org.meveo.model.customEntities".to_string(),
            base_resource_class: "org.meveo.base.CustomEndpointResource".to_string(),
            business_exception_class: "org.meveo.admin.exception.BusinessException".to_string(),
            application_path: "api".to_string(),
            entity_item_class: "org.meveo.model.customEntities.CustomEntityTemplate".to_string(),
            endpoint_item_class: "org.meveo.model.technicalservice.endpoint.Endpoint".to_string(),
            template_assets: vec![
                "CustomEndpointResource.java".to_string(),
                "beans.xml".to_string(),
            ],
            commit_message: "DTO & Endpoint generation.".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file is not an error: defaults are returned. A file that exists
    /// but cannot be parsed is a [`GenerationError::Config`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents =
            std::fs::read_to_string(path).map_err(|e| GenerationError::io(path, e))?;
        Self::from_toml(&contents)
            .map_err(|e| GenerationError::Config(format!("{}: {e}", path.display())))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Serialize to pretty TOML (used by `init-config`).
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GenerationError::Config(e.to_string()))
    }

    /// Apply `ENTGEN_*` environment overrides in place.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(remote) = env::var("ENTGEN_TEMPLATE_REMOTE") {
            if !remote.trim().is_empty() {
                self.template_remote = remote;
            }
        }
        if let Ok(branch) = env::var("ENTGEN_MODULE_BRANCH") {
            if !branch.trim().is_empty() {
                self.module_branch = branch;
            }
        }
    }

    /// Java package for one facet (`rest`, `dto`, `resource`) of a module.
    pub fn module_package(&self, module_code: &str, facet: &str) -> String {
        format!("{}.{module_code}.{facet}", self.base_package)
    }

    /// Simple name of the base resource class.
    pub fn base_resource_simple_name(&self) -> &str {
        crate::naming::service_short_name(&self.base_resource_class)
    }

    /// Simple name of the business exception class.
    pub fn business_exception_simple_name(&self) -> &str {
        crate::naming::service_short_name(&self.business_exception_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GeneratorConfig::from_toml("module_branch = \"generated\"\n").unwrap();
        assert_eq!(config.module_branch, "generated");
        assert_eq!(config.base_package, "org.meveo");
        assert_eq!(config.template_assets.len(), 2);
    }

    #[test]
    fn test_round_trip_defaults() {
        let text = GeneratorConfig::default().to_toml().unwrap();
        let parsed = GeneratorConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, GeneratorConfig::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = GeneratorConfig::load(Path::new("/nonexistent/entgen.toml")).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entgen.toml");
        std::fs::write(&path, "module_branch = [").unwrap();
        let err = GeneratorConfig::load(&path).unwrap_err();
        assert!(matches!(err, GenerationError::Config(_)));
    }

    #[test]
    fn test_module_package() {
        let config = GeneratorConfig::default();
        assert_eq!(config.module_package("shop", "dto"), "org.meveo.shop.dto");
        assert_eq!(config.base_resource_simple_name(), "CustomEndpointResource");
    }
}
