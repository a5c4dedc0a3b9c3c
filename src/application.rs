//! # Application Generator
//!
//! Entry point of a generation run. Given a module code it resolves the
//! module's metadata, synthesizes every artifact in memory and then hands the
//! result to an [`ArtifactPublisher`].
//!
//! Synthesis finishes before the first write, so an unsupported HTTP verb or a
//! missing payload entity anywhere in the module aborts the run with the
//! working tree and version control untouched.
//!
//! ## Enumeration Order
//!
//! 1. One DTO per entity-template item that is a custom entity, in item order
//! 2. Per endpoint item, in item order: a DTO for its payload entity if none was
//!    generated yet, then the endpoint's resource class
//!
//! The REST configuration class is a support file and is only produced when
//! the list above is non-empty.
//!
//! Resource class names depend only on the payload entity and the verb, so two
//! endpoints sharing both would write the same file. Planning rejects that with
//! [`GenerationError::DuplicateResourceClass`] before anything is written.

use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::error::{GenerationError, Result};
use crate::generator::{
    build_dto, build_endpoint, build_rest_config, EndpointContext, JavaRenderer, SourceRenderer,
};
use crate::metadata::{MetadataProvider, MetadataResolver, ResolvedModule};
use crate::publisher::{ArtifactKind, ArtifactLayout, ArtifactPublisher, GeneratedArtifact};

static JAVA_RENDERER: JavaRenderer = JavaRenderer;

/// Every artifact of one module, synthesized but not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub module_code: String,
    /// DTO and endpoint artifacts in enumeration order
    pub artifacts: Vec<GeneratedArtifact>,
    /// Present only when `artifacts` is non-empty
    pub rest_config: Option<GeneratedArtifact>,
}

impl GenerationPlan {
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Artifacts followed by the REST configuration, in write order.
    pub fn all_artifacts(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts.iter().chain(self.rest_config.iter())
    }
}

/// Outcome of a completed generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub module_code: String,
    pub artifacts: Vec<GeneratedArtifact>,
    /// REST configuration and copied template assets, relative to the module tree
    pub support_files: Vec<std::path::PathBuf>,
    /// Whether the single commit was issued
    pub committed: bool,
}

/// Generates the Java enterprise application of a module.
pub struct ApplicationGenerator<'a> {
    config: &'a GeneratorConfig,
    metadata: &'a dyn MetadataProvider,
    renderer: &'a dyn SourceRenderer,
}

impl<'a> ApplicationGenerator<'a> {
    /// Generator rendering Java with [`JavaRenderer`].
    pub fn new(config: &'a GeneratorConfig, metadata: &'a dyn MetadataProvider) -> Self {
        Self {
            config,
            metadata,
            renderer: &JAVA_RENDERER,
        }
    }

    pub fn with_renderer(mut self, renderer: &'a dyn SourceRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Resolve and synthesize without touching the filesystem.
    ///
    /// Returns `Ok(None)` when the module does not exist.
    pub fn plan(&self, module_code: Option<&str>) -> Result<Option<GenerationPlan>> {
        let resolver = MetadataResolver::new(self.metadata, self.config);
        let Some(module) = resolver.resolve(module_code)? else {
            return Ok(None);
        };
        if module.is_empty() {
            warn!(module = %module.module_code, "module has no eligible entities or endpoints");
        }
        self.plan_resolved(&module).map(Some)
    }

    /// Synthesize the artifacts of an already resolved module.
    pub fn plan_resolved(&self, module: &ResolvedModule) -> Result<GenerationPlan> {
        let module_code = module.module_code.as_str();
        let layout = ArtifactLayout::new(self.config, self.renderer.extension());
        let mut artifacts = Vec::new();
        let mut dto_done: HashSet<&str> = HashSet::new();
        let mut resource_owners: HashMap<String, &str> = HashMap::new();

        for entity in &module.eligible_entities {
            if dto_done.insert(entity.as_str()) {
                artifacts.push(self.dto_artifact(&layout, entity, module_code)?);
            }
        }

        for resolved in &module.endpoints {
            if let Some(entity) = resolved.payload_entity.as_deref() {
                if dto_done.insert(entity) {
                    artifacts.push(self.dto_artifact(&layout, entity, module_code)?);
                }
            }
            let ctx = EndpointContext::new(
                &resolved.endpoint,
                resolved.payload_entity.as_deref(),
                module_code,
            );
            let unit = build_endpoint(&ctx, self.config)?;
            let code = resolved.endpoint.code.as_str();
            if let Some(first) = resource_owners.insert(unit.class.name.clone(), code) {
                return Err(GenerationError::DuplicateResourceClass {
                    class_name: unit.class.name,
                    first: first.to_string(),
                    second: code.to_string(),
                });
            }
            let content = self.renderer.render(&unit)?;
            artifacts.push(layout.artifact(module_code, ArtifactKind::Endpoint, unit.class.name, content));
        }

        let rest_config = if artifacts.is_empty() {
            None
        } else {
            let unit = build_rest_config(module_code, self.config);
            let content = self.renderer.render(&unit)?;
            Some(layout.artifact(module_code, ArtifactKind::RestConfig, unit.class.name, content))
        };

        Ok(GenerationPlan {
            module_code: module_code.to_string(),
            artifacts,
            rest_config,
        })
    }

    /// Run one generation: plan, write and commit.
    ///
    /// Returns `Ok(None)` when the module does not exist. A module without
    /// eligible items yields a report with no artifacts and `committed == false`.
    pub fn generate(
        &self,
        module_code: Option<&str>,
        publisher: &ArtifactPublisher<'_>,
    ) -> Result<Option<GenerationReport>> {
        let Some(plan) = self.plan(module_code)? else {
            return Ok(None);
        };
        info!(
            module = %plan.module_code,
            artifacts = plan.artifacts.len(),
            "generating enterprise application"
        );

        let support: Vec<GeneratedArtifact> = plan.rest_config.iter().cloned().collect();
        let outcome = publisher.publish(&plan.module_code, &plan.artifacts, &support)?;

        Ok(Some(GenerationReport {
            module_code: plan.module_code,
            artifacts: plan.artifacts,
            support_files: outcome.support_files,
            committed: outcome.committed,
        }))
    }

    fn dto_artifact(
        &self,
        layout: &ArtifactLayout<'_>,
        entity: &str,
        module_code: &str,
    ) -> Result<GeneratedArtifact> {
        let unit = build_dto(entity, module_code, self.config);
        let content = self.renderer.render(&unit)?;
        Ok(layout.artifact(module_code, ArtifactKind::Dto, unit.class.name, content))
    }
}
