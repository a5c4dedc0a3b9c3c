//! # enterprise-gen
//!
//! **enterprise-gen** generates the Java enterprise (JAX-RS) REST layer of a
//! platform module from its metadata: one DTO per custom entity, one resource
//! class per HTTP endpoint and a REST application class, written into the
//! module's git working tree and committed once.
//!
//! ## Architecture
//!
//! - **[`naming`]** - verb tables and identifier transformations shared by all synthesizers
//! - **[`metadata`]** - descriptors, the [`MetadataProvider`](metadata::MetadataProvider)
//!   lookup trait and the module resolver
//! - **[`generator`]** - structural Java representation, synthesizers and the renderer
//! - **[`publisher`]** - version control, working-tree writes and template asset copy
//! - **[`application`]** - the generation entry point tying the above together
//! - **[`config`]** - run configuration (TOML + environment)
//! - **[`logging`]** - `tracing` subscriber setup for the binary
//! - **[`cli`]** - the `enterprise-gen` command line
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(enterprise-gen)
//!     participant App as application::ApplicationGenerator
//!     participant Resolver as metadata::MetadataResolver
//!     participant Gen as generator
//!     participant Pub as publisher::ArtifactPublisher
//!     participant VCS as VersionControl
//!
//!     CLI->>App: generate(module_code)
//!     App->>Resolver: resolve(module_code)
//!     Resolver-->>App: ResolvedModule (entities, endpoints, payloads)
//!     App->>Gen: build_dto / build_endpoint / build_rest_config
//!     Gen-->>App: CompilationUnit → rendered source
//!     App->>Pub: publish(artifacts, support)
//!     Pub->>VCS: ensure template repo, ensure module repo
//!     Pub->>VCS: checkout module branch
//!     Pub->>Pub: write artifacts, copy template assets
//!     Pub->>VCS: commit (once)
//!     App-->>CLI: GenerationReport
//! ```
//!
//! ## Example
//!
//! ```rust
//! use enterprise_gen::application::ApplicationGenerator;
//! use enterprise_gen::config::GeneratorConfig;
//! use enterprise_gen::metadata::{
//!     EndpointDescriptor, EntityDescriptor, FunctionInput, MetadataStore, ModuleDescriptor,
//!     ModuleItem, ServiceDescriptor,
//! };
//!
//! let config = GeneratorConfig::default();
//! let store = MetadataStore::new()
//!     .with_module(ModuleDescriptor {
//!         code: "shop".into(),
//!         items: vec![ModuleItem::new(&config.endpoint_item_class, "createProduct")],
//!     })
//!     .with_endpoint(EndpointDescriptor {
//!         code: "createProduct".into(),
//!         method: "POST".into(),
//!         base_path: "product".into(),
//!         path: String::new(),
//!         service: "org.meveo.script.CreateMyProduct".into(),
//!     })
//!     .with_service(ServiceDescriptor {
//!         code: "org.meveo.script.CreateMyProduct".into(),
//!         inputs: vec![FunctionInput { name: "product".into(), type_name: "Product".into() }],
//!     })
//!     .with_entity(EntityDescriptor { name: "Product".into(), custom_entity: true });
//!
//! let plan = ApplicationGenerator::new(&config, &store)
//!     .plan(Some("shop"))
//!     .unwrap()
//!     .unwrap();
//! let classes: Vec<_> = plan.all_artifacts().map(|a| a.class_name.as_str()).collect();
//! assert_eq!(classes, ["ProductDto", "ProductCreate", "ShopRestConfig"]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod metadata;
pub mod naming;
pub mod publisher;

pub use application::{ApplicationGenerator, GenerationPlan, GenerationReport};
pub use config::GeneratorConfig;
pub use error::{GenerationError, Result};
