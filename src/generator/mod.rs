//! # Generator Module
//!
//! Source synthesis for the Java enterprise application: one DTO per wrapped
//! entity, one JAX-RS resource class per endpoint and one REST application
//! class per module.
//!
//! ## Architecture
//!
//! Synthesis is split into a structural step and a rendering step:
//!
//! ```text
//! Metadata → build_* → CompilationUnit → SourceRenderer → Java source text
//! ```
//!
//! 1. **Build** - [`build_dto`], [`build_endpoint`] and [`build_rest_config`]
//!    produce a [`CompilationUnit`] (package, imports, one class and its
//!    members in declaration order). These are plain values, so tests can
//!    assert on class names, annotations and parameters without parsing text.
//! 2. **Render** - a [`SourceRenderer`] turns the unit into text. The bundled
//!    [`JavaRenderer`] renders members itself and lays out the file with the
//!    Askama template `templates/compilation_unit.java.txt`.
//!
//! The `synthesize_*` functions run both steps.
//!
//! ## Generated Shapes
//!
//! For module `shop`, entity `Product` and a POST endpoint backed by
//! `org.meveo.script.CreateMyProduct`:
//!
//! ```text
//! org.meveo.shop.dto.ProductDto            type + product fields, accessors, 2 constructors
//! org.meveo.shop.resource.ProductCreate    @Path(basePath) @RequestScoped, saveProduct(ProductDto)
//! org.meveo.shop.rest.ShopRestConfig       @ApplicationPath("api") extends Application
//! ```
//!
//! Class and handler names come from the verb tables in [`crate::naming`].
//! GET, PUT and DELETE handlers bind a `@PathParam` derived from the endpoint
//! sub-path; POST and PUT handlers take the DTO as request body.
//!
//! ## Example
//!
//! ```rust
//! use enterprise_gen::config::GeneratorConfig;
//! use enterprise_gen::generator::{synthesize_dto, JavaRenderer};
//!
//! let config = GeneratorConfig::default();
//! let source = synthesize_dto("Product", "shop", &config, &JavaRenderer).unwrap();
//! assert!(source.starts_with("package org.meveo.shop.dto;"));
//! assert!(source.contains("public class ProductDto {"));
//! ```

pub mod ast;
mod dto;
mod endpoint;
mod render;
mod rest_config;
mod templates;

pub use ast::CompilationUnit;
pub use dto::{build_dto, dto_class_name, dto_qualified_name, synthesize_dto, DTO_FACET};
pub use endpoint::{
    build_endpoint, synthesize_endpoint, EndpointContext, DEFAULT_PATH_PARAM, RESOURCE_FACET,
};
pub use render::{JavaRenderer, SourceRenderer};
pub use rest_config::{
    build_rest_config, rest_config_class_name, synthesize_rest_config, REST_FACET,
};
pub use templates::CompilationUnitTemplate;
