use super::ast::{Annotation, ClassDecl, CompilationUnit, Expr, Import};
use super::render::SourceRenderer;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::naming::capitalize;

/// Facet (package segment and directory) of the application class.
pub const REST_FACET: &str = "rest";

/// `shop` becomes `ShopRestConfig`.
pub fn rest_config_class_name(module_code: &str) -> String {
    format!("{}RestConfig", capitalize(module_code))
}

/// Build the JAX-RS application class that mounts the module's resources
/// under [`GeneratorConfig::application_path`].
pub fn build_rest_config(module_code: &str, config: &GeneratorConfig) -> CompilationUnit {
    let mut class = ClassDecl::new(rest_config_class_name(module_code));
    class.annotations.push(Annotation::single(
        "ApplicationPath",
        Expr::string(&config.application_path),
    ));
    class.extends = Some("Application".to_string());

    CompilationUnit {
        package: config.module_package(module_code, REST_FACET),
        imports: vec![
            Import::single("javax.ws.rs.ApplicationPath"),
            Import::single("javax.ws.rs.core.Application"),
        ],
        class,
    }
}

pub fn synthesize_rest_config(
    module_code: &str,
    config: &GeneratorConfig,
    renderer: &dyn SourceRenderer,
) -> Result<String> {
    renderer.render(&build_rest_config(module_code, config))
}
