//! DTO synthesis: one `<Entity>Dto` wrapping the entity and a `type` tag.

use super::ast::{
    ClassDecl, CompilationUnit, ConstructorDecl, Expr, FieldDecl, Import, Member, MethodDecl,
    Param, Stmt, Visibility,
};
use super::render::SourceRenderer;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::naming::{capitalize, decapitalize};

/// Facet (package segment and directory) DTOs are generated into.
pub const DTO_FACET: &str = "dto";

/// Name of the discriminator field every DTO carries next to its entity.
const TYPE_FIELD: &str = "type";

/// `Product` becomes `ProductDto`.
pub fn dto_class_name(entity: &str) -> String {
    format!("{entity}Dto")
}

/// Fully-qualified DTO class for an entity within a module.
pub fn dto_qualified_name(entity: &str, module_code: &str, config: &GeneratorConfig) -> String {
    format!(
        "{}.{}",
        config.module_package(module_code, DTO_FACET),
        dto_class_name(entity)
    )
}

/// Build the DTO wrapping `entity`.
///
/// Members, in order: the `type` field, the entity field, their accessor
/// pairs, a no-arg constructor and an all-args constructor taking the entity
/// first.
pub fn build_dto(entity: &str, module_code: &str, config: &GeneratorConfig) -> CompilationUnit {
    let entity_field = FieldDecl::private(entity, decapitalize(entity));
    let type_field = FieldDecl::private("String", TYPE_FIELD);

    let mut class = ClassDecl::new(dto_class_name(entity));
    class.members.push(Member::Field(type_field.clone()));
    class.members.push(Member::Field(entity_field.clone()));
    class.members.push(Member::Method(getter(&type_field)));
    class.members.push(Member::Method(setter(&type_field)));
    class.members.push(Member::Method(getter(&entity_field)));
    class.members.push(Member::Method(setter(&entity_field)));
    class.members.push(Member::Constructor(ConstructorDecl {
        visibility: Visibility::Public,
        params: Vec::new(),
        body: Vec::new(),
    }));
    class.members.push(Member::Constructor(ConstructorDecl {
        visibility: Visibility::Public,
        params: vec![
            Param::new(&entity_field.ty, &entity_field.name),
            Param::new(&type_field.ty, &type_field.name),
        ],
        body: vec![assign_this(&entity_field.name), assign_this(&type_field.name)],
    }));

    CompilationUnit {
        package: config.module_package(module_code, DTO_FACET),
        imports: vec![Import::single(format!("{}.{entity}", config.entity_package))],
        class,
    }
}

/// Build and render the DTO wrapping `entity`.
pub fn synthesize_dto(
    entity: &str,
    module_code: &str,
    config: &GeneratorConfig,
    renderer: &dyn SourceRenderer,
) -> Result<String> {
    renderer.render(&build_dto(entity, module_code, config))
}

fn getter(field: &FieldDecl) -> MethodDecl {
    let mut method = MethodDecl::public(&field.ty, format!("get{}", capitalize(&field.name)));
    method.body.push(Stmt::Return(Expr::name(&field.name)));
    method
}

fn setter(field: &FieldDecl) -> MethodDecl {
    let mut method = MethodDecl::public("void", format!("set{}", capitalize(&field.name)));
    method.params.push(Param::new(&field.ty, &field.name));
    method.body.push(assign_this(&field.name));
    method
}

/// `this.name = name;`
fn assign_this(name: &str) -> Stmt {
    Stmt::Assign {
        target: Expr::this_field(name),
        value: Expr::name(name),
    }
}
