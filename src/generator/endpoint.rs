//! JAX-RS resource class synthesis.
//!
//! The verb decides the handler shape:
//!
//! | Verb   | Request body | `@PathParam` | Method-level `@Path` |
//! |--------|--------------|--------------|----------------------|
//! | POST   | DTO          | no           | no                   |
//! | GET    | no           | yes          | yes                  |
//! | PUT    | DTO          | yes          | yes                  |
//! | DELETE | no           | yes          | yes                  |

use super::ast::{
    Annotation, CatchClause, ClassDecl, CompilationUnit, Expr, FieldDecl, Import, Member,
    MethodDecl, Param, Stmt,
};
use super::dto::{dto_class_name, dto_qualified_name};
use super::render::SourceRenderer;
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, Result};
use crate::metadata::EndpointDescriptor;
use crate::naming::{
    capitalize, decapitalize, decapitalize_with_prefix, path_param_name, rest_class_name,
    rest_method_name, service_short_name, to_identifier, HttpVerb,
};

/// Facet (package segment and directory) resource classes are generated into.
pub const RESOURCE_FACET: &str = "resource";

/// Path identifier used when the sub-path names none.
pub const DEFAULT_PATH_PARAM: &str = "uuid";

const RESULT_VAR: &str = "result";
const PARAMETER_MAP: &str = "parameterMap";
const MEDIA_TYPE_JSON: &str = "MediaType.APPLICATION_JSON";

/// Inputs for one endpoint class.
#[derive(Debug, Clone, Copy)]
pub struct EndpointContext<'a> {
    pub endpoint: &'a EndpointDescriptor,
    /// Entity type carried by the request body, resolved from the service inputs
    pub payload_entity: Option<&'a str>,
    pub module_code: &'a str,
}

impl<'a> EndpointContext<'a> {
    pub fn new(
        endpoint: &'a EndpointDescriptor,
        payload_entity: Option<&'a str>,
        module_code: &'a str,
    ) -> Self {
        Self {
            endpoint,
            payload_entity,
            module_code,
        }
    }

    /// Name the class and handler are derived from: the payload entity when
    /// there is one, otherwise the endpoint code.
    pub fn subject(&self) -> String {
        match self.payload_entity {
            Some(entity) => entity.to_string(),
            None => capitalize(&to_identifier(&self.endpoint.code)),
        }
    }

    pub fn verb(&self) -> Result<HttpVerb> {
        HttpVerb::parse(&self.endpoint.method).ok_or_else(|| self.unsupported_method())
    }

    /// Resource class name, e.g. `ProductCreate`.
    pub fn class_name(&self) -> Result<String> {
        rest_class_name(&self.subject(), &self.endpoint.method)
            .ok_or_else(|| self.unsupported_method())
    }

    /// Handler method name, e.g. `saveProduct`.
    pub fn method_name(&self) -> Result<String> {
        rest_method_name(&self.subject(), &self.endpoint.method)
            .ok_or_else(|| self.unsupported_method())
    }

    /// Name of the `@PathParam` bound by GET, PUT and DELETE handlers.
    pub fn path_param(&self) -> String {
        let name = path_param_name(&self.endpoint.path);
        if name.is_empty() {
            DEFAULT_PATH_PARAM.to_string()
        } else {
            name
        }
    }

    /// Value of the method-level `@Path`; falls back to `/{uuid}` for an empty sub-path.
    fn sub_path(&self) -> String {
        if path_param_name(&self.endpoint.path).is_empty() {
            format!("/{{{DEFAULT_PATH_PARAM}}}")
        } else {
            self.endpoint.path.clone()
        }
    }

    fn unsupported_method(&self) -> GenerationError {
        GenerationError::UnsupportedHttpMethod {
            endpoint: self.endpoint.code.clone(),
            method: self.endpoint.method.clone(),
        }
    }
}

/// Build the JAX-RS resource class for one endpoint.
///
/// # Errors
///
/// - [`GenerationError::UnsupportedHttpMethod`] for a verb outside GET/POST/PUT/DELETE
/// - [`GenerationError::MissingPayloadEntity`] for POST or PUT without a payload entity
pub fn build_endpoint(ctx: &EndpointContext<'_>, config: &GeneratorConfig) -> Result<CompilationUnit> {
    let verb = ctx.verb()?;
    let payload = if verb.carries_payload() {
        let entity = ctx
            .payload_entity
            .ok_or_else(|| GenerationError::MissingPayloadEntity {
                endpoint: ctx.endpoint.code.clone(),
                method: verb.as_str().to_string(),
            })?;
        Some(Payload::new(entity))
    } else {
        None
    };
    let path_param = verb.carries_path_id().then(|| ctx.path_param());

    let service_class = service_short_name(&ctx.endpoint.service);
    let service_field = decapitalize_with_prefix(service_class);

    let mut imports = vec![
        Import::wildcard("java.io"),
        Import::wildcard("java.util"),
        Import::wildcard("javax.ws.rs"),
        Import::wildcard("javax.ws.rs.core"),
        Import::single("javax.enterprise.context.RequestScoped"),
        Import::single("javax.inject.Inject"),
        Import::single(&config.business_exception_class),
        Import::single(&config.base_resource_class),
    ];
    if let Some(payload) = &payload {
        imports.push(Import::single(dto_qualified_name(
            &payload.entity,
            ctx.module_code,
            config,
        )));
    }
    imports.push(Import::single(&ctx.endpoint.service));

    let mut class = ClassDecl::new(ctx.class_name()?);
    class.annotations = vec![
        Annotation::single("Path", Expr::string(&ctx.endpoint.base_path)),
        Annotation::marker("RequestScoped"),
    ];
    class.extends = Some(config.base_resource_simple_name().to_string());

    let mut injected = FieldDecl::private(service_class, &service_field);
    injected.annotations.push(Annotation::marker("Inject"));
    class.members.push(Member::Field(injected));

    let mut handler = MethodDecl::public("Response", ctx.method_name()?);
    handler.annotations.push(Annotation::marker(verb.as_str()));
    if path_param.is_some() {
        handler
            .annotations
            .push(Annotation::single("Path", Expr::string(ctx.sub_path())));
    }
    handler
        .annotations
        .push(Annotation::single("Produces", Expr::name(MEDIA_TYPE_JSON)));
    handler
        .annotations
        .push(Annotation::single("Consumes", Expr::name(MEDIA_TYPE_JSON)));

    if let Some(payload) = &payload {
        handler
            .params
            .push(Param::new(&payload.dto_class, &payload.dto_var));
    }
    if let Some(id) = &path_param {
        let mut param = Param::new("String", id);
        param
            .annotations
            .push(Annotation::single("PathParam", Expr::string(id)));
        handler.params.push(param);
    }

    handler.body = handler_body(
        &service_field,
        payload.as_ref(),
        path_param.as_deref(),
        config.business_exception_simple_name(),
    );
    class.members.push(Member::Method(handler));

    Ok(CompilationUnit {
        package: config.module_package(ctx.module_code, RESOURCE_FACET),
        imports,
        class,
    })
}

/// Build and render the resource class for one endpoint.
pub fn synthesize_endpoint(
    ctx: &EndpointContext<'_>,
    config: &GeneratorConfig,
    renderer: &dyn SourceRenderer,
) -> Result<String> {
    renderer.render(&build_endpoint(ctx, config)?)
}

/// Names derived from the payload entity.
struct Payload {
    entity: String,
    dto_class: String,
    dto_var: String,
}

impl Payload {
    fn new(entity: &str) -> Self {
        let dto_class = dto_class_name(entity);
        Self {
            entity: entity.to_string(),
            dto_var: decapitalize(&dto_class),
            dto_class,
        }
    }

    /// `productDto.getProduct()`
    fn entity_from_dto(&self) -> Expr {
        Expr::call(
            Expr::name(&self.dto_var),
            format!("get{}", capitalize(&self.entity)),
            vec![],
        )
    }
}

fn handler_body(
    service_field: &str,
    payload: Option<&Payload>,
    path_param: Option<&str>,
    exception_class: &str,
) -> Vec<Stmt> {
    let put_param = |key: &str, value: Expr| {
        Stmt::Expr(Expr::call(
            Expr::name(PARAMETER_MAP),
            "put",
            vec![Expr::string(key), value],
        ))
    };
    let on_service = |method: &str, args: Vec<Expr>| {
        Stmt::Expr(Expr::call(Expr::name(service_field), method, args))
    };

    let mut body = vec![
        Stmt::LocalVar {
            ty: "String".to_string(),
            name: RESULT_VAR.to_string(),
            init: Expr::Null,
        },
        Stmt::Assign {
            target: Expr::name(PARAMETER_MAP),
            value: Expr::New {
                ty: "HashMap<String, Object>".to_string(),
                args: vec![],
            },
        },
    ];
    if let Some(payload) = payload {
        body.push(put_param(&decapitalize(&payload.entity), payload.entity_from_dto()));
        body.push(put_param(
            "type",
            Expr::call(Expr::name(&payload.dto_var), "getType", vec![]),
        ));
    }
    if let Some(id) = path_param {
        body.push(put_param(id, Expr::name(id)));
    }
    body.push(Stmt::Expr(Expr::call_local("setRequestResponse", vec![])));

    let mut guarded = Vec::new();
    if let Some(payload) = payload {
        guarded.push(on_service(
            &format!("set{}", capitalize(&payload.entity)),
            vec![payload.entity_from_dto()],
        ));
    }
    if let Some(id) = path_param {
        guarded.push(on_service(
            &format!("set{}", capitalize(id)),
            vec![Expr::name(id)],
        ));
    }
    for phase in ["init", "execute", "finalize"] {
        guarded.push(on_service(phase, vec![Expr::name(PARAMETER_MAP)]));
    }
    guarded.push(Stmt::Assign {
        target: Expr::name(RESULT_VAR),
        value: Expr::call(Expr::name(service_field), "getResult", vec![]),
    });

    body.push(Stmt::Try {
        body: guarded,
        catches: vec![CatchClause {
            exception_type: exception_class.to_string(),
            name: "e".to_string(),
            // Echoes the (possibly null) result rather than the exception message.
            body: vec![Stmt::Return(response("BAD_REQUEST"))],
        }],
    });
    body.push(Stmt::Return(response("OK")));
    body
}

/// `Response.status(Response.Status.<status>).entity(result).build()`
fn response(status: &str) -> Expr {
    let status = Expr::call(
        Expr::name("Response"),
        "status",
        vec![Expr::name(format!("Response.Status.{status}"))],
    );
    let with_entity = Expr::call(status, "entity", vec![Expr::name(RESULT_VAR)]);
    Expr::call(with_entity, "build", vec![])
}
