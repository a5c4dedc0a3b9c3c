use askama::Template;

use super::ast::{
    Annotation, CatchClause, ClassDecl, CompilationUnit, ConstructorDecl, Expr, FieldDecl, Import,
    Member, MethodDecl, Param, Stmt,
};
use super::templates::CompilationUnitTemplate;
use crate::error::Result;

/// Turns a [`CompilationUnit`] into source text.
///
/// Implementations must be deterministic: the same unit always renders to the
/// same bytes.
pub trait SourceRenderer {
    fn render(&self, unit: &CompilationUnit) -> Result<String>;

    /// File extension for rendered units, without the dot.
    fn extension(&self) -> &'static str;
}

/// Java pretty-printer with four-space indentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaRenderer;

const INDENT: &str = "    ";

impl SourceRenderer for JavaRenderer {
    fn render(&self, unit: &CompilationUnit) -> Result<String> {
        let template = CompilationUnitTemplate {
            package: unit.package.clone(),
            imports: unit.imports.iter().map(render_import).collect(),
            annotations: unit.class.annotations.iter().map(render_annotation).collect(),
            declaration: render_class_header(&unit.class),
            members: unit
                .class
                .members
                .iter()
                .map(|member| render_member(&unit.class.name, member))
                .collect(),
        };
        let mut source = template.render()?;
        let trimmed = source.trim_end().len();
        source.truncate(trimmed);
        source.push('\n');
        Ok(source)
    }

    fn extension(&self) -> &'static str {
        "java"
    }
}

fn render_import(import: &Import) -> String {
    if import.wildcard {
        format!("{}.*", import.name)
    } else {
        import.name.clone()
    }
}

fn render_class_header(class: &ClassDecl) -> String {
    let mut header = format!("{} class {}", class.visibility.keyword(), class.name);
    if let Some(parent) = &class.extends {
        header.push_str(" extends ");
        header.push_str(parent);
    }
    header
}

fn render_annotation(annotation: &Annotation) -> String {
    match &annotation.argument {
        Some(arg) => format!("@{}({})", annotation.name, render_expr(arg)),
        None => format!("@{}", annotation.name),
    }
}

fn render_member(class_name: &str, member: &Member) -> String {
    let mut lines = Vec::new();
    match member {
        Member::Field(field) => render_field(field, &mut lines),
        Member::Constructor(ctor) => render_constructor(class_name, ctor, &mut lines),
        Member::Method(method) => render_method(method, &mut lines),
    }
    lines.join("\n")
}

fn render_field(field: &FieldDecl, out: &mut Vec<String>) {
    for annotation in &field.annotations {
        out.push(indented(1, &render_annotation(annotation)));
    }
    out.push(indented(
        1,
        &format!("{} {} {};", field.visibility.keyword(), field.ty, field.name),
    ));
}

fn render_constructor(class_name: &str, ctor: &ConstructorDecl, out: &mut Vec<String>) {
    out.push(indented(
        1,
        &format!(
            "{} {}({}) {{",
            ctor.visibility.keyword(),
            class_name,
            render_params(&ctor.params)
        ),
    ));
    render_block(&ctor.body, 2, out);
    out.push(indented(1, "}"));
}

fn render_method(method: &MethodDecl, out: &mut Vec<String>) {
    for annotation in &method.annotations {
        out.push(indented(1, &render_annotation(annotation)));
    }
    out.push(indented(
        1,
        &format!(
            "{} {} {}({}) {{",
            method.visibility.keyword(),
            method.return_type,
            method.name,
            render_params(&method.params)
        ),
    ));
    render_block(&method.body, 2, out);
    out.push(indented(1, "}"));
}

fn render_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| {
            let mut rendered = String::new();
            for annotation in &param.annotations {
                rendered.push_str(&render_annotation(annotation));
                rendered.push(' ');
            }
            rendered.push_str(&param.ty);
            rendered.push(' ');
            rendered.push_str(&param.name);
            rendered
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_block(body: &[Stmt], depth: usize, out: &mut Vec<String>) {
    for stmt in body {
        render_stmt(stmt, depth, out);
    }
}

fn render_stmt(stmt: &Stmt, depth: usize, out: &mut Vec<String>) {
    match stmt {
        Stmt::LocalVar { ty, name, init } => {
            out.push(indented(depth, &format!("{ty} {name} = {};", render_expr(init))));
        }
        Stmt::Expr(expr) => out.push(indented(depth, &format!("{};", render_expr(expr)))),
        Stmt::Assign { target, value } => out.push(indented(
            depth,
            &format!("{} = {};", render_expr(target), render_expr(value)),
        )),
        Stmt::Return(expr) => {
            out.push(indented(depth, &format!("return {};", render_expr(expr))));
        }
        Stmt::Try { body, catches } => {
            out.push(indented(depth, "try {"));
            render_block(body, depth + 1, out);
            for CatchClause {
                exception_type,
                name,
                body,
            } in catches
            {
                out.push(indented(depth, &format!("}} catch ({exception_type} {name}) {{")));
                render_block(body, depth + 1, out);
            }
            out.push(indented(depth, "}"));
        }
    }
}

fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Null => "null".to_string(),
        Expr::Name(name) => name.clone(),
        Expr::StringLiteral(value) => format!("\"{}\"", escape_java_string(value)),
        Expr::Call {
            target,
            method,
            args,
        } => {
            let args = render_args(args);
            match target {
                Some(target) => format!("{}.{method}({args})", render_expr(target)),
                None => format!("{method}({args})"),
            }
        }
        Expr::FieldAccess { target, name } => format!("{}.{name}", render_expr(target)),
        Expr::New { ty, args } => format!("new {ty}({})", render_args(args)),
    }
}

fn render_args(args: &[Expr]) -> String {
    args.iter().map(render_expr).collect::<Vec<_>>().join(", ")
}

fn escape_java_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn indented(depth: usize, line: &str) -> String {
    format!("{}{line}", INDENT.repeat(depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_java_string() {
        assert_eq!(escape_java_string(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_java_string("plain"), "plain");
    }

    #[test]
    fn test_render_chained_call() {
        let expr = Expr::call(
            Expr::call(
                Expr::call(
                    Expr::name("Response"),
                    "status",
                    vec![Expr::name("Response.Status.OK")],
                ),
                "entity",
                vec![Expr::name("result")],
            ),
            "build",
            vec![],
        );
        assert_eq!(
            render_expr(&expr),
            "Response.status(Response.Status.OK).entity(result).build()"
        );
    }

    #[test]
    fn test_empty_class_renders_braces_on_two_lines() {
        let unit = CompilationUnit {
            package: "org.example".to_string(),
            imports: vec![],
            class: ClassDecl::new("Empty"),
        };
        let source = JavaRenderer.render(&unit).unwrap();
        assert_eq!(source, "package org.example;\n\npublic class Empty {\n}\n");
    }

    #[test]
    fn test_try_catch_layout() {
        let mut lines = Vec::new();
        render_stmt(
            &Stmt::Try {
                body: vec![Stmt::Expr(Expr::call_local("run", vec![]))],
                catches: vec![CatchClause {
                    exception_type: "Exception".to_string(),
                    name: "e".to_string(),
                    body: vec![Stmt::Return(Expr::Null)],
                }],
            },
            0,
            &mut lines,
        );
        assert_eq!(
            lines,
            vec![
                "try {",
                "    run();",
                "} catch (Exception e) {",
                "    return null;",
                "}"
            ]
        );
    }
}
