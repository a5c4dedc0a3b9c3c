//! Structural representation of a generated Java source file.
//!
//! Synthesizers build these records; a [`SourceRenderer`](super::SourceRenderer)
//! turns them into text. Nothing here knows about indentation or line breaks.

/// One generated source file: package, imports and a single top-level class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub package: String,
    pub imports: Vec<Import>,
    pub class: ClassDecl,
}

/// An import declaration, either a single type or a wildcard package import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub name: String,
    pub wildcard: bool,
}

impl Import {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wildcard: false,
        }
    }

    pub fn wildcard(package: impl Into<String>) -> Self {
        Self {
            name: package.into(),
            wildcard: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// A marker (`@Inject`) or single-member (`@Path("x")`) annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: String,
    pub argument: Option<Expr>,
}

impl Annotation {
    pub fn marker(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: None,
        }
    }

    pub fn single(name: impl Into<String>, argument: Expr) -> Self {
        Self {
            name: name.into(),
            argument: Some(argument),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub visibility: Visibility,
    pub annotations: Vec<Annotation>,
    pub extends: Option<String>,
    /// Members in declaration order
    pub members: Vec<Member>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            annotations: Vec::new(),
            extends: None,
            members: Vec::new(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(f) => Some(f),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Constructor(c) => Some(c),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods().find(|m| m.name == name)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field(FieldDecl),
    Constructor(ConstructorDecl),
    Method(MethodDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub annotations: Vec<Annotation>,
    pub visibility: Visibility,
    pub ty: String,
    pub name: String,
}

impl FieldDecl {
    pub fn private(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            annotations: Vec::new(),
            visibility: Visibility::Private,
            ty: ty.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub annotations: Vec<Annotation>,
    pub ty: String,
    pub name: String,
}

impl Param {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            annotations: Vec::new(),
            ty: ty.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub visibility: Visibility,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub annotations: Vec<Annotation>,
    pub visibility: Visibility,
    pub return_type: String,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

impl MethodDecl {
    pub fn public(return_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            annotations: Vec::new(),
            visibility: Visibility::Public,
            return_type: return_type.into(),
            name: name.into(),
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.name == name)
    }

    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `Type name = init;`
    LocalVar { ty: String, name: String, init: Expr },
    /// `expr;`
    Expr(Expr),
    /// `target = value;`
    Assign { target: Expr, value: Expr },
    Return(Expr),
    Try {
        body: Vec<Stmt>,
        catches: Vec<CatchClause>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchClause {
    pub exception_type: String,
    pub name: String,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Null,
    /// A simple or dotted name, e.g. `result` or `MediaType.APPLICATION_JSON`
    Name(String),
    StringLiteral(String),
    Call {
        target: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },
    FieldAccess {
        target: Box<Expr>,
        name: String,
    },
    New {
        ty: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringLiteral(value.into())
    }

    /// `target.method(args)`
    pub fn call(target: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            target: Some(Box::new(target)),
            method: method.into(),
            args,
        }
    }

    /// `method(args)` on the implicit receiver
    pub fn call_local(method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            target: None,
            method: method.into(),
            args,
        }
    }

    /// `this.name`
    pub fn this_field(name: impl Into<String>) -> Self {
        Expr::FieldAccess {
            target: Box::new(Expr::name("this")),
            name: name.into(),
        }
    }
}
