use askama::Template;

/// Template data for one Java compilation unit.
///
/// Members arrive pre-rendered and already indented; the template only lays
/// out the package line, the import block, class annotations and the class
/// body braces.
#[derive(Template)]
#[template(path = "compilation_unit.java.txt", escape = "none")]
pub struct CompilationUnitTemplate {
    /// Package name
    pub package: String,
    /// Import targets without the `import` keyword, e.g. `java.util.*`
    pub imports: Vec<String>,
    /// Class-level annotations, one per line
    pub annotations: Vec<String>,
    /// Class header up to the opening brace, e.g. `public class ProductDto`
    pub declaration: String,
    /// Rendered member blocks, separated by a blank line in the output
    pub members: Vec<String>,
}
