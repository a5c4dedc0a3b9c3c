//! # Naming Engine
//!
//! Pure string transformations shared by every synthesizer. All functions are
//! total: an empty input comes back unchanged instead of failing, and the same
//! input always produces the same output.
//!
//! The two verb-keyed tables ([`HttpVerb::class_suffix`] and
//! [`HttpVerb::method_prefix`]) are the only source of REST class and method
//! names. Synthesizers must go through [`rest_class_name`] and
//! [`rest_method_name`] instead of building names themselves.
//!
//! | Verb   | Class name        | Method name     |
//! |--------|-------------------|-----------------|
//! | POST   | `ProductCreate`   | `saveProduct`   |
//! | GET    | `ProductGet`      | `getProduct`    |
//! | PUT    | `ProductUpdate`   | `updateProduct` |
//! | DELETE | `ProductDelete`   | `removeProduct` |

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Separator prepended to injected field names.
pub const FIELD_PREFIX: char = '_';

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("non-alphanumeric regex should be valid"));

/// The four HTTP methods the endpoint synthesizer knows how to shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpVerb {
    /// Parse an endpoint method label, ignoring case.
    ///
    /// Returns `None` for anything outside GET/POST/PUT/DELETE.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(HttpVerb::Get),
            "POST" => Some(HttpVerb::Post),
            "PUT" => Some(HttpVerb::Put),
            "DELETE" => Some(HttpVerb::Delete),
            _ => None,
        }
    }

    /// Canonical upper-case label, also used as the JAX-RS annotation name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
        }
    }

    /// Suffix appended to the entity name to form the resource class name.
    pub fn class_suffix(&self) -> &'static str {
        match self {
            HttpVerb::Post => "Create",
            HttpVerb::Get => "Get",
            HttpVerb::Put => "Update",
            HttpVerb::Delete => "Delete",
        }
    }

    /// Prefix prepended to the entity name to form the handler method name.
    pub fn method_prefix(&self) -> &'static str {
        match self {
            HttpVerb::Post => "save",
            HttpVerb::Get => "get",
            HttpVerb::Put => "update",
            HttpVerb::Delete => "remove",
        }
    }

    /// Whether the handler receives a DTO request body (POST, PUT).
    pub fn carries_payload(&self) -> bool {
        matches!(self, HttpVerb::Post | HttpVerb::Put)
    }

    /// Whether the handler binds a path identifier (GET, PUT, DELETE).
    pub fn carries_path_id(&self) -> bool {
        matches!(self, HttpVerb::Get | HttpVerb::Put | HttpVerb::Delete)
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-case the first character only.
///
/// ```rust
/// use enterprise_gen::naming::decapitalize;
///
/// assert_eq!(decapitalize("CreateMyProduct"), "createMyProduct");
/// assert_eq!(decapitalize(""), "");
/// ```
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Upper-case the first character only.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Derive an injected field name: strip non-alphanumerics, decapitalize and
/// prefix with [`FIELD_PREFIX`].
///
/// ```rust
/// use enterprise_gen::naming::decapitalize_with_prefix;
///
/// assert_eq!(decapitalize_with_prefix("CreateMyProduct"), "_createMyProduct");
/// ```
pub fn decapitalize_with_prefix(name: &str) -> String {
    let stripped = NON_ALPHANUMERIC.replace_all(name, "");
    if stripped.is_empty() {
        return String::new();
    }
    format!("{FIELD_PREFIX}{}", decapitalize(&stripped))
}

/// Resource class name for `entity` handled with `verb`, e.g. `ProductCreate`.
///
/// Unrecognized verbs yield `None`.
pub fn rest_class_name(entity: &str, verb: &str) -> Option<String> {
    HttpVerb::parse(verb).map(|v| format!("{entity}{}", v.class_suffix()))
}

/// Handler method name for `entity` handled with `verb`, e.g. `saveProduct`.
///
/// Unrecognized verbs yield `None`.
pub fn rest_method_name(entity: &str, verb: &str) -> Option<String> {
    HttpVerb::parse(verb).map(|v| format!("{}{entity}", v.method_prefix()))
}

/// The segment after the last `.` of a qualified service identifier.
pub fn service_short_name(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[idx + 1..],
        None => qualified,
    }
}

/// Join the alphanumeric runs of `name` into a camel-case identifier.
///
/// `"create-product"` becomes `createProduct`; `"{uuid}"` becomes `uuid`.
pub fn to_identifier(name: &str) -> String {
    NON_ALPHANUMERIC
        .split(name)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(i, segment)| {
            if i == 0 {
                decapitalize(segment)
            } else {
                capitalize(segment)
            }
        })
        .collect()
}

/// Name of the path-bound identifier declared by an endpoint sub-path.
pub fn path_param_name(sub_path: &str) -> String {
    to_identifier(sub_path)
}
