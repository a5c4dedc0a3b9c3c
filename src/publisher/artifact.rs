use std::io;
use std::path::{Component, Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::generator::{DTO_FACET, RESOURCE_FACET, REST_FACET};

/// What a generated file is, for reporting and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Dto,
    Endpoint,
    RestConfig,
}

impl ArtifactKind {
    /// Package segment and directory the artifact lives in.
    pub fn facet(&self) -> &'static str {
        match self {
            ArtifactKind::Dto => DTO_FACET,
            ArtifactKind::Endpoint => RESOURCE_FACET,
            ArtifactKind::RestConfig => REST_FACET,
        }
    }
}

/// A synthesized source file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    /// Class name, also the file stem
    pub class_name: String,
    /// Path relative to the module working tree
    pub path: PathBuf,
    pub content: String,
}

/// Maps classes to paths inside a module working tree.
///
/// `<facet_root>/<base_package as dirs>/<module>/<facet>/<Class>.<ext>`, e.g.
/// `facets/java/org/meveo/shop/dto/ProductDto.java`.
#[derive(Debug, Clone)]
pub struct ArtifactLayout<'a> {
    config: &'a GeneratorConfig,
    extension: &'static str,
}

impl<'a> ArtifactLayout<'a> {
    pub fn new(config: &'a GeneratorConfig, extension: &'static str) -> Self {
        Self { config, extension }
    }

    pub fn path_for(&self, module_code: &str, kind: ArtifactKind, class_name: &str) -> PathBuf {
        let mut path = PathBuf::from(&self.config.facet_root);
        for segment in self.config.base_package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(module_code);
        path.push(kind.facet());
        path.push(format!("{class_name}.{}", self.extension));
        path
    }

    pub fn artifact(
        &self,
        module_code: &str,
        kind: ArtifactKind,
        class_name: String,
        content: String,
    ) -> GeneratedArtifact {
        GeneratedArtifact {
            kind,
            path: self.path_for(module_code, kind, &class_name),
            class_name,
            content,
        }
    }
}

/// Reject paths that could escape the working tree.
pub(crate) fn validate_relative_path(path: &Path) -> io::Result<()> {
    if path.as_os_str().is_empty() || path.is_absolute() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("artifact path must be relative: {}", path.display()),
        ));
    }
    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            Component::ParentDir | Component::CurDir | Component::Prefix(_) | Component::RootDir => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("artifact path must be a normal relative path: {}", path.display()),
                ));
            }
        }
    }
    Ok(())
}
