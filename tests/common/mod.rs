#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use enterprise_gen::config::GeneratorConfig;
use enterprise_gen::error::{GenerationError, Result};
use enterprise_gen::metadata::{
    EndpointDescriptor, EntityDescriptor, FunctionInput, MetadataStore, ModuleDescriptor,
    ModuleItem, ServiceDescriptor,
};
use enterprise_gen::publisher::{OutputTree, Repository, VersionControl, WorkspaceLayout};

pub mod fixtures {
    use super::*;

    pub fn endpoint(code: &str, method: &str, path: &str, service: &str) -> EndpointDescriptor {
        EndpointDescriptor {
            code: code.to_string(),
            method: method.to_string(),
            base_path: "product".to_string(),
            path: path.to_string(),
            service: service.to_string(),
        }
    }

    pub fn service(code: &str, inputs: &[(&str, &str)]) -> ServiceDescriptor {
        ServiceDescriptor {
            code: code.to_string(),
            inputs: inputs
                .iter()
                .map(|(name, ty)| FunctionInput {
                    name: name.to_string(),
                    type_name: ty.to_string(),
                })
                .collect(),
        }
    }

    pub fn entity(name: &str, custom_entity: bool) -> EntityDescriptor {
        EntityDescriptor {
            name: name.to_string(),
            custom_entity,
        }
    }

    pub fn entity_item(config: &GeneratorConfig, code: &str) -> ModuleItem {
        ModuleItem::new(&config.entity_item_class, code)
    }

    pub fn endpoint_item(config: &GeneratorConfig, code: &str) -> ModuleItem {
        ModuleItem::new(&config.endpoint_item_class, code)
    }

    /// One custom entity and one POST endpoint whose service takes it.
    pub fn minimal_store(config: &GeneratorConfig) -> MetadataStore {
        MetadataStore::new()
            .with_module(ModuleDescriptor {
                code: "shop".to_string(),
                items: vec![
                    entity_item(config, "Product"),
                    endpoint_item(config, "createProduct"),
                ],
            })
            .with_endpoint(endpoint(
                "createProduct",
                "POST",
                "",
                "org.meveo.script.CreateMyProduct",
            ))
            .with_service(service(
                "org.meveo.script.CreateMyProduct",
                &[("product", "Product"), ("type", "String")],
            ))
            .with_entity(entity("Product", true))
    }

    /// A module exercising skipped entities, ignored items, a GET endpoint and
    /// a payload entity that is not itself a module item.
    pub fn shop_store(config: &GeneratorConfig) -> MetadataStore {
        MetadataStore::new()
            .with_module(ModuleDescriptor {
                code: "shop".to_string(),
                items: vec![
                    entity_item(config, "Product"),
                    entity_item(config, "Category"),
                    entity_item(config, "Ghost"),
                    ModuleItem::new("org.meveo.model.scripts.Function", "Whatever"),
                    endpoint_item(config, "createProduct"),
                    endpoint_item(config, "getProduct"),
                    endpoint_item(config, "createOrder"),
                ],
            })
            .with_endpoint(endpoint(
                "createProduct",
                "POST",
                "",
                "org.meveo.script.CreateMyProduct",
            ))
            .with_endpoint(endpoint(
                "getProduct",
                "GET",
                "/{uuid}",
                "org.meveo.script.GetProduct",
            ))
            .with_endpoint(EndpointDescriptor {
                base_path: "order".to_string(),
                ..endpoint("createOrder", "POST", "", "org.meveo.script.CreateOrder")
            })
            .with_service(service(
                "org.meveo.script.CreateMyProduct",
                &[("product", "Product")],
            ))
            .with_service(service(
                "org.meveo.script.GetProduct",
                &[("uuid", "String"), ("product", "Product")],
            ))
            .with_service(service("org.meveo.script.CreateOrder", &[("order", "Order")]))
            .with_entity(entity("Product", true))
            .with_entity(entity("Category", false))
            .with_entity(entity("Order", true))
    }

    /// A module with only non-eligible items.
    pub fn empty_store(config: &GeneratorConfig) -> MetadataStore {
        MetadataStore::new()
            .with_module(ModuleDescriptor {
                code: "shop".to_string(),
                items: vec![
                    entity_item(config, "Category"),
                    ModuleItem::new("org.meveo.model.scripts.Function", "Whatever"),
                ],
            })
            .with_entity(entity("Category", false))
    }

    /// Populate a template working tree with the default assets plus noise.
    pub fn write_template_repo(root: &Path) {
        let files = [
            "src/main/java/org/meveo/base/CustomEndpointResource.java",
            "src/main/webapp/WEB-INF/beans.xml",
            "README.md",
            ".git/beans.xml",
        ];
        for file in files {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, format!("// {file}\n")).unwrap();
        }
    }
}

/// One call made against [`RecordingVcs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    Ensure {
        name: String,
        remote: Option<String>,
    },
    Checkout {
        repository: String,
        branch: String,
        create_if_missing: bool,
    },
    Commit {
        repository: String,
        files: Vec<PathBuf>,
        message: String,
    },
}

/// In-memory [`VersionControl`] that records every call and creates the
/// repository directories so writes can land.
pub struct RecordingVcs {
    layout: WorkspaceLayout,
    calls: RefCell<Vec<VcsCall>>,
    fail_commit: bool,
}

impl RecordingVcs {
    pub fn new(layout: WorkspaceLayout) -> Self {
        Self {
            layout,
            calls: RefCell::new(Vec::new()),
            fail_commit: false,
        }
    }

    pub fn failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.borrow().clone()
    }

    pub fn commits(&self) -> Vec<VcsCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, VcsCall::Commit { .. }))
            .collect()
    }
}

impl VersionControl for RecordingVcs {
    fn ensure_repository(&self, name: &str, remote: Option<&str>) -> Result<Repository> {
        let root = self.layout.root_for(name);
        fs::create_dir_all(&root).map_err(|e| GenerationError::io(&root, e))?;
        self.calls.borrow_mut().push(VcsCall::Ensure {
            name: name.to_string(),
            remote: remote.map(str::to_string),
        });
        Ok(Repository {
            name: name.to_string(),
            root,
        })
    }

    fn checkout(
        &self,
        repository: &Repository,
        branch: &str,
        create_if_missing: bool,
    ) -> Result<()> {
        self.calls.borrow_mut().push(VcsCall::Checkout {
            repository: repository.name.clone(),
            branch: branch.to_string(),
            create_if_missing,
        });
        Ok(())
    }

    fn commit(&self, repository: &Repository, files: &[PathBuf], message: &str) -> Result<()> {
        if self.fail_commit {
            return Err(GenerationError::VersionControl("commit rejected".to_string()));
        }
        self.calls.borrow_mut().push(VcsCall::Commit {
            repository: repository.name.clone(),
            files: files.to_vec(),
            message: message.to_string(),
        });
        Ok(())
    }
}
