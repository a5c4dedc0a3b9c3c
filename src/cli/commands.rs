use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::application::ApplicationGenerator;
use crate::config::GeneratorConfig;
use crate::metadata::{load_metadata, MetadataResolver};
use crate::naming::HttpVerb;
use crate::publisher::{ArtifactPublisher, GitClient, WorkspaceLayout};

/// Command-line interface for the enterprise application generator
#[derive(Parser, Debug)]
#[command(name = "enterprise-gen")]
#[command(about = "Generate Java enterprise REST applications from module metadata", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate DTOs, resource classes and the REST configuration for a module
    Generate {
        /// Metadata file (YAML or JSON)
        #[arg(short, long)]
        metadata: PathBuf,

        /// Module code to generate
        #[arg(long)]
        module: String,

        /// Directory holding the template and module working trees
        #[arg(short, long)]
        workspace: PathBuf,

        /// Generator configuration (TOML); defaults apply when absent
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Plan only: print the artifacts that would be written
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Show how a module resolves: entities, endpoints and payloads
    Inspect {
        /// Metadata file (YAML or JSON)
        #[arg(short, long)]
        metadata: PathBuf,

        /// Module code to inspect
        #[arg(long)]
        module: String,

        /// Generator configuration (TOML); defaults apply when absent
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the default generator configuration
    InitConfig {
        /// Destination file; never overwritten
        #[arg(short, long, default_value = "enterprise-gen.toml")]
        output: PathBuf,
    },
}

/// Parse the process arguments and run the selected command.
pub fn run_cli() -> Result<()> {
    execute(Cli::parse())
}

/// Run an already parsed command.
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            metadata,
            module,
            workspace,
            config,
            dry_run,
        } => generate(&metadata, &module, &workspace, config.as_deref(), dry_run),
        Commands::Inspect {
            metadata,
            module,
            config,
        } => inspect(&metadata, &module, config.as_deref()),
        Commands::InitConfig { output } => init_config(&output),
    }
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    config.apply_env_overrides();
    Ok(config)
}

fn generate(
    metadata: &Path,
    module: &str,
    workspace: &Path,
    config: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let store = load_metadata(metadata)
        .with_context(|| format!("Failed to load metadata {}", metadata.display()))?;
    let generator = ApplicationGenerator::new(&config, &store);

    if dry_run {
        let Some(plan) = generator.plan(Some(module))? else {
            println!("ℹ️  Module '{module}' not found, nothing to generate");
            return Ok(());
        };
        if plan.is_empty() {
            println!("ℹ️  Module '{module}' has nothing to generate");
            return Ok(());
        }
        let module_root = workspace.join(&plan.module_code);
        for artifact in plan.all_artifacts() {
            println!("📝 Would write {}", module_root.join(&artifact.path).display());
        }
        return Ok(());
    }

    let git = GitClient::new(WorkspaceLayout::new(workspace));
    let publisher = ArtifactPublisher::new(&config, &git);
    let Some(report) = generator.generate(Some(module), &publisher)? else {
        println!("ℹ️  Module '{module}' not found, nothing to generate");
        return Ok(());
    };

    let module_root = workspace.join(&report.module_code);
    for artifact in &report.artifacts {
        println!("✅ Generated {}", module_root.join(&artifact.path).display());
    }
    for support in &report.support_files {
        println!("✅ Wrote {}", module_root.join(support).display());
    }
    if report.committed {
        println!(
            "✅ Committed {} file(s) to branch '{}'",
            report.artifacts.len() + report.support_files.len(),
            config.module_branch
        );
    } else {
        println!("ℹ️  Module '{module}' has nothing to generate");
    }
    Ok(())
}

fn inspect(metadata: &Path, module: &str, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let store = load_metadata(metadata)
        .with_context(|| format!("Failed to load metadata {}", metadata.display()))?;
    let resolver = MetadataResolver::new(&store, &config);
    let Some(resolved) = resolver.resolve(Some(module))? else {
        bail!("module '{module}' not found in {}", metadata.display());
    };

    println!("module: {}", resolved.module_code);
    println!("entities:");
    for code in &resolved.entity_codes {
        let marker = if resolved.eligible_entities.contains(code) {
            "dto"
        } else {
            "skipped"
        };
        println!("  - {code} ({marker})");
    }
    println!("endpoints:");
    for ep in &resolved.endpoints {
        let verb = HttpVerb::parse(&ep.endpoint.method)
            .map(|v| v.to_string())
            .unwrap_or_else(|| format!("{} (unsupported)", ep.endpoint.method));
        println!(
            "  - {} {} base={} path={} service={} payload={}",
            ep.endpoint.code,
            verb,
            ep.endpoint.base_path,
            ep.endpoint.path,
            ep.service.code,
            ep.payload_entity.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn init_config(output: &Path) -> Result<()> {
    if output.exists() {
        println!("ℹ️  {} already exists, leaving it untouched", output.display());
        return Ok(());
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let text = GeneratorConfig::default().to_toml()?;
    std::fs::write(output, text)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("✅ Wrote default configuration to {}", output.display());
    Ok(())
}
