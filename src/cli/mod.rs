//! # CLI Module
//!
//! Command-line interface for the `enterprise-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate the Java sources of one module and commit them to its repository:
//!
//! ```bash
//! enterprise-gen generate --metadata meta.yaml --module shop --workspace ./repos
//! ```
//!
//! Options:
//! - `--metadata <FILE>` - Metadata file, YAML or JSON (required)
//! - `--module <CODE>` - Module code (required)
//! - `--workspace <DIR>` - Directory holding the repositories (required)
//! - `--config <FILE>` - Generator configuration TOML
//! - `--dry-run` - Print the artifact paths without writing or committing
//!
//! ### `inspect`
//!
//! Print how a module resolves, without generating anything:
//!
//! ```bash
//! enterprise-gen inspect --metadata meta.yaml --module shop
//! ```
//!
//! ### `init-config`
//!
//! Write the default configuration to a TOML file (existing files are kept):
//!
//! ```bash
//! enterprise-gen init-config --output enterprise-gen.toml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use enterprise_gen::cli::{execute, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! execute(cli)?;
//! ```

mod commands;


pub use commands::{execute, run_cli, Cli, Commands};
