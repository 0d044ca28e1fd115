//! # CLI Module
//!
//! Command-line access to the Swagger reader, shipped as the
//! `restgate-swagger` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate a Swagger 2.0 document from a resource table:
//!
//! ```bash
//! restgate-swagger generate --resources resources.yaml --config aws-swagger.json
//! ```
//!
//! Options:
//! - `--resources <FILE>` - Resource table (YAML or JSON, required)
//! - `--config <FILE>` - Reader configuration; defaults to `$AWS_SWAGGER_CONFIGURATION`
//! - `--output <FILE>` - Write the document here instead of stdout
//! - `--title`, `--api-version`, `--base-path`, `--host` - Document metadata
//!
//! ### `check-config`
//!
//! Validate a reader configuration without generating anything:
//!
//! ```bash
//! restgate-swagger check-config --config aws-swagger.json
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use restgate::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{generate_swagger, run_cli, Cli, Commands, GenerateOptions};
