use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::swagger::model::Info;
use crate::swagger::{load_resources, AwsSwaggerConfiguration, AwsSwaggerReader, Swagger};

/// Command-line interface for the Swagger reader
#[derive(Parser, Debug)]
#[command(name = "restgate-swagger")]
#[command(about = "Generate API Gateway Swagger documents", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a Swagger 2.0 document from a resource table
    Generate(GenerateOptions),
    /// Validate a reader configuration file
    CheckConfig {
        /// Configuration file; defaults to $AWS_SWAGGER_CONFIGURATION
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Resource table (YAML or JSON)
    #[arg(short, long)]
    pub resources: PathBuf,

    /// Configuration file; defaults to $AWS_SWAGGER_CONFIGURATION
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// `info.title` of the document
    #[arg(long, default_value = "restgate")]
    pub title: String,

    /// `info.version` of the document
    #[arg(long, default_value = "1.0.0")]
    pub api_version: String,

    #[arg(long)]
    pub base_path: Option<String>,

    #[arg(long)]
    pub host: Option<String>,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AwsSwaggerConfiguration> {
    let config = match path {
        Some(path) => AwsSwaggerConfiguration::load(path)?,
        None => AwsSwaggerConfiguration::from_env()?,
    };
    Ok(config)
}

/// Read the resource table named in `options` into a new document.
pub fn generate_swagger(options: &GenerateOptions) -> anyhow::Result<Swagger> {
    let config = load_config(options.config.as_deref())?;
    let table = load_resources(&options.resources)?;

    let swagger = Swagger {
        info: Some(Info {
            title: options.title.clone(),
            version: options.api_version.clone(),
            description: None,
        }),
        host: options.host.clone(),
        base_path: options.base_path.clone(),
        ..Swagger::new()
    };
    let mut reader = AwsSwaggerReader::new(swagger, config);
    reader.read_table(&table);
    Ok(reader.into_swagger())
}

pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate(options) => {
            let swagger = generate_swagger(options)?;
            let document = serde_json::to_string_pretty(&swagger)?;
            match &options.output {
                Some(output) => {
                    std::fs::write(output, document + "\n")
                        .with_context(|| format!("failed to write '{}'", output.display()))?;
                    info!(
                        output = %output.display(),
                        paths = swagger.paths.len(),
                        "swagger document written"
                    );
                }
                None => println!("{document}"),
            }
            Ok(())
        }
        Commands::CheckConfig { config } => {
            let config = load_config(config.as_deref())?;
            println!(
                "configuration OK (authType: {:?}, default status code: {}, CORS by default: {})",
                config.auth_type, config.default_status_code, config.default_cors_enabled
            );
            Ok(())
        }
    }
}
