//! Unit tests for CLI commands

use crate::cli::{generate_swagger, Cli, Commands, GenerateOptions};
use clap::Parser;
use http::Method;
use std::io::Write;
use std::path::PathBuf;

fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_generate_command_parses() {
    let cli = Cli::try_parse_from([
        "restgate-swagger",
        "generate",
        "--resources",
        "resources.yaml",
        "--config",
        "aws.json",
        "--base-path",
        "/prod",
    ])
    .unwrap();

    match cli.command {
        Commands::Generate(options) => {
            assert_eq!(options.resources, PathBuf::from("resources.yaml"));
            assert_eq!(options.config, Some(PathBuf::from("aws.json")));
            assert_eq!(options.base_path.as_deref(), Some("/prod"));
            assert_eq!(options.title, "restgate");
            assert_eq!(options.output, None);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_check_config_without_path() {
    let cli = Cli::try_parse_from(["restgate-swagger", "check-config"]).unwrap();
    assert!(matches!(cli.command, Commands::CheckConfig { config: None }));
}

#[test]
fn test_generate_requires_resources() {
    assert!(Cli::try_parse_from(["restgate-swagger", "generate"]).is_err());
}

#[test]
fn test_generate_swagger_from_files() {
    let config = temp_file(".json", r#"{"defaultCorsEnabled": false, "authType": "iam"}"#);
    let resources = temp_file(
        ".yaml",
        r#"
resources:
  - path: /things
    security: denyAll
    methods:
      - method: GET
      - method: PUT
        path: "{id}"
"#,
    );

    let options = GenerateOptions {
        resources: resources.path().to_path_buf(),
        config: Some(config.path().to_path_buf()),
        output: None,
        title: "things".into(),
        api_version: "2".into(),
        base_path: None,
        host: None,
    };
    let swagger = generate_swagger(&options).unwrap();

    assert_eq!(swagger.info.as_ref().map(|i| i.title.as_str()), Some("things"));
    let put = swagger.operation("/things/{id}", &Method::PUT).unwrap();
    assert_eq!(put.parameters[0].name, "id");
    assert!(put.security[0].contains_key("sigv4"));
    assert!(put.responses["200"].headers.is_empty());
    assert!(swagger.security_definitions.contains_key("sigv4"));
}

#[test]
fn test_generate_swagger_with_bad_config() {
    let config = temp_file(".json", "{ not json");
    let resources = temp_file(".json", r#"{"resources": []}"#);
    let options = GenerateOptions {
        resources: resources.path().to_path_buf(),
        config: Some(config.path().to_path_buf()),
        output: None,
        title: "t".into(),
        api_version: "1".into(),
        base_path: None,
        host: None,
    };
    let err = generate_swagger(&options).unwrap_err();
    assert!(err.to_string().contains("not a valid configuration"));
}
