//! Command-line front end.

use anyhow::{Context, Result};
use clap::Parser;
use oddgen_codegen::{GeneratedFiles, generate_to_dir};
use oddgen_schema::GeneratorConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generate Rust attribute and element types from a TEI-ODD schema.
#[derive(Parser, Debug)]
#[command(name = "oddgen", version, about, long_about = None)]
pub struct Cli {
    /// Compiled ODD schema.
    pub schema: PathBuf,

    /// YAML configuration file.
    pub config: Option<PathBuf>,

    /// Output directory, overriding the configuration.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Returns the log filter: `RUST_LOG` if set, else one derived from `-v`.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            })
        })
    }

    /// Loads the configuration and applies command-line overrides.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded.
    pub fn load_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load configuration '{}'", path.display()))?,
            None => GeneratorConfig::default(),
        };
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        Ok(config)
    }
}

/// Runs the generator for parsed arguments.
///
/// # Errors
/// Returns an error if configuration, schema loading, generation or writing
/// fails.
pub fn run(cli: &Cli) -> Result<GeneratedFiles> {
    let config = cli.load_config()?;
    tracing::debug!(
        schema = %cli.schema.display(),
        output_dir = %config.output_dir.display(),
        elements = config.elements,
        "Starting generation"
    );
    generate_to_dir(&cli.schema, &config)
        .with_context(|| format!("Failed to generate from '{}'", cli.schema.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0" xmlns:rng="http://relaxng.org/ns/structure/1.0">
  <classSpec ident="att.sized" type="atts" module="MEI.shared">
    <attList><attDef ident="size"><datatype><rng:data type="integer"/></datatype></attDef></attList>
  </classSpec>
  <elementSpec ident="note" module="MEI.shared">
    <classes><memberOf key="att.sized"/></classes>
  </elementSpec>
</TEI>"#;

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from(["oddgen", "mei.xml", "mei.yml", "-o", "out", "-vv"])
            .expect("Failed to parse");
        assert_eq!(cli.schema, PathBuf::from("mei.xml"));
        assert_eq!(cli.config, Some(PathBuf::from("mei.yml")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.verbose, 2);

        assert!(Cli::try_parse_from(["oddgen"]).is_err());
    }

    #[test]
    fn test_output_dir_override() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = dir.path().join("mei.yml");
        std::fs::write(&config, "output_dir: generated\nelements: true\n")
            .expect("Failed to write config");

        let args: Vec<std::ffi::OsString> = vec![
            "oddgen".into(),
            "mei.xml".into(),
            config.into_os_string(),
            "--output-dir".into(),
            dir.path().join("elsewhere").into_os_string(),
        ];
        let cli = Cli::try_parse_from(args).expect("Failed to parse");
        let loaded = cli.load_config().expect("Failed to load");
        assert_eq!(loaded.output_dir, dir.path().join("elsewhere"));
        assert!(loaded.elements);
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let schema = dir.path().join("mei.xml");
        std::fs::write(&schema, SCHEMA).expect("Failed to write schema");
        let config = dir.path().join("mei.yml");
        std::fs::write(&config, "elements: true\noutput_dir: out\n").expect("Failed to write config");

        let cli = Cli {
            schema,
            config: Some(config),
            output_dir: None,
            verbose: 0,
        };
        let files = run(&cli).expect("Failed to run");
        assert!(files.get("shared.rs").is_some());
        assert!(dir.path().join("out").join("atts_shared.rs").is_file());
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let cli = Cli {
            schema: PathBuf::from("mei.xml"),
            config: Some(PathBuf::from("/nonexistent/mei.yml")),
            output_dir: None,
            verbose: 0,
        };
        let err = run(&cli).expect_err("should fail");
        assert!(format!("{err:#}").contains("Failed to load configuration"));
    }
}
