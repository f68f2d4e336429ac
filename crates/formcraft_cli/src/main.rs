//! Formcraft command-line collaborator.
//!
//! # Responsibility
//! - Export saved schema files as JSON or standalone HTML.
//! - Run preview validation of a values file against a schema.
//! - Keep all form semantics in `formcraft_core`.
//!
//! ```bash
//! formcraft export contact.json --format html --out contact.html
//! formcraft check contact.json answers.json
//! formcraft kinds
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use formcraft_core::registry::field_types::palette;
use formcraft_core::{
    core_version, init_logging, ExportFormat, FormSession, FormValues, FormcraftConfig,
    LogSettings,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "formcraft")]
#[command(about = "Export and check Formcraft form schemas", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Absolute directory for log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a schema file as JSON or standalone HTML
    Export {
        schema: PathBuf,
        #[arg(long, short, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Output file; a directory receives the suggested file name
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Validate a values file against a schema the way the preview does
    Check { schema: PathBuf, values: PathBuf },
    /// List the available field kinds by category
    Kinds,
    /// Print the core version
    Version,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Export { .. } => "export",
            Self::Check { .. } => "check",
            Self::Kinds => "kinds",
            Self::Version => "version",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Html,
}

impl From<Format> for ExportFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Json => ExportFormat::Json,
            Format::Html => ExportFormat::Html,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        init_logging(&LogSettings::with_default_level(log_dir))
            .context("failed to start logging")?;
    }
    let config = match &cli.config {
        Some(path) => FormcraftConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FormcraftConfig::default(),
    };

    log::info!(
        "event=cli_command module=cli status=start command={}",
        cli.command.name()
    );
    match cli.command {
        Commands::Export {
            schema,
            format,
            out,
        } => export(config, &schema, format.into(), out.as_deref()),
        Commands::Check { schema, values } => check(config, &schema, &values),
        Commands::Kinds => {
            for (category, kinds) in palette() {
                println!("{}", category.label());
                for descriptor in kinds {
                    println!("  {:<10} {}", descriptor.kind.as_str(), descriptor.label);
                }
            }
            Ok(())
        }
        Commands::Version => {
            println!("formcraft {}", core_version());
            Ok(())
        }
    }
}

fn open_session(config: FormcraftConfig, schema: &Path) -> Result<FormSession> {
    let text = std::fs::read_to_string(schema)
        .with_context(|| format!("failed to read schema {}", schema.display()))?;
    let mut session = FormSession::with_config(config);
    session
        .load_schema_json(&text)
        .with_context(|| format!("failed to decode schema {}", schema.display()))?;
    Ok(session)
}

fn export(
    config: FormcraftConfig,
    schema: &Path,
    format: ExportFormat,
    out: Option<&Path>,
) -> Result<()> {
    let session = open_session(config, schema)?;
    let text = session.export(format);

    let Some(out) = out else {
        println!("{text}");
        return Ok(());
    };
    let target = if out.is_dir() {
        out.join(session.export_file_name(format))
    } else {
        out.to_path_buf()
    };
    std::fs::write(&target, text)
        .with_context(|| format!("failed to write {}", target.display()))?;
    eprintln!("wrote {}", target.display());
    Ok(())
}

fn check(config: FormcraftConfig, schema: &Path, values: &Path) -> Result<()> {
    let session = open_session(config, schema)?;
    let text = std::fs::read_to_string(values)
        .with_context(|| format!("failed to read values {}", values.display()))?;
    let values: FormValues = serde_json::from_str(&text)
        .with_context(|| format!("failed to decode values {}", values.display()))?;

    let errors = session.validate_preview(&values);
    if errors.is_empty() {
        let payload = serde_json::Value::Object(session.preview_payload(&values));
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }
    for (field_id, message) in &errors {
        println!("{field_id}: {message}");
    }
    bail!("{} field(s) failed validation", errors.len())
}
