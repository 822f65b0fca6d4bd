//! Command-line front end: sanitizes a field value or validates files from
//! disk, using either ad-hoc flags or named configurations from a YAML file.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use log::{error, info};
use serde_json::json;

use smart_forms::consts::{CONFIG_ENV_VAR, FALLBACK_MIME_TYPE};
use smart_forms::{
    evaluate, CaseMode, FieldConfig, FileConstraintConfig, FileConstraintValidator,
    FileDescriptor, FormsConfig,
};

#[derive(Parser)]
#[command(name = "smart-forms")]
#[command(about = "Sanitize form fields and validate file uploads", long_about = None)]
struct Cli {
    /// YAML file with named field and upload configurations
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sanitize and check a single field value
    Field {
        value: String,

        /// Use a named field configuration instead of the flags below
        #[arg(long)]
        field: Option<String>,

        /// Mode to apply, may be repeated (alphanumeric, alpha, numeric, email, url, tel, pattern)
        #[arg(short, long = "mode")]
        modes: Vec<String>,

        #[arg(long)]
        space: bool,

        #[arg(long, value_enum)]
        case: Option<CaseArg>,

        /// Language set code (en, es, fr) or a raw character-class body
        #[arg(long)]
        lang: Option<String>,

        /// Character-class body for the `pattern` mode
        #[arg(long)]
        pattern: Option<String>,

        #[arg(long)]
        normalize: bool,
    },
    /// Validate files read from disk
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Use a named upload configuration instead of the flags below
        #[arg(long)]
        upload: Option<String>,

        /// Accepted types, e.g. "image/*,application/pdf"
        #[arg(long)]
        accept: Option<String>,

        #[arg(long)]
        max_file_size: Option<u64>,

        #[arg(long)]
        max_files: Option<usize>,

        #[arg(long)]
        max_width: Option<u32>,

        #[arg(long)]
        max_height: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CaseArg {
    Upper,
    Lower,
}

impl From<CaseArg> for CaseMode {
    fn from(case: CaseArg) -> Self {
        match case {
            CaseArg::Upper => CaseMode::Upper,
            CaseArg::Lower => CaseMode::Lower,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load variables from .env before reading SMART_FORMS_CONFIG
    dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether the input passed validation
async fn run(cli: Cli) -> Result<bool> {
    let forms = load_forms_config(cli.config.as_deref())?;
    let messages = forms.error_messages();

    match cli.command {
        Commands::Field {
            value,
            field,
            modes,
            space,
            case,
            lang,
            pattern,
            normalize,
        } => {
            let config = match field {
                Some(name) => forms.field(&name)?.clone(),
                None => {
                    if modes.is_empty() && lang.is_none() {
                        bail!("Either --field, --mode or --lang is required");
                    }
                    let mut config = FieldConfig {
                        modes,
                        ..FieldConfig::default()
                    }
                    .with_space(space)
                    .with_unicode_normalization(normalize);
                    if let Some(case) = case {
                        config = config.with_case(case.into());
                    }
                    if let Some(lang) = lang {
                        config = config.with_language_set(lang);
                    }
                    if let Some(pattern) = pattern {
                        config = config.with_pattern(pattern);
                    }
                    config
                }
            };

            let result = evaluate(&value, &config);
            let report = json!({
                "result": result,
                "messages": messages.messages_for(result.errors()),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(result.is_valid())
        }
        Commands::Upload {
            paths,
            upload,
            accept,
            max_file_size,
            max_files,
            max_width,
            max_height,
        } => {
            let config = match upload {
                Some(name) => forms.upload(&name)?.clone(),
                None => {
                    let mut config = accept
                        .as_deref()
                        .map(FileConstraintConfig::from_accept)
                        .unwrap_or_default()
                        .with_max_dimensions(max_width, max_height);
                    if let Some(bytes) = max_file_size {
                        config = config.with_max_file_size(bytes);
                    }
                    if let Some(count) = max_files {
                        config = config.with_max_files(count);
                    }
                    config
                }
            };

            let mut files = Vec::with_capacity(paths.len());
            for path in &paths {
                files.push(read_file(path).await?);
            }

            let outcome = FileConstraintValidator::new(config).validate(files).await;
            let report = json!({
                "outcome": outcome,
                "messages": messages.messages_for(outcome.errors()),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(outcome.is_valid())
        }
    }
}

/// Explicit path first, then the environment, then an empty configuration
fn load_forms_config(path: Option<&Path>) -> Result<FormsConfig> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

    match path {
        Some(path) => FormsConfig::load(path),
        None => Ok(FormsConfig::default()),
    }
}

async fn read_file(path: &Path) -> Result<FileDescriptor> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Invalid file name: {}", path.display()))?
        .to_string();

    let mime_type = infer::get(&content)
        .map(|kind| kind.mime_type())
        .unwrap_or(FALLBACK_MIME_TYPE)
        .to_string();

    info!("Read {} ({}, {} bytes)", name, mime_type, content.len());
    Ok(FileDescriptor::from_bytes(name, mime_type, content))
}
