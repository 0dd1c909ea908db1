use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::Serialize;

use tfgen_core::config::{self, CONFIG_FILE_NAME, TfgenConfig};
use tfgen_core::transform::state_mapper::map_response;
use tfgen_core::transform::{PathResolver, SchemaResolver};
use tfgen_core::{CodeGenerator, Document, GeneratedFile};
use tfgen_terraform::TerraformGenerator;

#[derive(Parser)]
#[command(
    name = "tfgen",
    about = "Terraform data source generator for Microsoft Graph OpenAPI documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate data sources listed in the config
    Generate {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Validate an OpenAPI document
    Validate {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the resolved tree of a schema or path
    #[command(group(ArgGroup::new("target").required(true).args(["schema", "path"])))]
    Inspect {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,

        /// Named schema to resolve, e.g. microsoft.graph.user
        #[arg(long)]
        schema: Option<String>,

        /// GET path to resolve, e.g. /users/{user-id}
        #[arg(long)]
        path: Option<String>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,

        /// JSON response body to map onto the resolved tree
        #[arg(long)]
        sample: Option<PathBuf>,
    },

    /// Initialize a new tfgen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input } => cmd_generate(input),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect {
            input,
            schema,
            path,
            format,
            sample,
        } => cmd_inspect(input, schema, path, format, sample),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "tfgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<TfgenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_document(path: &Path) -> Result<Document> {
    Document::load(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

/// Try to run gofmt on the output directory.
fn try_run_gofmt(output_dir: &Path) {
    match Command::new("gofmt").arg("-w").arg(output_dir).output() {
        Ok(result) if result.status.success() => {
            eprintln!("  formatted with gofmt");
        }
        Ok(result) => {
            log::warn!(
                "gofmt exited with {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr)
            );
        }
        Err(_) => {
            eprintln!(
                "  note: gofmt not found, run `gofmt -w {}` to format",
                output_dir.display()
            );
        }
    }
}

fn cmd_generate(input: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let document = load_document(&input)?;

    if cfg.data_sources.is_empty() {
        eprintln!("No data sources configured. Add a `data_sources` section to your config.");
        return Ok(());
    }

    eprintln!("Generating {} data sources → {}", cfg.data_sources.len(), cfg.output);
    let files = TerraformGenerator
        .generate(&document, &cfg)
        .map_err(|e| anyhow::anyhow!(e))?;

    let output_dir = PathBuf::from(&cfg.output);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    write_files(&output_dir, &files)?;
    try_run_gofmt(&output_dir);

    eprintln!("Generated {} files in {}", files.len(), output_dir.display());
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let document = load_document(&input)?;
    let spec = document.spec();
    let info = document.info();

    eprintln!("Valid OpenAPI {} document: {}", spec.openapi, info.title);
    eprintln!("  Version: {}", info.version);
    eprintln!("  Paths: {}", spec.paths.len());
    eprintln!(
        "  Operations: {} ({} GET)",
        spec.paths.values().map(|item| item.operation_count()).sum::<usize>(),
        spec.paths.values().filter(|item| item.get.is_some()).count()
    );

    let resolver = SchemaResolver::new(&document);
    let mut resolved = 0;
    let mut total = 0;
    for name in document.schema_names() {
        total += 1;
        match resolver.resolve(name) {
            Ok(_) => resolved += 1,
            Err(e) => log::debug!("{e}"),
        }
    }
    eprintln!("  Schemas: {total} ({resolved} resolvable)");

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(
    input: PathBuf,
    schema: Option<String>,
    path: Option<String>,
    format: InspectFormat,
    sample: Option<PathBuf>,
) -> Result<()> {
    let document = load_document(&input)?;

    let (resolved, response) = match (schema, path) {
        (Some(name), _) => {
            let object = SchemaResolver::new(&document)
                .resolve(&name)
                .with_context(|| format!("failed to resolve schema {name}"))?;
            (serde_json::to_value(&object)?, object)
        }
        (None, Some(path)) => {
            let object = PathResolver::new(&document)
                .resolve_path(&path)
                .with_context(|| format!("failed to resolve path {path}"))?;
            (serde_json::to_value(&object)?, object.get.response)
        }
        (None, None) => anyhow::bail!("either --schema or --path is required"),
    };

    let output = match sample {
        Some(sample) => {
            let content = fs::read_to_string(&sample)
                .with_context(|| format!("failed to read {}", sample.display()))?;
            let body: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse {}", sample.display()))?;
            serde_json::json!({
                "resolved": resolved,
                "state": map_response(&response, &body),
            })
        }
        None => resolved,
    };

    print_value(&output, &format)
}

fn print_value<T: Serialize>(value: &T, format: &InspectFormat) -> Result<()> {
    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(value)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
