use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use videoml::{
    build::{watch_project, DocumentBuilder},
    codegen::ScriptGenerator,
    config::{Config, Platform},
    model::VideoProject,
    resolve::resolve,
    ui::timeline_infos,
    validate::{has_errors, validate, Diagnostic},
};

#[derive(Parser)]
#[command(
    name = "videoml",
    version,
    about = "Compile VideoML projects into MoviePy scripts",
    long_about = "VideoML turns a declarative description of a video (clips, cuts, text, audio and a timeline) into a Python script that renders it with MoviePy."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Platform the generated script runs on (windows, other)
    #[arg(long, global = true)]
    platform: Option<Platform>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the MoviePy script for a project
    Generate {
        /// Project document (JSON)
        project: PathBuf,

        /// Directory to write `<output_name>.py` into
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the script instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// Print the resolved timeline as JSON
    Timeline {
        /// Project document (JSON)
        project: PathBuf,
    },

    /// Validate a project and print its diagnostics
    Check {
        /// Project document (JSON)
        project: PathBuf,
    },

    /// Rebuild a project on every change, printing one JSON document per build
    Watch {
        /// Project document (JSON)
        project: PathBuf,
    },

    /// Write the default configuration to a file
    InitConfig {
        /// Destination of the TOML file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries scripts and JSON
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("videoml={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Starting VideoML v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };
    if let Some(platform) = cli.platform {
        config.generator.platform = platform;
    }
    config.validate()?;

    match cli.command {
        Command::Generate { project, output, stdout } => generate(&config, &project, output, stdout),
        Command::Timeline { project } => timeline(&config, &project).await,
        Command::Check { project } => check(&project),
        Command::Watch { project } => watch(&config, project).await,
        Command::InitConfig { path } => {
            Config::default().save_to_file(&path)?;
            info!("Default configuration written to {:?}", path);
            Ok(())
        }
    }
}

fn load_project(path: &Path) -> Result<VideoProject> {
    VideoProject::from_file(path).with_context(|| format!("Failed to load project {:?}", path))
}

fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic);
    }
}

/// Load a project and refuse to go on when it has errors
fn load_valid_project(path: &Path) -> Result<VideoProject> {
    let project = load_project(path)?;
    let diagnostics = validate(&project);
    report(&diagnostics);
    if has_errors(&diagnostics) {
        bail!("{:?} has errors, nothing generated", path);
    }
    Ok(project)
}

fn generate(config: &Config, path: &Path, output: Option<PathBuf>, stdout: bool) -> Result<()> {
    let project = load_valid_project(path)?;
    let resolved = resolve(&project)?;
    let script = ScriptGenerator::new(config.generator.clone()).generate(&resolved)?;

    if stdout {
        print!("{}", script);
        return Ok(());
    }

    let directory = output.unwrap_or_else(|| PathBuf::from("."));
    let destination = directory.join(format!("{}.py", project.output_name));
    std::fs::write(&destination, script)
        .with_context(|| format!("Failed to write {:?}", destination))?;
    info!("Script saved to {:?}", destination);
    Ok(())
}

fn project_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

async fn timeline(config: &Config, path: &Path) -> Result<()> {
    let project = load_valid_project(path)?;
    let resolved = resolve(&project)?;

    let builder = DocumentBuilder::from_config(config).with_base_dir(project_dir(path));
    let known = builder.known_durations(&project).await;
    let infos = timeline_infos(&resolved, &known, config.generator.default_text_duration)?;

    println!("{}", serde_json::to_string_pretty(&infos)?);
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let project = load_project(path)?;
    let diagnostics = validate(&project);
    report(&diagnostics);

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    if errors > 0 {
        bail!("{} error(s) in {:?}", errors, path);
    }
    info!("{:?} is valid ({} warning(s))", path, diagnostics.len());
    Ok(())
}

async fn watch(config: &Config, path: PathBuf) -> Result<()> {
    let builder = Arc::new(DocumentBuilder::from_config(config).with_base_dir(project_dir(&path)));
    let debounce = Duration::from_millis(config.build.debounce_ms);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let printer = async {
        while let Some(change) = rx.recv().await {
            println!("{}", serde_json::to_string(&change)?);
        }
        Ok::<_, anyhow::Error>(())
    };
    let watcher = async {
        watch_project(path.clone(), builder, debounce, tx).await?;
        Ok::<_, anyhow::Error>(())
    };

    tokio::try_join!(watcher, printer)?;
    Ok(())
}
