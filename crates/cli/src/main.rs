use album_sort_order_core::{
    app_paths, load_config, parse_template, record_album_sort_order, render_album_sequence,
    render_filename, save_config, AppConfig, ExportResults, NoopVerbose, PhotoInfo,
    RecordOutcome, RenderContext, StopReason, TracingVerbose, VerboseLog,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "album-sort-order-cli")]
#[command(about = "Computes album sort order for exported photos")]
struct Cli {
    /// Print verbose output, including one line per recorded sort order
    #[arg(short = 'V', long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render an export filename (or the bare sequence number) for one photo
    Sequence(SequenceArgs),
    /// Write sort order companion files for an export manifest
    Record(RecordArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct SequenceArgs {
    #[arg(long)]
    library: PathBuf,
    #[arg(long)]
    uuid: String,
    #[arg(long)]
    dest: PathBuf,
    /// Filename template; defaults to `filename_template` from the config file
    #[arg(long)]
    template: Option<String>,
    /// Print only the sequence number instead of a rendered filename
    #[arg(long, default_value_t = false, conflicts_with = "template")]
    bare: bool,
}

#[derive(Debug, Args)]
struct RecordArgs {
    #[arg(long)]
    manifest: PathBuf,
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    /// Write the default config file if none exists
    Init,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Deserialize)]
struct Library {
    photos: Vec<PhotoInfo>,
}

#[derive(Debug, Deserialize)]
struct ExportManifest {
    entries: Vec<ExportEntry>,
}

#[derive(Debug, Deserialize)]
struct ExportEntry {
    photo: PhotoInfo,
    #[serde(default)]
    results: ExportResults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Sequence(args) => cmd_sequence(args),
        Commands::Record(args) => cmd_record(args, cli.verbose),
        Commands::Config(config) => match config.action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Init => cmd_config_init(),
        },
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::INFO } else { Level::WARN };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_sequence(args: SequenceArgs) -> Result<()> {
    let config = load_config()?;
    let library: Library = read_json(&args.library)?;
    let photo = library
        .photos
        .iter()
        .find(|p| p.uuid == args.uuid)
        .with_context(|| format!("photo not found in library: {}", args.uuid))?;

    let start = config.sequence_start()?;
    println!("{}", sequence_output(&args, &config, photo, start)?);
    Ok(())
}

fn sequence_output(
    args: &SequenceArgs,
    config: &AppConfig,
    photo: &PhotoInfo,
    start: u64,
) -> Result<String> {
    let ctx = RenderContext::with_dest(&args.dest);
    if args.bare {
        return Ok(render_album_sequence(photo, &ctx, start));
    }

    let template = args
        .template
        .as_deref()
        .unwrap_or(&config.filename_template);
    let parts = parse_template(template)?;
    Ok(render_filename(&parts, photo, &ctx, start))
}

fn cmd_record(args: RecordArgs, verbose: bool) -> Result<()> {
    let manifest: ExportManifest = read_json(&args.manifest)?;

    if args.dry_run {
        eprintln!(
            "dry-run: skipped sort order recording for {} photos",
            manifest.entries.len()
        );
        return Ok(());
    }

    let log: &dyn VerboseLog = if verbose {
        &TracingVerbose
    } else {
        &NoopVerbose
    };

    let mut outcomes = Vec::with_capacity(manifest.entries.len());
    for entry in &manifest.entries {
        let outcome = record_album_sort_order(&entry.photo, &entry.results, log)
            .with_context(|| format!("failed to record sort order for {}", entry.photo.uuid))?;
        if let Some(reason) = &outcome.stopped {
            debug!(photo = %entry.photo.uuid, ?reason, "stopped early");
        }
        outcomes.push((entry.photo.uuid.as_str(), outcome));
    }

    match args.output {
        OutputFormat::Json => {
            let body: Vec<_> = outcomes
                .iter()
                .map(|(uuid, outcome)| serde_json::json!({ "uuid": uuid, "outcome": outcome }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => print_table(&outcomes),
    }

    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let paths = app_paths()?;
    println!("config file: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    println!("effective sequence start: {}", config.sequence_start()?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let paths = app_paths()?;
    if paths.config_path.exists() {
        println!("config file already exists: {}", paths.config_path.display());
        return Ok(());
    }
    save_config(&AppConfig::default())?;
    println!("wrote {}", paths.config_path.display());
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_table(outcomes: &[(&str, RecordOutcome)]) {
    println!("photo -> sort order file (album, index)");
    let mut written = 0usize;
    let mut stopped = 0usize;
    for (uuid, outcome) in outcomes {
        for entry in &outcome.written {
            println!(
                "{} -> {} ({}, {})",
                uuid,
                entry.sort_order_path.display(),
                entry.album,
                entry.sort_order
            );
        }
        written += outcome.written.len();
        if let Some(reason) = &outcome.stopped {
            stopped += 1;
            println!("{} stopped: {}", uuid, describe_stop(reason));
        }
    }

    println!(
        "\nsummary: photos={} written={} stopped={}",
        outcomes.len(),
        written,
        stopped
    );
}

fn describe_stop(reason: &StopReason) -> String {
    match reason {
        StopReason::NotAlbumDirectory { file } => {
            format!("{} is not in an album directory", file.display())
        }
        StopReason::NoMatchingAlbum { file, album } => {
            format!("no album titled {album} for {}", file.display())
        }
        StopReason::NotAMember { file, album } => {
            format!("album {album} does not list {}", file.display())
        }
    }
}
