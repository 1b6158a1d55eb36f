use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use vinyl_core::discogs::{MasterRecord, ReleaseSummary};
use vinyl_core::document::UNKNOWN;
use vinyl_core::{
    lookup, AcquisitionOrigin, Annotation, Condition, Config, DiscogsClient, LookupError,
};

/// Look up a vinyl record by barcode on Discogs and export a Markdown file
/// with its details and your notes.
#[derive(Parser)]
#[command(name = "vinyl-notes", version)]
struct Args {
    /// Barcode as printed on the sleeve; spaces and hyphens are ignored.
    barcode: String,

    /// Discogs personal access token (https://www.discogs.com/settings/developers).
    #[arg(long, env = "VINYL_DISCOGS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Media condition: M, NM, VG+, VG, G, P (or the full grade name).
    #[arg(long, default_value = "Mint")]
    media: Condition,

    /// Sleeve condition, same grades as --media.
    #[arg(long, default_value = "Mint")]
    sleeve: Condition,

    /// Acquisition date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    acquired: Option<NaiveDate>,

    /// Where the record came from: Compra, Regalo, Herencia, Hallazgo.
    #[arg(long, default_value = "Compra")]
    origin: AcquisitionOrigin,

    /// Known defects, e.g. "Skips on track 3".
    #[arg(long, default_value = "")]
    warnings: String,

    /// Review or memories, written as the document body.
    #[arg(long, conflicts_with = "history_file")]
    history: Option<String>,

    /// Read the document body from a file.
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Directory to write the document to. Overrides the configured one.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the document instead of writing it.
    #[arg(long)]
    stdout: bool,

    /// Save the catalog URL and output directory as defaults.
    #[arg(long)]
    save_config: bool,
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {e}");
        std::process::exit(1);
    });
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if args.save_config {
        save_config(&config);
    }

    let token = args
        .token
        .clone()
        .or_else(|| config.discogs_token.clone())
        .unwrap_or_default();
    if token.trim().is_empty() {
        error!("A Discogs token is required: pass --token or set VINYL_DISCOGS_TOKEN");
        std::process::exit(1);
    }

    let client = DiscogsClient::with_base_url(&config.api_base_url, &config.user_agent);
    info!("Searching Discogs for barcode {}", args.barcode);
    let found = match lookup(&client, &args.barcode, &token).await {
        Ok(found) => found,
        Err(e) if e.is_not_found() => {
            warn!("No results for barcode {}", args.barcode);
            return;
        }
        Err(LookupError::Catalog(e)) => {
            error!("Discogs lookup failed: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    print_release(&found.release);
    match &found.master {
        Some(master) => print_master(master),
        None => println!("(no master data)"),
    }

    let annotation = Annotation {
        media_condition: args.media,
        sleeve_condition: args.sleeve,
        acquired_on: args
            .acquired
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        origin: args.origin,
        warnings: args.warnings.clone(),
        history: read_history(&args),
    };
    let doc = found.compose(&annotation);

    if args.stdout {
        print!("{}", doc.content());
        return;
    }
    match doc.write_to_dir(&config.output_dir).await {
        Ok(path) => println!("Saved {} ({})", path.display(), doc.mime_type()),
        Err(e) => {
            error!(
                "Failed to write {} to {}: {e}",
                doc.filename,
                config.output_dir.display()
            );
            std::process::exit(1);
        }
    }
}

fn save_config(config: &Config) {
    let Some(dir) = Config::config_dir() else {
        warn!("No home directory, not saving config");
        return;
    };
    if let Err(e) = config.save_to_dir(&dir) {
        error!("Failed to save config: {e}");
        std::process::exit(1);
    }
}

fn read_history(args: &Args) -> String {
    if let Some(text) = &args.history {
        return text.clone();
    }
    match &args.history_file {
        Some(path) => std::fs::read_to_string(path)
            .map(history_body)
            .unwrap_or_else(|e| {
                error!("Failed to read {}: {e}", path.display());
                std::process::exit(1);
            }),
        None => String::new(),
    }
}

/// File contents are kept verbatim apart from the final line break, which
/// the document adds back.
fn history_body(mut contents: String) -> String {
    if contents.ends_with('\n') {
        contents.pop();
        if contents.ends_with('\r') {
            contents.pop();
        }
    }
    contents
}

fn print_release(release: &ReleaseSummary) {
    println!("{}", release.title);
    println!(
        "Country: {} | Year: {}",
        release.country.as_deref().unwrap_or(UNKNOWN),
        release.year.as_deref().unwrap_or(UNKNOWN)
    );
    println!("Format: {}", release.format.join(", "));
    println!("Genre: {}", release.genre.join(", "));
    println!("Style: {}", release.style.join(", "));
    match release.cover_image.as_deref().filter(|s| !s.is_empty()) {
        Some(url) => println!("Cover: {}", url),
        None => println!("Cover: (no image)"),
    }
}

fn print_master(master: &MasterRecord) {
    println!("Master artist: {}", master.artist);
    println!("Original year: {}", master.year);
    for track in &master.tracklist {
        println!("  {}", track);
    }
}
