use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use researchsnap_core::{AppConfig, CardLayout, CardView, CitationRecord, ExitCode};
use researchsnap_export::{
    BrowserIntent, CardImages, NoNativeShare, RasterConfig, ShareOutcome, download, render_pair, share,
};
use researchsnap_science::{CitationResolver, ScienceError};
use researchsnap_tui::app::App;

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "researchsnap",
    about = "Turn a paper URL into a shareable citation card",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format (for scripts).
    /// Also enabled by setting RESEARCHSNAP_JSON=1.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URL and print the citation record.
    Fetch { url: String },

    /// Resolve a URL and print the card as text.
    Card {
        url: String,
        #[arg(long)]
        layout: Option<CardLayout>,
    },

    /// Resolve a URL, render both cards and save one.
    Export {
        url: String,
        #[arg(long)]
        layout: Option<CardLayout>,
        /// Output directory (defaults to export.output_dir).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Resolve a URL, render the card and share it.
    Share {
        url: String,
        #[arg(long)]
        layout: Option<CardLayout>,
    },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information.
    Version,
}

// ─── Config Actions ──────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum ConfigAction {
    /// Show all config values.
    List,
    /// Get a specific config key.
    Get { key: String },
    /// Print the config file location.
    Path,
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();

    // ── Env var overrides ──────────────────────────────────────────────────
    let json_output = cli.json || std::env::var("RESEARCHSNAP_JSON").as_deref() == Ok("1");

    init_logging(cli.command.is_none());

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => fail(json_output, start, ExitCode::InvalidArgs, "config_error", &e.to_string()),
    };

    let runtime = Runtime::new()?;

    match cli.command {
        None => {
            let mut app = App::new(config, runtime.handle().clone())?;
            researchsnap_tui::run_tui(&mut app)?;
        }

        // ── Fetch ──────────────────────────────────────────────────────────

        Some(Commands::Fetch { url }) => {
            let record = resolve(&runtime, &config, &url, json_output, start);
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({
                    "status":"ok",
                    "data":record.to_display_json(),
                    "meta":{"duration_ms":dur}
                }))?;
            } else {
                println!("Title:       {}", record.display_title());
                println!("Authors:     {}", record.display_authors().join(", "));
                println!("Year:        {}", record.display_year());
                println!("Venue:       {}", record.display_venue());
                println!("Institution: {}", record.display_institution());
                println!("Identifier:  {}", record.identifier);
            }
        }

        // ── Card ───────────────────────────────────────────────────────────

        Some(Commands::Card { url, layout }) => {
            let layout = layout.unwrap_or(config.export.default_layout);
            let record = resolve(&runtime, &config, &url, json_output, start);
            let view = CardView::build(&record, layout);
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":view,"meta":{"duration_ms":dur}}))?;
            } else {
                for line in view.to_text_lines() {
                    println!("{line}");
                }
            }
        }

        // ── Export ─────────────────────────────────────────────────────────

        Some(Commands::Export { url, layout, out }) => {
            let layout = layout.unwrap_or(config.export.default_layout);
            let record = resolve(&runtime, &config, &url, json_output, start);
            let images = render(&runtime, &config, &record, json_output, start);

            let dir = out.unwrap_or_else(|| config.output_dir());
            let path = match download(images.get(layout), &dir) {
                Ok(path) => path,
                Err(e) => fail(json_output, start, ExitCode::GeneralError, "export_failed", &e.to_string()),
            };

            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({
                    "status":"ok",
                    "data":{"path":path,"layout":layout},
                    "meta":{"duration_ms":dur}
                }))?;
            } else {
                println!("Card exported: {}", path.display());
            }
        }

        // ── Share ──────────────────────────────────────────────────────────

        Some(Commands::Share { url, layout }) => {
            let layout = layout.unwrap_or(config.export.default_layout);
            let record = resolve(&runtime, &config, &url, json_output, start);
            let images = render(&runtime, &config, &record, json_output, start);

            let outcome = match share(
                images.get(layout),
                record.display_title(),
                &NoNativeShare,
                &BrowserIntent,
            ) {
                Ok(outcome) => outcome,
                Err(e) => fail(json_output, start, ExitCode::GeneralError, "share_failed", &e.to_string()),
            };

            let dur = start.elapsed().as_millis();
            let intent = match &outcome {
                ShareOutcome::Native => None,
                ShareOutcome::Intent { url } => Some(url.as_str()),
            };
            if json_output {
                print_json(&serde_json::json!({
                    "status":"ok",
                    "data":{"native":intent.is_none(),"intent_url":intent},
                    "meta":{"duration_ms":dur}
                }))?;
            } else if let Some(url) = intent {
                println!("Opened share link: {url}");
            } else {
                println!("Ready to share");
            }
        }

        // ── Config ─────────────────────────────────────────────────────────

        Some(Commands::Config { action }) => {
            let dur = start.elapsed().as_millis();
            match action {
                ConfigAction::List => {
                    let kv = config.key_values();
                    if json_output {
                        print_json(&serde_json::json!({"status":"ok","data":kv,"meta":{"duration_ms":dur}}))?;
                    } else {
                        for (k, v) in &kv {
                            println!("{k} = {v}");
                        }
                    }
                }
                ConfigAction::Get { key } => match config.get(&key) {
                    Ok(val) => {
                        if json_output {
                            print_json(&serde_json::json!({"status":"ok","data":{"key":key,"value":val},"meta":{"duration_ms":dur}}))?;
                        } else {
                            println!("{val}");
                        }
                    }
                    Err(e) => fail(json_output, start, ExitCode::InvalidArgs, "unknown_key", &e.to_string()),
                },
                ConfigAction::Path => {
                    let path = AppConfig::config_path();
                    if json_output {
                        print_json(&serde_json::json!({
                            "status":"ok",
                            "data":{"path":path,"exists":path.exists()},
                            "meta":{"duration_ms":dur}
                        }))?;
                    } else {
                        println!("{}", path.display());
                    }
                }
            }
        }

        // ── Version ────────────────────────────────────────────────────────

        Some(Commands::Version) => {
            let version = env!("CARGO_PKG_VERSION");
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":{"version":version},"meta":{"duration_ms":dur}}))?;
            } else {
                println!("researchsnap v{version}");
            }
        }
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Logs go to stderr, or to a file while the TUI owns the terminal.
/// Filter comes from RESEARCHSNAP_LOG, default `warn`.
fn init_logging(tui_mode: bool) {
    let filter = EnvFilter::try_from_env("RESEARCHSNAP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    if tui_mode {
        let path = AppConfig::log_path();
        let file = path
            .parent()
            .map_or(Ok(()), |dir| std::fs::create_dir_all(dir))
            .and_then(|()| {
                std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
            });
        // No log file means no logs; stderr would corrupt the screen.
        if let Ok(file) = file {
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
    } else {
        builder.with_writer(std::io::stderr).init();
    }
}

fn resolve(runtime: &Runtime, config: &AppConfig, url: &str, json_output: bool, start: Instant) -> CitationRecord {
    let resolver = match CitationResolver::from_config(&config.network) {
        Ok(resolver) => resolver,
        Err(e) => fail(json_output, start, ExitCode::GeneralError, "client_error", &e.to_string()),
    };
    match runtime.block_on(resolver.resolve(url)) {
        Ok(record) => record,
        Err(e @ ScienceError::ResolutionFailed(_)) => fail(
            json_output,
            start,
            ExitCode::NetworkError,
            "resolution_failed",
            &e.user_message(),
        ),
        Err(e) => fail(json_output, start, ExitCode::NetworkError, "network_error", &e.to_string()),
    }
}

fn render(
    runtime: &Runtime,
    config: &AppConfig,
    record: &CitationRecord,
    json_output: bool,
    start: Instant,
) -> CardImages {
    match runtime.block_on(render_pair(record, RasterConfig::from_config(&config.export))) {
        Ok(images) => images,
        Err(e) => fail(json_output, start, ExitCode::GeneralError, "export_failed", &e.to_string()),
    }
}

/// Reports an error in the selected output format and exits.
fn fail(json_output: bool, start: Instant, code: ExitCode, error: &str, message: &str) -> ! {
    if json_output {
        let dur = start.elapsed().as_millis();
        let _ = print_json(&serde_json::json!({
            "status":"error",
            "error":error,
            "message":message,
            "meta":{"duration_ms":dur}
        }));
    } else {
        eprintln!("Error: {message}");
    }
    std::process::exit(code as i32);
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_layout_flags() {
        let cli = Cli::try_parse_from(["researchsnap", "export", "https://arxiv.org/abs/2205.11916", "--layout", "vertical", "--out", "/tmp/cards"]).unwrap();
        match cli.command {
            Some(Commands::Export { url, layout, out }) => {
                assert_eq!(url, "https://arxiv.org/abs/2205.11916");
                assert_eq!(layout, Some(CardLayout::Vertical));
                assert_eq!(out, Some(PathBuf::from("/tmp/cards")));
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn rejects_unknown_layout() {
        assert!(Cli::try_parse_from(["researchsnap", "card", "https://example.org", "--layout", "diagonal"]).is_err());
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["researchsnap", "--json"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.json);
    }
}
