//! CLI entry point for twig

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use twig::{
    ErrorPolicy, JsonFormatter, OutputConfig, RenderSummary, StreamingFormatter, TraversalError,
    TreeWalker, WalkerConfig, print_json,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "twig")]
#[command(about = "Print a directory tree; symlinks are shown but never followed")]
#[command(version)]
struct Args {
    /// Directory to display
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Maximum depth for recursive scan (0 = root's entries only)
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Draw lines to visualize branches
    #[arg(
        long = "draw-lines",
        value_name = "0|1",
        default_value = "1",
        action = ArgAction::Set,
        value_parser = parse_toggle
    )]
    draw_lines: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Output rendered lines as JSON
    #[arg(long = "json")]
    json: bool,

    /// Skip subdirectories that cannot be read instead of stopping
    #[arg(short = 'k', long = "keep-going")]
    keep_going: bool,
}

/// Parse a strict `0` / `1` toggle.
fn parse_toggle(s: &str) -> Result<bool, String> {
    match s {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(format!("expected 0 or 1, got '{}'", other)),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_logging();
    let args = Args::parse();

    let walker_config = WalkerConfig {
        max_depth: args.level,
        draw_lines: args.draw_lines,
        on_error: if args.keep_going {
            ErrorPolicy::Continue
        } else {
            ErrorPolicy::Abort
        },
    };
    let walker = TreeWalker::new(walker_config);

    let result = if args.json {
        let mut formatter = JsonFormatter::new();
        let rendered = walker.render(&args.path, &mut formatter);
        // Print what was gathered even when the walk stopped early.
        print_json(&formatter)
            .map_err(TraversalError::from)
            .and(rendered)
    } else {
        let output_config = OutputConfig {
            use_color: should_use_color(args.color),
        };
        let mut formatter = StreamingFormatter::new(output_config);
        walker.render(&args.path, &mut formatter)
    };

    match result {
        Ok(summary) => report_skipped(&summary),
        Err(e) => {
            eprintln!("twig: {}", e);
            process::exit(1);
        }
    }
}

/// Report subtrees skipped under `--keep-going`; any skip fails the run.
fn report_skipped(summary: &RenderSummary) {
    if summary.errors.is_empty() {
        return;
    }
    for e in &summary.errors {
        eprintln!("twig: {}", e);
    }
    process::exit(1);
}
