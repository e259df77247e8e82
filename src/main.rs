use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use svgpdtools::{
    MIN_COLUMNS, NormalizeOptions, SvgNormalizeOptions, collect_paths, format_path_view,
    normalize_svg, set_precision,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "svgpdtools")]
#[command(about = "Normalize and pretty-print SVG path data", long_about = None)]
struct Cli {
    /// SVG file to load (stdin if omitted)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Max length of the fractional part of numbers
    #[arg(short, long, global = true, default_value = "6")]
    precision: u8,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite path data to absolute coordinates, merging runs of the same
    /// command and splitting implicit line-tos out of move-tos
    Normalize(NormalizeArgs),

    /// Print each path element in a readable layout
    View(ViewArgs),
}

#[derive(Args)]
struct NormalizeArgs {
    /// Use relative coordinates
    #[arg(long)]
    repr_relative: bool,

    /// Apply each path's transform attribute to its data and remove the attribute
    #[arg(long)]
    collapse_transform_attribute: bool,

    /// Convert elliptical arcs to curves
    #[arg(long)]
    collapse_elliptical_arc: bool,

    /// Convert horizontal and vertical line-tos to line-tos
    #[arg(long)]
    collapse_hv_lineto: bool,

    /// Fold line-tos into the move-to before them
    #[arg(long)]
    allow_implicit_lineto: bool,
}

#[derive(Args)]
struct ViewArgs {
    /// Terminal width (default: $COLUMNS, else 80)
    #[arg(long)]
    columns: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("svgpdtools: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    set_precision(cli.precision);

    let input = match &cli.file {
        Some(path) => {
            debug!(path = %path.display(), "reading input");
            fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let output = match &cli.command {
        Command::Normalize(args) => {
            let options = SvgNormalizeOptions {
                normalize: NormalizeOptions {
                    repr_relative: args.repr_relative,
                    collapse_hv_lineto: args.collapse_hv_lineto,
                    collapse_elliptical_arc: args.collapse_elliptical_arc,
                    allow_implicit_lineto: args.allow_implicit_lineto,
                },
                collapse_transform_attribute: args.collapse_transform_attribute,
                precision: cli.precision,
            };
            normalize_svg(&input, &options)?
        }
        Command::View(args) => {
            let columns = args.columns.unwrap_or_else(terminal_columns).max(MIN_COLUMNS);
            debug!(columns, "viewing paths");
            let mut out = String::new();
            for view in collect_paths(&input)? {
                out.push_str(&format_path_view(&view, columns, cli.precision)?);
                out.push('\n');
            }
            out
        }
    };

    match &cli.output {
        Some(path) => fs::write(path, &output)?,
        None => io::stdout().write_all(output.as_bytes())?,
    }

    Ok(())
}

fn terminal_columns() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(80)
}
