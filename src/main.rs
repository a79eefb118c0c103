use anyhow::{Context, Result};
use clap::Parser;
use phylotext::render::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use phylotext::{TextView, newick};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Quick text view of phylogenetic trees given in Newick format
#[derive(Parser, Debug)]
#[command(name = "phylotext")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File with one or more Newick trees (default: stdin)
    file: Option<PathBuf>,

    /// Grid width in columns
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Grid height in rows
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Draw every branch with unit length
    #[arg(short, long)]
    topology_only: bool,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let contents = match &cli.file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let trees = newick::parse_bytes(contents).context("Failed to parse Newick input")?;
    tracing::info!(num_trees = trees.len(), "Rendering trees");

    let mut view = TextView::new()
        .with_width(cli.width)
        .with_height(cli.height);
    if cli.topology_only {
        view = view.with_topology_only();
    }

    let mut stdout = io::stdout().lock();
    for (index, mut tree) in trees.into_iter().enumerate() {
        view.write_to(&mut tree, &mut stdout)
            .with_context(|| format!("Failed to render tree {}", index + 1))?;
    }

    Ok(())
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG takes precedence over -d flags
    let env_filter = EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["phylotext", "-w", "60", "-H", "12", "-t", "-dd", "trees.nwk"]);
        assert_eq!(cli.width, 60);
        assert_eq!(cli.height, 12);
        assert!(cli.topology_only);
        assert_eq!(cli.debug, 2);
        assert_eq!(cli.file, Some(PathBuf::from("trees.nwk")));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["phylotext"]);
        assert_eq!(cli.width, DEFAULT_WIDTH);
        assert_eq!(cli.height, DEFAULT_HEIGHT);
        assert!(!cli.topology_only);
        assert!(cli.file.is_none());
    }
}
