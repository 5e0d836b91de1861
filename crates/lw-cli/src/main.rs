mod client;
mod server;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lw_core::{Balance, CATEGORIES, Category, ChartLayout, compute_slices, rebalance, render_chart};

/// Default bind address for `lw serve`, overridable via LW_ADDR.
const DEFAULT_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 4280);

#[derive(Parser)]
#[command(name = "lw", about = "Life-balance wheel CLI and widget server")]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the interactive widget over HTTP
    Serve {
        /// Address to bind (host:port)
        #[arg(long)]
        addr: Option<SocketAddr>,
    },

    /// Print a balance state with its slice angles
    Show {
        /// State as JSON, e.g. '{"work":25,"relationships":25,"spiritual":25,"health":25}'
        #[arg(long)]
        state: Option<String>,

        /// Emit machine-readable JSON instead of the table
        #[arg(long)]
        json: bool,
    },

    /// Apply slider moves (CATEGORY=VALUE) and print the result
    Set {
        /// Moves to apply in order, e.g. work=40 health=10
        #[arg(required = true)]
        assignments: Vec<String>,

        /// Starting state as JSON (defaults to the uniform split)
        #[arg(long)]
        state: Option<String>,

        /// Emit machine-readable JSON instead of the table
        #[arg(long)]
        json: bool,
    },

    /// Render the pie chart as an SVG document
    Svg {
        /// State as JSON (defaults to the uniform split)
        #[arg(long)]
        state: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Follow state changes from a running server
    Watch {
        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:4280")]
        url: String,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Serve { addr } => server::run(resolve_addr(*addr)?).await,
        Commands::Show { state, json } => cmd_show(state.as_deref(), *json),
        Commands::Set {
            assignments,
            state,
            json,
        } => cmd_set(assignments, state.as_deref(), *json),
        Commands::Svg { state, output } => cmd_svg(state.as_deref(), output.as_deref()),
        Commands::Watch { url } => client::watch(url).await,
    }
}

/// Bind address priority: --addr flag > LW_ADDR env > built-in default.
fn resolve_addr(flag: Option<SocketAddr>) -> Result<SocketAddr> {
    if let Some(addr) = flag {
        return Ok(addr);
    }
    match std::env::var("LW_ADDR") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("invalid LW_ADDR '{raw}'")),
        Err(_) => Ok(DEFAULT_ADDR),
    }
}

/// Parse and screen an externally supplied state, defaulting to the uniform
/// split when none is given.
fn parse_state(raw: Option<&str>) -> Result<Balance> {
    let Some(raw) = raw else {
        return Ok(Balance::default());
    };
    let balance = Balance::from_json(raw).context("invalid state JSON")?;
    balance.validate().context("state rejected")?;
    Ok(balance)
}

/// Parse a single CATEGORY=VALUE move.
fn parse_assignment(raw: &str) -> Result<(Category, i32)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("expected CATEGORY=VALUE, got '{raw}'"))?;
    let category: Category = key.trim().parse()?;
    let value: i32 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid value in '{raw}'"))?;
    Ok((category, value))
}

fn print_state(balance: &Balance, json: bool) -> Result<()> {
    let slices = compute_slices(balance, &CATEGORIES);

    if json {
        let out = serde_json::json!({
            "state": balance,
            "total": balance.total(),
            "slices": slices,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for (info, slice) in CATEGORIES.iter().zip(&slices) {
        println!(
            "{:<15} {:>3}%  {:>6.1}°  {}",
            format!("{}:", info.category.as_str()),
            balance.get(info.category),
            slice.span(),
            info.label,
        );
    }
    println!("{:<15} {:>3}%", "total:", balance.total());
    Ok(())
}

fn cmd_show(state: Option<&str>, json: bool) -> Result<()> {
    let balance = parse_state(state)?;
    print_state(&balance, json)
}

fn cmd_set(assignments: &[String], state: Option<&str>, json: bool) -> Result<()> {
    let mut balance = parse_state(state)?;
    for raw in assignments {
        let (category, value) = parse_assignment(raw)?;
        balance = rebalance(balance, category, value);
        tracing::debug!(
            "applied {} -> {}: now {:?}",
            category.as_str(),
            value,
            balance
        );
    }
    print_state(&balance, json)
}

fn cmd_svg(state: Option<&str>, output: Option<&std::path::Path>) -> Result<()> {
    let balance = parse_state(state)?;
    let svg = render_chart(&balance, &CATEGORIES, &ChartLayout::default());

    match output {
        Some(path) => {
            std::fs::write(path, &svg)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => print!("{svg}"),
    }
    Ok(())
}
