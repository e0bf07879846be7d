//! StockLens CLI: score, scan, pattern and config commands.
//!
//! Commands:
//! - `score`: indicators, score breakdown and factor signal for one symbol
//! - `scan`: evaluate the configured universe (or a symbol list) into a ranked snapshot
//! - `patterns`: candlestick matches over a symbol's history with forward statistics
//! - `config show` / `config check`: print the default config, validate a file
//!
//! Data comes from a directory of `<SYMBOL>.csv` files (`--data`) or, without
//! one, from deterministic synthetic bars.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use stocklens_core::indicators::{factor_signal, technical_breakdown};
use stocklens_core::patterns::{forward_outcomes, pattern_stats, scan_patterns, PatternKind};
use stocklens_core::scoring::{score_breakdown, ScoreCategory};
use stocklens_runner::{
    evaluate_symbol, evaluate_universe, evaluate_watchlist, CsvProvider, EvaluationConfig,
    FixedOpinionSource, OpinionSource, QuoteProvider, Snapshot, SyntheticProvider,
    UniverseConfig, Watchlist,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stocklens", about = "StockLens CLI: indicator scoring and sector scans")]
struct Cli {
    /// Log level used when RUST_LOG is unset (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single symbol.
    Score {
        symbol: String,

        /// Directory of <SYMBOL>.csv files. Synthetic bars when omitted.
        #[arg(long)]
        data: Option<PathBuf>,

        /// File holding a raw opinion response (JSON, optionally fenced).
        #[arg(long)]
        opinion: Option<PathBuf>,

        /// Trailing bars to evaluate.
        #[arg(long, default_value_t = 250)]
        days: usize,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Evaluate a universe into a ranked snapshot with sector summaries.
    Scan {
        /// Path to a TOML config file. Defaults plus a demo universe when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory of <SYMBOL>.csv files. Synthetic bars when omitted.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Evaluate only these symbols instead of the configured universe.
        #[arg(long, num_args = 1..)]
        symbols: Vec<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Detect candlestick patterns over a symbol's history.
    Patterns {
        symbol: String,

        #[arg(long)]
        data: Option<PathBuf>,

        #[arg(long, default_value_t = 250)]
        days: usize,

        /// Bars after a match used to measure its outcome.
        #[arg(long, default_value_t = 5)]
        horizon: usize,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Configuration helpers.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default configuration (with the demo universe) as TOML.
    Show,
    /// Validate a config file and print its hash.
    Check { path: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.json);

    match cli.command {
        Commands::Score {
            symbol,
            data,
            opinion,
            days,
            output,
        } => run_score(&symbol, data.as_deref(), opinion.as_deref(), days, output),
        Commands::Scan {
            config,
            data,
            symbols,
            output,
        } => run_scan(config.as_deref(), data.as_deref(), symbols, output),
        Commands::Patterns {
            symbol,
            data,
            days,
            horizon,
            output,
        } => run_patterns(&symbol, data.as_deref(), days, horizon, output),
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(),
            ConfigAction::Check { path } => run_config_check(&path),
        },
    }
}

/// RUST_LOG wins when set; otherwise `--log-level`.
fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn provider_for(data: Option<&Path>, days: usize) -> Box<dyn QuoteProvider> {
    match data {
        Some(dir) => Box::new(CsvProvider::new(dir)),
        None => {
            tracing::info!("no --data directory, using synthetic bars");
            Box::new(SyntheticProvider::new(days, Local::now().date_naive()))
        }
    }
}

fn run_score(
    symbol: &str,
    data: Option<&Path>,
    opinion_path: Option<&Path>,
    days: usize,
    output: OutputFormat,
) -> Result<()> {
    let provider = provider_for(data, days);

    let opinions = match opinion_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read opinion file '{}'", path.display()))?;
            Some(FixedOpinionSource::new().with_response(symbol, raw))
        }
        None => None,
    };
    let opinion_ref = opinions.as_ref().map(|o| o as &dyn OpinionSource);

    let scored = evaluate_symbol(provider.as_ref(), opinion_ref, symbol, None, days)
        .with_context(|| format!("evaluate '{symbol}'"))?;
    let bars = provider
        .fetch_history(symbol, days)
        .with_context(|| format!("load history for '{symbol}'"))?;

    let breakdown = score_breakdown(&scored.entity, &scored.indicators, scored.opinion.as_ref());
    let technical = technical_breakdown(scored.entity.price, &scored.indicators);
    let category = ScoreCategory::from_score(scored.score);
    let factors = factor_signal(&bars);

    match output {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "entity": scored,
                "breakdown": breakdown,
                "technical": technical,
                "category": category.label(),
                "factorSignal": factors,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Text => {
            let ind = &scored.indicators;
            println!(
                "{} ({})  price {:.2}  change {:+.2}%",
                scored.entity.name, symbol, scored.entity.price, scored.entity.change_percent
            );
            println!("  score      {:>6.1}  [{category}]", scored.score);
            println!(
                "  technical  {:>6.1}  (rsi {:.1}, macd {:.1}, bollinger {:.1}, ma {:.1}, trend {:.1}, cross {:.1})",
                breakdown.technical,
                technical.rsi,
                technical.macd,
                technical.bollinger,
                technical.moving_averages,
                technical.trend,
                technical.crossover
            );
            println!("  opinion    {:>6.1}", breakdown.opinion);
            println!(
                "  momentum   {:>6.1}  (volume ratio {:.2})",
                breakdown.momentum,
                scored.volume_ratio()
            );
            println!(
                "  RSI {:.1}  MACD {:.3}/{:.3}  BB {:.2}-{:.2}  SMA20/50/200 {:.2}/{:.2}/{:.2}",
                ind.rsi,
                ind.macd.macd,
                ind.macd.signal,
                ind.bollinger.lower,
                ind.bollinger.upper,
                ind.sma20,
                ind.sma50,
                ind.sma200
            );
            match factors {
                Some(signal) => println!(
                    "  factors    {:?} {:.0}  vpd {:.2} rsi {:.1} z {:.2}  {}",
                    signal.action,
                    signal.score,
                    signal.factors.vpd,
                    signal.factors.rsi,
                    signal.factors.z_score,
                    signal.reason
                ),
                None => println!("  factors    insufficient data"),
            }
        }
    }
    Ok(())
}

fn run_scan(
    config_path: Option<&Path>,
    data: Option<&Path>,
    symbols: Vec<String>,
    output: OutputFormat,
) -> Result<()> {
    let config = match config_path {
        Some(path) => EvaluationConfig::from_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => EvaluationConfig {
            universe: UniverseConfig::default_kr(),
            ..Default::default()
        },
    };
    let provider = provider_for(data, config.scan.history_days);

    let snapshot = if symbols.is_empty() {
        evaluate_universe(provider.as_ref(), None, &config)
    } else {
        let mut watchlist = Watchlist::new("cli");
        for symbol in &symbols {
            watchlist.add(symbol);
        }
        evaluate_watchlist(provider.as_ref(), None, &watchlist, &config)
    };

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        OutputFormat::Text => print_snapshot(&snapshot),
    }
    Ok(())
}

fn print_snapshot(snapshot: &Snapshot) {
    println!("provider {}  config {}", snapshot.provider, &snapshot.config_hash[..12]);
    println!();
    println!(
        "{:<4} {:<10} {:<14} {:>10} {:>8} {:>6}  category",
        "#", "symbol", "sector", "price", "chg%", "score"
    );
    for (i, e) in snapshot.ranked.iter().enumerate() {
        println!(
            "{:<4} {:<10} {:<14} {:>10.2} {:>+8.2} {:>6.1}  {}",
            i + 1,
            e.symbol(),
            e.entity.sector.as_deref().unwrap_or("-"),
            e.entity.price,
            e.entity.change_percent,
            e.score,
            ScoreCategory::from_score(e.score)
        );
    }

    if !snapshot.sectors.is_empty() {
        println!();
        for s in &snapshot.sectors {
            println!(
                "{:<14} {:?} ({:.0})  avg {:+.2}%  strong {}",
                s.category_key, s.trend, s.confidence, s.average_change, s.strong_count
            );
        }
    }

    if !snapshot.surging.is_empty() {
        println!();
        println!("surging:");
        for entry in &snapshot.surging {
            println!(
                "  {}. {}  +{:.1}% expected  [{}]",
                entry.rank,
                entry.entity.symbol(),
                entry.expected_growth,
                entry.catalyst_tags.join(", ")
            );
        }
    }

    for failure in &snapshot.failures {
        eprintln!("FAIL {}: {}", failure.symbol, failure.reason);
    }
}

fn run_patterns(
    symbol: &str,
    data: Option<&Path>,
    days: usize,
    horizon: usize,
    output: OutputFormat,
) -> Result<()> {
    let provider = provider_for(data, days);
    let bars = provider
        .fetch_history(symbol, days)
        .with_context(|| format!("load history for '{symbol}'"))?;

    let matches = scan_patterns(&bars);
    let stats: Vec<_> = PatternKind::ALL
        .iter()
        .map(|&kind| pattern_stats(kind, &forward_outcomes(&bars, &matches, kind, horizon)))
        .collect();

    match output {
        OutputFormat::Json => {
            let found: Vec<_> = matches
                .iter()
                .map(|(i, m)| serde_json::json!({ "time": bars[*i].time, "match": m }))
                .collect();
            let doc = serde_json::json!({ "symbol": symbol, "matches": found, "stats": stats });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Text => {
            for (i, m) in &matches {
                println!(
                    "{}  {:<18} conf {:>3.0}  close {:.2}",
                    bars[*i].time.date(),
                    format!("{:?}", m.pattern_id),
                    m.confidence,
                    m.price_at_match
                );
            }
            println!();
            println!("{horizon}-bar outcomes:");
            for s in &stats {
                println!(
                    "  {:<18} n={:<4} success {:>5.1}%  avg {:+.2}%",
                    format!("{:?}", s.pattern_id),
                    s.sample_size,
                    s.success_rate * 100.0,
                    s.avg_return
                );
            }
        }
    }
    Ok(())
}

fn run_config_show() -> Result<()> {
    let config = EvaluationConfig {
        universe: UniverseConfig::default_kr(),
        ..Default::default()
    };
    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_config_check(path: &Path) -> Result<()> {
    let config = EvaluationConfig::from_file(path)
        .with_context(|| format!("load config '{}'", path.display()))?;
    println!(
        "ok: {} sectors, {} symbols, hash {}",
        config.universe.sectors.len(),
        config.universe.symbol_count(),
        config.config_hash()
    );
    Ok(())
}
