mod snapshot;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use pantryscout_core::{
    expiring_entries, Config, ExportFormat, ExpiryNotice, ReportExporter, ReportPeriod,
    RecipeMatcher, UrgencyScorer, WasteReportAggregator,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pantryscout")]
#[command(
    version,
    about = "Food inventory analytics: expiry urgency, recipe matching, waste reports",
    long_about = None
)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "PANTRYSCOUT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Score how urgently expiring items need attention
    Urgency {
        /// Inventory snapshot (JSON)
        #[arg(long)]
        inventory: PathBuf,
        /// Date to score against (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Days ahead that count as expiring
        #[arg(long)]
        lookahead: Option<u32>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Rank recipes by how many of their ingredients are on hand
    Recipes {
        /// Recipe catalog (JSON)
        #[arg(long)]
        catalog: PathBuf,
        /// Inventory snapshot to take ingredients from
        #[arg(long, required_unless_present = "ingredient")]
        inventory: Option<PathBuf>,
        /// Ingredient names to match, instead of an inventory
        #[arg(long, conflicts_with = "inventory")]
        ingredient: Vec<String>,
        /// Only use items that are about to expire
        #[arg(long, requires = "inventory")]
        expiring_only: bool,
        #[arg(long)]
        today: Option<NaiveDate>,
        #[arg(long)]
        lookahead: Option<u32>,
        /// Minimum match percentage (0-100)
        #[arg(long)]
        min_match: Option<f64>,
        /// Maximum number of recipes to show
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Summarize food waste over a period
    Report {
        /// Inventory snapshot (JSON)
        #[arg(long)]
        inventory: PathBuf,
        /// weekly or monthly, ending today
        #[arg(long, conflicts_with = "from")]
        period: Option<ReportPeriod>,
        /// Custom period start
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// Custom period end
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
        #[arg(long)]
        today: Option<NaiveDate>,
        /// json, csv or md (defaults to the output extension, then md)
        #[arg(long)]
        format: Option<ExportFormat>,
        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pantryscout=info,pantryscout_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Urgency {
            inventory,
            today,
            lookahead,
            json,
        } => {
            let today = today.unwrap_or_else(local_today);
            let items = snapshot::load_inventory(&inventory)?;
            let entries = expiring_entries(
                &items,
                today,
                lookahead.unwrap_or(config.expiry.lookahead_days),
            );
            let score = UrgencyScorer::score(&entries);
            tracing::info!(
                "Urgency {} ({}) for {} expiring items",
                score.urgency,
                score.tier,
                entries.len()
            );

            if json {
                let body = serde_json::json!({ "entries": entries, "score": score });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                if entries.is_empty() {
                    println!("Nothing expiring soon.");
                }
                for entry in &entries {
                    println!("• {} - {}", entry.name, ExpiryNotice::for_entry(entry));
                }
                println!("Food waste risk: {}/100 ({})", score.urgency, score.tier);
            }
        }
        Commands::Recipes {
            catalog,
            inventory,
            ingredient,
            expiring_only,
            today,
            lookahead,
            min_match,
            limit,
            json,
        } => {
            let recipes = snapshot::load_catalog(&catalog)?;
            let available = match inventory {
                Some(path) => {
                    let today = today.unwrap_or_else(local_today);
                    let items = snapshot::load_inventory(&path)?;
                    if expiring_only {
                        let lookahead = lookahead.unwrap_or(config.expiry.lookahead_days);
                        expiring_entries(&items, today, lookahead)
                            .into_iter()
                            .map(|e| e.name)
                            .collect()
                    } else {
                        items
                            .iter()
                            .filter(|item| !item.resolved_status(today).is_terminal())
                            .map(|item| item.name.clone())
                            .collect()
                    }
                }
                None => ingredient,
            };

            let matcher = RecipeMatcher::new(
                min_match.unwrap_or(config.matching.min_match_percentage),
                limit.or(config.matching.max_suggestions),
            );
            let results = matcher
                .suggest(&available, &recipes)
                .context("Recipe matching failed")?;
            tracing::info!("{} recipes matched {} ingredients", results.len(), available.len());

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("No recipes match what you have.");
            } else {
                for result in &results {
                    let matched: Vec<&str> =
                        result.matched_ingredients.iter().map(String::as_str).collect();
                    println!(
                        "{:>3.0}%  {}  [{}]",
                        result.match_percentage,
                        result.recipe.name,
                        matched.join(", ")
                    );
                }
            }
        }
        Commands::Report {
            inventory,
            period,
            from,
            to,
            today,
            format,
            output,
        } => {
            let today = today.unwrap_or_else(local_today);
            let items = snapshot::load_inventory(&inventory)?;
            let report = match (from, to) {
                (Some(start), Some(end)) => {
                    WasteReportAggregator::aggregate(&items, start, end, today)?
                }
                _ => {
                    let period = period.unwrap_or(config.report.default_period);
                    tracing::info!("Building {} report", period.display_name().to_lowercase());
                    WasteReportAggregator::aggregate_period(&items, period, today)?
                }
            };

            let format = format
                .or_else(|| output.as_deref().and_then(format_from_path))
                .unwrap_or(ExportFormat::Markdown);
            let rendered = ReportExporter::render(&report, format)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("Failed to write report to {}", path.display()))?;
                    tracing::info!("Report written to {}", path.display());
                }
                None => print!("{}", rendered),
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    Ok(config)
}

fn format_from_path(path: &Path) -> Option<ExportFormat> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(ExportFormat::from_extension)
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
