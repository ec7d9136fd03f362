//! Liftchart CLI
//!
//! Command-line interface over the powerlifting records dataset:
//! - Render the chart as an SVG document
//! - Print aggregated best-per-year series
//! - List the most frequent federations
//! - Report which filter combinations the dataset carries

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use liftchart::chart::{render, to_svg, TimeDomain, TimeWindow, ViewState};
use liftchart::config::{generate_default_config, Config, LoggingConfig};
use liftchart::dataset::{load, Category, Dataset, DatasetSource, Equipment, Sex, Tested};
use liftchart::query::{FederationFilter, QueryExecutor, Selection, SeriesPair};

#[derive(Parser)]
#[command(name = "liftchart")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Powerlifting records over time")]
#[command(long_about = "Liftchart charts the best powerlifting result per year for men and women.\nFilter by category, federation, equipment and tested status, and zoom into a range of years.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dataset file path or http(s) URL (overrides the config file)
    #[arg(short, long, global = true)]
    pub data: Option<String>,

    /// Config file (default: <config dir>/liftchart/config.toml, ./liftchart.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: svg or json for render; table, json or csv otherwise
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Svg,
}

impl OutputFormat {
    /// Formats of `render`; the first is the default
    const SCENE: &'static [OutputFormat] = &[OutputFormat::Svg, OutputFormat::Json];
    /// Formats of the listing commands; the first is the default
    const LISTING: &'static [OutputFormat] =
        &[OutputFormat::Table, OutputFormat::Json, OutputFormat::Csv];

    /// Pick the requested format if the command supports it
    fn resolve(requested: Option<Self>, supported: &[Self]) -> anyhow::Result<Self> {
        let Some(&default) = supported.first() else {
            bail!("Command has no output formats");
        };
        match requested {
            None => Ok(default),
            Some(format) if supported.contains(&format) => Ok(format),
            Some(format) => bail!(
                "Format {} is not supported here (use one of: {})",
                format.name(),
                supported.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
            ),
        }
    }

    fn name(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Svg => "svg",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Category (totals_all, totals_open, totals_tested, dots, squat, bench, deadlift)
    #[arg(short = 'C', long, default_value = "totals_all")]
    pub category: String,

    /// Federation name, or "all"
    #[arg(short = 'F', long, default_value = "all")]
    pub federation: String,

    /// Equipment (all, raw, wraps, single-ply, multi-ply, unlimited)
    #[arg(short, long, default_value = "all")]
    pub equipment: String,

    /// Tested status (all, yes, no)
    #[arg(short, long, default_value = "all")]
    pub tested: String,
}

impl SelectionArgs {
    fn to_selection(&self) -> anyhow::Result<Selection> {
        let category: Category = self.category.parse()?;
        let equipment: Equipment = self.equipment.parse()?;
        let tested: Tested = self.tested.parse()?;

        Ok(Selection::new(category)
            .federation(FederationFilter::parse(&self.federation))
            .equipment(equipment)
            .tested(tested))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the chart as SVG (or the computed scene as JSON with --format json)
    Render {
        #[command(flatten)]
        selection: SelectionArgs,
        /// First year of the visible window
        #[arg(long)]
        from: Option<i32>,
        /// Last year of the visible window
        #[arg(long)]
        to: Option<i32>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the best-per-year series for a selection
    Series {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// List the most frequent federations
    Federations {
        /// Number of federations (default: chart.top_federations)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show which filter combinations exist per category
    Coverage,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(data) = &cli.data {
        config.data.source = data.clone();
    }

    init_logging(&config.logging);

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Wrote default config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }

        Commands::Render {
            selection,
            from,
            to,
            output,
        } => {
            let format = OutputFormat::resolve(cli.format, OutputFormat::SCENE)?;
            let dataset = load_dataset(&config).await?;
            let selection = selection.to_selection()?;
            let domain = brushed_domain(&config, from, to)?;
            let view = ViewState::new(selection).with_domain(domain);

            let scene = render(&dataset, &view, &config.chart);
            if scene.fell_back {
                report_fallback(&view.selection);
            }

            let content = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&scene)?,
                _ => to_svg(&scene, &config.chart),
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!(
                        "Rendered {} ({} male, {} female years) to {:?}",
                        view.selection.category.label(),
                        scene.male_count,
                        scene.female_count,
                        path
                    );
                }
                None => print!("{}", content),
            }
        }

        Commands::Series { selection } => {
            let format = OutputFormat::resolve(cli.format, OutputFormat::LISTING)?;
            let dataset = load_dataset(&config).await?;
            let selection = selection.to_selection()?;
            let series = QueryExecutor::new(&dataset).execute(&selection);
            if series.fell_back {
                report_fallback(&selection);
            }

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&series)?),
                OutputFormat::Csv => print_series_csv(&series)?,
                _ => print_series_table(&series),
            }
        }

        Commands::Federations { limit } => {
            let format = OutputFormat::resolve(cli.format, OutputFormat::LISTING)?;
            let dataset = load_dataset(&config).await?;
            let limit = limit.unwrap_or(config.chart.top_federations);
            let ranked = dataset.top_federations(limit);

            match format {
                OutputFormat::Json => {
                    let rows: Vec<_> = ranked
                        .iter()
                        .map(|(name, count)| serde_json::json!({ "federation": name, "records": count }))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    writer.write_record(["federation", "records"])?;
                    for (name, count) in &ranked {
                        writer.write_record([name.as_str(), count.to_string().as_str()])?;
                    }
                    writer.flush()?;
                }
                _ => {
                    if ranked.is_empty() {
                        println!("The dataset lists no federations.");
                    } else {
                        println!("{:<4} {:<20} {:>10}", "#", "Federation", "Records");
                        println!("{}", "-".repeat(36));
                        for (i, (name, count)) in ranked.iter().enumerate() {
                            println!("{:<4} {:<20} {:>10}", i + 1, name, count);
                        }
                    }
                }
            }
        }

        Commands::Coverage => {
            let format = OutputFormat::resolve(cli.format, OutputFormat::LISTING)?;
            let dataset = load_dataset(&config).await?;
            print_coverage(&dataset, format)?;
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("liftchart={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn load_dataset(config: &Config) -> anyhow::Result<Dataset> {
    let source: DatasetSource = config.data.source();
    load(&source)
        .await
        .with_context(|| format!("Failed to load dataset from {}", source))
}

/// Time domain for `--from`/`--to`; missing ends default to the configured range
fn brushed_domain(config: &Config, from: Option<i32>, to: Option<i32>) -> anyhow::Result<TimeDomain> {
    if from.is_none() && to.is_none() {
        return Ok(TimeDomain::Full);
    }

    let from = from.unwrap_or(config.chart.start_year);
    let to = to.unwrap_or(config.chart.end_year);
    if from > to {
        bail!("--from {} is after --to {}", from, to);
    }

    let window = TimeWindow::full_years(from, to);
    if window == config.chart.full_window() {
        Ok(TimeDomain::Full)
    } else {
        Ok(TimeDomain::Brushed(window))
    }
}

fn report_fallback(selection: &Selection) {
    eprintln!(
        "note: {} has no {} records, showing all equipment and tested status",
        selection.category,
        selection.filter_key()
    );
}

#[derive(Serialize)]
struct SeriesRow<'a> {
    sex: &'a str,
    year: i32,
    year_date: String,
    best: Option<f64>,
    bodyweight: Option<f64>,
    name: Option<&'a str>,
    federation: Option<&'a str>,
    equipment: Option<&'a str>,
    meet: Option<&'a str>,
}

fn series_rows(series: &SeriesPair) -> Vec<SeriesRow<'_>> {
    Sex::all()
        .iter()
        .flat_map(|&sex| series.get(sex).iter())
        .map(|r| SeriesRow {
            sex: r.sex.code(),
            year: r.year,
            year_date: r.year_date.format("%Y-%m-%d").to_string(),
            best: r.best,
            bodyweight: r.bodyweight,
            name: r.name.as_deref(),
            federation: r.federation.as_deref(),
            equipment: r.equipment.as_deref(),
            meet: r.meet.as_deref(),
        })
        .collect()
}

fn print_series_csv(series: &SeriesPair) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in series_rows(series) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_series_table(series: &SeriesPair) {
    if series.is_empty() {
        println!("No records for this selection.");
        return;
    }

    println!(
        "{:<4} {:<6} {:>10} {:>8}  {:<28} {}",
        "Sex", "Year", "Best", "BW", "Name", "Federation"
    );
    println!("{}", "-".repeat(72));

    let fmt_opt = |v: Option<f64>| v.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string());
    for row in series_rows(series) {
        println!(
            "{:<4} {:<6} {:>10} {:>8}  {:<28} {}",
            row.sex,
            row.year,
            fmt_opt(row.best),
            fmt_opt(row.bodyweight),
            truncate(row.name.unwrap_or("-"), 28),
            row.federation.unwrap_or("-")
        );
    }
}

fn print_coverage(dataset: &Dataset, format: OutputFormat) -> anyhow::Result<()> {
    let coverage = dataset.coverage();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&coverage)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["category", "filter", "present"])?;
            for entry in &coverage {
                for filter in &entry.present {
                    writer.write_record([entry.category.key(), filter.to_string().as_str(), "true"])?;
                }
                for filter in &entry.missing {
                    writer.write_record([entry.category.key(), filter.to_string().as_str(), "false"])?;
                }
            }
            writer.flush()?;
        }
        _ => {
            println!("{:<16} {:>8} {:>11}", "Category", "Present", "Unfiltered");
            println!("{}", "-".repeat(37));
            for entry in &coverage {
                let total = entry.present.len() + entry.missing.len();
                println!(
                    "{:<16} {:>8} {:>11}",
                    entry.category.key(),
                    format!("{}/{}", entry.present.len(), total),
                    if entry.has_unfiltered { "yes" } else { "MISSING" }
                );
            }
            println!();
            println!("Missing combinations fall back to equipment_all_tested_all.");
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_defaults_per_command() {
        assert_eq!(
            OutputFormat::resolve(None, OutputFormat::SCENE).unwrap(),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::resolve(None, OutputFormat::LISTING).unwrap(),
            OutputFormat::Table
        );
        assert_eq!(
            OutputFormat::resolve(Some(OutputFormat::Json), OutputFormat::SCENE).unwrap(),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        let err = OutputFormat::resolve(Some(OutputFormat::Csv), OutputFormat::SCENE).unwrap_err();
        assert!(err.to_string().contains("csv"));
        assert!(OutputFormat::resolve(Some(OutputFormat::Svg), OutputFormat::LISTING).is_err());
    }

    #[test]
    fn test_unknown_format_fails_to_parse() {
        assert!(Cli::try_parse_from(["liftchart", "render", "--format", "xml"]).is_err());

        let cli = Cli::try_parse_from(["liftchart", "series", "-f", "csv"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Csv));
    }
}
