use analytics::{AnalyticsEngine, FilterValue};
use api_client::{GridApiClient, GridDataSource};
use charts::{BoxGroup, ChartRenderer, ScatterPoint};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use core_types::{Dataset, Scalar};
use indicatif::{ProgressBar, ProgressStyle};
use reporting::{AnalyticsReport, ReportWriter};
use sample_data::SampleDataGenerator;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The main entry point for the omni-grid analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go through tracing; user-facing output stays on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = configuration::load_config()?;

    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, config).await?,
        Commands::FetchMetrics => handle_fetch_metrics(config).await?,
        Commands::Generate(args) => handle_generate(args, config)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Fetches, analyzes, and visualizes omni-grid data.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the complete workflow: load data, analyze, render charts, write the report.
    Analyze(AnalyzeArgs),
    /// Fetch the live metrics document from the grid API and print it.
    FetchMetrics,
    /// Emit generated sample records as JSON on stdout.
    Generate(GenerateArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Skip the API entirely and analyze generated sample data.
    #[arg(long)]
    sample: bool,

    /// How many sample records to generate (fallback and --sample mode).
    #[arg(long)]
    records: Option<usize>,

    /// Generator seed; the same seed reproduces the same dataset.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured output directory.
    #[arg(long)]
    output: Option<String>,
}

#[derive(Parser)]
struct GenerateArgs {
    /// How many records to generate.
    #[arg(long)]
    records: Option<usize>,

    /// Generator seed.
    #[arg(long)]
    seed: Option<u64>,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Handles the orchestration of the complete analysis workflow.
async fn handle_analyze(args: AnalyzeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(records) = args.records {
        config.data.num_records = records;
    }
    if let Some(seed) = args.seed {
        config.data.seed = seed;
    }
    if let Some(output) = args.output {
        config.output.directory = output;
    }

    let use_sample = args.sample || config.data.use_sample_data;
    let (records, from_api) = load_records(&config, use_sample).await?;
    println!("Loaded {} records ({})", records.len(), if from_api { "grid API" } else { "sample generator" });

    let dataset = Dataset::from_records(records)?;
    let engine = AnalyticsEngine::new(dataset)?;

    print_overview(&engine);
    print_summary_statistics(&engine);
    print_quality(&engine);
    print_top_records(&engine, "value", 5)?;

    let chart_files = generate_charts(&engine, &config, !from_api)?;

    let writer = ReportWriter::new(&config.output.directory)?;
    let report = AnalyticsReport::from_engine(&engine, &["category", "region", "status", "priority"]);
    let report_path = writer.write(&report, "analytics_report.json")?;

    println!("\nAnalysis complete.");
    for file in &chart_files {
        println!("  - {}", file.display());
    }
    println!("  - {}", report_path.display());

    Ok(())
}

/// Loads grid records from the API when it is reachable, falling back to the
/// seeded sample generator otherwise. Returns the records and whether they
/// came from the live API.
async fn load_records(
    config: &Config,
    use_sample: bool,
) -> anyhow::Result<(Vec<BTreeMap<String, Scalar>>, bool)> {
    if use_sample {
        return Ok((generate_records(config), false));
    }

    let client = GridApiClient::new(&config.api)?;
    if !client.health_check().await {
        tracing::warn!("grid API is not reachable, falling back to sample data");
        return Ok((generate_records(config), false));
    }

    match client.fetch_grid().await {
        Ok(records) => Ok((records, true)),
        Err(e) => {
            tracing::warn!(error = %e, "grid fetch failed, falling back to sample data");
            Ok((generate_records(config), false))
        }
    }
}

fn generate_records(config: &Config) -> Vec<BTreeMap<String, Scalar>> {
    SampleDataGenerator::new(config.data.seed).grid_records(config.data.num_records)
}

// ==============================================================================
// Terminal Output
// ==============================================================================

fn print_overview(engine: &AnalyticsEngine) {
    let dataset = engine.dataset();
    println!("\n=== DATA OVERVIEW ===");
    println!("Total records: {}", dataset.len());

    let mut table = Table::new();
    table.set_header(
        dataset
            .schema()
            .columns()
            .iter()
            .map(|c| c.name.clone())
            .collect::<Vec<String>>(),
    );
    for record in dataset.records().iter().take(3) {
        table.add_row(record.values().iter().map(ToString::to_string));
    }
    println!("{table}");
}

fn print_summary_statistics(engine: &AnalyticsEngine) {
    println!("\n=== SUMMARY STATISTICS ===");
    let mut table = Table::new();
    table.set_header(vec!["column", "count", "mean", "std_dev", "min", "median", "max"]);
    for (column, stats) in engine.summary_statistics() {
        table.add_row(vec![
            column,
            stats.count.to_string(),
            format!("{:.2}", stats.mean),
            format!("{:.2}", stats.std_dev),
            format!("{:.2}", stats.min),
            format!("{:.2}", stats.median),
            format!("{:.2}", stats.max),
        ]);
    }
    println!("{table}");
}

fn print_quality(engine: &AnalyticsEngine) {
    let quality = engine.data_quality_report();
    println!("\n=== DATA QUALITY ===");
    println!("Rows: {}", quality.total_rows);
    println!("Columns: {}", quality.total_columns);
    println!("Duplicate rows: {}", quality.duplicate_rows);
    let missing: usize = quality.missing_values.values().sum();
    if missing > 0 {
        for (column, count) in quality.missing_values.iter().filter(|&(_, &c)| c > 0) {
            println!("Missing in '{}': {}", column, count);
        }
    } else {
        println!("No missing values detected");
    }
}

fn print_top_records(engine: &AnalyticsEngine, column: &str, n: usize) -> anyhow::Result<()> {
    if !engine.dataset().schema().contains(column) {
        return Ok(());
    }
    println!("\n=== TOP {} BY {} ===", n, column.to_uppercase());
    let mut table = Table::new();
    table.set_header(
        engine
            .dataset()
            .schema()
            .columns()
            .iter()
            .map(|c| c.name.clone())
            .collect::<Vec<String>>(),
    );
    for record in engine.top_n(column, n)? {
        table.add_row(record.values().iter().map(ToString::to_string));
    }
    println!("{table}");
    Ok(())
}

// ==============================================================================
// Chart Generation
// ==============================================================================

/// Renders every chart the dataset supports and returns the written paths.
fn generate_charts(
    engine: &AnalyticsEngine,
    config: &Config,
    include_sample_series: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    println!("\n=== GENERATING CHARTS ===");
    let renderer = ChartRenderer::new(&config.output.directory)?;
    let schema = engine.dataset().schema();

    let progress = ProgressBar::new(8);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut sections: Vec<(String, PathBuf)> = Vec::new();

    if schema.contains("category") && schema.contains("value") {
        progress.set_message("category totals");
        let totals = engine.aggregate_by_category("category", "value", "sum")?;
        let path = renderer.bar_chart(
            &totals,
            "Total Value by Category",
            "Category",
            "Total Value",
            "category_distribution.svg",
        )?;
        sections.push(("Total Value by Category".to_string(), path));
    }
    progress.inc(1);

    if schema.contains("region") {
        progress.set_message("region distribution");
        let distribution = engine.categorical_distribution("region")?;
        let path = renderer.pie_chart(
            &distribution,
            "Distribution by Region",
            "region_distribution.svg",
        )?;
        sections.push(("Distribution by Region".to_string(), path));
    }
    progress.inc(1);

    if schema.contains("status") && schema.contains("value") {
        progress.set_message("value by status");
        let groups = box_groups(engine, "status", "value")?;
        if !groups.is_empty() {
            let path = renderer.box_plot(
                &groups,
                "Value Distribution by Status",
                "Value",
                "value_by_status.svg",
            )?;
            sections.push(("Value Distribution by Status".to_string(), path));
        }
    }
    progress.inc(1);

    if schema.contains("value") && schema.contains("score") {
        progress.set_message("value vs score");
        let points = scatter_points(engine.dataset(), "value", "score", "category");
        if !points.is_empty() {
            let path = renderer.scatter_plot(
                &points,
                "Value vs Score by Category",
                "Value",
                "Score",
                "value_vs_score.svg",
            )?;
            sections.push(("Value vs Score by Category".to_string(), path));
        }
    }
    progress.inc(1);

    if schema.contains("value") {
        progress.set_message("value histogram");
        let values: Vec<f64> = engine
            .dataset()
            .column("value")
            .map(|iter| iter.filter_map(Scalar::as_f64).collect())
            .unwrap_or_default();
        if !values.is_empty() {
            let path =
                renderer.histogram(&values, 30, "Value Distribution", "Value", "value_histogram.svg")?;
            sections.push(("Value Distribution".to_string(), path));
        }
    }
    progress.inc(1);

    let matrix = engine.correlation_matrix();
    if !matrix.is_empty() {
        progress.set_message("correlation heatmap");
        let path = renderer.heatmap(&matrix, "Correlation Matrix", "correlation_heatmap.svg")?;
        sections.push(("Correlation Matrix".to_string(), path));
    }
    progress.inc(1);

    if include_sample_series {
        progress.set_message("daily trend");
        let series = SampleDataGenerator::new(config.data.seed).time_series(50);
        let path = renderer.line_chart(&series, "Daily Value Trend", "daily_trend.svg")?;
        sections.push(("Daily Value Trend".to_string(), path));
    }
    progress.inc(1);

    progress.set_message("dashboard");
    let dashboard = renderer.dashboard(&sections, "Omni-Grid Dashboard", "dashboard.html")?;
    progress.inc(1);
    progress.finish_with_message("charts complete");

    let mut files: Vec<PathBuf> = sections.into_iter().map(|(_, path)| path).collect();
    files.push(dashboard);
    Ok(files)
}

/// Five-number summaries of `value_column` for each distinct value of
/// `category_column`, for the box plot.
fn box_groups(
    engine: &AnalyticsEngine,
    category_column: &str,
    value_column: &str,
) -> anyhow::Result<Vec<BoxGroup>> {
    let mut groups = Vec::new();
    for entry in engine.categorical_distribution(category_column)? {
        let mut criteria = BTreeMap::new();
        criteria.insert(
            category_column.to_string(),
            FilterValue::One(Scalar::Text(entry.value.clone())),
        );
        let subset = engine.filter(&criteria)?;
        let sub_engine = AnalyticsEngine::new(subset)?;
        match sub_engine.percentiles(value_column, &[0.0, 25.0, 50.0, 75.0, 100.0]) {
            Ok(p) => groups.push(BoxGroup {
                label: entry.value,
                min: p[0].value,
                q1: p[1].value,
                median: p[2].value,
                q3: p[3].value,
                max: p[4].value,
            }),
            Err(e) => {
                tracing::debug!(group = %entry.value, error = %e, "skipping box-plot group");
            }
        }
    }
    Ok(groups)
}

/// Rows where both coordinates are present, labelled by the grouping column.
fn scatter_points(dataset: &Dataset, x: &str, y: &str, group: &str) -> Vec<ScatterPoint> {
    let (Some(xi), Some(yi)) = (dataset.schema().position(x), dataset.schema().position(y))
    else {
        return Vec::new();
    };
    let gi = dataset.schema().position(group);

    dataset
        .records()
        .iter()
        .filter_map(|record| {
            let x = record.values()[xi].as_f64()?;
            let y = record.values()[yi].as_f64()?;
            let group = gi.and_then(|i| match &record.values()[i] {
                Scalar::Missing => None,
                value => Some(value.to_string()),
            });
            Some(ScatterPoint { x, y, group })
        })
        .collect()
}

// ==============================================================================
// Other Commands
// ==============================================================================

async fn handle_fetch_metrics(config: Config) -> anyhow::Result<()> {
    let client = GridApiClient::new(&config.api)?;
    let metrics = client.fetch_metrics().await?;
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}

fn handle_generate(args: GenerateArgs, config: Config) -> anyhow::Result<()> {
    let records = args.records.unwrap_or(config.data.num_records);
    let seed = args.seed.unwrap_or(config.data.seed);
    let rows = SampleDataGenerator::new(seed).grid_records(records);
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
