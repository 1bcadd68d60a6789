use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crisismap_common::Config;
use crisismap_pipeline::export::{write_aggregate, write_records};
use crisismap_pipeline::gazetteer::GazetteerRecognizer;
use crisismap_pipeline::lexicon::LexiconScorer;
use crisismap_pipeline::pipeline::Pipeline;
use crisismap_pipeline::resolve::Resolver;
use crisismap_pipeline::source::{search_query, JsonlSource, CRISIS_KEYWORDS};
use nominatim_client::NominatimClient;

#[derive(Debug, Parser)]
#[command(name = "crisismap", about = "Classify and geolocate crisis-related posts")]
struct Args {
    /// JSON-Lines export of raw posts from the acquisition step.
    #[arg(long)]
    input: PathBuf,

    /// Where to write the flat record table (JSON Lines).
    #[arg(long, default_value = "crisis_posts.jsonl")]
    records_out: PathBuf,

    /// Where to write the aggregate (heatmap points + top locations).
    #[arg(long, default_value = "crisis_aggregate.json")]
    aggregate_out: PathBuf,

    /// Override the record-count bound from config.
    #[arg(long)]
    max_results: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("crisismap=info".parse()?))
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    info!("CrisisMap pipeline starting...");

    let geocoder = Arc::new(NominatimClient::new(
        config.nominatim_base_url.clone(),
        config.nominatim_user_agent.clone(),
    ));
    let resolver = Arc::new(Resolver::new(
        geocoder,
        config.geocode_interval,
        config.geocode_timeout,
    ));
    let pipeline = Pipeline::new(
        Arc::new(LexiconScorer::new()),
        Arc::new(GazetteerRecognizer::new()),
        resolver,
        config.concurrency,
        config.top_locations,
    );

    let source = JsonlSource::new(&args.input);
    let query = search_query(CRISIS_KEYWORDS);
    let max_results = args.max_results.unwrap_or(config.max_results);

    let run = pipeline.run_query(&source, &query, max_results).await?;

    let records_file = File::create(&args.records_out)
        .with_context(|| format!("creating {}", args.records_out.display()))?;
    write_records(BufWriter::new(records_file), &run.posts)?;
    info!(path = %args.records_out.display(), records = run.posts.len(), "Wrote record table");

    let aggregate_file = File::create(&args.aggregate_out)
        .with_context(|| format!("creating {}", args.aggregate_out.display()))?;
    write_aggregate(BufWriter::new(aggregate_file), &run.aggregate)?;
    info!(
        path = %args.aggregate_out.display(),
        heatmap_points = run.aggregate.heatmap_points.len(),
        "Wrote aggregate"
    );

    for entry in &run.aggregate.top_locations {
        info!(location = entry.name.as_str(), count = entry.count, "Top location");
    }
    info!(
        skipped = run.stats.skipped_malformed,
        located = run.stats.located,
        external_calls = run.stats.geocoding.external_calls,
        geocode_failures = run.stats.geocoding.failures,
        "Run finished"
    );

    Ok(())
}
