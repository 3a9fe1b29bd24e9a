//! The `run` subcommand - the full aggregation pipeline
//!
//! fetch -> dedupe -> filter -> (probe -> select) -> categorize -> write.
//! Everything network-facing degrades quietly; the run only fails when no
//! descriptors were obtained at all or an artifact cannot be written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use subtrawl_config::{AggregateMode, Config};
use subtrawl_pipeline::{
    AggregatePolicy, Aggregator, AggregatorConfig, FilterPolicy, LatencyProber, ProberConfig,
    QualityFilter, Selection, Selector, SelectorConfig, categorize, categorize_by_country,
    rank_by_priority,
};
use subtrawl_protocol::{NodeDescriptor, Scheme, Subscription};
use subtrawl_sources::{FetcherConfig, SourceFetcher};

use crate::output;

/// Arguments for the run subcommand
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Output directory, overriding the config file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the pipeline end to end
pub async fn run(config: Config, args: RunArgs) -> Result<()> {
    anyhow::ensure!(
        !config.sources.is_empty(),
        "no sources configured - add source URLs to the config file"
    );

    let out_dir = args.output.unwrap_or_else(|| config.output.dir.clone());

    // Fetch and merge.
    let fetcher = SourceFetcher::new(
        FetcherConfig::default()
            .with_timeout(config.fetch.timeout)
            .with_max_retry(config.fetch.max_retry)
            .with_user_agent(&config.fetch.user_agent),
    )
    .context("failed to build HTTP client")?;
    let aggregator = Aggregator::new(
        fetcher,
        AggregatorConfig::default().with_workers(config.fetch.workers),
    );
    let aggregated = aggregator.aggregate(&config.sources).await?;

    // Filter.
    let filter = QualityFilter::new(filter_policy(&config));
    let nodes = filter.apply(aggregated.nodes);
    tracing::info!(
        kept = nodes.len(),
        dropped = aggregated.summary.nodes_unique - nodes.len(),
        "quality filter applied"
    );

    if nodes.is_empty() {
        tracing::warn!("every descriptor was filtered out, nothing to write");
        return Ok(());
    }

    // Rank and select.
    let selection = select_best(&config, &nodes).await;
    tracing::info!(
        best = selection.nodes.len(),
        used_fallback = selection.used_fallback,
        "best nodes selected"
    );

    // Build artifacts.
    let line_ending = config.output.line_ending;
    let mut artifacts = vec![
        Subscription::build(config.output.all_file.clone(), nodes.clone(), line_ending),
        Subscription::build(config.output.best_file.clone(), selection.nodes, line_ending),
    ];

    if config.output.per_protocol {
        let categorized = categorize(&nodes);
        for (tag, bucket) in categorized.buckets() {
            artifacts.push(Subscription::build(
                config.output.protocol_file(tag),
                bucket.to_vec(),
                line_ending,
            ));
        }
    }

    if config.output.per_country {
        for (code, bucket) in categorize_by_country(&nodes) {
            artifacts.push(Subscription::build(
                config.output.country_file(&code),
                bucket,
                line_ending,
            ));
        }
    }

    let written = output::write_artifacts(&out_dir, &artifacts)?;
    tracing::info!(
        artifacts = written.len(),
        nodes = nodes.len(),
        dir = %out_dir.display(),
        "run finished"
    );

    Ok(())
}

/// Map the filter section onto a pipeline policy
fn filter_policy(config: &Config) -> FilterPolicy {
    let allowed_schemes = if config.filter.allowed_protocols.is_empty() {
        None
    } else {
        // Validation already checked these tags against the registry.
        Some(
            config
                .filter
                .allowed_protocols
                .iter()
                .filter_map(|tag| Scheme::from_token(tag))
                .collect(),
        )
    };

    FilterPolicy {
        blacklist: config.filter.blacklist(),
        allowed_schemes,
        structural_check: config.filter.structural_check,
    }
}

/// Probe-and-select, or priority order when probing is disabled
async fn select_best(config: &Config, nodes: &[NodeDescriptor]) -> Selection {
    if !config.probe.enabled {
        tracing::info!("probing disabled, selecting by static protocol priority");
        let mut ranked = rank_by_priority(nodes);
        ranked.truncate(config.probe.best_count);
        return Selection {
            nodes: ranked,
            used_fallback: true,
        };
    }

    let policy = match config.probe.aggregate {
        AggregateMode::Average => AggregatePolicy::Average,
        AggregateMode::Minimum => AggregatePolicy::Minimum,
    };

    let prober = LatencyProber::new(
        ProberConfig::default()
            .with_timeout(config.probe.timeout)
            .with_trials(config.probe.trials)
            .with_workers(config.probe.effective_workers(config.fetch.workers))
            .with_max_candidates(config.probe.max_candidates)
            .with_policy(policy),
    );
    let probes = prober.probe_all(nodes).await;

    Selector::new(
        SelectorConfig::default()
            .with_target(config.probe.best_count)
            .with_min_reachable(config.probe.effective_min_reachable()),
    )
    .select(probes, nodes)
}
