//! Collection runner

use super::types::{PairOutcome, RunSummary};
use crate::catalog::Sample;
use crate::config::{CollectorConfig, Credentials};
use crate::error::Result;
use crate::normalize::{normalize, NormalizeContext};
use crate::output::{
    ArtifactStore, CloudDestination, CsvTableSink, TableSink, WarehouseRecord, WarehouseSink,
};
use crate::pricing::{PriceQuote, PriceSource, PricingClient};
use crate::types::{CoordinatePair, Place};
use chrono::Utc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Sequential collection pipeline
///
/// One pair is fully processed (fetch, archive, normalize, append, warehouse)
/// before the next one starts. Consecutive requests are separated by a fixed
/// pacing delay.
pub struct CollectionRunner {
    samples: Vec<Sample>,
    source: Box<dyn PriceSource>,
    artifacts: Option<ArtifactStore>,
    table: Option<Box<dyn TableSink>>,
    warehouse: Option<WarehouseSink>,
    pacing: Duration,
}

impl CollectionRunner {
    /// Create a runner with no sinks and no pacing
    pub fn new(samples: Vec<Sample>, source: Box<dyn PriceSource>) -> Self {
        Self {
            samples,
            source,
            artifacts: None,
            table: None,
            warehouse: None,
            pacing: Duration::ZERO,
        }
    }

    /// Wire the pricing client and every configured sink
    ///
    /// Fails on configuration problems only; nothing is fetched here.
    pub fn from_config(config: &CollectorConfig, credentials: &Credentials) -> Result<Self> {
        let catalog = config.catalog()?;
        let client = PricingClient::with_endpoint(credentials, &config.endpoint, config.timeout)?;
        let destination = CloudDestination::parse(&config.output)?;

        let mut runner = Self::new(catalog.samples, Box::new(client))
            .with_artifacts(ArtifactStore::new(
                destination.clone(),
                config.json_prefix.as_str(),
            ))
            .with_table(Box::new(CsvTableSink::new(
                destination,
                config.csv_object.as_str(),
            )))
            .with_pacing(config.pacing);

        if let Some(warehouse) = &config.warehouse {
            runner = runner.with_warehouse(WarehouseSink::open(warehouse)?);
        }

        Ok(runner)
    }

    #[must_use]
    pub fn with_artifacts(mut self, artifacts: ArtifactStore) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: Box<dyn TableSink>) -> Self {
        self.table = Some(table);
        self
    }

    #[must_use]
    pub fn with_warehouse(mut self, warehouse: WarehouseSink) -> Self {
        self.warehouse = Some(warehouse);
        self
    }

    /// Delay between consecutive requests
    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn warehouse(&self) -> Option<&WarehouseSink> {
        self.warehouse.as_ref()
    }

    /// Process every configured pair once
    pub async fn run(&self) -> RunSummary {
        let start = Instant::now();
        let mut summary = RunSummary::new();
        summary.pairs_total = self.samples.iter().map(|s| s.pairs.len()).sum();

        info!(
            "Starting data collection cycle: {} pairs in {} samples",
            summary.pairs_total,
            self.samples.len()
        );

        let mut requested = false;
        for sample in &self.samples {
            for pair in &sample.pairs {
                let Some((origin, destination)) = sample.places.resolve(pair) else {
                    let message = format!(
                        "Invalid place IDs in {} pair {}: origin_id={}, destination_id={}",
                        sample.label, pair.id, pair.origin_id, pair.destination_id
                    );
                    error!("{message}");
                    summary.add_error(message);
                    summary.record(PairOutcome::Skipped);
                    continue;
                };

                if requested && !self.pacing.is_zero() {
                    tokio::time::sleep(self.pacing).await;
                }
                requested = true;

                let outcome = self
                    .process_pair(sample, pair, origin, destination, &mut summary)
                    .await;
                summary.record(outcome);
            }
        }

        summary.elapsed = start.elapsed();
        info!("Completed data collection cycle: {summary}");
        summary
    }

    async fn process_pair(
        &self,
        sample: &Sample,
        pair: &CoordinatePair,
        origin: &Place,
        destination: &Place,
        summary: &mut RunSummary,
    ) -> PairOutcome {
        info!(
            "Collecting {} - Pair {}: {} to {}",
            sample.label, pair.id, origin.name, destination.name
        );

        let quote = match self
            .source
            .fetch(origin.coordinates(), destination.coordinates())
            .await
        {
            Ok(quote) => quote,
            Err(e) => {
                let message = format!(
                    "Failed to collect data for {} - Pair {}: {e}",
                    sample.label, pair.id
                );
                error!("{message}");
                summary.add_error(message);
                return PairOutcome::Failed;
            }
        };

        self.archive(&quote, sample, pair, summary).await;

        if let Some(reason) = &quote.decode_error {
            warn!(
                "Unexpected response shape for {} - Pair {}: {reason}",
                sample.label, pair.id
            );
        }

        let context = NormalizeContext::new(origin.name.as_str(), destination.name.as_str())
            .with_sample(sample.label.as_str());
        let rows = normalize(&quote.response, &context);

        if rows.is_empty() {
            warn!(
                "No ride options to save for {} - Pair {}",
                sample.label, pair.id
            );
        } else if let Some(table) = &self.table {
            if let Err(e) = table.append(&rows).await {
                let message = format!(
                    "Failed to append rows for {} - Pair {}: {e}",
                    sample.label, pair.id
                );
                error!("{message}");
                summary.add_storage_error(message);
            }
        }

        self.insert_warehouse(&quote, origin, destination, summary);

        PairOutcome::Collected { rows: rows.len() }
    }

    async fn archive(
        &self,
        quote: &PriceQuote,
        sample: &Sample,
        pair: &CoordinatePair,
        summary: &mut RunSummary,
    ) {
        let Some(artifacts) = &self.artifacts else {
            return;
        };

        match artifacts.store(&quote.raw, &sample.label, pair.id).await {
            Ok(_) => summary.artifacts_written += 1,
            Err(e) => {
                let message = format!(
                    "Failed to save raw response for {} - Pair {}: {e}",
                    sample.label, pair.id
                );
                error!("{message}");
                summary.add_storage_error(message);
            }
        }
    }

    fn insert_warehouse(
        &self,
        quote: &PriceQuote,
        origin: &Place,
        destination: &Place,
        summary: &mut RunSummary,
    ) {
        let Some(warehouse) = &self.warehouse else {
            return;
        };

        let result = WarehouseRecord::from_quote(
            quote,
            origin.coordinates(),
            destination.coordinates(),
            Utc::now(),
        )
        .and_then(|record| warehouse.insert(&record));

        if let Err(e) = result {
            let message = format!(
                "Failed to insert into warehouse table {}: {e}",
                warehouse.table()
            );
            error!("{message}");
            summary.add_storage_error(message);
        }
    }
}

impl std::fmt::Debug for CollectionRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionRunner")
            .field("samples", &self.samples.len())
            .field("artifacts", &self.artifacts)
            .field("warehouse", &self.warehouse)
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}
