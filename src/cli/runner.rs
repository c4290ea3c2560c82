//! CLI runner - executes commands

use crate::catalog::{landmarks, LocationInput};
use crate::cli::commands::{Cli, Commands};
use crate::cli::display::{render_places, render_quote, render_samples};
use crate::collect::CollectionRunner;
use crate::config::{CollectorConfig, Credentials};
use crate::error::{Error, Result};
use crate::output::{ArtifactStore, CloudDestination, WarehouseRecord, WarehouseSink};
use crate::pricing::{PriceSource, PricingClient};
use chrono::Utc;
use tracing::{debug, info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Collect => self.collect().await,
            Commands::Quote {
                from,
                to,
                print_response,
                save_json,
                warehouse,
            } => {
                self.quote(from, to, *print_response, *save_json, *warehouse)
                    .await
            }
            Commands::Places => self.places(),
            Commands::Serve { port } => self.serve(*port).await,
        }
    }

    /// Environment settings with CLI flags applied
    fn config(&self) -> Result<CollectorConfig> {
        let config = self.cli.apply_overrides(CollectorConfig::from_env()?)?;
        debug!("Collector config: {:?}", config);
        Ok(config)
    }

    /// Credentials first: nothing else is set up without them
    fn setup(&self) -> Result<(Credentials, CollectorConfig)> {
        let credentials = Credentials::from_env()?;
        Ok((credentials, self.config()?))
    }

    /// Run one collection cycle over every configured pair
    async fn collect(&self) -> Result<()> {
        let (credentials, config) = self.setup()?;
        let runner = CollectionRunner::from_config(&config, &credentials)?;

        let summary = runner.run().await;
        println!("{summary}");
        Ok(())
    }

    /// Quote a single ride and display it
    async fn quote(
        &self,
        from: &str,
        to: &str,
        print_response: bool,
        save_json: bool,
        warehouse: bool,
    ) -> Result<()> {
        let (credentials, config) = self.setup()?;
        let origin = LocationInput::parse(from)?.into_place();
        let destination = LocationInput::parse(to)?.into_place();

        let warehouse = if warehouse {
            let settings = config.warehouse.as_ref().ok_or_else(|| {
                Error::config("--warehouse needs WAREHOUSE_PATH or --warehouse-path")
            })?;
            Some(WarehouseSink::open(settings)?)
        } else {
            None
        };

        let client = PricingClient::with_endpoint(&credentials, &config.endpoint, config.timeout)?;
        info!(
            "Fetching ride prices from {} to {}",
            origin.name, destination.name
        );
        let quote = client
            .fetch(origin.coordinates(), destination.coordinates())
            .await?;

        if let Some(reason) = &quote.decode_error {
            warn!("Unexpected response shape: {reason}");
        }

        if print_response {
            println!("{}", serde_json::to_string_pretty(&quote.raw)?);
        }

        println!(
            "\nRide options from {} to {}:",
            origin.name, destination.name
        );
        print!("{}", render_quote(&quote.response));

        if save_json {
            let store = ArtifactStore::new(
                CloudDestination::parse(&config.output)?,
                config.json_prefix.as_str(),
            );
            let route = format!("{} to {}", origin.name, destination.name);
            let location = store.store_route(&quote.raw, &route).await?;
            println!("Data saved to {location}");
        }

        if let Some(sink) = warehouse {
            let record = WarehouseRecord::from_quote(
                &quote,
                origin.coordinates(),
                destination.coordinates(),
                Utc::now(),
            )?;
            sink.insert(&record)?;
            println!("Data inserted into warehouse table {}", sink.table());
        }

        Ok(())
    }

    /// List landmarks and configured samples
    fn places(&self) -> Result<()> {
        let catalog = self.config()?.catalog()?;
        print!("{}", render_places(&landmarks()));
        print!("{}", render_samples(&catalog.samples));
        Ok(())
    }

    /// Serve the HTTP trigger
    async fn serve(&self, port: u16) -> Result<()> {
        let (credentials, config) = self.setup()?;
        let runner = CollectionRunner::from_config(&config, &credentials)?;
        crate::cli::serve(runner, port).await
    }
}
