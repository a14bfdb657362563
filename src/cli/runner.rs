//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::clients::{DiscoveryClient, ErrorsClient, ProxyClient};
use crate::config::ClientConfig;
use crate::error::{Result, ResultExt};
use crate::http::{ApiResponse, HttpClient};
use crate::pagination::PageRequest;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

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
        let config = self.load_config()?;
        let transport = Arc::new(HttpClient::from_client_config(&config)?);
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match &self.cli.command {
            Commands::Get {
                resource,
                api_version,
                mode,
                page_size,
                offset,
                num_pages,
                num_rows,
                filter,
            } => {
                let request = PageRequest::builder(resource.as_str())
                    .version(api_version.as_str())
                    .filter(filter.to_filter()?)
                    .page_size(*page_size)
                    .offset(*offset)
                    .num_pages(*num_pages)
                    .num_rows(*num_rows)
                    .mode(*mode)
                    .build();

                let started = Instant::now();
                let pages = ProxyClient::new(transport, &config)
                    .get_paged(&request)
                    .await?;
                let rows = self.emit_pages(&mut out, &pages)?;
                info!(
                    "{}: {} rows in {} response(s), {:?}",
                    resource,
                    rows,
                    pages.len(),
                    started.elapsed()
                );
                Ok(())
            }
            Commands::Errors { offset, limit, id } => {
                let client = ErrorsClient::new(transport, &config);
                let response = match id {
                    Some(id) => client.get_by_id(id).await?,
                    None => client.get(*offset, *limit).await?,
                };
                if id.is_some() {
                    let record: serde_json::Value = response.json()?;
                    self.emit(&mut out, &record)
                } else {
                    self.emit_pages(&mut out, &[response]).map(|_| ())
                }
            }
            Commands::Resources => {
                let client = DiscoveryClient::new(transport, &config);
                for app in client.available_resources().await? {
                    self.emit(&mut out, &app)?;
                }
                Ok(())
            }
            Commands::AppConfig => {
                let client = DiscoveryClient::new(transport, &config);
                self.emit(&mut out, &client.app_config().await?)
            }
        }
    }

    /// Load the configuration file, or the environment when none is given
    pub fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ClientConfig::from_env()?,
        };
        if let Some(region) = self.cli.region {
            config = config.with_region(region);
        }
        config.validate()?;
        Ok(config)
    }

    /// Write every row of every page; returns the row count
    pub fn emit_pages(&self, out: &mut impl Write, pages: &[ApiResponse]) -> Result<usize> {
        let mut count = 0;
        for page in pages {
            for row in page.records()? {
                self.emit(out, &row)?;
                count += 1;
            }
        }
        Ok(count)
    }

    fn emit<T: Serialize>(&self, out: &mut impl Write, value: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        writeln!(out, "{line}").context("writing output")
    }
}
