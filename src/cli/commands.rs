//! CLI commands and argument parsing

use crate::error::{Error, Result};
use crate::filter::{FilterMap, NamedQuery};
use crate::pagination::{Filter, PagingMode};
use crate::types::Region;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

/// Ethos integration API client
#[derive(Parser, Debug)]
#[command(name = "ethos-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML); falls back to ETHOS_* environment variables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Region override (us, canada, europe, australia)
    #[arg(short, long, global = true)]
    pub region: Option<Region>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read records from a resource
    Get {
        /// Resource name, e.g. `persons`
        resource: String,

        /// Version number or full media type (blank = application/json)
        #[arg(long = "version", default_value = "")]
        api_version: String,

        /// Paging mode
        #[arg(short, long, default_value = "all-pages")]
        mode: PagingMode,

        /// Page size (<= 0 = let the server decide)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        page_size: i64,

        /// Starting row for offset modes
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,

        /// Page bound for page modes (<= 0 = unbounded)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        num_pages: i64,

        /// Row bound for row modes (<= 0 = unbounded)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        num_rows: i64,

        /// Collection filter
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Read the error log
    Errors {
        /// First error to return
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Errors per request
        #[arg(long, default_value_t = 25)]
        limit: usize,

        /// Fetch a single error by id
        #[arg(long, conflicts_with_all = ["offset", "limit"])]
        id: Option<String>,
    },

    /// List applications and the resources they publish
    Resources,

    /// Show the calling application's configuration
    #[command(name = "appconfig")]
    AppConfig,
}

/// Mutually exclusive collection filters
#[derive(Args, Debug, Default, Clone)]
#[group(multiple = false)]
pub struct FilterArgs {
    /// Criteria JSON, e.g. '{"code":"MATH"}'
    #[arg(long)]
    pub criteria: Option<String>,

    /// Named query as name=json, e.g. 'keywordSearch={"keywordSearch":"smith"}'
    #[arg(long)]
    pub named_query: Option<String>,

    /// Plain filters as key=value pairs, comma separated
    #[arg(long)]
    pub filter: Option<String>,

    /// QAPI request body (sent with POST)
    #[arg(long)]
    pub qapi: Option<String>,
}

impl FilterArgs {
    /// Convert to a [`Filter`], validating any JSON
    pub fn to_filter(&self) -> Result<Filter> {
        if let Some(criteria) = &self.criteria {
            let value = parse_json_object("criteria", criteria)?;
            return Ok(Filter::Criteria(value.to_string()));
        }
        if let Some(spec) = &self.named_query {
            let (name, json) = spec.split_once('=').ok_or_else(|| {
                Error::invalid_argument("named-query", "expected name=json")
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::invalid_argument("named-query", "name is blank"));
            }
            let query = match parse_json_object("named-query", json)? {
                Value::Object(fields) => fields
                    .into_iter()
                    .fold(NamedQuery::new(name), |q, (k, v)| q.with(k, v)),
                _ => NamedQuery::new(name),
            };
            return Ok(query.into());
        }
        if let Some(pairs) = &self.filter {
            return Ok(FilterMap::parse(pairs).into());
        }
        if let Some(body) = &self.qapi {
            let value = parse_json_object("qapi", body)?;
            return Ok(Filter::QapiBody(value.to_string()));
        }
        Ok(Filter::None)
    }
}

fn parse_json_object(argument: &str, text: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::invalid_argument(argument, format!("invalid JSON: {e}")))?;
    if !value.is_object() {
        return Err(Error::invalid_argument(argument, "expected a JSON object"));
    }
    Ok(value)
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Pretty-printed JSON
    Pretty,
}
