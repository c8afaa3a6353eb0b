use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rquest_util::Emulation;
use serde_json::{Map, Value};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use pleasanter_client::config::Settings;
use pleasanter_client::models::{setup_search_type, SearchType};
use pleasanter_client::page::{settle, Page, FETCH_DATA, RESET};
use pleasanter_client::{HttpClient, ItemsService, RecordQuery};

#[derive(Parser)]
#[clap(name = "pleasanter", about = "Pleasanter items API client")]
struct Cli {
    /// Connection info file. Defaults to `pleasanter_connection_info.json` if present.
    #[clap(long)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive page: type `fetchData`, `reset`, `show` or `quit`.
    Page {
        /// Item fetched by the `fetchData` button.
        #[clap(long)]
        record_id: Option<String>,
    },
    /// Columns shown on a site's edit tab.
    SiteColumns {
        #[clap(long)]
        site_id: String,
    },
    /// Column name to label mapping of a site.
    Mapping {
        #[clap(long)]
        site_id: String,
    },
    /// A single record of a site.
    Get {
        #[clap(long)]
        site_id: String,
        #[clap(long)]
        record_id: String,
        /// Restrict the returned columns.
        #[clap(long, value_delimiter = ',')]
        columns: Vec<String>,
    },
    /// One page of records of a site.
    List {
        #[clap(long)]
        site_id: String,
        #[clap(long, default_value_t = 0)]
        offset: u64,
        #[clap(long, value_delimiter = ',')]
        columns: Vec<String>,
        /// Column filters as a JSON object, matched partially.
        #[clap(long)]
        filters: Option<String>,
    },
    /// Create a record from a JSON object of fields.
    Create {
        #[clap(long)]
        site_id: String,
        #[clap(long)]
        data: String,
    },
    /// Update a record from a JSON object of fields.
    Update {
        #[clap(long)]
        record_id: String,
        #[clap(long)]
        data: String,
    },
}

fn parse_fields(json: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(json).context("fields must be valid JSON")? {
        Value::Object(fields) => Ok(fields),
        _ => anyhow::bail!("fields must be a JSON object"),
    }
}

fn non_empty(columns: Vec<String>) -> Option<Vec<String>> {
    if columns.is_empty() { None } else { Some(columns) }
}

async fn run_page(service: Arc<ItemsService>, record_id: &str) -> Result<()> {
    let page = Page::with_default_handlers(service, record_id);
    println!("{}", page.output().content().await);

    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let target = line.trim();
        match target {
            "" => continue,
            "quit" | "exit" => break,
            "show" => println!("{}", page.output().content().await),
            FETCH_DATA | RESET => {
                let handles = page.click(target)?;
                let output = page.output().clone();
                tokio::spawn(async move {
                    settle(handles).await;
                    println!("{}", output.content().await);
                });
            },
            other => warn!(element = other, "No such element"),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_layer)
        .try_init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    info!(started_at = %timestamp, host = %settings.host.url, "Starting session");

    let client = HttpClient::new(&settings, Emulation::Chrome133)?;
    let service = Arc::new(ItemsService::new(client, &settings));

    match cli.command {
        Command::Page { record_id } => {
            let record_id = record_id.unwrap_or_else(|| settings.page.record_id.clone());
            run_page(service, &record_id).await?;
        },
        Command::SiteColumns { site_id } => {
            let columns = service.get_edit_columns(&site_id).await?;
            println!("{}", serde_json::to_string_pretty(&columns)?);
        },
        Command::Mapping { site_id } => {
            let mapping = service.get_mapping_columns(&site_id).await?;
            println!("{}", serde_json::to_string_pretty(&mapping)?);
        },
        Command::Get { site_id, record_id, columns } => {
            let record = service.get_record(&site_id, &record_id, non_empty(columns)).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        },
        Command::List { site_id, offset, columns, filters } => {
            let filters = filters.as_deref().map(parse_fields).transpose()?;
            let search_types = filters.as_ref().map(|filters| {
                let keys: Vec<String> = filters.keys().cloned().collect();
                setup_search_type(&keys, SearchType::PartialMatch)
            });
            let query = RecordQuery {
                grid_columns: non_empty(columns),
                filters,
                search_types,
                offset,
            };

            let page = service.get_records(&site_id, query).await?;
            println!("{}", serde_json::to_string_pretty(&page.records)?);
            println!(
                "Offset: {} PageSize: {} TotalCount: {}",
                page.offset, page.page_size, page.total_count
            );
        },
        Command::Create { site_id, data } => {
            service.create_record(&site_id, parse_fields(&data)?).await?;
            println!("Created record in site {}", site_id);
        },
        Command::Update { record_id, data } => {
            service.update_record(&record_id, parse_fields(&data)?).await?;
            println!("Updated record {}", record_id);
        },
    }

    Ok(())
}
