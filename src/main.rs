use anyhow::Result;
use hurunscraper::{
    export,
    fetch::{self, Fetcher},
    model,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

const OUTPUT_CSV: &str = "doc/hurun_rich_list_2024.csv";

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) fetch every page of the rank list ────────────────────────
    let client = fetch::build_client()?;
    let fetcher = Fetcher::new(client, fetch::DEFAULT_LIST_ID);
    let records = fetcher.fetch_all().await;

    if records.is_empty() {
        error!("no usable data fetched; nothing to write");
        return Ok(());
    }
    info!(records = records.len(), "fetch finished");

    // ─── 3) flatten into the tabular dataset ─────────────────────────
    let rows = model::flatten_all(&records);

    // ─── 4) write the CSV for the analysis stage ─────────────────────
    export::write_csv(OUTPUT_CSV, &rows)?;
    info!(rows = rows.len(), path = OUTPUT_CSV, "dataset written");

    for row in rows.iter().take(5) {
        info!(
            rank = %row.rank,
            name = %row.name,
            wealth = ?row.wealth,
            industry = %row.industry,
            "preview"
        );
    }

    info!("all done");
    Ok(())
}
