// src/bin/analyze.rs
//
// Second stage: read the scraped CSV back and render the descriptive charts.
// Run the scraper first; a missing input file is reported and the process
// exits cleanly without analysis.

use std::fs;
use std::path::Path;

use anyhow::Result;
use hurunscraper::{analysis, chart, export};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

const INPUT_CSV: &str = "doc/hurun_rich_list_2024.csv";
const CHART_DIR: &str = "doc/charts";

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let input = Path::new(INPUT_CSV);
    if !input.exists() {
        error!(path = INPUT_CSV, "input dataset not found; run the scraper first");
        return Ok(());
    }

    let rows = export::read_csv(input)?;
    info!(rows = rows.len(), path = INPUT_CSV, "dataset loaded");
    fs::create_dir_all(CHART_DIR)?;
    let charts = Path::new(CHART_DIR);

    // Industry views use the exploded column: one entry per listed industry.
    let industry_counts: Vec<(String, f64)> = analysis::industry_counts(&rows)
        .into_iter()
        .take(15)
        .map(|(k, v)| (k, v as f64))
        .collect();
    chart::bar_chart(
        charts.join("industry_counts_bar.png"),
        "Hurun Rich List 2024 - entities per industry (top 15)",
        "industry",
        "entities",
        &industry_counts,
    )?;

    let industry_wealth: Vec<(String, f64)> = analysis::industry_wealth(&rows)
        .into_iter()
        .take(15)
        .collect();
    chart::bar_chart(
        charts.join("industry_wealth_bar.png"),
        "Hurun Rich List 2024 - total wealth per industry (top 15, CNY 100M)",
        "industry",
        "total wealth",
        &industry_wealth,
    )?;

    let wealth: Vec<f64> = rows.iter().filter_map(|r| r.wealth).collect();
    if let Some(hist) = analysis::histogram_bins(&wealth, 30) {
        chart::histogram_chart(
            charts.join("wealth_distribution_hist.png"),
            "Hurun Rich List 2024 - wealth distribution (CNY 100M)",
            "wealth",
            &hist,
        )?;
    } else {
        info!("no wealth values; skipping wealth histogram");
    }

    let ages: Vec<f64> = rows.iter().filter_map(|r| r.age).collect();
    if let Some(hist) = analysis::histogram_bins(&ages, 10) {
        chart::histogram_chart(
            charts.join("age_distribution_hist.png"),
            "Hurun Rich List 2024 - age distribution",
            "age",
            &hist,
        )?;
    } else {
        info!("no age values; skipping age histogram");
    }

    let genders = analysis::value_counts(analysis::genders(&rows));
    chart::pie_chart(
        charts.join("gender_distribution_pie.png"),
        "Hurun Rich List 2024 - gender distribution",
        &genders,
    )?;

    let provinces: Vec<(String, usize)> = analysis::value_counts(analysis::provinces(&rows))
        .into_iter()
        .take(10)
        .collect();
    chart::pie_chart(
        charts.join("birthplace_province_pie.png"),
        "Hurun Rich List 2024 - birthplace province (top 10)",
        &provinces,
    )?;
    let province_bars: Vec<(String, f64)> = provinces
        .iter()
        .map(|(k, v)| (k.clone(), *v as f64))
        .collect();
    chart::bar_chart(
        charts.join("birthplace_province_bar.png"),
        "Hurun Rich List 2024 - birthplace province (top 10)",
        "province",
        "entities",
        &province_bars,
    )?;

    let crosstab = analysis::industry_headquarters_crosstab(&rows, 10);
    chart::heatmap(
        charts.join("industry_headquarters_heatmap.png"),
        "Hurun Rich List 2024 - industry x headquarters",
        &crosstab,
    )?;

    info!(dir = CHART_DIR, "charts rendered");
    Ok(())
}
