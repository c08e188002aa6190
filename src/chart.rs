// src/chart.rs
//
// PNG renderers for the analysis stage. Each renderer skips quietly (one log
// line, no file) when it has nothing to draw, so a sparse dataset never fails
// the whole run.

use std::path::Path;

use anyhow::Result;
use plotters::element::Pie;
use plotters::prelude::*;
use tracing::warn;

use crate::analysis::{Crosstab, Histogram};

const CHART_SIZE: (u32, u32) = (1200, 700);
const PIE_SIZE: (u32, u32) = (800, 800);

static PIE_PALETTE: &[RGBColor] = &[
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
    RGBColor(166, 216, 84),
    RGBColor(255, 217, 47),
    RGBColor(229, 196, 148),
    RGBColor(179, 179, 179),
    RGBColor(188, 128, 189),
    RGBColor(204, 235, 197),
];

/// Vertical bar chart of labelled values, drawn in the given order.
pub fn bar_chart(
    path: impl AsRef<Path>,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    data: &[(String, f64)],
) -> Result<()> {
    if data.is_empty() {
        warn!(title, "no data; skipping chart");
        return Ok(());
    }
    let y_max = data.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);

    let root = BitMapBackend::new(path.as_ref(), CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(90)
        .y_label_area_size(70)
        .build_cartesian_2d(0usize..data.len(), 0f64..y_max * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(data.len())
        .x_label_formatter(&|i| data.get(*i).map(|(k, _)| k.clone()).unwrap_or_default())
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(data.iter().enumerate().map(|(i, (_, v))| {
        Rectangle::new([(i, 0.0), (i + 1, *v)], BLUE.mix(0.6).filled())
    }))?;

    root.present()?;
    Ok(())
}

/// Histogram of a numeric column using pre-computed equal-width bins.
pub fn histogram_chart(
    path: impl AsRef<Path>,
    title: &str,
    x_desc: &str,
    hist: &Histogram,
) -> Result<()> {
    let y_max = match hist.counts.iter().max() {
        Some(&m) if m > 0 => m,
        _ => {
            warn!(title, "no data; skipping chart");
            return Ok(());
        }
    };

    let root = BitMapBackend::new(path.as_ref(), CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(hist.min..hist.max(), 0usize..y_max + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc("count")
        .draw()?;

    chart.draw_series(hist.counts.iter().enumerate().map(|(i, &count)| {
        let x0 = hist.min + hist.bin_width * i as f64;
        Rectangle::new(
            [(x0, 0usize), (x0 + hist.bin_width, count)],
            RGBColor(135, 206, 235).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Pie chart of labelled counts.
pub fn pie_chart(path: impl AsRef<Path>, title: &str, data: &[(String, usize)]) -> Result<()> {
    if data.is_empty() {
        warn!(title, "no data; skipping chart");
        return Ok(());
    }

    let root = BitMapBackend::new(path.as_ref(), PIE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, ("sans-serif", 30))?;

    let sizes: Vec<f64> = data.iter().map(|(_, c)| *c as f64).collect();
    let labels: Vec<String> = data.iter().map(|(k, _)| k.clone()).collect();
    let colors: Vec<RGBColor> = (0..data.len())
        .map(|i| PIE_PALETTE[i % PIE_PALETTE.len()])
        .collect();

    let center = (PIE_SIZE.0 as i32 / 2, PIE_SIZE.1 as i32 / 2);
    let radius = PIE_SIZE.0 as f64 * 0.32;
    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style(("sans-serif", 20).into_font());
    pie.percentages(("sans-serif", 18).into_font().color(&BLACK));
    root.draw(&pie)?;

    root.present()?;
    Ok(())
}

/// Annotated count heatmap of a crosstab; darker cell, higher count.
pub fn heatmap(path: impl AsRef<Path>, title: &str, tab: &Crosstab) -> Result<()> {
    if tab.grand_total() == 0 {
        warn!(title, "no data; skipping chart");
        return Ok(());
    }
    let max = tab.counts.iter().flatten().copied().max().unwrap_or(1).max(1);
    let (n_rows, n_cols) = (tab.row_labels.len(), tab.col_labels.len());

    let root = BitMapBackend::new(path.as_ref(), CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(90)
        .y_label_area_size(120)
        .build_cartesian_2d(0f64..n_cols as f64, 0f64..n_rows as f64)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n_cols)
        .y_labels(n_rows)
        .x_label_formatter(&|x| {
            tab.col_labels
                .get(*x as usize)
                .cloned()
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| {
            tab.row_labels
                .get(*y as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()?;

    chart.draw_series(tab.counts.iter().enumerate().flat_map(|(r, row)| {
        row.iter().enumerate().map(move |(c, &count)| {
            let shade = 0.08 + 0.92 * count as f64 / max as f64;
            Rectangle::new(
                [(c as f64, r as f64), (c as f64 + 1.0, r as f64 + 1.0)],
                BLUE.mix(shade).filled(),
            )
        })
    }))?;
    chart.draw_series(tab.counts.iter().enumerate().flat_map(|(r, row)| {
        row.iter().enumerate().map(move |(c, &count)| {
            Text::new(
                count.to_string(),
                (c as f64 + 0.45, r as f64 + 0.55),
                ("sans-serif", 18).into_font().color(&BLACK),
            )
        })
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_inputs_skip_without_writing() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("empty.png");
        bar_chart(&path, "t", "x", "y", &[]).unwrap();
        pie_chart(&path, "t", &[]).unwrap();
        heatmap(
            &path,
            "t",
            &Crosstab {
                row_labels: vec![],
                col_labels: vec![],
                counts: vec![],
            },
        )
        .unwrap();
        assert!(!path.exists());
    }
}
