// src/analysis.rs
//
// Derivations and aggregations over the flattened dataset. Everything here is
// plain in-memory work over `Vec<FlatRow>`; ordering of aggregate output is
// deterministic (count descending, then key ascending).

use std::collections::HashMap;

use crate::model::FlatRow;

/// Extract the province from a dash-joined birthplace like `中国-浙江-杭州`.
///
/// The second segment is the province when present; single-segment values are
/// used as-is. Blank input yields `None`.
pub fn province_of(birthplace: &str) -> Option<String> {
    let mut parts = birthplace.split('-').map(str::trim);
    let first = parts.next()?;
    match parts.next() {
        Some(second) if !second.is_empty() => Some(second.to_string()),
        _ if !first.is_empty() => Some(first.to_string()),
        _ => None,
    }
}

/// Split a `、`-joined industry cell into its individual industries.
///
/// One entity active in three industries counts once per industry in the
/// exploded aggregates.
pub fn split_industries(cell: &str) -> Vec<&str> {
    cell.split('、')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Occurrence counts sorted by count descending, key ascending on ties.
pub fn value_counts<I>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Entity count per exploded industry, descending.
pub fn industry_counts(rows: &[FlatRow]) -> Vec<(String, usize)> {
    value_counts(
        rows.iter()
            .flat_map(|r| split_industries(&r.industry))
            .map(str::to_string),
    )
}

/// Total wealth per exploded industry, descending. Rows with no coerced
/// wealth contribute to counts elsewhere but add nothing here.
pub fn industry_wealth(rows: &[FlatRow]) -> Vec<(String, f64)> {
    let mut sums: HashMap<String, f64> = HashMap::new();
    for row in rows {
        let Some(wealth) = row.wealth else { continue };
        for industry in split_industries(&row.industry) {
            *sums.entry(industry.to_string()).or_insert(0.0) += wealth;
        }
    }
    let mut out: Vec<(String, f64)> = sums.into_iter().collect();
    out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Non-blank province per row, in row order.
pub fn provinces(rows: &[FlatRow]) -> Vec<String> {
    rows.iter()
        .filter_map(|r| province_of(&r.birthplace))
        .collect()
}

/// Non-blank gender per row, in row order.
pub fn genders(rows: &[FlatRow]) -> Vec<String> {
    rows.iter()
        .filter(|r| !r.gender.is_empty())
        .map(|r| r.gender.clone())
        .collect()
}

/// Equal-width histogram over finite values.
#[derive(Debug, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn max(&self) -> f64 {
        self.min + self.bin_width * self.counts.len() as f64
    }
}

/// Bin `values` into `bins` equal-width buckets spanning min..max. Returns
/// `None` when there is nothing to bin. A constant series gets one unit-wide
/// bucket so the chart still renders.
pub fn histogram_bins(values: &[f64], bins: usize) -> Option<Histogram> {
    if values.is_empty() || bins == 0 {
        return None;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bin_width = if max > min {
        (max - min) / bins as f64
    } else {
        1.0
    };

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / bin_width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Some(Histogram {
        min,
        bin_width,
        counts,
    })
}

/// Industry × headquarters count matrix over the top `n` of each.
#[derive(Debug)]
pub struct Crosstab {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// counts[row][col]
    pub counts: Vec<Vec<usize>>,
}

impl Crosstab {
    pub fn grand_total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

/// Cross-tabulate exploded industry against headquarters, restricted to the
/// `n` most frequent values on each axis.
pub fn industry_headquarters_crosstab(rows: &[FlatRow], n: usize) -> Crosstab {
    let row_labels: Vec<String> = industry_counts(rows)
        .into_iter()
        .take(n)
        .map(|(k, _)| k)
        .collect();
    let col_labels: Vec<String> = value_counts(
        rows.iter()
            .filter(|r| !r.headquarters.is_empty())
            .map(|r| r.headquarters.clone()),
    )
    .into_iter()
    .take(n)
    .map(|(k, _)| k)
    .collect();

    let mut counts = vec![vec![0usize; col_labels.len()]; row_labels.len()];
    for row in rows {
        let Some(col) = col_labels.iter().position(|h| *h == row.headquarters) else {
            continue;
        };
        for industry in split_industries(&row.industry) {
            if let Some(r) = row_labels.iter().position(|i| i == industry) {
                counts[r][col] += 1;
            }
        }
    }
    Crosstab {
        row_labels,
        col_labels,
        counts,
    }
}
