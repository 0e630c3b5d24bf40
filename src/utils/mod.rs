use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{K3PiError, K3PiResult};

/// Useful enumerations for tags, flavors, and quadrants.
pub mod enums;
/// Expression-level kinematic variables over DataFrame columns.
pub mod variables;
/// Scalar three-vector and four-momentum arithmetic.
pub mod vectors;

/// A helper method to get histogram edges from evenly-spaced `bins` over a given `range`
///
/// # See Also
/// [`Histogram`]
/// [`get_bin_index`]
pub fn get_bin_edges(bins: usize, range: (f64, f64)) -> Vec<f64> {
    let bin_width = (range.1 - range.0) / (bins as f64);
    (0..=bins)
        .map(|i| range.0 + (i as f64 * bin_width))
        .collect()
}

/// A helper method to obtain the index of a bin where a value should go in a histogram with evenly
/// spaced `bins` over a given `range`
///
/// # See Also
/// [`Histogram`]
/// [`get_bin_edges`]
pub fn get_bin_index(value: f64, bins: usize, limits: (f64, f64)) -> Option<usize> {
    if value >= limits.0 && value < limits.1 {
        let bin_width = (limits.1 - limits.0) / bins as f64;
        let bin_index = ((value - limits.0) / bin_width).floor() as usize;
        Some(bin_index.min(bins - 1))
    } else {
        None
    }
}

/// The [`get_bin_index`] computation as a polars expression; out-of-range
/// values map to the sentinel bin `bins`.
pub fn get_bin_index_expr(expr: Expr, bins: usize, limits: (f64, f64)) -> Expr {
    let bin_width = (limits.1 - limits.0) / bins as f64;
    when(
        expr.clone()
            .lt(lit(limits.0))
            .or(expr.clone().gt_eq(lit(limits.1))),
    )
    .then(lit(bins as u64))
    .otherwise(
        ((expr - lit(limits.0)) / lit(bin_width))
            .floor()
            .cast(DataType::UInt64),
    )
}

/// A simple struct which represents a histogram
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// The number of counts in each bin (can be `f64`s since these might be weighted counts)
    pub counts: Vec<f64>,
    /// The edges of each bin (length is one greater than `counts`)
    pub bin_edges: Vec<f64>,
}

impl Histogram {
    /// The number of bins.
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// The lower and upper edge of the binned range.
    pub fn range(&self) -> (f64, f64) {
        (self.bin_edges[0], self.bin_edges[self.bin_edges.len() - 1])
    }

    /// The largest bin content, used to align the y-range when several
    /// histograms are drawn together.
    pub fn max_count(&self) -> f64 {
        self.counts.iter().copied().fold(0.0, f64::max)
    }

    /// Write the histogram as whitespace-separated `low high count` rows.
    pub fn write_dat<P: AsRef<Path>>(&self, path: P) -> K3PiResult<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for (i, count) in self.counts.iter().enumerate() {
            writeln!(out, "{} {} {}", self.bin_edges[i], self.bin_edges[i + 1], count)?;
        }
        Ok(())
    }
}

/// A method which creates a histogram from some data by binning it with evenly spaced `bins` within
/// the given `range`
pub fn histogram<T: AsRef<[f64]>>(
    values: T,
    bins: usize,
    range: (f64, f64),
    weights: Option<T>,
) -> Histogram {
    assert!(bins > 0, "Number of bins must be greater than zero!");
    assert!(
        range.1 > range.0,
        "The lower edge of the range must be smaller than the upper edge!"
    );
    if let Some(w) = &weights {
        assert_eq!(
            values.as_ref().len(),
            w.as_ref().len(),
            "`values` and `weights` must have the same length!"
        );
    }
    let mut counts = vec![0.0; bins];
    for (i, &value) in values.as_ref().iter().enumerate() {
        if let Some(bin_index) = get_bin_index(value, bins, range) {
            let weight = weights.as_ref().map_or(1.0, |w| w.as_ref()[i]);
            counts[bin_index] += weight;
        }
    }
    Histogram {
        counts,
        bin_edges: get_bin_edges(bins, range),
    }
}

fn column_values(df: &DataFrame, column: &str) -> K3PiResult<Vec<f64>> {
    let series = df
        .column(column)
        .map_err(|_| K3PiError::MissingColumn {
            name: column.to_string(),
        })?
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().flatten().collect())
}

/// Bin a DataFrame column into a [`Histogram`], optionally weighting each
/// entry by another column.
pub fn histogram_from_column(
    df: &DataFrame,
    column: &str,
    bins: usize,
    range: (f64, f64),
    weight: Option<&str>,
) -> K3PiResult<Histogram> {
    let values = column_values(df, column)?;
    let weights = weight.map(|w| column_values(df, w)).transpose()?;
    Ok(histogram(&values, bins, range, weights.as_ref()))
}

/// Bin a DataFrame column reusing the binning of an existing histogram.
pub fn histogram_like(df: &DataFrame, column: &str, other: &Histogram) -> K3PiResult<Histogram> {
    histogram_from_column(df, column, other.n_bins(), other.range(), None)
}

/// A collection of named histograms which can round-trip through a file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistogramSet {
    histograms: IndexMap<String, Histogram>,
}

impl HistogramSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a histogram under the given name.
    pub fn insert<S: Into<String>>(&mut self, name: S, histogram: Histogram) {
        self.histograms.insert(name.into(), histogram);
    }

    /// The stored histogram names, in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.histograms.keys().map(String::as_str).collect()
    }

    /// Look up a histogram by name.
    ///
    /// # Errors
    ///
    /// [`K3PiError::HistogramNotFound`] if no histogram carries the name.
    pub fn get(&self, name: &str) -> K3PiResult<&Histogram> {
        self.histograms
            .get(name)
            .ok_or_else(|| K3PiError::HistogramNotFound {
                name: name.to_string(),
            })
    }

    /// Persist the set to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> K3PiResult<()> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// Load a set previously written with [`HistogramSet::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> K3PiResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}

/// Build contiguous decay-time bins from a list of upper edges.
///
/// The first bin reaches down to −∞ and a final overflow bin reaches +∞, so
/// `n` edges produce `n + 1` bins.
pub fn make_time_bins(upper_edges: &[f64]) -> Vec<(f64, f64)> {
    let n = upper_edges.len();
    (0..=n)
        .map(|b| {
            let lower = if b == 0 {
                f64::NEG_INFINITY
            } else {
                upper_edges[b - 1]
            };
            let upper = if b == n {
                f64::INFINITY
            } else {
                upper_edges[b]
            };
            (lower, upper)
        })
        .collect()
}

/// Whether a decay time falls within the given `[lower, upper)` bin.
pub fn in_time_bin(dtime: f64, limits: (f64, f64)) -> bool {
    dtime >= limits.0 && dtime < limits.1
}

/// Human-readable label for a decay-time bin.
pub fn time_bin_label(limits: (f64, f64), unit: &str) -> String {
    format!("{} <= D0 decay t < {} [{}]", limits.0, limits.1, unit)
}

#[inline]
pub(crate) fn list_to_name<I, S>(values: &I) -> String
where
    I: IntoIterator<Item = S> + Clone,
    S: Into<PlSmallStr>,
{
    values
        .clone()
        .into_iter()
        .map(|s| s.into().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
