use crate::color::{Band, ColorBand};
use crate::models::Dataset;
use serde::Serialize;

/// Summary statistics over a dataset's absolute temperatures.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Compute count, min, max, mean and median of `base + variance` over all samples.
pub fn summary(dataset: &Dataset) -> Summary {
    let mut vals = dataset.temperatures();
    vals.sort_by(f64::total_cmp);
    let count = vals.len();
    let mean = vals.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        vals[count / 2]
    } else {
        (vals[count / 2 - 1] + vals[count / 2]) / 2.0
    };
    Summary {
        count,
        min: vals[0],
        max: vals[count - 1],
        mean,
        median,
    }
}

/// How many cells one color band paints.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BandCount {
    pub band: Band,
    pub count: usize,
}

/// Cells per band, in band order. Counts sum to the number of samples.
pub fn band_counts(dataset: &Dataset, band: &ColorBand) -> Vec<BandCount> {
    let mut counts = vec![0usize; band.len()];
    for t in dataset.temperatures() {
        counts[band.bucket_index(t)] += 1;
    }
    band.bands()
        .into_iter()
        .zip(counts)
        .map(|(band, count)| BandCount { band, count })
        .collect()
}
