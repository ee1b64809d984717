//! Storage-independent reducers over climate records.
//!
//! The store streams rows into these accumulators instead of pushing the
//! aggregation down to SQL, so the same logic (and its empty-input behavior)
//! can be exercised against plain slices.
//!
//! # Example
//!
//! ```
//! use climate_types::aggregate::TemperatureSummary;
//!
//! let summary = TemperatureSummary::from_values([60.0, 65.0, 70.0]).unwrap();
//! assert_eq!(summary.min, 60.0);
//! assert_eq!(summary.avg, 65.0);
//! assert_eq!(summary.max, 70.0);
//!
//! // No values, no summary.
//! assert!(TemperatureSummary::from_values(std::iter::empty()).is_none());
//! ```

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{Observation, StationActivity};

/// Minimum, mean and maximum of a set of temperatures.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemperatureSummary {
    /// Lowest temperature (TMIN).
    #[cfg_attr(feature = "serde", serde(rename = "tmin"))]
    pub min: f64,
    /// Arithmetic mean (TAVG).
    #[cfg_attr(feature = "serde", serde(rename = "tavg"))]
    pub avg: f64,
    /// Highest temperature (TMAX).
    #[cfg_attr(feature = "serde", serde(rename = "tmax"))]
    pub max: f64,
}

impl TemperatureSummary {
    /// Summarize a sequence of temperatures in a single pass.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut acc = TemperatureAccumulator::new();
        for value in values {
            acc.push(value);
        }
        acc.finish()
    }

    /// Peak-to-peak spread (`max - min`).
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}

/// Running min/sum/max over temperatures.
#[derive(Debug, Clone, Default)]
pub struct TemperatureAccumulator {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
}

impl TemperatureAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one temperature.
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.count += 1;
    }

    /// Add a temperature that may be missing. Missing values are skipped.
    pub fn push_optional(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.push(value);
        }
    }

    /// Number of temperatures seen so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Finish the reduction. `None` when nothing was pushed.
    pub fn finish(&self) -> Option<TemperatureSummary> {
        if self.count == 0 {
            return None;
        }

        // Rounding in the sum can push the mean a hair outside [min, max].
        let avg = (self.sum / self.count as f64).clamp(self.min, self.max);

        Some(TemperatureSummary {
            min: self.min,
            avg,
            max: self.max,
        })
    }
}

/// Per-station observation counter producing an activity ranking.
#[derive(Debug, Clone, Default)]
pub struct ActivityCounter {
    counts: HashMap<String, u64>,
}

impl ActivityCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation row for `station_id`.
    ///
    /// Only rows carrying a temperature add to the count, but every station
    /// seen appears in the ranking, with a count of zero if need be.
    pub fn push(&mut self, station_id: &str, temperature: Option<f64>) {
        let increment = u64::from(temperature.is_some());
        match self.counts.get_mut(station_id) {
            Some(count) => *count += increment,
            None => {
                self.counts.insert(station_id.to_string(), increment);
            }
        }
    }

    /// Number of distinct stations seen.
    pub fn station_count(&self) -> usize {
        self.counts.len()
    }

    /// Ranking ordered by count descending, then station id ascending.
    pub fn finish(self) -> Vec<StationActivity> {
        let mut ranking: Vec<StationActivity> = self
            .counts
            .into_iter()
            .map(|(station_id, observation_count)| StationActivity {
                station_id,
                observation_count,
            })
            .collect();

        ranking.sort_by(|a, b| {
            b.observation_count
                .cmp(&a.observation_count)
                .then_with(|| a.station_id.cmp(&b.station_id))
        });

        ranking
    }
}

/// Rank stations by the number of observations in `observations`.
pub fn rank_stations(observations: &[Observation]) -> Vec<StationActivity> {
    let mut counter = ActivityCounter::new();
    for obs in observations {
        counter.push(&obs.station_id, Some(obs.temperature));
    }
    counter.finish()
}

/// One equal-width histogram bin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge, exclusive except for the last bin.
    pub upper: f64,
    /// Number of values in the bin.
    pub count: u64,
}

/// Equal-width histogram of temperature observations.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemperatureHistogram {
    /// Bins in ascending order.
    pub bins: Vec<HistogramBin>,
}

impl TemperatureHistogram {
    /// Bin `values` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// Edges follow the usual plotting convention: every bin is half-open
    /// except the last, which also includes `max`. When all values are equal
    /// the range is widened to `[value - 0.5, value + 0.5]`. Empty input or
    /// zero bins produce an empty histogram.
    pub fn from_temperatures(values: &[f64], bins: usize) -> Self {
        if values.is_empty() || bins == 0 {
            return Self::default();
        }

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0u64; bins];
        for &v in values {
            let index = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[index] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: lo + width * i as f64,
                upper: if i + 1 == bins {
                    hi
                } else {
                    lo + width * (i + 1) as f64
                },
                count,
            })
            .collect();

        Self { bins }
    }

    /// Total number of binned values.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }
}
