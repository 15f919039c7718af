// src/sampling/table.rs

use thiserror::Error;

/// Construction-time validation failures for [`IntervalTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("interval table has no bands")]
    Empty,
    #[error("band {index} is inverted: low {low} > high {high}")]
    InvertedBand { index: usize, low: u32, high: u32 },
    #[error("band {index} starts at {found}, expected {expected} (gap or overlap)")]
    NotContiguous {
        index: usize,
        expected: u32,
        found: u32,
    },
}

/// One sub-interval of the sampling range, bound to an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band<T> {
    pub outcome: T,
    pub low: u32,
    pub high: u32,
}

impl<T> Band<T> {
    /// Number of integer draws that land in this band.
    pub fn width(&self) -> u32 {
        self.high - self.low + 1
    }
}

/// An ordered cumulative-interval table mapping uniform integer draws to
/// discrete outcomes (inverse-transform sampling).
///
/// Validated on construction: bands must be non-empty, non-inverted, and
/// form a contiguous partition of `[range_min, range_max]` with no gaps
/// and no overlaps. Immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTable<T> {
    bands: Vec<Band<T>>,
}

impl<T: Copy> IntervalTable<T> {
    /// Builds a table from `(outcome, low, high)` triples.
    pub fn new(triples: Vec<(T, u32, u32)>) -> Result<Self, TableError> {
        if triples.is_empty() {
            return Err(TableError::Empty);
        }

        let mut bands = Vec::with_capacity(triples.len());
        let mut expected_low = None;
        for (index, (outcome, low, high)) in triples.into_iter().enumerate() {
            if low > high {
                return Err(TableError::InvertedBand { index, low, high });
            }
            if let Some(expected) = expected_low {
                if low != expected {
                    return Err(TableError::NotContiguous {
                        index,
                        expected,
                        found: low,
                    });
                }
            }
            expected_low = Some(high + 1);
            bands.push(Band { outcome, low, high });
        }

        Ok(Self { bands })
    }

    /// Lowest draw value covered by the table.
    pub fn range_min(&self) -> u32 {
        self.bands[0].low
    }

    /// Highest draw value covered by the table.
    pub fn range_max(&self) -> u32 {
        self.bands[self.bands.len() - 1].high
    }

    /// Total number of integer draws the table covers.
    pub fn span(&self) -> u32 {
        self.range_max() - self.range_min() + 1
    }

    pub fn bands(&self) -> &[Band<T>] {
        &self.bands
    }

    /// Maps a uniform draw to its outcome.
    ///
    /// A draw outside `[range_min, range_max]` takes the last band's
    /// outcome. The hand-written textbook tables carry an unreachable
    /// catch-all branch with exactly that meaning, and construction
    /// validation makes the fallback unreachable for in-range draws.
    pub fn sample(&self, draw: u32) -> T {
        match self
            .bands
            .iter()
            .find(|band| band.low <= draw && draw <= band.high)
        {
            Some(band) => band.outcome,
            None => self.bands[self.bands.len() - 1].outcome,
        }
    }
}

impl IntervalTable<u32> {
    /// Identity table over `[low, high]`: every draw maps to itself.
    /// Expresses a plain uniform integer quantity as a table, e.g. the
    /// event-scheduling model's 1..=8 interarrival minutes.
    pub fn uniform(low: u32, high: u32) -> Result<Self, TableError> {
        Self::new((low..=high).map(|v| (v, v, v)).collect())
    }
}
