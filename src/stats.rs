use crate::model::ForceMap;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Running mean and population variance (Welford's algorithm).
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
}

/// Mean and population standard deviation of a set of values.
///
/// Both are `NaN` when the set is empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanStd {
    pub mean: f64,
    pub std_dev: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;
    }

    pub fn report(&self) -> MeanStd {
        if self.n_vals == 0 {
            return MeanStd {
                mean: f64::NAN,
                std_dev: f64::NAN,
            };
        }
        MeanStd {
            mean: self.mean,
            std_dev: (self.diff_2_sum / self.n_vals as f64).sqrt(),
        }
    }
}

pub fn mean_std(vals: &[f64]) -> MeanStd {
    let mut acc = Accumulator::new();
    vals.iter().for_each(|&val| acc.add(val));
    acc.report()
}

/// Mean and standard deviation of every component over `range`.
///
/// Indices past the end of a component are ignored.
pub fn aggregate(forces: &ForceMap<Vec<f64>>, range: Range<usize>) -> ForceMap<MeanStd> {
    forces.map(|_, _, vals| {
        let end = range.end.min(vals.len());
        let start = range.start.min(end);
        mean_std(&vals[start..end])
    })
}
