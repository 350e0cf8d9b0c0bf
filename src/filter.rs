use crate::error::{ForcesError, Result};
use crate::index::TimeRange;
use crate::model::{Component, ForceMap, ForceType};
use crate::stats::MeanStd;
use crate::table::ForceTable;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Smoothing window shape.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    /// Moving average.
    #[default]
    Flat,
    Hanning,
    Hamming,
    Bartlett,
    Blackman,
}

impl Kernel {
    /// Kernel weights for `window` samples, normalized to sum to one.
    pub fn weights(self, window: usize) -> Vec<f64> {
        if window <= 1 {
            return vec![1.0; window];
        }
        let m = (window - 1) as f64;
        let raw: Vec<f64> = (0..window)
            .map(|n| {
                let phase = 2.0 * PI * n as f64 / m;
                match self {
                    Kernel::Flat => 1.0,
                    Kernel::Hanning => 0.5 - 0.5 * phase.cos(),
                    Kernel::Hamming => 0.54 - 0.46 * phase.cos(),
                    Kernel::Bartlett => 1.0 - (2.0 * n as f64 / m - 1.0).abs(),
                    Kernel::Blackman => 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos(),
                }
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        raw.into_iter().map(|w| w / sum).collect()
    }
}

fn check_window(window: usize) -> Result<()> {
    if window % 2 == 0 {
        return Err(ForcesError::InvalidWindow(window));
    }
    Ok(())
}

/// Smooth `vals` with a centered `kernel` window of odd length `window`.
///
/// Only positions where the whole window fits are kept, so the output has
/// `vals.len() - (window - 1)` samples, or none if `vals` is shorter than `window`.
///
/// # Errors
/// Returns [`ForcesError::InvalidWindow`] if `window` is even.
pub fn smooth(vals: &[f64], window: usize, kernel: Kernel) -> Result<Vec<f64>> {
    check_window(window)?;
    if vals.len() < window {
        return Ok(Vec::new());
    }
    Ok(convolve(vals, &kernel.weights(window)))
}

fn convolve(vals: &[f64], weights: &[f64]) -> Vec<f64> {
    vals.windows(weights.len())
        .map(|win| win.iter().zip(weights).map(|(val, w)| val * w).sum::<f64>())
        .collect()
}

/// Smoothed force components together with their trimmed time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredForces {
    pub window: usize,
    pub kernel: Kernel,
    pub table: ForceTable,
}

impl FilteredForces {
    /// Mean and standard deviation of the filtered components over `range`,
    /// resolved on the filtered time axis.
    pub fn averages_std(&self, range: TimeRange) -> Result<ForceMap<MeanStd>> {
        self.table.averages_std(range)
    }
}

/// Smooth every component of `table` over `range`.
///
/// The time axis of the selected slice is trimmed by `(window - 1) / 2`
/// samples at each end to stay aligned with the smoothed values.
///
/// # Errors
/// Returns [`ForcesError::InvalidWindow`] for an even window before reading
/// any data, and [`ForcesError::InvalidRange`] for invalid bounds.
pub fn filter_table(
    table: &ForceTable,
    range: TimeRange,
    window: usize,
    kernel: Kernel,
) -> Result<FilteredForces> {
    check_window(window)?;
    let indices = table.indices(range)?;

    let half = (window - 1) / 2;
    let time = &table.time[indices.clone()];
    let n_kept = time.len().saturating_sub(window - 1);
    let time = time[half.min(time.len())..][..n_kept].to_vec();

    let mut forces = ForceMap::default();
    if n_kept > 0 {
        let weights = kernel.weights(window);
        for ft in ForceType::ALL {
            for comp in Component::ALL {
                let vals = &table.component(ft, comp)[indices.clone()];
                *forces.get_mut(ft, comp) = convolve(vals, &weights);
            }
        }
    }

    Ok(FilteredForces {
        window,
        kernel,
        table: ForceTable { time, forces },
    })
}
