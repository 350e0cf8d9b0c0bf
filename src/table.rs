use crate::error::Result;
use crate::index::{TimeRange, range_to_indices};
use crate::model::{Component, ForceMap, ForceSeries, ForceType};
use crate::stats::{MeanStd, aggregate};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Column view of a force series: one time axis and one sequence per component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceTable {
    pub time: Vec<f64>,
    pub forces: ForceMap<Vec<f64>>,
}

impl ForceTable {
    /// Split `series` into columns, dividing times by `scale_time` and forces by `scale_forces`.
    pub fn from_series(series: &ForceSeries, scale_time: f64, scale_forces: f64) -> Self {
        let records = series.records();
        Self {
            time: records.iter().map(|rec| rec.time / scale_time).collect(),
            forces: ForceMap::from_fn(|ft, comp| {
                records
                    .iter()
                    .map(|rec| rec.force(ft, comp) / scale_forces)
                    .collect()
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn min_time(&self) -> Option<f64> {
        self.time.first().copied()
    }

    pub fn max_time(&self) -> Option<f64> {
        self.time.last().copied()
    }

    pub fn component(&self, ft: ForceType, comp: Component) -> &[f64] {
        self.forces.get(ft, comp)
    }

    /// Half-open index range selected by `range` on this table's time axis.
    pub fn indices(&self, range: TimeRange) -> Result<Range<usize>> {
        range_to_indices(&self.time, range)
    }

    /// Mean and standard deviation of every component over `range`.
    pub fn averages_std(&self, range: TimeRange) -> Result<ForceMap<MeanStd>> {
        let indices = self.indices(range)?;
        Ok(aggregate(&self.forces, indices))
    }

    /// Apply `f` to every force value, keeping the time axis.
    pub fn map_forces<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            time: self.time.clone(),
            forces: self
                .forces
                .map(|_, _, vals| vals.iter().map(|&val| f(val)).collect()),
        }
    }
}
