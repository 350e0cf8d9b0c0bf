use crate::config::Analysis;
use crate::error::{ForcesError, Result};
use crate::filter::{FilteredForces, Kernel, filter_table};
use crate::index::TimeRange;
use crate::loader::{self, progress};
use crate::model::{Component, ForceMap, ForceSeries, ForceType};
use crate::stats::{MeanStd, aggregate};
use crate::table::ForceTable;
use serde::{Deserialize, Serialize};
use std::{ops::Range, path::Path};

/// Reference quantities used to turn forces into coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Reference {
    pub rho: f64,
    pub velocity: f64,
    pub area: f64,
}

impl Default for Reference {
    fn default() -> Self {
        Self {
            rho: 1.0,
            velocity: 1.0,
            area: 2.0,
        }
    }
}

impl Reference {
    /// Dynamic pressure times reference area.
    pub fn dynamic_force(&self) -> f64 {
        0.5 * self.rho * self.velocity.powi(2) * self.area
    }
}

/// Force history of one simulation and the statistics derived from it.
///
/// Owns the merged series and its scaled column view. Derived results are
/// returned by value and the latest of each kind is also kept, so that
/// filtered statistics can be computed from the last filtering.
#[derive(Debug)]
pub struct Forces {
    verbose: bool,
    series: ForceSeries,
    table: ForceTable,
    averages: Option<ForceMap<MeanStd>>,
    filtered: Option<FilteredForces>,
    filtered_averages: Option<ForceMap<MeanStd>>,
}

impl Forces {
    /// Load the force history found at `input`, a force file or a case directory.
    ///
    /// # Errors
    /// Returns an error if `input` does not exist, a file cannot be read,
    /// or `options` are invalid.
    pub fn load<P: AsRef<Path>>(input: P, options: &Analysis) -> Result<Self> {
        options.validate()?;
        let series = loader::load(input, options.duplicates, options.verbose)?;
        Self::from_series(series, options)
    }

    /// Build from already located force files, merged and sorted by time.
    pub fn from_fragments<P: AsRef<Path>>(fragments: &[P], options: &Analysis) -> Result<Self> {
        options.validate()?;
        let series = loader::load_fragments(fragments, true, options.duplicates, options.verbose)?;
        Self::from_series(series, options)
    }

    pub fn from_series(series: ForceSeries, options: &Analysis) -> Result<Self> {
        options.validate()?;

        let table = ForceTable::from_series(&series, options.scale_time, options.scale_forces);
        let mut forces = Self {
            verbose: options.verbose,
            series,
            table,
            averages: None,
            filtered: None,
            filtered_averages: None,
        };
        if options.average {
            forces.calculate_averages_std(TimeRange::FULL)?;
        }
        Ok(forces)
    }

    pub fn series(&self) -> &ForceSeries {
        &self.series
    }

    /// Scaled forces.
    pub fn table(&self) -> &ForceTable {
        &self.table
    }

    pub fn min_time(&self) -> Option<f64> {
        let time = self.table.min_time();
        progress(self.verbose, &format!("min time is {time:?}"));
        time
    }

    pub fn max_time(&self) -> Option<f64> {
        let time = self.table.max_time();
        progress(self.verbose, &format!("max time is {time:?}"));
        time
    }

    /// Scaled values of one component within `range`.
    pub fn force_by_time(&self, range: TimeRange, ft: ForceType, comp: Component) -> Result<&[f64]> {
        let indices = self.indices(range)?;
        Ok(&self.table.component(ft, comp)[indices])
    }

    /// Scaled times within `range`.
    pub fn time_by_time(&self, range: TimeRange) -> Result<&[f64]> {
        let indices = self.indices(range)?;
        Ok(&self.table.time[indices])
    }

    fn indices(&self, range: TimeRange) -> Result<Range<usize>> {
        let indices = self.table.indices(range)?;
        progress(
            self.verbose,
            &format!("start index {} end index {}", indices.start, indices.end),
        );
        Ok(indices)
    }

    /// Mean and standard deviation of the scaled forces over `range`.
    ///
    /// Components are `NaN` if `range` selects no samples.
    pub fn calculate_averages_std(&mut self, range: TimeRange) -> Result<ForceMap<MeanStd>> {
        let indices = self.indices(range)?;
        let averages = aggregate(&self.table.forces, indices);
        self.averages = Some(averages);
        Ok(averages)
    }

    /// Smooth the scaled forces over `range`, replacing any previous filtering.
    ///
    /// # Errors
    /// Returns [`ForcesError::InvalidWindow`] for an even `window`.
    pub fn filter_forces(
        &mut self,
        range: TimeRange,
        window: usize,
        kernel: Kernel,
    ) -> Result<&FilteredForces> {
        let filtered = filter_table(&self.table, range, window, kernel)?;
        progress(
            self.verbose,
            &format!("filtered {} samples with {kernel:?} window {window}", filtered.table.len()),
        );
        self.filtered_averages = None;
        Ok(&*self.filtered.insert(filtered))
    }

    /// Mean and standard deviation of the last filtered forces over `range`.
    ///
    /// # Errors
    /// Returns [`ForcesError::Precondition`] if [`Forces::filter_forces`] was never called.
    pub fn calculate_filtered_averages_std(
        &mut self,
        range: TimeRange,
    ) -> Result<ForceMap<MeanStd>> {
        let filtered = self
            .filtered
            .as_ref()
            .ok_or(ForcesError::Precondition("filtered forces; run filter_forces first"))?;
        let averages = filtered.averages_std(range)?;
        self.filtered_averages = Some(averages);
        Ok(averages)
    }

    pub fn averages(&self) -> Option<&ForceMap<MeanStd>> {
        self.averages.as_ref()
    }

    pub fn filtered(&self) -> Option<&FilteredForces> {
        self.filtered.as_ref()
    }

    pub fn filtered_averages(&self) -> Option<&ForceMap<MeanStd>> {
        self.filtered_averages.as_ref()
    }

    /// Scaled forces divided by the dynamic force of `reference`.
    pub fn coefficients(&self, reference: &Reference) -> ForceTable {
        let dynamic_force = reference.dynamic_force();
        self.table.map_forces(|force| force / dynamic_force)
    }
}
