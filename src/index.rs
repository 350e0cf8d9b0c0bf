use crate::error::{ForcesError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Pair of time bounds selecting part of a series.
///
/// A bound equal to zero is open: `start == 0` starts at the first sample and
/// `end == 0` runs to the last one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    /// The whole series.
    pub const FULL: TimeRange = TimeRange {
        start: 0.0,
        end: 0.0,
    };

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    fn validate(&self) -> Result<()> {
        let valid = |t: f64| t.is_finite() && t >= 0.0;
        let ordered = self.start == 0.0 || self.end == 0.0 || self.start <= self.end;
        if !valid(self.start) || !valid(self.end) || !ordered {
            return Err(ForcesError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Index of the first sample whose time is not less than `time`.
///
/// Returns `times.len()` if every sample is earlier than `time`.
pub fn time_to_index(times: &[f64], time: f64) -> usize {
    times
        .iter()
        .position(|&t| t >= time)
        .unwrap_or(times.len())
}

/// Half-open index range of `times` selected by `range`.
///
/// # Errors
/// Returns [`ForcesError::InvalidRange`] for negative, non-finite or inverted bounds.
pub fn range_to_indices(times: &[f64], range: TimeRange) -> Result<Range<usize>> {
    range.validate()?;

    let start_idx = if range.start > 0.0 {
        time_to_index(times, range.start)
    } else {
        0
    };
    let end_idx = if range.end > 0.0 {
        time_to_index(times, range.end)
    } else {
        times.len()
    };
    Ok(start_idx..end_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMES: [f64; 6] = [0.0, 0.5, 1.0, 1.0, 1.5, 2.0];

    #[test]
    fn time_to_index_finds_first_match() {
        assert_eq!(time_to_index(&TIMES, 0.0), 0);
        assert_eq!(time_to_index(&TIMES, 0.7), 2);
        assert_eq!(time_to_index(&TIMES, 1.0), 2);
        assert_eq!(time_to_index(&TIMES, 2.0), 5);
        assert_eq!(time_to_index(&TIMES, 9.0), TIMES.len());
        assert_eq!(time_to_index(&[], 1.0), 0);
    }

    #[test]
    fn open_bounds_select_ends() {
        assert_eq!(range_to_indices(&TIMES, TimeRange::FULL).unwrap(), 0..6);
        assert_eq!(range_to_indices(&TIMES, TimeRange::new(1.0, 0.0)).unwrap(), 2..6);
        assert_eq!(range_to_indices(&TIMES, TimeRange::new(0.0, 1.5)).unwrap(), 0..4);
        assert_eq!(range_to_indices(&TIMES, TimeRange::new(0.5, 1.5)).unwrap(), 1..4);
        assert_eq!(range_to_indices(&[], TimeRange::FULL).unwrap(), 0..0);
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        for range in [
            TimeRange::new(-1.0, 0.0),
            TimeRange::new(0.0, -0.5),
            TimeRange::new(2.0, 1.0),
            TimeRange::new(f64::NAN, 0.0),
            TimeRange::new(0.0, f64::INFINITY),
        ] {
            let err = range_to_indices(&TIMES, range).unwrap_err();
            assert!(matches!(err, ForcesError::InvalidRange { .. }), "{range:?}");
        }
    }
}
