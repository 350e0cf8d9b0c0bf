//! Force data types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of computed force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ForceType {
    Total,
    Pressure,
    Viscous,
}

impl ForceType {
    pub const ALL: [ForceType; 3] = [ForceType::Total, ForceType::Pressure, ForceType::Viscous];
}

impl fmt::Display for ForceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ForceType::Total => "total",
            ForceType::Pressure => "pressure",
            ForceType::Viscous => "viscous",
        };
        f.write_str(name)
    }
}

/// Cartesian axis of a force vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    X,
    Y,
    Z,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::X, Component::Y, Component::Z];
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::X => "x",
            Component::Y => "y",
            Component::Z => "z",
        };
        f.write_str(name)
    }
}

/// One value per Cartesian axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Axes<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Axes<T> {
    pub fn get(&self, comp: Component) -> &T {
        match comp {
            Component::X => &self.x,
            Component::Y => &self.y,
            Component::Z => &self.z,
        }
    }

    pub fn get_mut(&mut self, comp: Component) -> &mut T {
        match comp {
            Component::X => &mut self.x,
            Component::Y => &mut self.y,
            Component::Z => &mut self.z,
        }
    }
}

/// One value per (force type, component) pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceMap<T> {
    pub total: Axes<T>,
    pub pressure: Axes<T>,
    pub viscous: Axes<T>,
}

impl<T> ForceMap<T> {
    /// Build a map by evaluating `f` for each of the nine pairs.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(ForceType, Component) -> T,
    {
        let mut axes = |ft| Axes {
            x: f(ft, Component::X),
            y: f(ft, Component::Y),
            z: f(ft, Component::Z),
        };
        Self {
            total: axes(ForceType::Total),
            pressure: axes(ForceType::Pressure),
            viscous: axes(ForceType::Viscous),
        }
    }

    pub fn axes(&self, ft: ForceType) -> &Axes<T> {
        match ft {
            ForceType::Total => &self.total,
            ForceType::Pressure => &self.pressure,
            ForceType::Viscous => &self.viscous,
        }
    }

    pub fn axes_mut(&mut self, ft: ForceType) -> &mut Axes<T> {
        match ft {
            ForceType::Total => &mut self.total,
            ForceType::Pressure => &mut self.pressure,
            ForceType::Viscous => &mut self.viscous,
        }
    }

    pub fn get(&self, ft: ForceType, comp: Component) -> &T {
        self.axes(ft).get(comp)
    }

    pub fn get_mut(&mut self, ft: ForceType, comp: Component) -> &mut T {
        self.axes_mut(ft).get_mut(comp)
    }

    /// Apply `f` to every pair, keeping the layout.
    pub fn map<U, F>(&self, mut f: F) -> ForceMap<U>
    where
        F: FnMut(ForceType, Component, &T) -> U,
    {
        ForceMap::from_fn(|ft, comp| f(ft, comp, self.get(ft, comp)))
    }
}

/// Forces acting at a single timestep.
///
/// Field order on disk: time, total (x, y, z), pressure (x, y, z), viscous (x, y, z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceRecord {
    pub time: f64,
    pub forces: ForceMap<f64>,
}

impl ForceRecord {
    /// Number of numeric fields of a record on disk.
    pub const N_FIELDS: usize = 10;

    /// Build a record from its on-disk field order.
    pub fn from_fields(fields: [f64; Self::N_FIELDS]) -> Self {
        let vector = |i: usize| Axes {
            x: fields[i],
            y: fields[i + 1],
            z: fields[i + 2],
        };
        Self {
            time: fields[0],
            forces: ForceMap {
                total: vector(1),
                pressure: vector(4),
                viscous: vector(7),
            },
        }
    }

    pub fn force(&self, ft: ForceType, comp: Component) -> f64 {
        *self.forces.get(ft, comp)
    }
}

/// Time-ordered sequence of force records.
///
/// Immutable once built; see [`crate::loader`] for construction from files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForceSeries {
    records: Vec<ForceRecord>,
}

impl ForceSeries {
    pub fn new(records: Vec<ForceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ForceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|rec| rec.time)
    }

    /// Check that times never decrease between adjacent records.
    pub fn is_sorted(&self) -> bool {
        self.records.windows(2).all(|pair| pair[0].time <= pair[1].time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_fields_map_to_named_components() {
        let rec = ForceRecord::from_fields([0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(rec.time, 0.5);
        assert_eq!(rec.force(ForceType::Total, Component::X), 1.0);
        assert_eq!(rec.force(ForceType::Total, Component::Z), 3.0);
        assert_eq!(rec.force(ForceType::Pressure, Component::Y), 5.0);
        assert_eq!(rec.force(ForceType::Viscous, Component::X), 7.0);
        assert_eq!(rec.force(ForceType::Viscous, Component::Z), 9.0);
    }

    #[test]
    fn from_fn_visits_every_pair_once() {
        let mut visited = Vec::new();
        let map = ForceMap::from_fn(|ft, comp| {
            visited.push((ft, comp));
            format!("{ft}.{comp}")
        });
        assert_eq!(visited.len(), 9);
        assert_eq!(map.get(ForceType::Pressure, Component::Z), "pressure.z");
        assert_eq!(map.viscous.x, "viscous.x");
    }
}
