//! Spatial registry of accepted streamline points.

// Cell coordinates of realistic meshes fit in i64
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use field_types::Point3;
use hashbrown::HashMap;

use crate::error::{TraceError, TraceResult};

/// Integer coordinates of a registry cell.
type CellKey = [i64; 3];

/// Points of accepted streamlines, bucketed in a uniform hashed grid.
///
/// Queries only visit the cells overlapping the query radius, so proximity
/// checks stay cheap as a session accumulates lines. When the radius spans
/// more cells than are occupied, the query scans the occupied cells instead.
///
/// # Example
///
/// ```
/// use field_trace::ProximityRegistry;
/// use field_types::Point3;
///
/// let mut registry = ProximityRegistry::new(0.5)?;
/// registry.insert(Point3::new(1.0, 1.0, 0.0));
///
/// assert!(registry.is_near(&Point3::new(1.2, 1.0, 0.0), 0.25));
/// assert!(!registry.is_near(&Point3::new(2.0, 1.0, 0.0), 0.25));
/// # Ok::<(), field_trace::TraceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProximityRegistry {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<Point3<f64>>>,
    len: usize,
}

impl ProximityRegistry {
    /// Create an empty registry with the given cell edge length.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidParams`] unless `cell_size` is positive
    /// and finite.
    pub fn new(cell_size: f64) -> TraceResult<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(TraceError::InvalidParams {
                name: "cell_size",
                value: cell_size,
            });
        }
        Ok(Self {
            cell_size,
            cells: HashMap::new(),
            len: 0,
        })
    }

    /// Cell edge length.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of registered points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no points are registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every point.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.len = 0;
    }

    /// Register a point.
    pub fn insert(&mut self, point: Point3<f64>) {
        self.cells.entry(self.cell_of(&point)).or_default().push(point);
        self.len += 1;
    }

    /// Register every point of a polyline.
    pub fn extend<'a>(&mut self, points: impl IntoIterator<Item = &'a Point3<f64>>) {
        for point in points {
            self.insert(*point);
        }
    }

    /// Iterate over all registered points in no particular order.
    pub fn points(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.cells.values().flatten()
    }

    /// Distance to the nearest registered point strictly within `radius`.
    #[must_use]
    pub fn nearest_within(&self, point: &Point3<f64>, radius: f64) -> Option<f64> {
        if radius <= 0.0 || self.is_empty() {
            return None;
        }

        let reach = (radius / self.cell_size).ceil();
        let span = 2.0 * reach + 1.0;
        let limit = radius * radius;

        let mut best: Option<f64> = None;
        let mut visit = |bucket: &[Point3<f64>]| {
            for other in bucket {
                let dist_sq = (other - point).norm_squared();
                if dist_sq < limit && best.is_none_or(|b| dist_sq < b) {
                    best = Some(dist_sq);
                }
            }
        };

        if span * span * span > self.cells.len() as f64 {
            for bucket in self.cells.values() {
                visit(bucket.as_slice());
            }
        } else {
            let reach = reach as i64;
            let [cx, cy, cz] = self.cell_of(point);
            for x in (cx - reach)..=(cx + reach) {
                for y in (cy - reach)..=(cy + reach) {
                    for z in (cz - reach)..=(cz + reach) {
                        if let Some(bucket) = self.cells.get(&[x, y, z]) {
                            visit(bucket.as_slice());
                        }
                    }
                }
            }
        }

        best.map(f64::sqrt)
    }

    /// Whether any registered point lies strictly within `radius`.
    #[must_use]
    pub fn is_near(&self, point: &Point3<f64>, radius: f64) -> bool {
        self.nearest_within(point, radius).is_some()
    }

    fn cell_of(&self, point: &Point3<f64>) -> CellKey {
        [
            (point.x / self.cell_size).floor() as i64,
            (point.y / self.cell_size).floor() as i64,
            (point.z / self.cell_size).floor() as i64,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invalid_cell_size() {
        assert!(ProximityRegistry::new(0.0).is_err());
        assert!(ProximityRegistry::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_insert_and_query() {
        let mut registry = ProximityRegistry::new(0.1).unwrap();
        assert!(registry.is_empty());

        let line: Vec<Point3<f64>> = (0..10)
            .map(|i| Point3::new(0.1 * f64::from(i), 0.0, 0.0))
            .collect();
        registry.extend(&line);
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.points().count(), 10);

        let near = registry.nearest_within(&Point3::new(0.45, 0.05, 0.0), 0.2);
        assert_relative_eq!(near.unwrap(), 0.05_f64.hypot(0.05), epsilon = 1e-12);

        assert!(!registry.is_near(&Point3::new(0.5, 1.0, 0.0), 0.5));
        assert!(registry.is_near(&Point3::new(0.5, 1.0, 0.0), 1.01));
    }

    #[test]
    fn test_radius_is_strict() {
        let mut registry = ProximityRegistry::new(1.0).unwrap();
        registry.insert(Point3::origin());
        assert!(!registry.is_near(&Point3::new(0.5, 0.0, 0.0), 0.5));
        assert!(!registry.is_near(&Point3::origin(), 0.0));
    }

    #[test]
    fn test_negative_coordinates_and_cell_boundaries() {
        let mut registry = ProximityRegistry::new(1.0).unwrap();
        registry.insert(Point3::new(-0.01, -0.01, 0.0));
        assert!(registry.is_near(&Point3::new(0.01, 0.01, 0.0), 0.1));
    }

    #[test]
    fn test_large_radius_scans_all_cells() {
        let mut registry = ProximityRegistry::new(0.01).unwrap();
        registry.insert(Point3::new(50.0, 0.0, 0.0));
        let near = registry.nearest_within(&Point3::origin(), 100.0);
        assert_relative_eq!(near.unwrap(), 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clear() {
        let mut registry = ProximityRegistry::new(0.5).unwrap();
        registry.insert(Point3::origin());
        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.is_near(&Point3::origin(), 1.0));
    }
}
