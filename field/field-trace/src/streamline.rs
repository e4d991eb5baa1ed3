//! Traced polylines and why they stopped.

use field_types::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Terminal state of a traced streamline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopReason {
    /// The next point left the mesh.
    ReachedBoundary,
    /// A heuristic stop fired before the line reached its minimum length.
    StoppedShort,
    /// The step budget ran out.
    MaxStepsExceeded,
    /// A heuristic stop fired after the line reached its minimum length.
    CompletedMinLength,
}

impl StopReason {
    /// Classify a heuristic stop by the length reached so far.
    #[must_use]
    pub fn heuristic(length: f64, min_length: f64) -> Self {
        if length >= min_length {
            Self::CompletedMinLength
        } else {
            Self::StoppedShort
        }
    }

    /// Whether this reason came from a heuristic stop.
    #[must_use]
    pub const fn is_heuristic(self) -> bool {
        matches!(self, Self::StoppedShort | Self::CompletedMinLength)
    }
}

/// The heuristic that ended a streamline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopCause {
    /// The face vector has no direction.
    ZeroField,
    /// The field lies along the face normal, leaving no tangent direction.
    NormalField,
    /// The line re-entered a face it had already left.
    RevisitedFace,
    /// The next point came too close to an accepted streamline.
    NearStreamline,
    /// The line came back around to its own seed.
    NearSeed,
}

/// A polyline traced through a line field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Streamline {
    /// Ordered points, starting at the seed for one-directional lines.
    pub points: Vec<Point3<f64>>,

    /// Seed location on the mesh.
    pub seed: Point3<f64>,

    /// Tag of the traced field.
    pub tag: String,

    /// `1.0` if the first step followed the stored face vector, `-1.0` if it
    /// was flipped.
    pub initial_sign: f64,

    /// Why tracing stopped (forward half for bidirectional lines).
    pub stop_reason: StopReason,

    /// Heuristic behind `stop_reason`, if any.
    pub stop_cause: Option<StopCause>,

    /// Why the backward half stopped, for bidirectional lines.
    pub backward_stop_reason: Option<StopReason>,

    /// Polyline length.
    pub length: f64,

    /// Faces crossed, in order of traversal.
    pub faces: Vec<usize>,
}

impl Streamline {
    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the line has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> {
        self.points.iter().zip(self.points.iter().skip(1))
    }

    /// Whether the line is long enough to keep.
    #[must_use]
    pub fn reaches(&self, min_length: f64) -> bool {
        self.length >= min_length
    }

    /// Join a backward half onto a forward half traced from the same seed.
    ///
    /// The backward points are reversed so the result runs continuously
    /// through the seed. Heuristic reasons are reclassified by the joined
    /// length.
    #[must_use]
    pub fn join(forward: Self, backward: Self, min_length: f64) -> Self {
        let length = forward.length + backward.length;

        let mut points: Vec<Point3<f64>> = backward.points.into_iter().rev().collect();
        points.pop();
        points.extend(forward.points);

        let mut faces: Vec<usize> = backward.faces.into_iter().rev().collect();
        faces.pop();
        faces.extend(forward.faces);

        let reclassify = |reason: StopReason| {
            if reason.is_heuristic() {
                StopReason::heuristic(length, min_length)
            } else {
                reason
            }
        };

        Self {
            points,
            seed: forward.seed,
            tag: forward.tag,
            initial_sign: forward.initial_sign,
            stop_reason: reclassify(forward.stop_reason),
            stop_cause: forward.stop_cause,
            backward_stop_reason: Some(reclassify(backward.stop_reason)),
            length,
            faces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight(xs: &[f64], reason: StopReason) -> Streamline {
        Streamline {
            points: xs.iter().map(|&x| Point3::new(x, 0.0, 0.0)).collect(),
            seed: Point3::origin(),
            tag: "dir".to_string(),
            initial_sign: 1.0,
            stop_reason: reason,
            stop_cause: None,
            backward_stop_reason: None,
            length: xs.last().map_or(0.0, |x| x.abs()),
            faces: vec![0],
        }
    }

    #[test]
    fn test_heuristic_classification() {
        assert_eq!(StopReason::heuristic(0.3, 0.2), StopReason::CompletedMinLength);
        assert_eq!(StopReason::heuristic(0.2, 0.2), StopReason::CompletedMinLength);
        assert_eq!(StopReason::heuristic(0.1, 0.2), StopReason::StoppedShort);
        assert!(!StopReason::ReachedBoundary.is_heuristic());
    }

    #[test]
    fn test_segments() {
        let line = straight(&[0.0, 1.0, 2.0], StopReason::ReachedBoundary);
        assert_eq!(line.segments().count(), 2);
        assert_eq!(line.len(), 3);
        assert!(line.reaches(2.0));
    }

    #[test]
    fn test_join() {
        let forward = straight(&[0.0, 0.1, 0.2], StopReason::ReachedBoundary);
        let backward = straight(&[0.0, -0.1], StopReason::StoppedShort);
        let joined = Streamline::join(forward, backward, 0.25);

        let xs: Vec<f64> = joined.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-0.1, 0.0, 0.1, 0.2]);
        assert_relative_eq!(joined.length, 0.3, epsilon = 1e-12);
        assert_eq!(joined.stop_reason, StopReason::ReachedBoundary);
        assert_eq!(
            joined.backward_stop_reason,
            Some(StopReason::CompletedMinLength)
        );
        assert_eq!(joined.faces, vec![0]);
    }
}
