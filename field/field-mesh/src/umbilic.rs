//! Detection of faces where the line field loses a dominant orientation.
//!
//! Near an umbilic point the principal directions rotate quickly, so the
//! field on a face disagrees with at least one of its edge neighbours.
//! These faces make natural streamline seeds.

use field_types::Line;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::adjacency::FaceAdjacency;
use crate::field::Field;

/// Classification of a face by local field coherence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FaceLabel {
    /// The face agrees with all its neighbours.
    Regular,
    /// The face direction is undefined or deviates from a neighbour.
    Singular,
}

/// Label every face of a field.
///
/// A face is [`FaceLabel::Singular`] when its vector has no direction or the
/// unsigned angle to some edge neighbour exceeds `max_angle` (radians, in
/// `[0, pi/2]`).
#[must_use]
pub fn label_faces(adjacency: &FaceAdjacency, field: &Field, max_angle: f64) -> Vec<FaceLabel> {
    let lines: Vec<Option<Line>> = field
        .vectors()
        .iter()
        .map(|v| Line::new(v).ok())
        .collect();

    lines
        .iter()
        .enumerate()
        .map(|(face, line)| {
            let Some(line) = line else {
                return FaceLabel::Singular;
            };
            let deviates = adjacency
                .neighbors(face)
                .iter()
                .filter_map(|&n| lines.get(n).copied().flatten())
                .any(|other| line.angle(&other) > max_angle);
            if deviates {
                FaceLabel::Singular
            } else {
                FaceLabel::Regular
            }
        })
        .collect()
}

/// Ids of the faces labelled [`FaceLabel::Singular`].
///
/// # Example
///
/// ```
/// use field_mesh::{planar_grid, umbilic_faces, FaceAdjacency, Field};
/// use field_types::Vector3;
///
/// let mesh = planar_grid(3, 1, 1.0, 1.0);
/// let adjacency = FaceAdjacency::from_mesh(&mesh);
/// let field = Field::from_vectors("ps_1_top", vec![Vector3::x(), -Vector3::x(), Vector3::y()]);
///
/// // Faces 1 and 2 meet at a right angle; 0 and 1 are the same line.
/// let umbilics = umbilic_faces(&adjacency, &field, 0.5);
/// assert_eq!(umbilics, vec![1, 2]);
/// ```
#[must_use]
pub fn umbilic_faces(adjacency: &FaceAdjacency, field: &Field, max_angle: f64) -> Vec<usize> {
    label_faces(adjacency, field, max_angle)
        .into_iter()
        .enumerate()
        .filter(|&(_, label)| label == FaceLabel::Singular)
        .map(|(face, _)| face)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::planar_grid;
    use field_types::Vector3;

    #[test]
    fn uniform_field_has_no_umbilics() {
        let mesh = planar_grid(3, 3, 1.0, 1.0);
        let adjacency = FaceAdjacency::from_mesh(&mesh);
        let field = Field::from_vectors("m_1", vec![Vector3::new(1.0, 1.0, 0.0); 9]);
        assert!(umbilic_faces(&adjacency, &field, 0.1).is_empty());
    }

    #[test]
    fn zero_vector_face_is_singular() {
        let mesh = planar_grid(2, 1, 1.0, 1.0);
        let adjacency = FaceAdjacency::from_mesh(&mesh);
        let field = Field::from_vectors("m_1", vec![Vector3::zeros(), Vector3::x()]);
        let labels = label_faces(&adjacency, &field, 0.1);
        assert_eq!(labels, vec![FaceLabel::Singular, FaceLabel::Regular]);
    }

    #[test]
    fn rotating_field_marks_centre() {
        let mesh = planar_grid(3, 1, 1.0, 1.0);
        let adjacency = FaceAdjacency::from_mesh(&mesh);
        let field = Field::from_vectors(
            "m_1",
            vec![Vector3::x(), Vector3::new(1.0, 1.0, 0.0), Vector3::y()],
        );
        // 45 degree steps: a 30 degree threshold flags all three faces.
        assert_eq!(umbilic_faces(&adjacency, &field, 0.5), vec![0, 1, 2]);
        // A 60 degree threshold flags none.
        assert!(umbilic_faces(&adjacency, &field, 1.05).is_empty());
    }
}
