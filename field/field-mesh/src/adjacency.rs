//! Face adjacency for polygon meshes.
//!
//! The tracer steps across shared edges; this is the lookup it uses.

use hashbrown::HashMap;

use crate::mesh::PolyMesh;

/// Face adjacency information.
///
/// Two faces are adjacent if they share an edge (two consecutive vertices
/// of each polygon).
#[derive(Debug, Clone, Default)]
pub struct FaceAdjacency {
    /// For each face, the sorted list of adjacent face indices.
    adjacent: Vec<Vec<usize>>,
    /// For each face, whether any of its edges is unshared.
    boundary: Vec<bool>,
}

impl FaceAdjacency {
    /// Build face adjacency from a polygon mesh.
    ///
    /// # Example
    ///
    /// ```
    /// use field_mesh::{planar_grid, FaceAdjacency};
    ///
    /// let mesh = planar_grid(2, 1, 1.0, 1.0);
    /// let adj = FaceAdjacency::from_mesh(&mesh);
    /// assert_eq!(adj.neighbors(0), &[1]);
    /// assert!(adj.is_boundary(0));
    /// ```
    #[must_use]
    pub fn from_mesh(mesh: &PolyMesh) -> Self {
        Self::from_faces(mesh.face_index_lists())
    }

    /// Build face adjacency from polygon index lists.
    #[must_use]
    pub fn from_faces<'a>(faces: impl Iterator<Item = &'a [u32]>) -> Self {
        let mut edge_to_faces: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
        let mut face_count = 0;

        for (face_idx, face) in faces.enumerate() {
            face_count = face_idx + 1;
            for (k, &v0) in face.iter().enumerate() {
                let v1 = face[(k + 1) % face.len()];
                let edge = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                edge_to_faces.entry(edge).or_default().push(face_idx);
            }
        }

        let mut adjacent: Vec<Vec<usize>> = vec![Vec::new(); face_count];
        let mut boundary = vec![false; face_count];

        for faces in edge_to_faces.values() {
            match faces.as_slice() {
                [single] => boundary[*single] = true,
                shared => {
                    // Non-manifold edges connect every face pair around them.
                    for (i, &a) in shared.iter().enumerate() {
                        for &b in &shared[i + 1..] {
                            if a != b {
                                adjacent[a].push(b);
                                adjacent[b].push(a);
                            }
                        }
                    }
                }
            }
        }

        for adj_list in &mut adjacent {
            adj_list.sort_unstable();
            adj_list.dedup();
        }

        Self { adjacent, boundary }
    }

    /// Get the neighbors of a face.
    ///
    /// Returns an empty slice if the face index is out of bounds.
    #[must_use]
    pub fn neighbors(&self, face_idx: usize) -> &[usize] {
        self.adjacent.get(face_idx).map_or(&[], Vec::as_slice)
    }

    /// Whether the face has at least one unshared edge.
    #[must_use]
    pub fn is_boundary(&self, face_idx: usize) -> bool {
        self.boundary.get(face_idx).copied().unwrap_or(false)
    }

    /// Get the number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.adjacent.len()
    }

    /// Check if two faces are adjacent.
    #[must_use]
    pub fn are_adjacent(&self, face_a: usize, face_b: usize) -> bool {
        self.neighbors(face_a).binary_search(&face_b).is_ok()
    }
}
