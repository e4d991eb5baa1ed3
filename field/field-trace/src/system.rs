//! Streamline sessions.

use field_mesh::{FaceAdjacency, FaceMesh, Field, FieldOptions, PolyMesh};
use field_types::Point3;
use tracing::{debug, info, warn};

use crate::error::TraceResult;
use crate::params::TraceParams;
use crate::registry::ProximityRegistry;
use crate::streamline::Streamline;
use crate::tracer::{check_sizes, trace};

/// Outcome counts of tracing a batch of seeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Lines long enough to keep.
    pub accepted: usize,
    /// Lines traced but shorter than the minimum length.
    pub rejected: usize,
    /// Seeds that could not be traced.
    pub failed: usize,
}

/// A tracing session over one mesh and one field.
///
/// The session owns the proximity registry. Lines are traced one at a time,
/// and every accepted line is registered before the next one starts, so the
/// order of seeds matters: later lines keep their distance from earlier ones.
///
/// # Example
///
/// ```
/// use field_mesh::planar_grid;
/// use field_trace::{StreamSystem, TraceParams};
/// use field_types::{Point3, Vector3};
///
/// let mut mesh = planar_grid(4, 4, 1.0, 1.0);
/// mesh.set_face_attributes("dir", &[Vector3::x(); 16])?;
///
/// let params = TraceParams::spaced(0.5).with_step(0.1);
/// let mut system = StreamSystem::from_poly_mesh(&mesh, "dir", params)?;
///
/// let seeds = [Point3::new(2.0, 1.5, 0.0), Point3::new(2.0, 1.7, 0.0)];
/// let summary = system.trace_seeds(&seeds);
///
/// assert_eq!(summary.accepted, 1);
/// assert_eq!(system.streamlines().len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct StreamSystem<'a, M> {
    mesh: &'a M,
    adjacency: FaceAdjacency,
    field: Field,
    params: TraceParams,
    registry: ProximityRegistry,
    streamlines: Vec<Streamline>,
}

impl<'a, M: FaceMesh> StreamSystem<'a, M> {
    /// Create a session from prepared parts.
    ///
    /// The registry cell size follows the proximity radius, falling back to
    /// the step length when proximity is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the parts disagree
    /// on the number of faces.
    pub fn new(
        mesh: &'a M,
        adjacency: FaceAdjacency,
        field: Field,
        params: TraceParams,
    ) -> TraceResult<Self> {
        params.validate()?;
        check_sizes(mesh, &adjacency, &field)?;

        let cell_size = if params.proximity > 0.0 {
            params.proximity
        } else {
            params.step_length
        };
        let registry = ProximityRegistry::new(cell_size)?;

        info!(
            faces = mesh.face_count(),
            tag = field.tag(),
            step_length = params.step_length,
            proximity = params.proximity,
            "Created stream system"
        );

        Ok(Self {
            mesh,
            adjacency,
            field,
            params,
            registry,
            streamlines: Vec::new(),
        })
    }

    /// Trace one seed. Accepted lines are stored and registered.
    ///
    /// The traced line is returned whether or not it was accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed cannot be located or a mesh lookup fails.
    pub fn trace_seed(&mut self, seed: &Point3<f64>) -> TraceResult<Streamline> {
        let line = trace(
            self.mesh,
            &self.adjacency,
            &self.field,
            seed,
            &self.params,
            &self.registry,
        )?;

        if line.reaches(self.params.min_length) {
            self.registry.extend(&line.points);
            self.streamlines.push(line.clone());
            debug!(
                index = self.streamlines.len() - 1,
                points = line.len(),
                length = line.length,
                "Accepted streamline"
            );
        } else {
            debug!(length = line.length, reason = ?line.stop_reason, "Rejected streamline");
        }
        Ok(line)
    }

    /// Trace seeds in order. Failing seeds are logged and skipped.
    pub fn trace_seeds(&mut self, seeds: &[Point3<f64>]) -> SeedSummary {
        let mut summary = SeedSummary::default();

        for seed in seeds {
            match self.trace_seed(seed) {
                Ok(line) if line.reaches(self.params.min_length) => summary.accepted += 1,
                Ok(_) => summary.rejected += 1,
                Err(err) => {
                    warn!(%seed, error = %err, "Skipping seed");
                    summary.failed += 1;
                }
            }
        }

        info!(
            seeds = seeds.len(),
            accepted = summary.accepted,
            rejected = summary.rejected,
            failed = summary.failed,
            "Traced seeds"
        );
        summary
    }

    /// Accepted streamlines in acceptance order.
    #[must_use]
    pub fn streamlines(&self) -> &[Streamline] {
        &self.streamlines
    }

    /// Points of all accepted streamlines.
    #[must_use]
    pub const fn registry(&self) -> &ProximityRegistry {
        &self.registry
    }

    /// The traced field.
    #[must_use]
    pub const fn field(&self) -> &Field {
        &self.field
    }

    /// Face adjacency used for stepping.
    #[must_use]
    pub const fn adjacency(&self) -> &FaceAdjacency {
        &self.adjacency
    }

    /// Session parameters.
    #[must_use]
    pub const fn params(&self) -> &TraceParams {
        &self.params
    }

    /// Drop all accepted lines and registered points.
    pub fn clear(&mut self) {
        self.streamlines.clear();
        self.registry.clear();
    }

    /// Consume the session, returning its accepted lines.
    #[must_use]
    pub fn into_streamlines(self) -> Vec<Streamline> {
        self.streamlines
    }
}

impl<'a> StreamSystem<'a, PolyMesh> {
    /// Create a session for the `tag` field of a polygon mesh.
    ///
    /// Adjacency is built from shared edges and the field is normalized.
    ///
    /// # Errors
    ///
    /// Returns an error if a face lacks the tag, a vector has no direction,
    /// or the parameters are invalid.
    pub fn from_poly_mesh(mesh: &'a PolyMesh, tag: &str, params: TraceParams) -> TraceResult<Self> {
        let adjacency = FaceAdjacency::from_mesh(mesh);
        let field = Field::from_mesh(mesh, tag, FieldOptions::default())?;
        Self::new(mesh, adjacency, field, params)
    }
}
