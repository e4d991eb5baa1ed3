//! Streamline integration through a piecewise-constant line field.

use field_closest::{closest_point, containing_face, face_contains};
use field_mesh::{FaceAdjacency, FaceMesh, Field};
use field_types::{Point3, Vector3, align_vector, closest_point_on_plane, normalize};
use hashbrown::HashSet;
use tracing::debug;

use crate::error::{TraceError, TraceResult};
use crate::params::TraceParams;
use crate::registry::ProximityRegistry;
use crate::streamline::{StopCause, StopReason, Streamline};

/// Trace one streamline from `seed`.
///
/// The seed is snapped to the face containing it, or to the closest point
/// on the mesh when that lies within `params.seed_tolerance`. Each step
/// reads the vector of the current face, projects it onto the face plane,
/// orients it along the previous step (or along
/// `params.initial_direction` for the first step) and advances by
/// `params.step_length`. Points are located in the current face first, then
/// in its edge neighbours, then by a scan over all faces.
///
/// Tracing stops when the next point leaves the mesh, when the step budget
/// runs out, or when a heuristic fires: no usable direction, re-entering a
/// face already left, coming within `params.proximity` of a point in
/// `registry`, or returning within `params.self_proximity` of the seed.
/// Points that trigger a stop are not appended.
///
/// With `params.bidirectional`, the line is traced along both orientations
/// and the halves are joined through the seed.
///
/// # Errors
///
/// Returns an error if:
/// - The parameters are invalid
/// - Mesh, adjacency and field sizes disagree
/// - No face contains or lies near the seed
/// - A mesh lookup fails
///
/// # Examples
///
/// ```
/// use field_mesh::{FaceAdjacency, Field, FieldOptions, planar_grid};
/// use field_trace::{ProximityRegistry, StopReason, TraceParams, trace};
/// use field_types::{Point3, Vector3};
///
/// let mut mesh = planar_grid(2, 1, 1.0, 1.0);
/// mesh.set_face_attributes("dir", &[Vector3::x(), Vector3::x()])?;
/// let adjacency = FaceAdjacency::from_mesh(&mesh);
/// let field = Field::from_mesh(&mesh, "dir", FieldOptions::default())?;
/// let registry = ProximityRegistry::new(0.1)?;
///
/// let params = TraceParams::with_step_length(0.1);
/// let line = trace(&mesh, &adjacency, &field, &Point3::new(0.5, 0.5, 0.0), &params, &registry)?;
///
/// assert_eq!(line.stop_reason, StopReason::ReachedBoundary);
/// assert_eq!(line.faces, vec![0, 1]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn trace<M: FaceMesh>(
    mesh: &M,
    adjacency: &FaceAdjacency,
    field: &Field,
    seed: &Point3<f64>,
    params: &TraceParams,
    registry: &ProximityRegistry,
) -> TraceResult<Streamline> {
    params.validate()?;
    check_sizes(mesh, adjacency, field)?;

    let (face, start) = locate_seed(mesh, seed, params.seed_tolerance)?;
    let tracer = Tracer {
        mesh,
        adjacency,
        field,
        params,
        registry,
    };
    let hint = normalize(&params.initial_direction).ok();

    if !params.bidirectional {
        return tracer.run(face, start, hint);
    }

    let hint = hint.or_else(|| field.vector(face).and_then(|v| normalize(&v).ok()));
    let forward = tracer.run(face, start, hint)?;
    let backward = tracer.run(face, start, hint.map(|h| -h))?;
    Ok(Streamline::join(forward, backward, params.min_length))
}

/// Check that mesh, adjacency and field describe the same faces.
pub(crate) fn check_sizes<M: FaceMesh>(
    mesh: &M,
    adjacency: &FaceAdjacency,
    field: &Field,
) -> TraceResult<()> {
    let faces = mesh.face_count();
    for vectors in [field.len(), adjacency.face_count()] {
        if vectors != faces {
            return Err(TraceError::FieldSizeMismatch { faces, vectors });
        }
    }
    Ok(())
}

/// Resolve a seed to a face and a point on that face.
fn locate_seed<M: FaceMesh>(
    mesh: &M,
    seed: &Point3<f64>,
    tolerance: f64,
) -> TraceResult<(usize, Point3<f64>)> {
    if let Some(face) = containing_face(mesh, seed)? {
        let origin = mesh.face_centroid(face)?;
        let normal = mesh.face_normal(face)?;
        return Ok((face, closest_point_on_plane(seed, &origin, &normal)));
    }

    match closest_point(mesh, seed)? {
        Some(hit) if hit.distance <= tolerance => {
            debug!(face = hit.face, distance = hit.distance, "Seed snapped to mesh");
            Ok((hit.face, hit.point))
        }
        _ => Err(TraceError::NoContainingFace { seed: *seed }),
    }
}

/// Shared inputs of one tracing call.
struct Tracer<'a, M> {
    mesh: &'a M,
    adjacency: &'a FaceAdjacency,
    field: &'a Field,
    params: &'a TraceParams,
    registry: &'a ProximityRegistry,
}

impl<M: FaceMesh> Tracer<'_, M> {
    /// Trace in one orientation from an already located seed.
    fn run(
        &self,
        seed_face: usize,
        start: Point3<f64>,
        hint: Option<Vector3<f64>>,
    ) -> TraceResult<Streamline> {
        let params = self.params;
        let mut points = vec![start];
        let mut faces = vec![seed_face];
        let mut left: HashSet<usize> = HashSet::new();

        let mut face = seed_face;
        let mut current = start;
        let mut direction = hint;
        let mut initial_sign = 1.0;
        let mut length = 0.0;
        let mut steps = 0;
        let mut left_seed_ball = false;

        let heuristic =
            |length: f64, cause: StopCause| (StopReason::heuristic(length, params.min_length), Some(cause));

        let (stop_reason, stop_cause) = loop {
            if steps == 0 && self.registry.is_near(&current, params.proximity) {
                break heuristic(length, StopCause::NearStreamline);
            }
            if steps >= params.max_steps {
                break (StopReason::MaxStepsExceeded, None);
            }

            let stored = self.field.vector(face).unwrap_or_else(Vector3::zeros);
            let Ok(unit) = normalize(&stored) else {
                break heuristic(length, StopCause::ZeroField);
            };
            let normal = self.mesh.face_normal(face)?;
            let Ok(tangent) = normalize(&(unit - normal * unit.dot(&normal))) else {
                break heuristic(length, StopCause::NormalField);
            };

            let step = match direction {
                Some(previous) => align_vector(&tangent, &previous),
                None => tangent,
            };
            if steps == 0 && step.dot(&tangent) < 0.0 {
                initial_sign = -1.0;
            }
            direction = Some(step);
            steps += 1;

            let next = current + step * params.step_length;
            let Some(next_face) = self.locate(face, &next)? else {
                break (StopReason::ReachedBoundary, None);
            };

            if next_face != face && left.contains(&next_face) {
                break heuristic(length, StopCause::RevisitedFace);
            }
            if self.registry.is_near(&next, params.proximity) {
                break heuristic(length, StopCause::NearStreamline);
            }
            let seed_distance = (next - start).norm();
            if left_seed_ball && seed_distance < params.self_proximity {
                break heuristic(length, StopCause::NearSeed);
            }
            if seed_distance >= params.self_proximity {
                left_seed_ball = true;
            }

            if next_face != face {
                left.insert(face);
                faces.push(next_face);
                face = next_face;
            }
            points.push(next);
            length += params.step_length;
            current = next;
        };

        debug!(
            reason = ?stop_reason,
            cause = ?stop_cause,
            points = points.len(),
            length,
            "Streamline stopped"
        );

        Ok(Streamline {
            points,
            seed: start,
            tag: self.field.tag().to_string(),
            initial_sign,
            stop_reason,
            stop_cause,
            backward_stop_reason: None,
            length,
            faces,
        })
    }

    /// Face containing `point`, searched near `face` first.
    fn locate(&self, face: usize, point: &Point3<f64>) -> TraceResult<Option<usize>> {
        if face_contains(self.mesh, face, point)? {
            return Ok(Some(face));
        }
        for &neighbor in self.adjacency.neighbors(face) {
            if face_contains(self.mesh, neighbor, point)? {
                return Ok(Some(neighbor));
            }
        }
        Ok(containing_face(self.mesh, point)?)
    }
}
