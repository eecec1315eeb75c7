//! Batch triangulation orchestrator.
//!
//! Drives the per-face stages — planar frame, self-intersection
//! decomposition, triangulation, reprojection and vertex resolution — over
//! every face of a raw mesh, in input order, accumulating the output triangle
//! list and the face-to-triangle-span map. Triangle faces skip the geometric
//! stages entirely and are emitted unchanged.
//!
//! Processing is sequential by design: progress cadence and the
//! first-error-aborts contract both depend on input order. The first face
//! that fails ends the run; no partial mesh escapes.
//!
//! # Example
//!
//! ```
//! use offcut::algo::{triangulate, TriangulateOptions};
//! use offcut::mesh::RawMesh3;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mesh = RawMesh3::new(vertices, vec![vec![0, 1, 2, 3]]).unwrap();
//!
//! let tri = triangulate(&mesh, &TriangulateOptions::default()).unwrap();
//! assert_eq!(tri.num_triangles(), 2);
//! assert_eq!(tri.faces_map()[0].len(), 2);
//! ```

use std::collections::BTreeMap;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::Duration;

use nalgebra::Point2;

use super::decompose::decompose;
use super::dedup::VertexPool;
use super::frame::{Frame3, Frame4, PlanarFrame};
use super::progress::{Progress, Throttle};
use super::triangulate::triangulate_ring;
use crate::error::{MeshError, Result};
use crate::mesh::{RawMesh3, RawMesh4, TriCell, TriMesh3, TriMesh4, TriangleRange};

/// Options for a triangulation run.
#[derive(Debug, Clone)]
pub struct TriangulateOptions {
    /// Per-coordinate merge tolerance for vertex resolution.
    ///
    /// The default matches the decomposer's six-decimal coordinate snapping,
    /// so round-tripped original vertices collapse onto their original
    /// indices while genuinely distinct points never merge.
    pub tolerance: f64,

    /// Minimum wall-clock interval between progress reports.
    pub progress_interval: Duration,
}

impl Default for TriangulateOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            progress_interval: Duration::from_millis(200),
        }
    }
}

impl TriangulateOptions {
    /// Set the vertex merge tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the minimum interval between progress reports.
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }
}

/// Triangulate a 3D polygon mesh.
pub fn triangulate(mesh: &RawMesh3, options: &TriangulateOptions) -> Result<TriMesh3> {
    triangulate_with_progress(mesh, options, &Progress::none())
}

/// Triangulate a 3D polygon mesh, reporting progress through `progress`.
pub fn triangulate_with_progress(
    mesh: &RawMesh3,
    options: &TriangulateOptions,
    progress: &Progress,
) -> Result<TriMesh3> {
    let batch = triangulate_faces::<Frame3>(mesh.vertices(), mesh.faces(), options, progress)?;

    let mut ngons_in_faces: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (fi, face) in mesh.faces().iter().enumerate() {
        ngons_in_faces.entry(face.len()).or_default().push(fi);
    }

    Ok(TriMesh3 {
        vertices: batch.vertices,
        faces: batch.faces,
        edges: mesh.edges().to_vec(),
        faces_map: batch.faces_map,
        ngons_in_faces,
    })
}

/// Triangulate a 4D polygon mesh and re-express its cells over the output
/// triangle list.
pub fn triangulate_4d(mesh: &RawMesh4, options: &TriangulateOptions) -> Result<TriMesh4> {
    triangulate_4d_with_progress(mesh, options, &Progress::none())
}

/// Triangulate a 4D polygon mesh, reporting progress through `progress`.
pub fn triangulate_4d_with_progress(
    mesh: &RawMesh4,
    options: &TriangulateOptions,
    progress: &Progress,
) -> Result<TriMesh4> {
    let batch = triangulate_faces::<Frame4>(mesh.vertices(), mesh.faces(), options, progress)?;

    let cells = mesh
        .cells()
        .iter()
        .map(|cell| TriCell {
            faces_count: cell.len(),
            face_indices: cell
                .iter()
                .flat_map(|&fi| batch.faces_map[fi].indices())
                .collect(),
        })
        .collect();

    Ok(TriMesh4 {
        vertices: batch.vertices,
        faces: batch.faces,
        edges: mesh.edges().to_vec(),
        faces_map: batch.faces_map,
        cells,
    })
}

struct BatchOutput<P> {
    vertices: Vec<P>,
    faces: Vec<[usize; 3]>,
    faces_map: Vec<TriangleRange>,
}

/// The dimension-independent face loop.
fn triangulate_faces<F: PlanarFrame>(
    vertices: &[F::Point],
    faces: &[Vec<usize>],
    options: &TriangulateOptions,
    progress: &Progress,
) -> Result<BatchOutput<F::Point>> {
    let mut pool = VertexPool::seeded(vertices.to_vec(), options.tolerance);
    let mut out_faces: Vec<[usize; 3]> = Vec::with_capacity(faces.len());
    let mut faces_map: Vec<TriangleRange> = Vec::with_capacity(faces.len());
    let mut throttle = Throttle::new(options.progress_interval);
    let total = faces.len();

    for (fi, face) in faces.iter().enumerate() {
        let start = out_faces.len();
        if face.len() == 3 {
            // Already a triangle; no frame, decomposition, or resolution.
            out_faces.push([face[0], face[1], face[2]]);
        } else {
            let corners: Vec<F::Point> = face.iter().map(|&vi| vertices[vi]).collect();
            let frame = F::from_face(&corners, fi)?;
            let contour: Vec<Point2<f64>> = corners.iter().map(|p| frame.project(p)).collect();

            for sub in decompose(&contour) {
                for tri in triangulate_ring(&sub, fi)? {
                    let mut indices = [0usize; 3];
                    for (slot, corner) in tri.iter().enumerate() {
                        indices[slot] = pool.resolve(frame.unproject(corner));
                    }
                    out_faces.push(indices);
                }
            }
        }
        faces_map.push(TriangleRange {
            start,
            end: out_faces.len(),
        });

        if throttle.ready() {
            progress.report(fi + 1, total);
        }
    }
    progress.report(total, total);

    Ok(BatchOutput {
        vertices: pool.into_points(),
        faces: out_faces,
        faces_map,
    })
}

/// One event from a background triangulation run.
///
/// A run emits zero or more `Progress` events followed by exactly one
/// terminal event: `Complete` with the finished mesh (ownership transferred
/// whole) or `Error` with the first failure.
#[derive(Debug)]
pub enum PipelineEvent<M> {
    /// Faces processed so far, out of the total.
    Progress {
        /// Number of faces processed.
        processed: usize,
        /// Total face count.
        total: usize,
    },
    /// The run finished; the mesh is handed over.
    Complete(M),
    /// The run failed; no partial result exists.
    Error(MeshError),
}

/// Run 3D triangulation on a background thread, streaming events.
pub fn spawn_triangulate(
    mesh: RawMesh3,
    options: TriangulateOptions,
) -> Receiver<PipelineEvent<TriMesh3>> {
    let (sender, receiver) = channel();
    let progress_sender = sender.clone();
    thread::spawn(move || {
        let progress = Progress::new(move |processed, total| {
            let _ = progress_sender.send(PipelineEvent::Progress { processed, total });
        });
        let terminal = match triangulate_with_progress(&mesh, &options, &progress) {
            Ok(result) => PipelineEvent::Complete(result),
            Err(e) => PipelineEvent::Error(e),
        };
        let _ = sender.send(terminal);
    });
    receiver
}

/// Run 4D triangulation on a background thread, streaming events.
pub fn spawn_triangulate_4d(
    mesh: RawMesh4,
    options: TriangulateOptions,
) -> Receiver<PipelineEvent<TriMesh4>> {
    let (sender, receiver) = channel();
    let progress_sender = sender.clone();
    thread::spawn(move || {
        let progress = Progress::new(move |processed, total| {
            let _ = progress_sender.send(PipelineEvent::Progress { processed, total });
        });
        let terminal = match triangulate_4d_with_progress(&mesh, &options, &progress) {
            Ok(result) => PipelineEvent::Complete(result),
            Err(e) => PipelineEvent::Error(e),
        };
        let _ = sender.send(terminal);
    });
    receiver
}
