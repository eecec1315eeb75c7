//! The triangulation pipeline.
//!
//! Stages, in the order the orchestrator drives them per face:
//!
//! - **frame**: rotate the face's supporting plane onto a canonical 2D frame
//! - **decompose**: split self-intersecting contours into simple rings
//! - **triangulate**: triangulate each simple ring
//! - **dedup**: map 2D triangle corners back to N-D and resolve them against
//!   the growing output vertex pool
//! - **pipeline**: the batch orchestrator tying the stages together, with
//!   throttled progress reporting and an optional background-thread runner
//!
//! Entry points are [`triangulate`] / [`triangulate_4d`] (and their
//! `_with_progress` variants), or [`spawn_triangulate`] /
//! [`spawn_triangulate_4d`] for event-channel use off the caller's thread.

pub mod decompose;
pub mod dedup;
pub mod frame;
pub mod pipeline;
pub mod progress;
pub mod triangulate;

pub use frame::{Frame3, Frame4, PlanarFrame};
pub use pipeline::{
    spawn_triangulate, spawn_triangulate_4d, triangulate, triangulate_4d,
    triangulate_4d_with_progress, triangulate_with_progress, PipelineEvent, TriangulateOptions,
};
pub use progress::{Progress, Throttle};
