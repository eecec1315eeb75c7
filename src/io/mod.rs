//! Mesh file I/O.
//!
//! # Supported Formats
//!
//! | Format | Tag | Load | Save | Notes |
//! |--------|-------|------|------|-------|
//! | OFF | `OFF` | ✓ | ✓ | 3D polyhedron boundary |
//! | 4OFF | `4OFF` | ✓ | ✓ | 4D polychoron boundary with cells |
//!
//! # Usage
//!
//! ```no_run
//! use offcut::io::off::{self, OffMesh};
//!
//! // Dispatch on the format tag
//! match off::load("cube.off").unwrap() {
//!     OffMesh::Dim3(mesh) => println!("{} faces", mesh.num_faces()),
//!     OffMesh::Dim4(mesh) => println!("{} cells", mesh.num_cells()),
//! }
//!
//! // Or require a specific format
//! let mesh = off::load_3d("cube.off").unwrap();
//! ```

pub mod off;

pub use off::OffMesh;
