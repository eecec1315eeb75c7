//! OFF and 4OFF (Object File Format) support.
//!
//! Both formats are line-oriented ASCII. The first content line is the format
//! tag (`OFF` or `4OFF`), the second the element counts, then one line per
//! vertex, one per face (`count i0 … i_{count-1}`), and — for 4OFF — one per
//! cell (`count f0 … f_{count-1}`, indices referencing faces). Blank lines
//! and `#` comments are allowed anywhere; the edge count in the header is
//! parsed but ignored, as most OFF writers emit zero there anyway.
//!
//! Parse failures are detected eagerly, before any triangulation work, and
//! name the offending 1-based line.

use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use nalgebra::{Point3, Point4};

use crate::error::{MeshError, Result};
use crate::mesh::{RawMesh3, RawMesh4, TriMesh3, TriMesh4};

/// A parsed mesh of either dimension, for callers that accept both formats.
#[derive(Debug, Clone)]
pub enum OffMesh {
    /// An `OFF` polyhedron mesh.
    Dim3(RawMesh3),
    /// A `4OFF` polychoron mesh.
    Dim4(RawMesh4),
}

/// Parse `OFF` text into a raw 3D mesh.
///
/// Fails with [`MeshError::Format`] if the tag is not exactly `OFF`.
pub fn parse_3d(text: &str) -> Result<RawMesh3> {
    let mut cursor = LineCursor::new(text);

    let (_, tag) = cursor.expect("the format tag")?;
    if tag != "OFF" {
        return Err(MeshError::Format {
            expected: "OFF",
            found: tag.to_string(),
        });
    }

    let (line, header) = cursor.expect("the element counts")?;
    let counts: Vec<usize> = parse_fields(line, header, "count")?;
    if counts.len() < 2 || counts.len() > 3 {
        return Err(MeshError::Parse {
            line,
            message: format!(
                "expected `nVertices nFaces [nEdges]`, found {} fields",
                counts.len()
            ),
        });
    }
    let (n_vertices, n_faces) = (counts[0], counts[1]);

    let mut vertices = Vec::with_capacity(n_vertices);
    for _ in 0..n_vertices {
        let (line, text) = cursor.expect("a vertex line")?;
        let coords: Vec<f64> = parse_fields(line, text, "coordinate")?;
        if coords.len() != 3 {
            return Err(MeshError::Parse {
                line,
                message: format!("expected 3 coordinates, found {}", coords.len()),
            });
        }
        vertices.push(Point3::new(coords[0], coords[1], coords[2]));
    }

    let faces = parse_faces(&mut cursor, n_faces, vertices.len())?;
    RawMesh3::new(vertices, faces)
}

/// Parse `4OFF` text into a raw 4D mesh.
///
/// Fails with [`MeshError::Format`] if the tag is not exactly `4OFF`.
pub fn parse_4d(text: &str) -> Result<RawMesh4> {
    let mut cursor = LineCursor::new(text);

    let (_, tag) = cursor.expect("the format tag")?;
    if tag != "4OFF" {
        return Err(MeshError::Format {
            expected: "4OFF",
            found: tag.to_string(),
        });
    }

    let (line, header) = cursor.expect("the element counts")?;
    let counts: Vec<usize> = parse_fields(line, header, "count")?;
    if counts.len() < 3 || counts.len() > 4 {
        return Err(MeshError::Parse {
            line,
            message: format!(
                "expected `nVertices nFaces nEdges [nCells]`, found {} fields",
                counts.len()
            ),
        });
    }
    let (n_vertices, n_faces) = (counts[0], counts[1]);
    let n_cells = counts.get(3).copied().unwrap_or(0);

    let mut vertices = Vec::with_capacity(n_vertices);
    for _ in 0..n_vertices {
        let (line, text) = cursor.expect("a vertex line")?;
        let coords: Vec<f64> = parse_fields(line, text, "coordinate")?;
        if coords.len() != 4 {
            return Err(MeshError::Parse {
                line,
                message: format!("expected 4 coordinates, found {}", coords.len()),
            });
        }
        vertices.push(Point4::new(coords[0], coords[1], coords[2], coords[3]));
    }

    let faces = parse_faces(&mut cursor, n_faces, vertices.len())?;
    let cells = parse_cells(&mut cursor, n_cells, faces.len())?;
    RawMesh4::with_cells(vertices, faces, cells)
}

/// Parse either format, dispatching on the tag.
pub fn parse(text: &str) -> Result<OffMesh> {
    let mut cursor = LineCursor::new(text);
    let (_, tag) = cursor.expect("the format tag")?;
    match tag {
        "OFF" => parse_3d(text).map(OffMesh::Dim3),
        "4OFF" => parse_4d(text).map(OffMesh::Dim4),
        other => Err(MeshError::Format {
            expected: "OFF or 4OFF",
            found: other.to_string(),
        }),
    }
}

/// Load an `OFF` file.
pub fn load_3d<P: AsRef<Path>>(path: P) -> Result<RawMesh3> {
    parse_3d(&fs::read_to_string(path)?)
}

/// Load a `4OFF` file.
pub fn load_4d<P: AsRef<Path>>(path: P) -> Result<RawMesh4> {
    parse_4d(&fs::read_to_string(path)?)
}

/// Load either format, dispatching on the tag.
pub fn load<P: AsRef<Path>>(path: P) -> Result<OffMesh> {
    parse(&fs::read_to_string(path)?)
}

/// Save a triangulated 3D mesh as `OFF` text.
pub fn save<P: AsRef<Path>>(mesh: &TriMesh3, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_3d(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Save a triangulated 4D mesh as `4OFF` text, cells as triangle-index lists.
pub fn save_4d<P: AsRef<Path>>(mesh: &TriMesh4, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_4d(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_3d<W: Write>(mesh: &TriMesh3, writer: &mut W) -> Result<()> {
    writeln!(writer, "OFF")?;
    writeln!(
        writer,
        "{} {} {}",
        mesh.num_vertices(),
        mesh.num_triangles(),
        mesh.edges().len()
    )?;
    for v in mesh.vertices() {
        writeln!(writer, "{} {} {}", v.x, v.y, v.z)?;
    }
    for f in mesh.faces() {
        writeln!(writer, "3 {} {} {}", f[0], f[1], f[2])?;
    }
    Ok(())
}

fn write_4d<W: Write>(mesh: &TriMesh4, writer: &mut W) -> Result<()> {
    writeln!(writer, "4OFF")?;
    writeln!(
        writer,
        "{} {} {} {}",
        mesh.num_vertices(),
        mesh.num_triangles(),
        mesh.edges().len(),
        mesh.cells().len()
    )?;
    for v in mesh.vertices() {
        writeln!(writer, "{} {} {} {}", v.x, v.y, v.z, v.w)?;
    }
    for f in mesh.faces() {
        writeln!(writer, "3 {} {} {}", f[0], f[1], f[2])?;
    }
    for cell in mesh.cells() {
        write!(writer, "{}", cell.face_indices.len())?;
        for &index in &cell.face_indices {
            write!(writer, " {}", index)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Content-line iterator skipping blanks and `#` comments, tracking 1-based
/// line numbers for error context.
struct LineCursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    consumed: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            consumed: 0,
        }
    }

    fn next_content(&mut self) -> Option<(usize, &'a str)> {
        for (i, raw) in self.lines.by_ref() {
            self.consumed = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return Some((i + 1, line));
        }
        None
    }

    fn expect(&mut self, what: &str) -> Result<(usize, &'a str)> {
        match self.next_content() {
            Some(found) => Ok(found),
            None => Err(MeshError::Parse {
                line: self.consumed + 1,
                message: format!("unexpected end of file while reading {}", what),
            }),
        }
    }
}

fn parse_fields<T: FromStr>(line: usize, text: &str, kind: &str) -> Result<Vec<T>> {
    text.split_whitespace()
        .map(|token| {
            token.parse::<T>().map_err(|_| MeshError::Parse {
                line,
                message: format!("invalid {} {:?}", kind, token),
            })
        })
        .collect()
}

fn parse_faces(
    cursor: &mut LineCursor<'_>,
    n_faces: usize,
    n_vertices: usize,
) -> Result<Vec<Vec<usize>>> {
    let mut faces = Vec::with_capacity(n_faces);
    for fi in 0..n_faces {
        let (line, text) = cursor.expect("a face line")?;
        let fields: Vec<usize> = parse_fields(line, text, "index")?;
        let count = fields[0];
        if count < 3 {
            return Err(MeshError::InvalidFace { face: fi, count });
        }
        if fields.len() != count + 1 {
            return Err(MeshError::Parse {
                line,
                message: format!(
                    "face lists {} vertices but has {} index fields",
                    count,
                    fields.len() - 1
                ),
            });
        }
        for &vi in &fields[1..] {
            if vi >= n_vertices {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
        }
        faces.push(fields[1..].to_vec());
    }
    Ok(faces)
}

fn parse_cells(
    cursor: &mut LineCursor<'_>,
    n_cells: usize,
    n_faces: usize,
) -> Result<Vec<Vec<usize>>> {
    let mut cells = Vec::with_capacity(n_cells);
    for ci in 0..n_cells {
        let (line, text) = cursor.expect("a cell line")?;
        let fields: Vec<usize> = parse_fields(line, text, "index")?;
        let count = fields[0];
        if fields.len() != count + 1 {
            return Err(MeshError::Parse {
                line,
                message: format!(
                    "cell lists {} faces but has {} index fields",
                    count,
                    fields.len() - 1
                ),
            });
        }
        for &fi in &fields[1..] {
            if fi >= n_faces {
                return Err(MeshError::InvalidFaceIndex { cell: ci, face: fi });
            }
        }
        cells.push(fields[1..].to_vec());
    }
    Ok(cells)
}
