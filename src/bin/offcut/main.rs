//! Offcut CLI - OFF/4OFF triangulation tool.
//!
//! Usage: offcut <COMMAND> <INPUT> [OUTPUT]
//!
//! Run `offcut --help` for available commands.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};

use offcut::algo::{
    triangulate_4d_with_progress, triangulate_with_progress, Progress, TriangulateOptions,
};
use offcut::io::off::{self, OffMesh};

#[derive(Parser)]
#[command(name = "offcut")]
#[command(author, version, about = "OFF/4OFF triangulation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input OFF or 4OFF file
        input: PathBuf,
    },

    /// Triangulate a mesh
    Triangulate {
        /// Input OFF or 4OFF file
        input: PathBuf,

        /// Output file for the triangulated mesh (same format as the input)
        output: Option<PathBuf>,

        /// Vertex merge tolerance, per coordinate
        #[arg(short, long, default_value = "1e-6")]
        tolerance: f64,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => cmd_info(&input),
        Commands::Triangulate {
            input,
            output,
            tolerance,
        } => cmd_triangulate(&input, output.as_deref(), tolerance),
    }
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0)); // Track highest percent seen (monotonic)

    Progress::new(move |processed, total| {
        if total == 0 {
            return;
        }

        let percent = if processed >= total {
            100
        } else {
            ((processed * 100) + (total / 2)) / total
        };

        // Only move forward, never bounce back on late reports.
        let previous = max_percent.fetch_max(percent, Ordering::Relaxed);
        if percent <= previous && percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        let bar: String = std::iter::repeat('=').take(filled).collect();
        let space: String = std::iter::repeat(' ').take(bar_width - filled).collect();

        eprint!("\r[{}{}] {:3}% ({}/{} faces)", bar, space, percent, processed, total);
        let _ = std::io::stderr().flush();

        if processed >= total {
            eprintln!();
        }
    })
}

fn polygon_histogram(faces: &[Vec<usize>]) -> BTreeMap<usize, usize> {
    let mut sizes = BTreeMap::new();
    for face in faces {
        *sizes.entry(face.len()).or_insert(0) += 1;
    }
    sizes
}

fn print_histogram(faces: &[Vec<usize>]) {
    println!("Polygon sizes:");
    for (size, count) in polygon_histogram(faces) {
        println!("  {}-gon: {}", size, count);
    }
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    println!("File: {}", input.display());

    match off::load(input)? {
        OffMesh::Dim3(mesh) => {
            println!("Format: OFF");
            println!("Vertices: {}", mesh.num_vertices());
            println!("Faces: {}", mesh.num_faces());
            println!("Edges: {}", mesh.edges().len());
            print_histogram(mesh.faces());
        }
        OffMesh::Dim4(mesh) => {
            println!("Format: 4OFF");
            println!("Vertices: {}", mesh.num_vertices());
            println!("Faces: {}", mesh.num_faces());
            println!("Edges: {}", mesh.edges().len());
            println!("Cells: {}", mesh.num_cells());
            print_histogram(mesh.faces());
        }
    }

    Ok(())
}

fn cmd_triangulate(
    input: &PathBuf,
    output: Option<&std::path::Path>,
    tolerance: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = TriangulateOptions::default().with_tolerance(tolerance);
    let progress = create_progress();

    match off::load(input)? {
        OffMesh::Dim3(mesh) => {
            println!(
                "Loaded: {} vertices, {} faces",
                mesh.num_vertices(),
                mesh.num_faces()
            );

            let start = Instant::now();
            let tri = triangulate_with_progress(&mesh, &options, &progress)?;
            let elapsed = start.elapsed();

            println!(
                "Result: {} triangles, {} vertices ({} appended) ({:.2?})",
                tri.num_triangles(),
                tri.num_vertices(),
                tri.num_vertices() - mesh.num_vertices(),
                elapsed
            );
            if let Some(path) = output {
                off::save(&tri, path)?;
                println!("Saved: {}", path.display());
            }
        }
        OffMesh::Dim4(mesh) => {
            println!(
                "Loaded: {} vertices, {} faces, {} cells",
                mesh.num_vertices(),
                mesh.num_faces(),
                mesh.num_cells()
            );

            let start = Instant::now();
            let tri = triangulate_4d_with_progress(&mesh, &options, &progress)?;
            let elapsed = start.elapsed();

            println!(
                "Result: {} triangles, {} vertices ({} appended), {} cells ({:.2?})",
                tri.num_triangles(),
                tri.num_vertices(),
                tri.num_vertices() - mesh.num_vertices(),
                tri.cells().len(),
                elapsed
            );
            if let Some(path) = output {
                off::save_4d(&tri, path)?;
                println!("Saved: {}", path.display());
            }
        }
    }

    Ok(())
}
