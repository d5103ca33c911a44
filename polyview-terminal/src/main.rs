/// Polyview - terminal wireframe viewer
///
/// Shows the built-in regular solids, OBJ files and generated meshes
/// (solids of revolution, height-field surfaces) as ASCII wireframes.
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polyview_core::{Axis, Mesh, ProjectionMode, Solid, Viewer};
use polyview_terminal::TerminalApp;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polyview")]
#[command(about = "Interactive 3D wireframe viewer for polyhedral meshes", long_about = None)]
#[command(version)]
struct Cli {
    /// Write log output to this file (filter with RUST_LOG)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer
    View {
        /// Built-in solid to start with
        #[arg(long, default_value = "cube")]
        solid: Solid,

        /// OBJ file to load and show instead of the solid
        #[arg(long)]
        obj: Option<PathBuf>,

        /// perspective or axonometric
        #[arg(long, default_value = "perspective")]
        projection: ProjectionMode,
    },

    /// Build a solid of revolution from a profile file (one "x, y, z" per line)
    Revolve {
        #[arg(long)]
        profile: PathBuf,

        #[arg(long, default_value = "z")]
        axis: Axis,

        #[arg(long, default_value_t = 16)]
        slices: usize,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build a height-field surface z = f(x, y)
    Surface {
        /// paraboloid, hyperbolic, sinc, wave or sphere
        #[arg(long, default_value = "paraboloid")]
        function: String,

        #[arg(long, default_value = "-2", allow_hyphen_values = true)]
        x_min: String,

        #[arg(long, default_value = "2", allow_hyphen_values = true)]
        x_max: String,

        #[arg(long, default_value = "-2", allow_hyphen_values = true)]
        y_min: String,

        #[arg(long, default_value = "2", allow_hyphen_values = true)]
        y_max: String,

        #[arg(long, default_value_t = 16)]
        grid: usize,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Save the mesh as OBJ here instead of printing it
    #[arg(long)]
    output: Option<PathBuf>,

    /// Open the result in the viewer
    #[arg(long)]
    view: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = match &cli.command {
        None | Some(Commands::View { .. }) => true,
        Some(Commands::Revolve { output, .. }) | Some(Commands::Surface { output, .. }) => {
            output.view
        }
    };
    init_logging(cli.log_file.as_deref(), interactive)?;

    let mut viewer = Viewer::new().context("failed to build the built-in solids")?;

    match cli.command {
        None => run_viewer(viewer),
        Some(Commands::View {
            solid,
            obj,
            projection,
        }) => {
            viewer.select_solid(solid);
            viewer.mode = projection;
            if let Some(path) = obj {
                viewer
                    .load_obj_file(&path)
                    .with_context(|| format!("failed to load {}", path.display()))?;
            }
            run_viewer(viewer)
        }
        Some(Commands::Revolve {
            profile,
            axis,
            slices,
            output,
        }) => {
            let text = fs::read_to_string(&profile)
                .with_context(|| format!("failed to read profile {}", profile.display()))?;
            viewer.revolve_profile(&text, axis, slices)?;
            finish(viewer, &output)
        }
        Some(Commands::Surface {
            function,
            x_min,
            x_max,
            y_min,
            y_max,
            grid,
            output,
        }) => {
            viewer.surface(&function, [&x_min, &x_max, &y_min, &y_max], grid)?;
            finish(viewer, &output)
        }
    }
}

/// Route a freshly generated mesh to a file, stdout and/or the viewer
fn finish(viewer: Viewer, output: &OutputArgs) -> Result<()> {
    match &output.output {
        Some(path) => {
            viewer.save_active(path)?;
            eprintln!("Wrote {}", path.display());
        }
        None if !output.view => print_obj(viewer.active())?,
        None => {}
    }

    if output.view {
        run_viewer(viewer)?;
    }
    Ok(())
}

fn print_obj(mesh: &Mesh) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(mesh.to_obj().as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn run_viewer(viewer: Viewer) -> Result<()> {
    let mut app = TerminalApp::new(viewer)?;
    app.run()?;
    Ok(())
}

/// The viewer owns the terminal, so interactive runs only log when a file is given.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    match log_file {
        Some(path) => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None if !interactive => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }

    Ok(())
}
