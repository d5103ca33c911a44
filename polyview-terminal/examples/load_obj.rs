/// Example: open an OBJ file in the terminal viewer
///
/// Usage: cargo run --example load_obj -- path/to/model.obj

use std::env;

use anyhow::{Context, Result};
use polyview_core::Viewer;
use polyview_terminal::TerminalApp;

fn main() -> Result<()> {
    let mut viewer = Viewer::new()?;

    match env::args().nth(1) {
        Some(path) => {
            viewer
                .load_obj_file(&path)
                .with_context(|| format!("failed to load {path}"))?;
            let mesh = viewer.active();
            println!("Loaded {} vertices, {} faces", mesh.vertex_count(), mesh.face_count());
        }
        None => eprintln!("No OBJ file given, showing the cube"),
    }

    let mut app = TerminalApp::new(viewer)?;
    app.run()?;
    Ok(())
}
