//! Viewer session state shared by the front ends.
//!
//! Holds the built-in solids, the active mesh, the transform parameters and
//! the projection mode. Every operation that produces a new mesh either
//! installs it or returns an error and leaves the previous one in place.

use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::geometry::Mesh;
use crate::obj;
use crate::projection::{render_frame, Frame, ProjectionMode};
use crate::revolution::{parse_profile, revolve, Axis};
use crate::solids::{Solid, SolidLibrary};
use crate::surface::{build_surface, Domain, SurfaceFunction};
use crate::transform::TransformParams;

/// Which mesh is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Builtin(Solid),
    /// The last mesh loaded from OBJ or produced by a generator
    Custom,
}

pub struct Viewer {
    library: SolidLibrary,
    custom: Option<Mesh>,
    selection: Selection,
    pub params: TransformParams,
    pub mode: ProjectionMode,
}

impl Viewer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            library: SolidLibrary::new()?,
            custom: None,
            selection: Selection::Builtin(Solid::default()),
            params: TransformParams::default(),
            mode: ProjectionMode::default(),
        })
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The mesh currently on screen
    pub fn active(&self) -> &Mesh {
        match (self.selection, &self.custom) {
            (Selection::Custom, Some(mesh)) => mesh,
            (Selection::Builtin(solid), _) => self.library.get(solid),
            (Selection::Custom, None) => self.library.get(Solid::default()),
        }
    }

    pub fn select_solid(&mut self, solid: Solid) {
        self.selection = Selection::Builtin(solid);
    }

    /// Show the custom mesh, or the default solid when there is none
    pub fn select_custom(&mut self) {
        self.selection = match self.custom {
            Some(_) => Selection::Custom,
            None => Selection::Builtin(Solid::default()),
        };
    }

    /// Step through the built-in solids, then the custom mesh if any
    pub fn cycle(&mut self) {
        let next = match self.selection {
            Selection::Builtin(solid) => {
                let pos = Solid::ALL.iter().position(|&s| s == solid).unwrap_or(0);
                match Solid::ALL.get(pos + 1) {
                    Some(&next) => Selection::Builtin(next),
                    None if self.custom.is_some() => Selection::Custom,
                    None => Selection::Builtin(Solid::ALL[0]),
                }
            }
            Selection::Custom => Selection::Builtin(Solid::ALL[0]),
        };
        self.selection = next;
    }

    /// Make `mesh` the custom mesh and show it
    pub fn install(&mut self, mesh: Mesh) {
        info!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "installing mesh"
        );
        self.custom = Some(mesh);
        self.selection = Selection::Custom;
    }

    pub fn load_obj_text(&mut self, text: &str) -> Result<()> {
        let mesh = obj::parse_obj(text).inspect_err(|e| warn!(error = %e, "OBJ load rejected"))?;
        self.install(mesh);
        Ok(())
    }

    pub fn load_obj_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mesh = obj::load_obj(path).inspect_err(|e| warn!(error = %e, "OBJ load failed"))?;
        self.install(mesh);
        Ok(())
    }

    pub fn save_active<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        obj::save_obj(self.active(), path)
    }

    /// Build a solid of revolution from profile text and show it
    pub fn revolve_profile(&mut self, profile: &str, axis: Axis, slices: usize) -> Result<()> {
        let points = parse_profile(profile);
        if points.len() < 2 {
            return Err(Error::InsufficientProfile(points.len()));
        }
        let mesh = revolve(&points, axis, slices)?;
        self.install(mesh);
        Ok(())
    }

    /// Build a surface from a function name and textual bounds and show it
    pub fn surface(&mut self, function: &str, bounds: [&str; 4], grid: usize) -> Result<()> {
        let [x_min, x_max, y_min, y_max] = bounds;
        let domain = Domain::parse(x_min, x_max, y_min, y_max)?;
        let mesh = build_surface(SurfaceFunction::from_name(function), &domain, grid)?;
        self.install(mesh);
        Ok(())
    }

    pub fn frame(&self, width: u32, height: u32) -> Frame<'_> {
        render_frame(self.active(), &self.params, self.mode, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_cube() {
        let viewer = Viewer::new().unwrap();
        assert_eq!(viewer.selection(), Selection::Builtin(Solid::Cube));
        assert_eq!(viewer.active().vertex_count(), 8);
        assert_eq!(viewer.mode, ProjectionMode::Perspective);
    }

    #[test]
    fn test_failed_load_keeps_previous_mesh() {
        let mut viewer = Viewer::new().unwrap();
        viewer
            .load_obj_text("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")
            .unwrap();
        assert_eq!(viewer.selection(), Selection::Custom);

        assert!(viewer.load_obj_text("v 1 2 3\nf 1 2 3\n").is_err());
        assert_eq!(viewer.selection(), Selection::Custom);
        assert_eq!(viewer.active().vertex_count(), 3);
    }

    #[test]
    fn test_short_profile_is_reported() {
        let mut viewer = Viewer::new().unwrap();
        let err = viewer.revolve_profile("1, 0, 0\nnope\n", Axis::Z, 8).unwrap_err();
        assert!(matches!(err, Error::InsufficientProfile(1)));
        assert_eq!(viewer.selection(), Selection::Builtin(Solid::Cube));
    }

    #[test]
    fn test_generators_install_mesh() {
        let mut viewer = Viewer::new().unwrap();
        viewer.revolve_profile("1,0,0\n1,0,1", Axis::Z, 4).unwrap();
        assert_eq!(viewer.active().vertex_count(), 10);

        viewer
            .surface("paraboloid", ["-1", "1", "-1", "1"], 2)
            .unwrap();
        assert_eq!(viewer.active().vertex_count(), 9);

        let err = viewer.surface("wave", ["a", "1", "-1", "1"], 2).unwrap_err();
        assert!(matches!(err, Error::InvalidBound { name: "x_min", .. }));
        assert_eq!(viewer.active().vertex_count(), 9);
    }

    #[test]
    fn test_cycle_visits_custom_mesh() {
        let mut viewer = Viewer::new().unwrap();
        viewer.select_solid(Solid::Dodecahedron);
        viewer.cycle();
        assert_eq!(viewer.selection(), Selection::Builtin(Solid::Tetrahedron));

        viewer.revolve_profile("1,0,0\n1,0,1", Axis::Z, 4).unwrap();
        viewer.select_solid(Solid::Dodecahedron);
        viewer.cycle();
        assert_eq!(viewer.selection(), Selection::Custom);
        viewer.cycle();
        assert_eq!(viewer.selection(), Selection::Builtin(Solid::Tetrahedron));
    }

    #[test]
    fn test_frame_matches_active_mesh() {
        let viewer = Viewer::new().unwrap();
        let frame = viewer.frame(640, 480);
        assert_eq!(frame.points.len(), 8);
        assert_eq!(frame.faces.len(), 6);
    }
}
