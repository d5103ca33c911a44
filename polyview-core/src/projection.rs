/// Screen projections and the per-frame render pipeline
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix4, Point2};

use crate::error::{Error, Result};
use crate::geometry::{Face, Mesh, Point};
use crate::transform::{Transform, TransformParams};

/// Distance from the eye to the projection plane
pub const EYE_DISTANCE: f64 = 5.0;
/// Pixels per model unit in perspective mode
pub const PERSPECTIVE_SCALE: f64 = 100.0;
/// Lower bound on the homogeneous `w` before the perspective divide
pub const MIN_W: f64 = 0.1;
/// Pixels per model unit in axonometric mode
pub const AXONOMETRIC_SCALE: f64 = 80.0;
/// Skew angle of the axonometric projection (30°)
pub const AXONOMETRIC_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Axonometric,
}

impl ProjectionMode {
    pub fn toggle(self) -> Self {
        match self {
            ProjectionMode::Perspective => ProjectionMode::Axonometric,
            ProjectionMode::Axonometric => ProjectionMode::Perspective,
        }
    }

    /// The fixed 4x4 matrix for this mode
    #[rustfmt::skip]
    pub fn matrix(self) -> Matrix4<f64> {
        match self {
            ProjectionMode::Perspective => {
                let s = PERSPECTIVE_SCALE;
                Matrix4::new(
                    s, 0.0, 0.0, 0.0,
                    0.0, -s, 0.0, 0.0,
                    0.0, 0.0, 1.0, 0.0,
                    0.0, 0.0, -1.0 / EYE_DISTANCE, 1.0,
                )
            }
            ProjectionMode::Axonometric => {
                let (s, c) = AXONOMETRIC_ANGLE.sin_cos();
                Matrix4::new(
                    c, 0.0, -s, 0.0,
                    s * s, c, c * s, 0.0,
                    0.0, 0.0, 0.0, 0.0,
                    0.0, 0.0, 0.0, 1.0,
                )
            }
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionMode::Perspective => f.write_str("perspective"),
            ProjectionMode::Axonometric => f.write_str("axonometric"),
        }
    }
}

impl FromStr for ProjectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perspective" => Ok(ProjectionMode::Perspective),
            "axonometric" => Ok(ProjectionMode::Axonometric),
            _ => Err(Error::UnknownProjection(s.to_string())),
        }
    }
}

/// Projects model-space points onto a drawing surface of a given size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub mode: ProjectionMode,
    pub width: f64,
    pub height: f64,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Project an already model-transformed point to screen coordinates
    pub fn project_to_screen(&self, point: &Point) -> Point2<f64> {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let v = Transform::apply(&self.mode.matrix(), point);

        match self.mode {
            ProjectionMode::Perspective => {
                let w = v.w.max(MIN_W);
                Point2::new(v.x / w + half_w, v.y / w + half_h)
            }
            ProjectionMode::Axonometric => Point2::new(
                v.x * AXONOMETRIC_SCALE + half_w,
                half_h - v.y * AXONOMETRIC_SCALE,
            ),
        }
    }

    /// Transform every vertex of `mesh` by `params` and project it.
    ///
    /// The mesh itself is only read.
    pub fn render<'a>(&self, mesh: &'a Mesh, params: &TransformParams) -> Frame<'a> {
        let model = params.matrix(mesh.center());
        let points = mesh
            .vertices
            .iter()
            .map(|v| {
                let t = Transform::apply(&model, v);
                self.project_to_screen(&Point::new(t.x, t.y, t.z))
            })
            .collect();

        Frame {
            points,
            faces: &mesh.faces,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// One projected frame: a screen point per mesh vertex plus the face lists
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub points: Vec<Point2<f64>>,
    pub faces: &'a [Face],
}

impl Frame<'_> {
    /// Every face outline as screen-space segments, in storage order
    pub fn segments(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        self.faces
            .iter()
            .flat_map(|face| face.edges())
            .map(move |(a, b)| (self.points[a], self.points[b]))
    }
}

/// Render `mesh` for a `width × height` surface
pub fn render_frame<'a>(
    mesh: &'a Mesh,
    params: &TransformParams,
    mode: ProjectionMode,
    width: u32,
    height: u32,
) -> Frame<'a> {
    Camera::new(width, height).with_mode(mode).render(mesh, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert_eq!(camera.width, 800.0);
    }

    #[test]
    fn test_perspective_origin_is_screen_center() {
        let camera = Camera::new(800, 600);
        let p = camera.project_to_screen(&Point::origin());
        assert_relative_eq!(p, Point2::new(400.0, 300.0));
    }

    #[test]
    fn test_perspective_divide_and_flip() {
        let camera = Camera::new(800, 600);
        // z = 2.5 gives w = 1 - 2.5 / 5 = 0.5
        let p = camera.project_to_screen(&Point::new(1.0, 1.0, 2.5));
        assert_relative_eq!(p.x, 400.0 + 200.0);
        assert_relative_eq!(p.y, 300.0 - 200.0);
    }

    #[test]
    fn test_perspective_clamps_w() {
        let camera = Camera::new(800, 600);
        // behind the eye: w = 1 - 10 / 5 = -1, clamped to 0.1
        let p = camera.project_to_screen(&Point::new(1.0, 0.0, 10.0));
        assert_relative_eq!(p.x, 400.0 + 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_axonometric_matrix_shape() {
        let m = ProjectionMode::Axonometric.matrix();
        assert_eq!(m.row(2).iter().copied().collect::<Vec<_>>(), vec![0.0; 4]);
        assert_eq!(m.row(3).iter().copied().collect::<Vec<_>>(), vec![0.0, 0.0, 0.0, 1.0]);
        assert_relative_eq!(m[(1, 0)], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_axonometric_projection() {
        let camera = Camera::new(800, 600).with_mode(ProjectionMode::Axonometric);
        let (s, c) = AXONOMETRIC_ANGLE.sin_cos();

        let p = camera.project_to_screen(&Point::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, c * 80.0 + 400.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 300.0 - s * s * 80.0, epsilon = 1e-9);

        // depth only skews, it never divides
        let p = camera.project_to_screen(&Point::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p.x, 400.0 - s * 80.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 300.0 - c * s * 80.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("Axonometric".parse::<ProjectionMode>().unwrap(), ProjectionMode::Axonometric);
        assert!("fisheye".parse::<ProjectionMode>().is_err());
        assert_eq!(ProjectionMode::Perspective.toggle(), ProjectionMode::Axonometric);
    }

    #[test]
    fn test_render_keeps_vertex_order_and_source() {
        let mesh = Mesh::from_arrays(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[&[0, 1, 2]],
        )
        .unwrap();
        let before = mesh.clone();
        let params = TransformParams {
            translate_x: 1.0,
            ..TransformParams::default()
        };

        let frame = render_frame(&mesh, &params, ProjectionMode::Perspective, 200, 100);
        assert_eq!(frame.points.len(), 3);
        assert_relative_eq!(frame.points[0], Point2::new(200.0, 50.0));
        assert_relative_eq!(frame.points[1], Point2::new(300.0, 50.0));
        assert_eq!(frame.segments().count(), 3);
        assert_eq!(mesh, before);
    }
}
