/// Homogeneous 4x4 transformation matrices and the viewer's transform state
use nalgebra::{Matrix4, Vector4};

use crate::geometry::Point;

/// Transform parameters driven by the viewer controls.
///
/// Angles are in radians about the X/Y/Z axes. The reflection flags mirror
/// about the XY, XZ and YZ planes respectively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub translate_z: f64,
    pub reflect_xy: bool,
    pub reflect_xz: bool,
    pub reflect_yz: bool,
}

/// Smallest scale factor the incremental adjuster will go down to
pub const MIN_SCALE: f64 = 0.1;

impl TransformParams {
    pub fn new() -> Self {
        Self {
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            translate_z: 0.0,
            reflect_xy: false,
            reflect_xz: false,
            reflect_yz: false,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.rotate_x += dx;
        self.rotate_y += dy;
        self.rotate_z += dz;
    }

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.translate_x += dx;
        self.translate_y += dy;
        self.translate_z += dz;
    }

    /// Multiply the scale factor, never going below [`MIN_SCALE`]
    pub fn zoom(&mut self, factor: f64) {
        self.scale = (self.scale * factor).max(MIN_SCALE);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The per-frame transform as an ordered list of steps.
    ///
    /// `center` is the center of the mesh being drawn; scaling happens around it.
    pub fn steps(&self, center: Point) -> [TransformStep; 6] {
        [
            TransformStep::Reflect {
                xy: self.reflect_xy,
                xz: self.reflect_xz,
                yz: self.reflect_yz,
            },
            TransformStep::ScaleAround {
                factor: self.scale,
                center,
            },
            TransformStep::RotateX(self.rotate_x),
            TransformStep::RotateY(self.rotate_y),
            TransformStep::RotateZ(self.rotate_z),
            TransformStep::Translate(self.translate_x, self.translate_y, self.translate_z),
        ]
    }

    /// Composed model matrix for a mesh centered at `center`
    pub fn matrix(&self, center: Point) -> Matrix4<f64> {
        Transform::compose(&self.steps(center))
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self::new()
    }
}

/// One stage of the model transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformStep {
    Reflect { xy: bool, xz: bool, yz: bool },
    ScaleAround { factor: f64, center: Point },
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    Translate(f64, f64, f64),
}

impl TransformStep {
    pub fn matrix(&self) -> Matrix4<f64> {
        match *self {
            TransformStep::Reflect { xy, xz, yz } => Transform::reflection(xy, xz, yz),
            TransformStep::ScaleAround { factor, center } => {
                Transform::scale_around_center(factor, &center)
            }
            TransformStep::RotateX(angle) => Transform::rotation_x(angle),
            TransformStep::RotateY(angle) => Transform::rotation_y(angle),
            TransformStep::RotateZ(angle) => Transform::rotation_z(angle),
            TransformStep::Translate(dx, dy, dz) => Transform::translation(dx, dy, dz),
        }
    }
}

/// Transform builder for 3D transformations.
///
/// All matrices act on column vectors `[x, y, z, 1]`; `Matrix4::new` takes
/// its arguments row by row, so the literals below read as `m[row][col]`.
pub struct Transform;

impl Transform {
    pub fn identity() -> Matrix4<f64> {
        Matrix4::identity()
    }

    /// Matrix product `a · b`
    pub fn multiply(a: &Matrix4<f64>, b: &Matrix4<f64>) -> Matrix4<f64> {
        a * b
    }

    /// Multiply `m` by the homogeneous point `[x, y, z, 1]`.
    ///
    /// The returned `w` is 1 for affine matrices; projection matrices use it
    /// for the perspective divide.
    pub fn apply(m: &Matrix4<f64>, point: &Point) -> Vector4<f64> {
        m * point.to_homogeneous()
    }

    #[rustfmt::skip]
    pub fn rotation_x(angle: f64) -> Matrix4<f64> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, -s, 0.0,
            0.0, s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_y(angle: f64) -> Matrix4<f64> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            c, 0.0, s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_z(angle: f64) -> Matrix4<f64> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            c, -s, 0.0, 0.0,
            s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Uniform scale matrix
    pub fn scale(factor: f64) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        m[(0, 0)] = factor;
        m[(1, 1)] = factor;
        m[(2, 2)] = factor;
        m
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        m
    }

    /// Mirror about the XY (negate z), XZ (negate y) and/or YZ (negate x) planes
    pub fn reflection(about_xy: bool, about_xz: bool, about_yz: bool) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        if about_xy {
            m[(2, 2)] = -1.0;
        }
        if about_xz {
            m[(1, 1)] = -1.0;
        }
        if about_yz {
            m[(0, 0)] = -1.0;
        }
        m
    }

    /// `translation(-center) · scale(factor) · translation(center)`, in that order.
    ///
    /// Applied as `M · v` this is not the usual `T · S · T⁻¹` sandwich: the
    /// net offset is `(1 - factor) · (-center)` rather than `(1 - factor) · center`.
    pub fn scale_around_center(factor: f64, center: &Point) -> Matrix4<f64> {
        let to_origin = Self::translation(-center.x, -center.y, -center.z);
        let back = Self::translation(center.x, center.y, center.z);
        to_origin * Self::scale(factor) * back
    }

    /// Fold the steps left to right, right-multiplying each onto the identity
    pub fn compose(steps: &[TransformStep]) -> Matrix4<f64> {
        steps
            .iter()
            .fold(Self::identity(), |acc, step| Self::multiply(&acc, &step.matrix()))
    }
}
