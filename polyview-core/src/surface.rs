/// Height-field surfaces z = f(x, y) sampled on a regular grid
use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{Face, Mesh, Point};

/// Surface function selector.
///
/// Unrecognized names map to [`SurfaceFunction::Flat`], which is zero
/// everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFunction {
    /// `x² + y²`
    Paraboloid,
    /// `x² − y²`
    Hyperbolic,
    /// `sin(r) / r`, 1 at the origin
    Sinc,
    /// `sin(x) · cos(y)`
    Wave,
    /// `√(1 − x² − y²)` inside the unit disc, 0 outside
    Hemisphere,
    Flat,
}

impl SurfaceFunction {
    pub const ALL: [SurfaceFunction; 5] = [
        SurfaceFunction::Paraboloid,
        SurfaceFunction::Hyperbolic,
        SurfaceFunction::Sinc,
        SurfaceFunction::Wave,
        SurfaceFunction::Hemisphere,
    ];

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "paraboloid" => SurfaceFunction::Paraboloid,
            "hyperbolic" => SurfaceFunction::Hyperbolic,
            "sinc" => SurfaceFunction::Sinc,
            "wave" => SurfaceFunction::Wave,
            "sphere" | "hemisphere" => SurfaceFunction::Hemisphere,
            _ => SurfaceFunction::Flat,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SurfaceFunction::Paraboloid => "paraboloid",
            SurfaceFunction::Hyperbolic => "hyperbolic",
            SurfaceFunction::Sinc => "sinc",
            SurfaceFunction::Wave => "wave",
            SurfaceFunction::Hemisphere => "hemisphere",
            SurfaceFunction::Flat => "flat",
        }
    }

    pub fn eval(self, x: f64, y: f64) -> f64 {
        match self {
            SurfaceFunction::Paraboloid => x * x + y * y,
            SurfaceFunction::Hyperbolic => x * x - y * y,
            SurfaceFunction::Sinc => {
                let r = (x * x + y * y).sqrt();
                if r == 0.0 {
                    1.0
                } else {
                    r.sin() / r
                }
            }
            SurfaceFunction::Wave => x.sin() * y.cos(),
            SurfaceFunction::Hemisphere => {
                let r2 = x * x + y * y;
                if r2 <= 1.0 {
                    (1.0 - r2).sqrt()
                } else {
                    0.0
                }
            }
            SurfaceFunction::Flat => 0.0,
        }
    }
}

impl fmt::Display for SurfaceFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rectangular sampling domain `[x_min, x_max] × [y_min, y_max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Domain {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Parse the four bounds from user-entered text
    pub fn parse(x_min: &str, x_max: &str, y_min: &str, y_max: &str) -> Result<Self> {
        Ok(Self::new(
            parse_bound("x_min", x_min)?,
            parse_bound("x_max", x_max)?,
            parse_bound("y_min", y_min)?,
            parse_bound("y_max", y_max)?,
        ))
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(-2.0, 2.0, -2.0, 2.0)
    }
}

fn parse_bound(name: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| Error::invalid_bound(name, value))
}

/// Sample `function` on a `(grid + 1) × (grid + 1)` lattice over `domain`.
///
/// Vertex `(i, j)` sits at `x_min + i·dx`, `y_min + j·dy` and is stored at
/// `i·(grid + 1) + j`. Every cell is split into two triangles.
pub fn build_surface(function: SurfaceFunction, domain: &Domain, grid: usize) -> Result<Mesh> {
    if grid == 0 {
        return Err(Error::InvalidGrid);
    }

    let dx = (domain.x_max - domain.x_min) / grid as f64;
    let dy = (domain.y_max - domain.y_min) / grid as f64;
    let row = grid + 1;

    let mut vertices = Vec::with_capacity(row * row);
    for i in 0..=grid {
        for j in 0..=grid {
            let x = domain.x_min + i as f64 * dx;
            let y = domain.y_min + j as f64 * dy;
            vertices.push(Point::new(x, y, function.eval(x, y)));
        }
    }

    let mut faces = Vec::with_capacity(grid * grid * 2);
    for i in 0..grid {
        for j in 0..grid {
            let v1 = i * row + j;
            let v2 = i * row + j + 1;
            let v3 = (i + 1) * row + j + 1;
            let v4 = (i + 1) * row + j;
            faces.push(Face::new(vec![v1, v2, v3]));
            faces.push(Face::new(vec![v1, v3, v4]));
        }
    }

    debug!(
        %function,
        grid,
        vertices = vertices.len(),
        faces = faces.len(),
        "built surface"
    );

    Mesh::new(vertices, faces)
}
