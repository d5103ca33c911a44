/// The five built-in regular polyhedra
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::geometry::Mesh;

/// Built-in solid identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solid {
    Tetrahedron,
    Cube,
    Octahedron,
    Icosahedron,
    Dodecahedron,
}

impl Solid {
    pub const ALL: [Solid; 5] = [
        Solid::Tetrahedron,
        Solid::Cube,
        Solid::Octahedron,
        Solid::Icosahedron,
        Solid::Dodecahedron,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Solid::Tetrahedron => "tetrahedron",
            Solid::Cube => "cube",
            Solid::Octahedron => "octahedron",
            Solid::Icosahedron => "icosahedron",
            Solid::Dodecahedron => "dodecahedron",
        }
    }

    /// Build the mesh for this solid
    pub fn build(self) -> Result<Mesh> {
        match self {
            Solid::Tetrahedron => tetrahedron(),
            Solid::Cube => cube(),
            Solid::Octahedron => octahedron(),
            Solid::Icosahedron => icosahedron(),
            Solid::Dodecahedron => dodecahedron(),
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }
}

impl Default for Solid {
    fn default() -> Self {
        Solid::Cube
    }
}

impl fmt::Display for Solid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Solid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Solid::ALL
            .into_iter()
            .find(|solid| solid.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownSolid(s.to_string()))
    }
}

/// All built-in solids, built once and kept for the session
#[derive(Debug, Clone)]
pub struct SolidLibrary {
    meshes: Vec<Mesh>,
}

impl SolidLibrary {
    pub fn new() -> Result<Self> {
        let meshes = Solid::ALL
            .into_iter()
            .map(Solid::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { meshes })
    }

    pub fn get(&self, solid: Solid) -> &Mesh {
        &self.meshes[solid.position()]
    }
}

fn tetrahedron() -> Result<Mesh> {
    let a = (8.0_f64 / 3.0).sqrt();
    let b = (8.0_f64 / 9.0).sqrt();
    let c = (2.0_f64 / 3.0).sqrt();
    let d = 2.0_f64.sqrt();
    Mesh::from_arrays(
        &[[0.0, 0.0, a], [a, 0.0, -b], [-c, d, -b], [-c, -d, -b]],
        &[&[0, 1, 2], &[0, 2, 3], &[0, 3, 1], &[1, 3, 2]],
    )
}

/// Cube spanning `[-1, 1]` on every axis
fn cube() -> Result<Mesh> {
    Mesh::from_arrays(
        &[
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, 1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0],
        ],
        &[
            &[0, 1, 2, 3],
            &[4, 5, 6, 7],
            &[0, 1, 5, 4],
            &[2, 3, 7, 6],
            &[0, 3, 7, 4],
            &[1, 2, 6, 5],
        ],
    )
}

fn octahedron() -> Result<Mesh> {
    Mesh::from_arrays(
        &[
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, -1.0],
        ],
        &[
            &[0, 1, 2],
            &[0, 2, 3],
            &[0, 3, 4],
            &[0, 4, 1],
            &[5, 1, 2],
            &[5, 2, 3],
            &[5, 3, 4],
            &[5, 4, 1],
        ],
    )
}

fn icosahedron() -> Result<Mesh> {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    Mesh::from_arrays(
        &[
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ],
        &[
            &[0, 11, 5],
            &[0, 5, 1],
            &[0, 1, 7],
            &[0, 7, 10],
            &[0, 10, 11],
            &[1, 5, 9],
            &[5, 11, 4],
            &[11, 10, 2],
            &[10, 7, 6],
            &[7, 1, 8],
            &[3, 9, 4],
            &[3, 4, 2],
            &[3, 2, 6],
            &[3, 6, 8],
            &[3, 8, 9],
            &[4, 9, 5],
            &[2, 4, 11],
            &[6, 2, 10],
            &[8, 6, 7],
            &[9, 8, 1],
        ],
    )
}

fn dodecahedron() -> Result<Mesh> {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let inv = 1.0 / phi;
    Mesh::from_arrays(
        &[
            [1.0, 1.0, 1.0],
            [1.0, 1.0, -1.0],
            [1.0, -1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, 1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
            [-1.0, -1.0, -1.0],
            [0.0, inv, phi],
            [0.0, -inv, phi],
            [0.0, inv, -phi],
            [0.0, -inv, -phi],
            [inv, phi, 0.0],
            [-inv, phi, 0.0],
            [inv, -phi, 0.0],
            [-inv, -phi, 0.0],
            [phi, 0.0, inv],
            [-phi, 0.0, inv],
            [phi, 0.0, -inv],
            [-phi, 0.0, -inv],
        ],
        &[
            &[0, 8, 9, 2, 16],
            &[0, 16, 17, 4, 12],
            &[0, 12, 13, 1, 8],
            &[1, 13, 14, 3, 10],
            &[1, 10, 11, 5, 9],
            &[2, 9, 5, 15, 18],
            &[2, 18, 19, 6, 16],
            &[3, 14, 13, 12, 17],
            &[3, 17, 16, 6, 19],
            &[4, 8, 1, 10, 11],
            &[4, 11, 7, 15, 12],
            &[5, 11, 10, 3, 14],
        ],
    )
}
