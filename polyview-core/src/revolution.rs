/// Solids of revolution swept from a profile curve
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{Face, Mesh, Point};

/// Principal axis to sweep around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Rotate `p` by `angle` radians about this axis
    pub fn rotate(self, p: &Point, angle: f64) -> Point {
        let (s, c) = angle.sin_cos();
        match self {
            Axis::X => Point::new(p.x, p.y * c - p.z * s, p.y * s + p.z * c),
            Axis::Y => Point::new(p.x * c + p.z * s, p.y, -p.x * s + p.z * c),
            Axis::Z => Point::new(p.x * c - p.y * s, p.x * s + p.y * c, p.z),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            other => Err(Error::UnknownAxis(other.to_string())),
        }
    }
}

/// Sweep `profile` around `axis` in `slices` equal steps.
///
/// Produces `slices + 1` rotated copies of the profile, stored one slice after
/// another. The last copy lands on the first one; it is kept as separate
/// vertices so the closing row of faces needs no special case. Each quad
/// between neighbouring slices becomes two triangles.
pub fn revolve(profile: &[Point], axis: Axis, slices: usize) -> Result<Mesh> {
    if profile.len() < 2 {
        return Err(Error::InsufficientProfile(profile.len()));
    }
    if slices == 0 {
        return Err(Error::InvalidSlices);
    }

    let per_slice = profile.len();
    let step = 2.0 * PI / slices as f64;

    let mut vertices = Vec::with_capacity((slices + 1) * per_slice);
    for i in 0..=slices {
        let angle = i as f64 * step;
        vertices.extend(profile.iter().map(|p| axis.rotate(p, angle)));
    }

    let mut faces = Vec::with_capacity(slices * (per_slice - 1) * 2);
    for i in 0..slices {
        let current = i * per_slice;
        let next = ((i + 1) % (slices + 1)) * per_slice;
        for j in 0..per_slice - 1 {
            let v1 = current + j;
            let v2 = current + j + 1;
            let v3 = next + j + 1;
            let v4 = next + j;
            faces.push(Face::new(vec![v1, v2, v3]));
            faces.push(Face::new(vec![v1, v3, v4]));
        }
    }

    debug!(
        %axis,
        slices,
        profile = per_slice,
        vertices = vertices.len(),
        faces = faces.len(),
        "built solid of revolution"
    );

    Mesh::new(vertices, faces)
}

/// Read profile points from text, one `x, y, z` triple per line.
///
/// Blank lines and lines that do not hold exactly three numbers are skipped.
pub fn parse_profile(text: &str) -> Vec<Point> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let coords = line
                .split(',')
                .map(|c| c.trim().parse::<f64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .ok()?;
            match coords[..] {
                [x, y, z] => Some(Point::new(x, y, z)),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn column() -> Vec<Point> {
        vec![Point::new(1.0, 0.0, 0.0), Point::new(1.0, 0.0, 1.0)]
    }

    #[test]
    fn test_counts() {
        let mesh = revolve(&column(), Axis::Z, 4).unwrap();
        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(mesh.face_count(), 8);
        assert!(mesh.faces.iter().all(|f| f.len() == 3));
    }

    #[test]
    fn test_vertices_are_slice_major() {
        let mesh = revolve(&column(), Axis::Z, 4).unwrap();
        // slice 1 is a quarter turn
        assert_relative_eq!(mesh.vertices[2].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[2].y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[3].z, 1.0);
        // the closing slice coincides with the first but is not shared
        assert_relative_eq!(mesh.vertices[8], mesh.vertices[0], epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[9], mesh.vertices[1], epsilon = 1e-12);
    }

    #[test]
    fn test_face_winding() {
        let mesh = revolve(&column(), Axis::Z, 4).unwrap();
        assert_eq!(mesh.faces[0].indices, vec![0, 1, 3]);
        assert_eq!(mesh.faces[1].indices, vec![0, 3, 2]);
        // last quad connects slice 3 to the closing slice 4
        assert_eq!(mesh.faces[6].indices, vec![6, 7, 9]);
        assert_eq!(mesh.faces[7].indices, vec![6, 9, 8]);
    }

    #[test]
    fn test_axis_rotations() {
        let p = Point::new(1.0, 2.0, 3.0);

        let q = Axis::X.rotate(&p, FRAC_PI_2);
        assert_relative_eq!(q, Point::new(1.0, -3.0, 2.0), epsilon = 1e-12);

        let q = Axis::Y.rotate(&p, FRAC_PI_2);
        assert_relative_eq!(q, Point::new(3.0, 2.0, -1.0), epsilon = 1e-12);

        let q = Axis::Z.rotate(&p, FRAC_PI_2);
        assert_relative_eq!(q, Point::new(-2.0, 1.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_single_slice() {
        let mesh = revolve(&column(), Axis::Y, 1).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn test_rejects_short_profile() {
        let err = revolve(&[Point::new(1.0, 0.0, 0.0)], Axis::X, 8).unwrap_err();
        assert!(matches!(err, Error::InsufficientProfile(1)));
    }

    #[test]
    fn test_rejects_zero_slices() {
        assert!(matches!(revolve(&column(), Axis::X, 0), Err(Error::InvalidSlices)));
    }

    #[test]
    fn test_parse_axis() {
        assert_eq!("y".parse::<Axis>().unwrap(), Axis::Y);
        assert_eq!(" Z ".parse::<Axis>().unwrap(), Axis::Z);
        assert!(matches!("w".parse::<Axis>(), Err(Error::UnknownAxis(_))));
    }

    #[test]
    fn test_parse_profile_skips_bad_lines() {
        let text = "1, 0, 0\n\n  0.5,0,1  \n1, 2\nfoo, 1, 2\n2, 0, 2, 4\n";
        let points = parse_profile(text);
        assert_eq!(
            points,
            vec![Point::new(1.0, 0.0, 0.0), Point::new(0.5, 0.0, 1.0)]
        );
    }
}
