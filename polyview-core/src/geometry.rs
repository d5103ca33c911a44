/// Geometry primitives and the indexed polyhedral mesh
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::{Error, Result};

/// A point in 3D model space.
///
/// Converts to and from `[f64; 3]` through the `From` impls nalgebra provides.
pub type Point = Point3<f64>;

/// A planar polygon given as indices into the owning mesh's vertex list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Edge cycle of the outline: consecutive index pairs, then the closing
    /// edge from the last index back to the first.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| (self.indices[i], self.indices[(i + 1) % n]))
    }
}

impl From<Vec<usize>> for Face {
    fn from(indices: Vec<usize>) -> Self {
        Self::new(indices)
    }
}

/// Arithmetic mean of the given points.
pub fn centroid(vertices: &[Point]) -> Result<Point> {
    if vertices.is_empty() {
        return Err(Error::EmptyMesh);
    }

    let sum: Vector3<f64> = vertices.iter().map(|p| p.coords).sum();
    Ok(Point::from(sum / vertices.len() as f64))
}

/// A polyhedral mesh: vertices, faces over them, and the vertex centroid.
///
/// The center is computed once in [`Mesh::new`]. Editing `vertices` in place
/// leaves it stale; build a new mesh (or call [`Mesh::rebuild`]) instead.
#[derive(Debug, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point>,
    pub faces: Vec<Face>,
    center: Point,
}

impl Mesh {
    /// Build a mesh, checking that every face has at least three indices and
    /// that all of them point into `vertices`.
    pub fn new(vertices: Vec<Point>, faces: Vec<Face>) -> Result<Self> {
        let center = centroid(&vertices)?;

        for (face_idx, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(Error::DegenerateFace {
                    face: face_idx,
                    count: face.len(),
                });
            }
            if let Some(&index) = face.indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(Error::IndexOutOfRange {
                    face: face_idx,
                    index: index as i64,
                    vertex_count: vertices.len(),
                });
            }
        }

        debug!(
            vertices = vertices.len(),
            faces = faces.len(),
            "mesh constructed"
        );

        Ok(Self {
            vertices,
            faces,
            center,
        })
    }

    /// Build a mesh from plain coordinate triples and index lists
    pub fn from_arrays(vertices: &[[f64; 3]], faces: &[&[usize]]) -> Result<Self> {
        Self::new(
            vertices.iter().map(|&v| Point::from(v)).collect(),
            faces.iter().map(|f| Face::new(f.to_vec())).collect(),
        )
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Reconstruct from the current vertex and face data, re-validating
    /// indices and recomputing the center.
    pub fn rebuild(&self) -> Result<Self> {
        Self::new(self.vertices.clone(), self.faces.clone())
    }

    /// Axis-aligned bounding box as (min, max) corners
    pub fn bounds(&self) -> (Point, Point) {
        let mut min = self.vertices.first().copied().unwrap_or(self.center);
        let mut max = min;
        for v in &self.vertices {
            min = Point::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z));
            max = Point::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z));
        }
        (min, max)
    }

    /// Serialize to OBJ text
    pub fn to_obj(&self) -> String {
        crate::obj::to_obj(self)
    }
}

impl Clone for Mesh {
    /// Deep copy with a center recomputed from the copied vertices.
    fn clone(&self) -> Self {
        let vertices = self.vertices.clone();
        let center = centroid(&vertices).unwrap_or(self.center);
        Self {
            vertices,
            faces: self.faces.clone(),
            center,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cube() -> Mesh {
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
        .unwrap()
    }

    #[test]
    fn test_point_array_conversion() {
        let p = Point::from([1.0, 2.0, 3.0]);
        let copy = p;
        let arr: [f64; 3] = copy.into();
        assert_eq!(arr, [1.0, 2.0, 3.0]);
        assert_eq!(p, Point::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_face_edges_close_the_loop() {
        let face = Face::new(vec![4, 7, 9]);
        let edges: Vec<_> = face.edges().collect();
        assert_eq!(edges, vec![(4, 7), (7, 9), (9, 4)]);
    }

    #[test]
    fn test_centroid_is_mean() {
        let pts = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(0.0, 4.0, 6.0),
        ];
        let c = centroid(&pts).unwrap();
        assert_relative_eq!(c.x, 2.0 / 3.0);
        assert_relative_eq!(c.y, 4.0 / 3.0);
        assert_relative_eq!(c.z, 2.0);
    }

    #[test]
    fn test_centroid_of_nothing_is_an_error() {
        assert!(matches!(centroid(&[]), Err(Error::EmptyMesh)));
    }

    #[test]
    fn test_cube_center_is_origin() {
        let mesh = cube();
        assert_eq!(mesh.center(), Point::origin());
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);
    }

    #[test]
    fn test_out_of_range_face_is_rejected() {
        let result = Mesh::from_arrays(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[&[0, 1, 3]],
        );
        match result {
            Err(Error::IndexOutOfRange {
                face,
                index,
                vertex_count,
            }) => {
                assert_eq!(face, 0);
                assert_eq!(index, 3);
                assert_eq!(vertex_count, 3);
            }
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_short_face_is_rejected() {
        let result = Mesh::from_arrays(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], &[&[0, 1]]);
        assert!(matches!(result, Err(Error::DegenerateFace { face: 0, count: 2 })));
    }

    #[test]
    fn test_empty_mesh_is_rejected() {
        assert!(matches!(Mesh::new(Vec::new(), Vec::new()), Err(Error::EmptyMesh)));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = cube();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.vertices[0].x = 42.0;
        copy.faces[0].indices[0] = 7;
        assert_eq!(original.vertices[0].x, -1.0);
        assert_eq!(original.faces[0].indices[0], 0);
    }

    #[test]
    fn test_center_is_not_tracked_until_rebuild() {
        let mut mesh = cube();
        for v in &mut mesh.vertices {
            v.x += 2.0;
        }
        assert_eq!(mesh.center(), Point::origin());

        let rebuilt = mesh.rebuild().unwrap();
        assert_relative_eq!(rebuilt.center().x, 2.0);
        assert_relative_eq!(rebuilt.center().y, 0.0);
    }

    #[test]
    fn test_bounds() {
        let (min, max) = cube().bounds();
        assert_eq!(min, Point::new(-1.0, -1.0, -1.0));
        assert_eq!(max, Point::new(1.0, 1.0, 1.0));
    }
}
