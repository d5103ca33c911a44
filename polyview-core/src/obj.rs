/// Wavefront OBJ reader and writer (vertex and face statements only)
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use nom::{
    bytes::complete::{tag, take_till, take_till1},
    character::complete::{multispace0, multispace1},
    multi::many0,
    number::complete::double,
    sequence::{preceded, terminated},
    IResult,
};
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::geometry::{Face, Mesh, Point};

/// First line of every exported file
pub const OBJ_HEADER: &str = "# Exported 3D model";

/// One usable statement from an OBJ file.
///
/// Face indices are already shifted to 0-based but are not range checked;
/// a reference to vertex `0` in the file shows up here as `-1`.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjRecord {
    Vertex(Point),
    Face(Vec<i64>),
}

/// Lazily read the vertex and face records of `text`.
///
/// Lines are trimmed and classified one at a time; anything that is not a
/// well-formed `v` or `f` statement is dropped.
pub fn records(text: &str) -> impl Iterator<Item = ObjRecord> + '_ {
    text.split(|c: char| c == '\n' || c == '\r')
        .map(str::trim)
        .filter_map(parse_line)
}

/// Parse OBJ text into a mesh.
///
/// Malformed lines are skipped. Faces that reference missing vertices make
/// the whole parse fail when the mesh is constructed.
pub fn parse_obj(text: &str) -> Result<Mesh> {
    let mut vertices = Vec::new();
    let mut raw_faces = Vec::new();

    for record in records(text) {
        match record {
            ObjRecord::Vertex(p) => vertices.push(p),
            ObjRecord::Face(indices) => raw_faces.push(indices),
        }
    }

    debug!(
        vertices = vertices.len(),
        faces = raw_faces.len(),
        "parsed OBJ records"
    );

    let mut faces = Vec::with_capacity(raw_faces.len());
    for (face_idx, indices) in raw_faces.into_iter().enumerate() {
        let indices = indices
            .into_iter()
            .map(|i| {
                usize::try_from(i).map_err(|_| Error::IndexOutOfRange {
                    face: face_idx,
                    index: i,
                    vertex_count: vertices.len(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        faces.push(Face::new(indices));
    }

    Mesh::new(vertices, faces)
}

/// Serialize a mesh: header comment, vertex lines, a blank line, face lines.
///
/// Face indices are written 1-based.
pub fn to_obj(mesh: &Mesh) -> String {
    let mut out = String::with_capacity(32 * (mesh.vertices.len() + mesh.faces.len()));
    out.push_str(OBJ_HEADER);
    out.push('\n');

    for v in &mesh.vertices {
        let _ = writeln!(out, "v {} {} {}", v.x, v.y, v.z);
    }

    out.push('\n');
    for face in &mesh.faces {
        out.push('f');
        for idx in &face.indices {
            let _ = write!(out, " {}", idx + 1);
        }
        out.push('\n');
    }

    out
}

/// Read and parse an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let mesh = parse_obj(&text)?;
    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "loaded OBJ"
    );
    Ok(mesh)
}

/// Write a mesh to an OBJ file, replacing any existing file
pub fn save_obj<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_obj(mesh)).map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), "saved OBJ");
    Ok(())
}

fn parse_line(line: &str) -> Option<ObjRecord> {
    if line.starts_with("v ") {
        match parse_vertex(line) {
            Ok((_, p)) => Some(ObjRecord::Vertex(p)),
            Err(_) => {
                trace!(line, "skipping malformed vertex line");
                None
            }
        }
    } else if line.starts_with("f ") {
        match parse_face(line) {
            Ok((_, indices)) if indices.len() >= 3 => Some(ObjRecord::Face(indices)),
            _ => {
                trace!(line, "skipping face with fewer than 3 indices");
                None
            }
        }
    } else {
        None
    }
}

fn parse_vertex(input: &str) -> IResult<&str, Point> {
    let (input, _) = tag("v ")(input)?;
    let (input, x) = preceded(multispace0, coordinate)(input)?;
    let (input, y) = preceded(multispace1, coordinate)(input)?;
    let (input, z) = preceded(multispace1, coordinate)(input)?;
    Ok((input, Point::new(x, y, z)))
}

/// A number at the start of a whitespace-delimited token; the rest of the
/// token is ignored.
fn coordinate(input: &str) -> IResult<&str, f64> {
    terminated(double, take_till(char::is_whitespace))(input)
}

fn parse_face(input: &str) -> IResult<&str, Vec<i64>> {
    let (input, _) = tag("f ")(input)?;
    let (input, tokens) = many0(preceded(multispace0, take_till1(char::is_whitespace)))(input)?;
    Ok((input, tokens.into_iter().filter_map(face_index).collect()))
}

/// Leading integer of `12`, `12/5` or `12/5/3`, shifted to 0-based
fn face_index(token: &str) -> Option<i64> {
    let (_, n) = nom::character::complete::i64::<_, nom::error::Error<&str>>(token).ok()?;
    n.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triangle() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![Face::new(vec![0, 1, 2])]);
        assert_eq!(mesh.vertices[1], Point::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_single_vertex_with_face_fails_construction() {
        let recs: Vec<_> = records("v 1 2 3\nf 1 2 3\n").collect();
        assert_eq!(
            recs,
            vec![
                ObjRecord::Vertex(Point::new(1.0, 2.0, 3.0)),
                ObjRecord::Face(vec![0, 1, 2]),
            ]
        );

        let err = parse_obj("v 1 2 3\nf 1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfRange {
                face: 0,
                index: 1,
                vertex_count: 1
            }
        ));
    }

    #[test]
    fn test_slash_tokens_use_vertex_index() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1/1/1 2/2/1 4//1 3/7\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.faces[0].indices, vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "# comment\n\
                    o object\n\
                    v 1 2\n\
                    v a b c\n\
                    v 0 0 0\n\
                    vn 0 0 1\n\
                    v 1 0 0\n\
                    v 0 1 0\n\
                    f 1 2\n\
                    f x y z\n\
                    f 1 2 3\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertices[0], Point::origin());
    }

    #[test]
    fn test_mixed_line_endings_and_padding() {
        let text = "  v 0 0 0  \r\nv 1 0 0\rv\t0 5 0\n\n   v 0 1 0\r\n\tf 1 2 3 \n";
        let mesh = parse_obj(text).unwrap();
        // "v\t0 5 0" does not start with "v " and is ignored
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertices[2], Point::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.faces[0].indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_extra_vertex_components_are_ignored() {
        let recs: Vec<_> = records("v 1.5 -2 3e2 1.0").collect();
        assert_eq!(recs, vec![ObjRecord::Vertex(Point::new(1.5, -2.0, 300.0))]);
    }

    #[test]
    fn test_zero_index_is_out_of_range() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: -1, .. }));
    }

    #[test]
    fn test_empty_input_has_no_mesh() {
        assert!(matches!(parse_obj(""), Err(Error::EmptyMesh)));
    }

    #[test]
    fn test_serialize_layout() {
        let mesh = Mesh::from_arrays(
            &[[0.0, 0.0, 0.0], [1.5, 0.0, 0.0], [0.0, -1.0, 0.0]],
            &[&[0, 1, 2]],
        )
        .unwrap();
        let text = to_obj(&mesh);
        assert_eq!(
            text,
            "# Exported 3D model\nv 0 0 0\nv 1.5 0 0\nv 0 -1 0\n\nf 1 2 3\n"
        );
    }

    #[test]
    fn test_round_trip_is_exact() {
        let third = 1.0 / 3.0;
        let mesh = Mesh::from_arrays(
            &[
                [third, -0.1, 1e-9],
                [2.0_f64.sqrt(), 12345.678, -7.0],
                [0.0, 1.0, std::f64::consts::PI],
                [5.0, 5.0, 5.0],
            ],
            &[&[0, 1, 2], &[0, 2, 3, 1]],
        )
        .unwrap();

        let parsed = parse_obj(&to_obj(&mesh)).unwrap();
        assert_eq!(parsed.vertices, mesh.vertices);
        assert_eq!(parsed.faces, mesh.faces);
    }

    #[test]
    fn test_file_round_trip() {
        let mesh = Mesh::from_arrays(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[&[0, 1, 2]],
        )
        .unwrap();
        let path = std::env::temp_dir().join(format!("polyview-obj-{}.obj", std::process::id()));

        save_obj(&mesh, &path).unwrap();
        let loaded = load_obj(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.vertices, mesh.vertices);
        assert_eq!(loaded.faces, mesh.faces);
    }

    #[test]
    fn test_face_index_at_i64_min_is_dropped() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
                    f 1 2 -9223372036854775808\n\
                    f 1 2 3 -9223372036854775808\n";
        let mesh = parse_obj(text).unwrap();
        // first face falls below 3 indices and is skipped; the second keeps its valid tokens
        assert_eq!(mesh.faces, vec![Face::new(vec![0, 1, 2])]);
        assert_eq!(face_index("-9223372036854775808"), None);
        assert_eq!(face_index("-9223372036854775807"), Some(i64::MIN));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_obj("/nonexistent/polyview/model.obj").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
