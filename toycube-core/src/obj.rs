/// Line-oriented vertex/face text parser (a small subset of Wavefront OBJ)
///
/// `v x y z` lines add a vertex, `f a/.. b/.. c/.. [d/..]` lines add a
/// triangle from the leading index of the first three groups. Anything else
/// is skipped. Coordinates that are not numbers become NaN instead of
/// failing the parse.
use std::path::Path;

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, eof, map, rest},
    multi::separated_list0,
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{Face, Model3D};
use crate::math::{vec4, Vec4};

/// How face indices are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Subtract 1 from face indices.
    ///
    /// The format numbers vertices from 1, but indices are used as-is
    /// unless this is set, so files written for conventional readers
    /// resolve each face one vertex off.
    pub one_based_indices: bool,
}

/// One recognised line
#[derive(Debug, Clone, PartialEq)]
enum Line<'a> {
    Vertex(Vec<&'a str>),
    Face(Vec<&'a str>),
    Other,
}

fn tokens(input: &str) -> IResult<&str, Vec<&str>> {
    preceded(space0, separated_list0(space1, is_not(" \t\r")))(input)
}

fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<&'a str>> {
    // a bare keyword still counts, with every coordinate missing
    preceded(terminated(tag(word), alt((space1, eof))), tokens)
}

fn parse_line(input: &str) -> IResult<&str, Line<'_>> {
    let (input, _) = space0(input)?;
    alt((
        map(keyword("v"), Line::Vertex),
        map(keyword("f"), Line::Face),
        map(rest, |_| Line::Other),
    ))(input)
}

/// A coordinate token, or NaN when it isn't a number
fn coordinate(token: Option<&&str>) -> f32 {
    token
        .and_then(|t| all_consuming(float::<&str, ()>)(*t).ok())
        .map_or(f32::NAN, |(_, value)| value)
}

/// Leading integer of a `12/5/3` style group
fn group_index(group: &str) -> Option<usize> {
    let (_, digits) = digit1::<&str, ()>(group).ok()?;
    digits.parse().ok()
}

fn parse_vertex(tokens: &[&str]) -> Vec4 {
    vec4(
        coordinate(tokens.first()),
        coordinate(tokens.get(1)),
        coordinate(tokens.get(2)),
    )
}

fn parse_face(tokens: &[&str], options: &ParseOptions) -> Option<Face> {
    if tokens.len() < 3 {
        return None;
    }
    let mut face = [0usize; 3];
    for (slot, group) in face.iter_mut().zip(tokens) {
        let index = group_index(group)?;
        *slot = if options.one_based_indices {
            index.checked_sub(1)?
        } else {
            index
        };
    }
    Some(face)
}

/// Parse geometry text into a model.
///
/// Faces that are malformed or point past the vertex list are dropped with
/// a warning.
pub fn parse_obj(input: &str, options: &ParseOptions) -> Result<Model3D, GeometryError> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    for (number, raw) in input.lines().enumerate() {
        let line = match parse_line(raw) {
            Ok((_, line)) => line,
            Err(_) => continue,
        };
        match line {
            Line::Vertex(tokens) => {
                let v = parse_vertex(&tokens);
                if v.xyz().iter().any(|c| c.is_nan()) {
                    log::warn!("line {}: non-numeric vertex coordinate in {:?}", number + 1, raw);
                }
                vertices.push(v);
            }
            Line::Face(tokens) => match parse_face(&tokens, options) {
                Some(face) => faces.push((number + 1, face)),
                None => log::warn!("line {}: skipping malformed face {:?}", number + 1, raw),
            },
            Line::Other => {}
        }
    }

    if vertices.is_empty() {
        return Err(GeometryError::Empty);
    }

    let vertex_count = vertices.len();
    let faces: Vec<Face> = faces
        .into_iter()
        .filter_map(|(number, face)| {
            if face.iter().all(|&i| i < vertex_count) {
                Some(face)
            } else {
                log::warn!(
                    "line {}: face {:?} is out of range for {} vertices",
                    number,
                    face,
                    vertex_count
                );
                None
            }
        })
        .collect();

    log::debug!("parsed {} vertices, {} faces", vertices.len(), faces.len());
    Ok(Model3D::new(vertices, faces, Vec::new(), Vec::new())?)
}

/// Read and parse a geometry file
pub fn load_obj<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Model3D, GeometryError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let model = parse_obj(&text, options)?;
    log::info!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        model.vertices().len(),
        model.faces().len()
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# a square
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 0/1/1 1/2/1 2/3/1 3/4/1
f 0 2 3
";

    #[test]
    fn test_parse_vertices_and_faces() {
        let model = parse_obj(QUAD, &ParseOptions::default()).unwrap();
        assert_eq!(model.vertices().len(), 4);
        assert_eq!(model.vertices()[2], vec4(1.0, 1.0, 0.0));
        assert_eq!(model.faces(), &[[0, 1, 2], [0, 2, 3]]);
        assert!(model.edges().is_empty());
    }

    #[test]
    fn test_normals_are_not_vertices() {
        let model = parse_obj("v 1 2 3\nvn 0 0 1\nvt 0.5 0.5\n", &ParseOptions::default()).unwrap();
        assert_eq!(model.vertices().len(), 1);
    }

    #[test]
    fn test_non_numeric_coordinate_becomes_nan() {
        let model = parse_obj("v 1 abc 3\nv 4 5 6\nv 7 8\n", &ParseOptions::default()).unwrap();
        let v = model.vertices();
        assert_eq!(v.len(), 3);
        assert_eq!(v[0].x, 1.0);
        assert!(v[0].y.is_nan());
        assert_eq!(v[0].z, 3.0);
        assert_eq!(v[1], vec4(4.0, 5.0, 6.0));
        // missing coordinate
        assert!(v[2].z.is_nan());
    }

    #[test]
    fn test_bare_vertex_keeps_later_indices() {
        let text = "v\nv 1 2 3\nv 4 5 6\nv 7 8 9\nf 1 2 3\n";
        let model = parse_obj(text, &ParseOptions::default()).unwrap();
        let v = model.vertices();
        assert_eq!(v.len(), 4);
        assert!(v[0].x.is_nan() && v[0].y.is_nan() && v[0].z.is_nan());
        assert_eq!(v[1], vec4(1.0, 2.0, 3.0));
        assert_eq!(model.faces(), &[[1, 2, 3]]);
    }

    #[test]
    fn test_scientific_and_signed_numbers() {
        let model = parse_obj("  v -1.5 2e2 +0.25\r\n", &ParseOptions::default()).unwrap();
        assert_eq!(model.vertices()[0], vec4(-1.5, 200.0, 0.25));
    }

    #[test]
    fn test_one_based_indices() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1 2/2 3/3\n";
        let raw = parse_obj(text, &ParseOptions::default()).unwrap();
        // index 3 is past the end when read as-is
        assert!(raw.faces().is_empty());

        let options = ParseOptions {
            one_based_indices: true,
        };
        let shifted = parse_obj(text, &options).unwrap();
        assert_eq!(shifted.faces(), &[[0, 1, 2]]);
    }

    #[test]
    fn test_malformed_faces_are_skipped() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1\nf a/1 1 2\nf 0 1 2\n";
        let model = parse_obj(text, &ParseOptions::default()).unwrap();
        assert_eq!(model.faces(), &[[0, 1, 2]]);
    }

    #[test]
    fn test_zero_index_with_one_based_option_is_skipped() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        let options = ParseOptions {
            one_based_indices: true,
        };
        assert!(parse_obj(text, &options).unwrap().faces().is_empty());
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = parse_obj("# nothing here\n", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, GeometryError::Empty));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_obj("/nonexistent/dir/model.obj", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, GeometryError::Io(_)));
    }
}
