/// STL file parser for binary and ASCII formats
///
/// Facet normals are read and discarded; the result is a non-indexed
/// [`FragmentGeometry`] with one vertex triple per triangle.
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{multispace0, multispace1},
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};
use tracing::debug;

use crate::error::{MeasureError, MeasureResult};
use crate::geometry::FragmentGeometry;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> MeasureResult<FragmentGeometry> {
    if data.len() < HEADER_LEN + 4 {
        return Err(MeasureError::parse("file too small to be a valid STL"));
    }

    // Skip 80-byte header
    let data = &data[HEADER_LEN..];
    let triangle_count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

    let body = &data[4..];
    if triangle_count
        .checked_mul(FACET_LEN)
        .map_or(true, |needed| needed > body.len())
    {
        return Err(MeasureError::parse(format!(
            "unexpected end of file: header declares {triangle_count} triangles"
        )));
    }

    let mut positions = Vec::with_capacity(triangle_count * 9);
    for facet in body.chunks_exact(FACET_LEN).take(triangle_count) {
        // 12 bytes of normal, then 3 vertices, then 2 attribute bytes
        for i in 0..9 {
            positions.push(read_f32(facet, 12 + i * 4));
        }
    }

    debug!(triangles = triangle_count, "parsed binary STL");
    Ok(FragmentGeometry::from_positions(positions))
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> MeasureResult<FragmentGeometry> {
    match parse_ascii_stl_impl(input) {
        Ok((_, positions)) => {
            debug!(triangles = positions.len() / 9, "parsed ASCII STL");
            Ok(FragmentGeometry::from_positions(positions))
        }
        Err(e) => Err(MeasureError::parse(format!("failed to parse ASCII STL: {e:?}"))),
    }
}

fn parse_ascii_stl_impl(input: &str) -> IResult<&str, Vec<f32>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _) = take_till(|c| c == '\n')(input)?; // Optional name
    let (input, facets) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;

    Ok((input, facets.into_iter().flatten().collect()))
}

fn parse_facet(input: &str) -> IResult<&str, [f32; 9]> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, a) = parse_vertex(input)?;
    let (input, b) = parse_vertex(input)?;
    let (input, c) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, [a.0, a.1, a.2, b.0, b.1, b.2, c.0, c.1, c.2]))
}

fn parse_vertex(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    parse_vector3(input)
}

fn parse_vector3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, (x, y, z)))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> MeasureResult<FragmentGeometry> {
    // Binary files may also start with "solid", so fall back on failure
    if data.len() > 5 && &data[0..5] == b"solid" {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(geometry) = parse_ascii_stl(text) {
                return Ok(geometry);
            }
        }
    }

    parse_binary_stl(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix4, Point3};

    const TRIANGLE: &str = "solid strut
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 2.5 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid strut
";

    fn binary(triangles: &[[f32; 9]]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for triangle in triangles {
            data.extend_from_slice(&[0u8; 12]);
            for value in triangle {
                data.extend_from_slice(&value.to_le_bytes());
            }
            data.extend_from_slice(&[0u8; 2]);
        }
        data
    }

    #[test]
    fn test_parse_binary_header() {
        let geometry = parse_binary_stl(&binary(&[])).unwrap();
        assert_eq!(geometry.vertex_count(), 0);
    }

    #[test]
    fn test_parse_binary_triangle() {
        let data = binary(&[[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]]);
        let geometry = parse_stl(&data).unwrap();
        let vertices = geometry.world_vertices(&Matrix4::identity());
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[2], Point3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn test_truncated_binary() {
        let mut data = binary(&[[0.0; 9]]);
        data.truncate(data.len() - 10);
        assert!(matches!(parse_binary_stl(&data), Err(MeasureError::Parse(_))));
        assert!(matches!(parse_binary_stl(&[0u8; 10]), Err(MeasureError::Parse(_))));
    }

    #[test]
    fn test_parse_ascii() {
        let geometry = parse_stl(TRIANGLE.as_bytes()).unwrap();
        let vertices = geometry.world_vertices(&Matrix4::identity());
        assert_eq!(
            vertices,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.5, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ]
        );
    }
}
