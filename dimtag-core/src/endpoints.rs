/// Element end points and bounds from fragment geometry
use nalgebra::Point3;
use tracing::{debug, trace};

use crate::error::{MeasureError, MeasureResult};
use crate::fragments::{BoundsSource, VertexSource};
use crate::geometry::{Axis, Box3, FragmentId};

/// Find the two ends of an element from its world-space vertices.
///
/// One streaming pass: origin vertices are skipped, the first remaining vertex
/// seeds both ends, and end two moves to any vertex farther from end one than
/// end two currently is. End one never moves, so this is not an exhaustive
/// farthest-pair search.
///
/// End two is returned on end one's z plane; dimensioned elements are treated
/// as coplanar in z.
pub fn extract_endpoints(vertices: &[Point3<f64>]) -> MeasureResult<(Point3<f64>, Point3<f64>)> {
    let mut ends: Option<(Point3<f64>, Point3<f64>)> = None;
    let mut skipped = 0usize;

    for vertex in vertices {
        if *vertex == Point3::origin() {
            skipped += 1;
            continue;
        }
        ends = Some(match ends {
            None => (*vertex, *vertex),
            Some((one, two)) if nalgebra::distance(vertex, &one) > nalgebra::distance(&two, &one) => {
                (one, *vertex)
            }
            Some(current) => current,
        });
    }

    if skipped > 0 {
        trace!(skipped, "skipped origin vertices");
    }

    let (one, two) = ends.ok_or(MeasureError::InsufficientData)?;
    let two = Point3::new(two.x, two.y, one.z);
    debug!(
        vertices = vertices.len(),
        length = nalgebra::distance(&one, &two),
        "extracted element ends"
    );
    Ok((one, two))
}

/// Ends of an element made of several fragments.
///
/// Only the first fragment is measured; the rest of an element is assumed to
/// be trim or fittings on the same run.
pub fn element_endpoints<S>(
    fragments: &[FragmentId],
    source: &S,
) -> MeasureResult<(Point3<f64>, Point3<f64>)>
where
    S: VertexSource + ?Sized,
{
    let first = fragments.first().ok_or(MeasureError::InsufficientData)?;
    extract_endpoints(&source.world_vertices(*first))
}

/// Union of the world bounds of every fragment
pub fn element_bounds<S>(fragments: &[FragmentId], source: &S) -> Box3
where
    S: BoundsSource + ?Sized,
{
    let mut total = Box3::empty();
    for fragment in fragments {
        total.union(&source.world_bounds(*fragment));
    }
    total
}

pub fn element_center<S>(fragments: &[FragmentId], source: &S) -> MeasureResult<Point3<f64>>
where
    S: BoundsSource + ?Sized,
{
    let bounds = element_bounds(fragments, source);
    if bounds.is_empty() {
        return Err(MeasureError::InsufficientData);
    }
    Ok(bounds.center())
}

/// Extent of the combined fragments along `axis` (zero when nothing has bounds)
pub fn element_width<S>(fragments: &[FragmentId], source: &S, axis: Axis) -> f64
where
    S: BoundsSource + ?Sized,
{
    element_bounds(fragments, source).extent(axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragments::FragmentStore;
    use crate::geometry::FragmentGeometry;
    use crate::transform::Transform;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    fn brute_force_max(vertices: &[Point3<f64>]) -> f64 {
        let mut best = 0.0f64;
        for a in vertices {
            for b in vertices {
                best = best.max(nalgebra::distance(a, b));
            }
        }
        best
    }

    #[test]
    fn test_single_valid_vertex() {
        let (one, two) = extract_endpoints(&[p(0.0, 0.0, 0.0), p(1.0, 2.0, 3.0)]).unwrap();
        assert_eq!(one, p(1.0, 2.0, 3.0));
        assert_eq!(two, p(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_only_origin_is_insufficient() {
        assert_eq!(
            extract_endpoints(&[p(0.0, 0.0, 0.0)]),
            Err(MeasureError::InsufficientData)
        );
        assert_eq!(extract_endpoints(&[]), Err(MeasureError::InsufficientData));
    }

    #[test]
    fn test_leading_origin_does_not_seed() {
        let (one, two) =
            extract_endpoints(&[p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(4.0, 5.0, 0.0)]).unwrap();
        assert_eq!(one, p(1.0, 1.0, 0.0));
        assert_eq!(two, p(4.0, 5.0, 0.0));
    }

    #[test]
    fn test_end_two_takes_end_one_z() {
        let (one, two) = extract_endpoints(&[p(1.0, 0.0, 2.0), p(5.0, 0.0, 7.0)]).unwrap();
        assert_eq!(one, p(1.0, 0.0, 2.0));
        assert_eq!(two, p(5.0, 0.0, 2.0));
    }

    #[test]
    fn test_matches_brute_force_when_seeded_at_an_extreme() {
        let runs: [&[Point3<f64>]; 3] = [
            &[p(1.0, 1.0, 0.0), p(3.0, 1.0, 0.0), p(9.0, 1.0, 0.0), p(4.0, 1.0, 0.0)],
            &[p(-2.0, -2.0, 1.0), p(0.5, 0.5, 1.0), p(2.0, 2.0, 1.0), p(1.0, 1.0, 1.0)],
            &[p(0.0, 10.0, 3.0), p(0.0, 2.0, 3.0), p(0.0, -6.0, 3.0), p(0.0, -1.0, 3.0)],
        ];
        for vertices in runs {
            let (one, two) = extract_endpoints(vertices).unwrap();
            let measured = nalgebra::distance(&one, &two);
            assert!((measured - brute_force_max(vertices)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_greedy_search_can_miss_true_pair() {
        // Seeded in the middle, end one stays put.
        let vertices = [p(5.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(10.0, 0.0, 0.0)];
        let (one, two) = extract_endpoints(&vertices).unwrap();
        assert_eq!(one, p(5.0, 0.0, 0.0));
        assert_eq!(two, p(10.0, 0.0, 0.0));
        assert!(nalgebra::distance(&one, &two) < brute_force_max(&vertices));
    }

    #[test]
    fn test_idempotent() {
        let vertices = [p(1.0, 2.0, 3.0), p(-4.0, 2.0, 3.0), p(0.0, 0.0, 0.0), p(2.0, 9.0, 3.0)];
        assert_eq!(extract_endpoints(&vertices), extract_endpoints(&vertices));
    }

    #[test]
    fn test_element_uses_first_fragment_only() {
        let mut store = FragmentStore::new();
        let strut = store.insert(
            FragmentGeometry::from_positions(vec![
                1.0, 0.0, 0.0, 6.0, 0.0, 0.0, 3.0, 0.0, 0.0,
            ]),
            Transform::translation_matrix(0.0, 0.0, 1.0),
        );
        let fitting = store.insert(
            FragmentGeometry::cube(100.0),
            Transform::translation_matrix(0.0, 0.0, 0.0),
        );

        let (one, two) = element_endpoints(&[strut, fitting], &store).unwrap();
        assert_eq!(one, p(1.0, 0.0, 1.0));
        assert_eq!(two, p(6.0, 0.0, 1.0));
        assert_eq!(
            element_endpoints(&[], &store),
            Err(MeasureError::InsufficientData)
        );
    }

    #[test]
    fn test_element_bounds_and_width() {
        let mut store = FragmentStore::new();
        let a = store.insert(FragmentGeometry::cube(2.0), Transform::translation_matrix(0.0, 0.0, 0.0));
        let b = store.insert(FragmentGeometry::cube(2.0), Transform::translation_matrix(0.0, 3.0, 0.0));

        let bounds = element_bounds(&[a, b], &store);
        assert_eq!(bounds.min, p(-1.0, -1.0, -1.0));
        assert_eq!(bounds.max, p(1.0, 4.0, 1.0));
        assert!((element_width(&[a, b], &store, Axis::Y) - 5.0).abs() < 1e-12);
        assert!((element_width(&[a, b], &store, Axis::X) - 2.0).abs() < 1e-12);
        assert_eq!(element_center(&[a, b], &store).unwrap(), p(0.0, 1.5, 0.0));

        assert_eq!(element_width(&[], &store, Axis::Y), 0.0);
        assert_eq!(element_center(&[], &store), Err(MeasureError::InsufficientData));
    }
}
