/// Host accessors for fragment geometry, and an in-memory host
use nalgebra::{Matrix4, Point3};

use crate::geometry::{Box3, FragmentGeometry, FragmentId};

/// Supplies world-space triangle vertices for a fragment
pub trait VertexSource {
    fn world_vertices(&self, fragment: FragmentId) -> Vec<Point3<f64>>;
}

/// Supplies the world-space bounding box of a fragment
pub trait BoundsSource {
    fn world_bounds(&self, fragment: FragmentId) -> Box3;
}

#[derive(Debug, Clone)]
struct Fragment {
    geometry: FragmentGeometry,
    world: Matrix4<f64>,
}

/// Fragments held in memory with their world matrices
///
/// Unknown ids yield no vertices and an empty box.
#[derive(Debug, Clone, Default)]
pub struct FragmentStore {
    fragments: Vec<Fragment>,
}

impl FragmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, geometry: FragmentGeometry, world: Matrix4<f64>) -> FragmentId {
        self.fragments.push(Fragment { geometry, world });
        FragmentId(self.fragments.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = FragmentId> {
        (0..self.fragments.len()).map(FragmentId)
    }

    pub fn world_matrix(&self, fragment: FragmentId) -> Option<&Matrix4<f64>> {
        self.fragments.get(fragment.0).map(|f| &f.world)
    }

    pub fn geometry(&self, fragment: FragmentId) -> Option<&FragmentGeometry> {
        self.fragments.get(fragment.0).map(|f| &f.geometry)
    }
}

impl VertexSource for FragmentStore {
    fn world_vertices(&self, fragment: FragmentId) -> Vec<Point3<f64>> {
        self.fragments
            .get(fragment.0)
            .map(|f| f.geometry.world_vertices(&f.world))
            .unwrap_or_default()
    }
}

impl BoundsSource for FragmentStore {
    fn world_bounds(&self, fragment: FragmentId) -> Box3 {
        self.fragments
            .get(fragment.0)
            .map(|f| f.geometry.local_bounds().transformed(&f.world))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;

    #[test]
    fn test_store_accessors() {
        let mut store = FragmentStore::new();
        assert!(store.is_empty());
        let id = store.insert(
            FragmentGeometry::cube(2.0),
            Transform::translation_matrix(10.0, 0.0, 0.0),
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![id]);

        let bounds = store.world_bounds(id);
        assert_eq!(bounds.min, Point3::new(9.0, -1.0, -1.0));
        assert_eq!(bounds.max, Point3::new(11.0, 1.0, 1.0));
        assert!(store.world_vertices(id).iter().all(|v| v.x >= 9.0));
    }

    #[test]
    fn test_unknown_fragment() {
        let store = FragmentStore::new();
        assert!(store.world_vertices(FragmentId(3)).is_empty());
        assert!(store.world_bounds(FragmentId(3)).is_empty());
        assert!(store.world_matrix(FragmentId(3)).is_none());
    }
}
