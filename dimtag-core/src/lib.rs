/// Dimtag Core Library - geometry for dimension tags and product packs
///
/// This library provides the stateless measurement core: element end points
/// from fragment vertex buffers, screen layout of a dimension tag, and the
/// offsets for laying out duplicated products side by side. The host viewer
/// is reduced to accessor traits ([`VertexSource`], [`BoundsSource`],
/// [`Projector`], [`PropertySource`]) so everything here runs without it.

pub mod endpoints;
pub mod error;
pub mod fragments;
pub mod geometry;
pub mod layout;
pub mod lookup;
pub mod pack;
pub mod projection;
pub mod stl;
pub mod transform;

// Re-export commonly used types
pub use endpoints::{element_bounds, element_center, element_endpoints, element_width, extract_endpoints};
pub use error::{MeasureError, MeasureResult};
pub use fragments::{BoundsSource, FragmentStore, VertexSource};
pub use geometry::{Axis, Box3, DrawRange, FragmentGeometry, FragmentId, ScreenPoint};
pub use layout::{compute_tag_layout, TagLayout};
pub use lookup::{child_ids, find_by_name, first_match, parameter_value, Element, ElementId, Property, PropertySource};
pub use pack::{compute_duplicate_offsets, PackLayout, PackPlan, DEFAULT_PACK_BUFFER};
pub use projection::{Camera, MatrixProjector, ProjectionMode, Projector, Viewport};
pub use transform::Transform;

pub use nalgebra::{Matrix4, Point3};
