/// Element metadata lookups over a host property source
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Display category the viewer uses for child links
pub const CHILD_CATEGORY: &str = "__child__";

/// Id of an element in the host's model database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub attribute_name: String,
    pub display_category: String,
    pub display_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub name: String,
    pub properties: Vec<Property>,
}

/// Resolves element properties; the host fetches them before the core runs
pub trait PropertySource {
    fn element(&self, id: ElementId) -> Option<Element>;
}

/// Evaluate candidates in order and return the first hit.
///
/// Candidates after the hit are never evaluated, so a lookup stops as soon as
/// one answer is known and can only resolve once.
pub fn first_match<I, T, F, R>(candidates: I, test: F) -> Option<R>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Option<R>,
{
    candidates.into_iter().find_map(test)
}

/// Ids linked from an element as children
pub fn child_ids<S>(source: &S, id: ElementId) -> Vec<ElementId>
where
    S: PropertySource + ?Sized,
{
    let Some(element) = source.element(id) else {
        return Vec::new();
    };
    element
        .properties
        .iter()
        .filter(|p| p.display_category == CHILD_CATEGORY)
        .filter_map(|p| p.display_value.trim().parse().ok().map(ElementId))
        .collect()
}

/// First element among `ids` whose name contains `name`
pub fn find_by_name<S>(source: &S, ids: &[ElementId], name: &str) -> Option<ElementId>
where
    S: PropertySource + ?Sized,
{
    first_match(ids.iter().copied(), |id| {
        trace!(id = id.0, "checking element name");
        source
            .element(id)
            .filter(|element| element.name.contains(name))
            .map(|element| element.id)
    })
}

/// Display value of the property with the given attribute name
pub fn parameter_value<S>(source: &S, id: ElementId, attribute_name: &str) -> Option<String>
where
    S: PropertySource + ?Sized,
{
    source.element(id)?.properties.into_iter().find_map(|p| {
        if p.attribute_name == attribute_name {
            Some(p.display_value)
        } else {
            None
        }
    })
}
