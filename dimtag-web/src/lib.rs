/// Dimtag Web - WASM bindings for the viewer extensions
///
/// The browser host resolves fragment vertices and the camera matrix itself
/// and passes them here as flat numeric arrays.
use dimtag_core::{
    compute_duplicate_offsets, compute_tag_layout, extract_endpoints, MatrixProjector,
    MeasureError, MeasureResult, Point3, TagLayout as CoreTagLayout,
};
use wasm_bindgen::prelude::*;

fn to_js(err: MeasureError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn point(xyz: &[f64], name: &str) -> MeasureResult<Point3<f64>> {
    match xyz {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(MeasureError::invalid_params(format!(
            "{name} needs 3 coordinates, got {}",
            xyz.len()
        ))),
    }
}

fn endpoints_flat(vertices: &[f64]) -> MeasureResult<Vec<f64>> {
    if vertices.len() % 3 != 0 {
        return Err(MeasureError::invalid_params(format!(
            "vertex buffer length {} is not a multiple of 3",
            vertices.len()
        )));
    }
    let points: Vec<Point3<f64>> = vertices
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect();
    let (one, two) = extract_endpoints(&points)?;
    Ok(vec![one.x, one.y, one.z, two.x, two.y, two.z])
}

fn layout_flat(
    end_a: &[f64],
    end_b: &[f64],
    view_projection: &[f64],
    width: u32,
    height: u32,
) -> MeasureResult<CoreTagLayout> {
    let a = point(end_a, "end A")?;
    let b = point(end_b, "end B")?;
    let projector = MatrixProjector::from_column_slice(view_projection, width, height)
        .ok_or_else(|| MeasureError::invalid_params("view-projection matrix needs 16 elements"))?;
    compute_tag_layout(&a, &b, &projector)
}

/// Ends of an element from world-space vertices packed as `[x, y, z, ...]`.
///
/// Returns `[x1, y1, z1, x2, y2, z2]`.
#[wasm_bindgen(js_name = extractEndpoints)]
pub fn extract_endpoints_js(vertices: &[f64]) -> Result<Box<[f64]>, JsValue> {
    endpoints_flat(vertices)
        .map(Vec::into_boxed_slice)
        .map_err(to_js)
}

#[wasm_bindgen]
pub struct TagLayout {
    inner: CoreTagLayout,
}

#[wasm_bindgen]
impl TagLayout {
    #[wasm_bindgen(getter, js_name = labelX)]
    pub fn label_x(&self) -> f64 {
        self.inner.label.x
    }

    #[wasm_bindgen(getter, js_name = labelY)]
    pub fn label_y(&self) -> f64 {
        self.inner.label.y
    }

    #[wasm_bindgen(getter, js_name = endAX)]
    pub fn end_a_x(&self) -> f64 {
        self.inner.end_a.x
    }

    #[wasm_bindgen(getter, js_name = endAY)]
    pub fn end_a_y(&self) -> f64 {
        self.inner.end_a.y
    }

    #[wasm_bindgen(getter, js_name = endBX)]
    pub fn end_b_x(&self) -> f64 {
        self.inner.end_b.x
    }

    #[wasm_bindgen(getter, js_name = endBY)]
    pub fn end_b_y(&self) -> f64 {
        self.inner.end_b.y
    }

    #[wasm_bindgen(getter, js_name = lineLength)]
    pub fn line_length(&self) -> f64 {
        self.inner.line_length
    }

    #[wasm_bindgen(getter, js_name = lineAngle)]
    pub fn line_angle(&self) -> f64 {
        self.inner.line_angle
    }

    /// CSS `transform` value for the connecting line
    #[wasm_bindgen(getter, js_name = lineTransform)]
    pub fn line_transform(&self) -> String {
        rotate_css(self.inner.line_angle)
    }
}

fn rotate_css(degrees: f64) -> String {
    format!("rotate({degrees}deg)")
}

/// Screen layout of a dimension tag.
///
/// `view_projection` holds 16 column-major elements; `width`/`height` are the
/// canvas size in CSS pixels.
#[wasm_bindgen(js_name = computeTagLayout)]
pub fn compute_tag_layout_js(
    end_a: &[f64],
    end_b: &[f64],
    view_projection: &[f64],
    width: u32,
    height: u32,
) -> Result<TagLayout, JsValue> {
    layout_flat(end_a, end_b, view_projection, width, height)
        .map(|inner| TagLayout { inner })
        .map_err(to_js)
}

/// Offsets for `count` copies beyond the original along the pack axis
#[wasm_bindgen(js_name = computeDuplicateOffsets)]
pub fn compute_duplicate_offsets_js(
    width: f64,
    count: u32,
    buffer: f64,
) -> Result<Box<[f64]>, JsValue> {
    compute_duplicate_offsets(width, count as usize, buffer)
        .map(Vec::into_boxed_slice)
        .map_err(to_js)
}
