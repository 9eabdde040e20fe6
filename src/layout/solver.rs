use crate::foundation::core::{Canvas, Point, Rect};

/// Average glyph advance as a fraction of the font size.
///
/// Layout uses this estimate instead of shaped text so geometry is deterministic and
/// independent of which font ends up being available at render time.
pub const ADVANCE_EM: f64 = 0.55;

// Spacing in scene units.
const FORMULA_TOP: f64 = 1.0;
const LABEL_GAP: f64 = 0.5;
const MATRIX_GAP: f64 = 1.5;
const CAPTION_BOTTOM: f64 = 0.5;
const COL_PITCH: f64 = 1.3;
const ROW_PITCH: f64 = 0.8;
const MIN_COL_GAP: f64 = 0.3;
const MIN_ROW_GAP: f64 = 0.2;
const BRACKET_H_BUFF: f64 = 0.25;
const BRACKET_V_BUFF: f64 = 0.25;
const BRACKET_SERIF: f64 = 0.15;
/// Gap between a highlighted entry and its rectangle.
pub const HIGHLIGHT_BUFF: f64 = 0.1;

/// A single line of text placed in a box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBox {
    /// Text to draw.
    pub text: String,
    /// Font size in pixels.
    pub size_px: f64,
    /// Estimated extent; renderers center the shaped text inside it.
    pub rect: Rect,
}

/// Placed matrix entries and bracket polylines.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixLayout {
    /// Row-major entry boxes.
    pub entries: Vec<Vec<TextBox>>,
    /// Open polyline of the left bracket, top serif first.
    pub left_bracket: Vec<Point>,
    /// Open polyline of the right bracket, top serif first.
    pub right_bracket: Vec<Point>,
    /// Extent including brackets.
    pub bounds: Rect,
}

impl MatrixLayout {
    /// Entry box at `(row, col)`.
    pub fn entry(&self, row: usize, col: usize) -> Option<&TextBox> {
        self.entries.get(row).and_then(|r| r.get(col))
    }
}

/// Inputs shared by every layout call, derived from the scene style.
#[derive(Clone, Copy, Debug)]
pub struct LayoutParams {
    /// Output canvas.
    pub canvas: Canvas,
    /// Formula font size in pixels.
    pub formula_px: f64,
    /// Label and matrix entry font size in pixels.
    pub body_px: f64,
    /// Caption font size in pixels.
    pub caption_px: f64,
}

/// Placement of every element for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayout {
    /// Formula at the top of the frame.
    pub formula: TextBox,
    /// Coefficient label under the formula.
    pub label: TextBox,
    /// Shrunk matrix in the middle of the frame.
    pub matrix: MatrixLayout,
    /// Caption near the bottom edge.
    pub caption: TextBox,
}

/// Estimated `(width, height)` of one line of text.
pub fn estimate_text_extent(text: &str, size_px: f64) -> (f64, f64) {
    let chars = text.chars().count() as f64;
    (chars * ADVANCE_EM * size_px, size_px)
}

fn text_box_centered_x(text: &str, size_px: f64, center_x: f64, top: f64) -> TextBox {
    let (w, h) = estimate_text_extent(text, size_px);
    TextBox {
        text: text.to_owned(),
        size_px,
        rect: Rect::new(center_x - w / 2.0, top, center_x + w / 2.0, top + h),
    }
}

fn text_box_centered(text: &str, size_px: f64, center: Point) -> TextBox {
    let (w, h) = estimate_text_extent(text, size_px);
    TextBox {
        text: text.to_owned(),
        size_px,
        rect: Rect::from_center_size(center, (w, h)),
    }
}

/// Place a matrix of formatted entries with its top edge (brackets included) at `top`,
/// horizontally centered on `center_x`.
pub fn layout_matrix(
    entries: &[Vec<String>],
    size_px: f64,
    unit: f64,
    center_x: f64,
    top: f64,
) -> MatrixLayout {
    let rows = entries.len();
    let cols = entries.iter().map(Vec::len).max().unwrap_or(0);

    let widest = entries
        .iter()
        .flatten()
        .map(|s| estimate_text_extent(s, size_px).0)
        .fold(0.0, f64::max);
    let col_pitch = (COL_PITCH * unit).max(widest + MIN_COL_GAP * unit);
    let row_pitch = (ROW_PITCH * unit).max(size_px + MIN_ROW_GAP * unit);

    let grid_top = top + BRACKET_V_BUFF * unit;
    let first_row_center = grid_top + size_px / 2.0;
    let half_span_x = (cols.saturating_sub(1) as f64) * col_pitch / 2.0;

    let placed: Vec<Vec<TextBox>> = entries
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(|(c, s)| {
                    let center = Point::new(
                        center_x - half_span_x + (c as f64) * col_pitch,
                        first_row_center + (r as f64) * row_pitch,
                    );
                    text_box_centered(s, size_px, center)
                })
                .collect()
        })
        .collect();

    let grid_bottom =
        first_row_center + (rows.saturating_sub(1) as f64) * row_pitch + size_px / 2.0;
    let left = center_x - half_span_x - widest / 2.0 - BRACKET_H_BUFF * unit;
    let right = center_x + half_span_x + widest / 2.0 + BRACKET_H_BUFF * unit;
    let bottom = grid_bottom + BRACKET_V_BUFF * unit;
    let serif = BRACKET_SERIF * unit;

    MatrixLayout {
        entries: placed,
        left_bracket: vec![
            Point::new(left + serif, top),
            Point::new(left, top),
            Point::new(left, bottom),
            Point::new(left + serif, bottom),
        ],
        right_bracket: vec![
            Point::new(right - serif, top),
            Point::new(right, top),
            Point::new(right, bottom),
            Point::new(right - serif, bottom),
        ],
        bounds: Rect::new(left, top, right, bottom),
    }
}

/// Lay out every element for one frame.
pub fn layout_scene(
    params: &LayoutParams,
    formula: &str,
    label: &str,
    entries: &[Vec<String>],
    caption: &str,
) -> SceneLayout {
    let unit = params.canvas.unit_px();
    let cx = params.canvas.center_x();

    let formula = text_box_centered_x(formula, params.formula_px, cx, FORMULA_TOP * unit);
    let below_formula = formula.rect.y1;
    let label = text_box_centered_x(label, params.body_px, cx, below_formula + LABEL_GAP * unit);
    let matrix = layout_matrix(
        entries,
        params.body_px,
        unit,
        cx,
        below_formula + MATRIX_GAP * unit,
    );

    let canvas_h = f64::from(params.canvas.height);
    let caption_top = canvas_h - CAPTION_BOTTOM * unit - params.caption_px;
    let caption = text_box_centered_x(caption, params.caption_px, cx, caption_top);

    SceneLayout {
        formula,
        label,
        matrix,
        caption,
    }
}

/// Rectangles surrounding every off-diagonal entry, as `(row, col, rect)`.
pub fn off_diagonal_highlights(matrix: &MatrixLayout, unit: f64) -> Vec<(usize, usize, Rect)> {
    let buff = HIGHLIGHT_BUFF * unit;
    matrix
        .entries
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(move |(c, _)| *c != r)
                .map(move |(c, b)| (r, c, b.rect.inflate(buff, buff)))
        })
        .collect()
}

/// Closed rectangle outline starting at the top-left corner, clockwise.
pub fn rect_outline(r: Rect) -> Vec<Point> {
    vec![
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x1, r.y1),
        Point::new(r.x0, r.y1),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
