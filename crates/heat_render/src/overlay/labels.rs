use crate::geom::{Point, Rect, Size};
use crate::tensor::Tensor;

/// Cells become labeled once the per-cell step exceeds this many pixels.
pub const LABEL_MIN_STEP: f32 = 40.0;
/// Step at which the label overlay reaches full opacity.
pub const LABEL_FULL_STEP: f32 = 64.0;

/// Upper bound on background quads emitted per frame. Backends with 16-bit
/// draw indices overflow well before the text path does, so only the quads
/// are capped; text keeps flowing past the limit.
pub const MAX_BACKGROUND_QUADS: usize = 1024;

const LEFT_MARGIN: f32 = 6.0;
const TOP_MARGIN: f32 = 6.0;
const BACKGROUND_INSET: f32 = 4.0;

/// Fixed-point labels wider than this fall back to exponential notation.
const MAX_LABEL_CHARS: usize = 12;

/// Per-frame view state for the label overlay.
#[derive(Clone, Copy, Debug)]
pub struct ViewportQuery {
    /// Offset of the heatmap origin relative to the visible scroll region;
    /// negative once the view has scrolled past the origin.
    pub offset: Point,
    /// Pixels per cell.
    pub step: f32,
    /// Size of the visible scroll region.
    pub window: Size,
    /// Overlay opacity in [0, 1], usually from [`overlay_alpha`].
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelBackground {
    pub rect: Rect,
    /// Straight (non-premultiplied) RGBA, already scaled by the query alpha.
    pub color: [f32; 4],
}

/// One value label to draw this frame, positioned relative to the visible
/// scroll region's origin.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelDraw {
    pub pos: Point,
    pub text: String,
    pub color: [f32; 4],
    pub background: Option<LabelBackground>,
}

/// Overlay opacity for a given step: 0 below the visibility threshold,
/// ramping linearly to 1 between [`LABEL_MIN_STEP`] and [`LABEL_FULL_STEP`].
pub fn overlay_alpha(step: f32) -> f32 {
    if step <= LABEL_MIN_STEP {
        0.0
    } else if step >= LABEL_FULL_STEP {
        1.0
    } else {
        (step - LABEL_MIN_STEP) / (LABEL_FULL_STEP - LABEL_MIN_STEP)
    }
}

/// Format a cell value to three decimal digits, bounded.
pub fn format_value(value: f32) -> String {
    let text = format!("{value:.3}");
    if text.len() > MAX_LABEL_CHARS {
        format!("{value:.3e}")
    } else {
        text
    }
}

/// Compute value labels for every grid cell inside the visible viewport.
///
/// `measure` supplies the rendered size of a label string (the GUI layer's
/// font metrics); the background quad is that box grown by a fixed inset.
/// Rows and columns entirely outside the viewport are skipped without
/// touching their values.
pub fn compute_visible_labels<F>(
    tensor: &Tensor,
    query: &ViewportQuery,
    mut measure: F,
) -> Vec<LabelDraw>
where
    F: FnMut(&str) -> Size,
{
    if query.step <= LABEL_MIN_STEP {
        return Vec::new();
    }

    let step = query.step;
    let cell_left_margin = (step / 2.0 - 24.0).max(0.0);
    let cell_top_margin = (step / 2.0 - 10.0).max(0.0);

    let mut labels = Vec::new();
    let mut quad_count = 0;

    for y in 0..tensor.rows {
        let fy = y as f32;
        if (step + 1.0) * fy < -query.offset.y {
            continue;
        }
        if step * fy > -query.offset.y + query.window.height {
            continue;
        }

        for x in 0..tensor.cols {
            let fx = x as f32;
            if (step + 1.0) * fx < -query.offset.x {
                continue;
            }
            if step * fx > -query.offset.x + query.window.width {
                continue;
            }

            let text = format_value(tensor.value(y, x));
            let pos = Point::new(
                query.offset.x + step * fx + LEFT_MARGIN + cell_left_margin,
                query.offset.y + step * fy + TOP_MARGIN + cell_top_margin,
            );

            let background = if quad_count < MAX_BACKGROUND_QUADS {
                quad_count += 1;
                let text_size = measure(&text);
                Some(LabelBackground {
                    rect: Rect::from_min_size(pos, text_size).expand(BACKGROUND_INSET),
                    color: [0.2, 0.2, 0.2, 0.4 * query.alpha],
                })
            } else {
                None
            };

            labels.push(LabelDraw {
                pos,
                text,
                color: [0.8, 0.8, 0.8, query.alpha],
                background,
            });
        }
    }

    labels
}
