mod geom;
mod heat;
mod io;
mod overlay;
mod tensor;

pub use geom::{Point, Rect, Size};
pub use heat::{
    colormap::{ColorSample, Colormap},
    raster::{RasterBuffer, TensorRasterizer},
};
pub use io::weights::{load_weights, WeightsError};
pub use overlay::labels::{
    compute_visible_labels, format_value, overlay_alpha, LabelBackground, LabelDraw,
    ViewportQuery, LABEL_FULL_STEP, LABEL_MIN_STEP, MAX_BACKGROUND_QUADS,
};
pub use tensor::Tensor;
