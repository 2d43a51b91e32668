/// An RGB sample with every channel in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorSample {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorSample {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Quantize to RGB bytes, rounding and clamping each channel to [0, 255].
    pub fn to_bytes(self) -> [u8; 3] {
        [channel_to_byte(self.r), channel_to_byte(self.g), channel_to_byte(self.b)]
    }
}

fn channel_to_byte(x: f32) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Fixed perceptual colormaps for magnitude visualization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Colormap {
    #[default]
    Viridis,
    Inferno,
    Grayscale,
}

impl Colormap {
    /// Sample the colormap at `t`. The input is clamped to [0, 1], so the
    /// function is total and never extrapolates past the table endpoints.
    pub fn sample(self, t: f32) -> ColorSample {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Colormap::Viridis => sample_anchors(&VIRIDIS, t),
            Colormap::Inferno => sample_inferno(t),
            Colormap::Grayscale => ColorSample::new(t, t, t),
        }
    }
}

/// Viridis anchors at uniform parameter spacing, matplotlib values.
const VIRIDIS: [[f32; 3]; 17] = [
    [0.267004, 0.004874, 0.329415],
    [0.278826, 0.073417, 0.397163],
    [0.282884, 0.145030, 0.462043],
    [0.271828, 0.209303, 0.509577],
    [0.253935, 0.265254, 0.529983],
    [0.229739, 0.322361, 0.545706],
    [0.206756, 0.371758, 0.553117],
    [0.183429, 0.422690, 0.556944],
    [0.163625, 0.471133, 0.558148],
    [0.144759, 0.519093, 0.556572],
    [0.127568, 0.566949, 0.550556],
    [0.119512, 0.614841, 0.537692],
    [0.134692, 0.658636, 0.517649],
    [0.208030, 0.718701, 0.472873],
    [0.335885, 0.765055, 0.418323],
    [0.616293, 0.852709, 0.226397],
    [0.993248, 0.906157, 0.143936],
];

/// Piecewise-linear interpolation over a uniformly spaced anchor table.
fn sample_anchors(anchors: &[[f32; 3]], t: f32) -> ColorSample {
    let segments = (anchors.len() - 1) as f32;
    let scaled = t * segments;
    let index = scaled.floor() as usize;
    if index + 1 >= anchors.len() {
        let last = anchors[anchors.len() - 1];
        return ColorSample::new(last[0], last[1], last[2]);
    }
    let frac = scaled - index as f32;

    let lo = anchors[index];
    let hi = anchors[index + 1];
    ColorSample::new(
        lo[0] + frac * (hi[0] - lo[0]),
        lo[1] + frac * (hi[1] - lo[1]),
        lo[2] + frac * (hi[2] - lo[2]),
    )
}

fn sample_inferno(t: f32) -> ColorSample {
    // Polynomial approximation of matplotlib's inferno.
    let r = (t * (2.2 - 1.2 * t)).clamp(0.0, 1.0);
    let g = (t * t * 0.85).clamp(0.0, 1.0);
    let b = ((1.0 - t) * 0.5 * (1.0 - t * t) + t * t * t * 0.6).clamp(0.0, 1.0);
    ColorSample::new(r, g, b)
}
