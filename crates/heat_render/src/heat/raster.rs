use log::debug;

use super::colormap::Colormap;
use crate::tensor::Tensor;

/// Packed RGBA8 pixels for one tensor, row-major, matching the tensor layout.
#[derive(Clone, Debug)]
pub struct RasterBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl RasterBuffer {
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        assert_eq!(width * height * 4, pixels.len());
        Self { width, height, pixels }
    }
}

pub struct TensorRasterizer {
    colormap: Colormap,
}

impl TensorRasterizer {
    pub fn new(colormap: Colormap) -> Self {
        Self { colormap }
    }

    /// Map every tensor value through the colormap after normalizing against
    /// the global min/max, producing an RGBA8 buffer ready for texture upload.
    ///
    /// A constant-valued tensor has no range to normalize over; every cell is
    /// pinned to the colormap midpoint instead of dividing by zero.
    pub fn rasterize(&self, tensor: &Tensor) -> RasterBuffer {
        let mut min_value = f32::MAX;
        let mut max_value = -f32::MAX;
        for &v in tensor.values() {
            min_value = min_value.min(v);
            max_value = max_value.max(v);
        }

        debug!("tensor '{}' min/max = {min_value}, {max_value}", tensor.name);

        let range = max_value - min_value;

        let mut pixels = vec![0u8; tensor.len() * 4];
        for (i, &v) in tensor.values().iter().enumerate() {
            let t = if range > 0.0 { (v - min_value) / range } else { 0.5 };
            let [r, g, b] = self.colormap.sample(t).to_bytes();
            pixels[4 * i] = r;
            pixels[4 * i + 1] = g;
            pixels[4 * i + 2] = b;
            pixels[4 * i + 3] = 255;
        }

        RasterBuffer::new(tensor.cols, tensor.rows, pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buffer: &RasterBuffer, index: usize) -> [u8; 4] {
        buffer.pixels[4 * index..4 * index + 4].try_into().unwrap()
    }

    #[test]
    fn buffer_spans_full_grid_with_opaque_alpha() {
        let tensor = Tensor::new("w", 3, 5, (0..15).map(|i| i as f32).collect());
        let buffer = TensorRasterizer::new(Colormap::Viridis).rasterize(&tensor);

        assert_eq!(buffer.width, 5);
        assert_eq!(buffer.height, 3);
        assert_eq!(buffer.pixels.len(), 4 * 15);
        assert!(buffer.pixels.chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn extremes_map_to_colormap_endpoints() {
        let tensor = Tensor::new("w", 2, 2, vec![-1.5, 0.0, 2.0, 7.5]);
        let buffer = TensorRasterizer::new(Colormap::Viridis).rasterize(&tensor);

        let [lr, lg, lb] = Colormap::Viridis.sample(0.0).to_bytes();
        let [hr, hg, hb] = Colormap::Viridis.sample(1.0).to_bytes();
        assert_eq!(pixel(&buffer, 0), [lr, lg, lb, 255]);
        assert_eq!(pixel(&buffer, 3), [hr, hg, hb, 255]);
    }

    #[test]
    fn constant_tensor_is_a_single_well_defined_color() {
        let tensor = Tensor::new("w", 2, 2, vec![5.0; 4]);
        let buffer = TensorRasterizer::new(Colormap::Viridis).rasterize(&tensor);

        let [r, g, b] = Colormap::Viridis.sample(0.5).to_bytes();
        for i in 0..4 {
            assert_eq!(pixel(&buffer, i), [r, g, b, 255]);
        }
    }

    #[test]
    fn normalization_is_monotonic_along_the_colormap() {
        let tensor = Tensor::new("w", 4, 4, (1..=16).map(|i| i as f32).collect());
        let buffer = TensorRasterizer::new(Colormap::Viridis).rasterize(&tensor);

        for (i, &v) in tensor.values().iter().enumerate() {
            let t = (v - 1.0) / 15.0;
            let [r, g, b] = Colormap::Viridis.sample(t).to_bytes();
            assert_eq!(pixel(&buffer, i), [r, g, b, 255]);
        }
    }
}
