use std::path::Path;

use anyhow::{Context, Result};
use heat_render::{Colormap, Tensor, TensorRasterizer};
use image::{imageops, RgbaImage};
use log::info;

/// Render the tensor heatmap to a PNG without opening a window.
///
/// `scale` is an integer nearest-neighbor upscale so individual cells stay
/// visible in the exported file; 0 is treated as 1.
pub fn write_png(tensor: &Tensor, colormap: Colormap, output: &Path, scale: u32) -> Result<()> {
    let scale = scale.max(1);
    let buffer = TensorRasterizer::new(colormap).rasterize(tensor);
    let image = RgbaImage::from_raw(buffer.width as u32, buffer.height as u32, buffer.pixels)
        .context("raster buffer does not match the tensor shape")?;

    let image = if scale > 1 {
        imageops::resize(
            &image,
            image.width() * scale,
            image.height() * scale,
            imageops::FilterType::Nearest,
        )
    } else {
        image
    };

    image.save(output).with_context(|| format!("failed to write {output:?}"))?;
    info!("wrote {}x{} heatmap to {output:?}", image.width(), image.height());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_an_upscaled_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.png");
        let tensor = Tensor::new("w", 2, 2, vec![0.0, 1.0, 2.0, 3.0]);

        write_png(&tensor, Colormap::Viridis, &path, 4).unwrap();

        let exported = image::open(&path).unwrap().into_rgba8();
        assert_eq!(exported.dimensions(), (8, 8));

        // Top-left block holds the minimum value, so the colormap's t=0 color.
        let lo = Colormap::Viridis.sample(0.0).to_bytes();
        assert_eq!(exported.get_pixel(0, 0).0, [lo[0], lo[1], lo[2], 255]);
    }
}
