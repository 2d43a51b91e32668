pub mod colormap;
pub mod raster;
