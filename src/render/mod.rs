pub mod raster;
pub mod viewport;
