mod color;

pub use color::{hsv_to_rgb, to_rgba8};
