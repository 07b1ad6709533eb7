mod app;
mod surface;

pub use app::run;
pub use surface::FrameView;
