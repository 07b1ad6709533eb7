pub mod panel;
pub mod sync;

pub use panel::{show_lighting_panel, PanelActions, PanelStatus};
pub use sync::{ControlBinding, ControlSync};
