use log::warn;

use super::sync::ControlSync;

/// What the operator asked for on this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelActions {
    /// At least one slider pushed a new value.
    pub coefficients_changed: bool,
    /// Save the next rendered frame together with its coefficients.
    pub save_requested: bool,
}

/// Read-only figures shown under the sliders.
#[derive(Debug, Clone, Default)]
pub struct PanelStatus {
    pub fps: f32,
    pub triangles: usize,
    pub last_export: Option<String>,
}

/// Draw the lighting panel: one slider per coefficient plus the save button.
pub fn show_lighting_panel(
    ctx: &egui::Context,
    sync: &ControlSync,
    status: &PanelStatus,
) -> PanelActions {
    let mut actions = PanelActions::default();
    let coefficients = sync.environment().get();

    egui::Window::new("Spherical Harmonics")
        .title_bar(true)
        .resizable(false)
        .default_pos(egui::pos2(10.0, 10.0))
        .default_width(280.0)
        .show(ctx, |ui| {
            for binding in sync.bindings() {
                let mut value = coefficients[binding.index];
                let response = ui.add(
                    egui::Slider::new(&mut value, binding.min..=binding.max).text(binding.name),
                );
                if response.changed() {
                    match sync.set_by_index(binding.index, value) {
                        Ok(_) => actions.coefficients_changed = true,
                        Err(e) => warn!("{} not applied: {}", binding.name, e),
                    }
                }
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Render and Save").clicked() {
                    actions.save_requested = true;
                }
                if ui.button("Reset").clicked() {
                    match sync.reset() {
                        Ok(()) => actions.coefficients_changed = true,
                        Err(e) => warn!("reset failed: {}", e),
                    }
                }
            });

            ui.add_space(5.0);
            ui.separator();
            ui.label(
                egui::RichText::new(format!("{:.0} FPS", status.fps))
                    .size(14.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );
            ui.monospace(format!("Triangles: {}", status.triangles));
            if let Some(path) = &status.last_export {
                ui.monospace(format!("Saved: {}", path));
            }
        });

    actions
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::sh::{ShEnvironment, DEFAULT_COEFFICIENTS};

    #[test]
    fn test_idle_frame_changes_nothing() {
        let sync = ControlSync::new(Rc::new(ShEnvironment::default()));
        let status = PanelStatus {
            fps: 60.0,
            triangles: 12,
            last_export: Some("rendered_image.png".to_string()),
        };
        let ctx = egui::Context::default();

        let mut actions = PanelActions::default();
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                actions = show_lighting_panel(ctx, &sync, &status);
            });
        }

        assert_eq!(actions, PanelActions::default());
        assert_eq!(sync.environment().get(), DEFAULT_COEFFICIENTS);
        assert_eq!(sync.environment().generation(), 0);
    }
}
