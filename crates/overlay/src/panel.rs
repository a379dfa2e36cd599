use egui::{Align, Align2, Color32, Layout, RichText, Stroke};
use reactor_common::Color;
use reactor_kernel::{EnergyState, Palette, ReactorConfig};

use crate::slider::EnergySlider;
use crate::status::StatusReadout;

pub const HEADER_TEXT: &str = "SYSTEM STATUS";
pub const CONTROL_TITLE: &str = "ENERGY OUTPUT";
pub const HINT_TEXT: &str = "Drag slider to adjust reactor core rotation speed.";

const EDGE_MARGIN: f32 = 40.0;
const PANEL_WIDTH: f32 = 400.0;

/// Convert a (possibly extrapolated) color to something egui can draw.
pub fn to_color32(c: Color) -> Color32 {
    let [r, g, b] = c.to_rgb8();
    Color32::from_rgb(r, g, b)
}

/// Screen-space overlay drawn on top of the 3D scene: status header in the
/// top-left corner, energy control in the bottom-left.
///
/// Reads and writes only through the shared energy register.
#[derive(Debug, Clone)]
pub struct Overlay {
    slider: EnergySlider,
    readout: StatusReadout,
    accent: Color32,
}

impl Overlay {
    pub fn new(energy: EnergyState, palette: Palette, critical_threshold: f32) -> Self {
        Self {
            slider: EnergySlider::new(energy.clone()),
            readout: StatusReadout::with_threshold(energy, palette, critical_threshold),
            accent: to_color32(palette.safe),
        }
    }

    pub fn from_config(energy: EnergyState, config: &ReactorConfig) -> Self {
        Self::new(energy, config.palette, config.energy.critical_threshold)
    }

    pub fn readout(&self) -> &StatusReadout {
        &self.readout
    }

    pub fn slider_mut(&mut self) -> &mut EnergySlider {
        &mut self.slider
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.slider.sync();
        self.status_header(ctx);
        self.energy_control(ctx);
    }

    fn status_header(&self, ctx: &egui::Context) {
        let readout = self.readout.read();
        egui::Area::new(egui::Id::new("reactor_status"))
            .anchor(Align2::LEFT_TOP, [EDGE_MARGIN, EDGE_MARGIN])
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(HEADER_TEXT)
                        .size(24.0)
                        .color(Color32::from_rgba_unmultiplied(255, 255, 255, 153)),
                );
                ui.label(
                    RichText::new(readout.status.label())
                        .size(40.0)
                        .strong()
                        .color(to_color32(readout.color)),
                );
            });
    }

    fn energy_control(&mut self, ctx: &egui::Context) {
        let readout = self.readout.read();
        let accent = self.accent;
        let slider = &mut self.slider;

        egui::Area::new(egui::Id::new("reactor_energy_control"))
            .anchor(Align2::LEFT_BOTTOM, [EDGE_MARGIN, -EDGE_MARGIN])
            .show(ctx, |ui| {
                egui::Frame::default()
                    .fill(Color32::from_rgba_unmultiplied(5, 7, 10, 153))
                    .stroke(Stroke::new(
                        1.0,
                        Color32::from_rgba_unmultiplied(255, 255, 255, 26),
                    ))
                    .corner_radius(12.0)
                    .inner_margin(20.0)
                    .show(ui, |ui| {
                        ui.set_width(PANEL_WIDTH);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(CONTROL_TITLE).strong().color(Color32::WHITE));
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.label(RichText::new(readout.percent_text()).color(accent));
                            });
                        });

                        ui.spacing_mut().slider_width = PANEL_WIDTH;
                        ui.visuals_mut().selection.bg_fill = accent;
                        let response = ui.add(
                            egui::Slider::new(
                                slider.value_mut(),
                                EnergySlider::MIN..=EnergySlider::MAX,
                            )
                            .step_by(EnergySlider::STEP as f64)
                            .show_value(false),
                        );
                        if response.changed() {
                            slider.commit();
                        }

                        ui.label(RichText::new(HINT_TEXT).small().color(Color32::GRAY));
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_conversion_clamps() {
        assert_eq!(to_color32(Color::rgb(1.2, -0.2, 0.5)), Color32::from_rgb(255, 0, 128));
    }

    #[test]
    fn overlay_shares_register() {
        let energy = EnergyState::default();
        let mut overlay = Overlay::from_config(energy.clone(), &ReactorConfig::default());
        overlay.slider_mut().change(88);
        assert_eq!(energy.get(), 88.0);
        assert_eq!(overlay.readout().read().status.label(), "CRITICAL");
    }

    #[test]
    fn show_runs_headless() {
        let energy = EnergyState::new(20.0);
        let mut overlay = Overlay::new(energy.clone(), Palette::default(), 80.0);
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| overlay.show(ctx));
        // Drawing without input never writes to the register.
        assert_eq!(energy.get(), 20.0);
    }
}
