//! Control Panel Widget
//! Page header and the region selector.

use crate::config::{DashboardConfig, SelectorStyle, REGION_OPTIONS};
use egui::{Color32, ComboBox, RichText};

/// Header text plus the single region selector.
pub struct ControlPanel {
    pub page_title: String,
    pub description: String,
    pub style: SelectorStyle,
    pub selected: String,
    pub status: String,
}

impl ControlPanel {
    pub fn new(config: &DashboardConfig, selected: &str) -> Self {
        Self {
            page_title: config.page_title.clone(),
            description: config.description.clone(),
            style: config.selector_style,
            selected: selected.to_string(),
            status: String::new(),
        }
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the header and selector. Emits an action only when the value changed.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(10.0);
            ui.label(
                RichText::new(&self.page_title)
                    .size(28.0)
                    .strong()
                    .color(Color32::from_rgb(51, 51, 51)),
            );
            ui.add_space(8.0);
            ui.label(
                RichText::new(&self.description)
                    .size(14.0)
                    .color(Color32::from_rgb(102, 102, 102)),
            );
        });
        ui.add_space(16.0);

        let previous = self.selected.clone();
        ui.horizontal(|ui| {
            ui.label(RichText::new("Region:").size(14.0).strong());
            match self.style {
                SelectorStyle::Radio => {
                    for option in REGION_OPTIONS {
                        ui.radio_value(&mut self.selected, option.to_string(), option);
                    }
                }
                SelectorStyle::Dropdown => {
                    ComboBox::from_id_salt("region_selector")
                        .width(140.0)
                        .selected_text(&self.selected)
                        .show_ui(ui, |ui| {
                            for option in REGION_OPTIONS {
                                ui.selectable_value(&mut self.selected, option.to_string(), option);
                            }
                        });
                }
            }

            if !self.status.is_empty() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));
                });
            }
        });

        if self.selected != previous {
            action = ControlPanelAction::RegionChanged(self.selected.clone());
        }

        ui.add_space(8.0);
        ui.separator();

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    RegionChanged(String),
}
