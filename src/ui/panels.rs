use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{ALL, ANY_PERIOD};
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filters for the active tab.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("DinoDash");
    ui.separator();

    match state.tab {
        Tab::Types => type_filters(ui, state),
        Tab::SpeciesByDiet => diet_filter(ui, state),
    }
}

fn type_filters(ui: &mut Ui, state: &mut AppState) {
    ui.label(RichText::new("Select a period:").italics());
    let mut period = state.filters.period_label().to_string();
    egui::ComboBox::from_id_salt("period")
        .selected_text(period.as_str())
        .width(180.0)
        .show_ui(ui, |ui: &mut Ui| {
            for option in &state.period_options {
                ui.selectable_value(&mut period, option.clone(), option.as_str());
            }
        });
    if period != state.filters.period_label() {
        state.set_period((period != ANY_PERIOD).then_some(period));
    }

    ui.add_space(12.0);

    ui.label(RichText::new("Select the country that the dinosaur lived in:").italics());
    let mut country = state.filters.country_label().to_string();
    egui::ComboBox::from_id_salt("country")
        .selected_text(country.as_str())
        .width(180.0)
        .show_ui(ui, |ui: &mut Ui| {
            for option in &state.country_options {
                ui.selectable_value(&mut country, option.clone(), option.as_str());
            }
        });
    if country != state.filters.country_label() {
        state.set_country((country != ALL).then_some(country));
    }
}

fn diet_filter(ui: &mut Ui, state: &mut AppState) {
    ui.label(RichText::new("Select category:").italics());
    let mut diet = state.filters.diet_label().to_string();
    for option in &state.diet_options {
        ui.radio_value(&mut diet, option.clone(), option.as_str());
    }
    if diet != state.filters.diet_label() {
        state.set_diet((diet != ALL).then_some(diet));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_dataset_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open country codes…").clicked() {
                open_country_codes_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export view…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.tab, Tab::Types, "Dino Type");
        ui.selectable_value(&mut state.tab, Tab::SpeciesByDiet, "Dino Species and Diet");

        ui.separator();

        let visible: usize = state.chart.counts.iter().map(|c| c.count).sum();
        ui.label(format!(
            "{} dinosaurs loaded, {} matching",
            state.dataset.len(),
            visible
        ));

        if state.tab == Tab::Types && ui.button("New sample").clicked() {
            state.resample();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

const TABLE_EXTENSIONS: &[&str] = &["csv", "json", "parquet", "pq"];

fn pick_table(title: &str) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("Supported files", TABLE_EXTENSIONS)
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}

pub fn open_dataset_dialog(state: &mut AppState) {
    if let Some(path) = pick_table("Open dinosaur dataset") {
        let codes = state.country_codes_path.clone();
        state.reload(&path, &codes);
    }
}

pub fn open_country_codes_dialog(state: &mut AppState) {
    if let Some(path) = pick_table("Open country codes") {
        let data = state.data_path.clone();
        state.reload(&data, &path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export current view")
        .set_file_name("dino-view.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_view(&path) {
            log::error!("Failed to export view: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
