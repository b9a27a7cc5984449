use eframe::egui::{self, RichText, Sense, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::SpeciesScale;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Random sample table (first tab)
// ---------------------------------------------------------------------------

pub fn sample_table(ui: &mut Ui, state: &AppState) {
    ui.strong("What are some random dinosaurs of these types?");
    ui.label(RichText::new("Press \"New sample\" to get a new sample of dinos!").italics());

    if state.sample.is_empty() {
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(160.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("Dino Type");
            });
            header.col(|ui| {
                ui.strong("Click on Dino Name to Learn More");
            });
        })
        .body(|mut body| {
            for row in &state.sample {
                body.row(ROW_HEIGHT, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(row.dino_type.as_str());
                    });
                    table_row.col(|ui| {
                        if row.link.is_empty() {
                            ui.label(row.name.as_str());
                        } else {
                            ui.hyperlink_to(row.name.as_str(), &row.link);
                        }
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Per-country species table (second tab)
// ---------------------------------------------------------------------------

pub fn country_table(ui: &mut Ui, state: &AppState) {
    ui.strong("What species of dinosaurs are found around the world?");

    let scale = SpeciesScale::new(state.map.iter().map(|c| c.species_count));

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(24.0))
        .column(Column::auto().at_least(200.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT, |mut header| {
            header.col(|_| {});
            header.col(|ui| {
                ui.strong("Country");
            });
            header.col(|ui| {
                ui.strong("Code");
            });
            header.col(|ui| {
                ui.strong("Number of Species");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.map.len(), |mut table_row| {
                let entry = &state.map[table_row.index()];
                table_row.col(|ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                    ui.painter()
                        .rect_filled(rect, 2.0, scale.color_for(entry.species_count));
                });
                table_row.col(|ui| {
                    ui.label(entry.country.as_str());
                });
                table_row.col(|ui| {
                    ui.label(entry.numeric_code.as_deref().unwrap_or("–"));
                });
                table_row.col(|ui| {
                    match entry.species_count {
                        Some(n) => ui.label(n.to_string()),
                        None => ui.weak("no data"),
                    };
                });
            });
        });
}
