use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::color::BAR_COLOR;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Type count chart (first tab)
// ---------------------------------------------------------------------------

/// Horizontal bar chart of dinosaur counts per type.
pub fn type_chart(ui: &mut Ui, state: &AppState) {
    ui.strong(state.chart.title.as_str());

    if state.chart.counts.is_empty() {
        ui.label("No dinosaurs match the selected filters.");
        return;
    }

    // Largest count at the top: bars are laid out bottom-up.
    let n = state.chart.counts.len();
    let labels: Vec<String> = state
        .chart
        .counts
        .iter()
        .rev()
        .map(|c| c.dino_type.clone())
        .collect();
    let bars: Vec<Bar> = state
        .chart
        .counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new((n - 1 - i) as f64, c.count as f64)
                .name(&c.dino_type)
                .width(0.7)
        })
        .collect();

    let chart = BarChart::new(bars)
        .name("Number of Dinos")
        .horizontal()
        .color(BAR_COLOR);

    Plot::new("type_chart")
        .height(230.0)
        .x_axis_label("Number of Dinos")
        .y_axis_label("Dino Type")
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
