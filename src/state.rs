use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::Config;
use crate::data::filter::{country_options, diet_options, filter_rows, period_options};
use crate::data::loader::load_paths;
use crate::data::model::{Dataset, FilterState};
use crate::data::query::{
    ChartData, CountryAggregate, SampleRow, chart_title, country_diet_aggregate, link_markup,
    sample_one_of_each_type, type_counts,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Types,
    SpeciesByDiet,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Canonical table and country lookup.
    pub dataset: Dataset,

    /// Files the dataset was loaded from.
    pub data_path: PathBuf,
    pub country_codes_path: PathBuf,

    /// Active filter selections.
    pub filters: FilterState,

    /// Selector options.
    pub period_options: Vec<String>,
    pub country_options: Vec<String>,
    pub diet_options: Vec<String>,

    /// Cached query results for the current filters.
    pub chart: ChartData,
    pub sample: Vec<SampleRow>,
    pub map: Vec<CountryAggregate>,

    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    rng: StdRng,
}

/// Serializable snapshot of what the user is looking at.
#[derive(Debug, Serialize)]
pub struct ViewExport<'a> {
    pub filters: &'a FilterState,
    pub chart: &'a ChartData,
    pub sample: Vec<ExportSampleRow<'a>>,
    pub map: &'a [CountryAggregate],
}

/// A sample row as written to the export, with ready-made anchor markup
/// for HTML consumers.
#[derive(Debug, Serialize)]
pub struct ExportSampleRow<'a> {
    #[serde(flatten)]
    pub row: &'a SampleRow,
    pub link_html: String,
}

impl<'a> From<&'a SampleRow> for ExportSampleRow<'a> {
    fn from(row: &'a SampleRow) -> Self {
        ExportSampleRow {
            row,
            link_html: link_markup(&row.link, &row.name),
        }
    }
}

impl AppState {
    /// Build the state from an already loaded dataset.
    pub fn new(dataset: Dataset, config: &Config) -> Self {
        let rng = match config.sample_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut state = AppState {
            dataset,
            data_path: config.data_path.clone(),
            country_codes_path: config.country_codes_path.clone(),
            filters: FilterState::default(),
            period_options: Vec::new(),
            country_options: Vec::new(),
            diet_options: Vec::new(),
            chart: ChartData::default(),
            sample: Vec::new(),
            map: Vec::new(),
            tab: Tab::default(),
            status_message: None,
            rng,
        };
        state.reset_options();
        state
    }

    /// Ingest a newly loaded dataset and reset filters.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.filters = FilterState::default();
        self.reset_options();
        self.status_message = None;
    }

    fn reset_options(&mut self) {
        self.period_options = period_options(&self.dataset.period_eras);
        self.diet_options = diet_options(&self.dataset.diets);
        self.country_options = country_options(&self.dataset.records, None);
        self.refresh_types();
        self.refresh_map();
    }

    /// Reload from the given files; on failure the current dataset stays.
    pub fn reload(&mut self, data_path: &Path, country_codes_path: &Path) {
        match load_paths(data_path, country_codes_path) {
            Ok(dataset) => {
                self.data_path = data_path.to_path_buf();
                self.country_codes_path = country_codes_path.to_path_buf();
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Change the period filter. Country options follow the period and an
    /// unavailable country falls back to "All".
    pub fn set_period(&mut self, period_era: Option<String>) {
        self.filters.period_era = period_era;
        self.country_options =
            country_options(&self.dataset.records, self.filters.period_era.as_deref());
        let still_listed = self
            .filters
            .country
            .as_ref()
            .map_or(true, |c| self.country_options.contains(c));
        if !still_listed {
            self.filters.country = None;
        }
        self.refresh_types();
    }

    pub fn set_country(&mut self, country: Option<String>) {
        self.filters.country = country;
        self.refresh_types();
    }

    pub fn set_diet(&mut self, diet: Option<String>) {
        self.filters.diet = diet;
        self.refresh_map();
    }

    /// Recompute chart and sample for the period / country filters.
    pub fn refresh_types(&mut self) {
        let rows = filter_rows(&self.dataset.records, &self.filters);
        self.chart = ChartData {
            title: chart_title(&self.filters),
            counts: type_counts(&rows),
        };
        self.sample = sample_one_of_each_type(&rows, &mut self.rng)
            .into_iter()
            .map(SampleRow::from_record)
            .collect();
    }

    /// Draw a fresh sample without touching the chart.
    pub fn resample(&mut self) {
        let rows = filter_rows(&self.dataset.records, &self.filters);
        self.sample = sample_one_of_each_type(&rows, &mut self.rng)
            .into_iter()
            .map(SampleRow::from_record)
            .collect();
    }

    /// Recompute the per-country aggregate for the diet filter.
    pub fn refresh_map(&mut self) {
        self.map = country_diet_aggregate(
            &self.dataset.records,
            &self.dataset.country_codes,
            self.filters.diet.as_deref(),
        );
    }

    pub fn view_export(&self) -> ViewExport<'_> {
        ViewExport {
            filters: &self.filters,
            chart: &self.chart,
            sample: self.sample.iter().map(ExportSampleRow::from).collect(),
            map: &self.map,
        }
    }

    /// Write the current view as pretty JSON.
    pub fn export_view(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&self.view_export()).context("serializing view")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported current view to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CountryCode, DinoRecord};

    fn dino(name: &str, dino_type: &str, era: &str, country: &str, diet: &str) -> DinoRecord {
        DinoRecord {
            name: name.into(),
            dino_type: dino_type.into(),
            diet: diet.into(),
            period: format!("{era} 100 million years ago"),
            period_era: era.into(),
            lived_in: country.into(),
            link: format!("https://example.org/{name}"),
        }
    }

    fn state() -> AppState {
        let records = vec![
            dino("Allosaurus", "Large Theropod", "Late Jurassic", "United States", "Carnivorous"),
            dino("Diplodocus", "Sauropod", "Late Jurassic", "United States", "Herbivorous"),
            dino("Giraffatitan", "Sauropod", "Late Jurassic", "Tanzania", "Herbivorous"),
            dino("Velociraptor", "Small Theropod", "Late Cretaceous", "Mongolia", "Carnivorous"),
        ];
        let codes = vec![
            CountryCode { country_name: "Mongolia".into(), numeric_code: "496".into() },
            CountryCode { country_name: "Chad".into(), numeric_code: "148".into() },
        ];
        let config = Config {
            data_path: "data.csv".into(),
            country_codes_path: "iso.csv".into(),
            sample_seed: Some(3),
        };
        AppState::new(Dataset::new(records, codes), &config)
    }

    #[test]
    fn test_initial_views() {
        let s = state();
        assert_eq!(s.period_options, vec!["Any", "Late Cretaceous", "Late Jurassic"]);
        assert_eq!(s.country_options, vec!["All", "Mongolia", "Tanzania", "United States"]);
        assert_eq!(s.diet_options, vec!["All", "Carnivorous", "Herbivorous"]);
        assert_eq!(s.chart.title, "Types of Dinosaurs");
        assert_eq!(s.chart.counts[0].dino_type, "Sauropod");
        assert_eq!(s.sample.len(), 3);
        assert_eq!(s.map.len(), 4);
    }

    #[test]
    fn test_period_change_resets_missing_country() {
        let mut s = state();
        s.set_country(Some("Mongolia".into()));
        assert_eq!(s.sample.len(), 1);

        s.set_period(Some("Late Jurassic".into()));
        assert_eq!(s.filters.country, None);
        assert_eq!(s.country_options, vec!["All", "Tanzania", "United States"]);
        assert_eq!(s.chart.title, "Types of Dinosaurs that lived during Late Jurassic");
        assert_eq!(s.sample.len(), 2);
    }

    #[test]
    fn test_diet_only_touches_map() {
        let mut s = state();
        let chart = s.chart.clone();
        s.set_diet(Some("Herbivorous".into()));
        assert_eq!(s.chart, chart);
        let mongolia = s.map.iter().find(|m| m.country == "Mongolia").unwrap();
        assert_eq!(mongolia.species_count, None);
    }

    #[test]
    fn test_export_view() {
        let s = state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        s.export_view(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["chart"]["title"], "Types of Dinosaurs");
        assert_eq!(json["sample"].as_array().unwrap().len(), 3);
        let first = &json["sample"][0];
        let name = first["name"].as_str().unwrap();
        let link = first["link"].as_str().unwrap();
        assert_eq!(
            first["link_html"].as_str().unwrap(),
            format!("<a href='{link}' target='_blank'>{name}</a>")
        );
        assert!(first["type"].is_string());
    }

    #[test]
    fn test_sample_rows_carry_no_markup() {
        let s = state();
        let row = serde_json::to_value(&s.sample[0]).unwrap();
        assert!(row.get("link_html").is_none());
        let first = &s.sample[0];
        assert_eq!(
            s.view_export().sample[0].link_html,
            link_markup(&first.link, &first.name)
        );
    }

    #[test]
    fn test_failed_reload_keeps_dataset() {
        let mut s = state();
        s.reload(Path::new("missing.csv"), Path::new("missing-iso.csv"));
        assert_eq!(s.dataset.len(), 4);
        assert!(s.status_message.is_some());
    }
}
