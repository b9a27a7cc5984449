use std::collections::BTreeSet;

use serde::Serialize;

/// Sentinel label for "no period filter".
pub const ANY_PERIOD: &str = "Any";
/// Sentinel label for "no country / diet filter".
pub const ALL: &str = "All";
/// Diet assigned to rows whose source diet is missing.
pub const UNKNOWN_DIET: &str = "Unknown";

// ---------------------------------------------------------------------------
// RawTable – a header plus rows of optional text cells
// ---------------------------------------------------------------------------

/// A loosely-typed table as read from disk, before any normalization.
/// Every cell is text; `None` marks a missing value (empty CSV cell, JSON
/// `null`, Parquet null).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell text at `(row, col)`, treating blank text as missing.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// DinoRecord – one row of the canonical table
// ---------------------------------------------------------------------------

/// A single normalized dinosaur row. `lived_in` always names one country and
/// `diet` is always one of the capitalized diet categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DinoRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub dino_type: String,
    pub diet: String,
    pub period: String,
    /// First two whitespace tokens of `period`, e.g. "Late Cretaceous".
    pub period_era: String,
    pub lived_in: String,
    pub link: String,
}

/// One entry of the country-code lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCode {
    pub country_name: String,
    pub numeric_code: String,
}

// ---------------------------------------------------------------------------
// FilterState – active dropdown / radio selections
// ---------------------------------------------------------------------------

/// Active filters. `None` in a field means the sentinel ("Any" / "All").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub period_era: Option<String>,
    pub country: Option<String>,
    pub diet: Option<String>,
}

impl FilterState {
    /// Build from widget labels, mapping the sentinels to `None`.
    pub fn from_labels(period_era: &str, country: &str, diet: &str) -> Self {
        Self {
            period_era: selection(period_era, ANY_PERIOD),
            country: selection(country, ALL),
            diet: selection(diet, ALL),
        }
    }

    pub fn period_label(&self) -> &str {
        self.period_era.as_deref().unwrap_or(ANY_PERIOD)
    }

    pub fn country_label(&self) -> &str {
        self.country.as_deref().unwrap_or(ALL)
    }

    pub fn diet_label(&self) -> &str {
        self.diet.as_deref().unwrap_or(ALL)
    }
}

fn selection(label: &str, sentinel: &str) -> Option<String> {
    (label != sentinel).then(|| label.to_string())
}

// ---------------------------------------------------------------------------
// Dataset – canonical table + lookup, built once per load
// ---------------------------------------------------------------------------

/// The loaded, normalized data with pre-computed selector options.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<DinoRecord>,
    pub country_codes: Vec<CountryCode>,
    /// Sorted distinct period eras.
    pub period_eras: Vec<String>,
    /// Distinct diets in first-appearance order.
    pub diets: Vec<String>,
}

impl Dataset {
    pub fn new(records: Vec<DinoRecord>, country_codes: Vec<CountryCode>) -> Self {
        // A blank period has no era to select.
        let period_eras: BTreeSet<&str> = records
            .iter()
            .map(|r| r.period_era.as_str())
            .filter(|era| !era.is_empty())
            .collect();
        let period_eras = period_eras.into_iter().map(str::to_string).collect();

        let mut diets: Vec<String> = Vec::new();
        for r in &records {
            if !diets.contains(&r.diet) {
                diets.push(r.diet.clone());
            }
        }

        Dataset {
            records,
            country_codes,
            period_eras,
            diets,
        }
    }

    /// Number of canonical rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(era: &str, diet: &str) -> DinoRecord {
        DinoRecord {
            name: "Aardonyx".into(),
            dino_type: "Sauropod".into(),
            diet: diet.into(),
            period: format!("{era} 199-189 million years ago"),
            period_era: era.into(),
            lived_in: "South Africa".into(),
            link: "https://example.org/aardonyx".into(),
        }
    }

    #[test]
    fn test_filter_state_from_labels() {
        let f = FilterState::from_labels("Any", "All", "All");
        assert_eq!(f, FilterState::default());

        let f = FilterState::from_labels("Late Cretaceous", "Mongolia", "Carnivorous");
        assert_eq!(f.period_era.as_deref(), Some("Late Cretaceous"));
        assert_eq!(f.country_label(), "Mongolia");
        assert_eq!(f.diet_label(), "Carnivorous");
    }

    #[test]
    fn test_raw_table_blank_cells_are_missing() {
        let mut t = RawTable::new(vec!["a".into(), "b".into()]);
        t.rows.push(vec![Some("  x ".into()), Some("   ".into())]);
        assert_eq!(t.cell(0, 0), Some("x"));
        assert_eq!(t.cell(0, 1), None);
        assert_eq!(t.cell(3, 0), None);
        assert_eq!(t.column_index("b"), Some(1));
    }

    #[test]
    fn test_dataset_options() {
        let ds = Dataset::new(
            vec![
                record("Late Jurassic", "Herbivorous"),
                record("Early Jurassic", "Carnivorous"),
                record("Late Jurassic", "Herbivorous"),
            ],
            Vec::new(),
        );
        assert_eq!(ds.period_eras, vec!["Early Jurassic", "Late Jurassic"]);
        assert_eq!(ds.diets, vec!["Herbivorous", "Carnivorous"]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_blank_era_is_not_an_option() {
        let mut blank = record("", "Carnivorous");
        blank.period = "   ".into();
        let ds = Dataset::new(vec![blank, record("Late Jurassic", "Herbivorous")], Vec::new());
        assert_eq!(ds.period_eras, vec!["Late Jurassic"]);
        assert!(!ds.is_empty());
        assert!(Dataset::new(Vec::new(), Vec::new()).is_empty());
    }
}
