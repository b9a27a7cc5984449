use std::collections::BTreeSet;

use super::model::{ALL, ANY_PERIOD, DinoRecord, FilterState};

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

fn matches_period(row: &DinoRecord, period_era: Option<&str>) -> bool {
    period_era.map_or(true, |p| row.period_era == p)
}

/// Return the rows that pass the period and country filters, in input order.
///
/// The diet filter only applies to the map view and is ignored here.
pub fn filter_rows<'a>(rows: &'a [DinoRecord], filter: &FilterState) -> Vec<&'a DinoRecord> {
    let period = filter.period_era.as_deref();
    let country = filter.country.as_deref();
    rows.iter()
        .filter(|r| matches_period(r, period))
        .filter(|r| country.map_or(true, |c| r.lived_in == c))
        .collect()
}

// ---------------------------------------------------------------------------
// Selector options
// ---------------------------------------------------------------------------

/// `["Any"]` followed by the sorted distinct period eras.
pub fn period_options(period_eras: &[String]) -> Vec<String> {
    std::iter::once(ANY_PERIOD.to_string())
        .chain(period_eras.iter().cloned())
        .collect()
}

/// `["All"]` followed by the sorted countries seen during `period_era`.
pub fn country_options(rows: &[DinoRecord], period_era: Option<&str>) -> Vec<String> {
    let countries: BTreeSet<&str> = rows
        .iter()
        .filter(|r| matches_period(r, period_era))
        .map(|r| r.lived_in.as_str())
        .collect();
    std::iter::once(ALL.to_string())
        .chain(countries.into_iter().map(str::to_string))
        .collect()
}

/// `["All"]` followed by the diets in their dataset order.
pub fn diet_options(diets: &[String]) -> Vec<String> {
    std::iter::once(ALL.to_string())
        .chain(diets.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, era: &str, country: &str) -> DinoRecord {
        DinoRecord {
            name: name.into(),
            dino_type: "Sauropod".into(),
            diet: "Herbivorous".into(),
            period: format!("{era} 150 million years ago"),
            period_era: era.into(),
            lived_in: country.into(),
            link: String::new(),
        }
    }

    fn rows() -> Vec<DinoRecord> {
        vec![
            record("A", "Late Jurassic", "USA"),
            record("B", "Late Cretaceous", "Mongolia"),
            record("C", "Late Jurassic", "Tanzania"),
            record("D", "Late Jurassic", "USA"),
        ]
    }

    fn names(rows: &[&DinoRecord]) -> Vec<String> {
        rows.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_no_filter_returns_everything() {
        let data = rows();
        let out = filter_rows(&data, &FilterState::default());
        assert_eq!(out.len(), data.len());
        assert!(out.iter().zip(&data).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_filter_is_ordered_subsequence() {
        let data = rows();
        let filter = FilterState::from_labels("Late Jurassic", "All", "All");
        assert_eq!(names(&filter_rows(&data, &filter)), vec!["A", "C", "D"]);

        let filter = FilterState::from_labels("Late Jurassic", "USA", "All");
        assert_eq!(names(&filter_rows(&data, &filter)), vec!["A", "D"]);

        let filter = FilterState::from_labels("Late Cretaceous", "USA", "All");
        assert!(filter_rows(&data, &filter).is_empty());
    }

    #[test]
    fn test_filter_ignores_diet() {
        let data = rows();
        let filter = FilterState::from_labels("Any", "All", "Carnivorous");
        assert_eq!(filter_rows(&data, &filter).len(), 4);
    }

    #[test]
    fn test_country_options_follow_period() {
        let data = rows();
        assert_eq!(
            country_options(&data, None),
            vec!["All", "Mongolia", "Tanzania", "USA"]
        );
        assert_eq!(
            country_options(&data, Some("Late Jurassic")),
            vec!["All", "Tanzania", "USA"]
        );
        assert_eq!(country_options(&data, Some("Triassic")), vec!["All"]);
    }

    #[test]
    fn test_sentinel_options() {
        let eras = vec!["Early Jurassic".to_string()];
        assert_eq!(period_options(&eras), vec!["Any", "Early Jurassic"]);
        let diets = vec!["Herbivorous".to_string(), "Carnivorous".to_string()];
        assert_eq!(diet_options(&diets), vec!["All", "Herbivorous", "Carnivorous"]);
    }
}
