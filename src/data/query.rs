use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::model::{CountryCode, DinoRecord, FilterState};

pub const CHART_BASE_TITLE: &str = "Types of Dinosaurs";

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub dino_type: String,
    pub count: usize,
}

/// Everything the bar chart needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub counts: Vec<TypeCount>,
}

/// Projection of a sampled record for the sample table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleRow {
    #[serde(rename = "type")]
    pub dino_type: String,
    pub name: String,
    pub link: String,
}

impl SampleRow {
    pub fn from_record(record: &DinoRecord) -> Self {
        SampleRow {
            dino_type: record.dino_type.clone(),
            name: record.name.clone(),
            link: record.link.clone(),
        }
    }
}

/// One country of the map view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryAggregate {
    pub country: String,
    /// `None` when the country is missing from the lookup table.
    pub numeric_code: Option<String>,
    /// `None` ("no data") when no dinosaur row names this country.
    pub species_count: Option<usize>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Chart title for the active period / country filters.
pub fn chart_title(filter: &FilterState) -> String {
    let mut title = CHART_BASE_TITLE.to_string();
    if let Some(era) = &filter.period_era {
        title.push_str(&format!(" that lived during {era}"));
    }
    if let Some(country) = &filter.country {
        title.push_str(&format!(" and in {country}"));
    }
    title
}

/// Count rows per type; largest count first, ties by type name.
pub fn type_counts(rows: &[&DinoRecord]) -> Vec<TypeCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in rows {
        *counts.entry(r.dino_type.as_str()).or_default() += 1;
    }
    let mut out: Vec<TypeCount> = counts
        .into_iter()
        .map(|(t, count)| TypeCount {
            dino_type: t.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.dino_type.cmp(&b.dino_type)));
    out
}

/// Pick one row uniformly at random for every distinct type, sorted by type.
pub fn sample_one_of_each_type<'a, R>(rows: &[&'a DinoRecord], rng: &mut R) -> Vec<&'a DinoRecord>
where
    R: Rng + ?Sized,
{
    let mut by_type: BTreeMap<&str, Vec<&'a DinoRecord>> = BTreeMap::new();
    for r in rows {
        by_type.entry(r.dino_type.as_str()).or_default().push(*r);
    }
    by_type
        .values()
        .filter_map(|group| group.choose(&mut *rng).copied())
        .collect()
}

/// Species count per country for one diet (or all), full-outer-joined with
/// the country code lookup on country name. Sorted by country name.
pub fn country_diet_aggregate(
    rows: &[DinoRecord],
    country_codes: &[CountryCode],
    diet: Option<&str>,
) -> Vec<CountryAggregate> {
    let mut joined: BTreeMap<&str, CountryAggregate> = BTreeMap::new();

    for r in rows.iter().filter(|r| diet.map_or(true, |d| r.diet == d)) {
        let agg = joined
            .entry(r.lived_in.as_str())
            .or_insert_with(|| CountryAggregate {
                country: r.lived_in.clone(),
                numeric_code: None,
                species_count: None,
            });
        agg.species_count = Some(agg.species_count.unwrap_or(0) + 1);
    }

    for code in country_codes {
        joined
            .entry(code.country_name.as_str())
            .or_insert_with(|| CountryAggregate {
                country: code.country_name.clone(),
                numeric_code: None,
                species_count: None,
            })
            .numeric_code = Some(code.numeric_code.clone());
    }

    joined.into_values().collect()
}

/// HTML anchor that opens `url` in a new tab, labelled with `name`.
pub fn link_markup(url: &str, name: &str) -> String {
    format!("<a href='{url}' target='_blank'>{name}</a>")
}
