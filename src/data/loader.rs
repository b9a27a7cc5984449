use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use super::error::MalformedInputError;
use super::model::{CountryCode, Dataset, DinoRecord, RawTable, UNKNOWN_DIET};
use super::normalize::{
    self, Cell, ExpandColumn, StagedRow, DIET_COMPOUND, REGION_COMPOUND,
};
use super::reader::read_table;

const DINO_TABLE: &str = "dinosaur";
const CODE_TABLE: &str = "country code";

const COUNTRY_NAME_COLUMN: &str = "English short name lower case";
const NUMERIC_CODE_COLUMN: &str = "Numeric code";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read both files from disk and build the canonical [`Dataset`].
pub fn load_paths(records_path: &Path, codes_path: &Path) -> Result<Dataset> {
    let records = read_table(records_path).context("loading dinosaur dataset")?;
    let codes = read_table(codes_path).context("loading country codes")?;

    let (records, country_codes) = load(&records, &codes)
        .with_context(|| format!("normalizing {}", records_path.display()))?;

    log::info!(
        "Loaded {} dinosaur rows and {} country codes",
        records.len(),
        country_codes.len()
    );
    let dataset = Dataset::new(records, country_codes);
    if dataset.is_empty() {
        log::warn!("{} contains no dinosaurs", records_path.display());
    }
    Ok(dataset)
}

/// Normalize the raw dinosaur table and parse the lookup table.
///
/// Steps, in order:
/// 1. derive the period era (first two tokens of `period`)
/// 2. expand the compound diet label
/// 3. title-case `diet`, `name`, `type`
/// 4. expand the compound region label in `lived_in`
/// 5. explode `lived_in` once more (no-op on atomic cells)
/// 6. rewrite country aliases across every column
/// 7. fill missing diets with "Unknown"
pub fn load(
    raw_records: &RawTable,
    raw_country_codes: &RawTable,
) -> Result<(Vec<DinoRecord>, Vec<CountryCode>), MalformedInputError> {
    let mut rows = parse_records(raw_records)?;
    let source_rows = rows.len();

    normalize::mark_compound(&mut rows, ExpandColumn::Diet, &DIET_COMPOUND);
    let mut rows = normalize::explode(rows, ExpandColumn::Diet);

    normalize::title_case_fields(&mut rows);

    normalize::mark_compound(&mut rows, ExpandColumn::LivedIn, &REGION_COMPOUND);
    let rows = normalize::explode(rows, ExpandColumn::LivedIn);
    let mut rows = normalize::explode(rows, ExpandColumn::LivedIn);

    normalize::rewrite_aliases(&mut rows);

    let records: Vec<DinoRecord> = rows.into_iter().map(finish).collect();
    log::debug!(
        "Expanded {source_rows} source rows into {} canonical rows",
        records.len()
    );

    let codes = parse_country_codes(raw_country_codes)?;
    Ok((records, codes))
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

struct DinoColumns {
    name: usize,
    dino_type: usize,
    diet: usize,
    period: usize,
    lived_in: usize,
    link: usize,
}

fn require(
    table: &RawTable,
    table_name: &'static str,
    column: &'static str,
) -> Result<usize, MalformedInputError> {
    table
        .column_index(column)
        .ok_or(MalformedInputError::MissingColumn {
            table: table_name,
            column,
        })
}

fn required_value<'a>(
    table: &'a RawTable,
    table_name: &'static str,
    row: usize,
    col: usize,
    column: &'static str,
) -> Result<&'a str, MalformedInputError> {
    table
        .cell(row, col)
        .ok_or(MalformedInputError::MissingValue {
            table: table_name,
            row,
            column,
        })
}

fn parse_records(table: &RawTable) -> Result<Vec<StagedRow>, MalformedInputError> {
    let cols = DinoColumns {
        name: require(table, DINO_TABLE, "name")?,
        dino_type: require(table, DINO_TABLE, "type")?,
        diet: require(table, DINO_TABLE, "diet")?,
        period: require(table, DINO_TABLE, "period")?,
        lived_in: require(table, DINO_TABLE, "lived_in")?,
        link: require(table, DINO_TABLE, "link")?,
    };

    let mut rows = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let name = required_value(table, DINO_TABLE, row, cols.name, "name")?;
        let dino_type = required_value(table, DINO_TABLE, row, cols.dino_type, "type")?;
        let lived_in = required_value(table, DINO_TABLE, row, cols.lived_in, "lived_in")?;
        let diet = table.cell(row, cols.diet);
        let period = table.cell(row, cols.period).unwrap_or_default();

        if let Some(d) = diet.filter(|d| !normalize::is_known_diet(d)) {
            return Err(MalformedInputError::UnrecognizedLabel {
                table: DINO_TABLE,
                row,
                column: "diet",
                value: d.to_string(),
            });
        }
        if !normalize::is_known_country(lived_in) {
            return Err(MalformedInputError::UnrecognizedLabel {
                table: DINO_TABLE,
                row,
                column: "lived_in",
                value: lived_in.to_string(),
            });
        }

        rows.push(StagedRow {
            name: name.to_string(),
            dino_type: dino_type.to_string(),
            diet: Cell::from_opt(diet),
            period: period.to_string(),
            period_era: normalize::period_era(period),
            lived_in: Cell::Value(lived_in.to_string()),
            link: table.cell(row, cols.link).unwrap_or_default().to_string(),
        });
    }
    Ok(rows)
}

fn parse_country_codes(table: &RawTable) -> Result<Vec<CountryCode>, MalformedInputError> {
    let name_col = require(table, CODE_TABLE, COUNTRY_NAME_COLUMN)?;
    let code_col = require(table, CODE_TABLE, NUMERIC_CODE_COLUMN)?;

    let mut seen = HashSet::new();
    let mut codes = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let name = required_value(table, CODE_TABLE, row, name_col, COUNTRY_NAME_COLUMN)?;
        let code = required_value(table, CODE_TABLE, row, code_col, NUMERIC_CODE_COLUMN)?;
        if !seen.insert(name) {
            log::warn!("Duplicate country code entry for '{name}' (row {row}), keeping the first");
            continue;
        }
        codes.push(CountryCode {
            country_name: name.to_string(),
            numeric_code: code.to_string(),
        });
    }
    Ok(codes)
}

/// Collapse a fully expanded staged row into a canonical record.
fn finish(row: StagedRow) -> DinoRecord {
    let diet = match row.diet {
        Cell::Value(d) => d,
        Cell::Missing | Cell::List(_) => UNKNOWN_DIET.to_string(),
    };
    // Country cells are validated non-empty and every list is exploded.
    debug_assert!(
        matches!(row.lived_in, Cell::Value(_)),
        "unexpanded country cell {:?}",
        row.lived_in
    );
    let lived_in = match row.lived_in {
        Cell::Value(c) => c,
        Cell::Missing | Cell::List(_) => String::new(),
    };
    DinoRecord {
        name: row.name,
        dino_type: row.dino_type,
        diet,
        period: row.period,
        period_era: row.period_era,
        lived_in,
        link: row.link,
    }
}
