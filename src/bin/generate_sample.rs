use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const COLUMNS: [&str; 7] = ["name", "diet", "period", "lived_in", "type", "length", "link"];

const DIETS: &[&str] = &[
    "herbivorous",
    "carnivorous",
    "omnivorous",
    "herbivorous/omnivorous",
    "",
];

const TYPES: &[&str] = &[
    "sauropod",
    "large theropod",
    "small theropod",
    "ceratopsian",
    "euornithopod",
    "armoured dinosaur",
];

const PERIODS: &[&str] = &[
    "Late Triassic 227-205 million years ago",
    "Early Jurassic 199-189 million years ago",
    "Mid Jurassic 169-164 million years ago",
    "Late Jurassic 155-145 million years ago",
    "Early Cretaceous 130-125 million years ago",
    "Late Cretaceous 74-70 million years ago",
    "Cretaceous",
];

/// `USA` and `Wales` are aliases, `North Africa` is a compound region.
const COUNTRIES: &[&str] = &[
    "USA",
    "Wales",
    "North Africa",
    "Argentina",
    "China",
    "Mongolia",
    "Canada",
    "Tanzania",
    "India",
    "Australia",
];

const ISO: &[(&str, &str, &str)] = &[
    ("Algeria", "DZ", "12"),
    ("Argentina", "AR", "32"),
    ("Australia", "AU", "36"),
    ("Canada", "CA", "124"),
    ("Chad", "TD", "148"),
    ("China", "CN", "156"),
    ("Egypt", "EG", "818"),
    ("India", "IN", "356"),
    ("Libya", "LY", "434"),
    ("Mauritania", "MR", "478"),
    ("Mongolia", "MN", "496"),
    ("Morocco", "MA", "504"),
    ("South Sudan", "SS", "728"),
    ("Sudan", "SD", "729"),
    ("Tanzania", "TZ", "834"),
    ("Tunisia", "TN", "788"),
    ("United Kingdom", "GB", "826"),
    ("United States", "US", "840"),
    ("Western Sahara", "EH", "732"),
    ("Brazil", "BR", "76"),
];

const SYLLABLES: &[&str] = &[
    "aar", "bra", "cer", "dip", "eo", "gal", "ig", "lo", "mega", "pachy", "rapt", "steg", "tri",
    "velo",
];
const SUFFIXES: &[&str] = &["saurus", "don", "raptor", "ceratops", "titan", "venator"];

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn generate_rows(rng: &mut StdRng, count: usize) -> Vec<[String; 7]> {
    (0..count)
        .map(|i| {
            let name = format!(
                "{}{}{}",
                pick(rng, SYLLABLES),
                pick(rng, SYLLABLES),
                pick(rng, SUFFIXES)
            );
            let length = format!("{:.1}m", rng.gen_range(1.0..30.0));
            let link = format!("https://www.nhm.ac.uk/discover/dino-directory/{name}.html");
            // Keep at least one compound diet in a compound region.
            let (diet, lived_in) = if i == 0 {
                ("herbivorous/omnivorous", "North Africa")
            } else {
                (pick(rng, DIETS), pick(rng, COUNTRIES))
            };
            [
                name,
                diet.to_string(),
                pick(rng, PERIODS).to_string(),
                lived_in.to_string(),
                pick(rng, TYPES).to_string(),
                length,
                link,
            ]
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[[String; 7]]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[[String; 7]]) -> Result<()> {
    let schema = Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|c| Field::new(*c, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let arrays: Vec<ArrayRef> = (0..COLUMNS.len())
        .map(|col| {
            let values: Vec<Option<&str>> = rows
                .iter()
                .map(|r| Some(r[col].as_str()).filter(|v| !v.is_empty()))
                .collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn write_iso(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["English short name lower case", "Alpha-2 code", "Numeric code"])?;
    for (name, alpha2, numeric) in ISO {
        writer.write_record([name, alpha2, numeric])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(42);
    let rows = generate_rows(&mut rng, 300);

    write_csv(&out_dir.join("data.csv"), &rows)?;
    write_parquet(&out_dir.join("data.parquet"), &rows)?;
    write_iso(&out_dir.join("iso.csv"))?;

    log::info!("Wrote {} dinosaur rows to {}", rows.len(), out_dir.display());
    println!(
        "Wrote data.csv, data.parquet and iso.csv ({} dinosaurs) to {}",
        rows.len(),
        out_dir.display()
    );
    Ok(())
}
