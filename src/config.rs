use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DATA_ENV: &str = "DINO_DASH_DATA";
pub const COUNTRY_CODES_ENV: &str = "DINO_DASH_COUNTRY_CODES";
pub const SEED_ENV: &str = "DINO_DASH_SEED";

const DEFAULT_DATA: &str = "data/data.csv";
const DEFAULT_COUNTRY_CODES: &str = "data/iso.csv";

/// Startup settings, read from the environment and an optional `.env` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
    pub country_codes_path: PathBuf,
    /// Fixed seed for the sample table; entropy when absent.
    pub sample_seed: Option<u64>,
}

impl Config {
    /// Load `.env` from the working directory (if any), then read the environment.
    /// Variables already set in the environment win over the file.
    pub fn load() -> Result<Self> {
        match dotenv::dotenv() {
            Ok(path) => log::info!("Loaded settings from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("reading .env"),
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_path = lookup(DATA_ENV).unwrap_or_else(|| DEFAULT_DATA.to_string());
        let country_codes_path =
            lookup(COUNTRY_CODES_ENV).unwrap_or_else(|| DEFAULT_COUNTRY_CODES.to_string());
        let sample_seed = lookup(SEED_ENV)
            .map(|s| {
                s.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{SEED_ENV}='{s}' is not an unsigned integer"))
            })
            .transpose()?;

        Ok(Config {
            data_path: data_path.into(),
            country_codes_path: country_codes_path.into(),
            sample_seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c.data_path, PathBuf::from("data/data.csv"));
        assert_eq!(c.country_codes_path, PathBuf::from("data/iso.csv"));
        assert_eq!(c.sample_seed, None);
    }

    #[test]
    fn test_overrides() {
        let c = config(&[(DATA_ENV, "dinos.parquet"), (SEED_ENV, " 42 ")]).unwrap();
        assert_eq!(c.data_path, PathBuf::from("dinos.parquet"));
        assert_eq!(c.sample_seed, Some(42));
    }

    #[test]
    fn test_bad_seed() {
        let err = config(&[(SEED_ENV, "soon")]).unwrap_err();
        assert!(err.to_string().contains(SEED_ENV));
    }

    #[test]
    fn test_dotenv_file_settings() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# local overrides").unwrap();
        writeln!(file, "{DATA_ENV}=data/dinos.json").unwrap();
        writeln!(file, "{SEED_ENV}=7").unwrap();

        let vars: HashMap<String, String> = dotenv::from_path_iter(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        let c = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(c.data_path, PathBuf::from("data/dinos.json"));
        assert_eq!(c.country_codes_path, PathBuf::from("data/iso.csv"));
        assert_eq!(c.sample_seed, Some(7));
    }
}
