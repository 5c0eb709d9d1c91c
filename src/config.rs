use std::path::PathBuf;

/// Process-level settings, read from `SMARTVAL_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: String,
    pub model_path: PathBuf,
    pub data_path: PathBuf,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "./smartval.db".into(),
            model_path: PathBuf::from("./price_model.json"),
            data_path: PathBuf::from("./market_data.csv"),
            bind_addr: "0.0.0.0:8000".into(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            db_path: lookup("SMARTVAL_DB").unwrap_or(defaults.db_path),
            model_path: lookup("SMARTVAL_MODEL").map(PathBuf::from).unwrap_or(defaults.model_path),
            data_path: lookup("SMARTVAL_DATA").map(PathBuf::from).unwrap_or(defaults.data_path),
            bind_addr: lookup("SMARTVAL_ADDR").unwrap_or(defaults.bind_addr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(|key| match key {
            "SMARTVAL_DB" => Some(":memory:".into()),
            "SMARTVAL_MODEL" => Some("/tmp/m.json".into()),
            _ => None,
        });
        assert_eq!(config.db_path, ":memory:");
        assert_eq!(config.model_path, PathBuf::from("/tmp/m.json"));
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
    }
}
