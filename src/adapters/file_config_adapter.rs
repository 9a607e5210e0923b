//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[engine]
window = 14
smoothing = 1

[strategy]
oversold = 30
extra_check = 45
profit_pct = 0.25

[driver]
symbol = BTC
poll_interval_secs = 300
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("driver", "symbol"), Some("BTC".into()));
        assert_eq!(adapter.get_int("engine", "window", 0), 14);
        assert_eq!(adapter.get_double("strategy", "profit_pct", 0.0), 0.25);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("driver", "missing"), None);
        assert_eq!(adapter.get_int("engine", "missing", 42), 42);
        assert_eq!(adapter.get_double("strategy", "missing", 9.5), 9.5);
        assert!(adapter.get_bool("driver", "missing", true));
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let adapter = FileConfigAdapter::from_string("[engine]\nwindow = lots\n").unwrap();
        assert_eq!(adapter.get_int("engine", "window", 14), 14);
        assert_eq!(adapter.get_double("engine", "window", 14.0), 14.0);
    }

    #[test]
    fn bool_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[driver]\na = yes\nb = 0\nc = True\nd = maybe\n")
                .unwrap();
        assert!(adapter.get_bool("driver", "a", false));
        assert!(!adapter.get_bool("driver", "b", true));
        assert!(adapter.get_bool("driver", "c", false));
        assert!(!adapter.get_bool("driver", "d", false));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_string("driver", "symbol"), Some("BTC".into()));
    }

    #[test]
    fn from_file_errors_on_missing_file() {
        assert!(FileConfigAdapter::from_file("/nonexistent/oscalp.ini").is_err());
    }
}
