use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    time::Duration,
};

use crate::error::Error;

pub const MANDATORY_CONFIG: &str = "url";

const SETTINGS_SECTION: &str = "settings";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Settings for one hook invocation, read from an INI-style file. The
/// monitoring system passes the file location on the command line.
#[derive(Debug)]
pub struct Config {
    url: String,
    timeout: Duration,
    settings: HashMap<String, String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Config, Error> {
        let file = File::open(path)?;
        Config::from_reader(BufReader::new(file))
    }

    /// Parses the `[settings]` section of `key = value` lines. Keys are
    /// lowercased, other sections and `#`/`;` comment lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Config, Error> {
        let mut settings = HashMap::new();
        let mut in_settings = false;
        let mut section_found = false;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = line[1..line.len() - 1].trim();
                in_settings = name.eq_ignore_ascii_case(SETTINGS_SECTION);
                section_found = section_found || in_settings;
                continue;
            }

            if !in_settings {
                continue;
            }

            let separator = line
                .char_indices()
                .find(|(_, c)| *c == '=' || *c == ':')
                .map(|(i, _)| i);

            match separator {
                Some(position) => {
                    let key = line[..position].trim().to_lowercase();
                    let value = line[position + 1..].trim().to_string();

                    if key.is_empty() {
                        return Err(Error::Config(format!(
                            "line {}: missing key before the separator",
                            index + 1,
                        )));
                    }

                    settings.insert(key, value);
                }
                None => {
                    return Err(Error::Config(format!(
                        "line {}: expected 'key = value', got '{}'",
                        index + 1,
                        line,
                    )));
                }
            }
        }

        if !section_found {
            return Err(Error::Config(format!(
                "config file has no [{}] section",
                SETTINGS_SECTION
            )));
        }

        let url = match settings.get(MANDATORY_CONFIG) {
            Some(url) if !url.is_empty() => url.clone(),
            _ => {
                return Err(Error::Config(format!(
                    "config file is missing: {}",
                    MANDATORY_CONFIG
                )));
            }
        };

        let timeout = match settings.get("timeout") {
            Some(raw) => {
                let millis = raw.parse::<u64>().map_err(|e| {
                    Error::Config(format!("timeout is not in milliseconds ('{}'): {}", raw, e))
                })?;

                Duration::from_millis(millis)
            }
            None => Duration::from_millis(DEFAULT_TIMEOUT_MS),
        };

        Ok(Config {
            url,
            timeout,
            settings,
        })
    }

    /// The endpoint notifications are forwarded to. Validated non-empty
    /// at load time.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }
}
