// Configuration loaded from ~/.bugboard/rc
//
// The rc file holds `key=value` lines; blank lines and `#` comments are skipped.
//
//   data.location=board.db            snapshot database (relative to the rc directory)
//   board.project=https://...         project whose milestones form the columns
//   board.me=Jane Doe                 name used by `bugboard mine`
//   watch.interval=5                  seconds between change checks

use crate::dashboard::DEFAULT_PROJECT_URL;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_location: PathBuf,
    pub project_url: String,
    pub my_name: Option<String>,
    pub watch_interval_secs: u64,
}

impl Config {
    /// Directory holding the rc file and the default database.
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home.join(".bugboard"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("rc"))
    }

    /// Load the rc file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let config_dir = Self::config_dir()?;
        let config_path = config_dir.join("rc");
        if !config_path.exists() {
            log::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::defaults(&config_dir));
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
        Self::parse(&contents, &config_dir)
            .with_context(|| format!("Invalid config: {}", config_path.display()))
    }

    pub fn defaults(config_dir: &Path) -> Self {
        Self {
            data_location: config_dir.join("board.db"),
            project_url: DEFAULT_PROJECT_URL.to_string(),
            my_name: None,
            watch_interval_secs: DEFAULT_WATCH_INTERVAL_SECS,
        }
    }

    /// Parse rc contents. Relative paths resolve against `config_dir`.
    pub fn parse(contents: &str, config_dir: &Path) -> Result<Self> {
        let mut config = Self::defaults(config_dir);

        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                bail!("Line {}: expected key=value, got '{}'", line_no + 1, line);
            };
            let value = value.trim();

            match key.trim() {
                "data.location" => {
                    let path = PathBuf::from(value);
                    config.data_location = if path.is_relative() {
                        config_dir.join(path)
                    } else {
                        path
                    };
                }
                "board.project" => config.project_url = value.to_string(),
                "board.me" => {
                    config.my_name = if value.is_empty() { None } else { Some(value.to_string()) };
                }
                "watch.interval" => {
                    let secs: u64 = value
                        .parse()
                        .with_context(|| format!("Line {}: invalid watch.interval '{}'", line_no + 1, value))?;
                    if secs == 0 {
                        bail!("Line {}: watch.interval must be positive", line_no + 1);
                    }
                    config.watch_interval_secs = secs;
                }
                other => log::warn!("Ignoring unknown config key '{}'", other),
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let dir = Path::new("/home/me/.bugboard");
        let config = Config::parse("", dir).unwrap();
        assert_eq!(config, Config::defaults(dir));
        assert_eq!(config.data_location, dir.join("board.db"));
        assert_eq!(config.project_url, DEFAULT_PROJECT_URL);
        assert_eq!(config.watch_interval_secs, DEFAULT_WATCH_INTERVAL_SECS);
    }

    #[test]
    fn test_parse_all_keys() {
        let dir = Path::new("/home/me/.bugboard");
        let rc = "# board settings\n\
                  data.location = data/board.db\n\
                  board.project=https://api.launchpad.net/1.0/juju\n\
                  board.me=James Tunnicliffe\n\
                  watch.interval=30\n";
        let config = Config::parse(rc, dir).unwrap();
        assert_eq!(config.data_location, dir.join("data/board.db"));
        assert_eq!(config.project_url, "https://api.launchpad.net/1.0/juju");
        assert_eq!(config.my_name.as_deref(), Some("James Tunnicliffe"));
        assert_eq!(config.watch_interval_secs, 30);
    }

    #[test]
    fn test_absolute_data_location() {
        let config = Config::parse("data.location=/var/lib/board.db", Path::new("/home/me/.bugboard")).unwrap();
        assert_eq!(config.data_location, PathBuf::from("/var/lib/board.db"));
    }

    #[test]
    fn test_invalid_lines() {
        let dir = Path::new("/tmp");
        assert!(Config::parse("watch.interval=soon", dir).is_err());
        assert!(Config::parse("watch.interval=0", dir).is_err());
        assert!(Config::parse("just a line", dir).is_err());
        assert!(Config::parse("unknown.key=1", dir).is_ok());
    }
}
