//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::defaults::clamp_parallel_downloads;
use super::file::ConfigFileError;
use super::settings::ConfigFile;
use super::size::parse_size;

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [provider] section
    if let Some(section) = ini.section(Some("provider")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !v.contains("{quadkey}") {
                return Err(invalid(
                    "provider",
                    "url",
                    v,
                    "must contain a {quadkey} placeholder",
                ));
            }
            config.provider.url = v.to_string();
        }
        if let Some(v) = section.get("detect_missing") {
            config.provider.detect_missing = parse_bool(v).ok_or_else(|| {
                invalid("provider", "detect_missing", v, "must be 'true' or 'false'")
            })?;
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("parallel_downloads") {
            let parsed: usize = v.trim().parse().map_err(|_| {
                invalid(
                    "download",
                    "parallel_downloads",
                    v,
                    "must be a positive integer",
                )
            })?;
            config.download.parallel_downloads = clamp_parallel_downloads(parsed);
        }
        if let Some(v) = section.get("timeout") {
            config.download.timeout = v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    invalid("download", "timeout", v, "must be a positive integer (seconds)")
                })?;
        }
        if let Some(v) = section.get("request_timeout") {
            config.download.request_timeout = v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    invalid(
                        "download",
                        "request_timeout",
                        v,
                        "must be a positive integer (seconds)",
                    )
                })?;
        }
    }

    // [output] section
    if let Some(section) = ini.section(Some("output")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.output.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("max_pixel_area") {
            config.output.max_pixel_area = v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|area| *area > 0)
                .ok_or_else(|| {
                    invalid("output", "max_pixel_area", v, "must be a positive integer")
                })?;
        }
        if let Some(v) = section.get("max_size") {
            let v = v.trim();
            if !v.is_empty() {
                let bytes = parse_size(v).map_err(|_| {
                    invalid(
                        "output",
                        "max_size",
                        v,
                        "expected format like '256MB', '1GB', or '4096KB'",
                    )
                })?;
                config.output.max_size = Some(bytes);
            }
        }
    }

    Ok(config)
}

/// Expand a leading `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_ini_gives_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
[provider]
url = https://tiles.example.com/a{quadkey}.jpeg
detect_missing = yes

[download]
parallel_downloads = 32
timeout = 300
request_timeout = 10

[output]
directory = /tmp/aerial
max_pixel_area = 16777216
max_size = 48MB
"#,
        )
        .unwrap();

        assert_eq!(config.provider.url, "https://tiles.example.com/a{quadkey}.jpeg");
        assert!(config.provider.detect_missing);
        assert_eq!(config.download.parallel_downloads, 32);
        assert_eq!(config.download.timeout, 300);
        assert_eq!(config.download.request_timeout, 10);
        assert_eq!(config.output.directory, PathBuf::from("/tmp/aerial"));
        assert_eq!(config.output.max_pixel_area, 16_777_216);
        assert_eq!(config.output.max_size, Some(48 * 1024 * 1024));
    }

    #[test]
    fn test_url_without_placeholder() {
        let err = parse("[provider]\nurl = http://example.com/tile.jpeg\n").unwrap_err();
        assert!(err.to_string().contains("provider.url"));
        assert!(err.to_string().contains("{quadkey}"));
    }

    #[test]
    fn test_invalid_detect_missing() {
        let err = parse("[provider]\ndetect_missing = maybe\n").unwrap_err();
        assert!(err.to_string().contains("detect_missing"));
    }

    #[test]
    fn test_parallel_downloads_clamped() {
        let config = parse("[download]\nparallel_downloads = 0\n").unwrap();
        assert_eq!(config.download.parallel_downloads, MIN_PARALLEL_DOWNLOADS);

        let config = parse("[download]\nparallel_downloads = 10000\n").unwrap();
        assert_eq!(config.download.parallel_downloads, MAX_PARALLEL_DOWNLOADS);
    }

    #[test]
    fn test_invalid_parallel_downloads() {
        let err = parse("[download]\nparallel_downloads = many\n").unwrap_err();
        assert!(err.to_string().contains("parallel_downloads"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(parse("[download]\ntimeout = 0\n").is_err());
        assert!(parse("[download]\nrequest_timeout = -5\n").is_err());
    }

    #[test]
    fn test_invalid_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, "[output]\nmax_size = 2TB\n").unwrap();

        let err = ConfigFile::load_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("max_size"));
    }

    #[test]
    fn test_zero_pixel_area_rejected() {
        assert!(parse("[output]\nmax_pixel_area = 0\n").is_err());
    }

    #[test]
    fn test_empty_directory_keeps_default() {
        let config = parse("[output]\ndirectory =\n").unwrap();
        assert_eq!(config.output.directory, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/images"), home.join("images"));
        }
    }
}
