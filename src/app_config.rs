//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// TOML-backed file configuration for soundgrab defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Base address of the download backend.
    pub backend_origin: Option<String>,
    /// Default output directory for saved tracks.
    pub output_dir: Option<PathBuf>,
    /// Optional HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Optional HTTP whole-request timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Log filter directive for this setting.
    #[must_use]
    pub fn filter_directive(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/soundgrab/config.toml`
/// 2. `$HOME/.config/soundgrab/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("soundgrab")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("soundgrab")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

/// Reads and parses a config file.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "backend_origin" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `backend_origin` value on line {line_no}"))?;
                cfg.backend_origin = Some(parsed);
            }
            "output_dir" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `output_dir` value on line {line_no}"))?;
                cfg.output_dir = Some(PathBuf::from(parsed));
            }
            "connect_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `connect_timeout_secs` value on line {line_no}")
                })?;
                cfg.connect_timeout_secs = Some(parsed);
            }
            "read_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `read_timeout_secs` value on line {line_no}")
                })?;
                cfg.read_timeout_secs = Some(parsed);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `verbosity` value on line {line_no}"))?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_no}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config_all_fields() {
        let cfg = parse_config_str(
            r#"
backend_origin = "http://localhost:8000"
output_dir = "/home/me/Music"
connect_timeout_secs = 10
read_timeout_secs = 600
verbosity = "verbose"
"#,
        )
        .expect("full config should parse");
        assert_eq!(cfg.backend_origin.as_deref(), Some("http://localhost:8000"));
        assert_eq!(cfg.output_dir, Some(PathBuf::from("/home/me/Music")));
        assert_eq!(cfg.connect_timeout_secs, Some(10));
        assert_eq!(cfg.read_timeout_secs, Some(600));
        assert_eq!(cfg.verbosity, Some(VerbositySetting::Verbose));
    }

    #[test]
    fn test_parse_config_partial_fields() {
        let cfg = parse_config_str(r#"verbosity = "quiet""#).expect("partial config should parse");
        assert_eq!(cfg.verbosity, Some(VerbositySetting::Quiet));
        assert!(cfg.backend_origin.is_none());
        assert!(cfg.output_dir.is_none());
    }

    #[test]
    fn test_parse_config_supports_inline_comments() {
        let cfg = parse_config_str(
            r#"
# backend used on the home server
backend_origin = "http://nas.local:8000/#not-a-comment" # trailing note
"#,
        )
        .expect("config with comments should parse");
        assert_eq!(
            cfg.backend_origin.as_deref(),
            Some("http://nas.local:8000/#not-a-comment")
        );
    }

    #[test]
    fn test_parse_config_rejects_unknown_key_with_line_number() {
        let err = parse_config_str("\nconcurrency = 4").expect_err("unknown key expected");
        let msg = err.to_string();
        assert!(msg.contains("concurrency"), "{msg}");
        assert!(msg.contains("line 2"), "{msg}");
    }

    #[test]
    fn test_parse_config_rejects_missing_equals() {
        let err = parse_config_str("backend_origin").expect_err("syntax error expected");
        assert!(err.to_string().contains("expected key = value"));
    }

    #[test]
    fn test_parse_config_rejects_unquoted_string() {
        let err =
            parse_config_str("backend_origin = http://x").expect_err("quoted string expected");
        assert!(err.to_string().contains("backend_origin"));
    }

    #[test]
    fn test_parse_config_rejects_out_of_range_timeout() {
        let err = parse_config_str("read_timeout_secs = 0").expect_err("range error expected");
        assert!(err.to_string().contains("read_timeout_secs"));
    }

    #[test]
    fn test_parse_config_rejects_negative_timeout() {
        let err =
            parse_config_str("connect_timeout_secs = -5").expect_err("negative value expected");
        assert!(err.to_string().contains("connect_timeout_secs"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_verbosity() {
        let err = parse_config_str(r#"verbosity = "loud""#).expect_err("bad verbosity expected");
        assert!(err.to_string().contains("verbosity"));
    }

    #[test]
    fn test_verbosity_filter_directives() {
        assert_eq!(VerbositySetting::Default.filter_directive(), "info");
        assert_eq!(VerbositySetting::Verbose.filter_directive(), "debug");
        assert_eq!(VerbositySetting::Quiet.filter_directive(), "error");
        assert_eq!(VerbositySetting::Debug.filter_directive(), "trace");
    }

    #[test]
    fn test_load_file_config_reports_path_on_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "bogus = 1\n").unwrap();

        let err = load_file_config(&path).expect_err("parse error expected");
        assert!(format!("{err:#}").contains("config.toml"));
    }

    #[test]
    fn test_load_file_config_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "backend_origin = \"http://127.0.0.1:9\"\n").unwrap();

        let cfg = load_file_config(&path).unwrap();
        assert_eq!(cfg.backend_origin.as_deref(), Some("http://127.0.0.1:9"));
    }
}
