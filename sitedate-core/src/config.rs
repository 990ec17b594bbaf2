use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use directories::BaseDirs;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::nav::{NavLink, default_links};
use crate::options::FormatOptions;

/// Points at an explicit config file, skipping the search.
pub const CONFIG_ENV: &str = "SITEDATE_CONFIG";

const DEFAULT_LOCALE: &str = "en-US";
const DEFAULT_TITLE: &str = "My blog";

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub title: String,
    pub author: Option<String>,
    /// Public URL of the site (e.g. `https://example.com`). Optional.
    pub base_url: Option<String>,
    pub date: DateConfig,
    /// Anchor date of the age shown on the site, read as midnight UTC.
    pub age_anchor: Option<NaiveDate>,
    pub nav: Vec<NavLink>,
}

/// How dates are displayed across the site.
#[derive(Debug, Clone, PartialEq)]
pub struct DateConfig {
    /// BCP-47 tag, e.g. `en-US`.
    pub locale: String,
    pub options: FormatOptions,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            options: FormatOptions::long_date(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: None,
            base_url: None,
            date: DateConfig::default(),
            age_anchor: None,
            nav: default_links(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    title: Option<String>,
    author: Option<String>,
    base_url: Option<String>,
    /// Valid format is "%Y-%m-%d" (e.g. "2003-09-29").
    age_anchor: Option<String>,
    date: Option<FileDateConfig>,
    /// Optional array of tables:
    /// [[nav]]
    /// label = "Blog"
    /// href = "/blog"
    nav: Option<Vec<NavLink>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileDateConfig {
    locale: Option<String>,
    options: Option<FormatOptions>,
}

impl SiteConfig {
    /// Public entrypoint: load config from `$SITEDATE_CONFIG` if set, else from the first
    /// existing candidate path, and apply defaults.
    ///
    /// A missing file is not fatal: the site falls back to [`SiteConfig::default`]
    /// (`en-US`, long-month date) and a warning is logged. A file named by
    /// `$SITEDATE_CONFIG` that cannot be read, or any malformed file, is an error.
    pub fn load() -> Result<Self> {
        if let Some(explicit) = env::var_os(CONFIG_ENV) {
            return Self::from_path(Path::new(&explicit));
        }

        match Self::config_file_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::from_path(&path),
            None => {
                log::warn!("no site.toml found, using default site configuration");
                Ok(Self::default())
            }
        }
    }

    /// Read and parse a specific config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_toml(&s).with_context(|| format!("parsing {}", path.display()))?;
        log::info!("loaded site configuration from {}", path.display());
        Ok(config)
    }

    /// Parse a TOML document and apply defaults for everything it leaves out.
    pub fn from_toml(s: &str) -> Result<Self> {
        let file_config = Self::parse_file(s)?;
        let date = file_config.date.unwrap_or_default();

        let age_anchor = file_config
            .age_anchor
            .as_deref()
            .map(Self::parse_anchor)
            .transpose()?;

        Ok(Self {
            title: file_config
                .title
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            author: file_config.author,
            base_url: file_config.base_url,
            date: DateConfig {
                locale: date.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
                options: date.options.unwrap_or_else(FormatOptions::long_date),
            },
            age_anchor,
            nav: file_config
                .nav
                .filter(|links| !links.is_empty())
                .unwrap_or_else(default_links),
        })
    }

    /// Project-local first, then XDG, then the platform's native config dir.
    /// - `./site.toml`
    /// - `~/.config/sitedate/site.toml`
    /// - macOS: `~/Library/Application Support/sitedate/site.toml`
    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = vec![PathBuf::from("site.toml")];
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("sitedate").join("site.toml");
            v.push(xdg);
            let native = b.config_dir().join("sitedate").join("site.toml");
            if !v.contains(&native) {
                v.push(native);
            }
        }
        v
    }

    /// Path of the file `load()` would read, if any.
    pub fn config_file() -> Option<PathBuf> {
        if let Some(explicit) = env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(explicit));
        }
        Self::config_file_paths().into_iter().find(|p| p.exists())
    }

    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Parse a "%Y-%m-%d" string into NaiveDate.
    fn parse_anchor(s: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| anyhow!("age_anchor '{s}' is not a YYYY-MM-DD date: {e}"))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::options::{MonthStyle, NumericStyle, TextStyle};
    use std::io::Write;

    /// Test helper to create a `SiteConfig` for a given locale and options.
    ///
    /// This is the single source of truth for test configuration.
    /// If you add a field to `SiteConfig`, you only need to update it here.
    pub(crate) fn mk_config(locale: &str, options: FormatOptions) -> SiteConfig {
        SiteConfig {
            title: "Test blog".to_string(),
            author: Some("Tester".to_string()),
            base_url: None,
            date: DateConfig {
                locale: locale.to_string(),
                options,
            },
            age_anchor: NaiveDate::from_ymd_opt(2003, 9, 29),
            nav: default_links(),
        }
    }

    #[test]
    fn candidates_prioritize_local_then_xdg_then_native() {
        let c = super::SiteConfig::config_file_paths();
        assert_eq!(c.first(), Some(&PathBuf::from("site.toml")));
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b.home_dir().join(".config").join("sitedate").join("site.toml");
            assert_eq!(c.get(1), Some(&expected_xdg));
            let expected_native = b.config_dir().join("sitedate").join("site.toml");
            assert!(c.contains(&expected_native));
        }
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = SiteConfig::from_toml("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.date.locale, "en-US");
        assert_eq!(config.date.options, FormatOptions::long_date());
    }

    #[test]
    fn parse_full_file() {
        let toml = r#"
            title = "Notes from the field"
            author = "Sam"
            base_url = "https://example.com"
            age_anchor = "2003-09-29"

            [date]
            locale = "en-GB"

            [date.options]
            weekday = "short"
            year = "numeric"
            month = "short"
            day = "2-digit"

            [[nav]]
            label = "Home"
            href = "/"

            [[nav]]
            label = "Talks"
            href = "/talks"
        "#;
        let config = SiteConfig::from_toml(toml).unwrap();
        assert_eq!(config.title, "Notes from the field");
        assert_eq!(config.author.as_deref(), Some("Sam"));
        assert_eq!(config.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.age_anchor, NaiveDate::from_ymd_opt(2003, 9, 29));
        assert_eq!(config.date.locale, "en-GB");
        assert_eq!(config.date.options.weekday, Some(TextStyle::Short));
        assert_eq!(config.date.options.month, Some(MonthStyle::Short));
        assert_eq!(config.date.options.day, Some(NumericStyle::TwoDigit));
        assert_eq!(config.nav.len(), 2);
        assert_eq!(config.nav[1], NavLink::new("Talks", "/talks"));
    }

    #[test]
    fn options_table_replaces_defaults_entirely() {
        let toml = r#"
            [date.options]
            month = "short"
        "#;
        let config = SiteConfig::from_toml(toml).unwrap();
        assert_eq!(config.date.locale, "en-US");
        assert_eq!(config.date.options.month, Some(MonthStyle::Short));
        assert_eq!(config.date.options.year, None);
    }

    #[test]
    fn malformed_files_are_errors() {
        assert!(SiteConfig::from_toml("title = ").is_err());
        assert!(SiteConfig::from_toml("colour = \"blue\"").is_err());
        assert!(SiteConfig::from_toml("age_anchor = \"29/09/2003\"").is_err());
        assert!(SiteConfig::from_toml("[date.options]\nmonth = \"huge\"").is_err());
    }

    #[test]
    fn from_path_reads_the_file_and_names_it_in_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title = \"From disk\"").unwrap();
        let config = SiteConfig::from_path(file.path()).unwrap();
        assert_eq!(config.title, "From disk");

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("site.toml");
        let err = SiteConfig::from_path(&missing).unwrap_err();
        assert!(format!("{err:#}").contains("site.toml"));
    }

    #[test]
    fn mk_config_is_usable() {
        let config = mk_config("fr-FR", FormatOptions::default());
        assert_eq!(config.date.locale, "fr-FR");
        assert!(config.age_anchor.is_some());
    }
}
