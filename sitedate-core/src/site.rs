//! The process-wide site: configuration plus the cached default formatter.
//!
//! The site is installed at most once (explicitly via [`install`], or lazily
//! from [`SiteConfig::load`] on the first call to [`global`]) and never
//! changes afterwards, so any number of threads can read it without locking.

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;

use crate::age;
use crate::config::SiteConfig;
use crate::error::FormatError;
use crate::formatter::DateFormatter;
use crate::input::DateInput;
use crate::nav::{self, NavLink};
use crate::options::FormatOptions;

static SITE: OnceCell<Site> = OnceCell::new();

#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    formatter: DateFormatter,
}

impl Site {
    /// Builds the default formatter from `config.date`. A bad locale or time
    /// zone fails here rather than on the first formatted date.
    pub fn new(config: SiteConfig) -> Result<Self, FormatError> {
        let formatter = DateFormatter::new(&config.date.locale, config.date.options.clone())?;
        Ok(Self { config, formatter })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// The cached formatter for `config.date`.
    pub fn formatter(&self) -> &DateFormatter {
        &self.formatter
    }

    /// Formats `input` with the site's date settings, or with those settings
    /// shallow-merged with `overrides` when given.
    pub fn format(
        &self,
        input: impl Into<DateInput>,
        overrides: Option<&FormatOptions>,
    ) -> Result<String, FormatError> {
        match overrides {
            None => self.formatter.format(input),
            Some(overrides) => self.formatter.format_with(input, overrides),
        }
    }

    /// Whole years since `age_anchor`, or `None` when no anchor is configured.
    pub fn age(&self) -> Option<i64> {
        self.age_at(Utc::now())
    }

    pub fn age_at(&self, now: DateTime<Utc>) -> Option<i64> {
        self.config
            .age_anchor
            .map(|anchor| age::age_at(anchor, now))
    }

    pub fn nav(&self) -> &[NavLink] {
        &self.config.nav
    }

    pub fn active_link(&self, path: &str) -> Option<&NavLink> {
        nav::active_link(&self.config.nav, path)
    }
}

/// Installs `config` as the process-wide site. Fails if a site is already installed.
pub fn install(config: SiteConfig) -> Result<&'static Site> {
    let site = Site::new(config)?;
    if SITE.set(site).is_err() {
        bail!("site configuration is already installed");
    }
    log::info!("installed site configuration");
    global()
}

/// The installed site, loading `SiteConfig::load()` on first use.
pub fn global() -> Result<&'static Site> {
    SITE.get_or_try_init(|| {
        let config = SiteConfig::load()?;
        log::info!("initializing site configuration for locale {}", config.date.locale);
        Ok(Site::new(config)?)
    })
}

/// Formats a date with the global site's settings. See [`Site::format`].
pub fn format_date(input: impl Into<DateInput>, overrides: Option<&FormatOptions>) -> Result<String> {
    Ok(global()?.format(input, overrides)?)
}
