use crate::{cli::parse_date_arg, render::Renderer};
use anyhow::{Result, anyhow};
use chrono::Utc;
use sitedate_core::Site;

pub fn age_mode(at: Option<&str>, site: &Site, renderer: &Renderer) -> Result<()> {
    let now = match at {
        Some(raw) => parse_date_arg(raw).resolve(&site.formatter().zone())?,
        None => Utc::now(),
    };
    let age = site
        .age_at(now)
        .ok_or_else(|| anyhow!("no `age_anchor` set in the site configuration"))?;
    renderer.print_value(&age.to_string());
    Ok(())
}
