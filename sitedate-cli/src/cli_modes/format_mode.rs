use crate::{cli::FormatArgs, render::Renderer};
use anyhow::Result;
use sitedate_core::Site;

pub fn format_mode(args: &FormatArgs, site: &Site, renderer: &Renderer) -> Result<()> {
    let overrides = args.overrides();
    let formatted = site.format(args.date_input(), overrides.as_ref())?;
    renderer.print_value(&formatted);
    Ok(())
}
