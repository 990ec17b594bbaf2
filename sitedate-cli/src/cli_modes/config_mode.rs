use crate::render::Renderer;
use anyhow::Result;
use sitedate_core::Site;
use std::path::Path;

pub fn config_mode(
    path_only: bool,
    source: Option<&Path>,
    site: &Site,
    renderer: &Renderer,
) -> Result<()> {
    if path_only {
        match source {
            Some(p) => renderer.print_value(&p.display().to_string()),
            None => renderer.print_info("No configuration file found; using defaults."),
        }
        return Ok(());
    }
    renderer.print_config(site.config(), source);
    Ok(())
}
