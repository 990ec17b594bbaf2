use crate::render::Renderer;
use anyhow::Result;
use sitedate_core::Site;

pub fn nav_mode(current: Option<&str>, site: &Site, renderer: &Renderer) -> Result<()> {
    let active = current.and_then(|path| site.active_link(path));
    if let (Some(path), None) = (current, active) {
        log::info!("no navigation link is active for {path}");
    }
    renderer.print_nav(site.nav(), active);
    Ok(())
}
