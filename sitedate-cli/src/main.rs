mod cli;
mod cli_modes;
mod logging;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use cli_modes::{age_mode, config_mode, format_mode, nav_mode};
use render::Renderer;
use sitedate_core::{SiteConfig, site};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sitedate: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    let renderer = Renderer::new(cli.color.use_color());

    let (config, source) = match &cli.config {
        Some(path) => (SiteConfig::from_path(path)?, Some(path.clone())),
        None => (SiteConfig::load()?, SiteConfig::config_file()),
    };
    let site = site::install(config)?;

    match &cli.command {
        Command::Format(args) => format_mode(args, site, &renderer),
        Command::Age { at } => age_mode(at.as_deref(), site, &renderer),
        Command::Nav { current } => nav_mode(current.as_deref(), site, &renderer),
        Command::Config { path } => config_mode(*path, source.as_deref(), site, &renderer),
    }
}
