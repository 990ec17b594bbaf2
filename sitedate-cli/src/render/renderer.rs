use super::theme::OneDark;
use sitedate_core::{NavLink, SiteConfig};
use std::path::Path;
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

pub struct Renderer {
    skin: MadSkin,
    use_color: bool,
}

impl Renderer {
    pub fn new(use_color: bool) -> Self {
        Self {
            skin: OneDark::skin(),
            use_color,
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.use_color {
            self.skin.print_text(md);
        } else {
            println!("{md}");
        }
    }

    /// Boxed in color mode, plain otherwise.
    pub fn print_info(&self, message: &str) {
        if self.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    /// A bare value (formatted date, age) so scripts can capture stdout.
    pub fn print_value(&self, value: &str) {
        if self.use_color {
            println!("{}", value.with(Color::Cyan));
        } else {
            println!("{value}");
        }
    }

    pub fn print_nav(&self, links: &[NavLink], active: Option<&NavLink>) {
        if links.is_empty() {
            self.print_info("No navigation links configured.");
            return;
        }
        self.print_md(&nav_markdown(links, active));
    }

    pub fn print_config(&self, config: &SiteConfig, path: Option<&Path>) {
        self.print_md(&config_markdown(config, path));
    }
}

/// `* [Home](/)` per link, with the active one in bold.
pub fn nav_markdown(links: &[NavLink], active: Option<&NavLink>) -> String {
    links
        .iter()
        .map(|link| {
            if active == Some(link) {
                format!("* **{}** `{}`", link.label, link.href)
            } else {
                format!("* {} `{}`", link.label, link.href)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn config_markdown(config: &SiteConfig, path: Option<&Path>) -> String {
    let source = match path {
        Some(p) => format!("`{}`", p.display()),
        None => "*defaults*".to_string(),
    };
    let mut md = format!("# {}\n\n* source: {source}\n", config.title);
    if let Some(author) = &config.author {
        md.push_str(&format!("* author: {author}\n"));
    }
    if let Some(url) = &config.base_url {
        md.push_str(&format!("* url: `{url}`\n"));
    }
    md.push_str(&format!("* locale: `{}`\n", config.date.locale));
    md.push_str(&format!("* date options: `{:?}`\n", config.date.options));
    if let Some(anchor) = config.age_anchor {
        md.push_str(&format!("* age anchor: `{anchor}`\n"));
    }
    md.push_str(&format!("* nav links: {}\n", config.nav.len()));
    md
}
