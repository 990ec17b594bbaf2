use clap::{Args, Parser, Subcommand};
use sitedate_core::{DateInput, FormatOptions, MonthStyle, NumericStyle, TextStyle};
use std::path::PathBuf;

use crate::render::ColorMode;

/// sitedate — format dates the way your site does
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Site configuration file. By default `./site.toml`, then `~/.config/sitedate/site.toml`.
    #[arg(long, global = true, env = "SITEDATE_CONFIG")]
    pub config: Option<PathBuf>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Log more (`-v` info, `-vv` debug). Logs go to stderr.
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Format a date with the site's settings (e.g. `sitedate format 2024-04-23 --month short`)
    Format(FormatArgs),
    /// Print the whole years elapsed since the configured `age_anchor`
    Age {
        /// Evaluate at this instant instead of now (e.g. `2025-09-29`)
        #[arg(long)]
        at: Option<String>,
    },
    /// List the navigation links
    Nav {
        /// Highlight the link active for this path (e.g. `/blog/my-post`)
        #[arg(long)]
        current: Option<String>,
    },
    /// Show the resolved site configuration
    Config {
        /// Only print the path of the configuration file in use
        #[arg(long, short)]
        path: bool,
    },
}

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Epoch milliseconds when all digits (`1713830400000`, `0`), otherwise an ISO-8601 date
    /// (`2024-04-23T10:00:00Z`). Write a bare year as `2024-01` or `2024-01-01`.
    #[arg(allow_hyphen_values = true)]
    pub input: String,
    /// long, short or narrow
    #[arg(long)]
    pub weekday: Option<TextStyle>,
    /// numeric or 2-digit
    #[arg(long)]
    pub year: Option<NumericStyle>,
    /// numeric, 2-digit, long, short or narrow
    #[arg(long)]
    pub month: Option<MonthStyle>,
    /// numeric or 2-digit
    #[arg(long)]
    pub day: Option<NumericStyle>,
    #[arg(long)]
    pub hour: Option<NumericStyle>,
    #[arg(long)]
    pub minute: Option<NumericStyle>,
    #[arg(long)]
    pub second: Option<NumericStyle>,
    /// Force a 12-hour (`true`) or 24-hour (`false`) clock
    #[arg(long)]
    pub hour12: Option<bool>,
    /// `UTC`, `local` or an offset like `+02:00`
    #[arg(long)]
    pub time_zone: Option<String>,
}

impl FormatArgs {
    /// The per-call overrides, or `None` when no option flag was given.
    pub fn overrides(&self) -> Option<FormatOptions> {
        let overrides = FormatOptions {
            weekday: self.weekday,
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            hour12: self.hour12,
            time_zone: self.time_zone.clone(),
        };
        (overrides != FormatOptions::default()).then_some(overrides)
    }

    pub fn date_input(&self) -> DateInput {
        parse_date_arg(&self.input)
    }
}

/// An all-digit argument (optionally signed) is epoch milliseconds; anything else is ISO text.
pub fn parse_date_arg(raw: &str) -> DateInput {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(millis) => DateInput::EpochMillis(millis),
        Err(_) => DateInput::Iso(trimmed.to_string()),
    }
}
