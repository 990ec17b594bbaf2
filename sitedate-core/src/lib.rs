pub mod age;
pub mod config;
pub mod error;
pub mod formatter;
pub mod input;
pub mod locale;
pub mod nav;
pub mod options;
pub mod site;
pub mod zone;

pub use config::{DateConfig, SiteConfig};
pub use error::FormatError;
pub use formatter::DateFormatter;
pub use input::DateInput;
pub use nav::NavLink;
pub use options::{FormatOptions, MonthStyle, NumericStyle, TextStyle};
pub use site::{Site, format_date};
