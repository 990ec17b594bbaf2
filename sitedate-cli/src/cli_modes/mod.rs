mod age_mode;
mod config_mode;
mod format_mode;
mod nav_mode;

pub use age_mode::age_mode;
pub use config_mode::config_mode;
pub use format_mode::format_mode;
pub use nav_mode::nav_mode;
