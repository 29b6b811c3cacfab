//! The joined plugin dataset and its row type.

mod builder;
mod record;

pub use builder::PluginTable;
pub use record::{PluginCategory, PluginRecord, extract_github_url};
