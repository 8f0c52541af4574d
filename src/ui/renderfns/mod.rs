pub mod header;
pub mod utils;

pub use header::{render_header, section, title};
pub use utils::{field, or_dash, percent, truncate, yes_no};
