//! Display formatting helpers shared by dashboard-facing consumers.

pub mod num;
pub mod text;
pub mod time;

pub use num::{format_number, format_number_with_suffix, round_up_2dp};
pub use text::truncate_string;
pub use time::format_relative_time;
