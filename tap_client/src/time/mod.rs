pub mod format;

pub use format::{format_duration, format_significant, pretty_print_time};
