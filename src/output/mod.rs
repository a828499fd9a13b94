pub mod formatter;

pub use formatter::{
    format_age, format_stalled_detail, format_stalled_table, format_summary, should_use_colors,
};
