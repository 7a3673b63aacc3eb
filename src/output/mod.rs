pub mod formatter;

pub use formatter::{
    format_breakdown, format_dashboard, format_json, format_profile, format_recommendations,
    rule, should_use_colors,
};
