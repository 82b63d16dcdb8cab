pub mod formatter;

pub use formatter::{
    format_dimension_chart, format_notice, format_score_summary, format_score_tsv,
    format_valuation_chart, format_valuation_summary, should_use_colors, value_bar,
};
