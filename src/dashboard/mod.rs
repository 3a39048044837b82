//! Dashboard module
//!
//! Provides the month summaries behind the dashboard: sales statistics, a
//! price-range histogram and a per-category breakdown.

mod aggregation;
mod handlers;
mod transaction;

pub use handlers::{
    get_bar_chart_endpoint, get_combined_data_endpoint, get_pie_chart_endpoint,
    get_statistics_endpoint,
};
