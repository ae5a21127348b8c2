#[cfg(test)]
mod test_utils;

pub mod abstractions;
pub mod constants;
pub mod error;
pub mod gear;
pub mod item_catalog;
pub mod logger;
pub mod models;
pub mod options;
pub mod payloads;
pub mod rate_limiter;
pub mod report_parser;
pub mod report_view;
pub mod start;
pub mod stat_tree;

pub use error::ReportError;
pub use options::ParserOptions;
pub use start::parse_report;
