pub mod catalog_source;
pub mod report_api;

pub use catalog_source::*;
pub use report_api::*;
