pub mod fake_report_api;
pub mod gear_builder;
pub mod http_stub;
pub mod misc;
pub mod templates;

pub use fake_report_api::*;
pub use gear_builder::*;
pub use http_stub::*;
pub use misc::*;
pub use templates::*;
