use std::sync::Arc;

use anyhow::Result;
use log::*;

use crate::abstractions::*;
use crate::item_catalog::ItemCatalog;
use crate::models::Report;
use crate::options::ParserOptions;
use crate::rate_limiter::RateLimiter;
use crate::report_parser::ReportParser;

/// Loads the item catalog, then aggregates `report_id` against the live API.
pub async fn parse_report(options: &ParserOptions, report_id: &str) -> Result<Report> {
    let source = DirectoryCatalogSource::new(options.item_data_path.clone());
    let catalog = ItemCatalog::load(&source)?;

    let api = DefaultReportApi::new(options);
    let limiter = RateLimiter::new(options.requests_per_window, options.window);

    let parser = ReportParser::new(Arc::new(api), Arc::new(catalog), Arc::new(limiter));
    let report = parser.parse_report(report_id).await?;

    let started_on = report.started_on().map(|at| at.to_rfc3339()).unwrap_or_default();

    info!(
        "parsed {} ({}) started on {} with {} characters",
        report.report_id,
        report.title,
        started_on,
        report.characters.len()
    );

    Ok(report)
}
