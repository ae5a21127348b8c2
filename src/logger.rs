use anyhow::Result;
use flexi_logger::{Logger, LoggerHandle};

/// `RUST_LOG` wins over `level` when set. Keep the handle alive for the
/// lifetime of the process.
pub fn init_logger(level: &str) -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(flexi_logger::detailed_format)
        .start()?;

    Ok(handle)
}
