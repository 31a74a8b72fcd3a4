//! Utility modules supporting a harvest run.
//!
//! - [`init_logging`]: install console and error-file logging, returning a [`LogHandle`]
//! - [`HarvestProgress`]: page and result progress bars

mod logging;
mod progress;

pub use logging::{
    error_file_layer, error_log_writer, init_logging, log_filter, LogHandle, LoggingError,
    ERROR_LOG_FILE,
};
pub use progress::HarvestProgress;
