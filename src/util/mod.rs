mod actions;
mod progress;
mod tracing;

pub use self::actions::report_failure;
pub use self::progress::UploadProgressBar;
pub use self::tracing::init as init_tracing;
