pub mod output;
pub mod progress;

pub use output::{OutputFormatter, OutputMode, ProgressAwareOutput, COMPLETION_MESSAGE};
pub use progress::ProgressManager;
