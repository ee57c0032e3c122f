pub mod deps;
pub mod logger;
pub mod reporter;

pub use deps::DependencyStatus;
pub use logger::init_logging;
pub use reporter::{Reporter, TracingReporter};
