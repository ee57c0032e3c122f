pub mod identify;
pub mod propedit;
pub mod runner;

pub use identify::TrackInspector;
pub use propedit::FlagMutator;
pub use runner::{ProcessRunner, ToolRunner};
