pub mod job;
pub mod modify;
pub mod walker;

pub use modify::FileModifier;
pub use walker::DirectoryWalker;
