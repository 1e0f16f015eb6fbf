mod excludes;
mod record;
mod walker;

pub use excludes::{IgnoreEngine, IgnoreOptions};
pub use record::LocalRecord;
pub use walker::collect_artifact;
