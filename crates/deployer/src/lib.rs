mod deploy;
mod plan;

pub use deploy::{clear_remote_dir, deploy, fetch, list_remote};
pub use plan::{DeployPlan, DeployReport, project_name};
