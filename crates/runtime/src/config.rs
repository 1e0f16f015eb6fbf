pub const PROGRAM_NAME: &str = "ftpdeploy";
pub const PROGRAM_LOG_LEVEL: &str = "FTPDEPLOY_LOG_LEVEL";

// Connection settings read when not given on the command line.
pub const HOST_ENV: &str = "FTPDEPLOY_HOST";
pub const PORT_ENV: &str = "FTPDEPLOY_PORT";
pub const USER_ENV: &str = "FTPDEPLOY_USER";
pub const PASSWORD_ENV: &str = "FTPDEPLOY_PASSWORD";
/// Combined `user;password`, as the original deploy scripts pass it.
pub const CREDENTIALS_ENV: &str = "FTPDEPLOY_CREDENTIALS";

pub const DEFAULT_FTP_PORT: u16 = 21;
pub const DEFAULT_USER: &str = "anonymous";
pub const DEFAULT_PASSWORD: &str = "anonymous@";

/// Remote directory holding one sub-directory per deployed project.
pub const DEFAULT_REMOTE_ROOT: &str = "software";

/// Never uploaded from a local artifact directory.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git/",
    ".hg/",
    ".svn/",
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
];

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
