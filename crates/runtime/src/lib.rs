mod config;
pub mod logging;

pub use config::{
    CREDENTIALS_ENV, DEFAULT_FTP_PORT, DEFAULT_IGNORE_PATTERNS, DEFAULT_PASSWORD,
    DEFAULT_REMOTE_ROOT, DEFAULT_USER, HOST_ENV, PASSWORD_ENV, PORT_ENV, PROGRAM_LOG_LEVEL,
    PROGRAM_NAME, USER_ENV,
};

pub use logging::init;
