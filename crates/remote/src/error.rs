use thiserror::Error;

/// Failure talking to the remote server.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Classify an FTP reply code that ended a command.
pub(crate) fn from_reply(code: u32, body: String) -> RemoteError {
    match code {
        530 => RemoteError::Auth(format!("login incorrect: {body}")),
        550 => RemoteError::NotFound(body),
        451 | 553 => RemoteError::PermissionDenied(body),
        _ => RemoteError::Other(format!("FTP error {code}: {body}")),
    }
}
