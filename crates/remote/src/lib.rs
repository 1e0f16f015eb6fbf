mod client;
mod credentials;
mod error;
mod ftp;

pub use client::{RemoteClient, join_remote};
pub use credentials::{ConnectOptions, Credentials};
pub use error::{RemoteError, RemoteResult};
pub use ftp::FtpRemote;
