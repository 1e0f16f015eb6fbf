use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::{debug, info};
use suppaftp::types::{FileType, Mode};
use suppaftp::{FtpError, FtpStream, NativeTlsConnector, NativeTlsFtpStream};

use crate::client::RemoteClient;
use crate::credentials::ConnectOptions;
use crate::error::{RemoteError, RemoteResult, from_reply};

/// Plain or TLS control connection.
enum Stream {
    Plain(FtpStream),
    Tls(NativeTlsFtpStream),
}

macro_rules! delegate {
    ($self:expr, $method:ident $(, $arg:expr)* $(,)?) => {
        match $self {
            Stream::Plain(s) => s.$method($($arg),*),
            Stream::Tls(s) => s.$method($($arg),*),
        }
    };
}

/// [`RemoteClient`] over a live FTP or FTPS session.
pub struct FtpRemote {
    stream: Option<Stream>,
    display_name: String,
}

impl FtpRemote {
    /// Connect, optionally upgrade to TLS, log in, and switch to binary mode.
    pub fn connect(opts: &ConnectOptions) -> RemoteResult<Self> {
        let addr = opts.address();
        let user = &opts.credentials.user;
        let password = &opts.credentials.password;
        let mode = if opts.passive {
            Mode::Passive
        } else {
            Mode::Active
        };

        debug!("[ftp] connecting to {addr}");

        let stream = if opts.use_tls {
            let tls = suppaftp::native_tls::TlsConnector::new()
                .map_err(|e| RemoteError::Connection(format!("TLS setup failed: {e}")))?;
            let mut ftp = NativeTlsFtpStream::connect(&addr)
                .map_err(map_ftp_error)?
                .into_secure(NativeTlsConnector::from(tls), &opts.host)
                .map_err(map_ftp_error)?;
            ftp.set_mode(mode);
            ftp.login(user, password).map_err(map_ftp_error)?;
            ftp.transfer_type(FileType::Binary).map_err(map_ftp_error)?;
            Stream::Tls(ftp)
        } else {
            let mut ftp = FtpStream::connect(&addr).map_err(map_ftp_error)?;
            ftp.set_mode(mode);
            ftp.login(user, password).map_err(map_ftp_error)?;
            ftp.transfer_type(FileType::Binary).map_err(map_ftp_error)?;
            Stream::Plain(ftp)
        };

        let display_name = opts.display_name();
        info!("[ftp] connected to {display_name}");

        Ok(Self {
            stream: Some(stream),
            display_name,
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Send `QUIT`. Later calls fail with a connection error.
    pub fn disconnect(&mut self) -> RemoteResult<()> {
        match self.stream.take() {
            Some(mut stream) => delegate!(&mut stream, quit).map_err(map_ftp_error),
            None => Ok(()),
        }
    }

    fn stream(&mut self) -> RemoteResult<&mut Stream> {
        self.stream
            .as_mut()
            .ok_or_else(|| RemoteError::Connection("FTP connection closed".to_string()))
    }
}

impl RemoteClient for FtpRemote {
    fn list(&mut self, path: &str) -> RemoteResult<String> {
        debug!("[ftp] LIST {path}");
        let path = if path.is_empty() { "/" } else { path };
        let lines = delegate!(self.stream()?, list, Some(path)).map_err(map_ftp_error)?;
        Ok(lines.join("\n"))
    }

    fn upload(&mut self, remote_path: &str, local_file: &Path) -> RemoteResult<u64> {
        debug!("[ftp] STOR {} <- {}", remote_path, local_file.display());
        let mut reader = File::open(local_file)?;
        delegate!(self.stream()?, put_file, remote_path, &mut reader).map_err(map_ftp_error)
    }

    fn download(&mut self, remote_path: &str, local_file: &Path) -> RemoteResult<u64> {
        debug!("[ftp] RETR {} -> {}", remote_path, local_file.display());
        let cursor = delegate!(self.stream()?, retr_as_buffer, remote_path).map_err(map_ftp_error)?;
        let data = cursor.into_inner();

        if let Some(parent) = local_file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(local_file)?;
        file.write_all(&data)?;

        Ok(data.len() as u64)
    }

    fn make_directory(&mut self, path: &str) -> RemoteResult<()> {
        debug!("[ftp] MKD {path}");
        delegate!(self.stream()?, mkdir, path).map_err(map_ftp_error)
    }

    fn remove_directory(&mut self, path: &str) -> RemoteResult<()> {
        debug!("[ftp] RMD {path}");
        delegate!(self.stream()?, rmdir, path).map_err(map_ftp_error)
    }

    fn delete(&mut self, path: &str) -> RemoteResult<()> {
        debug!("[ftp] DELE {path}");
        delegate!(self.stream()?, rm, path).map_err(map_ftp_error)
    }
}

impl Drop for FtpRemote {
    fn drop(&mut self) {
        let _ = self.disconnect();
    }
}

fn map_ftp_error(e: FtpError) -> RemoteError {
    match e {
        FtpError::ConnectionError(io) => RemoteError::Connection(io.to_string()),
        FtpError::SecureError(msg) => RemoteError::Connection(format!("TLS error: {msg}")),
        FtpError::UnexpectedResponse(resp) => {
            let body = String::from_utf8_lossy(&resp.body).trim().to_string();
            from_reply(resp.status.code(), body)
        }
        other => RemoteError::Other(other.to_string()),
    }
}
