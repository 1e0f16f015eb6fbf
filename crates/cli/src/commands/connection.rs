use anyhow::{Context, Result};
use clap::Args;
use ftpdeploy_remote::{ConnectOptions, Credentials, FtpRemote};
use ftpdeploy_runtime::{
    CREDENTIALS_ENV, DEFAULT_FTP_PORT, HOST_ENV, PASSWORD_ENV, PORT_ENV, USER_ENV,
};

#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// FTP server host name
    #[arg(long, env = HOST_ENV)]
    pub host: String,

    #[arg(long, env = PORT_ENV, default_value_t = DEFAULT_FTP_PORT)]
    pub port: u16,

    /// Combined `user;password`
    #[arg(long, env = CREDENTIALS_ENV, conflicts_with_all = ["user", "password"])]
    pub credentials: Option<String>,

    #[arg(long, env = USER_ENV)]
    pub user: Option<String>,

    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,

    /// Use explicit FTPS (AUTH TLS)
    #[arg(long)]
    pub tls: bool,

    /// Use active instead of passive data connections
    #[arg(long)]
    pub active: bool,
}

impl ConnectionArgs {
    pub fn credentials(&self) -> Credentials {
        if let Some(combined) = &self.credentials {
            return Credentials::parse(combined);
        }
        let anon = Credentials::anonymous();
        Credentials::new(
            self.user.clone().unwrap_or(anon.user),
            self.password.clone().unwrap_or(anon.password),
        )
    }

    pub fn options(&self) -> ConnectOptions {
        let mut opts = ConnectOptions::new(&self.host, self.credentials());
        opts.port = self.port;
        opts.use_tls = self.tls;
        opts.passive = !self.active;
        opts
    }

    pub fn connect(&self) -> Result<FtpRemote> {
        let opts = self.options();
        FtpRemote::connect(&opts)
            .with_context(|| format!("Failed to connect to {}", opts.display_name()))
    }
}
