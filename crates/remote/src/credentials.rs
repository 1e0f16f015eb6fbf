use ftpdeploy_runtime::{DEFAULT_FTP_PORT, DEFAULT_PASSWORD, DEFAULT_USER};

/// User name and password for the control connection.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Parse the combined `user;password` form.
    ///
    /// Only the first `;` separates, so passwords may contain `;`. Without a
    /// separator the whole value is the user and the password is the
    /// anonymous default. An empty user falls back to the anonymous user.
    pub fn parse(combined: &str) -> Self {
        let (user, password) = match combined.split_once(';') {
            Some((user, password)) => (user.trim(), password),
            None => (combined.trim(), DEFAULT_PASSWORD),
        };
        let user = if user.is_empty() { DEFAULT_USER } else { user };
        Self::new(user, password)
    }

    pub fn anonymous() -> Self {
        Self::new(DEFAULT_USER, DEFAULT_PASSWORD)
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::anonymous()
    }
}

// Keep passwords out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Where and how to connect.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub credentials: Credentials,
    /// Passive data connections; needed behind most NAT and firewalls.
    pub passive: bool,
    /// Explicit FTPS (`AUTH TLS`) before login.
    pub use_tls: bool,
}

impl ConnectOptions {
    pub fn new(host: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_FTP_PORT,
            credentials,
            passive: true,
            use_tls: false,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `ftp://user@host[:port]`, never including the password.
    pub fn display_name(&self) -> String {
        let scheme = if self.use_tls { "ftps" } else { "ftp" };
        if self.port != DEFAULT_FTP_PORT {
            format!(
                "{}://{}@{}:{}",
                scheme, self.credentials.user, self.host, self.port
            )
        } else {
            format!("{}://{}@{}", scheme, self.credentials.user, self.host)
        }
    }
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
