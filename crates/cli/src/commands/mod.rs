pub mod connection;
pub mod deploy;
pub mod fetch;
pub mod list;

use clap::Subcommand;
pub use connection::ConnectionArgs;
pub use deploy::DeployArgs;
pub use fetch::FetchArgs;
pub use list::ListArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a build artifact into `<remote-root>/<project>` on the server.
    ///
    /// Example:
    ///   ftpdeploy deploy --host ftp.example.com --credentials 'bit;secret' bin/Release/App.exe
    ///   ftpdeploy deploy --replace --exclude '*.pdb' publish/Site
    Deploy(DeployArgs),

    /// Show a parsed remote directory listing.
    ///
    /// Example:
    ///   ftpdeploy list software
    ///   ftpdeploy list --dirs --json /
    List(ListArgs),

    /// Download one remote file.
    Fetch(FetchArgs),
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
