//! Listener Config

use clap::Args;

/// Port the bakehouse API listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 4080;

/// Address the API binds to.
#[derive(Debug, Args)]
pub struct ListenConfig {
    /// Interface to bind, all interfaces by default
    #[arg(short = 'H', long, env = "BAKEHOUSE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "BAKEHOUSE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ListenConfig {
    /// `host:port` for the listener; IPv6 hosts are bracketed.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
