//! Server configuration.

use std::net::SocketAddr;

use crate::inspect::InspectConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub addr: SocketAddr,
    /// Inspection engine configuration
    pub inspect: InspectConfig,
    /// Permissive CORS on responses (the scan endpoint is called
    /// cross-origin by dashboards)
    pub cors_enabled: bool,
    /// Enable request logging
    pub logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".parse().unwrap(),
            inspect: InspectConfig::default(),
            cors_enabled: true,
            logging: true,
        }
    }
}

impl ServerConfig {
    /// Create with custom port
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr = SocketAddr::new(self.addr.ip(), port);
        self
    }

    /// Bind to all interfaces
    pub fn bind_all(mut self) -> Self {
        let port = self.addr.port();
        self.addr = format!("0.0.0.0:{port}").parse().unwrap();
        self
    }

    /// Set address directly
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Set the inspection configuration
    pub fn with_inspect(mut self, inspect: InspectConfig) -> Self {
        self.inspect = inspect;
        self
    }

    /// Disable CORS
    pub fn without_cors(mut self) -> Self {
        self.cors_enabled = false;
        self
    }

    /// Disable logging
    pub fn without_logging(mut self) -> Self {
        self.logging = false;
        self
    }
}
