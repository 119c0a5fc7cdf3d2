use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "XML-RPC client";
pub const DEFAULT_RPC_PATH: &str = "xmlrpc.php";

/// Options for the XML-RPC transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Path of the RPC handler below each endpoint.
    pub rpc_path: String,

    /// User agent string
    pub user_agent: String,

    /// Overall timeout for one page request. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_path: DEFAULT_RPC_PATH.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
