use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Payload returned by the root endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
}

impl ServiceInfo {
    pub fn new(message: impl Into<String>, version: impl Into<String>) -> Self {
        Self { message: message.into(), version: version.into() }
    }
}
