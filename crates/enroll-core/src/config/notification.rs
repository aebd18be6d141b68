//! Notification emitter configuration.

use serde::{Deserialize, Serialize};

/// Notification emitter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Emitter type: `"log"` or `"broadcast"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Buffer size of the broadcast channel.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            buffer_size: default_buffer_size(),
        }
    }
}

fn default_provider() -> String {
    "log".to_string()
}

fn default_buffer_size() -> usize {
    256
}
