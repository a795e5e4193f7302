//! Support for library configuration options

use std::error::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use chrono::Duration;
use once_cell::sync::Lazy;

use crate::reminder::NotificationOptions;

/// How many minutes before an event its reminder fires, unless told otherwise
pub const DEFAULT_MINUTES_BEFORE: u32 = 5;

/// How long after "now" a reminder fires when it is too late to fire it at its regular time
pub const DEFAULT_FALLBACK_DELAY_SECS: u32 = 1;

/// The title of every reminder notification.
/// Feel free to override it when initing this library.
pub static NOTIFICATION_TITLE: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("Event starting soon".to_string())));


/// Tunable reminder parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    pub minutes_before: u32,
    pub fallback_delay_secs: u32,
    pub permission_options: NotificationOptions,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            minutes_before: DEFAULT_MINUTES_BEFORE,
            fallback_delay_secs: DEFAULT_FALLBACK_DELAY_SECS,
            permission_options: NotificationOptions::default(),
        }
    }
}

impl ReminderConfig {
    /// Read a config from a JSON file. Missing fields take their default values
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let config = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::seconds(i64::from(self.fallback_delay_secs))
    }
}
