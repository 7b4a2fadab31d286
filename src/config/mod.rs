//! # Configuration System
//!
//! Explicit, validated configuration for the tutorial engine. The test-mode
//! switch lives here and is threaded through the session coordinator at
//! construction time; there is no process-wide mutable flag.
//!
//! ## Usage
//!
//! ```rust
//! use trainer_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration (environment auto-detected, file optional)
//! let manager = ConfigManager::load()?;
//! let delay = manager.config().test_mode.dispatch_delay_ms;
//! # Ok(())
//! # }
//! ```

pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::system;

pub use loader::ConfigManager;

/// Root configuration structure for the tutorial engine
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Test-mode action simulation settings
    pub test_mode: TestModeConfig,

    /// Event stream settings
    pub events: EventConfig,
}

/// Test-mode action simulator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TestModeConfig {
    /// When true, every registered trigger also schedules a simulated dispatch
    pub enabled: bool,

    /// Delay before each simulated action dispatch, in milliseconds
    pub dispatch_delay_ms: u64,
}

/// Event stream configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EventConfig {
    /// Capacity of the broadcast channels carrying lifecycle events and messages
    pub channel_capacity: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            test_mode: TestModeConfig::default(),
            events: EventConfig::default(),
        }
    }
}

impl Default for TestModeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dispatch_delay_ms: system::DEFAULT_DISPATCH_DELAY_MS,
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            channel_capacity: system::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl TrainerConfig {
    /// Configuration with the simulator enabled and a short dispatch delay,
    /// suitable for automated tests that should not wait out real UI settle
    /// times.
    pub fn for_simulated_input(dispatch_delay: Duration) -> Self {
        Self {
            test_mode: TestModeConfig {
                enabled: true,
                dispatch_delay_ms: dispatch_delay.as_millis() as u64,
            },
            events: EventConfig::default(),
        }
    }

    /// Dispatch delay as a [`Duration`]
    pub fn dispatch_delay(&self) -> Duration {
        Duration::from_millis(self.test_mode.dispatch_delay_ms)
    }

    /// Validate configured values
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.events.channel_capacity == 0 {
            return Err(crate::error::TrainerError::Configuration(
                "events.channel_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
