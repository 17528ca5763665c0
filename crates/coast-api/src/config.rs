use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use coast_core::error::check_dimensions;
use coast_core::field::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

use crate::error::ApiError;

/// Service-wide settings. Loaded from JSON; missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Grid width for every rendered or reduced field.
    pub width: usize,
    pub height: usize,
    /// Fixed seed; every request replays the same draws when set.
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        let config: Self = serde_json::from_str(json).map_err(ApiError::Config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        check_dimensions(self.width, self.height)?;
        Ok(())
    }

    /// Fresh generator for one request.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
