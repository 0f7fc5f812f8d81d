//! Match configuration.
//!
//! A `MatchConfig` carries everything needed to set up a match: the variant,
//! who places first, whether player 2 is a human or the computer, and an
//! optional RNG seed for reproducible computer play. The driver builds one
//! from `setoption` values; library callers construct it directly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::{PlayerId, Variant};
use crate::error::SetupError;
use crate::player::Controller;

/// Option names understood by `MatchConfig::from_options`.
pub const OPTION_VARIANT: &str = "Variant";
pub const OPTION_FIRST_PLAYER: &str = "FirstPlayer";
pub const OPTION_OPPONENT: &str = "Opponent";
pub const OPTION_SEED: &str = "Seed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub variant: Variant,
    pub starting_player: PlayerId,
    /// Controller of player 2. Player 1 is always human.
    pub opponent: Controller,
    /// Seed for the computer's random choices; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            variant: Variant::NineMen,
            starting_player: PlayerId::One,
            opponent: Controller::Computer,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn new(variant: Variant, starting_player: PlayerId, opponent: Controller) -> Self {
        MatchConfig {
            variant,
            starting_player,
            opponent,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds a config from string options, falling back to the defaults for
    /// anything unset. A `Seed` of 0 or an unparsable seed means entropy.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, SetupError> {
        let mut config = MatchConfig::default();
        if let Some(v) = options.get(OPTION_VARIANT) {
            config.variant = v.parse()?;
        }
        if let Some(v) = options.get(OPTION_FIRST_PLAYER) {
            config.starting_player = v.parse()?;
        }
        if let Some(v) = options.get(OPTION_OPPONENT) {
            config.opponent = v.parse()?;
        }
        config.seed = options
            .get(OPTION_SEED)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&s| s != 0);
        Ok(config)
    }
}
