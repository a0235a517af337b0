use crate::game::constants::{player, sim};

/// Host runner configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Seed for the deterministic spawn sequence
    pub seed: u32,
    /// Simulation rate in ticks per second
    pub tick_rate: u32,
    /// Maximum concurrent players in a round
    pub max_players: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            tick_rate: sim::TICK_RATE,
            max_players: player::MAX_COUNT,
        }
    }
}

impl SimConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(seed) = std::env::var("SIM_SEED") {
            if let Ok(parsed) = seed.parse::<u32>() {
                config.seed = parsed;
            } else {
                tracing::warn!("Invalid SIM_SEED '{}', using default", seed);
            }
        }

        if let Ok(rate) = std::env::var("TICK_RATE") {
            if let Ok(parsed) = rate.parse::<u32>() {
                if (1..=240).contains(&parsed) {
                    config.tick_rate = parsed;
                } else {
                    tracing::warn!("TICK_RATE must be 1-240, using default");
                }
            } else {
                tracing::warn!("Invalid TICK_RATE '{}', using default", rate);
            }
        }

        if let Ok(max) = std::env::var("MAX_PLAYERS") {
            if let Ok(parsed) = max.parse::<usize>() {
                if parsed > 0 {
                    config.max_players = parsed;
                } else {
                    tracing::warn!("MAX_PLAYERS must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid MAX_PLAYERS '{}', using default", max);
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_rate == 0 {
            return Err("tick_rate cannot be 0".to_string());
        }
        if self.max_players == 0 {
            return Err("max_players must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.seed, 1);
        assert_eq!(config.tick_rate, 20);
        assert_eq!(config.max_players, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_players() {
        let config = SimConfig {
            max_players: 0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
