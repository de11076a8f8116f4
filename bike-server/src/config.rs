//! Skill-level configuration.

use crate::dialogue::InputMode;
use crate::select::SelectionPolicy;

/// Configuration for the station finder skill.
#[derive(Debug, Clone)]
pub struct SkillConfig {
    /// How many nearest stations to persist with an address.
    pub closest_stations_k: usize,

    /// Availability announcement policy.
    pub selection: SelectionPolicy,

    /// How the acquisition dialogue collects an address.
    pub input_mode: InputMode,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            closest_stations_k: 5,
            selection: SelectionPolicy::default(),
            input_mode: InputMode::Structured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SkillConfig::default();

        assert_eq!(config.closest_stations_k, 5);
        assert_eq!(config.selection.low_threshold, 3);
        assert_eq!(config.selection.max_additional, 2);
        assert_eq!(config.input_mode, InputMode::Structured);
    }
}
