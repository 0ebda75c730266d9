//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Save the built-in prompts into empty slots at startup
    #[serde(default = "default_seed_default_prompts")]
    pub seed_default_prompts: bool,

    /// Show detailed error messages (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            seed_default_prompts: default_seed_default_prompts(),
            verbose_errors: false,
        }
    }
}

fn default_seed_default_prompts() -> bool {
    true
}
