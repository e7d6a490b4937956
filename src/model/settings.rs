use serde::{Deserialize, Serialize};

/// Player display preferences. Read by formatting and the shell only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scientific_notation: bool,
    pub particle_effects: bool,
    pub confirm_before_ascend: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scientific_notation: false,
            particle_effects: true,
            confirm_before_ascend: true,
        }
    }
}
