use crate::CONFY_APP_NAME;

use serde::{Deserialize, Serialize};

/// Options for the `semodel-info` inspector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectSettings {
    pub pretty: bool,
    /// Dump every bone, vertex and face instead of a summary.
    pub full_dump: bool,
    pub strip_degenerate_faces: bool,
}

impl Default for InspectSettings {
    fn default() -> Self {
        Self {
            pretty: true,
            full_dump: false,
            strip_degenerate_faces: false,
        }
    }
}

impl InspectSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "inspect").unwrap_or_default()
    }
}
