//! Registration entry - a parsed free-text registration submission

use serde::{Deserialize, Serialize};

/// One registration, parsed from the fixed four-field message template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEntry {
    pub display_name: String,
    pub profession: String,
    pub level: u32,
    pub power: u64,
    pub available_time: String,
}

impl RegistrationEntry {
    /// The sheet row layout: display name first so duplicate detection
    /// only has to scan column zero.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.display_name.clone(),
            self.profession.clone(),
            self.level.to_string(),
            self.power.to_string(),
            self.available_time.clone(),
        ]
    }
}
