use crate::construction::BuildKind;
use crate::province::ProvinceIndex;
use serde::{Deserialize, Serialize};

/// Commands issued on behalf of one country for one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInputs {
    /// Country name
    pub country: String,
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    StartConstruction {
        kind: BuildKind,
        province: ProvinceIndex,
    },
}
