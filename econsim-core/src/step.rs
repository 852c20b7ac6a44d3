use crate::construction::ConstructionError;
use crate::input::{Command, PlayerInputs};
use crate::state::WorldState;
use thiserror::Error;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Unknown country: {0}")]
    UnknownCountry(String),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Advance the world by one tick.
///
/// Commands are executed first, then every country runs its daily tick in list
/// order. A failing command is logged and skipped; it never aborts the tick.
#[instrument(skip_all, name = "step_world")]
pub fn step_world(state: &WorldState, inputs: &[PlayerInputs]) -> WorldState {
    let mut new_state = state.clone();

    // 1. Advance day
    new_state.day += 1;

    // 2. Process inputs
    for player_input in inputs {
        for cmd in &player_input.commands {
            if let Err(e) = execute_command(&mut new_state, &player_input.country, cmd) {
                log::warn!(
                    "Failed to execute command for {}: {}",
                    player_input.country,
                    e
                );
            }
        }
    }

    // 3. Tick countries (independent, fixed order)
    for country in &mut new_state.countries {
        country.simulate_day();
    }

    new_state
}

/// Execute a single command against the named country.
pub fn execute_command(
    state: &mut WorldState,
    country_name: &str,
    cmd: &Command,
) -> Result<(), ActionError> {
    let country = state
        .country_mut(country_name)
        .ok_or_else(|| ActionError::UnknownCountry(country_name.to_string()))?;

    match *cmd {
        Command::StartConstruction { kind, province } => {
            country.start_construction(kind, province)?;
            Ok(())
        }
    }
}
