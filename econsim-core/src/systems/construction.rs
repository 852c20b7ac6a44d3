//! Construction queue progression.
//!
//! Each day the country's civilian output is split evenly across every queued
//! task, regardless of kind or remaining cost:
//!
//! ```text
//! civ_output = civilian_factories × civ_output_per_day
//! per_task   = civ_output / queue_len
//! remaining  = max(0, remaining - per_task)
//! ```
//!
//! Tasks whose remaining cost drops to the completion epsilon are removed and
//! their effect is applied once.

use crate::config::ConstructionConfig;
use crate::construction::{BuildKind, ConstructionQueue, ConstructionTask};
use crate::province::Province;
use tracing::instrument;

/// Advances every task by an equal share of `civ_output` and removes the ones
/// that finished. No progress is made when the queue is empty or `civ_output`
/// is zero, negative or NaN.
///
/// Returns the completed tasks in queue order. Effects are not applied here.
pub fn progress_queue(
    queue: &mut ConstructionQueue,
    civ_output: f64,
    epsilon: f64,
) -> Vec<ConstructionTask> {
    if queue.is_empty() || civ_output.is_nan() || civ_output <= 0.0 {
        return Vec::new();
    }

    let per_task = civ_output / queue.len() as f64;
    for task in queue.tasks_mut() {
        task.apply_progress(per_task);
    }

    queue.drain_where(|task| task.is_complete(epsilon))
}

/// Applies the one-time effect of a finished task.
///
/// Province targets are validated when the task is started; a task pointing at
/// a missing province is logged and dropped.
pub fn apply_completion(task: &ConstructionTask, provinces: &mut [Province], refineries: &mut u32) {
    if task.kind() == BuildKind::Refinery {
        *refineries = refineries.saturating_add(1);
        return;
    }

    let Some(province) = provinces.get_mut(task.province()) else {
        log::warn!(
            "Completed {} targets missing province {}",
            task.kind(),
            task.province()
        );
        return;
    };

    match task.kind() {
        BuildKind::Infrastructure => province.add_infrastructure(1),
        BuildKind::CivilianFactory => province.add_civilian_factories(1),
        BuildKind::MilitaryFactory => province.add_military_factories(1),
        BuildKind::Refinery => {}
    }
}

/// Runs one day of construction for a country.
///
/// `civilian_factories` is the country total read after production.
#[instrument(skip_all, name = "construction")]
pub fn run_construction_tick(
    queue: &mut ConstructionQueue,
    provinces: &mut [Province],
    refineries: &mut u32,
    civilian_factories: u32,
    config: &ConstructionConfig,
) -> Vec<ConstructionTask> {
    let civ_output = f64::from(civilian_factories) * config.civ_output_per_day;
    let completed = progress_queue(queue, civ_output, config.completion_epsilon);

    for task in &completed {
        apply_completion(task, provinces, refineries);
    }

    completed
}
