//! Construction tasks and the per-country construction queue.
//!
//! A task is created by [`Country::start_construction`](crate::Country::start_construction)
//! and lives in the queue until its remaining build points reach zero. The
//! progression algorithm lives in [`systems::construction`](crate::systems::construction).

use crate::province::ProvinceIndex;
use crate::resources::StockpileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// What a construction task builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildKind {
    /// +1 infrastructure level in the target province.
    Infrastructure,
    /// +1 civilian factory in the target province.
    CivilianFactory,
    /// +1 military factory in the target province.
    MilitaryFactory,
    /// +1 refinery for the owning country.
    Refinery,
}

impl BuildKind {
    pub const ALL: [BuildKind; 4] = [
        BuildKind::Infrastructure,
        BuildKind::CivilianFactory,
        BuildKind::MilitaryFactory,
        BuildKind::Refinery,
    ];

    /// Short label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            BuildKind::Infrastructure => "INFRA",
            BuildKind::CivilianFactory => "CIV",
            BuildKind::MilitaryFactory => "MIL",
            BuildKind::Refinery => "REFINERY",
        }
    }
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when construction cannot be started.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("Province index {index} out of range (country has {province_count} provinces)")]
    InvalidProvince {
        index: ProvinceIndex,
        province_count: usize,
    },
    #[error("Cannot pay for {kind}: {source}")]
    InsufficientResources {
        kind: BuildKind,
        #[source]
        source: StockpileError,
    },
}

/// A unit of in-progress construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionTask {
    kind: BuildKind,
    province: ProvinceIndex,
    remaining_bp: f64,
    base_cost_bp: f64,
}

impl ConstructionTask {
    pub(crate) fn new(kind: BuildKind, province: ProvinceIndex, cost_bp: f64) -> Self {
        Self {
            kind,
            province,
            remaining_bp: cost_bp,
            base_cost_bp: cost_bp,
        }
    }

    pub fn kind(&self) -> BuildKind {
        self.kind
    }

    pub fn province(&self) -> ProvinceIndex {
        self.province
    }

    pub fn remaining_bp(&self) -> f64 {
        self.remaining_bp
    }

    pub fn base_cost_bp(&self) -> f64 {
        self.base_cost_bp
    }

    /// Completed fraction in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.base_cost_bp <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining_bp / self.base_cost_bp).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, epsilon: f64) -> bool {
        self.remaining_bp <= epsilon
    }

    /// Spends `bp` build points on this task. Remaining cost floors at zero.
    pub(crate) fn apply_progress(&mut self, bp: f64) {
        self.remaining_bp = (self.remaining_bp - bp).max(0.0);
    }
}

impl fmt::Display for ConstructionTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(prov={}, left={:.1}/{:.1})",
            self.kind, self.province, self.remaining_bp, self.base_cost_bp
        )
    }
}

/// Tasks in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructionQueue {
    tasks: Vec<ConstructionTask>,
}

impl ConstructionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task at the end of the queue.
    pub fn push(&mut self, task: ConstructionTask) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[ConstructionTask] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstructionTask> {
        self.tasks.iter()
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut [ConstructionTask] {
        &mut self.tasks
    }

    /// Removes and returns every task matching `is_done`, keeping the relative
    /// order of both the removed and the surviving tasks.
    pub(crate) fn drain_where<F>(&mut self, mut is_done: F) -> Vec<ConstructionTask>
    where
        F: FnMut(&ConstructionTask) -> bool,
    {
        let (done, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.tasks).into_iter().partition(|t| is_done(t));
        self.tasks = pending;
        done
    }
}

impl<'a> IntoIterator for &'a ConstructionQueue {
    type Item = &'a ConstructionTask;
    type IntoIter = std::slice::Iter<'a, ConstructionTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
