/*!
Objectives --- per-state scoring functions used to rank candidates during search.

Each contributed [Objective] scores one model state; [SumObjective] combines every registered objective into the single scalar consulted by the external search driver.
Objectives are expected to be pre-scaled by their producers: the aggregate is the plain sum, with no tie-break beyond it.
*/

use std::sync::Arc;

use crate::db::model::Model;

/// A per-state scoring function.
///
/// Pure in the model state: the aggregator holds no mutable state beyond the registration list.
pub trait Objective: Send + Sync {
    fn value(&self, model: &Model) -> f64;
}

/// The sum of every registered objective, in registration order.
pub struct SumObjective {
    objectives: Vec<Arc<dyn Objective>>,
}

impl SumObjective {
    /// Combines the given objectives.
    /// Returns nothing for an empty registration list, so the search driver falls back to its own default.
    pub fn sum(objectives: Vec<Arc<dyn Objective>>) -> Option<SumObjective> {
        if objectives.is_empty() {
            return None;
        }
        Some(SumObjective { objectives })
    }

    pub fn value(&self, model: &Model) -> f64 {
        self.objectives
            .iter()
            .map(|objective| objective.value(model))
            .sum()
    }

    /// The number of combined objectives.
    pub fn terms(&self) -> usize {
        self.objectives.len()
    }
}
