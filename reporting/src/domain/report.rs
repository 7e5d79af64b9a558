use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ProjectId, SpendCategory};

/// The derived report view-model.
///
/// Computed on demand as a pure function of the current records and scope.
/// Never mutated in place; an archived copy is an immutable snapshot and
/// intentionally goes stale when the underlying records change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub total_projects: usize,
    pub active_projects: usize,
    pub review_projects: usize,
    pub completed_projects: usize,
    pub total_budget: i64,
    pub total_expenses: i64,
    /// May be negative.
    pub remaining_budget: i64,
    /// Exact percentage, not clamped to 100.
    pub budget_used_percent: f64,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub task_completion_rate: f64,
    pub project_details: Vec<ProjectDetail>,
    /// Only categories with at least one expense appear.
    pub expense_by_category: HashMap<SpendCategory, i64>,
}

/// One derived row per in-scope project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub project_id: ProjectId,
    pub name: String,
    pub budget_amount: i64,
    pub spent: i64,
    pub remaining: i64,
    pub progress: i32,
    /// Whole days until the end date; absent when the project has none.
    pub days_remaining: Option<i64>,
    pub is_over_budget: bool,
    pub is_overdue: bool,
}
