use serde::{Deserialize, Serialize};
use time::Date;

use super::{serde_utils, ProjectId, SpendCategory};

/// An individual outflow. Many expenses roll up into a project's spent
/// total during reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i32,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub category: SpendCategory,
    /// Amount in the smallest currency unit.
    #[serde(default, deserialize_with = "serde_utils::lenient_amount")]
    pub amount: i64,
    #[serde(default)]
    pub date: Option<Date>,
}
