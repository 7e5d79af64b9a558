use serde::{Deserialize, Serialize};
use time::Date;

use super::ProjectId;

/// A task. Reports only ever count these, they are never rendered
/// individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub completed: bool,
    /// Due date.
    #[serde(default)]
    pub date: Option<Date>,
}
