use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::Date;

use super::serde_utils;

/// A validated project identifier.
///
/// Wraps i32 to match the database SERIAL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(i32);

impl ProjectId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ProjectId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<ProjectId> for i32 {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

/// Status vocabulary of the planning board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PlanningStatus {
    Idea,
    Planning,
    Development,
    Testing,
    Launching,
    Launched,
}

/// Status vocabulary of the reporting screen.
///
/// Kept separate from [`PlanningStatus`]: the two screens grew distinct
/// vocabularies, and the report tally only understands this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReportingStatus {
    Active,
    Review,
    Completed,
    OnHold,
    Cancelled,
}

/// A project status in either vocabulary.
///
/// The two sets share no value, so parsing is unambiguous. Projects in a
/// planning state count toward report totals but land in no status bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectStatus {
    Reporting(ReportingStatus),
    Planning(PlanningStatus),
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Planning(PlanningStatus::Idea)
    }
}

impl FromStr for ProjectStatus {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<ReportingStatus>()
            .map(Self::Reporting)
            .or_else(|_| s.parse::<PlanningStatus>().map(Self::Planning))
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reporting(status) => status.fmt(f),
            Self::Planning(status) => status.fmt(f),
        }
    }
}

/// A user-managed external link on a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLink {
    pub title: String,
    pub url: String,
}

/// A project record as held by the entity store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Display color token, also used as a chart grouping key.
    #[serde(default)]
    pub color: Option<String>,
    /// Percent complete, 0..=100. The reporting screen historically
    /// serialized this field as `customProgress`.
    #[serde(default, alias = "customProgress")]
    pub progress: i32,
    #[serde(default)]
    pub start_date: Option<Date>,
    /// Drives the days-remaining computation. `targetDate` on some wires.
    #[serde(default, alias = "targetDate")]
    pub end_date: Option<Date>,
    /// Legacy rows store this as a JSON-encoded string.
    #[serde(default, deserialize_with = "serde_utils::lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<ProjectLink>,
}
