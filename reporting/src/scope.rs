use std::fmt;
use std::str::FromStr;

use crate::domain::ProjectId;

/// The subset of projects a report is computed over: every project, or one
/// specific project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportScope {
    #[default]
    All,
    Project(ProjectId),
}

impl ReportScope {
    pub fn includes(&self, id: ProjectId) -> bool {
        match self {
            Self::All => true,
            Self::Project(scoped) => *scoped == id,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid report scope `{0}`, expected \"all\" or a project id")]
pub struct ParseReportScopeError(String);

impl FromStr for ReportScope {
    type Err = ParseReportScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<i32>()
            .map(|id| Self::Project(ProjectId::new(id)))
            .map_err(|_| ParseReportScopeError(s.to_string()))
    }
}

impl fmt::Display for ReportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Project(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_and_ids() {
        assert_eq!("all".parse::<ReportScope>().unwrap(), ReportScope::All);
        assert_eq!("ALL".parse::<ReportScope>().unwrap(), ReportScope::All);
        assert_eq!(
            "42".parse::<ReportScope>().unwrap(),
            ReportScope::Project(ProjectId::new(42))
        );
        assert!("everything".parse::<ReportScope>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for scope in [ReportScope::All, ReportScope::Project(ProjectId::new(7))] {
            assert_eq!(scope.to_string().parse::<ReportScope>().unwrap(), scope);
        }
    }

    #[test]
    fn includes_matches_scope() {
        let id = ProjectId::new(3);
        assert!(ReportScope::All.includes(id));
        assert!(ReportScope::Project(id).includes(id));
        assert!(!ReportScope::Project(ProjectId::new(4)).includes(id));
    }
}
