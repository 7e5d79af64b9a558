use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::Date;

use super::{serde_utils, ProjectId};

/// Spending category shared by budget lines and expenses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SpendCategory {
    Development,
    Hosting,
    Marketing,
    Tools,
    Design,
    Domain,
    #[default]
    Other,
}

/// Direction of a budget line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BudgetKind {
    #[default]
    Expense,
    Income,
}

/// A budget line.
///
/// `spent` is user-maintained and independent of `amount`; the store never
/// enforces `spent <= amount`. Report rollups sum expense rows instead of
/// reading this field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i32,
    /// A budget line may be unlinked from any project.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    pub name: String,
    /// Planned amount in the smallest currency unit.
    #[serde(default, deserialize_with = "serde_utils::lenient_amount")]
    pub amount: i64,
    /// Actual-to-date, user-edited.
    #[serde(default, deserialize_with = "serde_utils::lenient_amount")]
    pub spent: i64,
    #[serde(default)]
    pub category: SpendCategory,
    #[serde(rename = "type", default)]
    pub kind: BudgetKind,
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_coerces_string_amounts() {
        let budget: Budget = serde_json::from_str(
            r#"{"id": 1, "name": "Launch", "amount": "1000000", "spent": "not a number"}"#,
        )
        .unwrap();
        assert_eq!(budget.amount, 1_000_000);
        assert_eq!(budget.spent, 0);
    }

    #[test]
    fn budget_kind_uses_type_on_the_wire() {
        let budget: Budget =
            serde_json::from_str(r#"{"id": 1, "name": "Retainer", "type": "income"}"#).unwrap();
        assert_eq!(budget.kind, BudgetKind::Income);

        let json = serde_json::to_value(&budget).unwrap();
        assert_eq!(json["type"], "income");
    }

    #[test]
    fn unknown_fields_default_safely() {
        let budget: Budget = serde_json::from_str(r#"{"id": 2, "name": "Misc"}"#).unwrap();
        assert_eq!(budget.category, SpendCategory::Other);
        assert_eq!(budget.kind, BudgetKind::Expense);
        assert_eq!(budget.project_id, None);
    }
}
