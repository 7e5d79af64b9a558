//! The aggregation engine: turns raw project, budget, expense and task
//! records into a [`ReportData`] view-model.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use time::Date;

use crate::domain::{
    Budget, Expense, Project, ProjectDetail, ProjectId, ProjectStatus, ReportData,
    ReportingStatus, SpendCategory, Task,
};
use crate::scope::ReportScope;

/// Compute a report over `scope`.
///
/// Pure function of its inputs: `today` anchors the days-remaining
/// computation and is supplied by the caller, never read from the clock.
/// Empty inputs yield zeros and empty collections, never an error. Child
/// records whose `project_id` is unset or out of scope are excluded from
/// every rollup.
pub fn generate_report(
    projects: &[Project],
    budgets: &[Budget],
    expenses: &[Expense],
    tasks: &[Task],
    scope: ReportScope,
    today: Date,
) -> ReportData {
    let filtered_projects: Vec<&Project> =
        projects.iter().filter(|p| scope.includes(p.id)).collect();

    let project_ids: HashSet<ProjectId> = filtered_projects.iter().map(|p| p.id).collect();
    let in_scope =
        |project_id: Option<ProjectId>| project_id.is_some_and(|id| project_ids.contains(&id));

    let project_budgets: Vec<&Budget> =
        budgets.iter().filter(|b| in_scope(b.project_id)).collect();
    let project_expenses: Vec<&Expense> =
        expenses.iter().filter(|e| in_scope(e.project_id)).collect();
    let project_tasks: Vec<&Task> = tasks.iter().filter(|t| in_scope(t.project_id)).collect();

    let status_count = |status: ReportingStatus| {
        filtered_projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Reporting(status))
            .count()
    };

    let total_budget: i64 = project_budgets.iter().map(|b| b.amount).sum();
    let total_expenses: i64 = project_expenses.iter().map(|e| e.amount).sum();
    let budget_used_percent = if total_budget > 0 {
        total_expenses as f64 / total_budget as f64 * 100.0
    } else {
        0.0
    };

    let completed_tasks = project_tasks.iter().filter(|t| t.completed).count();
    let pending_tasks = project_tasks.len() - completed_tasks;
    let task_completion_rate = if project_tasks.is_empty() {
        0.0
    } else {
        completed_tasks as f64 / project_tasks.len() as f64 * 100.0
    };

    let project_details: Vec<ProjectDetail> = filtered_projects
        .iter()
        .map(|project| detail_row(project, &project_budgets, &project_expenses, today))
        .collect();

    let expense_by_category: HashMap<SpendCategory, i64> = project_expenses
        .iter()
        .map(|e| (e.category, e.amount))
        .into_grouping_map()
        .sum();

    tracing::debug!(
        total_projects = filtered_projects.len(),
        total_budget,
        total_expenses,
        "report generated"
    );

    ReportData {
        total_projects: filtered_projects.len(),
        active_projects: status_count(ReportingStatus::Active),
        review_projects: status_count(ReportingStatus::Review),
        completed_projects: status_count(ReportingStatus::Completed),
        total_budget,
        total_expenses,
        remaining_budget: total_budget - total_expenses,
        budget_used_percent,
        completed_tasks,
        pending_tasks,
        task_completion_rate,
        project_details,
        expense_by_category,
    }
}

/// Build the derived row for one project.
///
/// Uses the FIRST budget row linked to the project; additional rows are
/// silently ignored, matching what the entry forms can actually produce.
/// Spend is the sum of the project's expense rows, not the budget's
/// `spent` field.
fn detail_row(
    project: &Project,
    budgets: &[&Budget],
    expenses: &[&Expense],
    today: Date,
) -> ProjectDetail {
    let budget = budgets.iter().find(|b| b.project_id == Some(project.id));
    let spent: i64 = expenses
        .iter()
        .filter(|e| e.project_id == Some(project.id))
        .map(|e| e.amount)
        .sum();

    let budget_amount = budget.map_or(0, |b| b.amount);
    let remaining = budget_amount - spent;
    let days_remaining = project.end_date.map(|end| (end - today).whole_days());

    ProjectDetail {
        project_id: project.id,
        name: project.name.clone(),
        budget_amount,
        spent,
        remaining,
        progress: project.progress,
        days_remaining,
        is_over_budget: remaining < 0,
        is_overdue: days_remaining.is_some_and(|days| days < 0),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use time::Duration;

    use super::*;
    use crate::domain::{PlanningStatus, ProjectLink};

    const TODAY: Date = date!(2026 - 08 - 06);

    fn project(id: i32, status: &str) -> Project {
        Project {
            id: ProjectId::new(id),
            name: format!("project-{id}"),
            client: None,
            status: status.parse().unwrap(),
            color: None,
            progress: 0,
            start_date: None,
            end_date: None,
            tags: Vec::new(),
            links: Vec::new(),
        }
    }

    fn budget(id: i32, project_id: Option<i32>, amount: i64) -> Budget {
        Budget {
            id,
            project_id: project_id.map(ProjectId::new),
            name: format!("budget-{id}"),
            amount,
            spent: 0,
            category: SpendCategory::Other,
            kind: Default::default(),
            date: None,
            notes: None,
        }
    }

    fn expense(id: i32, project_id: Option<i32>, amount: i64) -> Expense {
        expense_in(id, project_id, amount, SpendCategory::Other)
    }

    fn expense_in(id: i32, project_id: Option<i32>, amount: i64, category: SpendCategory) -> Expense {
        Expense {
            id,
            project_id: project_id.map(ProjectId::new),
            category,
            amount,
            date: None,
        }
    }

    fn task(id: i32, project_id: Option<i32>, completed: bool) -> Task {
        Task {
            id,
            project_id: project_id.map(ProjectId::new),
            completed,
            date: None,
        }
    }

    fn scenario_records() -> (Vec<Project>, Vec<Budget>, Vec<Expense>, Vec<Task>) {
        (
            vec![project(1, "active"), project(2, "completed")],
            vec![budget(1, Some(1), 1_000_000)],
            vec![expense(1, Some(1), 400_000), expense(2, Some(1), 100_000)],
            vec![task(1, Some(1), true), task(2, Some(1), false)],
        )
    }

    #[test]
    fn full_scope_aggregates_every_collection() {
        let (projects, budgets, expenses, tasks) = scenario_records();
        let report = generate_report(
            &projects,
            &budgets,
            &expenses,
            &tasks,
            ReportScope::All,
            TODAY,
        );

        assert_eq!(report.total_projects, 2);
        assert_eq!(report.active_projects, 1);
        assert_eq!(report.completed_projects, 1);
        assert_eq!(report.review_projects, 0);
        assert_eq!(report.total_budget, 1_000_000);
        assert_eq!(report.total_expenses, 500_000);
        assert_eq!(report.remaining_budget, 500_000);
        assert_eq!(report.budget_used_percent, 50.0);
        assert_eq!(report.completed_tasks, 1);
        assert_eq!(report.pending_tasks, 1);
        assert_eq!(report.task_completion_rate, 50.0);
    }

    #[test]
    fn single_project_scope_excludes_unlinked_records() {
        let (projects, budgets, expenses, tasks) = scenario_records();
        let report = generate_report(
            &projects,
            &budgets,
            &expenses,
            &tasks,
            ReportScope::Project(ProjectId::new(2)),
            TODAY,
        );

        assert_eq!(report.total_projects, 1);
        assert_eq!(report.total_budget, 0);
        assert_eq!(report.total_expenses, 0);
        assert_eq!(report.remaining_budget, 0);
        assert_eq!(report.budget_used_percent, 0.0);
        assert_eq!(report.task_completion_rate, 0.0);
        assert!(report.expense_by_category.is_empty());
    }

    #[test]
    fn unknown_scope_id_yields_an_empty_report() {
        let (projects, budgets, expenses, tasks) = scenario_records();
        let report = generate_report(
            &projects,
            &budgets,
            &expenses,
            &tasks,
            ReportScope::Project(ProjectId::new(999)),
            TODAY,
        );

        assert_eq!(report.total_projects, 0);
        assert_eq!(report.total_budget, 0);
        assert!(report.project_details.is_empty());
    }

    #[test]
    fn empty_inputs_yield_zeros() {
        let report = generate_report(&[], &[], &[], &[], ReportScope::All, TODAY);

        assert_eq!(report.total_projects, 0);
        assert_eq!(report.budget_used_percent, 0.0);
        assert_eq!(report.task_completion_rate, 0.0);
        assert!(report.project_details.is_empty());
        assert!(report.expense_by_category.is_empty());
    }

    #[test]
    fn orphaned_child_records_are_excluded() {
        let projects = vec![project(1, "active")];
        let budgets = vec![budget(1, Some(1), 100), budget(2, None, 5_000)];
        let expenses = vec![expense(1, Some(1), 40), expense(2, None, 9_000)];
        let tasks = vec![task(1, Some(1), true), task(2, None, false)];

        let report =
            generate_report(&projects, &budgets, &expenses, &tasks, ReportScope::All, TODAY);

        assert_eq!(report.total_budget, 100);
        assert_eq!(report.total_expenses, 40);
        assert_eq!(report.completed_tasks, 1);
        assert_eq!(report.pending_tasks, 0);
    }

    #[test]
    fn planning_statuses_count_toward_totals_only() {
        let projects = vec![project(1, "idea"), project(2, "launched")];
        let report = generate_report(&projects, &[], &[], &[], ReportScope::All, TODAY);

        assert_eq!(report.total_projects, 2);
        assert_eq!(report.active_projects, 0);
        assert_eq!(report.review_projects, 0);
        assert_eq!(report.completed_projects, 0);
    }

    #[test]
    fn remaining_budget_may_go_negative() {
        let projects = vec![project(1, "active")];
        let budgets = vec![budget(1, Some(1), 100)];
        let expenses = vec![expense(1, Some(1), 150)];

        let report = generate_report(&projects, &budgets, &expenses, &[], ReportScope::All, TODAY);

        assert_eq!(report.remaining_budget, -50);
        assert!(report.budget_used_percent > 100.0);

        let detail = &report.project_details[0];
        assert_eq!(detail.remaining, -50);
        assert!(detail.is_over_budget);
    }

    #[test]
    fn detail_row_uses_first_budget_but_totals_sum_all() {
        let projects = vec![project(1, "active")];
        let budgets = vec![budget(1, Some(1), 300), budget(2, Some(1), 700)];

        let report = generate_report(&projects, &budgets, &[], &[], ReportScope::All, TODAY);

        assert_eq!(report.total_budget, 1_000);
        assert_eq!(report.project_details[0].budget_amount, 300);
    }

    #[test]
    fn detail_spend_sums_expenses_not_budget_spent() {
        let projects = vec![project(1, "active")];
        let mut budgets = vec![budget(1, Some(1), 1_000)];
        budgets[0].spent = 999;

        let report = generate_report(&projects, &budgets, &[], &[], ReportScope::All, TODAY);

        assert_eq!(report.total_expenses, 0);
        assert_eq!(report.project_details[0].spent, 0);
        assert_eq!(report.project_details[0].remaining, 1_000);
    }

    #[test]
    fn missing_budget_row_reads_as_zero() {
        let projects = vec![project(1, "active")];
        let expenses = vec![expense(1, Some(1), 75)];

        let report = generate_report(&projects, &[], &expenses, &[], ReportScope::All, TODAY);

        let detail = &report.project_details[0];
        assert_eq!(detail.budget_amount, 0);
        assert_eq!(detail.spent, 75);
        assert_eq!(detail.remaining, -75);
        assert!(detail.is_over_budget);
    }

    #[test]
    fn days_remaining_counts_from_today() {
        let mut due_past = project(1, "active");
        due_past.end_date = Some(TODAY - Duration::days(10));
        let mut due_today = project(2, "active");
        due_today.end_date = Some(TODAY);
        let mut due_later = project(3, "active");
        due_later.end_date = Some(TODAY + Duration::days(3));
        let undated = project(4, "active");

        let projects = vec![due_past, due_today, due_later, undated];
        let report = generate_report(&projects, &[], &[], &[], ReportScope::All, TODAY);

        let days: Vec<Option<i64>> = report
            .project_details
            .iter()
            .map(|d| d.days_remaining)
            .collect();
        assert_eq!(days, vec![Some(-10), Some(0), Some(3), None]);

        let overdue: Vec<bool> = report.project_details.iter().map(|d| d.is_overdue).collect();
        assert_eq!(overdue, vec![true, false, false, false]);
    }

    #[test]
    fn detail_row_carries_project_progress() {
        let mut p = project(1, "active");
        p.progress = 64;
        p.tags = vec!["web".to_string()];
        p.links = vec![ProjectLink {
            title: "repo".to_string(),
            url: "https://example.com".to_string(),
        }];

        let report = generate_report(&[p], &[], &[], &[], ReportScope::All, TODAY);

        assert_eq!(report.project_details[0].progress, 64);
    }

    #[test]
    fn category_breakdown_accounts_for_every_expense() {
        let projects = vec![project(1, "active")];
        let expenses = vec![
            expense_in(1, Some(1), 100, SpendCategory::Hosting),
            expense_in(2, Some(1), 250, SpendCategory::Hosting),
            expense_in(3, Some(1), 40, SpendCategory::Design),
            expense_in(4, None, 9_999, SpendCategory::Marketing),
        ];

        let report = generate_report(&projects, &[], &expenses, &[], ReportScope::All, TODAY);

        assert_eq!(report.expense_by_category.len(), 2);
        assert_eq!(report.expense_by_category[&SpendCategory::Hosting], 350);
        assert_eq!(report.expense_by_category[&SpendCategory::Design], 40);
        assert!(!report
            .expense_by_category
            .contains_key(&SpendCategory::Marketing));

        let category_sum: i64 = report.expense_by_category.values().sum();
        assert_eq!(category_sum, report.total_expenses);
    }

    #[test]
    fn planning_vocabulary_still_parses_for_fixtures() {
        // Guards the helper: fixtures build statuses from strings.
        assert_eq!(
            project(1, "testing").status,
            ProjectStatus::Planning(PlanningStatus::Testing)
        );
    }
}
