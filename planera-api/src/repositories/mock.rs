//! In-memory repository implementations, used by tests in place of
//! Postgres.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reporting::{prepend_capped, Budget, Expense, Project, ProjectId, ReportData, Task};
use time::OffsetDateTime;

use super::{
    ArchivedReport, BudgetRepository, ExpenseRepository, NewBudget, NewExpense, NewProject,
    NewTask, ProjectRepository, RepositoryError, SnapshotRepository, TaskRepository,
    UpdateProject,
};

fn not_found(entity: &str, id: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::NotFound(format!("{entity} {id}"))
}

#[derive(Clone, Default)]
pub struct MockProjectRepository {
    state: Arc<RwLock<ProjectState>>,
}

#[derive(Default)]
struct ProjectState {
    next_id: i32,
    projects: Vec<Project>,
}

impl MockProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        {
            let mut state = self.state.write().unwrap();
            state.next_id = projects.iter().map(|p| p.id.as_i32()).max().unwrap_or(0);
            state.projects = projects;
        }
        self
    }
}

#[async_trait]
impl ProjectRepository for MockProjectRepository {
    async fn get_projects(&self) -> Result<Vec<Project>, RepositoryError> {
        Ok(self.state.read().unwrap().projects.clone())
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project, RepositoryError> {
        self.state
            .read()
            .unwrap()
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found("project", id))
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.next_id += 1;
        let created = Project {
            id: ProjectId::new(state.next_id),
            name: project.name.clone(),
            client: project.client.clone(),
            status: Default::default(),
            color: project.color.clone(),
            progress: 0,
            start_date: project.start_date,
            end_date: project.end_date,
            tags: project.tags.clone(),
            links: project.links.clone(),
        };
        state.projects.push(created.clone());
        Ok(created)
    }

    async fn update_project(
        &self,
        id: ProjectId,
        update: &UpdateProject,
    ) -> Result<Project, RepositoryError> {
        let mut state = self.state.write().unwrap();
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("project", id))?;

        project.name = update.name.clone();
        project.client = update.client.clone();
        project.status = update.status;
        project.color = update.color.clone();
        project.progress = update.progress;
        project.start_date = update.start_date;
        project.end_date = update.end_date;
        project.tags = update.tags.clone();
        project.links = update.links.clone();
        Ok(project.clone())
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        let before = state.projects.len();
        state.projects.retain(|p| p.id != id);
        if state.projects.len() == before {
            return Err(not_found("project", id));
        }
        Ok(())
    }

    async fn update_progress(&self, id: ProjectId, progress: i32) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("project", id))?;
        project.progress = progress;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockBudgetRepository {
    state: Arc<RwLock<BudgetState>>,
}

#[derive(Default)]
struct BudgetState {
    next_id: i32,
    budgets: Vec<Budget>,
}

impl MockBudgetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budgets(self, budgets: Vec<Budget>) -> Self {
        {
            let mut state = self.state.write().unwrap();
            state.next_id = budgets.iter().map(|b| b.id).max().unwrap_or(0);
            state.budgets = budgets;
        }
        self
    }
}

fn budget_from(id: i32, fields: &NewBudget) -> Budget {
    Budget {
        id,
        project_id: fields.project_id,
        name: fields.name.clone(),
        amount: fields.amount,
        spent: fields.spent,
        category: fields.category,
        kind: fields.kind,
        date: fields.date,
        notes: fields.notes.clone(),
    }
}

#[async_trait]
impl BudgetRepository for MockBudgetRepository {
    async fn get_budgets(&self) -> Result<Vec<Budget>, RepositoryError> {
        Ok(self.state.read().unwrap().budgets.clone())
    }

    async fn create_budget(&self, budget: &NewBudget) -> Result<Budget, RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.next_id += 1;
        let created = budget_from(state.next_id, budget);
        state.budgets.push(created.clone());
        Ok(created)
    }

    async fn update_budget(&self, id: i32, update: &NewBudget) -> Result<Budget, RepositoryError> {
        let mut state = self.state.write().unwrap();
        let budget = state
            .budgets
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("budget", id))?;
        *budget = budget_from(id, update);
        Ok(budget.clone())
    }

    async fn delete_budget(&self, id: i32) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        let before = state.budgets.len();
        state.budgets.retain(|b| b.id != id);
        if state.budgets.len() == before {
            return Err(not_found("budget", id));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockExpenseRepository {
    state: Arc<RwLock<ExpenseState>>,
}

#[derive(Default)]
struct ExpenseState {
    next_id: i32,
    expenses: Vec<Expense>,
}

impl MockExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expenses(self, expenses: Vec<Expense>) -> Self {
        {
            let mut state = self.state.write().unwrap();
            state.next_id = expenses.iter().map(|e| e.id).max().unwrap_or(0);
            state.expenses = expenses;
        }
        self
    }
}

#[async_trait]
impl ExpenseRepository for MockExpenseRepository {
    async fn get_expenses(&self) -> Result<Vec<Expense>, RepositoryError> {
        Ok(self.state.read().unwrap().expenses.clone())
    }

    async fn create_expense(&self, expense: &NewExpense) -> Result<Expense, RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.next_id += 1;
        let created = Expense {
            id: state.next_id,
            project_id: expense.project_id,
            category: expense.category,
            amount: expense.amount,
            date: expense.date,
        };
        state.expenses.push(created.clone());
        Ok(created)
    }

    async fn update_expense(
        &self,
        id: i32,
        update: &NewExpense,
    ) -> Result<Expense, RepositoryError> {
        let mut state = self.state.write().unwrap();
        let expense = state
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found("expense", id))?;
        expense.project_id = update.project_id;
        expense.category = update.category;
        expense.amount = update.amount;
        expense.date = update.date;
        Ok(expense.clone())
    }

    async fn delete_expense(&self, id: i32) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        let before = state.expenses.len();
        state.expenses.retain(|e| e.id != id);
        if state.expenses.len() == before {
            return Err(not_found("expense", id));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockTaskRepository {
    state: Arc<RwLock<TaskState>>,
}

#[derive(Default)]
struct TaskState {
    next_id: i32,
    tasks: Vec<Task>,
}

impl MockTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        {
            let mut state = self.state.write().unwrap();
            state.next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
            state.tasks = tasks;
        }
        self
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn get_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        Ok(self.state.read().unwrap().tasks.clone())
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.next_id += 1;
        let created = Task {
            id: state.next_id,
            project_id: task.project_id,
            completed: task.completed,
            date: task.date,
        };
        state.tasks.push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, id: i32, update: &NewTask) -> Result<Task, RepositoryError> {
        let mut state = self.state.write().unwrap();
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("task", id))?;
        task.project_id = update.project_id;
        task.completed = update.completed;
        task.date = update.date;
        Ok(task.clone())
    }

    async fn delete_task(&self, id: i32) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        if state.tasks.len() == before {
            return Err(not_found("task", id));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockSnapshotRepository {
    state: Arc<RwLock<SnapshotState>>,
}

#[derive(Default)]
struct SnapshotState {
    next_id: i32,
    snapshots: Vec<ArchivedReport>,
}

impl MockSnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotRepository for MockSnapshotRepository {
    async fn list_snapshots(&self) -> Result<Vec<ArchivedReport>, RepositoryError> {
        Ok(self.state.read().unwrap().snapshots.clone())
    }

    async fn append_snapshot(
        &self,
        report: &ReportData,
    ) -> Result<ArchivedReport, RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.next_id += 1;
        let archived = ArchivedReport {
            id: state.next_id,
            created_at: OffsetDateTime::now_utc(),
            report: report.clone(),
        };
        state.snapshots = prepend_capped(archived.clone(), std::mem::take(&mut state.snapshots));
        Ok(archived)
    }
}
