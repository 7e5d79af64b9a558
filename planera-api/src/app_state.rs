use std::sync::Arc;

use sqlx::PgPool;

use crate::repositories::{
    BudgetRepository, BudgetRepositoryImpl, ExpenseRepository, ExpenseRepositoryImpl,
    ProjectRepository, ProjectRepositoryImpl, SnapshotRepository, SnapshotRepositoryImpl,
    TaskRepository, TaskRepositoryImpl,
};

/// Shared handles to the entity store and the report archive. Handlers
/// hold no other state; every request works on its own snapshot of the
/// records.
#[derive(Clone)]
pub struct AppState {
    pub project_repo: Arc<dyn ProjectRepository>,
    pub budget_repo: Arc<dyn BudgetRepository>,
    pub expense_repo: Arc<dyn ExpenseRepository>,
    pub task_repo: Arc<dyn TaskRepository>,
    pub snapshot_repo: Arc<dyn SnapshotRepository>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            project_repo: Arc::new(ProjectRepositoryImpl::new(pool.clone())),
            budget_repo: Arc::new(BudgetRepositoryImpl::new(pool.clone())),
            expense_repo: Arc::new(ExpenseRepositoryImpl::new(pool.clone())),
            task_repo: Arc::new(TaskRepositoryImpl::new(pool.clone())),
            snapshot_repo: Arc::new(SnapshotRepositoryImpl::new(pool)),
        }
    }

    /// Assemble state from arbitrary repository implementations. Tests
    /// pass the in-memory mocks here.
    pub fn with_repositories(
        project_repo: Arc<dyn ProjectRepository>,
        budget_repo: Arc<dyn BudgetRepository>,
        expense_repo: Arc<dyn ExpenseRepository>,
        task_repo: Arc<dyn TaskRepository>,
        snapshot_repo: Arc<dyn SnapshotRepository>,
    ) -> Self {
        Self {
            project_repo,
            budget_repo,
            expense_repo,
            task_repo,
            snapshot_repo,
        }
    }
}
