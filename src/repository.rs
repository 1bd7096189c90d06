//! Data-access contracts the handlers depend on.
//!
//! Adapters live in [`crate::store`]. Write methods receive the acting user's
//! name so the adapter can stamp the audit envelope; handlers never touch it.

use async_trait::async_trait;

use crate::model::{LeaveAllocation, LeaveRequest, LeaveType};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage connection failed: {0}")]
    Connection(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("storage rejected write: {0}")]
    Conflict(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaveTypeRepository: Send + Sync {
    async fn get(&self, id: i32) -> RepositoryResult<Option<LeaveType>>;
    async fn get_all(&self) -> RepositoryResult<Vec<LeaveType>>;
    async fn add(&self, leave_type: LeaveType, actor: &str) -> RepositoryResult<LeaveType>;
    async fn update(&self, leave_type: LeaveType, actor: &str) -> RepositoryResult<()>;
    /// Dependent allocations and requests go with it.
    async fn delete(&self, leave_type: LeaveType) -> RepositoryResult<()>;
    async fn exists(&self, id: i32) -> RepositoryResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaveAllocationRepository: Send + Sync {
    async fn get(&self, id: i32) -> RepositoryResult<Option<LeaveAllocation>>;
    async fn get_all(&self) -> RepositoryResult<Vec<LeaveAllocation>>;
    async fn add(
        &self,
        allocation: LeaveAllocation,
        actor: &str,
    ) -> RepositoryResult<LeaveAllocation>;
    async fn update(&self, allocation: LeaveAllocation, actor: &str) -> RepositoryResult<()>;
    async fn delete(&self, allocation: LeaveAllocation) -> RepositoryResult<()>;
    async fn exists(&self, id: i32) -> RepositoryResult<bool>;

    /// Same as [`get`](Self::get) with `leave_type` populated.
    async fn get_with_details(&self, id: i32) -> RepositoryResult<Option<LeaveAllocation>>;
    async fn list_with_details(&self) -> RepositoryResult<Vec<LeaveAllocation>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaveRequestRepository: Send + Sync {
    async fn get(&self, id: i32) -> RepositoryResult<Option<LeaveRequest>>;
    async fn get_all(&self) -> RepositoryResult<Vec<LeaveRequest>>;
    async fn add(&self, request: LeaveRequest, actor: &str) -> RepositoryResult<LeaveRequest>;
    async fn update(&self, request: LeaveRequest, actor: &str) -> RepositoryResult<()>;
    async fn delete(&self, request: LeaveRequest) -> RepositoryResult<()>;
    async fn exists(&self, id: i32) -> RepositoryResult<bool>;

    /// Same as [`get`](Self::get) with `leave_type` populated.
    async fn get_with_details(&self, id: i32) -> RepositoryResult<Option<LeaveRequest>>;
    async fn list_with_details(&self) -> RepositoryResult<Vec<LeaveRequest>>;
}
