//! MySQL-backed repositories.
//!
//! Queries are checked at runtime so the crate builds without a live database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use sqlx::MySqlPool;

use super::{AuditStamper, WriteKind};
use crate::model::{LeaveAllocation, LeaveRequest, LeaveType};
use crate::repository::{
    LeaveAllocationRepository, LeaveRequestRepository, LeaveTypeRepository, RepositoryError,
    RepositoryResult,
};

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db)
                if db.is_foreign_key_violation() || db.is_unique_violation() =>
            {
                RepositoryError::Conflict(db.to_string())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => RepositoryError::Connection(err.to_string()),
            other => RepositoryError::Query(other.to_string()),
        }
    }
}

fn inserted_id(result: sqlx::mysql::MySqlQueryResult) -> RepositoryResult<i32> {
    i32::try_from(result.last_insert_id())
        .map_err(|_| RepositoryError::Query("insert id out of range".to_string()))
}

const LEAVE_TYPE_COLUMNS: &str = "id, name, default_days, \
     date_created, created_by, last_modified_date, last_modified_by";

const ALLOCATION_COLUMNS: &str = "id, number_of_days, leave_type_id, period, \
     date_created, created_by, last_modified_date, last_modified_by";

const REQUEST_COLUMNS: &str = "id, start_date, end_date, leave_type_id, date_requested, \
     request_comments, date_actioned, approved, cancelled, \
     date_created, created_by, last_modified_date, last_modified_by";

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
    stamper: AuditStamper,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            stamper: AuditStamper::new(clock),
        }
    }

    async fn leave_types_by_id(&self) -> RepositoryResult<HashMap<i32, LeaveType>> {
        let leave_types = LeaveTypeRepository::get_all(self).await?;
        Ok(leave_types.into_iter().map(|t| (t.id, t)).collect())
    }
}

#[async_trait]
impl LeaveTypeRepository for MySqlStore {
    async fn get(&self, id: i32) -> RepositoryResult<Option<LeaveType>> {
        let sql = format!("SELECT {LEAVE_TYPE_COLUMNS} FROM leave_types WHERE id = ?");
        let leave_type = sqlx::query_as::<_, LeaveType>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(leave_type)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<LeaveType>> {
        let sql = format!("SELECT {LEAVE_TYPE_COLUMNS} FROM leave_types ORDER BY id");
        let leave_types = sqlx::query_as::<_, LeaveType>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(leave_types)
    }

    async fn add(&self, mut leave_type: LeaveType, actor: &str) -> RepositoryResult<LeaveType> {
        self.stamper.stamp(&mut leave_type, WriteKind::Insert, actor);
        let result = sqlx::query(
            r#"
            INSERT INTO leave_types
                (name, default_days, date_created, created_by, last_modified_date, last_modified_by)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&leave_type.name)
        .bind(leave_type.default_days)
        .bind(leave_type.audit.date_created)
        .bind(&leave_type.audit.created_by)
        .bind(leave_type.audit.last_modified_date)
        .bind(&leave_type.audit.last_modified_by)
        .execute(&self.pool)
        .await?;

        leave_type.id = inserted_id(result)?;
        Ok(leave_type)
    }

    async fn update(&self, mut leave_type: LeaveType, actor: &str) -> RepositoryResult<()> {
        self.stamper.stamp(&mut leave_type, WriteKind::Update, actor);
        sqlx::query(
            r#"
            UPDATE leave_types
            SET name = ?, default_days = ?, last_modified_date = ?, last_modified_by = ?
            WHERE id = ?
            "#,
        )
        .bind(&leave_type.name)
        .bind(leave_type.default_days)
        .bind(leave_type.audit.last_modified_date)
        .bind(&leave_type.audit.last_modified_by)
        .bind(leave_type.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, leave_type: LeaveType) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM leave_types WHERE id = ?")
            .bind(leave_type.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists(&self, id: i32) -> RepositoryResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM leave_types WHERE id = ?)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found != 0)
    }
}

#[async_trait]
impl LeaveAllocationRepository for MySqlStore {
    async fn get(&self, id: i32) -> RepositoryResult<Option<LeaveAllocation>> {
        let sql = format!("SELECT {ALLOCATION_COLUMNS} FROM leave_allocations WHERE id = ?");
        let allocation = sqlx::query_as::<_, LeaveAllocation>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(allocation)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<LeaveAllocation>> {
        let sql = format!("SELECT {ALLOCATION_COLUMNS} FROM leave_allocations ORDER BY id");
        let allocations = sqlx::query_as::<_, LeaveAllocation>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(allocations)
    }

    async fn add(
        &self,
        mut allocation: LeaveAllocation,
        actor: &str,
    ) -> RepositoryResult<LeaveAllocation> {
        self.stamper.stamp(&mut allocation, WriteKind::Insert, actor);
        let result = sqlx::query(
            r#"
            INSERT INTO leave_allocations
                (number_of_days, leave_type_id, period,
                 date_created, created_by, last_modified_date, last_modified_by)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(allocation.number_of_days)
        .bind(allocation.leave_type_id)
        .bind(allocation.period)
        .bind(allocation.audit.date_created)
        .bind(&allocation.audit.created_by)
        .bind(allocation.audit.last_modified_date)
        .bind(&allocation.audit.last_modified_by)
        .execute(&self.pool)
        .await?;

        allocation.id = inserted_id(result)?;
        Ok(allocation)
    }

    async fn update(&self, mut allocation: LeaveAllocation, actor: &str) -> RepositoryResult<()> {
        self.stamper.stamp(&mut allocation, WriteKind::Update, actor);
        sqlx::query(
            r#"
            UPDATE leave_allocations
            SET number_of_days = ?, leave_type_id = ?, period = ?,
                last_modified_date = ?, last_modified_by = ?
            WHERE id = ?
            "#,
        )
        .bind(allocation.number_of_days)
        .bind(allocation.leave_type_id)
        .bind(allocation.period)
        .bind(allocation.audit.last_modified_date)
        .bind(&allocation.audit.last_modified_by)
        .bind(allocation.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, allocation: LeaveAllocation) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM leave_allocations WHERE id = ?")
            .bind(allocation.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists(&self, id: i32) -> RepositoryResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM leave_allocations WHERE id = ?)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found != 0)
    }

    async fn get_with_details(&self, id: i32) -> RepositoryResult<Option<LeaveAllocation>> {
        let Some(mut allocation) = LeaveAllocationRepository::get(self, id).await? else {
            return Ok(None);
        };
        allocation.leave_type = LeaveTypeRepository::get(self, allocation.leave_type_id).await?;
        Ok(Some(allocation))
    }

    async fn list_with_details(&self) -> RepositoryResult<Vec<LeaveAllocation>> {
        let leave_types = self.leave_types_by_id().await?;
        let mut allocations = LeaveAllocationRepository::get_all(self).await?;
        for allocation in &mut allocations {
            allocation.leave_type = leave_types.get(&allocation.leave_type_id).cloned();
        }
        Ok(allocations)
    }
}

#[async_trait]
impl LeaveRequestRepository for MySqlStore {
    async fn get(&self, id: i32) -> RepositoryResult<Option<LeaveRequest>> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM leave_requests WHERE id = ?");
        let request = sqlx::query_as::<_, LeaveRequest>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(request)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<LeaveRequest>> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM leave_requests ORDER BY id");
        let requests = sqlx::query_as::<_, LeaveRequest>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    async fn add(&self, mut request: LeaveRequest, actor: &str) -> RepositoryResult<LeaveRequest> {
        self.stamper.stamp(&mut request, WriteKind::Insert, actor);
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (start_date, end_date, leave_type_id, date_requested, request_comments,
                 date_actioned, approved, cancelled,
                 date_created, created_by, last_modified_date, last_modified_by)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.leave_type_id)
        .bind(request.date_requested)
        .bind(&request.request_comments)
        .bind(request.date_actioned)
        .bind(request.approved)
        .bind(request.cancelled)
        .bind(request.audit.date_created)
        .bind(&request.audit.created_by)
        .bind(request.audit.last_modified_date)
        .bind(&request.audit.last_modified_by)
        .execute(&self.pool)
        .await?;

        request.id = inserted_id(result)?;
        Ok(request)
    }

    async fn update(&self, mut request: LeaveRequest, actor: &str) -> RepositoryResult<()> {
        self.stamper.stamp(&mut request, WriteKind::Update, actor);
        sqlx::query(
            r#"
            UPDATE leave_requests
            SET start_date = ?, end_date = ?, leave_type_id = ?, request_comments = ?,
                date_actioned = ?, approved = ?, cancelled = ?,
                last_modified_date = ?, last_modified_by = ?
            WHERE id = ?
            "#,
        )
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.leave_type_id)
        .bind(&request.request_comments)
        .bind(request.date_actioned)
        .bind(request.approved)
        .bind(request.cancelled)
        .bind(request.audit.last_modified_date)
        .bind(&request.audit.last_modified_by)
        .bind(request.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, request: LeaveRequest) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM leave_requests WHERE id = ?")
            .bind(request.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists(&self, id: i32) -> RepositoryResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM leave_requests WHERE id = ?)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found != 0)
    }

    async fn get_with_details(&self, id: i32) -> RepositoryResult<Option<LeaveRequest>> {
        let Some(mut request) = LeaveRequestRepository::get(self, id).await? else {
            return Ok(None);
        };
        request.leave_type = LeaveTypeRepository::get(self, request.leave_type_id).await?;
        Ok(Some(request))
    }

    async fn list_with_details(&self) -> RepositoryResult<Vec<LeaveRequest>> {
        let leave_types = self.leave_types_by_id().await?;
        let mut requests = LeaveRequestRepository::get_all(self).await?;
        for request in &mut requests {
            request.leave_type = leave_types.get(&request.leave_type_id).cloned();
        }
        Ok(requests)
    }
}
