//! Process-local storage used by tests and demo runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::RwLock;

use super::{AuditStamper, WriteKind};
use crate::model::{Audit, LeaveAllocation, LeaveRequest, LeaveType};
use crate::repository::{
    LeaveAllocationRepository, LeaveRequestRepository, LeaveTypeRepository, RepositoryError,
    RepositoryResult,
};

#[derive(Default)]
struct Tables {
    leave_types: BTreeMap<i32, LeaveType>,
    allocations: BTreeMap<i32, LeaveAllocation>,
    requests: BTreeMap<i32, LeaveRequest>,
    sequences: Sequences,
}

/// Last key handed out per table; keys are never reused after a delete.
#[derive(Default)]
struct Sequences {
    leave_types: i32,
    allocations: i32,
    requests: i32,
}

fn next_key(sequence: &mut i32) -> i32 {
    *sequence += 1;
    *sequence
}

impl Tables {

    fn require_leave_type(&self, id: i32) -> RepositoryResult<()> {
        if self.leave_types.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::Conflict(format!(
                "leave type {id} does not exist"
            )))
        }
    }

    fn leave_type(&self, id: i32) -> Option<LeaveType> {
        self.leave_types.get(&id).cloned()
    }
}

/// Keeps creation fields of the stored row when the caller's copy lost them.
fn keep_creation(audit: &mut Audit, stored: &Audit) {
    audit.date_created = stored.date_created;
    audit.created_by = stored.created_by.clone();
}

fn missing(entity: &str, id: i32) -> RepositoryError {
    RepositoryError::Conflict(format!("{entity} {id} does not exist"))
}

/// All three repositories over one lock. Deleting a leave type removes its
/// allocations and requests, matching the relational schema.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    stamper: AuditStamper,
}

impl InMemoryStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            stamper: AuditStamper::new(clock),
        }
    }

    /// Store holding the two default leave types.
    pub async fn seeded(clock: Arc<dyn Clock>) -> RepositoryResult<Self> {
        let store = Self::new(clock);
        for (name, default_days) in [("Vacation", 10), ("Sick", 0)] {
            let leave_type = LeaveType {
                name: name.to_string(),
                default_days,
                ..LeaveType::default()
            };
            LeaveTypeRepository::add(&store, leave_type, "root-user").await?;
        }
        Ok(store)
    }
}

#[async_trait]
impl LeaveTypeRepository for InMemoryStore {
    async fn get(&self, id: i32) -> RepositoryResult<Option<LeaveType>> {
        Ok(self.tables.read().await.leave_type(id))
    }

    async fn get_all(&self) -> RepositoryResult<Vec<LeaveType>> {
        Ok(self.tables.read().await.leave_types.values().cloned().collect())
    }

    async fn add(&self, mut leave_type: LeaveType, actor: &str) -> RepositoryResult<LeaveType> {
        let mut tables = self.tables.write().await;
        leave_type.id = next_key(&mut tables.sequences.leave_types);
        self.stamper.stamp(&mut leave_type, WriteKind::Insert, actor);
        tables.leave_types.insert(leave_type.id, leave_type.clone());
        Ok(leave_type)
    }

    async fn update(&self, mut leave_type: LeaveType, actor: &str) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .leave_types
            .get(&leave_type.id)
            .ok_or_else(|| missing("leave type", leave_type.id))?;
        keep_creation(&mut leave_type.audit, &stored.audit);
        self.stamper.stamp(&mut leave_type, WriteKind::Update, actor);
        tables.leave_types.insert(leave_type.id, leave_type);
        Ok(())
    }

    async fn delete(&self, leave_type: LeaveType) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        tables.leave_types.remove(&leave_type.id);
        tables
            .allocations
            .retain(|_, allocation| allocation.leave_type_id != leave_type.id);
        tables
            .requests
            .retain(|_, request| request.leave_type_id != leave_type.id);
        Ok(())
    }

    async fn exists(&self, id: i32) -> RepositoryResult<bool> {
        Ok(self.tables.read().await.leave_types.contains_key(&id))
    }
}

#[async_trait]
impl LeaveAllocationRepository for InMemoryStore {
    async fn get(&self, id: i32) -> RepositoryResult<Option<LeaveAllocation>> {
        Ok(self.tables.read().await.allocations.get(&id).cloned())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<LeaveAllocation>> {
        Ok(self.tables.read().await.allocations.values().cloned().collect())
    }

    async fn add(
        &self,
        mut allocation: LeaveAllocation,
        actor: &str,
    ) -> RepositoryResult<LeaveAllocation> {
        let mut tables = self.tables.write().await;
        tables.require_leave_type(allocation.leave_type_id)?;
        allocation.id = next_key(&mut tables.sequences.allocations);
        allocation.leave_type = None;
        self.stamper.stamp(&mut allocation, WriteKind::Insert, actor);
        tables.allocations.insert(allocation.id, allocation.clone());
        Ok(allocation)
    }

    async fn update(&self, mut allocation: LeaveAllocation, actor: &str) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_leave_type(allocation.leave_type_id)?;
        let stored = tables
            .allocations
            .get(&allocation.id)
            .ok_or_else(|| missing("leave allocation", allocation.id))?;
        keep_creation(&mut allocation.audit, &stored.audit);
        allocation.leave_type = None;
        self.stamper.stamp(&mut allocation, WriteKind::Update, actor);
        tables.allocations.insert(allocation.id, allocation);
        Ok(())
    }

    async fn delete(&self, allocation: LeaveAllocation) -> RepositoryResult<()> {
        self.tables.write().await.allocations.remove(&allocation.id);
        Ok(())
    }

    async fn exists(&self, id: i32) -> RepositoryResult<bool> {
        Ok(self.tables.read().await.allocations.contains_key(&id))
    }

    async fn get_with_details(&self, id: i32) -> RepositoryResult<Option<LeaveAllocation>> {
        let tables = self.tables.read().await;
        Ok(tables.allocations.get(&id).map(|allocation| LeaveAllocation {
            leave_type: tables.leave_type(allocation.leave_type_id),
            ..allocation.clone()
        }))
    }

    async fn list_with_details(&self) -> RepositoryResult<Vec<LeaveAllocation>> {
        let tables = self.tables.read().await;
        Ok(tables
            .allocations
            .values()
            .map(|allocation| LeaveAllocation {
                leave_type: tables.leave_type(allocation.leave_type_id),
                ..allocation.clone()
            })
            .collect())
    }
}

#[async_trait]
impl LeaveRequestRepository for InMemoryStore {
    async fn get(&self, id: i32) -> RepositoryResult<Option<LeaveRequest>> {
        Ok(self.tables.read().await.requests.get(&id).cloned())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<LeaveRequest>> {
        Ok(self.tables.read().await.requests.values().cloned().collect())
    }

    async fn add(&self, mut request: LeaveRequest, actor: &str) -> RepositoryResult<LeaveRequest> {
        let mut tables = self.tables.write().await;
        tables.require_leave_type(request.leave_type_id)?;
        request.id = next_key(&mut tables.sequences.requests);
        request.leave_type = None;
        self.stamper.stamp(&mut request, WriteKind::Insert, actor);
        tables.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn update(&self, mut request: LeaveRequest, actor: &str) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_leave_type(request.leave_type_id)?;
        let stored = tables
            .requests
            .get(&request.id)
            .ok_or_else(|| missing("leave request", request.id))?;
        keep_creation(&mut request.audit, &stored.audit);
        request.leave_type = None;
        self.stamper.stamp(&mut request, WriteKind::Update, actor);
        tables.requests.insert(request.id, request);
        Ok(())
    }

    async fn delete(&self, request: LeaveRequest) -> RepositoryResult<()> {
        self.tables.write().await.requests.remove(&request.id);
        Ok(())
    }

    async fn exists(&self, id: i32) -> RepositoryResult<bool> {
        Ok(self.tables.read().await.requests.contains_key(&id))
    }

    async fn get_with_details(&self, id: i32) -> RepositoryResult<Option<LeaveRequest>> {
        let tables = self.tables.read().await;
        Ok(tables.requests.get(&id).map(|request| LeaveRequest {
            leave_type: tables.leave_type(request.leave_type_id),
            ..request.clone()
        }))
    }

    async fn list_with_details(&self) -> RepositoryResult<Vec<LeaveRequest>> {
        let tables = self.tables.read().await;
        Ok(tables
            .requests
            .values()
            .map(|request| LeaveRequest {
                leave_type: tables.leave_type(request.leave_type_id),
                ..request.clone()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap(),
        ))
    }

    #[tokio::test]
    async fn seeded_store_has_default_types() {
        let store = InMemoryStore::seeded(clock()).await.unwrap();

        let leave_types = LeaveTypeRepository::get_all(&store).await.unwrap();

        let names: Vec<_> = leave_types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Vacation", "Sick"]);
        assert!(leave_types.iter().all(|t| t.audit.created_by == "root-user"));
    }

    #[tokio::test]
    async fn deleting_a_leave_type_cascades() {
        let store = InMemoryStore::seeded(clock()).await.unwrap();
        let allocation = LeaveAllocationRepository::add(
            &store,
            LeaveAllocation {
                number_of_days: 5,
                leave_type_id: 1,
                period: 2026,
                ..LeaveAllocation::default()
            },
            "hr.jane",
        )
        .await
        .unwrap();
        let vacation = LeaveTypeRepository::get(&store, 1).await.unwrap().unwrap();

        LeaveTypeRepository::delete(&store, vacation).await.unwrap();

        assert!(!LeaveTypeRepository::exists(&store, 1).await.unwrap());
        assert!(
            !LeaveAllocationRepository::exists(&store, allocation.id)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn update_preserves_creation_stamp() {
        let store = InMemoryStore::seeded(clock()).await.unwrap();
        let mut sick = LeaveTypeRepository::get(&store, 2).await.unwrap().unwrap();
        sick.default_days = 5;
        sick.audit = Audit::default();

        LeaveTypeRepository::update(&store, sick, "hr.jane").await.unwrap();

        let stored = LeaveTypeRepository::get(&store, 2).await.unwrap().unwrap();
        assert_eq!(stored.audit.created_by, "root-user");
        assert_eq!(stored.audit.last_modified_by, "hr.jane");
        assert_eq!(stored.default_days, 5);
    }

    #[tokio::test]
    async fn details_carry_the_leave_type() {
        let store = InMemoryStore::seeded(clock()).await.unwrap();
        let request = LeaveRequestRepository::add(
            &store,
            LeaveRequest {
                start_date: Utc.with_ymd_and_hms(2026, 11, 2, 0, 0, 0).unwrap(),
                end_date: Utc.with_ymd_and_hms(2026, 11, 6, 0, 0, 0).unwrap(),
                leave_type_id: 2,
                ..LeaveRequest::default()
            },
            "emp.sam",
        )
        .await
        .unwrap();

        let loaded = LeaveRequestRepository::get_with_details(&store, request.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(loaded.leave_type.map(|t| t.name).as_deref(), Some("Sick"));
    }

    #[tokio::test]
    async fn allocation_for_unknown_type_is_refused() {
        let store = InMemoryStore::new(clock());

        let result = LeaveAllocationRepository::add(
            &store,
            LeaveAllocation {
                number_of_days: 5,
                leave_type_id: 9,
                period: 2026,
                ..LeaveAllocation::default()
            },
            "hr.jane",
        )
        .await;

        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn each_table_numbers_its_own_rows() {
        let store = InMemoryStore::seeded(clock()).await.unwrap();
        let request = LeaveRequest {
            start_date: Utc.with_ymd_and_hms(2026, 11, 2, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2026, 11, 6, 0, 0, 0).unwrap(),
            leave_type_id: 1,
            ..LeaveRequest::default()
        };
        let first = LeaveRequestRepository::add(&store, request.clone(), "emp.sam")
            .await
            .unwrap();
        let second = LeaveRequestRepository::add(&store, request, "emp.sam")
            .await
            .unwrap();
        let allocation = LeaveAllocationRepository::add(
            &store,
            LeaveAllocation {
                number_of_days: 5,
                leave_type_id: 1,
                period: 2026,
                ..LeaveAllocation::default()
            },
            "hr.jane",
        )
        .await
        .unwrap();
        let study = LeaveTypeRepository::add(
            &store,
            LeaveType {
                name: "Study".to_string(),
                default_days: 3,
                ..LeaveType::default()
            },
            "hr.jane",
        )
        .await
        .unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(allocation.id, 1);
        assert_eq!(study.id, 3);
    }
}

