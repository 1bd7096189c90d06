use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::{CommandResponse, RequestContext, RequestHandler, requests};
use crate::dto::{CreateLeaveAllocationDto, LeaveAllocationDto, UpdateLeaveAllocationDto};
use crate::error::{ApplicationError, ApplicationResult};
use crate::mapping::MergeInto;
use crate::model::LeaveAllocation;
use crate::repository::{LeaveAllocationRepository, LeaveTypeRepository};
use crate::validation::{RuleSet, leave_allocation_rules};

const ENTITY: &str = "LeaveAllocation";

#[derive(Debug, Clone)]
pub struct CreateLeaveAllocation(pub CreateLeaveAllocationDto);

#[derive(Debug, Clone)]
pub struct UpdateLeaveAllocation {
    pub id: i32,
    pub allocation: UpdateLeaveAllocationDto,
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteLeaveAllocation {
    pub id: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct GetLeaveAllocationList;

#[derive(Debug, Clone, Copy)]
pub struct GetLeaveAllocationDetail {
    pub id: i32,
}

requests! {
    CreateLeaveAllocation => CommandResponse,
    UpdateLeaveAllocation => (),
    DeleteLeaveAllocation => (),
    GetLeaveAllocationList => Vec<LeaveAllocationDto>,
    GetLeaveAllocationDetail => LeaveAllocationDto,
}

pub struct CreateLeaveAllocationHandler {
    allocations: Arc<dyn LeaveAllocationRepository>,
    rules: RuleSet<CreateLeaveAllocationDto>,
}

impl CreateLeaveAllocationHandler {
    pub fn new(
        allocations: Arc<dyn LeaveAllocationRepository>,
        leave_types: Arc<dyn LeaveTypeRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            allocations,
            rules: leave_allocation_rules(leave_types, clock),
        }
    }
}

#[async_trait]
impl RequestHandler<CreateLeaveAllocation> for CreateLeaveAllocationHandler {
    async fn handle(
        &self,
        request: CreateLeaveAllocation,
        ctx: &RequestContext,
    ) -> ApplicationResult<CommandResponse> {
        let dto = request.0;
        ctx.ensure_active()?;
        let violations = self.rules.validate(&dto).await?;
        if !violations.is_empty() {
            tracing::info!(errors = violations.len(), "Leave allocation rejected");
            return Ok(CommandResponse::failed(&violations));
        }

        ctx.ensure_active()?;
        let created = self
            .allocations
            .add(LeaveAllocation::from(dto), &ctx.actor)
            .await?;
        tracing::info!(allocation_id = created.id, actor = %ctx.actor, "Leave allocation created");
        Ok(CommandResponse::created(created.id))
    }
}

pub struct UpdateLeaveAllocationHandler {
    allocations: Arc<dyn LeaveAllocationRepository>,
    rules: RuleSet<UpdateLeaveAllocationDto>,
}

impl UpdateLeaveAllocationHandler {
    pub fn new(
        allocations: Arc<dyn LeaveAllocationRepository>,
        leave_types: Arc<dyn LeaveTypeRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            allocations,
            rules: leave_allocation_rules(leave_types, clock),
        }
    }
}

#[async_trait]
impl RequestHandler<UpdateLeaveAllocation> for UpdateLeaveAllocationHandler {
    async fn handle(
        &self,
        request: UpdateLeaveAllocation,
        ctx: &RequestContext,
    ) -> ApplicationResult<()> {
        let mut dto = request.allocation;
        dto.id = request.id;
        ctx.ensure_active()?;
        self.rules.validate(&dto).await?.into_result()?;

        ctx.ensure_active()?;
        let mut allocation = self
            .allocations
            .get(request.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(ENTITY, request.id))?;

        dto.merge_into(&mut allocation);
        ctx.ensure_active()?;
        self.allocations.update(allocation, &ctx.actor).await?;
        Ok(())
    }
}

pub struct DeleteLeaveAllocationHandler {
    allocations: Arc<dyn LeaveAllocationRepository>,
}

impl DeleteLeaveAllocationHandler {
    pub fn new(allocations: Arc<dyn LeaveAllocationRepository>) -> Self {
        Self { allocations }
    }
}

#[async_trait]
impl RequestHandler<DeleteLeaveAllocation> for DeleteLeaveAllocationHandler {
    async fn handle(
        &self,
        request: DeleteLeaveAllocation,
        ctx: &RequestContext,
    ) -> ApplicationResult<()> {
        ctx.ensure_active()?;
        let allocation = self
            .allocations
            .get(request.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(ENTITY, request.id))?;

        ctx.ensure_active()?;
        self.allocations.delete(allocation).await?;
        Ok(())
    }
}

pub struct GetLeaveAllocationListHandler {
    allocations: Arc<dyn LeaveAllocationRepository>,
}

impl GetLeaveAllocationListHandler {
    pub fn new(allocations: Arc<dyn LeaveAllocationRepository>) -> Self {
        Self { allocations }
    }
}

#[async_trait]
impl RequestHandler<GetLeaveAllocationList> for GetLeaveAllocationListHandler {
    async fn handle(
        &self,
        _: GetLeaveAllocationList,
        ctx: &RequestContext,
    ) -> ApplicationResult<Vec<LeaveAllocationDto>> {
        ctx.ensure_active()?;
        let allocations = self.allocations.list_with_details().await?;
        Ok(allocations.iter().map(LeaveAllocationDto::from).collect())
    }
}

pub struct GetLeaveAllocationDetailHandler {
    allocations: Arc<dyn LeaveAllocationRepository>,
}

impl GetLeaveAllocationDetailHandler {
    pub fn new(allocations: Arc<dyn LeaveAllocationRepository>) -> Self {
        Self { allocations }
    }
}

#[async_trait]
impl RequestHandler<GetLeaveAllocationDetail> for GetLeaveAllocationDetailHandler {
    async fn handle(
        &self,
        request: GetLeaveAllocationDetail,
        ctx: &RequestContext,
    ) -> ApplicationResult<LeaveAllocationDto> {
        ctx.ensure_active()?;
        self.allocations
            .get_with_details(request.id)
            .await?
            .map(|allocation| LeaveAllocationDto::from(&allocation))
            .ok_or_else(|| ApplicationError::not_found(ENTITY, request.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::repository::{MockLeaveAllocationRepository, MockLeaveTypeRepository};
    use chrono::{TimeZone, Utc};

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap(),
        ))
    }

    fn leave_types(exists: bool) -> Arc<dyn LeaveTypeRepository> {
        let mut repo = MockLeaveTypeRepository::new();
        repo.expect_exists().returning(move |_| Ok(exists));
        Arc::new(repo)
    }

    fn create(days: i32, leave_type_id: i32) -> CreateLeaveAllocation {
        CreateLeaveAllocation(CreateLeaveAllocationDto {
            number_of_days: days,
            leave_type_id,
            period: 2026,
        })
    }

    #[tokio::test]
    async fn non_positive_days_persist_nothing() {
        let mut allocations = MockLeaveAllocationRepository::new();
        allocations.expect_add().never();
        let handler =
            CreateLeaveAllocationHandler::new(Arc::new(allocations), leave_types(true), clock());

        let response = handler
            .handle(create(0, 1), &RequestContext::new("hr.jane"))
            .await
            .unwrap();

        assert!(!response.success);
        assert_eq!(response.id, 0);
        assert_eq!(
            response.errors,
            vec!["number_of_days must be greater than 0."]
        );
    }

    #[tokio::test]
    async fn unknown_leave_type_persists_nothing() {
        let mut allocations = MockLeaveAllocationRepository::new();
        allocations.expect_add().never();
        let handler =
            CreateLeaveAllocationHandler::new(Arc::new(allocations), leave_types(false), clock());

        let response = handler
            .handle(create(5, 77), &RequestContext::new("hr.jane"))
            .await
            .unwrap();

        assert_eq!(response.errors, vec!["leave_type_id does not exist."]);
    }

    #[tokio::test]
    async fn valid_allocation_is_added_with_actor() {
        let mut allocations = MockLeaveAllocationRepository::new();
        allocations
            .expect_add()
            .withf(|allocation, actor| allocation.number_of_days == 5 && actor == "hr.jane")
            .times(1)
            .returning(|mut allocation, _| {
                allocation.id = 11;
                Ok(allocation)
            });
        let handler =
            CreateLeaveAllocationHandler::new(Arc::new(allocations), leave_types(true), clock());

        let response = handler
            .handle(create(5, 1), &RequestContext::new("hr.jane"))
            .await
            .unwrap();

        assert_eq!(response, CommandResponse::created(11));
    }

    #[tokio::test]
    async fn invalid_update_is_reported_before_the_load() {
        let mut allocations = MockLeaveAllocationRepository::new();
        allocations.expect_get().never();
        let handler =
            UpdateLeaveAllocationHandler::new(Arc::new(allocations), leave_types(true), clock());

        let err = handler
            .handle(
                UpdateLeaveAllocation {
                    id: 3,
                    allocation: UpdateLeaveAllocationDto {
                        id: 0,
                        number_of_days: 5,
                        leave_type_id: 1,
                        period: 2020,
                    },
                },
                &RequestContext::new("hr.jane"),
            )
            .await
            .unwrap_err();

        match err {
            ApplicationError::Validation(failure) => {
                assert!(failure.violations().has_field("period"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_to_unknown_leave_type_writes_nothing() {
        let mut allocations = MockLeaveAllocationRepository::new();
        allocations.expect_get().never();
        allocations.expect_update().never();
        let handler =
            UpdateLeaveAllocationHandler::new(Arc::new(allocations), leave_types(false), clock());

        let err = handler
            .handle(
                UpdateLeaveAllocation {
                    id: 3,
                    allocation: UpdateLeaveAllocationDto {
                        id: 0,
                        number_of_days: 5,
                        leave_type_id: 42,
                        period: 2026,
                    },
                },
                &RequestContext::new("hr.jane"),
            )
            .await
            .unwrap_err();

        match err {
            ApplicationError::Validation(failure) => {
                let violations = failure.violations();
                assert!(violations.has_field("leave_type_id"));
                assert_eq!(violations.len(), 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn detail_of_missing_allocation_is_not_found() {
        let mut allocations = MockLeaveAllocationRepository::new();
        allocations.expect_get_with_details().returning(|_| Ok(None));
        let handler = GetLeaveAllocationDetailHandler::new(Arc::new(allocations));

        let err = handler
            .handle(
                GetLeaveAllocationDetail { id: 4 },
                &RequestContext::new("hr.jane"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "LeaveAllocation (4) was not found.");
    }
}
