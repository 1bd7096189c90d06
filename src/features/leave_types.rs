use std::sync::Arc;

use async_trait::async_trait;

use super::{CommandResponse, RequestContext, RequestHandler, requests};
use crate::dto::{CreateLeaveTypeDto, LeaveTypeDto};
use crate::error::{ApplicationError, ApplicationResult};
use crate::mapping::MergeInto;
use crate::model::LeaveType;
use crate::repository::LeaveTypeRepository;
use crate::validation::{RuleSet, leave_type_rules};

const ENTITY: &str = "LeaveType";

#[derive(Debug, Clone)]
pub struct CreateLeaveType(pub CreateLeaveTypeDto);

#[derive(Debug, Clone)]
pub struct UpdateLeaveType {
    pub id: i32,
    pub leave_type: LeaveTypeDto,
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteLeaveType {
    pub id: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct GetLeaveTypeList;

#[derive(Debug, Clone, Copy)]
pub struct GetLeaveTypeDetail {
    pub id: i32,
}

requests! {
    CreateLeaveType => CommandResponse,
    UpdateLeaveType => (),
    DeleteLeaveType => (),
    GetLeaveTypeList => Vec<LeaveTypeDto>,
    GetLeaveTypeDetail => LeaveTypeDto,
}

pub struct CreateLeaveTypeHandler {
    leave_types: Arc<dyn LeaveTypeRepository>,
    rules: RuleSet<CreateLeaveTypeDto>,
}

impl CreateLeaveTypeHandler {
    pub fn new(leave_types: Arc<dyn LeaveTypeRepository>) -> Self {
        Self {
            leave_types,
            rules: leave_type_rules(),
        }
    }
}

#[async_trait]
impl RequestHandler<CreateLeaveType> for CreateLeaveTypeHandler {
    async fn handle(
        &self,
        request: CreateLeaveType,
        ctx: &RequestContext,
    ) -> ApplicationResult<CommandResponse> {
        let dto = request.0;
        let violations = self.rules.validate(&dto).await?;
        if !violations.is_empty() {
            tracing::info!(errors = violations.len(), "Leave type rejected");
            return Ok(CommandResponse::failed(&violations));
        }

        ctx.ensure_active()?;
        let created = self.leave_types.add(LeaveType::from(dto), &ctx.actor).await?;
        tracing::info!(leave_type_id = created.id, actor = %ctx.actor, "Leave type created");
        Ok(CommandResponse::created(created.id))
    }
}

pub struct UpdateLeaveTypeHandler {
    leave_types: Arc<dyn LeaveTypeRepository>,
    rules: RuleSet<LeaveTypeDto>,
}

impl UpdateLeaveTypeHandler {
    pub fn new(leave_types: Arc<dyn LeaveTypeRepository>) -> Self {
        Self {
            leave_types,
            rules: leave_type_rules(),
        }
    }
}

#[async_trait]
impl RequestHandler<UpdateLeaveType> for UpdateLeaveTypeHandler {
    async fn handle(&self, request: UpdateLeaveType, ctx: &RequestContext) -> ApplicationResult<()> {
        let mut dto = request.leave_type;
        dto.id = request.id;
        self.rules.validate(&dto).await?.into_result()?;

        ctx.ensure_active()?;
        let mut leave_type = self
            .leave_types
            .get(request.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(ENTITY, request.id))?;

        dto.merge_into(&mut leave_type);
        ctx.ensure_active()?;
        self.leave_types.update(leave_type, &ctx.actor).await?;
        Ok(())
    }
}

pub struct DeleteLeaveTypeHandler {
    leave_types: Arc<dyn LeaveTypeRepository>,
}

impl DeleteLeaveTypeHandler {
    pub fn new(leave_types: Arc<dyn LeaveTypeRepository>) -> Self {
        Self { leave_types }
    }
}

#[async_trait]
impl RequestHandler<DeleteLeaveType> for DeleteLeaveTypeHandler {
    async fn handle(&self, request: DeleteLeaveType, ctx: &RequestContext) -> ApplicationResult<()> {
        ctx.ensure_active()?;
        let leave_type = self
            .leave_types
            .get(request.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(ENTITY, request.id))?;

        ctx.ensure_active()?;
        self.leave_types.delete(leave_type).await?;
        tracing::info!(leave_type_id = request.id, actor = %ctx.actor, "Leave type deleted");
        Ok(())
    }
}

pub struct GetLeaveTypeListHandler {
    leave_types: Arc<dyn LeaveTypeRepository>,
}

impl GetLeaveTypeListHandler {
    pub fn new(leave_types: Arc<dyn LeaveTypeRepository>) -> Self {
        Self { leave_types }
    }
}

#[async_trait]
impl RequestHandler<GetLeaveTypeList> for GetLeaveTypeListHandler {
    async fn handle(
        &self,
        _: GetLeaveTypeList,
        ctx: &RequestContext,
    ) -> ApplicationResult<Vec<LeaveTypeDto>> {
        ctx.ensure_active()?;
        let leave_types = self.leave_types.get_all().await?;
        Ok(leave_types.iter().map(LeaveTypeDto::from).collect())
    }
}

pub struct GetLeaveTypeDetailHandler {
    leave_types: Arc<dyn LeaveTypeRepository>,
}

impl GetLeaveTypeDetailHandler {
    pub fn new(leave_types: Arc<dyn LeaveTypeRepository>) -> Self {
        Self { leave_types }
    }
}

#[async_trait]
impl RequestHandler<GetLeaveTypeDetail> for GetLeaveTypeDetailHandler {
    async fn handle(
        &self,
        request: GetLeaveTypeDetail,
        ctx: &RequestContext,
    ) -> ApplicationResult<LeaveTypeDto> {
        ctx.ensure_active()?;
        self.leave_types
            .get(request.id)
            .await?
            .map(|leave_type| LeaveTypeDto::from(&leave_type))
            .ok_or_else(|| ApplicationError::not_found(ENTITY, request.id))
    }
}
