use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::{CommandResponse, RequestContext, RequestHandler, SideEffectPolicy, requests};
use crate::dto::{
    ChangeLeaveRequestApprovalDto, CreateLeaveRequestDto, LeaveRequestDto, UpdateLeaveRequestDto,
};
use crate::error::{ApplicationError, ApplicationResult};
use crate::mapping::MergeInto;
use crate::model::LeaveRequest;
use crate::notification::{Email, EmailSender, EmailSettings};
use crate::repository::{LeaveRequestRepository, LeaveTypeRepository};
use crate::validation::{RuleSet, create_leave_request_rules, update_leave_request_rules};

const ENTITY: &str = "LeaveRequest";
const LONG_DATE: &str = "%A, %B %-d, %Y";

#[derive(Debug, Clone)]
pub struct CreateLeaveRequest(pub CreateLeaveRequestDto);

/// The two ways a stored leave request can be changed.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateLeaveRequestPayload {
    Full(UpdateLeaveRequestDto),
    ChangeApproval(ChangeLeaveRequestApprovalDto),
}

#[derive(Debug, Clone)]
pub struct UpdateLeaveRequest {
    pub id: i32,
    pub payload: UpdateLeaveRequestPayload,
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteLeaveRequest {
    pub id: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct GetLeaveRequestList;

#[derive(Debug, Clone, Copy)]
pub struct GetLeaveRequestDetail {
    pub id: i32,
}

requests! {
    CreateLeaveRequest => CommandResponse,
    UpdateLeaveRequest => (),
    DeleteLeaveRequest => (),
    GetLeaveRequestList => Vec<LeaveRequestDto>,
    GetLeaveRequestDetail => LeaveRequestDto,
}

/// Persists a new request and tells the recipient about it.
///
/// The notice is sent after the insert. Under [`SideEffectPolicy::BestEffort`]
/// a failed send is logged and the create still succeeds.
pub struct CreateLeaveRequestHandler {
    requests: Arc<dyn LeaveRequestRepository>,
    emails: Arc<dyn EmailSender>,
    settings: EmailSettings,
    clock: Arc<dyn Clock>,
    rules: RuleSet<CreateLeaveRequestDto>,
    notification_policy: SideEffectPolicy,
}

impl CreateLeaveRequestHandler {
    pub fn new(
        requests: Arc<dyn LeaveRequestRepository>,
        leave_types: Arc<dyn LeaveTypeRepository>,
        emails: Arc<dyn EmailSender>,
        settings: EmailSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            requests,
            emails,
            settings,
            rules: create_leave_request_rules(leave_types, clock.clone()),
            clock,
            notification_policy: SideEffectPolicy::BestEffort,
        }
    }

    pub fn with_notification_policy(mut self, policy: SideEffectPolicy) -> Self {
        self.notification_policy = policy;
        self
    }

    fn submission_notice(&self, request: &LeaveRequest) -> Email {
        Email {
            to: self.settings.leave_request_recipient.clone(),
            subject: "Leave Request Submitted".to_string(),
            body: format!(
                "Your leave request for {} to {} has been submitted successfully.",
                request.start_date.format(LONG_DATE),
                request.end_date.format(LONG_DATE),
            ),
        }
    }
}

#[async_trait]
impl RequestHandler<CreateLeaveRequest> for CreateLeaveRequestHandler {
    async fn handle(
        &self,
        request: CreateLeaveRequest,
        ctx: &RequestContext,
    ) -> ApplicationResult<CommandResponse> {
        let dto = request.0;
        ctx.ensure_active()?;
        let violations = self.rules.validate(&dto).await?;
        if !violations.is_empty() {
            tracing::info!(errors = violations.len(), "Leave request rejected");
            return Ok(CommandResponse::failed(&violations));
        }

        let mut leave_request = LeaveRequest::from(dto);
        leave_request.date_requested = self.clock.utc();
        ctx.ensure_active()?;
        let created = self.requests.add(leave_request, &ctx.actor).await?;
        tracing::info!(leave_request_id = created.id, actor = %ctx.actor, "Leave request created");

        if let Err(err) = self.emails.send_email(self.submission_notice(&created)).await {
            match self.notification_policy {
                SideEffectPolicy::BestEffort => tracing::warn!(
                    error = %err,
                    leave_request_id = created.id,
                    "Leave request notification failed"
                ),
                SideEffectPolicy::Required => return Err(err.into()),
            }
        }

        Ok(CommandResponse::created(created.id))
    }
}

pub struct UpdateLeaveRequestHandler {
    requests: Arc<dyn LeaveRequestRepository>,
    clock: Arc<dyn Clock>,
    rules: RuleSet<UpdateLeaveRequestDto>,
}

impl UpdateLeaveRequestHandler {
    pub fn new(
        requests: Arc<dyn LeaveRequestRepository>,
        leave_types: Arc<dyn LeaveTypeRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            requests,
            clock,
            rules: update_leave_request_rules(leave_types),
        }
    }

    async fn load(&self, id: i32, ctx: &RequestContext) -> ApplicationResult<LeaveRequest> {
        ctx.ensure_active()?;
        self.requests
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(ENTITY, id))
    }
}

#[async_trait]
impl RequestHandler<UpdateLeaveRequest> for UpdateLeaveRequestHandler {
    async fn handle(
        &self,
        request: UpdateLeaveRequest,
        ctx: &RequestContext,
    ) -> ApplicationResult<()> {
        let leave_request = match request.payload {
            UpdateLeaveRequestPayload::Full(mut dto) => {
                dto.id = request.id;
                ctx.ensure_active()?;
                self.rules.validate(&dto).await?.into_result()?;

                let mut leave_request = self.load(request.id, ctx).await?;
                dto.merge_into(&mut leave_request);
                leave_request
            }
            UpdateLeaveRequestPayload::ChangeApproval(dto) => {
                let mut leave_request = self.load(request.id, ctx).await?;
                leave_request.change_approval(dto.approved, self.clock.utc());
                tracing::info!(
                    leave_request_id = request.id,
                    status = %leave_request.status(),
                    actor = %ctx.actor,
                    "Leave request approval changed"
                );
                leave_request
            }
        };

        ctx.ensure_active()?;
        self.requests.update(leave_request, &ctx.actor).await?;
        Ok(())
    }
}

pub struct DeleteLeaveRequestHandler {
    requests: Arc<dyn LeaveRequestRepository>,
}

impl DeleteLeaveRequestHandler {
    pub fn new(requests: Arc<dyn LeaveRequestRepository>) -> Self {
        Self { requests }
    }
}

#[async_trait]
impl RequestHandler<DeleteLeaveRequest> for DeleteLeaveRequestHandler {
    async fn handle(
        &self,
        request: DeleteLeaveRequest,
        ctx: &RequestContext,
    ) -> ApplicationResult<()> {
        ctx.ensure_active()?;
        let leave_request = self
            .requests
            .get(request.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(ENTITY, request.id))?;

        ctx.ensure_active()?;
        self.requests.delete(leave_request).await?;
        Ok(())
    }
}

pub struct GetLeaveRequestListHandler {
    requests: Arc<dyn LeaveRequestRepository>,
}

impl GetLeaveRequestListHandler {
    pub fn new(requests: Arc<dyn LeaveRequestRepository>) -> Self {
        Self { requests }
    }
}

#[async_trait]
impl RequestHandler<GetLeaveRequestList> for GetLeaveRequestListHandler {
    async fn handle(
        &self,
        _: GetLeaveRequestList,
        ctx: &RequestContext,
    ) -> ApplicationResult<Vec<LeaveRequestDto>> {
        ctx.ensure_active()?;
        let requests = self.requests.list_with_details().await?;
        Ok(requests.iter().map(LeaveRequestDto::from).collect())
    }
}

pub struct GetLeaveRequestDetailHandler {
    requests: Arc<dyn LeaveRequestRepository>,
}

impl GetLeaveRequestDetailHandler {
    pub fn new(requests: Arc<dyn LeaveRequestRepository>) -> Self {
        Self { requests }
    }
}

#[async_trait]
impl RequestHandler<GetLeaveRequestDetail> for GetLeaveRequestDetailHandler {
    async fn handle(
        &self,
        request: GetLeaveRequestDetail,
        ctx: &RequestContext,
    ) -> ApplicationResult<LeaveRequestDto> {
        ctx.ensure_active()?;
        self.requests
            .get_with_details(request.id)
            .await?
            .map(|leave_request| LeaveRequestDto::from(&leave_request))
            .ok_or_else(|| ApplicationError::not_found(ENTITY, request.id))
    }
}
