//! Field-by-field transforms between DTOs and entities.
//!
//! Creating an entity from a DTO leaves the id at `0` and the audit envelope
//! empty; merging an update DTO touches only the fields the DTO carries.

use crate::dto::{
    CreateLeaveAllocationDto, CreateLeaveRequestDto, CreateLeaveTypeDto, LeaveAllocationDto,
    LeaveRequestDto, LeaveTypeDto, UpdateLeaveAllocationDto, UpdateLeaveRequestDto,
};
use crate::model::{LeaveAllocation, LeaveRequest, LeaveType};

/// Copies an update payload onto a loaded entity.
pub trait MergeInto<E> {
    fn merge_into(self, entity: &mut E);
}

impl From<CreateLeaveTypeDto> for LeaveType {
    fn from(dto: CreateLeaveTypeDto) -> Self {
        Self {
            name: dto.name,
            default_days: dto.default_days,
            ..Self::default()
        }
    }
}

impl From<&LeaveType> for LeaveTypeDto {
    fn from(leave_type: &LeaveType) -> Self {
        Self {
            id: leave_type.id,
            name: leave_type.name.clone(),
            default_days: leave_type.default_days,
            date_created: leave_type.audit.date_created,
        }
    }
}

impl MergeInto<LeaveType> for LeaveTypeDto {
    fn merge_into(self, entity: &mut LeaveType) {
        entity.name = self.name;
        entity.default_days = self.default_days;
    }
}

impl From<CreateLeaveAllocationDto> for LeaveAllocation {
    fn from(dto: CreateLeaveAllocationDto) -> Self {
        Self {
            number_of_days: dto.number_of_days,
            leave_type_id: dto.leave_type_id,
            period: dto.period,
            ..Self::default()
        }
    }
}

impl From<&LeaveAllocation> for LeaveAllocationDto {
    fn from(allocation: &LeaveAllocation) -> Self {
        Self {
            id: allocation.id,
            number_of_days: allocation.number_of_days,
            leave_type_id: allocation.leave_type_id,
            leave_type: allocation.leave_type.as_ref().map(LeaveTypeDto::from),
            period: allocation.period,
            date_created: allocation.audit.date_created,
        }
    }
}

impl MergeInto<LeaveAllocation> for UpdateLeaveAllocationDto {
    fn merge_into(self, entity: &mut LeaveAllocation) {
        if entity.leave_type_id != self.leave_type_id {
            entity.leave_type = None;
        }
        entity.number_of_days = self.number_of_days;
        entity.leave_type_id = self.leave_type_id;
        entity.period = self.period;
    }
}

impl From<CreateLeaveRequestDto> for LeaveRequest {
    fn from(dto: CreateLeaveRequestDto) -> Self {
        Self {
            start_date: dto.start_date,
            end_date: dto.end_date,
            leave_type_id: dto.leave_type_id,
            request_comments: dto.request_comments,
            ..Self::default()
        }
    }
}

impl From<&LeaveRequest> for LeaveRequestDto {
    fn from(request: &LeaveRequest) -> Self {
        Self {
            id: request.id,
            start_date: request.start_date,
            end_date: request.end_date,
            leave_type_id: request.leave_type_id,
            leave_type: request.leave_type.as_ref().map(LeaveTypeDto::from),
            date_requested: request.date_requested,
            request_comments: request.request_comments.clone(),
            date_actioned: request.date_actioned,
            approved: request.approved,
            cancelled: request.cancelled,
            status: request.status().to_string(),
            date_created: request.audit.date_created,
        }
    }
}

/// Approval state is never part of a full update; it has its own path.
impl MergeInto<LeaveRequest> for UpdateLeaveRequestDto {
    fn merge_into(self, entity: &mut LeaveRequest) {
        if entity.leave_type_id != self.leave_type_id {
            entity.leave_type = None;
        }
        entity.start_date = self.start_date;
        entity.end_date = self.end_date;
        entity.leave_type_id = self.leave_type_id;
        entity.request_comments = self.request_comments;
        if let Some(cancelled) = self.cancelled {
            entity.cancelled = cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn stored_request() -> LeaveRequest {
        LeaveRequest {
            id: 7,
            start_date: Utc.with_ymd_and_hms(2026, 11, 2, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2026, 11, 6, 0, 0, 0).unwrap(),
            leave_type_id: 1,
            request_comments: Some("before".to_string()),
            approved: Some(true),
            cancelled: true,
            ..LeaveRequest::default()
        }
    }

    #[test]
    fn full_update_keeps_approval_and_absent_cancellation() {
        let mut entity = stored_request();
        let update = UpdateLeaveRequestDto {
            id: 7,
            start_date: entity.start_date,
            end_date: entity.end_date,
            leave_type_id: 1,
            request_comments: Some("after".to_string()),
            cancelled: None,
        };

        update.merge_into(&mut entity);

        assert_eq!(entity.request_comments.as_deref(), Some("after"));
        assert_eq!(entity.approved, Some(true));
        assert!(entity.cancelled);
    }

    #[test]
    fn request_dto_carries_status_and_expanded_type() {
        let mut entity = stored_request();
        entity.cancelled = false;
        entity.leave_type = Some(LeaveType {
            id: 1,
            name: "Vacation".to_string(),
            default_days: 10,
            ..LeaveType::default()
        });

        let dto = LeaveRequestDto::from(&entity);

        assert_eq!(dto.status, "approved");
        assert_eq!(dto.leave_type.map(|t| t.name).as_deref(), Some("Vacation"));
    }
}
