//! Shapes exchanged with callers. Entities never leave the crate directly.

pub mod leave_allocation;
pub mod leave_request;
pub mod leave_type;

pub use leave_allocation::{CreateLeaveAllocationDto, LeaveAllocationDto, UpdateLeaveAllocationDto};
pub use leave_request::{
    ChangeLeaveRequestApprovalDto, CreateLeaveRequestDto, LeaveRequestDto, UpdateLeaveRequestDto,
};
pub use leave_type::{CreateLeaveTypeDto, LeaveTypeDto};
