pub mod audit;
pub mod leave_allocation;
pub mod leave_request;
pub mod leave_type;
pub mod role;

pub use audit::{Audit, Audited};
pub use leave_allocation::LeaveAllocation;
pub use leave_request::{LeaveRequest, LeaveRequestStatus};
pub use leave_type::LeaveType;
pub use role::Role;
