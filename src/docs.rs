use crate::dto::{
    ChangeLeaveRequestApprovalDto, CreateLeaveAllocationDto, CreateLeaveRequestDto,
    CreateLeaveTypeDto, LeaveAllocationDto, LeaveRequestDto, LeaveTypeDto,
    UpdateLeaveAllocationDto, UpdateLeaveRequestDto,
};
use crate::features::CommandResponse;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Leave Management API",
        version = "1.0.0",
        description = r#"
## HR Leave Management

Define leave types, allocate yearly day balances and submit leave requests
for approval.

### 🔹 Key Features
- **Leave Types**
  - Create, update, list and delete the kinds of leave employees can take
- **Leave Allocations**
  - Grant a number of days of a leave type for a period (year)
- **Leave Requests**
  - Submit, amend, cancel and delete requests; HR approves or rejects

### 🔐 Security
Every endpoint expects a **JWT Bearer** access token.
Only **Admin** or **HR** can manage types and allocations or change approval.

### 📦 Response Format
- Create endpoints answer with `{success, message, id, errors}`
- Validation failures on update answer `400` with `{message, errors}`
- Unknown ids answer `404` with `{message}`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_types::list_leave_types,
        crate::api::leave_types::get_leave_type,
        crate::api::leave_types::create_leave_type,
        crate::api::leave_types::update_leave_type,
        crate::api::leave_types::delete_leave_type,

        crate::api::leave_allocations::list_leave_allocations,
        crate::api::leave_allocations::get_leave_allocation,
        crate::api::leave_allocations::create_leave_allocation,
        crate::api::leave_allocations::update_leave_allocation,
        crate::api::leave_allocations::delete_leave_allocation,

        crate::api::leave_requests::list_leave_requests,
        crate::api::leave_requests::get_leave_request,
        crate::api::leave_requests::create_leave_request,
        crate::api::leave_requests::update_leave_request,
        crate::api::leave_requests::change_leave_request_approval,
        crate::api::leave_requests::delete_leave_request
    ),
    components(
        schemas(
            LeaveTypeDto,
            CreateLeaveTypeDto,
            LeaveAllocationDto,
            CreateLeaveAllocationDto,
            UpdateLeaveAllocationDto,
            LeaveRequestDto,
            CreateLeaveRequestDto,
            UpdateLeaveRequestDto,
            ChangeLeaveRequestApprovalDto,
            CommandResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Leave Types", description = "Leave type APIs"),
        (name = "Leave Allocations", description = "Leave allocation APIs"),
        (name = "Leave Requests", description = "Leave request APIs"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_approval_route_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/leave-requests/{id}/approval"));
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
