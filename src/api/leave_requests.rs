use crate::auth::auth::AuthUser;
use crate::dispatcher::Dispatcher;
use crate::dto::{
    ChangeLeaveRequestApprovalDto, CreateLeaveRequestDto, LeaveRequestDto, UpdateLeaveRequestDto,
};
use crate::features::CommandResponse;
use crate::features::leave_requests::{
    CreateLeaveRequest, DeleteLeaveRequest, GetLeaveRequestDetail, GetLeaveRequestList,
    UpdateLeaveRequest, UpdateLeaveRequestPayload,
};
use actix_web::{HttpResponse, Responder, web};

use super::command_response;

/// for getting leave requests endpoint
#[utoipa::path(
    get,
    path = "/api/leave-requests",
    responses(
        (status = 200, description = "All leave requests with their leave type", body = [LeaveRequestDto]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Requests"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username))]
pub async fn list_leave_requests(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
) -> actix_web::Result<impl Responder> {
    let requests = dispatcher.send(GetLeaveRequestList, &auth.context()).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/// for getting a leave request details endpoint
#[utoipa::path(
    get,
    path = "/api/leave-requests/{id}",
    params(
        ("id" = i32, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequestDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "LeaveRequest (12) was not found."
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Requests"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username, id = *path))]
pub async fn get_leave_request(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let request = dispatcher
        .send(GetLeaveRequestDetail { id }, &auth.context())
        .await?;
    Ok(HttpResponse::Ok().json(request))
}

/// Submit a leave request. A notice goes to the configured recipient.
#[utoipa::path(
    post,
    path = "/api/leave-requests",
    request_body(
        content = CreateLeaveRequestDto,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted", body = CommandResponse,
         example = json!({
            "success": true,
            "message": "Creation successful",
            "id": 1,
            "errors": []
         })
        ),
        (status = 400, description = "Validation failed", body = CommandResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Requests"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username))]
pub async fn create_leave_request(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    payload: web::Json<CreateLeaveRequestDto>,
) -> actix_web::Result<impl Responder> {
    let response = dispatcher
        .send(CreateLeaveRequest(payload.into_inner()), &auth.context())
        .await?;
    Ok(command_response(response))
}

/// Replace dates, type and comments; may also cancel. Approval is untouched.
#[utoipa::path(
    put,
    path = "/api/leave-requests/{id}",
    params(
        ("id" = i32, Path, description = "ID of the leave request to update")
    ),
    request_body = UpdateLeaveRequestDto,
    responses(
        (status = 204, description = "Leave request updated"),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Requests"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username, id = *path))]
pub async fn update_leave_request(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i32>,
    payload: web::Json<UpdateLeaveRequestDto>,
) -> actix_web::Result<impl Responder> {
    let request = UpdateLeaveRequest {
        id: path.into_inner(),
        payload: UpdateLeaveRequestPayload::Full(payload.into_inner()),
    };
    dispatcher.send(request, &auth.context()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Approve (`true`), reject (`false`) or reset (`null`) a leave request.
#[utoipa::path(
    put,
    path = "/api/leave-requests/{id}/approval",
    params(
        ("id" = i32, Path, description = "ID of the leave request to action")
    ),
    request_body = ChangeLeaveRequestApprovalDto,
    responses(
        (status = 204, description = "Approval status changed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Requests"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username, id = *path))]
pub async fn change_leave_request_approval(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i32>,
    payload: web::Json<ChangeLeaveRequestApprovalDto>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let request = UpdateLeaveRequest {
        id: path.into_inner(),
        payload: UpdateLeaveRequestPayload::ChangeApproval(payload.into_inner()),
    };
    dispatcher.send(request, &auth.context()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    delete,
    path = "/api/leave-requests/{id}",
    params(
        ("id" = i32, Path, description = "ID of the leave request to delete")
    ),
    responses(
        (status = 204, description = "Leave request deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Requests"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username, id = *path))]
pub async fn delete_leave_request(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    dispatcher
        .send(DeleteLeaveRequest { id }, &auth.context())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
