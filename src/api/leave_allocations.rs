use crate::auth::auth::AuthUser;
use crate::dispatcher::Dispatcher;
use crate::dto::{CreateLeaveAllocationDto, LeaveAllocationDto, UpdateLeaveAllocationDto};
use crate::features::CommandResponse;
use crate::features::leave_allocations::{
    CreateLeaveAllocation, DeleteLeaveAllocation, GetLeaveAllocationDetail,
    GetLeaveAllocationList, UpdateLeaveAllocation,
};
use actix_web::{HttpResponse, Responder, web};

use super::command_response;

/// list allocations with their leave type
#[utoipa::path(
    get,
    path = "/api/leave-allocations",
    responses(
        (status = 200, description = "All leave allocations", body = [LeaveAllocationDto]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Allocations"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username))]
pub async fn list_leave_allocations(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
) -> actix_web::Result<impl Responder> {
    let allocations = dispatcher
        .send(GetLeaveAllocationList, &auth.context())
        .await?;
    Ok(HttpResponse::Ok().json(allocations))
}

#[utoipa::path(
    get,
    path = "/api/leave-allocations/{id}",
    params(
        ("id" = i32, Path, description = "Leave allocation id")
    ),
    responses(
        (status = 200, description = "Leave allocation found", body = LeaveAllocationDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Leave allocation not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Allocations"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username, id = *path))]
pub async fn get_leave_allocation(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let allocation = dispatcher
        .send(GetLeaveAllocationDetail { id }, &auth.context())
        .await?;
    Ok(HttpResponse::Ok().json(allocation))
}

#[utoipa::path(
    post,
    path = "/api/leave-allocations",
    request_body(
        content = CreateLeaveAllocationDto,
        description = "Allocation payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave allocation created", body = CommandResponse),
        (status = 400, description = "Validation failed", body = CommandResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Allocations"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username))]
pub async fn create_leave_allocation(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    payload: web::Json<CreateLeaveAllocationDto>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let response = dispatcher
        .send(CreateLeaveAllocation(payload.into_inner()), &auth.context())
        .await?;
    Ok(command_response(response))
}

#[utoipa::path(
    put,
    path = "/api/leave-allocations/{id}",
    params(
        ("id" = i32, Path, description = "Leave allocation id")
    ),
    request_body = UpdateLeaveAllocationDto,
    responses(
        (status = 204, description = "Leave allocation updated"),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave allocation not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Allocations"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username, id = *path))]
pub async fn update_leave_allocation(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i32>,
    payload: web::Json<UpdateLeaveAllocationDto>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let request = UpdateLeaveAllocation {
        id: path.into_inner(),
        allocation: payload.into_inner(),
    };
    dispatcher.send(request, &auth.context()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    delete,
    path = "/api/leave-allocations/{id}",
    params(
        ("id" = i32, Path, description = "Leave allocation id")
    ),
    responses(
        (status = 204, description = "Leave allocation deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave allocation not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Allocations"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username, id = *path))]
pub async fn delete_leave_allocation(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let id = path.into_inner();
    dispatcher
        .send(DeleteLeaveAllocation { id }, &auth.context())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
