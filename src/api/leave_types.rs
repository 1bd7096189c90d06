use crate::auth::auth::AuthUser;
use crate::dispatcher::Dispatcher;
use crate::dto::{CreateLeaveTypeDto, LeaveTypeDto};
use crate::features::CommandResponse;
use crate::features::leave_types::{
    CreateLeaveType, DeleteLeaveType, GetLeaveTypeDetail, GetLeaveTypeList, UpdateLeaveType,
};
use actix_web::{HttpResponse, Responder, web};

use super::command_response;

/// list leave types
#[utoipa::path(
    get,
    path = "/api/leave-types",
    responses(
        (status = 200, description = "All leave types", body = [LeaveTypeDto]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Types"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username))]
pub async fn list_leave_types(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
) -> actix_web::Result<impl Responder> {
    let leave_types = dispatcher.send(GetLeaveTypeList, &auth.context()).await?;
    Ok(HttpResponse::Ok().json(leave_types))
}

/// get one leave type
#[utoipa::path(
    get,
    path = "/api/leave-types/{id}",
    params(
        ("id" = i32, Path, description = "Leave type id")
    ),
    responses(
        (status = 200, description = "Leave type found", body = LeaveTypeDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Leave type not found", body = Object, example = json!({
            "message": "LeaveType (9) was not found."
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Types"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username, id = *path))]
pub async fn get_leave_type(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let leave_type = dispatcher
        .send(GetLeaveTypeDetail { id }, &auth.context())
        .await?;
    Ok(HttpResponse::Ok().json(leave_type))
}

/// create a leave type
#[utoipa::path(
    post,
    path = "/api/leave-types",
    request_body(
        content = CreateLeaveTypeDto,
        description = "Leave type payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave type created", body = CommandResponse),
        (status = 400, description = "Validation failed", body = CommandResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Types"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username))]
pub async fn create_leave_type(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    payload: web::Json<CreateLeaveTypeDto>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let response = dispatcher
        .send(CreateLeaveType(payload.into_inner()), &auth.context())
        .await?;
    Ok(command_response(response))
}

/// update a leave type
#[utoipa::path(
    put,
    path = "/api/leave-types/{id}",
    params(
        ("id" = i32, Path, description = "Leave type id")
    ),
    request_body = LeaveTypeDto,
    responses(
        (status = 204, description = "Leave type updated"),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave type not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Types"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username, id = *path))]
pub async fn update_leave_type(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i32>,
    payload: web::Json<LeaveTypeDto>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let request = UpdateLeaveType {
        id: path.into_inner(),
        leave_type: payload.into_inner(),
    };
    dispatcher.send(request, &auth.context()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// delete a leave type together with its allocations and requests
#[utoipa::path(
    delete,
    path = "/api/leave-types/{id}",
    params(
        ("id" = i32, Path, description = "Leave type id")
    ),
    responses(
        (status = 204, description = "Leave type deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave type not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave Types"
)]
#[tracing::instrument(skip_all, fields(user = %auth.username, id = *path))]
pub async fn delete_leave_type(
    auth: AuthUser,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let id = path.into_inner();
    dispatcher.send(DeleteLeaveType { id }, &auth.context()).await?;
    Ok(HttpResponse::NoContent().finish())
}
