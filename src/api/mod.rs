pub mod leave_allocations;
pub mod leave_requests;
pub mod leave_types;

use actix_web::HttpResponse;

use crate::features::CommandResponse;

/// `200` when the command went through, `400` with the collected errors otherwise.
pub(crate) fn command_response(response: CommandResponse) -> HttpResponse {
    if response.success {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::BadRequest().json(response)
    }
}
