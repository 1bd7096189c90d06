use crate::{
    api::{leave_allocations, leave_requests, leave_types},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

// Helper to build per-scope limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
    // Both values are clamped above zero, the only case `finish` rejects
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_default();
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/leave-types")
                    // /leave-types
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_types::list_leave_types))
                            .route(web::post().to(leave_types::create_leave_type)),
                    )
                    // /leave-types/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(leave_types::get_leave_type))
                            .route(web::put().to(leave_types::update_leave_type))
                            .route(web::delete().to(leave_types::delete_leave_type)),
                    ),
            )
            .service(
                web::scope("/leave-allocations")
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_allocations::list_leave_allocations))
                            .route(web::post().to(leave_allocations::create_leave_allocation)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(leave_allocations::get_leave_allocation))
                            .route(web::put().to(leave_allocations::update_leave_allocation))
                            .route(web::delete().to(leave_allocations::delete_leave_allocation)),
                    ),
            )
            .service(
                web::scope("/leave-requests")
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_requests::list_leave_requests))
                            .route(web::post().to(leave_requests::create_leave_request)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(leave_requests::get_leave_request))
                            .route(web::put().to(leave_requests::update_leave_request))
                            .route(web::delete().to(leave_requests::delete_leave_request)),
                    )
                    // /leave-requests/{id}/approval
                    .service(
                        web::resource("/{id}/approval")
                            .route(web::put().to(leave_requests::change_leave_request_approval)),
                    ),
            ),
    );
}
