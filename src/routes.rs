use crate::{
    api::{dashboard, employee},
    auth::{handlers, middleware::session_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{
    middleware::{Condition, from_fn},
    web,
};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = 60_000 / requests_per_min as u64;
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms.max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap_or_else(GovernorConfig::default);
        Governor::new(&cfg)
    }

    let limited = config.rate_limit_enabled;
    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(Condition::new(limited, login_limiter.clone()))
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/logout")
                    .wrap(Condition::new(limited, login_limiter))
                    .route(web::post().to(handlers::logout)),
            )
            .service(web::resource("/session").route(web::get().to(handlers::current_session))),
    );

    // Routes behind the session gate
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(session_middleware))
            .wrap(Condition::new(limited, protected_limiter))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    )
                    // /employees/{id}/status
                    .service(
                        web::resource("/{id}/status")
                            .route(web::patch().to(employee::toggle_status)),
                    ),
            )
            .service(
                web::scope("/dashboard")
                    .service(web::resource("/stats").route(web::get().to(dashboard::stats)))
                    .service(web::resource("/list").route(web::get().to(dashboard::current_list)))
                    .service(
                        web::resource("/list/filter").route(web::put().to(dashboard::set_filter)),
                    )
                    .service(web::resource("/list/page").route(web::put().to(dashboard::set_page))),
            ),
    );
}
