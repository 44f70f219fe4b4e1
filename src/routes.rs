use crate::{
    api::{admin, announcement, exam, leave_request, notification, profile, session, timetable},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let signup_limiter = Arc::new(build_limiter(config.rate_signup_per_min));
    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/signup")
                    .wrap(signup_limiter.clone())
                    .route(web::post().to(handlers::signup)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limiter.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(web::resource("/session").route(web::get().to(session::session)))
            .service(
                web::scope("/admin")
                    .service(
                        web::resource("/create-admin")
                            .route(web::post().to(admin::create_admin)),
                    )
                    .service(
                        web::resource("/create-faculty")
                            .route(web::post().to(admin::create_faculty)),
                    )
                    .service(
                        web::resource("/approve-faculty")
                            .route(web::post().to(admin::approve_faculty)),
                    )
                    .service(
                        web::resource("/pending-faculty")
                            .route(web::get().to(admin::pending_faculty)),
                    ),
            )
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_request::leave_list))
                            .route(web::post().to(leave_request::create_leave)),
                    )
                    // /leave/mine
                    .service(web::resource("/mine").route(web::get().to(leave_request::my_leaves)))
                    // /leave/{id}
                    .service(web::resource("/{id}").route(web::get().to(leave_request::get_leave)))
                    // /leave/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leave_request::approve_leave)),
                    )
                    // /leave/{id}/reject
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(leave_request::reject_leave)),
                    ),
            )
            .service(
                web::scope("/notifications")
                    .service(
                        web::resource("")
                            .route(web::get().to(notification::list_notifications)),
                    )
                    .service(
                        web::resource("/broadcast")
                            .route(web::post().to(notification::broadcast)),
                    )
                    .service(
                        web::resource("/read-all")
                            .route(web::put().to(notification::mark_all_read)),
                    )
                    .service(
                        web::resource("/{id}/read").route(web::put().to(notification::mark_read)),
                    ),
            )
            .service(
                web::scope("/announcements").service(
                    web::resource("")
                        .route(web::get().to(announcement::list_announcements))
                        .route(web::post().to(announcement::create_announcement)),
                ),
            )
            .service(
                web::scope("/exams").service(
                    web::resource("")
                        .route(web::get().to(exam::list_exam_schedules))
                        .route(web::post().to(exam::create_exam_schedule)),
                ),
            )
            .service(
                web::resource("/timetable")
                    .route(web::get().to(timetable::get_timetable))
                    .route(web::put().to(timetable::put_timetable)),
            )
            .service(
                web::resource("/profile")
                    .route(web::get().to(profile::get_profile))
                    .route(web::put().to(profile::update_profile)),
            ),
    );
}
