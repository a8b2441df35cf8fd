//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;
mod views;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public pages
        .route("/", web::get().to(posts::post_list))
        .route("/about", web::get().to(posts::about))
        .route("/health", web::get().to(health::health_check))
        // Posts; `/post/new` must come before `/post/{id}`
        .service(
            web::resource("/post/new")
                .route(web::get().to(posts::post_new_form))
                .route(web::post().to(posts::post_new)),
        )
        .route("/post/{id}", web::get().to(posts::post_detail))
        .service(
            web::resource("/post/{id}/edit")
                .route(web::get().to(posts::post_edit_form))
                .route(web::post().to(posts::post_edit)),
        )
        .route("/post/{id}/remove", web::post().to(posts::post_remove))
        .route("/post/{id}/publish", web::post().to(posts::post_publish))
        .route("/drafts", web::get().to(posts::post_draft_list))
        // Comments
        .service(
            web::resource("/post/{id}/comment")
                .route(web::get().to(comments::add_comment_form))
                .route(web::post().to(comments::add_comment_to_post)),
        )
        .route(
            "/comment/{id}/approve",
            web::post().to(comments::comment_approve),
        )
        .route("/comment/{id}/remove", web::post().to(comments::comment_remove))
        // Accounts
        .service(
            web::scope("/accounts")
                .service(
                    web::resource("/register")
                        .route(web::get().to(auth::register_form))
                        .route(web::post().to(auth::register)),
                )
                .service(
                    web::resource("/login")
                        .route(web::get().to(auth::login_form))
                        .route(web::post().to(auth::login)),
                )
                .route("/logout", web::post().to(auth::logout)),
        );
}
