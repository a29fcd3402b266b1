use axum::{
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        achievement::{self, ACHIEVEMENT_TAG},
        admin::{self, ADMIN_TAG},
        auth::{self, AUTH_TAG},
        event::{self, EVENT_TAG},
        notification::{self, NOTIFICATION_TAG},
        shop::{self, SHOP_TAG},
        user::{self, USER_TAG},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Meritboard API", description = "School points, events, achievements and shop"),
    paths(
        auth::register,
        auth::login,
        auth::me,
        user::get_profile,
        user::update_profile,
        user::change_password,
        user::get_my_achievements,
        user::get_my_events,
        user::get_leaderboard,
        admin::get_users,
        admin::get_user,
        admin::create_user,
        admin::update_user,
        admin::delete_user,
        admin::reset_password,
        admin::adjust_points,
        event::get_events,
        event::get_event,
        event::create_event,
        event::update_event,
        event::delete_event,
        event::register_for_event,
        event::unregister_from_event,
        event::get_participants,
        event::confirm_attendance,
        event::cancel_attendance,
        event::export_participants,
        achievement::get_achievements,
        achievement::get_achievement,
        achievement::create_achievement,
        achievement::update_achievement,
        achievement::delete_achievement,
        achievement::assign_achievement,
        achievement::revoke_achievement,
        shop::get_products,
        shop::get_product,
        shop::create_product,
        shop::update_product,
        shop::delete_product,
        shop::place_order,
        shop::get_my_orders,
        shop::get_order,
        shop::get_order_status,
        shop::update_order_status,
        shop::cancel_order,
        shop::get_all_orders,
        notification::get_notifications,
        notification::get_unread_count,
        notification::mark_read,
        notification::mark_all_read,
        notification::delete_notification,
    ),
    tags(
        (name = AUTH_TAG, description = "Registration and login"),
        (name = USER_TAG, description = "Own profile, history and the leaderboard"),
        (name = ADMIN_TAG, description = "User management"),
        (name = EVENT_TAG, description = "Events, registration and attendance"),
        (name = ACHIEVEMENT_TAG, description = "Achievements and manual awards"),
        (name = SHOP_TAG, description = "Products and orders"),
        (name = NOTIFICATION_TAG, description = "Notification center"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/users/me",
            get(user::get_profile).put(user::update_profile),
        )
        .route("/api/users/me/password", put(user::change_password))
        .route("/api/users/me/achievements", get(user::get_my_achievements))
        .route("/api/users/me/events", get(user::get_my_events))
        .route("/api/users/leaderboard", get(user::get_leaderboard))
        .route(
            "/api/admin/users",
            get(admin::get_users).post(admin::create_user),
        )
        .route(
            "/api/admin/users/{user_id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::delete_user),
        )
        .route(
            "/api/admin/users/{user_id}/reset-password",
            post(admin::reset_password),
        )
        .route("/api/admin/users/{user_id}/points", post(admin::adjust_points))
        .route(
            "/api/events",
            get(event::get_events).post(event::create_event),
        )
        .route(
            "/api/events/{event_id}",
            get(event::get_event)
                .put(event::update_event)
                .delete(event::delete_event),
        )
        .route(
            "/api/events/{event_id}/register",
            post(event::register_for_event).delete(event::unregister_from_event),
        )
        .route(
            "/api/admin/events/{event_id}/participants",
            get(event::get_participants),
        )
        .route(
            "/api/admin/events/{event_id}/confirm-attendance",
            post(event::confirm_attendance),
        )
        .route(
            "/api/admin/events/{event_id}/cancel-attendance",
            post(event::cancel_attendance),
        )
        .route(
            "/api/admin/events/{event_id}/export-participants",
            get(event::export_participants),
        )
        .route(
            "/api/achievements",
            get(achievement::get_achievements).post(achievement::create_achievement),
        )
        .route(
            "/api/achievements/{achievement_id}",
            get(achievement::get_achievement)
                .put(achievement::update_achievement)
                .delete(achievement::delete_achievement),
        )
        .route(
            "/api/admin/achievements/{achievement_id}/assign",
            post(achievement::assign_achievement),
        )
        .route(
            "/api/admin/achievements/{achievement_id}/revoke",
            post(achievement::revoke_achievement),
        )
        .route(
            "/api/products",
            get(shop::get_products).post(shop::create_product),
        )
        .route(
            "/api/products/{product_id}",
            get(shop::get_product)
                .put(shop::update_product)
                .delete(shop::delete_product),
        )
        .route("/api/products/order", post(shop::place_order))
        .route("/api/products/orders", get(shop::get_my_orders))
        .route("/api/products/orders/{order_id}", get(shop::get_order))
        .route(
            "/api/products/orders/{order_id}/status",
            get(shop::get_order_status).put(shop::update_order_status),
        )
        .route(
            "/api/products/orders/{order_id}/cancel",
            post(shop::cancel_order),
        )
        .route("/api/admin/orders", get(shop::get_all_orders))
        .route("/api/notifications", get(notification::get_notifications))
        .route(
            "/api/notifications/unread-count",
            get(notification::get_unread_count),
        )
        .route("/api/notifications/read-all", put(notification::mark_all_read))
        .route(
            "/api/notifications/{notification_id}",
            delete(notification::delete_notification),
        )
        .route(
            "/api/notifications/{notification_id}/read",
            put(notification::mark_read),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
