use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::{booking, payments, tickets};
use crate::config::Config;
use crate::domain::repositories::{
    MysqlBookingRepository, MysqlEnrollmentRepository, MysqlPaymentRepository,
    MysqlRoomRepository, MysqlTicketRepository,
};
use crate::domain::services::booking_service::BookingService;
use crate::domain::services::payment_service::PaymentService;
use crate::domain::services::ticket_service::TicketService;
use crate::error::AppError;
use crate::middleware::auth;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub booking_service: BookingService,
    pub payment_service: PaymentService,
    pub ticket_service: TicketService,
}

impl AppState {
    /// 用 MySQL 仓储装配服务；测试侧用内存替身走 new 路径
    pub fn with_mysql(config: Config, pool: sqlx::MySqlPool) -> Self {
        let enrollments = Arc::new(MysqlEnrollmentRepository::new(pool.clone()));
        let tickets = Arc::new(MysqlTicketRepository::new(pool.clone()));
        let rooms = Arc::new(MysqlRoomRepository::new(pool.clone()));
        let bookings = Arc::new(MysqlBookingRepository::new(pool.clone()));
        let payments = Arc::new(MysqlPaymentRepository::new(pool));

        Self {
            config,
            booking_service: BookingService::new(
                enrollments.clone(),
                tickets.clone(),
                rooms,
                bookings,
            ),
            payment_service: PaymentService::new(
                enrollments.clone(),
                tickets.clone(),
                payments,
            ),
            ticket_service: TicketService::new(enrollments, tickets),
        }
    }
}

pub async fn create_app(state: AppState) -> Result<Router, AppError> {
    let app_state = Arc::new(state);

    // 健康检查路由，不走认证
    let health_route = Router::new().route("/health", get(|| async { "OK" }));

    // API 路由
    let api_routes = Router::new()
        .nest("/booking", booking::routes())
        .nest("/payments", payments::routes())
        .nest("/tickets", tickets::routes())
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::auth_middleware,
        ));

    // 组合所有路由
    let app = Router::new()
        .merge(api_routes)
        .merge(health_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(app_state);

    Ok(app)
}
