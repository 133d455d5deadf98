#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use eventa_api::config::{AuthConfig, Config, DatabaseConfig, LoggingConfig, ServerConfig};
use eventa_api::domain::models::booking::{Booking, BookingWithRoom};
use eventa_api::domain::models::enrollment::Enrollment;
use eventa_api::domain::models::hotel::Room;
use eventa_api::domain::models::payment::{CardIssuer, Payment};
use eventa_api::domain::models::ticket::{Ticket, TicketStatus, TicketType, TicketWithType};
use eventa_api::domain::repositories::{
    BookingRepository, EnrollmentRepository, PaymentRepository, RoomRepository, TicketRepository,
};
use eventa_api::domain::services::booking_service::BookingService;
use eventa_api::domain::services::payment_service::PaymentService;
use eventa_api::domain::services::ticket_service::TicketService;
use eventa_api::middleware::auth::Claims;
use eventa_api::server::{create_app, AppState};

const JWT_SECRET: &str = "test-secret";

/// 内存版持久层，实现全部仓储契约，供集成测试替换 MySQL
#[derive(Default)]
pub struct InMemoryStore {
    enrollments: Mutex<Vec<Enrollment>>,
    ticket_types: Mutex<Vec<TicketType>>,
    tickets: Mutex<Vec<Ticket>>,
    payments: Mutex<Vec<Payment>>,
    rooms: Mutex<Vec<Room>>,
    bookings: Mutex<Vec<Booking>>,
    next_id: AtomicI32,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI32::new(1),
            ..Self::default()
        })
    }

    fn gen_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    // ---- 测试工厂 ----

    pub fn create_enrollment(&self, user_id: i32) -> Enrollment {
        let enrollment = Enrollment {
            id: self.gen_id(),
            user_id,
            name: "Test User".to_string(),
            cpf: "12345678901".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            phone: "21999999999".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.enrollments.lock().unwrap().push(enrollment.clone());
        enrollment
    }

    pub fn create_ticket_type(&self, is_remote: bool, includes_hotel: bool) -> TicketType {
        let ticket_type = TicketType {
            id: self.gen_id(),
            name: "Full Pass".to_string(),
            price: 60000,
            is_remote,
            includes_hotel,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.ticket_types.lock().unwrap().push(ticket_type.clone());
        ticket_type
    }

    pub fn create_ticket(
        &self,
        enrollment_id: i32,
        ticket_type_id: i32,
        status: TicketStatus,
    ) -> Ticket {
        let ticket = Ticket {
            id: self.gen_id(),
            enrollment_id,
            ticket_type_id,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.tickets.lock().unwrap().push(ticket.clone());
        ticket
    }

    pub fn create_room(&self) -> Room {
        let room = Room {
            id: self.gen_id(),
            hotel_id: 1,
            name: "101".to_string(),
            capacity: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rooms.lock().unwrap().push(room.clone());
        room
    }

    pub fn create_booking(&self, user_id: i32, room_id: i32) -> Booking {
        let booking = Booking {
            id: self.gen_id(),
            user_id,
            room_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.bookings.lock().unwrap().push(booking.clone());
        booking
    }

    pub fn create_payment(&self, ticket_id: i32, value: i32) -> Payment {
        let payment = Payment {
            id: self.gen_id(),
            ticket_id,
            value,
            card_issuer: CardIssuer::Visa,
            card_last_digits: "1234".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.payments.lock().unwrap().push(payment.clone());
        payment
    }

    // ---- 测试断言辅助 ----

    pub fn ticket_status(&self, ticket_id: i32) -> Option<TicketStatus> {
        self.tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == ticket_id)
            .map(|t| t.status)
    }

    pub fn payments_for_ticket(&self, ticket_id: i32) -> Vec<Payment> {
        self.payments
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.ticket_id == ticket_id)
            .cloned()
            .collect()
    }

    pub fn bookings_for_room(&self, room_id: i32) -> Vec<Booking> {
        self.bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.room_id == room_id)
            .cloned()
            .collect()
    }

    fn ticket_type_by_id(&self, ticket_type_id: i32) -> Option<TicketType> {
        self.ticket_types
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == ticket_type_id)
            .cloned()
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Option<Enrollment>, sqlx::Error> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.user_id == user_id)
            .cloned())
    }

    async fn find_by_id(&self, enrollment_id: i32) -> Result<Option<Enrollment>, sqlx::Error> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == enrollment_id)
            .cloned())
    }
}

#[async_trait]
impl TicketRepository for InMemoryStore {
    async fn all_types(&self) -> Result<Vec<TicketType>, sqlx::Error> {
        Ok(self.ticket_types.lock().unwrap().clone())
    }

    async fn find_with_type_by_enrollment_id(
        &self,
        enrollment_id: i32,
    ) -> Result<Option<TicketWithType>, sqlx::Error> {
        let ticket = self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.enrollment_id == enrollment_id)
            .min_by_key(|t| t.id)
            .cloned();

        Ok(ticket.and_then(|ticket| {
            self.ticket_type_by_id(ticket.ticket_type_id)
                .map(|ticket_type| TicketWithType { ticket, ticket_type })
        }))
    }

    async fn find_with_type_by_id(
        &self,
        ticket_id: i32,
    ) -> Result<Option<TicketWithType>, sqlx::Error> {
        let ticket = self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == ticket_id)
            .cloned();

        Ok(ticket.and_then(|ticket| {
            self.ticket_type_by_id(ticket.ticket_type_id)
                .map(|ticket_type| TicketWithType { ticket, ticket_type })
        }))
    }

    async fn create(
        &self,
        enrollment_id: i32,
        ticket_type_id: i32,
    ) -> Result<TicketWithType, sqlx::Error> {
        // 外键行为对齐：票种不存在时报错
        let ticket_type = self
            .ticket_type_by_id(ticket_type_id)
            .ok_or(sqlx::Error::RowNotFound)?;

        let ticket = self.create_ticket(enrollment_id, ticket_type_id, TicketStatus::Reserved);

        Ok(TicketWithType { ticket, ticket_type })
    }

    async fn set_status(&self, ticket_id: i32, status: TicketStatus) -> Result<(), sqlx::Error> {
        let mut tickets = self.tickets.lock().unwrap();
        if let Some(ticket) = tickets.iter_mut().find(|t| t.id == ticket_id) {
            ticket.status = status;
            ticket.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn find_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<BookingWithRoom>, sqlx::Error> {
        let booking = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.user_id == user_id)
            .cloned();

        let Some(booking) = booking else {
            return Ok(None);
        };

        let room = self
            .rooms
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == booking.room_id)
            .cloned()
            .ok_or(sqlx::Error::RowNotFound)?;

        Ok(Some(BookingWithRoom {
            id: booking.id,
            room,
        }))
    }

    async fn find_by_room_id(&self, room_id: i32) -> Result<Option<Booking>, sqlx::Error> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.room_id == room_id)
            .cloned())
    }

    async fn find_by_id(&self, booking_id: i32) -> Result<Option<Booking>, sqlx::Error> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == booking_id)
            .cloned())
    }

    async fn create(&self, user_id: i32, room_id: i32) -> Result<i32, sqlx::Error> {
        Ok(self.create_booking(user_id, room_id).id)
    }

    async fn update_room(&self, booking_id: i32, room_id: i32) -> Result<(), sqlx::Error> {
        let mut bookings = self.bookings.lock().unwrap();
        if let Some(booking) = bookings.iter_mut().find(|b| b.id == booking_id) {
            booking.room_id = room_id;
            booking.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn find_by_id(&self, room_id: i32) -> Result<Option<Room>, sqlx::Error> {
        Ok(self
            .rooms
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == room_id)
            .cloned())
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn find_by_ticket_id(&self, ticket_id: i32) -> Result<Option<Payment>, sqlx::Error> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.ticket_id == ticket_id)
            .cloned())
    }

    async fn owner_user_id_by_ticket_id(
        &self,
        ticket_id: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        // payment → ticket → enrollment 三表联查的内存版
        let has_payment = self
            .payments
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.ticket_id == ticket_id);
        if !has_payment {
            return Ok(None);
        }

        let enrollment_id = self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == ticket_id)
            .map(|t| t.enrollment_id);

        let Some(enrollment_id) = enrollment_id else {
            return Ok(None);
        };

        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == enrollment_id)
            .map(|e| e.user_id))
    }

    async fn create(
        &self,
        ticket_id: i32,
        value: i32,
        card_issuer: CardIssuer,
        card_last_digits: &str,
    ) -> Result<Payment, sqlx::Error> {
        let payment = Payment {
            id: self.gen_id(),
            ticket_id,
            value,
            card_issuer,
            card_last_digits: card_last_digits.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.payments.lock().unwrap().push(payment.clone());
        Ok(payment)
    }
}

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = InMemoryStore::new();

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
            },
            database: DatabaseConfig {
                url: "mysql://unused".to_string(),
                max_connections: 1,
            },
            auth: AuthConfig {
                jwt_secret: JWT_SECRET.to_string(),
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: "pretty".to_string(),
            },
        };

        let enrollments: Arc<dyn EnrollmentRepository> = store.clone();
        let tickets: Arc<dyn TicketRepository> = store.clone();
        let rooms: Arc<dyn RoomRepository> = store.clone();
        let bookings: Arc<dyn BookingRepository> = store.clone();
        let payments: Arc<dyn PaymentRepository> = store.clone();

        let state = AppState {
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
        };

        let router = create_app(state).await.unwrap();

        Self { store, router }
    }

    pub fn token_for(&self, user_id: i32) -> String {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + 3600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
        )
        .unwrap()
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("GET", path, token, None).await
    }

    pub async fn post_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.send("POST", path, token, Some(body)).await
    }

    pub async fn put_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.send("PUT", path, token, Some(body)).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}
