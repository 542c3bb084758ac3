#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::Utc;
use garage_api::{
    auth::{Claims, Principal},
    config::AppConfig,
    db::{self, DbConfig, DbPool},
    entities::{customer, user, vehicle, JobCardModel, JobStatus, UserRole},
    events::{self, EventSender},
    services::{settings, CreateJobInput, JobCardService},
    AppState,
};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "garage_test_secret_with_enough_length_42";
pub const JWT_ISSUER: &str = "garage-api";

/// Ids of the rows every test database starts with.
#[derive(Debug, Clone, Copy)]
pub struct Seed {
    pub alice: i64,
    pub bob: i64,
    pub alice_car: i64,
    pub bob_van: i64,
    pub admin: i64,
    pub mechanic: i64,
    pub second_mechanic: i64,
    pub staff: i64,
    pub customer_user: i64,
}

/// Application state over a fresh in-memory SQLite database.
pub struct TestApp {
    pub state: AppState,
    pub db: Arc<DbPool>,
    pub seed: Seed,
    router: Router,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = db::establish_connection_with_config(&DbConfig::in_memory_sqlite())
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let seed = seed(&pool).await;

        let db_arc = Arc::new(pool);
        let (event_sender, event_rx) = EventSender::channel(256);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let mut cfg = AppConfig::new("sqlite::memory:".into(), JWT_SECRET.into(), "test".into());
        cfg.jwt_issuer = JWT_ISSUER.into();

        let state = AppState::new(db_arc.clone(), cfg, event_sender);
        let router = garage_api::app_router(state.clone());

        Self {
            state,
            db: db_arc,
            seed,
            router,
            _event_task: event_task,
        }
    }

    pub fn service(&self) -> &JobCardService {
        &self.state.job_cards
    }

    pub fn admin(&self) -> Principal {
        Principal::new(self.seed.admin, UserRole::Admin)
    }

    pub fn mechanic(&self) -> Principal {
        Principal::new(self.seed.mechanic, UserRole::Mechanic)
    }

    pub fn staff(&self) -> Principal {
        Principal::new(self.seed.staff, UserRole::Staff)
    }

    /// Stores a raw `tax_rate` value, bypassing validation.
    pub async fn set_raw_tax_rate(&self, value: &str) {
        settings::put_setting(&*self.db, settings::TAX_RATE_KEY, value.to_string())
            .await
            .expect("store tax rate");
    }

    /// Opens a job for Alice's car.
    pub async fn open_job(&self) -> JobCardModel {
        self.service()
            .create_job(CreateJobInput {
                customer_id: self.seed.alice,
                vehicle_id: self.seed.alice_car,
                mechanic_notes: None,
            })
            .await
            .expect("create job")
    }

    /// Opens a job and walks it forward to `status` as admin.
    pub async fn job_in_status(&self, status: JobStatus) -> JobCardModel {
        let mut job = self.open_job().await;
        while job.status != status {
            let next = job.status.successor().expect("status reachable");
            job = self
                .service()
                .change_status(job.id, next, self.admin())
                .await
                .expect("advance status");
        }
        job
    }

    pub fn token_for(&self, user_id: i64, role: UserRole) -> String {
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: (Utc::now().timestamp() + 3600) as usize,
            iss: JWT_ISSUER.to_string(),
        };
        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(JWT_SECRET.as_bytes()),
        )
        .expect("encode access token")
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is json")
}

async fn seed(db: &DbPool) -> Seed {
    let now = Utc::now();

    let add_customer = |name: &str| customer::ActiveModel {
        name: Set(name.to_string()),
        phone: Set(None),
        email: Set(None),
        created_at: Set(now),
        ..Default::default()
    };
    let alice = add_customer("Alice").insert(db).await.expect("seed customer");
    let bob = add_customer("Bob").insert(db).await.expect("seed customer");

    let add_vehicle = |customer_id: i64, reg: &str| vehicle::ActiveModel {
        customer_id: Set(customer_id),
        registration_no: Set(reg.to_string()),
        make: Set(Some("Toyota".to_string())),
        model: Set(None),
        created_at: Set(now),
        ..Default::default()
    };
    let alice_car = add_vehicle(alice.id, "KA-01-1234")
        .insert(db)
        .await
        .expect("seed vehicle");
    let bob_van = add_vehicle(bob.id, "KA-02-9876")
        .insert(db)
        .await
        .expect("seed vehicle");

    let add_user = |name: &str, role: UserRole| user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(format!("{}@garage.test", name.to_lowercase())),
        role: Set(role),
        created_at: Set(now),
        ..Default::default()
    };
    let admin = add_user("Asha", UserRole::Admin).insert(db).await.expect("seed user");
    let mechanic = add_user("Manoj", UserRole::Mechanic)
        .insert(db)
        .await
        .expect("seed user");
    let second_mechanic = add_user("Meera", UserRole::Mechanic)
        .insert(db)
        .await
        .expect("seed user");
    let staff = add_user("Sam", UserRole::Staff).insert(db).await.expect("seed user");
    let customer_user = add_user("Chris", UserRole::Customer)
        .insert(db)
        .await
        .expect("seed user");

    Seed {
        alice: alice.id,
        bob: bob.id,
        alice_car: alice_car.id,
        bob_van: bob_van.id,
        admin: admin.id,
        mechanic: mechanic.id,
        second_mechanic: second_mechanic.id,
        staff: staff.id,
        customer_user: customer_user.id,
    }
}
