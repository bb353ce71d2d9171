use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::core::{self, LoanSummary, ScheduleEntry};
use crate::error::{ApiError, Result};
use crate::store::{Loan, NewLoan, RecordStore, User};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanPayload {
    pub user_id: u64,
    pub amount: f64,
    pub annual_rate: f64,
    pub term_months: u32,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub month: u32,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/:id/loans", get(list_user_loans))
        .route("/loans", post(create_loan))
        .route("/loans/:id/schedule", get(loan_schedule))
        .route("/loans/:id/summary", get(loan_summary))
        .route("/loans/:id/share/:recipient_id", post(share_loan))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_http_server(
    addr: SocketAddr,
    store: Arc<dyn RecordStore>,
) -> std::io::Result<()> {
    let app = router(AppState::new(store));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("loanbook HTTP API listening on http://{addr}");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    ApiError::NotFound("Not found".to_string()).into_response()
}

/// POST /users
async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<(StatusCode, Json<User>)> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(ApiError::InvalidInput(
            "username must not be empty".to_string(),
        ));
    }

    let user = state.store.create_user(username)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /loans
async fn create_loan(
    State(state): State<AppState>,
    Json(payload): Json<CreateLoanPayload>,
) -> Result<(StatusCode, Json<Loan>)> {
    let loan = state.store.create_loan(NewLoan {
        user_id: payload.user_id,
        amount: payload.amount,
        annual_rate: payload.annual_rate,
        term_months: payload.term_months,
    })?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// GET /loans/:id/schedule
async fn loan_schedule(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ScheduleEntry>>> {
    let loan = state.store.get_loan(id)?;
    let schedule = core::build_schedule(loan.amount, loan.annual_rate, loan.term_months);
    Ok(Json(schedule))
}

/// GET /loans/:id/summary?month=N
async fn loan_summary(
    Path(id): Path<u64>,
    Query(query): Query<SummaryQuery>,
    State(state): State<AppState>,
) -> Result<Json<LoanSummary>> {
    let loan = state.store.get_loan(id)?;
    if query.month < 1 || query.month > loan.term_months {
        return Err(ApiError::InvalidInput(format!(
            "month must be between 1 and {}",
            loan.term_months
        )));
    }

    let schedule = core::build_schedule(loan.amount, loan.annual_rate, loan.term_months);
    let summary = core::summarize(loan.amount, query.month, &schedule);
    Ok(Json(summary))
}

/// GET /users/:id/loans
async fn list_user_loans(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Loan>>> {
    let loans = state.store.list_loans_for_user(id)?;
    Ok(Json(loans))
}

/// POST /loans/:id/share/:recipient_id
async fn share_loan(
    Path((id, recipient_id)): Path<(u64, u64)>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Loan>)> {
    let loan = state.store.create_shared_loan(id, recipient_id)?;
    Ok((StatusCode::CREATED, Json(loan)))
}
