use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::error;

use crate::catalog::{self, CourseInfo};
use crate::error::AppError;
use crate::models::{ClassRecord, NewClassRequest, Shift, StudentRecord};
use crate::roster::{ClassFilter, ClassFilterParams, StudentFilter, StudentFilterParams};
use crate::schedule::{self, ScheduleEstimate};
use crate::services::{
    ClassListing, ClassService, ClassView, CourseDetail, CourseService, Dashboard,
    DashboardService, StudentListing, StudentService, StudentView,
};
use crate::state::AppState;
use crate::upstream::ensure_valid_id;

#[derive(Debug, Default, Deserialize)]
struct EndDateRequest {
    course_slug: Option<String>,
    shift: Option<String>,
    start_date: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/dashboard", get(dashboard))
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/classes", get(list_classes).post(create_class))
        .route(
            "/classes/{id}",
            get(get_class).put(update_class).delete(delete_class),
        )
        .route("/courses", get(list_courses))
        .route("/courses/{slug}", get(get_course))
        .route("/schedule/end-date", post(estimate_end_date))
        .with_state(state)
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

async fn health(State(state): State<AppState>) -> StatusCode {
    match state.backend.list_students().await {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            error!("health check failed: {}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, AppError> {
    let service = DashboardService::new(state.backend.clone());
    Ok(Json(service.load().await?))
}

async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<StudentFilterParams>,
) -> Result<Json<StudentListing>, AppError> {
    let filter = StudentFilter::from(params);
    let service = StudentService::new(state.backend.clone());
    Ok(Json(service.list(&filter, today()).await?))
}

async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StudentView>, AppError> {
    let service = StudentService::new(state.backend.clone());
    Ok(Json(service.get(ensure_valid_id(id)?, today()).await?))
}

async fn create_student(
    State(state): State<AppState>,
    Json(student): Json<StudentRecord>,
) -> Result<StatusCode, AppError> {
    let service = StudentService::new(state.backend.clone());
    service.create(student).await?;
    Ok(StatusCode::CREATED)
}

async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(student): Json<StudentRecord>,
) -> Result<StatusCode, AppError> {
    let service = StudentService::new(state.backend.clone());
    service.update(ensure_valid_id(id)?, student).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let service = StudentService::new(state.backend.clone());
    service.delete(ensure_valid_id(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_classes(
    State(state): State<AppState>,
    Query(params): Query<ClassFilterParams>,
) -> Result<Json<ClassListing>, AppError> {
    let filter = ClassFilter::from(params);
    let service = ClassService::new(state.backend.clone());
    Ok(Json(service.list(&filter).await?))
}

async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ClassView>, AppError> {
    let service = ClassService::new(state.backend.clone());
    Ok(Json(service.get(ensure_valid_id(id)?).await?))
}

async fn create_class(
    State(state): State<AppState>,
    Json(req): Json<NewClassRequest>,
) -> Result<(StatusCode, Json<ClassRecord>), AppError> {
    let service = ClassService::new(state.backend.clone());
    let class = service.create(&req).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<NewClassRequest>,
) -> Result<Json<ClassRecord>, AppError> {
    let service = ClassService::new(state.backend.clone());
    Ok(Json(service.update(ensure_valid_id(id)?, &req).await?))
}

async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let service = ClassService::new(state.backend.clone());
    service.delete(ensure_valid_id(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_courses(State(state): State<AppState>) -> Json<&'static [CourseInfo]> {
    Json(CourseService::new(state.backend.clone()).catalog())
}

async fn get_course(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CourseDetail>, AppError> {
    let service = CourseService::new(state.backend.clone());
    Ok(Json(service.detail(&slug).await?))
}

async fn estimate_end_date(Json(req): Json<EndDateRequest>) -> Json<ScheduleEstimate> {
    let course = req.course_slug.as_deref().and_then(catalog::find_by_slug);
    let shift = req.shift.as_deref().and_then(Shift::parse);
    let start = req
        .start_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());
    Json(schedule::estimate(course, shift, start))
}
