use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use tracing::warn;

use crate::{
    config::AppConfig,
    error::{AppError, ValidationError},
    models::{
        form::TripForm,
        trip::{ItineraryItem, Trip},
    },
    state::AppState,
    utils::{format_budget, format_date},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/trips", post(trip_create))
        .route("/trips/new", get(trip_new_form))
        .route("/trips/:id", post(trip_update))
        .route("/trips/:id/edit", get(trip_edit_form))
        .route("/trips/:id/delete", post(trip_delete))
        .route("/trips/:id/select", post(trip_select))
        .route("/selection/clear", post(selection_clear))
}

struct TripView {
    id: String,
    title: String,
    destination_name: String,
    destination_country: String,
    has_destination_description: bool,
    destination_description: String,
    date_range: String,
    days: i64,
    has_budget: bool,
    budget_display: String,
    description: String,
    items: Vec<ItineraryItem>,
}

impl TripView {
    fn new(trip: &Trip, config: &AppConfig) -> Self {
        Self {
            id: trip.id.clone(),
            title: trip.title.clone(),
            destination_name: trip.destination.name.clone(),
            destination_country: trip.destination.country.clone(),
            has_destination_description: trip.destination.description.is_some(),
            destination_description: trip.destination.description.clone().unwrap_or_default(),
            date_range: format!(
                "{} - {}",
                format_date(trip.start_date, &config.date_format),
                format_date(trip.end_date, &config.date_format)
            ),
            days: trip.days(),
            has_budget: trip.budget.is_some(),
            budget_display: trip
                .budget
                .map(|amount| format_budget(amount, &config.currency_symbol))
                .unwrap_or_else(|| "Not set".into()),
            description: trip.description.clone(),
            items: trip.itinerary.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "trips/list.html")]
struct TripListTemplate {
    trips: Vec<TripView>,
}

#[derive(Template)]
#[template(path = "trips/detail.html")]
struct TripDetailTemplate {
    trip: TripView,
}

/// Shows the selected trip if there is one, the trip list otherwise.
async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let planner = state.planner.read().await;
    if let Some(trip) = planner.selected_trip() {
        return Ok(AskamaTemplateResponse::into_response(TripDetailTemplate {
            trip: TripView::new(trip, &state.config),
        }));
    }
    let trips = planner
        .trips()
        .iter()
        .map(|trip| TripView::new(trip, &state.config))
        .collect();
    Ok(AskamaTemplateResponse::into_response(TripListTemplate {
        trips,
    }))
}

#[derive(Template)]
#[template(path = "trips/form.html")]
struct TripFormTemplate {
    editing: bool,
    trip_id: String,
    form: TripForm,
    show_error: bool,
    error_message: String,
}

/// `trip_id` is `None` when creating a new trip.
fn render_trip_form(
    trip_id: Option<&str>,
    form: TripForm,
    error: Option<ValidationError>,
) -> Response {
    let status = if error.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    let template = TripFormTemplate {
        editing: trip_id.is_some(),
        trip_id: trip_id.unwrap_or_default().to_string(),
        form,
        show_error: error.is_some(),
        error_message: error.map(|err| err.to_string()).unwrap_or_default(),
    };
    (status, AskamaTemplateResponse::into_response(template)).into_response()
}

async fn trip_new_form() -> Response {
    render_trip_form(None, TripForm::default(), None)
}

async fn trip_create(
    State(state): State<AppState>,
    Form(form): Form<TripForm>,
) -> Result<Response, AppError> {
    let result = state.planner.write().await.create_trip(&form);
    match result {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Validation(err)) => {
            warn!("trip form rejected: {err}");
            Ok(render_trip_form(None, form, Some(err)))
        }
        Err(err) => Err(err),
    }
}

async fn trip_edit_form(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Response, AppError> {
    let planner = state.planner.read().await;
    let trip = planner.trip(&trip_id)?;
    Ok(render_trip_form(
        Some(trip.id.as_str()),
        TripForm::from_trip(trip),
        None,
    ))
}

async fn trip_update(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Form(form): Form<TripForm>,
) -> Result<Response, AppError> {
    let result = state.planner.write().await.update_trip(&trip_id, &form);
    match result {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Validation(err)) => {
            warn!(trip_id = %trip_id, "trip edit rejected: {err}");
            Ok(render_trip_form(Some(trip_id.as_str()), form, Some(err)))
        }
        Err(err) => Err(err),
    }
}

async fn trip_delete(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Redirect, AppError> {
    state.planner.write().await.delete_trip(&trip_id)?;
    Ok(Redirect::to("/"))
}

async fn trip_select(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Redirect, AppError> {
    state.planner.write().await.select_trip(&trip_id)?;
    Ok(Redirect::to("/"))
}

async fn selection_clear(State(state): State<AppState>) -> Redirect {
    state.planner.write().await.clear_selection();
    Redirect::to("/")
}
