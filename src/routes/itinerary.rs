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
    error::{AppError, ValidationError},
    models::{form::ItineraryForm, trip::Trip},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips/:id/itinerary", post(item_create))
        .route("/trips/:id/itinerary/new", get(item_new_form))
        .route(
            "/trips/:id/itinerary/:item_id/delete",
            post(item_delete),
        )
}

#[derive(Template)]
#[template(path = "itinerary/form.html")]
struct ItineraryFormTemplate {
    trip_id: String,
    trip_title: String,
    max_day: i64,
    form: ItineraryForm,
    show_error: bool,
    error_message: String,
}

fn render_item_form(trip: &Trip, form: ItineraryForm, error: Option<ValidationError>) -> Response {
    let status = if error.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    let template = ItineraryFormTemplate {
        trip_id: trip.id.clone(),
        trip_title: trip.title.clone(),
        max_day: trip.days(),
        form,
        show_error: error.is_some(),
        error_message: error.map(|err| err.to_string()).unwrap_or_default(),
    };
    (status, AskamaTemplateResponse::into_response(template)).into_response()
}

async fn item_new_form(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Response, AppError> {
    let planner = state.planner.read().await;
    let trip = planner.trip(&trip_id)?;
    Ok(render_item_form(trip, ItineraryForm::default(), None))
}

async fn item_create(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Form(form): Form<ItineraryForm>,
) -> Result<Response, AppError> {
    let mut planner = state.planner.write().await;
    match planner.add_itinerary_item(&trip_id, &form) {
        Ok(_) => {
            // Land back on this trip's detail view.
            planner.select_trip(&trip_id)?;
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::Validation(err)) => {
            warn!(trip_id = %trip_id, "activity rejected: {err}");
            let trip = planner.trip(&trip_id)?;
            Ok(render_item_form(trip, form, Some(err)))
        }
        Err(err) => Err(err),
    }
}

async fn item_delete(
    State(state): State<AppState>,
    Path((trip_id, item_id)): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    let mut planner = state.planner.write().await;
    planner.remove_itinerary_item(&trip_id, &item_id)?;
    planner.select_trip(&trip_id)?;
    Ok(Redirect::to("/"))
}
