use tracing::debug;

use crate::{
    error::AppError,
    models::{
        form::{ItineraryForm, TripForm},
        trip::Trip,
    },
    services::{selection::Selection, store::TripStore},
};

/// The application's trip state: the store plus the detail-view selection.
///
/// Built once at startup and handed to the web layer through `AppState`.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    store: TripStore,
    selection: Selection,
}

impl Planner {
    pub fn new(store: TripStore) -> Self {
        Self {
            store,
            selection: Selection::default(),
        }
    }

    pub fn store(&self) -> &TripStore {
        &self.store
    }

    pub fn trips(&self) -> &[Trip] {
        self.store.trips()
    }

    pub fn trip(&self, id: &str) -> Result<&Trip, AppError> {
        self.store.require(id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_trip(&self) -> Option<&Trip> {
        self.selection.resolve(&self.store)
    }

    pub fn select_trip(&mut self, id: &str) -> Result<&Trip, AppError> {
        let trip = self.store.require(id)?;
        self.selection.select(id);
        debug!(trip_id = id, "trip selected");
        Ok(trip)
    }

    pub fn clear_selection(&mut self) {
        if let Some(id) = self.selection.trip_id() {
            debug!(trip_id = id, "selection cleared");
        }
        self.selection.clear();
    }

    pub fn create_trip(&mut self, form: &TripForm) -> Result<Trip, AppError> {
        self.store.create_trip(form)
    }

    pub fn update_trip(&mut self, id: &str, form: &TripForm) -> Result<Trip, AppError> {
        self.store.update_trip(id, form)
    }

    pub fn delete_trip(&mut self, id: &str) -> Result<Trip, AppError> {
        let removed = self.store.delete_trip(id)?;
        if self.selection.is_selected(id) {
            self.clear_selection();
        }
        Ok(removed)
    }

    pub fn add_itinerary_item(
        &mut self,
        trip_id: &str,
        form: &ItineraryForm,
    ) -> Result<Trip, AppError> {
        self.store.add_itinerary_item(trip_id, form)
    }

    pub fn remove_itinerary_item(&mut self, trip_id: &str, item_id: &str) -> Result<Trip, AppError> {
        self.store.remove_itinerary_item(trip_id, item_id)
    }
}
