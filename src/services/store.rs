use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    error::{AppError, ValidationError},
    models::{
        form::{ItineraryForm, TripForm},
        trip::{Destination, ItineraryItem, Trip},
    },
    services::clock::{Clock, SystemClock},
    utils::{calculate_days, generate_id},
};

/// In-memory collection of trips, in creation order.
#[derive(Debug, Clone)]
pub struct TripStore {
    trips: Vec<Trip>,
    clock: Arc<dyn Clock>,
}

impl Default for TripStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl TripStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            trips: Vec::new(),
            clock,
        }
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Trip, AppError> {
        self.get(id).ok_or_else(|| AppError::trip_not_found(id))
    }

    fn require_mut(&mut self, id: &str) -> Result<&mut Trip, AppError> {
        self.trips
            .iter_mut()
            .find(|trip| trip.id == id)
            .ok_or_else(|| AppError::trip_not_found(id))
    }

    pub fn create_trip(&mut self, form: &TripForm) -> Result<Trip, AppError> {
        let draft = form.validate()?;
        let now = self.clock.now();
        let trip = Trip {
            id: self.fresh_trip_id(),
            title: draft.title,
            destination: Destination {
                id: generate_id(),
                name: draft.destination_name,
                country: draft.destination_country,
                description: draft.destination_description,
            },
            start_date: draft.start_date,
            end_date: draft.end_date,
            description: draft.description,
            budget: draft.budget,
            itinerary: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        info!(trip_id = %trip.id, title = %trip.title, "trip created");
        self.trips.push(trip.clone());
        Ok(trip)
    }

    /// Replaces everything but the id, creation time and itinerary.
    ///
    /// Fails when the new dates would leave an existing activity outside the
    /// trip; nothing is changed in that case.
    pub fn update_trip(&mut self, id: &str, form: &TripForm) -> Result<Trip, AppError> {
        let now = self.clock.now();
        let trip = self.require_mut(id)?;
        let draft = form.validate()?;
        if let Some(day) = trip.itinerary.iter().map(|item| item.day).max() {
            let span = calculate_days(draft.start_date, draft.end_date);
            if i64::from(day) > span {
                return Err(ValidationError::DayOutOfRange { day, span }.into());
            }
        }
        trip.title = draft.title;
        // The destination belongs to this trip alone, so it keeps its id.
        trip.destination.name = draft.destination_name;
        trip.destination.country = draft.destination_country;
        trip.destination.description = draft.destination_description;
        trip.start_date = draft.start_date;
        trip.end_date = draft.end_date;
        trip.description = draft.description;
        trip.budget = draft.budget;
        touch(trip, now);
        info!(trip_id = %trip.id, "trip updated");
        Ok(trip.clone())
    }

    pub fn delete_trip(&mut self, id: &str) -> Result<Trip, AppError> {
        let idx = self
            .trips
            .iter()
            .position(|trip| trip.id == id)
            .ok_or_else(|| AppError::trip_not_found(id))?;
        let removed = self.trips.remove(idx);
        info!(
            trip_id = %removed.id,
            items = removed.itinerary.len(),
            "trip deleted"
        );
        Ok(removed)
    }

    pub fn add_itinerary_item(
        &mut self,
        trip_id: &str,
        form: &ItineraryForm,
    ) -> Result<Trip, AppError> {
        let item_id = self.fresh_item_id();
        let now = self.clock.now();
        let trip = self.require_mut(trip_id)?;
        let draft = form.validate(trip.start_date, trip.end_date)?;
        trip.itinerary.push(ItineraryItem {
            id: item_id,
            day: draft.day,
            time: draft.time,
            activity: draft.activity,
            location: draft.location,
            notes: draft.notes,
        });
        trip.sort_itinerary();
        touch(trip, now);
        info!(trip_id = %trip.id, day = draft.day, "itinerary item added");
        Ok(trip.clone())
    }

    pub fn remove_itinerary_item(&mut self, trip_id: &str, item_id: &str) -> Result<Trip, AppError> {
        let now = self.clock.now();
        let trip = self.require_mut(trip_id)?;
        let idx = trip
            .itinerary
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| AppError::item_not_found(item_id))?;
        trip.itinerary.remove(idx);
        touch(trip, now);
        info!(trip_id = %trip.id, item_id, "itinerary item removed");
        Ok(trip.clone())
    }

    fn fresh_trip_id(&self) -> String {
        loop {
            let id = generate_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn fresh_item_id(&self) -> String {
        loop {
            let id = generate_id();
            if self.trips.iter().all(|trip| trip.find_item(&id).is_none()) {
                return id;
            }
        }
    }
}

// A wall clock may step backwards; updated_at must not.
fn touch(trip: &mut Trip, now: DateTime<Utc>) {
    trip.updated_at = trip.updated_at.max(now);
}
