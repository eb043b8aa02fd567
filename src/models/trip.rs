use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::calculate_days;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryItem {
    pub id: String,
    pub day: u32,
    /// `HH:MM`, compared as a string when ordering.
    pub time: String,
    pub activity: String,
    pub location: String,
    pub notes: Option<String>,
}

impl ItineraryItem {
    /// Ordering used for a trip's itinerary: by day, then by time.
    pub fn schedule_cmp(&self, other: &Self) -> Ordering {
        self.day
            .cmp(&other.day)
            .then_with(|| self.time.cmp(&other.time))
    }

    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }

    pub fn notes_display(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub title: String,
    pub destination: Destination,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub budget: Option<f64>,
    pub itinerary: Vec<ItineraryItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    pub fn days(&self) -> i64 {
        calculate_days(self.start_date, self.end_date)
    }

    /// Stable, so items sharing a slot keep the order they were added in.
    pub fn sort_itinerary(&mut self) {
        self.itinerary.sort_by(ItineraryItem::schedule_cmp);
    }

    pub fn itinerary_is_sorted(&self) -> bool {
        self.itinerary
            .windows(2)
            .all(|pair| pair[0].schedule_cmp(&pair[1]) != Ordering::Greater)
    }

    pub fn find_item(&self, item_id: &str) -> Option<&ItineraryItem> {
        self.itinerary.iter().find(|item| item.id == item_id)
    }
}
