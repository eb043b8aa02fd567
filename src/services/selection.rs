use crate::{models::trip::Trip, services::store::TripStore};

/// Which trip, if any, is open in the detail view.
///
/// Only the id is kept. The trip itself is always looked up in the store so
/// the detail view never shows a copy that predates an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    trip_id: Option<String>,
}

impl Selection {
    pub fn select(&mut self, trip_id: impl Into<String>) {
        self.trip_id = Some(trip_id.into());
    }

    pub fn clear(&mut self) {
        self.trip_id = None;
    }

    pub fn trip_id(&self) -> Option<&str> {
        self.trip_id.as_deref()
    }

    pub fn is_selected(&self, trip_id: &str) -> bool {
        self.trip_id.as_deref() == Some(trip_id)
    }

    pub fn resolve<'a>(&self, store: &'a TripStore) -> Option<&'a Trip> {
        self.trip_id.as_deref().and_then(|id| store.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::TripForm;

    fn form(title: &str) -> TripForm {
        TripForm {
            title: title.into(),
            destination_name: "Oslo".into(),
            destination_country: "Norway".into(),
            start_date: "2024-03-01".into(),
            end_date: "2024-03-02".into(),
            description: "Fjords".into(),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_current_version_from_store() {
        let mut store = TripStore::default();
        let trip = store.create_trip(&form("before")).unwrap();
        let mut selection = Selection::default();
        selection.select(&trip.id);

        store.update_trip(&trip.id, &form("after")).unwrap();
        assert_eq!(selection.resolve(&store).unwrap().title, "after");
    }

    #[test]
    fn dangling_id_resolves_to_none() {
        let store = TripStore::default();
        let mut selection = Selection::default();
        selection.select("gone");
        assert!(selection.is_selected("gone"));
        assert!(selection.resolve(&store).is_none());
        selection.clear();
        assert_eq!(selection.trip_id(), None);
    }
}
