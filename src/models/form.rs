use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};

use crate::{
    error::ValidationError,
    models::trip::Trip,
    utils::{calculate_days, normalize_optional},
};

/// Raw trip form as posted by the browser. Field names match the HTML inputs.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripForm {
    pub title: String,
    pub destination_name: String,
    pub destination_country: String,
    #[serde(default)]
    pub destination_description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    /// Kept as typed so a bad number can be shown back to the user.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub budget: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripDraft {
    pub title: String,
    pub destination_name: String,
    pub destination_country: String,
    pub destination_description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub budget: Option<f64>,
}

impl TripForm {
    /// Prefills the form from an existing trip for editing.
    pub fn from_trip(trip: &Trip) -> Self {
        Self {
            title: trip.title.clone(),
            destination_name: trip.destination.name.clone(),
            destination_country: trip.destination.country.clone(),
            destination_description: trip.destination.description.clone(),
            start_date: trip.start_date.format("%Y-%m-%d").to_string(),
            end_date: trip.end_date.format("%Y-%m-%d").to_string(),
            description: trip.description.clone(),
            budget: trip.budget.map(|amount| amount.to_string()),
        }
    }

    pub fn validate(&self) -> Result<TripDraft, ValidationError> {
        let title = required("title", &self.title)?;
        let destination_name = required("destination", &self.destination_name)?;
        let destination_country = required("country", &self.destination_country)?;
        let start_date = parse_date("start date", &self.start_date)?;
        let end_date = parse_date("end date", &self.end_date)?;
        if end_date < start_date {
            return Err(ValidationError::EndBeforeStart {
                start: start_date,
                end: end_date,
            });
        }
        let description = required("description", &self.description)?;
        let budget = self
            .budget
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(parse_budget)
            .transpose()?;

        Ok(TripDraft {
            title,
            destination_name,
            destination_country,
            destination_description: normalize_optional(self.destination_description.clone()),
            start_date,
            end_date,
            description,
            budget,
        })
    }

    pub fn budget_value(&self) -> &str {
        self.budget.as_deref().unwrap_or("")
    }

    pub fn destination_description_value(&self) -> &str {
        self.destination_description.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItineraryForm {
    #[serde(default)]
    pub day: String,
    pub time: String,
    pub activity: String,
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Default for ItineraryForm {
    fn default() -> Self {
        Self {
            day: "1".to_string(),
            time: String::new(),
            activity: String::new(),
            location: String::new(),
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryDraft {
    pub day: u32,
    pub time: String,
    pub activity: String,
    pub location: String,
    pub notes: Option<String>,
}

impl ItineraryForm {
    /// Checks the item against a trip running from `start` to `end`.
    pub fn validate(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ItineraryDraft, ValidationError> {
        let day = parse_day(&self.day)?;
        let span = calculate_days(start, end);
        if day == 0 || i64::from(day) > span {
            return Err(ValidationError::DayOutOfRange { day, span });
        }
        let time = self.time.trim();
        if time.is_empty() {
            return Err(ValidationError::MissingField("time"));
        }
        // Zero-padded HH:MM only, otherwise lexical ordering breaks.
        if time.len() != 5 || NaiveTime::parse_from_str(time, "%H:%M").is_err() {
            return Err(ValidationError::InvalidTime(time.to_string()));
        }
        let activity = required("activity", &self.activity)?;
        let location = required("location", &self.location)?;

        Ok(ItineraryDraft {
            day,
            time: time.to_string(),
            activity,
            location,
            notes: normalize_optional(self.notes.clone()),
        })
    }

    pub fn notes_value(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_budget(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(ValidationError::InvalidBudget(trimmed.to_string())),
    }
}

fn parse_day(raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("day"));
    }
    trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidDay(trimmed.to_string()))
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field,
        value: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip_form() -> TripForm {
        TripForm {
            title: "Summer in Paris".into(),
            destination_name: "Paris".into(),
            destination_country: "France".into(),
            destination_description: Some("  ".into()),
            start_date: "2024-07-01".into(),
            end_date: "2024-07-05".into(),
            description: "Museums and croissants".into(),
            budget: Some("2000".into()),
        }
    }

    fn item_form(day: u32, time: &str) -> ItineraryForm {
        ItineraryForm {
            day: day.to_string(),
            time: time.into(),
            activity: "Louvre".into(),
            location: "Rue de Rivoli".into(),
            notes: Some(String::new()),
        }
    }

    fn d(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn valid_trip_form_produces_draft() {
        let draft = trip_form().validate().unwrap();
        assert_eq!(draft.title, "Summer in Paris");
        assert_eq!(draft.start_date, d("2024-07-01"));
        assert_eq!(draft.destination_description, None);
        assert_eq!(draft.budget, Some(2000.0));
    }

    #[test]
    fn same_day_trip_is_allowed() {
        let mut form = trip_form();
        form.end_date = form.start_date.clone();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut form = trip_form();
        form.end_date = "2024-06-30".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::EndBeforeStart {
                start: d("2024-07-01"),
                end: d("2024-06-30"),
            })
        );
    }

    #[test]
    fn required_fields_and_bad_values() {
        let mut form = trip_form();
        form.title = "   ".into();
        assert_eq!(form.validate(), Err(ValidationError::MissingField("title")));

        let mut form = trip_form();
        form.start_date = "07/01/2024".into();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidDate { field: "start date", .. })
        ));

        let mut form = trip_form();
        form.budget = Some("-1".into());
        assert_eq!(
            form.validate(),
            Err(ValidationError::InvalidBudget("-1".into()))
        );
    }

    #[test]
    fn non_numeric_budget_is_a_validation_error() {
        let mut form = trip_form();
        form.budget = Some(" abc ".into());
        assert_eq!(
            form.validate(),
            Err(ValidationError::InvalidBudget("abc".into()))
        );

        form.budget = Some("inf".into());
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidBudget(_))
        ));

        form.budget = Some("1250.5".into());
        assert_eq!(form.validate().unwrap().budget, Some(1250.5));
    }

    #[test]
    fn day_must_be_a_whole_number() {
        let (start, end) = (d("2024-07-01"), d("2024-07-05"));
        let mut form = item_form(1, "09:00");
        form.day = "  ".into();
        assert_eq!(
            form.validate(start, end),
            Err(ValidationError::MissingField("day"))
        );
        form.day = "two".into();
        assert_eq!(
            form.validate(start, end),
            Err(ValidationError::InvalidDay("two".into()))
        );
        form.day = "-1".into();
        assert_eq!(
            form.validate(start, end),
            Err(ValidationError::InvalidDay("-1".into()))
        );
    }

    #[test]
    fn item_day_must_fall_inside_trip() {
        let (start, end) = (d("2024-07-01"), d("2024-07-05"));
        assert!(item_form(1, "09:00").validate(start, end).is_ok());
        assert!(item_form(5, "09:00").validate(start, end).is_ok());
        assert_eq!(
            item_form(6, "09:00").validate(start, end),
            Err(ValidationError::DayOutOfRange { day: 6, span: 5 })
        );
        assert_eq!(
            item_form(0, "09:00").validate(start, end),
            Err(ValidationError::DayOutOfRange { day: 0, span: 5 })
        );
    }

    #[test]
    fn item_time_must_be_padded_hh_mm() {
        let (start, end) = (d("2024-07-01"), d("2024-07-01"));
        assert_eq!(
            item_form(1, "9:00").validate(start, end),
            Err(ValidationError::InvalidTime("9:00".into()))
        );
        assert_eq!(
            item_form(1, "25:00").validate(start, end),
            Err(ValidationError::InvalidTime("25:00".into()))
        );
        let draft = item_form(1, " 07:45 ").validate(start, end).unwrap();
        assert_eq!(draft.time, "07:45");
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn edit_form_prefills_from_trip() {
        use crate::models::trip::Destination;
        use chrono::Utc;

        let now = Utc::now();
        let trip = Trip {
            id: "t".into(),
            title: "Kyoto".into(),
            destination: Destination {
                id: "d".into(),
                name: "Kyoto".into(),
                country: "Japan".into(),
                description: Some("temples".into()),
            },
            start_date: d("2025-04-01"),
            end_date: d("2025-04-03"),
            description: "Sakura".into(),
            budget: None,
            itinerary: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let form = TripForm::from_trip(&trip);
        assert_eq!(form.start_date, "2025-04-01");
        assert_eq!(form.destination_description_value(), "temples");
        assert_eq!(form.budget_value(), "");
        assert_eq!(form.validate().unwrap().destination_country, "Japan");
    }
}
