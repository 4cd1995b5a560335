//! Trip request model and input validation
//!
//! `RawTripRequest` is the wire shape (everything optional, as it arrives
//! from a client or the persisted store); `TripRequest` is the validated
//! form the rest of the pipeline works with. Validation is fail-fast: it
//! reports the first violated rule group (presence, date parse, date order,
//! per-departure shape) rather than collecting every problem.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// One origin airport with its per-leg budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Departure {
    /// IATA airport code, e.g. "LGW"
    pub airport: String,
    /// Budget for this origin's flights
    pub budget: f64,
}

/// One group member's interest profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupProfile {
    pub interests: Vec<String>,
}

/// Wire shape of a departure entry before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDeparture {
    pub airport: Option<String>,
    pub budget: Option<f64>,
}

/// Wire shape of a trip request before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTripRequest {
    pub departures: Option<Vec<RawDeparture>>,
    pub group_profiles: Option<Vec<GroupProfile>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A validated trip request
#[derive(Debug, Clone, Serialize)]
pub struct TripRequest {
    pub departures: Vec<Departure>,
    pub group_profiles: Vec<GroupProfile>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Client input that failed validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("'{field}' is not an ISO-8601 date: '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("'end_date' must be after 'start_date'")]
    DateOrder,

    #[error("'departures' must not be empty")]
    EmptyDepartures,

    #[error("Departure {index} must have 'airport' and 'budget'")]
    BadDeparture { index: usize },

    #[error("Departure {index} 'budget' must be a positive number")]
    BadBudget { index: usize },
}

fn parse_iso(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    value.parse::<NaiveDate>().map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Normalize and check a raw trip request
pub fn validate(raw: RawTripRequest) -> Result<TripRequest, ValidationError> {
    debug!("validate: called");

    // Rule group 1: presence of all top-level fields
    let mut missing = Vec::new();
    if raw.departures.is_none() {
        missing.push("departures".to_string());
    }
    if raw.group_profiles.is_none() {
        missing.push("group_profiles".to_string());
    }
    if raw.start_date.is_none() {
        missing.push("start_date".to_string());
    }
    if raw.end_date.is_none() {
        missing.push("end_date".to_string());
    }
    if !missing.is_empty() {
        debug!(?missing, "validate: missing top-level fields");
        return Err(ValidationError::MissingFields(missing));
    }

    let departures = raw.departures.unwrap_or_default();
    let group_profiles = raw.group_profiles.unwrap_or_default();
    let start_raw = raw.start_date.unwrap_or_default();
    let end_raw = raw.end_date.unwrap_or_default();

    // Rule group 2: dates must parse
    let start_date = parse_iso("start_date", &start_raw)?;
    let end_date = parse_iso("end_date", &end_raw)?;

    // Rule group 3: strict date order
    if end_date <= start_date {
        debug!(%start_date, %end_date, "validate: date order violated");
        return Err(ValidationError::DateOrder);
    }

    // Rule group 4: per-departure shape
    if departures.is_empty() {
        return Err(ValidationError::EmptyDepartures);
    }
    let mut checked = Vec::with_capacity(departures.len());
    for (index, leg) in departures.into_iter().enumerate() {
        let (airport, budget) = match (leg.airport, leg.budget) {
            (Some(a), Some(b)) if !a.trim().is_empty() => (a, b),
            _ => {
                debug!(%index, "validate: departure missing airport or budget");
                return Err(ValidationError::BadDeparture { index });
            }
        };
        if !budget.is_finite() || budget <= 0.0 {
            debug!(%index, %budget, "validate: bad budget");
            return Err(ValidationError::BadBudget { index });
        }
        checked.push(Departure { airport, budget });
    }

    debug!(
        departure_count = checked.len(),
        profile_count = group_profiles.len(),
        "validate: request is well-formed"
    );
    Ok(TripRequest {
        departures: checked,
        group_profiles,
        start_date,
        end_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed() -> RawTripRequest {
        RawTripRequest {
            departures: Some(vec![RawDeparture {
                airport: Some("LGW".to_string()),
                budget: Some(800.0),
            }]),
            group_profiles: Some(vec![GroupProfile {
                interests: vec!["beach".to_string()],
            }]),
            start_date: Some("2025-07-01".to_string()),
            end_date: Some("2025-07-10".to_string()),
        }
    }

    #[test]
    fn test_well_formed_request_validates() {
        let request = validate(well_formed()).unwrap();
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(request.end_date, NaiveDate::from_ymd_opt(2025, 7, 10).unwrap());
        assert_eq!(request.departures.len(), 1);
        assert_eq!(request.departures[0].airport, "LGW");
        assert_eq!(request.departures[0].budget, 800.0);
        assert_eq!(request.group_profiles[0].interests, vec!["beach"]);
    }

    #[test]
    fn test_missing_fields_are_all_named() {
        let err = validate(RawTripRequest::default()).unwrap_err();
        match err {
            ValidationError::MissingFields(fields) => {
                assert_eq!(fields, vec!["departures", "group_profiles", "start_date", "end_date"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_date_fails() {
        let mut raw = well_formed();
        raw.start_date = Some("July 1st".to_string());
        let err = validate(raw).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDate {
                field: "start_date",
                value: "July 1st".to_string()
            }
        );
    }

    #[test]
    fn test_end_date_must_be_strictly_after_start() {
        // Equal dates fail regardless of everything else being valid
        let mut raw = well_formed();
        raw.end_date = Some("2025-07-01".to_string());
        assert_eq!(validate(raw).unwrap_err(), ValidationError::DateOrder);

        // Reversed dates fail even with a malformed departure later in the list
        let mut raw = well_formed();
        raw.end_date = Some("2025-06-01".to_string());
        raw.departures = Some(vec![RawDeparture {
            airport: None,
            budget: None,
        }]);
        assert_eq!(validate(raw).unwrap_err(), ValidationError::DateOrder);
    }

    #[test]
    fn test_empty_departures_rejected() {
        let mut raw = well_formed();
        raw.departures = Some(vec![]);
        assert_eq!(validate(raw).unwrap_err(), ValidationError::EmptyDepartures);
    }

    #[test]
    fn test_departure_without_budget_names_the_entry() {
        let mut raw = well_formed();
        raw.departures = Some(vec![
            RawDeparture {
                airport: Some("LGW".to_string()),
                budget: Some(800.0),
            },
            RawDeparture {
                airport: Some("MAN".to_string()),
                budget: None,
            },
        ]);
        assert_eq!(validate(raw).unwrap_err(), ValidationError::BadDeparture { index: 1 });
    }

    #[test]
    fn test_non_positive_budget_rejected() {
        let mut raw = well_formed();
        raw.departures = Some(vec![RawDeparture {
            airport: Some("LGW".to_string()),
            budget: Some(0.0),
        }]);
        assert_eq!(validate(raw).unwrap_err(), ValidationError::BadBudget { index: 0 });
    }
}
