use std::fmt;

use color_eyre::eyre::Result;
use tracing::{debug, warn};

use crate::types::{
    dto::form::FormValues,
    place::{Place, Query},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Latitude,
    Longitude,
    Radius,
}

impl Field {
    fn required_message(self) -> &'static str {
        match self {
            Field::Latitude => "Please enter the latitude!",
            Field::Longitude => "Please enter the longitude!",
            Field::Radius => "Please enter the radius!",
        }
    }

    fn numeric_message(self) -> &'static str {
        match self {
            Field::Latitude => "Latitude must be a number",
            Field::Longitude => "Longitude must be a number",
            Field::Radius => "Radius must be a number",
        }
    }
}

/// Inline messages for fields that failed the required/numeric check
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub latitude: Option<&'static str>,
    pub longitude: Option<&'static str>,
    pub radius: Option<&'static str>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Latitude => self.latitude,
            Field::Longitude => self.longitude,
            Field::Radius => self.radius,
        }
    }
}

/// Out of range coordinates or radius. Blocks the whole submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    Latitude,
    Longitude,
    Radius,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RangeError::Latitude => "Latitude value cannot be greater than 90 or less than -90",
            RangeError::Longitude => "Longitude value cannot be greater than 180 or less than -180",
            RangeError::Radius => "Radius value cannot be less than or equal to 0",
        })
    }
}

impl std::error::Error for RangeError {}

fn parse_field(raw: &str, field: Field) -> Result<f64, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(field.required_message());
    }
    match trimmed.parse::<f64>() {
        // "inf" and "NaN" parse fine but aren't numbers anyone types into this form
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(field.numeric_message()),
    }
}

/// Required/numeric validation of all three fields
pub fn parse_values(values: &FormValues) -> Result<Query, FieldErrors> {
    let latitude = parse_field(&values.latitude, Field::Latitude);
    let longitude = parse_field(&values.longitude, Field::Longitude);
    let radius = parse_field(&values.radius, Field::Radius);
    match (latitude, longitude, radius) {
        (Ok(latitude), Ok(longitude), Ok(radius)) => Ok(Query {
            latitude,
            longitude,
            radius,
        }),
        (latitude, longitude, radius) => Err(FieldErrors {
            latitude: latitude.err(),
            longitude: longitude.err(),
            radius: radius.err(),
        }),
    }
}

/// Range validation, first failing check wins
pub fn check_range(query: &Query) -> Result<(), RangeError> {
    if !(-90.0..=90.0).contains(&query.latitude) {
        return Err(RangeError::Latitude);
    }
    if !(-180.0..=180.0).contains(&query.longitude) {
        return Err(RangeError::Longitude);
    }
    if query.radius <= 0.0 {
        return Err(RangeError::Radius);
    }
    Ok(())
}

/// Why a submission never reached the remote service
#[derive(Debug, Clone, PartialEq)]
pub enum Rejected {
    Fields(FieldErrors),
    Range(RangeError),
}

/// Handed out for every request that is allowed to go out. Completing it
/// consumes it, so a request can only be settled once.
#[derive(Debug)]
pub struct Ticket {
    seq: u64,
    pub query: Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Result set replaced
    Applied,
    /// Request failed, previous result set kept
    Failed,
    /// A newer request was issued in the meantime, outcome dropped
    Superseded,
}

/// State of one form instance
#[derive(Debug, Default)]
pub struct FormState {
    values: FormValues,
    field_errors: FieldErrors,
    notice: Option<RangeError>,
    error: Option<String>,
    places: Vec<Place>,
    submitted: bool,
    issued: u64,
    in_flight: usize,
}

impl FormState {
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Blocking notice left by the last range check
    pub fn notice(&self) -> Option<RangeError> {
        self.notice
    }

    /// Message of the last failed request, if it was the current one
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Whitespace-only input counts as untouched
    pub fn is_dirty(&self) -> bool {
        [&self.values.latitude, &self.values.longitude, &self.values.radius]
            .iter()
            .any(|raw| !raw.trim().is_empty())
    }

    /// Whether the form has been submitted at least once
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_valid(&self) -> bool {
        parse_values(&self.values).is_ok()
    }

    pub fn can_submit(&self) -> bool {
        self.is_dirty() && self.is_valid()
    }

    /// First half of a submission: validate and, if everything passes, mark
    /// the form as loading and hand out a ticket for the remote call.
    pub fn begin(&mut self, values: FormValues) -> Result<Ticket, Rejected> {
        self.values = values;
        self.submitted = true;
        self.field_errors = FieldErrors::default();
        self.notice = None;

        let query = parse_values(&self.values).map_err(|errors| {
            self.field_errors = errors.clone();
            Rejected::Fields(errors)
        })?;
        check_range(&query).map_err(|err| {
            self.notice = Some(err);
            Rejected::Range(err)
        })?;

        self.issued += 1;
        self.in_flight += 1;
        self.error = None;
        debug!(seq = self.issued, ?query, "issuing nearby places request");
        Ok(Ticket {
            seq: self.issued,
            query,
        })
    }

    /// Second half of a submission. Only the most recently issued ticket may
    /// change what is displayed.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<Vec<Place>>) -> Completion {
        self.in_flight = self.in_flight.saturating_sub(1);
        let current = ticket.seq == self.issued;
        match outcome {
            Ok(places) if current => {
                self.places = places;
                Completion::Applied
            }
            Ok(_) => {
                debug!(seq = ticket.seq, latest = self.issued, "dropping superseded response");
                Completion::Superseded
            }
            Err(err) => {
                warn!(seq = ticket.seq, "nearby places request failed: {err}");
                if current {
                    self.error = Some(err.to_string());
                    Completion::Failed
                } else {
                    Completion::Superseded
                }
            }
        }
    }
}
