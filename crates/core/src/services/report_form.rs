//! Report submission form.

#![allow(missing_docs)]

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use crimereport_common::{AppError, AppResult, FieldErrors};
use crimereport_db::entities::{CrimeType, Identity, Report, ReportStatus, StatusUpdate};
use crimereport_db::entities::report::parse_incident_time;
use serde::Deserialize;
use validator::{Validate, ValidationError};

const CONTACT_REQUIRED: &str = "Phone or email is required";

/// Raw report form as submitted by the client.
///
/// Every text field arrives as a string; empty means "not given".
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportForm {
    #[validate(custom(function = "validate_crime_type"))]
    pub crime_type: String,

    #[validate(custom(function = "validate_incident_date"))]
    pub incident_date: String,

    #[validate(custom(function = "validate_incident_time"))]
    pub incident_time: String,

    #[validate(custom(function = "validate_location"))]
    pub location: String,

    #[validate(custom(function = "validate_description"))]
    pub description: String,

    pub witnesses: String,
    pub suspect: String,
    pub evidence: String,
    pub anonymous: bool,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
}

fn required(message: &'static str) -> ValidationError {
    ValidationError::new("required").with_message(message.into())
}

fn invalid(message: &'static str) -> ValidationError {
    ValidationError::new("invalid").with_message(message.into())
}

fn validate_crime_type(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(required("Crime type is required"));
    }
    value
        .parse::<CrimeType>()
        .map(|_| ())
        .map_err(|_| invalid("Unknown crime type"))
}

fn validate_incident_date(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(required("Incident date is required"));
    }
    let date = parse_date(value).ok_or_else(|| invalid("Incident date is invalid"))?;
    if date > Utc::now().date_naive() {
        return Err(invalid("Incident date cannot be in the future"));
    }
    Ok(())
}

fn validate_incident_time(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || parse_incident_time(value).is_some() {
        Ok(())
    } else {
        Err(invalid("Incident time is invalid"))
    }
}

fn validate_location(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(required("Location is required"));
    }
    Ok(())
}

fn validate_description(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(required("Description is required"));
    }
    Ok(())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ReportForm {
    /// Field-keyed problems with the form; empty when it can be submitted.
    ///
    /// Contact details are only checked for named reports. When neither phone
    /// nor email is given, both fields carry the message.
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => e.into(),
        };

        if !self.anonymous {
            if self.contact_name.trim().is_empty() {
                errors.insert("contactName", "Name is required for non-anonymous reports");
            }
            if self.contact_phone.trim().is_empty() && self.contact_email.trim().is_empty() {
                errors.insert("contactPhone", CONTACT_REQUIRED);
                errors.insert("contactEmail", CONTACT_REQUIRED);
            }
        }

        errors
    }

    /// Validate and normalize the form.
    ///
    /// Anonymous reports lose any contact details that were filled in, and
    /// only named reports record who filed them.
    pub fn into_new_report(self, submitter: Option<&Identity>) -> AppResult<NewReport> {
        self.field_errors().into_result()?;

        let crime_type = self
            .crime_type
            .trim()
            .parse::<CrimeType>()
            .map_err(|e| AppError::field("crimeType", e.to_string()))?;
        let incident_date = parse_date(self.incident_date.trim()).ok_or_else(|| {
            AppError::field("incidentDate", "Incident date is invalid")
        })?;

        let (contact_name, contact_phone, contact_email, owner_id) = if self.anonymous {
            (None, None, None, None)
        } else {
            (
                non_empty(&self.contact_name),
                non_empty(&self.contact_phone),
                non_empty(&self.contact_email),
                submitter.map(|identity| identity.id.clone()),
            )
        };

        Ok(NewReport {
            crime_type,
            incident_date,
            incident_time: parse_incident_time(self.incident_time.trim()),
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
            witnesses: non_empty(&self.witnesses),
            suspect: non_empty(&self.suspect),
            evidence: non_empty(&self.evidence),
            anonymous: self.anonymous,
            contact_name,
            contact_phone,
            contact_email,
            owner_id,
        })
    }
}

/// A validated report that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub crime_type: CrimeType,
    pub incident_date: NaiveDate,
    pub incident_time: Option<NaiveTime>,
    pub location: String,
    pub description: String,
    pub witnesses: Option<String>,
    pub suspect: Option<String>,
    pub evidence: Option<String>,
    pub anonymous: bool,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub owner_id: Option<String>,
}

impl NewReport {
    /// Stamp the report as submitted under `id` at `submitted_at`.
    #[must_use]
    pub fn into_report(self, id: String, submitted_at: DateTime<Utc>) -> Report {
        Report {
            id,
            crime_type: self.crime_type,
            incident_date: self.incident_date,
            incident_time: self.incident_time,
            location: self.location,
            description: self.description,
            witnesses: self.witnesses,
            suspect: self.suspect,
            evidence: self.evidence,
            anonymous: self.anonymous,
            contact_name: self.contact_name,
            contact_phone: self.contact_phone,
            contact_email: self.contact_email,
            status: ReportStatus::Submitted,
            submitted_at,
            owner_id: self.owner_id,
            history: vec![StatusUpdate {
                status: ReportStatus::Submitted,
                message: Report::SUBMITTED_MESSAGE.to_string(),
                at: submitted_at,
            }],
        }
    }
}
