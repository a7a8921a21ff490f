//! Crime report entity.

#![allow(missing_docs)]

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle status of a report.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Submitted,
    UnderReview,
    Investigating,
    Resolved,
    Closed,
}

impl ReportStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Submitted,
        Self::UnderReview,
        Self::Investigating,
        Self::Resolved,
        Self::Closed,
    ];

    /// The four steps shown on a progress timeline.
    pub const TRACKED_STEPS: [Self; 4] = [
        Self::Submitted,
        Self::UnderReview,
        Self::Investigating,
        Self::Resolved,
    ];

    /// Wire name (`under_review`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Investigating => "investigating",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// Display label (`UNDER REVIEW`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::UnderReview => "UNDER REVIEW",
            Self::Investigating => "INVESTIGATING",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    /// Whether no further transition is expected.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of the reported incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrimeType {
    #[serde(rename = "Theft/Burglary")]
    TheftBurglary,
    #[serde(rename = "Assault")]
    Assault,
    #[serde(rename = "Vandalism")]
    Vandalism,
    #[serde(rename = "Drug-related")]
    DrugRelated,
    #[serde(rename = "Fraud")]
    Fraud,
    #[serde(rename = "Domestic Violence")]
    DomesticViolence,
    #[serde(rename = "Traffic Violation")]
    TrafficViolation,
    #[serde(rename = "Cyber Crime")]
    CyberCrime,
    #[serde(rename = "Other")]
    Other,
}

impl CrimeType {
    /// Every category, in the order the submission form lists them.
    pub const ALL: [Self; 9] = [
        Self::TheftBurglary,
        Self::Assault,
        Self::Vandalism,
        Self::DrugRelated,
        Self::Fraud,
        Self::DomesticViolence,
        Self::TrafficViolation,
        Self::CyberCrime,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TheftBurglary => "Theft/Burglary",
            Self::Assault => "Assault",
            Self::Vandalism => "Vandalism",
            Self::DrugRelated => "Drug-related",
            Self::Fraud => "Fraud",
            Self::DomesticViolence => "Domestic Violence",
            Self::TrafficViolation => "Traffic Violation",
            Self::CyberCrime => "Cyber Crime",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for CrimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known crime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCrimeType(pub String);

impl fmt::Display for UnknownCrimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown crime type: {}", self.0)
    }
}

impl std::error::Error for UnknownCrimeType {}

impl FromStr for CrimeType {
    type Err = UnknownCrimeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownCrimeType(s.to_string()))
    }
}

/// One recorded status change of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: ReportStatus,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// A submitted incident report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub crime_type: CrimeType,
    pub incident_date: NaiveDate,
    #[serde(default, with = "incident_time")]
    pub incident_time: Option<NaiveTime>,
    pub location: String,
    pub description: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub witnesses: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub suspect: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub evidence: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub contact_name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub contact_phone: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub status: ReportStatus,
    pub submitted_at: DateTime<Utc>,
    /// Identity that filed the report. Never set on anonymous reports.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub owner_id: Option<String>,
    /// Recorded status changes, oldest first.
    #[serde(default)]
    pub history: Vec<StatusUpdate>,
}

impl Report {
    /// Message recorded when a report enters the system.
    pub const SUBMITTED_MESSAGE: &'static str = "Report submitted successfully";

    /// Status changes to display, oldest first.
    ///
    /// Records written before history was kept only carry their submission
    /// time; for those the submission is the single known event.
    #[must_use]
    pub fn timeline(&self) -> Vec<StatusUpdate> {
        if self.history.is_empty() {
            vec![StatusUpdate {
                status: ReportStatus::Submitted,
                message: Self::SUBMITTED_MESSAGE.to_string(),
                at: self.submitted_at,
            }]
        } else {
            self.history.clone()
        }
    }

    /// Whether the report was filed by the given identity.
    #[must_use]
    pub fn is_owned_by(&self, identity_id: &str) -> bool {
        !self.anonymous && self.owner_id.as_deref() == Some(identity_id)
    }
}

/// Parse an incident time given as `HH:MM` or `HH:MM:SS`.
#[must_use]
pub fn parse_incident_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

mod incident_time {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) if time.second() == 0 => {
                serializer.serialize_str(&time.format("%H:%M").to_string())
            }
            Some(time) => serializer.serialize_str(&time.format("%H:%M:%S").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_incident_time(s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid incident time: {s}"))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn legacy_record() -> serde_json::Value {
        json!({
            "crimeType": "Theft/Burglary",
            "incidentDate": "2025-01-01",
            "incidentTime": "",
            "location": "Main St",
            "description": "x",
            "witnesses": "",
            "suspect": "",
            "evidence": "",
            "anonymous": true,
            "contactName": "",
            "contactPhone": "",
            "contactEmail": "",
            "id": "CR123456",
            "status": "submitted",
            "submittedAt": "2025-01-15T14:30:00.000Z"
        })
    }

    #[test]
    fn test_reads_records_written_by_the_browser_app() {
        let report: Report = serde_json::from_value(legacy_record()).unwrap();

        assert_eq!(report.id, "CR123456");
        assert_eq!(report.crime_type, CrimeType::TheftBurglary);
        assert_eq!(report.incident_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(report.incident_time, None);
        assert_eq!(report.witnesses, None);
        assert_eq!(report.contact_email, None);
        assert_eq!(report.owner_id, None);
        assert!(report.history.is_empty());
    }

    #[test]
    fn test_incident_time_formats() {
        let mut value = legacy_record();
        value["incidentTime"] = json!("14:30");
        let report: Report = serde_json::from_value(value).unwrap();
        assert_eq!(report.incident_time, NaiveTime::from_hms_opt(14, 30, 0));

        let out = serde_json::to_value(&report).unwrap();
        assert_eq!(out["incidentTime"], json!("14:30"));

        let mut bad = legacy_record();
        bad["incidentTime"] = json!("half past two");
        assert!(serde_json::from_value::<Report>(bad).is_err());
    }

    #[test]
    fn test_status_wire_names_and_labels() {
        assert_eq!(
            serde_json::to_value(ReportStatus::UnderReview).unwrap(),
            json!("under_review")
        );
        assert_eq!(ReportStatus::UnderReview.label(), "UNDER REVIEW");
        assert_eq!(ReportStatus::Investigating.to_string(), "investigating");
    }

    #[test]
    fn test_crime_type_names() {
        for crime_type in CrimeType::ALL {
            assert_eq!(crime_type.as_str().parse::<CrimeType>().unwrap(), crime_type);
            assert_eq!(
                serde_json::to_value(crime_type).unwrap(),
                json!(crime_type.as_str())
            );
        }
        assert!("Jaywalking".parse::<CrimeType>().is_err());
        assert!("theft/burglary".parse::<CrimeType>().is_err());
    }

    #[test]
    fn test_timeline_falls_back_to_submission() {
        let report: Report = serde_json::from_value(legacy_record()).unwrap();
        let timeline = report.timeline();

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].status, ReportStatus::Submitted);
        assert_eq!(timeline[0].at, report.submitted_at);
    }

    #[test]
    fn test_anonymous_reports_have_no_owner() {
        let mut report: Report = serde_json::from_value(legacy_record()).unwrap();
        report.owner_id = Some("1".to_string());
        assert!(!report.is_owned_by("1"));

        report.anonymous = false;
        assert!(report.is_owned_by("1"));
        assert!(!report.is_owned_by("2"));
    }
}
