// src/models/job.rs

//! Job advertisement data structures, as returned by the JobTech search API.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single job advertisement.
///
/// Field names follow the search API so ads can be deserialized straight
/// from a response and written back to local storage unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct JobAd {
    /// Unique ad identifier (empty when the API omitted it)
    #[serde(default)]
    pub id: String,

    /// Ad headline
    #[serde(default)]
    pub headline: String,

    /// Publication timestamp as sent by the API
    #[serde(default)]
    pub publication_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_vacancies: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<JobDescription>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer: Option<Employer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_type: Option<Concept>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workplace_address: Option<WorkplaceAddress>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_details: Option<ApplicationDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_of_work: Option<ScopeOfWork>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours_type: Option<Concept>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Concept>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<Occupation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub freetext_concepts: Vec<FreetextConcept>,

    /// Set only once the ad is in the saved jobs collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct JobDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Employer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workplace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WorkplaceAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    /// County name, e.g. "Stockholms län"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ApplicationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

/// Working time range in percent of full time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ScopeOfWork {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// Taxonomy concept reference (working hours, duration, salary type).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Concept {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Occupation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FreetextConcept {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl JobAd {
    /// Occupation label, if the ad carries one.
    pub fn occupation_label(&self) -> Option<&str> {
        self.occupation.as_ref()?.label.as_deref()
    }

    /// Workplace county, if known.
    pub fn region(&self) -> Option<&str> {
        self.workplace_address.as_ref()?.region.as_deref()
    }

    pub fn municipality(&self) -> Option<&str> {
        self.workplace_address.as_ref()?.municipality.as_deref()
    }

    pub fn employer_name(&self) -> Option<&str> {
        self.employer.as_ref()?.name.as_deref()
    }

    pub fn employer_workplace(&self) -> Option<&str> {
        self.employer.as_ref()?.workplace.as_deref()
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_ref()?.text.as_deref()
    }

    /// Whether the ad is marked as applied for. Unsaved ads never are.
    pub fn is_applied(&self) -> bool {
        self.applied.unwrap_or(false)
    }

    /// Parse the publication timestamp.
    ///
    /// The API sends either RFC 3339 or a naive local timestamp; naive
    /// values are taken as UTC.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.publication_date)
    }
}

/// Parse an API timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_hit() {
        let json = r#"{
            "id": "29384756",
            "headline": "Backendutvecklare till fintech",
            "publication_date": "2026-10-17T08:30:00",
            "employer": { "name": "Bolaget AB", "workplace": "Bolaget" },
            "workplace_address": { "municipality": "Stockholm", "region": "Stockholms län" },
            "occupation": { "label": "Mjukvaru- och systemutvecklare m.fl." },
            "relevance": 0.98
        }"#;

        let job: JobAd = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, "29384756");
        assert_eq!(job.region(), Some("Stockholms län"));
        assert_eq!(job.employer_name(), Some("Bolaget AB"));
        assert_eq!(job.applied, None);
        assert!(!job.is_applied());
    }

    #[test]
    fn test_applied_is_not_serialized_when_absent() {
        let job = JobAd {
            id: "1".into(),
            ..JobAd::default()
        };
        let json = serde_json::to_string(&job).unwrap();
        assert!(!json.contains("applied"));

        let saved = JobAd {
            applied: Some(false),
            ..job
        };
        let json = serde_json::to_string(&saved).unwrap();
        assert!(json.contains("\"applied\":false"));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let naive = parse_timestamp("2026-10-17T08:30:00").unwrap();
        let zoned = parse_timestamp("2026-10-17T10:30:00+02:00").unwrap();
        assert_eq!(naive, zoned);
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
