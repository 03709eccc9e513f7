// src/services/filter.rs

//! Job filtering.
//!
//! Two ways of applying [`FilterCriteria`]:
//! - client side, with [`filter_jobs`] over an already fetched batch
//! - server side, with [`SearchParams::build`] turning them into query
//!   parameters for the search API
//!
//! Server-side precedence is strict: a search term suppresses both branch
//! and location parameters.

use crate::models::{FilterCriteria, JobAd, normalize_term};
use crate::services::classifier::branch_matches;
use crate::services::taxonomy::{primary_taxonomy_id, region_codes_for_counties};

/// Filter jobs on location, branch and search term, keeping input order.
///
/// A job is kept only if it passes all three:
/// - location: no locations selected, or its region is one of them
/// - branch: no branches selected, or it classifies into one of them
/// - search: blank term, or the term occurs in one of its text fields
pub fn filter_jobs(
    jobs: &[JobAd],
    locations: &[String],
    branches: &[String],
    search_term: &str,
) -> Vec<JobAd> {
    filter_normalized(jobs, locations, branches, &normalize_term(search_term))
}

/// Filter jobs using a [`FilterCriteria`].
pub fn filter_by_criteria(jobs: &[JobAd], criteria: &FilterCriteria) -> Vec<JobAd> {
    filter_normalized(
        jobs,
        &criteria.locations,
        &criteria.branches,
        &criteria.normalized_term(),
    )
}

fn filter_normalized(
    jobs: &[JobAd],
    locations: &[String],
    branches: &[String],
    term: &str,
) -> Vec<JobAd> {
    jobs.iter()
        .filter(|job| location_matches(job, locations))
        .filter(|job| branch_matches(job, branches))
        .filter(|job| term_matches(job, term))
        .cloned()
        .collect()
}

fn location_matches(job: &JobAd, locations: &[String]) -> bool {
    if locations.is_empty() {
        return true;
    }
    job.region()
        .is_some_and(|region| locations.iter().any(|l| l == region))
}

/// `term` must already be normalized.
fn term_matches(job: &JobAd, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let contains = |field: Option<&str>| field.is_some_and(|text| text.to_lowercase().contains(term));

    contains(Some(job.headline.as_str()))
        || contains(job.employer_name())
        || contains(job.employer_workplace())
        || contains(job.occupation_label())
        || contains(job.region())
        || contains(job.municipality())
        || contains(job.description_text())
        || job
            .freetext_concepts
            .iter()
            .any(|concept| contains(concept.label.as_deref()))
}

/// Human-readable (Swedish) summary of the active filters.
pub fn describe_filters(criteria: &FilterCriteria) -> String {
    let mut parts = Vec::new();

    if !criteria.locations.is_empty() {
        parts.push(format!("Ort: {}", criteria.locations.join(", ")));
    }
    if !criteria.branches.is_empty() {
        parts.push(format!("Bransch: {}", criteria.branches.join(", ")));
    }
    if criteria.has_search_term() {
        parts.push(format!("Sökord: \"{}\"", criteria.search_term.trim()));
    }

    if parts.is_empty() {
        return "Inga filter applicerade".to_string();
    }
    format!("Aktiva filter: {}", parts.join(", "))
}

/// Query parameters for one call to the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub limit: usize,
    pub offset: usize,
    /// Request the reduced-field response
    pub brief: bool,
    /// Free-text query (`q`)
    pub query: Option<String>,
    /// Occupation-field concept ids, sent comma-joined
    pub occupation_fields: Vec<String>,
    /// A single region code
    pub region: Option<String>,
}

impl SearchParams {
    /// An unfiltered page in brief format.
    pub fn page(limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset,
            brief: true,
            ..Self::default()
        }
    }

    /// Build server-side parameters from filter criteria.
    ///
    /// A non-blank search term is sent alone. Otherwise each selected branch
    /// contributes its primary concept id and the first known county its
    /// region code. Unknown branches and counties are dropped.
    pub fn build(limit: usize, offset: usize, criteria: &FilterCriteria) -> Self {
        let mut params = Self::page(limit, offset);

        if criteria.has_search_term() {
            params.query = Some(criteria.search_term.trim().to_string());
            return params;
        }

        for branch in &criteria.branches {
            if let Some(id) = primary_taxonomy_id(branch) {
                if !params.occupation_fields.iter().any(|f| f == id) {
                    params.occupation_fields.push(id.to_string());
                }
            }
        }

        params.region = region_codes_for_counties(&criteria.locations)
            .first()
            .map(|code| code.to_string());

        params
    }

    /// The same parameters restricted to one region and page size.
    pub fn for_region(&self, region_code: &str, limit: usize) -> Self {
        Self {
            limit,
            region: Some(region_code.to_string()),
            ..self.clone()
        }
    }

    /// Query pairs in the order they are sent.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if self.brief {
            query.push(("format", "brief".to_string()));
        }
        if let Some(q) = &self.query {
            query.push(("q", q.clone()));
        }
        if !self.occupation_fields.is_empty() {
            query.push(("occupation-field", self.occupation_fields.join(",")));
        }
        if let Some(region) = &self.region {
            query.push(("region", region.clone()));
        }
        query
    }

    /// Whether a query pair with this key would be sent.
    pub fn has_param(&self, key: &str) -> bool {
        self.to_query().iter().any(|(k, _)| *k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Branch, Employer, FreetextConcept, JobDescription, Occupation, WorkplaceAddress};

    fn job(id: &str, headline: &str, label: Option<&str>, region: Option<&str>) -> JobAd {
        JobAd {
            id: id.into(),
            headline: headline.into(),
            occupation: label.map(|l| Occupation {
                label: Some(l.into()),
            }),
            workplace_address: region.map(|r| WorkplaceAddress {
                region: Some(r.into()),
                municipality: Some("Kommunen".into()),
                ..WorkplaceAddress::default()
            }),
            ..JobAd::default()
        }
    }

    fn sample_jobs() -> Vec<JobAd> {
        vec![
            job("1", "Sjuksköterska till akuten", Some("Sjuksköterska"), Some("Skåne län")),
            job("2", "Backend-utvecklare", Some("Systemutvecklare"), Some("Stockholms län")),
            job("3", "Kock sökes", Some("Kock"), Some("Skåne län")),
            job("4", "Astronaut", Some("Astronaut"), None),
        ]
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn ids(jobs: &[JobAd]) -> Vec<&str> {
        jobs.iter().map(|j| j.id.as_str()).collect()
    }

    #[test]
    fn test_no_filters_is_identity() {
        let jobs = sample_jobs();
        assert_eq!(filter_jobs(&jobs, &[], &[], ""), jobs);
    }

    #[test]
    fn test_location_filter() {
        let jobs = sample_jobs();
        let result = filter_jobs(&jobs, &strings(&["Skåne län"]), &[], "");
        assert_eq!(ids(&result), vec!["1", "3"]);
    }

    #[test]
    fn test_branch_filter_excludes_unclassifiable() {
        let mut jobs = sample_jobs();
        // headline names a branch but the occupation cannot be classified
        jobs.push(job("5", "Data, IT, telekommunikation", Some("Astronaut"), None));
        jobs.push(job("6", "Data, IT, telekommunikation", None, None));

        let result = filter_jobs(&jobs, &[], &strings(&[Branch::DataIt.label()]), "");
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn test_search_is_trimmed_and_case_insensitive() {
        let jobs = sample_jobs();
        let result = filter_jobs(&jobs, &[], &[], "  KOCK ");
        assert_eq!(ids(&result), vec!["3"]);
    }

    #[test]
    fn test_search_covers_secondary_fields() {
        let mut employer_job = job("10", "Jobb", None, None);
        employer_job.employer = Some(Employer {
            name: Some("Region Skåne".into()),
            workplace: Some("Lasarettet".into()),
            url: None,
        });
        let mut description_job = job("11", "Jobb", None, None);
        description_job.description = Some(JobDescription {
            text: Some("Vi söker en glad pizzabagare".into()),
            ..JobDescription::default()
        });
        let mut concept_job = job("12", "Jobb", None, None);
        concept_job.freetext_concepts = vec![FreetextConcept {
            id: None,
            label: Some("Truckkort".into()),
        }];
        let jobs = vec![employer_job, description_job, concept_job];

        assert_eq!(ids(&filter_jobs(&jobs, &[], &[], "lasarett")), vec!["10"]);
        assert_eq!(ids(&filter_jobs(&jobs, &[], &[], "pizza")), vec!["11"]);
        assert_eq!(ids(&filter_jobs(&jobs, &[], &[], "truck")), vec!["12"]);
        assert_eq!(filter_jobs(&jobs, &[], &[], "kommunen").len(), 0);
    }

    #[test]
    fn test_all_filters_combine() {
        let jobs = sample_jobs();
        let result = filter_jobs(
            &jobs,
            &strings(&["Skåne län"]),
            &strings(&[Branch::Health.label(), Branch::Service.label()]),
            "akuten",
        );
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn test_filter_by_criteria_normalizes_term() {
        let jobs = sample_jobs();
        let criteria = FilterCriteria::new(["Skåne län"], Vec::<String>::new(), "  SjukSKÖTERSKA ");
        assert_eq!(ids(&filter_by_criteria(&jobs, &criteria)), vec!["1"]);
    }

    #[test]
    fn test_describe_filters() {
        assert_eq!(
            describe_filters(&FilterCriteria::default()),
            "Inga filter applicerade"
        );

        let criteria = FilterCriteria::new(["Skåne län", "Uppsala län"], ["Konst, design, media"], "foto");
        assert_eq!(
            describe_filters(&criteria),
            "Aktiva filter: Ort: Skåne län, Uppsala län, Bransch: Konst, design, media, Sökord: \"foto\""
        );
    }

    #[test]
    fn test_search_term_suppresses_other_params() {
        let criteria = FilterCriteria::new(
            ["Stockholms län", "Skåne län"],
            [Branch::DataIt.label()],
            " rust ",
        );
        let params = SearchParams::build(10, 20, &criteria);

        assert_eq!(params.query.as_deref(), Some("rust"));
        assert!(params.has_param("q"));
        assert!(!params.has_param("occupation-field"));
        assert!(!params.has_param("region"));
    }

    #[test]
    fn test_branch_and_location_params() {
        let criteria = FilterCriteria::new(
            ["Okänd", "Skåne län"],
            [Branch::Service.label(), "Rymdfart", Branch::DataIt.label()],
            "",
        );
        let params = SearchParams::build(27, 0, &criteria);

        assert_eq!(
            params.to_query(),
            vec![
                ("limit", "27".to_string()),
                ("offset", "0".to_string()),
                ("format", "brief".to_string()),
                ("occupation-field", "ScKy_FHB_7wT,apaJ_2ja_LuF".to_string()),
                ("region", "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_unfiltered_params() {
        let params = SearchParams::build(27, 54, &FilterCriteria::default());
        assert_eq!(params, SearchParams::page(27, 54));
        assert!(!params.has_param("q"));
    }

    #[test]
    fn test_for_region_substitutes_region_and_limit() {
        let base = SearchParams::build(10, 0, &FilterCriteria::new(["Skåne län"], Vec::<String>::new(), ""));
        let regional = base.for_region("01", 5);
        assert_eq!(regional.region.as_deref(), Some("01"));
        assert_eq!(regional.limit, 5);
        assert_eq!(regional.offset, 0);
    }
}
