// src/services/taxonomy.rs

//! Mapping of filter values to search API identifiers.
//!
//! County names map to the 2-digit region codes of the search API, branch
//! labels to JobTech occupation-field concept ids. Lookups never fail:
//! unknown names are dropped from the result.
//!
//! [`TaxonomyClient`] fetches concept metadata from the taxonomy API and
//! falls back to a built-in table when the API is unreachable.

use std::sync::Mutex;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Branch;
use crate::utils::{endpoint, http::get_json};

/// All Swedish counties (län), in display order.
pub const SWEDISH_COUNTIES: [&str; 20] = [
    "Stockholms län",
    "Västra Götalands län",
    "Skåne län",
    "Uppsala län",
    "Östergötlands län",
    "Västerbottens län",
    "Norrbottens län",
    "Värmlands län",
    "Örebro län",
    "Västmanlands län",
    "Dalarnas län",
    "Gävleborgs län",
    "Västernorrlands län",
    "Jämtlands län",
    "Kronobergs län",
    "Kalmar län",
    "Gotlands län",
    "Blekinge län",
    "Hallands län",
    "Södermanlands län",
];

const COUNTY_REGION_CODES: [(&str, &str); 20] = [
    ("Stockholms län", "01"),
    ("Västra Götalands län", "14"),
    ("Skåne län", "12"),
    ("Uppsala län", "03"),
    ("Östergötlands län", "05"),
    ("Västerbottens län", "24"),
    ("Norrbottens län", "25"),
    ("Värmlands län", "17"),
    ("Örebro län", "18"),
    ("Västmanlands län", "19"),
    ("Dalarnas län", "20"),
    ("Gävleborgs län", "21"),
    ("Västernorrlands län", "22"),
    ("Jämtlands län", "23"),
    ("Kronobergs län", "07"),
    ("Kalmar län", "08"),
    ("Gotlands län", "09"),
    ("Blekinge län", "10"),
    ("Hallands län", "13"),
    ("Södermanlands län", "04"),
];

/// Occupation-field concept ids per branch. The first id is the primary one.
const BRANCH_CONCEPT_IDS: [(Branch, &[&str]); 12] = [
    (Branch::DataIt, &["apaJ_2ja_LuF"]),
    (Branch::Health, &["NYW6_mP6_vwf", "GazW_2TU_kJw"]),
    (Branch::Sales, &["RPTn_bxG_ExZ"]),
    (Branch::Administration, &["X82t_awd_Qyc"]),
    (Branch::Construction, &["j7Cq_ZJe_GkT", "yhCP_AqT_tns"]),
    (Branch::Manufacturing, &["wTEr_CBC_bqh", "6Hq3_tKo_V57"]),
    (Branch::Education, &["MVqp_eS8_kDZ", "kYj3_dTp_hM8"]),
    (Branch::Security, &["E7hm_BLq_fqZ", "bH5L_uXD_ZAX"]),
    (Branch::Transport, &["ASGV_zcE_bWf"]),
    (Branch::Service, &["ScKy_FHB_7wT", "Uuf1_GMh_Uvw"]),
    (Branch::Agriculture, &["VuuL_7CH_adj"]),
    (Branch::Arts, &["9puE_nYg_crq"]),
];

/// Region code for a county name.
pub fn region_code_for_county(county: &str) -> Option<&'static str> {
    COUNTY_REGION_CODES
        .iter()
        .find(|(name, _)| *name == county)
        .map(|(_, code)| *code)
}

/// Region codes for the given counties, in input order. Unknown counties are dropped.
pub fn region_codes_for_counties<S: AsRef<str>>(counties: &[S]) -> Vec<&'static str> {
    counties
        .iter()
        .filter_map(|county| region_code_for_county(county.as_ref()))
        .collect()
}

/// County name for a region code.
pub fn county_for_region_code(code: &str) -> Option<&'static str> {
    COUNTY_REGION_CODES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}

/// Concept ids for a branch label. Empty for unknown labels.
pub fn taxonomy_ids_for_branch(branch: &str) -> &'static [&'static str] {
    Branch::from_label(branch)
        .map(concept_ids)
        .unwrap_or_default()
}

/// The primary concept id of a branch, the only one sent to the search API.
pub fn primary_taxonomy_id(branch: &str) -> Option<&'static str> {
    taxonomy_ids_for_branch(branch).first().copied()
}

fn concept_ids(branch: Branch) -> &'static [&'static str] {
    BRANCH_CONCEPT_IDS
        .iter()
        .find(|(b, _)| *b == branch)
        .map(|(_, ids)| *ids)
        .unwrap_or_default()
}

/// Occupation field concept from the taxonomy API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OccupationField {
    #[serde(alias = "taxonomy/id", alias = "id")]
    pub concept_id: String,
    #[serde(alias = "taxonomy/preferred-label", alias = "preferred_label")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Occupation group concept from the taxonomy API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OccupationGroup {
    #[serde(alias = "taxonomy/id", alias = "id")]
    pub concept_id: String,
    #[serde(alias = "taxonomy/preferred-label", alias = "preferred_label")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation_field_id: Option<String>,
}

/// Occupation concept from the taxonomy API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OccupationConcept {
    #[serde(alias = "taxonomy/id", alias = "id")]
    pub concept_id: String,
    #[serde(default, alias = "taxonomy/preferred-label", alias = "preferred_label")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation_field_id: Option<String>,
}

/// Built-in occupation fields used when the taxonomy API is unreachable.
pub fn fallback_occupation_fields() -> Vec<OccupationField> {
    [
        ("1", "Administration, ekonomi, juridik"),
        ("2", "Bygg, anläggning, installation"),
        ("3", "Data, IT, telekommunikation"),
        ("4", "Försäljning, inköp, marknadsföring"),
        ("5", "Hälsa, medicin, vård, omsorg"),
        ("6", "Teknik, tillverkning, transport"),
    ]
    .into_iter()
    .map(|(id, label)| OccupationField {
        concept_id: id.to_string(),
        label: label.to_string(),
        description: None,
    })
    .collect()
}

/// Client for the taxonomy API.
pub struct TaxonomyClient {
    client: Client,
    base_url: String,
    fields_cache: Mutex<Option<Vec<OccupationField>>>,
}

impl TaxonomyClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            fields_cache: Mutex::new(None),
        }
    }

    /// All occupation fields.
    ///
    /// The first successful response is cached. On failure the built-in
    /// table is returned and nothing is cached, so the next call retries.
    pub async fn occupation_fields(&self) -> Vec<OccupationField> {
        if let Some(cached) = self.cached_fields() {
            return cached;
        }

        match self.fetch_occupation_fields().await {
            Ok(fields) => {
                if let Ok(mut cache) = self.fields_cache.lock() {
                    *cache = Some(fields.clone());
                }
                fields
            }
            Err(e) => {
                log::warn!("Failed to fetch occupation fields: {}. Using built-in table.", e);
                fallback_occupation_fields()
            }
        }
    }

    /// A single occupation field by concept id.
    ///
    /// Falls back to searching [`Self::occupation_fields`] when the direct
    /// lookup fails.
    pub async fn occupation_field(&self, concept_id: &str) -> Option<OccupationField> {
        let direct = self.fetch_occupation_field(concept_id).await;

        match direct {
            Ok(field) => Some(field),
            Err(e) => {
                log::debug!("Direct lookup of occupation field {} failed: {}", concept_id, e);
                self.occupation_fields()
                    .await
                    .into_iter()
                    .find(|field| field.concept_id == concept_id)
            }
        }
    }

    /// The occupation field an occupation belongs to.
    ///
    /// `None` when the occupation cannot be fetched, names no field, or names
    /// one missing from [`Self::occupation_fields`].
    pub async fn occupation_field_for_occupation(
        &self,
        occupation_id: &str,
    ) -> Option<OccupationField> {
        let occupation = match self.fetch_occupation(occupation_id).await {
            Ok(occupation) => occupation,
            Err(e) => {
                log::warn!("Failed to fetch occupation {}: {}", occupation_id, e);
                return None;
            }
        };
        let field_id = occupation.occupation_field_id?;

        self.occupation_fields()
            .await
            .into_iter()
            .find(|field| field.concept_id == field_id)
    }

    /// All occupation groups. Empty on failure.
    pub async fn occupation_groups(&self) -> Vec<OccupationGroup> {
        let fetched = self.fetch_occupation_groups().await;

        fetched.unwrap_or_else(|e| {
            log::warn!("Failed to fetch occupation groups: {}", e);
            Vec::new()
        })
    }

    fn cached_fields(&self) -> Option<Vec<OccupationField>> {
        self.fields_cache.lock().ok()?.clone()
    }

    async fn fetch_occupation_fields(&self) -> Result<Vec<OccupationField>> {
        let url = endpoint(&self.base_url, &["occupation-fields"])?;
        get_json(&self.client, url, "occupation-fields").await
    }

    async fn fetch_occupation_field(&self, concept_id: &str) -> Result<OccupationField> {
        let url = endpoint(&self.base_url, &["occupation-field", concept_id])?;
        get_json(&self.client, url, concept_id).await
    }

    async fn fetch_occupation(&self, concept_id: &str) -> Result<OccupationConcept> {
        let url = endpoint(&self.base_url, &["occupation", concept_id])?;
        get_json(&self.client, url, concept_id).await
    }

    async fn fetch_occupation_groups(&self) -> Result<Vec<OccupationGroup>> {
        let url = endpoint(&self.base_url, &["occupation-groups"])?;
        get_json(&self.client, url, "occupation-groups").await
    }
}
