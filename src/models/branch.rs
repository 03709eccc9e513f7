//! Branch (industry category) used to group and filter job ads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Fixed set of branches a job ad can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Branch {
    DataIt,
    Health,
    Sales,
    Administration,
    Construction,
    Manufacturing,
    Education,
    Security,
    Transport,
    Service,
    Agriculture,
    Arts,
}

impl Branch {
    /// All branches, in classification priority order.
    pub const ALL: [Branch; 12] = [
        Branch::DataIt,
        Branch::Health,
        Branch::Sales,
        Branch::Administration,
        Branch::Construction,
        Branch::Manufacturing,
        Branch::Education,
        Branch::Security,
        Branch::Transport,
        Branch::Service,
        Branch::Agriculture,
        Branch::Arts,
    ];

    /// Human-readable (Swedish) label, as shown to users and used in filters.
    pub fn label(&self) -> &'static str {
        match self {
            Branch::DataIt => "Data, IT, telekommunikation",
            Branch::Health => "Hälsa, medicin, vård, omsorg",
            Branch::Sales => "Försäljning, inköp, marknadsföring",
            Branch::Administration => "Administration, ekonomi, juridik",
            Branch::Construction => "Bygg, anläggning, installation",
            Branch::Manufacturing => "Teknik, tillverkning, transport",
            Branch::Education => "Utbildning, forskning, kultur",
            Branch::Security => "Säkerhet, rättsväsende, försvar",
            Branch::Transport => "Transport, logistik, mekanik",
            Branch::Service => "Service, turism, restaurang",
            Branch::Agriculture => "Jordbruk, skogsbruk, miljö",
            Branch::Arts => "Konst, design, media",
        }
    }

    /// Look up a branch by its label. Case and surrounding whitespace are ignored.
    pub fn from_label(label: &str) -> Option<Branch> {
        let wanted = label.trim().to_lowercase();
        Branch::ALL
            .into_iter()
            .find(|b| b.label().to_lowercase() == wanted)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Branch {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Branch::from_label(s).ok_or_else(|| AppError::validation(format!("Unknown branch: {s}")))
    }
}

impl TryFrom<String> for Branch {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Branch> for String {
    fn from(branch: Branch) -> Self {
        branch.label().to_string()
    }
}
