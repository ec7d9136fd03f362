//! What the user has selected
//!
//! Four independent selectors: category, federation, equipment and tested
//! status. The time window is not part of the selection; it only affects the
//! x axis, never which records are picked.

use serde::{Deserialize, Serialize};

use crate::dataset::{Category, Equipment, FilterKey, Record, Tested};

/// Federation selector value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FederationFilter {
    /// Union across all federations
    #[default]
    All,
    /// Only records of this federation
    Only(String),
}

impl FederationFilter {
    /// Selector value `"all"` means no filtering, anything else is a name
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => FederationFilter::All,
            name => FederationFilter::Only(name.to_string()),
        }
    }

    /// Selector value for this filter
    pub fn as_str(&self) -> &str {
        match self {
            FederationFilter::All => "all",
            FederationFilter::Only(name) => name,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            FederationFilter::All => true,
            FederationFilter::Only(name) => record.is_federation(name),
        }
    }
}

impl std::fmt::Display for FederationFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current selector state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub category: Category,
    pub federation: FederationFilter,
    pub equipment: Equipment,
    pub tested: Tested,
}

impl Selection {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn federation(mut self, federation: FederationFilter) -> Self {
        self.federation = federation;
        self
    }

    pub fn equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn tested(mut self, tested: Tested) -> Self {
        self.tested = tested;
        self
    }

    /// The equipment × tested key this selection asks for
    pub fn filter_key(&self) -> FilterKey {
        FilterKey::new(self.equipment, self.tested)
    }
}
