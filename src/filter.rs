//! Narrowing a perk listing by name and merchant.
//!
//! The same rules run in `frontend/public/app.js` so the page can refilter
//! without a round trip. Keep the two in step.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::perks::Perk;

/// Raw query parameters shared by the directory page and the API.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub merchant: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MerchantFilter {
    /// The "All Merchants" option.
    #[default]
    All,
    Only(String),
}

impl MerchantFilter {
    /// An absent or empty value selects every merchant.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None | Some("") => MerchantFilter::All,
            Some(merchant) => MerchantFilter::Only(merchant.to_string()),
        }
    }

    pub fn matches(&self, merchant: &str) -> bool {
        match self {
            MerchantFilter::All => true,
            MerchantFilter::Only(wanted) => wanted == merchant,
        }
    }

    pub fn is_selected(&self, merchant: &str) -> bool {
        matches!(self, MerchantFilter::Only(wanted) if wanted == merchant)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PerkFilter {
    name_input: String,
    needle: Option<String>,
    merchant: MerchantFilter,
}

impl PerkFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, input: &str) -> Self {
        let trimmed = input.trim();
        self.name_input = trimmed.to_string();
        self.needle = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
        self
    }

    pub fn with_merchant(mut self, merchant: MerchantFilter) -> Self {
        self.merchant = merchant;
        self
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn merchant(&self) -> &MerchantFilter {
        &self.merchant
    }

    /// Both predicates must hold when both are set.
    pub fn matches(&self, perk: &Perk) -> bool {
        let name_ok = self
            .needle
            .as_deref()
            .is_none_or(|needle| perk.title.to_lowercase().contains(needle));
        name_ok && self.merchant.matches(&perk.merchant)
    }

    pub fn apply<'a>(&self, perks: &'a [Perk]) -> Vec<&'a Perk> {
        perks.iter().filter(|p| self.matches(p)).collect()
    }

    pub fn summarize(&self, perks: &[Perk]) -> Summary {
        Summary {
            shown: perks.iter().filter(|p| self.matches(p)).count(),
            total: perks.len(),
        }
    }
}

impl From<&FilterParams> for PerkFilter {
    fn from(params: &FilterParams) -> Self {
        PerkFilter::new()
            .with_name(params.name.as_deref().unwrap_or_default())
            .with_merchant(MerchantFilter::from_param(params.merchant.as_deref()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub shown: usize,
    pub total: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.total == 1 { "perk" } else { "perks" };
        write!(f, "Showing {} of {} {}", self.shown, self.total, noun)
    }
}
