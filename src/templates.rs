use askama::Template;
use time::macros::format_description;

use crate::filter::{PerkFilter, Summary};
use crate::perks::Perk;

pub struct PerkCard {
    pub title: String,
    pub merchant: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub discount: Option<String>,
    pub expires_on: Option<String>,
    pub visible: bool,
}

impl PerkCard {
    pub fn from_perk(perk: &Perk, visible: bool) -> Self {
        let expires_on = perk
            .expires_at
            .and_then(|at| at.format(format_description!("[year]-[month]-[day]")).ok());

        Self {
            title: perk.title.clone(),
            merchant: perk.merchant.clone(),
            description: perk.description.clone(),
            category: perk.category.clone(),
            discount: perk.discount_percent.map(|pct| format!("{}% off", pct)),
            expires_on,
            visible,
        }
    }
}

pub struct MerchantOption {
    pub name: String,
    pub selected: bool,
}

/// Directory contents once the listing fetch has settled.
pub struct ExploreView {
    pub cards: Vec<PerkCard>,
    pub merchants: Vec<MerchantOption>,
    pub summary: Summary,
}

impl ExploreView {
    /// Every public perk gets a card; the ones the filter rejects start hidden
    /// so the page can widen the filter again without refetching.
    pub fn build(perks: &[Perk], merchants: Vec<String>, filter: &PerkFilter) -> Self {
        let cards = perks
            .iter()
            .map(|p| PerkCard::from_perk(p, filter.matches(p)))
            .collect();
        let merchants = merchants
            .into_iter()
            .map(|name| MerchantOption {
                selected: filter.merchant().is_selected(&name),
                name,
            })
            .collect();

        Self {
            cards,
            merchants,
            summary: filter.summarize(perks),
        }
    }
}

pub enum ExploreState {
    Loaded(ExploreView),
    Failed(String),
}

#[derive(Template)]
#[template(path = "explore.html")]
pub struct ExploreTemplate {
    pub project_name: String,
    pub page_title: String,
    pub active_nav: &'static str,
    pub app_version: String,
    pub name_input: String,
    pub state: ExploreState,
}
