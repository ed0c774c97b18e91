use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;

use crate::filter::{FilterParams, PerkFilter, Summary};
use crate::perks::{self, Perk};

/// Response body for `GET /api/perks`.
#[derive(Debug, Serialize)]
pub struct PerkListing {
    pub perks: Vec<Perk>,
    pub merchants: Vec<String>,
    pub summary: Summary,
}

pub async fn list_perks(
    State(state): State<crate::SharedAppState>,
    Query(params): Query<FilterParams>,
) -> crate::AppResult<Json<PerkListing>> {
    let all_perks = state.client.list_perks().await?;
    let filter = PerkFilter::from(&params);

    Ok(Json(PerkListing {
        perks: filter.apply(&all_perks).into_iter().cloned().collect(),
        merchants: perks::list_merchants(&all_perks),
        summary: filter.summarize(&all_perks),
    }))
}

pub async fn list_merchants(
    State(state): State<crate::SharedAppState>,
) -> crate::AppResult<Json<Vec<String>>> {
    let all_perks = state.client.list_perks().await?;
    Ok(Json(perks::list_merchants(&all_perks)))
}
