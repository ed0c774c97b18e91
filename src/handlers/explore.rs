use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::filter::{FilterParams, PerkFilter};
use crate::perks;
use crate::templates::{ExploreState, ExploreTemplate, ExploreView};

pub async fn explore(
    State(state): State<crate::SharedAppState>,
    Query(params): Query<FilterParams>,
) -> impl IntoResponse {
    let filter = PerkFilter::from(&params);

    let (status, page_state) = match state.client.list_perks().await {
        Ok(all_perks) => {
            let merchants = perks::list_merchants(&all_perks);
            let view = ExploreView::build(&all_perks, merchants, &filter);
            tracing::debug!("{} for name={:?}", view.summary, filter.name_input());
            (StatusCode::OK, ExploreState::Loaded(view))
        }
        Err(e) => {
            let err = crate::AppError::from(e);
            tracing::error!("{}", err);
            (err.status(), ExploreState::Failed(err.to_string()))
        }
    };

    (
        status,
        ExploreTemplate {
            project_name: state.project_name.clone(),
            page_title: "Explore".to_string(),
            active_nav: "explore",
            app_version: state.app_version.clone(),
            name_input: filter.name_input().to_string(),
            state: page_state,
        },
    )
}
