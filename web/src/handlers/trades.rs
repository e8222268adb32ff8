//! Route handlers for the journal pages.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::forms::{FollowUpForm, TradeForm};
use crate::state::AppState;
use crate::views::{
    FormValues, IndexTemplate, TradeDetailTemplate, TradeFormTemplate, TradeRow,
};

/// Query parameters shared by the display pages.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub flash: Option<String>,
    pub close_price: Option<String>,
}

/// GET `/` — journal index, newest trades first.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let trades = state.service.list().await?;
    let rows = trades.iter().map(TradeRow::from_trade).collect();

    let page = IndexTemplate {
        flash: query.flash,
        rows,
    };
    Ok(Html(page.render()?))
}

/// GET `/trades/new` — blank trade form.
pub async fn new_trade() -> Result<Html<String>, AppError> {
    let page = TradeFormTemplate {
        title: "Record new trade".to_string(),
        action: "/trades".to_string(),
        values: FormValues::default(),
    };
    Ok(Html(page.render()?))
}

/// POST `/trades` — create a trade from the submitted form.
pub async fn create_trade(
    State(state): State<AppState>,
    Form(form): Form<TradeForm>,
) -> Result<Redirect, AppError> {
    let trade = form.into_trade().map_err(validation_failure)?;
    let stored = state.service.create(trade).await?;
    Ok(Redirect::to(&format!(
        "/trades/{}?flash=Trade+recorded",
        stored.id
    )))
}

/// GET `/trades/:id` — detail page with the metric panel. An optional
/// `close_price` query estimates the unrealized result; unparsable values
/// are silently ignored.
pub async fn show_trade(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let trade = state.service.get(&id).await?;
    let close_price = query
        .close_price
        .as_deref()
        .and_then(|raw| raw.trim().parse::<f64>().ok());

    let page = TradeDetailTemplate::new(&trade, close_price, query.flash);
    Ok(Html(page.render()?))
}

/// GET `/trades/:id/edit` — form prefilled from the stored trade.
pub async fn edit_trade(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let trade = state.service.get(&id).await?;

    let page = TradeFormTemplate {
        title: "Edit trade".to_string(),
        action: format!("/trades/{}/update", trade.id),
        values: FormValues::from_trade(&trade),
    };
    Ok(Html(page.render()?))
}

/// POST `/trades/:id/update` — replace the stored trade with the form
/// contents, keeping the original identifier, creation time and follow-ups.
pub async fn update_trade(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<TradeForm>,
) -> Result<Redirect, AppError> {
    let existing = state.service.get(&id).await?;

    let mut trade = form.into_trade().map_err(validation_failure)?;
    trade.id = existing.id;
    trade.created_at = existing.created_at;
    trade.follow_ups = existing.follow_ups;

    let stored = state.service.update(trade).await?;
    Ok(Redirect::to(&format!(
        "/trades/{}?flash=Trade+updated",
        stored.id
    )))
}

/// POST `/trades/:id/delete`
pub async fn delete_trade(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.service.delete(&id).await?;
    Ok(Redirect::to("/?flash=Trade+deleted"))
}

/// POST `/trades/:id/followups` — append a follow-up observation.
pub async fn add_follow_up(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<FollowUpForm>,
) -> Result<Redirect, AppError> {
    let follow_up = form.into_follow_up().map_err(validation_failure)?;
    state.service.add_follow_up(&id, follow_up).await?;
    Ok(Redirect::to(&format!(
        "/trades/{id}?flash=Follow-up+added"
    )))
}

fn validation_failure(errs: Vec<String>) -> AppError {
    AppError::BadRequest(errs.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use shared::{InMemoryTradeRepository, TradeService};
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState::new(TradeService::new(Arc::new(InMemoryTradeRepository::new())))
    }

    fn minimal_form(instrument: &str) -> TradeForm {
        TradeForm {
            instrument: instrument.into(),
            direction: "LONG".into(),
            entry_date: "2023-01-02".into(),
            entry_price: "100".into(),
            entry_quantity: "10".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_trade_persists_and_redirects() {
        let state = test_state();

        let redirect = create_trade(State(state.clone()), Form(minimal_form("EURUSD")))
            .await
            .unwrap();
        let response = redirect.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let trades = state.service.list().await.unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].instrument, "EURUSD");
    }

    #[tokio::test]
    async fn create_trade_rejects_bad_input() {
        let state = test_state();

        let err = create_trade(State(state), Form(TradeForm::default()))
            .await
            .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_trade_keeps_follow_ups() {
        let state = test_state();

        let stored = state
            .service
            .create(minimal_form("BTCUSD").into_trade().unwrap())
            .await
            .unwrap();
        state
            .service
            .add_follow_up(
                &stored.id,
                shared::FollowUp {
                    days_after: 7,
                    price: 22000.0,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        update_trade(
            State(state.clone()),
            Path(stored.id.clone()),
            Form(minimal_form("BTCUSD")),
        )
        .await
        .unwrap();

        let updated = state.service.get(&stored.id).await.unwrap();
        assert_eq!(updated.follow_ups.len(), 1);
        assert_eq!(updated.created_at, stored.created_at);
    }

    #[tokio::test]
    async fn show_trade_unknown_id_is_404() {
        let state = test_state();

        let err = show_trade(
            State(state),
            Path("missing".to_string()),
            Query(PageQuery::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn index_renders_rows() {
        let state = test_state();
        state
            .service
            .create(minimal_form("AAPL").into_trade().unwrap())
            .await
            .unwrap();

        let Html(body) = index(State(state), Query(PageQuery::default()))
            .await
            .unwrap();
        assert!(body.contains("AAPL"));
    }
}
