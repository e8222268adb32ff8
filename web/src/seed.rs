//! Optional demo data for an empty journal.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use shared::{
    Direction, EntryDetail, ExitDetail, FollowUp, RiskManagement, Trade, TradeReview,
    TradeService,
};

/// Inserts the sample trades when seeding is enabled and the store is still
/// empty; an already-populated store is left untouched.
pub async fn maybe_seed(service: &TradeService, enabled: bool) -> Result<()> {
    if !enabled {
        return Ok(());
    }

    let existing = service.list().await.context("check existing trades")?;
    if !existing.is_empty() {
        tracing::info!(
            count = existing.len(),
            "seed skipped, trades already exist"
        );
        return Ok(());
    }

    let samples = sample_trades();
    let count = samples.len();
    for trade in samples {
        service.create(trade).await.context("create sample trade")?;
    }
    tracing::info!(count, "seeded sample trades");
    Ok(())
}

fn sample_trades() -> Vec<Trade> {
    let now = Utc::now();

    let exit_date = now - Duration::days(5);
    let entry_date = exit_date - Duration::days(7);

    let closed_long = Trade {
        instrument: "AAPL".to_string(),
        market: "NASDAQ".to_string(),
        direction: Direction::Long,
        setup: "Earnings breakout".to_string(),
        entry: EntryDetail {
            date: entry_date,
            price: 180.50,
            quantity: 100.0,
            fees: 4.5,
            stop_loss: Some(172.00),
            target: Some(195.00),
            risk_per_share: None,
            notes: "Entry on strong gap continuation above pre-market range.".to_string(),
        },
        exit: Some(ExitDetail {
            date: exit_date,
            price: 190.20,
            quantity: 100.0,
            fees: 5.25,
            reason: "Scaled out as price tagged measured move target.".to_string(),
            notes: "Could have kept a runner but respected plan.".to_string(),
        }),
        risk_management: RiskManagement {
            thesis: "Institutional participation expected post-earnings beat.".to_string(),
            plan: "Enter on first pullback with volume confirmation.".to_string(),
            checklist: "Market uptrend, sector strength, catalyst in play.".to_string(),
            max_risk_amount: 800.0,
            position_sizing: "1R = 8 points, 100 shares.".to_string(),
            contingency_plan: "Cut half if intraday VWAP lost.".to_string(),
        },
        follow_ups: vec![
            FollowUp {
                days_after: 7,
                price: 192.50,
                notes: "Price consolidated above breakout level.".to_string(),
                logged_at: exit_date + Duration::days(7),
            },
            FollowUp {
                days_after: 30,
                price: 205.10,
                notes: "Another leg higher once indices reclaimed highs.".to_string(),
                logged_at: exit_date + Duration::days(30),
            },
        ],
        review: TradeReview {
            outcome_summary: "Plan followed, partials executed cleanly.".to_string(),
            psychology: "Calm at open thanks to prep; minor FOMO on runner.".to_string(),
            improvements: "Consider leaving a 10% runner when trend context strong."
                .to_string(),
            tags: vec!["Earnings".to_string(), "Breakout".to_string(), "Swing".to_string()],
        },
        market_context: "S&P 500 reclaiming 50DMA with tech leadership.".to_string(),
        additional_notes: "Watch for post-breakout digestion patterns.".to_string(),
        execution_score: Some(8.5),
        confidence_before: Some(7.5),
        confidence_after: Some(9.0),
        ..Default::default()
    };

    let open_short = Trade {
        instrument: "CL Futures".to_string(),
        market: "NYMEX".to_string(),
        direction: Direction::Short,
        setup: "Daily lower high after failed breakout".to_string(),
        entry: EntryDetail {
            date: now - Duration::days(3),
            price: 78.40,
            quantity: 2.0,
            fees: 6.0,
            stop_loss: Some(80.10),
            target: Some(73.80),
            risk_per_share: None,
            notes: "Shorted retest of broken trendline with weakening momentum.".to_string(),
        },
        exit: None,
        risk_management: RiskManagement {
            thesis: "Supply rebuild and dollar strength could pressure crude.".to_string(),
            plan: "Add on breakdown below 77.50 if volume accelerates.".to_string(),
            checklist: "Macro alignment, inventory trend, sentiment extremes.".to_string(),
            max_risk_amount: 650.0,
            position_sizing: "2 contracts = ~$3,400 exposure per point.".to_string(),
            contingency_plan: "Stop and reassess if 4H closes above 79.80.".to_string(),
        },
        review: TradeReview {
            outcome_summary: "Open position with partial profit potential.".to_string(),
            psychology: "Confident after pre-market plan review.".to_string(),
            improvements: "Trail stop intraday once price moves 1R.".to_string(),
            tags: vec!["Trend".to_string(), "Commodities".to_string()],
        },
        market_context: "Dollar index bouncing, energy sector lagging broader market."
            .to_string(),
        additional_notes: "Monitor OPEC headlines and EIA release mid-week.".to_string(),
        execution_score: Some(7.0),
        confidence_before: Some(8.0),
        ..Default::default()
    };

    vec![closed_long, open_short]
}
