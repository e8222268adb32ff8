//! Askama templates and their view models.
//!
//! Display values are preformatted here so the templates stay declarative:
//! metric numbers arrive as strings, optional metrics as `Option<String>`.

use askama::Template;
use chrono::{DateTime, Utc};
use shared::{Direction, Trade};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub flash: Option<String>,
    pub rows: Vec<TradeRow>,
}

/// One line of the journal index.
pub struct TradeRow {
    pub id: String,
    pub instrument: String,
    pub market: String,
    pub direction: &'static str,
    pub setup: String,
    pub entry_date: String,
    pub status: &'static str,
    pub net_result: String,
    pub result_percent: String,
    pub r_multiple: String,
    pub follow_up_7: Option<String>,
    pub follow_up_30: Option<String>,
    pub tags: String,
}

impl TradeRow {
    pub fn from_trade(trade: &Trade) -> Self {
        Self {
            id: trade.id.clone(),
            instrument: trade.instrument.clone(),
            market: trade.market.clone(),
            direction: trade.direction.as_str(),
            setup: trade.setup.clone(),
            entry_date: date(trade.entry.date),
            status: if trade.has_exited() { "CLOSED" } else { "OPEN" },
            net_result: money(trade.net_result()),
            result_percent: percent(trade.result_percent()),
            r_multiple: r_multiple(trade.r_multiple()),
            follow_up_7: trade.follow_up_change_percent(7).map(signed_percent),
            follow_up_30: trade.follow_up_change_percent(30).map(signed_percent),
            tags: trade
                .review
                .tags
                .iter()
                .map(|tag| format_tag(tag))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Template)]
#[template(path = "trade_form.html")]
pub struct TradeFormTemplate {
    pub title: String,
    pub action: String,
    pub values: FormValues,
}

/// String renditions of every form input, used both for a blank form and
/// for the edit form prefilled from a stored trade.
pub struct FormValues {
    pub instrument: String,
    pub market: String,
    pub setup: String,
    pub direction: String,
    pub entry_date: String,
    pub entry_price: String,
    pub entry_quantity: String,
    pub entry_fees: String,
    pub entry_stop_loss: String,
    pub entry_target: String,
    pub entry_risk: String,
    pub entry_notes: String,
    pub thesis: String,
    pub plan: String,
    pub checklist: String,
    pub max_risk: String,
    pub position_sizing: String,
    pub contingency_plan: String,
    pub exit_date: String,
    pub exit_price: String,
    pub exit_quantity: String,
    pub exit_fees: String,
    pub exit_reason: String,
    pub exit_notes: String,
    pub outcome: String,
    pub psychology: String,
    pub improvements: String,
    pub tags: String,
    pub market_context: String,
    pub additional_notes: String,
    pub execution_score: String,
    pub confidence_before: String,
    pub confidence_after: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            instrument: String::new(),
            market: String::new(),
            setup: String::new(),
            direction: Direction::Long.as_str().to_string(),
            entry_date: String::new(),
            entry_price: String::new(),
            entry_quantity: String::new(),
            entry_fees: String::new(),
            entry_stop_loss: String::new(),
            entry_target: String::new(),
            entry_risk: String::new(),
            entry_notes: String::new(),
            thesis: String::new(),
            plan: String::new(),
            checklist: String::new(),
            max_risk: String::new(),
            position_sizing: String::new(),
            contingency_plan: String::new(),
            exit_date: String::new(),
            exit_price: String::new(),
            exit_quantity: String::new(),
            exit_fees: String::new(),
            exit_reason: String::new(),
            exit_notes: String::new(),
            outcome: String::new(),
            psychology: String::new(),
            improvements: String::new(),
            tags: String::new(),
            market_context: String::new(),
            additional_notes: String::new(),
            execution_score: String::new(),
            confidence_before: String::new(),
            confidence_after: String::new(),
        }
    }
}

impl FormValues {
    pub fn from_trade(trade: &Trade) -> Self {
        let mut values = Self {
            instrument: trade.instrument.clone(),
            market: trade.market.clone(),
            setup: trade.setup.clone(),
            direction: trade.direction.as_str().to_string(),
            entry_date: date(trade.entry.date),
            entry_price: number(trade.entry.price),
            entry_quantity: number(trade.entry.quantity),
            entry_fees: number(trade.entry.fees),
            entry_stop_loss: optional_number(trade.entry.stop_loss),
            entry_target: optional_number(trade.entry.target),
            entry_risk: optional_number(trade.entry.risk_per_share),
            entry_notes: trade.entry.notes.clone(),
            thesis: trade.risk_management.thesis.clone(),
            plan: trade.risk_management.plan.clone(),
            checklist: trade.risk_management.checklist.clone(),
            max_risk: number(trade.risk_management.max_risk_amount),
            position_sizing: trade.risk_management.position_sizing.clone(),
            contingency_plan: trade.risk_management.contingency_plan.clone(),
            outcome: trade.review.outcome_summary.clone(),
            psychology: trade.review.psychology.clone(),
            improvements: trade.review.improvements.clone(),
            tags: trade.review.tags.join(", "),
            market_context: trade.market_context.clone(),
            additional_notes: trade.additional_notes.clone(),
            execution_score: optional_number(trade.execution_score),
            confidence_before: optional_number(trade.confidence_before),
            confidence_after: optional_number(trade.confidence_after),
            ..Default::default()
        };
        if let Some(exit) = &trade.exit {
            values.exit_date = date(exit.date);
            values.exit_price = number(exit.price);
            values.exit_quantity = number(exit.quantity);
            values.exit_fees = number(exit.fees);
            values.exit_reason = exit.reason.clone();
            values.exit_notes = exit.notes.clone();
        }
        values
    }
}

#[derive(Template)]
#[template(path = "trade_detail.html")]
pub struct TradeDetailTemplate {
    pub flash: Option<String>,
    pub id: String,
    pub instrument: String,
    pub market: String,
    pub direction: &'static str,
    pub setup: String,
    pub status: &'static str,
    pub entry: EntryView,
    pub exit: Option<ExitView>,
    pub risk: RiskView,
    pub follow_ups: Vec<FollowUpView>,
    pub review: ReviewView,
    pub market_context: String,
    pub additional_notes: String,
    pub execution_score: Option<String>,
    pub confidence_before: Option<String>,
    pub confidence_after: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub metrics: MetricsView,
}

pub struct EntryView {
    pub date: String,
    pub price: String,
    pub quantity: String,
    pub fees: String,
    pub stop_loss: Option<String>,
    pub target: Option<String>,
    pub risk_per_share: Option<String>,
    pub notes: String,
}

pub struct ExitView {
    pub date: String,
    pub price: String,
    pub quantity: String,
    pub fees: String,
    pub reason: String,
    pub notes: String,
}

pub struct RiskView {
    pub thesis: String,
    pub plan: String,
    pub checklist: String,
    pub max_risk_amount: String,
    pub position_sizing: String,
    pub contingency_plan: String,
}

pub struct FollowUpView {
    pub days_after: i32,
    pub price: String,
    pub change: Option<String>,
    pub notes: String,
    pub logged_at: String,
}

pub struct ReviewView {
    pub outcome_summary: String,
    pub psychology: String,
    pub improvements: String,
    pub tags: Vec<String>,
}

/// Derived metric panel of the detail page.
pub struct MetricsView {
    pub gross_exposure: String,
    pub net_result: String,
    pub result_percent: String,
    pub r_multiple: String,
    pub total_risk: String,
    pub target_r: String,
    pub follow_up_7: Option<String>,
    pub follow_up_30: Option<String>,
    pub unrealized: Option<UnrealizedView>,
}

pub struct UnrealizedView {
    pub close_price: String,
    pub result: String,
    pub percent: String,
}

impl TradeDetailTemplate {
    pub fn new(trade: &Trade, close_price: Option<f64>, flash: Option<String>) -> Self {
        let metrics = MetricsView {
            gross_exposure: money(trade.gross_exposure()),
            net_result: money(trade.net_result()),
            result_percent: percent(trade.result_percent()),
            r_multiple: r_multiple(trade.r_multiple()),
            total_risk: money(trade.total_risk_amount()),
            target_r: r_multiple(trade.effective_reward_target()),
            follow_up_7: trade.follow_up_change_percent(7).map(signed_percent),
            follow_up_30: trade.follow_up_change_percent(30).map(signed_percent),
            unrealized: close_price.map(|close| UnrealizedView {
                close_price: number(close),
                result: money(trade.unrealized_result(close)),
                percent: percent(trade.unrealized_percent(close)),
            }),
        };

        Self {
            flash,
            id: trade.id.clone(),
            instrument: trade.instrument.clone(),
            market: trade.market.clone(),
            direction: trade.direction.as_str(),
            setup: trade.setup.clone(),
            status: if trade.has_exited() { "CLOSED" } else { "OPEN" },
            entry: EntryView {
                date: date(trade.entry.date),
                price: money(trade.entry.price),
                quantity: number(trade.entry.quantity),
                fees: money(trade.entry.fees),
                stop_loss: trade.entry.stop_loss.map(money),
                target: trade.entry.target.map(money),
                risk_per_share: trade.entry.risk_per_share.map(money),
                notes: trade.entry.notes.clone(),
            },
            exit: trade.exit.as_ref().map(|exit| ExitView {
                date: date(exit.date),
                price: money(exit.price),
                quantity: number(exit.quantity),
                fees: money(exit.fees),
                reason: exit.reason.clone(),
                notes: exit.notes.clone(),
            }),
            risk: RiskView {
                thesis: trade.risk_management.thesis.clone(),
                plan: trade.risk_management.plan.clone(),
                checklist: trade.risk_management.checklist.clone(),
                max_risk_amount: money(trade.risk_management.max_risk_amount),
                position_sizing: trade.risk_management.position_sizing.clone(),
                contingency_plan: trade.risk_management.contingency_plan.clone(),
            },
            follow_ups: trade
                .follow_ups
                .iter()
                .map(|follow_up| FollowUpView {
                    days_after: follow_up.days_after,
                    price: money(follow_up.price),
                    change: trade
                        .follow_up_change_percent(follow_up.days_after)
                        .map(signed_percent),
                    notes: follow_up.notes.clone(),
                    logged_at: date(follow_up.logged_at),
                })
                .collect(),
            review: ReviewView {
                outcome_summary: trade.review.outcome_summary.clone(),
                psychology: trade.review.psychology.clone(),
                improvements: trade.review.improvements.clone(),
                tags: trade.review.tags.iter().map(|tag| format_tag(tag)).collect(),
            },
            market_context: trade.market_context.clone(),
            additional_notes: trade.additional_notes.clone(),
            execution_score: trade.execution_score.map(number),
            confidence_before: trade.confidence_before.map(number),
            confidence_after: trade.confidence_after.map(number),
            created_at: date(trade.created_at),
            updated_at: date(trade.updated_at),
            metrics,
        }
    }
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn signed_percent(value: f64) -> String {
    format!("{value:+.2}%")
}

fn r_multiple(value: f64) -> String {
    format!("{value:.2}R")
}

fn number(value: f64) -> String {
    format!("{value}")
}

fn optional_number(value: Option<f64>) -> String {
    value.map(number).unwrap_or_default()
}

fn date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Human-readable tag label: separators become spaces, words are
/// capitalized.
pub fn format_tag(tag: &str) -> String {
    let cleaned = tag.replace(['-', '_'], " ");
    cleaned
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{EntryDetail, ExitDetail, FollowUp};

    #[test]
    fn format_tag_capitalizes_words() {
        assert_eq!(format_tag("mean-reversion"), "Mean Reversion");
        assert_eq!(format_tag("breakout"), "Breakout");
        assert_eq!(format_tag("  "), "");
    }

    #[test]
    fn trade_row_shows_follow_up_when_present() {
        let trade = Trade {
            direction: Direction::Long,
            entry: EntryDetail {
                price: 80.0,
                quantity: 10.0,
                ..Default::default()
            },
            exit: Some(ExitDetail {
                price: 100.0,
                quantity: 10.0,
                ..Default::default()
            }),
            follow_ups: vec![FollowUp {
                days_after: 7,
                price: 120.0,
                ..Default::default()
            }],
            ..Default::default()
        };

        let row = TradeRow::from_trade(&trade);
        assert_eq!(row.status, "CLOSED");
        assert_eq!(row.follow_up_7.as_deref(), Some("+20.00%"));
        assert!(row.follow_up_30.is_none());
    }

    #[test]
    fn detail_includes_unrealized_only_with_close_price() {
        let trade = Trade {
            entry: EntryDetail {
                price: 100.0,
                quantity: 10.0,
                fees: 1.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let without = TradeDetailTemplate::new(&trade, None, None);
        assert!(without.metrics.unrealized.is_none());

        let with = TradeDetailTemplate::new(&trade, Some(110.0), None);
        let unrealized = with.metrics.unrealized.expect("unrealized metrics");
        assert_eq!(unrealized.result, "99.00");
    }

    #[test]
    fn form_values_prefill_from_trade() {
        let trade = Trade {
            instrument: "AAPL".into(),
            entry: EntryDetail {
                price: 180.5,
                quantity: 100.0,
                stop_loss: Some(172.0),
                ..Default::default()
            },
            ..Default::default()
        };

        let values = FormValues::from_trade(&trade);
        assert_eq!(values.instrument, "AAPL");
        assert_eq!(values.entry_price, "180.5");
        assert_eq!(values.entry_stop_loss, "172");
        assert_eq!(values.exit_price, "");
    }
}
