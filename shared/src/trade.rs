//! Trade aggregate and derived metrics.
//!
//! All metric calculations are total functions: degenerate inputs (no stop
//! loss, zero exposure, zero risk) yield `0.0` instead of an error so the
//! presentation layer never has to special-case them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Side of the market a trade was taken on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Long,
    Short,
}

impl Direction {
    /// Price difference from `from` to `to`, signed so that a profitable
    /// move is positive for both sides. Every P/L-bearing calculation goes
    /// through this one helper.
    pub fn signed_delta(self, to: f64, from: f64) -> f64 {
        match self {
            Direction::Long => to - from,
            Direction::Short => from - to,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }

    /// Parses a form value; anything unrecognized falls back to LONG.
    pub fn from_form(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "SHORT" => Direction::Short,
            _ => Direction::Long,
        }
    }
}

/// Details captured when entering a position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDetail {
    pub date: DateTime<Utc>,
    pub price: f64,
    pub quantity: f64,
    pub fees: f64,
    pub stop_loss: Option<f64>,
    pub target: Option<f64>,
    /// Manual override; takes precedence over the stop-loss-derived risk.
    pub risk_per_share: Option<f64>,
    pub notes: String,
}

impl Default for EntryDetail {
    fn default() -> Self {
        Self {
            date: Utc::now(),
            price: 0.0,
            quantity: 0.0,
            fees: 0.0,
            stop_loss: None,
            target: None,
            risk_per_share: None,
            notes: String::new(),
        }
    }
}

/// Details captured when closing a position. Its presence on a trade is the
/// sole signal that the trade is closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitDetail {
    pub date: DateTime<Utc>,
    pub price: f64,
    pub quantity: f64,
    pub fees: f64,
    pub reason: String,
    pub notes: String,
}

impl Default for ExitDetail {
    fn default() -> Self {
        Self {
            date: Utc::now(),
            price: 0.0,
            quantity: 0.0,
            fees: 0.0,
            reason: String::new(),
            notes: String::new(),
        }
    }
}

/// Risk plan written down before (or while) the trade was live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskManagement {
    pub thesis: String,
    pub plan: String,
    pub checklist: String,
    pub max_risk_amount: f64,
    pub position_sizing: String,
    pub contingency_plan: String,
}

/// Post-exit price observation at a fixed day offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUp {
    pub days_after: i32,
    pub price: f64,
    pub notes: String,
    pub logged_at: DateTime<Utc>,
}

impl Default for FollowUp {
    fn default() -> Self {
        Self {
            days_after: 0,
            price: 0.0,
            notes: String::new(),
            logged_at: Utc::now(),
        }
    }
}

/// Lessons learnt from the trade.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeReview {
    pub outcome_summary: String,
    pub psychology: String,
    pub improvements: String,
    pub tags: Vec<String>,
}

/// Aggregate root: one documented position from entry to (optionally) exit.
///
/// Serialized field names match the journal's document-store layout, so a
/// document backend can persist the aggregate verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    #[serde(rename = "_id")]
    pub id: String,
    pub instrument: String,
    pub market: String,
    pub direction: Direction,
    pub setup: String,
    pub entry: EntryDetail,
    pub exit: Option<ExitDetail>,
    pub risk_management: RiskManagement,
    pub follow_ups: Vec<FollowUp>,
    pub review: TradeReview,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub additional_notes: String,
    pub market_context: String,
    pub execution_score: Option<f64>,
    pub confidence_before: Option<f64>,
    pub confidence_after: Option<f64>,
}

impl Default for Trade {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            instrument: String::new(),
            market: String::new(),
            direction: Direction::Long,
            setup: String::new(),
            entry: EntryDetail::default(),
            exit: None,
            risk_management: RiskManagement::default(),
            follow_ups: Vec::new(),
            review: TradeReview::default(),
            created_at: now,
            updated_at: now,
            additional_notes: String::new(),
            market_context: String::new(),
            execution_score: None,
            confidence_before: None,
            confidence_after: None,
        }
    }
}

impl Trade {
    /// Notional size of the position at entry. Quantity is treated as a
    /// magnitude here even if it was entered signed.
    pub fn gross_exposure(&self) -> f64 {
        (self.entry.price * self.entry.quantity).abs()
    }

    /// Risk assumed per share. A manual override wins over the stop-loss
    /// derived value; with neither in place the risk is zero.
    pub fn risk_per_share(&self) -> f64 {
        if let Some(manual) = self.entry.risk_per_share {
            return manual;
        }
        match self.entry.stop_loss {
            Some(stop) => self.direction.signed_delta(self.entry.price, stop),
            None => 0.0,
        }
    }

    /// Nominal amount at risk across the whole position.
    pub fn total_risk_amount(&self) -> f64 {
        self.risk_per_share() * self.entry.quantity
    }

    pub fn has_exited(&self) -> bool {
        self.exit.is_some()
    }

    /// Profit or loss before fees; zero while the trade is open.
    pub fn gross_result(&self) -> f64 {
        match &self.exit {
            Some(exit) => {
                self.direction.signed_delta(exit.price, self.entry.price) * self.entry.quantity
            }
            None => 0.0,
        }
    }

    /// Result net of entry and exit fees. An open trade carries its entry
    /// fees as a sunk cost.
    pub fn net_result(&self) -> f64 {
        match &self.exit {
            Some(exit) => self.gross_result() - self.entry.fees - exit.fees,
            None => -self.entry.fees,
        }
    }

    /// Net result as a percentage of gross exposure.
    pub fn result_percent(&self) -> f64 {
        let exposure = self.gross_exposure();
        if exposure == 0.0 {
            return 0.0;
        }
        (self.net_result() / exposure) * 100.0
    }

    /// Net result expressed as a multiple of the amount risked.
    pub fn r_multiple(&self) -> f64 {
        let risk = self.total_risk_amount();
        if risk == 0.0 {
            return 0.0;
        }
        self.net_result() / risk
    }

    /// Percentage move between the exit price and the follow-up observation
    /// recorded at `days_after`. Returns `None` when the trade is still open
    /// or no observation with that offset exists; the first stored match
    /// wins when offsets repeat.
    pub fn follow_up_change_percent(&self, days_after: i32) -> Option<f64> {
        let exit = self.exit.as_ref()?;
        let follow_up = self.follow_ups.iter().find(|f| f.days_after == days_after)?;
        if exit.price == 0.0 {
            return Some(0.0);
        }
        Some(self.direction.signed_delta(follow_up.price, exit.price) / exit.price * 100.0)
    }

    /// Estimated P/L given a hypothetical current price. A closed trade
    /// reports its realized net result and ignores `close_price`.
    pub fn unrealized_result(&self, close_price: f64) -> f64 {
        if self.has_exited() {
            return self.net_result();
        }
        self.direction.signed_delta(close_price, self.entry.price) * self.entry.quantity
            - self.entry.fees
    }

    /// Unrealized return as a percentage of gross exposure.
    pub fn unrealized_percent(&self, close_price: f64) -> f64 {
        let exposure = self.gross_exposure();
        if exposure == 0.0 {
            return 0.0;
        }
        (self.unrealized_result(close_price) / exposure) * 100.0
    }

    /// Reward-to-risk multiple of the planned target price, when one is set.
    pub fn effective_reward_target(&self) -> f64 {
        let Some(target) = self.entry.target else {
            return 0.0;
        };
        let risk = self.total_risk_amount();
        if risk == 0.0 {
            return 0.0;
        }
        let projected = self.direction.signed_delta(target, self.entry.price) * self.entry.quantity;
        projected / risk
    }
}
