//! Urlencoded form payloads and their conversion into domain values.
//!
//! One flat form covers the whole trade aggregate. Parsing collects every
//! validation message instead of stopping at the first; the exit record is
//! only materialized when at least one exit field was filled in.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use shared::{Direction, EntryDetail, ExitDetail, FollowUp, RiskManagement, Trade, TradeReview};

#[derive(Debug, Default, Deserialize)]
pub struct TradeForm {
    #[serde(default)]
    pub instrument: String,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub setup: String,
    #[serde(default)]
    pub direction: String,

    #[serde(default)]
    pub entry_date: String,
    #[serde(default)]
    pub entry_price: String,
    #[serde(default)]
    pub entry_quantity: String,
    #[serde(default)]
    pub entry_fees: String,
    #[serde(default)]
    pub entry_stop_loss: String,
    #[serde(default)]
    pub entry_target: String,
    #[serde(default)]
    pub entry_risk: String,
    #[serde(default)]
    pub entry_notes: String,

    #[serde(default)]
    pub thesis: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub checklist: String,
    #[serde(default)]
    pub max_risk: String,
    #[serde(default)]
    pub position_sizing: String,
    #[serde(default)]
    pub contingency_plan: String,

    #[serde(default)]
    pub exit_date: String,
    #[serde(default)]
    pub exit_price: String,
    #[serde(default)]
    pub exit_quantity: String,
    #[serde(default)]
    pub exit_fees: String,
    #[serde(default)]
    pub exit_reason: String,
    #[serde(default)]
    pub exit_notes: String,

    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub psychology: String,
    #[serde(default)]
    pub improvements: String,
    #[serde(default)]
    pub tags: String,

    #[serde(default)]
    pub market_context: String,
    #[serde(default)]
    pub additional_notes: String,
    #[serde(default)]
    pub execution_score: String,
    #[serde(default)]
    pub confidence_before: String,
    #[serde(default)]
    pub confidence_after: String,
}

impl TradeForm {
    /// Builds the domain aggregate, returning every validation message when
    /// the input is unusable.
    pub fn into_trade(self) -> Result<Trade, Vec<String>> {
        let mut errs = Vec::new();

        let mut trade = Trade {
            instrument: self.instrument.trim().to_string(),
            market: self.market.trim().to_string(),
            setup: self.setup.trim().to_string(),
            direction: Direction::from_form(&self.direction),
            ..Default::default()
        };

        trade.entry = EntryDetail {
            date: parse_date(&self.entry_date, "entry date", &mut errs),
            price: parse_required(&self.entry_price, "entry price", &mut errs),
            quantity: parse_required(&self.entry_quantity, "quantity", &mut errs),
            fees: parse_with_default(&self.entry_fees, "entry fees", &mut errs),
            stop_loss: parse_optional(&self.entry_stop_loss, "stop loss", &mut errs),
            target: parse_optional(&self.entry_target, "target", &mut errs),
            risk_per_share: parse_optional(&self.entry_risk, "manual risk per share", &mut errs),
            notes: self.entry_notes.trim().to_string(),
        };

        trade.risk_management = RiskManagement {
            thesis: self.thesis.trim().to_string(),
            plan: self.plan.trim().to_string(),
            checklist: self.checklist.trim().to_string(),
            max_risk_amount: parse_with_default(&self.max_risk, "max risk", &mut errs),
            position_sizing: self.position_sizing.trim().to_string(),
            contingency_plan: self.contingency_plan.trim().to_string(),
        };

        trade.exit = self.build_exit(trade.entry.quantity, &mut errs);

        trade.review = TradeReview {
            outcome_summary: self.outcome.trim().to_string(),
            psychology: self.psychology.trim().to_string(),
            improvements: self.improvements.trim().to_string(),
            tags: split_tags(&self.tags),
        };

        trade.market_context = self.market_context.trim().to_string();
        trade.additional_notes = self.additional_notes.trim().to_string();
        trade.execution_score = parse_optional(&self.execution_score, "execution score", &mut errs);
        trade.confidence_before =
            parse_optional(&self.confidence_before, "confidence before", &mut errs);
        trade.confidence_after =
            parse_optional(&self.confidence_after, "confidence after", &mut errs);

        if errs.is_empty() {
            Ok(trade)
        } else {
            Err(errs)
        }
    }

    /// An exit record exists only when the trader filled in at least one
    /// exit field. An omitted exit quantity inherits the entry quantity.
    fn build_exit(&self, entry_quantity: f64, errs: &mut Vec<String>) -> Option<ExitDetail> {
        let provided = [
            &self.exit_date,
            &self.exit_price,
            &self.exit_quantity,
            &self.exit_fees,
            &self.exit_reason,
            &self.exit_notes,
        ]
        .iter()
        .any(|field| !field.trim().is_empty());
        if !provided {
            return None;
        }

        let mut exit = ExitDetail {
            reason: self.exit_reason.trim().to_string(),
            notes: self.exit_notes.trim().to_string(),
            ..Default::default()
        };
        if !self.exit_date.trim().is_empty() {
            exit.date = parse_date(&self.exit_date, "exit date", errs);
        }
        exit.price = parse_with_default(&self.exit_price, "exit price", errs);
        exit.quantity = parse_with_default(&self.exit_quantity, "exit quantity", errs);
        exit.fees = parse_with_default(&self.exit_fees, "exit fees", errs);
        if exit.quantity == 0.0 {
            exit.quantity = entry_quantity;
        }
        Some(exit)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FollowUpForm {
    #[serde(default)]
    pub days_after: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub notes: String,
}

impl FollowUpForm {
    pub fn into_follow_up(self) -> Result<FollowUp, Vec<String>> {
        let mut errs = Vec::new();

        let days_after = match self.days_after.trim().parse::<i32>() {
            Ok(days) => days,
            Err(_) => {
                errs.push("invalid days".to_string());
                0
            }
        };
        let price = parse_required(&self.price, "price", &mut errs);

        if !errs.is_empty() {
            return Err(errs);
        }
        Ok(FollowUp {
            days_after,
            price,
            notes: self.notes.trim().to_string(),
            ..Default::default()
        })
    }
}

fn parse_date(value: &str, label: &str, errs: &mut Vec<String>) -> DateTime<Utc> {
    let value = value.trim();
    if value.is_empty() {
        errs.push(format!("{label} is required"));
        return Utc::now();
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
        Err(_) => {
            errs.push(format!("invalid {label}"));
            Utc::now()
        }
    }
}

fn parse_required(value: &str, label: &str, errs: &mut Vec<String>) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(parsed) => parsed,
        Err(_) => {
            errs.push(format!("invalid {label}"));
            0.0
        }
    }
}

fn parse_with_default(value: &str, label: &str, errs: &mut Vec<String>) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        return 0.0;
    }
    match value.parse::<f64>() {
        Ok(parsed) => parsed,
        Err(_) => {
            errs.push(format!("invalid {label}"));
            0.0
        }
    }
}

fn parse_optional(value: &str, label: &str, errs: &mut Vec<String>) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errs.push(format!("invalid {label}"));
            None
        }
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|tag| tag.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_form() -> TradeForm {
        TradeForm {
            instrument: "AAPL".into(),
            direction: "LONG".into(),
            entry_date: "2023-01-02".into(),
            entry_price: "100".into(),
            entry_quantity: "10".into(),
            ..Default::default()
        }
    }

    #[test]
    fn parses_exit_when_fields_present() {
        let mut form = minimal_form();
        form.entry_fees = "2".into();
        form.exit_date = "2023-01-05".into();
        form.exit_price = "110".into();
        form.exit_quantity = "10".into();
        form.exit_fees = "1".into();

        let trade = form.into_trade().unwrap();
        let exit = trade.exit.expect("exit should be parsed");
        assert_eq!(exit.price, 110.0);
        assert_eq!(exit.fees, 1.0);
    }

    #[test]
    fn no_exit_without_exit_fields() {
        let trade = minimal_form().into_trade().unwrap();
        assert!(trade.exit.is_none());
    }

    #[test]
    fn exit_quantity_inherits_entry_quantity() {
        let mut form = minimal_form();
        form.exit_price = "110".into();

        let trade = form.into_trade().unwrap();
        assert_eq!(trade.exit.unwrap().quantity, 10.0);
    }

    #[test]
    fn missing_required_fields_collects_errors() {
        let form = TradeForm::default();
        let errs = form.into_trade().unwrap_err();
        assert!(errs.iter().any(|e| e.contains("entry date")));
        assert!(errs.iter().any(|e| e.contains("entry price")));
        assert!(errs.iter().any(|e| e.contains("quantity")));
    }

    #[test]
    fn unknown_direction_defaults_to_long() {
        let mut form = minimal_form();
        form.direction = "sideways".into();
        let trade = form.into_trade().unwrap();
        assert_eq!(trade.direction, Direction::Long);

        let mut form = minimal_form();
        form.direction = "short".into();
        let trade = form.into_trade().unwrap();
        assert_eq!(trade.direction, Direction::Short);
    }

    #[test]
    fn optional_numerics_stay_none_when_blank() {
        let mut form = minimal_form();
        form.entry_stop_loss = "  ".into();
        form.execution_score = "8.5".into();

        let trade = form.into_trade().unwrap();
        assert!(trade.entry.stop_loss.is_none());
        assert_eq!(trade.execution_score, Some(8.5));
    }

    #[test]
    fn tags_come_through_raw_for_the_service() {
        let mut form = minimal_form();
        form.tags = "Breakout,  Momentum , ".into();
        let trade = form.into_trade().unwrap();
        assert_eq!(trade.review.tags.len(), 3);
    }

    #[test]
    fn follow_up_form_validates_numbers() {
        let form = FollowUpForm {
            days_after: "7".into(),
            price: "120.5".into(),
            notes: " held up well ".into(),
        };
        let follow_up = form.into_follow_up().unwrap();
        assert_eq!(follow_up.days_after, 7);
        assert_eq!(follow_up.price, 120.5);
        assert_eq!(follow_up.notes, "held up well");

        let bad = FollowUpForm {
            days_after: "soon".into(),
            price: "".into(),
            notes: String::new(),
        };
        assert_eq!(bad.into_follow_up().unwrap_err().len(), 2);
    }
}
