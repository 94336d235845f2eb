//! Text rendering of the widget states
//!
//! The widget shows one of three states: loading, a static error line, or
//! the ticker figures with their derived financial lines.

use crate::{
    constants::{BONUS_BASE, HOLDING_UNITS},
    format::format_decimals_with_commas,
    types::TickerSnapshot,
};
use chrono::{DateTime, Local, Utc};

/// Static line shown for any fetch failure, regardless of kind
pub const ERROR_MESSAGE: &str = "Failed to load live data";

/// What the widget currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView {
    /// No poll outcome yet
    Loading,
    /// Last poll tick failed; the message is kept for diagnostics but the
    /// rendered line is always the static [`ERROR_MESSAGE`]
    Error(String),
    /// Ticker data is available
    Ready(DisplayFields),
}

/// Computed display fields for the data state
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFields {
    /// Quote currency code, upper-cased for display
    pub quote_symbol: String,
    /// Target currency code, upper-cased for display
    pub target_symbol: String,
    /// Last traded price, verbatim from the feed
    pub price: String,
    /// Last price times the held units, 2 decimal digits
    pub holding_value: String,
    /// Quote/target volume ratio times the bonus base, whole units
    pub bonus: String,
    /// 24h traded value in the quote currency
    pub traded_value: String,
    /// 24h traded volume in the target currency
    pub traded_volume: String,
    /// Local wall-clock time of the last successful update
    pub last_updated: String,
    /// True while the price-change highlight is on
    pub highlight: bool,
}

impl DisplayFields {
    /// Computes the display fields from a snapshot
    pub fn from_snapshot(
        snapshot: &TickerSnapshot,
        last_updated: Option<DateTime<Utc>>,
        highlight: bool,
    ) -> Self {
        let last = snapshot.last_price();
        let quote_volume = snapshot.quote_volume_value();
        let target_volume = snapshot.target_volume_value();

        let holding = last.map(|p| p * HOLDING_UNITS);
        let bonus = match (quote_volume, target_volume) {
            (Some(q), Some(t)) if t != 0.0 => Some(q / t * BONUS_BASE),
            _ => None,
        };

        Self {
            quote_symbol: snapshot.quote_currency.to_uppercase(),
            target_symbol: snapshot.target_currency.to_uppercase(),
            price: snapshot.last.clone(),
            holding_value: format_decimals_with_commas(holding, 2),
            bonus: format_decimals_with_commas(bonus, 0),
            traded_value: format_decimals_with_commas(quote_volume, 2),
            traded_volume: format_decimals_with_commas(target_volume, 2),
            last_updated: last_updated
                .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
                .unwrap_or_default(),
            highlight,
        }
    }
}

impl std::fmt::Display for WidgetView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetView::Loading => write!(f, "Loading ticker data..."),
            WidgetView::Error(_) => write!(f, "{}", ERROR_MESSAGE),
            WidgetView::Ready(fields) => {
                let marker = if fields.highlight { " *" } else { "" };
                writeln!(
                    f,
                    "{} price: {}{}",
                    fields.target_symbol, fields.price, marker
                )?;
                writeln!(
                    f,
                    "Option holdings: {} {}",
                    fields.holding_value, fields.quote_symbol
                )?;
                writeln!(f, "Today's bonus: {} {}", fields.bonus, fields.quote_symbol)?;
                writeln!(
                    f,
                    "Traded value: {} {}",
                    fields.traded_value, fields.quote_symbol
                )?;
                writeln!(
                    f,
                    "Traded volume: {} {}",
                    fields.traded_volume, fields.target_symbol
                )?;
                write!(f, "Last updated: {}", fields.last_updated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::synthetic_response;

    #[test]
    fn bonus_is_volume_ratio_times_base() {
        let snapshot = synthetic_response().tickers.remove(0);
        let fields = DisplayFields::from_snapshot(&snapshot, None, false);

        let expected = format_decimals_with_commas(
            Some(224909714.1755 / 4034269.03089779 * 150000.0),
            0,
        );
        assert_eq!(fields.bonus, expected);
    }

    #[test]
    fn holding_value_scales_last_price() {
        let snapshot = synthetic_response().tickers.remove(0);
        let fields = DisplayFields::from_snapshot(&snapshot, None, false);

        // 54.4 * 3,000,000
        assert_eq!(fields.holding_value, "163,200,000");
        assert_eq!(fields.price, "54.4");
        assert_eq!(fields.quote_symbol, "KRW");
        assert_eq!(fields.target_symbol, "GM");
    }

    #[test]
    fn malformed_fields_fall_back_to_zero_defaults() {
        let mut snapshot = synthetic_response().tickers.remove(0);
        snapshot.last = "garbage".to_string();
        snapshot.target_volume = "0".to_string();
        let fields = DisplayFields::from_snapshot(&snapshot, None, false);

        assert_eq!(fields.holding_value, "0");
        assert_eq!(fields.bonus, "0");
    }

    #[test]
    fn error_view_renders_static_message() {
        let view = WidgetView::Error("mirror 3 timed out".to_string());
        assert_eq!(view.to_string(), ERROR_MESSAGE);
    }

    #[test]
    fn ready_view_marks_highlight() {
        let snapshot = synthetic_response().tickers.remove(0);
        let fields = DisplayFields::from_snapshot(&snapshot, None, true);
        let rendered = WidgetView::Ready(fields).to_string();
        assert!(rendered.starts_with("GM price: 54.4 *"));
        assert!(rendered.contains("Today's bonus:"));
    }
}
