//! Parser for the provider's tilde-delimited quote line.
//!
//! A response looks like `v_sh600519="1~贵州茅台~600519~1688.00~...";`.
//! Every market uses the same field layout, described by [`QUOTE_FIELDS`].

use crate::symbol::pad_hk_code;
use crate::{clean_code, Market, QueryError, QuoteRecord, QuoteStatus};

/// Field separator used by the provider.
pub const FIELD_DELIMITER: char = '~';

/// Lines with fewer fields than this are rejected as incomplete.
pub const MIN_FIELD_COUNT: usize = 35;

/// Shares per lot on mainland exchanges.
const A_SHARE_LOT_SIZE: u64 = 100;

/// Mainland turnover is reported in units of ten thousand.
const A_SHARE_AMOUNT_SCALE: f64 = 10_000.0;

/// Zero-based positions of each quote field in the provider line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOffsets {
    pub name: usize,
    pub current_price: usize,
    pub prev_close: usize,
    pub open: usize,
    pub volume: usize,
    pub time: usize,
    pub change: usize,
    pub change_percent: usize,
    pub high: usize,
    pub low: usize,
    pub amount: usize,
}

pub const QUOTE_FIELDS: FieldOffsets = FieldOffsets {
    name: 1,
    current_price: 3,
    prev_close: 4,
    open: 5,
    volume: 6,
    time: 30,
    change: 31,
    change_percent: 32,
    high: 33,
    low: 34,
    amount: 37,
};

/// Parse a decoded provider line into a [`QuoteRecord`].
///
/// `ticker` is the user's ticker (prefix allowed); it is cleaned for the
/// display code and for not-found messages.
pub fn parse_quote(raw: &str, ticker: &str, market: Market) -> Result<QuoteRecord, QueryError> {
    parse_with_offsets(raw, ticker, market, &QUOTE_FIELDS)
}

pub fn parse_with_offsets(
    raw: &str,
    ticker: &str,
    market: Market,
    offsets: &FieldOffsets,
) -> Result<QuoteRecord, QueryError> {
    let fields = raw.split(FIELD_DELIMITER).collect::<Vec<_>>();
    if fields.len() < MIN_FIELD_COUNT {
        return Err(QueryError::parse(format!(
            "incomplete data: expected at least {MIN_FIELD_COUNT} fields, got {}",
            fields.len()
        )));
    }

    let code = clean_code(ticker);
    let name = text_field(&fields, offsets.name);
    if name.is_empty() {
        return Err(QueryError::not_found(code));
    }

    let current_price = numeric_field(&fields, offsets.current_price, "current_price")?;
    let prev_close = numeric_field(&fields, offsets.prev_close, "prev_close")?;
    let open = numeric_field(&fields, offsets.open, "open")?;
    let mut volume = volume_field(&fields, offsets.volume)?;
    let time = text_field(&fields, offsets.time);
    let change = numeric_field(&fields, offsets.change, "change")?;
    let change_percent = numeric_field(&fields, offsets.change_percent, "change_percent")?;
    let high = numeric_field(&fields, offsets.high, "high")?;
    let low = numeric_field(&fields, offsets.low, "low")?;
    let mut amount = numeric_field(&fields, offsets.amount, "amount")?;

    if market.is_a_share() {
        volume = volume.saturating_mul(A_SHARE_LOT_SIZE);
        amount *= A_SHARE_AMOUNT_SCALE;
    }

    Ok(QuoteRecord {
        code: display_code(code, market),
        name,
        market,
        current_price,
        change,
        change_percent,
        open,
        high,
        low,
        prev_close,
        volume,
        amount,
        time,
        status: QuoteStatus::Success,
    })
}

fn display_code(code: String, market: Market) -> String {
    match market {
        Market::Hk => pad_hk_code(&code),
        Market::Us => code.to_ascii_uppercase(),
        Market::Sh | Market::Sz => code,
    }
}

fn text_field(fields: &[&str], offset: usize) -> String {
    fields
        .get(offset)
        .map(|value| value.trim().to_owned())
        .unwrap_or_default()
}

/// Missing and empty fields read as zero; anything else must be a number.
fn numeric_field(fields: &[&str], offset: usize, field: &str) -> Result<f64, QueryError> {
    match fields.get(offset).map(|value| value.trim()) {
        None | Some("") => Ok(0.0),
        Some(value) => value.parse::<f64>().map_err(|_| {
            QueryError::parse(format!(
                "field '{field}' at offset {offset} is not a number: '{value}'"
            ))
        }),
    }
}

/// Share count: finite and non-negative, fractions truncated toward zero.
fn volume_field(fields: &[&str], offset: usize) -> Result<u64, QueryError> {
    let value = numeric_field(fields, offset, "volume")?;
    if !value.is_finite() || value < 0.0 {
        return Err(QueryError::parse(format!(
            "field 'volume' at offset {offset} must be a finite, non-negative number: '{value}'"
        )));
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryErrorKind;

    fn line(count: usize, overrides: &[(usize, &str)]) -> String {
        let mut fields = vec![""; count];
        for &(offset, value) in overrides {
            fields[offset] = value;
        }
        fields.join("~")
    }

    #[test]
    fn exactly_minimum_fields_is_accepted_and_amount_defaults_to_zero() {
        let raw = line(35, &[(1, "腾讯控股"), (3, "320.4"), (6, "1000")]);
        let record = parse_quote(&raw, "700", Market::Hk).expect("should parse");

        assert_eq!(record.code, "00700");
        assert_eq!(record.name, "腾讯控股");
        assert_eq!(record.volume, 1000);
        assert_eq!(record.amount, 0.0);
        assert_eq!(record.time, "");
    }

    #[test]
    fn one_field_short_is_incomplete() {
        let raw = line(34, &[(1, "Name")]);
        let err = parse_quote(&raw, "600519", Market::Sh).expect_err("must fail");
        assert_eq!(err.kind(), QueryErrorKind::ParseFailure);
        assert!(err.to_string().contains("incomplete data"));
    }

    #[test]
    fn whitespace_name_is_not_found() {
        let raw = line(38, &[(1, "   "), (3, "10.0")]);
        let err = parse_quote(&raw, "sz000001", Market::Sz).expect_err("must fail");
        assert_eq!(err, QueryError::not_found("000001"));
    }

    #[test]
    fn fractional_volume_is_truncated_before_lot_scaling() {
        let raw = line(38, &[(1, "Name"), (6, "12.9"), (37, "1.5")]);
        let record = parse_quote(&raw, "600000", Market::Sh).expect("should parse");
        assert_eq!(record.volume, 1200);
        assert_eq!(record.amount, 15_000.0);
    }

    #[test]
    fn negative_or_non_finite_volume_is_rejected() {
        for volume in ["-5", "NaN", "inf", "-inf"] {
            let raw = line(38, &[(1, "Name"), (6, volume)]);
            let err = parse_quote(&raw, "600519", Market::Sh).expect_err("must fail");
            assert_eq!(err.kind(), QueryErrorKind::ParseFailure, "volume {volume}");
            assert!(err.to_string().contains("'volume'"), "{err}");
        }
    }

    #[test]
    fn non_numeric_value_names_the_field() {
        let raw = line(38, &[(1, "Name"), (3, "n/a")]);
        let err = parse_quote(&raw, "AAPL", Market::Us).expect_err("must fail");
        assert_eq!(err.kind(), QueryErrorKind::ParseFailure);
        assert!(err.to_string().contains("current_price"));
    }

    #[test]
    fn us_display_code_is_uppercased() {
        let raw = line(38, &[(1, "Apple Inc.")]);
        let record = parse_quote(&raw, "aapl", Market::Us).expect("should parse");
        assert_eq!(record.code, "AAPL");
    }

    #[test]
    fn custom_offsets_move_fields() {
        let offsets = FieldOffsets {
            amount: 36,
            ..QUOTE_FIELDS
        };
        let raw = line(38, &[(1, "Name"), (36, "7"), (37, "9")]);
        let record = parse_with_offsets(&raw, "AAPL", Market::Us, &offsets).expect("parse");
        assert_eq!(record.amount, 7.0);
    }
}
