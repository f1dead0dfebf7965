//! Market inference from a ticker string.
//!
//! Detection is an ordered rule table evaluated top to bottom; the first
//! matching rule wins. Prefix and letter rules look at the trimmed,
//! uppercased ticker, digit rules look at the digits extracted from it.
//! A ticker no rule matches is unresolved.

use std::sync::LazyLock;

use regex::Regex;

use crate::Market;

/// Which view of the ticker a rule is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSubject {
    /// Trimmed and uppercased ticker.
    Ticker,
    /// Only the ASCII digits of the trimmed, uppercased ticker.
    Digits,
}

/// One row of the detection table.
#[derive(Debug)]
pub struct MarketRule {
    pub name: &'static str,
    pub subject: RuleSubject,
    pub pattern: Regex,
    pub market: Market,
}

const RULE_TABLE: [(&str, RuleSubject, &str, Market); 8] = [
    ("sh_prefix", RuleSubject::Ticker, r"^SH", Market::Sh),
    ("sz_prefix", RuleSubject::Ticker, r"^SZ", Market::Sz),
    ("hk_prefix", RuleSubject::Ticker, r"^HK", Market::Hk),
    ("us_letters", RuleSubject::Ticker, r"^[A-Z]{1,5}$", Market::Us),
    ("sh_six_digits", RuleSubject::Digits, r"^6[0-9]{5}$", Market::Sh),
    ("sz_six_digits", RuleSubject::Digits, r"^[03][0-9]{5}$", Market::Sz),
    // Other leading digits fall back to Shanghai.
    ("six_digit_fallback", RuleSubject::Digits, r"^[0-9]{6}$", Market::Sh),
    ("hk_short_digits", RuleSubject::Digits, r"^[0-9]{1,5}$", Market::Hk),
];

static RULES: LazyLock<Vec<MarketRule>> = LazyLock::new(|| {
    RULE_TABLE
        .iter()
        .filter_map(|&(name, subject, pattern, market)| {
            Regex::new(pattern).ok().map(|pattern| MarketRule {
                name,
                subject,
                pattern,
                market,
            })
        })
        .collect()
});

/// The detection table in evaluation order.
pub fn rules() -> &'static [MarketRule] {
    RULES.as_slice()
}

/// Resolve the market for `ticker`. An explicit hint is returned verbatim.
pub fn resolve(ticker: &str, market_hint: Option<Market>) -> Option<Market> {
    if let Some(market) = market_hint {
        return Some(market);
    }

    let normalized = ticker.trim().to_ascii_uppercase();
    let digits: String = normalized.chars().filter(char::is_ascii_digit).collect();

    rules()
        .iter()
        .find(|rule| {
            let subject = match rule.subject {
                RuleSubject::Ticker => normalized.as_str(),
                RuleSubject::Digits => digits.as_str(),
            };
            rule.pattern.is_match(subject)
        })
        .map(|rule| {
            tracing::debug!(ticker, rule = rule.name, market = %rule.market, "market resolved");
            rule.market
        })
}
