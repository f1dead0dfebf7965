//! Provider symbol construction.

use crate::{clean_code, Market};

const HK_CODE_WIDTH: usize = 5;

/// Left-pad a Hong Kong code with zeros to five characters.
pub fn pad_hk_code(code: &str) -> String {
    format!("{code:0>width$}", width = HK_CODE_WIDTH)
}

/// Build the query symbol the quote endpoint expects, e.g. `sh600519`,
/// `hk00700` or `usAAPL`.
pub fn build_provider_symbol(ticker: &str, market: Market) -> String {
    let code = clean_code(ticker);
    match market {
        Market::Sh | Market::Sz => format!("{}{code}", market.as_str()),
        Market::Hk => format!("hk{}", pad_hk_code(&code)),
        Market::Us => format!("us{}", code.to_ascii_uppercase()),
    }
}
