//! Coin amount display.

/// Smallest units in one whole coin.
pub const ONE_COIN: u64 = 1_000_000_000_000;

/// Name of the whole coin.
pub const COIN_UNIT: &str = "SMH";

/// Name of the smallest unit.
pub const SMALLEST_UNIT: &str = "Smidge";

/// Formats an amount of smallest units for display.
///
/// Amounts of at least 1% of a coin are shown in coins with twelve decimals;
/// anything smaller is shown in smallest units.
pub fn coin_amount(value: u64) -> String {
    if value >= ONE_COIN {
        format!("{}.{:012} {}", value / ONE_COIN, value % ONE_COIN, COIN_UNIT)
    } else if value >= ONE_COIN / 100 {
        format!("0.{:012} {}", value % ONE_COIN, COIN_UNIT)
    } else {
        format!("{} {}", value, SMALLEST_UNIT)
    }
}
