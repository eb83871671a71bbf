use log::debug;
use num_bigint::BigInt;

/// Decimal text of `seed` written `repeats` times, e.g. `(7, 3)` gives `"777"`
pub fn repdigit_text(seed: u8, repeats: usize) -> String {
    char::from_digit(u32::from(seed), 10)
        .map(|digit| std::iter::repeat_n(digit, repeats).collect())
        .unwrap_or_default()
}

/// Integer value of `seed` written `repeats` times
pub fn repdigit(seed: u8, repeats: usize) -> BigInt {
    let value = (0..repeats).fold(BigInt::from(0u32), |acc, _| acc * 10u32 + u32::from(seed));
    debug!("Built repdigit {} from seed {} x{}", value, seed, repeats);
    value
}
