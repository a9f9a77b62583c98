//! The bigint collaborator (§6): decimal parse/print over an unbounded
//! integer, backed by `num-bigint` — the same crate a sibling compiler
//! project in this corpus reaches for when it needs arbitrary-precision
//! integer literals.

pub use num_bigint::BigInt;

/// Parse `[-]digit+` into a `BigInt`. The caller (the `int` value-parser)
/// has already checked every byte is `-` or an ASCII digit; this function
/// only rejects the degenerate "no digits at all" case.
pub fn parse_decimal(digits: &str) -> Result<BigInt, ()> {
    digits.parse::<BigInt>().map_err(|_| ())
}

/// Render a `BigInt` in the decimal form `parse_decimal` accepts back.
pub fn render(value: &BigInt, out: &mut String) {
    use std::fmt::Write;
    let _ = write!(out, "{value}");
}
