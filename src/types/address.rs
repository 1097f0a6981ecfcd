//! Account address type
//!
//! Addresses are opaque, address-like keys. The engine never interprets them
//! beyond equality and ordering, so any non-empty string without surrounding
//! whitespace is accepted (`owner`, `alice`, `0x5FbDB2315678afecb367f032d93F642f64180aa3`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique account identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Create an address from a known-good value such as a literal
    ///
    /// Trims exactly like [`FromStr`] but cannot fail, so blank input yields
    /// an empty address. Untrusted input (journal columns, CLI flags) must go
    /// through [`FromStr`], which rejects it.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().len() == value.len() {
            Address(value)
        } else {
            Address(value.trim().to_string())
        }
    }

    /// Borrow the address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("address must not be empty".to_string());
        }
        Ok(Address::new(s))
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Address::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("alice", "alice")]
    #[case::padded("  bob ", "bob")]
    #[case::hex("0xAbC123", "0xAbC123")]
    fn test_parse_address(#[case] input: &str, #[case] expected: &str) {
        let address: Address = input.parse().unwrap();
        assert_eq!(address.as_str(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    fn test_parse_address_rejects_empty(#[case] input: &str) {
        assert!(input.parse::<Address>().is_err());
    }

    #[rstest]
    #[case::plain("alice")]
    #[case::padded("  bob ")]
    #[case::tabbed("\tcarol\n")]
    fn test_new_and_parse_agree_on_valid_input(#[case] input: &str) {
        assert_eq!(input.parse::<Address>(), Ok(Address::from(input)));
    }

    #[test]
    fn test_new_accepts_blank_that_parse_rejects() {
        assert_eq!(Address::new("  ").as_str(), "");
        assert!("  ".parse::<Address>().is_err());
    }

    #[test]
    fn test_addresses_order_lexicographically() {
        let mut addresses = vec![Address::from("carol"), Address::from("alice"), Address::from("bob")];
        addresses.sort();
        let names: Vec<_> = addresses.iter().map(Address::as_str).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }
}
