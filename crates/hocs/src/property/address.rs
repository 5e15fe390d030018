use serde::Serialize;
use std::fmt;

/// A street address split into the parts the lookup pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<String>,
}

impl NormalizedAddress {
    /// Parses `"<street>, <city>, <ST> <zip>"`. Extra whitespace is collapsed,
    /// street and city are title-cased and the state code is upper-cased. The
    /// zip code is optional.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }

        let parts: Vec<String> = trimmed
            .split(',')
            .map(normalize_part)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.len() < 3 {
            return Err(AddressError::Malformed(trimmed.to_string()));
        }

        let region = &parts[parts.len() - 1];
        let city = parts[parts.len() - 2].clone();
        let street = parts[..parts.len() - 2].join(", ");

        let mut region_tokens = region.split(' ');
        let state = region_tokens
            .next()
            .filter(|token| token.len() >= 2 && token.chars().all(|c| c.is_ascii_alphabetic()))
            .map(|token| token.to_ascii_uppercase())
            .ok_or_else(|| AddressError::Malformed(trimmed.to_string()))?;

        let postal_code = match region_tokens.next() {
            Some(zip) if is_postal_code(zip) => Some(zip.to_string()),
            Some(_) => return Err(AddressError::Malformed(trimmed.to_string())),
            None => None,
        };

        if !street.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(AddressError::Malformed(trimmed.to_string()));
        }

        Ok(Self {
            street,
            city,
            state,
            postal_code,
        })
    }

    pub fn is_california(&self) -> bool {
        matches!(self.state.as_str(), "CA" | "CALIFORNIA")
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.street, self.city, self.state)?;
        if let Some(zip) = &self.postal_code {
            write!(f, " {zip}")?;
        }
        Ok(())
    }
}

/// Collapses whitespace and title-cases each word (`"MAIN  st"` becomes `"Main St"`).
fn normalize_part(value: &str) -> String {
    value
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn is_postal_code(value: &str) -> bool {
    let digits = value.split('-').next().unwrap_or_default();
    digits.len() == 5 && digits.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("address is required")]
    Empty,
    #[error("address '{0}' must look like '<street>, <city>, <state> <zip>'")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_address() {
        let address =
            NormalizedAddress::parse("  123  Main St , Pasadena, ca 91101 ").expect("parses");
        assert_eq!(address.street, "123 Main St");
        assert_eq!(address.city, "Pasadena");
        assert_eq!(address.state, "CA");
        assert_eq!(address.postal_code.as_deref(), Some("91101"));
        assert_eq!(address.to_string(), "123 Main St, Pasadena, CA 91101");
        assert!(address.is_california());
    }

    #[test]
    fn normalizes_case_of_street_and_city() {
        let shouting = NormalizedAddress::parse("123 MAIN ST, PASADENA, CA 91101").expect("parses");
        let quiet = NormalizedAddress::parse("123 main st, pasadena, ca 91101").expect("parses");
        assert_eq!(shouting, quiet);
        assert_eq!(quiet.to_string(), "123 Main St, Pasadena, CA 91101");

        let ordinal = NormalizedAddress::parse("500 west 1ST st, los angeles, CA").expect("parses");
        assert_eq!(ordinal.street, "500 West 1st St");
        assert_eq!(ordinal.city, "Los Angeles");
    }

    #[test]
    fn keeps_unit_designators_in_street() {
        let address =
            NormalizedAddress::parse("456 Oak Ave, Apt 2, Los Angeles, CA").expect("parses");
        assert_eq!(address.street, "456 Oak Ave, Apt 2");
        assert_eq!(address.city, "Los Angeles");
        assert!(address.postal_code.is_none());
    }

    #[test]
    fn rejects_empty_and_malformed_input() {
        assert_eq!(NormalizedAddress::parse("   "), Err(AddressError::Empty));
        assert!(matches!(
            NormalizedAddress::parse("123 Main St"),
            Err(AddressError::Malformed(_))
        ));
        assert!(matches!(
            NormalizedAddress::parse("123 Main St, Pasadena, CA ninety"),
            Err(AddressError::Malformed(_))
        ));
    }
}
