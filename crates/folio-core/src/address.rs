//! Spreadsheet cell addressing
//!
//! Column names use bijective base-26: there is no zero digit, so `1 -> A`,
//! `26 -> Z`, `27 -> AA`. The free functions take 1-based column and row
//! numbers as they appear in a spreadsheet.

use crate::error::{Error, Result};

const LETTERS: u32 = (b'Z' - b'A' + 1) as u32;

/// Convert a 1-based column number to its letters (1 = A, 26 = Z, 27 = AA)
///
/// # Examples
/// ```
/// use folio_core::address::column_name;
///
/// assert_eq!(column_name(1).unwrap(), "A");
/// assert_eq!(column_name(28).unwrap(), "AB");
/// assert!(column_name(0).is_err());
/// ```
pub fn column_name(index: u32) -> Result<String> {
    if index == 0 {
        return Err(Error::InvalidColumn(
            "column numbers start at 1".to_string(),
        ));
    }

    // Least significant digit first, reversed at the end
    let mut digits = Vec::with_capacity(4);
    let mut n = index;
    while n > 0 {
        n -= 1;
        digits.push(b'A' + (n % LETTERS) as u8);
        n /= LETTERS;
    }
    digits.reverse();

    Ok(digits.into_iter().map(char::from).collect())
}

/// Convert column letters back to a 1-based column number (A = 1, AA = 27)
///
/// Letters are case-insensitive.
pub fn column_index(name: &str) -> Result<u32> {
    if name.is_empty() {
        return Err(Error::InvalidColumn("empty column letters".into()));
    }

    let mut col: u32 = 0;
    for c in name.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidColumn(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        col = col
            .checked_mul(LETTERS)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| Error::InvalidColumn(format!("column '{}' is too large", name)))?;
    }

    Ok(col)
}

/// Build an A1-style reference from a 1-based column and a 1-based row
///
/// ```
/// use folio_core::address::cell_reference;
///
/// assert_eq!(cell_reference(3, 100).unwrap(), "C100");
/// ```
pub fn cell_reference(col: u32, row: u32) -> Result<String> {
    let mut reference = column_name(col)?;
    reference.push_str(&row.to_string());
    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(1).unwrap(), "A");
        assert_eq!(column_name(2).unwrap(), "B");
        assert_eq!(column_name(26).unwrap(), "Z");
        assert_eq!(column_name(27).unwrap(), "AA");
        assert_eq!(column_name(52).unwrap(), "AZ");
        assert_eq!(column_name(53).unwrap(), "BA");
        assert_eq!(column_name(702).unwrap(), "ZZ");
        assert_eq!(column_name(703).unwrap(), "AAA");
        assert_eq!(column_name(16384).unwrap(), "XFD");
    }

    #[test]
    fn test_column_name_zero() {
        assert!(matches!(column_name(0), Err(Error::InvalidColumn(_))));
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A").unwrap(), 1);
        assert_eq!(column_index("Z").unwrap(), 26);
        assert_eq!(column_index("AA").unwrap(), 27);
        assert_eq!(column_index("ZZ").unwrap(), 702);
        assert_eq!(column_index("xfd").unwrap(), 16384);

        assert!(column_index("").is_err());
        assert!(column_index("A1").is_err());
        assert!(column_index("ZZZZZZZZZZZZ").is_err());
    }

    #[test]
    fn test_cell_reference() {
        assert_eq!(cell_reference(1, 1).unwrap(), "A1");
        assert_eq!(cell_reference(27, 5).unwrap(), "AA5");
        assert!(cell_reference(0, 1).is_err());
    }

    proptest! {
        #[test]
        fn column_name_round_trips(index in 1u32..=1_000_000) {
            let name = column_name(index).unwrap();
            prop_assert!(name.chars().all(|c| c.is_ascii_uppercase()));
            prop_assert_eq!(column_index(&name).unwrap(), index);
        }

        #[test]
        fn column_index_round_trips(name in "[A-Z]{1,5}") {
            let index = column_index(&name).unwrap();
            prop_assert_eq!(column_name(index).unwrap(), name);
        }
    }
}
