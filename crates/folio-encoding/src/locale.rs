//! Locale snapshots for format synthesis
//!
//! Format synthesis never reads ambient process locale. Callers pass a
//! [`LocaleInfo`] explicitly, so the same inputs always give the same pattern.

use folio_core::{CurrencyNegativePattern, CurrencyPositivePattern, NumberNegativePattern};

/// Number, currency and date conventions of one locale
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocaleInfo {
    /// Two-letter ISO 639-1 language code
    pub language: String,
    pub currency_symbol: String,
    pub decimal_separator: String,
    /// Digit group separator, `\u{a0}` where the locale groups with a space
    pub group_separator: String,
    pub currency_decimal_digits: u8,
    pub currency_positive_pattern: CurrencyPositivePattern,
    pub currency_negative_pattern: CurrencyNegativePattern,
    pub number_decimal_digits: u8,
    pub number_negative_pattern: NumberNegativePattern,
    pub percent_decimal_digits: u8,
    pub short_date_pattern: String,
    pub long_date_pattern: String,
    pub short_time_pattern: String,
    pub full_date_time_pattern: String,
    pub year_month_pattern: String,
}

impl Default for LocaleInfo {
    fn default() -> Self {
        Self::invariant()
    }
}

impl LocaleInfo {
    /// Culture-neutral conventions
    pub fn invariant() -> Self {
        Self {
            language: "iv".into(),
            currency_symbol: "¤".into(),
            decimal_separator: ".".into(),
            group_separator: ",".into(),
            currency_decimal_digits: 2,
            currency_positive_pattern: CurrencyPositivePattern::SymbolValue,
            currency_negative_pattern: CurrencyNegativePattern::ParenSymbolValue,
            number_decimal_digits: 2,
            number_negative_pattern: NumberNegativePattern::LeadingSign,
            percent_decimal_digits: 2,
            short_date_pattern: "MM/dd/yyyy".into(),
            long_date_pattern: "dddd, dd MMMM yyyy".into(),
            short_time_pattern: "HH:mm".into(),
            full_date_time_pattern: "dddd, dd MMMM yyyy HH:mm:ss".into(),
            year_month_pattern: "yyyy MMMM".into(),
        }
    }

    /// English (United States)
    pub fn en_us() -> Self {
        Self {
            language: "en".into(),
            currency_symbol: "$".into(),
            decimal_separator: ".".into(),
            group_separator: ",".into(),
            currency_decimal_digits: 2,
            currency_positive_pattern: CurrencyPositivePattern::SymbolValue,
            currency_negative_pattern: CurrencyNegativePattern::ParenSymbolValue,
            number_decimal_digits: 2,
            number_negative_pattern: NumberNegativePattern::LeadingSign,
            percent_decimal_digits: 2,
            short_date_pattern: "M/d/yyyy".into(),
            long_date_pattern: "dddd, MMMM d, yyyy".into(),
            short_time_pattern: "h:mm tt".into(),
            full_date_time_pattern: "dddd, MMMM d, yyyy h:mm:ss tt".into(),
            year_month_pattern: "MMMM yyyy".into(),
        }
    }

    /// Russian (Russia)
    pub fn ru_ru() -> Self {
        Self {
            language: "ru".into(),
            currency_symbol: "₽".into(),
            decimal_separator: ",".into(),
            group_separator: "\u{a0}".into(),
            currency_decimal_digits: 2,
            currency_positive_pattern: CurrencyPositivePattern::ValueSpaceSymbol,
            currency_negative_pattern: CurrencyNegativePattern::SignValueSpaceSymbol,
            number_decimal_digits: 2,
            number_negative_pattern: NumberNegativePattern::LeadingSign,
            percent_decimal_digits: 2,
            short_date_pattern: "dd.MM.yyyy".into(),
            long_date_pattern: "d MMMM yyyy 'г.'".into(),
            short_time_pattern: "H:mm".into(),
            full_date_time_pattern: "d MMMM yyyy 'г.' H:mm:ss".into(),
            year_month_pattern: "MMMM yyyy".into(),
        }
    }

    /// German (Germany)
    pub fn de_de() -> Self {
        Self {
            language: "de".into(),
            currency_symbol: "€".into(),
            decimal_separator: ",".into(),
            group_separator: ".".into(),
            currency_decimal_digits: 2,
            currency_positive_pattern: CurrencyPositivePattern::ValueSpaceSymbol,
            currency_negative_pattern: CurrencyNegativePattern::SignValueSpaceSymbol,
            number_decimal_digits: 3,
            number_negative_pattern: NumberNegativePattern::LeadingSign,
            percent_decimal_digits: 2,
            short_date_pattern: "dd.MM.yyyy".into(),
            long_date_pattern: "dddd, d. MMMM yyyy".into(),
            short_time_pattern: "HH:mm".into(),
            full_date_time_pattern: "dddd, d. MMMM yyyy HH:mm:ss".into(),
            year_month_pattern: "MMMM yyyy".into(),
        }
    }

    /// Look up a preset by tag (`en-US`, `ru_RU`, `de`, `invariant`, ...)
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.to_ascii_lowercase().replace('_', "-");
        match tag.as_str() {
            "" | "iv" | "invariant" => Some(Self::invariant()),
            "en" | "en-us" => Some(Self::en_us()),
            "ru" | "ru-ru" => Some(Self::ru_ru()),
            "de" | "de-de" => Some(Self::de_de()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(LocaleInfo::from_tag("en-US"), Some(LocaleInfo::en_us()));
        assert_eq!(LocaleInfo::from_tag("ru_RU"), Some(LocaleInfo::ru_ru()));
        assert_eq!(LocaleInfo::from_tag("invariant"), Some(LocaleInfo::invariant()));
        assert_eq!(LocaleInfo::from_tag("xx-YY"), None);
    }

    #[test]
    fn test_default_is_invariant() {
        assert_eq!(LocaleInfo::default().language, "iv");
    }
}
