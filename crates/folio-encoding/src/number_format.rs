//! Spreadsheet number-format synthesis
//!
//! Turns an abstract [`ValueFormat`] into a spreadsheet format pattern such as
//! `&quot;$&quot;#,##0.00;(&quot;$&quot;#,##0.00)`. Quotes come out already
//! escaped for embedding in an XML attribute.

use folio_core::{
    CurrencyNegativePattern, CurrencyPositivePattern, NumberNegativePattern, ValueFormat,
};

use crate::locale::LocaleInfo;

/// Prefix selecting the system long-date format
const SYSTEM_LONG_DATE: &str = "[$-F800]dddd, mmmm dd, yyyy";

/// Prefix selecting genitive month names for Russian dates
const RUSSIAN_DATE_PREFIX: &str = "[$-419]";

/// Trailer of every accounting pattern: zero and text sections
const ACCOUNTING_ZERO_PREFIX: &str = "_-* &quot;-&quot;??\\ ";

/// Builds spreadsheet format patterns for report value formats
#[derive(Debug, Clone, Default)]
pub struct NumberFormatSynthesizer {
    locale: LocaleInfo,
    use_locale: bool,
    accounting: bool,
}

impl NumberFormatSynthesizer {
    pub fn new(locale: LocaleInfo) -> Self {
        Self {
            locale,
            use_locale: false,
            accounting: false,
        }
    }

    /// Take digit counts and arrangements from the locale instead of the format
    pub fn use_locale(mut self, use_locale: bool) -> Self {
        self.use_locale = use_locale;
        self
    }

    /// Emit currency formats as accounting formats (aligned symbol, dash for zero)
    pub fn accounting(mut self, accounting: bool) -> Self {
        self.accounting = accounting;
        self
    }

    pub fn locale(&self) -> &LocaleInfo {
        &self.locale
    }

    /// Synthesize the pattern for a value format
    pub fn synthesize(&self, format: &ValueFormat) -> String {
        match format {
            ValueFormat::Currency {
                decimal_digits,
                positive_pattern,
                negative_pattern,
                symbol,
            } => {
                if self.use_locale {
                    self.currency(
                        self.locale.currency_decimal_digits,
                        self.locale.currency_positive_pattern,
                        self.locale.currency_negative_pattern,
                        &self.locale.currency_symbol,
                    )
                } else {
                    self.currency(*decimal_digits, *positive_pattern, *negative_pattern, symbol)
                }
            }
            ValueFormat::Number {
                decimal_digits,
                negative_pattern,
            } => {
                if self.use_locale {
                    number(
                        self.locale.number_decimal_digits,
                        self.locale.number_negative_pattern,
                    )
                } else {
                    number(*decimal_digits, *negative_pattern)
                }
            }
            ValueFormat::Date { pattern } => self.date(pattern),
            ValueFormat::Percent { decimal_digits } => {
                let digits = if self.use_locale {
                    self.locale.percent_decimal_digits
                } else {
                    *decimal_digits
                };
                let mut pattern = with_decimals("0", digits);
                pattern.push('%');
                pattern
            }
        }
    }

    fn currency(
        &self,
        digits: u8,
        positive: CurrencyPositivePattern,
        negative: CurrencyNegativePattern,
        symbol: &str,
    ) -> String {
        let value = grouped(digits);

        if self.accounting {
            let finance = finance_symbol(symbol);
            let mut out = String::new();
            for section in [
                positive_arrangement(positive, finance, &value),
                negative_arrangement(negative, finance, &value),
            ] {
                out.push_str("_-* ");
                out.push_str(&section);
                out.push_str("_-;");
            }
            out.push_str(ACCOUNTING_ZERO_PREFIX);
            out.push_str(finance);
            out.push_str("_-;_-@_-");
            return out;
        }

        let quoted = format!("&quot;{symbol}&quot;");
        format!(
            "{};{}",
            positive_arrangement(positive, &quoted, &value),
            negative_arrangement(negative, &quoted, &value)
        )
    }

    fn date(&self, token: &str) -> String {
        let prefix = if self.locale.language == "ru" {
            RUSSIAN_DATE_PREFIX
        } else {
            ""
        };
        match token {
            "d" => format!("{};@", self.locale.short_date_pattern),
            "D" => SYSTEM_LONG_DATE.to_string(),
            "f" => format!(
                "{prefix}{} {};@",
                self.locale.long_date_pattern, self.locale.short_time_pattern
            )
            .replace("tt", "AM/PM"),
            "F" => format!("{prefix}{};@", self.locale.full_date_time_pattern).replace("tt", "AM/PM"),
            "MMMM yyyy" => format!("{prefix}{};@", self.locale.year_month_pattern),
            literal => format!("{};@", literal.replace("tt", "AM/PM")),
        }
    }
}

/// `base` followed by a decimal point and `digits` zeros, if any
fn with_decimals(base: &str, digits: u8) -> String {
    let mut out = String::with_capacity(base.len() + 1 + usize::from(digits));
    out.push_str(base);
    if digits > 0 {
        out.push('.');
        out.extend(std::iter::repeat('0').take(usize::from(digits)));
    }
    out
}

/// Digit-grouping template: `#,##0` plus the decimal places
fn grouped(digits: u8) -> String {
    with_decimals("#,##0", digits)
}

fn number(digits: u8, negative: NumberNegativePattern) -> String {
    let value = grouped(digits);
    let negative = match negative {
        NumberNegativePattern::Parenthesized => format!("({value})"),
        // Spreadsheets render `-n` without a dedicated section
        NumberNegativePattern::LeadingSign => return value,
        NumberNegativePattern::LeadingSignSpace => format!("- {value}"),
        NumberNegativePattern::TrailingSign => format!("{value}-"),
        NumberNegativePattern::TrailingSignSpace => format!("{value} -"),
    };
    format!("{value};{negative}")
}

/// Locale code understood by spreadsheets for well-known currency symbols
fn finance_symbol(symbol: &str) -> &'static str {
    match symbol {
        "₽" => "[$₽-419]",
        "$" => "[$$-409]",
        "€" => "[$€-2]",
        "£" => "[$£-809]",
        "₹" => "[$₹-4009]",
        _ => "",
    }
}

fn positive_arrangement(pattern: CurrencyPositivePattern, sym: &str, n: &str) -> String {
    use CurrencyPositivePattern::*;
    match pattern {
        SymbolValue => format!("{sym}{n}"),
        ValueSymbol => format!("{n}{sym}"),
        SymbolSpaceValue => format!("{sym} {n}"),
        ValueSpaceSymbol => format!("{n} {sym}"),
    }
}

fn negative_arrangement(pattern: CurrencyNegativePattern, sym: &str, n: &str) -> String {
    use CurrencyNegativePattern::*;
    match pattern {
        ParenSymbolValue => format!("({sym}{n})"),
        SignSymbolValue => format!("-{sym}{n}"),
        SymbolSignValue => format!("{sym}-{n}"),
        SymbolValueSign => format!("{sym}{n}-"),
        ParenValueSymbol => format!("({n}{sym})"),
        SignValueSymbol => format!("-{n}{sym}"),
        ValueSignSymbol => format!("{n}-{sym}"),
        ValueSymbolSign => format!("{n}{sym}-"),
        SignValueSpaceSymbol => format!("-{n} {sym}"),
        SignSymbolSpaceValue => format!("-{sym} {n}"),
        ValueSpaceSymbolSign => format!("{n} {sym}-"),
        SymbolSpaceValueSign => format!("{sym} {n}-"),
        SymbolSpaceSignValue => format!("{sym} -{n}"),
        ValueSignSpaceSymbol => format!("{n}- {sym}"),
        ParenSymbolSpaceValue => format!("({sym} {n})"),
        ParenValueSpaceSymbol => format!("({n} {sym})"),
    }
}

/// Synthesize with an invariant locale and no overrides
pub fn number_format(format: &ValueFormat) -> String {
    NumberFormatSynthesizer::default().synthesize(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_currency_symbol_prefix() {
        let pattern = number_format(&ValueFormat::currency("$", 2));
        assert!(pattern.starts_with("&quot;$&quot;#,##0.00"));
        assert_eq!(pattern, "&quot;$&quot;#,##0.00;(&quot;$&quot;#,##0.00)");
    }

    #[test]
    fn test_currency_arrangements() {
        let format = ValueFormat::Currency {
            decimal_digits: 0,
            positive_pattern: CurrencyPositivePattern::ValueSpaceSymbol,
            negative_pattern: CurrencyNegativePattern::ParenValueSymbol,
            symbol: "€".into(),
        };
        assert_eq!(
            number_format(&format),
            "#,##0 &quot;€&quot;;(#,##0&quot;€&quot;)"
        );
    }

    #[test]
    fn test_negative_pattern_four_is_value_then_symbol() {
        let format = ValueFormat::Currency {
            decimal_digits: 2,
            positive_pattern: CurrencyPositivePattern::SymbolValue,
            negative_pattern: CurrencyNegativePattern::from_id(4).unwrap(),
            symbol: "$".into(),
        };
        assert_eq!(
            number_format(&format),
            "&quot;$&quot;#,##0.00;(#,##0.00&quot;$&quot;)"
        );
    }

    #[test]
    fn test_accounting_currency() {
        let synth = NumberFormatSynthesizer::new(LocaleInfo::en_us()).accounting(true);
        assert_eq!(
            synth.synthesize(&ValueFormat::currency("$", 2)),
            "_-* [$$-409]#,##0.00_-;_-* ([$$-409]#,##0.00)_-;_-* &quot;-&quot;??\\ [$$-409]_-;_-@_-"
        );
    }

    #[test]
    fn test_accounting_unknown_symbol() {
        let synth = NumberFormatSynthesizer::default().accounting(true);
        assert_eq!(
            synth.synthesize(&ValueFormat::currency("CHF", 0)),
            "_-* #,##0_-;_-* (#,##0)_-;_-* &quot;-&quot;??\\ _-;_-@_-"
        );
    }

    #[test]
    fn test_currency_from_locale() {
        let synth = NumberFormatSynthesizer::new(LocaleInfo::ru_ru()).use_locale(true);
        assert_eq!(
            synth.synthesize(&ValueFormat::currency("$", 0)),
            "#,##0.00 &quot;₽&quot;;-#,##0.00 &quot;₽&quot;"
        );
    }

    #[test]
    fn test_number_patterns() {
        assert_eq!(number_format(&ValueFormat::number(2)), "#,##0.00");
        assert_eq!(number_format(&ValueFormat::number(0)), "#,##0");

        let paren = ValueFormat::Number {
            decimal_digits: 1,
            negative_pattern: NumberNegativePattern::Parenthesized,
        };
        assert_eq!(number_format(&paren), "#,##0.0;(#,##0.0)");

        let trailing = ValueFormat::Number {
            decimal_digits: 0,
            negative_pattern: NumberNegativePattern::TrailingSignSpace,
        };
        assert_eq!(number_format(&trailing), "#,##0;#,##0 -");
    }

    #[test]
    fn test_number_from_locale() {
        let synth = NumberFormatSynthesizer::new(LocaleInfo::de_de()).use_locale(true);
        assert_eq!(synth.synthesize(&ValueFormat::number(0)), "#,##0.000");
    }

    #[test]
    fn test_date_tokens() {
        let synth = NumberFormatSynthesizer::new(LocaleInfo::en_us());
        assert_eq!(synth.synthesize(&ValueFormat::date("d")), "M/d/yyyy;@");
        assert_eq!(
            synth.synthesize(&ValueFormat::date("D")),
            "[$-F800]dddd, mmmm dd, yyyy"
        );
        assert_eq!(
            synth.synthesize(&ValueFormat::date("f")),
            "dddd, MMMM d, yyyy h:mm AM/PM;@"
        );
        assert_eq!(
            synth.synthesize(&ValueFormat::date("F")),
            "dddd, MMMM d, yyyy h:mm:ss AM/PM;@"
        );
        assert_eq!(synth.synthesize(&ValueFormat::date("MMMM yyyy")), "MMMM yyyy;@");
        assert_eq!(
            synth.synthesize(&ValueFormat::date("dd.MM.yyyy hh:mm tt")),
            "dd.MM.yyyy hh:mm AM/PM;@"
        );
    }

    #[test]
    fn test_russian_date_prefix() {
        let synth = NumberFormatSynthesizer::new(LocaleInfo::ru_ru());
        assert_eq!(
            synth.synthesize(&ValueFormat::date("MMMM yyyy")),
            "[$-419]MMMM yyyy;@"
        );
        assert_eq!(synth.synthesize(&ValueFormat::date("d")), "dd.MM.yyyy;@");
    }

    #[test]
    fn test_percent() {
        assert_eq!(number_format(&ValueFormat::percent(0)), "0%");
        assert_eq!(number_format(&ValueFormat::percent(2)), "0.00%");

        let synth = NumberFormatSynthesizer::new(LocaleInfo::en_us()).use_locale(true);
        assert_eq!(synth.synthesize(&ValueFormat::percent(0)), "0.00%");
    }

    #[test]
    fn test_deterministic() {
        let synth = NumberFormatSynthesizer::new(LocaleInfo::de_de()).accounting(true);
        let format = ValueFormat::currency("€", 2);
        assert_eq!(synth.synthesize(&format), synth.synthesize(&format));
    }
}
