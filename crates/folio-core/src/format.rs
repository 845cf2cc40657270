//! Abstract value formats attached to report fields
//!
//! These describe *what* a value looks like (currency with two decimals,
//! long date, ...), independent of any target format. Exporters turn them
//! into target patterns, e.g. spreadsheet number-format strings.

/// Arrangement of currency symbol and value for positive amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurrencyPositivePattern {
    /// `$n`
    #[default]
    SymbolValue,
    /// `n$`
    ValueSymbol,
    /// `$ n`
    SymbolSpaceValue,
    /// `n $`
    ValueSpaceSymbol,
}

/// Arrangement of currency symbol, sign and value for negative amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurrencyNegativePattern {
    /// `($n)`
    #[default]
    ParenSymbolValue,
    /// `-$n`
    SignSymbolValue,
    /// `$-n`
    SymbolSignValue,
    /// `$n-`
    SymbolValueSign,
    /// `(n$)`
    ParenValueSymbol,
    /// `-n$`
    SignValueSymbol,
    /// `n-$`
    ValueSignSymbol,
    /// `n$-`
    ValueSymbolSign,
    /// `-n $`
    SignValueSpaceSymbol,
    /// `-$ n`
    SignSymbolSpaceValue,
    /// `n $-`
    ValueSpaceSymbolSign,
    /// `$ n-`
    SymbolSpaceValueSign,
    /// `$ -n`
    SymbolSpaceSignValue,
    /// `n- $`
    ValueSignSpaceSymbol,
    /// `($ n)`
    ParenSymbolSpaceValue,
    /// `(n $)`
    ParenValueSpaceSymbol,
}

/// Arrangement of sign and value for negative plain numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberNegativePattern {
    /// `(n)`
    Parenthesized,
    /// `-n`
    #[default]
    LeadingSign,
    /// `- n`
    LeadingSignSpace,
    /// `n-`
    TrailingSign,
    /// `n -`
    TrailingSignSpace,
}

impl CurrencyPositivePattern {
    const ALL: [Self; 4] = [
        Self::SymbolValue,
        Self::ValueSymbol,
        Self::SymbolSpaceValue,
        Self::ValueSpaceSymbol,
    ];

    /// Look up a pattern by its locale table id (0..=3)
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Locale table id of this pattern
    pub fn id(self) -> u8 {
        self as u8
    }
}

impl CurrencyNegativePattern {
    const ALL: [Self; 16] = [
        Self::ParenSymbolValue,
        Self::SignSymbolValue,
        Self::SymbolSignValue,
        Self::SymbolValueSign,
        Self::ParenValueSymbol,
        Self::SignValueSymbol,
        Self::ValueSignSymbol,
        Self::ValueSymbolSign,
        Self::SignValueSpaceSymbol,
        Self::SignSymbolSpaceValue,
        Self::ValueSpaceSymbolSign,
        Self::SymbolSpaceValueSign,
        Self::SymbolSpaceSignValue,
        Self::ValueSignSpaceSymbol,
        Self::ParenSymbolSpaceValue,
        Self::ParenValueSpaceSymbol,
    ];

    /// Look up a pattern by its locale table id (0..=15)
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Locale table id of this pattern
    pub fn id(self) -> u8 {
        self as u8
    }
}

impl NumberNegativePattern {
    const ALL: [Self; 5] = [
        Self::Parenthesized,
        Self::LeadingSign,
        Self::LeadingSignSpace,
        Self::TrailingSign,
        Self::TrailingSignSpace,
    ];

    /// Look up a pattern by its locale table id (0..=4)
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Locale table id of this pattern
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Display format of a report field value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueFormat {
    /// Grouped number
    Number {
        decimal_digits: u8,
        negative_pattern: NumberNegativePattern,
    },
    /// Grouped number with a currency symbol
    Currency {
        decimal_digits: u8,
        positive_pattern: CurrencyPositivePattern,
        negative_pattern: CurrencyNegativePattern,
        symbol: String,
    },
    /// Date/time, either a standard token (`d`, `D`, `f`, `F`, `MMMM yyyy`)
    /// or a literal pattern such as `dd.MM.yyyy HH:mm`
    Date { pattern: String },
    /// Percentage
    Percent { decimal_digits: u8 },
}

impl ValueFormat {
    /// Number format with the default `-n` negative arrangement
    pub fn number(decimal_digits: u8) -> Self {
        ValueFormat::Number {
            decimal_digits,
            negative_pattern: NumberNegativePattern::default(),
        }
    }

    /// Currency format with `$n` / `($n)` arrangements
    pub fn currency<S: Into<String>>(symbol: S, decimal_digits: u8) -> Self {
        ValueFormat::Currency {
            decimal_digits,
            positive_pattern: CurrencyPositivePattern::default(),
            negative_pattern: CurrencyNegativePattern::default(),
            symbol: symbol.into(),
        }
    }

    /// Date format from a token or literal pattern
    pub fn date<S: Into<String>>(pattern: S) -> Self {
        ValueFormat::Date {
            pattern: pattern.into(),
        }
    }

    /// Percent format
    pub fn percent(decimal_digits: u8) -> Self {
        ValueFormat::Percent { decimal_digits }
    }
}
