//! Page selection for an export run
//!
//! An export run works on zero-based indices into the prepared pages. Users
//! write page numbers 1-based, as comma separated tokens where each token is
//! either a single number or an inclusive range `a-b`; a trailing `-` means
//! "through the last page" (`"1,3-5,12"`, `"3-"`).

use crate::error::{Error, Result};

/// Which pages an export run should cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageRange {
    /// Every prepared page
    #[default]
    All,
    /// Only the page currently shown to the user
    Current,
    /// Pages listed by a page-number expression
    PageNumbers,
}

/// Resolves a [`PageRange`] plus its settings into zero-based page indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelector<'a> {
    /// Selection strategy
    pub range: PageRange,
    /// Page-number expression, used by [`PageRange::PageNumbers`]
    pub page_numbers: &'a str,
    /// 1-based current page, used by [`PageRange::Current`]
    pub current_page: usize,
}

impl<'a> PageSelector<'a> {
    /// Create a selector for a range with no expression and current page 1
    pub fn new(range: PageRange) -> Self {
        Self {
            range,
            page_numbers: "",
            current_page: 1,
        }
    }

    /// Set the page-number expression
    pub fn with_page_numbers(mut self, page_numbers: &'a str) -> Self {
        self.page_numbers = page_numbers;
        self
    }

    /// Set the 1-based current page
    pub fn with_current_page(mut self, current_page: usize) -> Self {
        self.current_page = current_page;
        self
    }

    /// Resolve against `total` prepared pages
    ///
    /// - `All` yields `0..total`.
    /// - `Current` yields `[current_page - 1]` without checking it against
    ///   `total`; a current page of 0 has no zero-based index and yields nothing.
    /// - `PageNumbers` expands the expression and drops indices outside
    ///   `0..total`, keeping emission order and duplicates. A blank expression
    ///   selects every page.
    ///
    /// # Examples
    /// ```
    /// use folio_core::{PageRange, PageSelector};
    ///
    /// let pages = PageSelector::new(PageRange::PageNumbers)
    ///     .with_page_numbers("2-4")
    ///     .resolve(10)
    ///     .unwrap();
    /// assert_eq!(pages, vec![1, 2, 3]);
    /// ```
    pub fn resolve(&self, total: usize) -> Result<Vec<usize>> {
        match self.range {
            PageRange::All => Ok((0..total).collect()),
            PageRange::Current => Ok(self.current_page.checked_sub(1).into_iter().collect()),
            PageRange::PageNumbers => match expand_page_numbers(self.page_numbers, total)? {
                Some(pages) => Ok(pages),
                None => Ok((0..total).collect()),
            },
        }
    }
}

/// Expand a page-number expression into zero-based indices within `0..total`
///
/// Returns `Ok(None)` when the expression is blank. Whitespace anywhere in the
/// expression is ignored, so `"1, 3"` and `"1,3"` are the same.
pub fn expand_page_numbers(expression: &str, total: usize) -> Result<Option<Vec<usize>>> {
    let mut scan: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    if scan.is_empty() {
        return Ok(None);
    }

    if scan.ends_with('-') {
        scan.push_str(&total.to_string());
    }
    scan.push(',');

    let mut pages = Vec::new();
    let mut token_start = 0;
    let mut low: Option<i64> = None;

    for (i, b) in scan.bytes().enumerate() {
        match b {
            b',' => {
                let high = parse_page_number(expression, &scan[token_start..i])?;
                token_start = i + 1;
                match low.take() {
                    Some(low) => push_range(&mut pages, low, high, total),
                    None => push_page(&mut pages, high, total),
                }
            }
            b'-' => {
                low = Some(parse_page_number(expression, &scan[token_start..i])?);
                token_start = i + 1;
            }
            _ => {}
        }
    }

    Ok(Some(pages))
}

fn parse_page_number(expression: &str, token: &str) -> Result<i64> {
    if token.is_empty() {
        return Err(Error::page_numbers(expression, "missing page number"));
    }
    token
        .parse()
        .map_err(|_| Error::page_numbers(expression, format!("'{}' is not a page number", token)))
}

fn push_page(pages: &mut Vec<usize>, number: i64, total: usize) {
    if let Some(index) = zero_based(number, total) {
        pages.push(index);
    }
}

/// Only the part of `low..=high` that survives the bounds filter is emitted,
/// which yields the same list as expanding everything and filtering afterwards.
fn push_range(pages: &mut Vec<usize>, low: i64, high: i64, total: usize) {
    let total = i64::try_from(total).unwrap_or(i64::MAX);
    let first = low.max(1);
    let last = high.min(total);
    if first <= last {
        pages.extend((first..=last).map(|n| (n - 1) as usize));
    }
}

fn zero_based(number: i64, total: usize) -> Option<usize> {
    let index = usize::try_from(number.checked_sub(1)?).ok()?;
    (index < total).then_some(index)
}
