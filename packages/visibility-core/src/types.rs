//! Inputs and result rows for a visibility run.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VisibilityError};

// =============================================================================
// Inputs
// =============================================================================

/// The brand under analysis plus the context used to build queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandProfile {
    /// Brand name searched for in answers
    pub brand: String,

    /// Comma-delimited product list; only the first entry is used
    pub products: String,

    /// Product category (e.g., "Air Care")
    pub category: String,

    /// Comma-delimited competitor list; only the first entry is used
    pub competitors: String,
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            brand: "Glade".to_string(),
            products: "Glade Plug-Ins, Glade Candles".to_string(),
            category: "Air Care".to_string(),
            competitors: "Febreze, Air Wick".to_string(),
        }
    }
}

impl BrandProfile {
    pub fn new(
        brand: impl Into<String>,
        products: impl Into<String>,
        category: impl Into<String>,
        competitors: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            products: products.into(),
            category: category.into(),
            competitors: competitors.into(),
        }
    }
}

/// Number of queries to run, bounded to `10..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryCount(usize);

impl QueryCount {
    pub const MIN: usize = 10;
    pub const MAX: usize = 100;
    pub const DEFAULT: usize = 20;

    pub fn new(count: usize) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(VisibilityError::Validation(format!(
                "query count must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                count
            )))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for QueryCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for QueryCount {
    type Error = VisibilityError;

    fn try_from(count: usize) -> Result<Self> {
        Self::new(count)
    }
}

// =============================================================================
// Results
// =============================================================================

/// Label the classifier returns for clearly favourable text.
pub const POSITIVE: &str = "POSITIVE";

/// Label the classifier returns for clearly unfavourable text.
pub const NEGATIVE: &str = "NEGATIVE";

/// Label recorded when the classifier itself fails on an answer.
pub const NEUTRAL: &str = "NEUTRAL";

/// One analyzed (query, answer) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRow {
    /// The generated query
    pub query: String,

    /// Whether the brand appears in the answer (case-insensitive)
    pub visible: bool,

    /// Classifier label, stored verbatim
    pub sentiment: String,

    /// URLs found in the answer, semicolon-joined in order of appearance
    pub urls: String,
}

impl AnalysisRow {
    /// The individual URLs of this row, in order.
    ///
    /// Splits only at a `;` that starts another `http(s)://` URL, so
    /// semicolons inside a path or query stay put. A single extracted
    /// token that itself contains `;https://` still comes back as two.
    pub fn url_list(&self) -> Vec<&str> {
        let mut urls = Vec::new();
        let mut start = 0;

        for (index, _) in self.urls.match_indices(';') {
            let rest = &self.urls[index + 1..];
            if rest.starts_with("http://") || rest.starts_with("https://") {
                urls.push(&self.urls[start..index]);
                start = index + 1;
            }
        }
        urls.push(&self.urls[start..]);

        urls.retain(|url| !url.is_empty());
        urls
    }
}

/// All rows produced by one run, in query order.
pub type ResultSet = Vec<AnalysisRow>;
