//! Serializable identifier and reason types shared across the crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a call at registration, increasing in arrival order.
pub type CallId = u64;

/// Why the customer is calling.
///
/// The first three variants are the fixed menu choices; `Other` carries free
/// text entered by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallReason {
    /// Account balance inquiry.
    BalanceInquiry,
    /// Technical problem report.
    TechnicalIssue,
    /// Product information request.
    ProductInfo,
    /// Free-text reason.
    Other(String),
}

impl CallReason {
    /// Map a 1-based menu option to a reason. Option 4 takes `free_text`.
    ///
    /// Returns `None` for options outside `1..=4`.
    #[must_use]
    pub fn from_menu_option(option: u8, free_text: Option<&str>) -> Option<Self> {
        match option {
            1 => Some(Self::BalanceInquiry),
            2 => Some(Self::TechnicalIssue),
            3 => Some(Self::ProductInfo),
            4 => Some(Self::Other(free_text.unwrap_or_default().trim().to_string())),
            _ => None,
        }
    }

    /// Whether the reason carries usable content.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Other(text) => !text.trim().is_empty(),
            _ => true,
        }
    }
}

impl fmt::Display for CallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BalanceInquiry => f.write_str("balance inquiry"),
            Self::TechnicalIssue => f.write_str("technical issue"),
            Self::ProductInfo => f.write_str("product information"),
            Self::Other(text) => f.write_str(text),
        }
    }
}

impl From<&str> for CallReason {
    fn from(text: &str) -> Self {
        Self::Other(text.trim().to_string())
    }
}
