//! Error types for building and rendering stylesheets.

use crate::style::declaration::UnitKind;

/// Errors raised by the stylesheet model.
///
/// Every operation reports failure to its immediate caller; nothing is retried
/// or recovered internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CssomError {
    /// A required declaration field (or a selector name) was not provided.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A selector with this name already exists in the stylesheet.
    #[error("selector '{0}' already exists")]
    DuplicateSelector(String),

    /// The id is already registered to another selector.
    #[error("id '{id}' is already used by selector '{existing}'")]
    DuplicateId { id: String, existing: String },

    /// Neither a selector name nor a selector id matched.
    #[error("selector '{0}' not found")]
    SelectorNotFound(String),

    /// A unit tag that does not name any [`UnitKind`].
    #[error("unknown unit type '{0}'")]
    UnknownUnitType(String),

    /// The value has the wrong shape for its unit.
    #[error("invalid value for {unit} declaration: {reason}")]
    InvalidArgumentType { unit: UnitKind, reason: String },
}

impl CssomError {
    pub(crate) fn invalid(unit: UnitKind, reason: impl Into<String>) -> Self {
        Self::InvalidArgumentType {
            unit,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CssomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CssomError::MissingField("property").to_string(),
            "missing required field 'property'"
        );
        assert_eq!(
            CssomError::DuplicateSelector("h1".into()).to_string(),
            "selector 'h1' already exists"
        );
        assert_eq!(
            CssomError::invalid(UnitKind::Rgb, "expected three channels").to_string(),
            "invalid value for rgb declaration: expected three channels"
        );
    }
}
