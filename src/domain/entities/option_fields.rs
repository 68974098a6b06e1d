use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateLength, ValidationErrors};

/// Represents optional field semantics in PATCH/UPDATE requests.
///
/// - `Unchanged` → field not touched
/// - `SetToNull` → explicitly null
/// - `SetToValue` → set to provided value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum OptionField<T> {
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<T> Default for OptionField<T> {
    fn default() -> Self {
        OptionField::Unchanged
    }
}

// ---------------------- Validation support ----------------------

impl<T> ValidateLength<u64> for OptionField<T>
where
    T: ValidateLength<u64>
{
    fn length(&self) -> Option<u64> {
        match self {
            OptionField::SetToValue(value) => value.length(),
            _ => None,
        }
    }
    fn validate_length(&self, min: Option<u64>, max: Option<u64>, equal: Option<u64>) -> bool {
        match self {
            OptionField::SetToValue(value) => value.validate_length(min, max, equal),
            _ => true,
        }
    }
}

impl<T: Validate> Validate for OptionField<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            OptionField::SetToValue(value) => value.validate(),
            _ => Ok(()),
        }
    }
}

// ---------------------- Core helpers & conversions ----------------------

impl<T> OptionField<T> {
    /// Borrowed nested option:
    /// - `None` → unchanged
    /// - `Some(None)` → set null
    /// - `Some(Some(&T))` → set to value
    pub fn as_ref_option(&self) -> Option<Option<&T>> {
        match self {
            Self::Unchanged => None,
            Self::SetToNull => Some(None),
            Self::SetToValue(value) => Some(Some(value)),
        }
    }

    /// True when `Unchanged`.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// True when `SetToNull`.
    pub fn is_set_to_null(&self) -> bool {
        matches!(self, Self::SetToNull)
    }

    /// Convert into `Option<T>`, treating both `Unchanged` and `SetToNull`
    /// as "no replacement value".
    pub fn flatten(self) -> Option<T> {
        match self {
            OptionField::SetToValue(v) => Some(v),
            _ => None
        }
    }

    /// Borrowed flatten for references
    pub fn flatten_ref(&self) -> Option<&T> {
        match self {
            OptionField::SetToValue(v) => Some(v),
            _ => None
        }
    }
}

impl OptionField<String> {
    pub fn flatten_str(&self) -> Option<&str> {
        self.flatten_ref().map(|s| s.as_str())
    }
}

// ---------------------- From conversions ----------------------

impl<T> From<Option<Option<T>>> for OptionField<T> {
    fn from(opt: Option<Option<T>>) -> Self {
        match opt {
            None => OptionField::Unchanged,
            Some(None) => OptionField::SetToNull,
            Some(Some(v)) => OptionField::SetToValue(v),
        }
    }
}

impl<T> From<OptionField<T>> for Option<Option<T>> {
    fn from(of: OptionField<T>) -> Self {
        match of {
            OptionField::Unchanged => None,
            OptionField::SetToNull => Some(None),
            OptionField::SetToValue(v) => Some(Some(v)),
        }
    }
}

// ---------------------- Aliases ----------------------

pub type PatchString = OptionField<String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_unchanged() {
        let field: OptionField<String> = OptionField::default();
        assert!(field.is_unchanged());
    }

    #[test]
    fn nested_option_round_trip() {
        assert_eq!(OptionField::<i32>::from(None), OptionField::Unchanged);
        assert_eq!(OptionField::from(Some(None::<i32>)), OptionField::SetToNull);
        assert_eq!(OptionField::from(Some(Some(7))), OptionField::SetToValue(7));

        let nested: Option<Option<i32>> = OptionField::SetToNull.into();
        assert_eq!(nested, Some(None));
    }

    #[test]
    fn flatten_treats_null_as_absent() {
        assert_eq!(PatchString::SetToNull.flatten_str(), None);
        assert_eq!(
            PatchString::SetToValue("Acme".into()).flatten_str(),
            Some("Acme")
        );
    }

    #[test]
    fn length_validation_skips_untouched_fields() {
        let untouched: OptionField<String> = OptionField::Unchanged;
        assert!(untouched.validate_length(Some(1), Some(3), None));

        let too_long = OptionField::SetToValue("overlong".to_string());
        assert!(!too_long.validate_length(Some(1), Some(3), None));
    }
}
