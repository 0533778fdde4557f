//! Recursive validation of models, enums and unions.

use std::collections::{BTreeMap, HashMap};

use error_stack::ResultExt;

use crate::errors::{CustomResult, ModelError};

/// Checks that a value satisfies its API contract.
///
/// Models check that every required field is present and well typed and then
/// validate each field value in turn. Open enums check membership and unions
/// check that a variant was resolved. Validation stops at the first violation.
pub trait Validate {
    /// Validate `self` and everything reachable from it.
    fn validate(&self) -> CustomResult<(), ModelError>;
}

macro_rules! impl_validate_noop {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Validate for $ty {
                #[inline]
                fn validate(&self) -> CustomResult<(), ModelError> {
                    Ok(())
                }
            }
        )+
    };
}

impl_validate_noop!(
    String,
    bool,
    i32,
    i64,
    u8,
    u32,
    u64,
    f64,
    serde_json::Value,
    crate::types::MinorUnit,
    crate::types::Timestamp,
);

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> CustomResult<(), ModelError> {
        self.as_ref().map_or(Ok(()), Validate::validate)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> CustomResult<(), ModelError> {
        self.iter().enumerate().try_for_each(|(index, item)| {
            item.validate()
                .attach_printable_lazy(|| format!("at index {index}"))
        })
    }
}

impl<T: Validate, S> Validate for HashMap<String, T, S> {
    fn validate(&self) -> CustomResult<(), ModelError> {
        self.iter().try_for_each(|(key, value)| {
            value
                .validate()
                .attach_printable_lazy(|| format!("at key {key:?}"))
        })
    }
}

impl<T: Validate> Validate for BTreeMap<String, T> {
    fn validate(&self) -> CustomResult<(), ModelError> {
        self.iter().try_for_each(|(key, value)| {
            value
                .validate()
                .attach_printable_lazy(|| format!("at key {key:?}"))
        })
    }
}

/// Validates the result of a field read, recording where the failure happened.
///
/// Generated models call this once per declared field, passing the outcome of
/// the field's typed getter.
pub fn validate_field<T: Validate>(
    model_name: &'static str,
    field_name: &'static str,
    value: CustomResult<T, ModelError>,
) -> CustomResult<(), ModelError> {
    value
        .and_then(|value| value.validate())
        .attach_printable_lazy(|| format!("while validating {model_name}.{field_name}"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::api_enum::ApiEnum;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::AsRefStr)]
    #[strum(serialize_all = "snake_case")]
    enum Flavour {
        Plain,
        Salted,
    }

    #[test]
    fn test_option_and_vec_delegate_to_items() {
        let none: Option<ApiEnum<Flavour>> = None;
        assert!(none.validate().is_ok());

        let known = vec![ApiEnum::from(Flavour::Plain), ApiEnum::from(Flavour::Salted)];
        assert!(known.validate().is_ok());

        let mixed = vec![
            ApiEnum::<Flavour>::from_raw("plain"),
            ApiEnum::<Flavour>::from_raw("sweet"),
        ];
        let error = mixed.validate().unwrap_err();
        assert!(matches!(
            error.current_context(),
            ModelError::InvalidEnumValue { value, .. } if value == "sweet"
        ));
    }

    #[test]
    fn test_validate_field_propagates_read_errors() {
        let read: CustomResult<String, ModelError> =
            Err(error_stack::report!(ModelError::MissingRequiredField {
                field_name: "country".to_string(),
            }));

        let error = validate_field("BillingAddress", "country", read).unwrap_err();
        assert_eq!(
            error.current_context(),
            &ModelError::MissingRequiredField {
                field_name: "country".to_string()
            }
        );
    }
}
