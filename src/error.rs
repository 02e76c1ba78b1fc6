use juniper::{graphql_value, FieldError, IntoFieldError, ScalarValue};

use crate::store::StoreError;

/// Why a resolver did not produce its value.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// The request carried no authenticated user.
    #[error("Unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<S: ScalarValue> IntoFieldError<S> for ResolverError {
    fn into_field_error(self) -> FieldError<S> {
        match self {
            ResolverError::Unauthorized => FieldError::new(
                "Unauthorized",
                graphql_value!({ "code": "UNAUTHORIZED" }),
            ),
            ResolverError::Store(e) => FieldError::new(e, graphql_value!({ "code": "STORE" })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_keeps_its_message() {
        let error: FieldError = ResolverError::Unauthorized.into_field_error();

        assert_eq!(error.message(), "Unauthorized");
        assert_eq!(error.extensions(), &graphql_value!({ "code": "UNAUTHORIZED" }));
    }

    #[test]
    fn store_errors_pass_through() {
        let error: FieldError = ResolverError::from(StoreError::Poisoned).into_field_error();

        assert_eq!(error.message(), "store table lock was poisoned");
    }
}
