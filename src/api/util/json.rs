use anyhow::Result;
use axum::Json;
use tracing::warn;
use validator::ValidationErrors;

use crate::api::dto::ApiResponse;
use crate::errors::{internal_error, AppError};

/// Wraps a service result in the response envelope. Validation failures
/// become 400s; everything else is a 500 carrying the original message.
pub fn to_json<T: serde::Serialize>(
    result: Result<T>
) -> Result<Json<ApiResponse<T>>, AppError> {
    match result {
        Ok(value) => Ok(Json(ApiResponse::ok(value))),
        Err(err) => match err.downcast_ref::<ValidationErrors>() {
            Some(validation) => {
                warn!("Rejected request: {}", validation);
                Err(AppError::BodyParsingError(validation.to_string()))
            }
            None => Err(internal_error(err)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Limited {
        #[validate(range(min = 1, max = 100))]
        limit: usize,
    }

    #[test]
    fn ok_is_wrapped_in_envelope() {
        let Json(body) = to_json(Ok(3)).unwrap();
        assert!(body.is_successful);
        assert_eq!(body.data, Some(3));
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let result: Result<()> = Limited { limit: 0 }.validate().map_err(Into::into);
        assert!(matches!(to_json(result), Err(AppError::BodyParsingError(_))));
    }

    #[test]
    fn other_errors_are_internal() {
        let result: Result<()> = Err(anyhow::anyhow!("disk on fire"));
        match to_json(result) {
            Err(AppError::InternalServerError(msg)) => assert_eq!(msg, "disk on fire"),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }
}
