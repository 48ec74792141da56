//! Query types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Validation for request types.
///
/// Returns a boxed `ProblemDetails` to keep the `Err` variant small. The
/// `request_id` fills the problem's `instance` field.
pub trait Validate {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Query string of `GET /path`.
///
/// Missing parameters deserialize as empty strings so that validation, not
/// the extractor, reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathQuery {
    /// Short name of the starting building.
    #[serde(default)]
    pub origin: String,

    /// Short name of the destination building.
    #[serde(default)]
    pub destination: String,
}

impl Validate for PathQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        for (name, value) in [("origin", &self.origin), ("destination", &self.destination)] {
            if value.trim().is_empty() {
                return Err(Box::new(ProblemDetails::bad_request(
                    format!("The '{}' query parameter is required and cannot be empty", name),
                    request_id,
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(origin: &str, destination: &str) -> PathQuery {
        PathQuery {
            origin: origin.to_string(),
            destination: destination.to_string(),
        }
    }

    #[test]
    fn test_valid_query() {
        assert!(query("MGH", "CSE").validate("req").is_ok());
    }

    #[test]
    fn test_missing_origin() {
        let problem = query("", "CSE").validate("req-1").unwrap_err();
        assert_eq!(problem.status, 400);
        assert!(problem.detail.as_deref().unwrap().contains("'origin'"));
        assert_eq!(problem.instance.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_blank_destination() {
        let problem = query("MGH", "   ").validate("req-2").unwrap_err();
        assert!(problem.detail.as_deref().unwrap().contains("'destination'"));
    }

    #[test]
    fn test_absent_fields_default_to_empty() {
        let parsed: PathQuery = serde_json::from_str(r#"{"origin":"MGH"}"#).unwrap();
        assert_eq!(parsed.destination, "");
        assert!(parsed.validate("req").is_err());
    }
}
