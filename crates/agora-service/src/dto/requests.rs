//! Request DTOs for API endpoints
//!
//! Validation here is structural only (lengths, presence). Parsing into
//! domain types happens in `parent_ref()` and friends; page values stay raw
//! strings for the query service, which parses them after authorization.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use agora_core::{DomainError, EntityId, ParentRef, ParentType};

/// Query string of `GET /api/v1/reactions`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReactionsQuery {
    /// Parent id; at most 20 characters, the width of any i64
    #[validate(length(min = 1, max = 20, message = "parent must be 1-20 characters"))]
    pub parent: String,

    /// Parent discriminator, currently only `Post`
    #[validate(length(min = 1, max = 32, message = "parentType must be 1-32 characters"))]
    pub parent_type: String,

    /// Zero-based page, default 0
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,

    /// Page size between 1 and 20, default 10
    #[param(value_type = Option<i64>)]
    pub per_page: Option<String>,
}

impl ReactionsQuery {
    /// Parse the parent reference
    pub fn parent_ref(&self) -> Result<ParentRef, DomainError> {
        parse_parent(&self.parent_type, &self.parent)
    }

    /// Raw page values, checked by the query service after access
    pub fn page_params(&self) -> (Option<&str>, Option<&str>) {
        (self.page.as_deref(), self.per_page.as_deref())
    }
}

/// Path of the reaction write endpoints
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReactionPath {
    #[validate(length(min = 1, max = 32, message = "parent type must be 1-32 characters"))]
    pub parent_type: String,

    #[validate(length(min = 1, max = 20, message = "parent id must be 1-20 characters"))]
    pub parent_id: String,

    /// Absent on the clear-all endpoint
    #[serde(default)]
    #[validate(length(min = 1, max = 32, message = "reaction type must be 1-32 characters"))]
    pub reaction_type: Option<String>,
}

impl ReactionPath {
    /// Parse the parent reference
    pub fn parent_ref(&self) -> Result<ParentRef, DomainError> {
        parse_parent(&self.parent_type, &self.parent_id)
    }
}

fn parse_parent(parent_type: &str, id: &str) -> Result<ParentRef, DomainError> {
    let parent_type = parent_type.parse::<ParentType>()?;
    let id = EntityId::parse(id).map_err(|e| DomainError::validation(e.to_string()))?;
    Ok(ParentRef::new(id, parent_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(parent: &str, parent_type: &str) -> ReactionsQuery {
        ReactionsQuery {
            parent: parent.to_string(),
            parent_type: parent_type.to_string(),
            page: None,
            per_page: None,
        }
    }

    #[test]
    fn test_reactions_query_parses() {
        let q = query("42", "Post");
        assert!(q.validate().is_ok());
        assert_eq!(q.parent_ref().unwrap(), ParentRef::post(EntityId::new(42)));
    }

    #[test]
    fn test_reactions_query_camel_case() {
        let q: ReactionsQuery =
            serde_json::from_str(r#"{"parent":"7","parentType":"Post","page":"1","perPage":"5"}"#)
                .unwrap();
        assert_eq!(q.page_params(), (Some("1"), Some("5")));
    }

    #[test]
    fn test_page_values_are_not_parsed_early() {
        let q: ReactionsQuery =
            serde_json::from_str(r#"{"parent":"7","parentType":"Post","perPage":"abc"}"#).unwrap();
        assert!(q.validate().is_ok());
        assert_eq!(q.page_params(), (None, Some("abc")));
    }

    #[test]
    fn test_unknown_parent_type_is_validation_error() {
        let err = query("42", "Comment").parent_ref().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "unknown parent type: Comment");
    }

    #[test]
    fn test_malformed_parent_id() {
        let err = query("forty-two", "Post").parent_ref().unwrap_err();
        assert!(err.is_validation());

        assert!(query("", "Post").validate().is_err());
        assert!(query("123456789012345678901", "Post").validate().is_err());
    }

    #[test]
    fn test_reaction_path() {
        let path = ReactionPath {
            parent_type: "Post".to_string(),
            parent_id: "9".to_string(),
            reaction_type: Some("like".to_string()),
        };
        assert!(path.validate().is_ok());
        assert_eq!(path.parent_ref().unwrap(), ParentRef::post(EntityId::new(9)));

        let path = ReactionPath {
            reaction_type: Some(String::new()),
            ..path
        };
        assert!(path.validate().is_err());
    }
}
