//! Page envelope parsing for the catalog API.
//!
//! The backend wraps each product page in a JSON envelope:
//!
//! ```text
//! {"products": [...], "has_more": true, "next_cursor": "b2Zmc2V0PTUw"}
//! ```
//!
//! The envelope field names vary between app versions, so they are read from
//! [`ResponseShape`] configuration rather than baked into serde derives. The
//! items themselves stay as raw [`serde_json::Value`]s here; interpretation
//! of individual item fields is `normalize`'s job.

use kirana_core::ResponseShape;
use serde_json::Value;

use crate::error::CatalogError;

/// One page of raw catalog items as returned by the backend.
///
/// Consumed immediately by the paginator and discarded; raw items are never
/// stored beyond normalization.
#[derive(Debug)]
pub struct RawPage {
    /// Raw product objects in backend order.
    pub items: Vec<Value>,
    /// Whether the backend reports more pages after this one.
    pub has_more: bool,
    /// Opaque token identifying the next page. The backend has been observed
    /// to send both strings and bare integers (offset-style); integers are
    /// stringified so the rest of the pipeline sees one cursor type.
    pub next_cursor: Option<String>,
}

impl RawPage {
    /// Interprets a parsed JSON body as a catalog page using the configured
    /// envelope field names.
    ///
    /// `has_more` defaults to `false` when the field is absent or not a
    /// boolean; an absent indicator means the page is treated as the last
    /// one rather than risking an unbounded walk.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedResponse`] when the body is not a
    /// JSON object or the items field is missing or not an array.
    pub fn from_body(
        body: Value,
        shape: &ResponseShape,
        context: &str,
    ) -> Result<Self, CatalogError> {
        let Value::Object(mut map) = body else {
            return Err(CatalogError::MalformedResponse {
                context: context.to_string(),
                reason: "response body is not a JSON object".to_string(),
            });
        };

        let items = match map.remove(&shape.items_field) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(CatalogError::MalformedResponse {
                    context: context.to_string(),
                    reason: format!("field \"{}\" is not an array", shape.items_field),
                })
            }
            None => {
                return Err(CatalogError::MalformedResponse {
                    context: context.to_string(),
                    reason: format!("missing items field \"{}\"", shape.items_field),
                })
            }
        };

        let has_more = map
            .get(&shape.has_more_field)
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let next_cursor = map.get(&shape.next_cursor_field).and_then(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Ok(Self {
            items,
            has_more,
            next_cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape() -> ResponseShape {
        ResponseShape::default()
    }

    #[test]
    fn parses_full_envelope() {
        let body = json!({
            "products": [{"id": "p-1"}, {"id": "p-2"}],
            "has_more": true,
            "next_cursor": "abc123"
        });
        let page = RawPage::from_body(body, &shape(), "page 1").expect("page should parse");
        assert_eq!(page.items.len(), 2);
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("abc123"));
    }

    #[test]
    fn integer_cursor_is_stringified() {
        let body = json!({"products": [], "has_more": true, "next_cursor": 50});
        let page = RawPage::from_body(body, &shape(), "page 1").expect("page should parse");
        assert_eq!(page.next_cursor.as_deref(), Some("50"));
    }

    #[test]
    fn absent_has_more_defaults_to_false() {
        let body = json!({"products": [{"id": "p-1"}]});
        let page = RawPage::from_body(body, &shape(), "page 1").expect("page should parse");
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn empty_string_cursor_is_none() {
        let body = json!({"products": [], "has_more": false, "next_cursor": ""});
        let page = RawPage::from_body(body, &shape(), "page 1").expect("page should parse");
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn missing_items_field_is_malformed() {
        let body = json!({"has_more": false});
        let err = RawPage::from_body(body, &shape(), "page 1").unwrap_err();
        assert!(
            matches!(err, CatalogError::MalformedResponse { ref reason, .. } if reason.contains("products")),
            "expected MalformedResponse naming the items field, got: {err:?}"
        );
    }

    #[test]
    fn non_array_items_field_is_malformed() {
        let body = json!({"products": "not-a-list"});
        let err = RawPage::from_body(body, &shape(), "page 1").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedResponse { .. }));
    }

    #[test]
    fn non_object_body_is_malformed() {
        let err = RawPage::from_body(json!([1, 2, 3]), &shape(), "page 1").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedResponse { .. }));
    }

    #[test]
    fn custom_shape_names_are_honored() {
        let custom = ResponseShape {
            items_field: "items".to_string(),
            has_more_field: "hasMore".to_string(),
            next_cursor_field: "nextPageToken".to_string(),
        };
        let body = json!({"items": [{}], "hasMore": true, "nextPageToken": "t-9"});
        let page = RawPage::from_body(body, &custom, "page 1").expect("page should parse");
        assert_eq!(page.items.len(), 1);
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("t-9"));
    }
}
