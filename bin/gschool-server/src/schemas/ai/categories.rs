use crate::entities::CategoryRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub name: String,
    pub blocked: bool,
    pub block_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListCategoriesResponse {
    pub ok: bool,
    pub categories: Vec<CategoryResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpsertCategoryRequest {
    #[validate(
        required(message = "name required"),
        length(min = 1, message = "name required")
    )]
    pub name: Option<String>,
    /// Any JSON value; coerced with truthiness (`1`, `"yes"`, `true` block).
    #[schema(value_type = Option<bool>)]
    pub blocked: Option<Value>,
    pub block_url: Option<String>,
}

impl UpsertCategoryRequest {
    pub fn is_blocked(&self) -> bool {
        self.blocked.as_ref().is_some_and(is_truthy)
    }
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

impl CategoryRecord {
    pub fn to_response(&self) -> CategoryResponse {
        CategoryResponse {
            name: self.name.clone(),
            blocked: self.blocked,
            block_url: self.block_url.clone(),
        }
    }
}
