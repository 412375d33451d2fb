use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "EMP-001",
        "name": "John Doe",
        "department": "Engineering",
        "is_active": true
    })
)]
pub struct Employee {
    /// Stable unique identifier, e.g. "EMP-001".
    #[schema(example = "EMP-001")]
    pub id: String,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "Engineering")]
    pub department: String,

    /// Inactive employees are excluded from attendance derivation.
    #[schema(example = true)]
    pub is_active: bool,
}
