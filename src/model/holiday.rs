use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "9f1c7a1e-0b9f-4a8e-9a2d-1d2e3f4a5b6c",
        "date": "2026-12-25",
        "name": "Christmas Day",
        "description": "Office closed",
        "is_sunday": false
    })
)]
pub struct Holiday {
    pub id: String,

    /// At most one holiday may exist per calendar date.
    #[schema(example = "2026-12-25", format = "date", value_type = String)]
    pub date: NaiveDate,

    #[schema(example = "Christmas Day")]
    pub name: String,

    #[schema(example = "Office closed")]
    pub description: String,

    /// Set for the auto-generated weekly Sunday holidays.
    #[schema(example = false)]
    pub is_sunday: bool,
}
