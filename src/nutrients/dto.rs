use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog entry for a trackable nutrient. Not user-owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nutrient {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub unit: String,
}
