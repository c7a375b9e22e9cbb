use super::dto::Nutrient;
use crate::backend::BackendClient;
use crate::error::ApiError;

impl BackendClient {
    pub async fn list_nutrients(&self, token: &str) -> Result<Vec<Nutrient>, ApiError> {
        self.get_json(token, "/api/nutrients").await
    }

    pub async fn nutrients_by_category(
        &self,
        token: &str,
        category: &str,
    ) -> Result<Vec<Nutrient>, ApiError> {
        self.get_json(token, &format!("/api/nutrients/category/{category}"))
            .await
    }
}
