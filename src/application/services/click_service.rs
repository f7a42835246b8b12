//! Click statistics.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

pub struct ClickService {
    clicks: Arc<dyn ClickRepository>,
}

impl ClickService {
    pub fn new(clicks: Arc<dyn ClickRepository>) -> Self {
        Self { clicks }
    }

    /// Returns the click total for a key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown key.
    pub async fn count_for_key(&self, key: &str) -> Result<i64, AppError> {
        self.clicks.count_by_key(key).await?.ok_or_else(|| {
            AppError::not_found(
                "No short URL registered for this key",
                json!({ "key": key }),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockClickRepository;

    #[tokio::test]
    async fn known_key_returns_count() {
        let mut clicks = MockClickRepository::new();
        clicks
            .expect_count_by_key()
            .withf(|key| key == "f00dcafe")
            .returning(|_| Ok(Some(12)));

        let service = ClickService::new(Arc::new(clicks));
        assert_eq!(service.count_for_key("f00dcafe").await.unwrap(), 12);
    }

    #[tokio::test]
    async fn unknown_key_is_not_found() {
        let mut clicks = MockClickRepository::new();
        clicks.expect_count_by_key().returning(|_| Ok(None));

        let service = ClickService::new(Arc::new(clicks));
        let result = service.count_for_key("missing1").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
