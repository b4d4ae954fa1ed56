use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned product identifier. Zero means "not created".
pub type ProductId = i64;

/// A persisted product: a display name plus a reference to its image blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    /// Monotonic identifier assigned by the metadata store.
    #[cfg_attr(feature = "openapi", schema(example = 42))]
    pub id: ProductId,
    /// Display name (1 to 255 characters).
    #[cfg_attr(feature = "openapi", schema(example = "Chair"))]
    pub name: String,
    /// Durable reference to the image blob (`endpoint/bucket/key`).
    #[cfg_attr(
        feature = "openapi",
        schema(example = "http://localhost:9000/products/chair.png")
    )]
    pub photo_key: String,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
    /// When the row was last written.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The cache token for this product: its id in string form.
    pub fn cache_token(&self) -> String {
        self.id.to_string()
    }
}

/// A product that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub photo_key: String,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, photo_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            photo_key: photo_key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_token_is_stringified_id() {
        let now = Utc::now();
        let product = Product {
            id: 17,
            name: "Lamp".into(),
            photo_key: "http://minio:9000/products/lamp.png".into(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(product.cache_token(), "17");
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let now = Utc::now();
        let product = Product {
            id: 1,
            name: "Chair".into(),
            photo_key: "http://minio:9000/products/chair.png".into(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Chair");
        assert_eq!(json["photo_key"], "http://minio:9000/products/chair.png");
        assert!(json["created_at"].is_string());
    }
}
