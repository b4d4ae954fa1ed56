//! Core types shared by every Stockroom crate.
//!
//! - [`Product`] / [`NewProduct`]: the persisted entity and its insert form.
//! - [`CreateProductRequest`]: validation of uploads before any store is
//!   touched, including content sniffing via [`sniff_content_type`].
//! - [`Pagination`]: lenient page/limit normalisation.
//! - [`Event`]: notification payloads.

use std::time::Duration;

pub mod error;
pub mod event;
pub mod pagination;
pub mod product;
pub mod sniff;
pub mod upload;

pub use error::ValidationError;
pub use event::{Event, PRODUCT_CREATED_TOPIC};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, Pagination};
pub use product::{NewProduct, Product, ProductId};
pub use sniff::sniff_content_type;
pub use upload::{
    CreateProductRequest, MAX_NAME_LEN, UploadedFile, ValidatedUpload, blob_key_for,
    validate_name,
};

/// How long a cache token stays resolvable after creation.
pub const CACHE_TTL: Duration = Duration::from_secs(60);
