use bytes::Bytes;

use crate::error::ValidationError;
use crate::sniff::sniff_content_type;

/// Maximum length of a product display name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// A file received from a client, already read fully into memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as supplied by the client.
    pub filename: String,
    /// Raw file content.
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Input to product creation, before validation.
#[derive(Debug, Clone, Default)]
pub struct CreateProductRequest {
    pub name: String,
    pub file: Option<UploadedFile>,
}

impl CreateProductRequest {
    pub fn new(name: impl Into<String>, file: UploadedFile) -> Self {
        Self {
            name: name.into(),
            file: Some(file),
        }
    }

    /// Validate the request and derive everything needed to store the upload.
    ///
    /// The content type comes from sniffing the bytes, never from client
    /// supplied headers.
    pub fn validate(self) -> Result<ValidatedUpload, ValidationError> {
        validate_name(&self.name)?;
        let file = self.file.ok_or(ValidationError::MissingFile)?;
        let blob_key = blob_key_for(&file.filename)?;
        let content_type = sniff_content_type(&file.data).to_owned();

        Ok(ValidatedUpload {
            name: self.name,
            blob_key,
            content_type,
            data: file.data,
        })
    }
}

/// A create request that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub name: String,
    /// Object key the blob is stored under.
    pub blob_key: String,
    /// Sniffed MIME type.
    pub content_type: String,
    pub data: Bytes,
}

impl ValidatedUpload {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Check that a display name is between 1 and [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyName);
    }
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Derive the blob key from a client filename.
///
/// Only the final path segment is kept. Two uploads with the same filename
/// map to the same key and the later one overwrites the earlier blob.
pub fn blob_key_for(filename: &str) -> Result<String, ValidationError> {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        return Err(ValidationError::InvalidFilename(filename.to_owned()));
    }
    Ok(base.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_name_at_limit() {
        let name = "a".repeat(MAX_NAME_LEN);
        assert!(validate_name(&name).is_ok());
    }

    #[test]
    fn rejects_empty_and_long_names() {
        assert!(matches!(validate_name(""), Err(ValidationError::EmptyName)));
        let name = "é".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            validate_name(&name),
            Err(ValidationError::NameTooLong { len: 256, max: 255 })
        ));
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // 255 two-byte characters is still within the limit.
        let name = "é".repeat(MAX_NAME_LEN);
        assert!(validate_name(&name).is_ok());
    }

    #[test]
    fn blob_key_keeps_final_segment() {
        assert_eq!(blob_key_for("chair.png").unwrap(), "chair.png");
        assert_eq!(blob_key_for("photos/2022/chair.png").unwrap(), "chair.png");
        assert_eq!(blob_key_for(r"C:\Users\me\chair.png").unwrap(), "chair.png");
    }

    #[test]
    fn blob_key_rejects_empty_segments() {
        assert!(blob_key_for("").is_err());
        assert!(blob_key_for("photos/").is_err());
        assert!(blob_key_for("..").is_err());
    }

    #[test]
    fn validate_requires_file() {
        let request = CreateProductRequest {
            name: "Chair".into(),
            file: None,
        };
        assert!(matches!(
            request.validate(),
            Err(ValidationError::MissingFile)
        ));
    }

    #[test]
    fn validate_checks_name_before_file() {
        let request = CreateProductRequest {
            name: String::new(),
            file: None,
        };
        assert!(matches!(request.validate(), Err(ValidationError::EmptyName)));
    }

    #[test]
    fn validate_sniffs_content_type() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec();
        let request = CreateProductRequest::new("Chair", UploadedFile::new("chair.jpg", png));
        let upload = request.validate().unwrap();
        assert_eq!(upload.blob_key, "chair.jpg");
        assert_eq!(upload.content_type, "image/png");
        assert_eq!(upload.size(), 16);
    }
}
