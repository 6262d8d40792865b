//! Upload policy validation
//!
//! The gatekeeper checks that run before any upstream provider call is made:
//! file extension, declared content-type, and size policy. Validation is pure
//! and uncoupled from the staging/filesystem details.

/// Typed rejection reasons for an upload
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("No audio file provided")]
    NoFileProvided,

    #[error("Unsupported file format: .{extension} (allowed: {allowed:?})")]
    UnsupportedFormat {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Unsupported content type: {content_type} (allowed: {allowed:?})")]
    UnsupportedContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}

/// Audio upload validator
///
/// Checks run in order with the first failure winning: extension, declared
/// content-type, size. Presence of the file is established by the multipart
/// extraction before these checks run.
#[derive(Clone, Debug)]
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl UploadValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_content_types,
        }
    }

    /// Validate the filename extension (case-insensitive, substring after the last dot)
    pub fn validate_extension(&self, filename: &str) -> Result<String, ValidationError> {
        let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();

        if !filename.contains('.') || !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::UnsupportedFormat {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(extension)
    }

    /// Validate the declared content type against the allowlist.
    ///
    /// An absent declaration and the generic `application/octet-stream` are
    /// accepted; browsers routinely send those for audio files. MIME
    /// parameters are stripped before comparison.
    pub fn validate_content_type(
        &self,
        content_type: Option<&str>,
    ) -> Result<(), ValidationError> {
        let Some(content_type) = content_type else {
            return Ok(());
        };

        let normalized = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_lowercase();

        if normalized.is_empty() || normalized == "application/octet-stream" {
            return Ok(());
        }

        if !self.allowed_content_types.iter().any(|ct| ct == &normalized) {
            return Err(ValidationError::UnsupportedContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate the byte length against the size limit; the boundary itself is accepted
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::NoFileProvided);
        }

        if size > self.max_file_size {
            return Err(ValidationError::TooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Run all checks in policy order; returns the lowercased extension on acceptance
    pub fn validate(
        &self,
        filename: &str,
        content_type: Option<&str>,
        size: usize,
    ) -> Result<String, ValidationError> {
        let extension = self.validate_extension(filename)?;
        self.validate_content_type(content_type)?;
        self.validate_file_size(size)?;
        Ok(extension)
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }
}

/// MIME type to declare when relaying audio upstream, keyed by extension.
pub fn mime_type_for_extension(extension: &str) -> &'static str {
    match extension {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        "ogg" => "audio/ogg",
        "aac" => "audio/aac",
        _ => "application/octet-stream",
    }
}

/// Sanitize filename to prevent path traversal and invalid characters.
/// Returns an error if the filename contains path traversal attempts.
pub fn sanitize_filename(filename: &str) -> Result<String, ValidationError> {
    const MAX_FILENAME_LENGTH: usize = 255;

    let path = std::path::Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if filename_only.contains("..") {
        return Err(ValidationError::InvalidFilename(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim().is_empty() || sanitized.len() < 3 {
        return Ok("audio".to_string());
    }

    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: usize = 1024 * 1024;

    fn test_validator() -> UploadValidator {
        UploadValidator::new(
            25 * MIB,
            vec![
                "mp3".to_string(),
                "wav".to_string(),
                "m4a".to_string(),
                "flac".to_string(),
            ],
            vec![
                "audio/mpeg".to_string(),
                "audio/wav".to_string(),
                "audio/x-m4a".to_string(),
                "audio/flac".to_string(),
            ],
        )
    }

    #[test]
    fn validate_extension_accepts_allowlist_case_insensitive() {
        let validator = test_validator();
        assert_eq!(validator.validate_extension("meeting.mp3").unwrap(), "mp3");
        assert_eq!(validator.validate_extension("meeting.MP3").unwrap(), "mp3");
        assert_eq!(validator.validate_extension("a.b.FLAC").unwrap(), "flac");
    }

    #[test]
    fn validate_extension_rejects_unsupported_formats() {
        let validator = test_validator();
        for name in ["notes.txt", "video.mp4", "archive.zip", "meeting.ogg"] {
            assert!(matches!(
                validator.validate_extension(name),
                Err(ValidationError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn validate_extension_rejects_missing_extension_as_unsupported() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_extension("noextension"),
            Err(ValidationError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn validate_file_size_boundary_is_accepted() {
        let validator = test_validator();
        assert!(validator.validate_file_size(25 * MIB).is_ok());
        assert!(matches!(
            validator.validate_file_size(25 * MIB + 1),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn validate_file_size_empty_is_no_file() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_file_size(0),
            Err(ValidationError::NoFileProvided)
        ));
    }

    #[test]
    fn validate_content_type_allows_generic_and_absent() {
        let validator = test_validator();
        assert!(validator.validate_content_type(None).is_ok());
        assert!(validator
            .validate_content_type(Some("application/octet-stream"))
            .is_ok());
        assert!(validator.validate_content_type(Some("audio/mpeg")).is_ok());
        assert!(validator
            .validate_content_type(Some("AUDIO/MPEG; charset=binary"))
            .is_ok());
    }

    #[test]
    fn validate_content_type_rejects_mismatched_declarations() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_content_type(Some("text/plain")),
            Err(ValidationError::UnsupportedContentType { .. })
        ));
    }

    #[test]
    fn validate_runs_checks_in_policy_order() {
        let validator = test_validator();
        // Bad extension AND oversized: extension check wins.
        assert!(matches!(
            validator.validate("notes.txt", None, 30 * MIB),
            Err(ValidationError::UnsupportedFormat { .. })
        ));
        // Good extension, oversized: size check fires.
        assert!(matches!(
            validator.validate("meeting.mp3", None, 30 * MIB),
            Err(ValidationError::TooLarge { .. })
        ));
        assert_eq!(
            validator
                .validate("meeting.mp3", Some("audio/mpeg"), 10 * MIB)
                .unwrap(),
            "mp3"
        );
    }

    #[test]
    fn mime_type_covers_supported_extensions() {
        assert_eq!(mime_type_for_extension("mp3"), "audio/mpeg");
        assert_eq!(mime_type_for_extension("m4a"), "audio/mp4");
        assert_eq!(mime_type_for_extension("xyz"), "application/octet-stream");
    }

    #[test]
    fn sanitize_filename_rejects_path_traversal() {
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("foo/../bar.mp3").is_err());
        assert!(sanitize_filename("....").is_err());
    }

    #[test]
    fn sanitize_filename_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_filename("meeting.mp3").unwrap(), "meeting.mp3");
        assert_eq!(
            sanitize_filename("/tmp/standup notes.wav").unwrap(),
            "standup_notes.wav"
        );
        assert_eq!(sanitize_filename("a").unwrap(), "audio");
    }
}
