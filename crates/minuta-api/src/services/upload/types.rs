//! Types shared by the upload pipeline

/// File that passed the gatekeeper checks
#[derive(Debug, Clone)]
pub struct ValidatedAudio {
    pub data: Vec<u8>,
    pub original_filename: String,
    pub safe_filename: String,
    pub content_type: Option<String>,
    pub extension: String,
}

impl ValidatedAudio {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
