use crate::NormalizedResult;

const DOWNLOAD_PREFIX: &str = "normalized";

/// Pretty-printed JSON of the full result, offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl DownloadArtifact {
    pub fn build(
        result: &NormalizedResult,
        source_name: Option<&str>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            file_name: download_file_name(source_name),
            bytes: serde_json::to_vec_pretty(result)?,
        })
    }
}

/// `normalized_<stem>.json` for a named upload, `normalized.json` otherwise.
pub fn download_file_name(source_name: Option<&str>) -> String {
    match source_name.filter(|name| !name.is_empty()) {
        Some(name) => format!("{DOWNLOAD_PREFIX}_{}.json", strip_extension(name)),
        None => format!("{DOWNLOAD_PREFIX}.json"),
    }
}

/// Drops a trailing `.ext`; a bare trailing dot is not an extension.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() && !name[dot + 1..].contains('/') => &name[..dot],
        _ => name,
    }
}
