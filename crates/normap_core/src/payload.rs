use crate::InputMode;

/// Name given to pasted text when it is wrapped into an upload.
pub const TEXT_PAYLOAD_NAME: &str = "input.txt";
pub const TEXT_MEDIA_TYPE: &str = "text/plain";
pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// A file handed over by the file picker, kept exactly as selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Applies the picker's accept list (`.txt`, `.csv`). Anything else is
    /// rejected and yields no selection.
    pub fn accept(name: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        let name = name.into();
        let media_type = media_type_for(&name)?;
        Some(Self::new(name, media_type, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Media type for an accepted file name, or `None` if the picker refuses it.
pub fn media_type_for(name: &str) -> Option<&'static str> {
    let (_, extension) = name.rsplit_once('.')?;
    if extension.eq_ignore_ascii_case("txt") {
        Some(TEXT_MEDIA_TYPE)
    } else if extension.eq_ignore_ascii_case("csv") {
        Some(CSV_MEDIA_TYPE)
    } else {
        None
    }
}

/// The single named blob sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl From<SelectedFile> for Payload {
    fn from(file: SelectedFile) -> Self {
        Self {
            name: file.name,
            media_type: file.media_type,
            bytes: file.bytes,
        }
    }
}

/// Builds the upload for the active mode.
///
/// Returns `None` when the mode has nothing to send: whitespace-only text in
/// text mode, or no selection in file mode. Text is sent as typed, untrimmed.
pub fn build_payload(mode: InputMode, text: &str, file: Option<&SelectedFile>) -> Option<Payload> {
    match mode {
        InputMode::Text => {
            if text.trim().is_empty() {
                return None;
            }
            Some(Payload {
                name: TEXT_PAYLOAD_NAME.to_string(),
                media_type: TEXT_MEDIA_TYPE.to_string(),
                bytes: text.as_bytes().to_vec(),
            })
        }
        InputMode::File => file.cloned().map(Payload::from),
    }
}
