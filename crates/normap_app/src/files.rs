use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context};
use engine_logging::engine_error;
use normap_core::{media_type_for, SelectedFile};

/// Picks a single file the way the upload widget does: `.txt` or `.csv` only.
pub fn select_file(path: &Path) -> anyhow::Result<SelectedFile> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("{} has no usable file name", path.display()))?;

    if media_type_for(name).is_none() {
        engine_error!("File rejected: {}", path.display());
        bail!("unsupported file {name:?}: expected a .txt or .csv file");
    }

    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    SelectedFile::accept(name, bytes).ok_or_else(|| anyhow!("unsupported file {name:?}"))
}
