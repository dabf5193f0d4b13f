use std::time::Duration;

use anyhow::{bail, Context};
use normap_engine::{SubmitSettings, DEFAULT_BACKEND_URL};

/// Environment variable holding the service base URL.
pub const BACKEND_URL_ENV: &str = "NORMAP_BACKEND_URL";

#[derive(Debug, Clone)]
pub struct Settings {
    pub submit: SubmitSettings,
}

impl Settings {
    /// Resolves the service address once at startup, falling back to the
    /// local development server.
    pub fn resolve(backend_url: Option<&str>, timeout_secs: Option<u64>) -> anyhow::Result<Self> {
        let raw = backend_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BACKEND_URL);

        let parsed =
            url::Url::parse(raw).with_context(|| format!("invalid backend url {raw:?}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("backend url must be http or https, got {raw:?}");
        }

        let mut submit = SubmitSettings::with_base_url(raw.trim_end_matches('/'));
        submit.request_timeout = timeout_secs.map(Duration::from_secs);
        Ok(Self { submit })
    }
}
