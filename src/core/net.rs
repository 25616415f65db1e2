//! Response bodies, optionally captured as test fixtures.

/// Read the body of `resp` as text.
///
/// With the `test-mode` feature and `IR_RECORD=1`, the body is also written to
/// `<IR_FIXDIR>/<endpoint>_<key>.<ext>` (default `tests/fixtures`), which is the
/// layout the integration tests read fixtures from.
pub(crate) async fn read_body(
    resp: reqwest::Response,
    endpoint: &str,
    key: &str,
    ext: &str,
) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(feature = "test-mode")]
    recorder::capture(&recorder::fixture_name(endpoint, key, ext), &text);
    #[cfg(not(feature = "test-mode"))]
    let _ = (endpoint, key, ext);

    Ok(text)
}

#[cfg(feature = "test-mode")]
mod recorder {
    use std::path::PathBuf;
    use std::{env, fs};

    pub(super) fn fixture_name(endpoint: &str, key: &str, ext: &str) -> String {
        let key: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("{endpoint}_{key}.{ext}")
    }

    pub(super) fn capture(name: &str, body: &str) {
        if !env::var("IR_RECORD").is_ok_and(|v| v == "1") {
            return;
        }
        let dir = env::var_os("IR_FIXDIR").map_or_else(
            || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"),
            PathBuf::from,
        );
        let path = dir.join(name);
        match fs::create_dir_all(&dir).and_then(|()| fs::write(&path, body)) {
            Ok(()) => tracing::debug!(path = %path.display(), "recorded fixture"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to record fixture"),
        }
    }

}
