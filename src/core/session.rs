//! On-disk persistence of a logged-in session.
//!
//! The file holds two lines: the cookie header the site accepted, then the customer id.
//! A session usually stays valid for a couple of hours, so reusing it skips the
//! login round-trips on the next start.

use std::fs;
use std::path::Path;

use crate::core::IrError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoredSession {
    /// `name=value; name2=value2`
    pub(crate) cookie: String,
    pub(crate) custid: u64,
}

/// Reads a stored session; a missing or malformed file is `None`.
pub(crate) fn load(path: &Path) -> Option<StoredSession> {
    let text = fs::read_to_string(path).ok()?;
    let mut lines = text.lines();
    let cookie = lines.next()?.trim().to_string();
    let custid = lines.next()?.trim().parse().ok()?;
    if cookie.is_empty() {
        return None;
    }
    Some(StoredSession { cookie, custid })
}

pub(crate) fn save(path: &Path, session: &StoredSession) -> Result<(), IrError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, format!("{}\n{}", session.cookie, session.custid))?;
    Ok(())
}
