use std::process::Command;

use super::UiLinkOpener;

/// Links that point somewhere outside the page.
///
/// Placeholder links (`#`, `#anchor`) and blanks have nowhere to go.
#[must_use]
pub fn is_navigable(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && !url.starts_with('#')
}

/// Hands URLs to the operating system's default browser.
pub struct DesktopLinkOpener;

impl UiLinkOpener for DesktopLinkOpener {
    fn open_url(&self, url: &str) {
        let url = url.trim();
        if !is_navigable(url) {
            tracing::debug!(url, "skipping placeholder link");
            return;
        }
        #[cfg(target_os = "macos")]
        let spawned = Command::new("open").arg(url).spawn();
        #[cfg(target_os = "windows")]
        let spawned = Command::new("cmd").args(["/C", "start", "", url]).spawn();
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let spawned = Command::new("xdg-open").arg(url).spawn();

        if let Err(err) = spawned {
            tracing::warn!(url, error = %err, "failed to open link");
        }
    }
}
