use std::io;
use std::process::{Command, ExitStatus};
use std::thread::{self, JoinHandle};

use super::UiLinkOpener;

/// Opens links in the system browser.
pub struct DesktopLinkOpener;

impl DesktopLinkOpener {
    fn command(url: &str) -> Command {
        #[cfg(target_os = "macos")]
        {
            let mut command = Command::new("open");
            command.arg(url);
            command
        }
        #[cfg(target_os = "windows")]
        {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", "", url]);
            command
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let mut command = Command::new("xdg-open");
            command.arg(url);
            command
        }
    }
}

/// Start `command` and wait for it on a background thread so the child is reaped.
fn launch(mut command: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command.spawn()?;
    Ok(thread::spawn(move || {
        let status = child.wait();
        if let Err(err) = &status {
            tracing::warn!(error = %err, "link opener did not exit cleanly");
        }
        status
    }))
}

impl UiLinkOpener for DesktopLinkOpener {
    fn open_url(&self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        if let Err(err) = launch(Self::command(url)) {
            tracing::warn!(%url, error = %err, "could not open link in the system browser");
        }
    }
}
