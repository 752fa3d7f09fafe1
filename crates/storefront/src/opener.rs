//! Order link hand-off

use std::{
    io,
    process::{Command, Stdio},
};

use bakehouse::orders::LinkOpener;
use tracing::debug;

/// Opens order links with the platform's default handler, or only reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SystemOpener {
    /// Leave the link in the command output.
    Print,

    /// Launch the link in the default browser.
    Launch,
}

impl SystemOpener {
    pub(crate) fn new(launch: bool) -> Self {
        if launch { Self::Launch } else { Self::Print }
    }
}

impl LinkOpener for SystemOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        match self {
            Self::Print => {
                debug!("not launching order link");

                Ok(())
            }
            Self::Launch => {
                let status = platform_command(url)
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()?;

                debug!(%status, "order link opener exited");

                if status.success() {
                    Ok(())
                } else {
                    Err(io::Error::other(format!("link opener exited with {status}")))
                }
            }
        }
    }
}

/// The platform opener, taking the URL as its final argument and exiting once handed off.
fn platform_command(url: &str) -> Command {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        // url.dll receives the URL verbatim, with no `%VAR%` expansion.
        let mut command = Command::new("rundll32");
        command.arg("url.dll,FileProtocolHandler");
        command
    } else {
        Command::new("xdg-open")
    };

    command.arg(url);
    command
}
