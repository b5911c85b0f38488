//! Windows-only self relaunch into a fresh console window.

use std::io;

/// Passed to the relaunched process so it doesn't relaunch again.
pub const LAUNCH_SENTINEL: &str = "launch_mode";

pub fn should_relaunch(is_windows: bool, sentinel: Option<&str>) -> bool {
    is_windows && sentinel.is_none()
}

/// Start this executable in a new console window with the sentinel argument.
#[cfg(windows)]
pub fn relaunch_in_new_console() -> io::Result<()> {
    use std::process::Command;

    let exe = std::env::current_exe()?;
    let status = Command::new("cmd")
        .args(["/C", "start", "Typing Practice", "cmd", "/k"])
        .arg(exe)
        .arg(LAUNCH_SENTINEL)
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("start exited with {status}")))
    }
}

#[cfg(not(windows))]
pub fn relaunch_in_new_console() -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "relaunching is only supported on windows",
    ))
}
