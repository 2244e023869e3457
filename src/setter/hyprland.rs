use std::path::Path;
use std::process::Command;

use crate::errors::WallpaperError;

/// Apply wallpaper on Hyprland using swww
pub fn apply_wallpaper(path: &Path) -> Result<(), WallpaperError> {
    if which::which("swww").is_err() {
        return Err(WallpaperError::OsApi(
            "swww is not installed; it is required for wallpaper support on Hyprland".to_string(),
        ));
    }

    // Start the daemon if it is not answering queries
    let query = Command::new("swww")
        .arg("query")
        .output()
        .map_err(|e| WallpaperError::OsApi(format!("failed to run swww query: {e}")))?;

    if !query.status.success() {
        Command::new("swww-daemon")
            .spawn()
            .map_err(|e| WallpaperError::OsApi(format!("failed to start swww-daemon: {e}")))?;

        // Give the daemon a moment to start
        std::thread::sleep(std::time::Duration::from_millis(100));
    }

    let output = Command::new("swww")
        .arg("img")
        .arg(path)
        .output()
        .map_err(|e| WallpaperError::OsApi(format!("failed to run swww: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WallpaperError::OsApi(format!(
            "swww failed to set wallpaper: {}",
            stderr.trim()
        )));
    }
    Ok(())
}
