use std::path::Path;
use std::process::Command;

use crate::errors::WallpaperError;

pub fn apply_wallpaper(path: &Path) -> Result<(), WallpaperError> {
    // swaymsg output "*" bg <path> fill
    let command = format!("output \"*\" bg \"{}\" fill", path.display());
    let output = Command::new("swaymsg")
        .arg(&command)
        .output()
        .map_err(|e| WallpaperError::OsApi(format!("failed to run swaymsg: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WallpaperError::OsApi(format!(
            "swaymsg failed: {}",
            stderr.trim()
        )));
    }
    Ok(())
}
