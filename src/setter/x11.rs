use std::path::Path;
use std::process::Command;

use crate::errors::WallpaperError;

pub fn apply_wallpaper(path: &Path) -> Result<(), WallpaperError> {
    let output = Command::new("feh")
        .arg("--bg-fill")
        .arg(path)
        .output()
        .map_err(|e| WallpaperError::OsApi(format!("failed to run feh: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WallpaperError::OsApi(format!(
            "feh failed: {}",
            stderr.trim()
        )));
    }
    Ok(())
}
