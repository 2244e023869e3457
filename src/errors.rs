use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WallpaperError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("download failed after {attempts} attempt(s): {source}")]
    Network {
        attempts: u32,
        source: reqwest::Error,
    },

    #[error("response is not an image (content type {0:?})")]
    InvalidContentType(String),

    #[error("wallpaper already saved for today: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("wallpaper file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("desktop wallpaper API failed: {0}")]
    OsApi(String),

    #[error("no supported wallpaper backend for this platform: {0}")]
    UnsupportedPlatform(String),
}
