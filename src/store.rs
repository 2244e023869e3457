use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::Naming;
use crate::errors::WallpaperError;

// Same-second double runs are the only realistic collision source for
// unique naming; anything past this is a stuck scheduler.
const MAX_NAME_COLLISIONS: u32 = 100;

/// Create a directory and all of its parents, succeeding silently if present.
pub fn prepare_dir(dir: &Path) -> Result<(), WallpaperError> {
    fs::create_dir_all(dir).map_err(|e| classify_io(dir, e))
}

pub fn image_filename(naming: Naming, now: &DateTime<Local>) -> String {
    match naming {
        Naming::Daily => format!("{}.jpg", now.format("%Y-%m-%d")),
        Naming::Unique => format!("Bing_{}.jpg", now.format("%Y%m%d_%H%M%S")),
    }
}

/// Destination of today's wallpaper under daily naming.
pub fn todays_file(images_dir: &Path, now: &DateTime<Local>) -> PathBuf {
    images_dir.join(image_filename(Naming::Daily, now))
}

/// Write the downloaded bytes under the configured naming policy and return
/// the absolute path of the written file.
///
/// Daily naming refuses to replace an existing same-day file unless
/// `overwrite` is set; the refusal happens at open time via `create_new`, so
/// a file appearing after the caller's pre-check still fails instead of
/// being clobbered. Unique naming appends a numeric suffix on collision and
/// never overwrites.
pub fn save_image(
    images_dir: &Path,
    naming: Naming,
    overwrite: bool,
    now: &DateTime<Local>,
    bytes: &[u8],
) -> Result<PathBuf, WallpaperError> {
    match naming {
        Naming::Daily => {
            let path = images_dir.join(image_filename(naming, now));
            if overwrite {
                fs::write(&path, bytes).map_err(|e| classify_io(&path, e))?;
            } else {
                write_new(&path, bytes)?;
            }
            absolute(&path)
        }
        Naming::Unique => {
            let stem = now.format("%Y%m%d_%H%M%S").to_string();
            let mut candidate = images_dir.join(format!("Bing_{stem}.jpg"));
            let mut attempt = 0u32;
            loop {
                match write_new(&candidate, bytes) {
                    Ok(()) => return absolute(&candidate),
                    Err(WallpaperError::AlreadyExists(path)) => {
                        attempt += 1;
                        if attempt > MAX_NAME_COLLISIONS {
                            return Err(WallpaperError::AlreadyExists(path));
                        }
                        candidate = images_dir.join(format!("Bing_{stem}_{attempt}.jpg"));
                    }
                    Err(other) => return Err(other),
                }
            }
        }
    }
}

/// Resolve a path against the current directory without touching the filesystem.
pub fn absolute(path: &Path) -> Result<PathBuf, WallpaperError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn write_new(path: &Path, bytes: &[u8]) -> Result<(), WallpaperError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                WallpaperError::AlreadyExists(path.to_path_buf())
            } else {
                classify_io(path, e)
            }
        })?;
    file.write_all(bytes).map_err(|e| classify_io(path, e))
}

fn classify_io(path: &Path, err: std::io::Error) -> WallpaperError {
    if err.kind() == ErrorKind::PermissionDenied {
        WallpaperError::PermissionDenied(format!("{}: {}", path.display(), err))
    } else {
        WallpaperError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 5, 12, 30, 45).unwrap()
    }

    #[test]
    fn daily_filenames_use_the_calendar_date() {
        assert_eq!(image_filename(Naming::Daily, &clock()), "2026-08-05.jpg");
    }

    #[test]
    fn unique_filenames_use_the_full_timestamp() {
        assert_eq!(
            image_filename(Naming::Unique, &clock()),
            "Bing_20260805_123045.jpg"
        );
    }

    #[test]
    fn prepare_dir_is_idempotent() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("images").join("deep");
        prepare_dir(&nested).unwrap();
        prepare_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn daily_save_refuses_to_replace_todays_file() {
        let dir = tempdir().unwrap();
        let now = clock();

        let first = save_image(dir.path(), Naming::Daily, false, &now, b"original").unwrap();
        assert!(first.is_absolute());

        let second = save_image(dir.path(), Naming::Daily, false, &now, b"replacement");
        assert!(matches!(second, Err(WallpaperError::AlreadyExists(_))));

        // the first file must be left byte-for-byte intact
        assert_eq!(fs::read(&first).unwrap(), b"original");
    }

    #[test]
    fn daily_save_with_overwrite_replaces_the_file() {
        let dir = tempdir().unwrap();
        let now = clock();

        save_image(dir.path(), Naming::Daily, false, &now, b"original").unwrap();
        let replaced = save_image(dir.path(), Naming::Daily, true, &now, b"replacement").unwrap();

        assert_eq!(fs::read(&replaced).unwrap(), b"replacement");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn unique_save_suffixes_same_second_collisions() {
        let dir = tempdir().unwrap();
        let now = clock();

        let first = save_image(dir.path(), Naming::Unique, false, &now, b"run one").unwrap();
        let second = save_image(dir.path(), Naming::Unique, false, &now, b"run two").unwrap();
        let third = save_image(dir.path(), Naming::Unique, false, &now, b"run three").unwrap();

        assert!(first.ends_with("Bing_20260805_123045.jpg"));
        assert!(second.ends_with("Bing_20260805_123045_1.jpg"));
        assert!(third.ends_with("Bing_20260805_123045_2.jpg"));
        assert_eq!(fs::read(&first).unwrap(), b"run one");
        assert_eq!(fs::read(&second).unwrap(), b"run two");
        assert_eq!(fs::read(&third).unwrap(), b"run three");
    }

    #[test]
    fn todays_file_matches_daily_naming() {
        let dir = tempdir().unwrap();
        let expected = dir.path().join("2026-08-05.jpg");
        assert_eq!(todays_file(dir.path(), &clock()), expected);
    }
}
