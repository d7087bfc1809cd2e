//! Sysfs access — `LedIo` trait + real backend + in-memory mock.
//!
//! Every hardware touch in this crate goes through [`LedIo`]: a scalar
//! decimal write to a `brightness` file, or a short text read from a
//! `color` / `max_brightness` file.

use std::io;
use std::path::Path;

/// Default root of the LED class in sysfs.
pub const LEDS_ROOT: &str = "/sys/class/leds";

/// Scalar read/write access to LED control files.
pub trait LedIo {
    /// Read a control file, with surrounding whitespace trimmed.
    fn read_value(&self, path: &Path) -> io::Result<String>;

    /// Write one integer to a control file.
    fn write_value(&self, path: &Path, value: u32) -> io::Result<()>;

    /// Read a control file and parse it as an unsigned integer.
    fn read_u32(&self, path: &Path) -> io::Result<u32> {
        let text = self.read_value(path)?;
        text.parse::<u32>().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected integer, got {text:?}: {e}"),
            )
        })
    }
}

/// Real sysfs backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysfsIo;

impl LedIo for SysfsIo {
    fn read_value(&self, path: &Path) -> io::Result<String> {
        Ok(std::fs::read_to_string(path)?.trim().to_string())
    }

    fn write_value(&self, path: &Path, value: u32) -> io::Result<()> {
        std::fs::write(path, value.to_string())
    }
}

// ── Mock backend for testing ──

/// In-memory LED files for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::path::PathBuf;

    /// Stores file contents in a HashMap keyed by path; `write_value`
    /// records every write in order and updates the stored contents.
    #[derive(Default)]
    pub struct MockLedIo {
        /// File contents: path → text.
        pub files: RefCell<HashMap<PathBuf, String>>,
        /// Recorded writes: (path, value), in call order.
        pub writes: RefCell<Vec<(PathBuf, u32)>>,
        /// Paths whose writes fail with `PermissionDenied`.
        pub failing: RefCell<HashSet<PathBuf>>,
    }

    impl MockLedIo {
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock laid out like `<root>/led.<N>/color` for each
        /// `(index, marker)` pair, with a `brightness` file next to it.
        pub fn with_rgb_nodes(root: &Path, nodes: &[(u32, &str)]) -> Self {
            let io = Self::new();
            for &(index, marker) in nodes {
                let dir = root.join(format!("led.{index}"));
                io.set_file(dir.join("color"), marker);
                io.set_file(dir.join("brightness"), "0");
            }
            io
        }

        pub fn set_file(&self, path: impl Into<PathBuf>, contents: &str) {
            self.files
                .borrow_mut()
                .insert(path.into(), contents.to_string());
        }

        /// Make every write to `path` fail.
        pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
            self.failing.borrow_mut().insert(path.into());
        }

        /// All values written to `path`, oldest first.
        pub fn writes_to(&self, path: &Path) -> Vec<u32> {
            self.writes
                .borrow()
                .iter()
                .filter(|(p, _)| p == path)
                .map(|&(_, v)| v)
                .collect()
        }

        /// Most recent value written to `path`.
        pub fn last_write(&self, path: &Path) -> Option<u32> {
            self.writes_to(path).last().copied()
        }

        pub fn write_count(&self) -> usize {
            self.writes.borrow().len()
        }

        pub fn clear_writes(&self) {
            self.writes.borrow_mut().clear();
        }
    }

    impl LedIo for MockLedIo {
        fn read_value(&self, path: &Path) -> io::Result<String> {
            self.files
                .borrow()
                .get(path)
                .map(|s| s.trim().to_string())
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "mock: no such file"))
        }

        fn write_value(&self, path: &Path, value: u32) -> io::Result<()> {
            if self.failing.borrow().contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "mock: write failure injected",
                ));
            }
            self.writes.borrow_mut().push((path.to_path_buf(), value));
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), value.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockLedIo;
    use super::*;

    #[test]
    fn sysfs_write_then_read_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brightness");
        SysfsIo.write_value(&path, 128).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "128");
        assert_eq!(SysfsIo.read_u32(&path).unwrap(), 128);
    }

    #[test]
    fn sysfs_read_trims_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("color");
        std::fs::write(&path, "RED\n").unwrap();
        assert_eq!(SysfsIo.read_value(&path).unwrap(), "RED");
    }

    #[test]
    fn sysfs_read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = SysfsIo.read_value(&dir.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn read_u32_rejects_garbage() {
        let io = MockLedIo::new();
        io.set_file("/leds/x/max_brightness", "lots");
        let err = io.read_u32(Path::new("/leds/x/max_brightness")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn mock_records_writes_in_order() {
        let io = MockLedIo::new();
        let p = Path::new("/leds/led.1/brightness");
        io.write_value(p, 1).unwrap();
        io.write_value(p, 2).unwrap();
        assert_eq!(io.writes_to(p), vec![1, 2]);
        assert_eq!(io.last_write(p), Some(2));
        assert_eq!(io.read_u32(p).unwrap(), 2);
    }

    #[test]
    fn mock_injected_failure_does_not_record() {
        let io = MockLedIo::new();
        let p = Path::new("/leds/led.1/brightness");
        io.fail_writes_to(p);
        assert!(io.write_value(p, 9).is_err());
        assert_eq!(io.write_count(), 0);
    }
}
