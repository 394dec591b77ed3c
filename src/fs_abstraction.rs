//! Filesystem abstraction layer for testability
//!
//! The address loader and the results writer only touch the filesystem
//! through [`FileSystem`], so read and write failures can be simulated with
//! the mockall-generated `MockFileSystem` in unit tests.

use std::io;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

/// Trait abstracting filesystem operations for dependency injection.
///
/// # Example (testing)
/// ```ignore
/// use ipshard::fs_abstraction::MockFileSystem;
///
/// let mut mock_fs = MockFileSystem::new();
/// mock_fs.expect_read_to_string()
///     .returning(|_| Ok("10.0.0.1\n".to_string()));
/// ```
#[cfg_attr(test, automock)]
pub trait FileSystem: Send + Sync {
    /// Read file contents as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write bytes to a file, creating it if it doesn't exist.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem implementation using std::fs.
#[derive(Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

static REAL_FS: RealFileSystem = RealFileSystem;

/// Get a reference to the global real filesystem instance.
pub fn real_fs() -> &'static RealFileSystem {
    &REAL_FS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_real_fs_read_write() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("pool.txt");

        let fs = RealFileSystem;
        fs.write(&file_path, b"10.0.0.1\n10.0.0.2\n").unwrap();

        let content = fs.read_to_string(&file_path).unwrap();
        assert_eq!(content, "10.0.0.1\n10.0.0.2\n");
    }

    #[test]
    fn test_real_fs_exists() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("pool.txt");

        let fs = RealFileSystem;
        assert!(!fs.exists(&file_path));

        fs.write(&file_path, b"10.0.0.1").unwrap();
        assert!(fs.exists(&file_path));
    }

    #[test]
    fn test_real_fs_create_dir_all() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("runs/2024/shard-1");

        let fs = RealFileSystem;
        fs.create_dir_all(&nested_path).unwrap();
        assert!(fs.exists(&nested_path));

        // Idempotent
        fs.create_dir_all(&nested_path).unwrap();
    }

    #[test]
    fn test_real_fs_read_nonexistent() {
        let fs = RealFileSystem;
        let result = fs.read_to_string(Path::new("/nonexistent/path/pool.txt"));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_real_fs_read_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("binary.txt");
        std::fs::write(&file_path, [0xffu8, 0xfe, 0x00, 0x41]).unwrap();

        let result = real_fs().read_to_string(&file_path);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_real_fs_write_to_nonexistent_dir() {
        let result = real_fs().write(Path::new("/nonexistent/path/out.txt"), b"x");
        assert!(result.is_err());
    }

    #[test]
    fn test_real_fs_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RealFileSystem>();
    }

    #[test]
    fn test_mock_fs_error_simulation() {
        let mut mock = MockFileSystem::new();
        mock.expect_read_to_string().returning(|_| {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "access denied",
            ))
        });

        let result = mock.read_to_string(Path::new("/any/path"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
    }
}
