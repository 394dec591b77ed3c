//! Error types for ipshard.
//!
//! Every variant maps to its own process exit status so that wrappers
//! (schedulers, CI jobs) can tell failure kinds apart without parsing text.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShardError {
    #[error("Invalid format for --shard '{0}'. Use X/Y")]
    InvalidShardFormat(String),

    #[error("Invalid shard value: {index}/{total}")]
    InvalidShardValue { index: String, total: String },

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Exclude file not found: {}", .0.display())]
    ExcludeNotFound(PathBuf),

    #[error("Error reading {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No valid addresses found in: {}", .0.display())]
    NoAddresses(PathBuf),

    #[error("Unsupported file extension: .{0}. Only .txt format is supported")]
    UnsupportedExtension(String),

    #[error("Failed to write to output file {}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShardError {
    /// Process exit status for this failure kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            ShardError::InvalidShardFormat(_) => 3,
            ShardError::InvalidShardValue { .. } => 4,
            ShardError::InputNotFound(_) => 5,
            ShardError::ExcludeNotFound(_) => 6,
            ShardError::Load { .. } => 7,
            ShardError::NoAddresses(_) => 8,
            ShardError::UnsupportedExtension(_) => 9,
            ShardError::Output { .. } => 10,
            ShardError::Config(_) => 11,
        }
    }
}

/// Exit status for failures that are not a [`ShardError`].
pub const EXIT_UNEXPECTED: u8 = 1;

/// Pick the exit status for an error bubbled up to `main`.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ShardError>()
        .map(ShardError::exit_code)
        .unwrap_or(EXIT_UNEXPECTED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io;

    fn all_variants() -> Vec<ShardError> {
        vec![
            ShardError::InvalidShardFormat("x".into()),
            ShardError::InvalidShardValue {
                index: "0".into(),
                total: "5".into(),
            },
            ShardError::InputNotFound(PathBuf::from("in.txt")),
            ShardError::ExcludeNotFound(PathBuf::from("ex.txt")),
            ShardError::Load {
                path: PathBuf::from("in.txt"),
                source: io::Error::new(io::ErrorKind::InvalidData, "bad utf-8"),
            },
            ShardError::NoAddresses(PathBuf::from("in.txt")),
            ShardError::UnsupportedExtension("csv".into()),
            ShardError::Output {
                path: PathBuf::from("out.txt"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            },
            ShardError::Config("bad".into()),
        ]
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes: HashSet<u8> = all_variants().iter().map(|e| e.exit_code()).collect();
        assert_eq!(codes.len(), all_variants().len());
        assert!(!codes.contains(&0));
        assert!(!codes.contains(&EXIT_UNEXPECTED));
        // 2 is what clap uses for usage errors
        assert!(!codes.contains(&2));
    }

    #[test]
    fn test_exit_code_for_downcasts() {
        let err = anyhow::Error::new(ShardError::NoAddresses(PathBuf::from("a")));
        assert_eq!(exit_code_for(&err), 8);

        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), EXIT_UNEXPECTED);
    }

    #[test]
    fn test_messages_name_the_path() {
        let err = ShardError::InputNotFound(PathBuf::from("/tmp/missing.txt"));
        assert_eq!(err.to_string(), "Input file not found: /tmp/missing.txt");

        let err = ShardError::InvalidShardValue {
            index: "6".into(),
            total: "5".into(),
        };
        assert_eq!(err.to_string(), "Invalid shard value: 6/5");
    }
}
