// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Represents errors that can occur while operating on the autocomplete index
#[derive(Debug)]
pub enum Error {
    /// Node pool allocation failed
    OutOfMemory,

    /// Key (plus NUL terminator) exceeded `MAX_KEY_LEN + 1` bytes
    KeyTooLong,

    /// Key was not present in the tree
    NotFound,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "node pool allocation failed"),
            Self::KeyTooLong => write!(f, "key exceeds maximum length"),
            Self::NotFound => write!(f, "key not found"),
        }
    }
}

impl std::error::Error for Error {}

/// Index result
pub type Result<T> = std::result::Result<T, Error>;
