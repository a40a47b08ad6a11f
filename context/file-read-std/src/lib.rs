// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Blocking file reading implementation for alvarium.
//!
//! This crate provides `StdFileRead`, a file reader that implements the
//! `FileRead` trait from `alvarium_core` on top of `std::fs`.
//!
//! ## Example
//!
//! ```no_run
//! use alvarium_core::{Context, OsEnv};
//! use alvarium_file_read_std::StdFileRead;
//!
//! // Create a context with the std file reader
//! let ctx = Context::new()
//!     .with_file_read(StdFileRead)
//!     .with_env(OsEnv);
//!
//! match ctx.file_read("./keys/public.key") {
//!     Ok(content) => println!("Read {} bytes", content.len()),
//!     Err(e) => eprintln!("Failed to read file: {}", e),
//! }
//! ```

use alvarium_core::{Error, FileRead, Result};
use log::debug;

/// `std::fs` based implementation of the `FileRead` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileRead;

impl FileRead for StdFileRead {
    fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        debug!("reading file {path}");

        std::fs::read(path)
            .map_err(|e| Error::unexpected(format!("failed to read file {path}")).with_source(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alvarium_core::Context;
    use std::io::Write;

    #[test]
    fn test_file_read() -> anyhow::Result<()> {
        let mut f = tempfile::NamedTempFile::new()?;
        f.write_all(b"0123456789abcdef")?;

        let ctx = Context::new().with_file_read(StdFileRead);
        let path = f.path().to_string_lossy();
        assert_eq!(ctx.file_read(&path)?, b"0123456789abcdef");
        assert_eq!(ctx.file_read_as_string(&path)?, "0123456789abcdef");
        Ok(())
    }

    #[test]
    fn test_file_read_missing() {
        let err = StdFileRead
            .file_read("/definitely/not/here.key")
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to read file /definitely/not/here.key");
    }
}
