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

//! Core components for provenance annotations.
//!
//! This crate provides the foundational types and traits of the alvarium
//! ecosystem: the values annotators are configured with, the context they
//! read, and the annotations they produce.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds implementations for file reading and environment access
//! - **PropertyBag**: The typed, read-only input handed to an annotator on each call
//! - **Annotator**: The trait every verification implements, turning a bag plus data into an [`Annotation`]
//! - **HashProvider**: Pluggable digests selected by [`HashType`]
//!
//! ## Example
//!
//! ```
//! use alvarium_core::{Annotation, AnnotationType, Annotator, HashType, PropertyBag, Result};
//!
//! // An annotator that is satisfied whenever the caller provided some text.
//! #[derive(Debug)]
//! struct HasText;
//!
//! impl Annotator for HasText {
//!     fn execute(&self, ctx: &PropertyBag, data: &[u8]) -> Result<Annotation> {
//!         let satisfied = ctx.text(AnnotationType::Source).is_ok();
//!         let hash = HashType::SHA256Hash.derive(data)?;
//!         Ok(Annotation::new(AnnotationType::Source, hash, "localhost", satisfied))
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let bag = PropertyBag::builder()
//!     .with(AnnotationType::Source, "sensor-1".to_string())
//!     .build();
//! let annotation = HasText.execute(&bag, b"foo bar")?;
//! assert!(annotation.is_satisfied());
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Hash providers and encoding helpers
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub use hash::{HashProvider, HashProviderFactory, HashType};
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod context;
pub use context::{Context, Env, FileRead, NoopEnv, NoopFileRead, OsEnv, StaticEnv};
mod sign;
pub use sign::{KeyInfo, SignType, SignatureInfo};
mod annotation;
pub use annotation::{Annotation, AnnotationType};
mod bag;
pub use bag::{PropertyBag, PropertyBagBuilder, PropertyValue};
mod config;
pub use config::{HashInfo, SdkInfo, ALVARIUM_CONFIG_FILE};
mod api;
pub use api::Annotator;
