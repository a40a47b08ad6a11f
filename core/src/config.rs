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

use crate::{AnnotationType, Context, Error, HashType, Result, SignatureInfo};
use log::debug;
use serde::{Deserialize, Serialize};

/// Env var pointing at the SDK config file.
pub const ALVARIUM_CONFIG_FILE: &str = "ALVARIUM_CONFIG_FILE";

/// HashInfo selects the hash used to identify annotated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashInfo {
    /// Hash used for annotation hashes.
    #[serde(rename = "type")]
    pub hash_type: HashType,
}

impl HashInfo {
    /// Create a new hash info.
    pub fn new(hash_type: HashType) -> Self {
        Self { hash_type }
    }
}

/// SdkInfo carries all the configuration annotators are built from.
///
/// ```
/// use alvarium_core::{AnnotationType, HashType, SdkInfo};
///
/// let cfg = SdkInfo::from_json(r#"{
///     "annotators": ["pki-http"],
///     "hash": { "type": "sha256" },
///     "signature": {
///         "public": { "type": "ed25519", "path": "./keys/public.key" },
///         "private": { "type": "ed25519", "path": "./keys/private.key" }
///     }
/// }"#).unwrap();
///
/// assert_eq!(cfg.annotators, vec![AnnotationType::PkiHttp]);
/// assert_eq!(cfg.hash.hash_type, HashType::SHA256Hash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkInfo {
    /// Annotation types that are active.
    #[serde(default)]
    pub annotators: Vec<AnnotationType>,
    /// Hash used for annotation hashes.
    pub hash: HashInfo,
    /// Keys used for signing and verification.
    pub signature: SignatureInfo,
}

impl SdkInfo {
    /// Create a new config.
    pub fn new(
        annotators: impl IntoIterator<Item = AnnotationType>,
        hash: HashInfo,
        signature: SignatureInfo,
    ) -> Self {
        Self {
            annotators: annotators.into_iter().collect(),
            hash,
            signature,
        }
    }

    /// Set the hash type.
    pub fn with_hash_type(mut self, hash_type: HashType) -> Self {
        self.hash = HashInfo::new(hash_type);
        self
    }

    /// Set the signature info.
    pub fn with_signature(mut self, signature: SignatureInfo) -> Self {
        self.signature = signature;
        self
    }

    /// Whether `kind` is listed as active.
    pub fn is_enabled(&self, kind: AnnotationType) -> bool {
        self.annotators.contains(&kind)
    }

    /// Parse config from JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse config from TOML.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a file, picking the format by extension.
    ///
    /// Files ending in `.toml` are parsed as TOML, anything else as JSON.
    pub fn from_config_file(ctx: &Context, path: &str) -> Result<Self> {
        debug!("loading sdk config from {path}");

        let content = ctx.file_read_as_string(path).map_err(|e| {
            Error::config_invalid(format!("failed to read config file {path}")).with_source(e)
        })?;

        if path.ends_with(".toml") {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Load config from the file named by `ALVARIUM_CONFIG_FILE`.
    pub fn from_env(ctx: &Context) -> Result<Self> {
        let path = ctx.env_var(ALVARIUM_CONFIG_FILE).ok_or_else(|| {
            Error::config_invalid(format!("env {ALVARIUM_CONFIG_FILE} is not set"))
        })?;

        Self::from_config_file(ctx, &path)
    }
}
