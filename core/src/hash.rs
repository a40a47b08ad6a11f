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

//! Hash related utils and the pluggable [`HashProvider`] engine.

use crate::{Error, Result};
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use log::warn;
use md5::Md5;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sha2::Digest;
use sha2::Sha256;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::str::FromStr;
use std::sync::Arc;

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Base64 decode
pub fn base64_decode(content: &str) -> Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(content)
        .map_err(|e| Error::unexpected("base64 decode failed").with_source(e))
}

/// Upper-case hex encoded SHA256 hash.
///
/// Use this function instead of `hex::encode_upper(sha256(content))` can
/// reduce extra copy.
pub fn hex_sha256(content: &[u8]) -> String {
    hex::encode_upper(Sha256::digest(content).as_slice())
}

/// Upper-case hex encoded MD5 hash.
pub fn hex_md5(content: &[u8]) -> String {
    hex::encode_upper(Md5::digest(content).as_slice())
}

/// HashType selects the digest used to identify annotated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashType {
    /// Content is passed through unchanged.
    #[serde(rename = "none")]
    NoHash,
    /// MD5 digest.
    #[serde(rename = "md5")]
    MD5Hash,
    /// SHA-256 digest.
    #[serde(rename = "sha256")]
    SHA256Hash,
}

impl HashType {
    /// The wire name of this hash type.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashType::NoHash => "none",
            HashType::MD5Hash => "md5",
            HashType::SHA256Hash => "sha256",
        }
    }

    /// Derive `content` with the built-in provider for this hash type.
    pub fn derive(&self, content: &[u8]) -> Result<String> {
        Ok(DEFAULT_FACTORY.get_provider(*self)?.derive(content))
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(HashType::NoHash),
            "md5" => Ok(HashType::MD5Hash),
            "sha256" => Ok(HashType::SHA256Hash),
            v => Err(Error::config_invalid(format!("unsupported hash type {v}"))),
        }
    }
}

/// HashProvider turns arbitrary content into its textual digest.
///
/// Implementations must be stateless: the same bytes always produce the same
/// output, whatever was derived before.
pub trait HashProvider: Debug + Send + Sync + 'static {
    /// Derive the textual digest of `content`.
    fn derive(&self, content: &[u8]) -> String;
}

/// Identity provider used by [`HashType::NoHash`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneProvider;

impl HashProvider for NoneProvider {
    fn derive(&self, content: &[u8]) -> String {
        match std::str::from_utf8(content) {
            Ok(v) => v.to_string(),
            Err(err) => {
                warn!("content is not valid utf-8, passing it through lossily: {err}");
                String::from_utf8_lossy(content).into_owned()
            }
        }
    }
}

/// Provider used by [`HashType::MD5Hash`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Provider;

impl HashProvider for Md5Provider {
    fn derive(&self, content: &[u8]) -> String {
        hex_md5(content)
    }
}

/// Provider used by [`HashType::SHA256Hash`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Provider;

impl HashProvider for Sha256Provider {
    fn derive(&self, content: &[u8]) -> String {
        hex_sha256(content)
    }
}

static DEFAULT_FACTORY: Lazy<HashProviderFactory> = Lazy::new(HashProviderFactory::new);

/// HashProviderFactory maps a [`HashType`] to its [`HashProvider`].
///
/// The registry is built once and only read afterwards, so providers are
/// shared between callers.
#[derive(Debug, Clone)]
pub struct HashProviderFactory {
    providers: HashMap<HashType, Arc<dyn HashProvider>>,
}

impl Default for HashProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl HashProviderFactory {
    /// Create a factory with the built-in providers registered.
    pub fn new() -> Self {
        Self::empty()
            .register(HashType::NoHash, NoneProvider)
            .register(HashType::MD5Hash, Md5Provider)
            .register(HashType::SHA256Hash, Sha256Provider)
    }

    /// Create a factory without any provider.
    pub fn empty() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register `provider` for `tag`, replacing any previous one.
    pub fn register(mut self, tag: HashType, provider: impl HashProvider) -> Self {
        self.providers.insert(tag, Arc::new(provider));
        self
    }

    /// Get the provider registered for `tag`.
    pub fn get_provider(&self, tag: HashType) -> Result<Arc<dyn HashProvider>> {
        self.providers
            .get(&tag)
            .cloned()
            .ok_or_else(|| Error::config_invalid(format!("unsupported hash type {tag}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;
    use rand::distributions::Alphanumeric;
    use rand::Rng;
    use test_case::test_case;

    #[test]
    fn test_none_provider_returns_same_string() {
        let sut = HashProviderFactory::new()
            .get_provider(HashType::NoHash)
            .expect("provider must exist");

        for _ in 0..10 {
            let input: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(64)
                .map(char::from)
                .collect();

            assert_eq!(sut.derive(input.as_bytes()), input);
        }
    }

    #[test]
    fn test_none_provider_keeps_utf8_and_flags_invalid_bytes() {
        let _ = env_logger::builder().is_test(true).try_init();

        assert_eq!(NoneProvider.derive("héllo wörld".as_bytes()), "héllo wörld");
        assert_eq!(NoneProvider.derive(&[0x61, 0xff, 0x62]), "a\u{fffd}b");
    }

    #[test_case(HashType::SHA256Hash, "alvarium is the best", "DD22AA6A8CF771E812349DA134CB266471DEBB549B0E2908091C61B1C47FA853"; "sha256 alvarium")]
    #[test_case(HashType::SHA256Hash, "foo bar", "FBC1A9F858EA9E177916964BD88C3D37B91A1E84412765E29950777F265C4B75"; "sha256 foo bar")]
    #[test_case(HashType::MD5Hash, "alvarium is the best", "8F907CCF83C58F0D8E84BABA9DF0DBB7"; "md5 alvarium")]
    #[test_case(HashType::MD5Hash, "foo bar", "327B6F07435811239BC47E1544353273"; "md5 foo bar")]
    fn test_provider_vectors(tag: HashType, input: &str, expected: &str) {
        let sut = HashProviderFactory::new()
            .get_provider(tag)
            .expect("provider must exist");

        assert_eq!(sut.derive(input.as_bytes()), expected);
        // Deterministic across repeated calls.
        assert_eq!(sut.derive(input.as_bytes()), expected);
    }

    #[test]
    fn test_derive_through_hash_type() {
        let v = HashType::SHA256Hash
            .derive(b"foo bar")
            .expect("derive must succeed");
        assert_eq!(
            v,
            "FBC1A9F858EA9E177916964BD88C3D37B91A1E84412765E29950777F265C4B75"
        );
    }

    #[test_case("none", HashType::NoHash)]
    #[test_case("md5", HashType::MD5Hash)]
    #[test_case("sha256", HashType::SHA256Hash)]
    fn test_hash_type_from_str(input: &str, expected: HashType) {
        assert_eq!(input.parse::<HashType>().expect("must parse"), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test_case("sha1")]
    #[test_case("SHA256")]
    #[test_case("")]
    fn test_hash_type_from_str_unsupported(input: &str) {
        let err = input.parse::<HashType>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.to_string(), format!("unsupported hash type {input}"));
    }

    #[test]
    fn test_unregistered_provider_fails() {
        let factory = HashProviderFactory::empty().register(HashType::MD5Hash, Md5Provider);

        assert!(factory.get_provider(HashType::MD5Hash).is_ok());
        let err = factory.get_provider(HashType::SHA256Hash).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.to_string(), "unsupported hash type sha256");
    }

    #[test]
    fn test_hash_type_serde_names() {
        let v: HashType = serde_json::from_str("\"sha256\"").expect("must parse");
        assert_eq!(v, HashType::SHA256Hash);
        assert_eq!(
            serde_json::to_string(&HashType::NoHash).expect("must serialize"),
            "\"none\""
        );
    }

    #[test]
    fn test_base64_roundtrip_rejects_garbage() {
        assert_eq!(base64_encode(b"hello"), "aGVsbG8=");
        assert!(base64_decode("invalid").is_err());
    }
}
