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

use crate::utils::Redact;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};
use std::path::Path;
use std::str::FromStr;

/// SignType is the signature algorithm family of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignType {
    /// Ed25519 (RFC 8032).
    #[serde(rename = "ed25519")]
    Ed25519,
    /// RSASSA-PKCS1-v1_5 using SHA-256.
    #[serde(rename = "rsa-v1_5-sha256")]
    RsaSha256,
}

impl SignType {
    /// The algorithm name carried in the `alg` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignType::Ed25519 => "ed25519",
            SignType::RsaSha256 => "rsa-v1_5-sha256",
        }
    }
}

impl fmt::Display for SignType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ed25519" => Ok(SignType::Ed25519),
            "rsa-v1_5-sha256" => Ok(SignType::RsaSha256),
            v => Err(Error::config_invalid(format!("Invalid key type {v}"))),
        }
    }
}

/// KeyInfo describes where a key lives and which algorithm it belongs to.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    /// Path to the key material.
    pub path: String,
    /// Algorithm family of the key.
    #[serde(rename = "type")]
    pub sign_type: SignType,
}

impl Debug for KeyInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyInfo")
            .field("path", &Redact::from(&self.path))
            .field("sign_type", &self.sign_type)
            .finish()
    }
}

impl KeyInfo {
    /// Create a new key info.
    pub fn new(path: impl Into<String>, sign_type: SignType) -> Self {
        Self {
            path: path.into(),
            sign_type,
        }
    }

    /// The key identifier advertised to verifiers: the file name of the key.
    pub fn key_id(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|v| v.to_str())
            .unwrap_or(&self.path)
    }

    /// Resolve `key_id` to a path next to this key.
    ///
    /// Key ids never escape the directory of the configured key: anything
    /// other than a plain file name resolves to `None`.
    pub fn sibling(&self, key_id: &str) -> Option<String> {
        let mut components = Path::new(key_id).components();
        match (components.next(), components.next()) {
            (Some(std::path::Component::Normal(_)), None) => {}
            _ => return None,
        }

        let dir = Path::new(&self.path).parent().unwrap_or(Path::new(""));
        Some(dir.join(key_id).to_string_lossy().into_owned())
    }
}

/// SignatureInfo carries the key pair used to sign and verify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureInfo {
    /// Public key used for verification.
    pub public: KeyInfo,
    /// Private key used for signing.
    pub private: KeyInfo,
}

impl SignatureInfo {
    /// Create a new signature info.
    pub fn new(public: KeyInfo, private: KeyInfo) -> Self {
        Self { public, private }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("ed25519", SignType::Ed25519)]
    #[test_case("rsa-v1_5-sha256", SignType::RsaSha256)]
    fn test_sign_type_from_str(input: &str, expected: SignType) {
        assert_eq!(input.parse::<SignType>().expect("must parse"), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn test_sign_type_invalid() {
        let err = "invalid".parse::<SignType>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid key type invalid");
        assert!(err.is_config_error());
    }

    #[test]
    fn test_key_id_is_file_name() {
        let key = KeyInfo::new("./keys/public.key", SignType::Ed25519);
        assert_eq!(key.key_id(), "public.key");
    }

    #[test_case("public.key", Some("keys/public.key"))]
    #[test_case("other.pem", Some("keys/other.pem"))]
    #[test_case("../secret", None)]
    #[test_case("/etc/passwd", None)]
    #[test_case("a/b", None)]
    #[test_case("", None)]
    fn test_sibling(key_id: &str, expected: Option<&str>) {
        let key = KeyInfo::new("keys/public.key", SignType::Ed25519);
        assert_eq!(key.sibling(key_id).as_deref(), expected);
    }

    #[test]
    fn test_key_info_serde() {
        let key: KeyInfo =
            serde_json::from_str(r#"{"type": "ed25519", "path": "/tmp/public.key"}"#)
                .expect("must parse");
        assert_eq!(key, KeyInfo::new("/tmp/public.key", SignType::Ed25519));
    }
}
