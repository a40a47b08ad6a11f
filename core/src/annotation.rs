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

use crate::time::{now, DateTime};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// AnnotationType names each kind of verification.
///
/// It is used both as the key of a [`PropertyBag`](crate::PropertyBag) entry
/// and to pick an annotator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnnotationType {
    /// Data was signed with a known key.
    #[serde(rename = "pki")]
    Pki,
    /// An HTTP request carries a valid message signature.
    #[serde(rename = "pki-http")]
    PkiHttp,
    /// Data was received over TLS.
    #[serde(rename = "tls")]
    Tls,
    /// Provenance of the host that produced the data.
    #[serde(rename = "src")]
    Source,
    /// Host is backed by a TPM.
    #[serde(rename = "tpm")]
    Tpm,
    /// Data matches a published checksum.
    #[serde(rename = "checksum")]
    Checksum,
}

impl AnnotationType {
    /// The wire name of this annotation type.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationType::Pki => "pki",
            AnnotationType::PkiHttp => "pki-http",
            AnnotationType::Tls => "tls",
            AnnotationType::Source => "src",
            AnnotationType::Tpm => "tpm",
            AnnotationType::Checksum => "checksum",
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnotationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pki" => Ok(AnnotationType::Pki),
            "pki-http" => Ok(AnnotationType::PkiHttp),
            "tls" => Ok(AnnotationType::Tls),
            "src" => Ok(AnnotationType::Source),
            "tpm" => Ok(AnnotationType::Tpm),
            "checksum" => Ok(AnnotationType::Checksum),
            v => Err(Error::config_invalid(format!(
                "unsupported annotation type {v}"
            ))),
        }
    }
}

/// Annotation is the immutable outcome of one verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    id: Uuid,
    key: AnnotationType,
    hash: String,
    host_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<String>,
    is_satisfied: bool,
    timestamp: DateTime,
}

impl Annotation {
    /// Create a new annotation stamped with a fresh id and the current time.
    pub fn new(
        key: AnnotationType,
        hash: impl Into<String>,
        host_id: impl Into<String>,
        is_satisfied: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            key,
            hash: hash.into(),
            host_id: host_id.into(),
            parent_hash: None,
            signature: None,
            is_satisfied,
            timestamp: now(),
        }
    }

    /// Link this annotation to the hash of the data it was derived from.
    pub fn with_parent_hash(mut self, parent_hash: impl Into<String>) -> Self {
        self.parent_hash = Some(parent_hash.into());
        self
    }

    /// Attach a signature over this annotation.
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Unique id of this annotation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Kind of verification this annotation records.
    pub fn key(&self) -> AnnotationType {
        self.key
    }

    /// Hash of the annotated data.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Host that produced this annotation.
    pub fn host_id(&self) -> &str {
        &self.host_id
    }

    /// Hash of the parent data, if any.
    pub fn parent_hash(&self) -> Option<&str> {
        self.parent_hash.as_deref()
    }

    /// Signature over this annotation, if any.
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Whether the verified property holds.
    pub fn is_satisfied(&self) -> bool {
        self.is_satisfied
    }

    /// Time this annotation was created.
    pub fn timestamp(&self) -> DateTime {
        self.timestamp
    }

    /// Serialize into JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse an annotation from JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_new_annotation() {
        let a = Annotation::new(AnnotationType::PkiHttp, "ABCD", "host-1", true);

        assert_eq!(a.key(), AnnotationType::PkiHttp);
        assert_eq!(a.hash(), "ABCD");
        assert_eq!(a.host_id(), "host-1");
        assert!(a.is_satisfied());
        assert_eq!(a.parent_hash(), None);
        assert_eq!(a.signature(), None);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Annotation::new(AnnotationType::Tls, "ABCD", "host-1", false);
        let b = Annotation::new(AnnotationType::Tls, "ABCD", "host-1", false);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_json_shape() {
        let a = Annotation::new(AnnotationType::PkiHttp, "ABCD", "host-1", false)
            .with_parent_hash("EF01");
        let v: serde_json::Value =
            serde_json::from_str(&a.to_json().expect("must serialize")).expect("must parse");

        assert_eq!(v["key"], "pki-http");
        assert_eq!(v["hostId"], "host-1");
        assert_eq!(v["parentHash"], "EF01");
        assert_eq!(v["isSatisfied"], false);
        assert!(v.get("signature").is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let a = Annotation::new(AnnotationType::Source, "ABCD", "host-1", true)
            .with_signature("c2ln");
        let b = Annotation::from_json(&a.to_json().expect("must serialize"))
            .expect("must parse");
        assert_eq!(a, b);
    }

    #[test_case("pki-http", AnnotationType::PkiHttp)]
    #[test_case("src", AnnotationType::Source)]
    #[test_case("checksum", AnnotationType::Checksum)]
    fn test_annotation_type_from_str(input: &str, expected: AnnotationType) {
        assert_eq!(input.parse::<AnnotationType>().expect("must parse"), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn test_annotation_type_unsupported() {
        let err = "sbom".parse::<AnnotationType>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported annotation type sbom");
    }
}
