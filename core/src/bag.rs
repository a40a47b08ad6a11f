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

use crate::{AnnotationType, Error, Result};
use bytes::Bytes;
use std::collections::HashMap;

/// PropertyValue is a value an annotator may need from its caller.
#[derive(Debug)]
pub enum PropertyValue {
    /// An HTTP request, body included.
    HttpRequest(http::Request<Bytes>),
    /// Raw bytes.
    Bytes(Bytes),
    /// Plain text.
    Text(String),
}

impl PropertyValue {
    fn shape(&self) -> &'static str {
        match self {
            PropertyValue::HttpRequest(_) => "an http request",
            PropertyValue::Bytes(_) => "bytes",
            PropertyValue::Text(_) => "text",
        }
    }
}

impl From<http::Request<Bytes>> for PropertyValue {
    fn from(v: http::Request<Bytes>) -> Self {
        PropertyValue::HttpRequest(v)
    }
}

impl From<Bytes> for PropertyValue {
    fn from(v: Bytes) -> Self {
        PropertyValue::Bytes(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::Text(v)
    }
}

/// PropertyBag is the read-only context handed to an annotator.
///
/// ```
/// use alvarium_core::{AnnotationType, PropertyBag};
///
/// let req = http::Request::post("http://example.com/foo")
///     .body(bytes::Bytes::new())
///     .unwrap();
/// let bag = PropertyBag::builder()
///     .with(AnnotationType::PkiHttp, req)
///     .build();
///
/// assert!(bag.http_request(AnnotationType::PkiHttp).is_ok());
/// ```
#[derive(Debug, Default)]
pub struct PropertyBag {
    entries: HashMap<AnnotationType, PropertyValue>,
}

impl PropertyBag {
    /// Start building a new bag.
    pub fn builder() -> PropertyBagBuilder {
        PropertyBagBuilder::default()
    }

    /// Get the raw value stored under `key`.
    pub fn get(&self, key: AnnotationType) -> Result<&PropertyValue> {
        self.entries
            .get(&key)
            .ok_or_else(|| Error::context_invalid(format!("property {key} not found")))
    }

    /// Whether a value is stored under `key`.
    pub fn contains(&self, key: AnnotationType) -> bool {
        self.entries.contains_key(&key)
    }

    /// Get the http request stored under `key`.
    pub fn http_request(&self, key: AnnotationType) -> Result<&http::Request<Bytes>> {
        match self.get(key)? {
            PropertyValue::HttpRequest(v) => Ok(v),
            v => Err(mismatch(key, "an http request", v)),
        }
    }

    /// Get the bytes stored under `key`.
    pub fn bytes(&self, key: AnnotationType) -> Result<&Bytes> {
        match self.get(key)? {
            PropertyValue::Bytes(v) => Ok(v),
            v => Err(mismatch(key, "bytes", v)),
        }
    }

    /// Get the text stored under `key`.
    pub fn text(&self, key: AnnotationType) -> Result<&str> {
        match self.get(key)? {
            PropertyValue::Text(v) => Ok(v),
            v => Err(mismatch(key, "text", v)),
        }
    }
}

fn mismatch(key: AnnotationType, expected: &str, actual: &PropertyValue) -> Error {
    Error::context_invalid(format!(
        "property {key} is not {expected}, got {}",
        actual.shape()
    ))
}

/// Builder for [`PropertyBag`].
#[derive(Debug, Default)]
pub struct PropertyBagBuilder {
    entries: HashMap<AnnotationType, PropertyValue>,
}

impl PropertyBagBuilder {
    /// Store `value` under `key`, replacing any previous value.
    pub fn with(mut self, key: AnnotationType, value: impl Into<PropertyValue>) -> Self {
        self.entries.insert(key, value.into());
        self
    }

    /// Freeze the bag.
    pub fn build(self) -> PropertyBag {
        PropertyBag {
            entries: self.entries,
        }
    }
}
