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

use crate::constants::*;
use alvarium_core::{Error, Result};
use bytes::Bytes;
use http::header::HOST;
use std::fmt;
use std::str::FromStr;

/// DerivedComponent is a signature base line computed from request metadata.
///
/// Names are matched case-sensitively: `@Method` is not `@method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedComponent {
    /// `@method`: the request method, e.g. `POST`.
    Method,
    /// `@target-uri`: the full target URI.
    TargetUri,
    /// `@authority`: host and optional port.
    Authority,
    /// `@scheme`: `http` or `https`.
    Scheme,
    /// `@request-target`: path plus query, as sent on the request line.
    RequestTarget,
    /// `@path`: absolute path, without query.
    Path,
    /// `@query`: query string including the leading `?`.
    Query,
}

impl DerivedComponent {
    /// Name of the component as it appears in `Signature-Input`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DerivedComponent::Method => METHOD,
            DerivedComponent::TargetUri => TARGET_URI,
            DerivedComponent::Authority => AUTHORITY,
            DerivedComponent::Scheme => SCHEME,
            DerivedComponent::RequestTarget => REQUEST_TARGET,
            DerivedComponent::Path => PATH,
            DerivedComponent::Query => QUERY,
        }
    }

    /// Compute the value of this component for `req`.
    ///
    /// Fails when `req` doesn't carry what the component is derived from.
    pub fn value(&self, req: &http::Request<Bytes>) -> Result<String> {
        self.lookup(req).ok_or_else(|| {
            Error::request_invalid(format!("covered component {self} is missing from request"))
        })
    }

    /// Like [`DerivedComponent::value`], `None` when the request can't
    /// provide the component.
    pub(crate) fn lookup(&self, req: &http::Request<Bytes>) -> Option<String> {
        let uri = req.uri();
        let v = match self {
            DerivedComponent::Method => req.method().as_str().to_string(),
            DerivedComponent::TargetUri => format!(
                "{}://{}{}",
                scheme(req),
                authority(req)?,
                uri.path_and_query().map(|v| v.as_str()).unwrap_or("/")
            ),
            DerivedComponent::Authority => authority(req)?,
            DerivedComponent::Scheme => scheme(req).to_string(),
            DerivedComponent::RequestTarget => uri
                .path_and_query()
                .map(|v| v.as_str())
                .unwrap_or("/")
                .to_string(),
            DerivedComponent::Path => uri.path().to_string(),
            DerivedComponent::Query => format!("?{}", uri.query().unwrap_or_default()),
        };

        Some(v)
    }
}

fn scheme(req: &http::Request<Bytes>) -> &str {
    req.uri().scheme_str().unwrap_or("http")
}

/// Authority from the URI, falling back to the `Host` header for
/// origin-form requests.
fn authority(req: &http::Request<Bytes>) -> Option<String> {
    if let Some(v) = req.uri().authority() {
        return Some(v.as_str().to_string());
    }

    let host = req.headers().get(HOST)?.to_str().ok()?;
    Some(host.to_string())
}

impl fmt::Display for DerivedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DerivedComponent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            METHOD => Ok(DerivedComponent::Method),
            TARGET_URI => Ok(DerivedComponent::TargetUri),
            AUTHORITY => Ok(DerivedComponent::Authority),
            SCHEME => Ok(DerivedComponent::Scheme),
            REQUEST_TARGET => Ok(DerivedComponent::RequestTarget),
            PATH => Ok(DerivedComponent::Path),
            QUERY => Ok(DerivedComponent::Query),
            v => Err(Error::request_invalid(format!(
                "unsupported derived component {v}"
            ))),
        }
    }
}
