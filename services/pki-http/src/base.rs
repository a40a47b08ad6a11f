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

use crate::constants::SIGNATURE_PARAMS;
use crate::{DerivedComponent, SignatureInput};
use alvarium_core::{Error, Result};
use bytes::Bytes;
use http::header::HeaderName;
use std::fmt::Write;

/// Coverage of a request by a `Signature-Input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Coverage {
    /// Every covered component was read; holds the signature base.
    Covered(String),
    /// A covered component can't be read from the request; holds the reason.
    Unavailable(String),
}

/// Build the signature base of `req` for the components listed in `input`.
///
/// Lines follow the order of `input`, one per component, and end with the
/// `@signature-params` line:
///
/// ```text
/// "@method": POST
/// "@path": /foo
/// "Content-Type": application/json
/// "@signature-params": "@method" "@path" "Content-Type";created=1646146637;keyid="public.key";alg="ed25519"
/// ```
///
/// A covered component the request can't provide is an error here; verifiers
/// treat it as a signature that doesn't match.
pub fn signature_base(req: &http::Request<Bytes>, input: &SignatureInput) -> Result<String> {
    match coverage(req, input)? {
        Coverage::Covered(base) => Ok(base),
        Coverage::Unavailable(reason) => Err(Error::request_invalid(reason)),
    }
}

/// Build the signature base, telling apart components missing from `req`.
///
/// Errors are kept for inputs that can never be satisfied: unknown derived
/// components and invalid header names.
pub(crate) fn coverage(req: &http::Request<Bytes>, input: &SignatureInput) -> Result<Coverage> {
    let mut f = String::new();

    for name in input.components() {
        let value = if name.starts_with('@') {
            let component = name.parse::<DerivedComponent>()?;
            match component.lookup(req) {
                Some(v) => v,
                None => {
                    return Ok(Coverage::Unavailable(format!(
                        "covered component {name} is missing from request"
                    )))
                }
            }
        } else {
            match header_value(req, name)? {
                Coverage::Covered(v) => v,
                unavailable => return Ok(unavailable),
            }
        };
        writeln!(f, "\"{name}\": {value}")?;
    }
    write!(f, "\"{SIGNATURE_PARAMS}\": {}", input.as_str())?;

    Ok(Coverage::Covered(f))
}

/// Current value of header `name`; repeated headers are joined by `, `.
fn header_value(req: &http::Request<Bytes>, name: &str) -> Result<Coverage> {
    let key = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
        Error::request_invalid(format!("component {name} is not a valid header name"))
            .with_source(e)
    })?;

    let mut values = Vec::new();
    for v in req.headers().get_all(&key) {
        let Ok(v) = v.to_str() else {
            return Ok(Coverage::Unavailable(format!(
                "covered header {name} is not visible ascii"
            )));
        };
        values.push(v.trim());
    }
    if values.is_empty() {
        return Ok(Coverage::Unavailable(format!(
            "covered header {name} is missing from request"
        )));
    }

    Ok(Coverage::Covered(values.join(", ")))
}
