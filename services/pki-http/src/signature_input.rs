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
use alvarium_core::time::{to_unix_seconds, DateTime};
use alvarium_core::{Error, Result};
use std::fmt;

/// SignatureInput is the decoded value of the `Signature-Input` header.
///
/// The wire form is:
///
/// ```text
/// "@method" "@path" "content-type";created=1646146637;keyid="public.key";alg="ed25519"
/// ```
///
/// The serialized form is kept as received, since it is signed verbatim as the
/// last line of the signature base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureInput {
    components: Vec<String>,
    created: i64,
    key_id: String,
    alg: String,
    serialized: String,
}

impl SignatureInput {
    /// Build a new input covering `components`, in order.
    pub fn new(
        components: impl IntoIterator<Item = impl Into<String>>,
        created: DateTime,
        key_id: impl Into<String>,
        alg: impl Into<String>,
    ) -> Self {
        let components: Vec<String> = components.into_iter().map(Into::into).collect();
        let created = to_unix_seconds(created);
        let key_id = key_id.into();
        let alg = alg.into();

        let mut serialized = components
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(" ");
        serialized.push_str(&format!(
            ";{PARAM_CREATED}={created};{PARAM_KEY_ID}={};{PARAM_ALG}={}",
            quote(&key_id),
            quote(&alg)
        ));

        Self {
            components,
            created,
            key_id,
            alg,
            serialized,
        }
    }

    /// Parse the value of a `Signature-Input` header.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let (list, params) = value
            .split_once(';')
            .ok_or_else(|| malformed("signature parameters are missing"))?;

        let components = parse_components(list)?;

        let mut created = None;
        let mut key_id = None;
        let mut alg = None;
        for param in split_params(params)? {
            let (k, v) = param
                .split_once('=')
                .ok_or_else(|| malformed(format!("parameter `{param}` has no value")))?;
            match k.trim() {
                PARAM_CREATED => {
                    let v = v.trim().parse::<i64>().map_err(|e| {
                        malformed(format!("created `{v}` is not an integer")).with_source(e)
                    })?;
                    set_once(&mut created, PARAM_CREATED, v)?;
                }
                PARAM_KEY_ID => set_once(&mut key_id, PARAM_KEY_ID, unquote(PARAM_KEY_ID, v)?)?,
                PARAM_ALG => set_once(&mut alg, PARAM_ALG, unquote(PARAM_ALG, v)?)?,
                // Parameters like `expires` or `nonce` are still covered through
                // the serialized form, they just aren't interpreted.
                _ => {}
            }
        }

        Ok(Self {
            components,
            created: created.ok_or_else(|| malformed("created is missing"))?,
            key_id: key_id.ok_or_else(|| malformed("keyid is missing"))?,
            alg: alg.ok_or_else(|| malformed("alg is missing"))?,
            serialized: value.to_string(),
        })
    }

    /// Covered components in signing order.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Creation time, in whole seconds since the unix epoch.
    pub fn created(&self) -> i64 {
        self.created
    }

    /// Identifier of the key that made the signature.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Algorithm name as declared by the signer.
    pub fn alg(&self) -> &str {
        &self.alg
    }

    /// Serialized header value.
    pub fn as_str(&self) -> &str {
        &self.serialized
    }
}

impl fmt::Display for SignatureInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialized)
    }
}

fn malformed(reason: impl fmt::Display) -> Error {
    Error::request_invalid(format!("malformed Signature-Input: {reason}"))
}

fn set_once<T>(slot: &mut Option<T>, name: &str, v: T) -> Result<()> {
    if slot.replace(v).is_some() {
        return Err(malformed(format!("{name} is repeated")));
    }
    Ok(())
}

/// Quote `v` as a string parameter, escaping `"` and `\`.
fn quote(v: &str) -> String {
    let mut s = String::with_capacity(v.len() + 2);
    s.push('"');
    for c in v.chars() {
        if c == '"' || c == '\\' {
            s.push('\\');
        }
        s.push(c);
    }
    s.push('"');
    s
}

fn unquote(name: &str, v: &str) -> Result<String> {
    let inner = v
        .trim()
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(|| malformed(format!("{name} must be a quoted string")))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(c @ ('"' | '\\')) => out.push(c),
                _ => return Err(malformed(format!("{name} has an invalid escape"))),
            },
            '"' => return Err(malformed(format!("{name} must be a quoted string"))),
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Split parameters on `;`, leaving quoted strings intact.
fn split_params(params: &str) -> Result<Vec<&str>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (i, c) in params.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => {
                out.push(&params[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if quoted {
        return Err(malformed("unterminated quoted string"));
    }
    out.push(&params[start..]);

    Ok(out)
}

fn parse_components(list: &str) -> Result<Vec<String>> {
    let mut components = Vec::new();
    let mut rest = list.trim();

    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('"')
            .ok_or_else(|| malformed("components must be quoted"))?;
        let end = inner
            .find('"')
            .ok_or_else(|| malformed("unterminated component"))?;
        if end == 0 {
            return Err(malformed("empty component name"));
        }
        components.push(inner[..end].to_string());

        rest = &inner[end + 1..];
        if !rest.is_empty() && !rest.starts_with(' ') {
            return Err(malformed("components must be separated by spaces"));
        }
        rest = rest.trim_start();
    }

    Ok(components)
}
