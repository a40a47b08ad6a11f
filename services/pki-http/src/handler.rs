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

use crate::base::{coverage, Coverage};
use crate::constants::{SIGNATURE, SIGNATURE_INPUT};
use crate::{signature_base, Ed25519RequestHandler, RsaSha256RequestHandler, SignatureInput};
use alvarium_core::hash::{base64_decode, base64_encode};
use alvarium_core::time::DateTime;
use alvarium_core::utils::Redact;
use alvarium_core::{Context, Error, KeyInfo, Result, SignType, SignatureInfo};
use bytes::Bytes;
use http::HeaderValue;
use log::{debug, warn};
use std::fmt::Debug;

/// RequestHandler signs and verifies HTTP requests for one algorithm family.
///
/// Implementations only provide the raw cryptography. Building the signature
/// base and reading or writing the `Signature-Input` and `Signature` headers
/// is shared by every algorithm.
pub trait RequestHandler: Debug + Send + Sync + 'static {
    /// The algorithm this handler implements.
    fn sign_type(&self) -> SignType;

    /// Sign `message` with the private key decoded from `private_key`.
    ///
    /// Undecodable key material is a configuration error.
    fn sign(&self, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>>;

    /// Check `signature` over `message` against the public key decoded from
    /// `public_key`.
    ///
    /// Returns `Ok(false)` when the signature is malformed or doesn't match;
    /// undecodable key material is a configuration error.
    fn verify_signature(&self, public_key: &[u8], message: &[u8], signature: &[u8])
        -> Result<bool>;

    /// Sign `req` over `components` and write the `Signature-Input` and
    /// `Signature` headers.
    ///
    /// `keyid` is the file name of the configured public key, so that a
    /// verifier holding the same key directory can resolve it.
    fn add_signature_headers(
        &self,
        ctx: &Context,
        req: &mut http::Request<Bytes>,
        created: DateTime,
        components: &[&str],
        sig: &SignatureInfo,
    ) -> Result<()> {
        if sig.private.sign_type != self.sign_type() {
            return Err(invalid_key_type(sig.private.sign_type.as_str()));
        }

        let input = SignatureInput::new(
            components.iter().copied(),
            created,
            sig.public.key_id(),
            self.sign_type().as_str(),
        );
        let base = signature_base(req, &input)?;
        debug!("signature base: {base}");

        let private_key = ctx.file_read(&sig.private.path).map_err(|e| {
            Error::config_invalid("Failed to load private key").with_source(e)
        })?;
        let signature = base64_encode(&self.sign(&private_key, base.as_bytes())?);

        let headers = req.headers_mut();
        headers.insert(SIGNATURE_INPUT, HeaderValue::from_str(input.as_str())?);
        headers.insert(SIGNATURE, HeaderValue::from_str(&signature)?);
        Ok(())
    }

    /// Verify the signature carried by `req`.
    ///
    /// - `Err` when `Signature-Input` is missing or malformed, when its
    ///   `alg` isn't handled here, or when its `keyid` can't be loaded.
    /// - `Ok(false)` when `Signature` is missing, empty or doesn't match.
    /// - `Ok(true)` otherwise.
    fn verify(
        &self,
        ctx: &Context,
        req: &http::Request<Bytes>,
        sig: &SignatureInfo,
    ) -> Result<bool> {
        let raw = req
            .headers()
            .get(SIGNATURE_INPUT)
            .ok_or_else(|| Error::request_invalid("missing Signature-Input header"))?
            .to_str()?;
        let input = SignatureInput::parse(raw)?;

        match input.alg().parse::<SignType>() {
            Ok(v) if v == self.sign_type() => {}
            _ => return Err(invalid_key_type(input.alg())),
        }

        let public_key = load_public_key(ctx, &sig.public, input.key_id())?;

        let signature = match req.headers().get(SIGNATURE).map(|v| v.to_str()) {
            Some(Ok(v)) if !v.trim().is_empty() => v.trim(),
            _ => {
                debug!("request carries no signature");
                return Ok(false);
            }
        };
        let Ok(signature) = base64_decode(signature) else {
            warn!("signature {} is not valid base64", Redact::from(signature));
            return Ok(false);
        };

        let base = match coverage(req, &input)? {
            Coverage::Covered(base) => base,
            Coverage::Unavailable(reason) => {
                warn!("signature can't be checked: {reason}");
                return Ok(false);
            }
        };
        debug!("signature base: {base}");

        let verified = self.verify_signature(&public_key, base.as_bytes(), &signature)?;
        if !verified {
            warn!("signature doesn't match key {}", input.key_id());
        }
        Ok(verified)
    }
}

fn invalid_key_type(alg: &str) -> Error {
    Error::config_invalid(format!("Invalid key type {alg}"))
}

/// Read the key named by `key_id` from the directory of the configured
/// public key.
fn load_public_key(ctx: &Context, public: &KeyInfo, key_id: &str) -> Result<Vec<u8>> {
    let path = public
        .sibling(key_id)
        .ok_or_else(|| Error::config_invalid("Failed to load public key"))?;
    debug!("loading public key from {}", Redact::from(&path));

    ctx.file_read(&path)
        .map_err(|e| Error::config_invalid("Failed to load public key").with_source(e))
}

/// Get the request handler for `sign_type`.
pub fn request_handler(sign_type: SignType) -> Box<dyn RequestHandler> {
    match sign_type {
        SignType::Ed25519 => Box::new(Ed25519RequestHandler),
        SignType::RsaSha256 => Box::new(RsaSha256RequestHandler),
    }
}
