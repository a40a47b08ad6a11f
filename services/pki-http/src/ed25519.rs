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

use crate::key::{ed25519_private_key, ed25519_public_key};
use crate::RequestHandler;
use alvarium_core::{Error, Result, SignType};
use ed25519_dalek::{Signature, Signer};

/// RequestHandler for Ed25519 signatures.
///
/// Keys are 32 byte ed25519 keys, raw or hex encoded. Private keys may also
/// be given as the 64 byte seed and public key pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519RequestHandler;

impl RequestHandler for Ed25519RequestHandler {
    fn sign_type(&self) -> SignType {
        SignType::Ed25519
    }

    fn sign(&self, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        let key = ed25519_private_key(private_key)
            .ok_or_else(|| Error::config_invalid("Failed to load private key"))?;
        Ok(key.sign(message).to_bytes().to_vec())
    }

    fn verify_signature(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        let key = ed25519_public_key(public_key)
            .ok_or_else(|| Error::config_invalid("Failed to load public key"))?;
        let Ok(signature) = Signature::from_slice(signature) else {
            return Ok(false);
        };
        Ok(key.verify_strict(message, &signature).is_ok())
    }
}
