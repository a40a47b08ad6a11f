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

use crate::key::{rsa_private_key, rsa_public_key};
use crate::RequestHandler;
use alvarium_core::{Error, Result, SignType};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer, Verifier};

/// RequestHandler for RSASSA-PKCS1-v1_5 signatures using SHA-256.
///
/// Private keys are PKCS#8 or PKCS#1 PEM, public keys SPKI or PKCS#1 PEM.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaSha256RequestHandler;

impl RequestHandler for RsaSha256RequestHandler {
    fn sign_type(&self) -> SignType {
        SignType::RsaSha256
    }

    fn sign(&self, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        let key = rsa_private_key(private_key)
            .ok_or_else(|| Error::config_invalid("Failed to load private key"))?;

        let signing_key = SigningKey::<Sha256>::new(key);
        let signature = signing_key
            .try_sign(message)
            .map_err(|e| Error::unexpected("failed to sign request").with_source(e))?;
        Ok(signature.to_vec())
    }

    fn verify_signature(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        let key = rsa_public_key(public_key)
            .ok_or_else(|| Error::config_invalid("Failed to load public key"))?;

        let Ok(signature) = Signature::try_from(signature) else {
            return Ok(false);
        };
        Ok(VerifyingKey::<Sha256>::new(key)
            .verify(message, &signature)
            .is_ok())
    }
}
