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

use crate::{request_handler, RequestHandler};
use alvarium_core::{
    Annotation, AnnotationType, Annotator, Context, HashProvider, HashProviderFactory,
    PropertyBag, Result, SdkInfo, SignatureInfo,
};
use log::debug;
use std::sync::Arc;

/// PkiHttpAnnotator checks that an HTTP request was signed by a known key.
///
/// The request is taken from the property bag under
/// [`AnnotationType::PkiHttp`]. The annotation hash is derived from the data
/// passed to [`Annotator::execute`] with the configured hash type.
#[derive(Debug)]
pub struct PkiHttpAnnotator {
    ctx: Context,
    hasher: Arc<dyn HashProvider>,
    signature: SignatureInfo,
    handler: Box<dyn RequestHandler>,
}

impl PkiHttpAnnotator {
    /// Create a new annotator from `cfg`.
    ///
    /// Fails when the configured hash type has no provider.
    pub fn new(ctx: Context, cfg: &SdkInfo) -> Result<Self> {
        let hasher = HashProviderFactory::new().get_provider(cfg.hash.hash_type)?;

        Ok(Self {
            ctx,
            hasher,
            signature: cfg.signature.clone(),
            handler: request_handler(cfg.signature.public.sign_type),
        })
    }
}

impl Annotator for PkiHttpAnnotator {
    fn execute(&self, ctx: &PropertyBag, data: &[u8]) -> Result<Annotation> {
        let req = ctx.http_request(AnnotationType::PkiHttp)?;

        let satisfied = self
            .handler
            .verify(&self.ctx, req, &self.signature)
            .inspect_err(|e| debug!("pki-http verification failed: {e}"))?;

        Ok(Annotation::new(
            AnnotationType::PkiHttp,
            self.hasher.derive(data),
            self.ctx.host_id(),
            satisfied,
        ))
    }
}
