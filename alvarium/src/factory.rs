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

use alvarium_core::{AnnotationType, Annotator, Context, Error, Result, SdkInfo};
use log::debug;
use std::collections::HashMap;

/// Build an annotator of one kind from the shared context and SDK config.
pub type AnnotatorBuilder = fn(&Context, &SdkInfo) -> Result<Box<dyn Annotator>>;

/// AnnotatorFactory maps an [`AnnotationType`] to the annotator verifying it.
///
/// Every call to [`AnnotatorFactory::get_annotator`] builds a fresh
/// annotator; the factory itself keeps no per-call state.
///
/// ```
/// use alvarium::{AnnotationType, AnnotatorFactory, Context, ErrorKind, SdkInfo};
///
/// let factory = AnnotatorFactory::new(Context::new());
/// let cfg = SdkInfo::from_json(r#"{
///     "hash": {"type": "sha256"},
///     "signature": {
///         "public": {"type": "ed25519", "path": "keys/public.key"},
///         "private": {"type": "ed25519", "path": "keys/private.key"}
///     }
/// }"#).unwrap();
///
/// let err = factory.get_annotator(AnnotationType::Tls, &cfg).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
/// ```
#[derive(Debug, Clone)]
pub struct AnnotatorFactory {
    ctx: Context,
    builders: HashMap<AnnotationType, AnnotatorBuilder>,
}

#[cfg(feature = "default-context")]
impl Default for AnnotatorFactory {
    fn default() -> Self {
        Self::new(crate::DefaultContext.into())
    }
}

impl AnnotatorFactory {
    /// Create a factory with every built-in annotator registered.
    pub fn new(ctx: Context) -> Self {
        let factory = Self {
            ctx,
            builders: HashMap::new(),
        };

        #[cfg(feature = "pki-http")]
        let factory = factory.register(AnnotationType::PkiHttp, |ctx, cfg| {
            Ok(Box::new(alvarium_pki_http::PkiHttpAnnotator::new(
                ctx.clone(),
                cfg,
            )?))
        });

        factory
    }

    /// Register `builder` for `kind`, replacing any previous one.
    pub fn register(mut self, kind: AnnotationType, builder: AnnotatorBuilder) -> Self {
        self.builders.insert(kind, builder);
        self
    }

    /// The context handed to every annotator built here.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Build the annotator for `kind`.
    pub fn get_annotator(
        &self,
        kind: AnnotationType,
        cfg: &SdkInfo,
    ) -> Result<Box<dyn Annotator>> {
        let builder = self.builders.get(&kind).ok_or_else(|| {
            Error::config_invalid(format!("unsupported annotation type {kind}"))
        })?;
        if !cfg.is_enabled(kind) {
            debug!("annotator {kind} is built but not listed in config");
        }

        builder(&self.ctx, cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alvarium_core::{
        Annotation, ErrorKind, HashInfo, HashType, KeyInfo, PropertyBag, SignType, SignatureInfo,
    };
    use test_case::test_case;

    #[derive(Debug)]
    struct Always;

    impl Annotator for Always {
        fn execute(&self, _: &PropertyBag, data: &[u8]) -> Result<Annotation> {
            Ok(Annotation::new(
                AnnotationType::Tpm,
                HashType::NoHash.derive(data)?,
                "test-host",
                true,
            ))
        }
    }

    fn config() -> SdkInfo {
        SdkInfo::new(
            [AnnotationType::PkiHttp],
            HashInfo::new(HashType::SHA256Hash),
            SignatureInfo::new(
                KeyInfo::new("keys/public.key", SignType::Ed25519),
                KeyInfo::new("keys/private.key", SignType::Ed25519),
            ),
        )
    }

    #[test_case(AnnotationType::Pki)]
    #[test_case(AnnotationType::Tls)]
    #[test_case(AnnotationType::Source)]
    #[test_case(AnnotationType::Tpm)]
    #[test_case(AnnotationType::Checksum)]
    fn test_unsupported_annotation_type(kind: AnnotationType) {
        let factory = AnnotatorFactory::new(Context::new());

        let err = factory.get_annotator(kind, &config()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.to_string(), format!("unsupported annotation type {kind}"));
    }

    #[test]
    fn test_register_custom_annotator() {
        let factory = AnnotatorFactory::new(Context::new())
            .register(AnnotationType::Tpm, |_, _| Ok(Box::new(Always)));

        let annotator = factory
            .get_annotator(AnnotationType::Tpm, &config())
            .expect("tpm must be registered");
        let annotation = annotator
            .execute(&PropertyBag::default(), b"foo bar")
            .expect("execute must succeed");
        assert!(annotation.is_satisfied());
        assert_eq!(annotation.hash(), "foo bar");
    }

    #[cfg(feature = "pki-http")]
    #[test]
    fn test_pki_http_is_registered() {
        let factory = AnnotatorFactory::new(Context::new());
        assert!(factory
            .get_annotator(AnnotationType::PkiHttp, &config())
            .is_ok());
    }
}
