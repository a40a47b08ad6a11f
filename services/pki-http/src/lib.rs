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

//! HTTP message signature annotator.
//!
//! This crate verifies that an HTTP request was signed by the holder of a
//! known private key. The signer lists the covered request components in the
//! `Signature-Input` header and puts the signature over the resulting
//! signature base in the `Signature` header:
//!
//! ```text
//! Signature-Input: "@method" "@path" "@authority" "Content-Type";created=1646146637;keyid="public.key";alg="ed25519"
//! Signature: <base64>
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use alvarium_core::{Annotator, AnnotationType, Context, PropertyBag, SdkInfo};
//! use alvarium_file_read_std::StdFileRead;
//! use alvarium_pki_http::PkiHttpAnnotator;
//!
//! # fn example(cfg: SdkInfo, req: http::Request<bytes::Bytes>) -> alvarium_core::Result<()> {
//! let ctx = Context::new().with_file_read(StdFileRead);
//! let annotator = PkiHttpAnnotator::new(ctx, &cfg)?;
//!
//! let bag = PropertyBag::builder()
//!     .with(AnnotationType::PkiHttp, req)
//!     .build();
//! let annotation = annotator.execute(&bag, b"{key: \"test\"}")?;
//! println!("signature valid: {}", annotation.is_satisfied());
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{SIGNATURE, SIGNATURE_INPUT};

mod component;
pub use component::DerivedComponent;

mod signature_input;
pub use signature_input::SignatureInput;

mod base;
pub use base::signature_base;

mod key;

mod handler;
pub use handler::{request_handler, RequestHandler};

mod ed25519;
pub use ed25519::Ed25519RequestHandler;

mod rsa_sha256;
pub use rsa_sha256::RsaSha256RequestHandler;

mod annotator;
pub use annotator::PkiHttpAnnotator;
