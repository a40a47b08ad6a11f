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

/// Header carrying the covered components and signature parameters.
pub const SIGNATURE_INPUT: &str = "signature-input";
/// Header carrying the encoded signature.
pub const SIGNATURE: &str = "signature";

/// Name of the trailing line of a signature base.
pub const SIGNATURE_PARAMS: &str = "@signature-params";

// Signature-Input parameters
pub const PARAM_CREATED: &str = "created";
pub const PARAM_KEY_ID: &str = "keyid";
pub const PARAM_ALG: &str = "alg";

// Derived components
pub const METHOD: &str = "@method";
pub const TARGET_URI: &str = "@target-uri";
pub const AUTHORITY: &str = "@authority";
pub const SCHEME: &str = "@scheme";
pub const REQUEST_TARGET: &str = "@request-target";
pub const PATH: &str = "@path";
pub const QUERY: &str = "@query";
