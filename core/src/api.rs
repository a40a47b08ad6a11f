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

use crate::{Annotation, PropertyBag, Result};
use std::fmt::Debug;

/// Annotator evaluates one trust property of a piece of data.
///
/// ## Errors
///
/// `execute` returns an error only when the annotator cannot do its job:
/// the configuration is invalid or `ctx` lacks what the annotator needs.
/// A property that simply does not hold is reported as an annotation with
/// `is_satisfied() == false`.
pub trait Annotator: Debug + Send + Sync + 'static {
    /// Evaluate `data` with the help of `ctx` and record the outcome.
    fn execute(&self, ctx: &PropertyBag, data: &[u8]) -> Result<Annotation>;
}
