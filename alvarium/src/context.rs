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

use alvarium_core::{Context, Env, FileRead, OsEnv, Result};
use alvarium_file_read_std::StdFileRead;

/// DefaultContext reads files from the local filesystem and variables from
/// the process environment.
///
/// ```no_run
/// use alvarium::{Context, DefaultContext};
///
/// let ctx: Context = DefaultContext.into();
/// println!("running on {}", ctx.host_id());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultContext;

impl FileRead for DefaultContext {
    fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        StdFileRead.file_read(path)
    }
}

impl Env for DefaultContext {
    fn var(&self, key: &str) -> Option<String> {
        OsEnv.var(key)
    }
}

impl From<DefaultContext> for Context {
    fn from(v: DefaultContext) -> Self {
        Context::new().with_file_read(v).with_env(v)
    }
}
