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

use std::fmt::{Debug, Formatter};

use hwcsign_core::{utils::Redact, Error, Result, SigningCredential};

/// Credential bundle for Huawei Cloud API Gateway requests.
///
/// A bundle is either fully usable (access key, secret key and project id
/// all set, security token optional), or fully empty (auth explicitly not
/// configured). Anything in between is a configuration mistake, reported by
/// [`Credential::validate`]. The bundle is built once at transport setup and
/// immutable afterwards; concurrent in-flight requests read it freely.
#[derive(Clone, Default)]
pub struct Credential {
    /// Access key id, could be temporary.
    pub access_key_id: String,
    /// Secret access key, could be temporary.
    pub secret_access_key: String,
    /// Project id the requests are issued against.
    pub project_id: String,
    /// Security token carried alongside temporary credentials.
    ///
    /// Sent as a header, never part of the signing secret.
    pub security_token: Option<String>,
}

impl Credential {
    /// Create a new credential.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            project_id: project_id.into(),
            security_token: None,
        }
    }

    /// Set security_token.
    pub fn with_security_token(mut self, security_token: impl Into<String>) -> Self {
        self.security_token = Some(security_token.into());
        self
    }

    /// Check whether the required trio is complete.
    ///
    /// An incomplete bundle never installs an auth stage; whether that is an
    /// error is decided by [`Credential::validate`], not here.
    pub fn has_required_attributes(&self) -> bool {
        !self.access_key_id.is_empty()
            && !self.secret_access_key.is_empty()
            && !self.project_id.is_empty()
    }

    /// Validate the bundle.
    ///
    /// - Complete trio: usable, `Ok(())`.
    /// - All four fields empty: auth disabled on purpose, also `Ok(())`.
    /// - Any other combination: `ConfigInvalid`.
    pub fn validate(&self) -> Result<()> {
        if self.has_required_attributes() {
            return Ok(());
        }

        let token_set = self.security_token.as_deref().is_some_and(|v| !v.is_empty());
        if !self.access_key_id.is_empty()
            || !self.secret_access_key.is_empty()
            || !self.project_id.is_empty()
            || token_set
        {
            return Err(Error::config_invalid(
                "incomplete Huawei Cloud credential set: \
                 access_key_id, secret_access_key and project_id must be set together",
            ));
        }

        Ok(())
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("project_id", &self.project_id)
            .field(
                "security_token",
                &self.security_token.as_ref().map(Redact::from),
            )
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        self.has_required_attributes()
    }
}
