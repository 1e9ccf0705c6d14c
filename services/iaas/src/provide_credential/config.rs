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

use async_trait::async_trait;
use qingsign_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::credential::Credential;

/// ConfigCredentialProvider loads the credential from a [`Config`].
///
/// Only the config itself is read. Chain it in front of
/// [`DefaultCredentialProvider`](crate::DefaultCredentialProvider) to fall back to the environment.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new provider via config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        match (&self.config.access_key_id, &self.config.secret_access_key) {
            (Some(ak), Some(sk)) => Ok(Some(Credential::new(ak.clone(), sk.clone()))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use qingsign_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_config_credential_provider() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv::default());
        let config = Arc::new(
            Config::new()
                .with_access_key_id("config_ak")
                .with_secret_access_key("config_sk"),
        );

        let cred = ConfigCredentialProvider::new(config)
            .provide_credential(&ctx)
            .await
            .expect("load must succeed")
            .expect("credential must be present");
        assert_eq!("config_ak", cred.access_key_id);
        assert_eq!("config_sk", cred.secret_access_key);
    }

    #[tokio::test]
    async fn test_config_credential_provider_ignores_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([(QY_SECRET_ACCESS_KEY.to_string(), "env_sk".to_string())]),
        });
        let config = Arc::new(Config::new().with_access_key_id("config_ak"));

        let cred = ConfigCredentialProvider::new(config)
            .provide_credential(&ctx)
            .await
            .unwrap();
        assert!(cred.is_none());
    }

    #[tokio::test]
    async fn test_config_credential_provider_without_secret() {
        let ctx = Context::new().with_env(StaticEnv::default());
        let config = Arc::new(Config::new().with_access_key_id("config_ak"));

        let cred = ConfigCredentialProvider::new(config)
            .provide_credential(&ctx)
            .await
            .unwrap();
        assert!(cred.is_none());
    }
}
