// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::path::PathBuf;
use std::sync::Arc;

use zoltar::config::{Config, CooldownPolicy};
use zoltar::services::{NoopNarrator, NoopScheduler};
use zoltar::store::SecureStore;
use zoltar::ZoltarSession;

/// Path for a fresh throwaway store file.
#[allow(dead_code)]
pub fn temp_store_path() -> PathBuf {
    std::env::temp_dir().join(format!(
        "zoltar-test-{}-{}.store",
        std::process::id(),
        rand::random::<u64>()
    ))
}

/// Open a fresh test store with the default test passphrase.
#[allow(dead_code)]
pub fn test_store() -> SecureStore {
    SecureStore::open(temp_store_path(), "test_store_passphrase")
}

/// Config pointing the API client at an unroutable endpoint.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        api_url: "http://127.0.0.1:1".to_string(),
        ..Config::test_default()
    }
}

/// Session backed by a fresh store and no-op capabilities.
#[allow(dead_code)]
pub fn test_session(config: Config) -> (ZoltarSession, SecureStore) {
    let store = test_store();
    let session = ZoltarSession::new(
        config,
        store.clone(),
        Arc::new(NoopScheduler),
        Arc::new(NoopNarrator),
    );
    (session, store)
}

/// Session with a stored profile, ready to request fortunes.
#[allow(dead_code)]
pub async fn onboarded_session(config: Config) -> (ZoltarSession, SecureStore) {
    let (session, store) = test_session(config);
    session
        .profiles()
        .onboard("Ada", Some("08/01/1990"), true, false)
        .await
        .expect("onboarding should succeed");
    (session, store)
}

/// Config with a fixed N-second cooldown.
#[allow(dead_code)]
pub fn fixed_cooldown_config(secs: i64) -> Config {
    Config {
        cooldown: CooldownPolicy::FixedSeconds(secs),
        ..test_config()
    }
}
