use super::*;
use proptest::prelude::*;

fn arb_text() -> impl Strategy<Value = String> {
    "\\PC{0,32}"
}

/// Generates an arbitrary Config
fn arb_config() -> impl Strategy<Value = Config> {
    (
        arb_text(),
        arb_text(),
        any::<u16>(),
        prop::option::of(arb_text()),
        any::<i64>(),
        (any::<u32>(), any::<u32>(), any::<u32>()),
        prop::option::of(arb_text().prop_map(PathBuf::from)),
    )
        .prop_map(
            |(database_url, host, port, token_secret, token_ttl_hours, (m, t, p), log_dir)| Config {
                database_url,
                host,
                port,
                token_secret,
                token_ttl_hours,
                hash_memory_kib: m,
                hash_iterations: t,
                hash_parallelism: p,
                log_dir,
            },
        )
}

/// Generates an arbitrary ConfigUpdate
fn arb_config_update() -> impl Strategy<Value = ConfigUpdate> {
    (
        prop::option::of(arb_text()),
        prop::option::of(arb_text()),
        prop::option::of(any::<u16>()),
        prop::option::of(arb_text()),
        prop::option::of(any::<i64>()),
        (
            prop::option::of(any::<u32>()),
            prop::option::of(any::<u32>()),
            prop::option::of(any::<u32>()),
        ),
        prop::option::of(arb_text().prop_map(PathBuf::from)),
    )
        .prop_map(
            |(database_url, host, port, token_secret, token_ttl_hours, (m, t, p), log_dir)| ConfigUpdate {
                database_url,
                host,
                port,
                token_secret,
                token_ttl_hours,
                hash_memory_kib: m,
                hash_iterations: t,
                hash_parallelism: p,
                log_dir,
            },
        )
}

// ============================================================================
// apply_update algebraic properties
// ============================================================================

proptest! {
    /// Applying an empty update changes nothing
    #[test]
    fn prop_apply_update_identity(config in arb_config()) {
        prop_assert_eq!(config.clone().apply_update(ConfigUpdate::default()), config);
    }

    /// Every field present in the update wins, every absent field survives
    #[test]
    fn prop_apply_update_field_wise(config in arb_config(), update in arb_config_update()) {
        let merged = config.clone().apply_update(update.clone());

        prop_assert_eq!(&merged.database_url, update.database_url.as_ref().unwrap_or(&config.database_url));
        prop_assert_eq!(&merged.host, update.host.as_ref().unwrap_or(&config.host));
        prop_assert_eq!(merged.port, update.port.unwrap_or(config.port));
        prop_assert_eq!(&merged.token_secret, &update.token_secret.clone().or(config.token_secret.clone()));
        prop_assert_eq!(merged.token_ttl_hours, update.token_ttl_hours.unwrap_or(config.token_ttl_hours));
        prop_assert_eq!(merged.hash_memory_kib, update.hash_memory_kib.unwrap_or(config.hash_memory_kib));
        prop_assert_eq!(&merged.log_dir, &update.log_dir.clone().or(config.log_dir.clone()));
    }

    /// Applying the same update twice is the same as applying it once
    #[test]
    fn prop_apply_update_idempotent(config in arb_config(), update in arb_config_update()) {
        let once = config.clone().apply_update(update.clone());
        let twice = once.clone().apply_update(update);
        prop_assert_eq!(once, twice);
    }

    /// Later layers take precedence: b over a is the same as merging a then b
    #[test]
    fn prop_apply_update_last_wins(config in arb_config(), a in arb_config_update(), b in arb_config_update()) {
        let layered = config.clone().apply_update(a.clone()).apply_update(b.clone());
        prop_assert_eq!(layered.port, b.port.or(a.port).unwrap_or(config.port));
        prop_assert_eq!(layered.host, b.host.or(a.host).unwrap_or(config.host));
    }

    /// Any TOML written from an update reads back as the same update
    #[test]
    fn prop_config_update_toml_roundtrip(update in arb_config_update()) {
        let text = toml::to_string(&update).unwrap();
        let parsed: ConfigUpdate = toml::from_str(&text).unwrap();
        prop_assert_eq!(parsed, update);
    }
}
