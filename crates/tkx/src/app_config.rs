//! 🔧 App Configuration — the sacred TOML-to-struct pipeline.
//!
//! 📡 "Config not found: We looked everywhere. Under the couch. Behind the fridge.
//! In the junk drawer. Nothing." — every developer at 3am 🦆
//!
//! 🏗️ Powered by Figment. There is exactly one question this config answers:
//! where does the tunnel document come from? With no file and no env vars the
//! answer is `../input/tunnels.json`, same as it ever was.
//!
//! 📐 Layers, last one wins:
//!   1. built-in defaults (`kind = "file"`, the old hardcoded path)
//!   2. env vars `TKX_*`, nested with `__`: `TKX_SOURCE_CONFIG__FILE_NAME=/srv/t.json`
//!   3. the TOML file, if one was given
//!
//! ```toml
//! [source_config]
//! kind = "file"            # or "in_memory"
//! file_name = "/srv/tunnels.json"
//! ```
//!
//! The backend is picked by a `kind` field rather than a `[source_config.File]`
//! table: env vars arrive lowercased, and a tag field merges key by key with
//! the TOML instead of colliding with it.

use anyhow::Context;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub use crate::backends::{FileSourceConfig, InMemorySourceConfig};

/// 🎭 Which backend produces the document, picked by `kind`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    File(FileSourceConfig),
    InMemory(InMemorySourceConfig),
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::File(FileSourceConfig::default())
    }
}

/// 📦 The AppConfig: one struct to rule them all. It's a small kingdom.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub source_config: SourceConfig,
}

/// 🚀 Load the config: defaults, then env vars (`TKX_*`, nested with `__`), then an
/// optional TOML file.
///
/// 📐 DESIGN NOTE:
///   - `config_file_name` None  → defaults + env vars.
///   - `config_file_name` Some  → defaults + env vars + TOML file. TOML wins on conflicts.
///
/// 💀 Returns an error if the merged config doesn't deserialize. The context says which
/// file was involved, so you don't have to guess.
pub fn load_config(config_file_name: Option<&Path>) -> anyhow::Result<AppConfig> {
    info!(
        "🔧 Loading configuration: {:#?}",
        config_file_name.unwrap_or(Path::new(""))
    );

    let config = Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(Env::prefixed("TKX_").split("__"));

    let config = match config_file_name {
        Some(file_name) => config.merge(Toml::file(file_name)),
        None => config,
    };

    let context_msg = match config_file_name {
        Some(path) => format!(
            "💀 Failed to parse configuration from file '{}' and environment variables (TKX_*). \
             Check the [source_config] table, it's the only one we read.",
            path.display()
        ),
        None => "💀 Failed to parse configuration from environment variables (TKX_*). \
                 No file was provided, this one's all on the environment."
            .to_string(),
    };

    config.extract().context(context_msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::path::PathBuf;

    // 🧪 Every test runs in a Jail: its own cwd, its own env, restored afterwards.
    // load_config reads the process env, so a stray TKX_* from a neighbour test would
    // otherwise leak in. The Jail lock keeps them in single file.

    fn load(config_file: Option<&str>) -> figment::error::Result<AppConfig> {
        load_config(config_file.map(Path::new)).map_err(|err| format!("{err:#}").into())
    }

    fn file_source(file_name: &str) -> SourceConfig {
        SourceConfig::File(FileSourceConfig { file_name: PathBuf::from(file_name) })
    }

    #[test]
    fn the_one_where_a_toml_file_points_somewhere_else() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "tkx.toml",
                r#"
                [source_config]
                kind = "file"
                file_name = "/srv/tunnels/prod.json"
                "#,
            )?;

            let app_config = load(Some("tkx.toml"))?;
            assert_eq!(app_config.source_config, file_source("/srv/tunnels/prod.json"));
            Ok(())
        });
    }

    #[test]
    fn the_one_where_the_document_rides_along_inside_the_config() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "tkx.toml",
                r#"
                [source_config]
                kind = "in_memory"
                document = '{"s1": {"dc1": {"a_b_c_x_1": {}}}}'
                "#,
            )?;

            match load(Some("tkx.toml"))?.source_config {
                SourceConfig::InMemory(in_mem) => assert!(in_mem.document.contains("a_b_c_x_1")),
                honestly_who_knows => panic!("💀 Expected InMemory source config, got {honestly_who_knows:?}"),
            }
            Ok(())
        });
    }

    #[test]
    fn the_one_where_defaults_show_up_uninvited_but_helpful() {
        Jail::expect_with(|jail| {
            jail.create_file("tkx.toml", "")?;
            assert_eq!(load(Some("tkx.toml"))?, AppConfig::default());
            assert_eq!(load(None)?.source_config, file_source("../input/tunnels.json"));
            Ok(())
        });
    }

    #[test]
    fn the_one_where_picking_file_without_a_name_keeps_the_default_path() {
        Jail::expect_with(|jail| {
            jail.create_file("tkx.toml", "[source_config]\nkind = \"file\"\n")?;
            assert_eq!(load(Some("tkx.toml"))?, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn the_one_where_a_typo_in_the_backend_kind_is_fatal() {
        Jail::expect_with(|jail| {
            jail.create_file("tkx.toml", "[source_config]\nkind = \"floppy\"\n")?;

            let err = load_config(Some(Path::new("tkx.toml"))).expect_err("💀 unknown backend should not parse");
            assert!(err.to_string().contains("Failed to parse configuration"));
            Ok(())
        });
    }

    #[test]
    fn the_one_where_env_vars_alone_move_the_input() {
        Jail::expect_with(|jail| {
            jail.set_env("TKX_SOURCE_CONFIG__FILE_NAME", "/x/y.json");
            assert_eq!(load(None)?.source_config, file_source("/x/y.json"));
            Ok(())
        });
    }

    #[test]
    fn the_one_where_env_vars_can_switch_the_backend_entirely() {
        Jail::expect_with(|jail| {
            jail.set_env("TKX_SOURCE_CONFIG__KIND", "in_memory");
            jail.set_env("TKX_SOURCE_CONFIG__DOCUMENT", "not-json-and-that-is-fine-here");

            match load(None)?.source_config {
                SourceConfig::InMemory(in_mem) => assert_eq!(in_mem.document, "not-json-and-that-is-fine-here"),
                honestly_who_knows => panic!("💀 Expected InMemory source config, got {honestly_who_knows:?}"),
            }
            Ok(())
        });
    }

    #[test]
    fn the_one_where_toml_wins_the_argument_with_env() {
        Jail::expect_with(|jail| {
            jail.set_env("TKX_SOURCE_CONFIG__FILE_NAME", "/from/env.json");
            jail.create_file(
                "tkx.toml",
                r#"
                [source_config]
                file_name = "/from/toml.json"
                "#,
            )?;

            assert_eq!(load(Some("tkx.toml"))?.source_config, file_source("/from/toml.json"));
            // -- 🧪 and without the file, env is back in charge
            assert_eq!(load(None)?.source_config, file_source("/from/env.json"));
            Ok(())
        });
    }
}
