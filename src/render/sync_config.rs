//! octoDNS sync configuration
//!
//! Reads compiled zones with the YAML provider and pushes every zone (`*`)
//! to Cloudflare. The API token is referenced by environment variable name
//! only; octoDNS resolves it when the config is used.

use crate::domain::Config;
use crate::utils::normalize_path;
use serde::Serialize;
use std::collections::BTreeMap;

pub const CONFIG_PROVIDER: &str = "config";
pub const UPSTREAM_PROVIDER: &str = "cloudflare";
pub const YAML_PROVIDER_CLASS: &str = "octodns.provider.yaml.YamlProvider";
pub const CLOUDFLARE_PROVIDER_CLASS: &str = "octodns_cloudflare.CloudflareProvider";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncConfig {
    pub providers: Providers,
    pub zones: BTreeMap<String, ZoneRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Providers {
    pub config: YamlProvider,
    pub cloudflare: CloudflareProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YamlProvider {
    pub class: String,
    pub directory: String,
    pub default_ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudflareProvider {
    pub class: String,
    pub token: String,
    pub pagerules: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneRule {
    pub sources: Vec<String>,
    pub targets: Vec<String>,
}

pub fn build_sync_config(config: &Config) -> SyncConfig {
    let mut zones = BTreeMap::new();
    zones.insert(
        "*".to_string(),
        ZoneRule {
            sources: vec![CONFIG_PROVIDER.to_string()],
            targets: vec![UPSTREAM_PROVIDER.to_string()],
        },
    );

    SyncConfig {
        providers: Providers {
            config: YamlProvider {
                class: YAML_PROVIDER_CLASS.to_string(),
                directory: normalize_path(&config.output_dir.to_string_lossy()),
                default_ttl: config.default_ttl,
            },
            cloudflare: CloudflareProvider {
                class: CLOUDFLARE_PROVIDER_CLASS.to_string(),
                token: format!("env/{}", config.token_env),
                pagerules: config.pagerules,
            },
        },
        zones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;
    use std::path::PathBuf;

    #[test]
    fn sync_config_has_expected_shape() {
        let cfg = build_sync_config(&Config::default());
        let value = serde_yaml::to_value(&cfg).expect("value");

        let yaml = &value["providers"]["config"];
        assert_eq!(yaml["class"], Value::from(YAML_PROVIDER_CLASS));
        assert_eq!(yaml["directory"], Value::from("compiled"));
        assert_eq!(yaml["default_ttl"], Value::from(300));

        let upstream = &value["providers"]["cloudflare"];
        assert_eq!(upstream["token"], Value::from("env/CLOUDFLARE_API_TOKEN"));
        assert_eq!(upstream["pagerules"], Value::from(false));

        let rule = &value["zones"]["*"];
        assert_eq!(rule["sources"], Value::from(vec!["config"]));
        assert_eq!(rule["targets"], Value::from(vec!["cloudflare"]));
    }

    #[test]
    fn providers_render_in_fixed_order() {
        let rendered = serde_yaml::to_string(&build_sync_config(&Config::default())).expect("yaml");
        let config_pos = rendered.find("  config:").expect("config provider");
        let upstream_pos = rendered.find("  cloudflare:").expect("upstream provider");
        assert!(config_pos < upstream_pos);
        assert!(rendered.starts_with("providers:"));
    }

    #[test]
    fn directory_uses_forward_slashes_and_settings_flow_through() {
        let cfg = Config {
            output_dir: PathBuf::from("build\\compiled"),
            default_ttl: 3600,
            token_env: "CF_TOKEN".to_string(),
            pagerules: true,
            ..Config::default()
        };
        let sync = build_sync_config(&cfg);
        assert_eq!(sync.providers.config.directory, "build/compiled");
        assert_eq!(sync.providers.config.default_ttl, 3600);
        assert_eq!(sync.providers.cloudflare.token, "env/CF_TOKEN");
        assert!(sync.providers.cloudflare.pagerules);
    }
}
