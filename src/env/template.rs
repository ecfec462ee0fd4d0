//! Immutable environment templates, one per upgrade class.

use std::collections::BTreeMap;

use crate::engine::UpgradeClass;
use crate::env::environment::EnvValue;
use crate::env::keys;

/// The three base templates built once at bind time. Each request deep
/// copies the template matching its upgrade class; templates are never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct EnvTemplates {
    none: BTreeMap<String, EnvValue>,
    websocket: BTreeMap<String, EnvValue>,
    sse: BTreeMap<String, EnvValue>,
}

impl EnvTemplates {
    /// Build the templates. `static_files` enables the sendfile capability
    /// advertisement on the no-upgrade template.
    pub fn build(static_files: bool) -> Self {
        let mut base: BTreeMap<String, EnvValue> = BTreeMap::new();
        base.insert(keys::SCRIPT_NAME.into(), keys::EMPTY.into());
        base.insert(keys::URL_SCHEME.into(), keys::SCHEME_HTTP.into());
        base.insert(
            "rack.version".into(),
            EnvValue::List(vec!["1".into(), "3".into()]),
        );
        base.insert("rack.hijack?".into(), "true".into());
        base.insert("rack.multiprocess".into(), "true".into());
        base.insert("rack.multithread".into(), "true".into());
        base.insert("rack.run_once".into(), "false".into());

        let mut websocket = base.clone();
        websocket.insert(keys::UPGRADE_QUERY.into(), "websocket".into());

        let mut sse = base.clone();
        sse.insert(keys::UPGRADE_QUERY.into(), "sse".into());

        // Sendfile is advertised on ordinary requests only.
        let mut none = base;
        if static_files {
            none.insert(keys::SENDFILE_TYPE.into(), keys::X_SENDFILE.into());
            none.insert(keys::SENDFILE_TYPE_HEADER.into(), keys::X_SENDFILE.into());
        }

        Self { none, websocket, sse }
    }

    /// The template for the given upgrade class.
    pub fn select(&self, class: UpgradeClass) -> &BTreeMap<String, EnvValue> {
        match class {
            UpgradeClass::None => &self.none,
            UpgradeClass::WebSocket => &self.websocket,
            UpgradeClass::Sse => &self.sse,
        }
    }
}
