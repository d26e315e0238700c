// SPDX-License-Identifier: MIT

//! Built-in plugin descriptors.

use tracing::debug;

use crate::registry::{PluginDescriptor, PluginError, PluginInstance};

/// Default heartbeat period in seconds.
const DEFAULT_HEARTBEAT_INTERVAL: u64 = 60;

/// All plugins compiled into the daemon.
pub fn builtins() -> Vec<PluginDescriptor> {
    vec![
        PluginDescriptor {
            name: "console",
            help: "interactive debug console",
            init: console_init,
        },
        PluginDescriptor {
            name: "heartbeat",
            help: "periodic liveness beacon, args: interval=SECONDS",
            init: heartbeat_init,
        },
    ]
}

fn console_init(instance: &PluginInstance) -> Result<(), PluginError> {
    if let Some(arg) = instance.args.first() {
        return Err(PluginError::UnknownArgument {
            key: arg.key.clone(),
        });
    }
    debug!(instance = %instance.instance, "console ready");
    Ok(())
}

fn heartbeat_init(instance: &PluginInstance) -> Result<(), PluginError> {
    let mut interval = DEFAULT_HEARTBEAT_INTERVAL;
    for arg in &instance.args {
        match (arg.key.as_str(), arg.value.as_deref()) {
            ("interval", Some(value)) => {
                interval = value.parse().map_err(|_| PluginError::InvalidArgument {
                    key: arg.key.clone(),
                    value: value.to_string(),
                    reason: "expected a whole number of seconds".to_string(),
                })?;
            }
            ("interval", None) => {
                return Err(PluginError::InvalidArgument {
                    key: arg.key.clone(),
                    value: String::new(),
                    reason: "interval needs a value".to_string(),
                });
            }
            (key, _) => {
                return Err(PluginError::UnknownArgument {
                    key: key.to_string(),
                });
            }
        }
    }
    debug!(instance = %instance.instance, interval, "heartbeat configured");
    Ok(())
}
