//! Network interface discovery
//!
//! The interface set is read once at startup. Interfaces added or removed
//! later are not picked up until the exporter restarts.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

/// Default sysfs directory listing network interfaces
pub const SYS_CLASS_NET: &str = "/sys/class/net";

/// List the interface names under `net_root` in directory order.
///
/// An unlistable directory yields an empty list; the exporter then publishes
/// no per-interface samples.
pub fn enumerate_interfaces(net_root: &Path) -> Vec<String> {
    let entries = match fs::read_dir(net_root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                "Cannot list network interfaces in {}: {}",
                net_root.display(),
                e
            );
            return Vec::new();
        }
    };

    let mut interfaces = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry in {}: {}", net_root.display(), e);
                continue;
            }
        };
        match entry.file_name().into_string() {
            Ok(name) => interfaces.push(name),
            Err(name) => debug!("Skipping non UTF-8 interface name {:?}", name),
        }
    }
    interfaces
}
