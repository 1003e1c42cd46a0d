use sysinfo::System;

use crate::util::bytes_to_gib;

/// Used/total byte counts for a resource shown with a usage bar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsageInfo {
    pub used: u64,
    pub total: u64,
}

impl UsageInfo {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f64 / self.total as f64 * 100.0
    }

    /// `"used/total unit [pct%]"` with two decimals throughout.
    pub fn label(&self, unit: &str) -> String {
        format!(
            "{:.2}/{:.2} {unit} [{:.2}%]",
            bytes_to_gib(self.used),
            bytes_to_gib(self.total),
            self.percent()
        )
    }
}

pub(super) fn collect_memory(system: &System) -> UsageInfo {
    let usage = UsageInfo {
        used: system.used_memory(),
        total: system.total_memory(),
    };
    if usage.total == 0 {
        tracing::warn!("total memory reported as zero");
    }
    usage
}
