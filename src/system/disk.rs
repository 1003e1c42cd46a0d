use std::path::Path;

use sysinfo::{Disk, Disks};

use super::UsageInfo;

/// Usage of the root volume, or of the largest disk when `/` is not listed.
pub(super) fn collect_disk() -> UsageInfo {
    let disks = Disks::new_with_refreshed_list();
    let root = disks
        .list()
        .iter()
        .find(|disk| disk.mount_point() == Path::new("/"))
        .or_else(|| disks.list().iter().max_by_key(|disk| disk.total_space()));

    match root {
        Some(disk) => usage_of(disk),
        None => {
            tracing::warn!("no disks reported");
            UsageInfo::default()
        }
    }
}

fn usage_of(disk: &Disk) -> UsageInfo {
    usage_from_space(disk.total_space(), disk.available_space())
}

/// sysinfo only reports space available to unprivileged users, so blocks
/// reserved for root count as used.
fn usage_from_space(total: u64, available: u64) -> UsageInfo {
    UsageInfo {
        used: total.saturating_sub(available),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GB: u64 = 1_000_000_000;

    #[test]
    fn test_usage_counts_reserved_blocks_as_used() {
        // 400 GB volume, 120 GB free of which 20 GB is reserved
        let usage = usage_from_space(400 * GB, 100 * GB);
        assert_eq!(usage.used, 300 * GB);
        assert_eq!(usage.total, 400 * GB);
        assert_eq!(usage.percent(), 75.0);
    }

    #[test]
    fn test_usage_never_underflows() {
        assert_eq!(usage_from_space(10, 20).used, 0);
        assert_eq!(usage_from_space(0, 0).percent(), 0.0);
    }
}
