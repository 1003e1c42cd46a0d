use sysinfo::System;

use super::{or_sentinel, run_command, CollectError, UNKNOWN};

const NO_HOSTNAME: &str = "Not Defined";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OsInfo {
    pub name: String,
    pub kernel: String,
    pub hostname: String,
}

pub(super) fn collect_os() -> OsInfo {
    OsInfo {
        name: os_name(),
        kernel: kernel_label(kernel_family(), System::kernel_version()),
        hostname: System::host_name()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| NO_HOSTNAME.to_string()),
    }
}

fn os_name() -> String {
    if cfg!(target_os = "macos") {
        let product = run_command("sw_vers", &["-productName"]);
        let version = run_command("sw_vers", &["-productVersion"]);
        if let (Ok(product), Ok(version)) = (product, version) {
            return join_name(Some(product), Some(version));
        }
    }
    join_name(System::name(), System::os_version())
}

fn join_name(name: Option<String>, version: Option<String>) -> String {
    let name = or_sentinel(name.ok_or(CollectError::Missing { what: "os name" }), "os name", UNKNOWN);
    match version.filter(|version| !version.is_empty()) {
        Some(version) => format!("{name} {version}"),
        None => name,
    }
}

fn kernel_family() -> &'static str {
    match std::env::consts::OS {
        "linux" | "android" => "Linux",
        "macos" | "ios" => "Darwin",
        "windows" => "Windows NT",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

fn kernel_label(family: &str, version: Option<String>) -> String {
    match version.filter(|version| !version.is_empty()) {
        Some(version) => format!("{family} {version}"),
        None => family.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_name() {
        assert_eq!(
            join_name(Some("macOS".to_string()), Some("14.5".to_string())),
            "macOS 14.5"
        );
        assert_eq!(join_name(Some("Arch Linux".to_string()), None), "Arch Linux");
        assert_eq!(join_name(None, Some("1".to_string())), "unknown 1");
    }

    #[test]
    fn test_kernel_label() {
        assert_eq!(kernel_label("Darwin", Some("23.5.0".to_string())), "Darwin 23.5.0");
        assert_eq!(kernel_label("Linux", Some(String::new())), "Linux");
    }

    #[test]
    fn test_collect_os_never_empty() {
        let os = collect_os();
        assert!(!os.name.is_empty());
        assert!(!os.kernel.is_empty());
        assert!(!os.hostname.is_empty());
    }
}
