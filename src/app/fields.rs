use crate::system::Facts;
use crate::ui::{Field, Report, Section};

/// Lays out collected facts in report order.
pub(crate) fn build_report(facts: &Facts, title: &str, subtitle: Option<&str>) -> Report {
    let Facts {
        os,
        network,
        cpu,
        memory,
        disk,
        login,
    } = facts;

    let mut network_fields = vec![
        Field::text("HOSTNAME", &network.hostname),
        Field::text("MACHINE IP", &network.machine_ip),
        Field::text("CLIENT  IP", &network.client_ip),
    ];
    network_fields.extend(
        network
            .dns
            .iter()
            .enumerate()
            .map(|(idx, server)| Field::text(format!("DNS  IP {}", idx + 1), server)),
    );
    network_fields.push(Field::text("USER", &network.user));

    let mut login_fields = vec![Field::text("LAST LOGIN", &login.time)];
    if let Some(ip) = &login.ip {
        login_fields.push(Field::text("", ip));
    }
    login_fields.push(Field::text("UPTIME", &login.uptime));

    Report {
        title: title.to_string(),
        subtitle: subtitle.map(str::to_string),
        sections: vec![
            Section::new(
                "os",
                vec![Field::text("OS", &os.name), Field::text("KERNEL", &os.kernel)],
            ),
            Section::new("network", network_fields),
            Section::new(
                "cpu",
                vec![
                    Field::text("PROCESSOR", &cpu.model),
                    Field::text("CORES", cpu.cores_label()),
                    Field::text("FREQUENCY", cpu.frequency_label()),
                    Field::text("HYPERVISOR", &cpu.hypervisor),
                    Field::text("CPU USAGE", format!("{:.2}%", cpu.usage_percent())),
                    Field::bar("LOAD  1m", cpu.load_percent(cpu.load_1)),
                    Field::bar("LOAD  5m", cpu.load_percent(cpu.load_5)),
                    Field::bar("LOAD 15m", cpu.load_percent(cpu.load_15)),
                ],
            ),
            Section::new(
                "disk",
                vec![
                    Field::text("VOLUME", disk.label("GB")),
                    Field::bar("DISK USAGE", disk.percent()),
                ],
            ),
            Section::new(
                "memory",
                vec![
                    Field::text("MEMORY", memory.label("GiB")),
                    Field::bar("USAGE", memory.percent()),
                ],
            ),
            Section::new("login", login_fields),
        ],
    }
}
