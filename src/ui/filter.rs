/// BPF filters offered in the TUI filter menu, as `(label, expression)`.
///
/// The first entry is always the default DNS filter.
pub fn bpf_filter_suggestions(interface_name: &str) -> Vec<(String, String)> {
    let is_loopback = interface_name.starts_with("lo")
        || interface_name.starts_with("utun")
        || interface_name.contains("loop");

    let mut filters = vec![
        ("All DNS", "udp port 53"),
        ("Queries only", "udp dst port 53"),
        ("Responses only", "udp src port 53"),
        ("DNS over IPv4", "ip and udp port 53"),
        ("DNS over IPv6", "ip6 and udp port 53"),
    ];

    if is_loopback {
        filters.push(("Local stub resolver", "udp port 53 and host 127.0.0.53"));
    } else {
        filters.push(("Exclude local stub resolver", "udp port 53 and not host 127.0.0.53"));
    }
    filters.push(("All UDP (counts non-DNS too)", "udp"));
    filters.push(("No filter", ""));

    filters
        .into_iter()
        .map(|(label, bpf)| (label.to_string(), bpf.to_string()))
        .collect()
} // bpf_filter_suggestions

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dns_filter_first() {
        let filters = bpf_filter_suggestions("eth0");
        assert_eq!(filters[0].1, "udp port 53");
        assert!(filters.iter().any(|(_, f)| f.contains("not host 127.0.0.53")));
    }

    #[test]
    fn loopback_gets_stub_resolver_filter() {
        let filters = bpf_filter_suggestions("lo");
        assert!(filters.iter().any(|(_, f)| f == "udp port 53 and host 127.0.0.53"));
        assert!(!filters.iter().any(|(_, f)| f.contains("not host")));
    }
}
