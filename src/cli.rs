use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{CliOverrides, DisplayMode};
use crate::dns::Role;
use crate::packet::role_from_flags;

/// dnspeek - decode DNS traffic into readable reports
#[derive(Parser, Debug)]
#[command(name = "dnspeek", version, about = "Capture DNS traffic and print decoded messages")]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Capture device; prompted for when neither given here nor configured
    #[arg(short, long, value_name = "NAME")]
    pub interface: Option<String>,

    /// BPF filter applied to the capture
    #[arg(short, long, value_name = "BPF")]
    pub filter: Option<String>,

    /// Replay a pcap file instead of capturing live
    #[arg(short, long, value_name = "FILE", conflicts_with = "interface")]
    pub read: Option<PathBuf>,

    /// Save captured packets to a pcap file
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Decode a single DNS message given as hex (whitespace allowed)
    #[arg(long, value_name = "HEX", conflicts_with_all = ["read", "interface", "export"])]
    pub hex: Option<String>,

    /// Role of the --hex message; `auto` reads the QR bit
    #[arg(long, value_enum, default_value_t = RoleArg::Auto)]
    pub role: RoleArg,

    /// How decoded messages are shown
    #[arg(short, long, value_enum)]
    pub output: Option<DisplayMode>,

    /// Print full reports to stdout instead of the TUI (same as `-o report`)
    #[arg(long, conflicts_with = "output")]
    pub plain: bool,

    /// Log level (trace, debug, info, warn, error) or a tracing filter
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Query,
    Response,
    Auto,
}

impl RoleArg {
    pub fn resolve(self, message: &[u8]) -> Role {
        match self {
            RoleArg::Query => Role::Query,
            RoleArg::Response => Role::Response,
            RoleArg::Auto => role_from_flags(message),
        }
    }
}

impl CliArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            interface: self.interface.clone(),
            filter: self.filter.clone(),
            export: self.export.clone(),
            mode: self.output.or(self.plain.then_some(DisplayMode::Report)),
            log_level: self.log_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CliArgs::try_parse_from(["dnspeek"]).unwrap();
        assert!(args.config.is_none());
        assert_eq!(args.role, RoleArg::Auto);
        assert!(args.output.is_none());
    }

    #[test]
    fn hex_mode() {
        let args = CliArgs::try_parse_from(["dnspeek", "--hex", "aaaa 0100", "--role", "query", "-o", "summary"])
            .unwrap();
        assert_eq!(args.hex.as_deref(), Some("aaaa 0100"));
        assert_eq!(args.role, RoleArg::Query);
        assert_eq!(args.output, Some(DisplayMode::Summary));
    }

    #[test]
    fn read_conflicts_with_interface() {
        assert!(CliArgs::try_parse_from(["dnspeek", "-r", "x.pcap", "-i", "eth0"]).is_err());
        assert!(CliArgs::try_parse_from(["dnspeek", "--hex", "00", "-r", "x.pcap"]).is_err());
    }

    #[test]
    fn plain_means_report() {
        let args = CliArgs::try_parse_from(["dnspeek", "--plain"]).unwrap();
        assert_eq!(args.overrides().mode, Some(DisplayMode::Report));
        assert!(CliArgs::try_parse_from(["dnspeek", "--plain", "-o", "tui"]).is_err());
    }

    #[test]
    fn overrides_carry_cli_values() {
        let args = CliArgs::try_parse_from(["dnspeek", "-i", "eth0", "--log-level", "debug"]).unwrap();
        let overrides = args.overrides();
        assert_eq!(overrides.interface.as_deref(), Some("eth0"));
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert!(overrides.filter.is_none());
    }

    #[test]
    fn auto_role_reads_qr_bit() {
        assert_eq!(RoleArg::Auto.resolve(&[0, 0, 0x81, 0x80]), Role::Response);
        assert_eq!(RoleArg::Auto.resolve(&[0, 0, 0x01, 0x00]), Role::Query);
        assert_eq!(RoleArg::Response.resolve(&[0, 0, 0x01, 0x00]), Role::Response);
    }
}
