use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex};

use crate::packet::PacketKind;

pub type PacketCounts = Arc<Mutex<HashMap<PacketKind, usize>>>;

/// Formats per-kind packet counts, in a stable order, skipping empty
/// buckets.
pub fn format_packet_summary(counts: &HashMap<PacketKind, usize>) -> String {
    let mut out = String::from("Packet summary:\n");
    let total: usize = counts.values().sum();

    if total == 0 {
        out.push_str("  No packets captured\n");
        return out;
    }

    for kind in PacketKind::ALL {
        if let Some(&count) = counts.get(&kind).filter(|&&c| c > 0) {
            let _ = writeln!(out, "  {:<13} {}", kind.to_string(), count);
        }
    }
    let _ = writeln!(out, "  {:<13} {}", "Total", total);
    out
}

/// Prints a summary of captured packets by kind.
pub fn print_packet_summary(counts: &PacketCounts) {
    let snapshot = match counts.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    println!("\n{}", format_packet_summary(&snapshot));
}
