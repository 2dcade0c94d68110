use std::io::{self, BufRead, Write};

use pcap::Device;

/// Lists devices on stdout and asks for one. `None` means the user quit.
pub fn prompt_device_selection(devices: &[Device]) -> io::Result<Option<usize>> {
    let labels: Vec<String> = devices.iter().map(device_label).collect();
    let stdin = io::stdin();
    select_device(&labels, &mut stdin.lock(), &mut io::stdout())
}

fn device_label(dev: &Device) -> String {
    match &dev.desc {
        Some(desc) => format!("{} ({})", dev.name, desc),
        None => dev.name.clone(),
    }
}

fn select_device<R: BufRead, W: Write>(labels: &[String], input: &mut R, out: &mut W) -> io::Result<Option<usize>> {
    writeln!(out, "Available interfaces:")?;
    for (i, label) in labels.iter().enumerate() {
        writeln!(out, "  [{}] {}", i, label)?;
    }

    loop {
        write!(out, "Select an interface by number (or 'q' to quit): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF
            return Ok(None);
        }

        let choice = line.trim();
        if choice.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        match choice.parse::<usize>() {
            Ok(index) if index < labels.len() => return Ok(Some(index)),
            _ => writeln!(out, "Invalid selection")?,
        }
    }
}
