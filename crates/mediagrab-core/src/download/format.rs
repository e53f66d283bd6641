//! Human-readable formatting of byte counts, rates and durations.

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Format a transfer rate, `"--"` when unknown.
#[allow(clippy::cast_precision_loss)]
pub fn format_speed(speed: Option<u64>) -> String {
    let Some(speed) = speed else {
        return "--".to_string();
    };
    match speed {
        s if s < KIB => format!("{s} B/s"),
        s if s < MIB => format!("{:.1} KB/s", s as f64 / KIB as f64),
        s => format!("{:.1} MB/s", s as f64 / MIB as f64),
    }
}

/// Format a remaining-time estimate in seconds, `"--:--"` when unknown.
pub fn format_eta(eta: Option<u64>) -> String {
    let Some(seconds) = eta else {
        return "--:--".to_string();
    };
    match seconds {
        s if s < 60 => format!("0:{s:02}"),
        s if s < 3600 => format!("{}:{:02}", s / 60, s % 60),
        s => format!("{}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60),
    }
}

/// Format a byte count.
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    match bytes {
        b if b < KIB => format!("{b} B"),
        b if b < MIB => format!("{:.1} KB", b as f64 / KIB as f64),
        b if b < GIB => format!("{:.1} MB", b as f64 / MIB as f64),
        b => format!("{:.2} GB", b as f64 / GIB as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(None), "--");
        assert_eq!(format_speed(Some(0)), "0 B/s");
        assert_eq!(format_speed(Some(1023)), "1023 B/s");
        assert_eq!(format_speed(Some(1536)), "1.5 KB/s");
        assert_eq!(format_speed(Some(5 * MIB)), "5.0 MB/s");
    }

    #[test]
    fn test_format_eta() {
        assert_eq!(format_eta(None), "--:--");
        assert_eq!(format_eta(Some(7)), "0:07");
        assert_eq!(format_eta(Some(125)), "2:05");
        assert_eq!(format_eta(Some(3725)), "1:02:05");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * MIB + MIB / 2), "3.5 MB");
        assert_eq!(format_bytes(2 * GIB + GIB / 4), "2.25 GB");
    }
}
