use std::sync::OnceLock;
use std::time::Instant;

static BOOT: OnceLock<Instant> = OnceLock::new();

/// Pins the uptime origin. Call first thing in `main`; later calls are no-ops.
pub fn mark_boot() {
    BOOT.get_or_init(Instant::now);
}

/// Milliseconds since boot, the `timestamp` of every reading.
pub fn uptime_ms() -> u64 {
    let elapsed = BOOT.get_or_init(Instant::now).elapsed();
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

pub(crate) fn get_uptime_string() -> String {
    let millis = uptime_ms();
    format!("[{:>4}.{:03}s]", millis / 1_000, millis % 1_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_is_monotonic() {
        mark_boot();
        let first = uptime_ms();
        let second = uptime_ms();
        assert!(second >= first);
    }

    #[test]
    fn uptime_string_has_millisecond_field() {
        let text = get_uptime_string();
        assert!(text.starts_with('['));
        assert!(text.ends_with("s]"));
        let dot = text.find('.').unwrap();
        assert_eq!(&text[dot + 4..], "s]");
    }
}
