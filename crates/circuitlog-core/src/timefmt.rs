//! Clock-face and human-readable duration formatting.

/// Format milliseconds as a clock string.
///
/// With `with_hours` the result is `HH:MM:SS`; without, minutes are not
/// capped at 60 (`5420s` renders as `90:20`).
pub fn format_time(ms: u64, with_hours: bool) -> String {
    let total_secs = ms / 1000;
    let secs = total_secs % 60;
    if with_hours {
        let hours = total_secs / 3600;
        let mins = (total_secs / 60) % 60;
        format!("{hours:02}:{mins:02}:{secs:02}")
    } else {
        let mins = total_secs / 60;
        format!("{mins:02}:{secs:02}")
    }
}

/// Spell a duration out in full words: "1 hour 2 minutes 1 second".
/// Zero components are omitted.
pub fn humanize_seconds(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let mins = (total_secs / 60) % 60;
    let secs = total_secs % 60;

    let mut parts = Vec::new();
    push_unit(&mut parts, hours, "hour");
    push_unit(&mut parts, mins, "minute");
    push_unit(&mut parts, secs, "second");
    parts.join(" ")
}

fn push_unit(parts: &mut Vec<String>, count: u64, unit: &str) {
    match count {
        0 => {}
        1 => parts.push(format!("1 {unit}")),
        n => parts.push(format!("{n} {unit}s")),
    }
}
