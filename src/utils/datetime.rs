use jiff::Zoned;

/// Format a timestamp as wall-clock `HH:MM:SS` in its own time zone.
pub fn format_clock(time: &Zoned) -> String {
    time.strftime("%H:%M:%S").to_string()
}

/// Label for the Refresh entry, mentioning the last successful refresh when known.
pub fn refresh_label(last_refresh: Option<&Zoned>) -> String {
    match last_refresh {
        Some(time) => format!("Refresh (Last: {})", format_clock(time)),
        None => "Refresh".to_string(),
    }
}
