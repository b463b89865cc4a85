use hourglass_input::input::{DurationInput, UnitField};

/// `1h 30m`, `45m`, `2m 30s`.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let rest = secs % 60;
    let mut out = if hours > 0 { format!("{}h {}m", hours, mins) } else { format!("{}m", mins) };
    if rest > 0 {
        out.push_str(&format!(" {}s", rest));
    }
    out
}

/// One field as `hrs [1] 0..=1`. The focused field is wrapped in `>` `<`;
/// text that does not parse is marked with `?`.
pub fn render_field(field: &UnitField) -> String {
    let editor = field.editor();
    let text = editor.text();
    let body = if editor.is_mid_edit() { format!("{text:?}?") } else { text.into_owned() };
    let boxed = if editor.is_focused() { format!(">[{body}]<") } else { format!("[{body}]") };
    let range = match editor.ceiling() {
        Some(max) => format!("{}..={}", editor.floor(), max),
        None => format!("{}..", editor.floor()),
    };
    format!("{} {} {}", field.unit().suffix(), boxed, range)
}

/// The whole input on one line, fields first, then the canonical value.
pub fn render_input(input: &DurationInput) -> String {
    let mut parts: Vec<String> = input.fields().iter().map(render_field).collect();
    let value = input.value();
    parts.push(format!("{}s ({})", value, format_duration(value)));
    parts.join(" | ")
}
