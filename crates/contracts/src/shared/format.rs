/// Форматирует размер в байтах в человекочитаемый вид (B, KB, MB, GB)
///
/// # Примеры
/// ```ignore
/// assert_eq!(format_byte(512), "512 B");
/// assert_eq!(format_byte(1536), "1.5 KB");
/// ```
pub fn format_byte(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
