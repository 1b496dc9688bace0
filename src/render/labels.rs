/// Format minutes played into a short badge label.
pub fn format_playtime(minutes: u64) -> String {
    const HOUR: u64 = 60;

    if minutes < HOUR {
        format!("{} min", minutes)
    } else if minutes < 100 * HOUR {
        let hours = minutes as f64 / HOUR as f64;
        if minutes % HOUR == 0 {
            format!("{} h", minutes / HOUR)
        } else {
            format!("{:.1} h", hours)
        }
    } else {
        format!("{} h", (minutes as f64 / HOUR as f64).round() as u64)
    }
}
