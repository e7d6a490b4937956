//! Display-only number formatting. Nothing here feeds back into the engine.

const SUFFIXES: [&str; 11] = ["", "K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc", "No"];

pub fn format_energy(value: f64, scientific: bool) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "∞".to_string()
        } else {
            "-∞".to_string()
        };
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    let tenths = round_to(magnitude, 10.0);
    if tenths < 1000.0 {
        return if tenths.fract() == 0.0 {
            format!("{sign}{tenths:.0}")
        } else {
            format!("{sign}{tenths:.1}")
        };
    }

    if scientific {
        return format!("{sign}{magnitude:.2e}");
    }

    // Suffix selection looks at the printed value, so 999_999.5 reads 1.00M.
    let mut scaled = magnitude / 1000.0;
    let mut index = 1usize;
    while round_to(scaled, 100.0) >= 1000.0 && index + 1 < SUFFIXES.len() {
        scaled /= 1000.0;
        index += 1;
    }
    let shown = round_to(scaled, 100.0);
    if shown >= 1000.0 {
        return format!("{sign}{magnitude:.2e}");
    }
    format!("{sign}{shown:.2}{}", SUFFIXES[index])
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

pub fn format_rate(per_second: f64, scientific: bool) -> String {
    format!("{}/s", format_energy(per_second, scientific))
}

pub fn format_duration_ms(ms: f64) -> String {
    let total_seconds = if ms.is_finite() {
        (ms.max(0.0) / 1000.0).ceil() as u64
    } else {
        0
    };
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}h{minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m{seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}
