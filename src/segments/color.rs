use crate::foundation::core::Rgba8;

/// Parse a web-style `rgb(r, g, b)` / `rgba(r, g, b, a)` string.
///
/// Channels are 0..=255 integers, alpha is a 0..=1 float. Returns `None` for
/// anything else so callers can fall back to white.
pub fn parse_rgba(s: &str) -> Option<Rgba8> {
    let s = s.trim().to_ascii_lowercase();
    let open = s.find('(')?;
    let close = s.rfind(')')?;
    if close <= open {
        return None;
    }
    let func = s[..open].trim();
    let parts: Vec<&str> = s[open + 1..close].split(',').map(str::trim).collect();

    let expect_alpha = match func {
        "rgb" => false,
        "rgba" => true,
        _ => return None,
    };
    if parts.len() != if expect_alpha { 4 } else { 3 } {
        return None;
    }

    let channel = |p: &str| -> Option<u8> {
        let v: f64 = p.parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        Some(v.round().clamp(0.0, 255.0) as u8)
    };

    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = if expect_alpha {
        let v: f64 = parts[3].parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        255
    };

    Some(Rgba8::new(r, g, b, a))
}

#[cfg(test)]
#[path = "../../tests/unit/segments/color.rs"]
mod tests;
