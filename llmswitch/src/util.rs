use crate::AppError;

/// Parse foreground and background colors from string.
pub fn parse_colors(s: &str) -> Result<(Option<[u8;3]>, Option<[u8;3]>), AppError> {
    let mut fg = None;
    let mut bg = None;
    let s = s.trim();
    let s = s.trim_matches(['\'', '"']);

    for part in s.split(";") {
        let part = part.trim();

        if let Some(rgb) = part.strip_prefix("bg") {
            bg.replace(parse_color(rgb.trim())?);
        } else if let Some(rgb) = part.strip_prefix("fg") {
            fg.replace(parse_color(rgb.trim())?);
        } else {
            return Err(AppError::ColorParseError);
        };
    }

    Ok((fg, bg))
}

fn parse_color(s: &str) -> Result<[u8;3], AppError> {
    let s = s.strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or(AppError::ColorParseError)?;

    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(AppError::ColorParseError);
    }

    let mut color = [0u8;3];
    for (c, part) in color.iter_mut().zip(parts) {
        *c = part.trim().parse::<u8>().map_err(|_| AppError::ColorParseError)?;
    }

    Ok(color)
}
