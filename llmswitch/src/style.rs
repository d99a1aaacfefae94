//! Terminal styles.
use anstyle::Color;
use anstyle::RgbColor;
use anstyle::Style;
use crate::config::Settings;

/// Styles.
pub struct Styles {
    /// User prompt style.
    pub user_prompt: Style,
    /// User prompt arrow style.
    pub user_prompt_arrow: Style,
    /// User message style.
    pub user_text: Style,
    /// Assistant prompt style.
    pub assistant_prompt: Style,
    /// Assistant prompt arrow style.
    pub assistant_prompt_arrow: Style,
    /// Assistant message style.
    pub assistant_text: Style,
    /// Error message style.
    pub error_text: Style,
    /// Warning message style.
    pub warning_text: Style,
}

fn rgb([r, g, b]: [u8;3]) -> Color {
    Color::Rgb(RgbColor(r, g, b))
}

impl Styles {

    /// Load styles.
    pub fn new(settings: &Settings) -> Self {
        let mut fg_user_color = rgb([128, 64, 64]);
        let mut fg_assistant_color = rgb([64, 128, 64]);

        let mut bg_user_color = rgb([128, 0, 0]);
        let mut bg_assistant_color = rgb([0, 128, 0]);

        let (fg, bg) = settings.user_color;
        if let Some(c) = fg { fg_user_color = rgb(c); }
        if let Some(c) = bg { bg_user_color = rgb(c); }

        let (fg, bg) = settings.assistant_color;
        if let Some(c) = fg { fg_assistant_color = rgb(c); }
        if let Some(c) = bg { bg_assistant_color = rgb(c); }

        let white = rgb([255, 255, 255]);

        let user_prompt = Style::new().bold().bg_color(Some(bg_user_color)).fg_color(Some(white));
        let user_prompt_arrow = Style::new().bold().fg_color(Some(bg_user_color));
        let user_text = Style::new().fg_color(Some(fg_user_color));

        let assistant_prompt = Style::new().bold().bg_color(Some(bg_assistant_color)).fg_color(Some(white));
        let assistant_prompt_arrow = Style::new().bold().fg_color(Some(bg_assistant_color));
        let assistant_text = Style::new().fg_color(Some(fg_assistant_color));

        let error_text = Style::new().bold().fg_color(Some(rgb([200, 40, 40])));
        let warning_text = Style::new().fg_color(Some(rgb([200, 160, 0])));

        Self {
            user_prompt,
            user_prompt_arrow,
            user_text,
            assistant_prompt,
            assistant_prompt_arrow,
            assistant_text,
            error_text,
            warning_text,
        }
    }
}
