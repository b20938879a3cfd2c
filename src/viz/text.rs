//! Approximate text measurement for layout decisions.
//!
//! Plotters cannot measure text before a backend exists, so widths are
//! estimated from the character count. Good enough for DejaVu Sans at the
//! sizes used here.

/// Width/height estimates for one font size.
#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub font_px: u32,
}

impl TextMetrics {
    pub fn new(font_px: u32) -> Self {
        Self { font_px }
    }

    pub fn width(&self, text: &str) -> u32 {
        ((text.chars().count() as f32) * (self.font_px as f32) * 0.60).ceil() as u32
    }

    pub fn line_height(&self) -> i32 {
        self.font_px as i32 + 2
    }

    /// Cut `text` to at most `max_px`, ending in `…` when anything was dropped.
    pub fn truncate(&self, text: &str, max_px: u32) -> String {
        if self.width(text) <= max_px {
            return text.to_string();
        }
        let mut out: String = String::new();
        for ch in text.chars() {
            out.push(ch);
            if self.width(&out) + self.width("…") > max_px {
                out.pop();
                break;
            }
        }
        out.push('…');
        out
    }

    /// Break `text` into lines no wider than `max_px`, on whitespace where
    /// possible. Overlong single words are truncated.
    pub fn wrap(&self, text: &str, max_px: u32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut cur = String::new();
        for word in text.split_whitespace() {
            let candidate = if cur.is_empty() {
                word.to_string()
            } else {
                format!("{cur} {word}")
            };
            if self.width(&candidate) <= max_px {
                cur = candidate;
                continue;
            }
            if !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
            }
            cur = self.truncate(word, max_px);
        }
        if !cur.is_empty() || lines.is_empty() {
            lines.push(cur);
        }
        lines
    }
}
