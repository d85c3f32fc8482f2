use serde::{Deserialize, Serialize};

use super::error::ViewerError;

// `rem` must precede `em` so the longer suffix is stripped first.
const CSS_UNITS: &[&str] = &["px", "%", "rem", "em", "vh", "vw"];

/// Display settings edited by course authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ViewerSettings {
    /// Name shown to students in the course outline.
    #[schema(example = "PDF Document")]
    pub display_name: String,
    /// Heading rendered above the viewer.
    #[schema(example = "Week 1 Reading")]
    pub pdf_title: String,
    #[schema(example = "100%")]
    pub width: String,
    #[schema(example = "600px")]
    pub height: String,
    pub show_download_button: bool,
    pub allow_fullscreen: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            display_name: "PDF Document".into(),
            pdf_title: "PDF Document".into(),
            width: "100%".into(),
            height: "600px".into(),
            show_download_button: true,
            allow_fullscreen: true,
        }
    }
}

/// Partial update submitted by the editor. Absent fields stay unchanged.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct SettingsUpdate {
    pub display_name: Option<String>,
    pub pdf_title: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub show_download_button: Option<bool>,
    pub allow_fullscreen: Option<bool>,
    /// Document source. Empty clears the selection; otherwise it follows the
    /// same rules as selecting a file or URL.
    #[schema(example = "https://example.com/syllabus.pdf")]
    pub pdf_url: Option<String>,
}

impl ViewerSettings {
    /// Validate every present field, then apply them all.
    pub fn apply(&self, update: &SettingsUpdate) -> Result<Self, ViewerError> {
        let mut next = self.clone();

        if let Some(name) = &update.display_name {
            next.display_name = validate_label("Display name", name)?;
        }
        if let Some(title) = &update.pdf_title {
            next.pdf_title = validate_label("PDF title", title)?;
        }
        if let Some(width) = &update.width {
            next.width = validate_dimension("Width", width)?;
        }
        if let Some(height) = &update.height {
            next.height = validate_dimension("Height", height)?;
        }
        if let Some(show) = update.show_download_button {
            next.show_download_button = show;
        }
        if let Some(allow) = update.allow_fullscreen {
            next.allow_fullscreen = allow;
        }

        Ok(next)
    }
}

fn validate_label(field: &str, value: &str) -> Result<String, ViewerError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > 256 {
        return Err(ViewerError::validation(format!(
            "{field} must be 1-256 characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_dimension(field: &str, value: &str) -> Result<String, ViewerError> {
    let trimmed = value.trim();
    if trimmed.len() > 32 || !is_css_length(trimmed) {
        return Err(ViewerError::validation(format!(
            "{field} must be 'auto' or a number with a unit (px, %, em, rem, vh, vw)"
        )));
    }
    Ok(trimmed.to_string())
}

/// `auto`, or an unsigned decimal followed by a known unit.
fn is_css_length(value: &str) -> bool {
    if value.eq_ignore_ascii_case("auto") {
        return true;
    }

    let Some(number) = CSS_UNITS
        .iter()
        .find_map(|unit| value.strip_suffix(unit))
    else {
        return false;
    };

    let mut parts = number.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();

    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    match fraction {
        Some(frac) => digits(whole) && !frac.is_empty() && digits(frac),
        None => !whole.is_empty() && digits(whole),
    }
}
