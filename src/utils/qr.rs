//! QR code rendering.

use crate::error::AppError;
use qrcode::QrCode;
use qrcode::render::svg;
use serde_json::json;

/// Renders `text` as an SVG QR code with at least `size` pixels per edge.
///
/// # Errors
///
/// Returns [`AppError::Internal`] when the payload is too large to encode.
pub fn render_svg(text: &str, size: u32) -> Result<String, AppError> {
    let code = QrCode::new(text.as_bytes()).map_err(|e| {
        AppError::internal(
            "Failed to encode QR code",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .build())
}
