//! QR rendering: one code string in, one PNG on disk out.

use anyhow::{Context, Result};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::path::{Path, PathBuf};

use crate::CodeStyle;
use crate::engine::sanitize::sanitize;
use crate::utils::config::OutputNames;

/// Trimmed code, or `None` when the code is missing or blank (the row is skipped).
pub fn normalize_code(raw_code: Option<&str>) -> Option<&str> {
    raw_code.map(str::trim).filter(|c| !c.is_empty())
}

/// Deterministic image name: `qr_<label>_<code>.png`, both parts sanitized independently.
pub fn code_filename(code: &str, label: &str) -> String {
    format!(
        "{}_{}_{}.{}",
        OutputNames::CODE_PREFIX,
        sanitize(label),
        sanitize(code),
        OutputNames::CODE_EXT
    )
}

/// Insert `_<n>` before the extension: `qr_a_b.png` -> `qr_a_b_2.png`.
pub fn suffixed_filename(filename: &str, n: usize) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{n}.{ext}"),
        None => format!("{filename}_{n}"),
    }
}

/// Render `payload` as a QR code and write it as PNG at `path`.
pub fn render_code(payload: &str, path: &Path, style: &CodeStyle) -> Result<()> {
    let code = QrCode::new(payload.as_bytes())
        .with_context(|| format!("encode QR payload {payload:?}"))?;
    let img = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(style.module_px, style.module_px)
        .build();
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("write QR image {}", path.display()))?;
    Ok(())
}

/// Render one record into `output_dir`. Returns the written path, or `None` when the code is
/// missing or blank. An existing file with the same name is overwritten.
pub fn make_code(
    raw_code: Option<&str>,
    raw_label: &str,
    output_dir: &Path,
    style: &CodeStyle,
) -> Result<Option<PathBuf>> {
    let Some(code) = normalize_code(raw_code) else {
        return Ok(None);
    };
    let path = output_dir.join(code_filename(code, raw_label));
    render_code(code, &path, style)?;
    Ok(Some(path))
}
