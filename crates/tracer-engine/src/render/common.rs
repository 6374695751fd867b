//! Conversions from the backend-neutral program description to wgpu types.

use crate::coords::ColorRgba;
use crate::scene::VertexLayout;

pub(super) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight-alpha "over" blending; glob colors are not premultiplied.
pub(super) fn blend_state(alpha_blending: bool) -> wgpu::BlendState {
    if alpha_blending {
        wgpu::BlendState::ALPHA_BLENDING
    } else {
        wgpu::BlendState::REPLACE
    }
}

// ── vertex layout ─────────────────────────────────────────────────────────

pub(super) fn float_format(components: u32) -> wgpu::VertexFormat {
    match components {
        1 => wgpu::VertexFormat::Float32,
        2 => wgpu::VertexFormat::Float32x2,
        3 => wgpu::VertexFormat::Float32x3,
        _ => wgpu::VertexFormat::Float32x4,
    }
}

/// Expands a validated layout into wgpu attributes (offsets in bytes).
pub(super) fn vertex_attributes(layout: &VertexLayout) -> Vec<wgpu::VertexAttribute> {
    let float = std::mem::size_of::<f32>() as u64;
    layout
        .attributes
        .iter()
        .map(|a| wgpu::VertexAttribute {
            format: float_format(a.components),
            offset: a.offset as u64 * float,
            shader_location: a.location,
        })
        .collect()
}

// ── clear color ───────────────────────────────────────────────────────────

pub(super) fn clear_color(c: ColorRgba) -> wgpu::Color {
    wgpu::Color {
        r: c.r as f64,
        g: c.g as f64,
        b: c.b as f64,
        a: c.a as f64,
    }
}

// ── compiler diagnostics ──────────────────────────────────────────────────

/// Joins the error messages of a compilation into one log, `line:col: message`
/// per entry. Returns `None` when there are no errors.
pub(super) fn compile_errors(info: &wgpu::CompilationInfo) -> Option<String> {
    let lines: Vec<String> = info
        .messages
        .iter()
        .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error))
        .map(|m| match &m.location {
            Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, m.message),
            None => m.message.clone(),
        })
        .collect();

    if lines.is_empty() { None } else { Some(lines.join("\n")) }
}

/// Message of an error caught by a validation scope, if any.
pub(super) fn scope_log(err: Option<wgpu::Error>) -> Option<String> {
    err.map(|e| e.to_string())
}
