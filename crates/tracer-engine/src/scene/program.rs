//! The static point program: shader source and vertex layout.

use super::context::{ProgramDesc, VertexAttr, VertexLayout};

/// Floats per vertex: position (2) + color (4).
pub const FLOATS_PER_VERTEX: usize = 6;

pub const POINT_SHADER: &str = include_str!("shaders/points.wgsl");

pub const POINT_LAYOUT: VertexLayout = VertexLayout {
    stride: FLOATS_PER_VERTEX as u32,
    attributes: &[
        VertexAttr { location: 0, components: 2, offset: 0 }, // position
        VertexAttr { location: 1, components: 4, offset: 2 }, // color
    ],
};

pub(super) fn point_program(depth_test: bool) -> ProgramDesc<'static> {
    ProgramDesc {
        label: "tracer points",
        source: POINT_SHADER,
        vertex_entry: "vs_main",
        fragment_entry: "fs_main",
        layout: POINT_LAYOUT,
        alpha_blending: true,
        depth_test,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_layout_is_valid_and_interleaved() {
        assert_eq!(POINT_LAYOUT.validate(), Ok(()));
        assert_eq!(POINT_LAYOUT.stride_bytes(), 24);
    }

    #[test]
    fn overrunning_attribute_is_rejected() {
        let layout = VertexLayout {
            stride: 6,
            attributes: &[VertexAttr { location: 1, components: 4, offset: 3 }],
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn duplicate_location_is_rejected() {
        let layout = VertexLayout {
            stride: 6,
            attributes: &[
                VertexAttr { location: 0, components: 2, offset: 0 },
                VertexAttr { location: 0, components: 4, offset: 2 },
            ],
        };
        assert!(layout.validate().unwrap_err().contains("bound twice"));
    }

    #[test]
    fn shader_declares_both_entry_points() {
        let desc = point_program(true);
        assert!(desc.source.contains(&format!("fn {}", desc.vertex_entry)));
        assert!(desc.source.contains(&format!("fn {}", desc.fragment_entry)));
    }
}
