//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements (sRGB, written straight to a non-sRGB surface)
pub mod colors {
    /// `0xRRGGBB` to an opaque color
    pub const fn hex(rgb: u32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            1.0,
        ]
    }

    pub const TABLE: [f32; 4] = hex(0x1e3a8a);
    pub const NET: [f32; 4] = hex(0xffffff);
    pub const PLAYER_PADDLE: [f32; 4] = hex(0xef4444);
    pub const OPPONENT_PADDLE: [f32; 4] = hex(0x3b82f6);
    pub const BALL: [f32; 4] = hex(0xfbbf24);
    pub const BALL_SHINE: [f32; 4] = [1.0, 1.0, 1.0, 0.4];
    /// Letterbox bars around the table
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    /// Dim overlay while paused or after the final point
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
}

#[cfg(test)]
mod tests {
    use super::colors::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(NET, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(TABLE[2], 0x8a as f32 / 255.0);
    }
}
