//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in field coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for an axis-aligned filled rectangle (top-left origin)
pub fn rect(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (x1, y1) = (x + width, y + height);
    vec![
        Vertex::new(x, y, color),
        Vertex::new(x1, y, color),
        Vertex::new(x, y1, color),
        Vertex::new(x, y1, color),
        Vertex::new(x1, y, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Horizontal dashed line centered on `y`, starting with a dash at `x0`
///
/// The last dash is cut at `x1`.
pub fn dashed_hline(
    x0: f32,
    x1: f32,
    y: f32,
    thickness: f32,
    dash: f32,
    gap: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    if dash <= 0.0 {
        return vertices;
    }
    let mut x = x0;
    while x < x1 {
        let len = dash.min(x1 - x);
        vertices.extend(rect(x, y - thickness / 2.0, len, thickness, color));
        x += dash + gap.max(0.0);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_rect_covers_bounds() {
        let verts = rect(10.0, 20.0, 30.0, 5.0, WHITE);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 25.0);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(50.0, 50.0);
        let verts = circle(center, 8.0, WHITE, 16);
        assert_eq!(verts.len(), 48);
        for v in verts {
            let d = Vec2::from(v.position).distance(center);
            assert!(d <= 8.0 + 1e-4);
        }
    }

    #[test]
    fn test_dash_pattern() {
        // 10 on / 10 off over 400 -> 20 dashes
        let verts = dashed_hline(0.0, 400.0, 300.0, 2.0, 10.0, 10.0, WHITE);
        assert_eq!(verts.len(), 20 * 6);

        // Partial final dash is clipped
        let verts = dashed_hline(0.0, 25.0, 0.0, 2.0, 10.0, 10.0, WHITE);
        assert_eq!(verts.len(), 12);
        let max_x = verts.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert_eq!(max_x, 25.0);
    }
}
