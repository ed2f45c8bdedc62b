//! Procedural vertex-buffer builders for simple shapes.
//!
//! Every builder honors the caller's vertex format flags but forces the
//! primitive type it is defined on. Multi-buffer shapes return one buffer
//! per face or slice; drawing them is just drawing each buffer.

use super::math::{Vec2, Vec3};
use super::vertex::{PrimitiveType, VertexBuffer, VertexFormat};
use std::f32::consts::PI;

/// Flat rectangle on the XY plane, centered on the origin, as a 4-vertex
/// triangle strip
pub fn surface(format: VertexFormat, width: f32, height: f32, color: [f32; 4]) -> VertexBuffer {
    let mut format = format;
    format.primitive = PrimitiveType::TriangleStrip;
    let mut vb = VertexBuffer::new(format);

    // corner template: 0 selects the negative half-extent, 1 the positive
    const TEMPLATE: [(u32, u32); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

    for (cx, cy) in TEMPLATE {
        let x = if cx == 1 { width / 2.0 } else { -width / 2.0 };
        let y = if cy == 1 { height / 2.0 } else { -height / 2.0 };
        let uv = Vec2::new(cx as f32, cy as f32);
        vb.push(
            Vec3::new(x, y, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            uv,
            color,
        );
    }

    vb
}

/// Axis-aligned box centered on the origin: six 4-vertex triangle strips,
/// one per face, texture repeated on each face
pub fn box_shape(
    format: VertexFormat,
    width: f32,
    height: f32,
    depth: f32,
    color: [f32; 4],
) -> Vec<VertexBuffer> {
    let half_x = width / 2.0;
    let half_y = height / 2.0;
    let half_z = depth / 2.0;

    // the 8 corners; bit i/4 picks x, (i/2)%2 picks z, i%2 picks y
    let mut corners = [Vec3::ZERO; 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        corner.x = if i / 4 == 0 { -half_x } else { half_x };
        corner.z = if (i / 2) % 2 == 0 { -half_z } else { half_z };
        corner.y = if i % 2 == 0 { -half_y } else { half_y };
    }

    // per-face corner order and outward normal
    const FACES: [([usize; 4], Vec3); 6] = [
        ([1, 0, 3, 2], Vec3 { x: -1.0, y: 0.0, z: 0.0 }),
        ([3, 2, 7, 6], Vec3 { x: 0.0, y: 0.0, z: 1.0 }),
        ([7, 6, 5, 4], Vec3 { x: 1.0, y: 0.0, z: 0.0 }),
        ([5, 4, 1, 0], Vec3 { x: 0.0, y: 0.0, z: -1.0 }),
        ([1, 3, 5, 7], Vec3 { x: 0.0, y: 1.0, z: 0.0 }),
        ([2, 0, 6, 4], Vec3 { x: 0.0, y: -1.0, z: 0.0 }),
    ];

    const FACE_UVS: [Vec2; 4] = [
        Vec2 { x: 0.0, y: 0.0 },
        Vec2 { x: 0.0, y: 1.0 },
        Vec2 { x: 1.0, y: 0.0 },
        Vec2 { x: 1.0, y: 1.0 },
    ];

    let mut strip_format = format;
    strip_format.primitive = PrimitiveType::TriangleStrip;

    FACES
        .iter()
        .map(|(order, normal)| {
            let mut vb = VertexBuffer::new(strip_format);
            for (k, &corner) in order.iter().enumerate() {
                vb.push(corners[corner], *normal, FACE_UVS[k], color);
            }
            vb
        })
        .collect()
}

/// Sphere centered on the origin: one triangle strip per latitude slice
pub fn sphere(
    format: VertexFormat,
    radius: f32,
    slices: usize,
    stacks: usize,
    color: [f32; 4],
) -> Vec<VertexBuffer> {
    let mut strip_format = format;
    strip_format.primitive = PrimitiveType::TriangleStrip;

    let major_step = PI / slices as f32;
    let minor_step = (2.0 * PI) / stacks as f32;

    let mut buffers = Vec::with_capacity(slices);

    for i in 0..slices {
        let a = i as f32 * major_step;
        let b = a + major_step;
        let r0 = radius * a.sin();
        let r1 = radius * b.sin();
        let z0 = radius * a.cos();
        let z1 = radius * b.cos();

        let mut vb = VertexBuffer::new(strip_format);

        for j in 0..=stacks {
            let c = j as f32 * minor_step;
            let x = c.cos();
            let y = c.sin();

            let u = j as f32 / stacks as f32;
            let p0 = Vec3::new(x * r0, y * r0, z0);
            vb.push(
                p0,
                p0.scale(1.0 / radius),
                Vec2::new(u, i as f32 / slices as f32),
                color,
            );

            let p1 = Vec3::new(x * r1, y * r1, z1);
            vb.push(
                p1,
                p1.scale(1.0 / radius),
                Vec2::new(u, (i + 1) as f32 / slices as f32),
                color,
            );
        }

        buffers.push(vb);
    }

    buffers
}
