//! Triangle rasterization and the public draw entry point.
//!
//! The pipeline is a straight nested loop: every triangle the topology
//! decoder yields is projected to raster space, its bounding box walked, and
//! each covered pixel depth-tested and handed to the pixel shader. Single
//! threaded, runs to completion, no state kept between draws.

use super::buffer::{DepthBuffer, FrameBuffer, Pixel};
use super::camera::{rasterize_vertex, RasterCamera, RasterVertex, ScreenRect};
use super::math::{Mat4, Vec2, Vec3};
use super::topology;
use super::vertex::{VertexBuffer, VertexView};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which signed-area orientation counts as front-facing.
///
/// The default keeps the "all edge values >= 0" convention; `Cw` negates the
/// edge values (and thus the stored area) consistently, flipping the culled
/// side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrontFace {
    #[default]
    Ccw,
    Cw,
}

impl FrontFace {
    fn sign(self) -> f32 {
        match self {
            FrontFace::Ccw => 1.0,
            FrontFace::Cw => -1.0,
        }
    }
}

/// One triangle's attributes, fetched from the vertex buffer by ordinal
#[derive(Debug, Clone, Copy)]
pub struct TriangleAttrs {
    /// Object-space positions
    pub positions: [Vec3; 3],
    pub normals: [Vec3; 3],
    pub tex_coords: [Vec2; 3],
    pub colors: [[f32; 4]; 3],
}

impl TriangleAttrs {
    pub fn fetch(view: &VertexView<'_>, [i0, i1, i2]: [usize; 3]) -> Self {
        Self {
            positions: [view.position(i0), view.position(i1), view.position(i2)],
            normals: [view.normal(i0), view.normal(i1), view.normal(i2)],
            tex_coords: [view.tex_coord(i0), view.tex_coord(i1), view.tex_coord(i2)],
            colors: [view.color(i0), view.color(i1), view.color(i2)],
        }
    }
}

/// Sample handed to the pixel shader for each covered, depth-passing pixel
#[derive(Debug)]
pub struct PixelInput<'a> {
    pub triangle: &'a TriangleAttrs,
    /// Barycentric weights of the sample; they sum to 1
    pub bary: [f32; 3],
    /// Perspective-corrected texture coordinate at the sample
    pub tex_coord: Vec2,
    /// Camera-space depth of the sample
    pub depth: f32,
}

/// The pluggable shading step. Invoked once per covered pixel that passed
/// the depth test; the returned color is written to the frame buffer as-is.
pub trait PixelShader {
    fn shade(&mut self, world_to_camera: &Mat4, input: &PixelInput<'_>) -> Pixel;
}

impl<F> PixelShader for F
where
    F: FnMut(&Mat4, &PixelInput<'_>) -> Pixel,
{
    fn shade(&mut self, world_to_camera: &Mat4, input: &PixelInput<'_>) -> Pixel {
        self(world_to_camera, input)
    }
}

/// Facing-ratio shading modulated by a UV checkerboard: grayscale intensity
/// `max(0, n.view)`, where n is the face normal in camera space, dimmed or
/// brightened per checker cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FacingRatioShader {
    /// Checker cells per UV unit
    pub checker_scale: f32,
    /// Intensity of the dark cells
    pub dark: f32,
    /// Intensity of the bright cells
    pub bright: f32,
}

impl Default for FacingRatioShader {
    fn default() -> Self {
        Self {
            checker_scale: 10.0,
            dark: 0.3,
            bright: 0.7,
        }
    }
}

impl PixelShader for FacingRatioShader {
    fn shade(&mut self, world_to_camera: &Mat4, input: &PixelInput<'_>) -> Pixel {
        let [p0, p1, p2] = input.triangle.positions;
        let cam = [
            world_to_camera.transform_point(p0),
            world_to_camera.transform_point(p1),
            world_to_camera.transform_point(p2),
        ];

        // sample position in camera space: interpolate the projected point,
        // then scale back by the sample depth
        let [w0, w1, w2] = input.bary;
        let z = input.depth;
        let px = (cam[0].x / -cam[0].z) * w0 + (cam[1].x / -cam[1].z) * w1 + (cam[2].x / -cam[2].z) * w2;
        let py = (cam[0].y / -cam[0].z) * w0 + (cam[1].y / -cam[1].z) * w1 + (cam[2].y / -cam[2].z) * w2;
        let point = Vec3::new(px * z, py * z, -z);

        // facing ratio against the face normal; the camera sits at the origin
        // of camera space, so the view direction is just -point
        let normal = (cam[1] - cam[0]).cross(cam[2] - cam[0]).normalize();
        let view_dir = (-point).normalize();
        let mut n_dot_view = normal.dot(view_dir).max(0.0);

        let s = input.tex_coord * self.checker_scale;
        let checker = (s.x.fract() > 0.5) ^ (s.y.fract() < 0.5);
        n_dot_view *= if checker { self.bright } else { self.dark };

        let v = (n_dot_view * 255.0) as u8;
        Pixel::new(v, v, v)
    }
}

/// Signed double-area edge function; its sign tells which side of the edge
/// `a -> b` the point lies on
fn edge(a: &RasterVertex, b: &RasterVertex, cx: f32, cy: f32) -> f32 {
    (cx - a.x) * (b.y - a.y) - (cy - a.y) * (b.x - a.x)
}

fn find_min(a: f32, b: f32, c: f32) -> f32 {
    a.min(b).min(c)
}

fn find_max(a: f32, b: f32, c: f32) -> f32 {
    a.max(b).max(c)
}

/// Rasterize a single triangle into the frame/depth buffer pair.
///
/// Off-screen bounding boxes and zero-area triangles produce no writes.
pub fn rasterize_triangle<S: PixelShader>(
    attrs: &TriangleAttrs,
    world_to_camera: &Mat4,
    z_near: f32,
    rect: &ScreenRect,
    front_face: FrontFace,
    shader: &mut S,
    fb: &mut FrameBuffer,
    db: &mut DepthBuffer,
) {
    let width = fb.width;
    let height = fb.height;

    let mut raster = [RasterVertex { x: 0.0, y: 0.0, z: 0.0 }; 3];
    let mut inv_z = [0.0f32; 3];
    for k in 0..3 {
        raster[k] = rasterize_vertex(
            attrs.positions[k],
            world_to_camera,
            rect,
            z_near,
            width as f32,
            height as f32,
        );
        inv_z[k] = 1.0 / raster[k].z;
    }

    // premultiply the perspective-corrected attributes by 1/z
    let st = [
        attrs.tex_coords[0] * inv_z[0],
        attrs.tex_coords[1] * inv_z[1],
        attrs.tex_coords[2] * inv_z[2],
    ];

    let x_min = find_min(raster[0].x, raster[1].x, raster[2].x);
    let y_min = find_min(raster[0].y, raster[1].y, raster[2].y);
    let x_max = find_max(raster[0].x, raster[1].x, raster[2].x);
    let y_max = find_max(raster[0].y, raster[1].y, raster[2].y);

    // trivial reject: bounding box fully off screen
    if x_min > (width - 1) as f32 || x_max < 0.0 || y_min > (height - 1) as f32 || y_max < 0.0 {
        return;
    }

    let sign = front_face.sign();
    let area = sign * edge(&raster[0], &raster[1], raster[2].x, raster[2].y);
    if area == 0.0 {
        return;
    }

    // clip the iteration box to the buffer bounds
    let x0 = x_min.max(0.0).floor() as usize;
    let x1 = x_max.min((width - 1) as f32).floor() as usize;
    let y0 = y_min.max(0.0).floor() as usize;
    let y1 = y_max.min((height - 1) as f32).floor() as usize;

    for y in y0..=y1 {
        for x in x0..=x1 {
            // sample at the pixel center
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            let w0 = sign * edge(&raster[1], &raster[2], px, py);
            let w1 = sign * edge(&raster[2], &raster[0], px, py);
            let w2 = sign * edge(&raster[0], &raster[1], px, py);

            if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                let w0 = w0 / area;
                let w1 = w1 / area;
                let w2 = w2 / area;

                let z_weighted = inv_z[0] * w0 + inv_z[1] * w1 + inv_z[2] * w2;
                let z = 1.0 / z_weighted;

                let idx = y * width + x;
                if z < db.data[idx] {
                    db.data[idx] = z;

                    // undo the perspective premultiplication
                    let tex_coord = (st[0] * w0 + st[1] * w1 + st[2] * w2) * z;

                    let input = PixelInput {
                        triangle: attrs,
                        bary: [w0, w1, w2],
                        tex_coord,
                        depth: z,
                    };
                    fb.pixels[idx] = shader.shade(world_to_camera, &input);
                }
            }
        }
    }
}

/// Draw failure; the buffers are untouched when any of these is returned
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawError {
    /// Vertex data length is not a multiple of the declared stride
    MalformedBuffer { len: usize, stride: usize },
    /// Frame and depth buffer dimensions differ
    BufferSizeMismatch,
    /// `z_near <= 0` or `z_far <= z_near`
    InvalidClipPlanes { z_near: f32, z_far: f32 },
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::MalformedBuffer { len, stride } => {
                write!(f, "vertex data length {} is not a multiple of stride {}", len, stride)
            }
            DrawError::BufferSizeMismatch => {
                write!(f, "frame and depth buffer dimensions differ")
            }
            DrawError::InvalidClipPlanes { z_near, z_far } => {
                write!(f, "invalid clip planes (near {}, far {})", z_near, z_far)
            }
        }
    }
}

impl std::error::Error for DrawError {}

/// Draw a whole vertex buffer.
///
/// Projects every triangle the buffer's topology describes through the
/// pinhole camera and rasterizes it into `fb`/`db`. The depth buffer is
/// expected to be cleared to `z_far` by the caller; the far plane is not
/// otherwise clipped against.
pub fn draw<S: PixelShader>(
    world_to_camera: &Mat4,
    z_near: f32,
    z_far: f32,
    vb: &VertexBuffer,
    camera: &RasterCamera,
    front_face: FrontFace,
    shader: &mut S,
    fb: &mut FrameBuffer,
    db: &mut DepthBuffer,
) -> Result<(), DrawError> {
    if !(z_near > 0.0) || z_far <= z_near {
        return Err(DrawError::InvalidClipPlanes { z_near, z_far });
    }
    let stride = vb.format.stride();
    if vb.data.len() % stride != 0 {
        return Err(DrawError::MalformedBuffer {
            len: vb.data.len(),
            stride,
        });
    }
    if fb.width != db.width || fb.height != db.height {
        return Err(DrawError::BufferSizeMismatch);
    }

    let rect = camera.screen_rect(fb.width as f32, fb.height as f32, z_near);
    let view = vb.view();

    for tri in topology::triangles(vb.format.primitive, view.vertex_count()) {
        let attrs = TriangleAttrs::fetch(&view, tri);
        rasterize_triangle(&attrs, world_to_camera, z_near, &rect, front_face, shader, fb, db);
    }

    Ok(())
}
