//! Physically-based pinhole camera and the camera-to-raster mapping.
//!
//! The camera is described by its film aperture (inches) and focal length
//! (mm), the way real 35 mm cameras are specified. The projection window on
//! the near plane is derived from those, then reconciled with the output
//! image's aspect ratio under an overscan or fill policy.

use super::math::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

const INCH_TO_MM: f32 = 25.4;

/// Policy for reconciling the film aspect ratio with the image aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitMode {
    /// Stretch the narrower axis so the film frame fills the image
    Fill,
    /// Crop the excess so the image aspect is matched inside the film frame
    Overscan,
}

/// Immutable-per-draw description of the physical camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterCamera {
    /// Film aperture width, in inches
    pub aperture_width: f32,
    /// Film aperture height, in inches
    pub aperture_height: f32,
    /// Focal length, in mm
    pub focal_length: f32,
    pub fit: FitMode,
}

impl Default for RasterCamera {
    /// 35 mm full aperture, 20 mm lens
    fn default() -> Self {
        Self {
            aperture_width: 0.980,
            aperture_height: 0.735,
            focal_length: 20.0,
            fit: FitMode::Overscan,
        }
    }
}

/// Camera-space projection window on the near plane; symmetric around the
/// optical axis. Derived per draw, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl RasterCamera {
    pub fn film_aspect(&self) -> f32 {
        self.aperture_width / self.aperture_height
    }

    /// Compute the projection window for an image of the given size.
    ///
    /// Only the width/height ratio matters, so any consistent unit works.
    pub fn screen_rect(&self, image_width: f32, image_height: f32, z_near: f32) -> ScreenRect {
        let mut top = (self.aperture_height * INCH_TO_MM / 2.0 / self.focal_length) * z_near;
        let mut right = (self.aperture_width * INCH_TO_MM / 2.0 / self.focal_length) * z_near;

        let film_aspect = self.film_aspect();
        let device_aspect = image_width / image_height;

        let mut x_scale = 1.0;
        let mut y_scale = 1.0;

        match self.fit {
            FitMode::Overscan => {
                if film_aspect > device_aspect {
                    y_scale = film_aspect / device_aspect;
                } else {
                    x_scale = device_aspect / film_aspect;
                }
            }
            FitMode::Fill => {
                if film_aspect > device_aspect {
                    x_scale = device_aspect / film_aspect;
                } else {
                    y_scale = film_aspect / device_aspect;
                }
            }
        }

        right *= x_scale;
        top *= y_scale;

        ScreenRect {
            left: -right,
            right,
            top,
            bottom: -top,
        }
    }
}

/// One vertex mapped into raster space: `x`/`y` in pixel units, `z` the
/// camera-space depth (not normalized). Transient; built per vertex per draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Map one object-space vertex into raster space: camera transform, screen
/// projection on the near plane, NDC remap against the screen rect, then
/// pixel coordinates with Y growing downward.
///
/// The camera looks down −Z; callers must keep geometry strictly in front of
/// it (camera-space z < 0). A vertex on or behind the camera plane yields
/// infinite or NaN coordinates; such values never survive the rasterizer's
/// coverage test, but the transform itself does not guard them.
pub fn rasterize_vertex(
    vertex: Vec3,
    world_to_camera: &Mat4,
    rect: &ScreenRect,
    z_near: f32,
    image_width: f32,
    image_height: f32,
) -> RasterVertex {
    let cam = world_to_camera.transform_point(vertex);

    // screen space on the near plane
    let screen_x = (z_near * cam.x) / -cam.z;
    let screen_y = (z_near * cam.y) / -cam.z;

    // NDC space, [-1, 1] per axis
    let sub_rl = rect.right - rect.left;
    let add_rl = rect.right + rect.left;
    let sub_tb = rect.top - rect.bottom;
    let add_tb = rect.top + rect.bottom;

    let ndc_x = (2.0 * screen_x) / sub_rl - add_rl / sub_rl;
    let ndc_y = (2.0 * screen_y) / sub_tb - add_tb / sub_tb;

    RasterVertex {
        x: (ndc_x + 1.0) / 2.0 * image_width,
        y: (1.0 - ndc_y) / 2.0 * image_height,
        z: -cam.z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_screen_rect_overscan_square_image() {
        // film aspect 4:3 on a square image: overscan grows top to match right
        let camera = RasterCamera::default();
        let rect = camera.screen_rect(100.0, 100.0, 1.0);

        let expected_right = 0.980 * 25.4 / 2.0 / 20.0;
        assert!((rect.right - expected_right).abs() < EPS);
        assert!((rect.top - expected_right).abs() < EPS);
        assert_eq!(rect.left, -rect.right);
        assert_eq!(rect.bottom, -rect.top);
    }

    #[test]
    fn test_screen_rect_fill_square_image() {
        let camera = RasterCamera {
            fit: FitMode::Fill,
            ..RasterCamera::default()
        };
        let rect = camera.screen_rect(100.0, 100.0, 1.0);

        // fill shrinks right down to the (smaller) top extent instead
        let expected_top = 0.735 * 25.4 / 2.0 / 20.0;
        assert!((rect.top - expected_top).abs() < EPS);
        assert!((rect.right - expected_top).abs() < EPS);
    }

    #[test]
    fn test_screen_rect_scales_with_near_plane() {
        let camera = RasterCamera::default();
        let near = camera.screen_rect(640.0, 480.0, 1.0);
        let far = camera.screen_rect(640.0, 480.0, 2.0);
        assert!((far.top - 2.0 * near.top).abs() < EPS);
        assert!((far.right - 2.0 * near.right).abs() < EPS);
    }

    #[test]
    fn test_matching_aspects_need_no_scaling() {
        // device aspect equals the film aspect: both policies agree
        let camera = RasterCamera::default();
        let w = 980.0;
        let h = 735.0;
        let overscan = camera.screen_rect(w, h, 1.0);
        let fill = RasterCamera {
            fit: FitMode::Fill,
            ..camera
        }
        .screen_rect(w, h, 1.0);
        assert!((overscan.top - fill.top).abs() < EPS);
        assert!((overscan.right - fill.right).abs() < EPS);
    }

    #[test]
    fn test_optical_axis_maps_to_image_center() {
        let camera = RasterCamera::default();
        let rect = camera.screen_rect(200.0, 100.0, 1.0);
        let v = rasterize_vertex(
            Vec3::new(0.0, 0.0, -5.0),
            &Mat4::IDENTITY,
            &rect,
            1.0,
            200.0,
            100.0,
        );
        assert!((v.x - 100.0).abs() < EPS);
        assert!((v.y - 50.0).abs() < EPS);
        assert!((v.z - 5.0).abs() < EPS);
    }

    #[test]
    fn test_rect_corner_maps_to_top_right_pixel_corner() {
        let camera = RasterCamera::default();
        let rect = camera.screen_rect(100.0, 100.0, 1.0);
        // a point projecting exactly onto the rect's top-right corner
        let v = rasterize_vertex(
            Vec3::new(rect.right, rect.top, -1.0),
            &Mat4::IDENTITY,
            &rect,
            1.0,
            100.0,
            100.0,
        );
        assert!((v.x - 100.0).abs() < EPS);
        assert!(v.y.abs() < EPS); // raster Y grows downward
    }

    #[test]
    fn test_raster_y_is_inverted() {
        let camera = RasterCamera::default();
        let rect = camera.screen_rect(100.0, 100.0, 1.0);
        let above = rasterize_vertex(
            Vec3::new(0.0, 0.2, -1.0),
            &Mat4::IDENTITY,
            &rect,
            1.0,
            100.0,
            100.0,
        );
        let below = rasterize_vertex(
            Vec3::new(0.0, -0.2, -1.0),
            &Mat4::IDENTITY,
            &rect,
            1.0,
            100.0,
            100.0,
        );
        assert!(above.y < below.y);
    }
}
