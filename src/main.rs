//! Prism Engine viewer: orbits a small test scene through the software
//! rasterizer and blits the finished frame to the window.
//!
//! Controls:
//! - Space: pause/resume the orbit
//! - Arrows: orbit manually, mouse wheel: dolly
//! - F: toggle Overscan/Fill, C: flip the front-face convention
//! - P: save a screenshot, S/L: save/load viewer settings
//!
//! `--turntable N` renders N frames to PNG files headlessly instead.

use macroquad::prelude::*;

use prism_engine::raster::{
    box_shape, draw, sphere, surface, DepthBuffer, FrameBuffer, FrontFace, Mat4, PrimitiveType,
    Vec3 as RVec3, VertexBuffer, VertexFormat, HEIGHT, WIDTH,
};
use prism_engine::settings::{load_settings, save_settings, ViewerSettings};
use prism_engine::VERSION;

const SETTINGS_PATH: &str = "viewer.ron";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Prism Engine v{}", VERSION),
        window_width: WIDTH as i32 * 3,
        window_height: HEIGHT as i32 * 3,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// The fixed test scene: a sphere, a box and a ground plane
struct Scene {
    sphere: Vec<VertexBuffer>,
    cube: Vec<VertexBuffer>,
    ground: VertexBuffer,
}

fn build_scene() -> Scene {
    let mut format = VertexFormat::new(PrimitiveType::TriangleStrip);
    format.has_normal = true;
    format.has_tex_coord = true;

    Scene {
        sphere: sphere(format, 1.2, 12, 16, [1.0, 1.0, 1.0, 1.0]),
        cube: box_shape(format, 1.8, 1.8, 1.8, [1.0, 1.0, 1.0, 1.0]),
        ground: surface(format, 12.0, 12.0, [1.0, 1.0, 1.0, 1.0]),
    }
}

/// Orbit state around the scene origin
struct Orbit {
    yaw: f32,
    pitch: f32,
    distance: f32,
    spinning: bool,
}

impl Orbit {
    fn view_matrix(&self) -> Mat4 {
        Mat4::rotation_y(self.yaw)
            .mul(&Mat4::rotation_x(self.pitch))
            .mul(&Mat4::translation(RVec3::new(0.0, 0.0, -self.distance)))
    }
}

/// Render one frame of the scene into the buffer pair
fn render_scene(
    scene: &Scene,
    orbit: &Orbit,
    cube_angle: f32,
    settings: &ViewerSettings,
    fb: &mut FrameBuffer,
    db: &mut DepthBuffer,
) {
    fb.clear(settings.background);
    db.clear(settings.z_far);

    let view = orbit.view_matrix();
    let mut shader = settings.shader;

    let sphere_model = Mat4::translation(RVec3::new(-1.6, 0.0, 0.0));
    let cube_model =
        Mat4::rotation_y(cube_angle).mul(&Mat4::translation(RVec3::new(1.6, 0.0, 0.0)));
    // +90 degrees about X lays the surface flat with its face up
    let ground_model = Mat4::rotation_x(std::f32::consts::FRAC_PI_2)
        .mul(&Mat4::translation(RVec3::new(0.0, -1.6, 0.0)));

    let groups: [(&[VertexBuffer], Mat4); 3] = [
        (scene.sphere.as_slice(), sphere_model),
        (scene.cube.as_slice(), cube_model),
        (std::slice::from_ref(&scene.ground), ground_model),
    ];

    for (buffers, model) in groups {
        let model_view = model.mul(&view);
        for vb in buffers {
            if let Err(e) = draw(
                &model_view,
                settings.z_near,
                settings.z_far,
                vb,
                &settings.camera,
                settings.front_face,
                &mut shader,
                fb,
                db,
            ) {
                eprintln!("draw failed: {}", e);
            }
        }
    }
}

fn save_screenshot(fb: &FrameBuffer, path: &str) {
    match image::save_buffer(
        path,
        &fb.to_rgba_bytes(),
        fb.width as u32,
        fb.height as u32,
        image::ExtendedColorType::Rgba8,
    ) {
        Ok(()) => println!("Saved {}", path),
        Err(e) => eprintln!("Screenshot failed: {}", e),
    }
}

/// Render a full rotation to `frames/` as PNG files, no window interaction
#[cfg(not(target_arch = "wasm32"))]
fn render_turntable(frames: usize, scene: &Scene, settings: &ViewerSettings) {
    use indicatif::ProgressBar;

    if let Err(e) = std::fs::create_dir_all("frames") {
        eprintln!("Cannot create frames/: {}", e);
        return;
    }

    let (mut fb, mut db) = match (
        FrameBuffer::new(WIDTH * 2, HEIGHT * 2),
        DepthBuffer::new(WIDTH * 2, HEIGHT * 2),
    ) {
        (Ok(fb), Ok(db)) => (fb, db),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Buffer creation failed: {}", e);
            return;
        }
    };

    let pb = ProgressBar::new(frames as u64);
    for frame in 0..frames {
        let t = frame as f32 / frames as f32;
        let orbit = Orbit {
            yaw: t * std::f32::consts::TAU,
            pitch: -0.35,
            distance: 8.0,
            spinning: false,
        };
        render_scene(
            scene,
            &orbit,
            t * std::f32::consts::TAU * 2.0,
            settings,
            &mut fb,
            &mut db,
        );
        save_screenshot(&fb, &format!("frames/frame_{:04}.png", frame));
        pb.inc(1);
    }
    pb.finish();
    println!("Rendered {} frames to frames/", frames);
}

#[macroquad::main(window_conf)]
async fn main() {
    let scene = build_scene();

    // settings from disk if present, defaults otherwise
    let mut settings = match load_settings(SETTINGS_PATH) {
        Ok(s) => {
            println!("Loaded {}", SETTINGS_PATH);
            s
        }
        Err(_) => ViewerSettings::default(),
    };

    #[cfg(not(target_arch = "wasm32"))]
    {
        let args: Vec<String> = std::env::args().collect();
        if let Some(i) = args.iter().position(|a| a == "--turntable") {
            let frames = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(120);
            render_turntable(frames, &scene, &settings);
            return;
        }
    }

    let mut fb = FrameBuffer::new(WIDTH, HEIGHT).expect("non-zero resolution");
    let mut db = DepthBuffer::new(WIDTH, HEIGHT).expect("non-zero resolution");

    let mut orbit = Orbit {
        yaw: 0.0,
        pitch: -0.35,
        distance: 8.0,
        spinning: true,
    };
    let mut cube_angle = 0.0f32;

    println!("=== Prism Engine ===");

    loop {
        let dt = get_frame_time();

        if is_key_pressed(KeyCode::Space) {
            orbit.spinning = !orbit.spinning;
        }
        if is_key_pressed(KeyCode::F) {
            settings.toggle_fit();
            println!("Fit mode: {:?}", settings.camera.fit);
        }
        if is_key_pressed(KeyCode::C) {
            settings.front_face = match settings.front_face {
                FrontFace::Ccw => FrontFace::Cw,
                FrontFace::Cw => FrontFace::Ccw,
            };
            println!("Front face: {:?}", settings.front_face);
        }
        if is_key_pressed(KeyCode::P) {
            save_screenshot(&fb, "screenshot.png");
        }
        if is_key_pressed(KeyCode::S) {
            match save_settings(&settings, SETTINGS_PATH) {
                Ok(()) => println!("Saved {}", SETTINGS_PATH),
                Err(e) => eprintln!("Save failed: {}", e),
            }
        }
        if is_key_pressed(KeyCode::L) {
            match load_settings(SETTINGS_PATH) {
                Ok(s) => {
                    settings = s;
                    println!("Loaded {}", SETTINGS_PATH);
                }
                Err(e) => eprintln!("Load failed: {}", e),
            }
        }

        if is_key_down(KeyCode::Left) {
            orbit.yaw -= 1.5 * dt;
        }
        if is_key_down(KeyCode::Right) {
            orbit.yaw += 1.5 * dt;
        }
        if is_key_down(KeyCode::Up) {
            orbit.pitch = (orbit.pitch - dt).max(-1.2);
        }
        if is_key_down(KeyCode::Down) {
            orbit.pitch = (orbit.pitch + dt).min(0.4);
        }
        orbit.distance = (orbit.distance - mouse_wheel().1 * 0.5).clamp(3.0, 30.0);

        if orbit.spinning {
            orbit.yaw += settings.spin_speed * dt;
        }
        cube_angle += 0.8 * dt;

        render_scene(&scene, &orbit, cube_angle, &settings, &mut fb, &mut db);

        // blit, scaled to fit the window while keeping the aspect
        clear_background(Color::from_rgba(12, 12, 14, 255));
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.to_rgba_bytes());
        texture.set_filter(FilterMode::Nearest);

        let scale = (screen_width() / fb.width as f32).min(screen_height() / fb.height as f32);
        let dest_w = fb.width as f32 * scale;
        let dest_h = fb.height as f32 * scale;
        draw_texture_ex(
            &texture,
            (screen_width() - dest_w) / 2.0,
            (screen_height() - dest_h) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest_w, dest_h)),
                ..Default::default()
            },
        );

        draw_text(
            &format!(
                "{:?} | {:?} | space pause, F fit, C cull, P shot, S/L settings",
                settings.camera.fit, settings.front_face
            ),
            8.0,
            16.0,
            16.0,
            Color::from_rgba(200, 200, 200, 255),
        );

        next_frame().await;
    }
}
