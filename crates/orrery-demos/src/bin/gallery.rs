//! Primitive gallery: one of every mesh builder, spinning in a grid, plus a
//! line of extruded 3D text that arrives asynchronously once its font loads.

use std::f32::consts::PI;
use std::path::PathBuf;

use anyhow::Result;
use glam::{Vec2, Vec3};
use winit::dpi::LogicalSize;

use orrery_engine::assets::{self, PendingFont};
use orrery_engine::camera::PerspectiveCamera;
use orrery_engine::core::{App, AppControl, FrameCtx};
use orrery_engine::device::GpuInit;
use orrery_engine::geometry::{self, Curve, LatheConfig, MeshData, TubeConfig};
use orrery_engine::logging::{LoggingConfig, init_logging};
use orrery_engine::render::MeshRenderer;
use orrery_engine::scene::{Color, DirectionalLight, Material, Scene, SceneObject};
use orrery_engine::text::{Font, TextConfig, text_mesh};
use orrery_engine::window::{Runtime, RuntimeConfig};

/// World units between grid cells.
const SPREAD: f32 = 15.0;

/// Grid cell the text mesh lands in once its font arrives.
const TEXT_CELL: (i32, i32) = (-1, -1);

struct GalleryDemo {
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: MeshRenderer,
    pending_font: Option<PendingFont>,
}

impl GalleryDemo {
    fn new(font_path: PathBuf) -> Self {
        let mut demo = Self {
            scene: Scene::new(),
            camera: PerspectiveCamera::new(40.0, 2.0, 0.1, 1000.0),
            renderer: MeshRenderer::new(),
            pending_font: Some(assets::load_font(font_path)),
        };

        demo.camera.position = Vec3::new(0.0, 0.0, 120.0);
        demo.scene.background = Color::from_hex(0xaaaaaa);
        demo.scene.add_light(DirectionalLight::new(
            Color::WHITE,
            3.0,
            Vec3::new(-1.0, 2.0, 4.0),
        ));
        demo.scene.add_light(DirectionalLight::new(
            Color::WHITE,
            3.0,
            Vec3::new(1.0, -2.0, -4.0),
        ));

        demo.populate();
        demo
    }

    fn populate(&mut self) {
        self.solid(-2, 2, geometry::box_mesh(8.0, 8.0, 8.0));
        self.solid(-1, 2, geometry::circle(7.0, 24));
        self.solid(0, 2, geometry::cone(6.0, 8.0, 16));
        self.solid(1, 2, geometry::cylinder(4.0, 4.0, 8.0, 12));
        self.solid(2, 2, geometry::dodecahedron(7.0));

        self.solid(-1, 1, geometry::icosahedron(7.0));
        self.solid(0, 1, {
            let points: Vec<Vec2> = (0..10)
                .map(|i| Vec2::new((i as f32 * 0.2).sin() * 3.0 + 3.0, (i as f32 - 5.0) * 0.8))
                .collect();
            geometry::lathe(&points, &LatheConfig::default())
        });
        self.solid(1, 1, geometry::octahedron(7.0));
        self.solid(2, 1, geometry::parametric(klein, 25, 25));

        self.solid(-2, 0, geometry::plane(9.0, 9.0, 2, 2));
        self.solid(-1, 0, subdivided_cube(7.0, 2));
        self.solid(0, 0, geometry::ring(2.0, 7.0, 18));
        self.solid(2, 0, geometry::sphere(7.0, 12, 8));

        self.solid(-2, -1, geometry::tetrahedron(7.0));
        // TEXT_CELL stays empty until the font load settles.
        self.solid(0, -1, geometry::torus(5.0, 2.0, 8, 24));
        self.solid(1, -1, geometry::torus_knot(3.5, 1.5, 64, 8, 2, 3));
        self.solid(2, -1, {
            let path = SinCurve { scale: 4.0 };
            geometry::tube(
                &path,
                &TubeConfig {
                    tubular_segments: 20,
                    radius: 1.0,
                    radial_segments: 8,
                    closed: false,
                },
            )
        });

        let cube = geometry::box_mesh(8.0, 8.0, 8.0);
        self.line(-1, -2, geometry::edges(&cube, 15.0));
        self.line(1, -2, geometry::wireframe(&cube));
    }

    /// Places `object` at a grid cell, spinning slightly faster the later it
    /// was added.
    fn place(&mut self, x: i32, y: i32, object: SceneObject) {
        let speed = 0.1 + self.scene.len() as f32 * 0.05;
        self.scene.add_object(
            object
                .at(Vec3::new(x as f32 * SPREAD, y as f32 * SPREAD, 0.0))
                .spinning(speed),
        );
    }

    fn solid(&mut self, x: i32, y: i32, mesh: MeshData) {
        let color = cell_color(self.scene.len());
        self.place(x, y, SceneObject::new(mesh, Material::lit_double_sided(color)));
    }

    fn line(&mut self, x: i32, y: i32, mesh: MeshData) {
        self.place(x, y, SceneObject::new(mesh, Material::line(Color::BLACK)));
    }

    fn add_text(&mut self, font: &Font) {
        let mut mesh = text_mesh(
            font,
            "orrery",
            &TextConfig {
                size: 3.0,
                depth: 0.2,
                ..TextConfig::default()
            },
        );
        // Spin around the middle of the text, not the first baseline.
        mesh.recenter();

        let (x, y) = TEXT_CELL;
        let color = cell_color(self.scene.len());
        self.place(x, y, SceneObject::new(mesh, Material::lit_double_sided(color)));
    }
}

impl App for GalleryDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // Build stage of the font pipeline: runs once, only on success. On
        // failure the text cell simply stays empty.
        if let Some(pending) = &mut self.pending_font
            && let Some(result) = pending.poll()
        {
            self.pending_font = None;
            match result {
                Ok(font) => self.add_text(&font),
                Err(e) => log::warn!("font load failed, skipping 3D text: {e}"),
            }
        }

        if ctx.surface_resized {
            self.camera.set_aspect(ctx.aspect());
        }

        self.scene.apply_spin(ctx.time.elapsed);

        let background = self.scene.background;
        let (scene, camera, renderer) = (&self.scene, &self.camera, &mut self.renderer);
        ctx.render(background, |rctx, target| {
            renderer.render(rctx, target, scene, camera);
        })
    }
}

/// Hue steps around the wheel by the golden ratio so neighbouring cells get
/// clearly different colors without any random state.
fn cell_color(index: usize) -> Color {
    Color::from_hsl(index as f32 * 0.618_034, 1.0, 0.5)
}

/// One period of a sine wave in the XY plane, scaled uniformly.
struct SinCurve {
    scale: f32,
}

impl Curve for SinCurve {
    fn point_at(&self, t: f32) -> Vec3 {
        Vec3::new(t * 3.0 - 1.5, (2.0 * PI * t).sin(), 0.0) * self.scale
    }
}

/// Klein-bottle immersion over the unit square.
///
/// The major angle runs along `v`, the tube angle along `u`; the surface
/// self-intersects where the tube passes back through the body.
fn klein(u: f32, v: f32) -> Vec3 {
    let a = v * 2.0 * PI;
    let b = u * 2.0 * PI;

    let (x, z) = if a < PI {
        (
            3.0 * a.cos() * (1.0 + a.sin())
                + 2.0 * (1.0 - a.cos() / 2.0) * a.cos() * b.cos(),
            -8.0 * a.sin() - 2.0 * (1.0 - a.cos() / 2.0) * a.sin() * b.cos(),
        )
    } else {
        (
            3.0 * a.cos() * (1.0 + a.sin()) + 2.0 * (1.0 - a.cos() / 2.0) * (b + PI).cos(),
            -8.0 * a.sin(),
        )
    };
    let y = -2.0 * (1.0 - a.cos() / 2.0) * b.sin();

    Vec3::new(x, y, z) * 0.75
}

/// First CLI argument if given, then common system font locations.
fn font_path() -> PathBuf {
    if let Some(arg) = std::env::args().nth(1) {
        return PathBuf::from(arg);
    }

    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.exists())
    .unwrap_or_else(|| PathBuf::from("DejaVuSans.ttf"))
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Runtime::run(
        RuntimeConfig {
            title: "orrery · primitive gallery".to_string(),
            initial_size: LogicalSize::new(1280.0, 640.0),
        },
        GpuInit::default(),
        GalleryDemo::new(font_path()),
    )
}

/// Cube corners subdivided and projected onto a sphere.
fn subdivided_cube(radius: f32, detail: u32) -> MeshData {
    #[rustfmt::skip]
    let vertices = [
        Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),   Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),  Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),    Vec3::new(-1.0, 1.0, 1.0),
    ];
    #[rustfmt::skip]
    let indices = [
        2, 1, 0,  0, 3, 2,
        0, 4, 7,  7, 3, 0,
        0, 1, 5,  5, 4, 0,
        1, 2, 6,  6, 5, 1,
        2, 3, 7,  7, 6, 2,
        4, 5, 6,  6, 7, 4,
    ];
    geometry::polyhedron(&vertices, &indices, radius, detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sin_curve_matches_its_closed_form() {
        let curve = SinCurve { scale: 4.0 };
        assert!((curve.point_at(0.0) - Vec3::new(-6.0, 0.0, 0.0)).length() < 1e-5);
        assert!((curve.point_at(0.25) - Vec3::new(-3.0, 4.0, 0.0)).length() < 1e-5);
        assert!((curve.point_at(0.5) - Vec3::new(0.0, 0.0, 0.0)).length() < 1e-4);
        assert!((curve.point_at(1.0) - Vec3::new(6.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn klein_samples_are_finite_and_bounded() {
        for iv in 0..=25 {
            for iu in 0..=25 {
                let p = klein(iu as f32 / 25.0, iv as f32 / 25.0);
                assert!(p.is_finite());
                assert!(p.length() < 20.0);
            }
        }
    }

    #[test]
    fn cell_colors_differ_between_neighbours() {
        let a = cell_color(0);
        let b = cell_color(1);
        assert_ne!(a, b);
    }

    #[test]
    fn subdivided_cube_sits_on_its_radius() {
        let mesh = subdivided_cube(7.0, 2);
        for p in &mesh.positions {
            assert!((p.length() - 7.0).abs() < 1e-3);
        }
        // 12 seed triangles, quadrupled twice.
        assert_eq!(mesh.index_count(), 12 * 16 * 3);
    }
}
