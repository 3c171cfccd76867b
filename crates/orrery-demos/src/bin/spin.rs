//! Three spinning cubes under a single directional light.

use anyhow::Result;
use glam::Vec3;
use winit::dpi::LogicalSize;

use orrery_engine::camera::PerspectiveCamera;
use orrery_engine::core::{App, AppControl, FrameCtx};
use orrery_engine::device::GpuInit;
use orrery_engine::geometry;
use orrery_engine::logging::{LoggingConfig, init_logging};
use orrery_engine::render::MeshRenderer;
use orrery_engine::scene::{Color, DirectionalLight, Material, Scene, SceneObject};
use orrery_engine::window::{Runtime, RuntimeConfig};

struct SpinDemo {
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: MeshRenderer,
}

impl SpinDemo {
    fn new() -> Self {
        let mut scene = Scene::new();
        scene.add_light(DirectionalLight::new(
            Color::WHITE,
            3.0,
            Vec3::new(-1.0, 2.0, 4.0),
        ));

        // One unit cube, three instances. Each spins a little faster than
        // the previous so the motion never lines up.
        let cube = geometry::box_mesh(1.0, 1.0, 1.0);
        for (i, (hex, x)) in [(0x44aa88u32, 0.0f32), (0x8844aa, -2.0), (0xaa8844, 2.0)]
            .into_iter()
            .enumerate()
        {
            scene.add_object(
                SceneObject::new(cube.clone(), Material::lit(Color::from_hex(hex)))
                    .at(Vec3::new(x, 0.0, 0.0))
                    .spinning(1.0 + i as f32 * 0.1),
            );
        }

        // The camera looks down -Z; it has to back off to see the cubes.
        let mut camera = PerspectiveCamera::new(75.0, 2.0, 0.1, 5.0);
        camera.position = Vec3::new(0.0, 0.0, 2.0);

        Self {
            scene,
            camera,
            renderer: MeshRenderer::new(),
        }
    }
}

impl App for SpinDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
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

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Runtime::run(
        RuntimeConfig {
            title: "orrery · spinning cubes".to_string(),
            initial_size: LogicalSize::new(900.0, 450.0),
        },
        GpuInit::default(),
        SpinDemo::new(),
    )
}
