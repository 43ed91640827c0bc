//! End-to-end: scene commands and frames against a recording device.

use std::cell::Cell;

use geode_app::render_loop::{FrameScheduler, LoopState, RenderLoop, StopFlag};
use geode_app::setup::scene_from_config;
use geode_config::Config;
use geode_lighting::LightingProducts;
use geode_math::spherical_to_cartesian;
use geode_mesh::{MeshBuffer, SeedTetrahedron};
use geode_render::GraphicsDevice;
use geode_scene::{SceneChange, SceneCommand};
use glam::{Mat4, Vec4};

const EPS: f32 = 1e-5;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Begin,
    Transforms,
    Draw(u32, u32),
    End,
    Mesh(usize),
    Lighting,
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
    positions: Vec<Vec4>,
    view: Mat4,
}

impl GraphicsDevice for Recorder {
    type Error = ();

    fn begin_frame(&mut self) -> Result<(), ()> {
        self.calls.push(Call::Begin);
        Ok(())
    }

    fn upload_transforms(&mut self, view: &Mat4, _projection: &Mat4) {
        self.view = *view;
        self.calls.push(Call::Transforms);
    }

    fn draw(&mut self, first: u32, count: u32) {
        self.calls.push(Call::Draw(first, count));
    }

    fn end_frame(&mut self) -> Result<(), ()> {
        self.calls.push(Call::End);
        Ok(())
    }

    fn upload_mesh(&mut self, mesh: &MeshBuffer) {
        self.positions = mesh.positions().to_vec();
        self.calls.push(Call::Mesh(mesh.vertex_count()));
    }

    fn upload_lighting(&mut self, _lighting: &LightingProducts) {
        self.calls.push(Call::Lighting);
    }
}

#[derive(Default)]
struct Scheduler(Cell<u32>);

impl FrameScheduler for Scheduler {
    fn schedule_next_frame(&self) {
        self.0.set(self.0.get() + 1);
    }
}

fn depth_zero_loop() -> RenderLoop {
    let mut config = Config::default();
    config.render.initial_depth = 0;
    RenderLoop::new(scene_from_config(&config), StopFlag::new())
}

#[test]
fn test_depth_zero_draws_seed_tetrahedron() {
    let mut render_loop = depth_zero_loop();
    let mut device = Recorder::default();
    let scheduler = Scheduler::default();
    render_loop.start(&mut device, &scheduler);

    assert_eq!(device.calls, vec![Call::Mesh(12), Call::Lighting]);
    let seeds = SeedTetrahedron::default();
    for p in &device.positions {
        assert!(
            seeds.vertices().iter().any(|s| (*s - *p).length() < EPS),
            "{p} is not a seed vertex"
        );
    }

    device.calls.clear();
    let report = render_loop.run_frame(&mut device, &scheduler).unwrap().unwrap();
    assert_eq!(report.draw_calls, 4);
    assert_eq!(
        device.calls,
        vec![
            Call::Begin,
            Call::Transforms,
            Call::Draw(0, 3),
            Call::Draw(3, 3),
            Call::Draw(6, 3),
            Call::Draw(9, 3),
            Call::End,
        ]
    );
    assert_eq!(scheduler.0.get(), 2);
}

#[test]
fn test_increase_depth_uploads_unit_sphere_before_next_frame() {
    let mut render_loop = depth_zero_loop();
    let mut device = Recorder::default();
    let scheduler = Scheduler::default();
    render_loop.start(&mut device, &scheduler);
    device.calls.clear();

    let change = render_loop.handle_command(SceneCommand::IncreaseDepth, &mut device);
    assert_eq!(change, SceneChange::MeshRebuilt);
    assert_eq!(device.calls, vec![Call::Mesh(48)]);
    assert_eq!(device.positions.len(), 48);
    for p in &device.positions {
        assert!((p.truncate().length() - 1.0).abs() < 1e-6);
        assert_eq!(p.w, 1.0);
    }

    let report = render_loop.run_frame(&mut device, &scheduler).unwrap().unwrap();
    assert_eq!(report.draw_calls, 16);
}

#[test]
fn test_six_five_degree_steps_equal_thirty_degrees() {
    let mut render_loop = depth_zero_loop();
    let mut device = Recorder::default();
    let scheduler = Scheduler::default();
    let step = 5.0_f32.to_radians();
    let radius = render_loop.scene().camera.radius;

    render_loop.start(&mut device, &scheduler);
    for _ in 0..6 {
        let change = render_loop.handle_command(SceneCommand::RotateTheta(step), &mut device);
        assert_eq!(change, SceneChange::CameraMoved);
    }
    let report = render_loop.run_frame(&mut device, &scheduler).unwrap().unwrap();

    let expected = spherical_to_cartesian(radius, 30.0_f32.to_radians(), 0.0);
    assert!((report.eye - expected).length() < EPS);
    assert!((report.eye.length() - radius).abs() < EPS);

    // The uploaded view matrix places the orbit target straight ahead.
    let target = device.view * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(target.x.abs() < EPS && target.y.abs() < EPS);
    assert!((target.z + radius).abs() < EPS);
}

#[test]
fn test_decrease_at_zero_is_noop() {
    let mut render_loop = depth_zero_loop();
    let mut device = Recorder::default();
    let change = render_loop.handle_command(SceneCommand::DecreaseDepth, &mut device);
    assert_eq!(change, SceneChange::Unchanged);
    assert!(device.calls.is_empty());
    assert_eq!(render_loop.scene().depth(), 0);
    assert_eq!(render_loop.scene().mesh_generation(), 0);
}

#[test]
fn test_stop_flag_ends_loop_from_outside() {
    let mut render_loop = depth_zero_loop();
    let mut device = Recorder::default();
    let scheduler = Scheduler::default();
    let stop = render_loop.stop_flag().clone();
    render_loop.start(&mut device, &scheduler);

    for _ in 0..3 {
        render_loop.run_frame(&mut device, &scheduler).unwrap();
    }
    stop.raise();
    assert_eq!(render_loop.run_frame(&mut device, &scheduler), Ok(None));
    assert_eq!(render_loop.state(), LoopState::Idle);
    assert_eq!(render_loop.frame_count(), 3);
    assert_eq!(scheduler.0.get(), 4);
}
