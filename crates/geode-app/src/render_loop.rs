//! Redraw-driven render loop with a cancellation flag.
//!
//! The loop is a two-state machine. [`RenderLoop::start`] uploads the mesh
//! and lighting and moves it from [`LoopState::Idle`] to
//! [`LoopState::Rendering`]. Each [`RenderLoop::run_frame`] renders through
//! [`render_frame`] and then asks a [`FrameScheduler`] for the next frame,
//! until the shared [`StopFlag`] is raised.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use geode_render::{FrameReport, GraphicsDevice, render_frame};
use geode_scene::{SceneChange, SceneCommand, SceneState};
use tracing::{debug, info};
use winit::window::Window;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Rendering,
}

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Requests another frame from the platform.
pub trait FrameScheduler {
    fn schedule_next_frame(&self);
}

impl FrameScheduler for Window {
    fn schedule_next_frame(&self) {
        self.request_redraw();
    }
}

/// Owns the scene and sequences frames and commands against a device.
#[derive(Debug)]
pub struct RenderLoop {
    scene: SceneState,
    state: LoopState,
    stop: StopFlag,
    frame_count: u64,
}

impl RenderLoop {
    pub fn new(scene: SceneState, stop: StopFlag) -> Self {
        Self {
            scene,
            state: LoopState::Idle,
            stop,
            frame_count: 0,
        }
    }

    /// Upload the initial mesh and lighting, then schedule the first frame.
    ///
    /// Stays idle if the stop flag is already raised. Starting a loop that is
    /// already rendering does nothing.
    pub fn start<D: GraphicsDevice>(&mut self, device: &mut D, scheduler: &impl FrameScheduler) {
        if self.state == LoopState::Rendering || self.stop.is_raised() {
            return;
        }
        device.upload_mesh(self.scene.mesh());
        device.upload_lighting(self.scene.lighting());
        self.state = LoopState::Rendering;
        info!(
            depth = self.scene.depth(),
            triangles = self.scene.mesh().triangle_count(),
            "Render loop started"
        );
        scheduler.schedule_next_frame();
    }

    /// Render one frame and schedule the next.
    ///
    /// Returns `Ok(None)` without touching the device while idle. Once the
    /// stop flag is seen the loop falls back to idle and nothing further is
    /// scheduled. A device error is returned after the next frame has been
    /// scheduled.
    pub fn run_frame<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        scheduler: &impl FrameScheduler,
    ) -> Result<Option<FrameReport>, D::Error> {
        if self.state == LoopState::Idle {
            return Ok(None);
        }
        if self.stop.is_raised() {
            self.halt();
            return Ok(None);
        }

        let result = render_frame(&self.scene, device);
        if result.is_ok() {
            self.frame_count += 1;
        }

        if self.stop.is_raised() {
            self.halt();
        } else {
            scheduler.schedule_next_frame();
        }
        result.map(Some)
    }

    /// Apply a scene command. A rebuilt mesh is re-uploaded before returning,
    /// so the next frame draws the new geometry.
    pub fn handle_command<D: GraphicsDevice>(
        &mut self,
        command: SceneCommand,
        device: &mut D,
    ) -> SceneChange {
        let change = self.scene.apply(command);
        if change == SceneChange::MeshRebuilt {
            device.upload_mesh(self.scene.mesh());
        }
        change
    }

    /// Apply a scene command while no device exists yet. The resulting mesh
    /// and camera reach the device in [`RenderLoop::start`].
    pub fn apply_without_device(&mut self, command: SceneCommand) -> SceneChange {
        let change = self.scene.apply(command);
        debug!(?command, ?change, "Applied scene command before device setup");
        change
    }

    fn halt(&mut self) {
        self.state = LoopState::Idle;
        debug!(frames = self.frame_count, "Render loop stopped");
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn stop_flag(&self) -> &StopFlag {
        &self.stop
    }

    /// Frames rendered successfully since construction.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
