use geode_lighting::LightingProducts;
use geode_mesh::{MeshBuffer, MeshBuilder, SeedTetrahedron};
use tracing::{debug, info};

use crate::camera::OrbitCamera;
use crate::depth::SubdivisionDepth;

/// A discrete input to the scene, produced by the UI boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneCommand {
    /// Add radians to the polar angle.
    RotateTheta(f32),
    /// Add radians to the azimuth.
    RotatePhi(f32),
    IncreaseDepth,
    DecreaseDepth,
}

/// What a command did to the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneChange {
    Unchanged,
    CameraMoved,
    /// The mesh buffer was replaced and must be re-uploaded before the next
    /// frame.
    MeshRebuilt,
}

/// Everything a frame needs to render the sphere.
#[derive(Debug)]
pub struct SceneState {
    pub camera: OrbitCamera,
    lighting: LightingProducts,
    depth: SubdivisionDepth,
    builder: MeshBuilder,
    mesh_generation: u64,
}

impl SceneState {
    /// Build the initial mesh from the default seed.
    pub fn new(camera: OrbitCamera, depth: SubdivisionDepth, lighting: LightingProducts) -> Self {
        Self::with_seed(camera, depth, lighting, SeedTetrahedron::default())
    }

    pub fn with_seed(
        camera: OrbitCamera,
        depth: SubdivisionDepth,
        lighting: LightingProducts,
        seed: SeedTetrahedron,
    ) -> Self {
        let builder = MeshBuilder::new(seed, depth.get());
        info!(
            depth = depth.get(),
            triangles = builder.mesh().triangle_count(),
            "Scene initialized"
        );
        Self {
            camera,
            lighting,
            depth,
            builder,
            mesh_generation: 0,
        }
    }

    pub fn apply(&mut self, command: SceneCommand) -> SceneChange {
        match command {
            SceneCommand::RotateTheta(delta) => self.rotate_theta_by(delta),
            SceneCommand::RotatePhi(delta) => self.rotate_phi_by(delta),
            SceneCommand::IncreaseDepth => self.increase_depth(),
            SceneCommand::DecreaseDepth => self.decrease_depth(),
        }
    }

    pub fn rotate_theta_by(&mut self, delta: f32) -> SceneChange {
        self.camera.rotate_theta_by(delta);
        debug!(theta = self.camera.theta, "Camera theta changed");
        SceneChange::CameraMoved
    }

    pub fn rotate_phi_by(&mut self, delta: f32) -> SceneChange {
        self.camera.rotate_phi_by(delta);
        debug!(phi = self.camera.phi, "Camera phi changed");
        SceneChange::CameraMoved
    }

    pub fn increase_depth(&mut self) -> SceneChange {
        if self.depth.increase() {
            self.rebuild_mesh()
        } else {
            debug!(depth = self.depth.get(), "Subdivision depth already at maximum");
            SceneChange::Unchanged
        }
    }

    pub fn decrease_depth(&mut self) -> SceneChange {
        if self.depth.decrease() {
            self.rebuild_mesh()
        } else {
            SceneChange::Unchanged
        }
    }

    fn rebuild_mesh(&mut self) -> SceneChange {
        let triangles = self.builder.rebuild(self.depth.get()).triangle_count();
        self.mesh_generation += 1;
        info!(depth = self.depth.get(), triangles, "Subdivision depth changed");
        SceneChange::MeshRebuilt
    }

    pub fn depth(&self) -> u32 {
        self.depth.get()
    }

    pub fn mesh(&self) -> &MeshBuffer {
        self.builder.mesh()
    }

    /// Incremented on every rebuild; lets a renderer detect a stale upload.
    pub fn mesh_generation(&self) -> u64 {
        self.mesh_generation
    }

    pub fn lighting(&self) -> &LightingProducts {
        &self.lighting
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(
            OrbitCamera::default(),
            SubdivisionDepth::default(),
            LightingProducts::default(),
        )
    }
}
