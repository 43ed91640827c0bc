//! The per-frame rendering protocol, independent of any graphics API.
//!
//! [`render_frame`] drives a [`GraphicsDevice`] through one frame: clear,
//! derive the eye from the orbit camera, build view and projection, upload
//! both, then issue one draw per triangle in strides of three vertices.
//! Scheduling the next frame is the caller's job.

use geode_lighting::LightingProducts;
use geode_mesh::MeshBuffer;
use geode_scene::SceneState;
use glam::{Mat4, Vec3};

/// The capability set the renderer needs from a graphics backend.
///
/// Implementations must read uploaded buffers back verbatim at draw time, in
/// the order they were written.
pub trait GraphicsDevice {
    type Error;

    /// Start a frame with cleared color and depth targets.
    fn begin_frame(&mut self) -> Result<(), Self::Error>;

    fn upload_transforms(&mut self, view: &Mat4, projection: &Mat4);

    /// Draw `count` vertices starting at `first` from the current mesh.
    fn draw(&mut self, first: u32, count: u32);

    /// Submit the frame for presentation.
    fn end_frame(&mut self) -> Result<(), Self::Error>;

    /// Replace the vertex data drawn by subsequent frames.
    fn upload_mesh(&mut self, mesh: &MeshBuffer);

    fn upload_lighting(&mut self, lighting: &LightingProducts);
}

/// What a single call to [`render_frame`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub eye: Vec3,
    pub draw_calls: u32,
}

/// Render one frame of `scene` on `device`.
pub fn render_frame<D: GraphicsDevice>(
    scene: &SceneState,
    device: &mut D,
) -> Result<FrameReport, D::Error> {
    device.begin_frame()?;

    let camera = &scene.camera;
    let eye = camera.eye();
    let view = geode_math::look_at(eye, camera.target, camera.up);
    let projection = camera.projection_matrix();
    device.upload_transforms(&view, &projection);

    let triangles = scene.mesh().triangle_count() as u32;
    for triangle in 0..triangles {
        device.draw(triangle * 3, 3);
    }

    device.end_frame()?;
    Ok(FrameReport {
        eye,
        draw_calls: triangles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geode_scene::{OrbitCamera, SubdivisionDepth};

    #[derive(Debug, PartialEq)]
    enum Call {
        Begin,
        Transforms(Mat4, Mat4),
        Draw(u32, u32),
        End,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        fail_begin: bool,
    }

    impl GraphicsDevice for Recorder {
        type Error = &'static str;

        fn begin_frame(&mut self) -> Result<(), Self::Error> {
            if self.fail_begin {
                return Err("no surface");
            }
            self.calls.push(Call::Begin);
            Ok(())
        }

        fn upload_transforms(&mut self, view: &Mat4, projection: &Mat4) {
            self.calls.push(Call::Transforms(*view, *projection));
        }

        fn draw(&mut self, first: u32, count: u32) {
            self.calls.push(Call::Draw(first, count));
        }

        fn end_frame(&mut self) -> Result<(), Self::Error> {
            self.calls.push(Call::End);
            Ok(())
        }

        fn upload_mesh(&mut self, _mesh: &MeshBuffer) {}

        fn upload_lighting(&mut self, _lighting: &LightingProducts) {}
    }

    fn scene(depth: u32) -> SceneState {
        SceneState::new(
            OrbitCamera::default(),
            SubdivisionDepth::new(depth, 8),
            LightingProducts::default(),
        )
    }

    #[test]
    fn test_frame_call_order() {
        let mut device = Recorder::default();
        let report = render_frame(&scene(0), &mut device).unwrap();

        assert_eq!(report.draw_calls, 4);
        assert_eq!(device.calls.len(), 1 + 1 + 4 + 1);
        assert_eq!(device.calls[0], Call::Begin);
        assert!(matches!(device.calls[1], Call::Transforms(..)));
        assert_eq!(device.calls.last(), Some(&Call::End));
    }

    #[test]
    fn test_draws_stride_by_three() {
        let mut device = Recorder::default();
        render_frame(&scene(1), &mut device).unwrap();

        let draws: Vec<(u32, u32)> = device
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Draw(first, count) => Some((*first, *count)),
                _ => None,
            })
            .collect();
        assert_eq!(draws.len(), 16);
        for (i, (first, count)) in draws.iter().enumerate() {
            assert_eq!(*first, 3 * i as u32);
            assert_eq!(*count, 3);
        }
    }

    #[test]
    fn test_uploaded_matrices_follow_camera() {
        let mut s = scene(0);
        s.camera.rotate_theta_by(0.5);
        let mut device = Recorder::default();
        let report = render_frame(&s, &mut device).unwrap();

        assert!((report.eye - s.camera.eye()).length() < 1e-6);
        let Call::Transforms(view, projection) = device.calls[1] else {
            panic!("transforms not uploaded second");
        };
        assert_eq!(view, s.camera.view_matrix());
        assert_eq!(projection, s.camera.projection_matrix());
    }

    #[test]
    fn test_begin_failure_draws_nothing() {
        let mut device = Recorder {
            fail_begin: true,
            ..Recorder::default()
        };
        assert!(render_frame(&scene(2), &mut device).is_err());
        assert!(device.calls.is_empty());
    }
}
