//! 3D presentation of the cube: fixed scene description and texture lifecycle.
//!
//! The renderer itself is external. [`CubeScene`] describes what it should
//! build (box geometry, camera, lights, orbit controls) and [`CubeView`] owns
//! one texture per filled face on a [`SceneSurface`], creating textures when
//! a face fills and disposing them when the face empties, when the view is
//! closed, or when it is dropped.

use core::marker::PhantomData;

use crate::constraint::CanvasColor;
use crate::face::{FACE_COUNT, Face};
use crate::layout::CubeLayout;

/// Box mesh extents in scene units.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    pub position: [f32; 3],
    /// Vertical field of view.
    pub fov_degrees: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Lighting {
    pub ambient_intensity: f32,
    pub point_light_position: [f32; 3],
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct OrbitControls {
    pub zoom: bool,
    pub pan: bool,
    pub rotate: bool,
    pub auto_rotate: bool,
    /// Rotation speed; 2.0 is one revolution every 30 seconds at 60 fps.
    pub auto_rotate_speed: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            zoom: true,
            pan: true,
            rotate: true,
            auto_rotate: true,
            auto_rotate_speed: 2.0,
        }
    }
}

/// Everything the 3D surface needs besides the textures.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct CubeScene {
    pub geometry: BoxGeometry,
    pub camera: Camera,
    pub lighting: Lighting,
    pub controls: OrbitControls,
    /// Material color of faces without a texture.
    pub placeholder: CanvasColor,
    /// Textures are visible from inside the box too.
    pub double_sided: bool,
}

impl CubeScene {
    /// Six-face cube viewed head-on.
    pub fn multi_face() -> Self {
        Self {
            geometry: BoxGeometry {
                width: 4.0,
                height: 3.0,
                depth: 2.0,
            },
            camera: Camera {
                position: [0.0, 0.0, 6.0],
                fov_degrees: 50.0,
            },
            lighting: Lighting {
                ambient_intensity: 0.5,
                point_light_position: [10.0, 10.0, 10.0],
            },
            controls: OrbitControls::default(),
            placeholder: CanvasColor::White,
            double_sided: true,
        }
    }

    /// Cuboid with the same processed image on every face, viewed from a
    /// corner.
    pub fn single_texture() -> Self {
        Self {
            camera: Camera {
                position: [5.0, 5.0, 5.0],
                fov_degrees: 75.0,
            },
            ..Self::multi_face()
        }
    }
}

impl Default for CubeScene {
    fn default() -> Self {
        Self::multi_face()
    }
}

/// GPU-side owner of face textures.
pub trait SceneSurface<R: ?Sized> {
    /// Handle to an uploaded texture.
    type Texture;
    type Error;

    fn create_texture(&mut self, face: Face, image: &R) -> Result<Self::Texture, Self::Error>;

    /// Release a texture. Called exactly once per created texture.
    fn dispose_texture(&mut self, texture: Self::Texture);
}

/// Face textures bound to a [`SceneSurface`], kept in step with a
/// [`CubeLayout`] through [`sync`](Self::sync).
pub struct CubeView<R, T: SceneSurface<R>> {
    surface: T,
    scene: CubeScene,
    bound: [Option<(u64, T::Texture)>; FACE_COUNT],
    _image: PhantomData<fn(&R)>,
}

impl<R, T: SceneSurface<R>> CubeView<R, T> {
    pub fn new(surface: T, scene: CubeScene) -> Self {
        Self {
            surface,
            scene,
            bound: core::array::from_fn(|_| None),
            _image: PhantomData,
        }
    }

    pub fn scene(&self) -> &CubeScene {
        &self.scene
    }

    pub fn surface(&self) -> &T {
        &self.surface
    }

    /// Texture bound to `face`, if any.
    pub fn texture(&self, face: Face) -> Option<&T::Texture> {
        self.bound[face.index()].as_ref().map(|(_, t)| t)
    }

    /// Number of live textures.
    pub fn live_textures(&self) -> usize {
        self.bound.iter().filter(|b| b.is_some()).count()
    }

    /// Dispose textures of emptied or refilled faces and create textures for
    /// newly filled ones. Faces that did not change keep their texture.
    ///
    /// If creating a texture fails, faces already processed stay in sync and
    /// the failing face is left without a texture.
    pub fn sync<S>(&mut self, layout: &CubeLayout<S, R>) -> Result<(), T::Error> {
        for face in Face::ALL {
            let slot = layout.slot(face);
            let bound = &mut self.bound[face.index()];
            let current = match (bound.as_ref(), slot.rendered()) {
                (Some((revision, _)), Some(_)) => *revision == slot.revision(),
                (None, None) => true,
                _ => false,
            };
            if current {
                continue;
            }

            if let Some((_, texture)) = bound.take() {
                self.surface.dispose_texture(texture);
                log::debug!("{face}: texture disposed");
            }
            if let Some(rendered) = slot.rendered() {
                let texture = self.surface.create_texture(face, rendered)?;
                *bound = Some((slot.revision(), texture));
                log::debug!("{face}: texture created");
            }
        }
        Ok(())
    }

    /// Dispose every texture. The view can be synced again afterwards.
    pub fn close(&mut self) {
        for (face, bound) in Face::ALL.iter().zip(self.bound.iter_mut()) {
            if let Some((_, texture)) = bound.take() {
                self.surface.dispose_texture(texture);
                log::debug!("{face}: texture disposed on close");
            }
        }
    }
}

impl<R, T: SceneSurface<R>> Drop for CubeView<R, T> {
    fn drop(&mut self) {
        self.close();
    }
}
