//! The three passes of a frame and the values each one is drawn with.
//!
//! Nothing in here touches the GPU. [`FramePlan`] decides which objects each
//! pass draws, [`PassContext`] carries the per-pass camera, clipping and
//! lighting state that ends up in the pass uniform buffer, and
//! [`FrameSchedule`] owns the animation clock and the pending rebuild flag.

use cgmath::{Matrix4, Point3};

use crate::{
    camera::{OrbitCamera, Projection},
    data_structures::object::{Object, ObjectRole},
    pipelines::uniforms::PassUniform,
    render::lighting::Lighting,
};

/// The passes of a frame, in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    Reflection,
    Refraction,
    Composite,
}

impl PassKind {
    pub const ORDER: [PassKind; 3] = [PassKind::Reflection, PassKind::Refraction, PassKind::Composite];

    /// `+1` keeps geometry above the water, `-1` below it, `0` disables clipping.
    pub fn clip_sign(self) -> i32 {
        match self {
            PassKind::Reflection => 1,
            PassKind::Refraction => -1,
            PassKind::Composite => 0,
        }
    }

    pub fn uses_reflected_camera(self) -> bool {
        self == PassKind::Reflection
    }

    /// Water samples the offscreen passes and is therefore left out of them.
    pub fn draws_water(self) -> bool {
        self == PassKind::Composite
    }

    pub fn index(self) -> usize {
        match self {
            PassKind::Reflection => 0,
            PassKind::Refraction => 1,
            PassKind::Composite => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PassKind::Reflection => "Reflection Pass",
            PassKind::Refraction => "Refraction Pass",
            PassKind::Composite => "Composite Pass",
        }
    }
}

/// One pass and the indices of the objects it draws.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassPlan {
    pub kind: PassKind,
    pub objects: Vec<usize>,
}

/// The fixed reflection, refraction, composite sequence for a set of objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePlan {
    pub passes: [PassPlan; 3],
}

impl FramePlan {
    pub fn new(objects: &[Object]) -> Self {
        Self::from_roles(objects.iter().map(|object| object.role))
    }

    /// Plan for objects given only by their roles, in draw order.
    pub fn from_roles<I: IntoIterator<Item = ObjectRole>>(roles: I) -> Self {
        let roles: Vec<ObjectRole> = roles.into_iter().collect();
        let plan = |kind: PassKind| PassPlan {
            kind,
            objects: roles
                .iter()
                .enumerate()
                .filter(|(_, role)| kind.draws_water() || **role != ObjectRole::Water)
                .map(|(idx, _)| idx)
                .collect(),
        };
        Self {
            passes: PassKind::ORDER.map(plan),
        }
    }

    pub fn pass(&self, kind: PassKind) -> &PassPlan {
        &self.passes[kind.index()]
    }
}

/// Per-pass render state, threaded explicitly through the draw calls.
#[derive(Clone, Debug, PartialEq)]
pub struct PassContext {
    pub kind: PassKind,
    pub camera_position: Point3<f32>,
    pub view_matrix: Matrix4<f32>,
    pub proj_matrix: Matrix4<f32>,
    pub lighting: Lighting,
    pub clip_sign: i32,
    pub time: f32,
    pub view_scale: f32,
    pub water_height: f32,
    pub near: f32,
    pub far: f32,
}

impl PassContext {
    pub fn new(
        kind: PassKind,
        camera: &OrbitCamera,
        projection: &Projection,
        lighting: &Lighting,
        time: f32,
    ) -> Self {
        let (camera_position, view_matrix) = if kind.uses_reflected_camera() {
            (camera.reflected_position(), camera.reflected_view_matrix())
        } else {
            (camera.position(), camera.view_matrix())
        };
        Self {
            kind,
            camera_position,
            view_matrix,
            proj_matrix: projection.calc_matrix(),
            lighting: lighting.clone(),
            clip_sign: kind.clip_sign(),
            time,
            view_scale: camera.view_scale(),
            water_height: camera.water_height(),
            near: projection.znear,
            far: projection.zfar,
        }
    }

    pub fn to_uniform(&self) -> PassUniform {
        PassUniform {
            camera_position: self.camera_position.into(),
            _padding: 0,
            view_matrix: self.view_matrix.into(),
            proj_matrix: self.proj_matrix.into(),
            light_position: self.lighting.position.into(),
            _padding2: 0,
            light_color: self.lighting.color.into(),
            clip_sign: self.clip_sign,
            time: self.time,
            scale: self.view_scale,
            water_height: self.water_height,
            near: self.near,
            far: self.far,
            _padding3: [0; 3],
        }
    }
}

/// Fixed-step animation time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationClock {
    time: f32,
}

impl AnimationClock {
    /// Advance per frame regardless of how long the frame actually took.
    pub const STEP: f32 = 1.0 / 60.0;

    pub fn tick(&mut self) -> f32 {
        self.time += Self::STEP;
        self.time
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

/// What a frame has to do before it starts drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStart {
    pub time: f32,
    pub regenerate: bool,
}

/// Owns the clock and coalesces rebuild requests between frames.
#[derive(Clone, Debug, Default)]
pub struct FrameSchedule {
    clock: AnimationClock,
    regenerate_pending: bool,
}

impl FrameSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a terrain rebuild. Any number of requests before the next
    /// frame collapse into one.
    pub fn request_regenerate(&mut self) {
        self.regenerate_pending = true;
    }

    pub fn regenerate_pending(&self) -> bool {
        self.regenerate_pending
    }

    /// Advance the clock and take the pending rebuild flag.
    pub fn begin_frame(&mut self) -> FrameStart {
        let time = self.clock.tick();
        let regenerate = std::mem::take(&mut self.regenerate_pending);
        FrameStart { time, regenerate }
    }

    pub fn time(&self) -> f32 {
        self.clock.time()
    }
}
