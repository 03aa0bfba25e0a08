use terra_ngin::{
    camera::{OrbitCamera, Projection},
    data_structures::object::ObjectRole,
    render::{
        lighting::{LIGHT_PERIOD, Lighting},
        pass::{AnimationClock, FramePlan, FrameSchedule, PassContext, PassKind},
    },
};

fn scene_roles() -> Vec<ObjectRole> {
    vec![ObjectRole::Solid, ObjectRole::Water, ObjectRole::Solid]
}

#[test]
fn should_run_passes_in_fixed_order() {
    let plan = FramePlan::from_roles(scene_roles());
    let kinds: Vec<PassKind> = plan.passes.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![PassKind::Reflection, PassKind::Refraction, PassKind::Composite]);
}

#[test]
fn should_leave_water_out_of_offscreen_passes() {
    let plan = FramePlan::from_roles(scene_roles());
    assert_eq!(plan.pass(PassKind::Reflection).objects, vec![0, 2]);
    assert_eq!(plan.pass(PassKind::Refraction).objects, vec![0, 2]);
    assert_eq!(plan.pass(PassKind::Composite).objects, vec![0, 1, 2]);
}

#[test]
fn should_plan_empty_passes_for_an_empty_scene() {
    let plan = FramePlan::from_roles(Vec::new());
    assert!(plan.passes.iter().all(|p| p.objects.is_empty()));
}

#[test]
fn should_clip_above_below_and_not_at_all() {
    assert_eq!(PassKind::Reflection.clip_sign(), 1);
    assert_eq!(PassKind::Refraction.clip_sign(), -1);
    assert_eq!(PassKind::Composite.clip_sign(), 0);
    assert!(PassKind::Reflection.uses_reflected_camera());
    assert!(!PassKind::Refraction.uses_reflected_camera());
    assert!(!PassKind::Composite.uses_reflected_camera());
}

#[test]
fn should_fill_pass_context_per_kind() {
    let camera = OrbitCamera::new(354, 0, 30, -2.0);
    let projection = Projection::new(800, 600, cgmath::Deg(60.0), 0.1, 100.0);
    let lighting = Lighting::at(1.0);

    let reflection = PassContext::new(PassKind::Reflection, &camera, &projection, &lighting, 1.0);
    let composite = PassContext::new(PassKind::Composite, &camera, &projection, &lighting, 1.0);

    assert_eq!(reflection.view_matrix, camera.reflected_view_matrix());
    assert_eq!(reflection.camera_position, camera.reflected_position());
    assert_eq!(composite.view_matrix, camera.view_matrix());
    assert_eq!(reflection.proj_matrix, composite.proj_matrix);

    let uniform = reflection.to_uniform();
    assert_eq!(uniform.clip_sign, 1);
    assert_eq!(uniform.water_height, -2.0);
    assert_eq!(uniform.near, 0.1);
    assert_eq!(uniform.far, 100.0);
    assert_eq!(uniform.time, 1.0);
    assert_eq!(uniform.scale, camera.view_scale());
}

#[test]
fn should_advance_clock_by_fixed_steps() {
    let mut clock = AnimationClock::default();
    for _ in 0..60 {
        clock.tick();
    }
    assert!((clock.time() - 1.0).abs() < 1e-4);
}

#[test]
fn should_coalesce_regenerate_requests() {
    let mut schedule = FrameSchedule::new();
    schedule.request_regenerate();
    schedule.request_regenerate();
    schedule.request_regenerate();
    assert!(schedule.regenerate_pending());

    let rebuilds = (0..3).filter(|_| schedule.begin_frame().regenerate).count();
    assert_eq!(rebuilds, 1);
    assert!(!schedule.regenerate_pending());
}

#[test]
fn should_tick_once_per_frame() {
    let mut schedule = FrameSchedule::new();
    let first = schedule.begin_frame();
    let second = schedule.begin_frame();
    assert!((first.time - AnimationClock::STEP).abs() < 1e-6);
    assert!((second.time - 2.0 * AnimationClock::STEP).abs() < 1e-6);
    assert!(!first.regenerate && !second.regenerate);
}

#[test]
fn should_start_sun_on_the_horizon() {
    let lighting = Lighting::at(0.0);
    assert!((lighting.position.x - 10000.0).abs() < 1e-2);
    assert!(lighting.position.y.abs() < 1e-2);
    assert_eq!(lighting.position.z, -10000.0);
    // a red sun at dawn
    assert_eq!(lighting.color.x, 1.0);
    assert!((lighting.color.y - 0.5).abs() < 1e-5);
    assert!(lighting.color.z.abs() < 1e-5);
    // half-lit sky
    assert!((lighting.sky[2] - 0.35).abs() < 1e-5);
}

#[test]
fn should_light_the_sky_at_noon() {
    let noon = LIGHT_PERIOD * std::f32::consts::FRAC_PI_2;
    let lighting = Lighting::at(noon);
    assert!((lighting.position.y - 10000.0).abs() < 1e-1);
    assert!((lighting.color.y - 1.0).abs() < 1e-4);
    assert!((lighting.color.z - 1.0).abs() < 1e-4);
    assert!((lighting.sky[0] - 0.2).abs() < 1e-4);
    assert!((lighting.sky[3] - 1.0).abs() < 1e-4);

    let colour = lighting.clear_colour();
    assert!((colour.b - 0.7).abs() < 1e-4);
}

#[test]
fn should_darken_the_sky_at_night() {
    let midnight = LIGHT_PERIOD * 3.0 * std::f32::consts::FRAC_PI_2;
    let lighting = Lighting::at(midnight);
    assert!(lighting.sky.iter().all(|c| *c < 1e-6));
}
