use cgmath::{Deg, InnerSpace, Matrix4, Point3, SquareMatrix, Vector3, Vector4};
use terra_ngin::camera::{OrbitCamera, Projection, view_scale_for};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn should_map_scale_range_onto_view_scale_range() {
    assert!(close(view_scale_for(0.01), 0.002));
    assert!(close(view_scale_for(2.0), 0.05));
    assert!(view_scale_for(0.3) < view_scale_for(0.31));
}

#[test]
fn should_follow_scale_changes() {
    let mut camera = OrbitCamera::new(0, 0, 30, 0.0);
    let before = camera.view_scale();
    camera.set_scale(100);
    assert!(camera.view_scale() > before);
    assert!(close(camera.view_scale(), view_scale_for(1.0)));
}

#[test]
fn should_sit_one_unit_in_front_of_an_unrotated_world() {
    let camera = OrbitCamera::new(0, 0, 100, 0.0);
    let eye = camera.position();
    // the view pulls the world back by 1 after scaling it down
    let expected = 1.0 / camera.view_scale();
    assert!(close(eye.x, 0.0));
    assert!(close(eye.y, 0.0));
    assert!((eye.z - expected).abs() / expected < 1e-4);
}

#[test]
fn should_mirror_the_eye_about_the_water_plane() {
    for water_height in [-2.0, 0.0, 1.5] {
        let camera = OrbitCamera::new(340, 25, 30, water_height);
        let eye = camera.position();
        let mirrored = camera.reflected_position();
        assert!(close(mirrored.x, eye.x));
        assert!(close(mirrored.z, eye.z));
        assert!((mirrored.y - (2.0 * water_height - eye.y)).abs() < 1e-2);
    }
}

#[test]
fn should_keep_the_water_plane_in_place_when_reflected() {
    let water_height = -2.0;
    let camera = OrbitCamera::new(350, 40, 30, water_height);
    let direct = camera.view_matrix();
    let reflected = camera.reflected_view_matrix();

    // a point on the water plane lands at the same depth in both views
    let on_plane = Vector4::new(3.0, water_height, -7.0, 1.0);
    let a = direct * on_plane;
    let b = reflected * on_plane;
    assert!(close(a.z, b.z));
    assert!(close(a.x, b.x));
    assert!(close(a.y, -b.y));
}

#[test]
fn should_keep_view_matrices_invertible() {
    let camera = OrbitCamera::new(354, 0, 1, -2.0);
    assert!(camera.view_matrix().invert().is_some());
    assert!(camera.reflected_view_matrix().invert().is_some());
}

#[test]
fn should_track_aspect_ratio_across_resizes() {
    let mut projection = Projection::new(800, 600, Deg(60.0), 0.1, 100.0);
    assert!(close(projection.aspect(), 800.0 / 600.0));
    projection.resize(1024, 256);
    assert!(close(projection.aspect(), 4.0));
    // zero sized windows must not divide by zero
    projection.resize(0, 0);
    assert!(projection.aspect().is_finite());
}

#[test]
fn should_project_near_and_far_to_wgpu_depth_range() {
    let projection = Projection::new(800, 600, Deg(60.0), 0.1, 100.0);
    let proj: Matrix4<f32> = projection.calc_matrix();

    let depth = |z: f32| {
        let clip = proj * Point3::new(0.0, 0.0, -z).to_homogeneous();
        clip.z / clip.w
    };
    assert!(close(depth(0.1), 0.0));
    assert!(close(depth(100.0), 1.0));
}

#[test]
fn should_look_down_the_negative_z_axis() {
    let camera = OrbitCamera::new(0, 0, 100, 0.0);
    let forward = camera
        .view_matrix()
        .invert()
        .map(|inv| (inv * Vector4::new(0.0, 0.0, -1.0, 0.0)).truncate())
        .unwrap_or_else(Vector3::unit_y);
    assert!(close(forward.normalize().z, -1.0));
}
