use terra_ngin::{
    config::SceneConfig,
    data_structures::model::{TEXTURE_SLOT_DIFFUSE, TEXTURE_SLOT_DUDV, TEXTURE_SLOT_NORMAL, TEXTURE_SLOT_SPECULAR},
    flow::{Control, MAX_SCALE_PERCENT, MIN_SCALE_PERCENT, ViewControls},
};
use winit::keyboard::KeyCode;

#[test]
fn should_default_to_the_island_scene() {
    let config = SceneConfig::default();
    assert_eq!(config.terrain.levels, 9);
    assert_eq!(config.terrain.size(), 513);
    assert_eq!(config.terrain.spike.min, -2.0);
    assert_eq!(config.terrain.spike.max, 1.0);
    assert_eq!(config.terrain.octaves.count, 5);
    assert_eq!(config.water.height, -2.0);
    assert_eq!(config.camera.rotate_x, 354);
    assert_eq!(config.camera.scale_percent, 30);

    let names: Vec<&str> = config.terrain_materials.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["grass", "rock", "sand"]);
}

#[test]
fn should_give_every_terrain_material_three_maps() {
    let config = SceneConfig::default();
    for material in &config.terrain_materials {
        let slots: Vec<u32> = material.textures.iter().map(|(slot, _)| *slot).collect();
        assert_eq!(slots, vec![TEXTURE_SLOT_DIFFUSE, TEXTURE_SLOT_NORMAL, TEXTURE_SLOT_SPECULAR]);
        assert!(material.textures.iter().all(|(_, path)| path.contains(&material.name)));
    }
    assert_eq!(config.water_material.textures[0].0, TEXTURE_SLOT_DUDV);
}

#[test]
fn should_accept_the_defaults() {
    assert!(SceneConfig::default().validate().is_ok());
}

#[test]
fn should_reject_spike_coarser_than_the_grid() {
    let mut config = SceneConfig::default();
    config.terrain.spike.coarseness = config.terrain.levels + 1;
    assert!(config.validate().is_err());
}

#[test]
fn should_reject_octaves_finer_than_the_grid() {
    let mut config = SceneConfig::default();
    config.terrain.octaves.coarseness = config.terrain.levels;
    config.terrain.octaves.count = 2;
    assert!(config.validate().is_err());

    // no octaves means no constraint
    config.terrain.octaves.count = 0;
    assert!(config.validate().is_ok());
}

#[test]
fn should_reject_bad_material_counts() {
    let mut config = SceneConfig::default();
    config.terrain_materials.clear();
    assert!(config.validate().is_err());

    let mut config = SceneConfig::default();
    let extra = config.terrain_materials[0].clone();
    config.terrain_materials.push(extra);
    assert!(config.validate().is_err());
}

#[test]
fn should_reject_inverted_clip_planes() {
    let mut config = SceneConfig::default();
    config.camera.znear = 10.0;
    config.camera.zfar = 1.0;
    assert!(config.validate().is_err());

    config.camera.znear = 0.0;
    config.camera.zfar = 100.0;
    assert!(config.validate().is_err());
}

#[test]
fn should_request_regeneration_on_r() {
    let mut controls = ViewControls::new(&SceneConfig::default().camera);
    assert_eq!(controls.handle_key(KeyCode::KeyR), Some(Control::Regenerate));
    assert_eq!(controls.handle_key(KeyCode::KeyQ), None);
}

#[test]
fn should_wrap_rotation_around_full_circle() {
    let mut controls = ViewControls::new(&SceneConfig::default().camera);
    // 354 + 5 and then past 360
    assert_eq!(controls.handle_key(KeyCode::ArrowUp), Some(Control::Rotate { x: 359, y: 0 }));
    assert_eq!(controls.handle_key(KeyCode::ArrowUp), Some(Control::Rotate { x: 4, y: 0 }));
    assert_eq!(controls.handle_key(KeyCode::ArrowLeft), Some(Control::Rotate { x: 4, y: 355 }));
    assert_eq!(controls.handle_key(KeyCode::ArrowRight), Some(Control::Rotate { x: 4, y: 0 }));
}

#[test]
fn should_clamp_scale_and_skip_unchanged_steps() {
    let mut camera = SceneConfig::default().camera;
    camera.scale_percent = MAX_SCALE_PERCENT - 2;
    let mut controls = ViewControls::new(&camera);
    assert_eq!(controls.handle_key(KeyCode::PageUp), Some(Control::Scale(MAX_SCALE_PERCENT)));
    assert_eq!(controls.handle_key(KeyCode::Equal), None);

    camera.scale_percent = MIN_SCALE_PERCENT;
    let mut controls = ViewControls::new(&camera);
    assert_eq!(controls.handle_key(KeyCode::Minus), None);
    assert_eq!(controls.handle_key(KeyCode::PageUp), Some(Control::Scale(MIN_SCALE_PERCENT + 5)));
}
