use cgmath::{InnerSpace, Matrix, Matrix3, SquareMatrix, Vector3, Vector4};
use terra_ngin::{
    data_structures::{
        model::{Material, MaterialShader},
        object::{ObjectRaw, Transform},
        registry::Registry,
    },
    pipelines::uniforms::PassUniform,
};

#[test]
fn should_hand_out_handles_in_insertion_order() {
    let mut registry = Registry::new();
    let a = registry.insert("a".to_string());
    let b = registry.insert("b".to_string());
    assert_ne!(a, b);
    assert_eq!(registry.get(a).map(String::as_str), Some("a"));
    assert_eq!(registry.get(b).map(String::as_str), Some("b"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn should_keep_handle_valid_across_replace() {
    let mut registry = Registry::new();
    let handle = registry.insert(1u32);
    assert_eq!(registry.replace(handle, 2), Some(1));
    assert_eq!(registry.get(handle), Some(&2));
    assert_eq!(registry.len(), 1);
}

#[test]
fn should_forget_removed_entries() {
    let mut registry = Registry::new();
    let first = registry.insert(1u32);
    let second = registry.insert(2u32);
    assert_eq!(registry.remove(first), Some(1));
    assert_eq!(registry.get(first), None);
    assert_eq!(registry.replace(first, 5), None);
    assert_eq!(registry.len(), 1);

    let live: Vec<u32> = registry.iter().map(|(_, v)| *v).collect();
    assert_eq!(live, vec![2]);
    assert_eq!(registry.iter().next().map(|(h, _)| h), Some(second));
}

#[test]
fn should_mutate_in_place() {
    let mut registry = Registry::new();
    let handle = registry.insert(Material::new("water", 0.1, 0.9, 0.58, 91, MaterialShader::Water));
    if let Some(material) = registry.get_mut(handle) {
        material.ks = 0.25;
    }
    assert_eq!(registry.get(handle).map(|m| m.material_vector()), Some([0.1, 0.9, 0.25, 91.0]));
}

#[test]
fn should_translate_after_scaling() {
    let transform = Transform::new()
        .with_translation(Vector3::new(0.0, -1.0, 0.0))
        .with_scale(Vector3::new(1.0, 8.5, 1.0));
    let moved = transform.to_matrix() * Vector4::new(2.0, 1.0, 3.0, 1.0);
    assert_eq!(moved, Vector4::new(2.0, 7.5, 3.0, 1.0));
}

#[test]
fn should_default_to_identity() {
    let transform = Transform::default();
    assert!(transform.to_matrix().is_identity());
    assert!(transform.normal_matrix().is_identity());
}

#[test]
fn should_keep_normals_perpendicular_under_nonuniform_scale() {
    let transform = Transform::new().with_scale(Vector3::new(1.0, 8.5, 1.0));
    let m = transform.to_matrix();
    let upper = Matrix3::from_cols(m.x.truncate(), m.y.truncate(), m.z.truncate());

    // a 45 degree slope and its normal
    let along = Vector3::new(1.0, 1.0, 0.0);
    let normal = Vector3::new(-1.0, 1.0, 0.0);
    let along = upper * along;
    let normal = transform.normal_matrix() * normal;
    assert!(along.dot(normal).abs() < 1e-5);
    assert_eq!(transform.normal_matrix(), upper.invert().map(|i| i.transpose()).unwrap_or(upper));
}

#[test]
fn should_match_the_shader_uniform_layouts() {
    assert_eq!(std::mem::size_of::<PassUniform>(), 208);
    assert_eq!(std::mem::size_of::<ObjectRaw>(), 176);
    assert_eq!(std::mem::size_of::<PassUniform>() % 16, 0);
    assert_eq!(std::mem::size_of::<ObjectRaw>() % 16, 0);
}
