use cgmath::{InnerSpace, Vector2, Vector3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terra_ngin::{
    data_structures::model::TerrainVertex,
    terrain::{
        heightfield::Heightfield,
        mesh::{TEXEL_DENSITY, calculate_tangents, estimate_normal, extract, grid_indices, triangle_tangent},
    },
};

fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
    assert!((a - b).magnitude() < 1e-4, "{:?} != {:?}", a, b);
}

#[test]
fn should_emit_one_vertex_per_sample_and_two_triangles_per_cell() {
    for levels in 1..6 {
        let heightfield = Heightfield::new(levels);
        let size = heightfield.size();
        let mesh = extract(&heightfield);
        assert_eq!(mesh.vertex_count(), size * size);
        assert_eq!(mesh.index_count(), 6 * (size - 1) * (size - 1));
        assert!(mesh.indices.iter().all(|i| (*i as usize) < mesh.vertex_count()));
    }
}

#[test]
fn should_index_cells_in_documented_order() {
    let indices = grid_indices(3);
    // cell (0, 0): (0,0) (0,1) (1,0) and (1,0) (0,1) (1,1)
    assert_eq!(&indices[..6], &[0, 1, 3, 3, 1, 4]);
    // cell (1, 1)
    assert_eq!(&indices[18..], &[4, 5, 7, 7, 5, 8]);
}

#[test]
fn should_center_positions_and_scale_uvs() {
    let mut heightfield = Heightfield::new(2);
    heightfield.set(1, 3, 0.75);
    let mesh = extract(&heightfield);
    let size = heightfield.size();
    let half = size as f32 / 2.0;

    let vertex = mesh.vertices[1 * size + 3];
    assert_eq!(vertex.position, [1.0 - half, 0.75, 3.0 - half]);
    assert_eq!(vertex.tex_coords, [1.0 / TEXEL_DENSITY, 3.0 / TEXEL_DENSITY]);
}

#[test]
fn should_point_normals_up_on_flat_ground() {
    let mesh = extract(&Heightfield::new(3));
    for vertex in &mesh.vertices {
        assert_close(vertex.normal.into(), Vector3::unit_y());
    }
}

#[test]
fn should_point_normals_up_on_the_corners() {
    let heightfield = Heightfield::new(2);
    let last = heightfield.size() - 1;
    for (x, z) in [(0, 0), (0, last), (last, 0), (last, last)] {
        assert_close(estimate_normal(&heightfield, x, z), Vector3::unit_y());
    }
}

#[test]
fn should_tilt_normals_away_from_a_slope() {
    // height rises with x, so the surface faces towards -x
    let mut heightfield = Heightfield::new(2);
    let size = heightfield.size();
    for x in 0..size {
        for z in 0..size {
            heightfield.set(x, z, x as f32);
        }
    }
    let normal = estimate_normal(&heightfield, 2, 2);
    let expected = Vector3::new(-1.0, 1.0, 0.0).normalize();
    assert_close(normal, expected);
}

#[test]
fn should_produce_unit_normals_on_random_terrain() {
    let mut heightfield = Heightfield::new(4);
    heightfield.add_spike(-2.0, 1.0, 2);
    heightfield.add_octaves_with_rng(3, 1.0, 2, &mut ChaCha8Rng::seed_from_u64(3));
    let mesh = extract(&heightfield);
    for vertex in &mesh.vertices {
        let normal: Vector3<f32> = vertex.normal.into();
        assert!((normal.magnitude() - 1.0).abs() < 1e-4);
        assert!(normal.y > 0.0);
    }
}

#[test]
fn should_solve_tangent_along_u() {
    let tangent = triangle_tangent(
        [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        ],
        [Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)],
    );
    assert_close(tangent, Vector3::unit_x());
}

#[test]
fn should_stay_finite_for_degenerate_uvs() {
    let tangent = triangle_tangent(
        [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        ],
        [Vector2::new(0.5, 0.5); 3],
    );
    assert!(tangent.x.is_finite() && tangent.y.is_finite() && tangent.z.is_finite());
}

#[test]
fn should_align_grid_tangents_with_x() {
    let mesh = extract(&Heightfield::new(3));
    for vertex in &mesh.vertices {
        assert_close(vertex.tangent.into(), Vector3::unit_x());
    }
}

#[test]
fn should_let_later_triangles_decide_shared_tangents() {
    let mut vertices = vec![
        TerrainVertex {
            position: [0.0, 0.0, 0.0],
            tex_coords: [0.0, 0.0],
            ..Default::default()
        },
        TerrainVertex {
            position: [1.0, 0.0, 0.0],
            tex_coords: [1.0, 0.0],
            ..Default::default()
        },
        TerrainVertex {
            position: [0.0, 0.0, 1.0],
            tex_coords: [0.0, 1.0],
            ..Default::default()
        },
        TerrainVertex {
            position: [0.0, 1.0, 0.0],
            tex_coords: [1.0, 0.0],
            ..Default::default()
        },
    ];
    // second triangle maps U onto +y and shares vertices 0 and 2
    calculate_tangents(&mut vertices, &[0, 1, 2, 0, 3, 2]);

    assert_close(vertices[1].tangent.into(), Vector3::unit_x());
    assert_close(vertices[0].tangent.into(), Vector3::unit_y());
    assert_close(vertices[2].tangent.into(), Vector3::unit_y());
    assert_close(vertices[3].tangent.into(), Vector3::unit_y());
}
