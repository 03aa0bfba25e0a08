use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terra_ngin::terrain::heightfield::{Heightfield, smoothstep_interpolate};

#[test]
fn should_have_odd_power_of_two_plus_one_side() {
    for levels in 0..10 {
        let heightfield = Heightfield::new(levels);
        assert_eq!(heightfield.size(), (1 << levels) + 1);
        assert_eq!(heightfield.size() % 2, 1);
        assert_eq!(heightfield.samples().len(), heightfield.size() * heightfield.size());
        assert!(heightfield.samples().iter().all(|h| *h == 0.0));
    }
}

#[test]
fn should_place_spike_maximum_in_the_center() {
    let mut heightfield = Heightfield::new(3);
    heightfield.add_spike(-2.0, 1.0, 2);

    let size = heightfield.size();
    let stride = (size - 1) >> 2;
    let center = size / 2;
    for x in (0..size).step_by(stride) {
        for z in (0..size).step_by(stride) {
            let expected = if x == center && z == center { 1.0 } else { -2.0 };
            assert_eq!(heightfield.get(x, z), expected, "control point ({}, {})", x, z);
        }
    }
}

#[test]
fn should_keep_spike_between_min_and_max() {
    let mut heightfield = Heightfield::new(5);
    heightfield.add_spike(-2.0, 1.0, 3);
    for h in heightfield.samples() {
        assert!((-2.0..=1.0).contains(h), "{} escaped the spike range", h);
    }
}

#[test]
fn should_add_features_on_top_of_each_other() {
    let mut once = Heightfield::new(4);
    once.add_spike(0.0, 1.0, 1);
    let mut twice = once.clone();
    twice.add_spike(0.0, 1.0, 1);

    for (a, b) in once.samples().iter().zip(twice.samples()) {
        assert!((b - 2.0 * a).abs() < 1e-6);
    }
}

#[test]
fn should_bound_octaves_by_the_geometric_series() {
    let amplitude = 1.5;
    for octaves in 1..5 {
        let mut rng = ChaCha8Rng::seed_from_u64(octaves as u64);
        let mut heightfield = Heightfield::new(6);
        heightfield.add_octaves_with_rng(octaves, amplitude, 2, &mut rng);

        let upper = 2.0 * amplitude * (1.0 - 0.5f32.powi(octaves as i32));
        for h in heightfield.samples() {
            assert!(*h >= 0.0 && *h <= upper + 1e-5, "{} outside [0, {}]", h, upper);
        }
    }
}

#[test]
fn should_produce_some_relief_from_octaves() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut heightfield = Heightfield::new(5);
    heightfield.add_octaves_with_rng(3, 1.0, 1, &mut rng);

    let min = heightfield.samples().iter().cloned().fold(f32::MAX, f32::min);
    let max = heightfield.samples().iter().cloned().fold(f32::MIN, f32::max);
    assert!(max > min);
}

#[test]
fn should_leave_grid_flat_for_zero_amplitude() {
    let mut heightfield = Heightfield::new(4);
    heightfield.add_octaves(3, 0.0, 1);
    assert!(heightfield.samples().iter().all(|h| *h == 0.0));
}

#[test]
fn should_accept_octaves_down_to_single_samples() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut heightfield = Heightfield::new(3);
    // the last octave has stride 1
    heightfield.add_octaves_with_rng(4, 1.0, 0, &mut rng);
    assert!(heightfield.samples().iter().all(|h| h.is_finite()));
}

#[test]
#[should_panic]
fn should_reject_coarseness_beyond_levels() {
    let mut heightfield = Heightfield::new(3);
    heightfield.add_spike(0.0, 1.0, 4);
}

#[test]
#[should_panic]
fn should_reject_octaves_running_past_levels() {
    let mut heightfield = Heightfield::new(3);
    heightfield.add_octaves(3, 1.0, 2);
}

#[test]
#[should_panic]
fn should_reject_out_of_bounds_reads() {
    let heightfield = Heightfield::new(2);
    heightfield.get(5, 0);
}

#[test]
fn should_interpolate_endpoints_and_midpoint() {
    assert_eq!(smoothstep_interpolate(2.0, 6.0, 0.0), 2.0);
    assert_eq!(smoothstep_interpolate(2.0, 6.0, 1.0), 6.0);
    assert!((smoothstep_interpolate(2.0, 6.0, 0.5) - 4.0).abs() < 1e-6);
}

#[test]
fn should_interpolate_monotonically() {
    let mut previous = smoothstep_interpolate(-1.0, 3.0, 0.0);
    for step in 1..=100 {
        let value = smoothstep_interpolate(-1.0, 3.0, step as f32 / 100.0);
        assert!(value >= previous);
        previous = value;
    }
}
