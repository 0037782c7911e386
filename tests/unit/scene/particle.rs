use rand::{SeedableRng, rngs::StdRng};

use super::*;

#[test]
fn burst_has_fixed_size_and_full_alpha() {
    let mut rng = StdRng::seed_from_u64(1);
    let burst = spawn_burst(Point::new(40.0, 32.0), &mut rng);
    assert_eq!(burst.len(), BURST_SIZE);
    for p in &burst {
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.pos.y, 32.0);
        assert!((p.pos.x - 40.0).abs() <= SPAWN_JITTER_PX);
        assert!((-3.0..-2.0).contains(&p.vel.y), "vy {}", p.vel.y);
        assert!((-1.0..1.0).contains(&p.vel.x), "vx {}", p.vel.x);
    }
}

#[test]
fn advance_integrates_then_applies_gravity_and_fade() {
    let mut ps = vec![Particle {
        pos: Point::new(10.0, 20.0),
        vel: Vec2::new(0.5, -2.0),
        alpha: 1.0,
    }];
    advance_particles(&mut ps);
    let p = ps[0];
    assert_eq!(p.pos, Point::new(10.5, 18.0));
    assert!((p.vel.y - (-1.9)).abs() < 1e-12);
    assert!((p.alpha - 0.95).abs() < 1e-12);
}

#[test]
fn faded_particles_are_removed_and_count_never_grows() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut ps = spawn_burst(Point::new(0.0, 0.0), &mut rng);
    let mut last = ps.len();
    let mut steps = 0;
    while !ps.is_empty() {
        advance_particles(&mut ps);
        assert!(ps.len() <= last);
        assert!(ps.iter().all(Particle::is_alive));
        last = ps.len();
        steps += 1;
        assert!(steps <= 21, "particles outlived their fade");
    }
    assert!(steps >= 19);
}

#[test]
fn particle_at_zero_alpha_is_dropped_by_next_advance() {
    let mut ps = vec![
        Particle {
            pos: Point::ZERO,
            vel: Vec2::ZERO,
            alpha: FADE_PER_STEP,
        },
        Particle {
            pos: Point::ZERO,
            vel: Vec2::ZERO,
            alpha: 1.0,
        },
    ];
    advance_particles(&mut ps);
    assert_eq!(ps.len(), 1);
    assert!((ps[0].alpha - 0.95).abs() < 1e-12);
}
