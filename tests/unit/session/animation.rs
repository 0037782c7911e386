use super::*;

fn grid() -> ActivityGrid {
    ActivityGrid::from_rows(vec![vec![1, 0, 0], vec![0, 2, 0], vec![0, 0, 1]]).unwrap()
}

fn config() -> SceneConfig {
    SceneConfig {
        tree_count: 2,
        ..SceneConfig::default()
    }
}

#[test]
fn triggers_fire_when_the_path_reaches_them() {
    let mut anim = Animation::new(grid(), &config(), 11).unwrap();
    assert_eq!(anim.total_steps(), 9);
    assert_eq!(anim.step(), None);
    assert_eq!(anim.current(), None);

    let mut hits_after = Vec::new();
    while let Some(cell) = anim.advance() {
        assert_eq!(anim.current(), Some(cell));
        hits_after.push(anim.triggers().hit_count());
    }
    assert_eq!(hits_after, vec![1, 1, 1, 1, 2, 2, 2, 2, 3]);
    assert!(anim.is_finished());
    assert_eq!(anim.step(), Some(StepIndex(8)));
    assert_eq!(anim.current(), Some(Cell::new(2, 2)));
    assert_eq!(anim.trail().len(), 9);
    assert!(anim.advance().is_none());
}

#[test]
fn trail_includes_the_current_cell() {
    let mut anim = Animation::new(grid(), &config(), 1).unwrap();
    let cell = anim.advance().unwrap();
    assert!(anim.trail().is_visited(cell));
    assert_eq!(anim.trail().len(), 1);
}

#[test]
fn burst_is_advanced_in_the_step_that_fired_it() {
    let mut anim = Animation::new(grid(), &config(), 5).unwrap();
    anim.advance();
    let t = anim.triggers().get(Cell::new(0, 0)).unwrap();
    assert_eq!(t.particles().len(), 5);
    for p in t.particles() {
        assert!((p.alpha - 0.95).abs() < 1e-9);
    }
}

#[test]
fn particles_are_gone_twenty_steps_after_a_burst() {
    let g = ActivityGrid::from_rows(vec![vec![1; 1]; 25]).unwrap();
    let cfg = SceneConfig {
        tree_count: 0,
        shelters: Vec::new(),
        ..SceneConfig::default()
    };
    let mut anim = Animation::new(g, &cfg, 2).unwrap();
    for _ in 0..25 {
        anim.advance();
    }
    // The burst from step 0 has been advanced 25 times.
    let first = anim.triggers().get(Cell::new(0, 0)).unwrap();
    assert!(first.is_hit());
    assert!(first.particles().is_empty());
    // The burst from the last step is still fresh.
    assert_eq!(
        anim.triggers().get(Cell::new(24, 0)).unwrap().particles().len(),
        5
    );
}

#[test]
fn equal_seeds_give_equal_scenery() {
    let a = Animation::new(grid(), &config(), 42).unwrap();
    let b = Animation::new(grid(), &config(), 42).unwrap();
    assert_eq!(a.decorations(), b.decorations());
    assert_eq!(a.seed(), 42);
}

#[test]
fn quiet_grid_has_no_triggers() {
    let g = ActivityGrid::from_rows(vec![vec![0, 0], vec![0, 0]]).unwrap();
    let mut anim = Animation::new(g, &config(), 0).unwrap();
    while anim.advance().is_some() {}
    assert!(anim.triggers().is_empty());
    assert_eq!(anim.triggers().hit_count(), 0);
    assert_eq!(anim.trail().len(), 4);
}

#[test]
fn frame_state_requires_a_step() {
    let anim = Animation::new(grid(), &config(), 0).unwrap();
    assert!(anim.frame_state(Duration::ZERO).is_none());
}
