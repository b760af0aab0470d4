use myxo_core::config::{ColorMode, SimConfig, SpawnMode, WorldConfig};
use myxo_core::world::World;

fn config(seed: u64) -> SimConfig {
    SimConfig {
        world: WorldConfig {
            width: 96,
            height: 72,
            agents: 300,
            seed: Some(seed),
            spawn: SpawnMode::Uniform,
            colors: ColorMode::Rainbow,
        },
        ..Default::default()
    }
}

#[test]
fn test_same_seed_is_bit_identical() {
    let mut world1 = World::new(config(12345)).unwrap();
    let mut world2 = World::new(config(12345)).unwrap();

    for _ in 0..100 {
        world1.tick();
        world2.tick();
    }

    assert_eq!(world1.agents.len(), world2.agents.len());
    for i in 0..world1.agents.len() {
        assert_eq!(
            world1.agents.xs[i], world2.agents.xs[i],
            "X should match at index {}",
            i
        );
        assert_eq!(
            world1.agents.ys[i], world2.agents.ys[i],
            "Y should match at index {}",
            i
        );
        assert_eq!(
            world1.agents.headings[i], world2.agents.headings[i],
            "Heading should match at index {}",
            i
        );
    }
    assert_eq!(
        world1.field.cells, world2.field.cells,
        "Field contents should be bit-identical"
    );
}

#[test]
fn test_different_seeds_diverge() {
    let mut world1 = World::new(config(1)).unwrap();
    let mut world2 = World::new(config(2)).unwrap();

    for _ in 0..10 {
        world1.tick();
        world2.tick();
    }

    assert_ne!(world1.agents.xs, world2.agents.xs);
}
