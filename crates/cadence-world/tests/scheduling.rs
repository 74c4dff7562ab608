//! End-to-end scheduling tests: a real [`World`] driven by an
//! [`ActionManager`] on a manual clock.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects, missing_docs)]

use std::sync::Arc;

use cadence_actions::{
    ActionManager, ActionWorld, ManualClock, StopReason, TickReport, TimedAction, Timestamp,
    WalkAction, WalkPath,
};
use cadence_types::{EntityId, HarvestableResource, ItemDefinition, MapId, TileCoord};
use cadence_world::{Avatar, HarvestSkill, Posture, TileMap, World};

struct Harness {
    world: World,
    clock: ManualClock,
    manager: ActionManager,
    map: MapId,
}

impl Harness {
    fn new(map: TileMap) -> Self {
        let mut world = World::new();
        let map = world.add_map(map).unwrap();
        let clock = ManualClock::new();
        let manager = ActionManager::new(clock.clone(), 42);
        Self {
            world,
            clock,
            manager,
            map,
        }
    }

    fn spawn(&mut self, name: &str, x: i32, y: i32) -> EntityId {
        self.world
            .spawn_avatar(Avatar::new(name, self.map, TileCoord::new(x, y)))
            .unwrap()
    }

    fn tick_at(&mut self, millis: u64) -> TickReport {
        self.clock.set(Timestamp::from_millis(millis));
        self.manager.execute_actions(&mut self.world)
    }

    fn position(&self, id: EntityId) -> TileCoord {
        self.world.avatar(id).unwrap().position()
    }
}

fn oak(success_rate: f64) -> Arc<HarvestableResource> {
    Arc::new(HarvestableResource {
        name: "Oak Tree".into(),
        harvested_item: ItemDefinition::new("oak_log", "Oak Log"),
        base_success_rate: success_rate,
        success_rate_per_level: 0.0,
        max_success_rate: 1.0,
        base_cycle_ms: 1_000,
        cycle_ms_per_level: 100,
        min_cycle_ms: 500,
        xp_per_harvest: 100,
    })
}

fn texts(world: &World, id: EntityId) -> Vec<String> {
    world
        .avatar(id)
        .unwrap()
        .inbox()
        .iter()
        .map(|m| m.text().to_owned())
        .collect()
}

#[test]
fn walk_reaches_goal_one_step_per_interval() {
    let mut h = Harness::new(TileMap::new("meadow", 10, 10));
    let ada = h.spawn("ada", 0, 0);
    let now = h.manager.now();
    let walk = h.world.command_walk_to(ada, TileCoord::new(3, 0), now).unwrap();
    h.manager.add_action(Box::new(walk));

    let report = h.tick_at(0);
    assert!(report.retired.is_empty());
    assert_eq!(h.world.avatar(ada).unwrap().posture(), Posture::Standing);

    // Between intervals nothing moves.
    let before = h.position(ada);
    h.tick_at(100);
    assert_eq!(h.position(ada), before);

    h.tick_at(250);
    h.tick_at(500);
    assert_eq!(h.position(ada), TileCoord::new(3, 0));
    assert_eq!(h.manager.len(), 1);

    let report = h.tick_at(750);
    assert_eq!(report.retired.len(), 1);
    assert_eq!(report.retired[0].reason, StopReason::PathComplete);
    assert!(h.manager.is_empty());
}

#[test]
fn late_tick_catches_up_missed_steps() {
    let mut h = Harness::new(TileMap::new("meadow", 10, 10));
    let ada = h.spawn("ada", 0, 0);
    let walk = h
        .world
        .command_walk_to(ada, TileCoord::new(0, 5), h.manager.now())
        .unwrap();
    h.manager.add_action(Box::new(walk));

    h.tick_at(0);
    assert_eq!(h.position(ada), TileCoord::new(0, 1));
    h.tick_at(1_000);
    assert_eq!(h.position(ada), TileCoord::new(0, 5));
}

#[test]
fn avatar_stepping_into_the_path_obstructs_the_walk() {
    let mut h = Harness::new(TileMap::new("corridor", 5, 1));
    let ada = h.spawn("ada", 0, 0);
    let walk = h
        .world
        .command_walk_to(ada, TileCoord::new(4, 0), h.manager.now())
        .unwrap();
    h.manager.add_action(Box::new(walk));

    h.tick_at(0);
    assert_eq!(h.position(ada), TileCoord::new(1, 0));

    h.spawn("bo", 2, 0);
    let report = h.tick_at(250);
    assert_eq!(report.retired.len(), 1);
    assert_eq!(report.retired[0].entity, ada);
    assert_eq!(report.retired[0].reason, StopReason::Obstructed);
    assert_eq!(h.position(ada), TileCoord::new(1, 0));
}

#[test]
fn harvesting_levels_skill_and_shortens_cycle() {
    let mut h = Harness::new(TileMap::new("grove", 4, 4));
    let ada = h.spawn("ada", 1, 1);
    let harvest = h
        .world
        .command_harvest(ada, oak(1.0), h.manager.now())
        .unwrap();
    h.manager.add_action(Box::new(harvest));

    h.tick_at(1_000);
    assert_eq!(h.world.avatar(ada).unwrap().item_count("oak_log"), 0);

    h.tick_at(1_001);
    let avatar = h.world.avatar(ada).unwrap();
    assert_eq!(avatar.item_count("oak_log"), 1);
    assert_eq!(avatar.skill().level(), 1);
    assert!(texts(&h.world, ada).contains(&"You harvested Oak Log".to_owned()));

    // Level 1 cycle is 900 ms, measured from the last harvest.
    h.tick_at(1_901);
    assert_eq!(h.world.avatar(ada).unwrap().item_count("oak_log"), 1);
    h.tick_at(1_902);
    assert_eq!(h.world.avatar(ada).unwrap().item_count("oak_log"), 2);
    assert_eq!(h.manager.len(), 1);
}

#[test]
fn zero_success_rate_never_yields_items() {
    let mut h = Harness::new(TileMap::new("grove", 4, 4));
    let ada = h.spawn("ada", 1, 1);
    let harvest = h
        .world
        .command_harvest(ada, oak(0.0), h.manager.now())
        .unwrap();
    h.manager.add_action(Box::new(harvest));

    for second in 1..=20_u64 {
        h.tick_at(second * 1_001);
    }
    assert_eq!(h.world.avatar(ada).unwrap().item_count("oak_log"), 0);
    assert_eq!(h.world.avatar(ada).unwrap().skill(), &HarvestSkill::new());
}

#[test]
fn walking_away_stops_harvest_with_one_notice() {
    let mut h = Harness::new(TileMap::new("grove", 6, 6));
    let ada = h.spawn("ada", 0, 0);
    let harvest = h
        .world
        .command_harvest(ada, oak(1.0), h.manager.now())
        .unwrap();
    let harvest_id = TimedAction::id(&harvest);
    h.manager.add_action(Box::new(harvest));
    h.tick_at(500);

    h.clock.set(Timestamp::from_millis(600));
    let walk = h
        .world
        .command_walk_to(ada, TileCoord::new(2, 2), h.manager.now())
        .unwrap();
    let walk_id = TimedAction::id(&walk);
    let canceled = h.manager.add_exclusive(Box::new(walk), &mut h.world);
    assert_eq!(canceled, 1);
    assert_eq!(h.world.avatar(ada).unwrap().current_action(), Some(walk_id));

    // A second cancel before retirement is silent.
    assert!(h.manager.cancel(harvest_id, &mut h.world));

    let report = h.tick_at(600);
    assert_eq!(report.retired.len(), 1);
    assert_eq!(report.retired[0].action_id, harvest_id);
    assert_eq!(report.retired[0].reason, StopReason::Canceled);

    let stopped: Vec<String> = texts(&h.world, ada)
        .into_iter()
        .filter(|t| t == "You stopped harvesting Oak Log")
        .collect();
    assert_eq!(stopped.len(), 1);
    assert_eq!(h.world.avatar(ada).unwrap().item_count("oak_log"), 0);
    assert_eq!(h.manager.actions_for(ada), vec![walk_id]);
}

#[test]
fn despawned_avatar_retires_its_action() {
    let mut h = Harness::new(TileMap::new("meadow", 10, 10));
    let ada = h.spawn("ada", 0, 0);
    let walk = h
        .world
        .command_walk_to(ada, TileCoord::new(5, 5), h.manager.now())
        .unwrap();
    h.manager.add_action(Box::new(walk));
    h.tick_at(0);

    h.world.remove_avatar(ada).unwrap();
    assert!(h.world.target(ada).is_none());

    let report = h.tick_at(250);
    assert_eq!(report.retired.len(), 1);
    assert_eq!(report.retired[0].reason, StopReason::TargetMissing);
    assert!(h.manager.is_empty());
}

#[test]
fn one_finishing_action_does_not_skip_the_next() {
    let mut h = Harness::new(TileMap::new("meadow", 10, 10));
    let ada = h.spawn("ada", 0, 0);
    let bo = h.spawn("bo", 5, 5);

    let short = h
        .world
        .command_walk_to(ada, TileCoord::new(1, 0), h.manager.now())
        .unwrap();
    let long = h
        .world
        .command_walk_to(bo, TileCoord::new(5, 9), h.manager.now())
        .unwrap();
    h.manager.add_action(Box::new(short));
    h.manager.add_action(Box::new(long));

    h.tick_at(0);
    let report = h.tick_at(250);
    assert_eq!(report.executed, 2);
    assert_eq!(report.retired.len(), 1);
    assert_eq!(report.retired[0].entity, ada);
    assert_eq!(h.position(bo), TileCoord::new(5, 7));
    assert_eq!(report.still_active, 1);
}

#[test]
fn repeated_tile_in_path_is_not_an_obstruction() {
    let mut h = Harness::new(TileMap::new("meadow", 4, 4));
    let ada = h.spawn("ada", 0, 0);
    let path = WalkPath::new([
        TileCoord::new(0, 0),
        TileCoord::new(0, 0),
        TileCoord::new(1, 0),
    ]);
    let walk = WalkAction::new(&mut h.world, ada, path, h.manager.now()).unwrap();
    h.manager.add_action(Box::new(walk));

    // The avatar's own tile comes up first and is a no-op step.
    let report = h.tick_at(0);
    assert!(report.retired.is_empty());
    assert_eq!(h.position(ada), TileCoord::new(0, 0));

    let report = h.tick_at(250);
    assert!(report.retired.is_empty());
    assert_eq!(h.position(ada), TileCoord::new(1, 0));

    let report = h.tick_at(500);
    assert_eq!(report.retired[0].reason, StopReason::PathComplete);
}
