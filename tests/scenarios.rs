use bevy::prelude::*;
use gravekeeper::{
    BlockPos, BlockPosition, BlockState, BlockWorld, DeathVetoed, DimensionKind,
    GravekeeperPlugin, Inventory, ItemStack, LifecycleController, MarkerKind, PlayerDeathEvent,
    PlayerId, PlayerIdentity, PlayerRespawnEvent, TombstoneClaimed, TombstoneConfig,
    TombstonePlaced, TombstoneStore, UseBlockEvent, VoxelWorld, WorldBounds, WorldSaveEvent,
};
use tempfile::tempdir;

fn flat_world() -> VoxelWorld {
    let mut world = VoxelWorld::new(DimensionKind::Overworld, WorldBounds::new(-64, 320));
    world.fill_layers(16, -64, -64, BlockState::STONE);
    world
}

fn app_with(world: VoxelWorld, config: TombstoneConfig) -> App {
    let mut app = App::new();
    app.insert_resource(world)
        .insert_resource(config)
        .insert_resource(LifecycleController::with_seed(5))
        .add_plugins(GravekeeperPlugin::<VoxelWorld>::default());
    app
}

fn stocked(items: &[&[u8]], capacity: usize) -> Inventory {
    let mut inv = Inventory::with_capacity(capacity);
    for item in items {
        inv.offer(ItemStack::new(item.to_vec())).unwrap();
    }
    inv
}

fn spawn_player(app: &mut App, identity: PlayerIdentity, at: BlockPos, inv: Inventory) -> Entity {
    app.world_mut()
        .spawn((identity, BlockPosition(at), inv))
        .id()
}

fn current<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .resource::<Events<E>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

fn steve() -> PlayerIdentity {
    PlayerIdentity::new(PlayerId(1), "Steve")
}

#[test]
fn void_death_is_returned_on_approach() {
    let mut app = app_with(flat_world(), TombstoneConfig::default());
    let player = spawn_player(
        &mut app,
        steve(),
        BlockPos::new(0, -90, 0),
        stocked(&[b"sword", b"bread"], 9),
    );

    app.world_mut().send_event(PlayerDeathEvent { player });
    app.update();

    let tombstone = BlockPos::new(0, -63, 0);
    assert_eq!(
        current::<DeathVetoed>(&app),
        vec![DeathVetoed { player, tombstone }]
    );
    assert!(app.world().get::<Inventory>(player).unwrap().is_empty());
    assert!(app.world().resource::<VoxelWorld>().block(tombstone).marker().is_some());
    assert_eq!(
        app.world().resource::<TombstoneStore>().positions_for(PlayerId(1)),
        vec![tombstone]
    );

    app.world_mut().send_event(PlayerRespawnEvent {
        old: player,
        new: player,
    });
    app.update();
    // Respawned far away: nothing yet.
    app.world_mut().get_mut::<BlockPosition>(player).unwrap().0 = BlockPos::new(100, 70, 100);
    app.update();
    assert!(app.world().resource::<TombstoneStore>().contains(tombstone));

    app.world_mut().get_mut::<BlockPosition>(player).unwrap().0 = BlockPos::new(3, -62, -2);
    app.update();

    let claimed = current::<TombstoneClaimed>(&app);
    assert_eq!(claimed.len(), 1);
    assert_eq!(claimed[0].position, tombstone);
    assert_eq!(claimed[0].returned, 2);
    assert_eq!(claimed[0].dropped, 0);

    let inv = app.world().get::<Inventory>(player).unwrap();
    assert_eq!(inv.slots[0], Some(ItemStack::new(b"sword".to_vec())));
    assert_eq!(inv.slots[1], Some(ItemStack::new(b"bread".to_vec())));
    assert!(app.world().resource::<TombstoneStore>().is_empty());
    assert!(app.world().resource::<VoxelWorld>().is_air(tombstone));
}

#[test]
fn water_death_floats_to_surface() {
    let mut world = VoxelWorld::new(DimensionKind::Overworld, WorldBounds::new(-64, 320));
    world
        .fill_layers(8, 60, 60, BlockState::STONE)
        .fill_layers(8, 61, 65, BlockState::WATER);
    let mut app = app_with(world, TombstoneConfig::default());
    let player = spawn_player(&mut app, steve(), BlockPos::new(0, 63, 0), stocked(&[b"rod"], 4));

    app.world_mut().send_event(PlayerDeathEvent { player });
    app.update();

    let placed = current::<TombstonePlaced>(&app);
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].position, BlockPos::new(0, 66, 0));
    assert!(!placed[0].merged);

    let world = app.world().resource::<VoxelWorld>();
    assert_eq!(world.block(BlockPos::new(0, 65, 0)), BlockState::Placeholder);
    assert!(world.block(BlockPos::new(0, 66, 0)).marker().is_some());
}

#[test]
fn repeated_death_merges_into_one_tombstone() {
    let mut app = app_with(flat_world(), TombstoneConfig::default());
    let player = spawn_player(&mut app, steve(), BlockPos::new(2, -63, 2), stocked(&[b"a"], 4));

    app.world_mut().send_event(PlayerDeathEvent { player });
    app.update();

    *app.world_mut().get_mut::<Inventory>(player).unwrap() = stocked(&[b"b", b"c"], 4);
    app.world_mut().get_mut::<BlockPosition>(player).unwrap().0 = BlockPos::new(2, -58, 2);
    app.world_mut().send_event(PlayerDeathEvent { player });
    app.update();

    let placed = current::<TombstonePlaced>(&app);
    assert_eq!(placed.len(), 1);
    assert!(placed[0].merged);

    let store = app.world().resource::<TombstoneStore>();
    let tombstone = BlockPos::new(2, -63, 2);
    assert_eq!(store.len(), 1);
    let record = store.lookup_owner(tombstone, PlayerId(1)).unwrap();
    assert_eq!(record.len(), 3);
}

#[test]
fn interaction_claims_when_proximity_return_is_off() {
    let config = TombstoneConfig {
        check_distance_enabled: false,
        ..default()
    };
    let mut app = app_with(flat_world(), config);
    let player = spawn_player(&mut app, steve(), BlockPos::new(0, -63, 0), stocked(&[b"pick"], 1));

    app.world_mut().send_event(PlayerDeathEvent { player });
    app.update();
    app.world_mut().send_event(PlayerRespawnEvent {
        old: player,
        new: player,
    });
    app.update();
    app.update();
    assert_eq!(app.world().resource::<TombstoneStore>().len(), 1);

    // The respawned inventory already holds something, so the loot spills.
    *app.world_mut().get_mut::<Inventory>(player).unwrap() = stocked(&[b"dirt"], 1);
    let tombstone = BlockPos::new(0, -63, 0);
    app.world_mut().send_event(UseBlockEvent {
        player,
        hit: tombstone,
    });
    app.update();

    let claimed = current::<TombstoneClaimed>(&app);
    assert_eq!(claimed.len(), 1);
    assert_eq!(claimed[0].returned, 0);
    assert_eq!(claimed[0].dropped, 1);

    let world = app.world().resource::<VoxelWorld>();
    assert_eq!(
        world.dropped_items(),
        &[(tombstone, ItemStack::new(b"pick".to_vec()))]
    );
    assert!(app.world().resource::<TombstoneStore>().is_empty());
}

#[test]
fn other_players_cannot_claim() {
    let mut app = app_with(flat_world(), TombstoneConfig::default());
    let owner = spawn_player(&mut app, steve(), BlockPos::new(0, -63, 0), stocked(&[b"gem"], 2));
    let thief = spawn_player(
        &mut app,
        PlayerIdentity::new(PlayerId(2), "Alex"),
        BlockPos::new(1, -63, 0),
        Inventory::with_capacity(2),
    );

    app.world_mut().send_event(PlayerDeathEvent { player: owner });
    app.update();
    app.world_mut().send_event(UseBlockEvent {
        player: thief,
        hit: BlockPos::new(0, -63, 0),
    });
    app.update();

    assert!(current::<TombstoneClaimed>(&app).is_empty());
    assert!(app.world().get::<Inventory>(thief).unwrap().is_empty());
    assert_eq!(app.world().resource::<TombstoneStore>().len(), 1);
}

#[test]
fn fake_players_keep_default_death_handling() {
    let mut app = app_with(flat_world(), TombstoneConfig::default());
    let bot = spawn_player(
        &mut app,
        PlayerIdentity::fake(PlayerId(9), "[Deployer]"),
        BlockPos::new(0, -63, 0),
        stocked(&[b"cobble"], 2),
    );

    app.world_mut().send_event(PlayerDeathEvent { player: bot });
    app.update();

    assert!(current::<DeathVetoed>(&app).is_empty());
    assert_eq!(app.world().get::<Inventory>(bot).unwrap().occupied(), 1);
    assert!(app.world().resource::<TombstoneStore>().is_empty());
}

#[test]
fn tombstones_survive_a_restart() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config").join("gravekeeper.ron");
    let world_dir = dir.path().join("world");
    let tombstone = BlockPos::new(0, -63, 0);

    {
        let mut app = App::new();
        app.insert_resource(flat_world())
            .add_plugins(GravekeeperPlugin::<VoxelWorld>::with_persistence(
                &config_path,
                &world_dir,
            ));
        assert!(config_path.exists());

        let player = spawn_player(&mut app, steve(), tombstone, stocked(&[b"map", b"torch"], 4));
        app.world_mut().send_event(PlayerDeathEvent { player });
        app.update();
        app.world_mut().send_event(WorldSaveEvent);
        app.update();

        assert!(!app.world().resource::<TombstoneStore>().is_dirty());
        assert!(world_dir.join("gravekeeper_tombstones.ron").exists());
    }

    let mut app = App::new();
    app.insert_resource(flat_world())
        .add_plugins(GravekeeperPlugin::<VoxelWorld>::with_persistence(
            &config_path,
            &world_dir,
        ));

    let store = app.world().resource::<TombstoneStore>();
    let record = store.lookup_owner(tombstone, PlayerId(1)).unwrap();
    assert_eq!(
        record.items(),
        &[ItemStack::new(b"map".to_vec()), ItemStack::new(b"torch".to_vec())]
    );

    // A returning player can still claim with a right-click.
    let player = spawn_player(
        &mut app,
        steve(),
        BlockPos::new(0, -62, 1),
        Inventory::with_capacity(4),
    );
    app.world_mut().resource_mut::<VoxelWorld>().set_block(
        tombstone,
        BlockState::Marker(MarkerKind::new("minecraft:potted_poppy")),
    );
    app.world_mut().send_event(UseBlockEvent {
        player,
        hit: tombstone,
    });
    app.update();

    assert_eq!(app.world().get::<Inventory>(player).unwrap().occupied(), 2);
    assert!(app.world().resource::<TombstoneStore>().is_empty());
}
