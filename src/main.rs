use bevy::prelude::*;
use bevy::window::WindowResolution;

use reaper_duel::combat::CombatPlugin;
use reaper_duel::config::{load_combat_config, COMBAT_CONFIG_PATH};
use reaper_duel::player::PlayerControlPlugin;
use reaper_duel::rendering::CombatRenderPlugin;
use reaper_duel::scene::{BattleScenePlugin, GameState};

fn main() {
    // Read before the app exists so the window can be sized to the arena.
    let config = load_combat_config(COMBAT_CONFIG_PATH);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Reaper Duel".into(),
                resolution: WindowResolution::new(
                    config.arena_width as u32,
                    config.arena_height as u32,
                ),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.05, 0.04, 0.08)))
        .insert_resource(config)
        // The demo drops straight into the fight; the overworld is a stub.
        .insert_state(GameState::BossFight)
        .add_plugins((
            CombatPlugin,
            BattleScenePlugin,
            PlayerControlPlugin,
            CombatRenderPlugin,
        ))
        .run();
}
