//! Headless stage demo: a few lights flicker while the viewport rumbles,
//! stepped on a fixed 60 Hz clock, then the final state is logged.
//!
//! Usage: `stageshow [config.json]`

use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use effects::{
    AreaView, EffectsPlugin, FlickerRange, FlickerStartedEvent, FxConfig, LightId, LightState,
    LightTable, StartFlickerEvent, StartRumbleEvent,
};

const FRAME: Duration = Duration::from_micros(16_667);
const FRAMES: usize = 180;

fn load_config() -> Result<FxConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            Ok(FxConfig::from_json_str(&json)?)
        }
        None => Ok(FxConfig::default()),
    }
}

fn setup_stage(mut lights: ResMut<LightTable>, mut flickers: EventWriter<StartFlickerEvent>) {
    let torches = [(1, 64, 48), (2, 192, 48), (3, 128, 160)];
    for (id, x, y) in torches {
        lights.insert(LightId(id), LightState::new(x, y, 220));
        flickers.send(StartFlickerEvent {
            light: LightId(id),
            range: FlickerRange::new(2, 2, 24),
            rate_hz: 12.0,
            duration_secs: (id == 3).then_some(1.5),
        });
    }
}

fn log_started(mut started: EventReader<FlickerStartedEvent>) {
    for event in started.read() {
        info!("Flicker {} running on light {}", event.handle.id, event.light);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .add_plugins(EffectsPlugin::with_config(config))
        .add_systems(Startup, setup_stage)
        .add_systems(Update, log_started);

    app.update();
    app.world_mut().send_event(StartRumbleEvent {
        rate_hz: 30.0,
        intensity: 4,
        duration_secs: Some(2.0),
    });

    let mut redraws = 0;
    for _ in 0..FRAMES {
        app.update();
        if app.world_mut().resource_mut::<AreaView>().take_changed() {
            redraws += 1;
        }
    }

    let world = app.world();
    let area = world.resource::<AreaView>();
    info!(
        "{} frames, {} redraws, final viewport offset {}",
        FRAMES, redraws, area.offset
    );
    let lights = world.resource::<LightTable>();
    for id in 1..=3 {
        if let Some(light) = lights.get(LightId(id)) {
            info!(
                "Light {}: ({}, {}) alpha {}",
                LightId(id),
                light.position.x,
                light.position.y,
                light.alpha
            );
        }
    }
    Ok(())
}
