//! Integration tests for the effects plugin using the `TestStage` harness.
//!
//! These spin up a headless Bevy App with `EffectsPlugin` and drive effects
//! through request events and the per-frame systems.


use crate::test_harness::TestStage;
use crate::{FlickerManager, FxConfig, FxRng, RumbleManager, TickTable};

// ===========================================================================
// Harness bootstrap
// ===========================================================================

#[test]
fn plugin_installs_idle_managers() {
    let stage = TestStage::new();
    assert_eq!(stage.resource::<FlickerManager>().active_count(), 0);
    assert!(!stage.resource::<RumbleManager>().is_rumbling());
    assert!(stage.resource::<TickTable>().is_empty());
}

#[test]
fn plugin_seeds_rng_from_config() {
    use rand::Rng;

    let config = FxConfig {
        rng_seed: 1234,
        ..FxConfig::default()
    };
    let stage = TestStage::with_config(config.clone());
    assert_eq!(stage.resource::<FxConfig>(), &config);

    let mut expected = FxRng::from_seed_u64(1234);
    let mut actual = FxRng(stage.resource::<FxRng>().0.clone());
    assert_eq!(
        actual.0.gen::<u64>(),
        expected.0.gen::<u64>(),
        "plugin RNG should start from the configured seed"
    );
}

#[test]
fn idle_frames_do_not_dirty_the_area() {
    let mut stage = TestStage::new().with_light(1, 0, 0, 0);
    stage.tick(5);
    assert!(!stage.take_changed());
    assert_eq!(stage.offset(), bevy::math::IVec2::ZERO);
}
