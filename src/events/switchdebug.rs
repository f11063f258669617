//! Event and observer to toggle probe visualisation and diagnostics.
//!
//! Emitting a [`SwitchDebugEvent`] flips the presence of the [`DebugMode`]
//! resource. [`crate::systems::debugdraw::probe_debug_system`] only records
//! shapes while the resource exists.
use crate::resources::debugmode::{DebugMode, DebugShapes};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

/// Event used to toggle the [`DebugMode`] resource on/off.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchDebugEvent {}

/// Observer that toggles the [`DebugMode`] resource.
///
/// - If `DebugMode` is present, it is removed and recorded shapes are cleared.
/// - If absent, it is inserted.
pub fn switch_debug_observer(
    _trigger: On<SwitchDebugEvent>,
    mut commands: Commands,
    debug_mode: Option<Res<DebugMode>>,
    shapes: Option<ResMut<DebugShapes>>,
) {
    if debug_mode.is_some() {
        commands.remove_resource::<DebugMode>();
        if let Some(mut shapes) = shapes {
            shapes.clear();
        }
        info!("Debug mode disabled");
    } else {
        commands.insert_resource(DebugMode {});
        info!("Debug mode enabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_debug_toggles_resource() {
        let mut world = World::new();
        world.insert_resource(DebugShapes::default());
        world.add_observer(switch_debug_observer);
        world.flush();

        world.trigger(SwitchDebugEvent {});
        world.flush();
        assert!(world.contains_resource::<DebugMode>());

        world.trigger(SwitchDebugEvent {});
        world.flush();
        assert!(!world.contains_resource::<DebugMode>());
    }
}
