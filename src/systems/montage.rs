//! Montage playback system.
//!
//! Advances each [`MontagePlayer`] by the tick delta scaled by its play
//! rate, triggers a [`MontageNotify`] for every notify the playhead crosses
//! and a [`MontageEnded`] when a non-looping clip runs out. Paused players
//! and players holding at rate zero (the hang pose) are left untouched.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::animation::MontagePlayer;
use crate::events::montage::{MontageEnded, MontageNotify};
use crate::resources::montagestore::MontageStore;
use crate::resources::worldtime::WorldTime;

pub fn montage_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    store: Option<Res<MontageStore>>,
    mut query: Query<(Entity, &mut MontagePlayer)>,
) {
    let Some(store) = store else {
        return;
    };
    for (entity, mut player) in query.iter_mut() {
        if player.paused || player.play_rate == 0.0 {
            continue;
        }
        let Some(key) = player.montage_key.clone() else {
            continue;
        };
        let Some(def) = store.get(&key) else {
            trace!("{:?} plays unknown montage '{}'", entity, key);
            continue;
        };

        let from = player.position;
        let to = from + time.delta * player.play_rate;
        let mut fire = |name: &str| {
            commands.trigger(MontageNotify {
                entity,
                montage: key.clone(),
                name: name.to_string(),
            });
        };

        let fresh = std::mem::take(&mut player.fresh);
        let end = to.min(def.length);
        if fresh {
            for notify in def.notifies_from(from, end) {
                fire(&notify.name);
            }
        } else {
            for notify in def.notifies_between(from, end) {
                fire(&notify.name);
            }
        }
        if to < def.length {
            player.position = to;
            continue;
        }

        if def.looped {
            let wrapped = (to - def.length) % def.length;
            for notify in def.notifies_between(f32::NEG_INFINITY, wrapped) {
                fire(&notify.name);
            }
            player.position = wrapped;
        } else {
            trace!("{:?} montage '{}' ended", entity, key);
            player.stop();
            commands.trigger(MontageEnded {
                entity,
                montage: key,
            });
        }
    }
}
