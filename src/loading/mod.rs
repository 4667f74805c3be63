//! Asset loading and the gate in front of the landing scene.
//!
//! Assets start loading at startup. The gate lives only while the loading
//! view is active; leaving the view drops it so it can never fire late.

pub mod gate;
pub mod progress;

use bevy::prelude::*;

use crate::config::PageConfig;
use crate::view::{View, ViewEvent};

pub use gate::LoadGate;
pub use progress::{LoadProgress, PageAssets};

pub struct LoadingPlugin;
impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadProgress>()
            .add_systems(Startup, progress::load_page_assets)
            .add_systems(OnEnter(View::Loading), open_gate)
            .add_systems(OnExit(View::Loading), close_gate)
            .add_systems(
                Update,
                (
                    progress::track_asset_progress.run_if(in_state(View::Loading)),
                    drive_load_gate,
                )
                    .chain(),
            );
    }
}

fn open_gate(mut commands: Commands, config: Res<PageConfig>) {
    debug!(
        "loading gate armed, minimum display {:?}",
        config.min_loading_display
    );
    commands.insert_resource(LoadGate::new(config.min_loading_display));
}

fn close_gate(mut commands: Commands) {
    commands.remove_resource::<LoadGate>();
}

/// Ticks on wall-clock time so a long stall still counts toward the window.
fn drive_load_gate(
    time: Res<Time<Real>>,
    progress: Res<LoadProgress>,
    gate: Option<ResMut<LoadGate>>,
    mut ev_view: EventWriter<ViewEvent>,
) {
    let Some(mut gate) = gate else {
        return;
    };

    gate.tick(time.delta());
    gate.observe(progress.percent());
    if gate.poll() {
        info!("loading gate opened after {:?}", gate.elapsed());
        ev_view.send(ViewEvent::GateOpened);
    }
}
