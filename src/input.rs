use crate::config::PageConfig;
use crate::scene::landing::{EnterRequested, Logo};
use crate::scene::ray_hits_sphere;
use crate::view::{View, ViewEvent};
use crate::MainCamera;
use bevy::input::mouse::MouseButtonInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Pointer position in normalized device coordinates, `[-1, 1]` on both
/// axes with +y up. Stays at the last known spot when the cursor leaves.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerNdc(pub Vec2);

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerNdc>().add_systems(
            Update,
            (
                track_pointer,
                logo_click.run_if(in_state(View::Landing)),
                enter_key.run_if(in_state(View::Landing)),
                escape_to_menu,
                diagnostics_toggle,
            ),
        );
    }
}

pub fn cursor_to_ndc(cursor: Vec2, window_size: Vec2) -> Vec2 {
    let size = window_size.max(Vec2::ONE);
    Vec2::new(cursor.x / size.x * 2.0 - 1.0, 1.0 - cursor.y / size.y * 2.0)
}

fn track_pointer(windows: Query<&Window, With<PrimaryWindow>>, mut pointer: ResMut<PointerNdc>) {
    let Ok(win) = windows.get_single() else {
        return;
    };
    if let Some(cursor) = win.cursor_position() {
        pointer.0 = cursor_to_ndc(cursor, Vec2::new(win.width(), win.height()));
    }
}

fn logo_click(
    windows: Query<&Window, With<PrimaryWindow>>,
    q_cam: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    logos: Query<(&GlobalTransform, &Logo)>,
    mut mousebtn_evr: EventReader<MouseButtonInput>,
    mut ev_enter: EventWriter<EnterRequested>,
) {
    let clicked = mousebtn_evr
        .read()
        .any(|ev| ev.button == MouseButton::Left && ev.state == ButtonState::Released);
    if !clicked {
        return;
    }

    let Ok(win) = windows.get_single() else {
        return;
    };
    let Some(cursor) = win.cursor_position() else {
        return;
    };
    let Ok((cam, cam_transform)) = q_cam.get_single() else {
        return;
    };
    let Some(ray) = cam.viewport_to_world(cam_transform, cursor) else {
        return;
    };

    let hit = logos.iter().any(|(transform, logo)| {
        ray_hits_sphere(ray.origin, *ray.direction, transform.translation(), logo.radius)
    });
    if hit {
        debug!("logo clicked");
        ev_enter.send_default();
    }
}

fn enter_key(keys: Res<ButtonInput<KeyCode>>, mut ev_enter: EventWriter<EnterRequested>) {
    if keys.just_pressed(KeyCode::Enter) {
        ev_enter.send_default();
    }
}

fn escape_to_menu(
    state: Res<State<View>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut ev_view: EventWriter<ViewEvent>,
) {
    let leaves_to_menu = matches!(state.get(), View::Experience | View::Settings);
    if leaves_to_menu && keys.just_pressed(KeyCode::Escape) {
        ev_view.send(ViewEvent::BackToMenu);
    }
}

fn diagnostics_toggle(mut config: ResMut<PageConfig>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::F3) {
        config.show_diagnostics = !config.show_diagnostics;
    }
}
