use bevy::prelude::*;

/// Top-level screen currently rendered. Exactly one is active.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Loading,
    Landing,
    Menu,
    Settings,
    Experience,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Assets are loaded and the loading screen has been up long enough.
    GateOpened,
    /// The landing exit animation finished.
    Enter,
    OpenSettings,
    BackToMenu,
    StartExperience,
}

impl View {
    /// The one place a view change is decided. Events that make no sense
    /// for the current view leave it unchanged.
    pub fn next(self, event: ViewEvent) -> View {
        match (self, event) {
            (View::Loading, ViewEvent::GateOpened) => View::Landing,
            (current, ViewEvent::GateOpened) => current,
            (View::Landing, ViewEvent::Enter) => View::Menu,
            (current, ViewEvent::Enter) => current,
            (_, ViewEvent::OpenSettings) => View::Settings,
            (_, ViewEvent::BackToMenu) => View::Menu,
            (_, ViewEvent::StartExperience) => View::Experience,
        }
    }
}

pub struct ViewPlugin;
impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ViewEvent>()
            .enable_state_scoped_entities::<View>()
            .add_systems(Update, apply_view_events);
    }
}

fn apply_view_events(
    mut events: EventReader<ViewEvent>,
    state: Res<State<View>>,
    mut next_state: ResMut<NextState<View>>,
) {
    let current = *state.get();
    let next = events.read().fold(current, |view, ev| {
        let next = view.next(*ev);
        debug!("view event {:?}: {:?} -> {:?}", ev, view, next);
        next
    });

    if next != current {
        info!("switching view {:?} -> {:?}", current, next);
        next_state.set(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    const ALL: [View; 5] = [
        View::Loading,
        View::Landing,
        View::Menu,
        View::Settings,
        View::Experience,
    ];

    #[test]
    fn start_experience_from_landing_yields_experience() {
        assert_eq!(
            View::Landing.next(ViewEvent::StartExperience),
            View::Experience
        );
    }

    #[test]
    fn back_to_menu_from_settings_yields_menu() {
        assert_eq!(View::Settings.next(ViewEvent::BackToMenu), View::Menu);
    }

    #[test]
    fn menu_events_are_deterministic_from_every_view() {
        for view in ALL {
            assert_eq!(view.next(ViewEvent::OpenSettings), View::Settings);
            assert_eq!(view.next(ViewEvent::BackToMenu), View::Menu);
            assert_eq!(view.next(ViewEvent::StartExperience), View::Experience);
        }
    }

    #[test]
    fn enter_only_leaves_landing() {
        assert_eq!(View::Landing.next(ViewEvent::Enter), View::Menu);
        for view in ALL.into_iter().filter(|v| *v != View::Landing) {
            assert_eq!(view.next(ViewEvent::Enter), view);
        }
    }

    #[test]
    fn enter_while_loading_is_ignored() {
        assert_eq!(View::Loading.next(ViewEvent::Enter), View::Loading);
    }

    #[test]
    fn gate_only_opens_from_loading() {
        assert_eq!(View::Loading.next(ViewEvent::GateOpened), View::Landing);
        assert_eq!(View::Experience.next(ViewEvent::GateOpened), View::Experience);
        assert_eq!(View::Menu.next(ViewEvent::GateOpened), View::Menu);
    }

    fn app_in(view: View) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_state(view)
            .add_plugins(ViewPlugin);
        app.update();
        app
    }

    fn current(app: &App) -> View {
        *app.world().resource::<State<View>>().get()
    }

    #[test]
    fn dispatch_applies_events_in_order() {
        let mut app = app_in(View::Menu);
        app.world_mut().send_event(ViewEvent::OpenSettings);
        app.world_mut().send_event(ViewEvent::BackToMenu);
        app.world_mut().send_event(ViewEvent::StartExperience);
        app.update();
        app.update();
        assert_eq!(current(&app), View::Experience);
    }

    #[test]
    fn dispatch_ignores_enter_while_loading() {
        let mut app = app_in(View::Loading);
        app.world_mut().send_event(ViewEvent::Enter);
        app.update();
        app.update();
        assert_eq!(current(&app), View::Loading);
    }
}
