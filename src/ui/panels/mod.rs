pub mod controls_panel;
pub mod loading_panel;
pub mod menu_panel;
pub mod settings_panel;
