pub mod app;
pub mod edit_controls;
pub mod highlights;
pub mod instructions_modal;
pub mod main_scene;
pub mod navigation_map;
pub mod object_modal;
pub mod scene_navigation;
pub mod scroll_hint;
pub mod start_scene;
