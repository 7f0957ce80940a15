use leptos::prelude::*;
use room_core::content::ObjectInfo;
use room_core::overlay::{OverlayPhase, TransitionToken};
use room_core::parallax::ParallaxTransform;
use room_core::{NavigationPoint, Position};

/// A hotspot currently in the DOM.
#[derive(Clone, Debug, PartialEq)]
pub struct HotspotView {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub position: Position,
    pub phase: OverlayPhase,
    pub token: Option<TransitionToken>,
    pub duration_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum HintState {
    #[default]
    Hidden,
    Shown,
    Leaving,
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub progress: RwSignal<f64>,
    pub active_id: RwSignal<Option<String>>,
    pub points: RwSignal<Vec<NavigationPoint>>,
    pub hotspots: RwSignal<Vec<HotspotView>>,
    pub parallax: RwSignal<ParallaxTransform>,
    pub hint: RwSignal<HintState>,
    pub modal: RwSignal<Option<&'static ObjectInfo>>,
    pub instructions_open: RwSignal<bool>,
    pub navigating: RwSignal<bool>,
    pub nav_expanded: RwSignal<bool>,
    pub edit_mode: RwSignal<bool>,
    pub is_mobile: RwSignal<bool>,
    pub video_ready: RwSignal<bool>,
    /// The intro scene has finished and the room is mounted.
    pub intro_done: RwSignal<bool>,
    pub save_notice: RwSignal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            progress: RwSignal::new(0.0),
            active_id: RwSignal::new(None),
            points: RwSignal::new(Vec::new()),
            hotspots: RwSignal::new(Vec::new()),
            parallax: RwSignal::new(ParallaxTransform::NEUTRAL),
            hint: RwSignal::new(HintState::Hidden),
            modal: RwSignal::new(None),
            instructions_open: RwSignal::new(false),
            navigating: RwSignal::new(false),
            nav_expanded: RwSignal::new(false),
            edit_mode: RwSignal::new(false),
            is_mobile: RwSignal::new(false),
            video_ready: RwSignal::new(false),
            intro_done: RwSignal::new(false),
            save_notice: RwSignal::new(false),
        }
    }

    pub fn point(&self, id: &str) -> Option<NavigationPoint> {
        self.points.with_untracked(|pts| pts.iter().find(|p| p.id == id).cloned())
    }
}
