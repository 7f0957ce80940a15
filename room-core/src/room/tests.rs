use std::cell::Cell;
use std::rc::Rc;
use super::*;
use crate::overlay::OverlayPhase;
use crate::store::MemoryStore;
use crate::types::ScrollBehavior;

#[derive(Default)]
struct FakeVideo {
    duration: Rc<Cell<Option<f64>>>,
    time: f64,
}

impl MediaResource for FakeVideo {
    fn duration(&self) -> Option<f64> {
        self.duration.get()
    }
    fn current_time(&self) -> f64 {
        self.time
    }
    fn set_current_time(&mut self, secs: f64) {
        self.time = secs;
    }
}

/// 5000px of content in a 1000px viewport: 4000px of travel.
#[derive(Default)]
struct FakeScroll {
    offset: f64,
    programmatic: Vec<f64>,
}

impl ScrollProvider for FakeScroll {
    fn content_height(&self) -> f64 {
        5000.0
    }
    fn viewport_height(&self) -> f64 {
        1000.0
    }
    fn offset(&self) -> f64 {
        self.offset
    }
    fn scroll_to(&mut self, offset: f64, _behavior: ScrollBehavior) {
        self.offset = offset;
        self.programmatic.push(offset);
    }
}

type TestRoom = Room<FakeVideo, FakeScroll, MemoryStore>;

fn room() -> TestRoom {
    room_with(RoomConfig::default(), MemoryStore::new())
}

fn room_with(config: RoomConfig, store: MemoryStore) -> TestRoom {
    let mut room = TestRoom::new(config, Catalog::compiled(), store, 0);
    room.attach_media(FakeVideo { duration: Rc::new(Cell::new(Some(20.0))), time: 0.0 });
    room.attach_scroll(FakeScroll::default(), 0);
    room.drain_events();
    room
}

fn user_scroll(room: &mut TestRoom, offset: f64, now_ms: u64) {
    if let Some(s) = room.scroll_mut() {
        s.offset = offset;
    }
    room.on_scroll(now_ms);
}

fn hints(events: &[RoomEvent]) -> Vec<HintChange> {
    events
        .iter()
        .filter_map(|e| match e {
            RoomEvent::Hint(h) => Some(*h),
            _ => None,
        })
        .collect()
}

#[test]
fn test_scroll_drives_video_and_hotspots() {
    let mut room = room();
    user_scroll(&mut room, 680.0, 100);
    assert_eq!(room.progress(), 0.17);
    let time = room.media().map(|m| m.time).unwrap();
    assert!((time - 3.4).abs() < 1e-9, "time={time}");
    assert_eq!(room.overlays().phase("fireplace"), OverlayPhase::Entering);
    assert_eq!(room.active_point().map(|p| p.id.as_str()), Some("fireplace"));

    let events = room.drain_events();
    assert_eq!(events.first(), Some(&RoomEvent::Progress(0.17)));
    assert!(events.iter().any(|e| matches!(e, RoomEvent::Seeked(_))));
    assert!(events.iter().any(
        |e| matches!(e, RoomEvent::Overlay(OverlayEvent::Created { id, .. }) if id == "fireplace")
    ));

    // below the sampler delta: nothing propagates
    user_scroll(&mut room, 700.0, 200);
    assert!(!room.drain_events().iter().any(|e| matches!(e, RoomEvent::Progress(_))));
}

#[test]
fn test_inverted_room_plays_backwards() {
    let config = RoomConfig::from_json(r#"{ "sampler": { "direction": "inverted" } }"#).unwrap();
    let mut room = TestRoom::new(config, Catalog::compiled(), MemoryStore::new(), 0);
    room.attach_scroll(FakeScroll::default(), 0);
    assert_eq!(room.progress(), 1.0);
    room.attach_media(FakeVideo { duration: Rc::new(Cell::new(Some(20.0))), time: 0.0 });
    assert_eq!(room.media().map(|m| m.time), Some(20.0));

    // tv is centred at 0.35 progress, i.e. 65% of the scroll travel
    let outcome = room.navigate_to("tv", 0).unwrap();
    let NavigateOutcome::Started { offset } = outcome else {
        panic!("unexpected {outcome:?}");
    };
    assert!((offset - 2600.0).abs() < 1e-6, "offset={offset}");
}

#[test]
fn test_media_waits_for_duration() {
    let duration = Rc::new(Cell::new(None));
    let mut room = TestRoom::new(RoomConfig::default(), Catalog::compiled(), MemoryStore::new(), 0);
    room.attach_media(FakeVideo { duration: duration.clone(), time: 0.0 });
    room.attach_scroll(FakeScroll::default(), 0);
    user_scroll(&mut room, 2000.0, 10);
    assert_eq!(room.media().map(|m| m.time), Some(0.0));

    duration.set(Some(30.0));
    room.on_media_ready();
    assert_eq!(room.media().map(|m| m.time), Some(15.0));
    assert!(room.drain_events().contains(&RoomEvent::Seeked(15.0)));
}

#[test]
fn test_navigation_focuses_destination_until_lock_expires() {
    let mut room = room();
    user_scroll(&mut room, 1400.0, 0); // tv
    room.tick(600);
    assert_eq!(room.overlays().phase("tv"), OverlayPhase::Visible);

    let outcome = room.navigate_to("fireplace", 1000).unwrap();
    assert!(outcome.is_started());
    assert!(room.is_navigating());
    assert_eq!(room.overlays().phase("tv"), OverlayPhase::Exiting);
    assert_eq!(room.overlays().phase("fireplace"), OverlayPhase::Absent);

    // the programmatic scroll lands; its scroll event must not reveal early
    room.on_scroll(1050);
    assert_eq!(room.overlays().phase("fireplace"), OverlayPhase::Absent);
    room.tick(1299);
    assert_eq!(room.overlays().phase("fireplace"), OverlayPhase::Absent);
    room.tick(1300);
    assert_eq!(room.overlays().phase("fireplace"), OverlayPhase::Entering);

    room.drain_events();
    room.tick(2200);
    assert!(!room.is_navigating());
    let events = room.drain_events();
    assert!(events.iter().any(|e| matches!(e, RoomEvent::NavigationSettled { .. })));
    // organic control resumes, and the page really is at the fireplace
    assert_eq!(room.overlays().phase("fireplace"), OverlayPhase::Visible);
    assert_eq!(room.overlays().phase("tv"), OverlayPhase::Absent);
}

#[test]
fn test_navigation_while_locked_honours_first_target() {
    let mut room = room();
    assert_eq!(room.navigate(0.2, 0), NavigateOutcome::Started { offset: 800.0 });
    assert_eq!(room.navigate(0.8, 100), NavigateOutcome::Rejected);
    assert_eq!(room.scroll().map(|s| s.programmatic.clone()), Some(vec![800.0]));

    room.tick(1200);
    assert!(room.navigate(0.8, 1300).is_started());
}

#[test]
fn test_navigation_between_hotspots_suppresses_all() {
    let mut room = room();
    user_scroll(&mut room, 1400.0, 0);
    room.navigate(0.5, 100);
    assert!(room.overlays().shown_ids().is_empty());
    room.tick(500);
    assert!(room.overlays().shown_ids().is_empty());
}

#[test]
fn test_navigation_without_container() {
    let mut room = room();
    room.detach_scroll();
    assert_eq!(room.navigate(0.5, 0), NavigateOutcome::NoContainer);
    assert!(!room.is_navigating());
    assert!(room.navigate_to("nope", 0).is_none());
}

#[test]
fn test_arrows_wrap_and_only_advance_when_started() {
    let mut room = room();
    let first = room.navigate_prev(0).unwrap();
    assert!(first.is_started());
    let offset = room.scroll().map(|s| s.offset).unwrap();
    assert!((offset - 2500.0).abs() < 1e-6, "offset={offset}"); // bookshelf

    assert_eq!(room.navigate_next(100), Some(NavigateOutcome::Rejected));
    room.tick(1200);
    assert!(room.navigate_next(1300).unwrap().is_started());
    let offset = room.scroll().map(|s| s.offset).unwrap();
    assert!((offset - 120.0).abs() < 1e-6, "offset={offset}"); // sofa
}

#[test]
fn test_idle_hint_cycle_and_activity() {
    let mut room = room();
    room.tick(9_999);
    assert!(hints(&room.drain_events()).is_empty());
    room.tick(10_000);
    assert_eq!(hints(&room.drain_events()), vec![HintChange::Show]);

    room.on_pointer_move(Point2::new(10.0, 10.0), Rect::new(0.0, 0.0, 100.0, 100.0), 11_000);
    assert_eq!(hints(&room.drain_events()), vec![HintChange::Hidden]);
    assert_eq!(room.hint_phase(), IdlePhase::Waiting);
    room.tick(13_000);
    room.tick(20_999);
    assert!(hints(&room.drain_events()).is_empty());
    room.tick(21_000);
    assert_eq!(hints(&room.drain_events()), vec![HintChange::Show]);
}

#[test]
fn test_modal_and_mobile_block_the_hint() {
    let mut room = room();
    let info = room.open_object("tv", 0).unwrap();
    assert_eq!(info.id, "tv");
    assert_eq!(room.modal(), Some(&Modal::Object("tv".into())));
    room.tick(10_000);
    assert_eq!(room.hint_phase(), IdlePhase::Waiting);

    room.close_modal(10_500);
    assert_eq!(room.modal(), None);
    room.set_mobile(true, 10_500);
    room.tick(30_000);
    assert_eq!(room.hint_phase(), IdlePhase::Waiting);

    room.set_mobile(false, 30_000);
    room.tick(40_000);
    assert_eq!(room.hint_phase(), IdlePhase::Visible);
    let events = room.drain_events();
    assert!(events.contains(&RoomEvent::ModalOpened(Modal::Object("tv".into()))));
    assert!(events.contains(&RoomEvent::ModalClosed));
    assert!(room.open_object("lamp", 40_000).is_none());
}

#[test]
fn test_pointer_parallax_settles() {
    let mut room = room();
    let bounds = Rect::new(0.0, 0.0, 1000.0, 500.0);
    room.on_pointer_move(Point2::new(500.0, 250.0), bounds, 0);
    assert_eq!(room.parallax(2_000), ParallaxTransform { scale: 1.1, offset_x: 0.0, offset_y: 0.0 });
    room.on_pointer_leave(2_000);
    assert!(!room.is_parallax_settled(2_300));
    assert_eq!(room.parallax(2_600), ParallaxTransform::NEUTRAL);
    assert!(room.is_parallax_settled(2_600));
}

#[test]
fn test_drag_writes_through_to_store() {
    let mut room = room();
    user_scroll(&mut room, 680.0, 0);
    let container = Rect::new(0.0, 0.0, 1000.0, 500.0);
    assert!(!room.begin_drag("fireplace", Point2::new(750.0, 300.0), Point2::new(750.0, 300.0), container));

    room.set_edit_mode(true);
    assert!(room.begin_drag("fireplace", Point2::new(750.0, 300.0), Point2::new(750.0, 300.0), container));
    room.drag_to(Point2::new(400.0, 300.0));
    assert_eq!(room.end_drag(), Some(Position::new(40.0, 60.0)));
    let stored = room.overlays().book().store().get("fireplace").unwrap();
    assert_eq!(stored, Some(Position::new(40.0, 60.0)));

    room.reset_positions();
    assert_eq!(room.working_positions().get("fireplace"), Some(&Position::new(75.0, 60.0)));
    assert_eq!(room.overlays().book().store().get("fireplace").unwrap(), None);
}

#[test]
fn test_cancelled_idle_stays_quiet_until_input() {
    let mut room = room();
    room.tick(10_000);
    assert_eq!(hints(&room.drain_events()), vec![HintChange::Show]);
    room.cancel_idle();
    assert_eq!(hints(&room.drain_events()), vec![HintChange::Hidden]);
    room.tick(60_000);
    assert_eq!(room.hint_phase(), IdlePhase::Waiting);
    assert!(hints(&room.drain_events()).is_empty());

    room.on_activity(60_000);
    room.tick(70_000);
    assert_eq!(room.hint_phase(), IdlePhase::Visible);
}

#[test]
fn test_instructions_show_once_and_hold_the_hint() {
    let config = RoomConfig::from_json(r#"{ "instructions": { "autoShow": true } }"#).unwrap();
    let mut room = room_with(config, MemoryStore::new());
    room.tick(999);
    assert_eq!(room.modal(), None);
    room.tick(1_000);
    assert_eq!(room.modal(), Some(&Modal::Instructions));
    assert!(room.drain_events().contains(&RoomEvent::ModalOpened(Modal::Instructions)));

    room.tick(12_000);
    assert_eq!(room.hint_phase(), IdlePhase::Waiting);

    room.close_modal(12_000);
    assert_eq!(room.modal(), None);
    room.tick(22_000);
    assert_eq!(room.hint_phase(), IdlePhase::Visible);
    assert_eq!(room.modal(), None);

    // the help button reopens it on demand
    room.open_instructions(23_000);
    assert_eq!(room.modal(), Some(&Modal::Instructions));
}

#[test]
fn test_instructions_do_not_replace_an_open_sheet() {
    let config = RoomConfig::from_json(r#"{ "instructions": { "autoShow": true } }"#).unwrap();
    let mut room = room_with(config, MemoryStore::new());
    room.open_object("sofa", 500);
    room.tick(1_000);
    assert_eq!(room.modal(), Some(&Modal::Object("sofa".into())));
    room.close_modal(1_500);
    room.tick(5_000);
    assert_eq!(room.modal(), None);
}

#[test]
fn test_navigation_target_survives_reload() {
    let mut room = room();
    assert!(room.set_navigation_target("tv", 0.32));
    assert!(!room.set_navigation_target("tv", 1.2));
    assert!(!room.set_navigation_target("lamp", 0.5));
    let events = room.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        RoomEvent::NavigationPoints(pts) if pts.iter().any(|p| p.id == "tv" && p.target == 0.32)
    )));

    let store = room.overlays().book().store().clone();
    let mut reloaded = room_with(RoomConfig::default(), store);
    let tv = reloaded.catalog().navigation_point("tv").unwrap();
    assert_eq!(tv.target, 0.32);
    let NavigateOutcome::Started { offset } = reloaded.navigate_to("tv", 0).unwrap() else {
        panic!("navigation did not start");
    };
    assert!((offset - 1280.0).abs() < 1e-6, "offset={offset}");

    reloaded.reset_navigation_targets();
    let tv = reloaded.catalog().navigation_point("tv").unwrap();
    assert!((tv.target - 0.35).abs() < 1e-9);
    assert!(reloaded.overlays().book().store().load_targets().unwrap().is_empty());
}

#[test]
fn test_leaving_edit_mode_ends_the_drag() {
    let mut room = room();
    user_scroll(&mut room, 1400.0, 0);
    let container = Rect::new(0.0, 0.0, 1000.0, 500.0);
    room.set_edit_mode(true);
    assert!(room.begin_drag("tv", Point2::new(500.0, 150.0), Point2::new(500.0, 150.0), container));
    assert!(room.is_dragging());
    room.set_edit_mode(false);
    assert!(!room.is_dragging());
    assert_eq!(room.drag_to(Point2::new(100.0, 100.0)), None);

    room.set_edit_mode(true);
    assert!(room.begin_drag("tv", Point2::new(500.0, 150.0), Point2::new(500.0, 150.0), container));
    room.reset_positions();
    assert!(!room.is_dragging());
}
