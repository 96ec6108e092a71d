//! Player store integration tests
//!
//! Several surfaces observe one store; device callbacks from another
//! thread go through the same dispatch path as user actions.

mod common;

use cadence_playback::{
    DeviceEvent, PlaybackConfig, PlaybackEvent, PlaybackManager, PlayerAction, PlayerStore,
    TransportState,
};
use common::{init_tracing, track, tracks, FakeDevice};
use std::thread;

fn store() -> PlayerStore<FakeDevice> {
    init_tracing();
    let manager = PlaybackManager::new(FakeDevice::new(), PlaybackConfig::default());
    let store = PlayerStore::new(manager);
    store.dispatch(PlayerAction::SetCollection(tracks(&["a", "b", "c"])));
    store
}

#[test]
fn every_surface_sees_the_same_state() {
    let store = store();
    let mut header = store.subscribe();
    let mut queue_panel = store.subscribe();

    store.dispatch(PlayerAction::Play(track("a")));
    store.dispatch(PlayerAction::Enqueue(track("c")));

    assert!(header.has_changed().unwrap());
    let header_view = header.borrow_and_update().clone();
    let queue_view = queue_panel.borrow_and_update().clone();

    assert_eq!(header_view, queue_view);
    assert_eq!(header_view.current_track, Some(track("a")));
    assert!(header_view.is_playing);
    assert_eq!(queue_view.queue.len(), 1);
}

#[test]
fn device_end_from_another_thread_advances() {
    let store = store();
    store.dispatch(PlayerAction::Play(track("a")));

    let device_thread = store.clone();
    let events = thread::spawn(move || {
        device_thread.dispatch(PlayerAction::Device(DeviceEvent::Ended))
    })
    .join()
    .unwrap();

    assert!(events.contains(&PlaybackEvent::TrackFinished {
        track_id: "a".to_string()
    }));
    let state = store.state();
    assert_eq!(state.current_track.map(|t| t.title), Some("Track B".to_string()));
    assert_eq!(state.transport, TransportState::Playing);
}

#[test]
fn concurrent_dispatches_are_serialized() {
    let store = store();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                store.dispatch(PlayerAction::Enqueue(track(&format!("q{i}"))));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.state().queue.len(), 8);
    assert_eq!(store.read(|m| m.queue().len()), 8);
}

#[test]
fn equalizer_reset_flattens_published_gains() {
    let store = store();

    store.dispatch(PlayerAction::SetEqualizerGains(vec![5.0; 10]));
    assert_eq!(store.state().equalizer_gains, [5.0; 10]);

    let events = store.dispatch(PlayerAction::ResetEqualizer);
    assert_eq!(store.state().equalizer_gains, [0.0; 10]);
    assert_eq!(events, vec![PlaybackEvent::EqualizerChanged { gains: [0.0; 10] }]);
}
