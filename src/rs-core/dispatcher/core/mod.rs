use super::{LoopDispatcher, MultiViewDispatcher};
use crate::{
    bindings::PlayerId,
    controller::LoopController,
    player::{execute, MediaPlayerAdapter, PlayerCommand, PlayerEvent},
    Logger,
};

impl LoopDispatcher {
    pub(super) fn apply(&mut self, commands: Vec<PlayerCommand>) {
        run_commands(&mut self.controller, &mut self.adapter, commands);
    }

    pub(super) fn on_player_event_core(&mut self, player_id: PlayerId, event: PlayerEvent) {
        Logger::debug(&format!("Core: player {} sent {:?}", player_id, event));
        let commands = self.controller.on_player_event(player_id, event);
        self.apply(commands);
    }

    pub(super) fn on_poll_tick_core(&mut self, player_id: PlayerId) {
        sample_player(&mut self.controller, &mut self.adapter, player_id);
    }
}

impl MultiViewDispatcher {
    pub(super) fn apply(&mut self, commands: Vec<PlayerCommand>) {
        for player_id in execute(&mut self.adapter, commands) {
            self.session.on_create_failed(player_id);
        }
    }
}

/// Execute `commands` on `adapter`, telling `controller` about players that could not be
/// created.
fn run_commands<A: MediaPlayerAdapter>(
    controller: &mut LoopController,
    adapter: &mut A,
    commands: Vec<PlayerCommand>,
) {
    for player_id in execute(adapter, commands) {
        controller.on_create_failed(player_id);
    }
}

/// Read the current time and duration of the player `player_id`, let the controller react to
/// them and apply its decisions.
///
/// A failed read is just an unknown value, the other one is still mirrored.
fn sample_player<A: MediaPlayerAdapter>(
    controller: &mut LoopController,
    adapter: &mut A,
    player_id: PlayerId,
) {
    if controller.player_id() != Some(player_id) {
        Logger::lazy_debug(&|| format!("Core: ignoring tick of stale player {}", player_id));
        return;
    }
    let current_time = adapter.current_time(player_id).ok();
    let duration = adapter.duration(player_id).ok();
    let commands = controller.on_time_sample(player_id, current_time, duration);
    run_commands(controller, adapter, commands);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        controller::{TrimBounds, DEFAULT_POLL_INTERVAL_MS},
        identifier::MediaReference,
        player::test_utils::{Call, RecordingAdapter},
    };

    /// Controller whose first player has been created on `adapter` and is ready.
    fn ready_controller(adapter: &mut RecordingAdapter, trim: TrimBounds) -> LoopController {
        let mut controller =
            LoopController::new("player".to_string(), true, DEFAULT_POLL_INTERVAL_MS);
        let reference = MediaReference::youtube("dQw4w9WgXcQ").unwrap();
        execute(adapter, controller.load(reference, trim));
        execute(adapter, controller.on_player_event(0, PlayerEvent::Ready));
        adapter.calls.clear();
        controller
    }

    #[test]
    fn test_failed_creation_allows_retry() {
        let mut adapter = RecordingAdapter {
            fail_create: true,
            ..Default::default()
        };
        let mut controller =
            LoopController::new("player".to_string(), true, DEFAULT_POLL_INTERVAL_MS);
        let reference = MediaReference::youtube("dQw4w9WgXcQ").unwrap();
        let commands = controller.load(reference.clone(), TrimBounds::default());
        run_commands(&mut controller, &mut adapter, commands);
        assert_eq!(controller.reference(), None);
        assert!(!controller.state().is_playing());
        for _ in 0..1000 {
            assert_eq!(controller.toggle_play(), vec![]);
        }

        adapter.fail_create = false;
        let commands = controller.load(reference.clone(), TrimBounds::default());
        run_commands(&mut controller, &mut adapter, commands);
        assert_eq!(adapter.calls, vec![Call::Create(0), Call::Create(1)]);
        assert_eq!(controller.reference(), Some(&reference));
        assert_eq!(controller.player_id(), Some(1));
    }

    #[test]
    fn test_sample_mirrors_position() {
        let mut adapter = RecordingAdapter::default();
        let mut controller = ready_controller(&mut adapter, TrimBounds::default());
        adapter.current_time = 12.;
        adapter.duration = 200.;
        sample_player(&mut controller, &mut adapter, 0);
        assert_eq!(controller.state().current_time(), 12.);
        assert_eq!(controller.state().duration(), 200.);
        assert!(adapter.calls.is_empty());
    }

    #[test]
    fn test_sample_past_end_bound_loops() {
        let mut adapter = RecordingAdapter::default();
        let trim = TrimBounds::new(10., Some(20.)).unwrap();
        let mut controller = ready_controller(&mut adapter, trim);
        adapter.current_time = 20.5;
        adapter.duration = 200.;
        sample_player(&mut controller, &mut adapter, 0);
        assert_eq!(controller.state().loop_count(), 1);
        assert_eq!(adapter.calls, vec![Call::Seek(0, 10., true), Call::Play(0)]);
    }

    #[test]
    fn test_sample_stale_player_ignored() {
        let mut adapter = RecordingAdapter::default();
        let mut controller = ready_controller(&mut adapter, TrimBounds::default());
        adapter.current_time = 50.;
        sample_player(&mut controller, &mut adapter, 4);
        assert_eq!(controller.state().current_time(), 0.);
        assert!(adapter.calls.is_empty());
    }

    #[test]
    fn test_sample_destroyed_player() {
        let mut adapter = RecordingAdapter::default();
        let mut controller = ready_controller(&mut adapter, TrimBounds::default());
        adapter.alive.clear();
        sample_player(&mut controller, &mut adapter, 0);
        assert_eq!(controller.state().current_time(), 0.);
        assert_eq!(controller.state().duration(), 0.);
    }
}
