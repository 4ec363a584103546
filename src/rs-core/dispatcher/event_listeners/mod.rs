use crate::{bindings::PlayerId, dispatcher::LoopDispatcher, player::PlayerEvent, wasm_bindgen};

/// Methods triggered on JavaScript events by the JavaScript code.
#[wasm_bindgen]
impl LoopDispatcher {
    /// The JS code should call this method each time an embedded player created through
    /// `jsCreatePlayer` sends a lifecycle notification.
    ///
    /// # Arguments
    ///
    /// * `player_id` - The identifier given to `jsCreatePlayer` when that player was created.
    ///   Notifications from players that have since been replaced or cleared are ignored.
    ///
    /// * `event` - The notification received.
    pub fn on_player_event(&mut self, player_id: PlayerId, event: PlayerEvent) {
        self.on_player_event_core(player_id, event);
    }

    /// The JS code should call this method each time a polling timer started through
    /// `jsStartPolling` fires.
    ///
    /// # Arguments
    ///
    /// * `player_id` - The identifier given to `jsStartPolling` when the timer was started.
    pub fn on_poll_tick(&mut self, player_id: PlayerId) {
        self.on_poll_tick_core(player_id);
    }
}
