use crate::{identifier::Platform, wasm_bindgen};

/// # js_functions
///
/// This file lists all JavaScript functions that are callable from Rust as well as
/// struct and enumeration used by those functions.
///
/// Every function acting on an embedded player receives the `PlayerId` the Rust-side
/// allocated when asking for its creation. Those ids are only unique per dispatcher instance:
/// JavaScript is expected to keep, for each `LoopDispatcher` or `MultiViewDispatcher`, its own
/// map of those ids to the actual YouTube or Twitch embed objects.

#[wasm_bindgen]
extern "C" {
    // Log the given text in the JavaScript console, with the log level given.
    pub fn jsLog(log_level: LogLevel, log: &str);

    // Create a new embedded player inside the DOM element whose id is `container`.
    //
    // For a `LoopDispatcher`, once the embed signals that it is usable, its `on_player_event`
    // method should be called with the same `player_id` and the `Ready` event. Later state
    // changes (playing, paused, ended) are reported the same way. Players created for a
    // `MultiViewDispatcher` need no event forwarding.
    //
    // `parent_domain` is the "parent" parameter Twitch embeds require, it is ignored for
    // YouTube players.
    //
    // Returns `false` if the player could not be created, e.g. because the container is not
    // in the page or the embed library is not loaded.
    #[allow(clippy::too_many_arguments)]
    pub fn jsCreatePlayer(
        player_id: PlayerId,
        container: &str,
        platform: Platform,
        media_id: &str,
        start: f64,
        speed: f64,
        autoplay: bool,
        parent_domain: &str,
    ) -> bool;

    // Destroy the embed linked to `player_id` and free every associated resource.
    //
    // After this call, no event should be sent anymore for that `player_id`.
    //
    // Returns `false` if no player was known for that `player_id`.
    pub fn jsDestroyPlayer(player_id: PlayerId) -> bool;

    // Resume (or start) playback on the given player.
    //
    // Returns `false` if no usable player was known for that `player_id`.
    pub fn jsPlay(player_id: PlayerId) -> bool;

    // Pause playback on the given player.
    //
    // Returns `false` if no usable player was known for that `player_id`.
    pub fn jsPause(player_id: PlayerId) -> bool;

    // Move the playhead of the given player to `position`, in seconds.
    //
    // `allow_seek_ahead` is forwarded to the embed and allows it to request data not yet
    // buffered.
    //
    // Returns `false` if no usable player was known for that `player_id`.
    pub fn jsSeek(player_id: PlayerId, position: f64, allow_seek_ahead: bool) -> bool;

    // Update the playback rate of the given player.
    //
    // Returns `false` if no usable player was known for that `player_id`.
    pub fn jsSetPlaybackRate(player_id: PlayerId, rate: f64) -> bool;

    // Returns the current position, in seconds, of the given player.
    //
    // Returns `None` if no usable player was known for that `player_id`.
    pub fn jsGetCurrentTime(player_id: PlayerId) -> Option<f64>;

    // Returns the duration, in seconds, of the media loaded in the given player.
    //
    // Returns `None` if no usable player was known for that `player_id` or if its duration
    // is not known yet.
    pub fn jsGetDuration(player_id: PlayerId) -> Option<f64>;

    // Start an interval timer calling the `on_poll_tick` method of the dispatcher which
    // started it with the given `player_id` every `interval_ms` milliseconds.
    //
    // The timer runs until `jsStopPolling` is called with the `TimerId` returned here.
    pub fn jsStartPolling(player_id: PlayerId, interval_ms: f64) -> TimerId;

    // Stop an interval timer started with `jsStartPolling`.
    //
    // No `on_poll_tick` call linked to that timer will happen after this call.
    pub fn jsStopPolling(id: TimerId);
}

/// Levels with which a log can be emitted.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd)]
pub enum LogLevel {
    /// Log level reserved for very important errors and highly unexpected events.
    Error = 0,

    /// Log level reserved for less important errors and unexpected events.
    Warn = 1,

    /// Log level reserved for important events
    Info = 2,

    /// Log level used when debugging. Small-ish yet impactful events should be logged with it.
    Debug = 3,
}

/// Identify an embedded player created through `jsCreatePlayer`.
///
/// Those ids are allocated by the Rust-side and never re-used by the same dispatcher, which
/// allows to recognize events sent by a player that has since been destroyed.
pub type PlayerId = u32;

/// Identify a pending polling timer.
pub type TimerId = f64;
