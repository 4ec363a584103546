use thiserror::Error;

use crate::{
    bindings::PlayerId,
    identifier::MediaReference,
    player::{CreatePlayer, PlayerCommand, PlayerEvent},
    Logger,
};

mod state;

pub use state::{PlaybackSpeed, PlaybackState, TrimBounds, TrimField};

/// Interval, in milliseconds, at which the current time and duration are read while playing.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 500;

/// State machine implementing looped playback of a single YouTube video.
///
/// The `LoopController` never talks to a player itself: each of its transitions returns the
/// list of `PlayerCommand` that should be executed, in order, on the embedded player. Lifecycle
/// notifications and polled time values are then given back to it.
///
/// Every created player gets a new `PlayerId`, notifications for any other id are ignored so
/// callbacks still pending for a destroyed player have no effect.
pub struct LoopController {
    /// Identifier of the page element players are created in.
    container: String,

    /// Whether playback should begin as soon as a player is created.
    autoplay: bool,

    poll_interval_ms: u32,

    /// `PlayerId` the next created player will have.
    next_player_id: PlayerId,

    /// Currently loaded content, `None` while nothing is loaded.
    loaded: Option<LoadedMedia>,

    state: PlaybackState,
}

/// Content currently loaded and the player it is loaded in.
struct LoadedMedia {
    player_id: PlayerId,
    reference: MediaReference,
    trim: TrimBounds,

    /// Set once the player sent its `Ready` notification.
    is_ready: bool,

    /// Commands asked for before the player was ready, sent once it is.
    pending: Vec<PlayerCommand>,

    /// If `true`, the player's time and duration are currently being polled.
    is_polling: bool,

    /// Set when a loop was triggered by the end bound, until a position before that bound is
    /// observed again. Prevents the same crossing from being counted twice.
    past_end_bound: bool,
}

impl LoadedMedia {
    /// Send `command` right away if the player is ready, queue it otherwise.
    fn send(&mut self, commands: &mut Vec<PlayerCommand>, command: PlayerCommand) {
        if self.is_ready {
            commands.push(command);
            return;
        }
        self.pending.retain(|queued| !overrides(&command, queued));
        self.pending.push(command);
    }
}

/// Returns `true` if queueing `command` makes the already `queued` one pointless.
///
/// Only the last seek, the last play or pause and the last speed change matter once the
/// player becomes ready, which also bounds the queue's length.
fn overrides(command: &PlayerCommand, queued: &PlayerCommand) -> bool {
    match command {
        PlayerCommand::Seek { .. } => matches!(queued, PlayerCommand::Seek { .. }),
        PlayerCommand::Play(_) | PlayerCommand::Pause(_) => {
            matches!(queued, PlayerCommand::Play(_) | PlayerCommand::Pause(_))
        }
        PlayerCommand::SetSpeed { .. } => matches!(queued, PlayerCommand::SetSpeed { .. }),
        _ => false,
    }
}

impl LoopController {
    pub fn new(container: String, autoplay: bool, poll_interval_ms: u32) -> Self {
        Self {
            container,
            autoplay,
            poll_interval_ms,
            next_player_id: 0,
            loaded: None,
            state: PlaybackState::default(),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Returns the reference of the currently loaded content, if one.
    pub fn reference(&self) -> Option<&MediaReference> {
        self.loaded.as_ref().map(|l| &l.reference)
    }

    /// Returns the `PlayerId` of the player currently used, if one.
    pub fn player_id(&self) -> Option<PlayerId> {
        self.loaded.as_ref().map(|l| l.player_id)
    }

    pub fn trim_bounds(&self) -> Option<TrimBounds> {
        self.loaded.as_ref().map(|l| l.trim)
    }

    pub fn set_poll_interval(&mut self, poll_interval_ms: u32) {
        self.poll_interval_ms = poll_interval_ms;
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    pub fn set_container(&mut self, container: String) {
        self.container = container;
    }

    /// Load the YouTube video designated by `input`, a URL or a bare video id.
    ///
    /// Returns `LoadError::InvalidIdentifier` without changing anything if no video id could be
    /// extracted from `input`.
    pub fn load_input(
        &mut self,
        input: &str,
        trim: TrimBounds,
    ) -> Result<Vec<PlayerCommand>, LoadError> {
        let reference = MediaReference::youtube(input).ok_or(LoadError::InvalidIdentifier)?;
        Ok(self.load(reference, trim))
    }

    /// Load `reference`, restricting playback to `trim`.
    ///
    /// If that same reference is already loaded, its player is kept and playback just
    /// restarts from the start bound with a reset loop count. Otherwise any current player is
    /// destroyed and a new one is created.
    pub fn load(&mut self, reference: MediaReference, trim: TrimBounds) -> Vec<PlayerCommand> {
        let mut commands = vec![];
        if let Some(loaded) = self.loaded.as_mut() {
            if loaded.reference == reference {
                Logger::info(&format!("Controller: restarting {}", reference));
                loaded.trim = trim;
                loaded.past_end_bound = false;
                self.state.loop_count = 0;
                self.state.current_time = trim.start();
                self.state.is_playing = true;
                loaded.send(&mut commands, seek_command(loaded.player_id, trim.start()));
                loaded.send(&mut commands, PlayerCommand::Play(loaded.player_id));
                start_polling(loaded, self.poll_interval_ms, &mut commands);
                return commands;
            }
        }

        self.teardown(&mut commands);
        let player_id = self.next_player_id;
        self.next_player_id = self.next_player_id.wrapping_add(1);
        Logger::info(&format!(
            "Controller: loading {} in player {}",
            reference, player_id
        ));
        self.state = PlaybackState::new(self.autoplay, PlaybackSpeed::default());
        commands.push(PlayerCommand::Create(CreatePlayer {
            player_id,
            container: self.container.clone(),
            media: reference.clone(),
            trim,
            speed: self.state.speed,
            autoplay: self.autoplay,
        }));
        self.state.current_time = trim.start();
        self.loaded = Some(LoadedMedia {
            player_id,
            reference,
            trim,
            is_ready: false,
            pending: vec![],
            is_polling: false,
            past_end_bound: false,
        });
        commands
    }

    /// Unload the current content, destroying its player.
    ///
    /// Polling is stopped before the player is destroyed. Once this returns, no notification
    /// or time sample for that player has any effect anymore.
    pub fn clear(&mut self) -> Vec<PlayerCommand> {
        let mut commands = vec![];
        self.teardown(&mut commands);
        self.state = PlaybackState::default();
        commands
    }

    /// Pause if playing, resume playback otherwise.
    pub fn toggle_play(&mut self) -> Vec<PlayerCommand> {
        let mut commands = vec![];
        let loaded = match self.loaded.as_mut() {
            Some(loaded) => loaded,
            None => return commands,
        };
        if self.state.is_playing {
            self.state.is_playing = false;
            loaded.send(&mut commands, PlayerCommand::Pause(loaded.player_id));
            stop_polling(loaded, &mut commands);
        } else {
            self.state.is_playing = true;
            loaded.send(&mut commands, PlayerCommand::Play(loaded.player_id));
            start_polling(loaded, self.poll_interval_ms, &mut commands);
        }
        commands
    }

    /// Move the playhead `delta` seconds forward (or backward if negative).
    ///
    /// The resulting position is never negative. It is not bounded by the duration though, the
    /// player itself refusing seeks past the end.
    pub fn skip(&mut self, delta: f64) -> Vec<PlayerCommand> {
        let mut commands = vec![];
        if !delta.is_finite() {
            return commands;
        }
        let loaded = match self.loaded.as_mut() {
            Some(loaded) => loaded,
            None => return commands,
        };
        let position = (self.state.current_time + delta).max(0.);
        self.state.mirror_current_time(position);
        loaded.send(&mut commands, seek_command(loaded.player_id, position));
        commands
    }

    /// Update the playback speed, applied right away on the current player if one.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) -> Vec<PlayerCommand> {
        let mut commands = vec![];
        self.state.speed = speed;
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.send(
                &mut commands,
                PlayerCommand::SetSpeed {
                    player_id: loaded.player_id,
                    speed,
                },
            );
        }
        commands
    }

    /// Set the loop count back to `0`. Playback is not affected.
    pub fn reset_loop_count(&mut self) {
        self.state.loop_count = 0;
    }

    /// Replace the trim bounds of the current content.
    ///
    /// The playhead is not moved: the new bounds are used from the next loop on.
    pub fn set_trim_bounds(&mut self, trim: TrimBounds) {
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.trim = trim;
            loaded.past_end_bound = false;
        }
    }

    /// Forget the current content if its player `player_id` could not be created.
    ///
    /// No notification will ever come from that player, loading the same video again then
    /// creates a new one instead of waiting for it.
    pub fn on_create_failed(&mut self, player_id: PlayerId) {
        if self.player_id() != Some(player_id) {
            return;
        }
        if let Some(loaded) = self.loaded.take() {
            Logger::warn(&format!(
                "Controller: player {} for {} could not be created",
                player_id, loaded.reference
            ));
        }
        self.state = PlaybackState::default();
    }

    /// Handle a lifecycle notification sent by the player `player_id`.
    pub fn on_player_event(&mut self, player_id: PlayerId, event: PlayerEvent) -> Vec<PlayerCommand> {
        let mut commands = vec![];
        let loaded = match self.loaded.as_mut() {
            Some(loaded) if loaded.player_id == player_id => loaded,
            _ => {
                Logger::debug(&format!(
                    "Controller: ignoring {:?} from stale player {}",
                    event, player_id
                ));
                return commands;
            }
        };
        match event {
            PlayerEvent::Ready => {
                if loaded.is_ready {
                    return commands;
                }
                Logger::debug(&format!("Controller: player {} ready", player_id));
                loaded.is_ready = true;
                commands.append(&mut loaded.pending);
                if self.state.is_playing {
                    start_polling(loaded, self.poll_interval_ms, &mut commands);
                }
            }
            PlayerEvent::Playing => {
                self.state.is_playing = true;
                start_polling(loaded, self.poll_interval_ms, &mut commands);
            }
            PlayerEvent::Paused => {
                self.state.is_playing = false;
                stop_polling(loaded, &mut commands);
            }
            PlayerEvent::Ended => {
                Self::restart_loop(loaded, &mut self.state, &mut commands);
            }
        }
        commands
    }

    /// Mirror the current time and duration read from the player `player_id`.
    ///
    /// `None` values are reads that failed, they are ignored. Reaching the end bound while
    /// playing triggers a new loop.
    pub fn on_time_sample(
        &mut self,
        player_id: PlayerId,
        current_time: Option<f64>,
        duration: Option<f64>,
    ) -> Vec<PlayerCommand> {
        let mut commands = vec![];
        let loaded = match self.loaded.as_mut() {
            Some(loaded) if loaded.player_id == player_id && loaded.is_polling => loaded,
            _ => return commands,
        };
        if !self.state.is_playing {
            return commands;
        }
        if let Some(duration) = duration {
            self.state.mirror_duration(duration);
        }
        let current_time = match current_time {
            Some(current_time) if current_time.is_finite() => current_time,
            _ => return commands,
        };
        self.state.mirror_current_time(current_time);
        if let Some(end) = loaded.trim.end() {
            if current_time < end {
                loaded.past_end_bound = false;
            } else if !loaded.past_end_bound {
                Logger::debug(&format!("Controller: end bound {} reached", end));
                loaded.past_end_bound = true;
                Self::restart_loop(loaded, &mut self.state, &mut commands);
            }
        }
        commands
    }

    fn restart_loop(
        loaded: &mut LoadedMedia,
        state: &mut PlaybackState,
        commands: &mut Vec<PlayerCommand>,
    ) {
        state.loop_count += 1;
        state.is_playing = true;
        let start = loaded.trim.start();
        Logger::lazy_debug(&|| {
            format!(
                "Controller: loop {} done, restarting at {}",
                state.loop_count, start
            )
        });
        state.current_time = start;
        loaded.send(commands, seek_command(loaded.player_id, start));
        loaded.send(commands, PlayerCommand::Play(loaded.player_id));
    }

    /// Stop polling and destroy the current player if one, forgetting the current content.
    fn teardown(&mut self, commands: &mut Vec<PlayerCommand>) {
        if let Some(mut loaded) = self.loaded.take() {
            Logger::info(&format!(
                "Controller: unloading {} from player {}",
                loaded.reference, loaded.player_id
            ));
            stop_polling(&mut loaded, commands);
            commands.push(PlayerCommand::Destroy(loaded.player_id));
        }
    }
}

fn seek_command(player_id: PlayerId, position: f64) -> PlayerCommand {
    PlayerCommand::Seek {
        player_id,
        position,
        allow_seek_ahead: true,
    }
}

fn start_polling(loaded: &mut LoadedMedia, interval_ms: u32, commands: &mut Vec<PlayerCommand>) {
    if loaded.is_ready && !loaded.is_polling {
        loaded.is_polling = true;
        commands.push(PlayerCommand::StartPolling {
            player_id: loaded.player_id,
            interval_ms,
        });
    }
}

fn stop_polling(loaded: &mut LoadedMedia, commands: &mut Vec<PlayerCommand>) {
    if loaded.is_polling {
        loaded.is_polling = false;
        commands.push(PlayerCommand::StopPolling(loaded.player_id));
    }
}

/// Validation failure preventing a content to be loaded or a setting to be applied.
///
/// The current state is left untouched when one is returned.
#[derive(Error, Debug, PartialEq)]
pub enum LoadError {
    #[error("No video identifier could be found in the given input")]
    InvalidIdentifier,
    #[error("Invalid {field} bound `{value}`: expected a positive whole number of seconds")]
    InvalidTrimBound { field: TrimField, value: String },
    #[error("The end bound ({end}s) has to be after the start bound ({start}s)")]
    EmptyTrimRange { start: f64, end: f64 },
    #[error("Unsupported playback speed: {0}")]
    UnsupportedSpeed(f64),
}
