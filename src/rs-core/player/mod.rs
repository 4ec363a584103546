use thiserror::Error;

use crate::{
    bindings::PlayerId,
    controller::{PlaybackSpeed, TrimBounds},
    identifier::MediaReference,
    wasm_bindgen, Logger,
};

mod js_adapter;

pub(crate) use js_adapter::JsPlayerAdapter;

/// Lifecycle notifications an embedded player sends once created.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The player has been created and can now receive commands. Sent only once per player.
    Ready = 0,
    /// Playback started or resumed.
    Playing = 1,
    /// Playback has been paused.
    Paused = 2,
    /// The end of the media has been reached.
    Ended = 3,
}

/// Everything needed to create a new embedded player.
#[derive(Clone, Debug, PartialEq)]
pub struct CreatePlayer {
    pub player_id: PlayerId,
    /// Identifier of the page element the embed should be created in.
    pub container: String,
    pub media: MediaReference,
    pub trim: TrimBounds,
    pub speed: PlaybackSpeed,
    pub autoplay: bool,
}

/// Command to perform on an embedded player, as decided by the controllers.
///
/// Controllers never act on players directly, they instead return lists of `PlayerCommand`
/// which have to be executed in order on a `MediaPlayerAdapter` (see `execute`).
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerCommand {
    Create(CreatePlayer),
    Play(PlayerId),
    Pause(PlayerId),
    Seek {
        player_id: PlayerId,
        position: f64,
        allow_seek_ahead: bool,
    },
    SetSpeed {
        player_id: PlayerId,
        speed: PlaybackSpeed,
    },
    /// Begin reading the current time and duration of that player at a regular interval.
    StartPolling {
        player_id: PlayerId,
        interval_ms: u32,
    },
    StopPolling(PlayerId),
    Destroy(PlayerId),
}

impl PlayerCommand {
    /// Returns the `PlayerId` of the player this command targets.
    pub fn player_id(&self) -> PlayerId {
        match self {
            PlayerCommand::Create(create) => create.player_id,
            PlayerCommand::Play(id)
            | PlayerCommand::Pause(id)
            | PlayerCommand::StopPolling(id)
            | PlayerCommand::Destroy(id) => *id,
            PlayerCommand::Seek { player_id, .. }
            | PlayerCommand::SetSpeed { player_id, .. }
            | PlayerCommand::StartPolling { player_id, .. } => *player_id,
        }
    }
}

/// Capability any embed library has to expose so it can be driven by the controllers.
///
/// Every method may fail with `PlayerError::Unavailable` when the targeted player does not
/// exist (anymore), which is an expected situation when teardown races with pending commands.
pub trait MediaPlayerAdapter {
    fn create(&mut self, request: &CreatePlayer) -> Result<(), PlayerError>;
    fn play(&mut self, player_id: PlayerId) -> Result<(), PlayerError>;
    fn pause(&mut self, player_id: PlayerId) -> Result<(), PlayerError>;
    fn seek(
        &mut self,
        player_id: PlayerId,
        position: f64,
        allow_seek_ahead: bool,
    ) -> Result<(), PlayerError>;
    fn set_speed(&mut self, player_id: PlayerId, rate: f64) -> Result<(), PlayerError>;
    fn current_time(&self, player_id: PlayerId) -> Result<f64, PlayerError>;
    fn duration(&self, player_id: PlayerId) -> Result<f64, PlayerError>;
    fn start_polling(&mut self, player_id: PlayerId, interval_ms: u32)
        -> Result<(), PlayerError>;
    fn stop_polling(&mut self, player_id: PlayerId) -> Result<(), PlayerError>;
    fn destroy(&mut self, player_id: PlayerId) -> Result<(), PlayerError>;
}

/// Execute, in order, the given commands on `adapter`.
///
/// Failures are only logged: a player being unavailable just means that the command had no
/// effect. The one exception is a failed `Create`, as that player will never notify anything:
/// the `PlayerId` of each player that could not be created is returned.
pub(crate) fn execute<A: MediaPlayerAdapter + ?Sized>(
    adapter: &mut A,
    commands: Vec<PlayerCommand>,
) -> Vec<PlayerId> {
    let mut failed_creations = vec![];
    for command in commands {
        Logger::lazy_debug(&|| format!("Player: executing {:?}", command));
        let res = match &command {
            PlayerCommand::Create(request) => adapter.create(request),
            PlayerCommand::Play(id) => adapter.play(*id),
            PlayerCommand::Pause(id) => adapter.pause(*id),
            PlayerCommand::Seek {
                player_id,
                position,
                allow_seek_ahead,
            } => adapter.seek(*player_id, *position, *allow_seek_ahead),
            PlayerCommand::SetSpeed { player_id, speed } => {
                adapter.set_speed(*player_id, speed.rate())
            }
            PlayerCommand::StartPolling {
                player_id,
                interval_ms,
            } => adapter.start_polling(*player_id, *interval_ms),
            PlayerCommand::StopPolling(id) => adapter.stop_polling(*id),
            PlayerCommand::Destroy(id) => adapter.destroy(*id),
        };
        match (res, &command) {
            (Err(err), PlayerCommand::Create(request)) => {
                Logger::warn(&format!("Player: creation failed: {}", err));
                failed_creations.push(request.player_id);
            }
            (Err(err), _) => {
                Logger::debug(&format!("Player: ignored failed command: {}", err));
            }
            (Ok(()), _) => {}
        }
    }
    failed_creations
}

/// Error returned by a `MediaPlayerAdapter` call.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Player {player_id} is not available for `{operation}`")]
    Unavailable {
        player_id: PlayerId,
        operation: &'static str,
    },
}
