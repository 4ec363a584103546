use crate::bindings::{
    jsCreatePlayer, jsDestroyPlayer, jsGetCurrentTime, jsGetDuration, jsPause, jsPlay, jsSeek,
    jsSetPlaybackRate, jsStartPolling, jsStopPolling, PlayerId, TimerId,
};

use super::{CreatePlayer, MediaPlayerAdapter, PlayerError};

/// `MediaPlayerAdapter` relying on the JavaScript-side to drive the actual YouTube and Twitch
/// embeds.
pub(crate) struct JsPlayerAdapter {
    /// Domain of the page embedding the players, required by Twitch embeds.
    parent_domain: String,

    /// Polling timers currently running, with the player they read from.
    polling_timers: Vec<(PlayerId, TimerId)>,
}

impl JsPlayerAdapter {
    pub(crate) fn new(parent_domain: String) -> Self {
        Self {
            parent_domain,
            polling_timers: vec![],
        }
    }
}

fn check_call(done: bool, player_id: PlayerId, operation: &'static str) -> Result<(), PlayerError> {
    if done {
        Ok(())
    } else {
        Err(PlayerError::Unavailable {
            player_id,
            operation,
        })
    }
}

impl MediaPlayerAdapter for JsPlayerAdapter {
    fn create(&mut self, request: &CreatePlayer) -> Result<(), PlayerError> {
        // The end bound is enforced from the mirrored position, the embed only gets the start.
        let done = jsCreatePlayer(
            request.player_id,
            &request.container,
            request.media.platform(),
            request.media.id(),
            request.trim.start(),
            request.speed.rate(),
            request.autoplay,
            &self.parent_domain,
        );
        check_call(done, request.player_id, "create")
    }

    fn play(&mut self, player_id: PlayerId) -> Result<(), PlayerError> {
        check_call(jsPlay(player_id), player_id, "play")
    }

    fn pause(&mut self, player_id: PlayerId) -> Result<(), PlayerError> {
        check_call(jsPause(player_id), player_id, "pause")
    }

    fn seek(
        &mut self,
        player_id: PlayerId,
        position: f64,
        allow_seek_ahead: bool,
    ) -> Result<(), PlayerError> {
        check_call(
            jsSeek(player_id, position, allow_seek_ahead),
            player_id,
            "seek",
        )
    }

    fn set_speed(&mut self, player_id: PlayerId, rate: f64) -> Result<(), PlayerError> {
        check_call(jsSetPlaybackRate(player_id, rate), player_id, "set_speed")
    }

    fn current_time(&self, player_id: PlayerId) -> Result<f64, PlayerError> {
        jsGetCurrentTime(player_id).ok_or(PlayerError::Unavailable {
            player_id,
            operation: "current_time",
        })
    }

    fn duration(&self, player_id: PlayerId) -> Result<f64, PlayerError> {
        jsGetDuration(player_id).ok_or(PlayerError::Unavailable {
            player_id,
            operation: "duration",
        })
    }

    fn start_polling(&mut self, player_id: PlayerId, interval_ms: u32) -> Result<(), PlayerError> {
        if self.polling_timers.iter().any(|(id, _)| *id == player_id) {
            return Ok(());
        }
        let timer_id = jsStartPolling(player_id, f64::from(interval_ms));
        self.polling_timers.push((player_id, timer_id));
        Ok(())
    }

    fn stop_polling(&mut self, player_id: PlayerId) -> Result<(), PlayerError> {
        self.polling_timers.retain(|(id, timer_id)| {
            if *id == player_id {
                jsStopPolling(*timer_id);
                false
            } else {
                true
            }
        });
        Ok(())
    }

    fn destroy(&mut self, player_id: PlayerId) -> Result<(), PlayerError> {
        // No tick may reach a destroyed player
        self.stop_polling(player_id)?;
        check_call(jsDestroyPlayer(player_id), player_id, "destroy")
    }
}
