use wasm_bindgen::JsError;

use crate::{
    configuration::EmbedConfiguration,
    controller::{LoopController, PlaybackSpeed, TrimBounds},
    multi_view::{DualViewSession, Slot},
    player::JsPlayerAdapter,
    utils::time_format::{format_loop_count, format_progress, format_speed},
    wasm_bindgen, Logger,
};

use super::{LoopDispatcher, MultiViewDispatcher};

/// Methods exposed to the JavaScript-side.
///
/// Note that these are not the only methods callable by JavaScript. There's
/// also "event_listeners" which, as its name points at, should be called when particular
/// events happen. Such "event_listeners" are defined in their own file.
#[wasm_bindgen]
impl LoopDispatcher {
    /// Create a new `LoopDispatcher` creating its player in the page element whose id is
    /// `container_id` (`"player"` if not set).
    ///
    /// Fails if `parent_domain`, the domain of the current page, is empty.
    #[wasm_bindgen(constructor)]
    pub fn new(
        parent_domain: String,
        container_id: Option<String>,
    ) -> Result<LoopDispatcher, JsError> {
        let mut config = EmbedConfiguration::new(parent_domain).map_err(|err| {
            Logger::error(&format!("API: Cannot create LoopDispatcher: {}", err));
            err
        })?;
        if let Some(container_id) = container_id {
            config.container_id = container_id;
        }
        let controller = LoopController::new(
            config.container_id.clone(),
            config.autoplay,
            config.poll_interval_ms,
        );
        let adapter = JsPlayerAdapter::new(config.parent_domain.clone());
        Ok(LoopDispatcher {
            config,
            controller,
            adapter,
        })
    }

    /// Load the video designated by `input`, a YouTube URL or video id, restricted to the
    /// range described by the `start` and `end` input fields (whole seconds, empty meaning
    /// respectively the beginning and the end of the video).
    ///
    /// Returns `false` without changing anything if either the video or the range is invalid.
    pub fn load(&mut self, input: &str, start: &str, end: &str) -> bool {
        let res = TrimBounds::parse(start, end)
            .and_then(|trim| self.controller.load_input(input, trim));
        match res {
            Ok(commands) => {
                self.apply(commands);
                true
            }
            Err(err) => {
                Logger::warn(&format!("API: Cannot load `{}`: {}", input, err));
                false
            }
        }
    }

    /// Stop and remove the current player, if one.
    pub fn clear(&mut self) {
        Logger::info("API: clear called");
        let commands = self.controller.clear();
        self.apply(commands);
    }

    pub fn toggle_play(&mut self) {
        let commands = self.controller.toggle_play();
        self.apply(commands);
    }

    /// Move the current position by `delta` seconds, negative values going backward.
    pub fn skip(&mut self, delta: f64) {
        let commands = self.controller.skip(delta);
        self.apply(commands);
    }

    /// Update the playback rate, `1` being the normal speed.
    ///
    /// Returns `false` if `rate` is not one of `available_speeds`.
    pub fn set_speed(&mut self, rate: f64) -> bool {
        match PlaybackSpeed::try_from(rate) {
            Ok(speed) => {
                let commands = self.controller.set_speed(speed);
                self.apply(commands);
                true
            }
            Err(err) => {
                Logger::warn(&format!("API: {}", err));
                false
            }
        }
    }

    pub fn reset_loop_count(&mut self) {
        self.controller.reset_loop_count();
    }

    /// Update the range playback is restricted to, taking effect on the next loop.
    ///
    /// Returns `false` without changing anything if the range is invalid.
    pub fn set_trim_bounds(&mut self, start: &str, end: &str) -> bool {
        match TrimBounds::parse(start, end) {
            Ok(trim) => {
                self.controller.set_trim_bounds(trim);
                true
            }
            Err(err) => {
                Logger::warn(&format!("API: {}", err));
                false
            }
        }
    }

    /// Update the interval, in milliseconds, at which the player's position is read.
    ///
    /// Returns `false` if the interval is `0`.
    pub fn set_poll_interval(&mut self, poll_interval_ms: u32) -> bool {
        match self.config.update_poll_interval(poll_interval_ms) {
            Ok(()) => {
                self.controller.set_poll_interval(poll_interval_ms);
                true
            }
            Err(err) => {
                Logger::warn(&format!("API: {}", err));
                false
            }
        }
    }

    /// Update the id of the page element in which players are created from now on.
    ///
    /// The current player, if one, stays where it is.
    pub fn set_container(&mut self, container_id: String) {
        self.config.container_id = container_id.clone();
        self.controller.set_container(container_id);
    }

    /// If `true`, videos loaded from now on start playing as soon as they can.
    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.config.autoplay = autoplay;
        self.controller.set_autoplay(autoplay);
    }

    pub fn is_playing(&self) -> bool {
        self.controller.state().is_playing()
    }

    pub fn loop_count(&self) -> u32 {
        self.controller.state().loop_count()
    }

    pub fn current_time(&self) -> f64 {
        self.controller.state().current_time()
    }

    pub fn duration(&self) -> f64 {
        self.controller.state().duration()
    }

    pub fn speed(&self) -> f64 {
        self.controller.state().speed().rate()
    }

    /// Every rate `set_speed` accepts, from the slowest to the fastest.
    pub fn available_speeds(&self) -> Vec<f64> {
        PlaybackSpeed::ALL.iter().map(|s| s.rate()).collect()
    }

    /// Id of the loaded YouTube video, if one.
    pub fn video_id(&self) -> Option<String> {
        self.controller.reference().map(|r| r.id().to_owned())
    }

    pub fn trim_start(&self) -> Option<f64> {
        self.controller.trim_bounds().map(|t| t.start())
    }

    pub fn trim_end(&self) -> Option<f64> {
        self.controller.trim_bounds().and_then(|t| t.end())
    }

    /// Current position and duration as displayed, e.g. `"1:05 / 3:32"`.
    pub fn progress_label(&self) -> String {
        let state = self.controller.state();
        format_progress(state.current_time(), state.duration())
    }

    pub fn speed_label(&self) -> String {
        format_speed(self.controller.state().speed())
    }

    pub fn loop_count_label(&self) -> String {
        format_loop_count(self.controller.state().loop_count())
    }
}

#[wasm_bindgen]
impl MultiViewDispatcher {
    /// Create a new `MultiViewDispatcher` creating its players in the page elements whose ids
    /// are `left_container_id` and `right_container_id` (`"stream-left"` and `"stream-right"`
    /// if not set).
    ///
    /// Fails if `parent_domain`, the domain of the current page, is empty.
    #[wasm_bindgen(constructor)]
    pub fn new(
        parent_domain: String,
        left_container_id: Option<String>,
        right_container_id: Option<String>,
    ) -> Result<MultiViewDispatcher, JsError> {
        let config = EmbedConfiguration::new(parent_domain)?;
        let (default_left, default_right) = config.multi_view_containers;
        let session = DualViewSession::new(
            left_container_id.unwrap_or(default_left),
            right_container_id.unwrap_or(default_right),
            config.autoplay,
        );
        Ok(MultiViewDispatcher {
            session,
            adapter: JsPlayerAdapter::new(config.parent_domain),
        })
    }

    /// Show in `slot` the Twitch channel designated by `input`, a channel URL or name.
    ///
    /// Returns `false` if nothing changed, because `input` is empty or because that channel is
    /// already shown there.
    pub fn load(&mut self, slot: Slot, input: &str) -> bool {
        let commands = self.session.load(slot, input);
        let changed = !commands.is_empty();
        self.apply(commands);
        changed
    }

    /// Remove the stream shown in `slot`, if one. The other slot is left untouched.
    pub fn clear(&mut self, slot: Slot) {
        let commands = self.session.clear(slot);
        self.apply(commands);
    }

    /// Exchange the streams shown in both slots.
    pub fn swap(&mut self) {
        let commands = self.session.swap();
        self.apply(commands);
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.session.set_autoplay(autoplay);
    }

    /// Name of the Twitch channel shown in `slot`, if one.
    pub fn channel(&self, slot: Slot) -> Option<String> {
        self.session.reference(slot).map(|r| r.id().to_owned())
    }
}
