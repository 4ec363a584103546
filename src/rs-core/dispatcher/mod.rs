use crate::{
    configuration::EmbedConfiguration, controller::LoopController, multi_view::DualViewSession,
    player::JsPlayerAdapter, wasm_bindgen,
};

mod api;
mod core;
mod event_listeners;

/// The `LoopDispatcher` is the single player interface exported to the JavaScript-side,
/// providing an API to load a YouTube video, restrict it to a range and loop over it.
///
/// It owns the `LoopController` deciding what should be done and the `JsPlayerAdapter`
/// through which those decisions are applied to the actual embed.
#[wasm_bindgen]
pub struct LoopDispatcher {
    config: EmbedConfiguration,

    /// State machine keeping track of the loaded video and of its playback.
    controller: LoopController,

    /// Allows to act on the embedded players, through the JavaScript-side.
    adapter: JsPlayerAdapter,
}

/// The `MultiViewDispatcher` is the interface exported to the JavaScript-side for the page
/// showing two Twitch streams side by side.
#[wasm_bindgen]
pub struct MultiViewDispatcher {
    session: DualViewSession,
    adapter: JsPlayerAdapter,
}
