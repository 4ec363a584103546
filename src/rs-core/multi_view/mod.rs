use crate::{
    bindings::PlayerId,
    controller::{PlaybackSpeed, TrimBounds},
    identifier::MediaReference,
    player::{CreatePlayer, PlayerCommand},
    wasm_bindgen, Logger,
};

/// One of the two panes of the multi-view page.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Left = 0,
    Right = 1,
}

impl Slot {
    fn index(self) -> usize {
        match self {
            Slot::Left => 0,
            Slot::Right => 1,
        }
    }
}

#[derive(Default)]
struct SlotState {
    /// Channel shown in that slot, `None` if the slot is empty.
    reference: Option<MediaReference>,

    /// Player currently created for that channel.
    player_id: Option<PlayerId>,
}

/// Two Twitch streams shown side by side.
///
/// Both slots are fully independent: loading or clearing one never produces a command for the
/// other.
pub struct DualViewSession {
    slots: [SlotState; 2],

    /// Identifier of the page element each slot's player is created in.
    containers: [String; 2],

    autoplay: bool,

    /// `PlayerId` the next created player will have, shared by both slots.
    next_player_id: PlayerId,
}

impl DualViewSession {
    pub fn new(left_container: String, right_container: String, autoplay: bool) -> Self {
        Self {
            slots: [SlotState::default(), SlotState::default()],
            containers: [left_container, right_container],
            autoplay,
            next_player_id: 0,
        }
    }

    /// Returns the channel currently shown in `slot`, if one.
    pub fn reference(&self, slot: Slot) -> Option<&MediaReference> {
        self.slots[slot.index()].reference.as_ref()
    }

    /// Returns the `PlayerId` of the player currently shown in `slot`, if one.
    pub fn player_id(&self, slot: Slot) -> Option<PlayerId> {
        self.slots[slot.index()].player_id
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    /// Show in `slot` the Twitch channel designated by `input`, a URL or a channel name.
    ///
    /// Does nothing if `input` is empty or if that channel is already shown there.
    pub fn load(&mut self, slot: Slot, input: &str) -> Vec<PlayerCommand> {
        let mut commands = vec![];
        let reference = match MediaReference::twitch(input) {
            Some(reference) => reference,
            None => return commands,
        };
        if self.slots[slot.index()].reference.as_ref() == Some(&reference) {
            return commands;
        }
        self.destroy_player(slot, &mut commands);
        self.create_player(slot, reference, &mut commands);
        commands
    }

    /// Empty `slot`, destroying its player.
    pub fn clear(&mut self, slot: Slot) -> Vec<PlayerCommand> {
        let mut commands = vec![];
        self.destroy_player(slot, &mut commands);
        self.slots[slot.index()].reference = None;
        commands
    }

    /// Exchange the channels shown in both slots.
    ///
    /// Embeds cannot be moved between containers, both players are thus re-created.
    pub fn swap(&mut self) -> Vec<PlayerCommand> {
        let mut commands = vec![];
        if self.slots[0].reference == self.slots[1].reference {
            return commands;
        }
        self.destroy_player(Slot::Left, &mut commands);
        self.destroy_player(Slot::Right, &mut commands);
        let left = self.slots[0].reference.take();
        let right = self.slots[1].reference.take();
        if let Some(reference) = right {
            self.create_player(Slot::Left, reference, &mut commands);
        }
        if let Some(reference) = left {
            self.create_player(Slot::Right, reference, &mut commands);
        }
        commands
    }

    /// Empty the slot showing the player `player_id` if it could not be created.
    pub fn on_create_failed(&mut self, player_id: PlayerId) {
        for state in self.slots.iter_mut() {
            if state.player_id == Some(player_id) {
                Logger::warn(&format!("MultiView: player {} could not be created", player_id));
                *state = SlotState::default();
            }
        }
    }

    fn destroy_player(&mut self, slot: Slot, commands: &mut Vec<PlayerCommand>) {
        if let Some(player_id) = self.slots[slot.index()].player_id.take() {
            Logger::info(&format!(
                "MultiView: destroying player {} of the {:?} slot",
                player_id, slot
            ));
            commands.push(PlayerCommand::Destroy(player_id));
        }
    }

    fn create_player(
        &mut self,
        slot: Slot,
        reference: MediaReference,
        commands: &mut Vec<PlayerCommand>,
    ) {
        let player_id = self.next_player_id;
        self.next_player_id = self.next_player_id.wrapping_add(1);
        Logger::info(&format!(
            "MultiView: showing {} in the {:?} slot (player {})",
            reference, slot, player_id
        ));
        commands.push(PlayerCommand::Create(CreatePlayer {
            player_id,
            container: self.containers[slot.index()].clone(),
            media: reference.clone(),
            trim: TrimBounds::default(),
            speed: PlaybackSpeed::Normal,
            autoplay: self.autoplay,
        }));
        let state = &mut self.slots[slot.index()];
        state.reference = Some(reference);
        state.player_id = Some(player_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_session() -> DualViewSession {
        DualViewSession::new("left".to_string(), "right".to_string(), true)
    }

    fn created(command: &PlayerCommand) -> &CreatePlayer {
        match command {
            PlayerCommand::Create(create) => create,
            cmd => panic!("Unexpected command {:?}", cmd),
        }
    }

    #[test]
    fn test_load_slot() {
        let mut session = new_session();
        let commands = session.load(Slot::Left, "https://twitch.tv/Caedrel");
        assert_eq!(commands.len(), 1);
        let create = created(&commands[0]);
        assert_eq!(create.player_id, 0);
        assert_eq!(create.container, "left");
        assert_eq!(create.media.id(), "Caedrel");
        assert_eq!(session.reference(Slot::Left).map(|r| r.id()), Some("Caedrel"));
        assert_eq!(session.reference(Slot::Right), None);
    }

    #[test]
    fn test_empty_input_is_noop() {
        let mut session = new_session();
        session.load(Slot::Left, "caedrel");
        assert_eq!(session.load(Slot::Left, "   "), vec![]);
        assert_eq!(session.reference(Slot::Left).map(|r| r.id()), Some("caedrel"));
    }

    #[test]
    fn test_same_channel_is_noop() {
        let mut session = new_session();
        session.load(Slot::Right, "caedrel");
        assert_eq!(session.load(Slot::Right, " twitch.tv/caedrel "), vec![]);
        assert_eq!(session.player_id(Slot::Right), Some(0));
    }

    #[test]
    fn test_replace_channel_destroys_first() {
        let mut session = new_session();
        session.load(Slot::Left, "first");
        let commands = session.load(Slot::Left, "second");
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], PlayerCommand::Destroy(0));
        assert_eq!(created(&commands[1]).player_id, 1);
        assert_eq!(created(&commands[1]).media.id(), "second");
    }

    #[test]
    fn test_slots_are_independent() {
        let mut session = new_session();
        session.load(Slot::Left, "first");
        session.load(Slot::Right, "second");
        assert_eq!(session.clear(Slot::Left), vec![PlayerCommand::Destroy(0)]);
        assert_eq!(session.reference(Slot::Left), None);
        assert_eq!(session.player_id(Slot::Right), Some(1));
        assert_eq!(session.reference(Slot::Right).map(|r| r.id()), Some("second"));
        assert_eq!(session.clear(Slot::Left), vec![]);

        let commands = session.load(Slot::Left, "third");
        assert!(commands.iter().all(|c| c.player_id() != 1));
    }

    #[test]
    fn test_create_failure_empties_slot() {
        let mut session = new_session();
        session.load(Slot::Left, "first");
        session.load(Slot::Right, "second");
        session.on_create_failed(1);
        assert_eq!(session.reference(Slot::Right), None);
        assert_eq!(session.player_id(Slot::Left), Some(0));

        let commands = session.load(Slot::Right, "second");
        assert_eq!(commands.len(), 1);
        assert_eq!(created(&commands[0]).player_id, 2);
    }

    #[test]
    fn test_swap() {
        let mut session = new_session();
        session.load(Slot::Left, "first");
        let commands = session.swap();
        assert_eq!(commands[0], PlayerCommand::Destroy(0));
        assert_eq!(commands.len(), 2);
        assert_eq!(created(&commands[1]).container, "right");
        assert_eq!(session.reference(Slot::Left), None);
        assert_eq!(session.reference(Slot::Right).map(|r| r.id()), Some("first"));

        let mut empty = new_session();
        assert_eq!(empty.swap(), vec![]);
    }
}
