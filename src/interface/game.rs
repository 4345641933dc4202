use std::io::{BufRead, Write};

use crate::agent::GameAgent;
use crate::cards::CardType;
use crate::core::PlayerId;
use crate::error::SyncError;
use crate::rules::GameResult;
use crate::sync::{
    wire_count, GameBrief, InterfaceEnd, MainCombatStructure, MainMenu, MainUseCardStructure,
    MenuResponse, Message, MulliganResponse, MulliganStructure, Reply, Response,
    SelectTargetStructure, SpellTargetResponse, TargetType, TargetingStructure, UseCardResponse,
};

use super::console::Console;

/// Whether the message loop goes on after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleStatus {
    Continue,
    Stop,
}

/// The interaction side of a game.
///
/// Reads frames from the agent, renders them to `W` and answers queries
/// from `R`. Answers are range-checked before they are sent; bad input is
/// re-prompted, never forwarded.
#[derive(Debug)]
pub struct GameInterface<R, W> {
    console: Console<R, W>,
    users: [String; 2],
}

impl<R: BufRead, W: Write> GameInterface<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            console: Console::new(input, output),
            users: ["Player 0".to_string(), "Player 1".to_string()],
        }
    }

    pub fn output(&self) -> &W {
        self.console.output()
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    /// Run `agent` on its own thread and serve it until the game is over.
    ///
    /// When either side fails the channel is closed so the other side
    /// stops too, and the root cause is returned: the interface's own
    /// error, or the agent's if the interface only saw it disappear.
    pub fn start_game(&mut self, agent: GameAgent, mut end: InterfaceEnd) -> Result<GameResult, SyncError> {
        let handle = agent.start()?;

        let served = loop {
            match self.handle_message(&mut end) {
                Ok(HandleStatus::Continue) => continue,
                Ok(HandleStatus::Stop) => break Ok(()),
                Err(err) => break Err(err),
            }
        };
        drop(end);

        let played = handle.join().map_err(|_| SyncError::AgentPanicked)?;
        match served {
            Ok(()) => played,
            Err(SyncError::Disconnected) => played.and(Err(SyncError::Disconnected)),
            Err(err) => {
                tracing::error!(%err, "interface aborted");
                Err(err)
            }
        }
    }

    /// Read one frame and dispatch it.
    ///
    /// Returns `Stop` exactly when the frame's step is terminal, whether or
    /// not it could be decoded.
    pub fn handle_message(&mut self, end: &mut InterfaceEnd) -> Result<HandleStatus, SyncError> {
        let incoming = end.read()?;
        let step = incoming.step();
        let status = match step {
            Ok(step) if step.is_terminal() => HandleStatus::Stop,
            _ => HandleStatus::Continue,
        };

        match incoming.message() {
            Ok(message) => {
                tracing::trace!(step = %message.step(), "dispatch");
                self.dispatch(message, incoming.reply)?;
            }
            // Dropping the reply handle answers a query with null.
            Err(err) => tracing::warn!(%err, "undecodable frame"),
        }
        Ok(status)
    }

    fn user(&self, id: PlayerId) -> String {
        self.users.get(id.index()).cloned().unwrap_or_else(|| id.to_string())
    }

    fn dispatch(&mut self, message: Message, reply: Option<Reply<'_>>) -> Result<(), SyncError> {
        match message {
            Message::BeginFirst(data) => {
                for (id, name) in [(data.first, data.first_name), (data.last, data.last_name)] {
                    if let Some(user) = self.users.get_mut(id.index()) {
                        *user = name;
                    }
                }
                self.console.log(&self.user(data.first), format_args!("Begin First"))?;
                self.console.log(&self.user(data.last), format_args!("Begin Last"))
            }
            Message::BeginShuffle(data) => self.console.log(&self.user(data.user_id), format_args!("Begin Shuffle")),
            Message::BeginDraw(data) => {
                self.console.log(&self.user(data.user_id), format_args!("Begin Draw"))?;
                self.console.show_cards(&data.cards)
            }
            Message::BeginMulligan(data) => {
                let response = self.mulligan(&data)?;
                send(reply, &response)
            }
            Message::MulliganResult(data) => {
                self.console.log(&self.user(data.user_id), format_args!("Mulligan Result"))?;
                self.console.show_cards(&data.cards)
            }
            Message::MainReady(data) => self.console.log(&self.user(data.user_id), format_args!("Main Ready")),
            Message::MainDraw(data) => {
                self.console.log(&self.user(data.user_id), format_args!("Main Draw"))?;
                self.console.show_cards(&data.cards)
            }
            Message::MainMenu(data) => {
                self.console.log(&self.user(data.user_id), format_args!("Main Menu"))?;
                let response = self.main_menu()?;
                send(reply, &response)
            }
            Message::MainUseCard(data) => match self.use_card(&data)? {
                Some(response) => send(reply, &response),
                None => Ok(()),
            },
            Message::MainSelectTarget(data) => match self.select_target(&data)? {
                Some(response) => send(reply, &response),
                None => Ok(()),
            },
            Message::MainCombat(data) => match self.combat(&data)? {
                Some(response) => send(reply, &response),
                None => Ok(()),
            },
            Message::MainEnd(data) => self.console.log(&self.user(data.user_id), format_args!("Main End")),
            Message::Brief(data) => self.brief(&data),
            Message::OverDraw(data) => {
                let n = data.cards.len();
                self.console.log(&self.user(data.user_id), format_args!("Over draw {n} cards"))?;
                self.console.show_cards(&data.cards)
            }
            Message::ExhaustDeck(data) => self.console.log(
                &self.user(data.user_id),
                format_args!("Deck exhausted, fatigue {}", data.fatigue),
            ),
            Message::ModifyMana(data) => self.console.log(
                &self.user(data.user_id),
                format_args!("Mana is modified to {}", data.mana),
            ),
            Message::ModifyHealth(data) => {
                let kind = if data.card.card_type == CardType::Minion {
                    "Minion"
                } else {
                    "Hero"
                };
                self.console.log(
                    &self.user(data.user_id),
                    format_args!("Health of {kind} {} is modified to {}", data.card.name, data.card.health),
                )
            }
            Message::ExhaustMinion(data) => self.console.log(
                &self.user(data.user_id),
                format_args!("Minion {} is exhausted.", data.card.name),
            ),
            Message::FinalGameOver(data) => match data.winner {
                Some(winner) => {
                    self.console.log(&self.user(winner), format_args!("Win"))?;
                    self.console.log(&self.user(winner.opponent()), format_args!("Lose"))
                }
                None => {
                    for user in self.users.clone() {
                        self.console.log(&user, format_args!("Draw"))?;
                    }
                    Ok(())
                }
            },
        }
    }

    fn brief(&mut self, data: &GameBrief) -> Result<(), SyncError> {
        let current = self.user(data.current_user);
        let opposite = self.user(data.opposite_user);
        self.console.log(&current, format_args!("Game Briefing"))?;

        self.console.line(format_args!(
            "{opposite} - Hero {}, Health {}, Mana {}, Hand {}",
            data.opposite_hero.name, data.opposite_hero.health, data.opposite_mana, data.num_opposite_hand
        ))?;
        self.console.line(format_args!("{opposite} Field"))?;
        self.console.show_cards(&data.opposite_field)?;

        self.console.line(format_args!(
            "{current} - Hero {}, Health {}, Mana {}, Hand {}",
            data.current_hero.name,
            data.current_hero.health,
            data.current_mana,
            data.current_hand.len()
        ))?;
        self.console.line(format_args!("{current} Field"))?;
        self.console.show_cards(&data.current_field)?;
        self.console.line(format_args!("{current} Hand"))?;
        self.console.show_cards(&data.current_hand)
    }

    fn mulligan(&mut self, data: &MulliganStructure) -> Result<MulliganResponse, SyncError> {
        self.console.log(&self.user(data.user_id), format_args!("Begin Mulligan"))?;
        self.console.show_cards(&data.hand)?;

        let size = data.hand.len();
        let count = self.console.read_index(
            format_args!("[*] How many cards to mulligan ? (0 ~ {size}) "),
            0..=size,
        )?;

        let mut indices = Vec::with_capacity(count);
        while indices.len() < count {
            let index = self.console.read_index(
                format_args!("[*] Input card index {} (0 ~ {}) : ", indices.len() + 1, size - 1),
                0..=size - 1,
            )?;
            let index = wire_count("card index", index)?;
            if indices.contains(&index) {
                self.console.line(format_args!("Already selected."))?;
            } else {
                indices.push(index);
            }
        }
        Ok(MulliganResponse { indices })
    }

    fn main_menu(&mut self) -> Result<MenuResponse, SyncError> {
        for (number, menu) in MainMenu::ALL.iter().enumerate() {
            self.console.line(format_args!("{}. {}", number + 1, menu.label()))?;
        }
        let choice = self
            .console
            .read_index(format_args!("[*] Input menu : "), 1..=MainMenu::ALL.len())?;
        Ok(MenuResponse {
            menu: MainMenu::ALL[choice - 1],
        })
    }

    /// `None` when nothing in the hand can be played.
    fn use_card(&mut self, data: &MainUseCardStructure) -> Result<Option<UseCardResponse>, SyncError> {
        self.console.log(&self.user(data.user_id), format_args!("Main Use Card"))?;
        self.console.show_cards(&data.hand)?;

        if !data.hand.iter().any(|card| card.cost <= data.exist_mana) {
            self.console.line(format_args!("Not enough mana"))?;
            return Ok(None);
        }

        let last = data.hand.len() - 1;
        let index = loop {
            let index = self
                .console
                .read_index(format_args!("Select card index (0 ~ {last}) : "), 0..=last)?;
            if data.hand[index].cost > data.exist_mana {
                self.console.line(format_args!("Not enough mana"))?;
            } else {
                break index;
            }
        };

        let position = if data.hand[index].card_type == CardType::Minion {
            let fields = usize::from(data.num_fields);
            let position = self
                .console
                .read_index(format_args!("Select Position (0 ~ {fields}) : "), 0..=fields)?;
            Some(wire_count("position", position)?)
        } else {
            None
        };

        Ok(Some(UseCardResponse {
            card_index: wire_count("card index", index)?,
            position,
        }))
    }

    fn select_target(&mut self, data: &SelectTargetStructure) -> Result<Option<SpellTargetResponse>, SyncError> {
        self.console.log(&self.user(data.user_id), format_args!("Main Select Target"))?;
        self.console.show_cards(std::slice::from_ref(&data.spell))?;
        self.console.line(format_args!("My field : "))?;
        self.console.show_slots(&data.my_field)?;
        self.console.line(format_args!("Opponent field : "))?;
        self.console.show_slots(&data.opposite_field)?;

        // "None" is offered only to spells without effects.
        const LABELS: [&str; 5] = ["None", "My Field", "My Hero", "Opponent Field", "Opponent Hero"];
        let first = usize::from(data.needs_target);
        for (number, label) in LABELS.iter().enumerate().skip(first) {
            self.console.line(format_args!("{number}. {label}"))?;
        }

        loop {
            let last = TargetType::ALL.len() - 1;
            let choice = self
                .console
                .read_index(format_args!("Select target type ({first} ~ {last}) : "), first..=last)?;
            let target_type = TargetType::ALL[choice];
            if !target_type.uses_position() {
                return Ok(Some(SpellTargetResponse {
                    target_type,
                    position: 0,
                }));
            }

            let slots = if target_type == TargetType::MyField {
                &data.my_field
            } else {
                &data.opposite_field
            };
            if slots.iter().all(Option::is_none) {
                self.console.line(format_args!("No minion to target."))?;
                continue;
            }

            let last = slots.len() - 1;
            let position = loop {
                let position = self
                    .console
                    .read_index(format_args!("Select position (0 ~ {last}) : "), 0..=last)?;
                if slots[position].is_some() {
                    break position;
                }
                self.console.line(format_args!("Empty slot."))?;
            };
            return Ok(Some(SpellTargetResponse {
                target_type,
                position: wire_count("position", position)?,
            }));
        }
    }

    /// `None` when no friendly minion can attack.
    fn combat(&mut self, data: &MainCombatStructure) -> Result<Option<TargetingStructure>, SyncError> {
        self.console.log(&self.user(data.user_id), format_args!("Main Combat"))?;
        self.console.line(format_args!("User field : "))?;
        self.console.show_cards(&data.current_field)?;
        self.console.line(format_args!("Opponent field : "))?;
        self.console.show_cards(&data.opposite_field)?;

        let sources = data.current_field.len();
        let attacked =
            |source: usize| u8::try_from(source).is_ok_and(|source| data.attacked.contains(&source));
        if (0..sources).all(attacked) {
            self.console.line(format_args!("No minion can attack."))?;
            return Ok(None);
        }

        let last = sources - 1;
        let source = loop {
            let source = self
                .console
                .read_index(format_args!("Select source minion (0 ~ {last}) : "), 0..=last)?;
            if attacked(source) {
                self.console.line(format_args!("Already attacked minion."))?;
            } else {
                break source;
            }
        };

        let targets = data.opposite_field.len();
        let destination = self.console.read_index(
            format_args!("Select destination (0 for hero, 1 ~ {targets} for minion) : "),
            0..=targets,
        )?;

        Ok(Some(TargetingStructure {
            source: wire_count("source", source)?,
            destination: wire_count("destination", destination)?,
        }))
    }
}

/// Answer a query; a frame without a reply handle is not a query.
fn send<R: Response>(reply: Option<Reply<'_>>, response: &R) -> Result<(), SyncError> {
    match reply {
        Some(reply) => reply.send(response),
        None => {
            tracing::warn!(kind = ?R::KIND, "response to a frame that expects none");
            Ok(())
        }
    }
}
