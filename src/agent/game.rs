use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::core::{GameConfig, GameRng, Player, PlayerId};
use crate::error::SyncError;
use crate::rules::{check_game_over, GameResult};
use crate::sync::{
    channel, views, AgentEnd, BeginFirstStructure, CardView, DrawStructure, ExhaustDeckStructure,
    ExhaustMinionStructure, FinalGameOverStructure, GameBrief, InterfaceEnd, Interactor, MainMenu,
    MenuResponse, Message, ModifyHealthStructure, ModifyManaStructure, PlayerStructure, QueryKind,
    Requirement,
};
use crate::tasks::{
    CombatTask, DrawTask, ManaMode, MetaData, ModifyManaTask, MulliganTask, NumMode, PlayCardTask,
    SpellTarget, Task,
};
use crate::triggers::TriggerType;

/// Owns the game state and drives the game.
///
/// ## Example
///
/// ```
/// use rust_hearth::agent::GameAgent;
/// use rust_hearth::cards::CardRegistry;
/// use rust_hearth::core::{GameConfig, Hero, Player, PlayerId};
/// use rust_hearth::tasks::{DrawCardTask, MetaData};
///
/// let registry = CardRegistry::basic();
/// let config = GameConfig::default();
/// let hero = |name: &str| Hero::new(registry.find_by_name(name).unwrap());
/// let p1 = Player::new(PlayerId::new(0), "Player 1", hero("Garrosh Hellscream"), Vec::new(), &config);
/// let p2 = Player::new(PlayerId::new(1), "Player 2", hero("Jaina Proudmoore"), Vec::new(), &config);
/// let (mut agent, _interface) = GameAgent::new(p1, p2, config);
///
/// let axe = registry.find_by_name("Fiery War Axe").unwrap();
/// let meta = agent.process(PlayerId::new(0), &mut DrawCardTask::new(axe)).unwrap();
///
/// assert_eq!(meta, MetaData::DrawSuccess);
/// assert_eq!(agent.player(PlayerId::new(0)).hand.len(), 1);
/// ```
#[derive(Debug)]
pub struct GameAgent {
    players: [Player; 2],
    config: GameConfig,
    rng: GameRng,
    end: Arc<AgentEnd>,
    menu: Requirement,
    current: PlayerId,
    turn: u32,
}

impl GameAgent {
    /// Create an agent and the interface end of its channel.
    ///
    /// The players are renumbered 0 and 1 in argument order.
    #[must_use]
    pub fn new(mut player1: Player, mut player2: Player, config: GameConfig) -> (Self, InterfaceEnd) {
        player1.id = PlayerId::new(0);
        player2.id = PlayerId::new(1);

        let (end, interface) = channel(config.buffer_capacity, config.interact_timeout);
        let end = Arc::new(end);
        let agent = Self {
            players: [player1, player2],
            rng: GameRng::new(config.seed),
            menu: Requirement::new(QueryKind::SelectMenu, Arc::clone(&end) as Arc<dyn Interactor>),
            end,
            config,
            current: PlayerId::new(0),
            turn: 0,
        };
        (agent, interface)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The handle tasks use to query the interface.
    #[must_use]
    pub fn interactor(&self) -> Arc<dyn Interactor> {
        Arc::clone(&self.end) as Arc<dyn Interactor>
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Turns started so far.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Run a task with `id` as the acting player.
    pub fn process<T: Task + ?Sized>(&mut self, id: PlayerId, task: &mut T) -> Result<MetaData, SyncError> {
        let (player, opponent) = self.split(id);
        task.run(player, opponent)
    }

    /// Play the game on a new thread.
    pub fn start(mut self) -> Result<JoinHandle<Result<GameResult, SyncError>>, SyncError> {
        let handle = thread::Builder::new()
            .name("game-agent".to_string())
            .spawn(move || self.play())?;
        Ok(handle)
    }

    /// Play the game on the current thread.
    ///
    /// Needs an interface serving the other end of the channel. Returns
    /// `Err` if the channel fails, in which case no game-over frame is sent.
    pub fn play(&mut self) -> Result<GameResult, SyncError> {
        tracing::info!(seed = self.rng.seed(), "game start");
        let result = self.begin().and_then(|()| self.main_loop());
        match &result {
            Ok(outcome) => tracing::info!(?outcome, turns = self.turn, "game over"),
            Err(err) => tracing::error!(%err, turn = self.turn, "agent aborted"),
        }
        result
    }

    fn split(&mut self, id: PlayerId) -> (&mut Player, &mut Player) {
        let [first, second] = &mut self.players;
        if id.index() == 0 {
            (first, second)
        } else {
            (second, first)
        }
    }

    fn notify(&self, message: Message) -> Result<(), SyncError> {
        self.end.notify(&message)
    }

    fn begin(&mut self) -> Result<(), SyncError> {
        let first = if self.rng.coin_flip() {
            PlayerId::new(0)
        } else {
            PlayerId::new(1)
        };
        let last = first.opponent();
        self.current = first;
        self.notify(Message::BeginFirst(BeginFirstStructure {
            first,
            first_name: self.player(first).name.clone(),
            last,
            last_name: self.player(last).name.clone(),
        }))?;

        for id in [first, last] {
            let mut rng = self.rng.for_context(&format!("shuffle-{}", id.0));
            rng.shuffle(&mut self.player_mut(id).deck);
            self.notify(Message::BeginShuffle(PlayerStructure { user_id: id }))?;
        }

        for id in [first, last] {
            let mut draw = DrawTask::new(self.config.begin_draw);
            self.process(id, &mut draw)?;
            let cards = self.last_drawn(id, draw.drawn());
            self.notify(Message::BeginDraw(DrawStructure { user_id: id, cards }))?;
        }

        for id in [first, last] {
            let rng = self.rng.for_context(&format!("mulligan-{}", id.0));
            let mut mulligan = MulliganTask::new(self.interactor(), rng);
            self.process(id, &mut mulligan)?;
            let cards = views(&self.player(id).hand);
            self.notify(Message::MulliganResult(DrawStructure { user_id: id, cards }))?;
        }

        Ok(())
    }

    fn main_loop(&mut self) -> Result<GameResult, SyncError> {
        loop {
            if self.turn >= self.config.max_turns {
                tracing::info!(max_turns = self.config.max_turns, "turn limit reached");
                return self.finish(GameResult::Draw);
            }
            self.turn += 1;
            tracing::info!(turn = self.turn, player = %self.current, "turn start");

            if let Some(result) = self.take_turn()? {
                return self.finish(result);
            }
            self.current = self.current.opponent();
        }
    }

    fn finish(&self, result: GameResult) -> Result<GameResult, SyncError> {
        self.notify(Message::FinalGameOver(FinalGameOverStructure {
            winner: result.winner(),
        }))?;
        Ok(result)
    }

    /// One full turn of the current player. `Some` if the game ended.
    fn take_turn(&mut self) -> Result<Option<GameResult>, SyncError> {
        let id = self.current;

        self.ready(id)?;
        self.draw(id)?;
        if let Some(result) = check_game_over(&self.players) {
            return Ok(Some(result));
        }

        loop {
            let brief = GameBrief::new(self.player(id), self.player(id.opponent()))?;
            self.notify(Message::Brief(brief))?;

            let query = Message::MainMenu(PlayerStructure { user_id: id });
            let menu = self.menu.interact(id, &query)?.decode::<MenuResponse>();
            match menu.map(|response| response.menu) {
                Some(MainMenu::UseCard) => self.use_card(id)?,
                Some(MainMenu::Combat) => self.combat(id)?,
                Some(MainMenu::EndTurn) => break,
                None => {
                    tracing::warn!(player = %id, "no menu choice, ending turn");
                    break;
                }
            }

            self.clear_dead();
            if let Some(result) = check_game_over(&self.players) {
                return Ok(Some(result));
            }
        }

        let player = self.player_mut(id);
        for minion in player.field.minions_mut() {
            minion.notify(TriggerType::TurnEnd);
        }
        player.hero.entity.notify(TriggerType::TurnEnd);
        self.notify(Message::MainEnd(PlayerStructure { user_id: id }))?;
        Ok(None)
    }

    fn ready(&mut self, id: PlayerId) -> Result<(), SyncError> {
        self.process(id, &mut ModifyManaTask::new(NumMode::Add, ManaMode::Total, 1))?;
        let total = self.player(id).total_mana;
        self.process(id, &mut ModifyManaTask::new(NumMode::Set, ManaMode::Exist, total))?;

        let player = self.player_mut(id);
        player.refresh_minions();
        for minion in player.field.minions_mut() {
            minion.notify(TriggerType::TurnStart);
        }
        player.hero.entity.notify(TriggerType::TurnStart);

        self.notify(Message::MainReady(PlayerStructure { user_id: id }))?;
        self.notify_mana(id)
    }

    fn draw(&mut self, id: PlayerId) -> Result<(), SyncError> {
        let mut draw = DrawTask::new(1);
        self.process(id, &mut draw)?;

        let cards = self.last_drawn(id, draw.drawn());
        self.notify(Message::MainDraw(DrawStructure { user_id: id, cards }))?;
        if !draw.burned().is_empty() {
            self.notify(Message::OverDraw(DrawStructure {
                user_id: id,
                cards: views(draw.burned()),
            }))?;
        }
        for &fatigue in draw.fatigue() {
            self.notify(Message::ExhaustDeck(ExhaustDeckStructure { user_id: id, fatigue }))?;
        }
        Ok(())
    }

    fn use_card(&mut self, id: PlayerId) -> Result<(), SyncError> {
        let player = self.player(id);
        if !player.hand.iter().any(|card| card.cost() <= player.exist_mana) {
            tracing::warn!(player = %id, "no playable card");
            return Ok(());
        }

        let mut task = PlayCardTask::new(self.interactor());
        if self.process(id, &mut task)?.is_success() {
            self.notify_mana(id)?;
            if let Some(target) = task.spell_target() {
                self.notify_health(target)?;
            }
        }
        Ok(())
    }

    fn combat(&mut self, id: PlayerId) -> Result<(), SyncError> {
        if !self.player(id).field.minions().any(|(_, minion)| !minion.exhausted) {
            tracing::warn!(player = %id, "no minion can attack");
            return Ok(());
        }

        let mut task = CombatTask::new(self.interactor());
        self.process(id, &mut task)?;
        if let Some(outcome) = task.outcome() {
            self.notify(Message::ExhaustMinion(ExhaustMinionStructure {
                user_id: id,
                card: outcome.attacker.clone(),
            }))?;
            self.notify(Message::ModifyHealth(ModifyHealthStructure {
                user_id: id.opponent(),
                card: outcome.defender.clone(),
            }))?;
            self.notify(Message::ModifyHealth(ModifyHealthStructure {
                user_id: id,
                card: outcome.attacker.clone(),
            }))?;
        }
        Ok(())
    }

    fn notify_mana(&self, id: PlayerId) -> Result<(), SyncError> {
        self.notify(Message::ModifyMana(ModifyManaStructure {
            user_id: id,
            mana: self.player(id).exist_mana,
        }))
    }

    fn notify_health(&self, target: SpellTarget) -> Result<(), SyncError> {
        let (owner, entity) = match target {
            SpellTarget::None => return Ok(()),
            SpellTarget::Hero { owner } => (owner, Some(&self.player(owner).hero.entity)),
            SpellTarget::Minion { owner, position } => (owner, self.player(owner).field.get(position)),
        };
        match entity {
            Some(entity) => self.notify(Message::ModifyHealth(ModifyHealthStructure {
                user_id: owner,
                card: entity.into(),
            })),
            None => Ok(()),
        }
    }

    fn last_drawn(&self, id: PlayerId, drawn: usize) -> Vec<CardView> {
        let hand = &self.player(id).hand;
        views(&hand[hand.len().saturating_sub(drawn)..])
    }

    /// Remove dead minions and empty slots from both fields.
    fn clear_dead(&mut self) {
        for player in &mut self.players {
            for dead in player.field.compact() {
                tracing::debug!(player = %player.id, minion = dead.name(), "destroyed");
            }
        }
    }
}
