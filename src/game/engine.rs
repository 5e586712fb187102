//! The game engine.
//!
//! `Game` exclusively owns all mutable state: the player, both decks, the
//! hand, the locations, the clock and the history. Every public operation
//! either completes and leaves a valid next state, or returns a `Rejection`
//! and leaves the game exactly as it was.
//!
//! ## Turn Flow
//!
//! 1. `play` resolves an action against a freshly drawn opposing card and
//!    credits its outcome. The result stays pending.
//! 2. `fate_rewind` may replace a failed pending result once.
//! 3. `end_turn` commits the pending record, discards, refills the hand,
//!    applies end-of-turn passives and advances the clock.
//!
//! At most one result is pending at a time.
//!
//! ```
//! use deckbound::core::{Difficulty, Settings};
//! use deckbound::game::Game;
//! use deckbound::player::PlayerClass;
//! use deckbound::resolve::ActionKind;
//!
//! let mut game = Game::new(Settings::default(), PlayerClass::Warrior, Difficulty::Normal, 7);
//! let first = game.hand()[0].id;
//!
//! game.play(ActionKind::Train, &[first]).unwrap();
//! game.end_turn().unwrap();
//! assert_eq!(game.history().len(), 1);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use super::scoring::{final_score, ScoreBreakdown};
use super::snapshot::GameSnapshot;
use crate::cards::{Card, CardId, DeckPile, Suit};
use crate::core::{Difficulty, GameRng, Settings};
use crate::locations::{default_locations, AdventureLocation, LocationId, NodeModifier, Progress};
use crate::persistence::LeaderboardEntry;
use crate::player::{ledger, ItemKind, LedgerEvent, PlayerClass, PlayerState, StatKind};
use crate::rejection::Rejection;
use crate::resolve::{reresolve, resolve, ActionKind, Resolution, ResolveInput, TurnRecord, SUIT_MATCH_BONUS};
use crate::schedule::{ClockTick, RoundClock};

/// First card id of the player deck.
pub const PLAYER_DECK_FIRST_ID: u32 = 0;

/// First card id of the dungeon deck.
pub const DUNGEON_DECK_FIRST_ID: u32 = 1_000_000;

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every location cleared.
    Victory,
    /// Health reached 0.
    Defeat,
    /// Ran out of rounds alive.
    Survived,
}

impl GameOutcome {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GameOutcome::Victory => "Victory",
            GameOutcome::Defeat => "Defeat",
            GameOutcome::Survived => "Survived",
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The resolved but not yet confirmed action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Cards played, in selection order. Out of the hand until confirmed.
    pub cards: Vec<Card>,
    pub opponent: Card,
    /// The opposing value with every adjustment baked in.
    pub opponent_value: i64,
    pub resolution: Resolution,
    /// Committed to history on `end_turn`.
    pub pending_record: TurnRecord,
    pub rewind_used: bool,
    /// Location movement caused by this result.
    pub progress: Option<Progress>,
}

impl TurnResult {
    /// Fate rewind is available for a failure that was not rewound yet.
    #[must_use]
    pub fn can_rewind(&self) -> bool {
        !self.rewind_used && !self.resolution.success
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.resolution.message
    }
}

/// A single-player game.
#[derive(Clone, Debug)]
pub struct Game {
    settings: Settings,
    difficulty: Difficulty,
    player_rng: GameRng,
    dungeon_rng: GameRng,
    player_deck: DeckPile,
    dungeon_deck: DeckPile,
    hand: Vec<Card>,
    player: PlayerState,
    locations: Vec<AdventureLocation>,
    clock: RoundClock,
    history: Vector<TurnRecord>,
    pending: Option<TurnResult>,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Start a game on the built-in map.
    #[must_use]
    pub fn new(settings: Settings, class: PlayerClass, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_locations(settings, class, difficulty, seed, default_locations())
    }

    /// Start a game on a custom map.
    #[must_use]
    pub fn with_locations(
        settings: Settings,
        class: PlayerClass,
        difficulty: Difficulty,
        seed: u64,
        locations: Vec<AdventureLocation>,
    ) -> Self {
        let root = GameRng::new(seed);
        let mut player_rng = root.for_context("player-deck");
        let mut dungeon_rng = root.for_context("dungeon-deck");

        let mut player_deck = DeckPile::new(PLAYER_DECK_FIRST_ID, &mut player_rng);
        let dungeon_deck = DeckPile::new(DUNGEON_DECK_FIRST_ID, &mut dungeon_rng);
        let hand = player_deck.draw(settings.hand_size, &mut player_rng);
        let player = PlayerState::new(class, &settings);

        info!(class = %class, difficulty = %difficulty, seed, "new game");

        Self {
            settings,
            difficulty,
            player_rng,
            dungeon_rng,
            player_deck,
            dungeon_deck,
            hand,
            player,
            locations,
            clock: RoundClock::new(),
            history: Vector::new(),
            pending: None,
            outcome: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    #[must_use]
    pub fn locations(&self) -> &[AdventureLocation] {
        &self.locations
    }

    #[must_use]
    pub fn location(&self, id: LocationId) -> Option<&AdventureLocation> {
        self.locations.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn clock(&self) -> RoundClock {
        self.clock
    }

    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    #[must_use]
    pub fn pending(&self) -> Option<&TurnResult> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn player_deck(&self) -> &DeckPile {
        &self.player_deck
    }

    #[must_use]
    pub fn dungeon_deck(&self) -> &DeckPile {
        &self.dungeon_deck
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        final_score(&self.player, self.difficulty)
    }

    #[must_use]
    pub fn score_breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown::of(&self.player)
    }

    /// Actions that can be played right now.
    ///
    /// Empty while a result is pending or once the game is over.
    #[must_use]
    pub fn available_actions(&self) -> Vec<ActionKind> {
        if self.is_over() || self.pending.is_some() {
            return Vec::new();
        }
        ActionKind::SELF_ACTIONS
            .into_iter()
            .chain(
                self.locations
                    .iter()
                    .filter(|l| !l.is_cleared())
                    .map(|l| ActionKind::Explore(l.id)),
            )
            .collect()
    }

    // === Turn flow ===

    /// Spend the selected cards on an action.
    pub fn play(&mut self, action: ActionKind, selection: &[CardId]) -> Result<&TurnResult, Rejection> {
        self.ensure_running()?;
        if self.pending.is_some() {
            return Err(Rejection::ResolutionPending);
        }
        if selection.is_empty() {
            return Err(Rejection::NoCardsSelected);
        }
        let cards = self.selected_cards(selection)?;

        let (stat, preferred_suit, modifier) = self.action_context(action)?;
        if let Some(limit) = modifier.as_ref().and_then(NodeModifier::card_limit) {
            if cards.len() > limit {
                return Err(Rejection::TooManyCards { limit });
            }
        }

        let extra = cards.len().saturating_sub(self.settings.free_cards_per_play) as i64;
        let mut player = if extra > 0 {
            let cost = extra * self.settings.mana_cost_per_extra_card;
            ledger::charge_mana(&self.player, cost)?
        } else {
            self.player.clone()
        };

        // All checks passed; from here on the game changes.
        let opponent = self.dungeon_deck.draw_one(&mut self.dungeon_rng);

        let mut stat_bonus = player.stat_bonus(stat);
        if stat == StatKind::Might && player.has_item(ItemKind::Whetstone) {
            stat_bonus += 1;
        }
        let mut suit_bonus = 0;
        if cards.iter().any(|c| c.suit == preferred_suit) {
            suit_bonus = SUIT_MATCH_BONUS;
            if player.has_item(ItemKind::LuckyCharm) {
                suit_bonus += 1;
            }
        }

        let resolution = resolve(&ResolveInput {
            cards: &cards,
            opponent,
            action,
            stat_bonus,
            suit_bonus,
            modifier: modifier.as_ref(),
            auto_crit: player.effects.auto_crit,
            damage_block: player.effects.damage_block,
            difficulty: self.difficulty,
            alignment: player.alignment,
            good_threshold: self.settings.good_threshold,
        });

        player = ledger::credit_resolution(&player, &resolution);
        let progress = self.apply_progress(&mut player, &resolution, cards.first());
        self.player = player;
        self.hand.retain(|card| !selection.contains(&card.id));

        let pending_record = resolution.record(self.clock.round, self.clock.turn);
        self.pending = Some(TurnResult {
            opponent_value: resolution.opponent_value,
            cards: cards.into_vec(),
            opponent,
            resolution,
            pending_record,
            rewind_used: false,
            progress,
        });

        self.check_game_over();
        self.pending.as_ref().ok_or(Rejection::NothingPending)
    }

    /// Re-resolve a failed pending result against a new opposing card.
    pub fn fate_rewind(&mut self) -> Result<&TurnResult, Rejection> {
        self.ensure_running()?;
        let pending = self.pending.as_ref().ok_or(Rejection::NothingPending)?;
        if !pending.can_rewind() {
            return Err(Rejection::RewindUnavailable);
        }

        let paid = ledger::charge_mana(&self.player, self.settings.fate_rewind_cost)?;
        let mut player = ledger::revert_failure(&paid, &pending.resolution);
        let previous = pending.resolution.clone();
        let first_card = pending.cards.first().copied();
        let old_opponent = pending.opponent;

        self.dungeon_deck.discard([old_opponent]);
        let opponent = self.dungeon_deck.draw_one(&mut self.dungeon_rng);

        let resolution = reresolve(
            &previous,
            &opponent,
            self.difficulty,
            player.effects.damage_block,
            player.alignment,
            self.settings.good_threshold,
        );
        player = ledger::credit_resolution(&player, &resolution);
        let progress = self.apply_progress(&mut player, &resolution, first_card.as_ref());
        self.player = player;

        let record = resolution.record(self.clock.round, self.clock.turn);
        if let Some(pending) = self.pending.as_mut() {
            pending.opponent = opponent;
            pending.opponent_value = resolution.opponent_value;
            pending.resolution = resolution;
            pending.pending_record = record;
            pending.rewind_used = true;
            pending.progress = progress;
        }

        self.check_game_over();
        self.pending.as_ref().ok_or(Rejection::NothingPending)
    }

    /// Confirm the pending result (if any) and move to the next turn.
    ///
    /// Ending a turn with nothing pending is a pass.
    pub fn end_turn(&mut self) -> Result<ClockTick, Rejection> {
        self.ensure_running()?;

        self.commit_pending();
        self.refill_hand();

        self.player = ledger::end_of_turn(&self.player, &self.settings);
        let tick = self.clock.advance(&self.settings);
        if tick.new_round {
            self.player = ledger::start_round(&self.player);
        }

        self.check_game_over();
        if self.outcome.is_none() && tick.expired {
            self.finish(GameOutcome::Survived);
        }
        Ok(tick)
    }

    // === Ledger ===

    /// Apply a player-initiated ledger event.
    ///
    /// `Mulligan` and `TimeWarp` are routed to their engine operations.
    pub fn apply_event(&mut self, event: LedgerEvent) -> Result<(), Rejection> {
        match event {
            LedgerEvent::Mulligan => self.mulligan(),
            LedgerEvent::TimeWarp => self.time_warp(),
            other => {
                self.ensure_standing()?;
                self.player = ledger::apply(&self.player, &other, &self.settings).map_err(|rejection| {
                    debug!(event = ?other, %rejection, "event rejected");
                    rejection
                })?;
                Ok(())
            }
        }
    }

    /// Pay to replace the whole hand.
    pub fn mulligan(&mut self) -> Result<(), Rejection> {
        self.ensure_running()?;
        if self.pending.is_some() {
            return Err(Rejection::ResolutionPending);
        }
        self.player = ledger::apply(&self.player, &LedgerEvent::Mulligan, &self.settings)?;

        let old = std::mem::take(&mut self.hand);
        self.player_deck.discard(old);
        self.hand = self.player_deck.draw(self.settings.hand_size, &mut self.player_rng);
        Ok(())
    }

    /// Pay to refund one turn of the current round.
    pub fn time_warp(&mut self) -> Result<(), Rejection> {
        self.ensure_standing()?;
        if self.clock.turn <= 1 {
            return Err(Rejection::NoTurnToRefund);
        }
        self.player = ledger::apply(&self.player, &LedgerEvent::TimeWarp, &self.settings)?;
        self.clock.rewind_turn()?;
        info!(round = self.clock.round, turn = self.clock.turn, "time warp");
        Ok(())
    }

    /// Leaderboard entry for a finished game. `None` while still running.
    #[must_use]
    pub fn summary(&self, player_name: &str) -> Option<LeaderboardEntry> {
        let outcome = self.outcome?;
        Some(LeaderboardEntry {
            player_name: player_name.to_string(),
            class: self.player.class,
            difficulty: self.difficulty,
            score: self.score(),
            outcome,
            scoring: self.player.scoring,
            breakdown: self.score_breakdown(),
            history: self.history.iter().cloned().collect(),
        })
    }

    // === Snapshots ===

    /// Read-only view of the whole game.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            settings: self.settings.clone(),
            difficulty: self.difficulty,
            player: self.player.clone(),
            hand: self.hand.clone(),
            player_deck: self.player_deck.clone(),
            dungeon_deck: self.dungeon_deck.clone(),
            player_rng: self.player_rng.state(),
            dungeon_rng: self.dungeon_rng.state(),
            locations: self.locations.clone(),
            clock: self.clock,
            history: self.history.clone(),
            pending: self.pending.clone(),
            outcome: self.outcome,
            score: self.score(),
        }
    }

    /// Resume a game from a snapshot.
    #[must_use]
    pub fn restore(snapshot: GameSnapshot) -> Self {
        Self {
            player_rng: GameRng::from_state(&snapshot.player_rng),
            dungeon_rng: GameRng::from_state(&snapshot.dungeon_rng),
            settings: snapshot.settings,
            difficulty: snapshot.difficulty,
            player_deck: snapshot.player_deck,
            dungeon_deck: snapshot.dungeon_deck,
            hand: snapshot.hand,
            player: snapshot.player,
            locations: snapshot.locations,
            clock: snapshot.clock,
            history: snapshot.history,
            pending: snapshot.pending,
            outcome: snapshot.outcome,
        }
    }

    // === Internals ===

    fn ensure_running(&self) -> Result<(), Rejection> {
        if self.is_over() {
            return Err(Rejection::GameOver);
        }
        Ok(())
    }

    /// Running and not waiting on a deferred defeat.
    fn ensure_standing(&self) -> Result<(), Rejection> {
        self.ensure_running()?;
        if self.player.is_defeated() {
            return Err(Rejection::Downed);
        }
        Ok(())
    }

    /// A lethal failure that fate rewind can still undo.
    fn defeat_deferred(&self) -> bool {
        self.pending.as_ref().map_or(false, TurnResult::can_rewind)
            && self.player.resources.mana >= self.settings.fate_rewind_cost
    }

    /// Look up the selection in the hand, keeping selection order.
    fn selected_cards(&self, selection: &[CardId]) -> Result<SmallVec<[Card; 8]>, Rejection> {
        let mut cards: SmallVec<[Card; 8]> = SmallVec::with_capacity(selection.len());
        for (i, id) in selection.iter().enumerate() {
            if selection[..i].contains(id) {
                return Err(Rejection::CardNotInHand(*id));
            }
            let card = self
                .hand
                .iter()
                .find(|c| c.id == *id)
                .ok_or(Rejection::CardNotInHand(*id))?;
            cards.push(*card);
        }
        Ok(cards)
    }

    /// Stat, preferred suit and active modifier for an action.
    fn action_context(
        &self,
        action: ActionKind,
    ) -> Result<(StatKind, Suit, Option<NodeModifier>), Rejection> {
        let context = match action {
            ActionKind::Rest => (StatKind::Spirit, Suit::Hearts, None),
            ActionKind::Train => (StatKind::Might, Suit::Clubs, None),
            ActionKind::Loot => (StatKind::Agility, Suit::Diamonds, None),
            ActionKind::Study => (StatKind::Wisdom, Suit::Spades, None),
            ActionKind::Explore(id) => {
                let location = self.location(id).ok_or(Rejection::UnknownLocation(id))?;
                if location.is_cleared() {
                    return Err(Rejection::LocationCleared(id));
                }
                (
                    location.stat_attribute,
                    location.preferred_suit,
                    location.active_modifier().cloned(),
                )
            }
        };
        Ok(context)
    }

    /// Advance the explored location after a success and grant its reward.
    fn apply_progress(
        &mut self,
        player: &mut PlayerState,
        resolution: &Resolution,
        first_card: Option<&Card>,
    ) -> Option<Progress> {
        let id = resolution.action.location()?;
        if !resolution.success {
            return None;
        }
        let location = self.locations.iter_mut().find(|l| l.id == id)?;
        let progress = location.advance(resolution.rewards.explore_steps, first_card);
        if let Some(reward) = &progress.reward {
            *player = ledger::grant_completion(player, reward, &self.settings);
        }
        Some(progress)
    }

    fn commit_pending(&mut self) {
        if let Some(result) = self.pending.take() {
            self.history.push_back(result.pending_record);
            self.player_deck.discard(result.cards);
            self.dungeon_deck.discard([result.opponent]);
        }
    }

    fn refill_hand(&mut self) {
        let missing = self.settings.hand_size.saturating_sub(self.hand.len());
        if missing > 0 {
            let drawn = self.player_deck.draw(missing, &mut self.player_rng);
            self.hand.extend(drawn);
        }
    }

    fn check_game_over(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        if self.player.is_defeated() {
            if !self.defeat_deferred() {
                self.finish(GameOutcome::Defeat);
            }
        } else if !self.locations.is_empty() && self.locations.iter().all(AdventureLocation::is_cleared) {
            self.finish(GameOutcome::Victory);
        }
    }

    /// End the game. A still pending record goes straight into history; the
    /// result itself stays visible as the final one.
    fn finish(&mut self, outcome: GameOutcome) {
        if let Some(result) = &self.pending {
            self.history.push_back(result.pending_record.clone());
        }
        self.outcome = Some(outcome);
        info!(outcome = %outcome, score = self.score(), round = self.clock.round, "game over");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;
    use crate::locations::{CompletionReward, Encounter};

    fn game() -> Game {
        Game::new(Settings::default(), PlayerClass::Warrior, Difficulty::Normal, 42)
    }

    fn one_room(id: u16) -> AdventureLocation {
        AdventureLocation::new(
            LocationId::new(id),
            "Closet",
            StatKind::Might,
            Suit::Clubs,
            vec![Encounter::new(format!("closet-{}", id), "Closet")],
            CompletionReward::Gold(3),
        )
    }

    #[test]
    fn test_new_game() {
        let game = game();
        assert_eq!(game.hand().len(), 5);
        assert_eq!(game.player_deck().total_cards(), 47);
        assert_eq!(game.dungeon_deck().total_cards(), 52);
        assert_eq!(game.clock(), RoundClock { round: 1, turn: 1 });
        assert_eq!(game.locations().len(), 4);
        assert!(game.outcome().is_none());
        assert_eq!(game.available_actions().len(), 8);
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = game();
        let b = game();
        assert_eq!(a.hand(), b.hand());
        assert_eq!(a.dungeon_deck(), b.dungeon_deck());
    }

    #[test]
    fn test_play_then_end_turn() {
        let mut game = game();
        let id = game.hand()[0].id;

        let result = game.play(ActionKind::Train, &[id]).unwrap();
        assert_eq!(result.cards.len(), 1);
        assert_eq!(result.pending_record.action, "train");
        assert_eq!(game.hand().len(), 4);
        assert!(game.available_actions().is_empty());

        let next = game.hand()[0].id;
        assert_eq!(game.play(ActionKind::Train, &[next]).unwrap_err(), Rejection::ResolutionPending);

        game.end_turn().unwrap();
        assert_eq!(game.hand().len(), 5);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.clock().turn, 2);
        assert!(game.pending().is_none());
        assert_eq!(game.player_deck().total_cards() + game.hand().len(), 52);
    }

    #[test]
    fn test_selection_rejections() {
        let mut game = game();
        assert_eq!(game.play(ActionKind::Rest, &[]).unwrap_err(), Rejection::NoCardsSelected);

        let missing = CardId::new(999_999);
        assert_eq!(game.play(ActionKind::Rest, &[missing]).unwrap_err(), Rejection::CardNotInHand(missing));

        let id = game.hand()[0].id;
        assert_eq!(game.play(ActionKind::Rest, &[id, id]).unwrap_err(), Rejection::CardNotInHand(id));

        let nowhere = LocationId::new(99);
        assert_eq!(
            game.play(ActionKind::Explore(nowhere), &[id]).unwrap_err(),
            Rejection::UnknownLocation(nowhere)
        );
        assert!(game.pending().is_none());
        assert_eq!(game.hand().len(), 5);
    }

    #[test]
    fn test_extra_cards_cost_mana() {
        let mut game = game();
        let ids: Vec<CardId> = game.hand().iter().map(|c| c.id).collect();
        let mana = game.player().resources.mana;

        game.play(ActionKind::Rest, &ids).unwrap();
        let spent = mana - game.player().resources.mana + game.pending().unwrap().resolution.rewards.mana;
        assert_eq!(spent, 2);
    }

    #[test]
    fn test_extra_cards_need_mana() {
        let mut game = game();
        game.player.resources.mana = 1;
        let ids: Vec<CardId> = game.hand().iter().map(|c| c.id).collect();

        let err = game.play(ActionKind::Rest, &ids).unwrap_err();
        assert_eq!(err, Rejection::InsufficientMana { needed: 2, available: 1 });
        assert_eq!(game.hand().len(), 5);
        assert_eq!(game.dungeon_deck().total_cards(), 52);
    }

    #[test]
    fn test_max_cards_modifier() {
        let closet = AdventureLocation::new(
            LocationId::new(1),
            "Crawlspace",
            StatKind::Agility,
            Suit::Diamonds,
            vec![Encounter::new("crawl", "Crawlspace").with_modifier(NodeModifier::MaxCards(1))],
            CompletionReward::Xp(1),
        );
        let mut game = Game::with_locations(Settings::default(), PlayerClass::Rogue, Difficulty::Normal, 3, vec![closet]);
        let ids: Vec<CardId> = game.hand()[..2].iter().map(|c| c.id).collect();

        let err = game.play(ActionKind::Explore(LocationId::new(1)), &ids).unwrap_err();
        assert_eq!(err, Rejection::TooManyCards { limit: 1 });
    }

    #[test]
    fn test_auto_crit_clears_location_and_wins() {
        let mut game = Game::with_locations(
            Settings::default(),
            PlayerClass::Rogue,
            Difficulty::Normal,
            11,
            vec![one_room(1)],
        );
        game.player.effects.auto_crit = true;
        let id = game.hand()[0].id;

        game.play(ActionKind::Explore(LocationId::new(1)), &[id]).unwrap();
        assert!(game.locations()[0].is_cleared());
        assert_eq!(game.player().locations_cleared, 1);
        assert!(!game.player().effects.auto_crit);
        assert_eq!(game.outcome(), Some(GameOutcome::Victory));
        // the final record is committed on game over
        assert_eq!(game.history().len(), 1);
        assert!(game.pending().is_some());
        assert_eq!(game.end_turn().unwrap_err(), Rejection::GameOver);
    }

    #[test]
    fn test_defeat() {
        let mut game = game();
        game.player.resources.health = 1;
        game.player.resources.mana = 0;
        // force a failure with the weakest card against the strongest draw
        game.hand = vec![Card::new(CardId::new(500), Suit::Spades, Rank::Ace)];
        game.dungeon_deck = DeckPile::from_parts(
            vec![Card::new(CardId::new(1_000_500), Suit::Hearts, Rank::King)],
            Vec::new(),
            2_000_000,
        );

        game.play(ActionKind::Study, &[CardId::new(500)]).unwrap();
        assert_eq!(game.outcome(), Some(GameOutcome::Defeat));
        assert!(game.available_actions().is_empty());
    }

    #[test]
    fn test_defeat_deferred_while_rewindable() {
        let mut game = game();
        game.player.resources.health = 1;
        game.player.items.push_back(ItemKind::HealingDraught);
        game.hand = vec![Card::new(CardId::new(500), Suit::Spades, Rank::Ace)];
        game.dungeon_deck = DeckPile::from_parts(
            vec![
                Card::new(CardId::new(1_000_500), Suit::Hearts, Rank::King),
                Card::new(CardId::new(1_000_501), Suit::Hearts, Rank::Queen),
            ],
            Vec::new(),
            2_000_000,
        );

        game.play(ActionKind::Study, &[CardId::new(500)]).unwrap();
        assert!(game.player().is_defeated());
        assert_eq!(game.outcome(), None);
        assert_eq!(game.apply_event(LedgerEvent::UseItem(0)).unwrap_err(), Rejection::Downed);
        assert_eq!(game.time_warp().unwrap_err(), Rejection::Downed);

        game.end_turn().unwrap();
        assert_eq!(game.outcome(), Some(GameOutcome::Defeat));
    }

    #[test]
    fn test_fate_rewind_once() {
        let mut game = game();
        game.player.resources.mana = 10;
        game.hand = vec![Card::new(CardId::new(500), Suit::Spades, Rank::Ace)];
        game.dungeon_deck = DeckPile::from_parts(
            vec![
                Card::new(CardId::new(1_000_500), Suit::Hearts, Rank::King),
                Card::new(CardId::new(1_000_501), Suit::Hearts, Rank::Queen),
            ],
            Vec::new(),
            2_000_000,
        );

        let result = game.play(ActionKind::Study, &[CardId::new(500)]).unwrap();
        assert!(!result.resolution.success);
        let damage = result.resolution.damage;
        assert_eq!(game.player().damage_taken, damage);

        let result = game.fate_rewind().unwrap();
        assert!(result.rewind_used);
        assert_eq!(result.opponent.id, CardId::new(1_000_501));
        let damage_after = result.resolution.damage;
        assert_eq!(game.player().damage_taken, damage_after);
        assert_eq!(game.player().resources.mana, 10 - 2);

        assert_eq!(game.fate_rewind().unwrap_err(), Rejection::RewindUnavailable);
    }

    #[test]
    fn test_rewind_requires_pending_failure() {
        let mut game = game();
        assert_eq!(game.fate_rewind().unwrap_err(), Rejection::NothingPending);

        game.player.effects.auto_crit = true;
        let id = game.hand()[0].id;
        game.play(ActionKind::Loot, &[id]).unwrap();
        assert_eq!(game.fate_rewind().unwrap_err(), Rejection::RewindUnavailable);
    }

    #[test]
    fn test_mulligan() {
        let mut game = game();
        let before: Vec<CardId> = game.hand().iter().map(|c| c.id).collect();

        game.mulligan().unwrap();
        let after: Vec<CardId> = game.hand().iter().map(|c| c.id).collect();
        assert_eq!(after.len(), 5);
        assert!(before.iter().all(|id| !after.contains(id)));
        assert_eq!(game.player().resources.mana, 2);
        assert_eq!(game.player_deck().discard_pile().len(), 5);
    }

    #[test]
    fn test_mulligan_large_hand_reshuffles_old_cards() {
        let settings = Settings::default().with_hand_size(30);
        let mut game = Game::new(settings, PlayerClass::Warrior, Difficulty::Normal, 42);
        assert_eq!(game.player_deck().len(), 22);

        game.mulligan().unwrap();
        assert_eq!(game.hand().len(), 30);
        assert_eq!(game.player_deck().emergency_refills(), 0);
        assert_eq!(game.hand().len() + game.player_deck().total_cards(), 52);
    }

    #[test]
    fn test_time_warp() {
        let mut game = game();
        assert_eq!(game.time_warp().unwrap_err(), Rejection::NoTurnToRefund);

        game.end_turn().unwrap();
        assert_eq!(game.clock().turn, 2);
        game.time_warp().unwrap();
        assert_eq!(game.clock().turn, 1);
        assert_eq!(game.player().extra_turns_bought, 1);
        assert_eq!(game.player().resources.mana, 2);
    }

    #[test]
    fn test_survived() {
        let settings = Settings::default().with_rounds(1, 2);
        let mut game = Game::new(settings, PlayerClass::Cleric, Difficulty::Easy, 5);

        assert!(!game.end_turn().unwrap().expired);
        let tick = game.end_turn().unwrap();
        assert!(tick.expired);
        assert_eq!(game.outcome(), Some(GameOutcome::Survived));
        assert_eq!(game.mulligan().unwrap_err(), Rejection::GameOver);
    }

    #[test]
    fn test_summary_only_when_over() {
        let settings = Settings::default().with_rounds(1, 1);
        let mut game = Game::new(settings, PlayerClass::Mage, Difficulty::Hard, 8);
        assert!(game.summary("Ada").is_none());

        game.end_turn().unwrap();
        let entry = game.summary("Ada").unwrap();
        assert_eq!(entry.player_name, "Ada");
        assert_eq!(entry.outcome, GameOutcome::Survived);
        assert_eq!(entry.score, game.score());
        assert_eq!(entry.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_apply_event_routes() {
        let mut game = game();
        game.apply_event(LedgerEvent::DarkPact).unwrap();
        assert_eq!(game.player().resources.gold, 8);
        assert_eq!(game.player().alignment, -2);

        assert_eq!(
            game.apply_event(LedgerEvent::TimeWarp).unwrap_err(),
            Rejection::NoTurnToRefund
        );
    }

    #[test]
    fn test_snapshot_restore() {
        let mut game = game();
        let id = game.hand()[0].id;
        game.play(ActionKind::Loot, &[id]).unwrap();

        let mut restored = Game::restore(game.snapshot());
        game.end_turn().unwrap();
        restored.end_turn().unwrap();

        assert_eq!(game.hand(), restored.hand());
        assert_eq!(game.player(), restored.player());
        assert_eq!(game.history(), restored.history());
    }
}
