//! Session glue between player actions, the wallet gate and the round.
//!
//! Nothing here knows about terminals: the front end turns key and mouse
//! events into [`GameAction`]s plus a screen position, and renders from
//! [`App::snapshot_into`] and [`App::session`].

use crate::core::{GameSnapshot, GameState, TapEffect, Wallet};
use crate::term::SessionView;
use crate::types::{GameAction, ScreenPoint};

pub struct App<W> {
    game: GameState,
    wallet: W,
    status: Option<String>,
}

impl<W: Wallet> App<W> {
    pub fn new(game: GameState, wallet: W) -> Self {
        Self {
            game,
            wallet,
            status: None,
        }
    }

    /// Apply one player action.
    ///
    /// Until the wallet is connected, `Start` connects it and everything else
    /// is ignored. `Start` is also ignored while a round is running.
    /// `at` is where a tap happened on screen.
    pub fn dispatch(&mut self, action: GameAction, at: ScreenPoint) -> Option<TapEffect> {
        if !self.wallet.is_connected() {
            if action == GameAction::Start {
                self.connect_wallet();
            }
            return None;
        }

        let effect = match action {
            GameAction::Start if self.game.phase().is_running() => None,
            GameAction::Start => {
                self.game.start();
                self.status = None;
                None
            }
            GameAction::Tap(cell) => self.game.tap(cell, at),
            GameAction::Claim => {
                if let Some(receipt) = self.game.claim_reward(self.wallet.address()) {
                    self.status = Some(receipt.to_string());
                }
                None
            }
        };

        for event in self.game.drain_feedback() {
            tracing::debug!(?event, "feedback");
        }
        effect
    }

    fn connect_wallet(&mut self) {
        match self.wallet.connect() {
            Ok(()) => self.status = None,
            Err(e) => {
                tracing::warn!(error = %e, "wallet connect failed");
                self.status = Some(e.to_string());
            }
        }
    }

    /// Advance the round; returns `true` if it ended during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.game.tick(elapsed_ms)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    pub fn session(&self) -> SessionView<'_> {
        SessionView {
            wallet_connected: self.wallet.is_connected(),
            address: self.wallet.address(),
            status: self.status.as_deref(),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}
