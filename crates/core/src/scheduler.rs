//! Cell scheduler - decides which cell holds what, and for how long
//!
//! While active, the scheduler spawns once immediately and then every
//! `spawn_cadence_ms`. Each spawn picks a cell uniformly at random, never the
//! cell picked by the previous spawn, places a freshly classified occupant
//! there, and files a [`DespawnTicket`] due `dwell_ms` later.
//!
//! Time only moves through [`CellScheduler::advance`], which walks pending
//! despawns and spawns in timestamp order (despawns first on ties), so one
//! large step behaves exactly like many small ones.
//!
//! A ticket clears its cell only if the scheduler is active, the ticket's
//! generation is the current one, and the cell still holds the very occupant
//! the ticket was filed for. Tickets outliving a tap, a round end, or a
//! restart are therefore harmless.

use arrayvec::ArrayVec;

use crate::board::{Board, Occupant, OccupantId};
use crate::classify::classify_with;
use crate::config::GameConfig;
use crate::rng::SpawnSource;
use crate::types::CELL_COUNT;

/// Deferred clear of one occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DespawnTicket {
    pub cell: u8,
    pub occupant: OccupantId,
    pub generation: u32,
    /// Milliseconds until the ticket fires
    pub due_in_ms: u32,
}

/// Result of one spawn decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnEvent {
    pub cell: u8,
    pub occupant: Occupant,
}

#[derive(Debug, Clone)]
pub struct CellScheduler<S> {
    board: Board,
    source: S,
    last_spawned: Option<u8>,
    generation: u32,
    next_occupant_id: u32,
    spawn_timer_ms: u32,
    pending: ArrayVec<DespawnTicket, CELL_COUNT>,
    active: bool,
    spawn_cadence_ms: u32,
    dwell_ms: u32,
    coin_p: f64,
    bomb_p: f64,
}

impl<S: SpawnSource> CellScheduler<S> {
    /// Create an inactive scheduler with an empty board
    pub fn new(config: &GameConfig, source: S) -> Self {
        Self {
            board: Board::new(),
            source,
            last_spawned: None,
            generation: 0,
            next_occupant_id: 0,
            spawn_timer_ms: 0,
            pending: ArrayVec::new(),
            active: false,
            spawn_cadence_ms: config.spawn_cadence_ms,
            dwell_ms: config.dwell_ms,
            coin_p: config.coin_p,
            bomb_p: config.bomb_p,
        }
    }

    /// Begin spawning for `generation` with a clean board, spawning once
    /// right away.
    pub fn activate(&mut self, generation: u32) -> Option<SpawnEvent> {
        self.reset();
        self.generation = generation;
        self.active = true;
        self.spawn_once()
    }

    /// Stop spawning, drop every pending despawn, and clear the board
    pub fn deactivate(&mut self) {
        self.reset();
        self.active = false;
    }

    fn reset(&mut self) {
        self.board.clear();
        self.pending.clear();
        self.last_spawned = None;
        self.spawn_timer_ms = 0;
    }

    /// Make one spawn decision.
    ///
    /// No-op while inactive.
    pub fn spawn_once(&mut self) -> Option<SpawnEvent> {
        if !self.active {
            return None;
        }

        let cell = self.pick_cell();
        self.last_spawned = Some(cell);

        let item = classify_with(self.source.next_draw(), self.coin_p, self.bomb_p);
        let occupant = Occupant {
            id: OccupantId(self.next_occupant_id),
            generation: self.generation,
            item,
        };
        self.next_occupant_id = self.next_occupant_id.wrapping_add(1);

        debug_assert!(
            self.board.is_empty_at(cell as usize),
            "spawn landed on occupied cell {cell}: dwell must be shorter than the spawn cadence"
        );
        if !self.board.place(cell as usize, occupant) {
            tracing::error!(cell, "spawn landed on an occupied cell, skipping");
            return None;
        }

        // One ticket per occupied cell, so this never exceeds CELL_COUNT.
        self.pending.push(DespawnTicket {
            cell,
            occupant: occupant.id,
            generation: self.generation,
            due_in_ms: self.dwell_ms,
        });

        tracing::debug!(
            cell,
            kind = item.kind.as_str(),
            generation = self.generation,
            "spawned"
        );
        Some(SpawnEvent { cell, occupant })
    }

    /// Uniform pick that rejects the previous spawn's cell
    fn pick_cell(&mut self) -> u8 {
        loop {
            let idx = self.source.next_cell(CELL_COUNT) as u8;
            if Some(idx) != self.last_spawned {
                return idx;
            }
        }
    }

    /// Advance scheduler time, firing due despawns and spawns in order
    pub fn advance(&mut self, elapsed_ms: u32) {
        let mut remaining = elapsed_ms;

        while self.active && remaining > 0 {
            let until_spawn = self.spawn_cadence_ms - self.spawn_timer_ms;
            let until_despawn = self
                .pending
                .iter()
                .map(|t| t.due_in_ms)
                .min()
                .unwrap_or(u32::MAX);
            let step = remaining.min(until_spawn).min(until_despawn);

            remaining -= step;
            self.spawn_timer_ms += step;
            for ticket in self.pending.iter_mut() {
                ticket.due_in_ms -= step;
            }

            self.fire_due_despawns();

            if self.spawn_timer_ms >= self.spawn_cadence_ms {
                self.spawn_timer_ms = 0;
                self.spawn_once();
            }
        }
    }

    fn fire_due_despawns(&mut self) {
        while let Some(pos) = self.pending.iter().position(|t| t.due_in_ms == 0) {
            let ticket = self.pending.remove(pos);
            self.despawn(ticket);
        }
    }

    /// Fire a despawn ticket.
    ///
    /// Clears the cell and returns `true` only if the ticket still targets
    /// the live occupant of the current generation; anything else (stale
    /// round, cell already tapped, newer occupant) is a no-op.
    pub fn despawn(&mut self, ticket: DespawnTicket) -> bool {
        if !self.active || ticket.generation != self.generation {
            return false;
        }
        self.pending
            .retain(|t| !(t.cell == ticket.cell && t.occupant == ticket.occupant));
        let cleared = self
            .board
            .take_if(ticket.cell as usize, ticket.occupant)
            .is_some();
        if cleared {
            tracing::debug!(cell = ticket.cell, "despawned");
        }
        cleared
    }

    /// Remove the occupant at `cell` for a tap, cancelling its despawn.
    pub fn take(&mut self, cell: u8) -> Option<Occupant> {
        if !self.active {
            return None;
        }
        let occupant = self.board.take(cell as usize)?;
        self.pending.retain(|t| t.occupant != occupant.id);
        Some(occupant)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn last_spawned(&self) -> Option<u8> {
        self.last_spawned
    }

    /// Outstanding despawn tickets
    pub fn pending(&self) -> &[DespawnTicket] {
        &self.pending
    }

    /// Milliseconds since the last spawn decision
    pub fn spawn_timer_ms(&self) -> u32 {
        self.spawn_timer_ms
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
