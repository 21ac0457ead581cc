//! Input resolver - turns a tap on a cell into a counted hit.
//!
//! A tap counts only while the round is running and only if the cell holds
//! something. The occupant is removed and its pending despawn cancelled in the
//! same step, so a second tap on the same cell (or a late despawn) finds
//! nothing to act on.

use crate::game_state::GameState;
use crate::rng::SpawnSource;
use crate::types::{ItemKind, ScreenPoint};

/// What a successful tap hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapEffect {
    pub cell: u8,
    pub kind: ItemKind,
    pub token: &'static str,
}

/// Resolve a tap on `cell` at screen position `at`.
///
/// Coins start the confetti at `at`, bombs start the shake. Both are started
/// before the hit is counted so a bomb that ends the round still shakes.
pub fn resolve_tap<S: SpawnSource>(
    game: &mut GameState<S>,
    cell: u8,
    at: ScreenPoint,
) -> Option<TapEffect> {
    if !game.phase.is_running() {
        return None;
    }

    let occupant = game.scheduler.take(cell)?;
    let kind = occupant.item.kind;

    match kind {
        ItemKind::Coin => game.feedback.reward(at, game.config.reward_visual_ms),
        ItemKind::Bomb => game.feedback.shake(game.config.shake_ms),
        ItemKind::Fruit => {}
    }
    game.record_hit(kind);

    tracing::debug!(cell, kind = kind.as_str(), "tap hit");
    Some(TapEffect {
        cell,
        kind,
        token: occupant.item.token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::rng::ScriptedSource;
    use crate::types::*;

    fn running(spawns: &[(usize, f64)]) -> GameState<ScriptedSource> {
        let mut game =
            GameState::with_source(GameConfig::default(), ScriptedSource::with_spawns(9, spawns))
                .unwrap();
        game.start();
        game
    }

    #[test]
    fn test_tap_empty_cell_is_noop() {
        let mut game = running(&[(4, 0.9)]);
        assert!(resolve_tap(&mut game, 0, ScreenPoint::default()).is_none());
        assert_eq!(game.counters(), Default::default());
        assert!(!game.board().is_empty_at(4));
    }

    #[test]
    fn test_tap_fruit_scores() {
        let mut game = running(&[(2, 0.9)]);
        let effect = resolve_tap(&mut game, 2, ScreenPoint::default()).unwrap();
        assert_eq!(effect.kind, ItemKind::Fruit);
        assert_eq!(effect.token, "🍇");
        assert_eq!(game.score(), 1);
        assert!(game.board().is_empty_at(2));
        assert!(!game.shaking());
        assert!(!game.reward_trigger().active);
    }

    #[test]
    fn test_tap_coin_triggers_reward_at_point() {
        let mut game = running(&[(4, 0.1)]);
        let at = ScreenPoint::new(40, 12);
        let effect = resolve_tap(&mut game, 4, at).unwrap();
        assert_eq!(effect.token, COIN_TOKEN);
        assert_eq!(game.currency(), 1);
        assert_eq!(
            game.reward_trigger(),
            RewardTrigger {
                x: 40,
                y: 12,
                active: true
            }
        );
    }

    #[test]
    fn test_tap_bomb_shakes() {
        let mut game = running(&[(1, 0.3)]);
        resolve_tap(&mut game, 1, ScreenPoint::default()).unwrap();
        assert_eq!(game.penalties(), 1);
        assert!(game.shaking());
        assert!(game.phase().is_running());
    }

    #[test]
    fn test_double_tap_counts_once() {
        let mut game = running(&[(3, 0.9)]);
        assert!(resolve_tap(&mut game, 3, ScreenPoint::default()).is_some());
        assert!(resolve_tap(&mut game, 3, ScreenPoint::default()).is_none());
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_tap_cancels_pending_despawn() {
        let mut game = running(&[(5, 0.9)]);
        let ticket = game.scheduler().pending()[0];
        resolve_tap(&mut game, 5, ScreenPoint::default()).unwrap();
        assert!(game.scheduler().pending().is_empty());
        assert!(!game.fire_despawn(ticket));
    }

    #[test]
    fn test_tap_after_round_over_is_noop() {
        let mut game = running(&[(0, 0.9)]);
        game.record_hit(ItemKind::Bomb);
        game.record_hit(ItemKind::Bomb);
        assert_eq!(game.phase(), RoundPhase::Over);
        assert!(resolve_tap(&mut game, 0, ScreenPoint::default()).is_none());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_tap_out_of_range_cell() {
        let mut game = running(&[(0, 0.9)]);
        assert!(resolve_tap(&mut game, 42, ScreenPoint::default()).is_none());
    }
}
