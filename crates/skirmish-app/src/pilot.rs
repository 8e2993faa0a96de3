//! Input sources that play the game through `PlayerCommand`s.

use skirmish_core::commands::PlayerCommand;
use skirmish_core::enums::{EntityKind, GamePhase, UpgradeKind};
use skirmish_core::state::{EntityView, GameStateSnapshot};

use crate::settings::AutopilotConfig;

/// Anything that turns the latest snapshot into commands for the next tick.
pub trait InputSource {
    fn name(&self) -> &'static str;
    fn reset(&mut self);
    fn next_commands(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand>;
}

/// Simple scripted player: starts waves, lines up with the nearest enemy,
/// fires on a cadence, sidesteps incoming bullets and spends its score on
/// the cheapest upgrade in the shop.
pub struct Autopilot {
    cfg: AutopilotConfig,
    up_held: bool,
    down_held: bool,
    last_fire_tick: Option<u64>,
}

impl Autopilot {
    pub fn new(cfg: AutopilotConfig) -> Self {
        Self {
            cfg,
            up_held: false,
            down_held: false,
            last_fire_tick: None,
        }
    }

    /// Press or release movement keys, emitting only the changes.
    fn steer(&mut self, up: bool, down: bool, out: &mut Vec<PlayerCommand>) {
        if up != self.up_held {
            self.up_held = up;
            out.push(PlayerCommand::MoveUp { held: up });
        }
        if down != self.down_held {
            self.down_held = down;
            out.push(PlayerCommand::MoveDown { held: down });
        }
    }

    fn fire_due(&self, tick: u64) -> bool {
        match self.last_fire_tick {
            Some(last) => tick.saturating_sub(last) >= self.cfg.fire_interval_ticks,
            None => true,
        }
    }

    /// Vertical direction away from the closest threatening enemy bullet.
    fn dodge(&self, snapshot: &GameStateSnapshot) -> Option<f64> {
        let player = &snapshot.player;
        let reach = player.bounds.half_height() + 8.0;
        snapshot
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::EnemyBullet)
            .filter(|b| {
                let ahead = b.position.x - player.position.x;
                ahead > 0.0 && ahead < self.cfg.dodge_distance
            })
            .filter(|b| (b.position.y - player.position.y).abs() < reach)
            .min_by(|a, b| a.position.x.total_cmp(&b.position.x))
            .map(|b| {
                let away = player.position.y - b.position.y;
                let room_below = snapshot.world.height - player.position.y;
                if away > 0.0 || (away == 0.0 && room_below > player.position.y) {
                    1.0
                } else {
                    -1.0
                }
            })
    }
}

/// The enemy closest to the player's side of the screen.
fn nearest_enemy(snapshot: &GameStateSnapshot) -> Option<&EntityView> {
    snapshot
        .entities
        .iter()
        .filter(|e| e.kind.is_enemy())
        .min_by(|a, b| a.position.x.total_cmp(&b.position.x))
}

/// Cheapest upgrade the current score can pay for.
fn cheapest_affordable(snapshot: &GameStateSnapshot) -> Option<UpgradeKind> {
    let prices = snapshot.prices;
    UpgradeKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let price = match kind {
                UpgradeKind::Health => Some(prices.health),
                UpgradeKind::Speed => Some(prices.speed),
                UpgradeKind::MultiShot => prices.multi_shot,
            }?;
            (price <= snapshot.score).then_some((price, kind))
        })
        .min_by_key(|(price, _)| *price)
        .map(|(_, kind)| kind)
}

impl InputSource for Autopilot {
    fn name(&self) -> &'static str {
        "autopilot"
    }

    fn reset(&mut self) {
        self.up_held = false;
        self.down_held = false;
        self.last_fire_tick = None;
    }

    fn next_commands(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut out = Vec::new();

        match snapshot.phase {
            GamePhase::GameOver => {}
            GamePhase::Idle | GamePhase::Cleared => {
                self.steer(false, false, &mut out);
                match cheapest_affordable(snapshot) {
                    Some(kind) if snapshot.shop_open => {
                        out.push(PlayerCommand::PurchaseUpgrade { kind });
                    }
                    _ => out.push(PlayerCommand::StartNextWave),
                }
            }
            GamePhase::Spawning | GamePhase::Active => {
                let direction = match self.dodge(snapshot) {
                    Some(direction) => direction,
                    None => match nearest_enemy(snapshot) {
                        Some(target) => {
                            let dy = target.position.y - snapshot.player.position.y;
                            if dy < -self.cfg.dead_zone {
                                -1.0
                            } else if dy > self.cfg.dead_zone {
                                1.0
                            } else {
                                0.0
                            }
                        }
                        None => 0.0,
                    },
                };
                self.steer(direction < 0.0, direction > 0.0, &mut out);

                let on_screen = snapshot
                    .entities
                    .iter()
                    .any(|e| e.kind.is_enemy() && e.position.x < snapshot.world.width);
                if on_screen && self.fire_due(snapshot.time.tick) {
                    self.last_fire_tick = Some(snapshot.time.tick);
                    out.push(PlayerCommand::Fire);
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::state::{PlayerView, PriceView, WorldView};
    use skirmish_core::types::{BoundingBox, Position};

    fn snapshot(phase: GamePhase) -> GameStateSnapshot {
        GameStateSnapshot {
            phase,
            player: PlayerView {
                position: Position::new(50.0, 300.0),
                bounds: BoundingBox::new(38.4, 38.4),
                health: 10,
                speed: 200.0,
                num_shots: 1,
                ..Default::default()
            },
            prices: PriceView {
                health: 10,
                speed: 10,
                multi_shot: Some(10),
            },
            world: WorldView {
                width: 800.0,
                height: 600.0,
            },
            ..Default::default()
        }
    }

    fn entity(kind: EntityKind, x: f64, y: f64) -> EntityView {
        EntityView {
            id: 0,
            kind,
            position: Position::new(x, y),
            bounds: BoundingBox::new(8.0, 4.8),
        }
    }

    #[test]
    fn test_idle_starts_wave() {
        let mut pilot = Autopilot::new(AutopilotConfig::default());
        assert_eq!(
            pilot.next_commands(&snapshot(GamePhase::Idle)),
            vec![PlayerCommand::StartNextWave]
        );
    }

    #[test]
    fn test_shop_buys_before_starting() {
        let mut pilot = Autopilot::new(AutopilotConfig::default());
        let mut snap = snapshot(GamePhase::Cleared);
        snap.shop_open = true;
        snap.score = 15;
        assert_eq!(
            pilot.next_commands(&snap),
            vec![PlayerCommand::PurchaseUpgrade {
                kind: UpgradeKind::Health
            }]
        );
        snap.score = 5;
        assert_eq!(pilot.next_commands(&snap), vec![PlayerCommand::StartNextWave]);
    }

    #[test]
    fn test_steers_toward_nearest_enemy_and_fires() {
        let mut pilot = Autopilot::new(AutopilotConfig::default());
        let mut snap = snapshot(GamePhase::Active);
        snap.entities = vec![
            entity(EntityKind::EnemyHeavy, 700.0, 100.0),
            entity(EntityKind::EnemyLight, 790.0, 500.0),
        ];
        let commands = pilot.next_commands(&snap);
        assert_eq!(
            commands,
            vec![PlayerCommand::MoveUp { held: true }, PlayerCommand::Fire]
        );

        // Same state next tick: keys already held, fire on cooldown.
        snap.time.tick = 1;
        assert!(pilot.next_commands(&snap).is_empty());
    }

    #[test]
    fn test_dodges_incoming_bullet() {
        let mut pilot = Autopilot::new(AutopilotConfig::default());
        let mut snap = snapshot(GamePhase::Active);
        snap.entities = vec![
            entity(EntityKind::EnemyHeavy, 900.0, 300.0),
            entity(EntityKind::EnemyBullet, 120.0, 305.0),
        ];
        let commands = pilot.next_commands(&snap);
        assert_eq!(commands, vec![PlayerCommand::MoveUp { held: true }]);
    }

    #[test]
    fn test_holds_fire_while_enemies_offscreen() {
        let mut pilot = Autopilot::new(AutopilotConfig::default());
        let mut snap = snapshot(GamePhase::Spawning);
        snap.entities = vec![entity(EntityKind::EnemyHeavy, 850.0, 300.0)];
        assert!(!pilot.next_commands(&snap).contains(&PlayerCommand::Fire));
    }

    #[test]
    fn test_game_over_is_silent() {
        let mut pilot = Autopilot::new(AutopilotConfig::default());
        assert!(pilot.next_commands(&snapshot(GamePhase::GameOver)).is_empty());
    }
}
