//! Entity store: spawn factories, destruction and iteration over the ECS world.
//!
//! Destruction is two-phase. `destroy` clears the body's `active` flag at
//! once, so the entity is invisible to every later system in the same tick;
//! `flush` removes it from the world at the end of the tick.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::*;
use skirmish_core::constants::*;
use skirmish_core::enums::EntityKind;
use skirmish_core::types::{BoundingBox, Position, Velocity};

/// Stable numeric id of an entity, as exposed to the presentation layer.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Bounding box for an entity kind.
pub fn bounds_for(kind: EntityKind) -> BoundingBox {
    match kind {
        EntityKind::Player => BoundingBox::from_frame(
            SHIP_FRAME_SIZE,
            SHIP_SCALE,
            PLAYER_BODY_FRACTION,
            PLAYER_BODY_FRACTION,
        ),
        EntityKind::EnemyLight | EntityKind::EnemyHeavy => {
            BoundingBox::from_frame(SHIP_FRAME_SIZE, SHIP_SCALE, 1.0, 1.0)
        }
        EntityKind::PlayerBullet | EntityKind::EnemyBullet => BoundingBox::from_frame(
            BULLET_FRAME_SIZE,
            1.0,
            BULLET_BODY_WIDTH_FRACTION,
            BULLET_BODY_HEIGHT_FRACTION,
        ),
    }
}

/// Owns every live entity of a session.
pub struct EntityStore {
    world: World,
    /// Destroyed this tick, awaiting `flush`.
    graveyard: Vec<Entity>,
    player: Option<Entity>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            graveyard: Vec::new(),
            player: None,
        }
    }

    /// Read-only access to the underlying world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for systems that run their own queries.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Drop every entity, including the player.
    pub fn clear(&mut self) {
        self.world.clear();
        self.graveyard.clear();
        self.player = None;
    }

    /// Spawn the player's ship at the left edge, vertically centred.
    pub fn create_player(&mut self, world_height: f64) -> Entity {
        let entity = self.world.spawn((
            Body {
                kind: EntityKind::Player,
                bounds: bounds_for(EntityKind::Player),
                active: true,
            },
            Position::new(PLAYER_START_X, world_height / 2.0),
            Velocity::default(),
            Player {
                health: PLAYER_START_HEALTH,
                speed: PLAYER_START_SPEED,
                num_shots: PLAYER_START_SHOTS,
            },
        ));
        self.player = Some(entity);
        entity
    }

    /// Spawn an enemy at `position`. Light enemies get a fire timer whose last
    /// shot is backdated by a random offset so a group does not fire in
    /// lockstep. Returns `None` for non-enemy kinds.
    pub fn spawn_enemy(
        &mut self,
        kind: EntityKind,
        position: Position,
        now_ms: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<Entity> {
        let body = Body {
            kind,
            bounds: bounds_for(kind),
            active: true,
        };
        let entity = match kind {
            EntityKind::EnemyHeavy => self.world.spawn((
                body,
                position,
                Enemy {
                    health: HEAVY_HEALTH,
                    speed: ENEMY_SPEED,
                    can_shoot: false,
                    start_y: position.y,
                },
            )),
            EntityKind::EnemyLight => {
                let backdate: f64 = rng.gen_range(0.0..FIRE_BACKDATE_MAX_MS);
                let delay: f64 = rng.gen_range(INITIAL_FIRE_DELAY_MS.0..INITIAL_FIRE_DELAY_MS.1);
                self.world.spawn((
                    body,
                    position,
                    Enemy {
                        health: LIGHT_HEALTH,
                        speed: ENEMY_SPEED,
                        can_shoot: true,
                        start_y: position.y,
                    },
                    FireTimer {
                        last_shot_ms: now_ms - backdate,
                        next_shot_delay_ms: delay,
                    },
                ))
            }
            _ => return None,
        };
        Some(entity)
    }

    /// Spawn a bullet fired by `owner`, travelling along x only.
    pub fn spawn_bullet(&mut self, owner: EntityKind, position: Position, velocity_x: f64) -> Entity {
        let kind = if owner == EntityKind::Player {
            EntityKind::PlayerBullet
        } else {
            EntityKind::EnemyBullet
        };
        self.world.spawn((
            Body {
                kind,
                bounds: bounds_for(kind),
                active: true,
            },
            position,
            Velocity::new(velocity_x, 0.0),
            Projectile { owner },
        ))
    }

    /// Mark an entity destroyed. Returns false if it was already inactive or gone.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        match self.world.get::<&mut Body>(entity) {
            Ok(mut body) if body.active => {
                body.active = false;
                self.graveyard.push(entity);
                true
            }
            _ => false,
        }
    }

    /// Remove every destroyed entity from the world.
    pub fn flush(&mut self) {
        for entity in self.graveyard.drain(..) {
            let _ = self.world.despawn(entity);
            if self.player == Some(entity) {
                self.player = None;
            }
        }
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.world
            .get::<&Body>(entity)
            .map(|body| body.active)
            .unwrap_or(false)
    }

    /// Ids of the active entities of `kind`, in id order.
    pub fn active_ids(&self, kind: EntityKind) -> Vec<Entity> {
        let mut ids: Vec<Entity> = self
            .world
            .query::<&Body>()
            .iter()
            .filter(|(_, body)| body.active && body.kind == kind)
            .map(|(entity, _)| entity)
            .collect();
        ids.sort_by_key(|e| e.to_bits());
        ids
    }

    /// Visit every entity of `kind` that is active when the call starts.
    ///
    /// The id list is captured up front and each entity is re-checked before
    /// its visit, so `f` may spawn or destroy freely: new entities are not
    /// visited and destroyed ones are never visited twice.
    pub fn for_each_active<F>(&mut self, kind: EntityKind, mut f: F)
    where
        F: FnMut(&mut EntityStore, Entity),
    {
        for entity in self.active_ids(kind) {
            if self.is_active(entity) {
                f(self, entity);
            }
        }
    }

    pub fn count_active(&self, kind: EntityKind) -> usize {
        self.world
            .query::<&Body>()
            .iter()
            .filter(|(_, body)| body.active && body.kind == kind)
            .count()
    }

    pub fn count_active_enemies(&self) -> usize {
        self.world
            .query::<&Body>()
            .iter()
            .filter(|(_, body)| body.active && body.kind.is_enemy())
            .count()
    }

    /// The player entity, if one exists.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Copy of the player's capability state.
    pub fn player_state(&self) -> Option<Player> {
        let entity = self.player?;
        self.world.get::<&Player>(entity).ok().map(|p| (*p).clone())
    }

    /// Run `f` against the player's capability state.
    pub fn with_player<R>(&mut self, f: impl FnOnce(&mut Player) -> R) -> Option<R> {
        let entity = self.player?;
        self.world.query_one_mut::<&mut Player>(entity).ok().map(f)
    }

    pub fn position(&self, entity: Entity) -> Option<Position> {
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn body(&self, entity: Entity) -> Option<Body> {
        self.world.get::<&Body>(entity).ok().map(|b| *b)
    }

    /// Active entities of `kind` with their position and box, in id order.
    pub fn active_bodies(&self, kind: EntityKind) -> Vec<(Entity, Position, BoundingBox)> {
        let mut bodies: Vec<(Entity, Position, BoundingBox)> = self
            .world
            .query::<(&Body, &Position)>()
            .iter()
            .filter(|(_, (body, _))| body.active && body.kind == kind)
            .map(|(entity, (body, pos))| (entity, *pos, body.bounds))
            .collect();
        bodies.sort_by_key(|(e, _, _)| e.to_bits());
        bodies
    }

    /// Total number of entities still in the world, destroyed ones included
    /// until the next flush.
    #[cfg(test)]
    pub fn len(&self) -> u32 {
        self.world.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }
}
