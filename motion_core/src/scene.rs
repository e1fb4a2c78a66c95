use crate::{
    create_card, create_particle, create_sprite, present, step, BounceSprite, CardOptions,
    ClickVerdict, Config, DragCard, Events, Gesture, InputEffect, MotionError, MotionRng,
    Particle, Pointer, SpriteStatus, Time, TransformSink, Viewport,
};
use glam::Vec2;
use hecs::{Component, ComponentError, Entity, World};

/// Every live effect instance on a page, keyed by entity id
pub struct Scene {
    pub world: World,
    pub time: Time,
    pub viewport: Viewport,
    pub config: Config,
    pub events: Events,
    seed: u64,
    spawned: u64,
}

impl Scene {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_config(seed, viewport, Config::new())
    }

    pub fn with_config(seed: u64, viewport: Viewport, config: Config) -> Self {
        Self {
            world: World::new(),
            time: Time::default(),
            viewport,
            config,
            events: Events::new(),
            seed,
            spawned: 0,
        }
    }

    /// Replace the viewport snapshot used by the next tick
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Spawn a sprite at a random spot with a random velocity
    pub fn spawn_sprite(&mut self, measured: Option<Vec2>) -> Entity {
        let size = match measured {
            Some(m) => self.config.sprite_size(m.x, m.y),
            None => Vec2::splat(self.config.default_sprite_size),
        };
        let mut rng = self.instance_rng();
        let sprite = BounceSprite::random(&self.viewport, size, &self.config, &mut rng);
        let entity = create_sprite(&mut self.world, sprite.pos, sprite.vel, sprite.size);
        log::debug!(
            "spawned sprite {:?} at {:?} moving {:?}",
            entity,
            sprite.pos,
            sprite.vel
        );
        entity
    }

    pub fn spawn_card(&mut self, options: CardOptions) -> Entity {
        let entity = create_card(&mut self.world, options);
        log::debug!("spawned card {:?} with {:?}", entity, options);
        entity
    }

    pub fn spawn_particles(&mut self, count: usize) -> Vec<Entity> {
        let entities: Vec<Entity> = (0..count)
            .map(|_| {
                let mut rng = self.instance_rng();
                let particle = Particle::random(&self.viewport, &self.config, &mut rng);
                create_particle(&mut self.world, particle, rng)
            })
            .collect();
        log::debug!("spawned {} particles", entities.len());
        entities
    }

    /// Remove an instance; it receives no further ticks or transform writes
    pub fn despawn(&mut self, instance: Entity) -> Result<(), MotionError> {
        self.world
            .despawn(instance)
            .map_err(|_| MotionError::NoSuchInstance(instance))?;
        log::debug!("despawned {:?}", instance);
        Ok(())
    }

    pub fn contains(&self, instance: Entity) -> bool {
        self.world.contains(instance)
    }

    /// Record the rendered box of a sprite; zero sizes fall back to the default
    pub fn measure_sprite(&mut self, instance: Entity, width: f32, height: f32) -> Result<(), MotionError> {
        let size = self.config.sprite_size(width, height);
        self.sprite_mut(instance)?.size = size;
        Ok(())
    }

    /// Sprite image failed to load: stop it for good
    pub fn fail_sprite(&mut self, instance: Entity) -> Result<(), MotionError> {
        self.sprite_mut(instance)?.status = SpriteStatus::AssetFailed;
        log::warn!("sprite {:?} asset failed to load, hiding it", instance);
        Ok(())
    }

    pub fn sprite(&self, instance: Entity) -> Result<BounceSprite, MotionError> {
        self.lookup(instance, "sprite")
    }

    pub fn card(&self, instance: Entity) -> Result<DragCard, MotionError> {
        self.lookup(instance, "drag card")
    }

    pub fn particle(&self, instance: Entity) -> Result<Particle, MotionError> {
        self.lookup(instance, "particle")
    }

    /// Run one frame
    pub fn tick(&mut self, now_ms: f64) {
        self.time.now_ms = now_ms;
        step(
            &mut self.world,
            &mut self.time,
            &self.viewport,
            &self.config,
            &mut self.events,
        );
    }

    pub fn present(&self, sink: &mut impl TransformSink) {
        present(&self.world, sink);
    }

    // Gesture input, routed to the card's own tracker

    pub fn mouse_down(&mut self, card: Entity, pos: Vec2) -> Result<InputEffect, MotionError> {
        self.with_card(card, |gesture, card, _| gesture.mouse_down(card, pos))
    }

    pub fn touch_start(
        &mut self,
        card: Entity,
        touch_id: i32,
        pos: Vec2,
        now_ms: f64,
    ) -> Result<InputEffect, MotionError> {
        self.with_card(card, |gesture, _, _| gesture.touch_start(touch_id, pos, now_ms))
    }

    pub fn long_press_elapsed(&mut self, card: Entity, now_ms: f64) -> Result<bool, MotionError> {
        self.with_card(card, |gesture, card, config| {
            gesture.long_press_elapsed(card, now_ms, config)
        })
    }

    pub fn pointer_move(
        &mut self,
        card: Entity,
        pointer: Pointer,
        pos: Vec2,
    ) -> Result<InputEffect, MotionError> {
        self.with_card(card, |gesture, card, config| {
            gesture.pointer_move(card, pointer, pos, config)
        })
    }

    pub fn pointer_up(&mut self, card: Entity, pointer: Pointer) -> Result<InputEffect, MotionError> {
        self.with_card(card, |gesture, card, _| gesture.pointer_up(card, pointer))
    }

    pub fn pointer_cancel(
        &mut self,
        card: Entity,
        pointer: Pointer,
    ) -> Result<InputEffect, MotionError> {
        self.with_card(card, |gesture, card, _| gesture.pointer_cancel(card, pointer))
    }

    pub fn click(&mut self, card: Entity) -> Result<ClickVerdict, MotionError> {
        self.with_card(card, |gesture, _, _| gesture.click())
    }

    /// Each instance draws from its own stream, so spawning never shifts
    /// what existing instances will do
    fn instance_rng(&mut self) -> MotionRng {
        let rng = MotionRng::for_instance(self.seed, self.spawned);
        self.spawned += 1;
        rng
    }

    fn with_card<R>(
        &mut self,
        instance: Entity,
        f: impl FnOnce(&mut Gesture, &mut DragCard, &Config) -> R,
    ) -> Result<R, MotionError> {
        if !self.world.contains(instance) {
            return Err(MotionError::NoSuchInstance(instance));
        }
        let config = &self.config;
        match self
            .world
            .query_one_mut::<(&mut Gesture, &mut DragCard)>(instance)
        {
            Ok((gesture, card)) => Ok(f(gesture, card, config)),
            Err(_) => Err(MotionError::WrongKind {
                instance,
                expected: "drag card",
            }),
        }
    }

    fn sprite_mut(&mut self, instance: Entity) -> Result<hecs::RefMut<'_, BounceSprite>, MotionError> {
        self.world
            .get::<&mut BounceSprite>(instance)
            .map_err(|e| kind_error(e, instance, "sprite"))
    }

    fn lookup<T: Component + Copy>(&self, instance: Entity, expected: &'static str) -> Result<T, MotionError> {
        self.world
            .get::<&T>(instance)
            .map(|c| *c)
            .map_err(|e| kind_error(e, instance, expected))
    }
}

fn kind_error(err: ComponentError, instance: Entity, expected: &'static str) -> MotionError {
    match err {
        ComponentError::NoSuchEntity => MotionError::NoSuchInstance(instance),
        _ => MotionError::WrongKind { instance, expected },
    }
}
