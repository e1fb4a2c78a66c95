use crate::{Config, Events, MotionRng, Particle, Viewport};
use hecs::World;

/// Drift particles upward with a sideways sway; recycle those past the top
pub fn drift_particles(
    world: &mut World,
    viewport: &Viewport,
    config: &Config,
    events: &mut Events,
) {
    for (_entity, (particle, rng)) in world.query_mut::<(&mut Particle, &mut MotionRng)>() {
        particle.phase += config.particle_phase_step;
        particle.pos.y -= particle.rise;
        particle.pos.x += config.particle_sway * particle.phase.sin();

        if particle.pos.y + particle.size < 0.0 {
            particle.recycle(viewport, config, rng);
            events.particles_recycled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_particle_rises() {
        let mut world = World::new();
        let config = Config::new();
        let viewport = Viewport::new(400.0, 300.0);
        let mut events = Events::new();
        let e = world.spawn((
            Particle {
                pos: Vec2::new(100.0, 200.0),
                rise: 0.5,
                size: 4.0,
                phase: 0.0,
            },
            MotionRng::new(9),
        ));

        drift_particles(&mut world, &viewport, &config, &mut events);

        let p = world.get::<&Particle>(e).unwrap();
        assert_eq!(p.pos.y, 199.5);
        assert!((p.pos.x - 100.0).abs() <= config.particle_sway);
        assert_eq!(events.particles_recycled, 0);
    }

    #[test]
    fn test_particle_recycled_at_bottom() {
        let mut world = World::new();
        let config = Config::new();
        let viewport = Viewport::new(400.0, 300.0);
        let mut events = Events::new();
        let e = world.spawn((
            Particle {
                pos: Vec2::new(100.0, -3.9),
                rise: 0.5,
                size: 4.0,
                phase: 0.0,
            },
            MotionRng::new(9),
        ));

        drift_particles(&mut world, &viewport, &config, &mut events);

        let p = world.get::<&Particle>(e).unwrap();
        assert!(p.pos.y > viewport.height);
        assert!(p.pos.x >= 0.0 && p.pos.x <= viewport.width);
        assert_eq!(events.particles_recycled, 1);
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = Config::new();
        let viewport = Viewport::new(640.0, 480.0);
        let run = |seed| {
            let mut world = World::new();
            let mut events = Events::new();
            for index in 0..20 {
                let mut rng = MotionRng::for_instance(seed, index);
                let particle = Particle::random(&viewport, &config, &mut rng);
                world.spawn((particle, rng));
            }
            for _ in 0..2000 {
                drift_particles(&mut world, &viewport, &config, &mut events);
            }
            let mut positions: Vec<(f32, f32)> = world
                .query::<&Particle>()
                .iter()
                .map(|(_e, p)| (p.pos.x, p.pos.y))
                .collect();
            positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
            positions
        };
        assert_eq!(run(5), run(5));
    }
}
