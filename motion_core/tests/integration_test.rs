use glam::Vec2;
use hecs::World;
use motion_core::*;

#[test]
fn test_bounce_scenario_right_edge() {
    let mut world = World::new();
    let mut time = Time::default();
    let viewport = Viewport::new(800.0, 600.0);
    let config = Config::new();
    let mut events = Events::new();

    let sprite = create_sprite(
        &mut world,
        Vec2::new(790.0, 300.0),
        Vec2::new(5.0, 0.0),
        Vec2::splat(50.0),
    );

    step(
        &mut world,
        &mut time,
        &viewport,
        &config,
        &mut events,
    );

    let s = world.get::<&BounceSprite>(sprite).unwrap();
    assert_eq!(s.pos, Vec2::new(750.0, 300.0));
    assert_eq!(s.vel, Vec2::new(-5.0, 0.0));
    assert_eq!(time.tick, 1);
}

#[test]
fn test_sprites_never_leave_viewport() {
    let mut config = Config::new();
    config.bounce_speed = 37.0; // big steps overshoot every few ticks
    let mut scene = Scene::with_config(2024, Viewport::new(640.0, 480.0), config);
    let sprites: Vec<_> = (0..16)
        .map(|i| scene.spawn_sprite(Some(Vec2::new(20.0 + i as f32 * 5.0, 40.0))))
        .collect();

    let mut bounced = 0;
    for i in 0..5000 {
        scene.tick(i as f64 * 16.0);
        bounced += scene.events.bounces.len();
        for &e in &sprites {
            let s = scene.sprite(e).unwrap();
            let max = scene.viewport.size() - s.size;
            assert!(
                s.pos.x >= 0.0 && s.pos.x <= max.x,
                "x out of bounds: {}",
                s.pos.x
            );
            assert!(
                s.pos.y >= 0.0 && s.pos.y <= max.y,
                "y out of bounds: {}",
                s.pos.y
            );
        }
    }
    assert!(bounced > 0, "Sprites should have hit an edge");
}

#[test]
fn test_spawning_does_not_disturb_existing_sprite() {
    let viewport = Viewport::new(800.0, 600.0);
    let mut a = Scene::new(77, viewport);
    let mut b = Scene::new(77, viewport);
    let ea = a.spawn_sprite(None);
    let eb = b.spawn_sprite(None);

    for i in 0..100 {
        a.tick(i as f64);
        b.tick(i as f64);
        if i == 50 {
            b.spawn_sprite(None);
        }
    }

    let sa = a.sprite(ea).unwrap();
    let sb = b.sprite(eb).unwrap();
    assert_eq!(sa.pos, sb.pos);
    assert_eq!(sa.vel, sb.vel);
}

#[test]
fn test_spawning_does_not_disturb_existing_particles() {
    let viewport = Viewport::new(800.0, 600.0);
    let mut a = Scene::new(77, viewport);
    let mut b = Scene::new(77, viewport);
    let pa = a.spawn_particles(10);
    let pb = b.spawn_particles(10);

    // Long enough for every particle to be recycled several times
    for i in 0..3000 {
        a.tick(i as f64);
        b.tick(i as f64);
        if i == 10 {
            b.spawn_sprite(None);
            b.spawn_particles(5);
            b.spawn_card(CardOptions::default());
        }
    }

    for (&ea, &eb) in pa.iter().zip(&pb) {
        let (x, y) = (a.particle(ea).unwrap(), b.particle(eb).unwrap());
        assert_eq!(x.pos, y.pos);
        assert_eq!(x.size, y.size);
        assert_eq!(x.rise, y.rise);
    }
}

#[test]
fn test_idle_card_returns_to_rest() {
    let mut scene = Scene::new(1, Viewport::default());
    let card = scene.spawn_card(CardOptions::default());

    // Fling it: drag quickly then let go
    scene.mouse_down(card, Vec2::ZERO).unwrap();
    scene
        .pointer_move(card, Pointer::Mouse, Vec2::new(150.0, 80.0))
        .unwrap();
    scene
        .pointer_move(card, Pointer::Mouse, Vec2::new(200.0, 100.0))
        .unwrap();
    scene.pointer_up(card, Pointer::Mouse).unwrap();

    let mut last = f32::INFINITY;
    for i in 0..600 {
        scene.tick(i as f64 * 16.0);
        let c = scene.card(card).unwrap();
        // Once the fling velocity is spent the offset shrinks every tick
        if i > 60 {
            assert!(c.offset.length() <= last + 1e-4);
        }
        last = c.offset.length();

        let ambient = c.ambient_offset();
        assert!(ambient.x.abs() <= FLOAT_AMPLITUDE + 1e-3);
        assert!(ambient.y.abs() <= FLOAT_AMPLITUDE + 1e-3);
    }
    assert!(last < 0.01, "Card should settle, offset {}", last);

    // Ambient float keeps the card alive at rest
    let mut log = TransformLog::new();
    scene.present(&mut log);
    let rendered = log.for_instance(card).next().unwrap();
    assert!(rendered.translate.length() > 0.0);
}

#[test]
fn test_offset_decays_monotonically_without_velocity() {
    let mut scene = Scene::new(1, Viewport::default());
    let card = scene.spawn_card(CardOptions::default());
    scene.world.get::<&mut DragCard>(card).unwrap().offset = Vec2::new(120.0, -45.0);

    let mut last = scene.card(card).unwrap().offset.length();
    for i in 0..300 {
        scene.tick(i as f64);
        let now = scene.card(card).unwrap().offset.length();
        assert!(now < last);
        last = now;
    }
}

#[test]
fn test_float_intensity_bounds_ambient() {
    let mut scene = Scene::new(1, Viewport::default());
    let card = scene.spawn_card(CardOptions {
        float_intensity: 0.5,
        ..Default::default()
    });
    let mut peak = Vec2::ZERO;
    for i in 0..5000 {
        scene.tick(i as f64);
        let a = scene.card(card).unwrap().ambient_offset();
        peak = peak.max(a.abs());
    }
    assert!(peak.x <= 7.5 + 1e-3 && peak.y <= 7.5 + 1e-3);
    assert!(peak.x > 0.0 && peak.y > 0.0);
}

#[test]
fn test_drag_suppresses_click_tap_does_not() {
    let mut scene = Scene::new(1, Viewport::default());
    let card = scene.spawn_card(CardOptions::default());

    scene.mouse_down(card, Vec2::new(10.0, 10.0)).unwrap();
    scene
        .pointer_move(card, Pointer::Mouse, Vec2::new(30.0, 10.0))
        .unwrap();
    scene.pointer_up(card, Pointer::Mouse).unwrap();
    assert_eq!(scene.click(card).unwrap(), ClickVerdict::Suppress);

    scene.mouse_down(card, Vec2::new(10.0, 10.0)).unwrap();
    scene
        .pointer_move(card, Pointer::Mouse, Vec2::new(12.0, 11.0))
        .unwrap();
    scene.pointer_up(card, Pointer::Mouse).unwrap();
    assert_eq!(scene.click(card).unwrap(), ClickVerdict::Allow);
}

#[test]
fn test_drag_released_off_card_does_not_eat_later_click() {
    let mut scene = Scene::new(1, Viewport::default());
    let card = scene.spawn_card(CardOptions::default());

    scene.mouse_down(card, Vec2::new(10.0, 10.0)).unwrap();
    scene
        .pointer_move(card, Pointer::Mouse, Vec2::new(400.0, 10.0))
        .unwrap();
    scene.pointer_up(card, Pointer::Mouse).unwrap();

    // The release landed elsewhere, so no click reached the card this frame
    scene.tick(16.0);
    scene.tick(32.0);

    // Keyboard activation of a link inside the card
    assert_eq!(scene.click(card).unwrap(), ClickVerdict::Allow);
}

#[test]
fn test_short_touch_never_drags() {
    let mut scene = Scene::new(1, Viewport::default());
    let card = scene.spawn_card(CardOptions::default());

    let effect = scene.touch_start(card, 4, Vec2::new(5.0, 5.0), 1000.0).unwrap();
    assert!(effect.schedule_long_press);
    scene.tick(1016.0);
    let effect = scene.pointer_up(card, Pointer::Touch(4)).unwrap();
    assert!(effect.cancel_long_press);

    assert!(!scene.long_press_elapsed(card, 1300.0).unwrap());
    assert!(!scene.card(card).unwrap().dragging);
    assert_eq!(scene.click(card).unwrap(), ClickVerdict::Allow);
}

#[test]
fn test_long_press_drag_blocks_scroll() {
    let mut scene = Scene::new(1, Viewport::default());
    let card = scene.spawn_card(CardOptions::default());

    scene.touch_start(card, 9, Vec2::new(100.0, 100.0), 0.0).unwrap();
    let effect = scene
        .pointer_move(card, Pointer::Touch(9), Vec2::new(102.0, 101.0))
        .unwrap();
    assert!(!effect.prevent_default, "Arming must not block scroll");

    assert!(scene.long_press_elapsed(card, 300.0).unwrap());
    let effect = scene
        .pointer_move(card, Pointer::Touch(9), Vec2::new(160.0, 100.0))
        .unwrap();
    assert!(effect.prevent_default);
    assert_eq!(scene.card(card).unwrap().offset, Vec2::new(60.0, 0.0));

    scene.pointer_up(card, Pointer::Touch(9)).unwrap();
    assert_eq!(scene.click(card).unwrap(), ClickVerdict::Suppress);
}

#[test]
fn test_teardown_stops_writes() {
    let mut scene = Scene::new(3, Viewport::new(800.0, 600.0));
    let sprite = scene.spawn_sprite(None);
    let card = scene.spawn_card(CardOptions::default());
    let particles = scene.spawn_particles(5);

    scene.tick(0.0);
    let mut log = TransformLog::new();
    scene.present(&mut log);
    assert_eq!(log.for_instance(sprite).count(), 1);
    assert_eq!(log.for_instance(card).count(), 1);
    assert_eq!(log.writes.len(), 7);

    scene.despawn(sprite).unwrap();
    scene.despawn(card).unwrap();
    for p in &particles {
        scene.despawn(*p).unwrap();
    }

    let mut log = TransformLog::new();
    for i in 1..20 {
        scene.tick(i as f64 * 16.0);
        scene.present(&mut log);
    }
    assert!(log.writes.is_empty());
    assert!(scene.pointer_move(card, Pointer::Mouse, Vec2::ONE).is_err());
}

#[test]
fn test_viewport_shrink_pulls_sprite_back() {
    let mut scene = Scene::new(5, Viewport::new(1920.0, 1080.0));
    let sprite = scene.spawn_sprite(None);
    scene.world.get::<&mut BounceSprite>(sprite).unwrap().pos = Vec2::new(1800.0, 1000.0);

    scene.set_viewport(Viewport::new(800.0, 600.0));
    scene.tick(0.0);

    let s = scene.sprite(sprite).unwrap();
    assert!(s.pos.x <= 750.0 && s.pos.y <= 550.0);
}
