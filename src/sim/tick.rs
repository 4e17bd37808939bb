//! Round controller
//!
//! One call to `tick` is one pass of the game loop: advance every
//! participant against the previous frame, draw if the timer says so, then
//! capture the new frame for the next tick's collision checks.

use super::collision::classify;
use super::input::InputSnapshot;
use super::state::{GameEvent, RoundPhase, RoundState};
use crate::renderer::Canvas;

/// Advance the round by one tick.
///
/// All participants move before anything is drawn, and the frame they are
/// checked against is the one captured after the previous render. `redraw`
/// comes from the host's frame timer; without it the snapshot is kept.
///
/// `RoundOver` is reported once, on the tick the round is decided. Whether
/// to keep ticking afterwards is up to the host.
pub fn tick<C: Canvas>(
    state: &mut RoundState,
    input: &InputSnapshot,
    canvas: &mut C,
    redraw: bool,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.time_ticks += 1;
    let tick = state.time_ticks;

    // Dead participants freeze inside `advance`; survivors keep moving
    // after the round is decided
    let arena = &state.arena;
    let snapshot = state.snapshot.as_ref();
    for participant in state.participants.iter_mut() {
        if let Some(cause) = participant.advance(input, |next| classify(next, arena, snapshot)) {
            let at = participant.head();
            log::info!(
                "Participant {} eliminated by {:?} at ({:.1}, {:.1}) on tick {}",
                participant.id,
                cause,
                at.x,
                at.y,
                tick
            );
            events.push(GameEvent::Eliminated {
                id: participant.id,
                cause,
                at,
                tick,
            });
        }
    }

    if state.phase == RoundPhase::Running && state.is_decided() {
        let survivor = state
            .participants
            .iter()
            .find(|p| p.is_alive())
            .map(|p| p.id);
        log::info!("Round over after {} ticks, survivor: {:?}", tick, survivor);
        state.phase = RoundPhase::Over;
        events.push(GameEvent::RoundOver { survivor });
    }

    if redraw {
        render(state, canvas);
        // Old frame is dropped here
        state.snapshot = Some(canvas.capture());
    }

    events
}

/// Clear to the arena background and draw every trail in registration
/// order. Dead participants stay on screen.
pub fn render<C: Canvas>(state: &RoundState, canvas: &mut C) {
    canvas.clear(state.arena.background);
    for participant in &state.participants {
        for (start, end) in participant.segments() {
            canvas.draw_line(start, end, participant.color, participant.thickness);
        }
    }
    log::debug!("Rendered tick {}", state.time_ticks);
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::consts::*;
    use crate::renderer::Raster;
    use crate::sim::collision::{Arena, Cause};
    use crate::sim::frame::Rgba;
    use crate::sim::input::{Control, ControlBindings};
    use crate::sim::state::Participant;

    const RED: Rgba = Rgba::rgb(255, 100, 100);
    const GREEN: Rgba = Rgba::rgb(100, 255, 100);

    fn raster() -> Raster {
        Raster::new(ARENA_WIDTH, ARENA_HEIGHT)
    }

    fn spawn(slot: u32, color: Rgba, x: f64, y: f64, heading: f64) -> Participant {
        Participant::spawn(
            slot,
            color,
            ControlBindings::for_slot(slot),
            DVec2::new(x, y),
            heading,
        )
    }

    #[test]
    fn test_first_tick_has_no_snapshot() {
        let mut state = RoundState::new(Arena::default());
        state.add_participant(spawn(0, RED, 100.0, 200.0, DIR_DOWN_RIGHT));
        assert!(state.snapshot.is_none());

        let mut canvas = raster();
        let events = tick(&mut state, &InputSnapshot::new(), &mut canvas, true);
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 1);

        let snapshot = state.snapshot.as_ref().unwrap();
        assert_eq!(snapshot.pixel(101, 201), Some(RED));
        assert_eq!(snapshot.pixel(600, 600), Some(BACKGROUND));
    }

    #[test]
    fn test_landing_on_other_trail_is_fatal() {
        let mut state = RoundState::new(Arena::default());
        let a = state.add_participant(spawn(0, RED, 200.0, 300.0, DIR_RIGHT));
        let b = state.add_participant(spawn(1, GREEN, 201.5, 294.0, DIR_DOWN));
        let mut canvas = raster();
        let input = InputSnapshot::new();

        // A draws (200,300)-(203,300); B stops short at y=297
        let events = tick(&mut state, &input, &mut canvas, true);
        assert!(events.is_empty());

        // B's next head (201.5,300) samples A's pixel (202,300)
        let events = tick(&mut state, &input, &mut canvas, true);
        assert_eq!(
            events[0],
            GameEvent::Eliminated {
                id: b,
                cause: Cause::Trail,
                at: DVec2::new(201.5, 300.0),
                tick: 2,
            }
        );
        assert!(state.participant(a).unwrap().is_alive());
        assert!(!state.participant(b).unwrap().is_alive());
        assert_eq!(events[1], GameEvent::RoundOver { survivor: Some(a) });
        assert_eq!(state.phase, RoundPhase::Over);
    }

    #[test]
    fn test_collision_sees_previous_frame_only() {
        let mut state = RoundState::new(Arena::default());
        state.add_participant(spawn(0, RED, 200.0, 300.0, DIR_RIGHT));
        let b = state.add_participant(spawn(1, GREEN, 205.0, 294.0, DIR_DOWN));
        let mut canvas = raster();
        let input = InputSnapshot::new();

        tick(&mut state, &input, &mut canvas, true);
        // A reaches x=206 this tick, but the frame B is checked against
        // only has A up to x=203
        let events = tick(&mut state, &input, &mut canvas, true);
        assert!(events.is_empty());
        assert!(state.participant(b).unwrap().is_alive());
        // B's own segment now ends at y=300, A's band covers y=301
        assert_eq!(state.snapshot.as_ref().unwrap().pixel(205, 301), Some(RED));
    }

    #[test]
    fn test_no_redraw_keeps_snapshot() {
        let mut state = RoundState::new(Arena::default());
        state.add_participant(spawn(0, RED, 640.0, 480.0, DIR_RIGHT));
        state.add_participant(spawn(1, GREEN, 640.0, 600.0, DIR_RIGHT));
        let mut canvas = raster();
        let input = InputSnapshot::new();

        tick(&mut state, &input, &mut canvas, true);
        let before = state.snapshot.clone();
        tick(&mut state, &input, &mut canvas, false);
        tick(&mut state, &input, &mut canvas, false);
        assert_eq!(state.snapshot, before);
        assert_eq!(state.time_ticks, 3);
    }

    #[test]
    fn test_own_trail_is_not_hit_while_moving() {
        let mut state = RoundState::new(Arena::default());
        state.add_participant(spawn(0, RED, 640.0, 480.0, DIR_DOWN_RIGHT));
        state.add_participant(spawn(1, GREEN, 300.0, 300.0, DIR_UP_LEFT));
        let mut canvas = raster();
        let left = InputSnapshot::new().with(Control::SteerLeft(0));

        for _ in 0..60 {
            let events = tick(&mut state, &left, &mut canvas, true);
            assert!(events.is_empty());
        }
        assert_eq!(state.alive_count(), 2);
        assert_eq!(state.participants[0].trajectory().len(), 61);
    }

    #[test]
    fn test_minimum_speed_clears_own_stroke() {
        let steering = InputSnapshot::new().with(Control::SteerLeft(0));
        for heading in [0.0, 30.0, 45.0, 90.0, 200.0, 333.0] {
            for input in [InputSnapshot::new(), steering.clone()] {
                let mut state = RoundState::new(Arena::default());
                state.add_participant(spawn(0, RED, 640.0, 480.0, heading).with_speed(MIN_SPEED));
                let mut canvas = raster();

                for _ in 0..100 {
                    let events = tick(&mut state, &input, &mut canvas, true);
                    assert!(events.is_empty(), "heading {heading}");
                }
                assert!(state.participants[0].is_alive(), "heading {heading}");
            }
        }
    }

    #[test]
    fn test_closing_circle_hits_own_trail() {
        let mut state = RoundState::new(Arena::default());
        state.add_participant(spawn(0, RED, 640.0, 480.0, DIR_RIGHT).with_turn_rate(7.0));
        let mut canvas = raster();
        let right = InputSnapshot::new().with(Control::SteerRight(0));

        let mut death = None;
        for _ in 0..100 {
            for event in tick(&mut state, &right, &mut canvas, true) {
                if let GameEvent::Eliminated { cause, .. } = event {
                    death = Some(cause);
                }
            }
        }
        assert_eq!(death, Some(Cause::Trail));
        assert_eq!(state.phase, RoundPhase::Over);
    }

    #[test]
    fn test_dead_trails_still_render() {
        let mut state = RoundState::new(Arena::default());
        let a = state.add_participant(spawn(0, RED, 26.0, 500.0, DIR_LEFT));
        state.add_participant(spawn(1, GREEN, 640.0, 480.0, DIR_UP));
        state.add_participant(spawn(2, GREEN, 640.0, 700.0, DIR_UP));
        let mut canvas = raster();
        let input = InputSnapshot::new();

        let events = tick(&mut state, &input, &mut canvas, true);
        assert!(matches!(events[0], GameEvent::Eliminated { id, cause: Cause::Wall, .. } if id == a));
        assert_eq!(state.phase, RoundPhase::Running);

        tick(&mut state, &input, &mut canvas, true);
        let dead = state.participant(a).unwrap();
        assert_eq!(dead.head(), DVec2::new(23.0, 500.0));
        assert_eq!(state.snapshot.as_ref().unwrap().pixel(24, 500), Some(RED));
    }

    #[test]
    fn test_survivor_keeps_moving_after_round_over() {
        let mut state = RoundState::new(Arena::default());
        let a = state.add_participant(spawn(0, RED, 640.0, 480.0, DIR_RIGHT));
        let b = state.add_participant(spawn(1, GREEN, 27.0, 500.0, DIR_LEFT));
        let mut canvas = raster();
        let input = InputSnapshot::new();

        let events = tick(&mut state, &input, &mut canvas, true);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], GameEvent::RoundOver { survivor: Some(a) });
        assert_eq!(state.participant(a).unwrap().head(), DVec2::new(643.0, 480.0));
        let dead_head = state.participant(b).unwrap().head();

        // No second RoundOver, but the survivor still advances
        let events = tick(&mut state, &input, &mut canvas, true);
        assert!(events.is_empty());
        assert_eq!(state.phase, RoundPhase::Over);
        assert_eq!(state.time_ticks, 2);
        assert_eq!(state.participant(a).unwrap().head(), DVec2::new(646.0, 480.0));
        assert_eq!(state.participant(b).unwrap().head(), dead_head);
    }

    #[test]
    fn test_later_participants_draw_on_top() {
        let mut state = RoundState::new(Arena::default());
        state.add_participant(spawn(0, RED, 400.0, 400.0, DIR_RIGHT));
        state.add_participant(spawn(1, GREEN, 400.0, 400.0, DIR_RIGHT));
        let mut canvas = raster();

        tick(&mut state, &InputSnapshot::new(), &mut canvas, true);
        assert_eq!(state.snapshot.as_ref().unwrap().pixel(401, 400), Some(GREEN));
    }
}
