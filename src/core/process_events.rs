//! Movement model: resolved input intents plus frame time into camera motion.
use crate::core::player::{Camera, heading_vector, wrap_angle};

/// One frame's already-polled movement input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Movement {
    /// Grid units per second.
    pub move_speed: f64,
    /// Turns per second.
    pub rotate_speed: f64,
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            rotate_speed: 0.5,
        }
    }
}

/// Translates the camera `amount * dt` units along `angle`.
pub fn move_along(cam: &mut Camera, amount: f64, angle: f64, dt: f64) {
    cam.pos += heading_vector(angle) * (amount * dt);
}

pub fn move_forward(cam: &mut Camera, amount: f64, dt: f64) {
    let heading = cam.angle;
    move_along(cam, amount, heading, dt);
}

/// Positive amounts strafe a quarter turn from the heading.
pub fn strafe(cam: &mut Camera, amount: f64, dt: f64) {
    let angle = wrap_angle(cam.angle + 0.25);
    move_along(cam, amount, angle, dt);
}

pub fn rotate(cam: &mut Camera, amount: f64, dt: f64) {
    cam.angle = wrap_angle(cam.angle + amount * dt);
}

impl Movement {
    pub fn apply(&self, cam: &mut Camera, intent: &MoveIntent, dt: f64) {
        if intent.backward {
            move_forward(cam, -self.move_speed, dt);
        }
        if intent.forward {
            move_forward(cam, self.move_speed, dt);
        }
        if intent.rotate_left {
            rotate(cam, -self.rotate_speed, dt);
        }
        if intent.rotate_right {
            rotate(cam, self.rotate_speed, dt);
        }
        if intent.strafe_left {
            strafe(cam, -self.move_speed, dt);
        }
        if intent.strafe_right {
            strafe(cam, self.move_speed, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_dt_never_moves() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let mut cam = Camera::new(3.0, 4.0, 0.1);
            let v: f64 = rng.gen_range(-100.0..100.0);
            let a: f64 = rng.gen_range(-5.0..5.0);
            move_along(&mut cam, v, a, 0.0);
            assert_eq!(cam.pos, Camera::new(3.0, 4.0, 0.1).pos);
        }
    }

    #[test]
    fn forward_moves_along_heading() {
        let mut cam = Camera::new(1.5, 14.5, 0.0);
        move_forward(&mut cam, 2.0, 0.5);
        assert!(close(cam.pos.x, 2.5));
        assert!(close(cam.pos.y, 14.5));
    }

    #[test]
    fn strafe_moves_a_quarter_turn_off_heading() {
        let mut cam = Camera::new(0.0, 0.0, 0.0);
        strafe(&mut cam, 1.0, 1.0);
        assert!(close(cam.pos.x, 0.0));
        assert!(close(cam.pos.y, 1.0));

        let mut cam = Camera::new(0.0, 0.0, 0.9);
        strafe(&mut cam, 1.0, 1.0);
        let expected = heading_vector(0.15);
        assert!(close(cam.pos.x, expected.x));
        assert!(close(cam.pos.y, expected.y));
    }

    #[test]
    fn rotation_wraps_in_both_directions() {
        let mut cam = Camera::new(0.0, 0.0, 0.1);
        rotate(&mut cam, -0.5, 1.0);
        assert!(close(cam.angle, 0.6));
        rotate(&mut cam, 0.5, 1.0);
        assert!(close(cam.angle, 0.1));
    }

    #[test]
    fn opposing_intents_cancel() {
        let movement = Movement::default();
        let mut cam = Camera::new(5.0, 5.0, 0.3);
        let intent = MoveIntent {
            forward: true,
            backward: true,
            strafe_left: true,
            strafe_right: true,
            ..MoveIntent::default()
        };
        movement.apply(&mut cam, &intent, 0.25);
        assert!(close(cam.pos.x, 5.0));
        assert!(close(cam.pos.y, 5.0));
        assert!(close(cam.angle, 0.3));
    }

    #[test]
    fn rotate_right_uses_configured_speed() {
        let movement = Movement { move_speed: 2.0, rotate_speed: 0.5 };
        let mut cam = Camera::new(0.0, 0.0, 0.0);
        let intent = MoveIntent { rotate_right: true, ..MoveIntent::default() };
        movement.apply(&mut cam, &intent, 0.1);
        assert!(close(cam.angle, 0.05));
    }
}
