//! Pairwise Newtonian gravity advanced with explicit (forward) Euler steps.
//!
//! One step first updates every body's velocity from the positions as they
//! stood at the start of the step, then moves every body by its new velocity.
//! Both halves use the same `dt`.

use crate::color::Rgba;
use crate::math::Vec3;

/// Gravitational constant in m³ kg⁻¹ s⁻².
pub const G: f64 = 6.67430e-11;

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub name: String,
    pub position: Vec3, // m
    pub velocity: Vec3, // m/s
    pub radius: f64,    // m
    pub mass: f64,      // kg
    pub color: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gravity {
    pub g: f64,
    /// Pairs closer than this (inclusive) do not interact.
    pub min_distance: f64,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            g: G,
            min_distance: 1.0,
        }
    }
}

impl Gravity {
    /// Kick `subject`'s velocity by the acceleration `other` exerts on it over `dt`.
    pub fn apply(&self, subject: &mut Body, other: &Body, dt: f64) {
        let diff = other.position - subject.position;
        let dist_sq = diff.length_squared();
        let dist = dist_sq.sqrt();
        if dist <= self.min_distance {
            return;
        }

        let dir = diff * (1.0 / dist);
        let force = self.g * (subject.mass * other.mass) / dist_sq;
        let accel = force / subject.mass;

        subject.velocity += dir * (accel * dt);
    }
}

// (&mut bodies[i], &bodies[j]) for i != j
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &lo[j])
    }
}

/// Apply gravity for every ordered pair (subject, other), subject != other.
pub fn accelerate_all(bodies: &mut [Body], gravity: &Gravity, dt: f64) {
    let n = bodies.len();
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let (subject, other) = pair_mut(bodies, i, j);
            gravity.apply(subject, other, dt);
        }
    }
}

pub fn drift_all(bodies: &mut [Body], dt: f64) {
    for b in bodies.iter_mut() {
        b.position += b.velocity * dt;
    }
}

/// Owns the bodies of a run and the simulated clock.
#[derive(Clone, Debug)]
pub struct Simulation {
    pub bodies: Vec<Body>,
    pub gravity: Gravity,
    pub time: f64, // simulated seconds
    initial: Vec<Body>,
}

impl Simulation {
    pub fn new(bodies: Vec<Body>, gravity: Gravity) -> Self {
        Self {
            initial: bodies.clone(),
            bodies,
            gravity,
            time: 0.0,
        }
    }

    pub fn step(&mut self, dt: f64) {
        if self.bodies.is_empty() {
            return;
        }
        accelerate_all(&mut self.bodies, &self.gravity, dt);
        drift_all(&mut self.bodies, dt);
        self.time += dt;
    }

    pub fn reset(&mut self) {
        self.bodies.clone_from(&self.initial);
        self.time = 0.0;
    }
}
