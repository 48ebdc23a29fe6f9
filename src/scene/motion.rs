use glam::Vec3;
use rand::Rng;
use rand_distr::{Distribution, UnitSphere};

use super::PointSet;

/// Straight-line drift inside a bounding sphere.
///
/// Every point carries a constant-speed velocity and reflects off the sphere
/// wall. This is the host loop's stand-in for whatever physics moves the points
/// between snapshots.
pub struct Drift {
    velocities: Vec<Vec3>,
    bounds_radius: f32,
    max_speed: f32,
}

impl Drift {
    /// Negative or NaN `max_speed` is treated as zero.
    pub fn new(bounds_radius: f32, max_speed: f32) -> Self {
        Self {
            velocities: Vec::new(),
            bounds_radius,
            max_speed: max_speed.max(0.0),
        }
    }

    /// Give velocities to any points spawned since the last call.
    pub fn sync<R: Rng + ?Sized>(&mut self, points: &PointSet, rng: &mut R) {
        let missing = points.len().saturating_sub(self.velocities.len());
        self.velocities.reserve(missing);
        for _ in 0..missing {
            let dir: [f32; 3] = UnitSphere.sample(rng);
            let speed = rng.gen_range(0.0..=self.max_speed);
            self.velocities.push(Vec3::from_array(dir) * speed);
        }
    }

    /// Advance every point by `dt` seconds.
    ///
    /// Points without a velocity yet (spawned after the last [`Drift::sync`])
    /// stay where they are.
    pub fn advance(&mut self, points: &mut PointSet, dt: f32) {
        let radius = self.bounds_radius;
        for (pos, vel) in points.positions_mut().iter_mut().zip(&mut self.velocities) {
            *pos += *vel * dt;

            let len = pos.length();
            if len > radius && len > 0.0 {
                let normal = *pos / len;
                *pos = normal * radius;
                // Reflect only the outward component
                let outward = vel.dot(normal);
                if outward > 0.0 {
                    *vel -= 2.0 * outward * normal;
                }
            }
        }
    }

    pub fn velocity(&self, idx: usize) -> Option<Vec3> {
        self.velocities.get(idx).copied()
    }
}
