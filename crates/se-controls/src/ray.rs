//! Ray type and analytic intersection primitives
//!
//! Gizmo handles are picked against analytic shapes (cylinders, rings,
//! spheres, quads) rather than meshes, so picking needs no GPU
//! resources and stays exact under the per-frame handle rescaling.

use glam::Vec3;

/// A ray in world space with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Normalized ray direction.
    pub dir: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction.
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize(),
        }
    }

    /// Point along the ray at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Ray-plane intersection.
///
/// Returns the ray parameter of the hit, or `None` when the ray is
/// near-parallel to the plane or the plane lies behind the origin.
pub fn ray_plane_intersection(ray: Ray, plane_origin: Vec3, plane_normal: Vec3) -> Option<f32> {
    let denom = ray.dir.dot(plane_normal);
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (plane_origin - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(t)
}

/// Ray-sphere intersection; used for scale end-cap picking.
pub fn ray_sphere_intersection(ray: Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.dir.dot(ray.dir);
    let b = 2.0 * oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if t > 0.0 { Some(t) } else { None }
}

/// Ray intersection with a finite cylinder between `start` and `end`.
///
/// Projects the ray into the plane perpendicular to the cylinder axis
/// and solves the resulting quadratic, then rejects hits outside the
/// finite axis bounds. Used for translate stem picking.
pub fn ray_cylinder_intersection(
    ray: Ray,
    start: Vec3,
    end: Vec3,
    radius: f32,
) -> Option<f32> {
    let axis = (end - start).normalize();
    let length = (end - start).length();

    // Ray direction and origin offset, projected perpendicular to the axis
    let d = ray.dir - axis * ray.dir.dot(axis);
    let o = (ray.origin - start) - axis * (ray.origin - start).dot(axis);

    // at^2 + bt + c = 0
    let a = d.dot(d);
    let b = 2.0 * d.dot(o);
    let c = o.dot(o) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || a.abs() < f32::EPSILON {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if t < 0.0 {
        return None;
    }

    let projection = (ray.at(t) - start).dot(axis);
    if projection < 0.0 || projection > length {
        return None;
    }

    Some(t)
}

/// Ray intersection with an annular band (ring) in 3D space.
///
/// Intersects the ring's plane, then accepts the hit when its distance
/// from the center is within `thickness` of `radius`. Used for
/// rotation ring picking.
pub fn ray_ring_intersection(
    ray: Ray,
    center: Vec3,
    normal: Vec3,
    radius: f32,
    thickness: f32,
) -> Option<f32> {
    let t = ray_plane_intersection(ray, center, normal)?;
    let distance_from_center = (ray.at(t) - center).length();
    if (distance_from_center - radius).abs() <= thickness {
        Some(t)
    } else {
        None
    }
}

/// Ray intersection with a bounded quad patch.
///
/// The quad is centered at `center`, spans `half_extent` along the
/// `u`/`v` axes, and lies in the plane with normal `u x v`. Used for
/// planar pad picking.
pub fn ray_quad_intersection(
    ray: Ray,
    center: Vec3,
    u: Vec3,
    v: Vec3,
    half_extent: f32,
) -> Option<f32> {
    let normal = u.cross(v);
    let t = ray_plane_intersection(ray, center, normal)?;
    let offset = ray.at(t) - center;
    if offset.dot(u).abs() <= half_extent && offset.dot(v).abs() <= half_extent {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_cylinder() {
        let ray = Ray::new(Vec3::new(0.5, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = ray_cylinder_intersection(ray, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.1);
        assert!(hit.is_some());
    }

    #[test]
    fn ray_misses_cylinder() {
        // Pointing away from the cylinder
        let ray = Ray::new(Vec3::new(0.5, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0));
        let hit = ray_cylinder_intersection(ray, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.1);
        assert!(hit.is_none());
    }

    #[test]
    fn ray_outside_cylinder_bounds() {
        // Hits the infinite cylinder but beyond the finite end
        let ray = Ray::new(Vec3::new(2.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = ray_cylinder_intersection(ray, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.1);
        assert!(hit.is_none());
    }

    #[test]
    fn ray_hits_ring_band_only() {
        let ray = Ray::new(Vec3::new(0.5, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_ring_intersection(ray, Vec3::ZERO, Vec3::Z, 0.5, 0.05).is_some());

        // Through the ring's empty middle
        let center_ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_ring_intersection(center_ray, Vec3::ZERO, Vec3::Z, 0.5, 0.05).is_none());
    }

    #[test]
    fn parallel_ray_misses_plane() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(ray_plane_intersection(ray, Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn plane_behind_origin_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_plane_intersection(ray, Vec3::ZERO, Vec3::Z).is_none());
    }

    #[test]
    fn quad_respects_bounds() {
        let ray = Ray::new(Vec3::new(0.1, 0.1, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_quad_intersection(ray, Vec3::ZERO, Vec3::X, Vec3::Y, 0.2).is_some());

        let outside = Ray::new(Vec3::new(0.3, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_quad_intersection(outside, Vec3::ZERO, Vec3::X, Vec3::Y, 0.2).is_none());
    }

    #[test]
    fn sphere_hit_distance() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let t = ray_sphere_intersection(ray, Vec3::ZERO, 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }
}
