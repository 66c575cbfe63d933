//! The ray tracing engine.
//!
//! Finds the nearest hit along a ray, shades it with direct light from every
//! unoccluded point light, and adds a mirror reflection traced recursively up
//! to `max_depth` bounces. Finished ray colors are memoized by exact ray value
//! together with the number of bounces that were still allowed.

use crate::{Intersection, RenderConfig, Scene, Thing};
use glint_math::{Color, Ray, RayKey, Vector3, VectorExt};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::ops::AddAssign;

/// Default reflection depth.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Snapshot of ray-cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of rays stored in the cache
    pub cache_size: usize,
    /// Number of `trace_ray` calls answered from the cache
    pub reused: usize,
}

impl AddAssign for CacheStats {
    fn add_assign(&mut self, other: CacheStats) {
        self.cache_size += other.cache_size;
        self.reused += other.reused;
    }
}

/// A cached ray color and the reflection budget it was traced with.
///
/// The same ray can be reached at different depths (two facing mirrors bounce
/// it back and forth), and its color depends on how many bounces remain.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CachedRay {
    color: Color,
    budget: u32,
}

/// Recursive ray tracer with a ray-result cache.
///
/// The cache is an optimization only: a tracer with caching disabled produces
/// the same colors. It grows for the lifetime of the tracer and is never
/// evicted.
#[derive(Debug, Clone)]
pub struct RayTracer {
    max_depth: u32,
    caching: bool,
    cache: HashMap<RayKey, CachedRay>,
    stats: CacheStats,
}

impl RayTracer {
    /// Create a tracer that follows at most `max_depth` reflection bounces.
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            caching: true,
            cache: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Create a tracer from render settings.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.max_depth).with_caching(config.caching)
    }

    /// Enable or disable the ray cache.
    pub fn with_caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn caching_enabled(&self) -> bool {
        self.caching
    }

    /// Current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zero the reuse counter, keeping the cache.
    pub fn reset_reused(&mut self) {
        self.stats.reused = 0;
    }

    /// Drop every cached ray and zero the statistics.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.stats = CacheStats::default();
    }

    /// A tracer with the same settings and an empty cache.
    ///
    /// Trace through it with [`RayTracer::trace_ray_with_parent`] to read this
    /// tracer's cache while the shard records its own new entries.
    pub fn shard(&self) -> RayTracer {
        RayTracer::new(self.max_depth).with_caching(self.caching)
    }

    /// Fold a shard's cache and reuse count into this tracer.
    ///
    /// Entries already present here are kept, so `cache_size` grows by the
    /// number of distinct new rays.
    pub fn merge(&mut self, shard: RayTracer) {
        for (key, cached) in shard.cache {
            if let Entry::Vacant(entry) = self.cache.entry(key) {
                entry.insert(cached);
                self.stats.cache_size += 1;
            }
        }
        self.stats.reused += shard.stats.reused;
    }

    /// Nearest intersection of `ray` with the scene.
    ///
    /// Linear scan; on equal distances the object listed first wins.
    pub fn intersections<'s>(&self, ray: &Ray, scene: &'s Scene) -> Option<Intersection<'s>> {
        let mut closest: Option<Intersection<'s>> = None;
        for thing in scene.things() {
            if let Some(isect) = thing.intersect(ray) {
                if closest.map_or(true, |c| isect.distance < c.distance) {
                    closest = Some(isect);
                }
            }
        }
        closest
    }

    /// Distance to the nearest object along `ray`, for occlusion tests.
    pub fn test_ray(&self, ray: &Ray, scene: &Scene) -> Option<f64> {
        self.intersections(ray, scene).map(|isect| isect.distance)
    }

    /// Color seen along `ray`, `depth` bounces into the recursion.
    pub fn trace_ray(&mut self, ray: &Ray, scene: &Scene, depth: u32) -> Color {
        self.trace(None, ray, scene, depth)
    }

    /// Like [`RayTracer::trace_ray`], but cache lookups fall back to
    /// `parent`'s cache. New entries are only written to `self`.
    pub fn trace_ray_with_parent(&mut self, parent: &RayTracer, ray: &Ray, scene: &Scene, depth: u32) -> Color {
        self.trace(Some(parent), ray, scene, depth)
    }

    fn trace(&mut self, parent: Option<&RayTracer>, ray: &Ray, scene: &Scene, depth: u32) -> Color {
        let key = ray.key();
        let budget = self.max_depth.saturating_sub(depth);
        if self.caching {
            if let Some(color) = self.lookup(parent, &key, budget) {
                self.stats.reused += 1;
                return color;
            }
        }

        let color = match self.intersections(ray, scene) {
            Some(isect) => self.shade(parent, &isect, scene, depth),
            None => Color::BACKGROUND,
        };

        if self.caching {
            // First budget seen for a ray wins; later ones are recomputed.
            if let Entry::Vacant(entry) = self.cache.entry(key) {
                entry.insert(CachedRay { color, budget });
                self.stats.cache_size += 1;
            }
        }
        color
    }

    fn lookup(&self, parent: Option<&RayTracer>, key: &RayKey, budget: u32) -> Option<Color> {
        std::iter::once(self)
            .chain(parent)
            .filter_map(|layer| layer.cache.get(key))
            .find(|cached| cached.budget == budget)
            .map(|cached| cached.color)
    }

    fn shade(&mut self, parent: Option<&RayTracer>, isect: &Intersection<'_>, scene: &Scene, depth: u32) -> Color {
        let d = isect.ray.direction;
        let pos = isect.position();
        let normal = isect.thing.normal(pos);
        let reflect_dir = d - 2.0 * normal.dot(d) * normal;

        let natural = Color::BACKGROUND + self.natural_color(isect.thing, pos, normal, reflect_dir, scene);
        let reflected = if depth >= self.max_depth {
            Color::GREY
        } else {
            self.reflection_color(parent, isect.thing, pos, reflect_dir, scene, depth)
        };
        natural + reflected
    }

    fn reflection_color(
        &mut self,
        parent: Option<&RayTracer>,
        thing: &dyn Thing,
        pos: Vector3,
        reflect_dir: Vector3,
        scene: &Scene,
        depth: u32,
    ) -> Color {
        let reflected = self.trace(parent, &Ray::new(pos, reflect_dir), scene, depth + 1);
        reflected.scale(thing.surface().reflect(pos))
    }

    /// Direct diffuse and specular light at `pos` from every unshadowed light.
    pub fn natural_color(
        &self,
        thing: &dyn Thing,
        pos: Vector3,
        normal: Vector3,
        reflect_dir: Vector3,
        scene: &Scene,
    ) -> Color {
        let surface = thing.surface();
        scene.lights().iter().fold(Color::DEFAULT, |col, light| {
            let ldis = light.position - pos;
            let livec = ldis.unit();
            let near = self.test_ray(&Ray::new(pos, livec), scene);
            let in_shadow = near.is_some_and(|dist| dist <= ldis.length());
            if in_shadow {
                return col;
            }

            let illum = livec.dot(normal);
            let lcolor = if illum > 0.0 {
                light.color.scale(illum)
            } else {
                Color::DEFAULT
            };
            let specular = livec.dot(reflect_dir.unit());
            let scolor = if specular > 0.0 {
                light.color.scale(specular.powf(surface.roughness()))
            } else {
                Color::DEFAULT
            };
            col + surface.diffuse(pos) * lcolor + surface.specular(pos) * scolor
        })
    }
}

impl Default for RayTracer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Light, Plane, Sphere, Surface};
    use glint_math::Camera;

    fn camera() -> Camera {
        Camera::new(Vector3::new(0.0, 0.0, -5.0), Vector3::ZERO)
    }

    fn white_light(position: Vector3) -> Light {
        Light::new(position, Color::WHITE)
    }

    fn sphere(center: Vector3, radius: f64, surface: Surface) -> Box<dyn Thing> {
        Box::new(Sphere::new(center, radius, surface).unwrap())
    }

    fn checker_ground() -> Box<dyn Thing> {
        Box::new(Plane::new(Vector3::Y, 0.0, Surface::Checker(Default::default())).unwrap())
    }

    fn approx(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-9 && (a.g - b.g).abs() < 1e-9 && (a.b - b.b).abs() < 1e-9
    }

    #[test]
    fn test_intersections_nearest() {
        let scene = Scene::new(
            vec![
                sphere(Vector3::new(0.0, 0.0, 5.0), 1.0, Surface::ShinyWhite),
                sphere(Vector3::new(0.0, 0.0, 2.0), 1.0, Surface::ShinyRed),
            ],
            vec![white_light(Vector3::Y)],
            camera(),
        )
        .unwrap();
        let tracer = RayTracer::default();
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::Z);

        let isect = tracer.intersections(&ray, &scene).unwrap();
        assert!((isect.distance - 6.0).abs() < 1e-12);
        assert_eq!(isect.thing.surface(), &Surface::ShinyRed);
        assert_eq!(tracer.test_ray(&ray, &scene), Some(isect.distance));
    }

    #[test]
    fn test_intersections_tie_first_wins() {
        let scene = Scene::new(
            vec![
                sphere(Vector3::ZERO, 1.0, Surface::ShinyRed),
                sphere(Vector3::ZERO, 1.0, Surface::ShinyWhite),
            ],
            vec![white_light(Vector3::Y)],
            camera(),
        )
        .unwrap();
        let tracer = RayTracer::default();
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::Z);

        let isect = tracer.intersections(&ray, &scene).unwrap();
        assert_eq!(isect.thing.surface(), &Surface::ShinyRed);
    }

    #[test]
    fn test_intersections_none() {
        let scene = Scene::new(Vec::new(), vec![white_light(Vector3::Y)], camera()).unwrap();
        let tracer = RayTracer::default();
        let ray = Ray::new(Vector3::ZERO, Vector3::Z);

        assert!(tracer.intersections(&ray, &scene).is_none());
        assert_eq!(tracer.test_ray(&ray, &scene), None);
    }

    #[test]
    fn test_miss_is_background() {
        let scene = Scene::new(Vec::new(), vec![white_light(Vector3::Y)], camera()).unwrap();
        let mut tracer = RayTracer::default();
        let ray = Ray::new(Vector3::ZERO, Vector3::Z);

        assert_eq!(tracer.trace_ray(&ray, &scene, 0), Color::BACKGROUND);
    }

    #[test]
    fn test_shadowed_light_contributes_nothing() {
        let ground = Plane::new(Vector3::Y, 0.0, Surface::ShinyWhite).unwrap();
        let blocker = sphere(Vector3::new(0.0, 3.0, 0.0), 1.0, Surface::ShinyRed);
        let light = white_light(Vector3::new(0.0, 6.0, 0.0));

        let pos = Vector3::ZERO;
        let normal = Vector3::Y;
        let reflect_dir = Vector3::Y;
        let tracer = RayTracer::default();

        let open = Scene::new(vec![], vec![light], camera()).unwrap();
        let lit = tracer.natural_color(&ground, pos, normal, reflect_dir, &open);
        // grey diffuse * 1 + white specular * 1
        assert!(approx(lit, Color::new(1.5, 1.5, 1.5)));

        let blocked = Scene::new(vec![blocker], vec![light], camera()).unwrap();
        let dark = tracer.natural_color(&ground, pos, normal, reflect_dir, &blocked);
        assert_eq!(dark, Color::BLACK);
    }

    #[test]
    fn test_occluder_beyond_light_does_not_shadow() {
        let ground = Plane::new(Vector3::Y, 0.0, Surface::ShinyWhite).unwrap();
        let beyond = sphere(Vector3::new(0.0, 10.0, 0.0), 1.0, Surface::ShinyRed);
        let light = white_light(Vector3::new(0.0, 6.0, 0.0));
        let scene = Scene::new(vec![beyond], vec![light], camera()).unwrap();
        let tracer = RayTracer::default();

        let color = tracer.natural_color(&ground, Vector3::ZERO, Vector3::Y, Vector3::Y, &scene);
        assert!(approx(color, Color::new(1.5, 1.5, 1.5)));
    }

    #[test]
    fn test_natural_color_sums_lights() {
        let ground = Plane::new(Vector3::Y, 0.0, Surface::ShinyRed).unwrap();
        let above = white_light(Vector3::new(0.0, 4.0, 0.0));
        let below = white_light(Vector3::new(0.0, -4.0, 0.0));
        let tracer = RayTracer::default();

        let one = Scene::new(vec![], vec![above], camera()).unwrap();
        let two = Scene::new(vec![], vec![above, above], camera()).unwrap();
        let back = Scene::new(vec![], vec![below], camera()).unwrap();

        let c1 = tracer.natural_color(&ground, Vector3::ZERO, Vector3::Y, Vector3::Y, &one);
        let c2 = tracer.natural_color(&ground, Vector3::ZERO, Vector3::Y, Vector3::Y, &two);
        let cb = tracer.natural_color(&ground, Vector3::ZERO, Vector3::Y, Vector3::Y, &back);

        // red diffuse + white specular
        assert!(approx(c1, Color::new(2.0, 1.0, 1.0)));
        assert!(approx(c2, c1 + c1));
        // light behind the surface: no diffuse, no highlight
        assert_eq!(cb, Color::BLACK);
    }

    #[test]
    fn test_depth_termination_uses_grey() {
        // Camera ray hits a sphere; the reflection would head back toward the
        // light and miss everything.
        let scene = Scene::new(
            vec![sphere(Vector3::ZERO, 1.0, Surface::ShinyWhite)],
            vec![white_light(Vector3::new(0.0, 0.0, -10.0))],
            camera(),
        )
        .unwrap();
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::Z);

        let mut tracer = RayTracer::new(0);
        let color = tracer.trace_ray(&ray, &scene, 0);

        // Only the primary ray was traced and cached
        assert_eq!(tracer.stats().cache_size, 1);

        let pos = Vector3::new(0.0, 0.0, -1.0);
        let natural = tracer.natural_color(scene.things()[0].as_ref(), pos, -Vector3::Z, -Vector3::Z, &scene);
        assert!(approx(color, natural + Color::GREY));
    }

    #[test]
    fn test_reflection_recurses_below_max_depth() {
        let scene = Scene::new(
            vec![sphere(Vector3::ZERO, 1.0, Surface::ShinyWhite)],
            vec![white_light(Vector3::new(0.0, 0.0, -10.0))],
            camera(),
        )
        .unwrap();
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::Z);

        let mut tracer = RayTracer::new(1);
        let color = tracer.trace_ray(&ray, &scene, 0);

        // Primary ray plus one reflection ray that escapes to the background
        assert_eq!(tracer.stats().cache_size, 2);

        let pos = Vector3::new(0.0, 0.0, -1.0);
        let natural = tracer.natural_color(scene.things()[0].as_ref(), pos, -Vector3::Z, -Vector3::Z, &scene);
        // reflected = 0.3 * background
        assert!(approx(color, natural));
    }

    #[test]
    fn test_cache_reuse() {
        let scene = Scene::new(
            vec![
                checker_ground(),
                sphere(Vector3::new(0.0, 1.0, 0.0), 1.0, Surface::ShinyRed),
            ],
            vec![white_light(Vector3::new(0.0, 6.0, -3.0))],
            camera(),
        )
        .unwrap();
        let mut tracer = RayTracer::default();
        let a = Ray::new(Vector3::new(0.0, 2.0, -5.0), Vector3::new(0.0, -0.3, 1.0).unit());
        let b = Ray::new(Vector3::new(0.0, 2.0, -5.0), Vector3::new(0.0, -0.3, 1.0).unit());

        let first = tracer.trace_ray(&a, &scene, 0);
        let before = tracer.stats();
        let second = tracer.trace_ray(&b, &scene, 0);
        let after = tracer.stats();

        assert_eq!(first, second);
        assert_eq!(after.reused, before.reused + 1);
        assert_eq!(after.cache_size, before.cache_size);
    }

    #[test]
    fn test_cache_disabled_same_colors() {
        let scene = Scene::new(
            vec![
                checker_ground(),
                sphere(Vector3::new(0.0, 1.0, 0.0), 1.0, Surface::ShinyRed),
                sphere(Vector3::new(2.0, 1.0, 0.0), 0.5, Surface::ShinyColor(Color::GREEN)),
            ],
            vec![white_light(Vector3::new(0.0, 6.0, -3.0)), white_light(Vector3::new(4.0, 3.0, -2.0))],
            camera(),
        )
        .unwrap();
        let mut cached = RayTracer::default();
        let mut uncached = RayTracer::default().with_caching(false);
        let origin = Vector3::new(0.0, 2.0, -5.0);

        for i in 0..20 {
            let dir = Vector3::new(0.1 * (i % 5) as f64 - 0.2, -0.3, 1.0).unit();
            let ray = Ray::new(origin, dir);
            // Trace twice so the second pass is served from the cache
            for _ in 0..2 {
                assert_eq!(cached.trace_ray(&ray, &scene, 0), uncached.trace_ray(&ray, &scene, 0));
            }
        }

        assert!(cached.stats().reused >= 20);
        assert_eq!(uncached.stats(), CacheStats::default());
    }

    #[test]
    fn test_reset_and_clear() {
        let scene = Scene::new(vec![], vec![white_light(Vector3::Y)], camera()).unwrap();
        let mut tracer = RayTracer::default();
        let ray = Ray::new(Vector3::ZERO, Vector3::Z);

        tracer.trace_ray(&ray, &scene, 0);
        tracer.trace_ray(&ray, &scene, 0);
        assert_eq!(tracer.stats(), CacheStats { cache_size: 1, reused: 1 });

        tracer.reset_reused();
        assert_eq!(tracer.stats(), CacheStats { cache_size: 1, reused: 0 });

        tracer.clear_cache();
        assert_eq!(tracer.stats(), CacheStats::default());
        tracer.trace_ray(&ray, &scene, 0);
        assert_eq!(tracer.stats().reused, 0);
    }

    #[test]
    fn test_merge_shard() {
        let scene = Scene::new(vec![], vec![white_light(Vector3::Y)], camera()).unwrap();
        let mut owner = RayTracer::default();
        let shared = Ray::new(Vector3::ZERO, Vector3::Z);
        let only_shard = Ray::new(Vector3::ZERO, Vector3::X);
        owner.trace_ray(&shared, &scene, 0);

        let mut shard = owner.shard();
        assert_eq!(shard.stats(), CacheStats::default());
        shard.trace_ray(&shared, &scene, 0);
        shard.trace_ray(&only_shard, &scene, 0);
        shard.trace_ray(&only_shard, &scene, 0);

        owner.merge(shard);
        assert_eq!(owner.stats(), CacheStats { cache_size: 2, reused: 1 });

        owner.trace_ray(&only_shard, &scene, 0);
        assert_eq!(owner.stats().reused, 2);
    }

    #[test]
    fn test_shard_reads_parent_cache() {
        let scene = Scene::new(vec![], vec![white_light(Vector3::Y)], camera()).unwrap();
        let mut owner = RayTracer::default();
        let shared = Ray::new(Vector3::ZERO, Vector3::Z);
        let fresh = Ray::new(Vector3::ZERO, Vector3::X);
        owner.trace_ray(&shared, &scene, 0);

        let mut shard = owner.shard();
        shard.trace_ray_with_parent(&owner, &shared, &scene, 0);
        shard.trace_ray_with_parent(&owner, &fresh, &scene, 0);
        // The parent hit is counted but not copied into the shard
        assert_eq!(shard.stats(), CacheStats { cache_size: 1, reused: 1 });

        owner.merge(shard);
        assert_eq!(owner.stats(), CacheStats { cache_size: 2, reused: 1 });
    }

    #[test]
    fn test_cache_respects_remaining_depth() {
        // Facing mirrors: the floor's reflection of a downward ray is the
        // same ray as the one sent up from the origin.
        let floor: Box<dyn Thing> = Box::new(Plane::new(Vector3::Y, 0.0, Surface::ShinyWhite).unwrap());
        let ceiling: Box<dyn Thing> = Box::new(Plane::new(-Vector3::Y, 10.0, Surface::ShinyWhite).unwrap());
        let scene = Scene::new(
            vec![floor, ceiling],
            vec![white_light(Vector3::new(3.0, 5.0, 0.0))],
            camera(),
        )
        .unwrap();
        let up = Ray::new(Vector3::ZERO, Vector3::Y);
        let down = Ray::new(Vector3::new(0.0, 5.0, 0.0), -Vector3::Y);

        let mut cached = RayTracer::new(3);
        let mut uncached = RayTracer::new(3).with_caching(false);
        for (ray, depth) in [(up, 2), (down, 0)] {
            assert_eq!(cached.trace_ray(&ray, &scene, depth), uncached.trace_ray(&ray, &scene, depth));
        }

        // Same ray with the same budget is still a hit
        let before = cached.stats().reused;
        assert_eq!(cached.trace_ray(&up, &scene, 2), uncached.trace_ray(&up, &scene, 2));
        assert_eq!(cached.stats().reused, before + 1);
    }
}
