//! The demo scene: a checker floor, a red sphere, and four small spheres.

use glint_tracer::{Camera, Checker, Color, Light, Plane, Scene, SceneResult, Sphere, Surface, Thing, Vector3};

/// Height of the camera above the floor.
const EYE_HEIGHT: f64 = 8.0;

/// Build the demo scene viewed from `(x, EYE_HEIGHT, z)`.
///
/// One light rides along with the camera.
pub fn default_scene(x: f64, z: f64) -> SceneResult<Scene> {
    let eye = Vector3::new(x, EYE_HEIGHT, z);
    let floor = Checker::new(Checker::DEFAULT_CELL_SIZE)?;

    let things: Vec<Box<dyn Thing>> = vec![
        Box::new(Plane::new(Vector3::Y, 0.0, Surface::Checker(floor))?),
        Box::new(Sphere::new(Vector3::new(0.0, 2.0, 0.0), 2.0, Surface::ShinyRed)?),
        Box::new(Sphere::new(Vector3::new(0.0, 3.0, 4.0), 1.0, Surface::ShinyColor(Color::GREY))?),
        Box::new(Sphere::new(Vector3::new(0.0, 3.0, -4.0), 1.0, Surface::ShinyColor(Color::GREEN))?),
        Box::new(Sphere::new(Vector3::new(4.0, 3.0, 0.0), 1.0, Surface::ShinyColor(Color::BLACK))?),
        Box::new(Sphere::new(Vector3::new(-4.0, 3.0, 0.0), 1.0, Surface::ShinyColor(Color::YELLOW))?),
    ];
    let lights = vec![
        Light::new(eye, Color::WHITE),
        Light::new(Vector3::new(0.0, 6.0, 0.0), Color::WHITE),
    ];

    Scene::new(things, lights, Camera::new(eye, Vector3::new(0.0, 5.0, 0.0)))
}
