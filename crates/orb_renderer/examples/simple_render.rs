//! Simple ray tracer example.
//!
//! Renders a few overlapping spheres and saves to PPM format.

use orb_renderer::{unpack, Camera, Image, Renderer, Scene, Sphere, Vec3};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    println!("Orb Ray Tracer - Simple Example");
    println!("===============================");

    let scene = build_scene();
    println!("Created {} spheres", scene.sphere_count());

    let (width, height) = (800, 450);

    let mut camera = Camera::new(
        Vec3::new(0.0, 1.0, 6.0),
        Vec3::new(0.0, -0.15, -1.0),
        45.0,
        0.1,
        100.0,
    );
    camera.on_resize(width, height);

    let mut renderer: Renderer = Renderer::default();
    renderer.on_resize(width, height);

    println!("Rendering {}x{}...", width, height);

    let start = std::time::Instant::now();
    renderer.render(&scene, &camera);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    let image = renderer.final_image().expect("Renderer was resized");
    save_ppm(image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    // Ground
    scene.add_sphere(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        999.0,
        Vec3::new(0.5, 0.5, 0.5),
    ));

    // Three main spheres, the outer two overlapping the middle one
    scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 0.0), 1.0, Vec3::new(0.9, 0.9, 0.9)));
    scene.add_sphere(Sphere::new(Vec3::new(-1.4, 0.0, 0.3), 0.8, Vec3::new(0.4, 0.2, 0.1)));
    scene.add_sphere(Sphere::new(Vec3::new(1.4, 0.0, 0.3), 0.8, Vec3::new(0.2, 0.4, 0.8)));

    scene
}

fn save_ppm(image: &Image, filename: &str) -> std::io::Result<()> {
    use orb_renderer::OutputImage;

    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    for y in 0..image.height() {
        for x in 0..image.width() {
            let [r, g, b, _] = unpack(image.get(x, y));
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}
