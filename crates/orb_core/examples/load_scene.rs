//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run --example load_scene -- scenes/two_spheres.json

use std::env;

use orb_core::load_scene;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene-json>");
        println!("\nExamples:");
        println!("  cargo run --example load_scene -- scenes/two_spheres.json");
        println!("  cargo run --example load_scene -- scenes/overlap.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(file) => {
            println!("\n=== Scene: {} ===", path);
            println!("Spheres: {}", file.scene.sphere_count());

            println!("\n--- Spheres ---");
            for (i, sphere) in file.scene.spheres().iter().enumerate() {
                println!(
                    "  [{}] center ({:.2}, {:.2}, {:.2}) radius {:.2} albedo ({:.2}, {:.2}, {:.2})",
                    i,
                    sphere.center.x,
                    sphere.center.y,
                    sphere.center.z,
                    sphere.radius,
                    sphere.albedo.x,
                    sphere.albedo.y,
                    sphere.albedo.z
                );
            }

            let camera = &file.camera;
            println!("\n--- Camera ---");
            println!(
                "  Position: ({:.2}, {:.2}, {:.2})",
                camera.position.x, camera.position.y, camera.position.z
            );
            println!(
                "  Forward: ({:.2}, {:.2}, {:.2})",
                camera.forward.x, camera.forward.y, camera.forward.z
            );
            println!("  FOV: {:.1} deg", camera.fov_y);
            println!("  Multithreaded: {}", file.settings.multithreaded);
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
