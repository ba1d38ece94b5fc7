use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use orb_core::{load_scene, CameraSettings, Scene, SceneFile};
use orb_math::{Camera, Quat, Vec3};
use orb_renderer::Renderer;

/// Headless front end: renders a scene for a number of frames and saves the
/// last one.
#[derive(Parser, Debug)]
#[command(name = "orb_viewer", version, about = "CPU sphere ray tracer")]
struct Args {
    /// Scene file (JSON). The starter scene is used when omitted.
    #[arg(long, conflicts_with = "random")]
    scene: Option<PathBuf>,

    /// Generate a random scene with this many spheres
    #[arg(long)]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 1)]
    seed: u64,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Number of frames to render
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Orbit the camera around the Y axis by this many degrees between frames
    #[arg(long, default_value_t = 0.0)]
    orbit: f32,

    /// Render rows sequentially instead of on the rayon pool
    #[arg(long)]
    single_threaded: bool,

    /// Where to save the last frame
    #[arg(long, default_value = "orb.png")]
    output: PathBuf,
}

/// Application state
struct App {
    scene: Scene,
    camera: Camera,
    renderer: Renderer,
    frame_times: Vec<Duration>,
}

impl App {
    fn new(file: SceneFile) -> Self {
        Self {
            scene: file.scene,
            camera: file.camera.to_camera(),
            renderer: Renderer::new(file.settings),
            frame_times: Vec::new(),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.renderer.on_resize(width, height);
        self.camera.on_resize(width, height);
    }

    /// Turntable the camera about the world Y axis.
    fn orbit(&mut self, degrees: f32) {
        let rotation = Quat::from_rotation_y(degrees.to_radians());
        let position = rotation * self.camera.position();
        let forward = rotation * self.camera.forward();
        self.camera.set_view(position, forward);
    }

    fn frame(&mut self) {
        let start = Instant::now();
        self.renderer.render(&self.scene, &self.camera);
        self.frame_times.push(start.elapsed());
    }

    fn average_frame_time(&self) -> Duration {
        if self.frame_times.is_empty() {
            return Duration::ZERO;
        }
        self.frame_times.iter().sum::<Duration>() / self.frame_times.len() as u32
    }
}

fn scene_file(args: &Args) -> Result<SceneFile> {
    let mut file = match (&args.scene, args.random) {
        (Some(path), _) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        (None, Some(count)) => SceneFile {
            scene: Scene::random(args.seed, count),
            // Pull back and look down a little to see the scatter
            camera: CameraSettings {
                position: Vec3::new(0.0, 3.0, 14.0),
                forward: Vec3::new(0.0, -0.2, -1.0),
                ..Default::default()
            },
            ..Default::default()
        },
        (None, None) => SceneFile {
            scene: Scene::default_scene(),
            ..Default::default()
        },
    };

    if args.single_threaded {
        file.settings.multithreaded = false;
    }
    Ok(file)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    log::info!("Starting Orb Viewer");

    let file = scene_file(&args)?;
    log::info!("Scene has {} spheres", file.scene.sphere_count());

    let mut app = App::new(file);
    app.resize(args.width, args.height);

    for frame in 0..args.frames.max(1) {
        if frame > 0 && args.orbit != 0.0 {
            app.orbit(args.orbit);
        }
        app.frame();
    }

    log::info!(
        "Rendered {} frame(s) at {}x{}, average {:?}",
        app.frame_times.len(),
        args.width,
        args.height,
        app.average_frame_time()
    );

    let image = app
        .renderer
        .final_image()
        .context("No image was created")?;
    image
        .save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}
