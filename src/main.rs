use std::cell::Cell;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use clap::Parser;

use native_canvas::backend::winit::WinitBackend;
use native_canvas::cli::Cli;
use native_canvas::{Event, Platform};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let backend = WinitBackend::new().map_err(|e| anyhow!("{e}"))?;
    let mut platform = Platform::new(backend);

    platform.set_swap_interval(if cli.vsync { 1 } else { 0 });
    platform
        .create_element("canvas", Some(cli.width), Some(cli.height))
        .map_err(|e| anyhow!("{e}"))?;
    platform.set_title(&cli.title);

    log::info!(
        "canvas ready: {}x{} (device pixel ratio {})",
        platform.width(),
        platform.height(),
        platform.device_pixel_ratio()
    );

    platform.on("resize", |event| {
        if let Event::Resize(resize) = event {
            log::info!("resize: {}x{}", resize.width, resize.height);
        }
    });

    platform.on("mousemove", |event| {
        if let Event::Mouse(mouse) = event {
            log::debug!(
                "mousemove: page ({:.1}, {:.1}) movement ({:.1}, {:.1})",
                mouse.page_x,
                mouse.page_y,
                mouse.movement_x,
                mouse.movement_y
            );
        }
    });

    platform.on("drop", |event| {
        if let Event::Drop(blobs) = event {
            for blob in blobs {
                log::info!("dropped {} ({} bytes)", blob.path.display(), blob.data.len());
            }
        }
    });

    platform.on("pointerlockchange", |event| {
        if let Event::PointerLockChange { locked } = event {
            log::info!("pointer lock: {locked}");
        }
    });

    // Listeners only observe events; loop-level actions go through flags
    let running = Rc::new(Cell::new(true));
    let quit_flag = Rc::clone(&running);
    platform.on("quit", move |_| quit_flag.set(false));

    let toggle_lock = Rc::new(Cell::new(false));
    let toggle_flag = Rc::clone(&toggle_lock);
    platform.on("click", move |_| toggle_flag.set(true));

    let escape = Rc::new(Cell::new(false));
    let escape_flag = Rc::clone(&escape);
    platform.on("keydown", move |event| {
        if let Event::Key(key) = event {
            if key.key == "Escape" {
                escape_flag.set(true);
            }
        }
    });

    println!("native-canvas demo - click to toggle pointer lock, drop files to load them, Escape to quit");

    while running.get() {
        platform.poll_events();

        if toggle_lock.take() {
            if platform.pointer_lock_element() {
                platform.exit_pointer_lock();
            } else {
                platform.request_pointer_lock();
            }
        }
        if escape.take() {
            break;
        }

        let context = platform.get_context().map_err(|e| anyhow!("{e}"))?;
        if let Err(err) = context.clear_frame(wgpu::Color {
            r: 0.10,
            g: 0.10,
            b: 0.12,
            a: 1.0,
        }) {
            log::warn!("frame skipped: {err:?}");
        }
        platform.flip();
    }

    Ok(())
}
