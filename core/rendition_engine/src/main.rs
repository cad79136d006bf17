use std::{
    io::{self, BufRead as _},
    path::PathBuf,
};

use clap::Parser;
use log::{error, info, warn};
use rendition_engine::{
    config::EngineConfig,
    constants::{DEFAULT_COMMAND_CAPACITY, DEFAULT_PENDING_CAPACITY},
    device_manager::{AudioDeviceManager, cpal_dm::CpalAudioDeviceManager},
    engine::{self, EngineController},
    rendition::{Rendition, wav},
    selection::command::SwitchTime,
};
use transport::clock::frames_to_seconds;

/// Play several encodings of one program and switch between them live
#[derive(Parser, Debug)]
#[command(name = "rendition_engine")]
struct Args {
    /// Decoded renditions, e.g. `audio/music-128.wav`; the bitrate is read from the file name
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Slots in the control -> render command queue
    #[arg(long, default_value_t = DEFAULT_COMMAND_CAPACITY)]
    command_capacity: usize,

    /// Scheduled switches the render thread may hold
    #[arg(long, default_value_t = DEFAULT_PENDING_CAPACITY)]
    pending_capacity: usize,

    /// Start playing rendition 0 instead of waiting for a selection
    #[arg(long)]
    play: bool,
}

enum Input {
    Select(usize),
    Seek(u64),
    Pause,
    Resume,
    Status,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let input = match words.next()? {
        "p" => Input::Pause,
        "r" => Input::Resume,
        "i" => Input::Status,
        "q" => Input::Quit,
        "s" => Input::Seek(words.next()?.parse().ok()?),
        index => Input::Select(index.parse().ok()?),
    };
    Some(input)
}

fn load_renditions(files: &[PathBuf]) -> Result<Vec<Rendition>, Box<dyn std::error::Error>> {
    files
        .iter()
        .map(|path| {
            let bitrate = wav::bitrate_from_file_name(path).unwrap_or_else(|| {
                warn!("No bitrate in file name {}", path.display());
                0
            });
            wav::from_file(path, bitrate)
                .map_err(|e| format!("{}: {e}", path.display()).into())
        })
        .collect()
}

#[expect(clippy::print_stdout)]
fn print_renditions(controller: &EngineController) {
    for (index, rendition) in controller.renditions().iter().enumerate() {
        println!("  [{index}] {}", rendition.info());
    }
    println!("  <index> play rendition | p pause | r resume | s <frame> seek | i status | q quit");
}

#[expect(clippy::print_stdout)]
fn print_status(controller: &EngineController, sample_rate: u32) {
    let status = controller.status();
    println!(
        "{:?} at {:.2}s on rendition {} ({} rejected, {} dropped)",
        status.state(),
        frames_to_seconds(status.position(), sample_rate),
        status.active_index(),
        status.rejected_requests(),
        status.dropped_requests(),
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = EngineConfig::new(args.command_capacity, args.pending_capacity);
    let (mut controller, render_engine) = engine::create(config);

    let renditions = load_renditions(&args.files)?;
    controller.initialize(renditions)?;

    let mut manager = CpalAudioDeviceManager::new();
    manager.open_output_stream(Box::new(render_engine))?;
    let sample_rate = manager.sample_rate().unwrap_or_default();

    if args.play {
        manager.resume()?;
    }
    print_renditions(&controller);

    for line in io::stdin().lock().lines() {
        let Some(input) = parse_input(&line?) else {
            warn!("Unrecognised input");
            continue;
        };
        let result: Result<(), Box<dyn std::error::Error>> = match input {
            Input::Select(index) => controller
                .request_switch(index, SwitchTime::Now)
                .map_err(Into::into)
                .and_then(|()| manager.resume().map_err(Into::into)),
            Input::Seek(frame) => controller.seek(frame).map_err(Into::into),
            Input::Pause => manager.pause().map_err(Into::into),
            Input::Resume => manager.resume().map_err(Into::into),
            Input::Status => {
                print_status(&controller, sample_rate);
                Ok(())
            }
            Input::Quit => break,
        };
        if let Err(e) = result {
            error!("{e}");
        }
    }

    info!("Shutting down");
    Ok(())
}
