use log::info;
use serde::Serialize;
use std::env;
use std::path::Path;
use std::time::Instant;
use track_finder::candidate::Candidate;
use track_finder::config::track_finder::load_config;
use track_finder::io::{read_slices, write_json_file};
use track_finder::TrackPipeline;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;

    let mut slices = read_slices(&config.input).map_err(|e| e.to_string())?;
    info!("Loaded {} slices from {}", slices.len(), config.input.display());

    let start = Instant::now();
    let mut pipeline = TrackPipeline::new(config.params).map_err(|e| e.to_string())?;
    let mut tracks: Vec<Candidate> = Vec::new();
    for record in slices.iter_mut() {
        pipeline.process_slice(
            &record.header,
            &record.points,
            record.spectrum.as_mut(),
            &mut tracks,
        );
    }
    pipeline.end_acquisition(&mut tracks);
    let mut report = pipeline.report();
    report.timings.total_ms = start.elapsed().as_secs_f64() * 1000.0;

    write_json_file(&config.output.tracks_json, &TracksFile { tracks: &tracks })
        .map_err(|e| e.to_string())?;
    println!(
        "Saved {} tracks to {}",
        tracks.len(),
        config.output.tracks_json.display()
    );

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report).map_err(|e| e.to_string())?;
        println!("Saved run report to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: track_finder <config.json>".to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TracksFile<'a> {
    tracks: &'a [Candidate],
}
