use lane_lines::batch::process_directory;
use lane_lines::config::batch;
use lane_lines::image::io::write_json_file;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = batch::load_config(Path::new(&config_path))?;

    let summary = process_directory(
        &config.input_dir,
        &config.output_dir,
        &config.params,
        &config.options,
    )?;

    if let Some(path) = &config.report_json {
        write_json_file(path, &summary)?;
        println!("Saved batch report to {}", path.display());
    }

    println!(
        "Processed {} images into {} ({} fitted, {} without lanes, {} skipped)",
        summary.processed,
        config.output_dir.display(),
        summary.fitted,
        summary.failed,
        summary.skipped.len()
    );

    Ok(())
}

fn usage() -> String {
    "Usage: lane_batch <config.json>".to_string()
}
