// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use beatgrid::config::{validate_beat, BeatEvent, BeatWatcher};
use beatgrid::{BeatFile, Editor, EditorConfig, SelectionRect};

fn print_usage() {
    println!("BEATGRID - Overlap grouping for multi-track beats");
    println!();
    println!("Usage: beatgrid [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --cluster <BEAT> [CONFIG]            Print the overlap groups of a saved beat");
    println!("  --select <BEAT> <X0> <X1> <Y0> <Y1>  Print events inside a time (s) x pixel range");
    println!("  --validate <BEAT>                    Check that a beat file parses");
    println!("  --watch <BEAT> [CONFIG]              Re-print the overlap groups whenever the beat changes");
    println!("  --help                               Show this help message");
}

fn load_config(config_path: Option<&str>) -> Result<EditorConfig> {
    match config_path {
        Some(path) => EditorConfig::load(Path::new(path)),
        None => Ok(EditorConfig::default()),
    }
}

fn load_editor(beat_path: &str, config_path: Option<&str>) -> Result<Editor> {
    let beat = BeatFile::load(beat_path)?;
    let mut editor = Editor::new(load_config(config_path)?);
    editor.load_beat(&beat, |_| None);
    Ok(editor)
}

fn print_clusters(editor: &Editor) {
    for track in editor.tracks() {
        println!("{}", track);
        let Some(groups) = editor.state().track(track) else {
            continue;
        };
        for group in groups.values() {
            let lock = if group.locked() { " [locked]" } else { "" };
            println!(
                "  {:<16} {:>7.2} - {:>7.2}  {} events{}",
                group.id.as_str(),
                group.start_time(),
                group.end_time(),
                group.len(),
                lock
            );
        }
    }
}

fn watch_beat(beat_path: &str, config_path: Option<&str>) -> Result<()> {
    let mut editor = load_editor(beat_path, config_path)?;
    print_clusters(&editor);

    let watcher = BeatWatcher::new(beat_path, None)?;
    println!("Watching {:?} (Ctrl+C to stop)", watcher.watched_path());

    while let Some(event) = watcher.recv() {
        match event {
            BeatEvent::Reloaded(path, beat) => {
                editor.load_beat(&beat, |_| None);
                println!();
                println!("Reloaded {:?}", path);
                print_clusters(&editor);
            }
            BeatEvent::Error(message) => eprintln!("{}", message),
            BeatEvent::FileDeleted(path) => eprintln!("Beat file removed: {:?}", path),
            BeatEvent::FileCreated(_) => {}
        }
    }
    Ok(())
}

fn print_selection(beat_path: &str, bounds: &[f64]) -> Result<()> {
    let [x0, x1, y0, y1] = bounds else {
        return Err(anyhow!("--select requires four bounds"));
    };
    let mut editor = load_editor(beat_path, None)?;
    let selection = editor.select_range(&SelectionRect::new(*x0, *x1, *y0, *y1));

    for event in selection.events().values() {
        println!(
            "{:>6}  {:<12} {:>7.2} - {:>7.2}",
            event.id,
            event.instrument_name,
            event.start_time(),
            event.end_time()
        );
    }
    if let Some(level) = selection.highest_y_level() {
        println!("Lowest band: {:.1}", level);
    }
    Ok(())
}

fn parse_bound(text: &str) -> Result<f64> {
    text.parse()
        .map_err(|_| anyhow!("Invalid number: {}", text))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("BEATGRID - Overlap grouping for multi-track beats");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--cluster" => {
            if args.len() < 3 {
                eprintln!("Error: --cluster requires a beat file");
                std::process::exit(1);
            }
            let editor = load_editor(&args[2], args.get(3).map(String::as_str))?;
            print_clusters(&editor);
        }
        "--watch" => {
            if args.len() < 3 {
                eprintln!("Error: --watch requires a beat file");
                std::process::exit(1);
            }
            watch_beat(&args[2], args.get(3).map(String::as_str))?;
        }
        "--select" => {
            if args.len() < 7 {
                eprintln!("Error: --select requires a beat file and four bounds");
                std::process::exit(1);
            }
            let bounds = args[3..7]
                .iter()
                .map(|arg| parse_bound(arg))
                .collect::<Result<Vec<f64>>>()?;
            print_selection(&args[2], &bounds)?;
        }
        "--validate" => {
            if args.len() < 3 {
                eprintln!("Error: --validate requires a beat file");
                std::process::exit(1);
            }
            let beat = validate_beat(&args[2])?;
            println!(
                "{}: {} tracks, {} groups, {} events",
                beat.name,
                beat.track_order.len(),
                beat.state.group_count(),
                beat.state.event_count()
            );
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
