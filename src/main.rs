// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;

use anyhow::{anyhow, bail, Context, Result};
use tonal::config::{load_registry, PatternEvent, PatternWatcher};
use tonal::{Chord, PatternRegistry, Pitch, Scale};
use tracing::debug;

fn print_usage() {
    println!("tonal - Pitches, scales and chords");
    println!();
    println!("Usage: tonal [--patterns <FILE>] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  --pitch <PITCH>                      Show code, spelling and frequency of a pitch");
    println!("  --scale <ROOT> <PATTERN>             List the members of a scale");
    println!("  --chord <ROOT> <KEY> <PATTERN> [DEGREES]");
    println!("                                       Chord on ROOT from degrees of the scale (default 1 3 5)");
    println!("  --all-chords <ROOT> <PATTERN>        Every chord derivable from a scale");
    println!("  --list-patterns                      List registered scale patterns");
    println!("  --watch <PATH>                       Reload a pattern file or directory as it changes");
    println!("  --help                               Show this help message");
    println!();
    println!("Options:");
    println!("  --patterns <FILE>   Load extra scale patterns from a YAML or TOML file");
    println!();
    println!("A pitch is a name such as C#4 or Bb3, or a code such as 60.");
}

/// Accept either a numeric code or a pitch name
fn parse_pitch(arg: &str) -> Result<Pitch> {
    if let Ok(code) = arg.parse::<i32>() {
        return Ok(Pitch::from_code(code));
    }
    Pitch::from_name(arg).with_context(|| format!("Invalid pitch: {}", arg))
}

fn parse_degrees(args: &[String]) -> Result<Vec<i32>> {
    if args.is_empty() {
        return Ok(Chord::TRIAD.to_vec());
    }
    args.iter()
        .map(|arg| {
            arg.parse::<i32>()
                .map_err(|_| anyhow!("Invalid scale degree: {}", arg))
        })
        .collect()
}

fn build_scale(registry: &PatternRegistry, root: &str, pattern: &str) -> Result<Scale> {
    let scale = registry.scale(parse_pitch(root)?, pattern);
    if !scale.is_registered() {
        bail!("Unknown scale pattern: {} (see --list-patterns)", pattern);
    }
    Ok(scale)
}

fn show_pitch(arg: &str) -> Result<()> {
    let pitch = parse_pitch(arg)?;
    println!("Spelling:    {}", pitch);
    println!("Code:        {}", pitch.code());
    println!("Class:       {}", pitch.pitch_class());
    println!("Octave:      {}", pitch.octave());
    println!("Frequency:   {:.2} Hz", pitch.frequency());
    if let Some(group) = Pitch::enharmonic_equivalents(pitch.pitch_class()) {
        println!("Enharmonics: {}", group.join(", "));
    }
    Ok(())
}

fn show_scale(scale: &Scale) {
    println!("{} {}: {}", scale.root(), scale.pattern_name(), scale);
    for (i, member) in scale.iter().enumerate() {
        println!(
            "  {:>2}  {:<4} {:>3}  {}",
            i + 1,
            member.spelling(),
            member.code(),
            scale.degree_name(member)
        );
    }
}

fn show_chord(scale: &Scale, root: &str, degrees: &[i32]) -> Result<()> {
    let root = parse_pitch(root)?;
    let chord = Chord::from_scale(root.clone(), scale, degrees)
        .ok_or_else(|| anyhow!("{} is not in the scale {}", root, scale))?;
    let spellings: Vec<&str> = chord.iter().map(Pitch::spelling).collect();
    println!("{} {:?}: {}", chord, degrees, spellings.join(" "));
    Ok(())
}

fn show_all_chords(scale: &Scale) {
    let chords = Chord::all_chords_from_scale(scale);
    for chord in &chords {
        println!("{:<4} {:?}  {}", chord.root().pitch_class(), chord.intervals(), chord);
    }
    println!("{} chords", chords.len());
}

/// One line per watcher event; reloaded files are checked against `base`
fn describe_event(base: &PatternRegistry, event: &PatternEvent) -> String {
    match event {
        PatternEvent::Reloaded(path, file) => {
            let mut registry = base.clone();
            match file.apply(&mut registry) {
                Ok(()) => {
                    let names: Vec<&str> = file.patterns.iter().map(|p| p.name.as_str()).collect();
                    format!(
                        "reloaded {}: [{}], {} patterns registered",
                        path.display(),
                        names.join(", "),
                        registry.len()
                    )
                }
                Err(e) => format!("rejected {}: {:#}", path.display(), e),
            }
        }
        PatternEvent::Error(path, message) => format!("error in {}: {}", path.display(), message),
        PatternEvent::FileCreated(path) => format!("created {}", path.display()),
        PatternEvent::FileDeleted(path) => format!("deleted {}", path.display()),
    }
}

fn watch_patterns(base: &PatternRegistry, path: &str) -> Result<()> {
    let watcher = PatternWatcher::new(path, None)?;
    println!("Watching {} (Ctrl-C to stop)", watcher.watched_path().display());
    while let Some(event) = watcher.recv() {
        println!("{}", describe_event(base, &event));
    }
    Ok(())
}

fn require<'a>(args: &'a [String], count: usize, option: &str, what: &str) -> Result<&'a [String]> {
    if args.len() < count + 1 {
        bail!("{} requires {}", option, what);
    }
    Ok(&args[1..])
}

fn run(args: &[String]) -> Result<()> {
    let (registry, args) = match args {
        [flag, file, rest @ ..] if flag == "--patterns" => {
            debug!(file = %file, "loading extra scale patterns");
            (load_registry(file)?, rest)
        }
        [flag] if flag == "--patterns" => bail!("--patterns requires a file"),
        _ => (PatternRegistry::builtin(), args),
    };

    let Some(command) = args.first() else {
        println!("tonal - Pitches, scales and chords");
        println!("Run with --help for usage information");
        return Ok(());
    };

    match command.as_str() {
        "--pitch" => {
            let rest = require(args, 1, "--pitch", "a pitch name or code")?;
            show_pitch(&rest[0])?;
        }
        "--scale" => {
            let rest = require(args, 2, "--scale", "a root and a pattern")?;
            show_scale(&build_scale(&registry, &rest[0], &rest[1])?);
        }
        "--chord" => {
            let rest = require(args, 3, "--chord", "a chord root, a scale root and a pattern")?;
            let scale = build_scale(&registry, &rest[1], &rest[2])?;
            show_chord(&scale, &rest[0], &parse_degrees(&rest[3..])?)?;
        }
        "--all-chords" => {
            let rest = require(args, 2, "--all-chords", "a root and a pattern")?;
            show_all_chords(&build_scale(&registry, &rest[0], &rest[1])?);
        }
        "--list-patterns" => {
            for name in registry.names() {
                let intervals = registry.get(&name).unwrap_or_default();
                println!("{:<18} {:?}", name, intervals);
            }
        }
        "--watch" => {
            let rest = require(args, 1, "--watch", "a pattern file or directory")?;
            watch_patterns(&registry, &rest[0])?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        other => {
            eprintln!("Unknown option: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    run(&args)
}
