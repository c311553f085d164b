use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Result};
use gestomedia::finger_counter::count_fingers;
use gestomedia::gesture_dispatcher::{DebounceParams, GestureDebouncer};
use gestomedia::landmark_csv::load_recording;

struct ReplayOptions {
    dump_counts: bool,
}

fn parse_args() -> Result<(PathBuf, ReplayOptions)> {
    let mut dump_counts = false;
    let mut csv_path: Option<PathBuf> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--dump-counts" => dump_counts = true,
            _ => {
                if csv_path.is_some() {
                    bail!("Uso: replay_landmarks [--dump-counts] <grabacion.csv>");
                }
                csv_path = Some(PathBuf::from(arg));
            }
        }
    }

    let csv_path = csv_path.ok_or_else(|| anyhow!("Debes especificar un CSV de grabación"))?;
    Ok((csv_path, ReplayOptions { dump_counts }))
}

fn main() -> Result<()> {
    let (csv_path, opts) = parse_args()?;
    println!("🎞️  Reproduciendo sesión desde {:?}", csv_path);

    let frames = load_recording(&csv_path)?;
    println!("📼 {} frames cargados\n", frames.len());

    let base = Instant::now();
    let mut debouncer = GestureDebouncer::new(DebounceParams::default());
    let mut fired: Vec<(f32, &str)> = Vec::new();
    let mut with_hand = 0usize;

    for (idx, frame) in frames.iter().enumerate() {
        let now = base + Duration::from_secs_f32(frame.elapsed);

        let Some(hand) = frame.hand else {
            if opts.dump_counts {
                println!("  {:04}  t={:>6.2}s  sin mano", idx, frame.elapsed);
            }
            continue;
        };
        with_hand += 1;

        let count = count_fingers(&hand.landmarks, hand.handedness);
        if opts.dump_counts {
            println!(
                "  {:04}  t={:>6.2}s  {:<5}  {} dedos  [{}]",
                idx,
                frame.elapsed,
                hand.handedness.as_str(),
                count,
                debouncer.state()
            );
        }

        if let Some(action) = debouncer.observe(count, now) {
            println!(
                "🎮 t={:.2}s  {} dedos → {} ({})",
                frame.elapsed,
                count,
                action.label(),
                action.key_name()
            );
            fired.push((frame.elapsed, action.label()));
        }
    }

    println!(
        "\n📊 Resumen: {} frames, {} con mano, {} acciones disparadas",
        frames.len(),
        with_hand,
        fired.len()
    );
    for (t, label) in &fired {
        println!("  t={:>6.2}s  {}", t, label);
    }

    Ok(())
}
