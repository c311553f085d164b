use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, bail, ensure, Context, Result};
use csv::ReaderBuilder;

use crate::types::{DetectedHand, Handedness, Landmark, LandmarkSet, NUM_LANDMARKS};

/// Observación de un frame grabado: instante relativo al inicio de la
/// sesión y la mano detectada, si la hubo
#[derive(Debug, Clone, Copy)]
pub struct RecordedFrame {
    pub elapsed: f32,
    pub hand: Option<DetectedHand>,
}

struct PartialFrame {
    elapsed: f32,
    handedness: Option<Handedness>,
    landmarks: [Option<Landmark>; NUM_LANDMARKS],
}

/// Carga una sesión grabada desde un CSV en el formato
/// frame,elapsed,hand,landmark,x,y ordenado por frame.
///
/// Los frames con mano llevan sus 21 landmarks; un frame con hand=none
/// representa una captura sin mano detectada (una sola fila, las columnas
/// restantes se ignoran).
pub fn load_recording(path: impl AsRef<Path>) -> Result<Vec<RecordedFrame>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("No se pudo abrir la grabación {:?}", path))?;

    let mut frames_map: BTreeMap<usize, PartialFrame> = BTreeMap::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record =
            result.with_context(|| format!("Fila {} inválida en {:?}", row_idx + 1, path))?;
        if record.len() < 6 {
            bail!("La fila {} no tiene 6 columnas", row_idx + 1);
        }

        let frame_idx: usize = record[0]
            .parse()
            .with_context(|| format!("frame inválido en fila {}", row_idx + 1))?;
        let elapsed: f32 = record[1]
            .parse()
            .with_context(|| format!("elapsed inválido en fila {}", row_idx + 1))?;
        ensure!(
            elapsed >= 0.0,
            "elapsed negativo en fila {}",
            row_idx + 1
        );

        let entry = frames_map.entry(frame_idx).or_insert_with(|| PartialFrame {
            elapsed,
            handedness: None,
            landmarks: [None; NUM_LANDMARKS],
        });
        entry.elapsed = elapsed;

        let handedness = match record[2].trim() {
            "none" => continue,
            "Left" => Handedness::Left,
            "Right" => Handedness::Right,
            other => bail!("Lateralidad desconocida '{}' en fila {}", other, row_idx + 1),
        };
        entry.handedness = Some(handedness);

        let lm_idx: usize = record[3]
            .parse()
            .with_context(|| format!("landmark inválido en fila {}", row_idx + 1))?;
        ensure!(
            lm_idx < NUM_LANDMARKS,
            "Landmark {} fuera de rango (fila {})",
            lm_idx,
            row_idx + 1
        );

        let x: f32 = record[4].parse()?;
        let y: f32 = record[5].parse()?;
        entry.landmarks[lm_idx] = Some(Landmark { x, y });
    }

    if frames_map.is_empty() {
        return Err(anyhow!("La grabación {:?} no contiene datos", path));
    }

    let mut frames = Vec::with_capacity(frames_map.len());
    for (frame_idx, partial) in frames_map {
        let hand = match partial.handedness {
            None => None,
            Some(handedness) => {
                let mut landmarks: LandmarkSet = [Landmark::default(); NUM_LANDMARKS];
                for (i, lm) in partial.landmarks.iter().enumerate() {
                    landmarks[i] =
                        lm.ok_or_else(|| anyhow!("Falta el landmark {} del frame {}", i, frame_idx))?;
                }
                Some(DetectedHand {
                    landmarks,
                    handedness,
                })
            }
        };
        frames.push(RecordedFrame {
            elapsed: partial.elapsed,
            hand,
        });
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;
    use std::fs;
    use std::path::PathBuf;

    fn fixture_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gestomedia_{}", name))
    }

    fn hand_frame_rows(frame: usize, elapsed: f32, hand: &str, y_tips: f32) -> String {
        let mut rows = String::new();
        for lm in 0..NUM_LANDMARKS {
            let y = if matches!(lm, 8 | 12 | 16 | 20) { y_tips } else { 0.5 };
            writeln!(rows, "{},{},{},{},{},{}", frame, elapsed, hand, lm, 0.5, y).unwrap();
        }
        rows
    }

    #[test]
    fn test_load_recording_with_gaps() {
        let mut csv = String::from("frame,elapsed,hand,landmark,x,y\n");
        csv.push_str(&hand_frame_rows(0, 0.0, "Right", 0.3));
        csv.push_str("1,0.1,none,0,0,0\n");
        csv.push_str(&hand_frame_rows(2, 0.2, "Left", 0.7));

        let path = fixture_path("recording_ok.csv");
        fs::write(&path, csv).unwrap();

        let frames = load_recording(&path).unwrap();
        assert_eq!(frames.len(), 3);

        let first = frames[0].hand.unwrap();
        assert_eq!(first.handedness, Handedness::Right);
        assert_eq!(first.landmarks[8], Landmark { x: 0.5, y: 0.3 });

        assert!(frames[1].hand.is_none());
        assert_eq!(frames[1].elapsed, 0.1);

        assert_eq!(frames[2].hand.unwrap().handedness, Handedness::Left);
    }

    #[test]
    fn test_incomplete_hand_is_rejected() {
        let mut csv = String::from("frame,elapsed,hand,landmark,x,y\n");
        csv.push_str("0,0.0,Right,0,0.5,0.5\n");
        csv.push_str("0,0.0,Right,1,0.5,0.5\n");

        let path = fixture_path("recording_incomplete.csv");
        fs::write(&path, csv).unwrap();

        assert!(load_recording(&path).is_err());
    }

    #[test]
    fn test_unknown_handedness_is_rejected() {
        let csv = "frame,elapsed,hand,landmark,x,y\n0,0.0,Ambas,0,0.5,0.5\n";
        let path = fixture_path("recording_bad_hand.csv");
        fs::write(&path, csv).unwrap();

        assert!(load_recording(&path).is_err());
    }

    #[test]
    fn test_empty_recording_is_rejected() {
        let csv = "frame,elapsed,hand,landmark,x,y\n";
        let path = fixture_path("recording_empty.csv");
        fs::write(&path, csv).unwrap();

        assert!(load_recording(&path).is_err());
    }
}
