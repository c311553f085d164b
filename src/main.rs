/*
Control Multimedia por Gestos de Mano - Rust + ONNX

Lee la cámara web, detecta una mano con un modelo de landmarks ONNX,
cuenta los dedos extendidos y dispara teclas multimedia virtuales tras
medio segundo de gesto estable:

    1 dedo  → subir volumen        4 dedos → pista anterior
    2 dedos → bajar volumen        5 dedos → reproducir/pausar
    3 dedos → pista siguiente

Antes de ejecutar, colocar el modelo de landmarks en hand_landmark_full.onnx
y el arte de fondo en assets/Gesture Control Overlay.png.

Se necesita acceso a /dev/uinput para inyectar teclas:
    sg input -c './target/release/gestomedia'

Salir con ESC.
*/

use std::time::Instant;

use anyhow::{anyhow, ensure, Context, Result};
use opencv::core::{self, Mat};
use opencv::prelude::*;
use opencv::{highgui, videoio};

use gestomedia::finger_counter::count_fingers;
use gestomedia::gesture_dispatcher::{DebounceParams, GestureDebouncer};
use gestomedia::hid::HidOutput;
use gestomedia::landmarker::HandLandmarker;
use gestomedia::overlay::{self, OverlayCanvas};

const WINDOW_TITLE: &str = "Gesture Media Controller";
const OVERLAY_PATH: &str = "assets/Gesture Control Overlay.png";
const MODEL_PATH: &str = "hand_landmark_full.onnx";

/// Tecla de salida (ESC)
const QUIT_KEY: i32 = 27;

fn main() -> Result<()> {
    println!("🎯 Gesture Media Controller - Rust + ONNX\n");

    let overlay = OverlayCanvas::load(OVERLAY_PATH)?;
    println!("✅ Arte de fondo cargado");

    let mut landmarker = HandLandmarker::new(MODEL_PATH)?;
    println!("✅ Detector de landmarks listo");

    let mut hid = HidOutput::new()
        .map_err(|e| anyhow!("No se pudo inicializar HID (/dev/uinput): {}", e))?;
    println!("✅ HID inicializado (/dev/uinput)");

    let mut cap = videoio::VideoCapture::new(0, videoio::CAP_ANY)
        .context("No se pudo crear la captura de cámara")?;
    ensure!(cap.is_opened()?, "No se pudo abrir la cámara 0");
    cap.set(videoio::CAP_PROP_FRAME_WIDTH, f64::from(overlay::CANVAS_WIDTH))?;
    cap.set(videoio::CAP_PROP_FRAME_HEIGHT, f64::from(overlay::CANVAS_HEIGHT))?;
    println!("✅ Cámara abierta\n");

    highgui::named_window(WINDOW_TITLE, highgui::WINDOW_AUTOSIZE)?;

    let mut debouncer = GestureDebouncer::new(DebounceParams::default());
    let mut frame = Mat::default();
    let mut mirrored = Mat::default();

    println!("🎬 Reconocimiento en marcha (ESC para salir)...\n");

    loop {
        let now = Instant::now();

        if !cap.read(&mut frame)? || frame.empty() {
            println!("📷 Fin de la captura");
            break;
        }

        // Espejo horizontal: la vista propia resulta más natural
        core::flip(&frame, &mut mirrored, 1)?;

        match landmarker.detect(&mirrored) {
            Ok(Some(hand)) => {
                let count = count_fingers(&hand.landmarks, hand.handedness);

                if let Some(action) = debouncer.observe(count, now) {
                    println!("🎮 {} dedos → {} ({})", count, action.label(), action.key_name());
                    if let Err(e) = hid.send(action) {
                        eprintln!("❌ Error enviando tecla {}: {}", action.key_name(), e);
                    }
                }

                overlay::draw_landmarks(&mut mirrored, &hand)?;
            }
            // Frame sin mano: el gesto pendiente no avanza ni se cancela
            Ok(None) => {}
            Err(e) => eprintln!("❌ Error detectando mano: {}", e),
        }

        let canvas = overlay.compose(&mirrored, debouncer.confirmation(now))?;
        highgui::imshow(WINDOW_TITLE, &canvas)?;

        if highgui::wait_key(1)? & 0xFF == QUIT_KEY {
            println!("👋 Saliendo...");
            break;
        }
    }

    // La cámara se libera al salir del scope
    highgui::destroy_all_windows()?;
    Ok(())
}
