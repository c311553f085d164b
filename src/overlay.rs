use anyhow::{ensure, Context, Result};
use opencv::core::{Mat, Point, Rect, Scalar, Size};
use opencv::prelude::*;
use opencv::{imgcodecs, imgproc};

use crate::types::{DetectedHand, HAND_CONNECTIONS};

/// Lienzo de salida fijo
pub const CANVAS_WIDTH: i32 = 1280;
pub const CANVAS_HEIGHT: i32 = 720;

/// Recuadro donde se incrusta la cámara en vivo
const CAM_BOX: Rect = Rect {
    x: 50,
    y: 150,
    width: 900,
    height: 500,
};

/// Recuadro donde se centra el texto de confirmación
const CONFIRM_BOX: Rect = Rect {
    x: 980,
    y: 150,
    width: 270,
    height: 110,
};

const FONT: i32 = imgproc::FONT_HERSHEY_SIMPLEX;
const FONT_SCALE: f64 = 1.0;
const FONT_THICKNESS: i32 = 2;

/// Composición del frame de salida: arte de fondo estático, cámara en vivo
/// incrustada y texto de confirmación transitorio.
pub struct OverlayCanvas {
    background: Mat,
}

impl OverlayCanvas {
    /// Carga el arte de fondo y lo ajusta al lienzo. Que falte el archivo
    /// es un error fatal de configuración, no una condición por frame.
    pub fn load(path: &str) -> Result<Self> {
        let raw = imgcodecs::imread(path, imgcodecs::IMREAD_COLOR)
            .with_context(|| format!("No se pudo leer el fondo {}", path))?;
        ensure!(!raw.empty(), "No se encontró la imagen de fondo en {}", path);

        let mut background = Mat::default();
        imgproc::resize(
            &raw,
            &mut background,
            Size::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            0.0,
            0.0,
            imgproc::INTER_LINEAR,
        )?;

        Ok(Self { background })
    }

    /// Construye el frame de salida. El fondo original nunca se modifica:
    /// cada frame trabaja sobre una copia.
    pub fn compose(&self, camera_frame: &Mat, confirmation: Option<&str>) -> Result<Mat> {
        let mut canvas = self.background.try_clone()?;

        let mut cam = Mat::default();
        imgproc::resize(
            camera_frame,
            &mut cam,
            Size::new(CAM_BOX.width, CAM_BOX.height),
            0.0,
            0.0,
            imgproc::INTER_LINEAR,
        )?;
        let mut roi = Mat::roi_mut(&mut canvas, CAM_BOX)?;
        cam.copy_to(&mut roi)?;

        if let Some(text) = confirmation {
            let origin = centered_text_origin(text)?;
            imgproc::put_text(
                &mut canvas,
                text,
                origin,
                FONT,
                FONT_SCALE,
                Scalar::new(255.0, 255.0, 255.0, 0.0),
                FONT_THICKNESS,
                imgproc::LINE_AA,
                false,
            )?;
        }

        Ok(canvas)
    }
}

/// Origen del texto para que quede centrado en el recuadro de confirmación
fn centered_text_origin(text: &str) -> Result<Point> {
    let mut baseline = 0;
    let size = imgproc::get_text_size(text, FONT, FONT_SCALE, FONT_THICKNESS, &mut baseline)?;

    Ok(Point::new(
        CONFIRM_BOX.x + (CONFIRM_BOX.width - size.width) / 2,
        CONFIRM_BOX.y + (CONFIRM_BOX.height + size.height) / 2 - baseline,
    ))
}

/// Dibuja el esqueleto de la mano sobre el frame de cámara
pub fn draw_landmarks(frame: &mut Mat, hand: &DetectedHand) -> Result<()> {
    let width = frame.cols() as f32;
    let height = frame.rows() as f32;
    let point = |i: usize| {
        let lm = hand.landmarks[i];
        Point::new((lm.x * width) as i32, (lm.y * height) as i32)
    };

    for (a, b) in HAND_CONNECTIONS {
        imgproc::line(
            frame,
            point(a),
            point(b),
            Scalar::new(0.0, 255.0, 0.0, 0.0),
            2,
            imgproc::LINE_AA,
            0,
        )?;
    }

    for i in 0..hand.landmarks.len() {
        imgproc::circle(
            frame,
            point(i),
            4,
            Scalar::new(0.0, 0.0, 255.0, 0.0),
            imgproc::FILLED,
            imgproc::LINE_AA,
            0,
        )?;
    }

    Ok(())
}
