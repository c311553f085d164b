use opencv::core::{Mat, Size};
use opencv::imgproc;
use opencv::prelude::*;
use ort::session::Session;
use thiserror::Error;

use crate::types::{DetectedHand, Handedness, Landmark, LandmarkSet, NUM_LANDMARKS};

/// Lado del tensor de entrada del modelo (cuadrado, RGB)
const INPUT_SIZE: i32 = 224;

/// Score mínimo de presencia para aceptar la detección
const PRESENCE_THRESHOLD: f32 = 0.7;

#[derive(Error, Debug)]
pub enum LandmarkerError {
    #[error("ONNX Runtime error: {0}")]
    Onnx(#[from] ort::Error),

    #[error("OpenCV error: {0}")]
    Opencv(#[from] opencv::Error),

    #[error("El modelo no expone {kind}")]
    MissingIo { kind: &'static str },

    #[error("Salida de landmarks inválida: se esperaban {expected} valores, llegaron {actual}")]
    InvalidLandmarkOutput { expected: usize, actual: usize },
}

/// Detector de landmarks de mano sobre un modelo ONNX estilo MediaPipe.
///
/// El modelo recibe un frame RGB de 224x224 normalizado a [0,1] y entrega
/// tres tensores: los 21 puntos (x, y, z) en píxeles de la entrada, un
/// score de presencia de mano y un score de lateralidad.
pub struct HandLandmarker {
    session: Session,
    input_name: String,
    output_names: Vec<String>,
}

impl HandLandmarker {
    pub fn new(model_path: &str) -> Result<Self, LandmarkerError> {
        let session = Session::builder()?.commit_from_file(model_path)?;

        let input_name = session
            .inputs
            .get(0)
            .map(|input| input.name.clone())
            .ok_or(LandmarkerError::MissingIo { kind: "input" })?;

        let output_names: Vec<String> =
            session.outputs.iter().map(|output| output.name.clone()).collect();
        if output_names.len() < 3 {
            return Err(LandmarkerError::MissingIo {
                kind: "outputs (landmarks, presencia, lateralidad)",
            });
        }

        println!("[ONNX] Modelo de landmarks cargado: {}", model_path);
        println!("[ONNX] Input: {}", input_name);
        println!("[ONNX] Outputs: {:?}", output_names);

        Ok(Self {
            session,
            input_name,
            output_names,
        })
    }

    /// Detecta como máximo una mano en el frame (BGR).
    /// Retorna None cuando la presencia queda por debajo del umbral.
    pub fn detect(&mut self, frame: &Mat) -> Result<Option<DetectedHand>, LandmarkerError> {
        let input_data = self.prepare_input(frame)?;
        let shape_vec = vec![
            1_usize,
            INPUT_SIZE as usize,
            INPUT_SIZE as usize,
            3_usize,
        ];
        let input_value = ort::value::Value::from_array((shape_vec, input_data))?;

        let outputs = self.session.run(ort::inputs![
            self.input_name.as_str() => &input_value,
        ])?;

        let (_, presence) =
            outputs[self.output_names[1].as_str()].try_extract_tensor::<f32>()?;
        if presence.first().copied().unwrap_or(0.0) < PRESENCE_THRESHOLD {
            return Ok(None);
        }

        let (_, coords) = outputs[self.output_names[0].as_str()].try_extract_tensor::<f32>()?;
        if coords.len() < NUM_LANDMARKS * 3 {
            return Err(LandmarkerError::InvalidLandmarkOutput {
                expected: NUM_LANDMARKS * 3,
                actual: coords.len(),
            });
        }

        let (_, handed) = outputs[self.output_names[2].as_str()].try_extract_tensor::<f32>()?;
        let handedness = Handedness::from_score(handed.first().copied().unwrap_or(1.0));

        // Las coordenadas llegan en píxeles de la entrada; la z (profundidad
        // relativa) se descarta
        let scale = INPUT_SIZE as f32;
        let mut landmarks: LandmarkSet = [Landmark::default(); NUM_LANDMARKS];
        for (i, lm) in landmarks.iter_mut().enumerate() {
            lm.x = (coords[i * 3] / scale).clamp(0.0, 1.0);
            lm.y = (coords[i * 3 + 1] / scale).clamp(0.0, 1.0);
        }

        Ok(Some(DetectedHand {
            landmarks,
            handedness,
        }))
    }

    /// Redimensiona y normaliza el frame al tensor NHWC [1, 224, 224, 3]
    fn prepare_input(&self, frame: &Mat) -> Result<Vec<f32>, LandmarkerError> {
        let mut resized = Mat::default();
        imgproc::resize(
            frame,
            &mut resized,
            Size::new(INPUT_SIZE, INPUT_SIZE),
            0.0,
            0.0,
            imgproc::INTER_LINEAR,
        )?;

        let mut rgb = Mat::default();
        imgproc::cvt_color(&resized, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;

        let bytes = rgb.data_bytes()?;
        Ok(bytes.iter().map(|&b| b as f32 / 255.0).collect())
    }
}
