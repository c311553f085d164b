/// Punto 2D de la mano en coordenadas normalizadas [0,1] de la imagen
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

/// Conjunto completo de 21 puntos con índices fijos (convención MediaPipe)
pub type LandmarkSet = [Landmark; NUM_LANDMARKS];

/// Lateralidad de la mano detectada, válida solo para el frame actual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Deriva la etiqueta desde el score del modelo sobre la imagen en espejo
    pub fn from_score(score: f32) -> Self {
        if score >= 0.5 {
            Handedness::Right
        } else {
            Handedness::Left
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }
}

/// Una mano detectada en un frame; no hay identidad entre frames
#[derive(Debug, Clone, Copy)]
pub struct DetectedHand {
    pub landmarks: LandmarkSet,
    pub handedness: Handedness,
}

/// Constantes del sistema
pub const NUM_LANDMARKS: usize = 21;

/// Índices fijos de los landmarks del pulgar
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;

/// Pares (punta, articulación pip) de índice, medio, anular y meñique
pub const FINGER_TIP_PIP: [(usize, usize); 4] = [(8, 6), (12, 10), (16, 14), (20, 18)];

/// Aristas del esqueleto de la mano para anotar el frame de cámara
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];
