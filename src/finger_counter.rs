use crate::types::{Handedness, LandmarkSet, FINGER_TIP_PIP, THUMB_IP, THUMB_TIP};

/// Cuenta los dedos extendidos de una mano a partir de sus landmarks.
///
/// El pulgar se evalúa sobre el eje x comparando la punta con la
/// articulación interfalángica; la dirección de la comparación se invierte
/// según la lateralidad porque la cámara frontal entrega la imagen en
/// espejo. Los otros cuatro dedos cuentan como extendidos cuando la punta
/// queda por encima de su pip (y menor = más arriba en la imagen). La
/// heurística solo es válida con los dedos apuntando hacia arriba.
pub fn count_fingers(landmarks: &LandmarkSet, handedness: Handedness) -> u8 {
    let mut extended = 0u8;

    let thumb_tip = landmarks[THUMB_TIP];
    let thumb_ip = landmarks[THUMB_IP];
    let thumb_extended = match handedness {
        Handedness::Right => thumb_tip.x < thumb_ip.x,
        Handedness::Left => thumb_tip.x > thumb_ip.x,
    };
    if thumb_extended {
        extended += 1;
    }

    for (tip, pip) in FINGER_TIP_PIP {
        if landmarks[tip].y < landmarks[pip].y {
            extended += 1;
        }
    }

    extended
}
