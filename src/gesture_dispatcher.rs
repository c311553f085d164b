use std::time::{Duration, Instant};

use crate::hid::MediaAction;

/// Parámetros de confirmación de gestos
#[derive(Debug, Clone)]
pub struct DebounceParams {
    /// Tiempo mínimo que un conteo nuevo debe sostenerse antes de disparar
    /// (default: 500 ms)
    pub dwell: Duration,
    /// Ventana durante la cual el mensaje de confirmación sigue visible
    /// (default: 3 s)
    pub confirm_window: Duration,
}

impl Default for DebounceParams {
    fn default() -> Self {
        Self {
            dwell: Duration::from_millis(500),
            confirm_window: Duration::from_secs(3),
        }
    }
}

/// Máquina de estados que estabiliza el conteo de dedos y dispara como
/// máximo un comando por transición estable.
///
/// El dwell filtra los conteos transitorios que aparecen mientras la mano
/// se mueve hacia el gesto final. Un conteo igual al último confirmado
/// nunca vuelve a disparar, por mucho que se sostenga: hace falta
/// confirmar otro conteo en el medio. Los frames sin mano no avanzan ni
/// reinician el temporizador.
pub struct GestureDebouncer {
    params: DebounceParams,
    last_confirmed: Option<u8>,
    pending_count: u8,
    pending_since: Option<Instant>,
    last_fired_at: Option<Instant>,
    last_message: String,
}

impl GestureDebouncer {
    pub fn new(params: DebounceParams) -> Self {
        Self {
            params,
            last_confirmed: None,
            pending_count: 0,
            pending_since: None,
            last_fired_at: None,
            last_message: String::new(),
        }
    }

    /// Procesa el conteo observado en un frame con mano detectada.
    /// Retorna la acción a ejecutar cuando el conteo queda confirmado.
    pub fn observe(&mut self, count: u8, now: Instant) -> Option<MediaAction> {
        if self.last_confirmed == Some(count) {
            return None;
        }

        let Some(started) = self.pending_since else {
            self.pending_since = Some(now);
            self.pending_count = count;
            return None;
        };

        // El temporizador corre desde la primera divergencia; un parpadeo
        // entre conteos todavía no confirmados no lo reinicia
        self.pending_count = count;
        if now.duration_since(started) <= self.params.dwell {
            return None;
        }

        let action = MediaAction::for_count(count);
        self.last_confirmed = Some(count);
        self.pending_since = None;
        self.last_fired_at = Some(now);
        if let Some(action) = action {
            self.last_message = action.label().to_string();
        }
        action
    }

    /// Mensaje de confirmación vigente, si el último disparo quedó dentro
    /// de la ventana de visibilidad
    pub fn confirmation(&self, now: Instant) -> Option<&str> {
        if self.last_message.is_empty() {
            return None;
        }
        let fired = self.last_fired_at?;
        if now.duration_since(fired) < self.params.confirm_window {
            Some(self.last_message.as_str())
        } else {
            None
        }
    }

    /// Último conteo confirmado
    pub fn last_confirmed(&self) -> Option<u8> {
        self.last_confirmed
    }

    /// Conteo en espera de confirmación, si hay un dwell en curso
    pub fn pending(&self) -> Option<u8> {
        self.pending_since.map(|_| self.pending_count)
    }

    /// Estado actual de la máquina (para diagnóstico)
    pub fn state(&self) -> &'static str {
        match self.pending_since {
            None => "IDLE",
            Some(_) => "PENDING",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, secs: f32) -> Instant {
        base + Duration::from_secs_f32(secs)
    }

    #[test]
    fn test_initial_state_idle() {
        let d = GestureDebouncer::new(DebounceParams::default());
        assert_eq!(d.state(), "IDLE");
        assert_eq!(d.last_confirmed(), None);
        assert_eq!(d.confirmation(Instant::now()), None);
    }

    #[test]
    fn test_rapid_flicker_does_not_fire() {
        let base = Instant::now();
        let mut d = GestureDebouncer::new(DebounceParams::default());

        // 10 frames con conteo 3 repartidos en menos de medio segundo
        for i in 0..10 {
            assert_eq!(d.observe(3, at(base, 0.05 * i as f32)), None);
        }

        assert_eq!(d.state(), "PENDING");
        assert_eq!(d.pending(), Some(3));
        assert_eq!(d.last_confirmed(), None);
    }

    #[test]
    fn test_dwell_boundary_is_strict() {
        let base = Instant::now();
        let mut d = GestureDebouncer::new(DebounceParams::default());

        assert_eq!(d.observe(3, at(base, 0.0)), None);
        // Exactamente en el umbral todavía no dispara
        assert_eq!(d.observe(3, at(base, 0.5)), None);
        assert_eq!(d.observe(3, at(base, 0.51)), Some(MediaAction::NextTrack));
    }

    #[test]
    fn test_sustained_count_fires_exactly_once() {
        let base = Instant::now();
        let mut d = GestureDebouncer::new(DebounceParams::default());

        let mut fired = Vec::new();
        for i in 0..10 {
            if let Some(action) = d.observe(3, at(base, 0.15 * i as f32)) {
                fired.push((i, action));
            }
        }

        assert_eq!(fired, vec![(4, MediaAction::NextTrack)]);
        assert_eq!(d.last_confirmed(), Some(3));
        assert_eq!(d.state(), "IDLE");

        // Repetir el conteo ya confirmado nunca vuelve a disparar,
        // incluso mucho tiempo después
        assert_eq!(d.observe(3, at(base, 30.0)), None);
        assert_eq!(d.state(), "IDLE");
    }

    #[test]
    fn test_gap_frames_do_not_reset_timer() {
        let base = Instant::now();
        let mut d = GestureDebouncer::new(DebounceParams::default());

        // Conteo 2 en t=0; entre t=0.1 y t=0.4 no hay mano (no se observa
        // nada); el mismo conteo reaparece en t=0.6 y el temporizador sigue
        // midiendo desde t=0
        assert_eq!(d.observe(2, at(base, 0.0)), None);
        assert_eq!(d.observe(2, at(base, 0.6)), Some(MediaAction::VolumeDown));
    }

    #[test]
    fn test_sequence_fires_single_volume_up() {
        let base = Instant::now();
        let mut d = GestureDebouncer::new(DebounceParams::default());

        let counts = [0u8, 0, 1, 1, 1, 1, 1, 1, 1, 1];
        let mut fired = Vec::new();
        for (i, &count) in counts.iter().enumerate() {
            if let Some(action) = d.observe(count, at(base, 0.1 * i as f32)) {
                fired.push(action);
            }
        }

        assert_eq!(fired, vec![MediaAction::VolumeUp]);
        assert_eq!(d.last_confirmed(), Some(1));
    }

    #[test]
    fn test_pending_flicker_keeps_original_timer() {
        let base = Instant::now();
        let mut d = GestureDebouncer::new(DebounceParams::default());

        // El conteo parpadea entre valores no confirmados; el disparo llega
        // con el conteo vigente al expirar el dwell iniciado en t=0
        assert_eq!(d.observe(2, at(base, 0.0)), None);
        assert_eq!(d.observe(4, at(base, 0.2)), None);
        assert_eq!(d.observe(5, at(base, 0.6)), Some(MediaAction::PlayPause));
        assert_eq!(d.last_confirmed(), Some(5));
    }

    #[test]
    fn test_count_zero_confirms_silently() {
        let base = Instant::now();
        let mut d = GestureDebouncer::new(DebounceParams::default());

        d.observe(2, at(base, 0.0));
        assert_eq!(d.observe(2, at(base, 0.6)), Some(MediaAction::VolumeDown));
        assert_eq!(d.confirmation(at(base, 0.7)), Some("Volume Down"));

        // Pasada la ventana de 3 s el mensaje desaparece
        assert_eq!(d.confirmation(at(base, 4.0)), None);

        // Confirmar el conteo 0 no dispara acción pero reactiva el mensaje
        // anterior con su ventana completa
        assert_eq!(d.observe(0, at(base, 4.0)), None);
        assert_eq!(d.observe(0, at(base, 4.7)), None);
        assert_eq!(d.last_confirmed(), Some(0));
        assert_eq!(d.confirmation(at(base, 4.8)), Some("Volume Down"));

        // Tras pasar por 0, el mismo gesto de antes vuelve a disparar
        d.observe(2, at(base, 5.0));
        assert_eq!(d.observe(2, at(base, 5.6)), Some(MediaAction::VolumeDown));
    }
}
