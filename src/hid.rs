use std::time::Duration;
use uinput::device::Device;
use uinput::event::keyboard;

/// Acción multimedia asociada a un conteo de dedos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAction {
    VolumeUp,
    VolumeDown,
    NextTrack,
    PrevTrack,
    PlayPause,
}

impl MediaAction {
    /// Mapa fijo conteo → acción; 0 no dispara nada
    pub fn for_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(MediaAction::VolumeUp),
            2 => Some(MediaAction::VolumeDown),
            3 => Some(MediaAction::NextTrack),
            4 => Some(MediaAction::PrevTrack),
            5 => Some(MediaAction::PlayPause),
            _ => None,
        }
    }

    /// Texto de confirmación que se dibuja en pantalla
    pub fn label(&self) -> &'static str {
        match self {
            MediaAction::VolumeUp => "Volume Up",
            MediaAction::VolumeDown => "Volume Down",
            MediaAction::NextTrack => "Next Track",
            MediaAction::PrevTrack => "Previous Track",
            MediaAction::PlayPause => "Play / Pause",
        }
    }

    /// Nombre de la tecla virtual que se pulsa
    pub fn key_name(&self) -> &'static str {
        match self {
            MediaAction::VolumeUp => "volumeup",
            MediaAction::VolumeDown => "volumedown",
            MediaAction::NextTrack => "nexttrack",
            MediaAction::PrevTrack => "prevtrack",
            MediaAction::PlayPause => "playpause",
        }
    }

    fn key(&self) -> keyboard::Misc {
        match self {
            MediaAction::VolumeUp => keyboard::Misc::VolumeUp,
            MediaAction::VolumeDown => keyboard::Misc::VolumeDown,
            MediaAction::NextTrack => keyboard::Misc::NextSong,
            MediaAction::PrevTrack => keyboard::Misc::PreviousSong,
            MediaAction::PlayPause => keyboard::Misc::PlayPause,
        }
    }
}

pub struct HidOutput {
    dev: Device,
}

impl HidOutput {
    pub fn new() -> Result<Self, uinput::Error> {
        let dev = uinput::default()?
            .name("gestomedia-hid")?
            .event(uinput::event::Keyboard::All)?
            .create()?;

        Ok(HidOutput { dev })
    }

    fn sync(&mut self) -> Result<(), uinput::Error> {
        self.dev.synchronize()
    }

    fn key_tap(&mut self, key: keyboard::Misc) -> Result<(), uinput::Error> {
        self.dev.press(&keyboard::Keyboard::Misc(key))?;
        self.sync()?;
        std::thread::sleep(Duration::from_millis(10));
        self.dev.release(&keyboard::Keyboard::Misc(key))?;
        self.sync()
    }

    /// Pulsa la tecla multimedia correspondiente a la acción
    pub fn send(&mut self, action: MediaAction) -> Result<(), uinput::Error> {
        self.key_tap(action.key())
    }
}
