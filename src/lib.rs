pub mod finger_counter;
pub mod gesture_dispatcher;
pub mod hid;
pub mod landmark_csv;
pub mod landmarker;
pub mod overlay;
pub mod types;
