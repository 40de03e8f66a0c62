//! Per-backend colors. Unknown labels fall back to [`BackendTheme::DEFAULT`].

use eframe::egui::Color32;
use shared::domain::BackendLabel;

const GRAY_200: Color32 = Color32::from_rgb(229, 231, 235);
const GRAY_300: Color32 = Color32::from_rgb(209, 213, 219);
const GRAY_400: Color32 = Color32::from_rgb(156, 163, 175);
const GRAY_600: Color32 = Color32::from_rgb(75, 85, 99);
const GRAY_700: Color32 = Color32::from_rgb(55, 65, 81);

pub const FORM_FILL: Color32 = GRAY_400;
pub const CARD_FILL: Color32 = Color32::WHITE;
pub const ERROR_TEXT: Color32 = Color32::from_rgb(185, 28, 28);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownBackend {
    Go,
}

impl KnownBackend {
    pub fn from_label(label: &BackendLabel) -> Option<Self> {
        match label.as_str() {
            "go" => Some(KnownBackend::Go),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTheme {
    pub accent: Color32,
    pub button: Color32,
    pub button_hover: Color32,
}

impl BackendTheme {
    pub const DEFAULT: BackendTheme = BackendTheme {
        accent: GRAY_200,
        button: GRAY_700,
        button_hover: GRAY_600,
    };

    pub fn for_backend(backend: KnownBackend) -> Self {
        match backend {
            KnownBackend::Go => BackendTheme {
                accent: GRAY_300,
                button: Color32::BLACK,
                button_hover: GRAY_600,
            },
        }
    }

    pub fn for_label(label: &BackendLabel) -> Self {
        KnownBackend::from_label(label)
            .map(Self::for_backend)
            .unwrap_or(Self::DEFAULT)
    }
}
