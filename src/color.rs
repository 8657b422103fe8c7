use eframe::egui::Color32;

/// Line colours of the two chart series, in series order.
pub const SERIES_COLORS: [Color32; 2] = [
    Color32::from_rgb(0x88, 0x84, 0xd8),
    Color32::from_rgb(0x82, 0xca, 0x9d),
];
