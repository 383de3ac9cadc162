/// Number of category tiles the budget overview shows.
pub const DASHBOARD_CATEGORY_LIMIT: usize = 9;

/// Largest amount a single budget or expense may hold.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Color used when a category has none.
pub const DEFAULT_COLOR: &str = "primary";

pub const AVAILABLE_ICONS: [&str; 15] = [
    "mdi-food",
    "mdi-train",
    "mdi-movie",
    "mdi-lightning-bolt",
    "mdi-cellphone",
    "mdi-medical-bag",
    "mdi-tshirt-crew",
    "mdi-face-woman",
    "mdi-dots-horizontal",
    "mdi-home",
    "mdi-car",
    "mdi-book",
    "mdi-briefcase",
    "mdi-shopping",
    "mdi-gamepad-variant",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOption {
    pub title: &'static str,
    pub value: &'static str,
}

pub const COLOR_OPTIONS: [ColorOption; 12] = [
    ColorOption { title: "プライマリー", value: "primary" },
    ColorOption { title: "セカンダリー", value: "secondary" },
    ColorOption { title: "成功", value: "success" },
    ColorOption { title: "情報", value: "info" },
    ColorOption { title: "警告", value: "warning" },
    ColorOption { title: "エラー", value: "error" },
    ColorOption { title: "赤", value: "red" },
    ColorOption { title: "ピンク", value: "pink" },
    ColorOption { title: "紫", value: "purple" },
    ColorOption { title: "青", value: "blue" },
    ColorOption { title: "緑", value: "green" },
    ColorOption { title: "オレンジ", value: "orange" },
];

pub fn is_available_icon(icon: &str) -> bool {
    AVAILABLE_ICONS.contains(&icon)
}

pub fn is_color_option(color: &str) -> bool {
    COLOR_OPTIONS.iter().any(|option| option.value == color)
}
