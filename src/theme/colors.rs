//! 主题颜色定义

use ratatui::style::Color;

use super::ThemeColors;

/// 深色主题（默认）
pub fn dark_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(24, 24, 24),           // 深灰背景
        bg_secondary: Color::Rgb(48, 48, 48), // 选中行背景
        title: Color::Rgb(0, 255, 136),       // 亮绿色
        highlight: Color::Rgb(0, 255, 136),
        text: Color::White,
        muted: Color::Rgb(128, 128, 128),
        border: Color::Rgb(68, 68, 68),
        done: Color::Rgb(0, 255, 136),
        due: Color::Rgb(255, 213, 79), // 黄色
        error: Color::Rgb(255, 85, 85),
        tab_active_fg: Color::Black,
        tab_active_bg: Color::Rgb(0, 255, 136),
    }
}

/// 浅色主题
pub fn light_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(250, 250, 250),
        bg_secondary: Color::Rgb(230, 230, 230),
        title: Color::Rgb(0, 128, 68), // 深绿色
        highlight: Color::Rgb(0, 128, 68),
        text: Color::Rgb(30, 30, 30),
        muted: Color::Rgb(120, 120, 120),
        border: Color::Rgb(200, 200, 200),
        done: Color::Rgb(0, 150, 80),
        due: Color::Rgb(255, 152, 0), // 橙黄色
        error: Color::Rgb(200, 50, 50),
        tab_active_fg: Color::White,
        tab_active_bg: Color::Rgb(0, 128, 68),
    }
}

/// Dracula
pub fn dracula_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(40, 42, 54),
        bg_secondary: Color::Rgb(68, 71, 90),
        title: Color::Rgb(189, 147, 249),     // 紫色
        highlight: Color::Rgb(255, 121, 198), // 粉色
        text: Color::Rgb(248, 248, 242),
        muted: Color::Rgb(98, 114, 164),
        border: Color::Rgb(68, 71, 90),
        done: Color::Rgb(80, 250, 123),
        due: Color::Rgb(241, 250, 140),
        error: Color::Rgb(255, 85, 85),
        tab_active_fg: Color::Rgb(40, 42, 54),
        tab_active_bg: Color::Rgb(255, 121, 198),
    }
}

/// Nord
pub fn nord_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(46, 52, 64),           // polar night
        bg_secondary: Color::Rgb(59, 66, 82), // polar night lighter
        title: Color::Rgb(136, 192, 208),     // frost
        highlight: Color::Rgb(129, 161, 193),
        text: Color::Rgb(236, 239, 244), // snow storm
        muted: Color::Rgb(76, 86, 106),
        border: Color::Rgb(59, 66, 82),
        done: Color::Rgb(163, 190, 140), // aurora green
        due: Color::Rgb(235, 203, 139),  // aurora yellow
        error: Color::Rgb(191, 97, 106), // aurora red
        tab_active_fg: Color::Rgb(46, 52, 64),
        tab_active_bg: Color::Rgb(136, 192, 208),
    }
}

/// Gruvbox
pub fn gruvbox_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(40, 40, 40),           // bg0
        bg_secondary: Color::Rgb(60, 56, 54), // bg1
        title: Color::Rgb(250, 189, 47),      // yellow
        highlight: Color::Rgb(254, 128, 25),  // orange
        text: Color::Rgb(235, 219, 178),
        muted: Color::Rgb(146, 131, 116),
        border: Color::Rgb(80, 73, 69),
        done: Color::Rgb(184, 187, 38),
        due: Color::Rgb(250, 189, 47),
        error: Color::Rgb(251, 73, 52),
        tab_active_fg: Color::Rgb(40, 40, 40),
        tab_active_bg: Color::Rgb(250, 189, 47),
    }
}
