use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Styles for the labeled lines of the details pane.
#[derive(Clone, Copy)]
pub struct DetailStyle {
    /// The name header line.
    pub header: Color,
    /// Field labels ("House:", "Wand:", ...).
    pub label: Color,
    /// Field values.
    pub value: Color,
}

/// Complete theme configuration for ratatui
#[derive(Clone)]
pub struct ThemeConfig {
    #[allow(dead_code)]
    pub background: Color,
    pub list_normal: Style,
    pub list_selected: Style,
    pub border: Style,
    pub border_selected: Style,
    pub title: Style,
    pub text: Style,
    pub error: Style,
    pub detail_style: DetailStyle,
}

/// Named themes selectable with `--theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Hogwarts,
    Dracula,
    Gruvbox,
    Solarized,
}

impl Theme {
    pub fn config(self) -> ThemeConfig {
        match self {
            Theme::Hogwarts => hogwarts_theme(),
            Theme::Dracula => dracula_theme(),
            Theme::Gruvbox => gruvbox_theme(),
            Theme::Solarized => solarized_dark(),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hogwarts" => Ok(Theme::Hogwarts),
            "dracula" => Ok(Theme::Dracula),
            "gruvbox" => Ok(Theme::Gruvbox),
            "solarized" => Ok(Theme::Solarized),
            other => Err(format!(
                "Unknown theme '{}' (expected hogwarts, dracula, gruvbox or solarized)",
                other
            )),
        }
    }
}

/// Returns the default ThemeConfig: a night-sky palette with a gold
/// selection bar.
#[allow(unused_variables)]
pub fn hogwarts_theme() -> ThemeConfig {
    let night = Color::Rgb(26, 26, 46);
    let panel = Color::Rgb(22, 33, 62);
    let deep_blue = Color::Rgb(15, 52, 96);
    let parchment = Color::Rgb(173, 218, 229);
    let sky = Color::Rgb(91, 195, 230);
    let lilac = Color::Rgb(158, 120, 210);
    let violet = Color::Rgb(83, 52, 131);
    let gold = Color::Rgb(255, 215, 0);
    let crimson = Color::Rgb(233, 69, 96);
    let ink = Color::Rgb(26, 0, 51);

    let detail_style = DetailStyle {
        header: gold,
        label: sky,
        value: parchment,
    };

    ThemeConfig {
        background: night,
        list_normal: Style::default().fg(parchment).bg(panel),
        list_selected: Style::default()
            .fg(ink)
            .bg(gold)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(violet),
        border_selected: Style::default().fg(gold),
        title: Style::default().fg(lilac).add_modifier(Modifier::BOLD),
        text: Style::default().fg(parchment).bg(panel),
        error: Style::default().fg(crimson).add_modifier(Modifier::BOLD),
        detail_style,
    }
}

/// Returns a ThemeConfig based on the Dracula color palette.
#[allow(unused_variables)]
pub fn dracula_theme() -> ThemeConfig {
    // Dracula palette
    let bg = Color::Rgb(40, 42, 54);
    let selection = Color::Rgb(68, 71, 90);
    let fg = Color::Rgb(248, 248, 242);
    let comment = Color::Rgb(98, 114, 164);
    let purple = Color::Rgb(189, 147, 249);
    let yellow = Color::Rgb(241, 250, 140);
    let orange = Color::Rgb(255, 184, 108);
    let red = Color::Rgb(255, 85, 85);
    let pink = Color::Rgb(255, 121, 198);
    let cyan = Color::Rgb(139, 233, 253);

    let detail_style = DetailStyle {
        header: purple,
        label: cyan,
        value: fg,
    };

    ThemeConfig {
        background: bg,
        list_normal: Style::default().fg(fg).bg(bg),
        list_selected: Style::default()
            .fg(fg)
            .bg(selection)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(comment),
        border_selected: Style::default().fg(purple),
        title: Style::default().fg(purple).add_modifier(Modifier::BOLD),
        text: Style::default().fg(fg).bg(bg),
        error: Style::default().fg(red).add_modifier(Modifier::BOLD),
        detail_style,
    }
}

/// Returns a ThemeConfig based on the Gruvbox Dark color palette.
#[allow(unused_variables)]
pub fn gruvbox_theme() -> ThemeConfig {
    // Gruvbox Dark palette
    let bg0 = Color::Rgb(40, 40, 40);
    let bg1 = Color::Rgb(60, 56, 54); // bg2
    let fg0 = Color::Rgb(251, 241, 199);
    let fg1 = Color::Rgb(235, 219, 178);
    let gray = Color::Rgb(146, 131, 116);
    let blue = Color::Rgb(69, 133, 136);
    let green = Color::Rgb(152, 151, 26);
    let orange = Color::Rgb(214, 93, 14);
    let red = Color::Rgb(204, 36, 29);
    let purple = Color::Rgb(177, 98, 134);

    let detail_style = DetailStyle {
        header: orange,
        label: blue,
        value: fg1,
    };

    ThemeConfig {
        background: bg0,
        list_normal: Style::default().fg(fg1).bg(bg0),
        list_selected: Style::default()
            .fg(bg0)
            .bg(fg1)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(gray),
        border_selected: Style::default().fg(orange),
        title: Style::default().fg(orange).add_modifier(Modifier::BOLD),
        text: Style::default().fg(fg1).bg(bg0),
        error: Style::default().fg(red).add_modifier(Modifier::BOLD),
        detail_style,
    }
}

/// Returns a ThemeConfig based on the Solarized Dark color palette.
#[allow(unused_variables)]
pub fn solarized_dark() -> ThemeConfig {
    // Solarized Dark palette
    let base03 = Color::Rgb(0, 43, 54);
    let base02 = Color::Rgb(7, 54, 66);
    let base01 = Color::Rgb(88, 110, 117);
    let base0 = Color::Rgb(131, 148, 150);
    let base3 = Color::Rgb(253, 246, 227);
    let yellow = Color::Rgb(181, 137, 0);
    let orange = Color::Rgb(203, 75, 22);
    let red = Color::Rgb(220, 50, 47);
    let magenta = Color::Rgb(211, 54, 130);
    let blue = Color::Rgb(38, 139, 210);
    let cyan = Color::Rgb(42, 161, 152);
    let green = Color::Rgb(133, 153, 0);

    let detail_style = DetailStyle {
        header: blue,
        label: cyan,
        value: base0,
    };

    ThemeConfig {
        background: base03,
        list_normal: Style::default().fg(base0).bg(base02),
        list_selected: Style::default()
            .fg(base3)
            .bg(blue)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(base01),
        border_selected: Style::default().fg(blue),
        title: Style::default().fg(blue).add_modifier(Modifier::BOLD),
        text: Style::default().fg(base0).bg(base02),
        error: Style::default().fg(red).add_modifier(Modifier::BOLD),
        detail_style,
    }
}
