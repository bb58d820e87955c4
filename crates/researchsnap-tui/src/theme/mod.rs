use ratatui::style::Color;

pub struct NordTheme {
    // Polar Night
    pub nord0: Color, // #2E3440 darkest background, status bar
    pub nord1: Color, // #3B4252 secondary background, input line
    pub nord2: Color, // #4C566A borders
    pub nord3: Color, // #616E88 inactive text, hints

    // Snow Storm
    pub nord4: Color, // #D8DEE9 body text
    pub nord6: Color, // #ECEFF4 card paper

    // Frost
    pub nord8: Color,  // #88C0D0 focused elements
    pub nord10: Color, // #5E81AC cursor

    // Aurora
    pub nord11: Color, // #BF616A errors
    pub nord12: Color, // #D08770 busy indicators
    pub nord14: Color, // #A3BE8C success
}

impl Default for NordTheme {
    fn default() -> Self {
        Self {
            nord0: Color::Rgb(46, 52, 64),
            nord1: Color::Rgb(59, 66, 82),
            nord2: Color::Rgb(76, 86, 106),
            nord3: Color::Rgb(97, 110, 136),
            nord4: Color::Rgb(216, 222, 233),
            nord6: Color::Rgb(236, 239, 244),
            nord8: Color::Rgb(136, 192, 208),
            nord10: Color::Rgb(94, 129, 172),
            nord11: Color::Rgb(191, 97, 106),
            nord12: Color::Rgb(208, 135, 112),
            nord14: Color::Rgb(163, 190, 140),
        }
    }
}

impl NordTheme {
    // Semantic aliases
    pub fn bg(&self) -> Color {
        self.nord0
    }
    pub fn bg_secondary(&self) -> Color {
        self.nord1
    }
    pub fn border(&self) -> Color {
        self.nord2
    }
    pub fn muted(&self) -> Color {
        self.nord3
    }
    pub fn fg(&self) -> Color {
        self.nord4
    }
    pub fn paper(&self) -> Color {
        self.nord6
    }
    pub fn ink(&self) -> Color {
        self.nord0
    }

    // Logic aliases
    pub fn active_panel(&self) -> Color {
        self.nord8
    }
    pub fn cursor_bg(&self) -> Color {
        self.nord10
    }
    pub fn danger(&self) -> Color {
        self.nord11
    }
    pub fn warning(&self) -> Color {
        self.nord12
    }
    pub fn success(&self) -> Color {
        self.nord14
    }
}
