use serpent_engine::paint::Color;

/// Named color set for one visual theme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: &'static str,
    pub snake: Color,
    pub apple: Color,
    pub border: Color,
    pub title: Color,
    pub menu_text: Color,
    pub menu_text_selected: Color,
    pub menu_highlight: Color,
}

pub static THEMES: [Theme; 3] = [
    Theme {
        name: "Classic Green",
        snake: Color::new(0.15, 0.95, 0.2, 1.0),
        apple: Color::new(0.95, 0.15, 0.15, 1.0),
        border: Color::new(1.0, 1.0, 1.0, 0.06),
        title: Color::new(1.0, 0.96, 0.51, 1.0),
        menu_text: Color::new(0.7, 0.7, 0.7, 1.0),
        menu_text_selected: Color::new(1.0, 0.96, 0.51, 1.0),
        menu_highlight: Color::new(1.0, 0.9, 0.6, 0.15),
    },
    Theme {
        name: "Cyberpunk",
        snake: Color::new(0.0, 0.8, 0.8, 1.0),
        apple: Color::new(1.0, 0.0, 0.9, 1.0),
        border: Color::new(0.2, 0.0, 0.2, 0.15),
        title: Color::new(0.0, 1.0, 1.0, 1.0),
        menu_text: Color::new(0.0, 0.8, 0.8, 1.0),
        menu_text_selected: Color::new(1.0, 0.0, 0.9, 1.0),
        menu_highlight: Color::new(1.0, 0.0, 0.9, 0.25),
    },
    Theme {
        name: "Monochrome",
        snake: Color::new(0.7, 0.7, 0.7, 1.0),
        apple: Color::new(1.0, 1.0, 1.0, 1.0),
        border: Color::new(0.2, 0.2, 0.2, 0.1),
        title: Color::new(1.0, 1.0, 1.0, 1.0),
        menu_text: Color::new(0.5, 0.5, 0.5, 1.0),
        menu_text_selected: Color::new(1.0, 1.0, 1.0, 1.0),
        menu_highlight: Color::new(1.0, 1.0, 1.0, 0.15),
    },
];

/// Returns the theme at `index`, wrapping around.
pub fn theme(index: usize) -> &'static Theme {
    &THEMES[index % THEMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_lookup_wraps() {
        assert_eq!(theme(0).name, "Classic Green");
        assert_eq!(theme(3).name, "Classic Green");
        assert_eq!(theme(4).name, "Cyberpunk");
    }
}
