mod app;
mod effects;
mod settings;
mod snake;
mod theme;

use anyhow::{anyhow, Context, Result};
use serpent_engine::device::GpuInit;
use serpent_engine::logging::{init_logging, LoggingConfig};
use serpent_engine::text::FontStore;
use serpent_engine::window::{Runtime, RuntimeConfig};

use crate::app::Game;
use crate::settings::Settings;

const FONT_PATHS: [&str; 5] = [
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

fn load_font() -> Result<FontStore> {
    for path in FONT_PATHS {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        log::info!("using font {path}");
        return FontStore::from_bytes(&bytes).with_context(|| format!("failed to parse {path}"));
    }
    Err(anyhow!("no usable system font found (tried {FONT_PATHS:?})"))
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let fonts = load_font()?;
    let settings = Settings::default();
    let vsync = settings.vsync;

    Runtime::run(
        RuntimeConfig {
            title: "Snake Shader".to_string(),
            ..RuntimeConfig::default()
        },
        GpuInit::default().with_vsync(vsync),
        Game::new(fonts, settings),
    )
}
