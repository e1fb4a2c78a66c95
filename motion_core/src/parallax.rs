use crate::Config;

/// Hero parallax and darkening overlay for a scroll position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    pub hero_offset: f32,
    pub overlay_opacity: f32,
}

/// The hero lags behind the page and darkens over the first screenful
pub fn shade(scroll_y: f32, viewport_height: f32, config: &Config) -> Shade {
    let scroll = scroll_y.max(0.0);
    let progress = (scroll / viewport_height.max(1.0)).min(1.0);
    Shade {
        hero_offset: scroll * config.parallax_factor,
        overlay_opacity: progress * config.shade_max_opacity,
    }
}
