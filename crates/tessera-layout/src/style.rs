#![forbid(unsafe_code)]

//! Absolute-position styles for rendered items.
//!
//! Three placements are supported: a CSS `translate` (the fast path), plain
//! `top`/`left`, and percentage `left`/`width` for output produced before the
//! container has been measured.

use serde::{Deserialize, Serialize};
use tessera_core::{Extent, PixelBox};

/// How an item box is positioned inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "placement", rename_all = "snake_case")]
pub enum ItemStyle {
    /// Positioned with `transform: translate(left, top)`.
    Transform { bounds: PixelBox },
    /// Positioned with `top` / `left`.
    TopLeft { bounds: PixelBox },
    /// `left` and `width` as fractions of the container width.
    Percent {
        top: f64,
        height: Extent,
        left: f64,
        width: Extent,
    },
}

impl ItemStyle {
    #[must_use]
    pub const fn transform(bounds: PixelBox) -> Self {
        Self::Transform { bounds }
    }

    #[must_use]
    pub const fn top_left(bounds: PixelBox) -> Self {
        Self::TopLeft { bounds }
    }

    /// Percentage placement relative to `container_width`.
    ///
    /// Falls back to [`ItemStyle::TopLeft`] when the width is not positive.
    #[must_use]
    pub fn percent(bounds: PixelBox, container_width: f64) -> Self {
        if container_width <= 0.0 {
            return Self::top_left(bounds);
        }
        let width = match bounds.width {
            Extent::Finite(w) => Extent::Finite(w / container_width),
            Extent::Unbounded => Extent::Unbounded,
        };
        Self::Percent {
            top: bounds.top,
            height: bounds.height,
            left: bounds.left / container_width,
            width,
        }
    }

    /// CSS `(property, value)` pairs in a stable order.
    #[must_use]
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        match *self {
            Self::Transform { bounds } => {
                let translate = format!("translate({}px,{}px)", bounds.left, bounds.top);
                vec![
                    ("transform", translate.clone()),
                    ("-webkit-transform", translate.clone()),
                    ("-ms-transform", translate.clone()),
                    ("-o-transform", translate),
                    ("width", px(bounds.width)),
                    ("height", px(bounds.height)),
                    ("position", "absolute".to_owned()),
                ]
            }
            Self::TopLeft { bounds } => vec![
                ("top", format!("{}px", bounds.top)),
                ("left", format!("{}px", bounds.left)),
                ("width", px(bounds.width)),
                ("height", px(bounds.height)),
                ("position", "absolute".to_owned()),
            ],
            Self::Percent {
                top,
                height,
                left,
                width,
            } => vec![
                ("top", format!("{top}px")),
                ("left", perc(left)),
                ("width", width.finite().map_or_else(|| "auto".to_owned(), perc)),
                ("height", px(height)),
                ("position", "absolute".to_owned()),
            ],
        }
    }

    /// The declarations joined as an inline `style` attribute.
    #[must_use]
    pub fn to_inline(&self) -> String {
        self.css_declarations()
            .into_iter()
            .map(|(prop, value)| format!("{prop}:{value};"))
            .collect()
    }
}

fn px(extent: Extent) -> String {
    match extent {
        Extent::Finite(v) => format!("{v}px"),
        Extent::Unbounded => "auto".to_owned(),
    }
}

fn perc(fraction: f64) -> String {
    format!("{}%", fraction * 100.0)
}
