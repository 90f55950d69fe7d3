//! View-state continuity.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::RenderDescription;

/// A view field that survives a data refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewField {
    Center,
    Zoom,
    Slider,
    ZCoef,
    Radius,
    ColorScale,
    MapStyle,
}

impl ViewField {
    pub const ALL: [ViewField; 7] = [
        ViewField::Center,
        ViewField::Zoom,
        ViewField::Slider,
        ViewField::ZCoef,
        ViewField::Radius,
        ViewField::ColorScale,
        ViewField::MapStyle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ViewField::Center => "center",
            ViewField::Zoom => "zoom",
            ViewField::Slider => "slider",
            ViewField::ZCoef => "z",
            ViewField::Radius => "radius",
            ViewField::ColorScale => "color_scale",
            ViewField::MapStyle => "map_style",
        }
    }
}

impl fmt::Display for ViewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown view field {0:?}")]
pub struct UnknownViewField(pub String);

impl FromStr for ViewField {
    type Err = UnknownViewField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownViewField(s.to_owned()))
    }
}

/// Carry the view fields of `old` onto `new`.
///
/// Fields in `suppress` keep `new`'s value; use it for the control whose
/// change triggered the rebuild.  Data fields always come from `new`.  With
/// no `old` (first render) `new` is returned unchanged.
pub fn reconcile(
    mut new: RenderDescription,
    old: Option<&RenderDescription>,
    suppress: &HashSet<ViewField>,
) -> RenderDescription {
    let Some(old) = old else {
        return new;
    };
    for field in ViewField::ALL {
        if suppress.contains(&field) {
            continue;
        }
        match field {
            ViewField::Center => new.viewport.center = old.viewport.center,
            ViewField::Zoom => new.viewport.zoom = old.viewport.zoom,
            ViewField::Slider => new.slider = old.slider,
            ViewField::ZCoef => new.style.z_coef = old.style.z_coef,
            ViewField::Radius => new.style.radius_coef = old.style.radius_coef,
            ViewField::ColorScale => new.style.color_scale.clone_from(&old.style.color_scale),
            ViewField::MapStyle => new.style.map_style.clone_from(&old.style.map_style),
        }
    }
    new
}
