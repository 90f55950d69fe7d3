//! Unit tests for sv-view.

use std::collections::HashSet;

use sv_core::{CityId, FrameIndex, GeoPoint};
use sv_store::EnrichedRow;

use crate::{RenderDescription, ViewField, reconcile};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn row(id: &str, infected: u64) -> EnrichedRow {
    EnrichedRow {
        name:           format!("City {id}"),
        id:             CityId::from(id),
        lat:            50.0,
        lon:            14.0,
        population:     1000,
        infected_count: infected,
        frame_date:     FrameIndex(1),
    }
}

/// A description the user has panned, zoomed and restyled.
fn customized(frame: u32) -> RenderDescription {
    let mut d = RenderDescription::from_rows(FrameIndex(frame), &[row("001", 5)]);
    d.viewport.center = GeoPoint::new(50.08, 14.43);
    d.viewport.zoom = 9.5;
    d.slider = Some(FrameIndex(2));
    d.style.z_coef = 3.0;
    d.style.radius_coef = 8.0;
    d.style.color_scale = "viridis".into();
    d
}

fn none() -> HashSet<ViewField> {
    HashSet::new()
}

// ── Render description ────────────────────────────────────────────────────────

#[cfg(test)]
mod render {
    use super::*;
    use crate::render::{DEFAULT_CENTER, DEFAULT_ZOOM};

    #[test]
    fn from_rows_uses_default_view() {
        let d = RenderDescription::from_rows(FrameIndex(3), &[row("001", 5), row("002", 7)]);
        assert_eq!(d.frame, FrameIndex(3));
        assert_eq!(d.markers.len(), 2);
        assert_eq!(d.total_infected(), 12);
        assert_eq!(d.viewport.center, DEFAULT_CENTER);
        assert_eq!(d.viewport.zoom, DEFAULT_ZOOM);
        assert_eq!(d.slider, None);
    }

    #[test]
    fn reset_keeps_data_and_drops_view() {
        let d = customized(4).reset();
        assert_eq!(d.frame, FrameIndex(4));
        assert_eq!(d.markers.len(), 1);
        assert_eq!(d, RenderDescription::from_rows(FrameIndex(4), &[row("001", 5)]));
    }

    #[test]
    fn marker_scale_follows_style() {
        let mut d = RenderDescription::from_rows(FrameIndex(1), &[row("001", 32)]);
        d.style.z_coef = 5.0;
        d.style.radius_coef = 8.5;
        let (intensity, radius) = d.marker_scale(&d.markers[0]);
        assert!((intensity - 2.0).abs() < 1e-9, "32^(1/5) = 2, got {intensity}");
        assert!((radius - 33f64.powf(1.0)).abs() < 1e-9, "33^(2.5/2.5) = 33, got {radius}");
    }

    #[test]
    fn radius_stays_finite_at_extreme_coefficient() {
        let mut d = RenderDescription::from_rows(FrameIndex(1), &[row("001", 10)]);
        d.style.radius_coef = 11.0;
        let (_, radius) = d.marker_scale(&d.markers[0]);
        assert!(radius.is_finite());
    }
}

// ── Reconcile ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod continuity {
    use super::*;

    #[test]
    fn first_render_is_unchanged() {
        let fresh = RenderDescription::from_rows(FrameIndex(1), &[row("001", 1)]);
        assert_eq!(reconcile(fresh.clone(), None, &none()), fresh);
    }

    #[test]
    fn reconciling_with_itself_is_identity() {
        let a = customized(2);
        assert_eq!(reconcile(a.clone(), Some(&a), &none()), a);
    }

    #[test]
    fn view_fields_carry_over_data_does_not() {
        let old = customized(1);
        let fresh = RenderDescription::from_rows(FrameIndex(2), &[row("001", 9), row("002", 1)]);

        let merged = reconcile(fresh, Some(&old), &none());
        assert_eq!(merged.frame, FrameIndex(2));
        assert_eq!(merged.markers.len(), 2);
        assert_eq!(merged.viewport, old.viewport);
        assert_eq!(merged.slider, old.slider);
        assert_eq!(merged.style, old.style);
    }

    #[test]
    fn suppressed_field_keeps_new_value() {
        let old = customized(1);
        let mut fresh = RenderDescription::from_rows(FrameIndex(1), &[row("001", 5)]);
        fresh.style.radius_coef = 2.5;

        let merged = reconcile(fresh, Some(&old), &HashSet::from(["radius".parse::<ViewField>().unwrap()]));
        assert_eq!(merged.style.radius_coef, 2.5);

        let mut expected = old.clone();
        expected.style.radius_coef = 2.5;
        assert_eq!(merged, expected);
    }

    #[test]
    fn every_field_can_be_suppressed() {
        let old = customized(1);
        let fresh = RenderDescription::from_rows(FrameIndex(1), &[row("001", 5)]);
        let all: HashSet<ViewField> = ViewField::ALL.into_iter().collect();
        assert_eq!(reconcile(fresh.clone(), Some(&old), &all), fresh);
    }

    #[test]
    fn field_names_parse() {
        for field in ViewField::ALL {
            assert_eq!(field.to_string().parse::<ViewField>(), Ok(field));
        }
        assert!("viewport".parse::<ViewField>().is_err());
    }
}
