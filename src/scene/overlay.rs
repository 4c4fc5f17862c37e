//! Ground overlays following the plane anchors' lifecycle.
//!
//! Non-plane anchors are ignored by all three callbacks.

use tracing::debug;

use super::host::AnchorHost;
use super::types::{GroundOverlay, TrackedAnchor};

/// New anchor: attach one overlay.
pub fn anchor_added<H: AnchorHost>(host: &mut H, anchor: &TrackedAnchor) {
    let Some(plane) = anchor.as_plane() else {
        return;
    };
    let overlay = GroundOverlay::for_anchor(plane);
    debug!(anchor = plane.id.0, width = overlay.width, length = overlay.height, "Plane detected");
    host.attach_overlay(plane.id, &overlay);
}

/// Anchor refined: replace whatever is attached with exactly one fresh overlay.
pub fn anchor_updated<H: AnchorHost>(host: &mut H, anchor: &TrackedAnchor) {
    let Some(plane) = anchor.as_plane() else {
        return;
    };
    host.detach_overlays(plane.id);
    host.attach_overlay(plane.id, &GroundOverlay::for_anchor(plane));
}

/// Anchor lost: detach all of its overlays.
pub fn anchor_removed<H: AnchorHost>(host: &mut H, anchor: &TrackedAnchor) {
    let Some(plane) = anchor.as_plane() else {
        return;
    };
    let removed = host.detach_overlays(plane.id);
    debug!(anchor = plane.id.0, removed, "Plane removed");
}
