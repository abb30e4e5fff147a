//! Cursor tooltip shown while drawing, plus a corner readout of the globe
//! position under the cursor. Both overlays are refreshed after every
//! rendered frame.

use foundation::math::{GeoPosition, Vec2, format_number};
use runtime::{Frame, FrameHooks, HookId};
use tracing::{debug, trace};

pub const MOUSE_TIP_TEXT: &str = "Right-click to finish drawing";
const HOOK_NAME: &str = "mouse-tip";

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct MouseTipOptions {
    /// Show the drawing hint next to the cursor.
    pub mouse_tip: bool,
    /// Show the lon/lat/alt readout.
    pub position_info: bool,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TipPosition {
    pub screen: Option<Vec2>,
    pub map: Option<GeoPosition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TipOverlay {
    pub text: &'static str,
    /// Top-left anchor in pixels; the overlay sits above this point.
    pub anchor: Option<Vec2>,
}

pub fn position_text(p: &GeoPosition) -> String {
    format!(
        "Lon: {}; Lat: {}; Alt: {}",
        format_number(Some(p.longitude), 7),
        format_number(Some(p.latitude), 7),
        format_number(Some(p.altitude), 1)
    )
}

#[derive(Debug)]
pub struct MouseTip {
    position: Option<TipPosition>,
    tip: Option<TipOverlay>,
    info: Option<String>,
    hook: Option<HookId>,
}

impl MouseTip {
    /// Attaches the requested overlays. A post-render hook is registered
    /// only when at least one overlay is enabled.
    pub fn new(options: MouseTipOptions, hooks: &mut FrameHooks) -> Self {
        let tip = options.mouse_tip.then_some(TipOverlay {
            text: MOUSE_TIP_TEXT,
            anchor: None,
        });
        let info = options.position_info.then(String::new);
        let hook = (options.mouse_tip || options.position_info).then(|| hooks.register(HOOK_NAME));
        Self {
            position: None,
            tip,
            info,
            hook,
        }
    }

    pub fn update_position(&mut self, position: TipPosition) {
        self.position = Some(position);
    }

    pub fn post_render(&mut self, frame: Frame) {
        let Some(position) = self.position else {
            return;
        };
        if let (Some(tip), Some(screen)) = (self.tip.as_mut(), position.screen) {
            tip.anchor = Some(screen);
        }
        if let (Some(info), Some(map)) = (self.info.as_mut(), position.map) {
            *info = position_text(&map);
        }
        trace!(frame = frame.index, "mouse tip refreshed");
    }

    pub fn tip(&self) -> Option<&TipOverlay> {
        self.tip.as_ref()
    }

    pub fn position_info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn hook_id(&self) -> Option<HookId> {
        self.hook
    }

    pub fn is_attached(&self) -> bool {
        self.tip.is_some() || self.info.is_some() || self.hook.is_some()
    }

    /// Removes both overlays and unregisters the hook. Safe to call twice.
    pub fn destroy(&mut self, hooks: &mut FrameHooks) {
        self.tip = None;
        self.info = None;
        if let Some(hook) = self.hook.take() {
            hooks.unregister(hook);
            debug!("mouse tip detached");
        }
    }
}
