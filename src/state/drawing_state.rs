use egui::Pos2;
use log::{debug, info, trace};

use crate::event::{EventChannel, Notification};
use crate::surface::PixelBuffer;
use crate::tools::Tool;

type Channel<E> = EventChannel<DrawingState, E>;

/// The drawing-state machine of one canvas.
///
/// `DrawingState` records the geometry of the gesture in progress and the
/// style settings that apply to the next rendered segment or preview. It is
/// either idle or active:
///
/// ```text
///            begin(x, y, snapshot)
///   ┌──────┐ ───────────────────────► ┌────────┐ ──┐ update(x, y, snapshot?)
///   │ Idle │                          │ Active │   │ advance_anchor()
///   └──────┘ ◄─────────────────────── └────────┘ ◄─┘ rebase(snapshot)
///             end(x, y, snapshot)
/// ```
///
/// `update`, `advance_anchor` and `rebase` do nothing while idle. Every
/// mutation goes through a method; subscribers observe changes through the
/// notification channels and read the new values through the accessors.
pub struct DrawingState {
    surface_width: u32,
    surface_height: u32,
    active: bool,
    anchor: Pos2,
    cursor: Pos2,
    pre_snapshot: Option<PixelBuffer>,
    tool: Tool,
    stroke_width: f32,
    color: String,
    opacity: f32,
    stroke_updated: Channel<()>,
    stroke_ended: Channel<()>,
    color_changed: Channel<String>,
    width_changed: Channel<f32>,
    opacity_changed: Channel<f32>,
}

impl std::fmt::Debug for DrawingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingState")
            .field("surface_width", &self.surface_width)
            .field("surface_height", &self.surface_height)
            .field("active", &self.active)
            .field("anchor", &self.anchor)
            .field("cursor", &self.cursor)
            .field("has_pre_snapshot", &self.pre_snapshot.is_some())
            .field("tool", &self.tool)
            .field("stroke_width", &self.stroke_width)
            .field("color", &self.color)
            .field("opacity", &self.opacity)
            .finish_non_exhaustive()
    }
}

impl DrawingState {
    /// Creates an idle state for a surface of the given size with the default
    /// style: freehand, black, 1px, fully opaque.
    pub fn new(surface_width: u32, surface_height: u32) -> Self {
        Self {
            surface_width,
            surface_height,
            active: false,
            anchor: Pos2::ZERO,
            cursor: Pos2::ZERO,
            pre_snapshot: None,
            tool: Tool::default(),
            stroke_width: 1.0,
            color: "#000".to_string(),
            opacity: 1.0,
            stroke_updated: Channel::new(),
            stroke_ended: Channel::new(),
            color_changed: Channel::new(),
            width_changed: Channel::new(),
            opacity_changed: Channel::new(),
        }
    }

    // ─── Transitions ─────────────────────────────────────────────────────

    /// Starts a gesture at `(x, y)`. A second `begin` simply restarts it.
    pub fn begin(&mut self, x: f32, y: f32, snapshot: PixelBuffer) {
        debug!("begin {:?} stroke at ({x}, {y})", self.tool);
        self.active = true;
        self.anchor = Pos2::new(x, y);
        self.pre_snapshot = Some(snapshot);
    }

    /// Moves the cursor of the active gesture and emits `stroke-updated`.
    pub fn update(&mut self, x: f32, y: f32, snapshot: Option<PixelBuffer>) {
        if !self.active {
            return;
        }
        trace!("update cursor to ({x}, {y})");
        self.cursor = Pos2::new(x, y);
        if let Some(snapshot) = snapshot {
            self.pre_snapshot = Some(snapshot);
        }
        self.notify(|s| &mut s.stroke_updated, &());
    }

    /// Moves the anchor to the cursor so the next freehand segment continues from it.
    pub fn advance_anchor(&mut self) {
        if self.active {
            self.anchor = self.cursor;
        }
    }

    /// Replaces the eraser snapshot of the active gesture without notifying.
    pub fn rebase(&mut self, snapshot: PixelBuffer) {
        if self.active {
            self.pre_snapshot = Some(snapshot);
        }
    }

    /// Finishes the gesture; `snapshot` becomes the base for the next one.
    pub fn end(&mut self, x: f32, y: f32, snapshot: PixelBuffer) {
        debug!("end {:?} stroke at ({x}, {y})", self.tool);
        self.active = false;
        self.pre_snapshot = Some(snapshot);
        self.notify(|s| &mut s.stroke_ended, &());
    }

    // ─── Style ───────────────────────────────────────────────────────────

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
        let color = self.color.clone();
        self.notify(|s| &mut s.color_changed, &color);
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
        self.notify(|s| &mut s.width_changed, &width);
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.notify(|s| &mut s.opacity_changed, &opacity);
    }

    /// Selects the tool for future dispatch. Does not notify and does not end
    /// a gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            info!("Tool changed from {:?} to {:?}", self.tool, tool);
        }
        self.tool = tool;
    }

    // ─── Subscriptions ───────────────────────────────────────────────────

    pub fn on_stroke_updated(&mut self, handler: impl FnMut(&mut DrawingState, &()) + 'static) {
        self.stroke_updated.subscribe(handler);
    }

    pub fn on_stroke_ended(&mut self, handler: impl FnMut(&mut DrawingState, &()) + 'static) {
        self.stroke_ended.subscribe(handler);
    }

    pub fn on_color_changed(&mut self, handler: impl FnMut(&mut DrawingState, &String) + 'static) {
        self.color_changed.subscribe(handler);
    }

    pub fn on_width_changed(&mut self, handler: impl FnMut(&mut DrawingState, &f32) + 'static) {
        self.width_changed.subscribe(handler);
    }

    pub fn on_opacity_changed(&mut self, handler: impl FnMut(&mut DrawingState, &f32) + 'static) {
        self.opacity_changed.subscribe(handler);
    }

    /// Subscribes to a notification by name. The handler reads the new values
    /// through the accessors.
    pub fn subscribe(&mut self, kind: Notification, mut handler: impl FnMut(&mut DrawingState) + 'static) {
        match kind {
            Notification::StrokeUpdated => self.stroke_updated.subscribe(move |s, _| handler(s)),
            Notification::StrokeEnded => self.stroke_ended.subscribe(move |s, _| handler(s)),
            Notification::ColorChanged => self.color_changed.subscribe(move |s, _| handler(s)),
            Notification::WidthChanged => self.width_changed.subscribe(move |s, _| handler(s)),
            Notification::OpacityChanged => self.opacity_changed.subscribe(move |s, _| handler(s)),
        }
    }

    pub fn subscriber_count(&self, kind: Notification) -> usize {
        match kind {
            Notification::StrokeUpdated => self.stroke_updated.len(),
            Notification::StrokeEnded => self.stroke_ended.len(),
            Notification::ColorChanged => self.color_changed.len(),
            Notification::WidthChanged => self.width_changed.len(),
            Notification::OpacityChanged => self.opacity_changed.len(),
        }
    }

    /// Runs one channel's subscribers against `self`.
    ///
    /// The channel is detached while it runs, so subscribers may call back into
    /// the state. Subscribers added meanwhile are kept, after the existing ones.
    fn notify<E>(&mut self, channel: fn(&mut Self) -> &mut Channel<E>, event: &E) {
        let mut subscribers = std::mem::take(channel(self));
        subscribers.emit(self, event);
        let mut added = std::mem::replace(channel(self), subscribers);
        channel(self).append(&mut added);
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn surface_width(&self) -> u32 {
        self.surface_width
    }

    pub fn surface_height(&self) -> u32 {
        self.surface_height
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn cursor(&self) -> Pos2 {
        self.cursor
    }

    pub fn pre_snapshot(&self) -> Option<&PixelBuffer> {
        self.pre_snapshot.as_ref()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}
