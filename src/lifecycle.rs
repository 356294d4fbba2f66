//! Mount, resize, frame and unmount handling for an ocean view.
//!
//! The view never schedules anything itself. It asks a [`FrameHost`] for
//! frame callbacks and a resize subscription, and hands both back on
//! unmount. The windowed app and the headless recorder are both hosts.

use log::{debug, info};

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::scene::Backdrop;

/// Handle for a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Handle for a resize subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeListener(pub u64);

/// Scheduler and viewport provider for an [`OceanView`]
pub trait FrameHost {
    /// Current viewport size in pixels
    fn viewport(&self) -> (u32, u32);

    /// Schedule one frame callback
    fn request_frame(&mut self) -> FrameRequest;

    /// Drop a scheduled callback; unknown handles are ignored
    fn cancel_frame(&mut self, request: FrameRequest);

    fn add_resize_listener(&mut self) -> ResizeListener;

    fn remove_resize_listener(&mut self, listener: ResizeListener);
}

/// Resources held while mounted
struct Mounted<C> {
    main: C,
    offscreen: C,
    pending: Option<FrameRequest>,
    listener: ResizeListener,
    first_frame_ms: Option<f64>,
}

/// A backdrop bound to a pair of drawing surfaces and a host
pub struct OceanView<C> {
    backdrop: Backdrop,
    mounted: Option<Mounted<C>>,
    running: bool,
}

impl<C: Canvas> OceanView<C> {
    pub fn new(backdrop: Backdrop) -> Self {
        Self {
            backdrop,
            mounted: None,
            running: false,
        }
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Main and offscreen surfaces while mounted
    pub fn surfaces(&self) -> Option<(&C, &C)> {
        self.mounted.as_ref().map(|m| (&m.main, &m.offscreen))
    }

    /// Allocate surfaces at the host viewport, subscribe to resizes and
    /// request the first frame
    pub fn mount<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        if self.mounted.is_some() {
            return Err(Error::AlreadyMounted);
        }

        let (width, height) = host.viewport();
        let listener = host.add_resize_listener();
        let pending = Some(host.request_frame());

        self.mounted = Some(Mounted {
            main: C::allocate(width, height),
            offscreen: C::allocate(width, height),
            pending,
            listener,
            first_frame_ms: None,
        });
        self.running = true;

        info!("Ocean view mounted at {}x{}", width, height);
        Ok(())
    }

    /// Recreate both surfaces at the new size, discarding their contents
    pub fn resize(&mut self, width: u32, height: u32) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        mounted.main = C::allocate(width, height);
        mounted.offscreen = C::allocate(width, height);
        debug!("Ocean view resized to {}x{}", width, height);
    }

    /// Frame callback: draw at `now_ms`, schedule the next frame and return
    /// the finished main surface
    ///
    /// Returns `None` without drawing once the view has stopped.
    pub fn frame<H: FrameHost + ?Sized>(&mut self, host: &mut H, now_ms: f64) -> Option<&C> {
        if !self.running {
            return None;
        }
        let mounted = self.mounted.as_mut()?;

        let start = *mounted.first_frame_ms.get_or_insert(now_ms);
        let t = ((now_ms - start) / 1000.0).max(0.0);

        self.backdrop
            .draw(&mut mounted.main, &mut mounted.offscreen, t);
        mounted.main.finish();

        // At most one outstanding request per view
        if let Some(previous) = mounted.pending.take() {
            host.cancel_frame(previous);
        }
        mounted.pending = Some(host.request_frame());

        Some(&mounted.main)
    }

    /// Stop drawing and release the host subscriptions; safe to call twice
    pub fn unmount<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        self.running = false;
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        if let Some(request) = mounted.pending {
            host.cancel_frame(request);
        }
        host.remove_resize_listener(mounted.listener);
        info!("Ocean view unmounted");
    }
}

/// In-memory host with a fixed viewport and a queue of frame requests
#[derive(Debug, Default)]
pub struct HeadlessHost {
    viewport: (u32, u32),
    next_id: u64,
    pending: Vec<FrameRequest>,
    listeners: Vec<ResizeListener>,
    requested: usize,
}

impl HeadlessHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            ..Default::default()
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    pub fn pending_frames(&self) -> &[FrameRequest] {
        &self.pending
    }

    /// Pop the oldest scheduled frame, as if its callback fired
    pub fn take_pending(&mut self) -> Option<FrameRequest> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Total frame requests ever made
    pub fn frames_requested(&self) -> usize {
        self.requested
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameHost for HeadlessHost {
    fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id());
        self.pending.push(request);
        self.requested += 1;
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending.retain(|r| *r != request);
    }

    fn add_resize_listener(&mut self) -> ResizeListener {
        let listener = ResizeListener(self.next_id());
        self.listeners.push(listener);
        listener
    }

    fn remove_resize_listener(&mut self, listener: ResizeListener) {
        self.listeners.retain(|l| *l != listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::trace::TraceCanvas;
    use crate::params::ParticleParams;
    use crate::scene::SceneKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn view(kind: SceneKind) -> OceanView<TraceCanvas> {
        let mut rng = StdRng::seed_from_u64(3);
        OceanView::new(Backdrop::build(kind, &mut rng, &ParticleParams::default()))
    }

    #[test]
    fn test_mount_allocates_and_schedules() {
        let mut host = HeadlessHost::new(320, 240);
        let mut view = view(SceneKind::Realistic);
        assert!(view.surfaces().is_none());

        view.mount(&mut host).unwrap();
        assert!(view.is_running());
        assert_eq!(host.listener_count(), 1);
        assert_eq!(host.pending_frames().len(), 1);

        let (main, offscreen) = view.surfaces().unwrap();
        assert_eq!(main.size(), (320, 240));
        assert_eq!(offscreen.size(), (320, 240));
    }

    #[test]
    fn test_mount_twice_fails() {
        let mut host = HeadlessHost::new(100, 100);
        let mut view = view(SceneKind::Pixel);
        view.mount(&mut host).unwrap();
        assert!(matches!(view.mount(&mut host), Err(Error::AlreadyMounted)));
        assert_eq!(host.listener_count(), 1);
    }

    #[test]
    fn test_resize_yields_exact_sizes() {
        let mut host = HeadlessHost::new(800, 600);
        let mut view = view(SceneKind::Realistic);
        view.mount(&mut host).unwrap();

        for _ in 0..2 {
            for (w, h) in [(1024, 768), (1, 1), (0, 0), (640, 360)] {
                view.resize(w, h);
                let (main, offscreen) = view.surfaces().unwrap();
                assert_eq!(main.size(), (w, h));
                assert_eq!(offscreen.size(), (w, h));
            }
        }

        // Next frame draws at the new size
        host.take_pending();
        let main = view.frame(&mut host, 0.0).unwrap();
        assert_eq!(main.size(), (640, 360));
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut host = HeadlessHost::new(50, 50);
        let mut view = view(SceneKind::Pixel);
        view.mount(&mut host).unwrap();
        view.frame(&mut host, 0.0);
        assert!(view.surfaces().unwrap().0.draw_count() > 0);

        view.resize(60, 40);
        assert_eq!(view.surfaces().unwrap().0.draw_count(), 0);
    }

    #[test]
    fn test_first_frame_is_time_zero() {
        let mut host = HeadlessHost::new(64, 64);
        let mut view = view(SceneKind::Realistic);
        view.mount(&mut host).unwrap();

        let mut reference = self::view(SceneKind::Realistic);
        let mut ref_host = HeadlessHost::new(64, 64);
        reference.mount(&mut ref_host).unwrap();

        // Same backdrop drawn at t=0 regardless of the host clock
        let a = view.frame(&mut host, 123_456.0).unwrap().ops.clone();
        let b = reference.frame(&mut ref_host, 0.0).unwrap().ops.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn test_frame_requests_next_frame() {
        let mut host = HeadlessHost::new(32, 32);
        let mut view = view(SceneKind::Pixel);
        view.mount(&mut host).unwrap();

        for i in 0..5 {
            assert!(host.take_pending().is_some());
            assert!(view.frame(&mut host, i as f64 * 16.0).is_some());
        }
        assert_eq!(host.frames_requested(), 6);
        assert_eq!(host.pending_frames().len(), 1);
    }

    #[test]
    fn test_no_work_after_unmount() {
        let mut host = HeadlessHost::new(200, 100);
        let mut view = view(SceneKind::Realistic);
        view.mount(&mut host).unwrap();
        host.take_pending();
        view.frame(&mut host, 0.0);

        view.unmount(&mut host);
        assert!(!view.is_running());
        assert_eq!(host.listener_count(), 0);
        assert!(host.pending_frames().is_empty());

        let requested = host.frames_requested();
        assert!(view.frame(&mut host, 16.0).is_none());
        assert!(view.frame(&mut host, 32.0).is_none());
        assert_eq!(host.frames_requested(), requested);
        assert!(host.pending_frames().is_empty());
        assert!(view.surfaces().is_none());

        // Resizes after unmount are ignored, and unmount is idempotent
        view.resize(10, 10);
        view.unmount(&mut host);
        assert!(view.surfaces().is_none());
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_unconsumed_request_is_replaced() {
        let mut host = HeadlessHost::new(32, 32);
        let mut view = view(SceneKind::Pixel);
        view.mount(&mut host).unwrap();

        // Frames driven without the host firing its callbacks
        view.frame(&mut host, 0.0);
        view.frame(&mut host, 16.0);
        assert_eq!(host.pending_frames().len(), 1);
        assert_eq!(host.frames_requested(), 3);

        view.unmount(&mut host);
        assert!(host.pending_frames().is_empty());
    }

    #[test]
    fn test_remount_after_unmount() {
        let mut host = HeadlessHost::new(40, 30);
        let mut view = view(SceneKind::Pixel);
        view.mount(&mut host).unwrap();
        view.unmount(&mut host);
        host.set_viewport(80, 60);
        view.mount(&mut host).unwrap();
        assert_eq!(view.surfaces().unwrap().0.size(), (80, 60));
        assert_eq!(host.listener_count(), 1);
    }
}
