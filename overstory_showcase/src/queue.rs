// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Showing several showcases one after another.
//!
//! [`ShowcaseQueue`] shows its head, waits until that showcase is dismissed
//! or skipped, then shows the next one. It learns about the end of each
//! showcase by wrapping the showcase's own dismiss listener in a relay that
//! forwards to the wrapped listener first and then flags the queue to advance.

use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use kurbo::Point;
use tracing::{debug, warn};
use understory_spotlight::FocusPainter;

use crate::host::{Host, HostEvent};
use crate::listener::DismissListener;
use crate::showcase::{Phase, ShowOutcome, Showcase, TouchOutcome};
use crate::stage::Stage;
use crate::store::ShownStore;

/// Dismiss listener decorator used by [`ShowcaseQueue`].
struct QueueRelay {
    inner: Option<Box<dyn DismissListener>>,
    advance: Rc<Cell<bool>>,
}

impl DismissListener for QueueRelay {
    fn on_dismiss(&mut self, id: Option<&str>) {
        if let Some(inner) = self.inner.as_mut() {
            inner.on_dismiss(id);
        }
        self.advance.set(true);
    }

    fn on_skipped(&mut self, id: Option<&str>) {
        if let Some(inner) = self.inner.as_mut() {
            inner.on_skipped(id);
        }
        self.advance.set(true);
    }
}

/// A FIFO of showcases shown one at a time.
pub struct ShowcaseQueue {
    pending: VecDeque<Showcase>,
    current: Option<Showcase>,
    advance: Rc<Cell<bool>>,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for ShowcaseQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowcaseQueue")
            .field("pending", &self.pending.len())
            .field("current", &self.current.as_ref().map(Showcase::phase))
            .finish_non_exhaustive()
    }
}

impl Default for ShowcaseQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowcaseQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            current: None,
            advance: Rc::new(Cell::new(false)),
            on_complete: None,
        }
    }

    /// Appends a showcase.
    pub fn add(&mut self, showcase: Showcase) -> &mut Self {
        self.pending.push_back(showcase);
        self
    }

    /// Called once the queue runs dry after [`ShowcaseQueue::show`].
    pub fn on_complete(&mut self, callback: impl FnMut() + 'static) -> &mut Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Number of showcases not yet started.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is pending or running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.current.is_none()
    }

    /// The showcase currently being shown.
    #[must_use]
    pub fn current(&self) -> Option<&Showcase> {
        self.current.as_ref()
    }

    /// Shows the head of the queue.
    ///
    /// If the current showcase was blocked by another showcase on the same
    /// host, it is shown again. Otherwise does nothing while a showcase from
    /// this queue is running.
    pub fn show<S: ShownStore, H: Host + ?Sized>(&mut self, stage: &mut Stage<S>, host: &mut H) {
        match self.current.take() {
            Some(current) if current.phase() == Phase::Created => {
                if !self.launch(current, stage, host) {
                    self.show_next(stage, host);
                }
            }
            Some(current) => {
                warn!(phase = ?current.phase(), "queue already running");
                self.current = Some(current);
            }
            None => self.show_next(stage, host),
        }
    }

    /// Alias of [`ShowcaseQueue::show`].
    pub fn start<S: ShownStore, H: Host + ?Sized>(&mut self, stage: &mut Stage<S>, host: &mut H) {
        self.show(stage, host);
    }

    /// Forwards a host event to the current showcase and advances if it
    /// finished.
    pub fn handle<S: ShownStore, H: Host + ?Sized>(
        &mut self,
        event: HostEvent,
        stage: &mut Stage<S>,
        host: &mut H,
    ) -> Option<TouchOutcome> {
        let outcome = self
            .current
            .as_mut()
            .and_then(|current| current.handle(event, stage, host));
        self.settle(stage, host);
        outcome
    }

    /// Forwards a frame to the current showcase.
    ///
    /// Returns `true` if another frame was requested.
    pub fn paint_frame<P: FocusPainter + ?Sized, S: ShownStore, H: Host + ?Sized>(
        &mut self,
        painter: &mut P,
        stage: &mut Stage<S>,
        host: &mut H,
    ) -> bool {
        let more = self
            .current
            .as_mut()
            .is_some_and(|current| current.paint_frame(painter, stage, host));
        self.settle(stage, host);
        more
    }

    /// Forwards a pointer down to the current showcase.
    pub fn pointer_down<S: ShownStore, H: Host + ?Sized>(
        &mut self,
        pt: Point,
        stage: &mut Stage<S>,
        host: &mut H,
    ) -> TouchOutcome {
        self.handle(HostEvent::PointerDown(pt), stage, host)
            .unwrap_or(TouchOutcome::PassThrough)
    }

    /// Drops every pending showcase.
    ///
    /// With `hide_current`, the running showcase is hidden as well (or
    /// abandoned if it has not attached yet). The completion callback still
    /// fires once the running showcase is gone.
    pub fn cancel<S: ShownStore, H: Host + ?Sized>(
        &mut self,
        hide_current: bool,
        stage: &mut Stage<S>,
        host: &mut H,
    ) {
        debug!(dropped = self.pending.len(), hide_current, "queue cancelled");
        self.pending.clear();
        if !hide_current {
            return;
        }
        let Some(current) = self.current.as_mut() else {
            return;
        };
        if current.is_visible() {
            current.hide(host);
        } else if current.phase() == Phase::Created || current.cancel(host) {
            self.current = None;
            self.complete();
        }
        self.settle(stage, host);
    }

    fn settle<S: ShownStore, H: Host + ?Sized>(&mut self, stage: &mut Stage<S>, host: &mut H) {
        // A showcase aborted by a finishing host is removed without a dismissal.
        let removed = self
            .current
            .as_ref()
            .is_some_and(|current| current.phase() == Phase::Removed);
        if self.advance.replace(false) || removed {
            self.current = None;
            self.show_next(stage, host);
        }
    }

    fn show_next<S: ShownStore, H: Host + ?Sized>(&mut self, stage: &mut Stage<S>, host: &mut H) {
        while let Some(mut next) = self.pending.pop_front() {
            let inner = next.take_dismiss_listener();
            next.set_dismiss_listener(Box::new(QueueRelay {
                inner,
                advance: Rc::clone(&self.advance),
            }));
            if self.launch(next, stage, host) {
                return;
            }
        }
        self.current = None;
        self.complete();
    }

    /// Shows `showcase` and keeps it as current unless it already ended.
    ///
    /// A blocked showcase stays current in [`Phase::Created`] until the next
    /// [`ShowcaseQueue::show`].
    fn launch<S: ShownStore, H: Host + ?Sized>(
        &mut self,
        mut showcase: Showcase,
        stage: &mut Stage<S>,
        host: &mut H,
    ) -> bool {
        self.advance.set(false);
        let outcome = showcase.show(stage, host);
        debug!(?outcome, remaining = self.pending.len(), "queue advanced");
        let ended = self.advance.replace(false);
        if ended || outcome == ShowOutcome::Ignored {
            return false;
        }
        self.current = Some(showcase);
        true
    }

    fn complete(&mut self) {
        debug!("queue complete");
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
    }
}
