//! Scoping engine: local frame stack, global root, and the transient overlay.
//!
//! Lookup order is fixed: local frames from innermost to root, then the
//! overlay (only while isolated), then the persistent global root.
//!
//! Isolation is what keeps definition-time evaluation side-effect free. While
//! isolated, global writes land in a single overlay frame that is thrown away
//! when the outermost isolated region exits, and local writes land in the
//! empty frame pushed on entry. Only code running outside any isolated region
//! can change the persistent global root.
//!
//! Placeholder frames stand in for the parameters of a binding whose value
//! is being parsed. Local writes pass through them to the frame below, so a
//! value binds into the same scope whether or not its entry has parameters.

use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

use simark_ir::{Entity, Intrinsic, InvariantViolation, Name, NamedEntities};

use crate::{Binding, BindingScope};

/// One layer of bindings.
pub type Frame = FxHashMap<Name, Binding>;

/// Default bound on nested macro invocations.
pub const DEFAULT_CALL_LIMIT: usize = 256;

/// The scoping state for one document run.
///
/// Never shared between concurrently processed documents; each run owns one.
pub struct Context {
    /// Local frames; index 0 is the root frame and is never popped.
    locals: SmallVec<[Frame; 8]>,
    /// Persistent globals for the whole run.
    global: Frame,
    /// Transient globals written while isolated. At most one exists.
    overlay: Option<Frame>,
    isolation_depth: usize,
    /// Indices of the local frames that only hold placeholders.
    placeholder_frames: SmallVec<[usize; 4]>,
    call_depth: usize,
    call_limit: usize,
}

impl Context {
    /// An empty context with no bindings at all.
    pub fn new() -> Self {
        Context {
            locals: smallvec![Frame::default()],
            global: Frame::default(),
            overlay: None,
            isolation_depth: 0,
            placeholder_frames: SmallVec::new(),
            call_depth: 0,
            call_limit: DEFAULT_CALL_LIMIT,
        }
    }

    /// A context whose global root holds the engine primitives.
    pub fn with_prelude() -> Self {
        let mut cx = Self::new();
        cx.register_prelude();
        cx
    }

    /// Start a later phase from the globals an earlier phase left behind.
    pub fn from_globals(global: Frame) -> Self {
        Context {
            global,
            ..Self::new()
        }
    }

    /// Bind every intrinsic under its prelude name.
    pub fn register_prelude(&mut self) {
        let intrinsic = Intrinsic::ReadPhrase;
        let name = Name::new(intrinsic.prelude_name());
        self.global.insert(
            name.clone(),
            Binding::new(
                name,
                Entity::Intrinsic(intrinsic),
                NamedEntities::new(),
                BindingScope::Global,
            ),
        );
    }

    /// Resolve `name`, innermost scope first.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        for frame in self.locals.iter().rev() {
            if let Some(binding) = frame.get(name) {
                return Some(binding);
            }
        }
        if self.is_isolated() {
            if let Some(binding) = self.overlay.as_ref().and_then(|o| o.get(name)) {
                return Some(binding);
            }
        }
        self.global.get(name)
    }

    /// Write into the innermost local frame that is not a placeholder frame.
    ///
    /// Placeholder frames passed on the way lose any entry of the same name,
    /// so the new binding is what later lookups find.
    pub fn set_local(&mut self, binding: Binding) {
        let mut index = self.locals.len().saturating_sub(1);
        while index > 0 && self.placeholder_frames.contains(&index) {
            if let Some(frame) = self.locals.get_mut(index) {
                frame.remove(binding.name.as_str());
            }
            index -= 1;
        }
        debug!(name = %binding.name, depth = index + 1, "set local");
        if let Some(frame) = self.locals.get_mut(index) {
            frame.insert(binding.name.clone(), binding);
        }
    }

    /// Write a global. While isolated this goes to the overlay instead.
    pub fn set_global(&mut self, binding: Binding) {
        if self.is_isolated() {
            debug!(name = %binding.name, "set global (overlay)");
            self.overlay
                .get_or_insert_with(Frame::default)
                .insert(binding.name.clone(), binding);
        } else {
            debug!(name = %binding.name, "set global");
            self.global.insert(binding.name.clone(), binding);
        }
    }

    /// Dispatch on the binding's own scope.
    pub fn bind(&mut self, binding: Binding) {
        match binding.scope {
            BindingScope::Local => self.set_local(binding),
            BindingScope::Global => self.set_global(binding),
        }
    }

    /// Push a frame and return the stack depth to restore on pop.
    pub fn push_frame(&mut self, frame: Frame) -> usize {
        let depth = self.locals.len();
        self.locals.push(frame);
        trace!(depth = depth + 1, "push frame");
        depth
    }

    /// Pop the innermost frame. The root frame cannot be popped.
    pub fn pop_frame(&mut self) -> Result<Frame, InvariantViolation> {
        if self.locals.len() <= 1 {
            return Err(InvariantViolation::RootFramePopped);
        }
        trace!(depth = self.locals.len(), "pop frame");
        self.locals.pop().ok_or(InvariantViolation::RootFramePopped)
    }

    /// Pop the frame pushed when the stack was at `depth`.
    ///
    /// Fails if anything pushed after it is still open.
    pub fn pop_frame_to(&mut self, depth: usize) -> Result<Frame, InvariantViolation> {
        let expected = depth + 1;
        if self.locals.len() != expected {
            return Err(InvariantViolation::UnbalancedFrames {
                expected,
                found: self.locals.len(),
            });
        }
        self.pop_frame()
    }

    /// Run `f` with `frame` pushed, popping it afterwards.
    pub fn with_frame<R>(
        &mut self,
        frame: Frame,
        f: impl FnOnce(&mut Self) -> Result<R, InvariantViolation>,
    ) -> Result<R, InvariantViolation> {
        let depth = self.push_frame(frame);
        let result = f(self);
        self.pop_frame_to(depth)?;
        result
    }

    /// Run `f` with every name in `params` bound to a placeholder.
    ///
    /// Unlike [`Context::with_frame`], bindings `f` makes locally outlive
    /// the call.
    pub fn with_placeholders<R>(
        &mut self,
        params: impl IntoIterator<Item = Name>,
        f: impl FnOnce(&mut Self) -> Result<R, InvariantViolation>,
    ) -> Result<R, InvariantViolation> {
        let frame: Frame = params
            .into_iter()
            .map(|param| (param.clone(), Binding::placeholder(param)))
            .collect();
        let depth = self.push_frame(frame);
        self.placeholder_frames.push(depth);
        let result = f(self);
        self.placeholder_frames.pop();
        self.pop_frame_to(depth)?;
        result
    }

    pub fn enter_isolated(&mut self) -> usize {
        let depth = self.push_frame(Frame::default());
        self.isolation_depth += 1;
        debug!(isolation = self.isolation_depth, "enter isolated");
        depth
    }

    /// Leave the isolated region entered at `depth`. The overlay is discarded
    /// once no isolated region remains open.
    pub fn exit_isolated(&mut self, depth: usize) -> Result<(), InvariantViolation> {
        if self.isolation_depth == 0 {
            return Err(InvariantViolation::IsolationUnderflow);
        }
        self.pop_frame_to(depth)?;
        self.isolation_depth -= 1;
        if self.isolation_depth == 0 {
            if let Some(overlay) = self.overlay.take() {
                debug!(discarded = overlay.len(), "drop overlay");
            }
        }
        debug!(isolation = self.isolation_depth, "exit isolated");
        Ok(())
    }

    /// Run `f` isolated. Nothing it binds survives the call.
    pub fn with_isolation<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, InvariantViolation>,
    ) -> Result<R, InvariantViolation> {
        let depth = self.enter_isolated();
        let result = f(self);
        self.exit_isolated(depth)?;
        result
    }

    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.isolation_depth > 0
    }

    #[inline]
    pub fn isolation_depth(&self) -> usize {
        self.isolation_depth
    }

    /// Number of local frames, root included.
    #[inline]
    pub fn frame_depth(&self) -> usize {
        self.locals.len()
    }

    pub fn set_call_limit(&mut self, limit: usize) {
        self.call_limit = limit;
    }

    #[inline]
    pub fn call_limit(&self) -> usize {
        self.call_limit
    }

    #[inline]
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    /// Count one more nested invocation. Returns `false` at the limit.
    pub(crate) fn enter_call(&mut self) -> bool {
        if self.call_depth >= self.call_limit {
            return false;
        }
        self.call_depth += 1;
        true
    }

    pub(crate) fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    /// The persistent globals.
    pub fn globals(&self) -> &Frame {
        &self.global
    }

    /// Hand the persistent globals to the next phase.
    pub fn into_globals(self) -> Frame {
        self.global
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
