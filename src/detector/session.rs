//! Handle-based registry of independent lane sessions.
use super::params::LaneParams;
use super::pipeline::{LaneDetector, ProcessedFrame};
use crate::error::LaneError;
use crate::image::Frame;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// Opaque identifier of an open session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SessionHandle(u64);

impl SessionHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Open sessions sharing one parameter set. Each session keeps its own
/// smoothing state and frame-size lock.
#[derive(Debug)]
pub struct LaneSessions {
    template: LaneDetector,
    sessions: HashMap<SessionHandle, LaneDetector>,
    next_id: u64,
}

impl LaneSessions {
    pub fn new(params: LaneParams) -> Result<Self, LaneError> {
        Ok(Self {
            template: LaneDetector::new(params)?,
            sessions: HashMap::new(),
            next_id: 1,
        })
    }

    /// Start a session in its first-frame state.
    pub fn open(&mut self) -> SessionHandle {
        let handle = SessionHandle(self.next_id);
        self.next_id += 1;
        self.sessions.insert(handle, self.template.clone());
        debug!("LaneSessions::open id={}", handle.id());
        handle
    }

    pub fn process_frame(&mut self, handle: SessionHandle, frame: &Frame) -> Result<Frame, LaneError> {
        self.session_mut(handle)?.process(frame)
    }

    pub fn process_frame_with_report(
        &mut self,
        handle: SessionHandle,
        frame: &Frame,
    ) -> Result<ProcessedFrame, LaneError> {
        self.session_mut(handle)?.process_with_report(frame)
    }

    /// Discard the session's state. The handle is invalid afterwards.
    pub fn close(&mut self, handle: SessionHandle) -> Result<(), LaneError> {
        self.sessions
            .remove(&handle)
            .map(|_| debug!("LaneSessions::close id={}", handle.id()))
            .ok_or(LaneError::InvalidSession(handle))
    }

    pub fn session(&self, handle: SessionHandle) -> Option<&LaneDetector> {
        self.sessions.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn session_mut(&mut self, handle: SessionHandle) -> Result<&mut LaneDetector, LaneError> {
        self.sessions
            .get_mut(&handle)
            .ok_or(LaneError::InvalidSession(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_closable_once() {
        let mut sessions = LaneSessions::new(LaneParams::default()).unwrap();
        let a = sessions.open();
        let b = sessions.open();
        assert_ne!(a, b);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions.close(a), Ok(()));
        assert_eq!(sessions.close(a), Err(LaneError::InvalidSession(a)));
        assert_eq!(
            sessions.process_frame(a, &Frame::black_rgb(4, 4)).err(),
            Some(LaneError::InvalidSession(a))
        );
        assert!(sessions.session(b).is_some());
    }

    #[test]
    fn reopened_handles_are_fresh() {
        let mut sessions = LaneSessions::new(LaneParams::default()).unwrap();
        let a = sessions.open();
        let _ = sessions.process_frame(a, &Frame::black_rgb(16, 16));
        sessions.close(a).unwrap();
        let b = sessions.open();
        assert_ne!(a, b);
        assert_eq!(sessions.session(b).and_then(|s| s.frame_shape()), None);
    }
}
