use gloo_timers::future::TimeoutFuture;

use super::state::{Session, SharedSession};

/// Drives the running traversal on the browser event loop.
///
/// The session is borrowed only for the synchronous part of each step, so
/// input handlers and the frame callback run freely during every pause.
/// `after_step` sees the session after each step (used to mirror it into the
/// UI signals).
pub async fn play(session: SharedSession, after_step: impl Fn(&mut Session)) {
	loop {
		let pause = {
			let mut guard = session.borrow_mut();
			let Some(s) = guard.as_mut() else {
				break;
			};
			let pause = s.advance_traversal();
			after_step(s);
			pause
		};
		let Some(pause) = pause else {
			break;
		};
		let millis = u32::try_from(pause.as_millis()).unwrap_or(u32::MAX);
		TimeoutFuture::new(millis).await;
	}
}
