//! Teardown and resource release.

use crate::types::Event;

use super::AugmentController;

impl AugmentController {
    /// Tear the session down, releasing every resource it holds
    ///
    /// This method performs the teardown sequence:
    /// 1. Refuses further operations (they return `Error::TornDown`)
    /// 2. Abandons an in-flight request; its response is never published
    /// 3. Releases the live archive handle, if any
    /// 4. Revokes every entry preview
    ///
    /// Calling it again is a no-op. Hosts must call it when the view that owns
    /// the controller goes away, since release is asynchronous and cannot
    /// happen in `Drop`.
    pub async fn teardown(&self) {
        let (previous, previews) = {
            let mut session = self.session.lock().await;
            if session.torn_down {
                return;
            }
            session.torn_down = true;
            session.drag.cancel();

            let previews: Vec<_> = session
                .entries
                .iter_mut()
                .filter_map(|entry| entry.take_preview())
                .collect();
            (std::mem::take(&mut session.request), previews)
        };

        self.teardown_token.cancel();
        tracing::debug!("signaled abandonment of in-flight request");

        self.release_archive(previous).await;
        let revoked = previews.len();
        self.revoke_previews(previews).await;

        self.emit(Event::TornDown);
        tracing::info!(previews_revoked = revoked, "controller torn down");
    }

    /// Whether [`teardown`](Self::teardown) has run
    pub async fn is_torn_down(&self) -> bool {
        self.session.lock().await.torn_down
    }
}
