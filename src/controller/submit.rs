//! Validation gate and the single outbound request.

use crate::error::{Error, GENERIC_FAILURE_MESSAGE, Result};
use crate::service::SubmissionPayload;
use crate::types::{Event, RequestState, SubmitOutcome};
use crate::validation::validate;

use super::AugmentController;

impl AugmentController {
    /// Validate the collection and send it to the augmentation service
    ///
    /// At most one request is in flight: a call made while another is pending
    /// returns [`SubmitOutcome::AlreadyInFlight`] and changes nothing.
    ///
    /// Validation failures set the state to `Failed` with their specific
    /// message and make no request. Transport failures set the state to
    /// `Failed` with [`GENERIC_FAILURE_MESSAGE`]; the cause is logged and
    /// returned in [`SubmitOutcome::Failed`] for diagnostics only. There is
    /// no retry.
    ///
    /// # Errors
    ///
    /// Returns `Error::TornDown` if the controller has been torn down. Every
    /// other failure is reported through the outcome.
    pub async fn submit(&self) -> Result<SubmitOutcome> {
        let (entries, num_images, previous) = {
            let mut session = self.live_session().await?;

            if session.request.is_in_flight() {
                tracing::debug!("submission ignored, request already in flight");
                return Ok(SubmitOutcome::AlreadyInFlight);
            }

            if let Err(e) = validate(&session.entries) {
                let message = e.to_string();
                let previous = std::mem::replace(
                    &mut session.request,
                    RequestState::Failed(message.clone()),
                );
                drop(session);

                self.release_archive(previous).await;
                tracing::debug!(reason = %message, "submission rejected by validation");
                self.emit(Event::SubmissionFailed { message });
                return Ok(SubmitOutcome::Rejected(e.into()));
            }

            let previous = std::mem::replace(&mut session.request, RequestState::InFlight);
            let entries: Vec<_> = session
                .entries
                .iter()
                .map(|e| (e.payload().clone(), e.class_name().to_string()))
                .collect();

            (entries, session.num_images, previous)
        };

        self.release_archive(previous).await;

        let count = entries.len();
        tracing::info!(
            entries = count,
            num_images = num_images.get(),
            "submitting to augmentation service"
        );
        self.emit(Event::SubmissionStarted { entries: count });

        let request = async {
            let payload = SubmissionPayload::from_entries(entries, num_images).await?;
            self.capabilities.service.augment(payload).await
        };

        let response = tokio::select! {
            _ = self.teardown_token.cancelled() => {
                tracing::info!("controller torn down, in-flight submission abandoned");
                return Ok(SubmitOutcome::Abandoned);
            }
            response = request => response,
        };

        match response {
            Ok(bytes) => self.complete_submission(bytes).await,
            Err(e) => self.fail_submission(e).await,
        }
    }

    async fn complete_submission(&self, bytes: Vec<u8>) -> Result<SubmitOutcome> {
        let handle = match self
            .capabilities
            .archives
            .publish(bytes, &self.config.download.file_name)
            .await
        {
            Ok(handle) => handle,
            Err(e) => return self.fail_submission(e).await,
        };

        let previous = {
            let mut session = self.session.lock().await;
            if session.torn_down {
                None
            } else {
                Some(std::mem::replace(
                    &mut session.request,
                    RequestState::Succeeded(handle.clone()),
                ))
            }
        };

        let Some(previous) = previous else {
            // Teardown raced the response; nothing may outlive the session
            self.capabilities.archives.release(&handle).await;
            return Ok(SubmitOutcome::Abandoned);
        };
        self.release_archive(previous).await;

        tracing::info!(
            size_bytes = handle.size_bytes,
            url = %handle.url,
            "augmented archive ready"
        );
        self.emit(Event::SubmissionSucceeded {
            size_bytes: handle.size_bytes,
        });
        Ok(SubmitOutcome::Completed(handle))
    }

    async fn fail_submission(&self, error: Error) -> Result<SubmitOutcome> {
        tracing::warn!(error = %error, code = error.error_code(), "augmentation request failed");

        {
            let mut session = self.session.lock().await;
            if session.torn_down {
                return Ok(SubmitOutcome::Abandoned);
            }
            session.request = RequestState::Failed(GENERIC_FAILURE_MESSAGE.to_string());
        }

        self.emit(Event::SubmissionFailed {
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        });
        Ok(SubmitOutcome::Failed(error))
    }
}
