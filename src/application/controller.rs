//! Recording session controller
//!
//! Owns the recording state machine, the platform recorder session and the
//! duration ticker for one voice-message control. State changes are published
//! as [`SessionSnapshot`]s on a watch channel; views subscribe instead of
//! holding state themselves.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use tokio::sync::{watch, Mutex};
use tokio::time::Instant;
use tracing::{debug, error, info, trace, warn};

use crate::domain::recording::{
    ElapsedTime, RecorderConfig, RecordingSession, SessionStatus, DEFAULT_TICK_INTERVAL_MS,
};
use crate::domain::voice::{CapturedAudioAsset, ChannelTarget, VoicePost};

use super::error::VoiceMessageError;
use super::pipeline::UploadPostPipeline;
use super::ports::{
    FileUploader, IdGenerator, MicrophonePermission, Notifier, PlatformRecorder, PostCreator,
};
use super::ticker::{DurationTicker, TickCallback};

/// What views observe of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub elapsed: ElapsedTime,
    /// Recordings handed to the upload pipeline and not yet finished
    pub pending_sends: u32,
}

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A session is already active; nothing changed
    AlreadyActive,
}

/// Result of a stop request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// No recording was in progress; nothing changed
    NotRecording,
    /// The recording was discarded without any network call
    Cancelled { elapsed: ElapsedTime },
    /// The recording was uploaded and posted
    Sent(VoicePost),
}

/// Settings for one controller instance
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub target: ChannelTarget,
    pub recorder: RecorderConfig,
    pub tick_interval: StdDuration,
}

impl ControllerConfig {
    pub fn new(target: ChannelTarget) -> Self {
        Self {
            target,
            recorder: RecorderConfig::default(),
            tick_interval: StdDuration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

struct Inner {
    session: RecordingSession,
    ticker: DurationTicker,
}

struct StoppedRecording {
    uri: String,
    elapsed: ElapsedTime,
}

/// Voice recording controller.
///
/// State machine:
///   IDLE -> RECORDING (start, permission granted and recorder started)
///   RECORDING -> STOPPING -> IDLE (stop, send or cancel)
///   any -> IDLE (teardown)
///
/// Dropping the controller does not run [`teardown`](Self::teardown); a
/// recorder still capturing at that point is left to its own `Drop`.
pub struct RecordingController<P, R, G, N, U, C>
where
    P: MicrophonePermission,
    R: PlatformRecorder,
    G: IdGenerator,
    N: Notifier,
    U: FileUploader,
    C: PostCreator,
{
    permission: P,
    recorder: R,
    ids: G,
    notifier: N,
    pipeline: UploadPostPipeline<U, C>,
    config: ControllerConfig,
    inner: Mutex<Inner>,
    state: Arc<watch::Sender<SessionSnapshot>>,
}

impl<P, R, G, N, U, C> RecordingController<P, R, G, N, U, C>
where
    P: MicrophonePermission,
    R: PlatformRecorder,
    G: IdGenerator,
    N: Notifier,
    U: FileUploader,
    C: PostCreator,
{
    pub fn new(
        permission: P,
        recorder: R,
        ids: G,
        notifier: N,
        pipeline: UploadPostPipeline<U, C>,
        config: ControllerConfig,
    ) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        let ticker = DurationTicker::new(config.tick_interval);
        Self {
            permission,
            recorder,
            ids,
            notifier,
            pipeline,
            config,
            inner: Mutex::new(Inner {
                session: RecordingSession::new(),
                ticker,
            }),
            state: Arc::new(state),
        }
    }

    /// Subscribe to state snapshots
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        *self.state.borrow()
    }

    pub fn target(&self) -> &ChannelTarget {
        &self.config.target
    }

    /// Start recording. A no-op while a session is already active.
    pub async fn start(&self) -> Result<StartOutcome, VoiceMessageError> {
        let result = {
            let mut inner = self.inner.lock().await;
            self.start_locked(&mut inner).await
        };
        self.surface(result).await
    }

    async fn start_locked(&self, inner: &mut Inner) -> Result<StartOutcome, VoiceMessageError> {
        if !inner.session.is_idle() {
            debug!(status = %inner.session.status(), "start ignored, session active");
            return Ok(StartOutcome::AlreadyActive);
        }

        if !self.permission.check_microphone_access().await {
            return Err(VoiceMessageError::PermissionDenied);
        }

        self.recorder
            .start_recorder(&self.config.recorder)
            .await
            .map_err(VoiceMessageError::RecorderStartFailure)?;
        self.recorder.set_record_back_listener(Arc::new(|position_ms: u64| {
            trace!(position_ms, "recorder position");
        }));

        let started_at = Instant::now();
        inner.session.start(started_at)?;
        self.publish(SessionStatus::Recording, ElapsedTime::ZERO);

        let state = Arc::clone(&self.state);
        let on_tick: TickCallback = Arc::new(move |elapsed| {
            state.send_if_modified(|snapshot| {
                if snapshot.status != SessionStatus::Recording {
                    return false;
                }
                snapshot.elapsed = elapsed;
                true
            });
        });
        inner.ticker.start(started_at, on_tick);

        info!(channel_id = self.config.target.channel_id(), "recording started");
        Ok(StartOutcome::Started)
    }

    /// Stop recording. With `send` the recording is uploaded and posted;
    /// without it the recording is discarded. A no-op when not recording.
    ///
    /// The session is idle again when this returns, whatever the outcome.
    pub async fn stop(&self, send: bool) -> Result<StopOutcome, VoiceMessageError> {
        let stopped = {
            let mut inner = self.inner.lock().await;
            self.stop_locked(&mut inner).await
        };

        let result = match stopped {
            Ok(None) => Ok(StopOutcome::NotRecording),
            Ok(Some(recording)) if !send => {
                self.discard(&recording.uri).await;
                info!(elapsed_ms = recording.elapsed.as_millis(), "recording cancelled");
                Ok(StopOutcome::Cancelled {
                    elapsed: recording.elapsed,
                })
            }
            Ok(Some(recording)) => self.deliver(recording).await.map(StopOutcome::Sent),
            Err(e) => Err(e),
        };
        self.surface(result).await
    }

    /// Discard the current recording
    pub async fn cancel(&self) -> Result<StopOutcome, VoiceMessageError> {
        self.stop(false).await
    }

    /// Send the current recording
    pub async fn send(&self) -> Result<StopOutcome, VoiceMessageError> {
        self.stop(true).await
    }

    /// Start when idle, send when recording
    pub async fn toggle(&self) -> Result<(), VoiceMessageError> {
        let status = self.inner.lock().await.session.status();
        match status {
            SessionStatus::Idle => self.start().await.map(|_| ()),
            SessionStatus::Recording => self.send().await.map(|_| ()),
            SessionStatus::Stopping => Ok(()),
        }
    }

    async fn stop_locked(
        &self,
        inner: &mut Inner,
    ) -> Result<Option<StoppedRecording>, VoiceMessageError> {
        if !inner.session.is_recording() {
            debug!(status = %inner.session.status(), "stop ignored, not recording");
            return Ok(None);
        }

        let elapsed = inner.session.begin_stop(Instant::now())?;
        inner.ticker.stop();
        self.publish(SessionStatus::Stopping, elapsed);

        let stopped = self.recorder.stop_recorder().await;
        self.recorder.remove_record_back_listener();

        inner.session.finish()?;
        self.publish(SessionStatus::Idle, ElapsedTime::ZERO);

        let uri = stopped.map_err(VoiceMessageError::RecorderStopFailure)?;
        Ok(Some(StoppedRecording { uri, elapsed }))
    }

    /// Upload and post a stopped recording. The local file is released
    /// whether or not the pipeline succeeds.
    async fn deliver(&self, recording: StoppedRecording) -> Result<VoicePost, VoiceMessageError> {
        let asset = CapturedAudioAsset::new(recording.uri.clone(), self.ids.generate_id());

        self.state.send_modify(|s| s.pending_sends += 1);
        let result = self
            .pipeline
            .run(asset, &self.config.target, recording.elapsed)
            .await;
        self.state
            .send_modify(|s| s.pending_sends = s.pending_sends.saturating_sub(1));

        self.discard(&recording.uri).await;
        result
    }

    async fn discard(&self, uri: &str) {
        if let Err(e) = self.recorder.discard(uri).await {
            warn!(uri, error = %e, "failed to discard recording");
        }
    }

    /// Release everything the controller holds. Stops the ticker and, if a
    /// recording is running, stops and discards it. Safe to call repeatedly.
    pub async fn teardown(&self) {
        let mut inner = self.inner.lock().await;
        inner.ticker.stop();

        if inner.session.is_recording() {
            let stopped = self.recorder.stop_recorder().await;
            self.recorder.remove_record_back_listener();
            match stopped {
                Ok(uri) => self.discard(&uri).await,
                Err(e) => warn!(error = %e, "recorder stop failed during teardown"),
            }
        }

        if !inner.session.is_idle() {
            inner.session.reset();
            self.publish(SessionStatus::Idle, ElapsedTime::ZERO);
            debug!("recording torn down");
        }
    }

    fn publish(&self, status: SessionStatus, elapsed: ElapsedTime) {
        self.state.send_modify(|snapshot| {
            snapshot.status = status;
            snapshot.elapsed = elapsed;
        });
    }

    /// Report a failure to the user; the typed error is still returned
    async fn surface<T>(&self, result: Result<T, VoiceMessageError>) -> Result<T, VoiceMessageError> {
        if let Err(ref e) = result {
            error!(error = %e, "voice message failed");
            if let Err(notify_err) = self.notifier.alert(&e.alert()).await {
                warn!(error = %notify_err, "failed to show alert");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        NotificationError, PostError, RecordBackListener, RecorderError, UploadError, UserAlert,
    };
    use crate::domain::voice::{PostDraft, UploadResponse};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use tokio::time::sleep;

    #[derive(Default)]
    struct Calls {
        starts: AtomicUsize,
        stops: AtomicUsize,
        listener_removals: AtomicUsize,
        discards: StdMutex<Vec<String>>,
        uploads: AtomicUsize,
        posts: StdMutex<Vec<PostDraft>>,
        alerts: StdMutex<Vec<UserAlert>>,
    }

    struct MockPermission(bool);

    #[async_trait]
    impl MicrophonePermission for MockPermission {
        async fn check_microphone_access(&self) -> bool {
            self.0
        }
    }

    struct MockRecorder {
        calls: Arc<Calls>,
        running: AtomicBool,
        fail_start: bool,
        fail_stop: bool,
        uri: &'static str,
    }

    #[async_trait]
    impl PlatformRecorder for MockRecorder {
        async fn start_recorder(&self, _config: &RecorderConfig) -> Result<(), RecorderError> {
            self.calls.starts.fetch_add(1, Ordering::SeqCst);
            if self.fail_start {
                return Err(RecorderError::StartFailed("device busy".into()));
            }
            assert!(!self.running.swap(true, Ordering::SeqCst), "recorder started twice");
            Ok(())
        }

        async fn stop_recorder(&self) -> Result<String, RecorderError> {
            self.calls.stops.fetch_add(1, Ordering::SeqCst);
            if !self.running.swap(false, Ordering::SeqCst) {
                return Err(RecorderError::NotRecording);
            }
            if self.fail_stop {
                return Err(RecorderError::StopFailed("device lost".into()));
            }
            Ok(self.uri.to_string())
        }

        fn set_record_back_listener(&self, _listener: RecordBackListener) {}

        fn remove_record_back_listener(&self) {
            self.calls.listener_removals.fetch_add(1, Ordering::SeqCst);
        }

        async fn discard(&self, uri: &str) -> Result<(), RecorderError> {
            self.calls.discards.lock().unwrap().push(uri.to_string());
            Ok(())
        }
    }

    struct FixedIds;

    impl IdGenerator for FixedIds {
        fn generate_id(&self) -> String {
            "client-id".to_string()
        }
    }

    struct MockNotifier(Arc<Calls>);

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn alert(&self, alert: &UserAlert) -> Result<(), NotificationError> {
            self.0.alerts.lock().unwrap().push(alert.clone());
            Ok(())
        }
    }

    struct MockUploader {
        calls: Arc<Calls>,
        response: UploadResponse,
    }

    #[async_trait]
    impl FileUploader for MockUploader {
        async fn upload_file(
            &self,
            _asset: &CapturedAudioAsset,
            _channel_id: &str,
        ) -> Result<UploadResponse, UploadError> {
            self.calls.uploads.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    struct MockPosts(Arc<Calls>);

    #[async_trait]
    impl PostCreator for MockPosts {
        async fn create_post(&self, draft: &PostDraft, _file_ids: &[String]) -> Result<(), PostError> {
            self.0.posts.lock().unwrap().push(draft.clone());
            Ok(())
        }
    }

    type TestController =
        RecordingController<MockPermission, MockRecorder, FixedIds, MockNotifier, MockUploader, MockPosts>;

    struct Setup {
        permission: bool,
        fail_start: bool,
        fail_stop: bool,
        upload: UploadResponse,
    }

    impl Default for Setup {
        fn default() -> Self {
            Self {
                permission: true,
                fail_start: false,
                fail_stop: false,
                upload: UploadResponse::created("F1"),
            }
        }
    }

    fn controller(setup: Setup) -> (TestController, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let recorder = MockRecorder {
            calls: Arc::clone(&calls),
            running: AtomicBool::new(false),
            fail_start: setup.fail_start,
            fail_stop: setup.fail_stop,
            uri: "file://tmp/a.m4a",
        };
        let pipeline = UploadPostPipeline::new(
            MockUploader {
                calls: Arc::clone(&calls),
                response: setup.upload,
            },
            MockPosts(Arc::clone(&calls)),
        );
        let config = ControllerConfig::new(ChannelTarget::new("chan", None).unwrap());
        let controller = RecordingController::new(
            MockPermission(setup.permission),
            recorder,
            FixedIds,
            MockNotifier(Arc::clone(&calls)),
            pipeline,
            config,
        );
        (controller, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_start_keeps_single_session() {
        let (controller, calls) = controller(Setup::default());

        assert_eq!(controller.start().await.unwrap(), StartOutcome::Started);
        for _ in 0..3 {
            assert_eq!(controller.start().await.unwrap(), StartOutcome::AlreadyActive);
        }

        assert_eq!(calls.starts.load(Ordering::SeqCst), 1);
        assert_eq!(controller.snapshot().status, SessionStatus::Recording);
        assert!(controller.inner.lock().await.ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_then_start_resets_elapsed() {
        let (controller, _calls) = controller(Setup::default());

        controller.start().await.unwrap();
        sleep(StdDuration::from_millis(450)).await;
        assert_eq!(controller.snapshot().elapsed.as_millis(), 400);

        controller.stop(false).await.unwrap();
        controller.start().await.unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.status, SessionStatus::Recording);
        assert_eq!(snapshot.elapsed, ElapsedTime::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_makes_no_network_call() {
        let (controller, calls) = controller(Setup::default());

        controller.start().await.unwrap();
        sleep(StdDuration::from_millis(250)).await;
        let outcome = controller.stop(false).await.unwrap();

        assert_eq!(
            outcome,
            StopOutcome::Cancelled {
                elapsed: ElapsedTime::from_millis(250)
            }
        );
        assert_eq!(calls.uploads.load(Ordering::SeqCst), 0);
        assert!(calls.posts.lock().unwrap().is_empty());
        assert_eq!(*calls.discards.lock().unwrap(), vec!["file://tmp/a.m4a".to_string()]);
        assert_eq!(controller.snapshot().status, SessionStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn send_posts_captured_duration() {
        let (controller, calls) = controller(Setup::default());

        controller.start().await.unwrap();
        sleep(StdDuration::from_millis(1_230)).await;
        let ui_elapsed = controller.snapshot().elapsed;

        let outcome = controller.stop(true).await.unwrap();
        let StopOutcome::Sent(post) = outcome else {
            panic!("expected a sent post");
        };

        assert_eq!(post.file_id, "F1");
        assert_eq!(post.duration.as_millis(), 1_230);
        assert!(post.duration.abs_diff_ms(ui_elapsed) <= 100);

        let drafts = calls.posts.lock().unwrap().clone();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].props.file_id, "F1");
        assert_eq!(drafts[0].props.duration, 1_230);
        assert_eq!(calls.listener_removals.load(Ordering::SeqCst), 1);
        assert_eq!(controller.snapshot(), SessionSnapshot::default());
    }

    #[tokio::test(start_paused = true)]
    async fn sent_recording_file_is_released() {
        let (controller, calls) = controller(Setup::default());

        controller.start().await.unwrap();
        sleep(StdDuration::from_millis(300)).await;
        controller.send().await.unwrap();

        assert_eq!(*calls.discards.lock().unwrap(), vec!["file://tmp/a.m4a".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_send_still_releases_recording_file() {
        let (controller, calls) = controller(Setup {
            upload: UploadResponse::status_only(500),
            ..Default::default()
        });

        controller.start().await.unwrap();
        sleep(StdDuration::from_millis(300)).await;
        assert!(controller.send().await.is_err());

        assert_eq!(*calls.discards.lock().unwrap(), vec!["file://tmp/a.m4a".to_string()]);
        assert_eq!(controller.snapshot().pending_sends, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn upload_failure_never_posts() {
        let (controller, calls) = controller(Setup {
            upload: UploadResponse::status_only(500),
            ..Default::default()
        });

        controller.start().await.unwrap();
        let err = controller.stop(true).await.unwrap_err();

        assert!(matches!(err, VoiceMessageError::UploadFailure(_)));
        assert!(calls.posts.lock().unwrap().is_empty());
        assert_eq!(controller.snapshot().status, SessionStatus::Idle);
        assert_eq!(calls.alerts.lock().unwrap()[0].title, "Send Error");
    }

    #[tokio::test]
    async fn permission_denied_never_touches_recorder() {
        let (controller, calls) = controller(Setup {
            permission: false,
            ..Default::default()
        });

        let err = controller.start().await.unwrap_err();

        assert!(matches!(err, VoiceMessageError::PermissionDenied));
        assert_eq!(calls.starts.load(Ordering::SeqCst), 0);
        assert_eq!(controller.snapshot().status, SessionStatus::Idle);
        assert!(!controller.inner.lock().await.ticker.is_running());
        assert_eq!(
            calls.alerts.lock().unwrap()[0].title,
            "Microphone Permission Required"
        );
    }

    #[tokio::test]
    async fn recorder_start_failure_stays_idle() {
        let (controller, calls) = controller(Setup {
            fail_start: true,
            ..Default::default()
        });

        let err = controller.start().await.unwrap_err();

        assert!(matches!(err, VoiceMessageError::RecorderStartFailure(_)));
        assert!(controller.inner.lock().await.session.is_idle());
        assert!(!controller.inner.lock().await.ticker.is_running());
        assert_eq!(calls.alerts.lock().unwrap()[0].title, "Recording Error");
    }

    #[tokio::test]
    async fn recorder_stop_failure_still_resets() {
        let (controller, calls) = controller(Setup {
            fail_stop: true,
            ..Default::default()
        });

        controller.start().await.unwrap();
        let err = controller.stop(true).await.unwrap_err();

        assert!(matches!(err, VoiceMessageError::RecorderStopFailure(_)));
        assert_eq!(controller.snapshot().status, SessionStatus::Idle);
        assert_eq!(calls.uploads.load(Ordering::SeqCst), 0);
        assert!(calls.discards.lock().unwrap().is_empty());

        // Usable again afterwards
        assert_eq!(controller.start().await.unwrap(), StartOutcome::Started);
    }

    #[tokio::test]
    async fn stop_when_idle_is_noop() {
        let (controller, calls) = controller(Setup::default());

        assert_eq!(controller.stop(true).await.unwrap(), StopOutcome::NotRecording);
        assert_eq!(controller.stop(false).await.unwrap(), StopOutcome::NotRecording);
        assert_eq!(calls.stops.load(Ordering::SeqCst), 0);
        assert!(calls.alerts.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_stops_ticker_and_recorder() {
        let (controller, calls) = controller(Setup::default());
        let mut rx = controller.subscribe();

        controller.start().await.unwrap();
        sleep(StdDuration::from_millis(150)).await;
        controller.teardown().await;
        rx.borrow_and_update();

        sleep(StdDuration::from_millis(1_000)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(rx.borrow().status, SessionStatus::Idle);
        assert_eq!(calls.stops.load(Ordering::SeqCst), 1);
        assert_eq!(calls.discards.lock().unwrap().len(), 1);

        // Second teardown does not stop the recorder again
        controller.teardown().await;
        assert_eq!(calls.stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_controller_ends_tick_emissions() {
        let (controller, _calls) = controller(Setup::default());
        let mut rx = controller.subscribe();

        controller.start().await.unwrap();
        sleep(StdDuration::from_millis(150)).await;
        drop(controller);
        rx.borrow_and_update();

        sleep(StdDuration::from_millis(1_000)).await;
        assert!(!rx.has_changed().unwrap_or(false));
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_starts_then_sends() {
        let (controller, calls) = controller(Setup::default());

        controller.toggle().await.unwrap();
        assert_eq!(controller.snapshot().status, SessionStatus::Recording);

        controller.toggle().await.unwrap();
        assert_eq!(controller.snapshot().status, SessionStatus::Idle);
        assert_eq!(calls.posts.lock().unwrap().len(), 1);
    }
}
