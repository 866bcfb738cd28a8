//! Contact form submission flow.

use std::cell::Cell;
use std::future::Future;

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use log::{debug, error, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::config;
use crate::toast::Severity;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("mail service rejected the message (status {status})")]
    Rejected { status: u16 },
    #[error("could not encode message: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("a submission is already in progress")]
    Busy,
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Handed to the mail service.
    Delivered,
    /// Honeypot was filled in. Nothing was sent, but the visitor sees the
    /// same success message.
    Filtered,
}

/// Values read off the form when it is submitted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactSubmission {
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    /// Display text of the selected option, not its value.
    pub servicio: String,
    pub mensaje: String,
    /// Hidden honeypot field.
    pub website: String,
}

impl ContactSubmission {
    pub fn is_spam(&self) -> bool {
        !self.website.is_empty()
    }
}

/// Variables the mail template expects.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateParams {
    pub nombre_entidad: String,
    pub email_cliente: String,
    pub telefono_cliente: String,
    pub servicio_interes: String,
    pub mensaje_necesidad: String,
}

impl From<&ContactSubmission> for TemplateParams {
    fn from(submission: &ContactSubmission) -> Self {
        Self {
            nombre_entidad: submission.nombre.clone(),
            email_cliente: submission.email.clone(),
            telefono_cliente: submission.telefono.clone(),
            servicio_interes: submission.servicio.clone(),
            mensaje_necesidad: submission.mensaje.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MailRequest {
    pub service_id: String,
    pub template_id: String,
    pub params: TemplateParams,
}

/// Whatever actually delivers the message.
pub trait MailDispatcher {
    fn send(&self, request: &MailRequest) -> impl Future<Output = Result<(), DispatchError>>;
}

#[derive(Serialize)]
struct EmailJsPayload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// EmailJS REST endpoint, same service the premium page loads the SDK for.
pub struct EmailJsDispatcher {
    endpoint: String,
    public_key: String,
}

impl EmailJsDispatcher {
    pub fn new(endpoint: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            public_key: public_key.into(),
        }
    }
}

impl MailDispatcher for EmailJsDispatcher {
    async fn send(&self, request: &MailRequest) -> Result<(), DispatchError> {
        let payload = EmailJsPayload {
            service_id: &request.service_id,
            template_id: &request.template_id,
            user_id: &self.public_key,
            template_params: &request.params,
        };

        let response = Request::post(&self.endpoint)
            .json(&payload)
            .map_err(|e| DispatchError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(DispatchError::Rejected {
                status: response.status(),
            })
        }
    }
}

/// Stand-in for pages without a mail backend: waits, then succeeds.
pub struct SimulatedDispatcher {
    delay_ms: u32,
}

impl SimulatedDispatcher {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

impl MailDispatcher for SimulatedDispatcher {
    async fn send(&self, request: &MailRequest) -> Result<(), DispatchError> {
        debug!("Simulating delivery for template {}", request.template_id);
        TimeoutFuture::new(self.delay_ms).await;
        Ok(())
    }
}

/// The dispatcher a page is configured with.
pub enum SiteDispatcher {
    EmailJs(EmailJsDispatcher),
    Simulated(SimulatedDispatcher),
}

impl MailDispatcher for SiteDispatcher {
    async fn send(&self, request: &MailRequest) -> Result<(), DispatchError> {
        match self {
            SiteDispatcher::EmailJs(d) => d.send(request).await,
            SiteDispatcher::Simulated(d) => d.send(request).await,
        }
    }
}

/// Suspends the submission without blocking the page.
pub trait Pause {
    fn pause(&self, ms: u32) -> impl Future<Output = ()>;
}

pub struct TimerPause;

impl Pause for TimerPause {
    fn pause(&self, ms: u32) -> impl Future<Output = ()> {
        TimeoutFuture::new(ms)
    }
}

/// Everything the flow does to the page.
pub trait ContactView {
    /// `true`: disable the submit button and show the loading label.
    /// `false`: restore the original label and re-enable it.
    fn set_pending(&self, pending: bool);
    fn reset_fields(&self);
    /// Drops the `has-value` / `focused` decorations after a reset.
    fn clear_field_flags(&self);
    fn notify(&self, message: &str, severity: Severity);
    /// One-off checkmark overlay.
    fn celebrate(&self);
}

#[derive(Clone, Debug)]
pub struct ContactSettings {
    pub service_id: String,
    pub template_id: String,
    pub honeypot_delay_ms: u32,
    pub success_overlay: bool,
    pub success_message: String,
    pub error_message: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            service_id: config::EMAILJS_SERVICE_ID.to_string(),
            template_id: config::EMAILJS_TEMPLATE_ID.to_string(),
            honeypot_delay_ms: 1000,
            success_overlay: false,
            success_message: config::SUCCESS_MESSAGE.to_string(),
            error_message: config::ERROR_MESSAGE.to_string(),
        }
    }
}

pub struct ContactController<D, V, P> {
    dispatcher: D,
    view: V,
    pause: P,
    settings: ContactSettings,
    state: Cell<SubmissionState>,
}

impl<D, V, P> ContactController<D, V, P>
where
    D: MailDispatcher,
    V: ContactView,
    P: Pause,
{
    pub fn new(dispatcher: D, view: V, pause: P, settings: ContactSettings) -> Self {
        Self {
            dispatcher,
            view,
            pause,
            settings,
            state: Cell::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    pub async fn submit(&self, submission: ContactSubmission) -> Result<SubmitOutcome, SubmissionError> {
        if self.state.get() != SubmissionState::Idle {
            warn!("Ignoring submit while a previous one is still pending");
            return Err(SubmissionError::Busy);
        }
        self.state.set(SubmissionState::Pending);
        self.view.set_pending(true);

        let result = if submission.is_spam() {
            self.filter(&submission).await
        } else {
            self.deliver(&submission).await
        };

        self.state.set(match result {
            Ok(_) => SubmissionState::Succeeded,
            Err(_) => SubmissionState::Failed,
        });
        self.view.set_pending(false);
        self.state.set(SubmissionState::Idle);
        result
    }

    async fn filter(&self, submission: &ContactSubmission) -> Result<SubmitOutcome, SubmissionError> {
        info!("Honeypot filled in ({} chars), skipping delivery", submission.website.len());
        self.pause.pause(self.settings.honeypot_delay_ms).await;
        self.view.notify(&self.settings.success_message, Severity::Success);
        self.view.reset_fields();
        if self.settings.success_overlay {
            self.view.celebrate();
        }
        Ok(SubmitOutcome::Filtered)
    }

    async fn deliver(&self, submission: &ContactSubmission) -> Result<SubmitOutcome, SubmissionError> {
        let request = MailRequest {
            service_id: self.settings.service_id.clone(),
            template_id: self.settings.template_id.clone(),
            params: TemplateParams::from(submission),
        };

        match self.dispatcher.send(&request).await {
            Ok(()) => {
                info!("Contact message delivered");
                self.view.notify(&self.settings.success_message, Severity::Success);
                self.view.reset_fields();
                if self.settings.success_overlay {
                    self.view.celebrate();
                }
                self.view.clear_field_flags();
                Ok(SubmitOutcome::Delivered)
            }
            Err(e) => {
                error!("Contact message failed: {}", e);
                self.view.notify(&self.settings.error_message, Severity::Error);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::FutureExt;
    use std::cell::RefCell;
    use std::future::ready;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Pending(bool),
        Reset,
        ClearFlags,
        Notify(String, Severity),
        Celebrate,
    }

    /// Form double: records calls and keeps the field values it would show.
    #[derive(Clone, Default)]
    struct RecordingView {
        calls: Rc<RefCell<Vec<Call>>>,
        fields: Rc<RefCell<ContactSubmission>>,
    }

    impl RecordingView {
        fn filled(submission: &ContactSubmission) -> Self {
            let view = Self::default();
            *view.fields.borrow_mut() = submission.clone();
            view
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl ContactView for RecordingView {
        fn set_pending(&self, pending: bool) {
            self.calls.borrow_mut().push(Call::Pending(pending));
        }
        fn reset_fields(&self) {
            *self.fields.borrow_mut() = ContactSubmission::default();
            self.calls.borrow_mut().push(Call::Reset);
        }
        fn clear_field_flags(&self) {
            self.calls.borrow_mut().push(Call::ClearFlags);
        }
        fn notify(&self, message: &str, severity: Severity) {
            self.calls.borrow_mut().push(Call::Notify(message.to_string(), severity));
        }
        fn celebrate(&self) {
            self.calls.borrow_mut().push(Call::Celebrate);
        }
    }

    #[derive(Default)]
    struct FakeDispatcher {
        fail_with: Option<u16>,
        sent: RefCell<Vec<MailRequest>>,
    }

    impl MailDispatcher for FakeDispatcher {
        fn send(&self, request: &MailRequest) -> impl Future<Output = Result<(), DispatchError>> {
            self.sent.borrow_mut().push(request.clone());
            ready(match self.fail_with {
                Some(status) => Err(DispatchError::Rejected { status }),
                None => Ok(()),
            })
        }
    }

    /// Dispatcher that stays pending until the test releases it.
    struct GatedDispatcher {
        gate: RefCell<Option<oneshot::Receiver<Result<(), DispatchError>>>>,
    }

    impl MailDispatcher for GatedDispatcher {
        async fn send(&self, _request: &MailRequest) -> Result<(), DispatchError> {
            let gate = self.gate.borrow_mut().take();
            match gate {
                Some(rx) => rx.await.unwrap_or(Err(DispatchError::Network("dropped".into()))),
                None => Ok(()),
            }
        }
    }

    #[derive(Default)]
    struct InstantPause {
        requested: RefCell<Vec<u32>>,
    }

    impl Pause for InstantPause {
        fn pause(&self, ms: u32) -> impl Future<Output = ()> {
            self.requested.borrow_mut().push(ms);
            ready(())
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            nombre: "Comunidad Las Palmeras".into(),
            email: "admin@palmeras.es".into(),
            telefono: "600123123".into(),
            servicio: "Administración de fincas".into(),
            mensaje: "Necesitamos presupuesto".into(),
            website: String::new(),
        }
    }

    fn settings(overlay: bool) -> ContactSettings {
        ContactSettings {
            service_id: "service_test".into(),
            template_id: "template_test".into(),
            success_overlay: overlay,
            ..ContactSettings::default()
        }
    }

    #[test]
    fn delivers_mapped_fields_and_cleans_up() {
        let view = RecordingView::filled(&submission());
        let controller = ContactController::new(
            FakeDispatcher::default(),
            view.clone(),
            InstantPause::default(),
            settings(true),
        );

        let outcome = block_on(controller.submit(submission())).unwrap();
        assert_eq!(outcome, SubmitOutcome::Delivered);
        assert_eq!(controller.state(), SubmissionState::Idle);

        let sent = controller.dispatcher.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].service_id, "service_test");
        assert_eq!(sent[0].params.nombre_entidad, "Comunidad Las Palmeras");
        assert_eq!(sent[0].params.servicio_interes, "Administración de fincas");
        assert_eq!(sent[0].params.mensaje_necesidad, "Necesitamos presupuesto");

        assert_eq!(
            view.calls(),
            vec![
                Call::Pending(true),
                Call::Notify(config::SUCCESS_MESSAGE.into(), Severity::Success),
                Call::Reset,
                Call::Celebrate,
                Call::ClearFlags,
                Call::Pending(false),
            ]
        );
        assert_eq!(*view.fields.borrow(), ContactSubmission::default());
    }

    #[test]
    fn honeypot_skips_dispatch_but_reports_success() {
        let mut spam = submission();
        spam.website = "http://spam.example".into();
        let view = RecordingView::filled(&spam);
        let controller = ContactController::new(
            FakeDispatcher::default(),
            view.clone(),
            InstantPause::default(),
            settings(false),
        );

        let outcome = block_on(controller.submit(spam)).unwrap();
        assert_eq!(outcome, SubmitOutcome::Filtered);
        assert!(controller.dispatcher.sent.borrow().is_empty());
        assert_eq!(*controller.pause.requested.borrow(), vec![1000]);
        assert_eq!(
            view.calls(),
            vec![
                Call::Pending(true),
                Call::Notify(config::SUCCESS_MESSAGE.into(), Severity::Success),
                Call::Reset,
                Call::Pending(false),
            ]
        );
    }

    #[test]
    fn failure_keeps_fields_and_restores_button() {
        let view = RecordingView::filled(&submission());
        let controller = ContactController::new(
            FakeDispatcher {
                fail_with: Some(500),
                ..FakeDispatcher::default()
            },
            view.clone(),
            InstantPause::default(),
            settings(true),
        );

        let err = block_on(controller.submit(submission())).unwrap_err();
        assert!(matches!(
            err,
            SubmissionError::Dispatch(DispatchError::Rejected { status: 500 })
        ));
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert_eq!(*view.fields.borrow(), submission());
        assert_eq!(
            view.calls(),
            vec![
                Call::Pending(true),
                Call::Notify(config::ERROR_MESSAGE.into(), Severity::Error),
                Call::Pending(false),
            ]
        );
    }

    #[test]
    fn second_submit_while_pending_is_rejected() {
        let (tx, rx) = oneshot::channel();
        let view = RecordingView::default();
        let controller = ContactController::new(
            GatedDispatcher {
                gate: RefCell::new(Some(rx)),
            },
            view.clone(),
            InstantPause::default(),
            settings(false),
        );

        let mut first = Box::pin(controller.submit(submission()));
        assert!((&mut first).now_or_never().is_none());
        assert_eq!(controller.state(), SubmissionState::Pending);

        let second = block_on(controller.submit(submission()));
        assert!(matches!(second, Err(SubmissionError::Busy)));

        tx.send(Ok(())).unwrap();
        assert_eq!(block_on(first).unwrap(), SubmitOutcome::Delivered);
        assert_eq!(controller.state(), SubmissionState::Idle);

        // the rejected attempt must not have touched the button
        let pending_calls = view
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Pending(_)))
            .count();
        assert_eq!(pending_calls, 2);
    }

    #[test]
    fn resubmission_after_failure_works() {
        let view = RecordingView::default();
        let mut controller = ContactController::new(
            FakeDispatcher {
                fail_with: Some(503),
                ..FakeDispatcher::default()
            },
            view,
            InstantPause::default(),
            settings(false),
        );

        assert!(block_on(controller.submit(submission())).is_err());
        controller.dispatcher.fail_with = None;
        assert!(block_on(controller.submit(submission())).is_ok());
        assert_eq!(controller.dispatcher.sent.borrow().len(), 2);
    }

    #[test]
    fn template_params_serialize_with_template_names() {
        let params = TemplateParams::from(&submission());
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["email_cliente"], "admin@palmeras.es");
        assert_eq!(json["telefono_cliente"], "600123123");
        assert_eq!(json.as_object().map(|o| o.len()), Some(5));
    }
}
