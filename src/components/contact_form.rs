use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use web_sys::{FormData, HtmlFormElement, Window};

use crate::components::notice::{FormNotices, Notice, NoticeHost};
use crate::config::SiteConfig;
use crate::error::ValidationError;
use crate::utils::scheduler::{Deferred, TaskId};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").unwrap());

pub const SUCCESS_TEXT: &str = "Opening your email client... Thank you for your interest!";

/// Percent-encodes like `encodeURIComponent`: `urlencoding` also escapes the
/// marks `!'()*`, which mail clients expect to see verbatim.
pub fn encode_uri_component(raw: &str) -> String {
    let mut encoded = urlencoding::encode(raw).into_owned();
    for (escaped, mark) in [("%21", "!"), ("%27", "'"), ("%28", "("), ("%29", ")"), ("%2A", "*")] {
        encoded = encoded.replace(escaped, mark);
    }
    encoded
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormSubmission {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(ValidationError::MissingField);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    pub fn subject(&self, config: &SiteConfig) -> String {
        format!("{} Inquiry from {}", config.organization, self.name)
    }

    pub fn body(&self, config: &SiteConfig) -> String {
        format!(
            "Hi {},\n\nI'm interested in learning more about {}.\n\nName: {}\nEmail: {}\n\nMessage:\n{}\n\nBest regards,\n{}",
            config.recipient_name, config.organization, self.name, self.email, self.message, self.name
        )
    }

    /// Validates and builds the `mailto:` link that hands the message to the
    /// visitor's own mail client.
    pub fn mailto_uri(&self, config: &SiteConfig) -> Result<String, ValidationError> {
        self.validate()?;
        Ok(format!(
            "mailto:{}?subject={}&body={}",
            config.recipient,
            encode_uri_component(&self.subject(config)),
            encode_uri_component(&self.body(config))
        ))
    }
}

/// What the submit flow needs from the page.
pub trait ContactSurface: NoticeHost {
    fn read_submission(&self) -> FormSubmission;
    fn navigate(&self, uri: &str);
    fn reset_fields(&self);
}

/// The contact form as it exists in the DOM.
pub struct DomContactForm {
    window: Window,
    form: HtmlFormElement,
    notices: FormNotices,
}

impl DomContactForm {
    pub fn new(window: Window, form: HtmlFormElement, notices: FormNotices) -> Self {
        Self { window, form, notices }
    }

    fn field(data: &FormData, name: &str) -> String {
        data.get(name).as_string().unwrap_or_default()
    }
}

impl NoticeHost for DomContactForm {
    fn remove_notice(&self) {
        self.notices.remove_notice();
    }

    fn insert_notice(&self, notice: &Notice) {
        self.notices.insert_notice(notice);
    }
}

impl ContactSurface for DomContactForm {
    fn read_submission(&self) -> FormSubmission {
        match FormData::new_with_form(&self.form) {
            Ok(data) => FormSubmission {
                name: Self::field(&data, "name"),
                email: Self::field(&data, "email"),
                message: Self::field(&data, "message"),
            },
            Err(e) => {
                warn!("Could not read contact form fields: {:?}", e);
                FormSubmission::default()
            }
        }
    }

    fn navigate(&self, uri: &str) {
        if let Err(e) = self.window.location().set_href(uri) {
            warn!("Failed to open mail client: {:?}", e);
        }
    }

    fn reset_fields(&self) {
        self.form.reset();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent { uri: String },
    Rejected(ValidationError),
}

/// Submit handling for the contact form. Holds on to the pending reset so a
/// quick second submission restarts the countdown instead of stacking resets.
pub struct ContactForm<S, D> {
    surface: Rc<S>,
    scheduler: D,
    config: Rc<SiteConfig>,
    pending_reset: Rc<Cell<Option<TaskId>>>,
}

impl<S, D> ContactForm<S, D>
where
    S: ContactSurface + 'static,
    D: Deferred,
{
    pub fn new(surface: Rc<S>, scheduler: D, config: Rc<SiteConfig>) -> Self {
        Self {
            surface,
            scheduler,
            config,
            pending_reset: Rc::new(Cell::new(None)),
        }
    }

    pub fn submit(&self) -> SubmitOutcome {
        let submission = self.surface.read_submission();

        let uri = match submission.mailto_uri(&self.config) {
            Ok(uri) => uri,
            Err(e) => {
                debug!("Contact form rejected: {:?}", e);
                self.surface.show_notice(&Notice::error(e.to_string()));
                return SubmitOutcome::Rejected(e);
            }
        };

        info!("Opening mail client for contact form submission");
        self.surface.navigate(&uri);
        self.surface.show_notice(&Notice::success(SUCCESS_TEXT));

        if let Some(previous) = self.pending_reset.take() {
            self.scheduler.cancel(previous);
        }
        let surface = self.surface.clone();
        let pending = self.pending_reset.clone();
        let id = self.scheduler.defer(
            self.config.reset_delay_ms,
            Box::new(move || {
                pending.set(None);
                surface.reset_fields();
                surface.remove_notice();
            }),
        );
        self.pending_reset.set(Some(id));

        SubmitOutcome::Sent { uri }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeForm {
        fields: RefCell<FormSubmission>,
        notices: RefCell<Vec<Notice>>,
        navigations: RefCell<Vec<String>>,
    }

    impl FakeForm {
        fn filled(name: &str, email: &str, message: &str) -> Rc<Self> {
            let form = Self::default();
            *form.fields.borrow_mut() = FormSubmission {
                name: name.into(),
                email: email.into(),
                message: message.into(),
            };
            Rc::new(form)
        }
    }

    impl NoticeHost for FakeForm {
        fn remove_notice(&self) {
            self.notices.borrow_mut().clear();
        }

        fn insert_notice(&self, notice: &Notice) {
            self.notices.borrow_mut().insert(0, notice.clone());
        }
    }

    impl ContactSurface for FakeForm {
        fn read_submission(&self) -> FormSubmission {
            self.fields.borrow().clone()
        }

        fn navigate(&self, uri: &str) {
            self.navigations.borrow_mut().push(uri.to_string());
        }

        fn reset_fields(&self) {
            *self.fields.borrow_mut() = FormSubmission::default();
        }
    }

    /// Collects deferred tasks and runs them when told how much time passed.
    #[derive(Clone, Default)]
    struct ManualScheduler {
        now: Rc<Cell<u32>>,
        next_id: Rc<Cell<u64>>,
        tasks: Rc<RefCell<Vec<(TaskId, u32, Box<dyn FnOnce()>)>>>,
    }

    impl ManualScheduler {
        fn advance(&self, ms: u32) {
            let now = self.now.get() + ms;
            self.now.set(now);
            let due: Vec<_> = {
                let mut tasks = self.tasks.borrow_mut();
                let (due, later): (Vec<_>, Vec<_>) = tasks.drain(..).partition(|(_, at, _)| *at <= now);
                *tasks = later;
                due
            };
            for (_, _, task) in due {
                task();
            }
        }

        fn pending(&self) -> usize {
            self.tasks.borrow().len()
        }
    }

    impl Deferred for ManualScheduler {
        fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskId {
            let id = TaskId::new(self.next_id.get());
            self.next_id.set(self.next_id.get() + 1);
            self.tasks.borrow_mut().push((id, self.now.get() + delay_ms, task));
            id
        }

        fn cancel(&self, id: TaskId) {
            self.tasks.borrow_mut().retain(|(task_id, _, _)| *task_id != id);
        }
    }

    fn handler(form: &Rc<FakeForm>, scheduler: &ManualScheduler) -> ContactForm<FakeForm, ManualScheduler> {
        ContactForm::new(form.clone(), scheduler.clone(), Rc::new(SiteConfig::default()))
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("jane@x.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("jane@x"));
        assert!(!is_valid_email("jane x@x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("jane@@x.com"));
        assert!(!is_valid_email("ja\u{FEFF}ne@x.com"));
    }

    #[test]
    fn uri_component_keeps_unreserved_marks() {
        assert_eq!(encode_uri_component("O'Brien (Jo)!*"), "O'Brien%20(Jo)!*");
        assert_eq!(encode_uri_component("a@b, c&d=e"), "a%40b%2C%20c%26d%3De");
        assert_eq!(encode_uri_component("100% %27"), "100%25%20%2527");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn mailto_matches_browser_encoding_for_marks() {
        let submission = FormSubmission {
            name: "O'Brien (Jo)!".into(),
            email: "jo@x.com".into(),
            message: "Hi".into(),
        };
        let uri = submission.mailto_uri(&SiteConfig::default()).unwrap();

        assert!(uri.contains("subject=Intuitive%20Movement%20Inquiry%20from%20O'Brien%20(Jo)!&body="));
        assert!(uri.contains("I'm%20interested"));
        assert!(!uri.contains("%27"));
    }

    #[test]
    fn missing_field_wins_over_bad_email() {
        let submission = FormSubmission {
            name: String::new(),
            email: "nope".into(),
            message: "Hi".into(),
        };
        assert_eq!(submission.validate(), Err(ValidationError::MissingField));
    }

    #[test]
    fn mailto_is_percent_encoded() {
        let submission = FormSubmission {
            name: "Jane".into(),
            email: "jane@x.com".into(),
            message: "Hi".into(),
        };
        let uri = submission.mailto_uri(&SiteConfig::default()).unwrap();

        assert!(uri.starts_with("mailto:tonygardiner82@gmail.com?subject="));
        assert!(uri.contains("subject=Intuitive%20Movement%20Inquiry%20from%20Jane&body="));
        let body = uri.split("&body=").nth(1).unwrap();
        assert!(body.starts_with("Hi%20Tony%2C%0A%0A"));
        assert!(body.contains("Name%3A%20Jane%0AEmail%3A%20jane%40x.com"));
        assert!(body.contains("Message%3A%0AHi%0A"));
        assert!(body.ends_with("Best%20regards%2C%0AJane"));
    }

    #[test]
    fn valid_submission_navigates_once_and_resets_later() {
        let form = FakeForm::filled("Jane", "jane@x.com", "Hi");
        let scheduler = ManualScheduler::default();
        let contact = handler(&form, &scheduler);

        let outcome = contact.submit();
        assert!(matches!(outcome, SubmitOutcome::Sent { .. }));
        assert_eq!(form.navigations.borrow().len(), 1);
        assert_eq!(*form.notices.borrow(), vec![Notice::success(SUCCESS_TEXT)]);

        scheduler.advance(2999);
        assert_eq!(form.fields.borrow().name, "Jane");
        assert_eq!(form.notices.borrow().len(), 1);

        scheduler.advance(1);
        assert_eq!(*form.fields.borrow(), FormSubmission::default());
        assert!(form.notices.borrow().is_empty());
    }

    #[test]
    fn empty_field_shows_missing_field_notice() {
        for (name, email, message) in [("", "jane@x.com", "Hi"), ("Jane", "", "Hi"), ("Jane", "jane@x.com", "")] {
            let form = FakeForm::filled(name, email, message);
            let scheduler = ManualScheduler::default();

            let outcome = handler(&form, &scheduler).submit();

            assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::MissingField));
            assert!(form.navigations.borrow().is_empty());
            assert_eq!(*form.notices.borrow(), vec![Notice::error("Please fill in all fields.")]);
            assert_eq!(scheduler.pending(), 0);
        }
    }

    #[test]
    fn bad_email_shows_invalid_email_notice_and_keeps_fields() {
        let form = FakeForm::filled("Jane", "jane-at-x.com", "Hi");
        let scheduler = ManualScheduler::default();

        let outcome = handler(&form, &scheduler).submit();

        assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::InvalidEmail));
        assert!(form.navigations.borrow().is_empty());
        assert_eq!(*form.notices.borrow(), vec![Notice::error("Please enter a valid email address.")]);
        scheduler.advance(5000);
        assert_eq!(form.fields.borrow().email, "jane-at-x.com");
    }

    #[test]
    fn resubmitting_restarts_the_reset_countdown() {
        let form = FakeForm::filled("Jane", "jane@x.com", "Hi");
        let scheduler = ManualScheduler::default();
        let contact = handler(&form, &scheduler);

        contact.submit();
        scheduler.advance(2000);
        contact.submit();
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(1500);
        assert_eq!(form.fields.borrow().name, "Jane");
        scheduler.advance(1500);
        assert!(form.fields.borrow().name.is_empty());
        assert_eq!(form.navigations.borrow().len(), 2);
    }
}
