use crate::contact::{Field, FieldState, Notice, SubmitControl};
use crate::models::contact::ContactMessage;
use crate::render::html_escape;
use crate::views::section;

/// What the contact page shows: current values, per-field state after a
/// failed submit, and the notice above the form.
#[derive(Debug, Clone, Default)]
pub struct ContactView {
    pub values: ContactMessage,
    pub fields: Vec<FieldState>,
    pub notice: Option<Notice>,
    pub control: SubmitControl,
}

impl ContactView {
    fn state(&self, field: Field) -> Option<&FieldState> {
        self.fields.iter().find(|s| s.field == field)
    }

    fn class(&self, field: Field) -> String {
        match self.state(field) {
            Some(state) => format!("form-control {}", state.class()),
            None => "form-control".to_string(),
        }
    }

    fn feedback(&self, field: Field) -> String {
        let message = self
            .state(field)
            .filter(|s| !s.valid)
            .map(|s| html_escape(&s.message))
            .unwrap_or_default();
        format!(
            r#"<div class="invalid-feedback" data-feedback="{}">{}</div>"#,
            field.name(),
            message
        )
    }
}

pub fn render_notice(notice: &Notice) -> String {
    let (class, icon) = match notice.kind {
        crate::render::AlertKind::Success => ("alert-success", "bi-check-circle"),
        _ => ("alert-danger", "bi-exclamation-triangle"),
    };
    let lines = notice
        .lines
        .iter()
        .map(|l| html_escape(l))
        .collect::<Vec<_>>()
        .join("<br>");
    let hide = notice
        .auto_hide
        .map(|ms| format!(r#" data-auto-hide="{}""#, ms))
        .unwrap_or_default();
    format!(
        r#"<div id="formMessage"{hide}><div class="alert {class} alert-dismissible fade show" role="alert">
    <i class="bi {icon} me-2"></i>
    {lines}
    <button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>
</div></div>"#,
        hide = hide,
        class = class,
        icon = icon,
        lines = lines,
    )
}

fn input(view: &ContactView, field: Field, kind: &str, label_key: &str, label: &str, value: &str) -> String {
    format!(
        r#"<div class="col-md-6">
    <label for="{name}" class="form-label" data-lang="{label_key}">{label}</label>
    <input type="{kind}" class="{class}" id="{name}" name="{name}" value="{value}" required>
    {feedback}
</div>"#,
        name = field.name(),
        label_key = label_key,
        label = html_escape(label),
        kind = kind,
        class = view.class(field),
        value = html_escape(value),
        feedback = view.feedback(field),
    )
}

const LIVE_VALIDATION: &str = r#"<script>
(function () {
    var form = document.getElementById('contactForm');
    if (!form) return;
    form.querySelectorAll('.form-control').forEach(function (field) {
        field.addEventListener('input', function () {
            var body = new URLSearchParams({ field: field.name, value: field.value });
            fetch('/api/contact/validate', { method: 'POST', body: body })
                .then(function (r) { return r.json(); })
                .then(function (s) {
                    field.classList.remove('is-valid', 'is-invalid');
                    field.classList.add(s.valid ? 'is-valid' : 'is-invalid');
                    var fb = form.querySelector('[data-feedback="' + field.name + '"]');
                    if (fb) fb.textContent = s.message;
                })
                .catch(function () {});
        });
    });
    form.addEventListener('submit', function () {
        var btn = form.querySelector('button[type="submit"]');
        btn.disabled = true;
        btn.querySelector('.spinner-border').classList.remove('d-none');
    });
    var notice = document.getElementById('formMessage');
    if (notice && notice.dataset.autoHide) {
        setTimeout(function () { notice.style.display = 'none'; }, parseInt(notice.dataset.autoHide, 10));
    }
})();
</script>"#;

pub fn render_contact_page(view: &ContactView) -> String {
    let notice = view.notice.as_ref().map(render_notice).unwrap_or_default();
    let spinner = if view.control.busy { "" } else { " d-none" };
    let disabled = if view.control.disabled { " disabled" } else { "" };
    let form = format!(
        r#"<div class="row justify-content-center">
<div class="col-lg-8">
<div class="card"><div class="card-body p-4">
<h4 class="card-title mb-4" data-lang="contact.form.title">Send a Message</h4>
{notice}
<form id="contactForm" method="post" action="/contact" novalidate>
<div class="row g-3">
{first}
{last}
{phone}
<div class="col-12">
    <label for="message" class="form-label" data-lang="contact.form.message">Message *</label>
    <textarea class="{msg_class}" id="message" name="message" rows="5" data-lang="contact.form.messagePlaceholder" placeholder="Tell me about your project, question, or how I can help you..." required>{msg}</textarea>
    {msg_feedback}
</div>
<div class="col-12 text-end">
    <button type="submit" class="btn btn-primary"{disabled}>
        <span class="spinner-border spinner-border-sm me-2{spinner}" role="status"></span><span data-lang="contact.form.sendMessage">Send Message</span>
    </button>
</div>
</div>
</form>
</div></div>
</div>
</div>
{script}"#,
        notice = notice,
        first = input(view, Field::FirstName, "text", "contact.form.firstName", "First Name *", &view.values.first_name),
        last = input(view, Field::LastName, "text", "contact.form.lastName", "Last Name *", &view.values.last_name),
        phone = input(view, Field::PhoneNumber, "tel", "contact.form.phoneNumber", "Phone Number *", &view.values.phone_number),
        msg_class = view.class(Field::Message),
        msg = html_escape(&view.values.message),
        msg_feedback = view.feedback(Field::Message),
        disabled = disabled,
        spinner = spinner,
        script = LIVE_VALIDATION,
    );
    section(
        "contact",
        "contact",
        "Contact Me",
        "Have a question or want to work together? Send me a message.",
        &form,
    )
}
