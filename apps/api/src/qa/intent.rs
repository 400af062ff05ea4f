/// The category a question is routed to. Checked in declaration order; the first
/// category whose trigger phrases appear in the question wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Name,
    Email,
    Phone,
    CurrentJob,
    Education,
    General,
}

const NAME_TRIGGERS: &[&str] = &["what is my name", "what's my name", "my name", "who am i"];

const EMAIL_TRIGGERS: &[&str] = &["what is my email", "email address", "contact email"];

const PHONE_TRIGGERS: &[&str] = &["what is my phone", "phone number", "contact number"];

const JOB_TRIGGERS: &[&str] = &[
    "where do i work",
    "current job",
    "current position",
    "work at",
];

const EDUCATION_TRIGGERS: &[&str] = &["education", "degree", "university", "college", "studied"];

/// Priority order. Do not reorder: a question mentioning both a name and an email
/// must resolve to `Intent::Name`.
const DISPATCH_ORDER: &[(Intent, &[&str])] = &[
    (Intent::Name, NAME_TRIGGERS),
    (Intent::Email, EMAIL_TRIGGERS),
    (Intent::Phone, PHONE_TRIGGERS),
    (Intent::CurrentJob, JOB_TRIGGERS),
    (Intent::Education, EDUCATION_TRIGGERS),
];

impl Intent {
    /// Classifies a question by case-insensitive substring match against the
    /// trigger phrase lists.
    pub fn classify(question: &str) -> Self {
        let question = question.trim().to_lowercase();
        DISPATCH_ORDER
            .iter()
            .find(|(_, triggers)| triggers.iter().any(|t| question.contains(t)))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::General)
    }
}
