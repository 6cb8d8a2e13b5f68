//! Field catalog of the Motopack registration form.
//!
//! The form layer owns rendering; this catalog pins the stable keys, the
//! labels used in transcripts, the accepted range of numeric fields, and the
//! option set of every categorical field so the scoring table can be checked
//! for totality.

use super::answers::{Answer, AnswerSet};

pub const FULL_NAME: &str = "full_name";
pub const NATIONAL_ID: &str = "national_id";
pub const PHONE: &str = "phone";
pub const EMAIL: &str = "email";
pub const CITY: &str = "city";
pub const BIRTH_DATE: &str = "birth_date";
pub const DRIVING_LICENSE: &str = "driving_license";
pub const CURRENT_LOANS: &str = "current_loans";
pub const CO_SIGNER: &str = "co_signer";
pub const MONTHLY_INCOME: &str = "monthly_income";
pub const DEPENDENTS: &str = "dependents";
pub const YEARS_IN_BUSINESS: &str = "years_in_business";
pub const DATA_POLICY_ACCEPTED: &str = "data_policy_accepted";

pub const BUSINESS_STORY: &str = "business_story";
pub const MOTORCYCLE_IMPACT: &str = "motorcycle_impact";
pub const STRESS_HANDLING: &str = "stress_handling";
pub const HARD_TIMES: &str = "hard_times";
pub const FINANCE_MANAGEMENT: &str = "finance_management";
pub const REGULAR_PAYMENTS: &str = "regular_payments";

/// What kind of value a field carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free text that identifies the applicant. Never sentiment-scored.
    Identity,
    /// Open question whose answer is translated and sentiment-scored.
    Motivation,
    Choice(&'static [&'static str]),
    /// Inclusive range.
    Number { min: f64, max: f64 },
    Flag,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

pub const LICENSE_OPTIONS: &[&str] = &["yes", "no", "in_process"];
pub const LOAN_OPTIONS: &[&str] = &["none", "one", "several"];
pub const CO_SIGNER_OPTIONS: &[&str] = &["yes", "no"];
/// Monthly income in Colombian pesos.
pub const INCOME_OPTIONS: &[&str] = &["under_1m", "1m_to_2m", "2m_to_3m", "over_3m"];

const CATALOG: &[FieldSpec] = &[
    FieldSpec {
        key: FULL_NAME,
        label: "Nombre completo",
        kind: FieldKind::Identity,
    },
    FieldSpec {
        key: NATIONAL_ID,
        label: "Número de cédula",
        kind: FieldKind::Identity,
    },
    FieldSpec {
        key: PHONE,
        label: "Celular",
        kind: FieldKind::Identity,
    },
    FieldSpec {
        key: EMAIL,
        label: "Correo electrónico",
        kind: FieldKind::Identity,
    },
    FieldSpec {
        key: CITY,
        label: "Ciudad de residencia",
        kind: FieldKind::Identity,
    },
    FieldSpec {
        key: BIRTH_DATE,
        label: "Fecha de nacimiento",
        kind: FieldKind::Date,
    },
    FieldSpec {
        key: DRIVING_LICENSE,
        label: "¿Tienes licencia de conducción para moto?",
        kind: FieldKind::Choice(LICENSE_OPTIONS),
    },
    FieldSpec {
        key: CURRENT_LOANS,
        label: "¿Tienes créditos vigentes?",
        kind: FieldKind::Choice(LOAN_OPTIONS),
    },
    FieldSpec {
        key: CO_SIGNER,
        label: "¿Cuentas con un codeudor?",
        kind: FieldKind::Choice(CO_SIGNER_OPTIONS),
    },
    FieldSpec {
        key: MONTHLY_INCOME,
        label: "¿Cuáles son tus ingresos mensuales?",
        kind: FieldKind::Choice(INCOME_OPTIONS),
    },
    FieldSpec {
        key: DEPENDENTS,
        label: "¿Cuántas personas dependen de ti?",
        kind: FieldKind::Number { min: 0.0, max: 10.0 },
    },
    FieldSpec {
        key: YEARS_IN_BUSINESS,
        label: "¿Hace cuántos años tienes tu negocio?",
        kind: FieldKind::Number { min: 0.0, max: 50.0 },
    },
    FieldSpec {
        key: BUSINESS_STORY,
        label: "¿Puedes contarme un poco sobre tu negocio y cómo comenzaste?",
        kind: FieldKind::Motivation,
    },
    FieldSpec {
        key: MOTORCYCLE_IMPACT,
        label: "¿Cómo crees que una motocicleta podría cambiar las cosas para tu negocio?",
        kind: FieldKind::Motivation,
    },
    FieldSpec {
        key: STRESS_HANDLING,
        label: "¿Cómo manejas el estrés cuando las cosas no salen como lo planeaste?",
        kind: FieldKind::Motivation,
    },
    FieldSpec {
        key: HARD_TIMES,
        label: "Cuando las cosas se ponen difíciles, ¿cómo sueles enfrentarlas?",
        kind: FieldKind::Motivation,
    },
    FieldSpec {
        key: FINANCE_MANAGEMENT,
        label: "¿Cómo manejas tus finanzas?",
        kind: FieldKind::Motivation,
    },
    FieldSpec {
        key: REGULAR_PAYMENTS,
        label: "¿Qué tan cómodo te sentirías haciendo pagos regulares?",
        kind: FieldKind::Motivation,
    },
    FieldSpec {
        key: DATA_POLICY_ACCEPTED,
        label: "Acepto la política de tratamiento de datos",
        kind: FieldKind::Flag,
    },
];

pub fn catalog() -> &'static [FieldSpec] {
    CATALOG
}

pub fn field(key: &str) -> Option<&'static FieldSpec> {
    catalog().iter().find(|spec| spec.key == key)
}

/// Label for a key, falling back to the raw key for fields outside the catalog.
pub fn label_for(key: &str) -> &str {
    field(key).map(|spec| spec.label).unwrap_or(key)
}

pub fn motivational_fields() -> impl Iterator<Item = &'static FieldSpec> {
    catalog()
        .iter()
        .filter(|spec| spec.kind == FieldKind::Motivation)
}

/// Rejects numeric answers outside their field's range, naming the question.
/// Keys outside the catalog and non-numeric values are left to the scorer.
pub fn check_ranges(answers: &AnswerSet) -> Result<(), String> {
    for entry in answers.iter() {
        let (Answer::Number(value), Some(spec)) = (&entry.answer, field(&entry.key)) else {
            continue;
        };
        if let FieldKind::Number { min, max } = spec.kind {
            if !(value.is_finite() && (min..=max).contains(value)) {
                return Err(format!(
                    "'{}' must be between {min} and {max}, got {value}",
                    spec.label
                ));
            }
        }
    }
    Ok(())
}

/// Full `label: value` transcript of every answer, in submission order.
pub fn render_transcript(answers: &AnswerSet) -> String {
    answers
        .iter()
        .map(|entry| format!("{}: {}", label_for(&entry.key), entry.answer.display_value()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Question/answer conversation over the open questions, forwarded downstream.
/// Unanswered questions keep an empty `R:` line.
pub fn render_conversation(answers: &AnswerSet) -> String {
    motivational_fields()
        .map(|spec| {
            format!(
                "P: {}\nR: {}",
                spec.label,
                answers.text(spec.key).unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
