use crate::step::{gate, FlowStep, KeyboardKind, NoticeKind, StepInputs};
use consent_domain::Transaction;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

const VERIFIED_COMPANY: &str = "This company is verified";
const PERMISSION_WARNING: &str = "Permission warning!";
const PSD2_CONSENT: &str = "The Payment Services Directive 2 requires your express consent in order to allow the \
                            Third Party Provider (Stripe) to access your bank account information currently stored \
                            by your bank. This will allow Stripe to make payment on your behalf. You can withdraw \
                            your consent anytime.";
const CANCELLATION_NOTICE: &str = "You are allowed to cancel this agreement within 14 days.";

/// Bloque de una plantilla. Los bloques con datos del usuario (`Forms`,
/// `Selection`, `OwnItems`) se rellenan con las `StepInputs` del paso.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateBlock {
    Notice(NoticeKind, &'static str),
    /// Descripción con fecha de la transacción. `None` toma el texto de la
    /// propia transacción (título o descripción).
    Description {
        title: Option<&'static str>,
        text: Option<&'static str>,
    },
    Plugin(Option<&'static str>, &'static str),
    TransactionItems,
    OwnItems,
    Disclosure(&'static str),
    Selection,
    Forms,
    Document(&'static str),
    /// Resumen de lo aceptado y respondido en pasos anteriores.
    Summary,
}

/// Campo de formulario de una plantilla.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub placeholder: &'static str,
    pub prefill: &'static str,
    pub keyboard: KeyboardKind,
}

impl FormField {
    const fn blank(placeholder: &'static str, keyboard: KeyboardKind) -> Self {
        Self { placeholder, prefill: "", keyboard }
    }
}

/// Predicado de completitud de un paso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Todos los items de la transacción aceptados.
    TransactionItems,
    /// Todos los items propios del paso aceptados.
    OwnItems,
    /// Todos los campos de formulario con texto.
    FormFilled,
    /// Una opción seleccionada.
    OptionSelected,
    Always,
}

/// Plantilla de pantalla de un paso.
#[derive(Debug, Clone)]
pub struct StepTemplate {
    pub blocks: Vec<TemplateBlock>,
    pub forms: Vec<FormField>,
    pub options: Vec<&'static str>,
    /// Items propios (nombre, campos) que el paso presenta para aceptar.
    pub own_items: Vec<(&'static str, Vec<&'static str>)>,
    pub completion: Completion,
}

impl StepTemplate {
    fn new(blocks: Vec<TemplateBlock>, completion: Completion) -> Self {
        Self { blocks, forms: Vec::new(), options: Vec::new(), own_items: Vec::new(), completion }
    }

    /// Evalúa el predicado de completitud con el estado actual.
    pub fn is_complete(&self, transaction: &Transaction, inputs: &StepInputs) -> bool {
        match self.completion {
            Completion::TransactionItems => gate(transaction.line_items()),
            Completion::OwnItems => gate(inputs.items()),
            Completion::FormFilled => inputs.form().values().all(|v| !v.trim().is_empty()),
            Completion::OptionSelected => inputs.selection().is_some(),
            Completion::Always => true,
        }
    }
}

static STEP_TEMPLATES: Lazy<IndexMap<FlowStep, StepTemplate>> = Lazy::new(|| {
    use TemplateBlock::*;
    let mut map = IndexMap::new();

    map.insert(FlowStep::Overview,
               StepTemplate::new(vec![Notice(NoticeKind::Verification, VERIFIED_COMPANY),
                                      Notice(NoticeKind::Warning, PERMISSION_WARNING),
                                      Description { title: None, text: None },
                                      TransactionItems],
                                 Completion::TransactionItems));

    let mut personal = StepTemplate::new(vec![Notice(NoticeKind::Verification, VERIFIED_COMPANY),
                                              Description { title: Some("Personal details"),
                                                            text: Some("Please fill out your personal details.") },
                                              Plugin(Some("digid"), "Fill out your personal details with DigiD"),
                                              Forms],
                                         Completion::FormFilled);
    personal.forms = vec![FormField::blank("First name", KeyboardKind::Default),
                          FormField::blank("Last name", KeyboardKind::Default),
                          FormField::blank("Date of birth", KeyboardKind::NumbersAndPunctuation),
                          FormField::blank("Address", KeyboardKind::Default),
                          FormField::blank("Email", KeyboardKind::Email),
                          FormField::blank("BSN number", KeyboardKind::NumbersAndPunctuation)];
    map.insert(FlowStep::PersonalDetails, personal);

    let mut identity = StepTemplate::new(vec![Notice(NoticeKind::Verification, VERIFIED_COMPANY),
                                              Description { title: Some("Identity document (passport)"),
                                                            text: Some("Please fill out your passport details.") },
                                              Disclosure("Country of issue"),
                                              Forms],
                                         Completion::FormFilled);
    identity.forms = vec![FormField { placeholder: "Passport number",
                                      prefill: "J12393496",
                                      keyboard: KeyboardKind::NumbersAndPunctuation },
                          FormField { placeholder: "Expiration date",
                                      prefill: "02/2022",
                                      keyboard: KeyboardKind::NumbersAndPunctuation }];
    map.insert(FlowStep::IdentityDocuments, identity);

    let mut payment = StepTemplate::new(vec![Notice(NoticeKind::Verification, VERIFIED_COMPANY),
                                             Description { title: Some("Payment method"),
                                                           text: Some("Please select out your payment method") },
                                             Selection],
                                        Completion::OptionSelected);
    payment.options = vec!["Debit card / Credit card", "Paypal", "Directly from account"];
    map.insert(FlowStep::PaymentMethod, payment);

    let mut bank = StepTemplate::new(vec![Notice(NoticeKind::Verification, VERIFIED_COMPANY),
                                          Description { title: Some("Directly from bank account"),
                                                        text: Some(PSD2_CONSENT) },
                                          Notice(NoticeKind::Verification, "This Third Party provider is verified"),
                                          Plugin(Some("stripe"),
                                                 "By clicking the green button below you allow Stripe to access the \
                                                  bank account information from your bank in order to make \
                                                  recurrent payments on your behalf."),
                                          Selection],
                                     Completion::OptionSelected);
    bank.options = vec!["Allow access to my bank information"];
    map.insert(FlowStep::BankVerification, bank);

    let mut newsletter = StepTemplate::new(vec![Notice(NoticeKind::Verification, VERIFIED_COMPANY),
                                                Notice(NoticeKind::Warning, PERMISSION_WARNING),
                                                Description { title: Some("Newsletter subscription"),
                                                              text: Some("Phone House is using a newsletter to \
                                                                          communicate with their clients and \
                                                                          potential clients for marketing \
                                                                          purposes.") },
                                                Selection],
                                           Completion::OptionSelected);
    newsletter.options = vec!["Yes", "No"];
    map.insert(FlowStep::Newsletter, newsletter);

    let mut legal = StepTemplate::new(vec![Notice(NoticeKind::Verification, VERIFIED_COMPANY),
                                           Description { title: Some("Legal terms"), text: Some(PSD2_CONSENT) },
                                           OwnItems],
                                      Completion::OwnItems);
    legal.own_items = vec![("Privacy policy", vec!["Read & accept the privacy policy"]),
                           ("Terms & conditions", vec!["Read & accept the terms & conditions"])];
    map.insert(FlowStep::LegalTerms, legal);

    map.insert(FlowStep::TermDocument1,
               StepTemplate::new(vec![Notice(NoticeKind::Warning, CANCELLATION_NOTICE), Document("privacy-policy.txt")],
                                 Completion::Always));
    map.insert(FlowStep::TermDocument2,
               StepTemplate::new(vec![Notice(NoticeKind::Warning, CANCELLATION_NOTICE),
                                      Document("terms-and-conditions.txt")],
                                 Completion::Always));

    map.insert(FlowStep::FinalOverview,
               StepTemplate::new(vec![Notice(NoticeKind::Verification, VERIFIED_COMPANY),
                                      Description { title: None, text: None },
                                      Summary],
                                 Completion::Always));
    map
});

/// Plantilla del paso. Todos los pasos de `FlowStep::ALL` tienen plantilla.
pub fn template(step: FlowStep) -> &'static StepTemplate {
    &STEP_TEMPLATES[&step]
}
